pub use self::{
    fetch::{Downloader, FetchError},
    inventory::{Inventory, InventoryError},
    mailer::{MailError, Mailer, Sender},
    roster::RosterError,
    vendor::{Item, Vendor},
};

pub mod fetch;
mod inventory;
pub mod mailer;
pub mod report;
pub mod roster;
mod vendor;
