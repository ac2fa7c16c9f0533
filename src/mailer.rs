use reqwest::blocking::Client;
use reqwest::StatusCode;

use crate::{report, Inventory};

const MANDRILL_API: &str = "https://mandrillapp.com/api/1.0";
const SUBJECT_PREFIX: &str = "Jonesborough Farmers Market Inventory Report for ";

/// Possible errors to occur while talking to the mail provider
#[derive(Debug, thiserror::Error)]
pub enum MailError {
    #[error("could not reach the mail provider: {0}")]
    Http(#[from] reqwest::Error),
    #[error("the mail provider rejected the API key")]
    BadKey,
    #[error("sending to {email} failed with status {status}")]
    Rejected { email: String, status: StatusCode },
}

/// The sender identity vendors see on their report emails
#[derive(Clone, Debug)]
pub struct Sender {
    pub email: String,
    pub name: String,
}

#[derive(Debug, serde::Serialize)]
struct Recipient<'a> {
    email: &'a str,
    name: &'a str,
    #[serde(rename = "type")]
    recipient_type: &'static str,
}

/// A single-recipient message in the provider's wire shape
#[derive(Debug, serde::Serialize)]
struct Message<'a> {
    html: &'a str,
    subject: &'a str,
    from_email: &'a str,
    from_name: &'a str,
    to: [Recipient<'a>; 1],
}

impl<'a> Message<'a> {
    fn new(to: (&'a str, &'a str), sender: &'a Sender, subject: &'a str, html: &'a str) -> Self {
        let (email, name) = to;

        Self {
            html,
            subject,
            from_email: &sender.email,
            from_name: &sender.name,
            to: [Recipient {
                email,
                name,
                recipient_type: "to",
            }],
        }
    }
}

/// A Mandrill transactional mail client
pub struct Mailer {
    client: Client,
    key: String,
}

impl Mailer {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            key: key.into(),
        }
    }

    /// Validates the API key against the provider
    ///
    /// Called once at startup so a bad key aborts the run before any
    /// report is downloaded.
    pub fn ping(&self) -> Result<(), MailError> {
        let response = self
            .client
            .post(format!("{MANDRILL_API}/users/ping.json"))
            .json(&serde_json::json!({ "key": self.key }))
            .send()?;

        match response.status().is_success() {
            true => Ok(()),
            false => Err(MailError::BadKey),
        }
    }

    /// Sends one message, failing on any non-success response
    fn send(&self, message: &Message) -> Result<(), MailError> {
        let response = self
            .client
            .post(format!("{MANDRILL_API}/messages/send.json"))
            .json(&serde_json::json!({ "key": self.key, "message": message }))
            .send()?;

        match response.status().is_success() {
            true => Ok(()),
            false => Err(MailError::Rejected {
                email: message.to[0].email.to_owned(),
                status: response.status(),
            }),
        }
    }
}

/// Emails each vendor their inventory report, in aggregation order
///
/// Vendors without an email address are skipped with a notice. The first
/// failed send aborts the remaining sends.
// TODO: consider finishing the batch and reporting failed sends at the end
//       instead of dying on the first one
pub fn email_vendors(
    mailer: &Mailer,
    sender: &Sender,
    inventory: &Inventory,
) -> Result<(), MailError> {
    for vendor in inventory.vendors() {
        if vendor.email().is_empty() {
            tracing::info!("no email found for {}, skipping", vendor.name());
            continue;
        }

        let html = report::render(vendor);
        let subject = format!("{SUBJECT_PREFIX}{}", vendor.name());
        let message = Message::new((vendor.email(), vendor.name()), sender, &subject, &html);

        mailer.send(&message)?;
        tracing::info!("email sent to {} ({})", vendor.name(), vendor.email());
    }

    Ok(())
}
