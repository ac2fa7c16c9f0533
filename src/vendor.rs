/// A single line item attributed to a vendor
#[derive(Clone, Debug, PartialEq)]
pub struct Item {
    name: String,
    quantity: f64,
}

impl Item {
    pub fn new(name: impl Into<String>, quantity: f64) -> Self {
        Self {
            name: name.into(),
            quantity,
        }
    }

    /// The item name as it appears in the stock items report
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The quantity currently on hand
    pub fn quantity(&self) -> f64 {
        self.quantity
    }
}

/// A vendor and the stock items attributed to them
///
/// Vendors are created during aggregation with an empty email address;
/// the roster join fills the address in afterwards. A vendor that never
/// gets an address is still aggregated, it is only skipped at send time.
#[derive(Clone, Debug, PartialEq)]
pub struct Vendor {
    name: String,
    items: Vec<Item>,
    email: String,
}

impl Vendor {
    pub(crate) fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            items: Vec::new(),
            email: String::new(),
        }
    }

    /// The vendor name, the join key between the report and the roster
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The vendor's items, in the order the report listed them
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// The vendor's email address
    ///
    /// Empty until a roster row matched this vendor.
    pub fn email(&self) -> &str {
        &self.email
    }

    pub(crate) fn push_item(&mut self, item: Item) {
        self.items.push(item);
    }

    pub(crate) fn set_email(&mut self, email: impl Into<String>) {
        self.email = email.into();
    }
}
