use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::{Item, Vendor};

/// Fixed column layout of the stock items report (0-indexed)
///
/// The layout is an external contract of the upstream report export.
/// If the format drifts, this is the only place that changes.
mod schema {
    pub const ITEM_NAME: usize = 1;
    pub const QUANTITY: usize = 12;
    pub const VENDOR_NAME: usize = 16;

    /// Total columns in the export, used by the test fixtures
    #[cfg(test)]
    pub const WIDTH: usize = 17;
}

/// Possible errors to occur while reading the stock items report
#[derive(Debug, thiserror::Error)]
pub enum InventoryError {
    #[error("could not open stock items report {path}: {source}")]
    Open {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("could not parse stock items CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("stock items row {row} has no column {column}")]
    MissingColumn { row: usize, column: usize },
}

/// The stock items report, aggregated into per-vendor item lists
///
/// Vendors are kept in the order they were first seen, so reports go out
/// in the same order the upstream file lists them. The name lookup is an
/// index into the owned vendor list; the list is the sole owner.
#[derive(Debug, Default, PartialEq)]
pub struct Inventory {
    vendors: Vec<Vendor>,
    by_name: HashMap<String, usize>,
}

impl Inventory {
    /// Reads and aggregates the stock items report at `path`
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, InventoryError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| InventoryError::Open {
            path: path.display().to_string(),
            source,
        })?;

        Self::from_reader(file)
    }

    /// Aggregates a stock items CSV into per-vendor item lists
    ///
    /// The first row is a header and is skipped unconditionally. A row
    /// whose quantity does not parse contributes no item and is logged;
    /// every other row is still processed. A structurally malformed CSV
    /// is fatal for the whole file.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, InventoryError> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_reader(reader);
        let mut inventory = Self::default();

        for (row, record) in reader.records().enumerate() {
            let record = record?;
            let field = |column| {
                record
                    .get(column)
                    .ok_or(InventoryError::MissingColumn { row, column })
            };

            let vendor_name = field(schema::VENDOR_NAME)?;
            let item_name = field(schema::ITEM_NAME)?;
            let quantity = match field(schema::QUANTITY)?.parse::<f64>() {
                Ok(quantity) => quantity,
                Err(_) => {
                    tracing::warn!("failed parsing item quantity on {item_name}");
                    continue;
                }
            };

            inventory
                .vendor_entry(vendor_name)
                .push_item(Item::new(item_name, quantity));
        }

        Ok(inventory)
    }

    /// The vendors in first-seen order
    pub fn vendors(&self) -> &[Vendor] {
        &self.vendors
    }

    /// Looks a vendor up by exact name
    pub(crate) fn vendor_mut(&mut self, name: &str) -> Option<&mut Vendor> {
        self.by_name.get(name).map(|&index| &mut self.vendors[index])
    }

    /// The vendor with the given name, created on first sight
    fn vendor_entry(&mut self, name: &str) -> &mut Vendor {
        let index = match self.by_name.get(name) {
            Some(&index) => index,
            None => {
                self.vendors.push(Vendor::new(name));
                self.by_name.insert(name.to_owned(), self.vendors.len() - 1);
                self.vendors.len() - 1
            }
        };

        &mut self.vendors[index]
    }
}
