use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::Inventory;

/// Fixed column layout of the vendor roster file (0-indexed)
mod schema {
    pub const VENDOR_NAME: usize = 0;
    pub const EMAIL: usize = 1;
}

/// Possible errors to occur while reading the vendor roster
#[derive(Debug, thiserror::Error)]
pub enum RosterError {
    #[error("could not open vendor roster {path}: {source}")]
    Open {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("could not parse vendor roster CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("vendor roster row {row} has no column {column}")]
    MissingColumn { row: usize, column: usize },
}

/// Joins the roster file at `path` into the inventory
pub fn join_path(inventory: &mut Inventory, path: impl AsRef<Path>) -> Result<(), RosterError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| RosterError::Open {
        path: path.display().to_string(),
        source,
    })?;

    join_reader(inventory, file)
}

/// Merges vendor email addresses from a roster CSV into the inventory
///
/// The first row is a header and is skipped unconditionally. Matching is
/// by exact, case-sensitive name equality. A roster row naming an unknown
/// vendor is ignored, a vendor without a roster row keeps its empty email,
/// and a later row for the same vendor overwrites an earlier one.
pub fn join_reader<R: Read>(inventory: &mut Inventory, reader: R) -> Result<(), RosterError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(reader);

    for (row, record) in reader.records().enumerate() {
        let record = record?;
        let field = |column| {
            record
                .get(column)
                .ok_or(RosterError::MissingColumn { row, column })
        };

        let name = field(schema::VENDOR_NAME)?;
        let email = field(schema::EMAIL)?;

        if let Some(vendor) = inventory.vendor_mut(name) {
            vendor.set_email(email);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::inventory::fixtures::stock_csv;

    use super::*;

    fn farm_inventory() -> Inventory {
        let csv = stock_csv(&[
            ("Apples", "12.5", "Farm A"),
            ("Honey", "2", "Farm B"),
        ]);

        Inventory::from_reader(csv.as_bytes()).unwrap()
    }

    fn join(inventory: &mut Inventory, roster: &str) {
        join_reader(inventory, roster.as_bytes()).unwrap()
    }

    fn emails(inventory: &Inventory) -> Vec<&str> {
        inventory
            .vendors()
            .iter()
            .map(|vendor| vendor.email())
            .collect()
    }

    #[test]
    fn sets_emails_on_matching_vendors() {
        let mut inventory = farm_inventory();
        join(
            &mut inventory,
            "name,email\n\
             Farm A,farmA@example.com\n\
             Farm B,farmB@example.com",
        );

        assert_eq!(
            emails(&inventory),
            vec!["farmA@example.com", "farmB@example.com"],
        );
    }

    #[test]
    fn matching_is_exact_and_case_sensitive() {
        let mut inventory = farm_inventory();
        join(
            &mut inventory,
            "name,email\n\
             Farm A ,trailing@example.com\n\
             farm a,lower@example.com\n\
             FARM B,upper@example.com",
        );

        assert_eq!(emails(&inventory), vec!["", ""]);
    }

    #[test]
    fn later_roster_row_wins() {
        let mut inventory = farm_inventory();
        join(
            &mut inventory,
            "name,email\n\
             Farm A,old@example.com\n\
             Farm A,new@example.com",
        );

        assert_eq!(inventory.vendors()[0].email(), "new@example.com");
    }

    #[test]
    fn unknown_roster_vendor_is_ignored() {
        let mut inventory = farm_inventory();
        join(
            &mut inventory,
            "name,email\n\
             Farm Z,farmZ@example.com",
        );

        assert_eq!(emails(&inventory), vec!["", ""]);
    }

    #[test]
    fn header_row_is_never_joined() {
        let mut inventory = farm_inventory();
        // a data row happens to repeat the header of another file
        join(
            &mut inventory,
            "Farm A,farmA@example.com\n\
             Farm B,farmB@example.com",
        );

        assert_eq!(emails(&inventory), vec!["", "farmB@example.com"]);
    }

    #[test]
    fn single_column_roster_is_fatal() {
        let mut inventory = farm_inventory();
        let result = join_reader(&mut inventory, "name\nFarm A".as_bytes());

        assert!(matches!(
            result,
            Err(RosterError::MissingColumn { row: 0, column: 1 }),
        ));
    }

    #[test]
    fn missing_roster_file_is_fatal() {
        let mut inventory = farm_inventory();

        assert!(matches!(
            join_path(&mut inventory, "does/not/exist.csv"),
            Err(RosterError::Open { .. }),
        ));
    }
}
