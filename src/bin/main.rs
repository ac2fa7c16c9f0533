use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use vendor_mailer::{mailer, roster, Downloader, Inventory, Mailer, Sender};

/// Emails each vendor a report of their items currently in stock
#[derive(Debug, Parser)]
#[clap(version)]
struct Args {
    /// The address of the site reports will be retrieved from
    #[clap(long, default_value = "https://jonesboroughfarmersmkt.shopkeepapp.com")]
    site: String,
    /// The email used to log in to the report site
    #[clap(long)]
    email: String,
    /// The password used to log in to the report site
    #[clap(long)]
    password: String,
    /// A CSV file containing vendor names and their email addresses
    #[clap(long = "vendorEmails")]
    vendor_emails: PathBuf,
    /// API key for the transactional mail provider
    #[clap(long)]
    key: String,
    /// The email address vendors will see in the From field
    #[clap(long = "fromEmail")]
    from_email: String,
    /// The name vendors will see associated with the from address
    #[clap(long = "fromName")]
    from_name: String,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let mailer = Mailer::new(args.key.clone());
    mailer
        .ping()
        .context("failed to initialize the mail client, bad key?")?;

    let download_dir = tempfile::Builder::new()
        .prefix("vendor-mailer")
        .tempdir()
        .context("failed to create temporary download directory")?;
    let report_path = download_dir.path().join("stock_items.csv");

    let downloader = Downloader::new(&args.site, &args.email, &args.password)
        .context("failed to initialize the downloader")?;
    downloader
        .get_stock_items_report(&report_path)
        .context("failed to get the stock items report")?;

    let mut inventory = Inventory::from_path(&report_path)?;
    roster::join_path(&mut inventory, &args.vendor_emails)?;

    let sender = Sender {
        email: args.from_email,
        name: args.from_name,
    };
    mailer::email_vendors(&mailer, &sender, &inventory)?;

    // an early error drops the directory instead, which cleans up silently
    if let Err(err) = download_dir.close() {
        tracing::warn!("could not remove temporary download directory: {err}");
    }

    Ok(())
}
