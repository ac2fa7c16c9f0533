use std::fs::File;
use std::path::Path;

use reqwest::blocking::Client;
use reqwest::StatusCode;

/// Possible errors to occur while retrieving reports from the site
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("could not reach the report site: {0}")]
    Http(#[from] reqwest::Error),
    #[error("the report site rejected the login credentials")]
    LoginRejected,
    #[error("report download failed with status {0}")]
    Download(StatusCode),
    #[error("could not write the downloaded report: {0}")]
    Write(#[from] std::io::Error),
}

/// A client for the report site, signed in and ready to download reports
///
/// The site tracks the login through a session cookie, so the client
/// keeps a cookie store for its whole lifetime.
pub struct Downloader {
    client: Client,
    base_url: String,
}

impl Downloader {
    /// Signs in to the report site at `base_url` with the given credentials
    pub fn new(base_url: &str, email: &str, password: &str) -> Result<Self, FetchError> {
        let base_url = base_url.trim_end_matches('/').to_owned();
        let client = Client::builder().cookie_store(true).build()?;

        let response = client
            .post(format!("{base_url}/sessions"))
            .form(&[("login", email), ("password", password)])
            .send()?;
        if !response.status().is_success() {
            return Err(FetchError::LoginRejected);
        }

        Ok(Self { client, base_url })
    }

    /// Downloads the stock items report and writes it to `destination`
    pub fn get_stock_items_report(&self, destination: &Path) -> Result<(), FetchError> {
        let mut response = self
            .client
            .get(format!("{}/stock_items.csv", self.base_url))
            .send()?;
        if !response.status().is_success() {
            return Err(FetchError::Download(response.status()));
        }

        let mut file = File::create(destination)?;
        response.copy_to(&mut file)?;

        Ok(())
    }
}
