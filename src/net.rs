// src/net.rs

use std::time::Duration;

use log::debug;
use reqwest::blocking::Client;

use crate::{Error, Result};

const TIMEOUT_SECS: u64 = 30;
const USER_AGENT: &str = concat!("drops_scrape/", env!("CARGO_PKG_VERSION"));

/// Single GET, no retry. A non-2xx status is fatal for the whole run;
/// the drops page either renders completely or not at all.
pub fn get(url: &str) -> Result<String> {
    debug!("Retrieving content from: {url}");

    let client = Client::builder()
        .timeout(Duration::from_secs(TIMEOUT_SECS))
        .user_agent(USER_AGENT)
        .build()?;

    let resp = client.get(url).send()?;
    let status = resp.status();
    if !status.is_success() {
        return Err(Error::FetchStatus {
            url: s!(url),
            status,
        });
    }

    Ok(resp.text()?)
}
