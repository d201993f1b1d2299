use crate::config::Config;
use crate::record::ImageRecord;
use anyhow::{anyhow, Result};
use chrono::NaiveDate;
use reqwest::Client;
use std::time::Duration;
use url::Url;

/// Queries the EPIC metadata endpoint for the given date. "No data" is an
/// expected outcome, not an error: a transport failure, a non-200 status, an
/// unparseable body, or an empty array all yield `Ok(None)` and leave the
/// caller to fall back to the archive. A single attempt, no retries.
pub async fn fetch_metadata_for_date(
    client: &Client,
    config: &Config,
    date: NaiveDate,
) -> Result<Option<Vec<ImageRecord>>> {
    let url = metadata_url(config, date)?;

    let timeout = Duration::from_secs(config.download_timeout_secs);
    let response = match client.get(url).timeout(timeout).send().await {
        Ok(response) => response,
        Err(e) => {
            println!("Metadata request failed: {}", e);
            return Ok(None);
        }
    };

    if !response.status().is_success() {
        return Ok(None);
    }

    let records: Vec<ImageRecord> = match response.json().await {
        Ok(records) => records,
        Err(e) => {
            println!("Unable to parse metadata response: {}", e);
            return Ok(None);
        }
    };

    if records.is_empty() {
        return Ok(None);
    }
    Ok(Some(records))
}

fn metadata_url(config: &Config, date: NaiveDate) -> Result<Url> {
    let date_str = date.format("%Y-%m-%d").to_string();
    let mut url = Url::parse(&config.api_url)?;
    url.path_segments_mut()
        .map_err(|_| anyhow!("API url cannot be a base: {}", config.api_url))?
        .extend(["date", date_str.as_str()]);
    url.query_pairs_mut().append_pair("api_key", &config.api_key);
    Ok(url)
}
