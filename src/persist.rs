use crate::config::Config;
use crate::record::{ImageRecord, ResolvedEntry};
use anyhow::{anyhow, Context, Result};
use rand::seq::SliceRandom;
use reqwest::Client;
use std::fs;
use std::time::Duration;
use url::Url;

/// Picks one record at random, downloads its image and writes the
/// image/sidecar pair into the day folder. A download failure here is fatal;
/// there is nothing to fall back to once fresh metadata exists.
pub async fn download_and_store(
    client: &Client,
    config: &Config,
    records: &[ImageRecord],
) -> Result<ResolvedEntry> {
    let record = records
        .choose(&mut rand::thread_rng())
        .ok_or(anyhow!("No records to choose from"))?
        .clone();
    println!(
        "Random image selected: {} at {:?}",
        record.image, record.centroid_coordinates
    );

    let timestamp = record
        .timestamp()
        .with_context(|| format!("Unparseable capture timestamp: {}", record.date))?;

    let day_dir = config
        .history_dir
        .join(timestamp.format("%Y-%m-%d").to_string());
    fs::create_dir_all(&day_dir)?;

    let url = image_url(config, &record)?;
    let image_path = day_dir.join(format!("{}.jpg", timestamp.format("%H%M%S")));

    let timeout = Duration::from_secs(config.download_timeout_secs);
    let response = client
        .get(url)
        .timeout(timeout)
        .send()
        .await
        .context("Failed to download image")?
        .error_for_status()
        .context("Failed to download image")?;
    let bytes = response.bytes().await.context("Failed to download image")?;

    fs::write(&image_path, &bytes)?;
    println!("Downloaded {}", image_path.display());

    // Sidecar write comes after the image write; a crash in between leaves an
    // image without metadata, which the fallback path tolerates.
    record.write(image_path.with_extension("json"))?;

    Ok(ResolvedEntry { record, image_path })
}

/// Derives the archive URL for a record: year/month/day path segments under
/// the natural-color base, then the image id with a jpg extension.
pub fn image_url(config: &Config, record: &ImageRecord) -> Result<Url> {
    let timestamp = record.timestamp()?;
    let url = Url::parse(&format!(
        "{}/{}/jpg/{}.jpg",
        config.image_base_url,
        timestamp.format("%Y/%m/%d"),
        record.image
    ))?;
    Ok(url)
}
