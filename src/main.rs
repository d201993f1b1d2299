use anyhow::Result;
use chrono::{Duration, NaiveDate, Utc};
use clap::Parser;
use epic_daily::archive;
use epic_daily::config::Config;
use epic_daily::fetch;
use epic_daily::persist;
use epic_daily::status;
use std::fs;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(about = "Archives a daily EPIC Earth image and regenerates the status document")]
struct Args {
    /// TOML config file; NASA production defaults are used when omitted
    #[arg(long)]
    config: Option<PathBuf>,

    /// Target date (YYYY-MM-DD); defaults to yesterday, UTC
    #[arg(long)]
    date: Option<NaiveDate>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let config = match &args.config {
        Some(path) => Config::read(path)?,
        None => Config::default(),
    };
    fs::create_dir_all(&config.history_dir)?;

    let target_date = args
        .date
        .unwrap_or_else(|| (Utc::now() - Duration::days(1)).date_naive());
    println!("Trying to fetch EPIC image metadata for {}", target_date);

    let client = reqwest::Client::new();
    let entry = match fetch::fetch_metadata_for_date(&client, &config, target_date).await? {
        Some(records) => {
            println!("Found metadata for {}", target_date);
            persist::download_and_store(&client, &config, &records).await?
        }
        None => {
            println!(
                "No EPIC metadata for {}. Using most recent image from history...",
                target_date
            );
            archive::find_fallback(&config.history_dir)?
        }
    };

    status::render(&entry, &config.readme_path)?;
    println!("{} updated", config.readme_path.display());

    Ok(())
}
