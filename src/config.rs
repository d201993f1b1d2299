use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use toml;

const DEFAULT_API_URL: &str = "https://api.nasa.gov/EPIC/api/natural";
const DEFAULT_IMAGE_BASE_URL: &str = "https://epic.gsfc.nasa.gov/archive/natural";
const API_KEY_ENV_VAR: &str = "NASA_API_KEY";
const DEMO_API_KEY: &str = "DEMO_KEY";

/// Run settings. Fields omitted from the TOML file fall back to the NASA
/// production defaults.
#[derive(Deserialize, Serialize, Clone, Debug)]
#[serde(default)]
pub struct Config {
    pub api_url: String,
    pub image_base_url: String,
    pub history_dir: PathBuf,
    pub readme_path: PathBuf,
    pub api_key: String,
    pub download_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            image_base_url: DEFAULT_IMAGE_BASE_URL.to_string(),
            history_dir: PathBuf::from("history"),
            readme_path: PathBuf::from("README.md"),
            api_key: api_key_from_env(),
            download_timeout_secs: 15,
        }
    }
}

fn api_key_from_env() -> String {
    env::var(API_KEY_ENV_VAR).unwrap_or_else(|_| DEMO_API_KEY.to_string())
}

impl Config {
    pub fn read<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    #[allow(dead_code)]
    pub fn write<P: AsRef<Path>>(self: &Self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }
}
