use crate::error::ArchiveError;
use crate::record::{ImageRecord, ResolvedEntry};
use anyhow::{anyhow, Result};
use chrono::NaiveDate;
use std::fs;
use std::path::{Path, PathBuf};

const DAY_DIR_FORMAT: &str = "%Y-%m-%d";
const IMAGE_EXTENSION: &str = "jpg";

/// Resolves the most recent archived entry. Day folders are scanned
/// newest-first; the first one holding an image wins. An image without a
/// metadata sidecar gets a placeholder record rather than failing the run.
/// An archive with no image anywhere is fatal.
pub fn find_fallback(history_dir: &Path) -> Result<ResolvedEntry> {
    let mut day_dirs = list_day_dirs(history_dir)?;
    day_dirs.sort();
    day_dirs.reverse();

    for dir in &day_dirs {
        if let Some(image_path) = first_image(dir)? {
            println!("Using fallback image from {}", dir.display());
            let record = load_or_synthesize(&image_path, dir)?;
            return Ok(ResolvedEntry { record, image_path });
        }
    }
    Err(ArchiveError::NoFallback.into())
}

fn list_day_dirs(history_dir: &Path) -> Result<Vec<PathBuf>> {
    let mut day_dirs: Vec<PathBuf> = vec![];
    if !history_dir.is_dir() {
        return Ok(day_dirs);
    }
    for entry in fs::read_dir(history_dir)? {
        let path = entry?.path();
        if path.is_dir() && dir_date(&path).is_some() {
            day_dirs.push(path);
        }
    }
    Ok(day_dirs)
}

fn dir_date(dir: &Path) -> Option<NaiveDate> {
    let name = dir.file_name()?.to_str()?;
    NaiveDate::parse_from_str(name, DAY_DIR_FORMAT).ok()
}

fn first_image(dir: &Path) -> Result<Option<PathBuf>> {
    let mut images: Vec<PathBuf> = fs::read_dir(dir)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.extension().map_or(false, |ext| ext == IMAGE_EXTENSION))
        .collect();
    images.sort();
    Ok(images.into_iter().next())
}

fn load_or_synthesize(image_path: &Path, dir: &Path) -> Result<ImageRecord> {
    let sidecar = image_path.with_extension("json");
    if sidecar.exists() {
        println!("Loaded metadata for fallback image");
        return ImageRecord::read(&sidecar);
    }

    println!("No metadata file found for fallback image, using placeholder values");
    let date = dir_date(dir).ok_or(anyhow!("Invalid day folder name: {}", dir.display()))?;
    let image_name = image_path
        .file_stem()
        .and_then(|stem| stem.to_str())
        .ok_or(anyhow!("Invalid image file name: {}", image_path.display()))?;
    Ok(ImageRecord::placeholder(date, image_name))
}
