use crate::record::ResolvedEntry;
use anyhow::Result;
use chrono::{DateTime, Utc};
use std::fs;
use std::path::Path;

const TIMESTAMP_FORMAT: &str = "%a %b %d %H:%M:%S UTC %Y";

/// Regenerates the status document for the resolved entry, replacing any
/// previous version. History lives in the archive, not in this file.
pub fn render(entry: &ResolvedEntry, readme_path: &Path) -> Result<()> {
    let content = render_content(entry, readme_path, Utc::now());
    fs::write(readme_path, content)?;
    Ok(())
}

/// Link to the image from where the README sits. With the default relative
/// config this yields `./history/...`; an absolute archive outside the
/// README's directory is linked by its absolute path.
fn image_link(image_path: &Path, readme_path: &Path) -> String {
    let base = readme_path.parent().unwrap_or(Path::new(""));
    let rel = image_path.strip_prefix(base).unwrap_or(image_path);
    if rel.is_absolute() {
        rel.display().to_string()
    } else {
        format!("./{}", rel.display())
    }
}

fn render_content(entry: &ResolvedEntry, readme_path: &Path, generated_at: DateTime<Utc>) -> String {
    let image_rel_path = image_link(&entry.image_path, readme_path);
    let coords = &entry.record.centroid_coordinates;

    format!(
        "# Daily 🌎 Image

![Earth Image]({image_rel_path})

**Coordinates:** {lat}, {lon}
**Caption:** {caption}

---

## Credits

- Updated using NASA's EPIC API
- Imagery © NASA EPIC / NOAA DSCOVR spacecraft
- This repo is powered by an automated workflow that runs the whole process.

## What it does

- Runs daily at 13:00 UTC
- Downloads a random EPIC image of Earth
- Updates this README with the latest image and its metadata
- If NASA's EPIC API does not publish a new image, the most recent archived image is shown instead.

## How it works

- Fetches all available EPIC images for the day
- Picks one at random
- Saves the image and its metadata to the history archive
- Updates this README

_Last updated: {generated_at}_
",
        image_rel_path = image_rel_path,
        lat = coords.lat,
        lon = coords.lon,
        caption = entry.record.caption,
        generated_at = generated_at.format(TIMESTAMP_FORMAT),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{Centroid, ImageRecord};
    use std::path::PathBuf;

    fn mock_entry() -> ResolvedEntry {
        ResolvedEntry {
            record: ImageRecord {
                image: "img1".to_string(),
                date: "2024-01-01 12:00:00".to_string(),
                caption: "C1".to_string(),
                centroid_coordinates: Centroid { lat: 1.0, lon: 2.0 },
            },
            image_path: PathBuf::from("history/2024-01-01/120000.jpg"),
        }
    }

    fn embedded_image_link(content: &str) -> String {
        let line = content
            .lines()
            .find(|line| line.starts_with("![Earth Image]("))
            .unwrap();
        line.trim_start_matches("![Earth Image](")
            .trim_end_matches(')')
            .to_string()
    }

    #[test]
    fn test_render_content() {
        let generated_at = DateTime::parse_from_rfc3339("2024-01-02T13:00:00Z")
            .unwrap()
            .to_utc();
        let content = render_content(&mock_entry(), Path::new("README.md"), generated_at);

        assert_eq!(content.contains("![Earth Image](./history/2024-01-01/120000.jpg)"), true);
        assert_eq!(content.contains("**Coordinates:** 1, 2"), true);
        assert_eq!(content.contains("**Caption:** C1"), true);
        assert_eq!(content.contains("_Last updated: Tue Jan 02 13:00:00 UTC 2024_"), true);
    }

    #[test]
    fn test_image_link_under_absolute_archive() {
        // Archive rooted next to the README resolves to a relative link
        let link = image_link(
            Path::new("/data/epic/history/2024-01-01/120000.jpg"),
            Path::new("/data/epic/README.md"),
        );
        assert_eq!(link, "./history/2024-01-01/120000.jpg");

        // Archive outside the README's directory keeps its absolute path
        let link = image_link(
            Path::new("/srv/archive/2024-01-01/120000.jpg"),
            Path::new("/data/epic/README.md"),
        );
        assert_eq!(link, "/srv/archive/2024-01-01/120000.jpg");
    }

    #[test]
    fn test_rendered_image_path_exists() {
        let root = tempfile::tempdir().unwrap();
        let day_dir = root.path().join("history/2024-01-01");
        fs::create_dir_all(&day_dir).unwrap();
        let image_path = day_dir.join("120000.jpg");
        fs::write(&image_path, b"jpegbytes").unwrap();

        let readme_path = root.path().join("README.md");
        let entry = ResolvedEntry {
            record: mock_entry().record,
            image_path,
        };
        render(&entry, &readme_path).unwrap();

        let content = fs::read_to_string(&readme_path).unwrap();
        let link = embedded_image_link(&content);
        assert_eq!(link, "./history/2024-01-01/120000.jpg");

        let linked = readme_path.parent().unwrap().join(link.trim_start_matches("./"));
        assert_eq!(linked.exists(), true);
    }

    #[test]
    fn test_render_overwrites_previous_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("README.md");
        fs::write(&path, "stale contents").unwrap();

        render(&mock_entry(), &path).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content.contains("stale contents"), false);
        assert_eq!(content.contains("# Daily 🌎 Image"), true);
    }
}
