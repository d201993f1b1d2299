use thiserror::Error;

#[derive(Error, Debug)]
pub enum ArchiveError {
    #[error("No fallback image found in the history archive")]
    NoFallback,
}
