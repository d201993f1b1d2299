pub mod archive;
pub mod config;
pub mod error;
pub mod fetch;
pub mod persist;
pub mod record;
pub mod status;
