use sitemapper_scanner::FetchError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SiteMapError {
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Failed to read URL list {}: {source}", path.display())]
    Input {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to open output file {}: {source}", path.display())]
    OutputOpen {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write site map: {0}")]
    OutputWrite(#[source] std::io::Error),

    #[error(transparent)]
    Fetch(#[from] FetchError),
}

pub type Result<T> = std::result::Result<T, SiteMapError>;
