// src/error.rs

use std::path::PathBuf;

/// Fatal errors only. Field- and row-level problems during extraction are
/// absorbed where they happen (logged, degraded to None/Unknown/skip) and
/// never surface through this type.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("unable to retrieve {url} (status: {status})")]
    FetchStatus {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("spreadsheet error: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    #[error("configuration error in {}: {source}", path.display())]
    ConfigParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("configuration error: {0}")]
    Config(String),

    #[error("export aborted; {} was left unwritten", .0.display())]
    SaveAborted(PathBuf),
}

pub type Result<T> = std::result::Result<T, Error>;
