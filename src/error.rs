// src/error.rs
use std::path::PathBuf;

use thiserror::Error;

use crate::driver::DriverError;

/// Everything a dataset run or a store operation can fail with.
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("page driver: {0}")]
    Driver(#[from] DriverError),

    #[error("{action} {}: {source}", path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("json in {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("config {}: {source}", path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

impl ScrapeError {
    pub(crate) fn io(action: &'static str, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io { action, path: path.into(), source }
    }
}

pub type Result<T, E = ScrapeError> = std::result::Result<T, E>;
