use std::convert::Infallible;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("could not open word list {path:?}: {source}")]
    SourceUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed reading word list: {0}")]
    Read(#[from] std::io::Error),

    #[error("token on line {line} is {len} bytes long, maximum is {max}")]
    OverLongToken { line: usize, len: usize, max: usize },

    #[error("token {token:?} on line {line} does not start with an ASCII letter")]
    NonAlphabeticLeadingCharacter { token: String, line: usize },

    #[error("could not allocate storage for word list")]
    AllocationFailure(#[from] std::collections::TryReserveError),

    #[error("index is already loaded, unload it first")]
    AlreadyLoaded,
}

/// Unloading only drops owned storage and never fails.
pub type UnloadError = Infallible;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("could not read config {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
