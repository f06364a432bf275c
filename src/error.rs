use std::path::PathBuf;

use thiserror::Error;

/// Failure to resolve the configuration for a platform/instrument pair.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("reading config file {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parsing config file {}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("no config section '{0}'")]
    MissingSection(String),

    #[error("config section '{section}' is invalid")]
    InvalidSection {
        section: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Malformed RSR text file.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("reading {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{}:{line}: '{token}' is not a number", .path.display())]
    InvalidNumber {
        path: PathBuf,
        line: usize,
        token: String,
    },

    #[error("{}:{line}: expected at least 2 columns, found {found}", .path.display())]
    TooFewColumns {
        path: PathBuf,
        line: usize,
        found: usize,
    },

    #[error("{}:{line}: expected {expected} columns, found {found}", .path.display())]
    Ragged {
        path: PathBuf,
        line: usize,
        expected: usize,
        found: usize,
    },

    #[error("{}: no data rows", .0.display())]
    Empty(PathBuf),
}

/// Everything that can stop a band loader from being constructed.
///
/// A band without an existing file is *not* an error: the loader is built
/// with no response data instead.
#[derive(Debug, Error)]
pub enum RsrError {
    #[error("unknown band '{0}'")]
    UnknownBand(String),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Parse(#[from] ParseError),
}
