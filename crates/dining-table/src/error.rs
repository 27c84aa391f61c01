//! Error types for table rendering.
//!
//! Rendering itself is an in-memory transformation, so most failures come
//! from collaborators: the CSV encoder, a caller-supplied worksheet, or
//! options that do not describe a valid tag configuration.

use thiserror::Error;

/// Errors that can occur while configuring or rendering a table.
#[derive(Debug, Error)]
pub enum Error {
    /// The CSV encoder rejected a row.
    #[error("CSV output failed: {0}")]
    Csv(#[from] csv::Error),

    /// The CSV buffer could not be flushed.
    #[error("CSV output failed: {0}")]
    CsvFlush(String),

    /// CSV delimiters and quotes must be single ASCII characters.
    #[error("CSV {option} must be an ASCII character, got {value:?}")]
    NonAsciiCsvOption { option: &'static str, value: char },

    /// Encoded output was not valid UTF-8.
    #[error("output is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    /// The worksheet refused a row.
    #[error("worksheet rejected a row: {0}")]
    Worksheet(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Options given to a column or presenter have the wrong shape.
    #[error("invalid options for {target}: {source}")]
    InvalidOptions {
        target: String,
        #[source]
        source: serde_json::Error,
    },

    /// A configuration file could not be read.
    #[error("failed to read {}: {source}", .path.display())]
    Load {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A YAML configuration document could not be parsed.
    #[error("YAML configuration error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// A JSON configuration document could not be parsed.
    #[error("JSON configuration error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub(crate) fn invalid_options(target: impl Into<String>, source: serde_json::Error) -> Self {
        Error::InvalidOptions {
            target: target.into(),
            source,
        }
    }
}

impl From<csv::IntoInnerError<csv::Writer<Vec<u8>>>> for Error {
    fn from(err: csv::IntoInnerError<csv::Writer<Vec<u8>>>) -> Self {
        Error::CsvFlush(err.to_string())
    }
}

/// Result type for rendering operations.
pub type Result<T> = std::result::Result<T, Error>;
