use std::io;
use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("could not read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("could not parse {}: {source}", .path.display())]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("could not parse {}: {source}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid glob pattern '{pattern}': {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },

    /// A mandatory key is absent from a config file.
    #[error("{field} not found in {}", .path.display())]
    MissingRequiredField { field: &'static str, path: PathBuf },

    #[error("unparseable datetime '{value}' in {}", .path.display())]
    InvalidDatetime { value: String, path: PathBuf },

    #[error("'{0}' is not a recognized stage")]
    UnrecognizedStage(String),

    #[error("playlist named {0} not found")]
    PlaylistNotFound(String),

    #[error("could not write output: {0}")]
    Output(#[source] io::Error),

    #[error("could not serialize output: {0}")]
    Serialize(#[source] serde_yaml::Error),
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn yaml(path: impl Into<PathBuf>, source: serde_yaml::Error) -> Self {
        Error::Yaml {
            path: path.into(),
            source,
        }
    }
}
