// src/error.rs
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScanlensError {
    #[error("I/O error: {source} (path: {path})")]
    Io {
        source: std::io::Error,
        path: PathBuf,
    },

    #[error("Could not decode report payload: {0}")]
    Decode(String),

    #[error("Invalid config in {path}: {message}")]
    Config { path: PathBuf, message: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Generic error: {0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, ScanlensError>;

// Allow `?` on std::io::Error by converting to ScanlensError::Io with unknown path.
impl From<std::io::Error> for ScanlensError {
    fn from(source: std::io::Error) -> Self {
        ScanlensError::Io {
            source,
            path: PathBuf::from("<unknown>"),
        }
    }
}

impl From<base64::DecodeError> for ScanlensError {
    fn from(e: base64::DecodeError) -> Self {
        ScanlensError::Decode(e.to_string())
    }
}

impl From<std::string::FromUtf8Error> for ScanlensError {
    fn from(e: std::string::FromUtf8Error) -> Self {
        ScanlensError::Decode(format!("payload is not valid UTF-8: {e}"))
    }
}

impl From<std::fmt::Error> for ScanlensError {
    fn from(e: std::fmt::Error) -> Self {
        ScanlensError::Other(e.to_string())
    }
}
