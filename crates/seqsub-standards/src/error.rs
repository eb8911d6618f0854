#![deny(unsafe_code)]

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum StandardsError {
    #[error("failed to read schema document {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed schema document: {message}")]
    Malformed { message: String },

    #[error("malformed schema document {path}: {message}")]
    InvalidSchema { path: PathBuf, message: String },
}

impl StandardsError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn malformed(message: impl Into<String>) -> Self {
        Self::Malformed {
            message: message.into(),
        }
    }

    /// Attaches the document path to a parse failure.
    pub(crate) fn at(self, path: impl Into<PathBuf>) -> Self {
        match self {
            Self::Malformed { message } => Self::InvalidSchema {
                path: path.into(),
                message,
            },
            other => other,
        }
    }
}
