use std::path::PathBuf;
use thiserror::Error;

/// Failure to obtain a usable question set.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("could not read question file {path:?}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid JSON question data: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid CSV question data: {0}")]
    Csv(#[from] csv::Error),
    #[error("the question set is empty")]
    Empty,
    #[error("question {} is malformed: {reason}", .index + 1)]
    Malformed { index: usize, reason: String },
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Load(#[from] LoadError),
    #[error("index {index} is out of range for {len} items")]
    Range { index: isize, len: usize },
    #[error("{0}")]
    InvalidState(&'static str),
}

#[cfg(test)]
impl SessionError {
    pub fn is_range(&self) -> bool {
        matches!(self, SessionError::Range { .. })
    }

    pub fn is_invalid_state(&self) -> bool {
        matches!(self, SessionError::InvalidState(_))
    }
}
