//! Error types for the map search core

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl Error {
    /// Whether this error is caller-correctable (the HTTP layer maps these to
    /// a 400 response; everything else is a 500).
    pub fn is_validation(&self) -> bool {
        matches!(self, Error::Validation(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_errors_are_caller_correctable() {
        assert!(Error::Validation("bad sort".to_string()).is_validation());
        assert!(!Error::Internal("bad state".to_string()).is_validation());
    }
}
