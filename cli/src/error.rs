#![deny(missing_docs)]

//! # CLI Errors
//!
//! Error types for the CLI crate.

use derive_more::{Display, From};
use structtag_core::AppError;

/// Main error enum for CLI operations.
#[derive(Debug, Display, From)]
pub enum CliError {
    /// IO Error wrapper.
    #[display("IO Error: {}", _0)]
    Io(std::io::Error),

    /// A rewrite failed.
    #[display("{}", _0)]
    App(AppError),

    /// Some files could not be rewritten.
    #[display("{failed} of {total} files failed")]
    #[from(ignore)]
    Partial {
        /// Number of failed files.
        failed: usize,
        /// Number of files attempted.
        total: usize,
    },

    /// General failure message.
    #[display("Operation failed: {}", _0)]
    General(String),
}

impl std::error::Error for CliError {}

/// Result type alias.
pub type CliResult<T> = Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let err = CliError::from(AppError::General("boom".into()));
        assert_eq!(err.to_string(), "General Error: boom");

        let err = CliError::Partial { failed: 1, total: 3 };
        assert_eq!(err.to_string(), "1 of 3 files failed");
    }
}
