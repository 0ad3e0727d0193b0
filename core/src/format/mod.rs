//! # Formatter Boundary
//!
//! The last step of a rewrite: turn the edited buffer into canonical layout.
//!
//! - **aligner**: built-in column alignment of struct fields (default).
//! - **external**: pipes through `gofmt`.
//! - [`Verbatim`]: validation only.

pub mod aligner;
pub mod external;

pub use aligner::Aligner;
pub use external::Gofmt;

use crate::error::{AppError, AppResult};
use crate::parser::parse_go;

/// Canonicalizes a rewritten buffer.
pub trait SourceFormatter: Send + Sync {
    /// Returns the formatted buffer, or an error if it is not valid Go.
    fn format(&self, source: &str) -> AppResult<String>;
}

/// Leaves the layout alone but still rejects invalid output.
#[derive(Debug, Clone, Copy, Default)]
pub struct Verbatim;

impl SourceFormatter for Verbatim {
    fn format(&self, source: &str) -> AppResult<String> {
        parse_go(source, "<rewritten>").map_err(invalid_output)?;
        Ok(source.to_string())
    }
}

pub(crate) fn invalid_output(err: AppError) -> AppError {
    AppError::Format(format!("rewritten source is not valid Go: {}", err))
}
