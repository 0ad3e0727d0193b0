//! # Error Handling
//!
//! Provides the unified `AppError` enum used across the workspace.

use crate::tag::TagError;
use derive_more::{Display, From};

/// The Global Error Enum.
///
/// We use `derive_more` for boilerplate.
/// Note: String errors default to `General`.
#[derive(Debug, Display, From)]
pub enum AppError {
    /// Wrapper for standard IO errors.
    #[display("IO Error: {_0}")]
    Io(std::io::Error),

    /// The input is not syntactically valid Go.
    /// Fatal for the unit; no edits have been applied when this is returned.
    #[from(ignore)]
    #[display("Parse Error: {unit}:{line}:{column}: {message}")]
    Parse {
        /// Label of the unit (usually a file name).
        unit: String,
        /// 1-based line of the first syntax error.
        line: usize,
        /// 1-based column of the first syntax error.
        column: usize,
        /// Short description of the offending construct.
        message: String,
    },

    /// An existing struct tag could not be decomposed into key/value pairs.
    #[from(ignore)]
    #[display("Malformed Tag: {unit}: field '{field}': {reason}")]
    MalformedAnnotation {
        /// Label of the unit.
        unit: String,
        /// Field carrying the tag.
        field: String,
        /// Why the codec rejected it.
        reason: TagError,
    },

    /// A `// st:` comment could not be understood.
    #[from(ignore)]
    #[display("Directive Error: {unit}: {reason}")]
    Directive {
        /// Label of the unit.
        unit: String,
        /// Description of the rejected directive.
        reason: String,
    },

    /// An edit was submitted to the offset ledger out of source order.
    #[from(ignore)]
    #[display("Edit Order Error: edit at {next} submitted after edit at {previous}")]
    EditOrder {
        /// Original start of the last applied edit.
        previous: usize,
        /// Original start of the rejected edit.
        next: usize,
    },

    /// The formatter boundary refused the buffer.
    #[from(ignore)]
    #[display("Format Error: {_0}")]
    Format(String),

    /// Generic errors.
    #[display("General Error: {_0}")]
    General(String),
}

/// Manual implementation of the standard Error trait.
impl std::error::Error for AppError {}

/// Helper type alias for Result using AppError.
pub type AppResult<T> = Result<T, AppError>;
