#![deny(missing_docs)]

//! # Structtag Core
//!
//! Adds serialization tags to Go struct fields by editing the source text in
//! place, then hands the result to a formatter.

/// Shared error types.
pub mod error;

/// Identifier case conversion.
pub mod case;

/// Struct tag literal codec.
pub mod tag;

/// Position bookkeeping for in-place edits.
pub mod ledger;

/// Rewrite policy configuration.
pub mod config;

/// Per-field decisions.
pub mod policy;

/// Go parsing and field extraction.
pub mod parser;

/// Comment directives scoped to one declaration.
pub mod directive;

/// The tree-walking orchestrator.
pub mod rewriter;

/// Output formatting.
pub mod format;

/// Multi-unit entry points.
pub mod batch;

pub use batch::{process, process_with, rewrite_source, SourceFile};
pub use case::{to_camel, to_snake};
pub use config::{Case, Mode, RewritePolicy, DEFAULT_TAG};
pub use error::{AppError, AppResult};
pub use format::{Aligner, Gofmt, SourceFormatter, Verbatim};
pub use ledger::OffsetLedger;
pub use parser::{ensure_package_clause, parse_go, FieldDecl};
pub use policy::{decide, Action, SkipReason};
pub use rewriter::{Edit, Rewritten, StructRewriter};
pub use tag::{TagError, TagMapping};
