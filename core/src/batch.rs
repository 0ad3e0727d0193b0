//! # Batch Processing
//!
//! Rewrites many units under one policy. A failing unit does not stop the
//! batch; the last error is returned next to the units that succeeded.

use crate::config::RewritePolicy;
use crate::error::{AppError, AppResult};
use crate::format::{Aligner, SourceFormatter};
use crate::rewriter::StructRewriter;

/// A named source buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    /// Label used in diagnostics, usually the path.
    pub name: String,
    /// Full Go source text.
    pub data: String,
}

impl SourceFile {
    /// Creates a unit.
    pub fn new(name: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            data: data.into(),
        }
    }
}

/// Rewrites a single buffer with the built-in aligner.
pub fn rewrite_source(source: &str, unit: &str, policy: &RewritePolicy) -> AppResult<String> {
    StructRewriter::new(policy)
        .rewrite(source, unit)
        .map(|r| r.source)
}

/// Rewrites every unit with the built-in aligner.
pub fn process(files: &[SourceFile], policy: &RewritePolicy) -> (Vec<SourceFile>, Option<AppError>) {
    process_with(files, policy, &Aligner)
}

/// Rewrites every unit with `formatter`.
///
/// Returns the rewritten units, in input order, and the last error seen.
pub fn process_with(
    files: &[SourceFile],
    policy: &RewritePolicy,
    formatter: &dyn SourceFormatter,
) -> (Vec<SourceFile>, Option<AppError>) {
    let rewriter = StructRewriter::new(policy).with_formatter(formatter);
    let mut results = Vec::with_capacity(files.len());
    let mut last_error = None;

    for file in files {
        match rewriter.rewrite(&file.data, &file.name) {
            Ok(rewritten) => results.push(SourceFile::new(file.name.clone(), rewritten.source)),
            Err(e) => {
                tracing::warn!(unit = %file.name, error = %e, "unit not rewritten");
                last_error = Some(e);
            }
        }
    }

    (results, last_error)
}
