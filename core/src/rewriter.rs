//! # Struct Rewriter
//!
//! Walks a parsed Go file in source order and tags struct fields.
//!
//! 1. **Walk**: every `type_spec`/`type_alias` updates the current type name;
//!    every `struct_type` has its fields evaluated against the policy.
//! 2. **Plan**: each decision becomes an [`Edit`] in original coordinates.
//! 3. **Apply**: edits are sorted by position and spliced into the buffer
//!    through the [`OffsetLedger`].
//! 4. **Format**: the buffer goes through the configured formatter.

use crate::config::RewritePolicy;
use crate::directive;
use crate::error::{AppError, AppResult};
use crate::format::{Aligner, SourceFormatter};
use crate::ledger::OffsetLedger;
use crate::parser::{extract_struct_fields, parse_go, type_name, FieldDecl};
use crate::policy::{decide, Action, SkipReason};
use crate::tag::TagMapping;
use std::borrow::Cow;
use tree_sitter::Node;

/// A text replacement in original buffer coordinates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edit {
    /// Start offset in the original buffer.
    pub start: usize,
    /// End offset in the original buffer (equal to `start` for insertions).
    pub end: usize,
    /// Replacement text.
    pub text: String,
}

/// Result of rewriting one unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rewritten {
    /// Formatted output.
    pub source: String,
    /// Number of edits applied before formatting.
    pub edits: usize,
    /// Diagnostics emitted in verbose mode.
    pub notes: Vec<String>,
}

/// Rewrites Go source under one policy.
pub struct StructRewriter<'a> {
    policy: &'a RewritePolicy,
    formatter: &'a dyn SourceFormatter,
}

impl<'a> StructRewriter<'a> {
    /// A rewriter using the built-in [`Aligner`].
    pub fn new(policy: &'a RewritePolicy) -> Self {
        Self {
            policy,
            formatter: &Aligner,
        }
    }

    /// Replaces the formatter.
    pub fn with_formatter(mut self, formatter: &'a dyn SourceFormatter) -> Self {
        self.formatter = formatter;
        self
    }

    /// Parses, tags and formats `source`. `unit` labels diagnostics.
    ///
    /// Nothing is edited unless the whole unit parses.
    pub fn rewrite(&self, source: &str, unit: &str) -> AppResult<Rewritten> {
        let parsed = parse_go(source, unit)?;

        let mut walk = Walk {
            unit,
            src: source,
            last_type_name: String::new(),
            edits: Vec::new(),
            notes: Vec::new(),
        };
        walk.visit(parsed.root(), self.policy)?;

        let Walk {
            mut edits, notes, ..
        } = walk;
        edits.sort_by_key(|e| e.start);

        let mut buffer = source.to_string();
        let mut ledger = OffsetLedger::new();
        for edit in &edits {
            ledger.apply(edit.start, edit.end, &edit.text, &mut buffer)?;
        }

        let source = self.formatter.format(&buffer)?;
        Ok(Rewritten {
            source,
            edits: edits.len(),
            notes,
        })
    }
}

/// Mutable state of one tree walk.
struct Walk<'u> {
    unit: &'u str,
    src: &'u str,
    last_type_name: String,
    edits: Vec<Edit>,
    notes: Vec<String>,
}

impl Walk<'_> {
    fn visit(&mut self, node: Node, policy: &RewritePolicy) -> AppResult<()> {
        match node.kind() {
            "type_spec" | "type_alias" => {
                if let Some(name) = type_name(node, self.src) {
                    self.last_type_name = name.to_string();
                }
            }
            "struct_type" => self.tag_struct(node, policy)?,
            _ => {}
        }

        let mut cursor = node.walk();
        let children: Vec<_> = node.named_children(&mut cursor).collect();
        for child in children {
            let scoped = self.scoped_policy(child, policy)?;
            match scoped {
                Some(Cow::Borrowed(p)) => self.visit(child, p)?,
                Some(Cow::Owned(p)) => self.visit(child, &p)?,
                None => {}
            }
        }
        Ok(())
    }

    /// Policy for `node`, honouring directive comments above declarations.
    /// `None` means the declaration is skipped entirely.
    fn scoped_policy<'p>(
        &mut self,
        node: Node,
        policy: &'p RewritePolicy,
    ) -> AppResult<Option<Cow<'p, RewritePolicy>>> {
        if !matches!(node.kind(), "type_declaration" | "type_spec" | "type_alias") {
            return Ok(Some(Cow::Borrowed(policy)));
        }

        let directives = directive::preceding(node, self.src).map_err(|reason| {
            AppError::Directive {
                unit: self.unit.to_string(),
                reason: format!("line {}: {}", node.start_position().row + 1, reason),
            }
        })?;

        match directives {
            None => Ok(Some(Cow::Borrowed(policy))),
            Some(d) if d.skip => {
                let line = node.start_position().row + 1;
                self.note(policy, line, "declaration skipped by directive".to_string());
                self.remember_skipped_name(node);
                Ok(None)
            }
            Some(d) => Ok(Some(Cow::Owned(d.apply(policy)))),
        }
    }

    /// A skipped declaration still binds its type name for the structs after it.
    fn remember_skipped_name(&mut self, node: Node) {
        let spec = if node.kind() == "type_declaration" {
            let mut cursor = node.walk();
            let specs: Vec<_> = node
                .named_children(&mut cursor)
                .filter(|n| matches!(n.kind(), "type_spec" | "type_alias"))
                .collect();
            specs.last().copied()
        } else {
            Some(node)
        };
        if let Some(name) = spec.and_then(|n| type_name(n, self.src)) {
            self.last_type_name = name.to_string();
        }
    }

    fn tag_struct(&mut self, node: Node, policy: &RewritePolicy) -> AppResult<()> {
        for field in extract_struct_fields(node, self.src) {
            let action = decide(&self.last_type_name, &field, policy).map_err(|reason| {
                AppError::MalformedAnnotation {
                    unit: self.unit.to_string(),
                    field: field.name().unwrap_or(&field.ty).to_string(),
                    reason,
                }
            })?;

            match action {
                Action::Skip(reason) => self.note_skip(policy, &field, &reason),
                Action::Add(value) => self.edits.push(Edit {
                    start: field.end,
                    end: field.end,
                    text: format!(" {}", TagMapping::single(&policy.tag, &value).render()),
                }),
                Action::Overwrite(value) => {
                    if let Some(tag) = &field.tag {
                        self.edits.push(Edit {
                            start: tag.start,
                            end: tag.end,
                            text: TagMapping::single(&policy.tag, &value).render(),
                        });
                    }
                }
                Action::Append(mapping) => {
                    if let Some(tag) = &field.tag {
                        self.edits.push(Edit {
                            start: tag.start,
                            end: tag.end,
                            text: mapping.render(),
                        });
                    }
                }
            }
        }
        Ok(())
    }

    fn note_skip(&mut self, policy: &RewritePolicy, field: &FieldDecl, reason: &SkipReason) {
        let subject = match field.name() {
            Some(name) => format!("{}.{}", self.last_type_name, name),
            None => format!("{} (embedded {})", self.last_type_name, field.ty),
        };
        self.note(policy, field.line, format!("skipping {}: {}", subject, reason));
    }

    fn note(&mut self, policy: &RewritePolicy, line: usize, message: String) {
        if !policy.verbose {
            return;
        }
        tracing::info!(unit = self.unit, line, "{}", message);
        self.notes.push(format!("{}:{}: {}", self.unit, line, message));
    }
}
