//! # Directive Comments
//!
//! A comment placed directly above a type declaration can override the policy
//! for that declaration only:
//!
//! ```go
//! // st:mode=append tag=msgpack
//! type Message struct { ... }
//!
//! // st:skip
//! type Internal struct { ... }
//! ```
//!
//! Supported directives: `skip`, `tag=<key>`, `case=<snake|camel|none>`,
//! `mode=<skip-existing|append|overwrite>`, `ignore=<Field,Field>`.

use crate::config::{split_list, Case, Mode, RewritePolicy};
use crate::parser::extractors::node_text;
use tree_sitter::Node;

const PREFIX: &str = "st:";

/// Overrides collected from the comments above one declaration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Directives {
    /// Leave the whole declaration untouched.
    pub skip: bool,
    /// Tag key override.
    pub tag: Option<String>,
    /// Naming convention override.
    pub case: Option<Case>,
    /// Mode override.
    pub mode: Option<Mode>,
    /// Extra ignored fields.
    pub ignore: Vec<String>,
}

impl Directives {
    /// Parses one comment. `Ok(None)` when it holds no `st:` directive.
    pub fn parse_comment(comment: &str) -> Result<Option<Self>, String> {
        let body = comment
            .strip_prefix("//")
            .or_else(|| {
                comment
                    .strip_prefix("/*")
                    .and_then(|c| c.strip_suffix("*/"))
            })
            .unwrap_or(comment)
            .trim();

        let Some(rest) = body.strip_prefix(PREFIX) else {
            return Ok(None);
        };

        let mut directives = Self::default();
        for token in rest.split_whitespace() {
            let (key, value) = match token.split_once('=') {
                Some((k, v)) => (k, Some(v)),
                None => (token, None),
            };
            match (key, value) {
                ("skip", None) => directives.skip = true,
                ("tag", Some(v)) if !v.is_empty() => directives.tag = Some(v.to_string()),
                ("case", Some(v)) => directives.case = Some(v.parse()?),
                ("mode", Some(v)) => directives.mode = Some(v.parse()?),
                ("ignore", Some(v)) => directives.ignore.extend(split_list(v)),
                _ => return Err(format!("unknown directive '{}'", token)),
            }
        }
        Ok(Some(directives))
    }

    /// Later comments win over earlier ones.
    fn merge(&mut self, other: Self) {
        self.skip |= other.skip;
        if other.tag.is_some() {
            self.tag = other.tag;
        }
        if other.case.is_some() {
            self.case = other.case;
        }
        if other.mode.is_some() {
            self.mode = other.mode;
        }
        self.ignore.extend(other.ignore);
    }

    /// The policy scoped to the annotated declaration.
    pub fn apply(&self, base: &RewritePolicy) -> RewritePolicy {
        let mut policy = base.clone();
        if let Some(tag) = &self.tag {
            policy.tag = tag.clone();
        }
        if let Some(case) = self.case {
            policy.case = case;
        }
        if let Some(mode) = self.mode {
            policy.mode = mode;
        }
        policy.ignored_fields.extend(self.ignore.iter().cloned());
        policy
    }
}

/// Directives in the comment block directly above `node`.
///
/// Only comments on consecutive lines ending right above the node count.
pub fn preceding(node: Node, src: &str) -> Result<Option<Directives>, String> {
    let mut comments = Vec::new();
    let mut next_row = node.start_position().row;
    let mut current = node.prev_named_sibling();

    while let Some(sibling) = current {
        if sibling.kind() != "comment" || sibling.end_position().row + 1 != next_row {
            break;
        }
        comments.push(node_text(sibling, src));
        next_row = sibling.start_position().row;
        current = sibling.prev_named_sibling();
    }

    let mut found: Option<Directives> = None;
    for comment in comments.into_iter().rev() {
        if let Some(parsed) = Directives::parse_comment(comment)? {
            match found.as_mut() {
                Some(existing) => existing.merge(parsed),
                None => found = Some(parsed),
            }
        }
    }
    Ok(found)
}
