//! # Parser Module
//!
//! Handles parsing of Go source code using tree-sitter.
//! Exposes the parsed unit and the field views the rewriter works on.

pub mod extractors;
pub mod models;

pub use extractors::{extract_field, extract_struct_fields, field_list, type_name};
pub use models::{FieldDecl, TagSpan};

use crate::error::{AppError, AppResult};
use tree_sitter::{Node, Parser, Tree};

/// A Go source buffer together with the tree parsed from it.
pub struct ParsedUnit<'s> {
    source: &'s str,
    tree: Tree,
}

impl<'s> ParsedUnit<'s> {
    /// The `source_file` node.
    pub fn root(&self) -> Node<'_> {
        self.tree.root_node()
    }

    /// The buffer the tree was parsed from.
    pub fn source(&self) -> &'s str {
        self.source
    }
}

fn parse_tree(source: &str) -> AppResult<Tree> {
    let mut parser = Parser::new();
    parser
        .set_language(&tree_sitter_go::LANGUAGE.into())
        .map_err(|e| AppError::General(format!("Failed to load Go grammar: {}", e)))?;
    parser
        .parse(source, None)
        .ok_or_else(|| AppError::General("Go parser returned no tree".into()))
}

/// Parses `source`, failing on the first syntax error.
///
/// `unit` only labels the error.
pub fn parse_go<'s>(source: &'s str, unit: &str) -> AppResult<ParsedUnit<'s>> {
    let tree = parse_tree(source)?;
    let root = tree.root_node();

    if root.has_error() {
        let (line, column, message) = match first_error(root) {
            Some(node) => {
                let pos = node.start_position();
                (pos.row + 1, pos.column + 1, describe_error(node, source))
            }
            None => (1, 1, "syntax error".to_string()),
        };
        return Err(AppError::Parse {
            unit: unit.to_string(),
            line,
            column,
            message,
        });
    }

    Ok(ParsedUnit { source, tree })
}

/// Depth-first search for the first ERROR or MISSING node.
fn first_error(node: Node) -> Option<Node> {
    if node.is_error() || node.is_missing() {
        return Some(node);
    }
    let mut cursor = node.walk();
    let children: Vec<_> = node.children(&mut cursor).collect();
    children
        .into_iter()
        .filter(|c| c.has_error())
        .find_map(first_error)
}

fn describe_error(node: Node, source: &str) -> String {
    if node.is_missing() {
        return format!("missing \"{}\"", node.kind());
    }
    let text = extractors::node_text(node, source);
    let snippet: String = text.chars().take(24).collect();
    let snippet = snippet.lines().next().unwrap_or("").trim();
    format!("unexpected \"{}\"", snippet)
}

/// Prepends `package <name>` when `source` has no package clause.
///
/// Lets callers submit bare declarations.
pub fn ensure_package_clause(source: &str, name: &str) -> AppResult<String> {
    let tree = parse_tree(source)?;
    let root = tree.root_node();
    let mut cursor = root.walk();
    let has_clause = root
        .named_children(&mut cursor)
        .any(|n| n.kind() == "package_clause");

    if has_clause {
        Ok(source.to_string())
    } else {
        Ok(format!("package {}\n{}", name, source))
    }
}
