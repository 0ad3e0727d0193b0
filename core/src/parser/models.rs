//! # Data Models
//!
//! Views onto the parsed Go source. They borrow nothing from the tree and only
//! live for one rewrite pass.

/// Byte span and text of an existing struct tag literal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagSpan {
    /// Offset of the opening delimiter.
    pub start: usize,
    /// Offset just past the closing delimiter.
    pub end: usize,
    /// The literal, delimiters included.
    pub text: String,
}

/// One field declaration inside a struct type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDecl {
    /// Declared identifiers (`A, B int` has two). Empty for embedded fields.
    pub names: Vec<String>,
    /// Source text of the field type.
    pub ty: String,
    /// Offset of the first byte of the declaration.
    pub start: usize,
    /// Offset just past the declaration (tag included when present).
    pub end: usize,
    /// 1-based line of the declaration.
    pub line: usize,
    /// Existing tag, if any.
    pub tag: Option<TagSpan>,
}

impl FieldDecl {
    /// The identifier tag values are derived from.
    pub fn name(&self) -> Option<&str> {
        self.names.first().map(String::as_str)
    }

    /// True for embedded (anonymous) fields.
    pub fn is_embedded(&self) -> bool {
        self.names.is_empty()
    }

    /// Go's export rule: the identifier starts with an upper case letter.
    pub fn is_exported(&self) -> bool {
        self.name()
            .and_then(|n| n.chars().next())
            .is_some_and(char::is_uppercase)
    }
}
