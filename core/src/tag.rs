//! # Tag Codec
//!
//! Reads and writes Go struct tag literals.
//!
//! A tag literal is either a raw string (`` `json:"id" xml:"id"` ``) or an
//! interpreted string (`"json:\"id\""`). Its content is a space separated list
//! of `key:"value"` pairs, decoded here into an ordered [`TagMapping`].
//! Values are kept as raw fragments, escapes intact, so rendering a parsed
//! mapping reproduces the original pairs.

use derive_more::Display;
use indexmap::IndexMap;

/// Reasons a tag literal cannot be decoded.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum TagError {
    /// The literal is not wrapped in backquotes or double quotes.
    #[display("tag literal is not quoted")]
    Unquoted,
    /// An interpreted literal contains an escape Go would reject.
    #[display("invalid escape sequence in tag literal")]
    InvalidEscape,
    /// A key with nothing before the separator.
    #[display("empty key at byte {_0}")]
    EmptyKey(usize),
    /// The key is not followed by `:"`.
    #[display("expected ':\"' after key '{_0}'")]
    MissingSeparator(String),
    /// The value's closing quote is missing.
    #[display("unterminated value for key '{_0}'")]
    UnterminatedValue(String),
    /// The same key appears twice.
    #[display("duplicate key '{_0}'")]
    DuplicateKey(String),
}

impl std::error::Error for TagError {}

/// Insertion ordered `key -> raw value` view of a struct tag.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagMapping {
    entries: IndexMap<String, String>,
}

impl TagMapping {
    /// Creates an empty mapping.
    pub fn new() -> Self {
        Self::default()
    }

    /// A mapping holding exactly one pair.
    pub fn single(key: &str, value: &str) -> Self {
        let mut mapping = Self::new();
        mapping.entries.insert(key.to_string(), value.to_string());
        mapping
    }

    /// Decodes a tag literal, delimiters included.
    pub fn parse(literal: &str) -> Result<Self, TagError> {
        let body = strip_delimiters(literal)?;
        Self::parse_body(&body)
    }

    /// Decodes the content of a tag literal (no surrounding quotes).
    pub fn parse_body(body: &str) -> Result<Self, TagError> {
        let bytes = body.as_bytes();
        let mut mapping = Self::new();
        let mut i = 0;

        loop {
            while i < bytes.len() && (bytes[i] == b' ' || bytes[i] == b'\t') {
                i += 1;
            }
            if i >= bytes.len() {
                break;
            }

            let key_start = i;
            while i < bytes.len()
                && bytes[i] > b' '
                && bytes[i] != b':'
                && bytes[i] != b'"'
                && bytes[i] != 0x7f
            {
                i += 1;
            }
            if i == key_start {
                return Err(TagError::EmptyKey(key_start));
            }
            let key = &body[key_start..i];

            if i + 1 >= bytes.len() || bytes[i] != b':' || bytes[i + 1] != b'"' {
                return Err(TagError::MissingSeparator(key.to_string()));
            }
            i += 2;

            let value_start = i;
            while i < bytes.len() && bytes[i] != b'"' {
                if bytes[i] == b'\\' {
                    i += 1;
                }
                i += 1;
            }
            if i >= bytes.len() {
                return Err(TagError::UnterminatedValue(key.to_string()));
            }
            let value = &body[value_start..i];
            i += 1;

            if mapping.entries.contains_key(key) {
                return Err(TagError::DuplicateKey(key.to_string()));
            }
            mapping.entries.insert(key.to_string(), value.to_string());
        }

        Ok(mapping)
    }

    /// Raw value fragment stored under `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// True when `key` is present with a non-empty value.
    pub fn has_value(&self, key: &str) -> bool {
        self.get(key).is_some_and(|v| !v.is_empty())
    }

    /// Puts `key` first, dropping any previous entry for it.
    pub fn prepend(&mut self, key: &str, value: &str) {
        self.entries.shift_remove(key);
        self.entries
            .shift_insert(0, key.to_string(), value.to_string());
    }

    /// Number of pairs.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if there are no pairs.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates pairs in order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Encodes the mapping as a tag literal.
    ///
    /// Produces a raw string literal unless a value contains a backquote, in
    /// which case an interpreted literal is emitted.
    pub fn render(&self) -> String {
        let body = self
            .iter()
            .map(|(k, v)| format!("{}:\"{}\"", k, v))
            .collect::<Vec<_>>()
            .join(" ");

        if body.contains('`') {
            let mut out = String::with_capacity(body.len() + 2);
            out.push('"');
            for c in body.chars() {
                match c {
                    '\\' => out.push_str("\\\\"),
                    '"' => out.push_str("\\\""),
                    '\n' => out.push_str("\\n"),
                    '\t' => out.push_str("\\t"),
                    _ => out.push(c),
                }
            }
            out.push('"');
            out
        } else {
            format!("`{}`", body)
        }
    }
}

/// Removes the literal delimiters, unescaping interpreted strings.
fn strip_delimiters(literal: &str) -> Result<String, TagError> {
    if literal.len() >= 2 && literal.starts_with('`') && literal.ends_with('`') {
        return Ok(literal[1..literal.len() - 1].to_string());
    }
    if literal.len() >= 2 && literal.starts_with('"') && literal.ends_with('"') {
        return unescape(&literal[1..literal.len() - 1]);
    }
    Err(TagError::Unquoted)
}

fn unescape(s: &str) -> Result<String, TagError> {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next().ok_or(TagError::InvalidEscape)? {
            '\\' => out.push('\\'),
            '"' => out.push('"'),
            'n' => out.push('\n'),
            't' => out.push('\t'),
            'r' => out.push('\r'),
            'a' => out.push('\u{07}'),
            'b' => out.push('\u{08}'),
            'f' => out.push('\u{0c}'),
            'v' => out.push('\u{0b}'),
            'x' => out.push(hex_escape(&mut chars, 2)?),
            'u' => out.push(hex_escape(&mut chars, 4)?),
            'U' => out.push(hex_escape(&mut chars, 8)?),
            _ => return Err(TagError::InvalidEscape),
        }
    }
    Ok(out)
}

fn hex_escape(chars: &mut std::str::Chars<'_>, digits: usize) -> Result<char, TagError> {
    let hex: String = chars.by_ref().take(digits).collect();
    if hex.len() != digits {
        return Err(TagError::InvalidEscape);
    }
    u32::from_str_radix(&hex, 16)
        .ok()
        .and_then(char::from_u32)
        .ok_or(TagError::InvalidEscape)
}
