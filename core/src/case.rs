//! # Case Conversion
//!
//! Turns Go field identifiers into tag values.
//!
//! - **snake**: `UIntPointer` → `u_int_pointer`, `Int64Slice` → `int_64_slice`.
//! - **camel**: `user_name` → `userName`, `This Is It` → `ThisIsIt`; an
//!   identifier without delimiters is returned unchanged.

use regex::Regex;
use std::sync::OnceLock;

fn uppers_or_nums_lower() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"([A-Z0-9]+)([A-Z][a-z])").expect("Invalid regex"))
}

fn lower_upper() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"([a-z])([A-Z0-9])").expect("Invalid regex"))
}

fn alnum_runs() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[0-9A-Za-z]+").expect("Invalid regex"))
}

/// Converts an identifier to `snake_case`.
///
/// A separator goes between an upper/digit run and a following capitalised
/// word (`IDName` → `id_name`) and between a lowercase letter and a following
/// upper/digit (`Int64` → `int_64`). `::` becomes `/` before anything else.
pub fn to_snake(identifier: &str) -> String {
    let output = identifier.replace("::", "/");
    // '-' is the interim separator; it is folded into '_' at the end.
    let output = uppers_or_nums_lower().replace_all(&output, "${1}-${2}");
    let output = lower_upper().replace_all(&output, "${1}-${2}");
    output.to_lowercase().replace('-', "_")
}

/// Joins the alphanumeric runs of an identifier into camel case.
///
/// Non-alphanumeric characters only delimit runs and are dropped. The first
/// run is kept as it is; every later run gets its first letter upper cased.
pub fn to_camel(identifier: &str) -> String {
    let mut out = String::with_capacity(identifier.len());
    for (i, run) in alnum_runs().find_iter(identifier).enumerate() {
        let run = run.as_str();
        if i == 0 {
            out.push_str(run);
            continue;
        }
        let mut chars = run.chars();
        if let Some(first) = chars.next() {
            out.extend(first.to_uppercase());
            out.push_str(chars.as_str());
        }
    }
    out
}
