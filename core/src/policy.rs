//! # Policy Evaluation
//!
//! Decides, per field, whether the tag is added, replaced, extended or left
//! alone. Pure: no buffer access, no logging.

use crate::config::{Mode, RewritePolicy};
use crate::parser::FieldDecl;
use crate::tag::{TagError, TagMapping};
use derive_more::Display;

/// Value written for fields listed in `ignored_fields`.
pub const IGNORED_VALUE: &str = "-";

/// Why a field is left untouched.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum SkipReason {
    /// The containing type is ignored.
    #[display("type is ignored")]
    IgnoredType,
    /// Embedded field without an identifier.
    #[display("embedded field has no name")]
    Embedded,
    /// Identifier is not exported.
    #[display("field is unexported")]
    Unexported,
    /// The tag already carries a value for the key.
    #[display("existing tag value \"{_0}\"")]
    Existing(String),
}

/// Outcome of [`decide`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Leave the field alone.
    Skip(SkipReason),
    /// No tag yet: insert one holding this value.
    Add(String),
    /// Replace the whole tag with the single pair holding this value.
    Overwrite(String),
    /// Replace the tag with this mapping (new key first, old pairs kept).
    Append(TagMapping),
}

/// Tag value for `field` under `policy`.
pub fn target_value(name: &str, policy: &RewritePolicy) -> String {
    if policy.is_ignored_field(name) {
        IGNORED_VALUE.to_string()
    } else {
        policy.case.apply(name)
    }
}

/// Chooses the action for one field of type `type_name`.
///
/// Fails only when an existing tag of an eligible field cannot be decoded.
pub fn decide(
    type_name: &str,
    field: &FieldDecl,
    policy: &RewritePolicy,
) -> Result<Action, TagError> {
    if policy.is_ignored_type(type_name) {
        return Ok(Action::Skip(SkipReason::IgnoredType));
    }
    let Some(name) = field.name() else {
        return Ok(Action::Skip(SkipReason::Embedded));
    };
    if !field.is_exported() {
        return Ok(Action::Skip(SkipReason::Unexported));
    }

    let value = target_value(name, policy);

    let Some(existing) = &field.tag else {
        return Ok(Action::Add(value));
    };
    let mut mapping = TagMapping::parse(&existing.text)?;

    if mapping.has_value(&policy.tag) {
        return Ok(match policy.mode {
            Mode::Overwrite => Action::Overwrite(value),
            Mode::SkipExisting | Mode::Append => {
                let current = mapping.get(&policy.tag).unwrap_or_default().to_string();
                Action::Skip(SkipReason::Existing(current))
            }
        });
    }

    Ok(match policy.mode {
        Mode::Overwrite => Action::Overwrite(value),
        Mode::SkipExisting | Mode::Append => {
            mapping.prepend(&policy.tag, &value);
            Action::Append(mapping)
        }
    })
}
