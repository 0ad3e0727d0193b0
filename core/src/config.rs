//! # Rewrite Configuration
//!
//! The policy value handed to every rewrite call. There is no global state:
//! callers that need different settings build different policies.

use crate::case::{to_camel, to_snake};
use derive_more::Display;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::str::FromStr;

/// Default tag key.
pub const DEFAULT_TAG: &str = "json";

/// Naming convention for generated tag values.
#[derive(Debug, Display, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Case {
    /// `snake_case`.
    #[default]
    #[display("snake")]
    Snake,
    /// Alphanumeric runs joined, later runs capitalised.
    #[display("camel")]
    Camel,
    /// The identifier unchanged.
    #[display("none")]
    None,
}

impl Case {
    /// Converts `identifier` under this convention.
    pub fn apply(self, identifier: &str) -> String {
        match self {
            Case::Snake => to_snake(identifier),
            Case::Camel => to_camel(identifier),
            Case::None => identifier.to_string(),
        }
    }
}

impl FromStr for Case {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "snake" => Ok(Case::Snake),
            "camel" => Ok(Case::Camel),
            "none" | "" => Ok(Case::None),
            other => Err(format!("unknown case '{}' (expected snake, camel or none)", other)),
        }
    }
}

/// What to do with fields that already carry a tag.
#[derive(Debug, Display, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Mode {
    /// Leave a field alone when its tag already has a value for the key.
    #[default]
    #[display("skip-existing")]
    SkipExisting,
    /// Add the key in front of the existing pairs, unless it is already set.
    #[display("append")]
    Append,
    /// Replace the whole tag with the single generated pair.
    #[display("overwrite")]
    Overwrite,
}

impl FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "skip-existing" | "skip" => Ok(Mode::SkipExisting),
            "append" => Ok(Mode::Append),
            "overwrite" => Ok(Mode::Overwrite),
            other => Err(format!(
                "unknown mode '{}' (expected skip-existing, append or overwrite)",
                other
            )),
        }
    }
}

/// Resolved configuration for one rewrite pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RewritePolicy {
    /// Tag key to write (e.g. `json`).
    pub tag: String,
    /// Naming convention for values.
    pub case: Case,
    /// Handling of existing tags.
    pub mode: Mode,
    /// Field identifiers tagged with `-`.
    pub ignored_fields: BTreeSet<String>,
    /// Type identifiers whose fields are never touched.
    pub ignored_types: BTreeSet<String>,
    /// Emit diagnostics for skipped fields.
    pub verbose: bool,
}

impl Default for RewritePolicy {
    fn default() -> Self {
        Self {
            tag: DEFAULT_TAG.to_string(),
            case: Case::default(),
            mode: Mode::default(),
            ignored_fields: BTreeSet::new(),
            ignored_types: BTreeSet::new(),
            verbose: false,
        }
    }
}

impl RewritePolicy {
    /// Policy with a specific tag key and default everything else.
    pub fn for_tag(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            ..Self::default()
        }
    }

    /// Sets the naming convention.
    pub fn with_case(mut self, case: Case) -> Self {
        self.case = case;
        self
    }

    /// Sets the mode.
    pub fn with_mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self
    }

    /// Adds ignored field identifiers.
    pub fn ignore_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ignored_fields.extend(fields.into_iter().map(Into::into));
        self
    }

    /// Adds ignored type identifiers.
    pub fn ignore_types<I, S>(mut self, types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ignored_types.extend(types.into_iter().map(Into::into));
        self
    }

    /// Enables or disables diagnostics.
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Whether `name` is an ignored field.
    pub fn is_ignored_field(&self, name: &str) -> bool {
        self.ignored_fields.contains(name)
    }

    /// Whether `name` is an ignored type.
    pub fn is_ignored_type(&self, name: &str) -> bool {
        self.ignored_types.contains(name)
    }
}

/// Splits a comma separated list, dropping empty items.
pub fn split_list(list: &str) -> impl Iterator<Item = String> + '_ {
    list.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let policy = RewritePolicy::default();
        assert_eq!(policy.tag, "json");
        assert_eq!(policy.case, Case::Snake);
        assert_eq!(policy.mode, Mode::SkipExisting);
        assert!(!policy.verbose);
    }

    #[test]
    fn test_case_apply() {
        assert_eq!(Case::Snake.apply("UserName"), "user_name");
        assert_eq!(Case::Camel.apply("UserName"), "UserName");
        assert_eq!(Case::Camel.apply("user_name"), "userName");
        assert_eq!(Case::None.apply("UserName"), "UserName");
    }

    #[test]
    fn test_parse_enums() {
        assert_eq!("camel".parse::<Case>().unwrap(), Case::Camel);
        assert_eq!("overwrite".parse::<Mode>().unwrap(), Mode::Overwrite);
        assert!("kebab".parse::<Case>().is_err());
        assert!("merge".parse::<Mode>().is_err());
        assert_eq!(Mode::SkipExisting.to_string(), "skip-existing");
    }

    #[test]
    fn test_deserialize_partial_policy() {
        let policy: RewritePolicy =
            serde_json::from_str(r#"{"tag":"msgpack","mode":"append","ignored_fields":["Secret"]}"#)
                .unwrap();
        assert_eq!(policy.tag, "msgpack");
        assert_eq!(policy.mode, Mode::Append);
        assert_eq!(policy.case, Case::Snake);
        assert!(policy.is_ignored_field("Secret"));
    }

    #[test]
    fn test_split_list() {
        let items: Vec<_> = split_list("A, B,,C ").collect();
        assert_eq!(items, vec!["A", "B", "C"]);
    }
}
