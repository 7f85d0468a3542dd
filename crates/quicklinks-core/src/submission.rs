//! Editor submission wire shape
//!
//! A submission carries three parts:
//! - `order`: the identities in final display order, comma-joined (`"0,3,1,2"`)
//! - `fields`: one field set per identity
//! - `enabled`: `"1"` for enabled identities; anything else, or absence, is disabled
//!
//! Identities are sparse after deletions and out of sequence after moves, so
//! `order` is the only thing that says what the final list looks like.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Value of `enabled[id]` that marks a row as enabled
pub const ENABLED_ON: &str = "1";

/// Errors in the shape of a submission
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// An order manifest token is not a non-negative integer
    #[error("Invalid order manifest entry '{token}': expected a row identity")]
    InvalidManifest { token: String },
}

/// Text inputs of one submitted row, as typed. Any of them may be missing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSet {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl FieldSet {
    pub fn new(
        icon: impl Into<String>,
        label: impl Into<String>,
        url: impl Into<String>,
        color: impl Into<String>,
    ) -> Self {
        Self {
            icon: Some(icon.into()),
            label: Some(label.into()),
            url: Some(url.into()),
            color: Some(color.into()),
        }
    }
}

/// A full editor submission
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Submission {
    /// Comma-joined identities in display order
    #[serde(default)]
    pub order: String,
    /// Field sets keyed by identity
    #[serde(default)]
    pub fields: BTreeMap<u32, FieldSet>,
    /// Enabled flags keyed by identity
    #[serde(default)]
    pub enabled: BTreeMap<u32, String>,
}

impl Submission {
    /// Parse the order manifest into identities
    pub fn manifest(&self) -> Result<Vec<u32>, ValidationError> {
        parse_manifest(&self.order)
    }

    /// Whether `id` is flagged exactly as enabled
    pub fn is_enabled(&self, id: u32) -> bool {
        self.enabled.get(&id).map(String::as_str) == Some(ENABLED_ON)
    }
}

/// Parse a comma-joined manifest.
///
/// Blank tokens are ignored, so `""` is the empty manifest and `"1,,2"` is
/// `[1, 2]`. Repeated identities are kept.
///
/// Any other token must be a non-negative integer. A token such as `"abc"`,
/// `"-1"` or `"1.5"` rejects the whole manifest with
/// [`ValidationError::InvalidManifest`] rather than being coerced to some
/// identity, so a garbled order can never overwrite the stored list with a
/// silently reordered or truncated one.
pub fn parse_manifest(order: &str) -> Result<Vec<u32>, ValidationError> {
    order
        .split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(|token| {
            token.parse::<u32>().map_err(|_| ValidationError::InvalidManifest {
                token: token.to_string(),
            })
        })
        .collect()
}

/// Join identities into a manifest string
pub fn format_manifest(ids: &[u32]) -> String {
    ids.iter()
        .map(u32::to_string)
        .collect::<Vec<_>>()
        .join(",")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_manifest() {
        assert_eq!(parse_manifest("0,3,1,2").unwrap(), vec![0, 3, 1, 2]);
        assert_eq!(parse_manifest(" 4 , 7 ").unwrap(), vec![4, 7]);
    }

    #[test]
    fn test_parse_empty_manifest() {
        assert!(parse_manifest("").unwrap().is_empty());
        assert!(parse_manifest(" , ").unwrap().is_empty());
    }

    #[test]
    fn test_parse_manifest_rejects_garbage() {
        let err = parse_manifest("0,abc,2").unwrap_err();
        assert_eq!(
            err,
            ValidationError::InvalidManifest {
                token: "abc".to_string()
            }
        );
        assert!(parse_manifest("-1").is_err());
        assert!(parse_manifest("0,1.5").is_err());
    }

    #[test]
    fn test_parse_manifest_keeps_repeats() {
        assert_eq!(parse_manifest("2,2").unwrap(), vec![2, 2]);
    }

    #[test]
    fn test_format_manifest() {
        assert_eq!(format_manifest(&[1, 0]), "1,0");
        assert_eq!(format_manifest(&[]), "");
    }

    #[test]
    fn test_enabled_flag_requires_exact_value() {
        let mut submission = Submission::default();
        submission.enabled.insert(0, "1".to_string());
        submission.enabled.insert(1, "0".to_string());
        submission.enabled.insert(2, "on".to_string());

        assert!(submission.is_enabled(0));
        assert!(!submission.is_enabled(1));
        assert!(!submission.is_enabled(2));
        assert!(!submission.is_enabled(3));
    }

    #[test]
    fn test_deserialize_wire_shape() {
        let json = r#"{
            "order": "1,0",
            "fields": {
                "0": {"icon": "📝", "label": "All Posts", "url": "edit.php", "color": ""},
                "1": {"label": "─── Create ───"}
            },
            "enabled": {"0": "1"}
        }"#;

        let submission: Submission = serde_json::from_str(json).unwrap();
        assert_eq!(submission.manifest().unwrap(), vec![1, 0]);
        assert_eq!(submission.fields[&0].label.as_deref(), Some("All Posts"));
        assert!(submission.fields[&1].icon.is_none());
        assert!(submission.is_enabled(0));
        assert!(!submission.is_enabled(1));
    }
}
