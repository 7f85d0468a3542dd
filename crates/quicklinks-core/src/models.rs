//! Data models for Quick Links
//!
//! A `LinkList` is an ordered sequence of `LinkEntry` rows. Order is
//! meaningful: it is the order the toolbar renders in. Duplicate labels and
//! URLs are allowed.

use serde::{Deserialize, Serialize};

/// Icon value that marks an entry as a separator
pub const SEPARATOR_ICON: &str = "---";

/// Glyph run that also marks an entry as a separator when found in a label
pub const SEPARATOR_GLYPHS: &str = "───";

/// Placeholder URL for entries that don't navigate anywhere
pub const NO_URL: &str = "#";

/// Icon given to new links and to submitted rows without an icon
pub const DEFAULT_ICON: &str = "🔗";

/// Label given to separators added from the editor
pub const DEFAULT_SEPARATOR_LABEL: &str = "─── Section ───";

/// The ordered list of configured entries
pub type LinkList = Vec<LinkEntry>;

/// What an entry renders as
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    Link,
    Separator,
}

/// One configured row: a link or a separator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkEntry {
    /// Short glyph or emoji, or `---` for a separator
    pub icon: String,
    /// Display text
    pub label: String,
    /// `#`, a root-relative path, an absolute URL, or an admin-relative path
    pub url: String,
    /// Disabled entries stay in storage but are never rendered
    pub enabled: bool,
    /// Background highlight, a hex color or empty
    #[serde(default)]
    pub color: String,
}

impl LinkEntry {
    /// Create an enabled link with no color
    pub fn link(icon: impl Into<String>, label: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            icon: icon.into(),
            label: label.into(),
            url: url.into(),
            enabled: true,
            color: String::new(),
        }
    }

    /// Create an enabled separator with the given label
    pub fn separator(label: impl Into<String>) -> Self {
        Self {
            icon: SEPARATOR_ICON.to_string(),
            label: label.into(),
            url: NO_URL.to_string(),
            enabled: true,
            color: String::new(),
        }
    }

    /// Builder-style color setter
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }

    /// Builder-style enabled setter
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Classify the entry.
    ///
    /// A row is a separator when its icon is `---` or its label contains the
    /// `───` glyph run. Either one is enough.
    pub fn kind(&self) -> EntryKind {
        if self.icon == SEPARATOR_ICON || self.label.contains(SEPARATOR_GLYPHS) {
            EntryKind::Separator
        } else {
            EntryKind::Link
        }
    }

    pub fn is_separator(&self) -> bool {
        self.kind() == EntryKind::Separator
    }

    /// Whether the toolbar should show this entry at all
    pub fn is_renderable(&self) -> bool {
        self.enabled && !self.label.is_empty()
    }

    pub fn has_color(&self) -> bool {
        !self.color.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_link_constructor() {
        let entry = LinkEntry::link("📝", "All Posts", "edit.php");
        assert_eq!(entry.icon, "📝");
        assert_eq!(entry.label, "All Posts");
        assert_eq!(entry.url, "edit.php");
        assert!(entry.enabled);
        assert!(entry.color.is_empty());
        assert_eq!(entry.kind(), EntryKind::Link);
    }

    #[test]
    fn test_separator_constructor() {
        let entry = LinkEntry::separator("─── Create ───");
        assert_eq!(entry.icon, SEPARATOR_ICON);
        assert_eq!(entry.url, NO_URL);
        assert!(entry.is_separator());
    }

    #[test]
    fn test_separator_detected_by_label_glyphs() {
        // A regular icon still renders as a separator if the label carries the glyph run
        let entry = LinkEntry::link("🔗", "─── Tools ───", "tools.php");
        assert_eq!(entry.kind(), EntryKind::Separator);
    }

    #[test]
    fn test_plain_dashes_in_label_are_not_separator() {
        let entry = LinkEntry::link("🔗", "Import - Export", "import.php");
        assert_eq!(entry.kind(), EntryKind::Link);
    }

    #[test]
    fn test_renderable() {
        assert!(LinkEntry::link("🔗", "Users", "users.php").is_renderable());
        assert!(!LinkEntry::link("🔗", "", "users.php").is_renderable());
        assert!(!LinkEntry::link("🔗", "Users", "users.php")
            .with_enabled(false)
            .is_renderable());
    }

    #[test]
    fn test_entry_serialization_shape() {
        let entry = LinkEntry::link("📄", "All Pages", "edit.php?post_type=page").with_color("#ff0000");
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["icon"], "📄");
        assert_eq!(json["label"], "All Pages");
        assert_eq!(json["url"], "edit.php?post_type=page");
        assert_eq!(json["enabled"], true);
        assert_eq!(json["color"], "#ff0000");

        let back: LinkEntry = serde_json::from_value(json).unwrap();
        assert_eq!(back, entry);
    }

    #[test]
    fn test_missing_color_deserializes_empty() {
        let entry: LinkEntry =
            serde_json::from_str(r#"{"icon":"🔌","label":"Plugins","url":"plugins.php","enabled":false}"#)
                .unwrap();
        assert!(entry.color.is_empty());
        assert!(!entry.enabled);
    }
}
