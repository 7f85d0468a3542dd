//! Built-in starter list
//!
//! Used whenever nothing (or an empty list) has been saved. Optional
//! collaborators can append their own block through [`SeedExtension`]; the
//! store asks each extension whether it is active at synthesis time.

use crate::models::{LinkEntry, LinkList};

/// A block of extra seed entries contributed by an optional collaborator
pub trait SeedExtension: Send + Sync {
    /// Short name, used in logs
    fn name(&self) -> &str;

    /// Whether the collaborator is present right now
    fn is_active(&self) -> bool;

    /// Entries appended after the default seed when active
    fn links(&self) -> LinkList;
}

/// The default shortcuts
pub fn default_links() -> LinkList {
    vec![
        LinkEntry::link("📝", "All Posts", "edit.php"),
        LinkEntry::link("📄", "All Pages", "edit.php?post_type=page"),
        LinkEntry::link("🖼️", "Media Library", "upload.php"),
        LinkEntry::link("💬", "Comments", "edit-comments.php"),
        LinkEntry::link("🔌", "Plugins", "plugins.php"),
        LinkEntry::link("👥", "Users", "users.php"),
        LinkEntry::separator("─── Create ───"),
        LinkEntry::link("➕", "New Post", "post-new.php"),
        LinkEntry::link("➕", "New Page", "post-new.php?post_type=page"),
        LinkEntry::link("➕", "Upload Media", "media-new.php"),
        LinkEntry::link("➕", "Add Plugin", "plugin-install.php"),
        LinkEntry::link("➕", "Add User", "user-new.php"),
        LinkEntry::separator("─── Appearance ───"),
        LinkEntry::link("📦", "Widgets", "widgets.php"),
        LinkEntry::link("📋", "Menus", "nav-menus.php"),
        LinkEntry::link("🎨", "Themes", "themes.php"),
        LinkEntry::link("⚙️", "Customizer", "customize.php"),
        LinkEntry::separator("─── Settings ───"),
        LinkEntry::link("⚙️", "General Settings", "options-general.php"),
        LinkEntry::link("🔗", "Permalinks", "options-permalink.php"),
        LinkEntry::link("🏥", "Site Health", "site-health.php"),
        LinkEntry::link("🔄", "Updates", "update-core.php"),
    ]
}

/// Shortcuts for a page-builder theme, offered only when one is installed
#[derive(Debug, Clone, Copy, Default)]
pub struct PageBuilderLinks {
    installed: bool,
}

impl PageBuilderLinks {
    pub fn new(installed: bool) -> Self {
        Self { installed }
    }
}

impl SeedExtension for PageBuilderLinks {
    fn name(&self) -> &str {
        "page-builder"
    }

    fn is_active(&self) -> bool {
        self.installed
    }

    fn links(&self) -> LinkList {
        vec![
            LinkEntry::separator("─── Page Builder ───"),
            LinkEntry::link("💎", "Theme Options", "admin.php?page=builder_options"),
            LinkEntry::link("🏗️", "Theme Builder", "admin.php?page=theme_builder"),
            LinkEntry::link("📚", "Layout Library", "edit.php?post_type=builder_layout"),
        ]
    }
}

/// Build the full seed: defaults followed by every active extension's block
pub fn synthesize(extensions: &[Box<dyn SeedExtension>]) -> LinkList {
    let mut links = default_links();
    for ext in extensions {
        if ext.is_active() {
            tracing::debug!(extension = ext.name(), "Appending seed extension");
            links.extend(ext.links());
        }
    }
    links
}
