//! Toolbar menu building
//!
//! Turns a [`LinkList`] into the flat node list a toolbar renderer draws:
//! one root, one child per renderable entry, then a settings footer.

use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::models::{EntryKind, LinkList, NO_URL};

pub const ROOT_ID: &str = "quick-links";
pub const ROOT_TITLE: &str = "Quick";
pub const FOOTER_SEPARATOR_ID: &str = "ql-separator-bottom";
pub const FOOTER_SEPARATOR_TITLE: &str = "─── Settings ───";
pub const SETTINGS_ID: &str = "ql-settings";
pub const SETTINGS_TITLE: &str = "⚙️ Edit Quick Links";

/// Where relative links point
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuContext {
    pub admin_url: String,
    pub settings_page: String,
}

impl MenuContext {
    pub fn new(admin_url: impl Into<String>, settings_page: impl Into<String>) -> Self {
        Self {
            admin_url: admin_url.into(),
            settings_page: settings_page.into(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.admin_url, &config.settings_page)
    }

    /// Resolve a stored url against the admin base
    pub fn resolve(&self, url: &str) -> String {
        resolve_url(&self.admin_url, url)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Root,
    Link,
    Separator,
}

/// One toolbar menu node
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuNode {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
    pub title: String,
    pub href: String,
    pub kind: NodeKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl MenuNode {
    fn child(id: String, title: String, href: String, kind: NodeKind) -> Self {
        Self {
            id,
            parent: Some(ROOT_ID.to_string()),
            title,
            href,
            kind,
            color: None,
        }
    }
}

/// Resolve `url` against `admin_url`.
///
/// `#`, absolute (`http...`) and root-relative (`/...`) urls are returned
/// as-is; anything else is joined onto the admin base.
pub fn resolve_url(admin_url: &str, url: &str) -> String {
    if url == NO_URL || url.starts_with("http") || url.starts_with('/') {
        return url.to_string();
    }

    if admin_url.ends_with('/') {
        format!("{}{}", admin_url, url)
    } else {
        format!("{}/{}", admin_url, url)
    }
}

/// Build the menu for `links`.
///
/// Child ids use the entry's position in the full list, so they stay stable
/// when earlier entries are disabled.
pub fn build_menu(links: &LinkList, ctx: &MenuContext) -> Vec<MenuNode> {
    let mut nodes = vec![MenuNode {
        id: ROOT_ID.to_string(),
        parent: None,
        title: ROOT_TITLE.to_string(),
        href: NO_URL.to_string(),
        kind: NodeKind::Root,
        color: None,
    }];

    for (position, link) in links.iter().enumerate() {
        if !link.is_renderable() {
            continue;
        }

        let id = format!("ql-{}", position);
        let node = match link.kind() {
            EntryKind::Separator => MenuNode::child(
                id,
                link.label.clone(),
                NO_URL.to_string(),
                NodeKind::Separator,
            ),
            EntryKind::Link => MenuNode {
                color: link.has_color().then(|| link.color.clone()),
                ..MenuNode::child(
                    id,
                    format!("{} {}", link.icon, link.label),
                    ctx.resolve(&link.url),
                    NodeKind::Link,
                )
            },
        };
        nodes.push(node);
    }

    nodes.push(MenuNode::child(
        FOOTER_SEPARATOR_ID.to_string(),
        FOOTER_SEPARATOR_TITLE.to_string(),
        NO_URL.to_string(),
        NodeKind::Separator,
    ));
    nodes.push(MenuNode::child(
        SETTINGS_ID.to_string(),
        SETTINGS_TITLE.to_string(),
        ctx.resolve(&ctx.settings_page),
        NodeKind::Link,
    ));

    nodes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::LinkEntry;

    fn ctx() -> MenuContext {
        MenuContext::new("https://example.com/wp-admin/", "admin.php?page=quick-links")
    }

    #[test]
    fn test_resolve_url() {
        let base = "https://example.com/wp-admin/";
        assert_eq!(resolve_url(base, "#"), "#");
        assert_eq!(resolve_url(base, "https://other.org/x"), "https://other.org/x");
        assert_eq!(resolve_url(base, "http://other.org"), "http://other.org");
        assert_eq!(resolve_url(base, "/shop/"), "/shop/");
        assert_eq!(
            resolve_url(base, "edit.php?post_type=page"),
            "https://example.com/wp-admin/edit.php?post_type=page"
        );
        assert_eq!(resolve_url("/admin", "users.php"), "/admin/users.php");
    }

    #[test]
    fn test_empty_list_has_root_and_footer() {
        let nodes = build_menu(&Vec::new(), &ctx());
        let ids: Vec<_> = nodes.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec![ROOT_ID, FOOTER_SEPARATOR_ID, SETTINGS_ID]);

        assert_eq!(nodes[0].title, "Quick");
        assert!(nodes[0].parent.is_none());
        assert_eq!(
            nodes[2].href,
            "https://example.com/wp-admin/admin.php?page=quick-links"
        );
    }

    #[test]
    fn test_link_and_separator_nodes() {
        let links = vec![
            LinkEntry::link("📝", "All Posts", "edit.php").with_color("#d63638"),
            LinkEntry::separator("─── Create ───"),
            LinkEntry::link("🌐", "Site", "https://example.com/"),
        ];

        let nodes = build_menu(&links, &ctx());
        assert_eq!(nodes.len(), 6);

        let post = &nodes[1];
        assert_eq!(post.id, "ql-0");
        assert_eq!(post.parent.as_deref(), Some(ROOT_ID));
        assert_eq!(post.title, "📝 All Posts");
        assert_eq!(post.href, "https://example.com/wp-admin/edit.php");
        assert_eq!(post.kind, NodeKind::Link);
        assert_eq!(post.color.as_deref(), Some("#d63638"));

        let sep = &nodes[2];
        assert_eq!(sep.id, "ql-1");
        assert_eq!(sep.title, "─── Create ───");
        assert_eq!(sep.href, "#");
        assert_eq!(sep.kind, NodeKind::Separator);

        assert_eq!(nodes[3].href, "https://example.com/");
        assert!(nodes[3].color.is_none());
    }

    #[test]
    fn test_separator_ignores_url_and_color() {
        let sep = LinkEntry::separator("─── Tools ───")
            .with_color("#fff");
        let sep = LinkEntry { url: "tools.php".into(), ..sep };

        let nodes = build_menu(&vec![sep], &ctx());
        assert_eq!(nodes[1].href, "#");
        assert!(nodes[1].color.is_none());
    }

    #[test]
    fn test_label_glyphs_make_separator() {
        let links = vec![LinkEntry::link("🔗", "─── Shop ───", "shop.php")];
        let nodes = build_menu(&links, &ctx());
        assert_eq!(nodes[1].kind, NodeKind::Separator);
        assert_eq!(nodes[1].title, "─── Shop ───");
    }

    #[test]
    fn test_skips_disabled_and_unlabeled() {
        let links = vec![
            LinkEntry::link("📝", "Posts", "edit.php").with_enabled(false),
            LinkEntry::link("🔗", "", "x.php"),
            LinkEntry::link("👥", "Users", "users.php"),
        ];

        let nodes = build_menu(&links, &ctx());
        let children: Vec<_> = nodes[1..nodes.len() - 2]
            .iter()
            .map(|n| (n.id.as_str(), n.title.as_str()))
            .collect();
        assert_eq!(children, vec![("ql-2", "👥 Users")]);
    }

    #[test]
    fn test_from_config() {
        let config = Config::default();
        let ctx = MenuContext::from_config(&config);
        assert_eq!(ctx.admin_url, "/admin/");
        assert_eq!(ctx.resolve("users.php"), "/admin/users.php");
    }

    #[test]
    fn test_node_json_shape() {
        let nodes = build_menu(&Vec::new(), &ctx());
        let json = serde_json::to_value(&nodes[0]).unwrap();
        assert_eq!(json["kind"], "root");
        assert!(json.get("parent").is_none());
        assert!(json.get("color").is_none());
    }
}
