//! Tool registry
//!
//! A host collects the tools it offers into a [`ToolRegistry`]. Each tool
//! registers itself through the [`Registrar`] it is handed, rather than
//! writing into shared state.

use serde::{Deserialize, Serialize};

/// Catalog entry for one tool
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolInfo {
    pub slug: String,
    pub name: String,
    pub description: String,
    pub version: String,
    pub icon: String,
    /// Settings page slug; defaults to the tool slug
    pub menu_slug: String,
}

impl ToolInfo {
    pub fn new(slug: impl Into<String>, name: impl Into<String>) -> Self {
        let slug = slug.into();
        Self {
            menu_slug: slug.clone(),
            slug,
            name: name.into(),
            description: String::new(),
            version: "1.0".to_string(),
            icon: "admin-generic".to_string(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = icon.into();
        self
    }

    /// An empty slug keeps the default (the tool slug)
    pub fn with_menu_slug(mut self, menu_slug: impl Into<String>) -> Self {
        let menu_slug = menu_slug.into();
        if !menu_slug.is_empty() {
            self.menu_slug = menu_slug;
        }
        self
    }
}

/// Capability handed to tools so they can register themselves
pub trait Registrar {
    fn register(&mut self, tool: ToolInfo);
}

/// Ordered catalog of registered tools
#[derive(Debug, Clone, Default)]
pub struct ToolRegistry {
    tools: Vec<ToolInfo>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registered tools, in first-registration order
    pub fn tools(&self) -> &[ToolInfo] {
        &self.tools
    }

    pub fn get(&self, slug: &str) -> Option<&ToolInfo> {
        self.tools.iter().find(|t| t.slug == slug)
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

impl Registrar for ToolRegistry {
    /// Re-registering a slug replaces the earlier entry where it stands
    fn register(&mut self, tool: ToolInfo) {
        match self.tools.iter_mut().find(|t| t.slug == tool.slug) {
            Some(existing) => {
                tracing::debug!(slug = %tool.slug, "Replacing registered tool");
                *existing = tool;
            }
            None => self.tools.push(tool),
        }
    }
}

/// Register the quick links tool
pub fn register_tool(registrar: &mut dyn Registrar) {
    registrar.register(
        ToolInfo::new("quick-links", "Quick Links")
            .with_description("Customizable admin bar shortcuts")
            .with_version(env!("CARGO_PKG_VERSION"))
            .with_icon("admin-links"),
    );
}
