//! Output formatting for CLI
//!
//! Provides consistent output formatting across all commands:
//! - Human-readable default output
//! - JSON output (--json flag)
//! - Quiet mode for scripting (--quiet flag)

use quicklinks_core::{EntryKind, LinkEntry, MenuNode, NodeKind, ToolInfo};
use serde::Serialize;

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable output (default)
    Human,
    /// JSON output
    Json,
    /// Quiet mode - minimal output
    Quiet,
}

impl OutputFormat {
    /// Create format from CLI flags
    pub fn from_flags(json: bool, quiet: bool) -> Self {
        if quiet {
            OutputFormat::Quiet
        } else if json {
            OutputFormat::Json
        } else {
            OutputFormat::Human
        }
    }
}

/// Output helper for consistent formatting
pub struct Output {
    /// The output format
    pub format: OutputFormat,
}

impl Output {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Print the link list with 1-based positions
    pub fn print_entries(&self, entries: &[LinkEntry]) {
        match self.format {
            OutputFormat::Human => {
                if entries.is_empty() {
                    println!("No quick links.");
                    return;
                }
                for (i, entry) in entries.iter().enumerate() {
                    println!("{}", entry_line(i + 1, entry));
                }
                let disabled = entries.iter().filter(|e| !e.enabled).count();
                if disabled > 0 {
                    println!("\n{} entries ({} disabled)", entries.len(), disabled);
                } else {
                    println!("\n{} entries", entries.len());
                }
            }
            OutputFormat::Json => print_json(entries),
            OutputFormat::Quiet => {
                for entry in entries {
                    println!("{}", entry.label);
                }
            }
        }
    }

    /// Print rendered toolbar nodes
    pub fn print_menu(&self, nodes: &[MenuNode]) {
        match self.format {
            OutputFormat::Human => {
                for node in nodes {
                    match node.kind {
                        NodeKind::Root => println!("{}", node.title),
                        NodeKind::Separator => println!("  {}", node.title),
                        NodeKind::Link => {
                            let color = node
                                .color
                                .as_deref()
                                .map(|c| format!(" [{}]", c))
                                .unwrap_or_default();
                            println!("  {}{}  → {}", node.title, color, node.href);
                        }
                    }
                }
            }
            OutputFormat::Json => print_json(nodes),
            OutputFormat::Quiet => {
                for node in nodes.iter().filter(|n| n.kind == NodeKind::Link) {
                    println!("{}", node.href);
                }
            }
        }
    }

    /// Print the tool catalog
    pub fn print_tools(&self, tools: &[ToolInfo]) {
        match self.format {
            OutputFormat::Human => {
                if tools.is_empty() {
                    println!("No tools registered.");
                    return;
                }
                for tool in tools {
                    println!("{} ({}) v{}", tool.name, tool.slug, tool.version);
                    if !tool.description.is_empty() {
                        println!("  {}", tool.description);
                    }
                    println!("  settings: {}", tool.menu_slug);
                }
            }
            OutputFormat::Json => print_json(tools),
            OutputFormat::Quiet => {
                for tool in tools {
                    println!("{}", tool.slug);
                }
            }
        }
    }

    /// Print a success message
    pub fn success(&self, message: &str) {
        match self.format {
            OutputFormat::Human => println!("✓ {}", message),
            OutputFormat::Json => {
                println!(
                    "{}",
                    serde_json::json!({"status": "success", "message": message})
                );
            }
            OutputFormat::Quiet => {}
        }
    }

    /// Check if we should prompt for confirmation
    pub fn should_prompt(&self) -> bool {
        self.format == OutputFormat::Human
    }

    /// Print an informational message
    pub fn message(&self, msg: &str) {
        match self.format {
            OutputFormat::Human => println!("{}", msg),
            OutputFormat::Json => {
                println!("{}", serde_json::json!({"message": msg}));
            }
            OutputFormat::Quiet => {}
        }
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Failed to encode output: {}", e),
    }
}

/// One human-readable list row
fn entry_line(position: usize, entry: &LinkEntry) -> String {
    let state = if entry.enabled { " " } else { "x" };
    match entry.kind() {
        EntryKind::Separator => format!("{:>3} [{}]    {}", position, state, entry.label),
        EntryKind::Link => {
            let color = if entry.has_color() {
                format!(" [{}]", entry.color)
            } else {
                String::new()
            };
            format!(
                "{:>3} [{}] {} {} | {}{}",
                position,
                state,
                entry.icon,
                truncate(&entry.label, 35),
                truncate(&entry.url, 45),
                color
            )
        }
    }
}

/// Truncate a string to max characters, adding "..." if truncated
fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let head: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", head)
    }
}
