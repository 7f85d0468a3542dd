//! Tool index command handler

use anyhow::Result;

use quicklinks_core::{register_tool, ToolRegistry};

use crate::output::Output;

/// Build the registry of tools this binary ships
pub fn registry() -> ToolRegistry {
    let mut registry = ToolRegistry::new();
    register_tool(&mut registry);
    registry
}

/// List registered tools
pub fn list(output: &Output) -> Result<()> {
    output.print_tools(registry().tools());
    Ok(())
}
