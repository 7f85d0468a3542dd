//! Config command handlers

use std::path::PathBuf;

use anyhow::{bail, Context, Result};

use quicklinks_core::Config;

use crate::output::{Output, OutputFormat};

/// Show current configuration
pub fn show(config_path: Option<&PathBuf>, output: &Output) -> Result<()> {
    let config =
        Config::load_with_cli_override(config_path).context("Failed to load configuration")?;

    match output.format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::json!({
                    "data_dir": config.data_dir,
                    "admin_url": config.admin_url,
                    "settings_page": config.settings_page,
                    "page_builder": config.page_builder,
                    "access_token": config.access_token.as_ref().map(|_| "(set)"),
                    "read_only": config.read_only,
                    "log_file": config.log_file
                })
            );
        }
        OutputFormat::Quiet => {
            println!("{}", config.data_dir.display());
        }
        OutputFormat::Human => {
            let effective_path = config_path
                .cloned()
                .unwrap_or_else(Config::config_file_path);
            println!("Configuration:");
            println!("  data_dir:      {}", config.data_dir.display());
            println!("  admin_url:     {}", config.admin_url);
            println!("  settings_page: {}", config.settings_page);
            println!("  page_builder:  {}", config.page_builder);
            println!(
                "  access_token:  {}",
                if config.access_token.is_some() {
                    "(set)"
                } else {
                    "(not set)"
                }
            );
            println!("  read_only:     {}", config.read_only);
            println!(
                "  log_file:      {}",
                config
                    .log_file
                    .as_ref()
                    .map(|p| p.display().to_string())
                    .unwrap_or_else(|| "(not set)".to_string())
            );
            println!();
            println!("Config file: {}", effective_path.display());
        }
    }

    Ok(())
}

/// Set a configuration value
pub fn set(
    key: String,
    value: String,
    config_path: Option<&PathBuf>,
    output: &Output,
) -> Result<()> {
    let mut config =
        Config::load_with_cli_override(config_path).context("Failed to load configuration")?;

    apply_setting(&mut config, &key, &value)?;

    // Save to the CLI-specified path or default
    let save_path = config_path
        .cloned()
        .unwrap_or_else(Config::config_file_path);
    config
        .save_to_path(&save_path)
        .context("Failed to save configuration")?;

    if key == "access_token" {
        output.success("Set access_token");
    } else {
        output.success(&format!("Set {} = {}", key, value));
    }

    Ok(())
}

fn apply_setting(config: &mut Config, key: &str, value: &str) -> Result<()> {
    match key {
        "data_dir" => {
            config.data_dir = value.into();
        }
        "admin_url" => {
            if value.is_empty() {
                bail!("admin_url cannot be empty");
            }
            config.admin_url = value.to_string();
        }
        "settings_page" => {
            config.settings_page = value.to_string();
        }
        "page_builder" => {
            config.page_builder = value
                .parse()
                .context("Invalid value for page_builder. Use 'true' or 'false'.")?;
        }
        "access_token" => {
            config.access_token = optional(value).map(str::to_string);
        }
        "read_only" => {
            config.read_only = value
                .parse()
                .context("Invalid value for read_only. Use 'true' or 'false'.")?;
        }
        "log_file" => {
            config.log_file = optional(value).map(PathBuf::from);
        }
        _ => {
            bail!(
                "Unknown configuration key: '{}'\n\
                 Valid keys: data_dir, admin_url, settings_page, page_builder, access_token, read_only, log_file",
                key
            );
        }
    }
    Ok(())
}

/// Empty or "none" clears an optional setting
fn optional(value: &str) -> Option<&str> {
    if value.is_empty() || value == "none" {
        None
    } else {
        Some(value)
    }
}
