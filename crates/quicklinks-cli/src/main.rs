//! Quick Links CLI
//!
//! Command-line interface for editing the quick links toolbar list.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use quicklinks_core::{Config, LinkStore, MenuContext, TokenPolicy};

mod commands;
mod editor;
mod output;
mod tui;

use output::{Output, OutputFormat};

#[derive(Parser)]
#[command(name = "quicklinks")]
#[command(about = "Quick Links - ordered admin toolbar shortcuts")]
#[command(version)]
#[command(propagate_version = true)]
struct Cli {
    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Quiet mode - minimal output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Use this config file instead of the default
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Token presented for save and reset
    #[arg(long, global = true)]
    token: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the interactive editor
    Tui,
    /// List all entries, including disabled ones
    #[command(alias = "ls")]
    List,
    /// Show the toolbar menu as it renders
    Menu,
    /// Append a link
    Add {
        /// Display text
        label: String,
        /// Target: admin-relative path, /path, or absolute URL
        url: String,
        /// Icon glyph or emoji
        #[arg(short, long)]
        icon: Option<String>,
        /// Highlight color (#rgb or #rrggbb)
        #[arg(short, long)]
        color: Option<String>,
    },
    /// Append a separator
    AddSeparator {
        /// Separator text
        label: Option<String>,
    },
    /// Remove the entry at a position
    #[command(alias = "rm")]
    Remove {
        /// Position as shown by `list`
        position: usize,
    },
    /// Move an entry one place up
    Up {
        /// Position as shown by `list`
        position: usize,
    },
    /// Move an entry one place down
    Down {
        /// Position as shown by `list`
        position: usize,
    },
    /// Enable an entry
    Enable {
        /// Position as shown by `list`
        position: usize,
    },
    /// Disable an entry (kept, but not shown in the toolbar)
    Disable {
        /// Position as shown by `list`
        position: usize,
    },
    /// Change one field of an entry
    Set {
        /// Position as shown by `list`
        position: usize,
        /// Field name (icon, label, url, color)
        field: String,
        /// New value
        value: String,
    },
    /// Save an editor submission (JSON) from a file, or - for stdin
    Submit {
        /// Submission file
        source: PathBuf,
    },
    /// Print the current list as an editor submission
    Export,
    /// Discard the stored list and return to the defaults
    Reset {
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Show storage and access status
    Status,
    /// Show or set configuration
    Config {
        #[command(subcommand)]
        command: Option<ConfigCommands>,
    },
    /// List registered tools
    Tools,
}

#[derive(Subcommand, Clone)]
enum ConfigCommands {
    /// Show current configuration
    Show,
    /// Set a configuration value
    Set {
        /// Configuration key (data_dir, admin_url, settings_page, page_builder,
        /// access_token, read_only, log_file)
        key: String,
        /// Configuration value
        value: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let output = Output::new(OutputFormat::from_flags(cli.json, cli.quiet));

    // Commands that don't need the store
    match &cli.command {
        Some(Commands::Config { command }) => {
            return handle_config_command(command.clone(), cli.config.as_ref(), &output);
        }
        Some(Commands::Tools) => return commands::tools::list(&output),
        _ => {}
    }

    let config =
        Config::load_with_cli_override(cli.config.as_ref()).context("Failed to load configuration")?;
    let store = LinkStore::open_with_config(&config);
    let access = TokenPolicy::new(
        !config.read_only,
        config.access_token.clone(),
        cli.token.clone(),
    );

    // Handle TUI (default when no command given); it sets up its own file logging
    let command = match cli.command {
        None | Some(Commands::Tui) => return tui::run(&config, &store, &access),
        Some(command) => command,
    };

    init_logging();

    match command {
        Commands::List => commands::links::list(&store, &output),
        Commands::Menu => {
            commands::links::menu(&store, &MenuContext::from_config(&config), &output)
        }
        Commands::Add {
            label,
            url,
            icon,
            color,
        } => commands::links::add(&store, &access, label, url, icon, color, &output),
        Commands::AddSeparator { label } => {
            commands::links::add_separator(&store, &access, label, &output)
        }
        Commands::Remove { position } => {
            commands::links::remove(&store, &access, position, &output)
        }
        Commands::Up { position } => commands::links::move_up(&store, &access, position, &output),
        Commands::Down { position } => {
            commands::links::move_down(&store, &access, position, &output)
        }
        Commands::Enable { position } => {
            commands::links::set_enabled(&store, &access, position, true, &output)
        }
        Commands::Disable { position } => {
            commands::links::set_enabled(&store, &access, position, false, &output)
        }
        Commands::Set {
            position,
            field,
            value,
        } => commands::links::set_field(&store, &access, position, &field, value, &output),
        Commands::Submit { source } => {
            commands::links::submit(&store, &access, &source, &output)
        }
        Commands::Export => commands::links::export(&store),
        Commands::Reset { yes } => commands::links::reset(&store, &access, yes, &output),
        Commands::Status => commands::status::show(&config, &store, &output),
        Commands::Tui | Commands::Config { .. } | Commands::Tools => unreachable!(), // Handled above
    }
}

fn handle_config_command(
    command: Option<ConfigCommands>,
    config_path: Option<&PathBuf>,
    output: &Output,
) -> Result<()> {
    match command {
        Some(ConfigCommands::Show) | None => commands::config::show(config_path, output),
        Some(ConfigCommands::Set { key, value }) => {
            commands::config::set(key, value, config_path, output)
        }
    }
}

/// Log to stderr for one-shot commands, filtered by QUICKLINKS_LOG
fn init_logging() {
    let env_filter =
        EnvFilter::try_from_env("QUICKLINKS_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
