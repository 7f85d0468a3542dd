//! Status command handler

use anyhow::Result;
use chrono::{DateTime, Local};

use quicklinks_core::store::LINKS_OPTION;
use quicklinks_core::{Config, FileOptionStore, LinkList, LinkStore, StoredState};

use crate::output::{Output, OutputFormat};

/// Counts over a link list
#[derive(Debug, Default, PartialEq, Eq)]
struct Counts {
    links: usize,
    separators: usize,
    disabled: usize,
}

impl Counts {
    fn of(links: &LinkList) -> Self {
        let mut counts = Counts::default();
        for entry in links {
            if entry.is_separator() {
                counts.separators += 1;
            } else {
                counts.links += 1;
            }
            if !entry.enabled {
                counts.disabled += 1;
            }
        }
        counts
    }
}

fn describe_state(state: &StoredState) -> String {
    match state {
        StoredState::Absent => "not saved (using defaults)".to_string(),
        StoredState::Empty => "saved empty (using defaults)".to_string(),
        StoredState::Stored(n) => format!("saved ({} entries)", n),
    }
}

/// Show status information
pub fn show(config: &Config, store: &LinkStore<FileOptionStore>, output: &Output) -> Result<()> {
    let options = store.options();
    let path = options.path_for(LINKS_OPTION)?;

    // A corrupt stored list is still worth reporting on
    let (state, state_error) = match store.state() {
        Ok(state) => (Some(state), None),
        Err(e) => (None, Some(e.to_string())),
    };

    let modified: Option<DateTime<Local>> = options
        .metadata(LINKS_OPTION)?
        .and_then(|meta| meta.modified().ok())
        .map(DateTime::from);

    let links = store.load();
    let counts = Counts::of(&links);

    match output.format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::json!({
                    "data_dir": config.data_dir,
                    "option_file": path,
                    "stored": state.map(|s| !s.uses_seed()),
                    "error": state_error,
                    "modified": modified.map(|m| m.to_rfc3339()),
                    "page_builder": config.page_builder,
                    "read_only": config.read_only,
                    "token_required": config.access_token.is_some(),
                    "counts": {
                        "entries": links.len(),
                        "links": counts.links,
                        "separators": counts.separators,
                        "disabled": counts.disabled
                    }
                })
            );
        }
        OutputFormat::Quiet => {
            println!("{}", links.len());
        }
        OutputFormat::Human => {
            println!("Quick Links Status");
            println!("==================");
            println!();
            println!("Storage:");
            println!("  Location: {}", path.display());
            match (&state, &state_error) {
                (Some(state), _) => println!("  State:    {}", describe_state(state)),
                (None, Some(err)) => println!("  State:    unreadable ({})", err),
                (None, None) => {}
            }
            if let Some(modified) = modified {
                println!("  Modified: {}", modified.format("%Y-%m-%d %H:%M"));
            }
            println!();
            println!("Access:");
            println!(
                "  Mode:  {}",
                if config.read_only {
                    "read-only"
                } else {
                    "read-write"
                }
            );
            println!(
                "  Token: {}",
                if config.access_token.is_some() {
                    "required"
                } else {
                    "not required"
                }
            );
            println!();
            println!("Contents:");
            println!("  Links:      {}", counts.links);
            println!("  Separators: {}", counts.separators);
            println!("  Disabled:   {}", counts.disabled);
            if config.page_builder {
                println!("  Page builder defaults: on");
            }
        }
    }

    Ok(())
}
