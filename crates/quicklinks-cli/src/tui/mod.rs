//! Quick Links TUI
//!
//! Interactive editor for the quick links list.
//!
//! ## Layout
//!
//! - Top: the ordered rows, with enabled state and position
//! - Bottom: fields of the selected row (editable with Enter)
//!
//! ## Keys
//!
//! - j/k or ↑/↓: Move selection
//! - K/J: Move the selected entry up/down
//! - space: Enable/disable
//! - a / s: Add link / separator
//! - d: Remove
//! - Enter: Edit fields (Tab cycles, Enter finishes, Esc cancels)
//! - o: Open the selected link in the browser
//! - w: Save
//! - R: Reset to defaults
//! - ?: Help
//! - q: Quit

mod app;
mod ui;

use std::fs::File;
use std::io::stdout;
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::prelude::*;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use quicklinks_core::{AccessPolicy, Config, LinkStore, MenuContext, OptionStore, RowField};

use app::{App, InputMode};

/// Run the TUI application
pub fn run<S: OptionStore>(
    config: &Config,
    store: &LinkStore<S>,
    access: &dyn AccessPolicy,
) -> Result<()> {
    // Initialize TUI logging (file-based, only if QUICKLINKS_LOG is set)
    init_tui_logging(config);

    let ctx = MenuContext::from_config(config);
    let mut app = App::new(&store.load());

    // Setup terminal
    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;

    let result = run_app(&mut terminal, &mut app, store, access, &ctx);

    // Restore terminal
    disable_raw_mode()?;
    stdout().execute(LeaveAlternateScreen)?;

    result
}

fn run_app<B: Backend, S: OptionStore>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    store: &LinkStore<S>,
    access: &dyn AccessPolicy,
    ctx: &MenuContext,
) -> Result<()> {
    loop {
        app.check_status_timeout();

        terminal.draw(|frame| ui::draw(frame, app))?;

        if !event::poll(Duration::from_millis(250))? {
            continue;
        }

        if let Event::Key(key) = event::read()? {
            // Only handle key press events (not release)
            if key.kind != KeyEventKind::Press {
                continue;
            }

            // If error modal is showing, any key dismisses it
            if app.has_error() {
                app.clear_error();
                continue;
            }

            // If help is showing, any key dismisses it
            if app.show_help {
                app.show_help = false;
                continue;
            }

            match app.input_mode {
                InputMode::Normal => handle_normal_mode(app, store, access, ctx, key.code),
                InputMode::Editing => handle_editing_mode(app, key.code),
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

/// Handle key events in normal mode
fn handle_normal_mode<S: OptionStore>(
    app: &mut App,
    store: &LinkStore<S>,
    access: &dyn AccessPolicy,
    ctx: &MenuContext,
    code: KeyCode,
) {
    if app.confirm_reset {
        app.confirm_reset = false;
        if code == KeyCode::Char('y') {
            if let Err(e) = app.reset(store, access) {
                warn!("Reset failed: {}", e);
                app.set_error(format!("Reset failed: {}", e));
            }
        } else {
            app.set_status("Reset cancelled");
        }
        return;
    }

    if code != KeyCode::Char('q') {
        app.confirm_quit = false;
    }

    match code {
        KeyCode::Char('q') => app.request_quit(),
        KeyCode::Char('?') => app.toggle_help(),
        KeyCode::Char('j') | KeyCode::Down => app.select_next(),
        KeyCode::Char('k') | KeyCode::Up => app.select_prev(),
        KeyCode::Char('g') | KeyCode::Home => app.select_first(),
        KeyCode::Char('G') | KeyCode::End => app.select_last(),
        KeyCode::Char('K') => app.move_selected_up(),
        KeyCode::Char('J') => app.move_selected_down(),
        KeyCode::Char(' ') => app.toggle_selected(),
        KeyCode::Char('a') => app.add_link(),
        KeyCode::Char('s') => app.add_separator(),
        KeyCode::Char('d') | KeyCode::Delete => app.remove_selected(),
        KeyCode::Enter => app.start_editing(RowField::Label),
        KeyCode::Char('o') => match app.selected_target(ctx) {
            Some(url) => {
                if let Err(e) = open::that_detached(&url) {
                    app.set_error(format!("Failed to open {}: {}", url, e));
                } else {
                    app.set_status(format!("Opened {}", url));
                }
            }
            None => app.set_status("Nothing to open"),
        },
        KeyCode::Char('w') => {
            if let Err(e) = app.save(store, access) {
                warn!("Save failed: {}", e);
                app.set_error(format!("Save failed: {}", e));
            }
        }
        KeyCode::Char('R') => app.confirm_reset = true,
        _ => {}
    }
}

/// Handle key events while typing into a field
fn handle_editing_mode(app: &mut App, code: KeyCode) {
    match code {
        KeyCode::Esc => app.cancel_editing(),
        KeyCode::Enter => app.finish_editing(),
        KeyCode::Tab => app.next_field(),
        KeyCode::Backspace => app.delete_char(),
        KeyCode::Left => app.cursor_left(),
        KeyCode::Right => app.cursor_right(),
        KeyCode::Char(c) => app.insert_char(c),
        _ => {}
    }
}

/// Log to a file while the TUI owns the terminal
fn init_tui_logging(config: &Config) {
    // Only log if QUICKLINKS_LOG is set
    let Ok(log_level) = std::env::var("QUICKLINKS_LOG") else {
        return;
    };

    let log_path = config.log_path();

    let log_file = match File::create(&log_path) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("Warning: Could not create log file {:?}: {}", log_path, e);
            return;
        }
    };

    let env_filter = EnvFilter::new(format!(
        "quicklinks_core={},quicklinks={}",
        log_level, log_level
    ));

    // Initialize file-based logging (ignore error if already initialized)
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_ansi(false)
        .with_writer(log_file)
        .try_init();

    info!("TUI logging initialized to {:?}", log_path);
}
