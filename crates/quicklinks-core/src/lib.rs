//! Quick Links Core Library
//!
//! This crate provides the core functionality for Quick Links, a
//! user-configurable, ordered list of admin toolbar shortcuts.
//!
//! # Architecture
//!
//! - **LinkListEditor**: in-memory ordered editing with stable row identities
//! - **LinkStore**: the canonical list, rebuilt from editor submissions
//! - **OptionStore**: key/value persistence (file-backed or in-memory)
//!
//! # Quick Start
//!
//! ```text
//! let store = LinkStore::open_with_config(&Config::load()?);
//!
//! // Edit the current list
//! let mut editor = LinkListEditor::from_entries(&store.load());
//! editor.move_down(RowId::new(0));
//! store.save(&AllowAll, &editor.serialize())?;
//!
//! // Render it
//! let menu = build_menu(&store.load(), &MenuContext::from_config(&config));
//! ```
//!
//! # Modules
//!
//! - `store`: Load, save and reset the list (main entry point)
//! - `editor`: Ordered list editor
//! - `models`: Link entries and separators
//! - `submission`: Editor submission shape and order manifest
//! - `sanitize`: Field normalization applied on save
//! - `seed`: Default list and seed extensions
//! - `access`: Permission checks for save and reset
//! - `storage`: Option persistence
//! - `toolbar`: Menu nodes for rendering
//! - `registry`: Tool catalog
//! - `config`: Application configuration

pub mod access;
pub mod config;
pub mod editor;
pub mod models;
pub mod registry;
pub mod sanitize;
pub mod seed;
pub mod storage;
pub mod store;
pub mod submission;
pub mod toolbar;

pub use access::{AccessDenied, AccessPolicy, Action, AllowAll, TokenPolicy};
pub use config::Config;
pub use editor::{LinkListEditor, Row, RowField, RowId};
pub use models::{EntryKind, LinkEntry, LinkList};
pub use registry::{register_tool, Registrar, ToolInfo, ToolRegistry};
pub use seed::{PageBuilderLinks, SeedExtension};
pub use storage::{FileOptionStore, MemoryOptionStore, OptionStore, StorageError};
pub use store::{LinkStore, StoreError, StoredState};
pub use submission::{FieldSet, Submission, ValidationError};
pub use toolbar::{build_menu, MenuContext, MenuNode, NodeKind};
