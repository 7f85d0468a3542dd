//! Link list storage
//!
//! The `LinkStore` owns the canonical, ordered list of quick links.
//!
//! ## Stored vs. seeded
//!
//! Until someone saves, there is no stored list: `load()` synthesizes one
//! from the default seed plus any active seed extensions, without writing it.
//! Once saved, the stored list is the only source of truth. A stored empty
//! list behaves like no list at all for `load()`, but `state()` tells the two
//! apart.
//!
//! ## Saving
//!
//! ```ignore
//! let mut editor = LinkListEditor::from_entries(&store.load());
//! editor.move_down(RowId::new(0));
//! let saved = store.save(&AllowAll, &editor.serialize())?;
//! ```
//!
//! Every save replaces the whole stored list in one atomic write. There is
//! no merge and no version check: the last save wins.

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::access::{AccessDenied, AccessPolicy, Action};
use crate::config::Config;
use crate::models::{LinkEntry, LinkList, DEFAULT_ICON};
use crate::sanitize::{sanitize_hex_color, sanitize_text_field};
use crate::seed::{self, PageBuilderLinks, SeedExtension};
use crate::storage::{FileOptionStore, OptionStore, StorageError};
use crate::submission::{FieldSet, Submission, ValidationError};

/// Option key the list is stored under
pub const LINKS_OPTION: &str = "quick_links";

/// Errors from mutating store operations
#[derive(Error, Debug)]
pub enum StoreError {
    /// Caller lacks permission or presented a bad token; nothing was changed
    #[error("Access denied: {0}")]
    AccessDenied(#[from] AccessDenied),

    /// Submission is malformed; nothing was changed
    #[error("Invalid submission: {0}")]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("Failed to encode link list: {0}")]
    Encode(#[from] serde_json::Error),
}

/// What is currently persisted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoredState {
    /// Nothing has ever been saved, or it was reset
    Absent,
    /// An empty list was saved
    Empty,
    /// A list with this many entries is saved
    Stored(usize),
}

impl StoredState {
    /// Whether `load()` falls back to the seed in this state
    pub fn uses_seed(&self) -> bool {
        !matches!(self, StoredState::Stored(_))
    }
}

/// The canonical ordered list of quick links
pub struct LinkStore<S: OptionStore = Box<dyn OptionStore>> {
    options: S,
    extensions: Vec<Box<dyn SeedExtension>>,
}

impl LinkStore<FileOptionStore> {
    /// Open the file-backed store described by `config`
    pub fn open_with_config(config: &Config) -> Self {
        LinkStore::new(FileOptionStore::from_config(config))
            .with_extension(PageBuilderLinks::new(config.page_builder))
    }
}

impl<S: OptionStore> LinkStore<S> {
    /// Store over the given option backend, with no seed extensions
    pub fn new(options: S) -> Self {
        Self {
            options,
            extensions: Vec::new(),
        }
    }

    /// Register a seed extension, queried each time the seed is synthesized
    pub fn with_extension(mut self, extension: impl SeedExtension + 'static) -> Self {
        self.extensions.push(Box::new(extension));
        self
    }

    pub fn options(&self) -> &S {
        &self.options
    }

    /// The seed list: defaults followed by active extension blocks
    pub fn seed(&self) -> LinkList {
        seed::synthesize(&self.extensions)
    }

    /// Current list: the stored one if present and non-empty, else the seed.
    ///
    /// Never fails. An unreadable stored value is logged and the seed is
    /// returned in its place.
    pub fn load(&self) -> LinkList {
        match self.read_stored() {
            Ok(Some(links)) if !links.is_empty() => links,
            Ok(_) => {
                debug!("No stored quick links, using seed");
                self.seed()
            }
            Err(e) => {
                warn!("Could not read stored quick links, using seed: {}", e);
                self.seed()
            }
        }
    }

    /// What is persisted right now
    pub fn state(&self) -> Result<StoredState, StorageError> {
        Ok(match self.read_stored()? {
            None => StoredState::Absent,
            Some(links) if links.is_empty() => StoredState::Empty,
            Some(links) => StoredState::Stored(links.len()),
        })
    }

    fn read_stored(&self) -> Result<Option<LinkList>, StorageError> {
        let Some(bytes) = self.options.get(LINKS_OPTION)? else {
            return Ok(None);
        };

        let links = serde_json::from_slice(&bytes).map_err(|e| StorageError::InvalidFormat {
            key: LINKS_OPTION.to_string(),
            details: e.to_string(),
        })?;

        Ok(Some(links))
    }

    /// Rebuild the list from an editor submission and replace the stored list.
    ///
    /// Walks the order manifest left to right; identities without a field
    /// set are skipped. Returns the list as stored.
    pub fn save(
        &self,
        access: &dyn AccessPolicy,
        submission: &Submission,
    ) -> Result<LinkList, StoreError> {
        access.authorize(Action::Save)?;

        let links = build_list(submission)?;
        let bytes = serde_json::to_vec(&links)?;
        self.options.put(LINKS_OPTION, &bytes)?;

        info!(entries = links.len(), "Saved quick links");
        Ok(links)
    }

    /// Delete the stored list so the next `load()` returns the seed
    pub fn reset(&self, access: &dyn AccessPolicy) -> Result<(), StoreError> {
        access.authorize(Action::Reset)?;

        let existed = self.options.delete(LINKS_OPTION)?;
        info!(existed, "Reset quick links to defaults");
        Ok(())
    }
}

/// Reconstruct a normalized list from a submission
pub fn build_list(submission: &Submission) -> Result<LinkList, ValidationError> {
    let manifest = submission.manifest()?;
    let mut links = Vec::with_capacity(manifest.len());

    for id in manifest {
        let Some(fields) = submission.fields.get(&id) else {
            debug!(id, "Order manifest references a row with no fields, skipping");
            continue;
        };
        links.push(normalize(fields, submission.is_enabled(id)));
    }

    Ok(links)
}

fn normalize(fields: &FieldSet, enabled: bool) -> LinkEntry {
    LinkEntry {
        icon: sanitize_text_field(fields.icon.as_deref().unwrap_or(DEFAULT_ICON)),
        label: sanitize_text_field(fields.label.as_deref().unwrap_or_default()),
        url: sanitize_text_field(fields.url.as_deref().unwrap_or_default()),
        enabled,
        color: sanitize_hex_color(fields.color.as_deref().unwrap_or_default()),
    }
}
