//! Permission checks for mutating the stored list
//!
//! The host decides who may manage quick links and issues anti-forgery
//! tokens. The store only asks an [`AccessPolicy`] before it writes.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A mutating store operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Save,
    Reset,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Save => write!(f, "save"),
            Action::Reset => write!(f, "reset"),
        }
    }
}

/// Why an action was refused
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AccessDenied {
    #[error("Not permitted to {action} quick links")]
    MissingCapability { action: Action },

    #[error("Security token missing or invalid for {action}")]
    InvalidToken { action: Action },
}

impl AccessDenied {
    pub fn action(&self) -> Action {
        match self {
            AccessDenied::MissingCapability { action } | AccessDenied::InvalidToken { action } => {
                *action
            }
        }
    }
}

/// Decides whether the current caller may perform an action
pub trait AccessPolicy {
    fn authorize(&self, action: Action) -> Result<(), AccessDenied>;
}

/// Grants everything. For local, single-user use.
#[derive(Debug, Clone, Copy, Default)]
pub struct AllowAll;

impl AccessPolicy for AllowAll {
    fn authorize(&self, _action: Action) -> Result<(), AccessDenied> {
        Ok(())
    }
}

/// Capability flag plus a shared-secret token check.
///
/// When no token is expected, only the capability is checked.
#[derive(Debug, Clone, Default)]
pub struct TokenPolicy {
    can_manage: bool,
    expected: Option<String>,
    presented: Option<String>,
}

impl TokenPolicy {
    pub fn new(can_manage: bool, expected: Option<String>, presented: Option<String>) -> Self {
        Self {
            can_manage,
            expected,
            presented,
        }
    }
}

impl AccessPolicy for TokenPolicy {
    fn authorize(&self, action: Action) -> Result<(), AccessDenied> {
        if !self.can_manage {
            return Err(AccessDenied::MissingCapability { action });
        }

        match (&self.expected, &self.presented) {
            (None, _) => Ok(()),
            (Some(expected), Some(presented)) if !expected.is_empty() && expected == presented => {
                Ok(())
            }
            _ => Err(AccessDenied::InvalidToken { action }),
        }
    }
}
