//! Storage layer
//!
//! The stored list lives in a key/value option store as one JSON blob.
//! [`FileOptionStore`] keeps it on disk; [`MemoryOptionStore`] is for tests
//! and embedding.

pub mod error;
pub mod persistence;

pub use error::{StorageError, StorageResult};
pub use persistence::{FileOptionStore, MemoryOptionStore, OptionStore};
