//! Durable cart state.
//!
//! The persisted form is a single JSON document holding an ordered array of
//! `{id, quantity}` entries; it round-trips through save/load without losing
//! order. Corrupt or missing state loads as an empty cart - a stale cart is
//! recoverable, a crash on startup is not. Write failures, by contrast, must
//! surface: a silently dropped write would let the UI claim success for a
//! mutation that never happened.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use shopwindow_core::CartEntry;
use thiserror::Error;
use tracing::warn;

/// Errors writing durable cart state.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Filesystem write failed.
    #[error("cart storage I/O error: {0}")]
    Io(#[from] io::Error),

    /// Entries could not be serialized.
    #[error("cart serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// The durable-state seam for the cart store.
pub trait CartStorage {
    /// Load the persisted entries. Missing or corrupt state is an empty
    /// cart, never an error.
    fn load(&self) -> Vec<CartEntry>;

    /// Persist the entries, replacing any previous state.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] when the state could not be written; the
    /// caller must not reflect the mutation in that case.
    fn save(&self, entries: &[CartEntry]) -> Result<(), StorageError>;
}

/// Cart storage in a single JSON file.
#[derive(Debug, Clone)]
pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    /// Create storage at the given file path. The file is created on first
    /// save; parent directories are created as needed.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The backing file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CartStorage for JsonFileStorage {
    fn load(&self) -> Vec<CartEntry> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Vec::new(),
            Err(err) => {
                warn!(
                    path = %self.path.display(),
                    error = %err,
                    "failed to read cart state, starting with an empty cart"
                );
                return Vec::new();
            }
        };

        match serde_json::from_slice(&bytes) {
            Ok(entries) => entries,
            Err(err) => {
                warn!(
                    path = %self.path.display(),
                    error = %err,
                    "corrupt cart state, starting with an empty cart"
                );
                Vec::new()
            }
        }
    }

    fn save(&self, entries: &[CartEntry]) -> Result<(), StorageError> {
        let json = serde_json::to_vec_pretty(entries)?;
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, json)?;
        Ok(())
    }
}

/// In-memory cart storage, for tests and ephemeral sessions.
///
/// `fail_writes` makes every save fail, for exercising the write-then-reflect
/// contract of the store.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: Mutex<Vec<CartEntry>>,
    fail_writes: Mutex<bool>,
}

impl MemoryStorage {
    /// Create empty storage.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create storage preloaded with entries.
    #[must_use]
    pub fn with_entries(entries: Vec<CartEntry>) -> Self {
        Self {
            entries: Mutex::new(entries),
            fail_writes: Mutex::new(false),
        }
    }

    /// Toggle write failure injection.
    pub fn set_fail_writes(&self, fail: bool) {
        *self
            .fail_writes
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = fail;
    }

    /// The currently persisted entries.
    #[must_use]
    pub fn persisted(&self) -> Vec<CartEntry> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl CartStorage for MemoryStorage {
    fn load(&self) -> Vec<CartEntry> {
        self.persisted()
    }

    fn save(&self, entries: &[CartEntry]) -> Result<(), StorageError> {
        if *self
            .fail_writes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
        {
            return Err(StorageError::Io(io::Error::other("injected write failure")));
        }
        *self.entries.lock().unwrap_or_else(PoisonError::into_inner) = entries.to_vec();
        Ok(())
    }
}

impl<S: CartStorage + ?Sized> CartStorage for &S {
    fn load(&self) -> Vec<CartEntry> {
        (**self).load()
    }

    fn save(&self, entries: &[CartEntry]) -> Result<(), StorageError> {
        (**self).save(entries)
    }
}
