//! Key material storage.
//!
//! The engine never touches the filesystem itself; it asks a [`KeyStore`] for
//! raw bytes by logical name (for example `public-key.der`).

use std::collections::HashMap;
use std::io;
use std::path::{Component, Path, PathBuf};

/// Supplies raw key bytes by logical name.
pub trait KeyStore: Send + Sync {
    /// Reads the entry with the given name.
    fn read(&self, name: &str) -> io::Result<Vec<u8>>;
}

/// A key store backed by files in a single directory.
#[derive(Debug, Clone)]
pub struct DirectoryKeyStore {
    root: PathBuf,
}

impl DirectoryKeyStore {
    /// Creates a store rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Returns the directory this store reads from.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl KeyStore for DirectoryKeyStore {
    fn read(&self, name: &str) -> io::Result<Vec<u8>> {
        // Names are plain file names; anything that could escape the root is refused.
        let mut components = Path::new(name).components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(_)), None) => std::fs::read(self.root.join(name)),
            _ => Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("invalid key name: {name}"),
            )),
        }
    }
}

/// An in-memory key store, mostly useful for tests and embedded keys.
#[derive(Debug, Clone, Default)]
pub struct MemoryKeyStore {
    entries: HashMap<String, Vec<u8>>,
}

impl MemoryKeyStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an entry, returning the store for chaining.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        self.entries.insert(name.into(), bytes.into());
        self
    }
}

impl KeyStore for MemoryKeyStore {
    fn read(&self, name: &str) -> io::Result<Vec<u8>> {
        self.entries
            .get(name)
            .cloned()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, name.to_string()))
    }
}
