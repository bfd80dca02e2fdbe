//! Storage for persistent data
//!
//! The game only needs a tiny key-value store of opaque blobs. Backends:
//! - `MemoryStore`: in-process, for tests and ephemeral sessions
//! - `FileStore`: one JSON document on disk

pub mod file;
pub mod memory;

use std::fmt;

pub use file::FileStore;
pub use memory::MemoryStore;

/// Errors from a storage backend
#[derive(Debug)]
pub enum PersistError {
    /// The backing medium failed
    Io(std::io::Error),
    /// Stored data could not be decoded
    Corrupt(String),
}

impl fmt::Display for PersistError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "storage I/O error: {}", e),
            Self::Corrupt(msg) => write!(f, "corrupt data: {}", msg),
        }
    }
}

impl std::error::Error for PersistError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Corrupt(_) => None,
        }
    }
}

impl From<std::io::Error> for PersistError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

/// Key-value blob storage
pub trait ScoreStore {
    /// Read the blob under `key`, `None` if nothing was ever written
    fn read(&self, key: u32) -> Result<Option<Vec<u8>>, PersistError>;

    /// Replace the blob under `key`
    fn write(&mut self, key: u32, data: &[u8]) -> Result<(), PersistError>;
}
