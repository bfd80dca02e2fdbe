//! In-memory store

use std::collections::BTreeMap;

use super::{PersistError, ScoreStore};

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: BTreeMap<u32, Vec<u8>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ScoreStore for MemoryStore {
    fn read(&self, key: u32) -> Result<Option<Vec<u8>>, PersistError> {
        Ok(self.entries.get(&key).cloned())
    }

    fn write(&mut self, key: u32, data: &[u8]) -> Result<(), PersistError> {
        self.entries.insert(key, data.to_vec());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_back() {
        let mut store = MemoryStore::new();
        assert!(store.read(1).unwrap().is_none());
        store.write(1, b"abc").unwrap();
        store.write(1, b"xyz").unwrap();
        assert_eq!(store.read(1).unwrap().as_deref(), Some(&b"xyz"[..]));
        assert!(store.read(2).unwrap().is_none());
    }
}
