//! JSON file store
//!
//! All keys live in one JSON object. Writes go to a sibling `.tmp` file that
//! is then renamed over the original, so a crash mid-write leaves the old
//! data intact.

use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::{PersistError, ScoreStore};

#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<BTreeMap<String, Vec<u8>>, PersistError> {
        match fs::read(&self.path) {
            Ok(bytes) => serde_json::from_slice(&bytes)
                .map_err(|e| PersistError::Corrupt(format!("{}: {}", self.path.display(), e))),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(e.into()),
        }
    }
}

impl ScoreStore for FileStore {
    fn read(&self, key: u32) -> Result<Option<Vec<u8>>, PersistError> {
        Ok(self.read_all()?.remove(&key.to_string()))
    }

    fn write(&mut self, key: u32, data: &[u8]) -> Result<(), PersistError> {
        // A corrupt file is replaced rather than blocking every future save
        let mut entries = match self.read_all() {
            Ok(entries) => entries,
            Err(PersistError::Corrupt(msg)) => {
                log::warn!("Overwriting unreadable store ({})", msg);
                BTreeMap::new()
            }
            Err(e) => return Err(e),
        };
        entries.insert(key.to_string(), data.to_vec());

        let json =
            serde_json::to_vec_pretty(&entries).map_err(|e| PersistError::Corrupt(e.to_string()))?;
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir)?;
        }
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn scratch_path(name: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos())
            .unwrap_or(0);
        std::env::temp_dir()
            .join(format!("pyoro-test-{}-{}", std::process::id(), nanos))
            .join(name)
    }

    #[test]
    fn test_missing_file_reads_empty() {
        let store = FileStore::new(scratch_path("missing.json"));
        assert!(store.read(1).unwrap().is_none());
    }

    #[test]
    fn test_write_then_read() {
        let path = scratch_path("scores.json");
        let mut store = FileStore::new(&path);
        store.write(1, b"[1,2,3]").unwrap();
        store.write(2, b"other").unwrap();

        let reopened = FileStore::new(&path);
        assert_eq!(reopened.read(1).unwrap().as_deref(), Some(&b"[1,2,3]"[..]));
        assert_eq!(reopened.read(2).unwrap().as_deref(), Some(&b"other"[..]));
        assert!(!path.with_extension("tmp").exists());

        let _ = fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_corrupt_file_errors_then_recovers() {
        let path = scratch_path("corrupt.json");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "{{{").unwrap();

        let mut store = FileStore::new(&path);
        assert!(matches!(store.read(1), Err(PersistError::Corrupt(_))));
        store.write(1, b"ok").unwrap();
        assert_eq!(store.read(1).unwrap().as_deref(), Some(&b"ok"[..]));

        let _ = fs::remove_dir_all(path.parent().unwrap());
    }
}
