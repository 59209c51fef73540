//! File-backed key/value storage.
//!
//! Each key is stored as `<root>/<key>.sav`. Writes go to a uniquely named
//! hidden temporary file first and are persisted over the target, so a crash
//! never leaves a half-written save behind.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use platform_core::{ServiceError, StorageService};
use tempfile::NamedTempFile;
use tracing::debug;

const SAVE_EXTENSION: &str = "sav";
const MAX_KEY_LEN: usize = 128;

/// Save-data storage in a single directory
#[derive(Debug, Clone)]
pub struct FileStorage {
    root: PathBuf,
}

impl FileStorage {
    /// Open storage rooted at `root`, creating the directory if needed
    pub fn open(root: impl Into<PathBuf>) -> io::Result<Self> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, ServiceError> {
        validate_key(key)?;
        Ok(self.root.join(format!("{}.{}", key, SAVE_EXTENSION)))
    }
}

/// Keys are non-empty, at most 128 bytes of `[A-Za-z0-9_.-]`, and do not
/// start with a dot.
fn validate_key(key: &str) -> Result<(), ServiceError> {
    let valid = !key.is_empty()
        && key.len() <= MAX_KEY_LEN
        && !key.starts_with('.')
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'));

    if valid {
        Ok(())
    } else {
        Err(ServiceError::InvalidKey(key.to_string()))
    }
}

impl StorageService for FileStorage {
    fn save(&self, key: &str, data: &[u8]) -> Result<(), ServiceError> {
        let path = self.path_for(key)?;

        // Staging file is unique per writer
        let mut tmp = NamedTempFile::new_in(&self.root)?;
        tmp.write_all(data)?;
        tmp.as_file().sync_all()?;
        tmp.persist(&path).map_err(|e| e.error)?;

        debug!(key = %key, bytes = data.len(), "Saved");
        Ok(())
    }

    fn load(&self, key: &str) -> Result<Option<Vec<u8>>, ServiceError> {
        let path = self.path_for(key)?;
        match fs::read(&path) {
            Ok(data) => Ok(Some(data)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn delete(&self, key: &str) -> Result<bool, ServiceError> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => {
                debug!(key = %key, "Deleted");
                Ok(true)
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    fn exists(&self, key: &str) -> Result<bool, ServiceError> {
        Ok(self.path_for(key)?.is_file())
    }

    fn keys(&self) -> Result<Vec<String>, ServiceError> {
        let mut keys = Vec::new();
        for entry in fs::read_dir(&self.root)? {
            let path = entry?.path();
            if !path.is_file() {
                continue;
            }
            if path.extension().and_then(|e| e.to_str()) != Some(SAVE_EXTENSION) {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                if validate_key(stem).is_ok() {
                    keys.push(stem.to_string());
                }
            }
        }
        keys.sort();
        Ok(keys)
    }
}
