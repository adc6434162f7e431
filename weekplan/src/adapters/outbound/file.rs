use std::path::{Path, PathBuf};
#[cfg(unix)]
use std::{io::Write, os::unix::fs::OpenOptionsExt};

use crate::domain::{ports::outbound::KeyValueStore, PlannerError, PlannerResult};

/// Key-value store keeping one file per key under a directory.
#[derive(Debug, Clone)]
pub struct FileKeyValueStore {
    root: PathBuf,
}

impl FileKeyValueStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, key: &str) -> PlannerResult<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(PlannerError::storage(format!("invalid key {key:?}")));
        }
        Ok(self.root.join(format!("{key}.json")))
    }
}

/// Write `content` readable by the owner only, creating the data directory
/// on first use.
fn write_owner_only(path: &Path, content: &str) -> PlannerResult<()> {
    let write_error = |e: std::io::Error| {
        PlannerError::storage(format!("failed to write {}: {e}", path.display()))
    };

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(write_error)?;
    }

    #[cfg(unix)]
    std::fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(0o600)
        .open(path)
        .and_then(|mut file| file.write_all(content.as_bytes()))
        .map_err(write_error)?;

    #[cfg(not(unix))]
    std::fs::write(path, content).map_err(write_error)?;

    Ok(())
}

impl KeyValueStore for FileKeyValueStore {
    fn get(&self, key: &str) -> PlannerResult<Option<String>> {
        let path = self.path_for(key)?;
        if !path.exists() {
            return Ok(None);
        }
        let raw = std::fs::read_to_string(&path).map_err(|e| {
            PlannerError::storage(format!("failed to read {}: {e}", path.display()))
        })?;
        Ok(Some(raw))
    }

    fn set(&mut self, key: &str, value: &str) -> PlannerResult<()> {
        let path = self.path_for(key)?;
        write_owner_only(&path, value)
    }

    fn remove(&mut self, key: &str) -> PlannerResult<()> {
        let path = self.path_for(key)?;
        if path.exists() {
            std::fs::remove_file(&path).map_err(|e| {
                PlannerError::storage(format!("failed to remove {}: {e}", path.display()))
            })?;
        }
        Ok(())
    }
}
