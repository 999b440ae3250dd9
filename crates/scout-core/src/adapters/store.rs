//! JSON file model store.

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use crate::domain::{ModelSnapshot, StoreError};
use crate::ports::ModelStore;

/// Stores the model as pretty-printed JSON.
///
/// Writes go to a sibling temp file which is synced and then renamed over
/// the target.
#[derive(Debug, Clone)]
pub struct JsonModelStore {
    path: PathBuf,
}

impl JsonModelStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, e: std::io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.display().to_string(),
            message: e.to_string(),
        }
    }
}

impl ModelStore for JsonModelStore {
    fn load(&self) -> Result<Option<ModelSnapshot>, StoreError> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(self.io_error(e)),
        };
        serde_json::from_str(&text)
            .map(Some)
            .map_err(|e| StoreError::Corrupt(e.to_string()))
    }

    fn save(&self, snapshot: &ModelSnapshot) -> Result<(), StoreError> {
        let bytes =
            serde_json::to_vec_pretty(snapshot).map_err(|e| StoreError::Corrupt(e.to_string()))?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
            }
        }

        let temp_path = self.path.with_extension("tmp");
        let mut file = fs::File::create(&temp_path).map_err(|e| self.io_error(e))?;
        file.write_all(&bytes).map_err(|e| self.io_error(e))?;
        file.sync_all().map_err(|e| self.io_error(e))?;
        drop(file);

        fs::rename(&temp_path, &self.path).map_err(|e| self.io_error(e))
    }
}
