//! In-memory file system
//!
//! Backs pipeline and integration tests. Clones share the same tree, so a
//! test can keep a handle and inspect what the build wrote.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use crate::domain::ports::file_system::{FileSystem, FsError, FsResult};

#[derive(Debug, Clone, Default)]
pub struct MemoryFs {
    files: Arc<Mutex<HashMap<PathBuf, String>>>,
    fail_writes: bool,
}

impl MemoryFs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with_file(self, path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        self.insert(path, content);
        self
    }

    pub fn insert(&self, path: impl Into<PathBuf>, content: impl Into<String>) {
        if let Ok(mut files) = self.files.lock() {
            files.insert(path.into(), content.into());
        }
    }

    /// Content at `path`, if any
    pub fn get(&self, path: impl AsRef<Path>) -> Option<String> {
        self.files.lock().ok()?.get(path.as_ref()).cloned()
    }

    /// Make every `write_atomic` fail, leaving the tree untouched
    pub fn failing_writes(mut self) -> Self {
        self.fail_writes = true;
        self
    }
}

impl FileSystem for MemoryFs {
    fn read(&self, path: &Path) -> FsResult<String> {
        self.get(path)
            .ok_or_else(|| FsError::NotFound(path.to_path_buf()))
    }

    fn write_atomic(&self, path: &Path, content: &str) -> FsResult<()> {
        if self.fail_writes {
            return Err(FsError::Other(format!(
                "refusing to write {}",
                path.display()
            )));
        }
        let mut files = self
            .files
            .lock()
            .map_err(|_| FsError::Other("file table poisoned".to_string()))?;
        files.insert(path.to_path_buf(), content.to_string());
        Ok(())
    }
}
