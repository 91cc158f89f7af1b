//! Message storage module
//!
//! Persists the last submitted message to a single flat file. The file is
//! fully overwritten on every write; concurrent writers race and the last
//! write wins.

use std::io;
use std::path::{Path, PathBuf};
use tokio::fs;

/// Store backed by one flat text file
#[derive(Debug, Clone)]
pub struct MessageStore {
    path: PathBuf,
}

impl MessageStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the backing file
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Replace the file contents with `message`
    pub async fn write(&self, message: &str) -> io::Result<()> {
        fs::write(&self.path, message).await
    }

    /// Read the current message
    pub async fn read(&self) -> io::Result<String> {
        fs::read_to_string(&self.path).await
    }
}
