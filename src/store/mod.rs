// src/store/mod.rs
//! Saved ticket files: one markdown file per key in the tickets directory.

pub mod sections;

pub use self::sections::{append_reserved_section, extract_reserved_section, replace_section};

use crate::error::Result;
use crate::types::TicketKey;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Reads and writes `<dir>/<KEY>.md`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TicketStore {
    dir: PathBuf,
}

impl TicketStore {
    /// A store rooted at `dir`. The directory is created on first save.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path(&self, key: &TicketKey) -> PathBuf {
        self.dir.join(key.file_name())
    }

    pub fn exists(&self, key: &TicketKey) -> bool {
        self.path(key).is_file()
    }

    pub fn load(&self, key: &TicketKey) -> Result<String> {
        let path = self.path(key);
        log::debug!("Reading {}", path.display());
        Ok(fs::read_to_string(path)?)
    }

    /// Like [`load`](Self::load), but a missing file is `None` rather than an error.
    pub fn load_if_exists(&self, key: &TicketKey) -> Result<Option<String>> {
        match fs::read_to_string(self.path(key)) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Writes the ticket file, creating the directory if needed.
    pub fn save(&self, key: &TicketKey, content: &str) -> Result<PathBuf> {
        fs::create_dir_all(&self.dir)?;
        let path = self.path(key);
        fs::write(&path, content)?;
        log::info!("Saved {} ({} bytes)", path.display(), content.len());
        Ok(path)
    }
}
