use super::AuditEntry;
use crate::errors::AuditError;
use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};

/// Append-only CSV audit trail.
///
/// The file is opened in append mode for every entry so rows written by earlier
/// runs are never rewritten. The header row is written only when the file is
/// created (or found empty).
pub struct AuditLogger {
    path: PathBuf,
}

impl AuditLogger {
    pub fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one entry, creating the directory and header as needed.
    ///
    /// The row is flushed and synced to disk before returning.
    pub fn record(&self, entry: &AuditEntry) -> Result<(), AuditError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|source| AuditError::CreateDir {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let needs_header = fs::metadata(&self.path)
            .map(|m| m.len() == 0)
            .unwrap_or(true);

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|source| AuditError::Open {
                path: self.path.clone(),
                source,
            })?;

        let mut writer = csv::WriterBuilder::new()
            .has_headers(needs_header)
            .from_writer(file);
        writer.serialize(entry).map_err(|source| AuditError::Write {
            path: self.path.clone(),
            source,
        })?;
        writer.flush().map_err(|source| AuditError::Sync {
            path: self.path.clone(),
            source,
        })?;
        writer
            .get_ref()
            .sync_data()
            .map_err(|source| AuditError::Sync {
                path: self.path.clone(),
                source,
            })?;

        Ok(())
    }

    /// Load every entry recorded so far, oldest first.
    ///
    /// A missing file yields an empty list.
    pub fn load_entries(&self) -> Result<Vec<AuditEntry>, AuditError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let mut reader = csv::Reader::from_path(&self.path).map_err(|source| AuditError::Read {
            path: self.path.clone(),
            source,
        })?;
        reader
            .deserialize()
            .collect::<Result<Vec<AuditEntry>, _>>()
            .map_err(|source| AuditError::Read {
                path: self.path.clone(),
                source,
            })
    }

    /// The last `n` entries, oldest first.
    pub fn tail(&self, n: usize) -> Result<Vec<AuditEntry>, AuditError> {
        let mut entries = self.load_entries()?;
        let skip = entries.len().saturating_sub(n);
        Ok(entries.split_off(skip))
    }
}
