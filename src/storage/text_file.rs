//! Durable text file with backup and atomic replace
//!
//! Reading distinguishes a missing file (`Ok(None)`) from every other I/O
//! failure. Writing first copies the current file to `<name>.bkp` (best
//! effort), then writes the encoded text to `.<name>.tmp` in the same
//! directory, syncs it, and renames it over the target. The rename is the
//! only step that commits, so the target is never seen half-written.
//!
//! The store does not lock. Callers must not run two writes to the same
//! path at once.

use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, warn};

use crate::error::{LedgerError, LedgerResult};

use super::encoder::{IdentityEncoder, TextEncoder};

/// Result of a successful write
#[derive(Debug, Default)]
pub struct WriteOutcome {
    /// Where the previous contents were copied, if there were any
    pub backup: Option<PathBuf>,
    /// The advisory backup failure, if the copy could not be made
    pub backup_error: Option<LedgerError>,
}

/// A text document stored in a single file
#[derive(Clone)]
pub struct TextFile {
    path: PathBuf,
    encoder: Arc<dyn TextEncoder>,
}

impl TextFile {
    /// Create a plaintext store for `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::with_encoder(path, IdentityEncoder)
    }

    /// Create a store for `path` that passes text through `encoder`
    pub fn with_encoder(path: impl Into<PathBuf>, encoder: impl TextEncoder + 'static) -> Self {
        Self {
            path: path.into(),
            encoder: Arc::new(encoder),
        }
    }

    /// Path of the document file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Path of the advisory backup copy
    pub fn backup_path(&self) -> PathBuf {
        sibling(&self.path, "", ".bkp")
    }

    /// Path of the temporary file used for atomic replace
    pub fn temp_path(&self) -> PathBuf {
        sibling(&self.path, ".", ".tmp")
    }

    /// Read and decode the file, or `None` if it does not exist
    pub fn read(&self) -> LedgerResult<Option<String>> {
        let data = match fs::read_to_string(&self.path) {
            Ok(data) => data,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "document file absent");
                return Ok(None);
            }
            Err(e) => return Err(LedgerError::storage("read", &self.path, e)),
        };

        self.encoder.decode(&data).map(Some)
    }

    /// Back up, encode and atomically replace the file
    pub fn write(&self, text: &str) -> LedgerResult<WriteOutcome> {
        let mut outcome = WriteOutcome::default();
        match self.backup() {
            Ok(backup) => outcome.backup = backup,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "cannot make backup copy");
                outcome.backup_error = Some(e);
            }
        }

        let encoded = self.encoder.encode(text)?;
        self.stage(&encoded)?.commit()?;

        debug!(path = %self.path.display(), bytes = encoded.len(), "document written");
        Ok(outcome)
    }

    /// Copy the current file to the backup path
    ///
    /// Returns `Ok(None)` when there is nothing to back up yet.
    pub fn backup(&self) -> LedgerResult<Option<PathBuf>> {
        let backup_path = self.backup_path();
        match fs::copy(&self.path, &backup_path) {
            Ok(_) => Ok(Some(backup_path)),
            Err(e) if e.kind() == ErrorKind::NotFound && !self.path.exists() => Ok(None),
            Err(e) => Err(LedgerError::BackupFailed(format!(
                "Failed to copy {} to {}: {}",
                self.path.display(),
                backup_path.display(),
                e
            ))),
        }
    }

    /// Write already-encoded data to the temporary file, ready to commit
    ///
    /// Nothing at the target path changes until [`StagedWrite::commit`].
    pub fn stage(&self, encoded: &str) -> LedgerResult<StagedWrite> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .map_err(|e| LedgerError::storage("create directory", parent, e))?;
        }

        let temp_path = self.temp_path();
        let staged = StagedWrite {
            temp_path: temp_path.clone(),
            target: self.path.clone(),
            committed: false,
        };

        let mut file =
            File::create(&temp_path).map_err(|e| LedgerError::storage("create", &temp_path, e))?;
        file.write_all(encoded.as_bytes())
            .map_err(|e| LedgerError::storage("write", &temp_path, e))?;
        file.sync_all()
            .map_err(|e| LedgerError::storage("sync", &temp_path, e))?;

        Ok(staged)
    }
}

/// Encoded data sitting in the temporary file, not yet visible at the target
#[derive(Debug)]
pub struct StagedWrite {
    temp_path: PathBuf,
    target: PathBuf,
    committed: bool,
}

impl StagedWrite {
    pub fn temp_path(&self) -> &Path {
        &self.temp_path
    }

    /// Atomically move the staged data over the target
    pub fn commit(mut self) -> LedgerResult<()> {
        fs::rename(&self.temp_path, &self.target).map_err(|e| {
            LedgerError::Storage(format!(
                "Failed to rename {} to {}: {}",
                self.temp_path.display(),
                self.target.display(),
                e
            ))
        })?;
        self.committed = true;
        Ok(())
    }
}

impl Drop for StagedWrite {
    fn drop(&mut self) {
        if !self.committed {
            let _ = fs::remove_file(&self.temp_path);
        }
    }
}

/// `dir/<prefix><name><suffix>`
fn sibling(path: &Path, prefix: &str, suffix: &str) -> PathBuf {
    let mut name = OsString::from(prefix);
    name.push(path.file_name().unwrap_or(path.as_os_str()));
    name.push(suffix);
    path.with_file_name(name)
}
