//! Whole-document reads and crash-safe writes for the JSON ledger
//!
//! The ledger file is always replaced as a unit: the new document goes to a
//! hidden sibling file, is synced, and is then renamed over the old one.

use std::ffi::OsString;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::{de::DeserializeOwned, Serialize};

use crate::error::LedgerError;

/// Read a JSON document
///
/// A missing file, or one holding only whitespace, yields an empty document.
pub fn read_document<T, P>(path: P) -> Result<T, LedgerError>
where
    T: DeserializeOwned + Default,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(T::default()),
        Err(e) => {
            return Err(LedgerError::Storage(format!(
                "Cannot read ledger file {}: {}",
                path.display(),
                e
            )))
        }
    };

    if contents.trim().is_empty() {
        tracing::debug!(path = %path.display(), "ledger file is blank, starting empty");
        return Ok(T::default());
    }

    serde_json::from_str(&contents).map_err(|e| {
        LedgerError::Storage(format!(
            "Ledger file {} is not valid JSON (line {}, column {}): {}",
            path.display(),
            e.line(),
            e.column(),
            e
        ))
    })
}

/// Replace a JSON document on disk
///
/// Readers see either the previous document or the new one, never a mix.
pub fn write_document_atomic<T, P>(path: P, doc: &T) -> Result<(), LedgerError>
where
    T: Serialize,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir).map_err(|e| {
            LedgerError::Storage(format!("Cannot create {}: {}", dir.display(), e))
        })?;
    }

    let mut bytes = serde_json::to_vec_pretty(doc)
        .map_err(|e| LedgerError::Storage(format!("Cannot encode ledger document: {}", e)))?;
    bytes.push(b'\n');

    let staging = staging_path(path);
    if let Err(e) = write_synced(&staging, &bytes).and_then(|()| fs::rename(&staging, path)) {
        let _ = fs::remove_file(&staging);
        return Err(LedgerError::Storage(format!(
            "Cannot replace ledger file {}: {}",
            path.display(),
            e
        )));
    }

    tracing::debug!(path = %path.display(), bytes = bytes.len(), "saved ledger document");
    Ok(())
}

/// Hidden sibling used while a new document is written (`ledger.json` ->
/// `.ledger.json.tmp`)
///
/// It lives in the same directory so the rename never crosses filesystems.
fn staging_path(path: &Path) -> PathBuf {
    let mut name = OsString::from(".");
    name.push(path.file_name().unwrap_or_else(|| "ledger.json".as_ref()));
    name.push(".tmp");
    path.with_file_name(name)
}

fn write_synced(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(bytes)?;
    file.sync_all()
}
