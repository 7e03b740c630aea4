//! Record store access
//!
//! The record store is a directory of JSON files, one per sheet, named
//! `<Sheet_Name_With_Underscores>.json`. Each file holds either a list
//! of uniform-field records or a single object. The store is read-only
//! from the service's perspective; a missing file is a normal condition
//! (the sheet simply has no exported data yet), not an error.

use crate::error::EngineError;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

/// Read-only access to the directory of sheet JSON files.
#[derive(Debug, Clone)]
pub struct RecordStore {
    dir: PathBuf,
}

/// One inspected store file: its stem and inferred header set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetHeaders {
    /// File stem (the sheet name in file-safe form)
    pub name: String,

    /// Keys of the first record (list files) or of the object itself
    pub headers: Vec<String>,
}

impl RecordStore {
    /// Create a store rooted at `dir`. The directory is not required to
    /// exist yet; loads against an absent directory behave like loads of
    /// absent files.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// The store's root directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Convert a sheet name to its file-safe backing file name:
    /// spaces become underscores and `.json` is appended.
    pub fn file_name(sheet: &str) -> String {
        format!("{}.json", sheet.replace(' ', "_"))
    }

    /// Load a sheet's full contents.
    ///
    /// Returns `Ok(None)` when the backing file does not exist. A file
    /// that exists but cannot be read or parsed is a real fault and
    /// surfaces as an error.
    pub fn load(&self, sheet: &str) -> Result<Option<Value>, EngineError> {
        let path = self.dir.join(Self::file_name(sheet));

        if !path.exists() {
            return Ok(None);
        }

        let contents = fs::read_to_string(&path)
            .map_err(|e| EngineError::Store(format!("Failed to read {:?}: {}", path, e)))?;

        let value = serde_json::from_str(&contents)
            .map_err(|e| EngineError::Store(format!("Invalid JSON in {:?}: {}", path, e)))?;

        Ok(Some(value))
    }

    /// Inspect every `*.json` file in the store and report its stem and
    /// inferred header set. Developer tooling, not part of the pipeline.
    ///
    /// Unreadable or unparseable files are logged and skipped so one bad
    /// export does not hide the rest.
    pub fn headers(&self) -> Result<Vec<SheetHeaders>, EngineError> {
        let entries = fs::read_dir(&self.dir)
            .map_err(|e| EngineError::Store(format!("Failed to read {:?}: {}", self.dir, e)))?;

        let mut sheets = Vec::new();
        for entry in entries {
            let entry = entry
                .map_err(|e| EngineError::Store(format!("Failed to read directory entry: {}", e)))?;
            let path = entry.path();

            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }

            let name = path
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or_default()
                .to_string();

            let contents = match fs::read_to_string(&path) {
                Ok(c) => c,
                Err(e) => {
                    tracing::warn!(file = %path.display(), error = %e, "failed to read store file");
                    continue;
                }
            };

            match serde_json::from_str::<Value>(&contents) {
                Ok(value) => sheets.push(SheetHeaders {
                    name,
                    headers: infer_headers(&value),
                }),
                Err(e) => {
                    tracing::warn!(file = %path.display(), error = %e, "invalid JSON in store file");
                }
            }
        }

        sheets.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(sheets)
    }
}

/// Infer the header set of a sheet file: keys of the first record for a
/// non-empty list, keys of the object for an object, empty otherwise.
fn infer_headers(value: &Value) -> Vec<String> {
    match value {
        Value::Array(records) => records
            .first()
            .and_then(|r| r.as_object())
            .map(|obj| obj.keys().cloned().collect())
            .unwrap_or_default(),
        Value::Object(obj) => obj.keys().cloned().collect(),
        _ => Vec::new(),
    }
}
