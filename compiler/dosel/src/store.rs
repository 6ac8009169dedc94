// Regimen persistence: an append-only list of entries per patient.

use std::collections::BTreeMap;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use dosel_type::{ExecutionError, RegimenEntry};
use log::debug;
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;

/// Default file name of the JSON regimen store
pub const DEFAULT_REGIMEN_FILE: &str = "regimens.json";

/// Where CALCULATE results for identified patients are recorded.
///
/// Each call stands alone; implementations serialize their own writes.
pub trait RegimenStore {
    fn append(&self, patient_id: &str, entry: RegimenEntry) -> Result<(), ExecutionError>;

    /// Entries for one patient, oldest first; empty for unknown patients
    fn entries(&self, patient_id: &str) -> Result<Vec<RegimenEntry>, ExecutionError>;
}

impl<S: RegimenStore + ?Sized> RegimenStore for &S {
    fn append(&self, patient_id: &str, entry: RegimenEntry) -> Result<(), ExecutionError> {
        (**self).append(patient_id, entry)
    }

    fn entries(&self, patient_id: &str) -> Result<Vec<RegimenEntry>, ExecutionError> {
        (**self).entries(patient_id)
    }
}

/// On-disk layout: `{"patients": {"<id>": [entry, ...]}}`
#[derive(Debug, Default, Serialize, Deserialize)]
struct RegimenDocument {
    #[serde(default)]
    patients: BTreeMap<String, Vec<RegimenEntry>>,
}

/// JSON document store; every append rewrites the file through a temp file
/// in the same directory and renames it into place.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persistence_error(&self, err: impl std::fmt::Display) -> ExecutionError {
        ExecutionError::Persistence(format!("{}: {err}", self.path.display()))
    }

    fn load(&self) -> Result<RegimenDocument, ExecutionError> {
        match fs::read_to_string(&self.path) {
            Ok(text) if text.trim().is_empty() => Ok(RegimenDocument::default()),
            Ok(text) => serde_json::from_str(&text).map_err(|e| self.persistence_error(e)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(RegimenDocument::default()),
            Err(e) => Err(self.persistence_error(e)),
        }
    }

    fn save(&self, doc: &RegimenDocument) -> Result<(), ExecutionError> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let json = serde_json::to_string_pretty(doc).map_err(|e| self.persistence_error(e))?;
        let mut tmp = NamedTempFile::new_in(dir).map_err(|e| self.persistence_error(e))?;
        tmp.write_all(json.as_bytes())
            .map_err(|e| self.persistence_error(e))?;
        tmp.persist(&self.path)
            .map_err(|e| self.persistence_error(e.error))?;
        Ok(())
    }
}

impl RegimenStore for JsonFileStore {
    fn append(&self, patient_id: &str, entry: RegimenEntry) -> Result<(), ExecutionError> {
        let mut doc = self.load()?;
        let entries = doc.patients.entry(patient_id.to_string()).or_default();
        entries.push(entry);
        debug!(
            "recording regimen entry #{} in {}",
            entries.len(),
            self.path.display()
        );
        self.save(&doc)
    }

    fn entries(&self, patient_id: &str) -> Result<Vec<RegimenEntry>, ExecutionError> {
        Ok(self
            .load()?
            .patients
            .remove(patient_id)
            .unwrap_or_default())
    }
}

/// Process-local store, for tests and embedding.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    patients: Mutex<BTreeMap<String, Vec<RegimenEntry>>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of patients with at least one entry
    pub fn patient_count(&self) -> usize {
        self.patients.lock().map_or(0, |p| p.len())
    }

    fn lock(
        &self,
    ) -> Result<std::sync::MutexGuard<'_, BTreeMap<String, Vec<RegimenEntry>>>, ExecutionError>
    {
        self.patients
            .lock()
            .map_err(|_| ExecutionError::Persistence("in-memory store lock poisoned".into()))
    }
}

impl RegimenStore for InMemoryStore {
    fn append(&self, patient_id: &str, entry: RegimenEntry) -> Result<(), ExecutionError> {
        self.lock()?
            .entry(patient_id.to_string())
            .or_default()
            .push(entry);
        Ok(())
    }

    fn entries(&self, patient_id: &str) -> Result<Vec<RegimenEntry>, ExecutionError> {
        Ok(self.lock()?.get(patient_id).cloned().unwrap_or_default())
    }
}
