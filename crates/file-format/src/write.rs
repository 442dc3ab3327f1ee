//! Writing an export batch to disk with a completion manifest.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::errors::ExportError;

/// File name of the manifest. Its presence marks a complete batch.
pub const MANIFEST_FILE: &str = "manifest.json";

/// One text artifact to write, relative to the batch directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub file_name: String,
    pub contents: String,
}

impl Artifact {
    pub fn new(file_name: impl Into<String>, contents: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            contents: contents.into(),
        }
    }
}

/// Artifacts produced for one adapter.
#[derive(Debug, Clone, Default)]
pub struct ExportBatch {
    pub label: Option<String>,
    pub artifacts: Vec<Artifact>,
}

impl ExportBatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn push(&mut self, file_name: impl Into<String>, contents: impl Into<String>) {
        self.artifacts.push(Artifact::new(file_name, contents));
    }

    pub fn file_names(&self) -> impl Iterator<Item = &str> {
        self.artifacts.iter().map(|a| a.file_name.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManifestEntry {
    pub file: String,
    pub bytes: usize,
}

/// Written last; lists every artifact the batch produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportManifest {
    pub batch_id: Uuid,
    pub created: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub files: Vec<ManifestEntry>,
}

impl ExportManifest {
    /// Read a manifest back from a batch directory.
    pub fn load(dir: &Path) -> Result<Self, ExportError> {
        let path = dir.join(MANIFEST_FILE);
        let text = fs::read_to_string(&path).map_err(|source| ExportError::Io { path, source })?;
        serde_json::from_str(&text).map_err(|e| ExportError::Manifest(e.to_string()))
    }
}

fn io_error(path: PathBuf) -> impl FnOnce(std::io::Error) -> ExportError {
    move |source| ExportError::Io { path, source }
}

/// Create `dir`, write every artifact, then write the manifest.
///
/// A batch naming the same file twice is rejected before anything is
/// written. Writes are independent; a failure partway through leaves the files
/// already written in place but no manifest, so the batch reads as
/// incomplete.
#[instrument(skip(dir, batch), fields(dir = %dir.display(), artifacts = batch.artifacts.len()))]
pub fn write_export_batch(dir: &Path, batch: &ExportBatch) -> Result<ExportManifest, ExportError> {
    let mut seen = HashSet::new();
    if let Some(dup) = batch.file_names().find(|name| !seen.insert(*name)) {
        return Err(ExportError::DuplicateArtifact(dup.to_string()));
    }

    fs::create_dir_all(dir).map_err(io_error(dir.to_path_buf()))?;

    let mut files = Vec::with_capacity(batch.artifacts.len());
    for artifact in &batch.artifacts {
        let path = dir.join(&artifact.file_name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(io_error(parent.to_path_buf()))?;
        }
        fs::write(&path, &artifact.contents).map_err(io_error(path.clone()))?;
        files.push(ManifestEntry {
            file: artifact.file_name.clone(),
            bytes: artifact.contents.len(),
        });
    }

    let manifest = ExportManifest {
        batch_id: Uuid::new_v4(),
        created: Utc::now(),
        label: batch.label.clone(),
        files,
    };
    let json = serde_json::to_string_pretty(&manifest).map_err(|e| ExportError::Manifest(e.to_string()))?;
    let manifest_path = dir.join(MANIFEST_FILE);
    fs::write(&manifest_path, json).map_err(io_error(manifest_path))?;

    info!(batch_id = %manifest.batch_id, files = manifest.files.len(), "export batch written");
    Ok(manifest)
}
