use crate::ports::outbound::{AdvisoryIndex, AdvisoryIndexLoader};
use crate::shared::error::VexiError;
use crate::shared::security::read_regular_file;
use crate::shared::Result;
use crate::vex_generation::domain::{Advisory, AdvisoryDocument, Event, EventKind};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

const ADVISORY_FILE_SUFFIX: &str = ".advisories.yaml";
const SUPPORTED_SCHEMA_MAJOR: &str = "2";

/// On-disk layout of an advisory file (schema v2)
#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case")]
struct AdvisoryFile {
    #[serde(default)]
    schema_version: Option<serde_yaml_ng::Value>,
    package: PackageSection,
    #[serde(default)]
    advisories: Vec<AdvisoryEntry>,
}

#[derive(Debug, Deserialize)]
struct PackageSection {
    name: String,
}

#[derive(Debug, Deserialize)]
struct AdvisoryEntry {
    id: String,
    #[serde(default)]
    aliases: Vec<String>,
    #[serde(default)]
    events: Vec<EventEntry>,
}

#[derive(Debug, Deserialize)]
struct EventEntry {
    timestamp: DateTime<Utc>,
    #[serde(rename = "type")]
    event_type: String,
    // Per-type payload (fixed version, justification, ...); not used for VEX yet
    #[serde(default)]
    #[allow(dead_code)]
    data: Option<serde_yaml_ng::Value>,
}

impl From<AdvisoryFile> for AdvisoryDocument {
    fn from(file: AdvisoryFile) -> Self {
        let advisories = file
            .advisories
            .into_iter()
            .map(|entry| {
                let events = entry
                    .events
                    .into_iter()
                    .map(|event| Event::new(event.timestamp, EventKind::from_type(&event.event_type)))
                    .collect();
                Advisory::new(entry.id, entry.aliases, events)
            })
            .collect();
        AdvisoryDocument::new(file.package.name, advisories)
    }
}

/// DirectoryAdvisoryIndex adapter: advisory files loaded into memory
///
/// Documents are kept per package name in file name order.
#[derive(Debug, Default)]
pub struct DirectoryAdvisoryIndex {
    documents: HashMap<String, Vec<AdvisoryDocument>>,
}

impl DirectoryAdvisoryIndex {
    /// Loads every `*.advisories.yaml` file at the root of `dir`
    ///
    /// # Errors
    /// Returns `VexiError::IndexUnavailable` if the directory cannot be
    /// listed or any advisory file cannot be read or decoded.
    pub fn open(dir: &Path) -> Result<Self> {
        let unavailable = |details: String| -> anyhow::Error {
            VexiError::IndexUnavailable {
                path: dir.to_path_buf(),
                details,
            }
            .into()
        };

        if !dir.is_dir() {
            return Err(unavailable("advisories directory not found".to_string()));
        }

        let entries = fs::read_dir(dir)
            .map_err(|e| unavailable(format!("Failed to list directory: {}", e)))?;
        let mut files: Vec<PathBuf> = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| unavailable(format!("Failed to list directory: {}", e)))?;
            let path = entry.path();
            let is_advisory_file = path
                .file_name()
                .and_then(|name| name.to_str())
                .is_some_and(|name| name.ends_with(ADVISORY_FILE_SUFFIX));
            if is_advisory_file && path.is_file() {
                files.push(path);
            }
        }
        files.sort();

        let mut documents: HashMap<String, Vec<AdvisoryDocument>> = HashMap::new();
        for path in &files {
            let document = Self::read_file(path).map_err(|e| {
                unavailable(format!("{}: {}", path.display(), e))
            })?;
            documents
                .entry(document.package_name().to_string())
                .or_default()
                .push(document);
        }

        debug!(
            dir = %dir.display(),
            files = files.len(),
            packages = documents.len(),
            "Loaded advisory index"
        );
        Ok(Self { documents })
    }

    fn read_file(path: &Path) -> Result<AdvisoryDocument> {
        let content = read_regular_file(path, "advisory file")?;
        let file: AdvisoryFile = serde_yaml_ng::from_str(&content)?;

        let version = match &file.schema_version {
            Some(serde_yaml_ng::Value::String(version)) => Some(version.clone()),
            Some(serde_yaml_ng::Value::Number(version)) => Some(version.to_string()),
            _ => None,
        };
        if let Some(version) = version {
            if version.split('.').next() != Some(SUPPORTED_SCHEMA_MAJOR) {
                warn!(
                    path = %path.display(),
                    schema_version = %version,
                    "Advisory file uses an unsupported schema version"
                );
            }
        }

        Ok(file.into())
    }

    /// Number of distinct packages with advisories
    pub fn package_count(&self) -> usize {
        self.documents.len()
    }
}

impl AdvisoryIndex for DirectoryAdvisoryIndex {
    fn select_by_name(&self, package_name: &str) -> Result<Vec<AdvisoryDocument>> {
        Ok(self
            .documents
            .get(package_name)
            .cloned()
            .unwrap_or_default())
    }
}

/// Opens [`DirectoryAdvisoryIndex`]es for the use case
#[derive(Debug, Default, Clone, Copy)]
pub struct DirectoryAdvisoryIndexLoader;

impl DirectoryAdvisoryIndexLoader {
    pub fn new() -> Self {
        Self
    }
}

impl AdvisoryIndexLoader for DirectoryAdvisoryIndexLoader {
    type Index = DirectoryAdvisoryIndex;

    fn open_index(&self, dir: &Path) -> Result<Self::Index> {
        DirectoryAdvisoryIndex::open(dir)
    }
}
