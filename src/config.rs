//! Configuration file support for vexi.
//!
//! Provides YAML-based configuration through `vexi.config.yml` files,
//! including data structures, file loading, and validation.

use anyhow::{bail, Context};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use vexi::application::dto::RepositorySlug;
use vexi::shared::security::read_regular_file;
use vexi::shared::Result;

pub const CONFIG_FILENAME: &str = "vexi.config.yml";

/// Top-level configuration file schema.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    pub advisories_dir: Option<PathBuf>,
    pub repository: Option<String>,
    pub predicates: Option<Vec<String>>,
    pub author: Option<String>,
    pub ecosystem: Option<String>,
    pub namespace: Option<String>,
    /// Captures unknown fields for warnings.
    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_yaml_ng::Value>,
}

/// Load config from an explicit path. Returns an error if the file is not found.
pub fn load_config_from_path(path: &Path) -> Result<ConfigFile> {
    let content = read_regular_file(path, "config file").with_context(|| {
        format!(
            "Failed to read config file: {}\n\n💡 Hint: Check that the file exists and is readable.",
            path.display()
        )
    })?;

    if content.trim().is_empty() {
        return Ok(ConfigFile::default());
    }

    let config: ConfigFile = serde_yaml_ng::from_str(&content).with_context(|| {
        format!(
            "Failed to parse config file: {}\n\n💡 Hint: Ensure the file contains valid YAML syntax.",
            path.display()
        )
    })?;

    validate_config(&config)?;
    warn_unknown_fields(&config);

    Ok(config)
}

/// Auto-discover config in a directory. Returns `None` silently if not found.
pub fn discover_config(dir: &Path) -> Result<Option<(PathBuf, ConfigFile)>> {
    let config_path = dir.join(CONFIG_FILENAME);

    if !config_path.exists() {
        return Ok(None);
    }

    let config = load_config_from_path(&config_path)?;
    Ok(Some((config_path, config)))
}

/// Validate the loaded configuration.
fn validate_config(config: &ConfigFile) -> Result<()> {
    if let Some(ref repository) = config.repository {
        repository.parse::<RepositorySlug>().with_context(|| {
            format!(
                "Invalid config: repository '{}'.\n\n\
                 💡 Hint: Use the form org/name (e.g., \"wolfi-dev/advisories\").",
                repository
            )
        })?;
    }

    if let Some(ref predicates) = config.predicates {
        if predicates.is_empty() {
            bail!(
                "Invalid config: predicates must not be an empty list.\n\n\
                 💡 Hint: Remove the key to use the defaults (spdx, cyclonedx)."
            );
        }
        for (i, predicate) in predicates.iter().enumerate() {
            if predicate.trim().is_empty() {
                bail!(
                    "Invalid config: predicates[{}] must not be empty.\n\n\
                     💡 Hint: Each entry must be spdx, cyclonedx or a predicate type URI.",
                    i
                );
            }
        }
    }

    if let Some(ref author) = config.author {
        if author.trim().is_empty() {
            bail!("Invalid config: author must not be empty.");
        }
    }
    Ok(())
}

/// Warn about unknown fields in the config file.
fn warn_unknown_fields(config: &ConfigFile) {
    let mut keys: Vec<&String> = config.unknown_fields.keys().collect();
    keys.sort();
    for key in keys {
        eprintln!("⚠️  Warning: Unknown config field '{}' will be ignored.", key);
    }
}
