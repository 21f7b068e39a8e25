use crate::ports::outbound::AttestationFetcher;
use crate::shared::error::VexiError;
use crate::shared::security::read_regular_file;
use crate::shared::Result;
use crate::vex_generation::domain::{ImageReference, PredicateFormat, RawDocument};
use async_trait::async_trait;
use std::path::PathBuf;
use tracing::debug;

const SPDX_PREDICATE_TYPE: &str = "https://spdx.dev/Document";
const CYCLONEDX_PREDICATE_TYPE: &str = "https://cyclonedx.org/bom";

/// LocalSbomReader adapter: serves an SBOM file in place of the registry
///
/// Stands in for [`AttestationFetcher`] when the SBOM is already on disk.
/// The file is labelled with the predicate type its content implies, and
/// is dropped when that type is not in the requested formats.
pub struct LocalSbomReader {
    path: PathBuf,
}

impl LocalSbomReader {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Predicate type the document would be attested with
    fn detect_predicate_type(content: &str) -> Option<&'static str> {
        let value: serde_json::Value = serde_json::from_str(content).ok()?;
        if value.get("spdxVersion").is_some() {
            Some(SPDX_PREDICATE_TYPE)
        } else if value.get("bomFormat").is_some() {
            Some(CYCLONEDX_PREDICATE_TYPE)
        } else {
            None
        }
    }
}

#[async_trait]
impl AttestationFetcher for LocalSbomReader {
    async fn fetch_attestations(
        &self,
        image: &ImageReference,
        formats: &[PredicateFormat],
    ) -> Result<Vec<RawDocument>> {
        let content = read_regular_file(&self.path, "SBOM").map_err(|e| {
            VexiError::FileReadError {
                path: self.path.clone(),
                details: e.to_string(),
            }
        })?;
        debug!(image = %image, path = %self.path.display(), "Using local SBOM");

        let predicate_type = match Self::detect_predicate_type(&content) {
            Some(predicate_type) => {
                if !formats.iter().any(|format| format.matches(predicate_type)) {
                    debug!(predicate_type, "Local SBOM format was not requested");
                    return Ok(vec![]);
                }
                predicate_type.to_string()
            }
            // Left for the parser to reject
            None => String::new(),
        };

        Ok(vec![RawDocument::new(predicate_type, content.into_bytes())])
    }
}
