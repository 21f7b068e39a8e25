use crate::vex_generation::domain::vex::{DEFAULT_ROLE, OPENVEX_CONTEXT};
use crate::vex_generation::domain::DocumentMetadata;
use chrono::Utc;
use uuid::Uuid;

const DOCUMENT_ID_PREFIX: &str = "https://openvex.dev/docs/public/vex-";
const TOOL_NAME: &str = "vexi";

/// MetadataGenerator service for generating VEX document metadata
///
/// Each call mints a new document identity: a random identifier and the
/// current time.
pub struct MetadataGenerator;

impl MetadataGenerator {
    /// Generates version 1 metadata credited to `author`
    pub fn generate_metadata(author: &str, tool_version: &str) -> DocumentMetadata {
        DocumentMetadata::new(
            format!("{}{}", DOCUMENT_ID_PREFIX, Uuid::new_v4()),
            OPENVEX_CONTEXT.to_string(),
            author.to_string(),
            DEFAULT_ROLE.to_string(),
            Utc::now(),
            1,
            format!("{}/{}", TOOL_NAME, tool_version),
        )
    }

    /// Generates metadata with the compile-time version from Cargo.toml
    pub fn generate_default_metadata(author: &str) -> DocumentMetadata {
        Self::generate_metadata(author, env!("CARGO_PKG_VERSION"))
    }
}
