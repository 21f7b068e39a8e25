use super::MetadataGenerator;
use crate::ports::outbound::VexMerger;
use crate::shared::error::VexiError;
use crate::shared::Result;
use crate::vex_generation::domain::{DocumentMetadata, VexDocument, VexStatement};
use std::collections::{HashMap, HashSet};

/// DocumentMerger service: folds per-package documents into one
///
/// The merged document gets fresh metadata credited to the configured
/// author. Statements are the union of the inputs in first-seen order;
/// exact duplicates are dropped.
#[derive(Debug, Clone, Copy, Default)]
pub struct DocumentMerger;

impl DocumentMerger {
    pub fn new() -> Self {
        Self
    }

    /// Merges `documents` into a single document credited to `author`
    ///
    /// # Errors
    /// Returns `VexiError::MergeConflict` when two inputs claim the same
    /// document id with different metadata, or when the inputs are written
    /// against different OpenVEX contexts.
    pub fn merge(&self, documents: Vec<VexDocument>, author: &str) -> Result<VexDocument> {
        Self::check_metadata(&documents)?;

        let mut seen: HashSet<VexStatement> = HashSet::new();
        let mut statements = Vec::new();
        for document in documents {
            for statement in document.into_statements() {
                if seen.insert(statement.clone()) {
                    statements.push(statement);
                }
            }
        }

        let metadata = MetadataGenerator::generate_default_metadata(author);
        Ok(VexDocument::new(metadata, statements))
    }

    fn check_metadata(documents: &[VexDocument]) -> Result<()> {
        let Some(first) = documents.first() else {
            return Ok(());
        };
        let context = first.metadata().context();

        let mut by_id: HashMap<&str, &DocumentMetadata> = HashMap::new();
        for document in documents {
            let metadata = document.metadata();

            if metadata.context() != context {
                return Err(VexiError::MergeConflict {
                    details: format!(
                        "document {} uses context {} but {} uses {}",
                        metadata.id(),
                        metadata.context(),
                        first.metadata().id(),
                        context
                    ),
                }
                .into());
            }

            if let Some(existing) = by_id.insert(metadata.id(), metadata) {
                if existing != metadata {
                    return Err(VexiError::MergeConflict {
                        details: format!(
                            "two documents share the id {} but disagree on their metadata",
                            metadata.id()
                        ),
                    }
                    .into());
                }
            }
        }
        Ok(())
    }
}

impl VexMerger for DocumentMerger {
    fn merge_documents(&self, documents: Vec<VexDocument>, author: &str) -> Result<VexDocument> {
        self.merge(documents, author)
    }
}
