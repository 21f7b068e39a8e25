use crate::shared::Result;
use crate::vex_generation::domain::{
    AdvisoryDocument, ComponentSet, DocumentMetadata, PackageIdentifier, SbomGraph,
    TargetEcosystem, VexDocument,
};

/// ComponentSelector port: picks the SBOM nodes the advisory database covers
pub trait ComponentSelector {
    /// Returns the nodes of `graph` that belong to `target`, in graph order
    fn select_components<'g>(
        &self,
        graph: &'g SbomGraph,
        target: &TargetEcosystem,
    ) -> ComponentSet<'g>;
}

/// VexComposer port: one package's advisory history to a VEX document
pub trait VexComposer {
    /// Builds the document describing `advisories` inside the image `image_id`
    fn compose_package_document(
        &self,
        image_id: &PackageIdentifier,
        target: &TargetEcosystem,
        advisories: &AdvisoryDocument,
        metadata: DocumentMetadata,
    ) -> VexDocument;
}

/// VexMerger port: folds per-package documents into the image document
pub trait VexMerger {
    /// Merges `documents` into one document credited to `author`
    ///
    /// # Errors
    /// Returns `VexiError::MergeConflict` when the inputs cannot be combined.
    fn merge_documents(&self, documents: Vec<VexDocument>, author: &str) -> Result<VexDocument>;
}
