use crate::vex_generation::domain::{PackageIdentifier, VexDocument};

/// VexResponse - Internal response DTO from the VEX generation use case
#[derive(Debug, Clone)]
pub struct VexResponse {
    /// Canonical identifier of the image, the product of every statement
    pub image_id: PackageIdentifier,
    /// The merged document, possibly without statements
    pub document: VexDocument,
    /// Attestations found for the image
    pub attestation_count: usize,
    /// SBOM components that passed the ecosystem filter
    pub component_count: usize,
    /// Advisory documents matched for those components
    pub advisory_document_count: usize,
}
