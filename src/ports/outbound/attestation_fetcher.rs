use crate::vex_generation::domain::{ImageReference, PredicateFormat, RawDocument};
use crate::shared::Result;
use async_trait::async_trait;

/// AttestationFetcher port for downloading the SBOMs attached to an image
///
/// Implementations talk to a registry (or stand in for one) and return the
/// predicates of every attestation whose predicate type matches one of the
/// requested formats.
///
/// # Async Support
/// Implementations must be `Send + Sync` so the use case can be driven from
/// a multi-threaded runtime.
#[async_trait]
pub trait AttestationFetcher: Send + Sync {
    /// Fetches the attested SBOM predicates of an image
    ///
    /// # Arguments
    /// * `image` - The parsed image reference
    /// * `formats` - Predicate formats to keep
    ///
    /// # Returns
    /// Zero or more raw documents, in the order the registry lists them.
    /// An image without attestations yields an empty vector.
    ///
    /// # Errors
    /// Returns `VexiError::FetchFailure` when the registry cannot be reached
    /// or answers with something that is not an attestation.
    async fn fetch_attestations(
        &self,
        image: &ImageReference,
        formats: &[PredicateFormat],
    ) -> Result<Vec<RawDocument>>;
}

#[async_trait]
impl<T: AttestationFetcher + ?Sized> AttestationFetcher for Box<T> {
    async fn fetch_attestations(
        &self,
        image: &ImageReference,
        formats: &[PredicateFormat],
    ) -> Result<Vec<RawDocument>> {
        (**self).fetch_attestations(image, formats).await
    }
}
