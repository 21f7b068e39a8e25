use crate::adapters::outbound::filesystem::LocalSbomReader;
use crate::adapters::outbound::network::RegistryAttestationFetcher;
use crate::ports::outbound::AttestationFetcher;
use crate::shared::Result;
use std::path::PathBuf;

/// Where the image SBOM is read from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SbomSource {
    /// Attestations attached to the image in its registry
    Registry,
    /// A local SBOM file standing in for the attestations
    LocalFile(PathBuf),
}

impl From<Option<PathBuf>> for SbomSource {
    fn from(sbom: Option<PathBuf>) -> Self {
        match sbom {
            Some(path) => SbomSource::LocalFile(path),
            None => SbomSource::Registry,
        }
    }
}

/// Factory for creating attestation fetchers
pub struct FetcherFactory;

impl FetcherFactory {
    /// Creates the fetcher for `source`
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be built.
    pub fn create(source: SbomSource) -> Result<Box<dyn AttestationFetcher>> {
        Ok(match source {
            SbomSource::Registry => Box::new(RegistryAttestationFetcher::new()?),
            SbomSource::LocalFile(path) => Box::new(LocalSbomReader::new(path)),
        })
    }
}
