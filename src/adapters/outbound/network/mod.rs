/// Network adapters for registry access
mod registry_attestation_fetcher;

pub use registry_attestation_fetcher::RegistryAttestationFetcher;
