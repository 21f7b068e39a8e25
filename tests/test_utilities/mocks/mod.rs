/// Mock implementations for testing
mod mock_advisory_source;
mod mock_attestation_fetcher;
mod mock_progress_reporter;

pub use mock_advisory_source::MockAdvisorySource;
pub use mock_attestation_fetcher::MockAttestationFetcher;
pub use mock_progress_reporter::{MockProgressReporter, Reported};
