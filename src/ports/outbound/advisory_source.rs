use crate::shared::Result;
use async_trait::async_trait;
use std::path::Path;

/// AdvisorySource port for provisioning a local copy of the advisory repository
#[async_trait]
pub trait AdvisorySource: Send + Sync {
    /// Populates `destination` with the contents of `org/name`
    ///
    /// # Errors
    /// Returns `VexiError::IndexUnavailable` if the repository cannot be
    /// copied into `destination`.
    async fn provision(&self, org: &str, name: &str, destination: &Path) -> Result<()>;
}
