use crate::ports::outbound::AdvisorySource;
use crate::shared::error::VexiError;
use crate::shared::Result;
use async_trait::async_trait;
use std::path::Path;
use tokio::process::Command;
use tracing::debug;

const DEFAULT_GIT_HOST: &str = "https://github.com";

/// GitAdvisorySource adapter: shallow clone of the advisory repository
///
/// Runs the `git` binary found on `PATH`.
pub struct GitAdvisorySource {
    host: String,
}

impl GitAdvisorySource {
    pub fn new() -> Self {
        Self::with_host(DEFAULT_GIT_HOST)
    }

    /// Clones from another forge (or a `file://` root in tests)
    pub fn with_host(host: &str) -> Self {
        Self {
            host: host.trim_end_matches('/').to_string(),
        }
    }

    fn clone_url(&self, org: &str, name: &str) -> String {
        format!("{}/{}/{}.git", self.host, org, name)
    }
}

impl Default for GitAdvisorySource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AdvisorySource for GitAdvisorySource {
    async fn provision(&self, org: &str, name: &str, destination: &Path) -> Result<()> {
        let url = self.clone_url(org, name);
        debug!(url = %url, destination = %destination.display(), "Cloning advisory repository");

        let unavailable = |details: String| -> anyhow::Error {
            VexiError::IndexUnavailable {
                path: destination.to_path_buf(),
                details,
            }
            .into()
        };

        let output = Command::new("git")
            .arg("clone")
            .arg("--quiet")
            .arg("--depth")
            .arg("1")
            .arg(&url)
            .arg(destination)
            .output()
            .await
            .map_err(|e| unavailable(format!("Failed to run git: {}", e)))?;

        if !output.status.success() {
            return Err(unavailable(format!(
                "git clone {} failed ({}): {}",
                url,
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_clone_url() {
        let source = GitAdvisorySource::new();
        assert_eq!(
            source.clone_url("wolfi-dev", "advisories"),
            "https://github.com/wolfi-dev/advisories.git"
        );
    }

    #[test]
    fn test_clone_url_custom_host() {
        let source = GitAdvisorySource::with_host("https://git.example.com/");
        assert_eq!(
            source.clone_url("security", "feed"),
            "https://git.example.com/security/feed.git"
        );
    }

    #[tokio::test]
    async fn test_provision_failure_is_index_unavailable() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("no-such-forge");
        let source = GitAdvisorySource::with_host(&format!("file://{}", missing.display()));
        let destination = temp_dir.path().join("clone");

        let err = source
            .provision("wolfi-dev", "advisories", &destination)
            .await
            .unwrap_err();

        assert!(matches!(
            err.downcast_ref::<VexiError>(),
            Some(VexiError::IndexUnavailable { .. })
        ));
    }
}
