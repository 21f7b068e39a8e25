use crate::shared::error::VexiError;
use crate::shared::Result;
use std::fmt;
use std::str::FromStr;

/// Organization that publishes the advisory repository
pub const DEFAULT_REPOSITORY_ORG: &str = "wolfi-dev";

/// Name of the advisory repository
pub const DEFAULT_REPOSITORY_NAME: &str = "advisories";

/// RepositorySlug: `org/name` of the advisory repository to clone
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositorySlug {
    org: String,
    name: String,
}

impl RepositorySlug {
    pub fn new(org: &str, name: &str) -> Result<Self> {
        for (label, part) in [("organization", org), ("repository name", name)] {
            if part.is_empty() {
                return Err(VexiError::Validation {
                    message: format!("advisory repository {} is empty", label),
                }
                .into());
            }
            if !part
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
            {
                return Err(VexiError::Validation {
                    message: format!(
                        "advisory repository {} '{}' contains invalid characters",
                        label, part
                    ),
                }
                .into());
            }
        }
        Ok(Self {
            org: org.to_string(),
            name: name.to_string(),
        })
    }

    pub fn org(&self) -> &str {
        &self.org
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Default for RepositorySlug {
    fn default() -> Self {
        Self {
            org: DEFAULT_REPOSITORY_ORG.to_string(),
            name: DEFAULT_REPOSITORY_NAME.to_string(),
        }
    }
}

impl FromStr for RepositorySlug {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let mut parts = s.split('/');
        match (parts.next(), parts.next(), parts.next()) {
            (Some(org), Some(name), None) => Self::new(org, name),
            _ => Err(VexiError::Validation {
                message: format!(
                    "advisory repository '{}' must have the form org/name",
                    s
                ),
            }
            .into()),
        }
    }
}

impl fmt::Display for RepositorySlug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.org, self.name)
    }
}
