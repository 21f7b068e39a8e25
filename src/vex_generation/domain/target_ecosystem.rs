use super::PackageIdentifier;
use crate::shared::error::VexiError;
use crate::shared::Result;

/// Package URL type of the distribution packages advisories are written for
pub const DEFAULT_PURL_TYPE: &str = "apk";

/// Package URL namespace of the distribution packages advisories are written for
pub const DEFAULT_NAMESPACE: &str = "wolfi";

/// TargetEcosystem value object: which SBOM components are advisory candidates
///
/// A component qualifies when its purl type equals `purl_type` and its
/// namespace is `namespace` (or nested below it). The same pair is used to
/// synthesize the subcomponent identifiers of the VEX statements.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetEcosystem {
    purl_type: String,
    namespace: String,
}

impl TargetEcosystem {
    pub fn new(purl_type: String, namespace: String) -> Result<Self> {
        if purl_type.is_empty()
            || !purl_type
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || matches!(c, '.' | '+' | '-'))
        {
            return Err(VexiError::Validation {
                message: format!(
                    "ecosystem '{}' is not a valid package URL type (lowercase letters, digits, '.', '+', '-')",
                    purl_type
                ),
            }
            .into());
        }

        let namespace = namespace.trim_matches('/').to_string();
        if namespace.is_empty() || namespace.split('/').any(str::is_empty) {
            return Err(VexiError::Validation {
                message: format!("namespace '{}' is not a valid package URL namespace", namespace),
            }
            .into());
        }

        Ok(Self {
            purl_type,
            namespace,
        })
    }

    pub fn purl_type(&self) -> &str {
        &self.purl_type
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Checks a component's purl type and namespace against the target
    pub fn matches(&self, purl_type: &str, namespace: Option<&str>) -> bool {
        if purl_type != self.purl_type {
            return false;
        }
        match namespace {
            Some(ns) => {
                ns == self.namespace
                    || ns
                        .strip_prefix(self.namespace.as_str())
                        .is_some_and(|rest| rest.starts_with('/'))
            }
            None => false,
        }
    }

    /// Identifier of a distribution package: `pkg:<type>/<namespace>/<name>`
    pub fn package_identifier(&self, package_name: &str) -> PackageIdentifier {
        PackageIdentifier::from_parts_unchecked(format!(
            "pkg:{}/{}/{}",
            self.purl_type, self.namespace, package_name
        ))
    }
}

impl Default for TargetEcosystem {
    fn default() -> Self {
        Self {
            purl_type: DEFAULT_PURL_TYPE.to_string(),
            namespace: DEFAULT_NAMESPACE.to_string(),
        }
    }
}
