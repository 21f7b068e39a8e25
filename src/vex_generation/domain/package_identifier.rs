#[cfg(test)]
use crate::shared::Result;

#[cfg(test)]
const PURL_SCHEME: &str = "pkg:";

/// NewType wrapper for a package URL string
///
/// Used both for the image (`pkg:oci/...`) and for the distribution
/// packages found inside it (`pkg:apk/wolfi/...`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PackageIdentifier(String);

impl PackageIdentifier {
    /// Validating constructor for identifiers written out by hand
    #[cfg(test)]
    pub(crate) fn new(purl: String) -> Result<Self> {
        let Some(rest) = purl.strip_prefix(PURL_SCHEME) else {
            anyhow::bail!("Package identifier '{}' must start with '{}'", purl, PURL_SCHEME);
        };

        match rest.split_once('/') {
            Some((purl_type, name)) if !purl_type.is_empty() && !name.is_empty() => {}
            _ => anyhow::bail!(
                "Package identifier '{}' must have the form pkg:type/name",
                purl
            ),
        }

        Ok(Self(purl))
    }

    /// Builds an identifier the caller has already assembled from validated parts
    pub(crate) fn from_parts_unchecked(purl: String) -> Self {
        Self(purl)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PackageIdentifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
