use crate::shared::Result;
use crate::vex_generation::domain::image_reference::{DEFAULT_REGISTRY, OFFICIAL_IMAGES_NAMESPACE};
use crate::vex_generation::domain::{ImageReference, PackageIdentifier};
use std::collections::BTreeMap;

const OCI_PURL_TYPE: &str = "oci";

/// ReferenceCanonicalizer service: image reference to `pkg:oci` identifier
///
/// Output shape: `pkg:oci/<name>[@<digest>][?repository_url=<path>&tag=<tag>]`.
/// Only what the reference literally carries ends up in the identifier:
/// the implicit `latest` tag is never written and the implicit default
/// registry location is dropped unless the reference spells out
/// `index.docker.io/library`.
pub struct ReferenceCanonicalizer;

impl ReferenceCanonicalizer {
    /// Parses `reference` and renders its package identifier
    ///
    /// The parsed reference is handed back as well, since fetching the
    /// image's attestations needs its registry and repository.
    ///
    /// # Errors
    /// Returns `VexiError::InvalidReference` if the reference cannot be parsed.
    pub fn canonicalize(reference: &str) -> Result<(ImageReference, PackageIdentifier)> {
        let image = ImageReference::parse(reference)?;
        let identifier = Self::to_package_identifier(&image);
        Ok((image, identifier))
    }

    fn to_package_identifier(image: &ImageReference) -> PackageIdentifier {
        let mut purl = format!("pkg:{}/{}", OCI_PURL_TYPE, image.name());

        if let Some(digest) = image.digest() {
            // Consumers of these identifiers choke on a bare ':' in the
            // version, so the separator is always sent encoded.
            purl.push('@');
            purl.push_str(&digest.replace(':', "%3A"));
        }

        let mut qualifiers: BTreeMap<&str, String> = BTreeMap::new();
        if let Some(repository_url) = Self::repository_url(image) {
            qualifiers.insert("repository_url", repository_url);
        }
        if let Some(tag) = image.tag() {
            qualifiers.insert("tag", tag.to_string());
        }

        if !qualifiers.is_empty() {
            let encoded: Vec<String> = qualifiers
                .iter()
                .map(|(key, value)| format!("{}={}", key, urlencoding::encode(value)))
                .collect();
            purl.push('?');
            purl.push_str(&encoded.join("&"));
        }

        PackageIdentifier::from_parts_unchecked(purl)
    }

    /// Everything before the image name
    ///
    /// On the default registry it is kept only when the reference literally
    /// names the official images location; any other default-registry path
    /// is dropped, user namespaces included.
    fn repository_url(image: &ImageReference) -> Option<String> {
        let context = image.context_name();
        let (repository_url, _name) = context.rsplit_once('/')?;

        if image.is_default_registry() {
            let official = format!("{}/{}", DEFAULT_REGISTRY, OFFICIAL_IMAGES_NAMESPACE);
            if !image.original().contains(&official) {
                return None;
            }
        }
        Some(repository_url.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::error::VexiError;

    fn canonical(reference: &str) -> String {
        let (_image, identifier) = ReferenceCanonicalizer::canonicalize(reference).unwrap();
        identifier.to_string()
    }

    #[test]
    fn test_canonicalize_digest() {
        assert_eq!(
            canonical("nginx@sha256:6926dd802f40e5e7257fded83e0d8030039642e4e10c4a98a6478e9c6fe06153"),
            "pkg:oci/nginx@sha256%3A6926dd802f40e5e7257fded83e0d8030039642e4e10c4a98a6478e9c6fe06153"
        );
    }

    #[test]
    fn test_canonicalize_digest_with_registry() {
        assert_eq!(
            canonical("cgr.dev/chainguard/nginx@sha256:6fc88127201c4338e2278501a52714abb1dedbb664f936eee0927488df5545b3"),
            "pkg:oci/nginx@sha256%3A6fc88127201c4338e2278501a52714abb1dedbb664f936eee0927488df5545b3?repository_url=cgr.dev%2Fchainguard"
        );
    }

    #[test]
    fn test_canonicalize_with_registry() {
        assert_eq!(
            canonical("cgr.dev/chainguard/curl"),
            "pkg:oci/curl?repository_url=cgr.dev%2Fchainguard"
        );
    }

    #[test]
    fn test_canonicalize_with_registry_and_tag() {
        assert_eq!(
            canonical("cgr.dev/chainguard/curl:latest"),
            "pkg:oci/curl?repository_url=cgr.dev%2Fchainguard&tag=latest"
        );
    }

    #[test]
    fn test_canonicalize_default_registry_omits_inferred_tag() {
        let purl = canonical("alpine");
        assert_eq!(purl, "pkg:oci/alpine");
        assert!(!purl.contains("tag="));
    }

    #[test]
    fn test_canonicalize_default_registry_explicit() {
        assert_eq!(
            canonical("index.docker.io/library/alpine"),
            "pkg:oci/alpine?repository_url=index.docker.io%2Flibrary"
        );
    }

    #[test]
    fn test_canonicalize_docker_io_alias_is_suppressed() {
        assert_eq!(canonical("docker.io/library/alpine:3.19"), "pkg:oci/alpine?tag=3.19");
    }

    #[test]
    fn test_canonicalize_default_registry_user_namespace() {
        assert_eq!(canonical("index.docker.io/bitnami/redis"), "pkg:oci/redis");
        assert_eq!(canonical("docker.io/bitnami/redis:7.2"), "pkg:oci/redis?tag=7.2");
        assert_eq!(canonical("bitnami/redis"), "pkg:oci/redis");
        assert_eq!(canonical("index.docker.io/alpine"), "pkg:oci/alpine");
    }

    #[test]
    fn test_canonicalize_returns_parsed_reference() {
        let (image, identifier) =
            ReferenceCanonicalizer::canonicalize("cgr.dev/chainguard/curl:8.1").unwrap();

        assert_eq!(image.registry(), "cgr.dev");
        assert_eq!(image.repository(), "chainguard/curl");
        assert_eq!(
            identifier.as_str(),
            "pkg:oci/curl?repository_url=cgr.dev%2Fchainguard&tag=8.1"
        );
    }

    #[test]
    fn test_canonicalize_tag_and_digest() {
        assert_eq!(
            canonical("cgr.dev/chainguard/curl:latest@sha256:6926dd802f40e5e7257fded83e0d8030039642e4e10c4a98a6478e9c6fe06153"),
            "pkg:oci/curl@sha256%3A6926dd802f40e5e7257fded83e0d8030039642e4e10c4a98a6478e9c6fe06153?repository_url=cgr.dev%2Fchainguard&tag=latest"
        );
    }

    #[test]
    fn test_canonicalize_registry_port_is_encoded() {
        assert_eq!(
            canonical("localhost:5000/curl:8.1"),
            "pkg:oci/curl?repository_url=localhost%3A5000&tag=8.1"
        );
    }

    #[test]
    fn test_canonicalize_is_deterministic() {
        let reference = "cgr.dev/chainguard/node:20@sha256:6fc88127201c4338e2278501a52714abb1dedbb664f936eee0927488df5545b3";
        assert_eq!(canonical(reference), canonical(reference));
    }

    #[test]
    fn test_canonicalize_invalid_reference() {
        let err = ReferenceCanonicalizer::canonicalize("cgr.dev/Chainguard/curl").unwrap_err();
        assert!(matches!(
            err.downcast_ref::<VexiError>(),
            Some(VexiError::InvalidReference { .. })
        ));
    }
}
