use super::RepositorySlug;
use crate::shared::error::VexiError;
use crate::shared::Result;
use crate::vex_generation::domain::vex::DEFAULT_AUTHOR;
use crate::vex_generation::domain::{PredicateFormat, TargetEcosystem};
use std::path::PathBuf;

/// Where the advisory database comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdvisoriesLocation {
    /// An existing checkout of the advisory repository
    Directory(PathBuf),
    /// Clone the repository into a temporary directory removed after the run
    CloneToTemporary,
}

/// VexRequest - Internal request DTO for the VEX generation use case
///
/// Built once by the caller through [`VexRequest::builder`] and never
/// mutated afterwards.
#[derive(Debug, Clone)]
pub struct VexRequest {
    /// Image reference as typed by the user
    pub image_reference: String,
    pub advisories: AdvisoriesLocation,
    /// Repository cloned when `advisories` is `CloneToTemporary`
    pub repository: RepositorySlug,
    /// Attestation predicate formats to look for, in preference order
    pub predicate_formats: Vec<PredicateFormat>,
    /// Output file; `None` writes to stdout
    pub output: Option<PathBuf>,
    /// Author recorded in the merged document
    pub author: String,
    /// Distribution whose packages the advisories describe
    pub target: TargetEcosystem,
}

impl VexRequest {
    pub fn builder(image_reference: impl Into<String>) -> VexRequestBuilder {
        VexRequestBuilder::new(image_reference.into())
    }
}

/// Builder for [`VexRequest`]; unset fields take their defaults
#[derive(Debug, Clone)]
pub struct VexRequestBuilder {
    image_reference: String,
    advisories: AdvisoriesLocation,
    repository: RepositorySlug,
    predicate_formats: Vec<PredicateFormat>,
    output: Option<PathBuf>,
    author: String,
    target: TargetEcosystem,
}

impl VexRequestBuilder {
    fn new(image_reference: String) -> Self {
        Self {
            image_reference,
            advisories: AdvisoriesLocation::CloneToTemporary,
            repository: RepositorySlug::default(),
            predicate_formats: PredicateFormat::defaults(),
            output: None,
            author: DEFAULT_AUTHOR.to_string(),
            target: TargetEcosystem::default(),
        }
    }

    pub fn advisories(mut self, advisories: AdvisoriesLocation) -> Self {
        self.advisories = advisories;
        self
    }

    pub fn advisories_dir(self, dir: Option<PathBuf>) -> Self {
        match dir {
            Some(dir) => self.advisories(AdvisoriesLocation::Directory(dir)),
            None => self.advisories(AdvisoriesLocation::CloneToTemporary),
        }
    }

    pub fn repository(mut self, repository: RepositorySlug) -> Self {
        self.repository = repository;
        self
    }

    pub fn predicate_formats(mut self, formats: Vec<PredicateFormat>) -> Self {
        self.predicate_formats = formats;
        self
    }

    pub fn output(mut self, output: Option<PathBuf>) -> Self {
        self.output = output;
        self
    }

    pub fn author(mut self, author: impl Into<String>) -> Self {
        self.author = author.into();
        self
    }

    pub fn target(mut self, target: TargetEcosystem) -> Self {
        self.target = target;
        self
    }

    /// Validates and freezes the request
    ///
    /// # Errors
    /// Returns `VexiError::Validation` if the image reference, the author or
    /// the predicate format list is empty.
    pub fn build(self) -> Result<VexRequest> {
        if self.image_reference.trim().is_empty() {
            return Err(VexiError::Validation {
                message: "image reference is required".to_string(),
            }
            .into());
        }
        if self.predicate_formats.is_empty() {
            return Err(VexiError::Validation {
                message: "at least one predicate format is required".to_string(),
            }
            .into());
        }
        if self.author.trim().is_empty() {
            return Err(VexiError::Validation {
                message: "author must not be empty".to_string(),
            }
            .into());
        }

        Ok(VexRequest {
            image_reference: self.image_reference,
            advisories: self.advisories,
            repository: self.repository,
            predicate_formats: self.predicate_formats,
            output: self.output,
            author: self.author,
            target: self.target,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults() {
        let request = VexRequest::builder("cgr.dev/chainguard/curl").build().unwrap();

        assert_eq!(request.image_reference, "cgr.dev/chainguard/curl");
        assert_eq!(request.advisories, AdvisoriesLocation::CloneToTemporary);
        assert_eq!(request.repository, RepositorySlug::default());
        assert_eq!(
            request.predicate_formats,
            vec![PredicateFormat::Spdx, PredicateFormat::CycloneDx]
        );
        assert!(request.output.is_none());
        assert_eq!(request.author, "Unknown Author");
        assert_eq!(request.target, TargetEcosystem::default());
    }

    #[test]
    fn test_builder_overrides() {
        let request = VexRequest::builder("alpine")
            .advisories_dir(Some(PathBuf::from("/srv/advisories")))
            .predicate_formats(vec![PredicateFormat::CycloneDx])
            .output(Some(PathBuf::from("alpine.vex.json")))
            .author("Wolfi Security")
            .build()
            .unwrap();

        assert_eq!(
            request.advisories,
            AdvisoriesLocation::Directory(PathBuf::from("/srv/advisories"))
        );
        assert_eq!(request.predicate_formats, vec![PredicateFormat::CycloneDx]);
        assert_eq!(request.output, Some(PathBuf::from("alpine.vex.json")));
        assert_eq!(request.author, "Wolfi Security");
    }

    #[test]
    fn test_builder_rejects_empty_reference() {
        let err = VexRequest::builder("  ").build().unwrap_err();
        assert!(err.to_string().contains("image reference is required"));
    }

    #[test]
    fn test_builder_rejects_empty_predicates() {
        let result = VexRequest::builder("alpine").predicate_formats(vec![]).build();
        assert!(result.is_err());
    }

    #[test]
    fn test_builder_rejects_empty_author() {
        assert!(VexRequest::builder("alpine").author("").build().is_err());
    }
}
