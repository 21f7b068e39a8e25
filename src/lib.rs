//! vexi - VEX document distiller for container images
//!
//! This library derives an OpenVEX document for a container image from the
//! SBOM attested to it and a directory of distribution security advisories,
//! following hexagonal architecture and Domain-Driven Design principles.
//!
//! # Architecture
//!
//! The library is organized into the following layers:
//!
//! - **Domain Layer** (`vex_generation`): Pure business logic and domain models
//! - **Application Layer** (`application`): Use cases and application services
//! - **Ports** (`ports`): Interface definitions for infrastructure
//! - **Adapters** (`adapters`): Concrete implementations of ports
//! - **Shared** (`shared`): Common utilities and error types
//!
//! # Example
//!
//! ```no_run
//! use vexi::prelude::*;
//! use std::path::PathBuf;
//!
//! # async fn run() -> Result<()> {
//! // Create use case
//! let use_case = GenerateImageVexUseCase::new(
//!     RegistryAttestationFetcher::new()?,
//!     GitAdvisorySource::new(),
//!     JsonSbomParser::new(),
//!     DirectoryAdvisoryIndexLoader::new(),
//!     StderrProgressReporter::new(),
//! );
//!
//! // Execute
//! let request = VexRequest::builder("cgr.dev/chainguard/curl:latest")
//!     .advisories_dir(Some(PathBuf::from("./advisories")))
//!     .build()?;
//! let response = use_case.execute(request).await?;
//!
//! // Format output
//! let output = OpenVexFormatter::new().format(&response.document)?;
//! println!("{}", output);
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod application;
pub mod ports;
pub mod shared;
pub mod vex_generation;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::adapters::outbound::console::StderrProgressReporter;
    pub use crate::adapters::outbound::filesystem::{
        DirectoryAdvisoryIndex, DirectoryAdvisoryIndexLoader, FileSystemWriter, LocalSbomReader,
        StdoutPresenter,
    };
    pub use crate::adapters::outbound::formatters::OpenVexFormatter;
    pub use crate::adapters::outbound::git::GitAdvisorySource;
    pub use crate::adapters::outbound::network::RegistryAttestationFetcher;
    pub use crate::adapters::outbound::parsers::JsonSbomParser;
    pub use crate::application::dto::{
        AdvisoriesLocation, RepositorySlug, VexRequest, VexResponse,
    };
    pub use crate::application::use_cases::GenerateImageVexUseCase;
    pub use crate::ports::outbound::{
        AdvisoryIndex, AdvisoryIndexLoader, AdvisorySource, AttestationFetcher, ComponentSelector,
        OutputPresenter, ProgressReporter, SbomParser, VexComposer, VexFormatter, VexMerger,
    };
    pub use crate::vex_generation::domain::{
        AdvisoryDocument, ImageReference, PackageIdentifier, PredicateFormat, TargetEcosystem,
        VexDocument, VexStatement, VexStatus,
    };
    pub use crate::vex_generation::services::{
        AdvisoryResolver, ComponentFilter, DocumentMerger, ReferenceCanonicalizer,
        StatementComposer,
    };
    pub use crate::shared::Result;
}
