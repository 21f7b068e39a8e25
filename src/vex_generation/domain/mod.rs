pub mod advisory;
pub mod attestation;
pub mod component;
pub mod image_reference;
pub mod package_identifier;
pub mod target_ecosystem;
pub mod vex;

pub use advisory::{Advisory, AdvisoryDocument, Event, EventKind};
pub use attestation::{PredicateFormat, RawDocument};
pub use component::{ComponentNode, ComponentSet, SbomFormat, SbomGraph};
pub use image_reference::ImageReference;
pub use package_identifier::PackageIdentifier;
pub use target_ecosystem::TargetEcosystem;
pub use vex::{DocumentMetadata, VexDocument, VexStatement, VexStatus};
