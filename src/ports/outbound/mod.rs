/// Outbound ports (Driven ports) - Infrastructure interfaces
///
/// These ports define the interfaces that the application core uses
/// to interact with external systems (registries, the file system, git,
/// the console), plus the seams between the pipeline stages.
pub mod advisory_index;
pub mod advisory_source;
pub mod attestation_fetcher;
pub mod output_presenter;
pub mod progress_reporter;
pub mod sbom_parser;
pub mod vex_formatter;
pub mod vex_stages;

pub use advisory_index::{AdvisoryIndex, AdvisoryIndexLoader};
pub use advisory_source::AdvisorySource;
pub use attestation_fetcher::AttestationFetcher;
pub use output_presenter::OutputPresenter;
pub use progress_reporter::ProgressReporter;
pub use sbom_parser::SbomParser;
pub use vex_formatter::VexFormatter;
pub use vex_stages::{ComponentSelector, VexComposer, VexMerger};
