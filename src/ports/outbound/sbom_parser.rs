use crate::vex_generation::domain::{RawDocument, SbomGraph};
use crate::shared::Result;

/// SbomParser port for turning raw SBOM bytes into a component graph
pub trait SbomParser {
    /// Parses a raw document into its component nodes
    ///
    /// # Errors
    /// Returns `VexiError::ParseFailure` if the content is not a supported
    /// SBOM document.
    fn parse(&self, document: &RawDocument) -> Result<SbomGraph>;
}
