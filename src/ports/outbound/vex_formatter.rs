use crate::vex_generation::domain::VexDocument;
use crate::shared::Result;

/// VexFormatter port for rendering a VEX document
pub trait VexFormatter {
    /// Serializes the document
    ///
    /// # Errors
    /// Returns an error if serialization fails
    fn format(&self, document: &VexDocument) -> Result<String>;
}
