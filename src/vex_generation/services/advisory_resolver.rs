use crate::ports::outbound::AdvisoryIndex;
use crate::vex_generation::domain::AdvisoryDocument;
use crate::shared::Result;
use tracing::debug;

/// AdvisoryResolver service: component names to advisory documents
///
/// Names are looked up in the order given. A package that appears several
/// times in the SBOM (one node per architecture, say) is looked up each
/// time and contributes its documents each time; the document merger
/// collapses the resulting duplicate statements.
pub struct AdvisoryResolver;

impl AdvisoryResolver {
    /// Collects the advisory documents of every name
    ///
    /// Matching is exact and case-sensitive. Names without advisories
    /// contribute nothing.
    ///
    /// # Errors
    /// Propagates the index's error if a lookup fails.
    pub fn resolve<I: AdvisoryIndex + ?Sized>(
        index: &I,
        names: &[&str],
    ) -> Result<Vec<AdvisoryDocument>> {
        let mut documents = Vec::new();
        for name in names {
            let found = index.select_by_name(name)?;
            debug!(package = *name, documents = found.len(), "Advisory lookup");
            documents.extend(found);
        }
        Ok(documents)
    }
}
