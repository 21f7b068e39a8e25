use super::EventTranslator;
use crate::ports::outbound::VexComposer;
use crate::vex_generation::domain::{
    AdvisoryDocument, DocumentMetadata, PackageIdentifier, TargetEcosystem, VexDocument,
    VexStatement, VexStatus,
};
use chrono::{DateTime, Utc};
use tracing::debug;

/// StatementComposer service: advisory history to VEX statements
///
/// Every event of an advisory that translates to a status becomes its own
/// statement, so the output keeps the full lifecycle of a vulnerability
/// (detected, then fixed, ...) rather than only its latest state.
#[derive(Debug, Clone, Copy, Default)]
pub struct StatementComposer;

impl StatementComposer {
    pub fn new() -> Self {
        Self
    }

    /// Builds one statement about `subcomponent` inside the image `image_id`
    pub fn compose(
        &self,
        image_id: &PackageIdentifier,
        subcomponent: PackageIdentifier,
        advisory_id: &str,
        status: VexStatus,
        timestamp: DateTime<Utc>,
    ) -> VexStatement {
        VexStatement::new(
            advisory_id.to_string(),
            timestamp,
            image_id.clone(),
            subcomponent,
            status,
        )
    }

    /// Turns one package's advisory document into statements
    ///
    /// Advisories are visited in document order, events in chronological
    /// order. Advisories without events and events without a status are
    /// skipped.
    pub fn compose_statements(
        &self,
        image_id: &PackageIdentifier,
        target: &TargetEcosystem,
        document: &AdvisoryDocument,
    ) -> Vec<VexStatement> {
        let subcomponent = target.package_identifier(document.package_name());
        let mut statements = Vec::new();

        for advisory in document.advisories() {
            if advisory.events().is_empty() {
                debug!(
                    package = document.package_name(),
                    advisory = advisory.id(),
                    "Skipping advisory without events"
                );
                continue;
            }

            for event in advisory.sorted_events() {
                let Some(status) = EventTranslator::translate(event.kind()) else {
                    debug!(
                        package = document.package_name(),
                        advisory = advisory.id(),
                        event_type = event.kind().as_str(),
                        "Skipping event without a VEX status"
                    );
                    continue;
                };

                statements.push(self.compose(
                    image_id,
                    subcomponent.clone(),
                    advisory.id(),
                    status,
                    event.timestamp(),
                ));
            }
        }

        statements
    }

    /// Wraps [`Self::compose_statements`] into a per-package document
    pub fn compose_document(
        &self,
        image_id: &PackageIdentifier,
        target: &TargetEcosystem,
        document: &AdvisoryDocument,
        metadata: DocumentMetadata,
    ) -> VexDocument {
        VexDocument::new(metadata, self.compose_statements(image_id, target, document))
    }
}

impl VexComposer for StatementComposer {
    fn compose_package_document(
        &self,
        image_id: &PackageIdentifier,
        target: &TargetEcosystem,
        advisories: &AdvisoryDocument,
        metadata: DocumentMetadata,
    ) -> VexDocument {
        self.compose_document(image_id, target, advisories, metadata)
    }
}
