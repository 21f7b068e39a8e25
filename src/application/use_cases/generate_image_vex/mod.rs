use crate::application::dto::{AdvisoriesLocation, VexRequest, VexResponse};
use crate::ports::outbound::{
    AdvisoryIndexLoader, AdvisorySource, AttestationFetcher, ComponentSelector,
    ProgressReporter, SbomParser, VexComposer, VexMerger,
};
use crate::shared::error::VexiError;
use crate::shared::Result;
use crate::vex_generation::domain::{AdvisoryDocument, PackageIdentifier, RawDocument, VexDocument};
use crate::vex_generation::services::{
    AdvisoryResolver, ComponentFilter, DocumentMerger, MetadataGenerator, ReferenceCanonicalizer,
    StatementComposer,
};
use anyhow::Context;
use std::path::PathBuf;
use tempfile::TempDir;
use tracing::info;

#[derive(Debug, Default)]
struct StageCounts {
    attestations: usize,
    components: usize,
    advisory_documents: usize,
}

/// GenerateImageVexUseCase - Core use case for image VEX generation
///
/// Runs the pipeline for one image: canonicalize the reference, fetch and
/// parse its SBOM, keep the distribution packages, look up their advisories
/// and fold the advisory histories into one merged document. Every
/// infrastructure dependency is injected, and so is each transformation
/// stage; `new` wires in the stock services.
///
/// # Type Parameters
/// * `AF` - AttestationFetcher implementation
/// * `AS` - AdvisorySource implementation
/// * `SP` - SbomParser implementation
/// * `AL` - AdvisoryIndexLoader implementation
/// * `PR` - ProgressReporter implementation
/// * `CS` - ComponentSelector implementation
/// * `VC` - VexComposer implementation
/// * `VM` - VexMerger implementation
pub struct GenerateImageVexUseCase<
    AF,
    AS,
    SP,
    AL,
    PR,
    CS = ComponentFilter,
    VC = StatementComposer,
    VM = DocumentMerger,
> {
    attestation_fetcher: AF,
    advisory_source: AS,
    sbom_parser: SP,
    index_loader: AL,
    progress_reporter: PR,
    component_selector: CS,
    vex_composer: VC,
    vex_merger: VM,
}

impl<AF, AS, SP, AL, PR> GenerateImageVexUseCase<AF, AS, SP, AL, PR> {
    /// Creates a new GenerateImageVexUseCase with injected dependencies
    pub fn new(
        attestation_fetcher: AF,
        advisory_source: AS,
        sbom_parser: SP,
        index_loader: AL,
        progress_reporter: PR,
    ) -> Self {
        Self {
            attestation_fetcher,
            advisory_source,
            sbom_parser,
            index_loader,
            progress_reporter,
            component_selector: ComponentFilter::new(),
            vex_composer: StatementComposer::new(),
            vex_merger: DocumentMerger::new(),
        }
    }
}

impl<AF, AS, SP, AL, PR, CS, VC, VM> GenerateImageVexUseCase<AF, AS, SP, AL, PR, CS, VC, VM> {
    /// Replaces the component selection stage
    pub fn with_component_selector<S: ComponentSelector>(
        self,
        component_selector: S,
    ) -> GenerateImageVexUseCase<AF, AS, SP, AL, PR, S, VC, VM> {
        GenerateImageVexUseCase {
            attestation_fetcher: self.attestation_fetcher,
            advisory_source: self.advisory_source,
            sbom_parser: self.sbom_parser,
            index_loader: self.index_loader,
            progress_reporter: self.progress_reporter,
            component_selector,
            vex_composer: self.vex_composer,
            vex_merger: self.vex_merger,
        }
    }

    /// Replaces the statement composition stage
    pub fn with_vex_composer<C: VexComposer>(
        self,
        vex_composer: C,
    ) -> GenerateImageVexUseCase<AF, AS, SP, AL, PR, CS, C, VM> {
        GenerateImageVexUseCase {
            attestation_fetcher: self.attestation_fetcher,
            advisory_source: self.advisory_source,
            sbom_parser: self.sbom_parser,
            index_loader: self.index_loader,
            progress_reporter: self.progress_reporter,
            component_selector: self.component_selector,
            vex_composer,
            vex_merger: self.vex_merger,
        }
    }

    /// Replaces the document merging stage
    pub fn with_vex_merger<M: VexMerger>(
        self,
        vex_merger: M,
    ) -> GenerateImageVexUseCase<AF, AS, SP, AL, PR, CS, VC, M> {
        GenerateImageVexUseCase {
            attestation_fetcher: self.attestation_fetcher,
            advisory_source: self.advisory_source,
            sbom_parser: self.sbom_parser,
            index_loader: self.index_loader,
            progress_reporter: self.progress_reporter,
            component_selector: self.component_selector,
            vex_composer: self.vex_composer,
            vex_merger,
        }
    }
}

impl<AF, AS, SP, AL, PR, CS, VC, VM> GenerateImageVexUseCase<AF, AS, SP, AL, PR, CS, VC, VM>
where
    AF: AttestationFetcher,
    AS: AdvisorySource,
    SP: SbomParser,
    AL: AdvisoryIndexLoader,
    PR: ProgressReporter,
    CS: ComponentSelector,
    VC: VexComposer,
    VM: VexMerger,
{

    /// Executes the VEX generation use case
    ///
    /// Finding no attestation, no distribution package or no advisory is
    /// not an error: the response then carries a document without
    /// statements.
    ///
    /// # Errors
    /// The first fatal stage failure, wrapped with the name of the stage.
    pub async fn execute(&self, request: VexRequest) -> Result<VexResponse> {
        // Step 1: Canonicalize the image reference
        let (image, image_id) = ReferenceCanonicalizer::canonicalize(&request.image_reference)
            .context("parsing image reference")?;
        self.progress_reporter
            .report(&format!("🔎 Looking for SBOM attestations of {}", image));

        let mut counts = StageCounts::default();

        // Step 2: Download the attested SBOMs
        let attestations = self
            .attestation_fetcher
            .fetch_attestations(&image, &request.predicate_formats)
            .await
            .context("downloading image SBOM")?;
        counts.attestations = attestations.len();

        let Some(sbom) = self.select_sbom(&attestations) else {
            self.progress_reporter
                .report_error("⚠️  Warning: No SBOM attestations found for the image.");
            return self.finish(&request, image_id, counts, vec![]);
        };

        // Step 3: Parse it and keep the distribution packages
        let graph = self
            .sbom_parser
            .parse(sbom)
            .context("parsing image SBOM")?;
        let components = self
            .component_selector
            .select_components(&graph, &request.target);
        counts.components = components.len();
        info!(
            nodes = graph.nodes().len(),
            selected = components.len(),
            format = %graph.format(),
            "Filtered SBOM components"
        );
        self.progress_reporter.report(&format!(
            "📦 Found {} {}/{} package(s) among {} SBOM component(s)",
            components.len(),
            request.target.purl_type(),
            request.target.namespace(),
            graph.nodes().len()
        ));

        if components.is_empty() {
            return self.finish(&request, image_id, counts, vec![]);
        }

        // Step 4: Look up the advisories of those packages
        let advisory_documents = self
            .find_advisories(&request, &components.names())
            .await
            .context("searching advisory data")?;
        counts.advisory_documents = advisory_documents.len();

        // Step 5: Compose one document per package
        let total = advisory_documents.len();
        let documents: Vec<VexDocument> = advisory_documents
            .iter()
            .enumerate()
            .map(|(idx, document)| {
                self.progress_reporter.report_progress(
                    idx + 1,
                    total,
                    Some(document.package_name()),
                );
                self.vex_composer.compose_package_document(
                    &image_id,
                    &request.target,
                    document,
                    MetadataGenerator::generate_default_metadata(&request.author),
                )
            })
            .collect();

        // Step 6: Merge
        self.finish(&request, image_id, counts, documents)
    }

    /// Picks the SBOM to analyze; only the first one is used
    fn select_sbom<'a>(&self, attestations: &'a [RawDocument]) -> Option<&'a RawDocument> {
        let first = attestations.first()?;
        if attestations.len() > 1 {
            self.progress_reporter.report(&format!(
                "ℹ️  Found {} SBOM attestations, using the first one ({})",
                attestations.len(),
                first.predicate_type()
            ));
        }
        Some(first)
    }

    /// Opens the advisory database and resolves the component names
    ///
    /// A temporary clone lives exactly as long as this call.
    async fn find_advisories(
        &self,
        request: &VexRequest,
        names: &[&str],
    ) -> Result<Vec<AdvisoryDocument>> {
        let (dir, _clone): (PathBuf, Option<TempDir>) = match &request.advisories {
            AdvisoriesLocation::Directory(dir) => (dir.clone(), None),
            AdvisoriesLocation::CloneToTemporary => {
                let temp_dir = TempDir::new().map_err(|e| VexiError::IndexUnavailable {
                    path: std::env::temp_dir(),
                    details: format!("Failed to create temporary directory: {}", e),
                })?;
                self.progress_reporter.report(&format!(
                    "📥 Cloning advisory repository {}",
                    request.repository
                ));
                self.advisory_source
                    .provision(
                        request.repository.org(),
                        request.repository.name(),
                        temp_dir.path(),
                    )
                    .await
                    .context("cloning advisory repository")?;
                (temp_dir.path().to_path_buf(), Some(temp_dir))
            }
        };

        let index = self.index_loader.open_index(&dir)?;
        let documents = AdvisoryResolver::resolve(&index, names)?;
        self.progress_reporter.report(&format!(
            "📚 Matched {} advisory document(s)",
            documents.len()
        ));
        Ok(documents)
    }

    fn finish(
        &self,
        request: &VexRequest,
        image_id: PackageIdentifier,
        counts: StageCounts,
        documents: Vec<VexDocument>,
    ) -> Result<VexResponse> {
        let document = self
            .vex_merger
            .merge_documents(documents, &request.author)
            .context("merging VEX documents")?;
        self.progress_reporter.report_completion(&format!(
            "✅ Generated {} VEX statement(s) for {}",
            document.statements().len(),
            image_id
        ));
        Ok(VexResponse {
            image_id,
            document,
            attestation_count: counts.attestations,
            component_count: counts.components,
            advisory_document_count: counts.advisory_documents,
        })
    }
}

#[cfg(test)]
mod tests;
