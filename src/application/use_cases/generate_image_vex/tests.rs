use super::*;
use crate::ports::outbound::AdvisoryIndex;
use crate::vex_generation::domain::{
    Advisory, ComponentNode, ComponentSet, Event, EventKind, ImageReference, PredicateFormat,
    SbomFormat, SbomGraph, TargetEcosystem, VexStatus,
};
use chrono::{TimeZone, Utc};
use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, Mutex};

// Mock implementations for testing
struct MockAttestationFetcher {
    documents: Vec<RawDocument>,
    requested_formats: Arc<Mutex<Vec<PredicateFormat>>>,
}

impl MockAttestationFetcher {
    fn with_documents(count: usize) -> Self {
        let documents = (0..count)
            .map(|_| RawDocument::new("https://spdx.dev/Document".to_string(), b"{}".to_vec()))
            .collect();
        Self {
            documents,
            requested_formats: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

#[async_trait::async_trait]
impl AttestationFetcher for MockAttestationFetcher {
    async fn fetch_attestations(
        &self,
        _image: &ImageReference,
        formats: &[PredicateFormat],
    ) -> Result<Vec<RawDocument>> {
        self.requested_formats
            .lock()
            .unwrap()
            .extend(formats.iter().cloned());
        Ok(self.documents.clone())
    }
}

struct FailingAttestationFetcher;

#[async_trait::async_trait]
impl AttestationFetcher for FailingAttestationFetcher {
    async fn fetch_attestations(
        &self,
        image: &ImageReference,
        _formats: &[PredicateFormat],
    ) -> Result<Vec<RawDocument>> {
        Err(VexiError::FetchFailure {
            reference: image.to_string(),
            details: "connection refused".to_string(),
        }
        .into())
    }
}

#[derive(Default)]
struct MockAdvisorySource {
    provisioned: Arc<Mutex<Vec<(String, String, PathBuf)>>>,
}

#[async_trait::async_trait]
impl AdvisorySource for MockAdvisorySource {
    async fn provision(&self, org: &str, name: &str, destination: &Path) -> Result<()> {
        assert!(destination.is_dir());
        self.provisioned.lock().unwrap().push((
            org.to_string(),
            name.to_string(),
            destination.to_path_buf(),
        ));
        Ok(())
    }
}

struct MockSbomParser {
    nodes: Vec<ComponentNode>,
}

impl SbomParser for MockSbomParser {
    fn parse(&self, _document: &RawDocument) -> Result<SbomGraph> {
        Ok(SbomGraph::new(SbomFormat::Spdx, self.nodes.clone()))
    }
}

struct FailingSbomParser;

impl SbomParser for FailingSbomParser {
    fn parse(&self, _document: &RawDocument) -> Result<SbomGraph> {
        Err(VexiError::ParseFailure {
            details: "unrecognized document".to_string(),
        }
        .into())
    }
}

struct MockAdvisoryIndex {
    documents: HashMap<String, Vec<AdvisoryDocument>>,
}

impl AdvisoryIndex for MockAdvisoryIndex {
    fn select_by_name(&self, package_name: &str) -> Result<Vec<AdvisoryDocument>> {
        Ok(self.documents.get(package_name).cloned().unwrap_or_default())
    }
}

#[derive(Default)]
struct MockIndexLoader {
    documents: HashMap<String, Vec<AdvisoryDocument>>,
    opened: Arc<Mutex<Vec<PathBuf>>>,
}

impl AdvisoryIndexLoader for MockIndexLoader {
    type Index = MockAdvisoryIndex;

    fn open_index(&self, dir: &Path) -> Result<Self::Index> {
        self.opened.lock().unwrap().push(dir.to_path_buf());
        Ok(MockAdvisoryIndex {
            documents: self.documents.clone(),
        })
    }
}

struct MockProgressReporter;

impl ProgressReporter for MockProgressReporter {
    fn report(&self, _message: &str) {}
    fn report_progress(&self, _current: usize, _total: usize, _message: Option<&str>) {}
    fn report_error(&self, _message: &str) {}
    fn report_completion(&self, _message: &str) {}
}

struct ConflictingMerger;

impl VexMerger for ConflictingMerger {
    fn merge_documents(&self, _documents: Vec<VexDocument>, _author: &str) -> Result<VexDocument> {
        Err(VexiError::MergeConflict {
            details: "two documents share the id vex-1".to_string(),
        }
        .into())
    }
}

/// Keeps only the first component, whatever its ecosystem
struct FirstComponentSelector;

impl ComponentSelector for FirstComponentSelector {
    fn select_components<'g>(
        &self,
        graph: &'g SbomGraph,
        _target: &TargetEcosystem,
    ) -> ComponentSet<'g> {
        ComponentSet::new(graph.nodes().iter().take(1).collect())
    }
}

fn wolfi_node(name: &str) -> ComponentNode {
    ComponentNode::new(
        format!("SPDXRef-Package-{}", name),
        name.to_string(),
        Some("1.0.0-r0".to_string()),
        Some(format!("pkg:apk/wolfi/{}@1.0.0-r0?arch=x86_64", name)),
    )
}

fn advisory_document(package: &str, cve: &str, events: &[(u32, &str)]) -> AdvisoryDocument {
    let events = events
        .iter()
        .map(|(day, kind)| {
            Event::new(
                Utc.with_ymd_and_hms(2023, 5, *day, 0, 0, 0).unwrap(),
                EventKind::from_type(kind),
            )
        })
        .collect();
    AdvisoryDocument::new(
        package.to_string(),
        vec![Advisory::new(cve.to_string(), vec![], events)],
    )
}

fn loader_with(documents: Vec<AdvisoryDocument>) -> MockIndexLoader {
    let mut by_name: HashMap<String, Vec<AdvisoryDocument>> = HashMap::new();
    for document in documents {
        by_name
            .entry(document.package_name().to_string())
            .or_default()
            .push(document);
    }
    MockIndexLoader {
        documents: by_name,
        opened: Arc::new(Mutex::new(Vec::new())),
    }
}

fn local_request(reference: &str) -> VexRequest {
    VexRequest::builder(reference)
        .advisories_dir(Some(PathBuf::from("/srv/advisories")))
        .build()
        .unwrap()
}

#[tokio::test]
async fn test_execute_generates_statements_for_wolfi_packages() {
    let use_case = GenerateImageVexUseCase::new(
        MockAttestationFetcher::with_documents(1),
        MockAdvisorySource::default(),
        MockSbomParser {
            nodes: vec![wolfi_node("openssl"), wolfi_node("php")],
        },
        loader_with(vec![
            advisory_document("openssl", "CVE-2023-0464", &[(2, "detection"), (9, "fixed")]),
            advisory_document("php", "CVE-2023-3247", &[(4, "true-positive-determination")]),
        ]),
        MockProgressReporter,
    );

    let response = use_case
        .execute(local_request("cgr.dev/chainguard/php:latest"))
        .await
        .unwrap();

    assert_eq!(
        response.image_id.as_str(),
        "pkg:oci/php?repository_url=cgr.dev%2Fchainguard&tag=latest"
    );
    assert_eq!(response.attestation_count, 1);
    assert_eq!(response.component_count, 2);
    assert_eq!(response.advisory_document_count, 2);

    let statuses: Vec<(&str, VexStatus)> = response
        .document
        .statements()
        .iter()
        .map(|s| (s.vulnerability(), s.status()))
        .collect();
    assert_eq!(
        statuses,
        vec![
            ("CVE-2023-0464", VexStatus::UnderInvestigation),
            ("CVE-2023-0464", VexStatus::Fixed),
            ("CVE-2023-3247", VexStatus::Affected),
        ]
    );
    for statement in response.document.statements() {
        assert_eq!(statement.product(), &response.image_id);
    }
}

#[tokio::test]
async fn test_execute_without_attestations_yields_empty_document() {
    let loader = MockIndexLoader::default();
    let opened = Arc::clone(&loader.opened);
    let use_case = GenerateImageVexUseCase::new(
        MockAttestationFetcher::with_documents(0),
        MockAdvisorySource::default(),
        FailingSbomParser,
        loader,
        MockProgressReporter,
    );

    let response = use_case.execute(local_request("alpine")).await.unwrap();

    assert_eq!(response.attestation_count, 0);
    assert!(response.document.statements().is_empty());
    assert!(opened.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_execute_without_matching_components_skips_advisories() {
    let loader = MockIndexLoader::default();
    let opened = Arc::clone(&loader.opened);
    let source = MockAdvisorySource::default();
    let provisioned = Arc::clone(&source.provisioned);
    let foreign = ComponentNode::new(
        "SPDXRef-Package-busybox".to_string(),
        "busybox".to_string(),
        None,
        Some("pkg:apk/alpine/busybox@1.36.1-r0".to_string()),
    );
    let use_case = GenerateImageVexUseCase::new(
        MockAttestationFetcher::with_documents(1),
        source,
        MockSbomParser {
            nodes: vec![foreign],
        },
        loader,
        MockProgressReporter,
    );

    let request = VexRequest::builder("alpine:3.19").build().unwrap();
    let response = use_case.execute(request).await.unwrap();

    assert_eq!(response.component_count, 0);
    assert!(response.document.statements().is_empty());
    assert!(opened.lock().unwrap().is_empty());
    assert!(provisioned.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_execute_clones_advisories_into_temporary_directory() {
    let source = MockAdvisorySource::default();
    let provisioned = Arc::clone(&source.provisioned);
    let loader = loader_with(vec![advisory_document(
        "curl",
        "CVE-2023-38545",
        &[(11, "fixed")],
    )]);
    let opened = Arc::clone(&loader.opened);
    let use_case = GenerateImageVexUseCase::new(
        MockAttestationFetcher::with_documents(1),
        source,
        MockSbomParser {
            nodes: vec![wolfi_node("curl")],
        },
        loader,
        MockProgressReporter,
    );

    let request = VexRequest::builder("cgr.dev/chainguard/curl")
        .repository("chainguard-dev/advisories".parse().unwrap())
        .build()
        .unwrap();
    let response = use_case.execute(request).await.unwrap();

    assert_eq!(response.document.statements().len(), 1);
    let provisioned = provisioned.lock().unwrap();
    assert_eq!(provisioned.len(), 1);
    assert_eq!(provisioned[0].0, "chainguard-dev");
    assert_eq!(provisioned[0].1, "advisories");
    assert_eq!(opened.lock().unwrap()[0], provisioned[0].2);
    // The temporary clone is gone once the run is over
    assert!(!provisioned[0].2.exists());
}

#[tokio::test]
async fn test_execute_uses_local_directory_without_cloning() {
    let source = MockAdvisorySource::default();
    let provisioned = Arc::clone(&source.provisioned);
    let loader = loader_with(vec![]);
    let opened = Arc::clone(&loader.opened);
    let use_case = GenerateImageVexUseCase::new(
        MockAttestationFetcher::with_documents(1),
        source,
        MockSbomParser {
            nodes: vec![wolfi_node("zlib")],
        },
        loader,
        MockProgressReporter,
    );

    let response = use_case.execute(local_request("alpine")).await.unwrap();

    assert_eq!(response.advisory_document_count, 0);
    assert!(provisioned.lock().unwrap().is_empty());
    assert_eq!(
        *opened.lock().unwrap(),
        vec![PathBuf::from("/srv/advisories")]
    );
}

#[tokio::test]
async fn test_execute_deduplicates_repeated_packages() {
    let use_case = GenerateImageVexUseCase::new(
        MockAttestationFetcher::with_documents(1),
        MockAdvisorySource::default(),
        MockSbomParser {
            nodes: vec![wolfi_node("openssl"), wolfi_node("openssl")],
        },
        loader_with(vec![advisory_document(
            "openssl",
            "CVE-2023-2650",
            &[(1, "detection")],
        )]),
        MockProgressReporter,
    );

    let response = use_case.execute(local_request("alpine")).await.unwrap();

    assert_eq!(response.advisory_document_count, 2);
    assert_eq!(response.document.statements().len(), 1);
}

#[tokio::test]
async fn test_execute_passes_predicate_formats_to_fetcher() {
    let fetcher = MockAttestationFetcher::with_documents(0);
    let formats = Arc::clone(&fetcher.requested_formats);
    let use_case = GenerateImageVexUseCase::new(
        fetcher,
        MockAdvisorySource::default(),
        FailingSbomParser,
        MockIndexLoader::default(),
        MockProgressReporter,
    );

    let request = VexRequest::builder("alpine")
        .predicate_formats(vec![PredicateFormat::CycloneDx])
        .build()
        .unwrap();
    use_case.execute(request).await.unwrap();

    assert_eq!(*formats.lock().unwrap(), vec![PredicateFormat::CycloneDx]);
}

#[tokio::test]
async fn test_execute_records_author() {
    let use_case = GenerateImageVexUseCase::new(
        MockAttestationFetcher::with_documents(0),
        MockAdvisorySource::default(),
        FailingSbomParser,
        MockIndexLoader::default(),
        MockProgressReporter,
    );

    let request = VexRequest::builder("alpine")
        .author("Wolfi Security")
        .build()
        .unwrap();
    let response = use_case.execute(request).await.unwrap();

    assert_eq!(response.document.metadata().author(), "Wolfi Security");
}

#[tokio::test]
async fn test_execute_invalid_reference() {
    let use_case = GenerateImageVexUseCase::new(
        FailingAttestationFetcher,
        MockAdvisorySource::default(),
        FailingSbomParser,
        MockIndexLoader::default(),
        MockProgressReporter,
    );

    let err = use_case
        .execute(local_request("cgr.dev/Chainguard/curl"))
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "parsing image reference");
    assert!(matches!(
        err.root_cause().downcast_ref::<VexiError>(),
        Some(VexiError::InvalidReference { .. })
    ));
}

#[tokio::test]
async fn test_execute_fetch_failure_names_stage() {
    let use_case = GenerateImageVexUseCase::new(
        FailingAttestationFetcher,
        MockAdvisorySource::default(),
        FailingSbomParser,
        MockIndexLoader::default(),
        MockProgressReporter,
    );

    let err = use_case.execute(local_request("alpine")).await.unwrap_err();

    assert_eq!(err.to_string(), "downloading image SBOM");
    assert!(format!("{:#}", err).contains("connection refused"));
}

#[tokio::test]
async fn test_execute_parse_failure_names_stage() {
    let use_case = GenerateImageVexUseCase::new(
        MockAttestationFetcher::with_documents(2),
        MockAdvisorySource::default(),
        FailingSbomParser,
        MockIndexLoader::default(),
        MockProgressReporter,
    );

    let err = use_case.execute(local_request("alpine")).await.unwrap_err();

    assert_eq!(err.to_string(), "parsing image SBOM");
    assert!(err
        .chain()
        .any(|cause| matches!(cause.downcast_ref::<VexiError>(), Some(VexiError::ParseFailure { .. }))));
}

#[tokio::test]
async fn test_execute_merge_failure_names_stage() {
    let use_case = GenerateImageVexUseCase::new(
        MockAttestationFetcher::with_documents(1),
        MockAdvisorySource::default(),
        MockSbomParser {
            nodes: vec![wolfi_node("openssl")],
        },
        loader_with(vec![advisory_document(
            "openssl",
            "CVE-2023-0464",
            &[(2, "detection")],
        )]),
        MockProgressReporter,
    )
    .with_vex_merger(ConflictingMerger);

    let err = use_case.execute(local_request("alpine")).await.unwrap_err();

    assert_eq!(err.to_string(), "merging VEX documents");
    assert!(err
        .chain()
        .any(|cause| matches!(cause.downcast_ref::<VexiError>(), Some(VexiError::MergeConflict { .. }))));
}

#[tokio::test]
async fn test_execute_uses_injected_component_selector() {
    let busybox = ComponentNode::new(
        "SPDXRef-Package-busybox".to_string(),
        "busybox".to_string(),
        None,
        Some("pkg:apk/alpine/busybox@1.36.1-r0".to_string()),
    );
    let use_case = GenerateImageVexUseCase::new(
        MockAttestationFetcher::with_documents(1),
        MockAdvisorySource::default(),
        MockSbomParser {
            nodes: vec![busybox, wolfi_node("openssl")],
        },
        loader_with(vec![advisory_document(
            "busybox",
            "CVE-2022-48174",
            &[(3, "fixed")],
        )]),
        MockProgressReporter,
    )
    .with_component_selector(FirstComponentSelector);

    let response = use_case.execute(local_request("alpine")).await.unwrap();

    assert_eq!(response.component_count, 1);
    let statements = response.document.statements();
    assert_eq!(statements.len(), 1);
    assert_eq!(statements[0].subcomponent().as_str(), "pkg:apk/wolfi/busybox");
}
