use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use vexi::prelude::*;
use vexi::vex_generation::domain::RawDocument;

/// Mock AttestationFetcher serving canned attestations
#[derive(Clone, Default)]
pub struct MockAttestationFetcher {
    pub documents: Vec<RawDocument>,
    /// Image references the fetcher was asked about
    pub requests: Arc<Mutex<Vec<String>>>,
}

impl MockAttestationFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_document(mut self, predicate_type: &str, content: &str) -> Self {
        self.documents.push(RawDocument::new(
            predicate_type.to_string(),
            content.as_bytes().to_vec(),
        ));
        self
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl AttestationFetcher for MockAttestationFetcher {
    async fn fetch_attestations(
        &self,
        image: &ImageReference,
        formats: &[PredicateFormat],
    ) -> Result<Vec<RawDocument>> {
        self.requests.lock().unwrap().push(image.to_string());
        Ok(self
            .documents
            .iter()
            .filter(|document| {
                formats
                    .iter()
                    .any(|format| format.matches(document.predicate_type()))
            })
            .cloned()
            .collect())
    }
}
