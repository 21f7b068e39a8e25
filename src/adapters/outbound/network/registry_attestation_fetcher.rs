use crate::ports::outbound::AttestationFetcher;
use crate::shared::error::VexiError;
use crate::shared::Result;
use crate::vex_generation::domain::image_reference::DEFAULT_REGISTRY;
use crate::vex_generation::domain::{ImageReference, PredicateFormat, RawDocument};
use async_trait::async_trait;
use base64::Engine;
use reqwest::header::{HeaderMap, ACCEPT, AUTHORIZATION, WWW_AUTHENTICATE};
use reqwest::{Method, Response, StatusCode};
use serde::Deserialize;
use std::sync::Mutex;
use std::time::Duration;
use tracing::debug;

/// Host actually serving the default registry's API
const DEFAULT_REGISTRY_API_HOST: &str = "registry-1.docker.io";

const DIGEST_HEADER: &str = "Docker-Content-Digest";
const DSSE_MEDIA_TYPE: &str = "application/vnd.dsse.envelope.v1+json";
const PREDICATE_TYPE_ANNOTATION: &str = "predicateType";

const MANIFEST_MEDIA_TYPES: &str = "application/vnd.oci.image.index.v1+json, \
     application/vnd.docker.distribution.manifest.list.v2+json, \
     application/vnd.oci.image.manifest.v1+json, \
     application/vnd.docker.distribution.manifest.v2+json";

#[derive(Debug, Deserialize)]
struct ImageManifest {
    #[serde(default)]
    layers: Vec<Descriptor>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Descriptor {
    media_type: String,
    digest: String,
    #[serde(default)]
    annotations: std::collections::HashMap<String, String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DsseEnvelope {
    payload: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InTotoStatement {
    predicate_type: String,
    #[serde(default)]
    predicate: serde_json::Value,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    token: Option<String>,
    access_token: Option<String>,
}

/// Parameters of a `WWW-Authenticate: Bearer ...` challenge
#[derive(Debug, Clone, PartialEq, Eq)]
struct BearerChallenge {
    realm: String,
    service: Option<String>,
    scope: Option<String>,
}

impl BearerChallenge {
    /// Parses `Bearer realm="...",service="...",scope="..."`
    fn parse(header: &str) -> Option<Self> {
        let (scheme, params) = header.trim().split_once(' ')?;
        if !scheme.eq_ignore_ascii_case("bearer") {
            return None;
        }

        let mut realm = None;
        let mut service = None;
        let mut scope = None;
        for (key, value) in split_auth_params(params) {
            match key.to_ascii_lowercase().as_str() {
                "realm" => realm = Some(value),
                "service" => service = Some(value),
                "scope" => scope = Some(value),
                _ => {}
            }
        }

        Some(Self {
            realm: realm?,
            service,
            scope,
        })
    }

    fn token_url(&self, default_scope: &str) -> String {
        let mut url = self.realm.clone();
        let mut separator = if url.contains('?') { '&' } else { '?' };
        if let Some(service) = &self.service {
            url.push_str(&format!("{}service={}", separator, urlencoding::encode(service)));
            separator = '&';
        }
        let scope = self.scope.as_deref().unwrap_or(default_scope);
        url.push_str(&format!("{}scope={}", separator, urlencoding::encode(scope)));
        url
    }
}

/// Splits `key="value", key2=value2` honoring commas inside quotes
fn split_auth_params(params: &str) -> Vec<(String, String)> {
    let mut pairs = Vec::new();
    let mut rest = params.trim();

    while !rest.is_empty() {
        let Some((key, after_key)) = rest.split_once('=') else {
            break;
        };
        let key = key.trim().trim_start_matches(',').trim().to_string();
        let after_key = after_key.trim_start();

        let (value, remainder) = if let Some(quoted) = after_key.strip_prefix('"') {
            match quoted.find('"') {
                Some(end) => (quoted[..end].to_string(), &quoted[end + 1..]),
                None => (quoted.to_string(), ""),
            }
        } else {
            match after_key.find(',') {
                Some(end) => (after_key[..end].trim().to_string(), &after_key[end..]),
                None => (after_key.trim().to_string(), ""),
            }
        };

        pairs.push((key, value));
        rest = remainder.trim_start().trim_start_matches(',').trim_start();
    }

    pairs
}

/// Base URL of a registry's distribution API
fn registry_base_url(registry: &str) -> String {
    if registry == DEFAULT_REGISTRY {
        return format!("https://{}", DEFAULT_REGISTRY_API_HOST);
    }
    let host = registry.split(':').next().unwrap_or(registry);
    if host == "localhost" || host == "127.0.0.1" {
        format!("http://{}", registry)
    } else {
        format!("https://{}", registry)
    }
}

/// Tag cosign stores an image's attestations under
fn attestation_tag(digest: &str) -> String {
    format!("{}.att", digest.replace(':', "-"))
}

/// RegistryAttestationFetcher adapter for OCI registries
///
/// Discovers cosign attestations (`sha256-<hex>.att`) through the
/// distribution API and unwraps the in-toto statements from their DSSE
/// envelopes. Anonymous bearer tokens are negotiated on demand.
///
/// # Async Support
/// Uses the async reqwest client; the negotiated token is kept behind a
/// mutex so the adapter stays `Send + Sync`.
pub struct RegistryAttestationFetcher {
    client: reqwest::Client,
    max_retries: u32,
    token: Mutex<Option<String>>,
}

impl RegistryAttestationFetcher {
    /// Creates a fetcher with default timeouts and retry policy
    pub fn new() -> Result<Self> {
        let user_agent = format!("vexi/{}", env!("CARGO_PKG_VERSION"));
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent(user_agent)
            .build()?;

        Ok(Self {
            client,
            max_retries: 3,
            token: Mutex::new(None),
        })
    }

    fn current_token(&self) -> Option<String> {
        self.token.lock().ok().and_then(|guard| guard.clone())
    }

    fn store_token(&self, token: String) {
        if let Ok(mut guard) = self.token.lock() {
            *guard = Some(token);
        }
    }

    /// Sends a request, retrying transport errors (async)
    async fn send_with_retry(&self, method: &Method, url: &str, accept: &str) -> Result<Response> {
        let mut last_error = None;

        for attempt in 1..=self.max_retries {
            let mut request = self.client.request(method.clone(), url).header(ACCEPT, accept);
            if let Some(token) = self.current_token() {
                request = request.header(AUTHORIZATION, format!("Bearer {}", token));
            }

            match request.send().await {
                Ok(response) => return Ok(response),
                Err(e) => {
                    last_error = Some(e);
                    if attempt < self.max_retries {
                        tokio::time::sleep(Duration::from_millis(200 * attempt as u64)).await;
                    }
                }
            }
        }

        match last_error {
            Some(e) => Err(e.into()),
            None => anyhow::bail!("no request was sent to {}", url),
        }
    }

    /// Sends a request, negotiating a token once if the registry asks for one
    async fn send(
        &self,
        method: Method,
        url: &str,
        accept: &str,
        repository: &str,
    ) -> Result<Response> {
        let response = self.send_with_retry(&method, url, accept).await?;
        if response.status() != StatusCode::UNAUTHORIZED {
            return Ok(response);
        }

        let challenge = Self::challenge(response.headers()).ok_or_else(|| {
            anyhow::anyhow!("registry requires authentication but sent no bearer challenge")
        })?;
        self.authenticate(&challenge, repository).await?;
        self.send_with_retry(&method, url, accept).await
    }

    fn challenge(headers: &HeaderMap) -> Option<BearerChallenge> {
        headers
            .get(WWW_AUTHENTICATE)
            .and_then(|value| value.to_str().ok())
            .and_then(BearerChallenge::parse)
    }

    async fn authenticate(&self, challenge: &BearerChallenge, repository: &str) -> Result<()> {
        let default_scope = format!("repository:{}:pull", repository);
        let url = challenge.token_url(&default_scope);
        debug!(realm = %challenge.realm, "Requesting anonymous registry token");

        let response = self.client.get(&url).send().await?;
        if !response.status().is_success() {
            anyhow::bail!("token endpoint returned status code {}", response.status());
        }
        let token: TokenResponse = response.json().await?;
        let token = token
            .token
            .or(token.access_token)
            .ok_or_else(|| anyhow::anyhow!("token endpoint returned no token"))?;
        self.store_token(token);
        Ok(())
    }

    /// Resolves the manifest digest the reference points at
    async fn resolve_digest(&self, base_url: &str, image: &ImageReference) -> Result<String> {
        if let Some(digest) = image.digest() {
            return Ok(digest.to_string());
        }

        let url = format!(
            "{}/v2/{}/manifests/{}",
            base_url,
            image.repository(),
            image.manifest_reference()
        );
        let response = self
            .send(Method::HEAD, &url, MANIFEST_MEDIA_TYPES, image.repository())
            .await?;
        if !response.status().is_success() {
            anyhow::bail!(
                "manifest request for {} returned status code {}",
                image.manifest_reference(),
                response.status()
            );
        }

        response
            .headers()
            .get(DIGEST_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(String::from)
            .ok_or_else(|| anyhow::anyhow!("registry did not report the manifest digest"))
    }

    async fn fetch_inner(
        &self,
        image: &ImageReference,
        formats: &[PredicateFormat],
    ) -> Result<Vec<RawDocument>> {
        let base_url = registry_base_url(image.registry());
        let repository = image.repository();

        let digest = self.resolve_digest(&base_url, image).await?;
        debug!(image = %image, digest = %digest, "Resolved image digest");

        let url = format!(
            "{}/v2/{}/manifests/{}",
            base_url,
            repository,
            attestation_tag(&digest)
        );
        let response = self
            .send(Method::GET, &url, MANIFEST_MEDIA_TYPES, repository)
            .await?;
        if response.status() == StatusCode::NOT_FOUND {
            debug!(image = %image, "Image has no attestations");
            return Ok(vec![]);
        }
        if !response.status().is_success() {
            anyhow::bail!(
                "attestation manifest request returned status code {}",
                response.status()
            );
        }
        let manifest: ImageManifest = response.json().await?;

        let mut documents = Vec::new();
        for layer in &manifest.layers {
            if layer.media_type != DSSE_MEDIA_TYPE {
                continue;
            }
            if let Some(predicate_type) = layer.annotations.get(PREDICATE_TYPE_ANNOTATION) {
                if !formats.iter().any(|format| format.matches(predicate_type)) {
                    continue;
                }
            }

            let statement = self.fetch_statement(&base_url, repository, &layer.digest).await?;
            if formats
                .iter()
                .any(|format| format.matches(&statement.predicate_type))
            {
                documents.push(RawDocument::new(
                    statement.predicate_type,
                    serde_json::to_vec(&statement.predicate)?,
                ));
            }
        }

        Ok(documents)
    }

    /// Downloads a DSSE layer and decodes the in-toto statement inside
    async fn fetch_statement(
        &self,
        base_url: &str,
        repository: &str,
        digest: &str,
    ) -> Result<InTotoStatement> {
        let url = format!("{}/v2/{}/blobs/{}", base_url, repository, digest);
        let response = self
            .send(Method::GET, &url, DSSE_MEDIA_TYPE, repository)
            .await?;
        if !response.status().is_success() {
            anyhow::bail!(
                "attestation layer {} returned status code {}",
                digest,
                response.status()
            );
        }

        let envelope: DsseEnvelope = response.json().await?;
        decode_statement(&envelope.payload)
    }
}

fn decode_statement(payload: &str) -> Result<InTotoStatement> {
    let bytes = base64::engine::general_purpose::STANDARD
        .decode(payload)
        .map_err(|e| anyhow::anyhow!("attestation payload is not base64: {}", e))?;
    let statement: InTotoStatement = serde_json::from_slice(&bytes)
        .map_err(|e| anyhow::anyhow!("attestation payload is not an in-toto statement: {}", e))?;
    Ok(statement)
}

#[async_trait]
impl AttestationFetcher for RegistryAttestationFetcher {
    async fn fetch_attestations(
        &self,
        image: &ImageReference,
        formats: &[PredicateFormat],
    ) -> Result<Vec<RawDocument>> {
        self.fetch_inner(image, formats).await.map_err(|e| {
            VexiError::FetchFailure {
                reference: image.to_string(),
                details: format!("{:#}", e),
            }
            .into()
        })
    }
}
