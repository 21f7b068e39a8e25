use crate::shared::error::VexiError;
use crate::shared::Result;

/// Registry assumed when a reference does not name one
pub const DEFAULT_REGISTRY: &str = "index.docker.io";

/// Tag registries resolve when a reference carries neither tag nor digest
pub const DEFAULT_TAG: &str = "latest";

/// Alias users write for the default registry
const LEGACY_DEFAULT_REGISTRY: &str = "docker.io";

/// Namespace holding single-segment repositories on the default registry
pub const OFFICIAL_IMAGES_NAMESPACE: &str = "library";

const MAX_TAG_LENGTH: usize = 128;

/// ImageReference value object: a parsed `[registry/]repository[:tag][@digest]`
///
/// Parsing normalizes the registry and repository the way container
/// registries do (`docker.io` becomes `index.docker.io`, bare names get the
/// `library/` namespace) but keeps the original text around, because the
/// package identifier only carries what the user literally wrote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageReference {
    original: String,
    registry: String,
    repository: String,
    tag: Option<String>,
    digest: Option<String>,
}

impl ImageReference {
    /// Parses an image reference
    ///
    /// # Errors
    /// Returns `VexiError::InvalidReference` when the text is empty, contains
    /// whitespace, or any of the registry, repository, tag or digest parts
    /// are malformed.
    pub fn parse(reference: &str) -> Result<Self> {
        let invalid = |reason: String| -> anyhow::Error {
            VexiError::InvalidReference {
                reference: reference.to_string(),
                reason,
            }
            .into()
        };

        if reference.is_empty() {
            return Err(invalid("reference is empty".to_string()));
        }
        if reference.chars().any(char::is_whitespace) {
            return Err(invalid("reference contains whitespace".to_string()));
        }

        let (remainder, digest) = match reference.split_once('@') {
            Some((name, digest)) => {
                validate_digest(digest).map_err(&invalid)?;
                (name, Some(digest.to_string()))
            }
            None => (reference, None),
        };

        let (name, tag) = split_tag(remainder);
        if let Some(tag) = tag {
            validate_tag(tag).map_err(&invalid)?;
        }

        let (registry, repository) = split_registry(name);
        validate_registry(&registry).map_err(&invalid)?;
        validate_repository(&repository).map_err(&invalid)?;

        Ok(Self {
            original: reference.to_string(),
            registry,
            repository,
            tag: tag.map(String::from),
            digest,
        })
    }

    /// The reference exactly as it was supplied
    pub fn original(&self) -> &str {
        &self.original
    }

    pub fn registry(&self) -> &str {
        &self.registry
    }

    /// Repository path inside the registry, without tag or digest
    pub fn repository(&self) -> &str {
        &self.repository
    }

    /// Fully qualified repository: `registry/repository`
    pub fn context_name(&self) -> String {
        format!("{}/{}", self.registry, self.repository)
    }

    /// Last repository path segment
    pub fn name(&self) -> &str {
        self.repository
            .rsplit('/')
            .next()
            .unwrap_or(self.repository.as_str())
    }

    /// Tag written in the reference, if any
    pub fn tag(&self) -> Option<&str> {
        self.tag.as_deref()
    }

    pub fn digest(&self) -> Option<&str> {
        self.digest.as_deref()
    }

    pub fn is_default_registry(&self) -> bool {
        self.registry == DEFAULT_REGISTRY
    }

    /// Tag or digest to request from the registry's manifest endpoint
    ///
    /// The digest wins when both are present; references with neither fall
    /// back to [`DEFAULT_TAG`].
    pub fn manifest_reference(&self) -> &str {
        self.digest
            .as_deref()
            .or(self.tag.as_deref())
            .unwrap_or(DEFAULT_TAG)
    }
}

impl std::fmt::Display for ImageReference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.original)
    }
}

/// Splits a trailing `:tag`, ignoring colons that belong to a registry port
fn split_tag(name: &str) -> (&str, Option<&str>) {
    match name.rfind(':') {
        Some(idx) if !name[idx..].contains('/') => (&name[..idx], Some(&name[idx + 1..])),
        _ => (name, None),
    }
}

/// Separates the registry host from the repository path
///
/// The first segment is a registry only if it looks like a host: it has a
/// dot or a port, or it is `localhost`.
fn split_registry(name: &str) -> (String, String) {
    let (registry, repository) = match name.split_once('/') {
        Some((first, rest))
            if first.contains('.') || first.contains(':') || first == "localhost" =>
        {
            let registry = if first == LEGACY_DEFAULT_REGISTRY {
                DEFAULT_REGISTRY
            } else {
                first
            };
            (registry.to_string(), rest.to_string())
        }
        _ => (DEFAULT_REGISTRY.to_string(), name.to_string()),
    };

    if registry == DEFAULT_REGISTRY && !repository.is_empty() && !repository.contains('/') {
        return (
            registry,
            format!("{}/{}", OFFICIAL_IMAGES_NAMESPACE, repository),
        );
    }
    (registry, repository)
}

fn validate_registry(registry: &str) -> std::result::Result<(), String> {
    if registry.is_empty() {
        return Err("registry is empty".to_string());
    }
    if !registry
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | ':' | '[' | ']'))
    {
        return Err(format!("registry '{}' contains invalid characters", registry));
    }
    Ok(())
}

fn validate_repository(repository: &str) -> std::result::Result<(), String> {
    if repository.is_empty() {
        return Err("repository is empty".to_string());
    }
    if repository.chars().any(|c| c.is_ascii_uppercase()) {
        return Err(format!("repository '{}' must be lowercase", repository));
    }
    for segment in repository.split('/') {
        if segment.is_empty() {
            return Err(format!("repository '{}' has an empty path segment", repository));
        }
        if !segment
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || matches!(c, '.' | '_' | '-'))
        {
            return Err(format!(
                "repository '{}' contains invalid characters",
                repository
            ));
        }
    }
    Ok(())
}

fn validate_tag(tag: &str) -> std::result::Result<(), String> {
    let mut chars = tag.chars();
    let Some(first) = chars.next() else {
        return Err("tag is empty".to_string());
    };
    if tag.len() > MAX_TAG_LENGTH {
        return Err(format!(
            "tag is too long ({} characters, maximum {})",
            tag.len(),
            MAX_TAG_LENGTH
        ));
    }
    if !(first.is_ascii_alphanumeric() || first == '_')
        || !chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
    {
        return Err(format!("tag '{}' contains invalid characters", tag));
    }
    Ok(())
}

fn validate_digest(digest: &str) -> std::result::Result<(), String> {
    let Some((algorithm, hex)) = digest.split_once(':') else {
        return Err(format!("digest '{}' is not of the form algorithm:hex", digest));
    };
    if algorithm.is_empty()
        || !algorithm
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || matches!(c, '+' | '.' | '_' | '-'))
    {
        return Err(format!("digest algorithm '{}' is invalid", algorithm));
    }
    if hex.is_empty() || !hex.chars().all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)) {
        return Err(format!("digest '{}' must be lowercase hex", digest));
    }
    if algorithm == "sha256" && hex.len() != 64 {
        return Err(format!(
            "sha256 digest must have 64 hex characters, got {}",
            hex.len()
        ));
    }
    Ok(())
}
