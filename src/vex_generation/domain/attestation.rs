const SPDX_PREDICATE_PREFIX: &str = "https://spdx.dev/Document";
const CYCLONEDX_PREDICATE_PREFIX: &str = "https://cyclonedx.org/bom";

/// PredicateFormat: an entry of the attestation predicate allowlist
///
/// The short labels `spdx` and `cyclonedx` expand to the predicate type
/// URIs those formats are attested with; anything else is taken verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PredicateFormat {
    Spdx,
    CycloneDx,
    Custom(String),
}

impl PredicateFormat {
    /// Predicate type prefix an attestation must start with to match
    pub fn predicate_type_prefix(&self) -> &str {
        match self {
            PredicateFormat::Spdx => SPDX_PREDICATE_PREFIX,
            PredicateFormat::CycloneDx => CYCLONEDX_PREDICATE_PREFIX,
            PredicateFormat::Custom(predicate_type) => predicate_type,
        }
    }

    pub fn matches(&self, predicate_type: &str) -> bool {
        predicate_type.starts_with(self.predicate_type_prefix())
    }

    /// The default allowlist: SPDX and CycloneDX
    pub fn defaults() -> Vec<PredicateFormat> {
        vec![PredicateFormat::Spdx, PredicateFormat::CycloneDx]
    }
}

impl std::str::FromStr for PredicateFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        match trimmed.to_lowercase().as_str() {
            "" => Err("Invalid predicate format: value is empty".to_string()),
            "spdx" => Ok(PredicateFormat::Spdx),
            "cyclonedx" => Ok(PredicateFormat::CycloneDx),
            _ => Ok(PredicateFormat::Custom(trimmed.to_string())),
        }
    }
}

impl std::fmt::Display for PredicateFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PredicateFormat::Spdx => write!(f, "spdx"),
            PredicateFormat::CycloneDx => write!(f, "cyclonedx"),
            PredicateFormat::Custom(predicate_type) => write!(f, "{}", predicate_type),
        }
    }
}

/// RawDocument: one attested SBOM, still undecoded
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawDocument {
    predicate_type: String,
    content: Vec<u8>,
}

impl RawDocument {
    pub fn new(predicate_type: String, content: Vec<u8>) -> Self {
        Self {
            predicate_type,
            content,
        }
    }

    pub fn predicate_type(&self) -> &str {
        &self.predicate_type
    }

    pub fn content(&self) -> &[u8] {
        &self.content
    }
}
