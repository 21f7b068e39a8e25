use super::PackageIdentifier;
use chrono::{DateTime, Utc};

/// OpenVEX context the documents are written against
pub const OPENVEX_CONTEXT: &str = "https://openvex.dev/ns/v0.2.0";

/// Author recorded when none is configured
pub const DEFAULT_AUTHOR: &str = "Unknown Author";

/// Role recorded for the document author
pub const DEFAULT_ROLE: &str = "Document Creator";

/// VexStatus: exploitability of a product with respect to a vulnerability
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VexStatus {
    NotAffected,
    Affected,
    Fixed,
    UnderInvestigation,
}

impl VexStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            VexStatus::NotAffected => "not_affected",
            VexStatus::Affected => "affected",
            VexStatus::Fixed => "fixed",
            VexStatus::UnderInvestigation => "under_investigation",
        }
    }
}

impl std::fmt::Display for VexStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// VexStatement: one status assertion for the image and one of its packages
///
/// Equality covers every field, which is what document merging
/// deduplicates on.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VexStatement {
    vulnerability: String,
    timestamp: DateTime<Utc>,
    product: PackageIdentifier,
    subcomponent: PackageIdentifier,
    status: VexStatus,
}

impl VexStatement {
    pub fn new(
        vulnerability: String,
        timestamp: DateTime<Utc>,
        product: PackageIdentifier,
        subcomponent: PackageIdentifier,
        status: VexStatus,
    ) -> Self {
        Self {
            vulnerability,
            timestamp,
            product,
            subcomponent,
            status,
        }
    }

    pub fn vulnerability(&self) -> &str {
        &self.vulnerability
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn product(&self) -> &PackageIdentifier {
        &self.product
    }

    pub fn subcomponent(&self) -> &PackageIdentifier {
        &self.subcomponent
    }

    pub fn status(&self) -> VexStatus {
        self.status
    }
}

/// DocumentMetadata value object: the top-level fields of a VEX document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentMetadata {
    id: String,
    context: String,
    author: String,
    role: String,
    timestamp: DateTime<Utc>,
    version: u32,
    tooling: String,
}

impl DocumentMetadata {
    pub fn new(
        id: String,
        context: String,
        author: String,
        role: String,
        timestamp: DateTime<Utc>,
        version: u32,
        tooling: String,
    ) -> Self {
        Self {
            id,
            context,
            author,
            role,
            timestamp,
            version,
            tooling,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn context(&self) -> &str {
        &self.context
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    pub fn role(&self) -> &str {
        &self.role
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn version(&self) -> u32 {
        self.version
    }

    pub fn tooling(&self) -> &str {
        &self.tooling
    }
}

/// VexDocument: metadata plus statements in insertion order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VexDocument {
    metadata: DocumentMetadata,
    statements: Vec<VexStatement>,
}

impl VexDocument {
    pub fn new(metadata: DocumentMetadata, statements: Vec<VexStatement>) -> Self {
        Self {
            metadata,
            statements,
        }
    }

    pub fn metadata(&self) -> &DocumentMetadata {
        &self.metadata
    }

    pub fn statements(&self) -> &[VexStatement] {
        &self.statements
    }

    pub fn into_statements(self) -> Vec<VexStatement> {
        self.statements
    }
}
