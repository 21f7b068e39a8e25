/// SBOM formats the parser understands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SbomFormat {
    Spdx,
    CycloneDx,
}

impl std::fmt::Display for SbomFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SbomFormat::Spdx => write!(f, "SPDX"),
            SbomFormat::CycloneDx => write!(f, "CycloneDX"),
        }
    }
}

/// ComponentNode: one package entry of a parsed SBOM
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentNode {
    id: String,
    name: String,
    version: Option<String>,
    purl: Option<String>,
}

impl ComponentNode {
    pub fn new(id: String, name: String, version: Option<String>, purl: Option<String>) -> Self {
        Self {
            id,
            name,
            version,
            purl,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    pub fn purl(&self) -> Option<&str> {
        self.purl.as_deref()
    }
}

/// SbomGraph: the component inventory of one SBOM, in document order
#[derive(Debug, Clone)]
pub struct SbomGraph {
    format: SbomFormat,
    nodes: Vec<ComponentNode>,
}

impl SbomGraph {
    pub fn new(format: SbomFormat, nodes: Vec<ComponentNode>) -> Self {
        Self { format, nodes }
    }

    pub fn format(&self) -> SbomFormat {
        self.format
    }

    pub fn nodes(&self) -> &[ComponentNode] {
        &self.nodes
    }
}

/// ComponentSet: the nodes of an [`SbomGraph`] that survived filtering
///
/// Borrows from the graph so filtering never copies node data.
#[derive(Debug, Clone, Default)]
pub struct ComponentSet<'g> {
    nodes: Vec<&'g ComponentNode>,
}

impl<'g> ComponentSet<'g> {
    pub fn new(nodes: Vec<&'g ComponentNode>) -> Self {
        Self { nodes }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &'g ComponentNode> + '_ {
        self.nodes.iter().copied()
    }

    /// Component names in set order, duplicates included
    pub fn names(&self) -> Vec<&'g str> {
        self.nodes.iter().map(|node| node.name()).collect()
    }
}
