use crate::ports::outbound::ComponentSelector;
use crate::vex_generation::domain::{ComponentSet, SbomGraph, TargetEcosystem};
use packageurl::PackageUrl;
use std::str::FromStr;
use tracing::debug;

/// ComponentFilter service: selects the SBOM nodes covered by the advisory database
///
/// A node survives when its package URL parses and carries the target
/// ecosystem's type and namespace (`pkg:apk/wolfi/...` by default). Nodes
/// without a package URL, or with one that does not parse, are dropped.
#[derive(Debug, Clone, Copy, Default)]
pub struct ComponentFilter;

impl ComponentFilter {
    pub fn new() -> Self {
        Self
    }

    /// Returns the matching nodes in the order the graph holds them
    pub fn filter<'g>(&self, graph: &'g SbomGraph, target: &TargetEcosystem) -> ComponentSet<'g> {
        let nodes = graph
            .nodes()
            .iter()
            .filter(|node| match node.purl() {
                Some(purl) => Self::accepts(target, purl),
                None => false,
            })
            .collect();
        ComponentSet::new(nodes)
    }

    fn accepts(target: &TargetEcosystem, purl: &str) -> bool {
        match PackageUrl::from_str(purl) {
            Ok(parsed) => target.matches(parsed.ty(), parsed.namespace()),
            Err(e) => {
                debug!(purl, error = %e, "Ignoring component with unparsable package URL");
                false
            }
        }
    }
}

impl ComponentSelector for ComponentFilter {
    fn select_components<'g>(
        &self,
        graph: &'g SbomGraph,
        target: &TargetEcosystem,
    ) -> ComponentSet<'g> {
        self.filter(graph, target)
    }
}
