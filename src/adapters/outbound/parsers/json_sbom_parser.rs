use crate::ports::outbound::SbomParser;
use crate::shared::error::VexiError;
use crate::shared::Result;
use crate::vex_generation::domain::{ComponentNode, RawDocument, SbomFormat, SbomGraph};
use serde::Deserialize;
use serde_json::Value;

const PURL_REFERENCE_TYPE: &str = "purl";
const CYCLONEDX_BOM_FORMAT: &str = "CycloneDX";
const SPDX_MAJOR_VERSION_PREFIX: &str = "SPDX-2.";

// SPDX JSON structures for deserialization

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SpdxDocument {
    #[serde(default)]
    packages: Vec<SpdxPackage>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SpdxPackage {
    #[serde(rename = "SPDXID")]
    spdx_id: String,
    name: String,
    version_info: Option<String>,
    #[serde(default)]
    external_refs: Vec<SpdxExternalRef>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SpdxExternalRef {
    reference_type: String,
    reference_locator: String,
}

// CycloneDX JSON structures for deserialization

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CycloneDxBom {
    #[serde(default)]
    components: Vec<CdxComponent>,
}

#[derive(Debug, Deserialize)]
struct CdxComponent {
    #[serde(rename = "bom-ref")]
    bom_ref: Option<String>,
    name: String,
    version: Option<String>,
    purl: Option<String>,
    #[serde(default)]
    components: Vec<CdxComponent>,
}

/// JsonSbomParser adapter for SPDX 2.x and CycloneDX JSON documents
///
/// Only what the pipeline needs is read: node id, name, version and
/// package URL. Nested CycloneDX components are flattened depth first.
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonSbomParser;

impl JsonSbomParser {
    pub fn new() -> Self {
        Self
    }

    fn detect_format(value: &Value) -> Result<SbomFormat> {
        if let Some(version) = value.get("spdxVersion").and_then(Value::as_str) {
            if !version.starts_with(SPDX_MAJOR_VERSION_PREFIX) {
                return Err(VexiError::ParseFailure {
                    details: format!("unsupported SPDX version {}", version),
                }
                .into());
            }
            return Ok(SbomFormat::Spdx);
        }
        if value.get("bomFormat").and_then(Value::as_str) == Some(CYCLONEDX_BOM_FORMAT) {
            return Ok(SbomFormat::CycloneDx);
        }
        Err(VexiError::ParseFailure {
            details: "document is neither SPDX nor CycloneDX JSON".to_string(),
        }
        .into())
    }

    fn spdx_nodes(value: Value) -> Result<Vec<ComponentNode>> {
        let document: SpdxDocument = serde_json::from_value(value).map_err(|e| {
            VexiError::ParseFailure {
                details: format!("invalid SPDX document: {}", e),
            }
        })?;

        Ok(document
            .packages
            .into_iter()
            .map(|package| {
                let purl = package
                    .external_refs
                    .into_iter()
                    .find(|reference| reference.reference_type == PURL_REFERENCE_TYPE)
                    .map(|reference| reference.reference_locator);
                ComponentNode::new(package.spdx_id, package.name, package.version_info, purl)
            })
            .collect())
    }

    fn cyclonedx_nodes(value: Value) -> Result<Vec<ComponentNode>> {
        let bom: CycloneDxBom = serde_json::from_value(value).map_err(|e| {
            VexiError::ParseFailure {
                details: format!("invalid CycloneDX document: {}", e),
            }
        })?;

        let mut nodes = Vec::new();
        Self::flatten(bom.components, &mut nodes);
        Ok(nodes)
    }

    fn flatten(components: Vec<CdxComponent>, nodes: &mut Vec<ComponentNode>) {
        for component in components {
            let id = component
                .bom_ref
                .clone()
                .unwrap_or_else(|| component.name.clone());
            nodes.push(ComponentNode::new(
                id,
                component.name,
                component.version,
                component.purl,
            ));
            Self::flatten(component.components, nodes);
        }
    }
}

impl SbomParser for JsonSbomParser {
    fn parse(&self, document: &RawDocument) -> Result<SbomGraph> {
        let value: Value = serde_json::from_slice(document.content()).map_err(|e| {
            VexiError::ParseFailure {
                details: format!("document is not valid JSON: {}", e),
            }
        })?;

        let format = Self::detect_format(&value)?;
        let nodes = match format {
            SbomFormat::Spdx => Self::spdx_nodes(value)?,
            SbomFormat::CycloneDx => Self::cyclonedx_nodes(value)?,
        };
        Ok(SbomGraph::new(format, nodes))
    }
}
