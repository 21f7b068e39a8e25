use crate::ports::outbound::VexFormatter;
use crate::shared::Result;
use crate::vex_generation::domain::{PackageIdentifier, VexDocument, VexStatement};
use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Serialize)]
struct OpenVexDocument<'a> {
    #[serde(rename = "@context")]
    context: &'a str,
    #[serde(rename = "@id")]
    id: &'a str,
    author: &'a str,
    role: &'a str,
    timestamp: DateTime<Utc>,
    version: u32,
    tooling: &'a str,
    statements: Vec<Statement<'a>>,
}

#[derive(Debug, Serialize)]
struct Statement<'a> {
    vulnerability: Vulnerability<'a>,
    timestamp: DateTime<Utc>,
    products: Vec<Product<'a>>,
    status: &'static str,
}

#[derive(Debug, Serialize)]
struct Vulnerability<'a> {
    name: &'a str,
}

#[derive(Debug, Serialize)]
struct Product<'a> {
    #[serde(flatten)]
    component: Component<'a>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    subcomponents: Vec<Component<'a>>,
}

#[derive(Debug, Serialize)]
struct Component<'a> {
    #[serde(rename = "@id")]
    id: &'a str,
    identifiers: Identifiers<'a>,
}

#[derive(Debug, Serialize)]
struct Identifiers<'a> {
    purl: &'a str,
}

impl<'a> From<&'a PackageIdentifier> for Component<'a> {
    fn from(identifier: &'a PackageIdentifier) -> Self {
        Self {
            id: identifier.as_str(),
            identifiers: Identifiers {
                purl: identifier.as_str(),
            },
        }
    }
}

impl<'a> From<&'a VexStatement> for Statement<'a> {
    fn from(statement: &'a VexStatement) -> Self {
        Self {
            vulnerability: Vulnerability {
                name: statement.vulnerability(),
            },
            timestamp: statement.timestamp(),
            products: vec![Product {
                component: statement.product().into(),
                subcomponents: vec![statement.subcomponent().into()],
            }],
            status: statement.status().as_str(),
        }
    }
}

/// OpenVexFormatter adapter for OpenVEX v0.2.0 JSON output
///
/// Statements carry no justification, status notes or impact statement;
/// those keys are left out rather than written empty.
pub struct OpenVexFormatter;

impl OpenVexFormatter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for OpenVexFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl VexFormatter for OpenVexFormatter {
    fn format(&self, document: &VexDocument) -> Result<String> {
        let metadata = document.metadata();
        let openvex = OpenVexDocument {
            context: metadata.context(),
            id: metadata.id(),
            author: metadata.author(),
            role: metadata.role(),
            timestamp: metadata.timestamp(),
            version: metadata.version(),
            tooling: metadata.tooling(),
            statements: document.statements().iter().map(Statement::from).collect(),
        };

        let mut json = serde_json::to_string_pretty(&openvex)?;
        json.push('\n');
        Ok(json)
    }
}
