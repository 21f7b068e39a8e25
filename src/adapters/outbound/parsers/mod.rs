/// SBOM parsing adapters
mod json_sbom_parser;

pub use json_sbom_parser::JsonSbomParser;
