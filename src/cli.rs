use clap::{Parser, Subcommand};
use std::path::PathBuf;
use vexi::application::dto::RepositorySlug;
use vexi::vex_generation::domain::PredicateFormat;

/// Distill OpenVEX documents for container images
#[derive(Parser, Debug)]
#[command(name = "vexi")]
#[command(version)]
#[command(
    about = "Distill OpenVEX documents for container images from their SBOMs and a security advisory database",
    long_about = None
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate a VEX document for a container image
    Generate(GenerateArgs),
}

#[derive(clap::Args, Debug, Clone, Default)]
pub struct GenerateArgs {
    /// Image reference, e.g. cgr.dev/chainguard/curl:latest
    #[arg(value_name = "IMAGE_REFERENCE")]
    pub image_reference: String,

    /// Attestation predicate formats to look for (spdx, cyclonedx or a predicate type URI)
    #[arg(short, long, value_delimiter = ',', value_name = "FORMATS")]
    pub predicates: Option<Vec<PredicateFormat>>,

    /// Advisory repository to clone when --advisories is not given (org/name)
    #[arg(short, long, value_name = "ORG/NAME")]
    pub repository: Option<RepositorySlug>,

    /// Directory holding an advisory repository checkout
    #[arg(short, long, value_name = "DIR")]
    pub advisories: Option<PathBuf>,

    /// Output file path (if not specified, outputs to stdout)
    #[arg(short, long, value_name = "PATH")]
    pub file: Option<PathBuf>,

    /// Read the image SBOM from a local file instead of the registry
    #[arg(long, value_name = "PATH")]
    pub sbom: Option<PathBuf>,

    /// Author recorded in the generated document
    #[arg(long)]
    pub author: Option<String>,

    /// Package URL type of the distribution packages (default: apk)
    #[arg(long)]
    pub ecosystem: Option<String>,

    /// Package URL namespace of the distribution packages (default: wolfi)
    #[arg(long)]
    pub namespace: Option<String>,

    /// Path to a config file (defaults to ./vexi.config.yml when present)
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Print debug diagnostics to stderr
    #[arg(short, long)]
    pub verbose: bool,

    /// Only print warnings and errors to stderr
    #[arg(short, long)]
    pub quiet: bool,
}

impl Args {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> GenerateArgs {
        let Command::Generate(generate) = Args::try_parse_from(args).unwrap().command;
        generate
    }

    #[test]
    fn test_generate_minimal() {
        let args = parse(&["vexi", "generate", "cgr.dev/chainguard/curl"]);
        assert_eq!(args.image_reference, "cgr.dev/chainguard/curl");
        assert!(args.predicates.is_none());
        assert!(args.repository.is_none());
        assert!(args.advisories.is_none());
        assert!(args.file.is_none());
        assert!(!args.verbose);
        assert!(!args.quiet);
    }

    #[test]
    fn test_generate_comma_separated_predicates() {
        let args = parse(&["vexi", "generate", "-p", "cyclonedx,spdx", "alpine"]);
        assert_eq!(
            args.predicates,
            Some(vec![PredicateFormat::CycloneDx, PredicateFormat::Spdx])
        );
    }

    #[test]
    fn test_generate_all_options() {
        let args = parse(&[
            "vexi",
            "generate",
            "--repository",
            "example/advisories",
            "--advisories",
            "/tmp/advisories",
            "--file",
            "out.vex.json",
            "--sbom",
            "sbom.json",
            "--author",
            "Security Team",
            "--ecosystem",
            "apk",
            "--namespace",
            "chainguard",
            "--config",
            "custom.yml",
            "-v",
            "-q",
            "cgr.dev/chainguard/curl:latest",
        ]);
        assert_eq!(args.repository.unwrap().to_string(), "example/advisories");
        assert_eq!(args.advisories, Some(PathBuf::from("/tmp/advisories")));
        assert_eq!(args.file, Some(PathBuf::from("out.vex.json")));
        assert_eq!(args.sbom, Some(PathBuf::from("sbom.json")));
        assert_eq!(args.author.as_deref(), Some("Security Team"));
        assert_eq!(args.ecosystem.as_deref(), Some("apk"));
        assert_eq!(args.namespace.as_deref(), Some("chainguard"));
        assert_eq!(args.config, Some(PathBuf::from("custom.yml")));
        assert!(args.verbose);
        assert!(args.quiet);
    }

    #[test]
    fn test_generate_invalid_repository_rejected() {
        let result = Args::try_parse_from(["vexi", "generate", "-r", "a/b/c", "alpine"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_generate_requires_image_reference() {
        let result = Args::try_parse_from(["vexi", "generate"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_subcommand_required() {
        let result = Args::try_parse_from(["vexi", "alpine"]);
        assert!(result.is_err());
    }
}
