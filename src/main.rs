mod cli;
mod config;

use anyhow::Context;
use cli::{Args, Command, GenerateArgs};
use config::ConfigFile;
use std::path::Path;
use std::process;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;
use vexi::adapters::outbound::console::StderrProgressReporter;
use vexi::adapters::outbound::filesystem::DirectoryAdvisoryIndexLoader;
use vexi::adapters::outbound::formatters::OpenVexFormatter;
use vexi::adapters::outbound::git::GitAdvisorySource;
use vexi::adapters::outbound::parsers::JsonSbomParser;
use vexi::application::dto::{RepositorySlug, VexRequest};
use vexi::application::factories::{FetcherFactory, PresenterFactory, PresenterType, SbomSource};
use vexi::application::use_cases::GenerateImageVexUseCase;
use vexi::ports::outbound::VexFormatter;
use vexi::shared::error::ExitCode;
use vexi::shared::Result;
use vexi::vex_generation::domain::target_ecosystem::{DEFAULT_NAMESPACE, DEFAULT_PURL_TYPE};
use vexi::vex_generation::domain::vex::DEFAULT_AUTHOR;
use vexi::vex_generation::domain::{PredicateFormat, TargetEcosystem};

#[tokio::main]
async fn main() {
    // clap exits with code 2 on invalid arguments
    let Command::Generate(args) = Args::parse_args().command;

    init_tracing(args.verbose);

    if let Err(e) = run(args).await {
        eprintln!("\n❌ An error occurred:\n");
        eprintln!("{}", e);

        // Display error chain
        let mut source = e.source();
        while let Some(err) = source {
            eprintln!("\nCaused by: {}", err);
            source = err.source();
        }

        eprintln!();
        process::exit(ExitCode::ApplicationError.as_i32());
    }
}

fn tracing_filter(verbose: bool) -> EnvFilter {
    // --verbose wins over RUST_LOG; an unset or invalid RUST_LOG means warn
    if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    }
}

fn init_tracing(verbose: bool) {
    let filter = tracing_filter(verbose);

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
}

async fn run(args: GenerateArgs) -> Result<()> {
    let config = load_config(args.config.as_deref())?;
    let request = build_request(&args, config)?;
    let output = request.output.clone();

    // Create adapters (Dependency Injection)
    let progress_reporter = if args.quiet {
        StderrProgressReporter::quiet()
    } else {
        StderrProgressReporter::new()
    };
    let attestation_fetcher = FetcherFactory::create(SbomSource::from(args.sbom.clone()))?;
    let use_case = GenerateImageVexUseCase::new(
        attestation_fetcher,
        GitAdvisorySource::new(),
        JsonSbomParser::new(),
        DirectoryAdvisoryIndexLoader::new(),
        progress_reporter,
    );

    let response = use_case.execute(request).await?;

    let formatted_output = OpenVexFormatter::new()
        .format(&response.document)
        .context("formatting VEX document")?;

    let presenter = PresenterFactory::create(PresenterType::from(output));
    presenter.present(&formatted_output)?;

    Ok(())
}

/// Loads the explicit config file, or the one discovered in the working directory
fn load_config(explicit: Option<&Path>) -> Result<ConfigFile> {
    if let Some(path) = explicit {
        return config::load_config_from_path(path);
    }

    let cwd = std::env::current_dir().context("resolving the working directory")?;
    match config::discover_config(&cwd)? {
        Some((path, config)) => {
            eprintln!("📄 Auto-discovered config file: {}", path.display());
            Ok(config)
        }
        None => Ok(ConfigFile::default()),
    }
}

/// Merges CLI flags over config file values over built-in defaults
fn build_request(args: &GenerateArgs, config: ConfigFile) -> Result<VexRequest> {
    let predicate_formats = match (&args.predicates, config.predicates) {
        (Some(formats), _) => formats.clone(),
        (None, Some(labels)) => labels
            .iter()
            .map(|label| label.parse::<PredicateFormat>().map_err(anyhow::Error::msg))
            .collect::<Result<Vec<_>>>()?,
        (None, None) => PredicateFormat::defaults(),
    };

    let repository = match (&args.repository, config.repository) {
        (Some(repository), _) => repository.clone(),
        (None, Some(slug)) => slug.parse::<RepositorySlug>()?,
        (None, None) => RepositorySlug::default(),
    };

    let target = TargetEcosystem::new(
        args.ecosystem
            .clone()
            .or(config.ecosystem)
            .unwrap_or_else(|| DEFAULT_PURL_TYPE.to_string()),
        args.namespace
            .clone()
            .or(config.namespace)
            .unwrap_or_else(|| DEFAULT_NAMESPACE.to_string()),
    )?;

    let author = args
        .author
        .clone()
        .or(config.author)
        .unwrap_or_else(|| DEFAULT_AUTHOR.to_string());

    VexRequest::builder(args.image_reference.clone())
        .advisories_dir(args.advisories.clone().or(config.advisories_dir))
        .repository(repository)
        .predicate_formats(predicate_formats)
        .output(args.file.clone())
        .author(author)
        .target(target)
        .build()
}
