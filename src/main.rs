//! Entry point for the translation catalog compiler.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use i18n_catalog_compiler::catalog::CatalogGenerator;
use i18n_catalog_compiler::config::ConfigManager;
use i18n_catalog_compiler::input::fs::DiskFs;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "i18n-catalog", version, about = "Compile translation trees into typed modules")]
struct Cli {
    /// Project root; relative paths in the configuration resolve against it.
    #[arg(short, long, default_value = ".")]
    project: PathBuf,

    /// Configuration file, relative to the project root. Defaults to `.i18n-catalog.json`.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Compile and report without touching the output directory.
    #[arg(long)]
    dry_run: bool,

    /// Log at debug level, overriding RUST_LOG.
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let mut config_manager = ConfigManager::new(cli.project);
    if let Err(e) = config_manager.load_settings(cli.config.as_deref()) {
        tracing::error!("{e}");
        return ExitCode::FAILURE;
    }

    let fs = DiskFs::new();
    let result = match CatalogGenerator::from_config(&fs, &config_manager) {
        Ok(generator) => generator.run(cli.dry_run).await,
        Err(e) => Err(e),
    };

    match result {
        Ok(report) => {
            for language in &report.languages {
                tracing::info!(
                    shortcode = %language.shortcode,
                    own = language.own_sections,
                    inherited = language.inherited_sections,
                    "Language compiled"
                );
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

