//! braintrust-export CLI
//!
//! Reads `BRAINTRUST_API_KEY` (and optionally `BRAINTRUST_API_URL`) from the
//! environment or a `.env` file, asks which project to export unless
//! `--project` is given, and writes CSV files under `--output-dir`.

use braintrust_export::{
    ConsoleSelector, ExportConfig, ExportReport, HttpTracker, NamedSelector, ProjectSelector,
    Result, run_export,
};
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "braintrust-export")]
#[command(version, about = "Export Braintrust experiments and datasets to CSV", long_about = None)]
struct Cli {
    /// Directory under which CSV/Experiments and CSV/Datasets are written
    #[arg(long, default_value = ".")]
    output_dir: PathBuf,

    /// Braintrust API base URL
    #[arg(long, env = "BRAINTRUST_API_URL")]
    api_url: Option<String>,

    /// Project id or name to export without prompting
    #[arg(long)]
    project: Option<String>,

    /// Objects requested per page from list and fetch endpoints
    #[arg(long, default_value_t = 100)]
    page_size: usize,
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "braintrust_export=info".into()),
        )
        .init();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(report) => {
            tracing::info!(
                "Done → Experiments: {}, Datasets: {}",
                report.experiments.output_dir.display(),
                report.datasets.output_dir.display()
            );
            tracing::info!(
                project = %report.project,
                experiments = report.experiments.resources,
                datasets = report.datasets.resources,
                warnings = report.experiments.warnings + report.datasets.warnings,
                "Export complete"
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!(error = %e, "Export failed");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<ExportReport> {
    let mut config = ExportConfig::from_env()?;
    if let Some(api_url) = cli.api_url.filter(|url| !url.trim().is_empty()) {
        config.api_url = api_url;
    }
    config.output_dir = cli.output_dir;
    config.page_size = cli.page_size;
    config.validate()?;

    let tracker = HttpTracker::new(&config)?;

    let mut selector: Box<dyn ProjectSelector> = match cli.project {
        Some(project) => Box::new(NamedSelector::new(project)),
        None => Box::new(ConsoleSelector::stdio()),
    };

    run_export(&tracker, selector.as_mut(), &config.output_dir).await
}
