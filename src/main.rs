mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

use cli::Cli;
use mxexport::registry::manifest::load_registry;
use mxexport::{ExportConfig, ExportSummary, Exporter};

fn main() -> Result<()> {
    let cli = Cli::parse();
    let _guard = init_logging(cli.verbose)?;

    tracing::info!("mxexport starting");

    let config = ExportConfig::load(cli.config.as_deref())?;
    let registry_path = cli.registry_path();
    let registry = load_registry(&registry_path)
        .with_context(|| format!("loading registry snapshot {}", registry_path.display()))?;

    let mut exporter = Exporter::new(config);
    exporter.install(registry);

    if cli.dry_run {
        let (content, summary) = exporter.render()?;
        print!("{content}");
        report(&summary, None);
        return Ok(());
    }

    let summary = exporter.export(&cli.path)?;
    let output = exporter.config().output_path(&cli.path);
    report(&summary, Some(&output));

    Ok(())
}

/// Log to a daily file in the data dir (never stdout); `verbose` mirrors to stderr.
fn init_logging(verbose: bool) -> Result<WorkerGuard> {
    let log_dir = directories::ProjectDirs::from("", "", "mxexport")
        .map(|d| d.data_dir().to_path_buf())
        .unwrap_or_else(std::env::temp_dir);
    std::fs::create_dir_all(&log_dir)?;

    let file_appender = tracing_appender::rolling::daily(&log_dir, "mxexport.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("mxexport=info"));
    let stderr_layer =
        verbose.then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stderr));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false),
        )
        .with(stderr_layer)
        .init();

    Ok(guard)
}

fn report(summary: &ExportSummary, output: Option<&std::path::Path>) {
    let target = output
        .map(|path| path.display().to_string())
        .unwrap_or_else(|| "stdout".to_string());
    eprintln!(
        "mxexport: {} exported, {} skipped -> {target}",
        summary.exported.len(),
        summary.skipped()
    );
}
