use std::io::{self, IsTerminal};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{debug, error, info};

use nexus_backup::{BackupRunner, RepositoryClient};

use crate::ProcessExit;
use crate::app::progress_manager::ProgressReporter;
use crate::app::{config_manager, exit_handler, terminal};
use crate::app_config::load_default_file_config;
use crate::cli::Args;

pub(crate) async fn run_backup() -> Result<ProcessExit> {
    // Parse before tracing so --help works without logs
    let args = Args::parse();
    let loaded = load_default_file_config()?;

    let file_verbosity = loaded.config.as_ref().and_then(|cfg| cfg.verbosity);
    let default_level = terminal::resolve_default_log_level(&args, file_verbosity);
    terminal::init_tracing(default_level, terminal::is_no_color_requested());

    match (&loaded.path, loaded.config.is_some()) {
        (Some(path), true) => debug!(path = %path.display(), "Loaded config file"),
        (Some(path), false) => debug!(path = %path.display(), "No config file found"),
        (None, _) => debug!("No config directory available"),
    }

    let resolved = config_manager::resolve_config(&args, loaded.config.as_ref())?;
    let repository = resolved.target.repository().to_string();
    let client = RepositoryClient::with_timeouts(
        resolved.target,
        resolved.timeouts.connect_secs,
        resolved.timeouts.read_secs,
    )
    .context("Failed to create HTTP client")?;

    info!(
        repository = %repository,
        url = %client.target().base_url(),
        output = %resolved.options.output_root.display(),
        "nexus-backup starting"
    );

    if args.ping {
        client
            .ping()
            .await
            .context("Repository service health check failed")?;
        info!("Repository service is reachable");
    }

    let use_progress = terminal::should_use_progress(
        io::stderr().is_terminal(),
        args.quiet || args.no_progress,
        terminal::is_dumb_terminal(),
    );
    let reporter = ProgressReporter::new(use_progress);
    let runner = BackupRunner::new(client, resolved.options);
    let outcome = runner.run(&reporter).await;
    reporter.finish();
    let stats = outcome.with_context(|| format!("Backup of '{repository}' failed"))?;

    for failure in stats.failures() {
        error!(url = %failure.url, error = %failure.error, "Artifact not backed up");
    }
    info!(
        pages = stats.pages(),
        discovered = stats.discovered(),
        downloaded = stats.downloaded(),
        failed = stats.failed(),
        bytes = stats.bytes(),
        "Backup summary"
    );

    Ok(exit_handler::determine_exit_outcome(
        stats.downloaded(),
        stats.failed(),
    ))
}
