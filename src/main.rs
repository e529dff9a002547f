use anyhow::{Context, Result};
use fm_sync::cli::commands::{SyncCommand, ValidateCommand};
use fm_sync::cli::output::*;
use fm_sync::cli::{Cli, Command};
use fm_sync::core::Pipeline;
use fm_sync::discovery::{find_pipelines, CancellationToken, DiscoveryError};
use fm_sync::sync::{sync_pipelines, FleetPipeline, PendingFleetClient};
use std::path::PathBuf;
use tracing::{warn, Level};
use tracing_subscriber::FmtSubscriber;

/// Exit status used when the user interrupts discovery
const EXIT_CANCELLED: i32 = 130;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::from_args();

    // Initialize logging
    let log_level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set logging subscriber")?;

    // Ctrl-C stops an in-progress walk at the next file
    let cancel = CancellationToken::new();
    let signal_token = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("interrupt received, cancelling discovery");
            signal_token.cancel();
        }
    });

    match &cli.command {
        Command::Sync(cmd) => run_sync(cmd, cli.root_path.clone(), &cancel).await?,
        Command::Validate(cmd) => validate_pipelines(cmd, cli.root_path.clone(), &cancel).await?,
    }

    Ok(())
}

async fn run_sync(cmd: &SyncCommand, root_path: Option<PathBuf>, cancel: &CancellationToken) -> Result<()> {
    let config = cmd.to_config(root_path);
    config.validate().context("Invalid configuration")?;

    let pipelines = discover(config.root_path.clone(), cancel).await?;
    println!(
        "{} Discovered {}",
        INFO,
        format_pipeline_count(pipelines.len())
    );

    let client = PendingFleetClient;
    let summary = sync_pipelines(&client, &config, &pipelines)
        .await
        .context("Failed to sync pipelines")?;

    let verb = if summary.dry_run { "Would sync" } else { "Synced" };
    println!(
        "{} {} {}",
        CHECK,
        verb,
        format_pipeline_count(summary.pipeline_count)
    );

    Ok(())
}

async fn validate_pipelines(
    cmd: &ValidateCommand,
    root_path: Option<PathBuf>,
    cancel: &CancellationToken,
) -> Result<()> {
    println!("{} Validating pipelines...", INFO);

    let pipelines = match discover(root_path, cancel).await {
        Ok(pipelines) => pipelines,
        Err(e) => {
            println!("{} Validation failed:", CROSS);
            println!("  {}", style(format!("{:#}", e)).red());
            std::process::exit(1);
        }
    };

    println!(
        "{} All pipelines are valid ({})",
        CHECK,
        format_pipeline_count(pipelines.len())
    );
    for pipeline in &pipelines {
        println!("  {}", format_pipeline(pipeline));
    }

    if cmd.json {
        let payloads: Vec<FleetPipeline> = pipelines.iter().map(Pipeline::to_fleet_pipeline).collect();
        let json = serde_json::to_string_pretty(&payloads)?;
        println!("\n{}", json);
    }

    Ok(())
}

/// Run discovery off the async runtime so the Ctrl-C handler stays responsive
async fn discover(root_path: Option<PathBuf>, cancel: &CancellationToken) -> Result<Vec<Pipeline>> {
    let token = cancel.clone();
    let result = tokio::task::spawn_blocking(move || find_pipelines(root_path.as_deref(), &token))
        .await
        .context("Discovery task failed")?;

    match result {
        Ok(pipelines) => Ok(pipelines),
        Err(DiscoveryError::Cancelled) => {
            println!("{} Discovery cancelled", WARN);
            std::process::exit(EXIT_CANCELLED);
        }
        Err(e) => Err(e).context("Failed to discover pipelines"),
    }
}
