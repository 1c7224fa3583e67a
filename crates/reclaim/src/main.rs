mod cli;
mod commands;
mod config;
mod logging;
mod signal;

use clap::Parser;
use cli::{Cli, Plan};
use commands::Operation;
use reclaim_cluster::KubeClusterClient;
use reclaim_config::CleanupConfig;
use reclaim_engine::{EngineContext, SystemClock, TracingObserver, Whitelist};
use reclaim_schedule::{CancellationToken, JitterTicker, PeriodicRunner, TimeWindow};
use std::process::ExitCode;
use std::sync::Arc;

#[tokio::main]
async fn main() -> ExitCode {
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let plan = cli.command.plan();
    if plan == Plan::Version {
        println!("{}", cli::version_info());
        return Ok(());
    }

    logging::init(&cli.settings.log_level, cli.settings.pretty_print)?;

    let config = config::resolve(&cli.settings).await?;
    let ctx = build_context(&config).await?;

    match plan {
        Plan::Once(operation) => run_once(operation, &ctx).await,
        Plan::Continuously(operation) => run_continuously(operation, ctx, &config).await,
        Plan::Version => Ok(()),
    }
}

async fn build_context(config: &CleanupConfig) -> anyhow::Result<EngineContext> {
    let thresholds = config.thresholds()?;
    let whitelist = Whitelist::new(config.whitelist.iter().cloned());
    let client = KubeClusterClient::try_default().await?;

    if config.dry_run {
        tracing::warn!("Dry run, nothing will be stopped or deleted");
    }
    tracing::info!(
        "Thresholds: stop after {} day(s), delete after {} day(s); {} whitelisted application(s)",
        thresholds.stop.num_days(),
        thresholds.deletion.num_days(),
        whitelist.names().len()
    );

    Ok(EngineContext {
        client: Arc::new(client),
        whitelist: Arc::new(whitelist),
        thresholds,
        clock: Arc::new(SystemClock),
        observer: Arc::new(TracingObserver),
        dry_run: config.dry_run,
    })
}

async fn run_once(operation: Operation, ctx: &EngineContext) -> anyhow::Result<()> {
    commands::execute(operation, ctx, &mut std::io::stdout()).await
}

async fn run_continuously(
    operation: Operation,
    ctx: EngineContext,
    config: &CleanupConfig,
) -> anyhow::Result<()> {
    let window = TimeWindow::from_config(&config.schedule)?;
    let ticker = JitterTicker::new(config.schedule.period)?;
    tracing::info!(
        "First check in {:?}, then every {:?}",
        ticker.jitter(),
        ticker.period()
    );

    let cancel = CancellationToken::new();
    signal::cancel_on_shutdown(cancel.clone());

    let summary = PeriodicRunner::new(window, ticker, cancel)
        .run(|| run_once(operation, &ctx))
        .await?;

    tracing::info!(
        "Periodic {} stopped after {} tick(s) and {} run(s)",
        operation.name(),
        summary.ticks,
        summary.runs
    );
    Ok(())
}
