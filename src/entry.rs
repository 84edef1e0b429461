use std::sync::Arc;

use clap::{CommandFactory, FromArgMatches};
use tracing::info;

use cacheload::args::TesterArgs;
use cacheload::config::{RunConfig, apply_config, load_config};
use cacheload::dispatch::Dispatcher;
use cacheload::error::{AppError, AppResult};
use cacheload::http::{HttpIssuer, RequestIssuer};
use cacheload::metrics::analyze;
use cacheload::report::{config_lines, print_lines, report_lines, write_results};

use crate::logger::init_logging;
use crate::shutdown::{ShutdownReceiver, setup_signal_shutdown_handler, shutdown_channel};

pub(crate) fn run() -> AppResult<()> {
    let matches = TesterArgs::command().get_matches();
    let mut args = TesterArgs::from_arg_matches(&matches)?;
    if let Some(file) = load_config(args.config.as_deref())? {
        apply_config(&mut args, &matches, &file)?;
    }

    init_logging(args.verbose, args.no_color);
    let config = RunConfig::from_args(&args)?;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    runtime.block_on(run_until_interrupted(config))
}

/// Runs the load test unless a shutdown signal arrives first.
async fn run_until_interrupted(config: RunConfig) -> AppResult<()> {
    let (shutdown_tx, shutdown_rx) = shutdown_channel();
    let signal_handle = setup_signal_shutdown_handler(&shutdown_tx);

    let result = match HttpIssuer::from_config(&config) {
        Ok(issuer) => run_or_shutdown(&config, Arc::new(issuer), shutdown_rx).await,
        Err(err) => Err(err),
    };

    drop(shutdown_tx.send(()));
    drop(signal_handle.await);
    result
}

/// Races the run against `shutdown_rx`. An interrupted run persists nothing.
async fn run_or_shutdown(
    config: &RunConfig,
    issuer: Arc<dyn RequestIssuer>,
    mut shutdown_rx: ShutdownReceiver,
) -> AppResult<()> {
    tokio::select! {
        result = run_load_test(config, issuer) => result,
        _ = shutdown_rx.recv() => Err(AppError::Interrupted),
    }
}

async fn run_load_test(config: &RunConfig, issuer: Arc<dyn RequestIssuer>) -> AppResult<()> {
    let started_at = chrono::Utc::now().timestamp();
    print_lines(&config_lines(config));

    let dispatcher = Dispatcher::new(issuer, &config.endpoints, config.seed)?;
    let outcomes = dispatcher.run(config).await?;
    info!("Collected {} outcomes.", outcomes.len());

    let analysis = analyze(&outcomes);
    print_lines(&report_lines(&analysis));

    let path = write_results(&config.output_dir, started_at, config, &analysis, &outcomes).await?;
    println!("\nResults saved to: {}", path.display());
    Ok(())
}
