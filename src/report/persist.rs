use std::path::{Path, PathBuf};

use serde::Serialize;
use tokio::io::{AsyncWriteExt, BufWriter};

use crate::args::TestType;
use crate::config::RunConfig;
use crate::error::{AppError, AppResult, PersistError};
use crate::metrics::{Analysis, RequestOutcome};

#[derive(Serialize)]
struct ResultsFile<'run> {
    config: PersistedConfig<'run>,
    stats: &'run Analysis,
    raw_results: &'run [RequestOutcome],
}

#[derive(Serialize)]
struct PersistedConfig<'run> {
    base_url: &'run str,
    concurrent_requests: usize,
    total_requests: usize,
    test_endpoints: &'run [String],
    test_type: TestType,
}

/// `load_test_results_<unix timestamp>.json`
#[must_use]
pub fn results_file_name(started_at: i64) -> String {
    format!("load_test_results_{}.json", started_at)
}

/// Writes the run's configuration, statistics and raw outcomes as pretty
/// JSON into `dir`, named after the run's start timestamp.
///
/// # Errors
///
/// Returns an error when serialization or any file operation fails; nothing
/// is retried.
pub async fn write_results(
    dir: &Path,
    started_at: i64,
    config: &RunConfig,
    analysis: &Analysis,
    outcomes: &[RequestOutcome],
) -> AppResult<PathBuf> {
    let payload = ResultsFile {
        config: PersistedConfig {
            base_url: &config.base_url,
            concurrent_requests: config.concurrency_limit,
            total_requests: config.total_requests,
            test_endpoints: &config.endpoints,
            test_type: config.test_type,
        },
        stats: analysis,
        raw_results: outcomes,
    };
    let json = serde_json::to_vec_pretty(&payload)
        .map_err(|err| AppError::persist(PersistError::Serialize { source: err }))?;

    let path = dir.join(results_file_name(started_at));
    let write_err = |err: std::io::Error| {
        AppError::persist(PersistError::WriteResults {
            path: path.clone(),
            source: err,
        })
    };
    let file = tokio::fs::File::create(&path).await.map_err(write_err)?;
    let mut writer = BufWriter::new(file);
    writer.write_all(&json).await.map_err(write_err)?;
    writer.flush().await.map_err(write_err)?;
    Ok(path)
}
