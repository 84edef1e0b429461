//! Dispatch strategies: how many requests go out, against which endpoints,
//! and under what concurrency bound.
mod burst;
mod cache;
mod picker;
mod throughput;


use std::sync::Arc;
use std::time::Duration;

use tracing::info;

use crate::args::TestType;
use crate::config::RunConfig;
use crate::error::AppResult;
use crate::http::RequestIssuer;
use crate::metrics::RequestOutcome;

pub use picker::EndpointPicker;

/// Pause after each cache warm-up request.
pub(crate) const WARMUP_PAUSE: Duration = Duration::from_millis(100);
/// Pause between throughput batches.
pub(crate) const BATCH_PAUSE: Duration = Duration::from_millis(100);

/// Runs one dispatch strategy with a shared issuer and endpoint picker.
pub struct Dispatcher {
    issuer: Arc<dyn RequestIssuer>,
    picker: Arc<EndpointPicker>,
}

impl Dispatcher {
    /// Creates a dispatcher selecting from `endpoints`, seeded when `seed` is set.
    ///
    /// # Errors
    ///
    /// Returns an error when `endpoints` is empty.
    pub fn new(
        issuer: Arc<dyn RequestIssuer>,
        endpoints: &[String],
        seed: Option<u64>,
    ) -> AppResult<Self> {
        let picker = EndpointPicker::new(endpoints.to_vec(), seed)?;
        Ok(Self {
            issuer,
            picker: Arc::new(picker),
        })
    }

    /// Runs the strategy selected by `config.test_type` and returns every
    /// collected outcome.
    ///
    /// # Errors
    ///
    /// Returns an error when a burst request task fails at the runtime level.
    /// Cache-wave task failures are dropped instead.
    pub async fn run(&self, config: &RunConfig) -> AppResult<Vec<RequestOutcome>> {
        if config.total_requests == 0 {
            info!("Total request count is 0; nothing to dispatch.");
            return Ok(Vec::new());
        }

        match config.test_type {
            TestType::Cache => {
                info!("Running cache performance test...");
                Ok(cache::run_cache_test(
                    &self.issuer,
                    &self.picker,
                    &config.endpoints,
                    config.cache_wave_size(),
                )
                .await)
            }
            TestType::Concurrent => {
                info!(
                    "Running concurrent load test with {} concurrent requests...",
                    config.concurrency_limit
                );
                burst::run_burst_test(
                    &self.issuer,
                    &self.picker,
                    config.concurrency_limit,
                    config.total_requests,
                )
                .await
            }
            TestType::Throughput => {
                info!(
                    "Running throughput test for {} seconds...",
                    config.duration.as_secs()
                );
                Ok(throughput::run_throughput_test(
                    self.issuer.as_ref(),
                    &self.picker,
                    config.concurrency_limit,
                    config.duration,
                )
                .await)
            }
        }
    }
}
