use std::time::Duration;

use futures_util::future::join_all;
use tokio::time::{Instant, sleep};
use tracing::debug;

use crate::http::RequestIssuer;
use crate::metrics::RequestOutcome;

use super::BATCH_PAUSE;
use super::picker::EndpointPicker;

/// Sends batches of `batch_size` concurrent requests until `duration` has
/// elapsed. The deadline is only checked between batches, so the last batch
/// may finish after it.
pub(super) async fn run_throughput_test(
    issuer: &dyn RequestIssuer,
    picker: &EndpointPicker,
    batch_size: usize,
    duration: Duration,
) -> Vec<RequestOutcome> {
    let start = Instant::now();
    let mut outcomes = Vec::new();
    let mut batches: u64 = 0;

    while start.elapsed() < duration {
        let batch = (0..batch_size).map(|_| {
            let endpoint = picker.pick();
            async move { issuer.issue(&endpoint).await }
        });
        outcomes.extend(join_all(batch).await);
        batches = batches.saturating_add(1);
        debug!(
            "Throughput batch {} done ({} outcomes, {:?} elapsed)",
            batches,
            outcomes.len(),
            start.elapsed()
        );
        sleep(BATCH_PAUSE).await;
    }

    outcomes
}
