use std::sync::Arc;

use tokio::task::JoinSet;
use tokio::time::sleep;
use tracing::{debug, info, warn};

use crate::http::RequestIssuer;
use crate::metrics::RequestOutcome;

use super::WARMUP_PAUSE;
use super::picker::EndpointPicker;

/// Warms every endpoint once, in order, then fires `wave` concurrent requests
/// against random endpoints.
///
/// Wave tasks that die at the runtime level (panic or cancellation) are
/// dropped from the results rather than failing the run. This only applies
/// to the wave; the other strategies treat such failures as fatal.
pub(super) async fn run_cache_test(
    issuer: &Arc<dyn RequestIssuer>,
    picker: &Arc<EndpointPicker>,
    endpoints: &[String],
    wave: usize,
) -> Vec<RequestOutcome> {
    let mut outcomes = Vec::with_capacity(endpoints.len().saturating_add(wave));

    info!("Populating cache...");
    for endpoint in endpoints {
        outcomes.push(issuer.issue(endpoint).await);
        sleep(WARMUP_PAUSE).await;
    }

    info!("Testing cache hits...");
    let mut tasks = JoinSet::new();
    for _ in 0..wave {
        let issuer = Arc::clone(issuer);
        let endpoint = picker.pick();
        tasks.spawn(async move { issuer.issue(&endpoint).await });
    }

    let mut dropped: usize = 0;
    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok(outcome) => outcomes.push(outcome),
            Err(err) => {
                dropped = dropped.saturating_add(1);
                debug!("Dropping cache-wave task: {}", err);
            }
        }
    }
    if dropped > 0 {
        warn!("{} cache-wave request tasks failed and were excluded.", dropped);
    }

    outcomes
}
