use std::sync::Arc;

use tokio::sync::Semaphore;
use tokio::task::JoinSet;

use crate::error::{AppResult, DispatchError};
use crate::http::RequestIssuer;
use crate::metrics::RequestOutcome;

use super::picker::EndpointPicker;

/// Spawns `total` request tasks up front; a semaphore with `limit` permits
/// bounds how many are in flight. Outcomes arrive in completion order.
pub(super) async fn run_burst_test(
    issuer: &Arc<dyn RequestIssuer>,
    picker: &Arc<EndpointPicker>,
    limit: usize,
    total: usize,
) -> AppResult<Vec<RequestOutcome>> {
    let gate = Arc::new(Semaphore::new(limit.min(Semaphore::MAX_PERMITS)));
    let mut tasks = JoinSet::new();

    for _ in 0..total {
        let gate = Arc::clone(&gate);
        let issuer = Arc::clone(issuer);
        let picker = Arc::clone(picker);
        tasks.spawn(async move {
            let _permit = gate
                .acquire_owned()
                .await
                .map_err(|_closed| DispatchError::GateClosed)?;
            let endpoint = picker.pick();
            Ok::<_, DispatchError>(issuer.issue(&endpoint).await)
        });
    }

    let mut outcomes = Vec::with_capacity(total);
    while let Some(joined) = tasks.join_next().await {
        let outcome = joined.map_err(|err| DispatchError::TaskFailed { source: err })??;
        outcomes.push(outcome);
    }
    Ok(outcomes)
}
