use thiserror::Error;

#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("Concurrency gate closed before all requests were admitted.")]
    GateClosed,
    #[error("Request task failed: {source}")]
    TaskFailed {
        #[source]
        source: tokio::task::JoinError,
    },
}
