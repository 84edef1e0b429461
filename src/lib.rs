//! Core library for the `cacheload` CLI.
//!
//! `cacheload` drives synthetic GET traffic at a caching reverse proxy and
//! reports throughput, latency percentiles and the cache-hit rate signalled
//! by the proxy's `X-Cache` header. The crate provides the CLI argument
//! types, configuration loading, the request issuer, the dispatch strategies,
//! result aggregation and the report/persistence helpers used by the binary.
pub mod args;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod http;
pub mod metrics;
pub mod report;
