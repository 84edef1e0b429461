use std::time::Duration;

use serde::{Serialize, Serializer};

/// Status code recorded when no HTTP response was received.
pub const TRANSPORT_FAILURE_STATUS: u16 = 0;

/// Message reported in place of statistics when a run produced no outcomes.
pub const NO_RESULTS_MESSAGE: &str = "No results to analyze";

/// Normalized result of a single GET.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RequestOutcome {
    pub status_code: u16,
    #[serde(rename = "response_time", serialize_with = "serialize_secs")]
    pub elapsed: Duration,
    pub cache_hit: bool,
    pub error: Option<String>,
}

impl RequestOutcome {
    #[must_use]
    pub const fn response(status_code: u16, elapsed: Duration, cache_hit: bool) -> Self {
        Self {
            status_code,
            elapsed,
            cache_hit,
            error: None,
        }
    }

    #[must_use]
    pub const fn failure(elapsed: Duration, error: String) -> Self {
        Self {
            status_code: TRANSPORT_FAILURE_STATUS,
            elapsed,
            cache_hit: false,
            error: Some(error),
        }
    }

    /// Only an exact 200 counts; redirects and other 2xx are errors.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status_code == 200
    }
}

fn serialize_secs<S>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_f64(value.as_secs_f64())
}

/// Descriptive statistics over one outcome sequence. Times are in seconds,
/// rates in percent.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryStats {
    pub total_requests: usize,
    pub successful_requests: usize,
    pub error_requests: usize,
    pub success_rate: f64,
    pub cache_hits: usize,
    pub cache_hit_rate: f64,
    pub average_response_time: f64,
    pub median_response_time: f64,
    pub p95_response_time: f64,
    pub p99_response_time: f64,
    pub min_response_time: f64,
    pub max_response_time: f64,
    /// Total outcomes divided by the slowest single response, not by wall-clock
    /// run time. Kept this way so reports stay comparable across versions.
    pub requests_per_second: f64,
}

/// Aggregation result; an empty run yields [`Analysis::Empty`] instead of
/// ratios over zero.
#[derive(Debug, Clone, PartialEq)]
pub enum Analysis {
    Summary(SummaryStats),
    Empty,
}

impl Serialize for Analysis {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Analysis::Summary(stats) => stats.serialize(serializer),
            Analysis::Empty => {
                use serde::ser::SerializeMap;
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("error", NO_RESULTS_MESSAGE)?;
                map.end()
            }
        }
    }
}
