use super::percentiles::{P95_MIN_SAMPLES, P99_MIN_SAMPLES, mean, median, tail_latency};
use super::types::{Analysis, RequestOutcome, SummaryStats};

/// Percent scale for rates.
const PERCENT: f64 = 100.0;

/// Computes summary statistics over a complete outcome sequence.
///
/// Response-time figures only use successful outcomes; counts, cache-hit rate
/// and throughput use all of them.
#[must_use]
pub fn analyze(outcomes: &[RequestOutcome]) -> Analysis {
    if outcomes.is_empty() {
        return Analysis::Empty;
    }

    let total = outcomes.len();
    let successful = outcomes.iter().filter(|outcome| outcome.is_success()).count();
    let errors = total.saturating_sub(successful);
    let cache_hits = outcomes.iter().filter(|outcome| outcome.cache_hit).count();

    let mut response_times: Vec<f64> = outcomes
        .iter()
        .filter(|outcome| outcome.is_success())
        .map(|outcome| outcome.elapsed.as_secs_f64())
        .collect();
    response_times.sort_unstable_by(f64::total_cmp);

    let slowest = outcomes
        .iter()
        .map(|outcome| outcome.elapsed.as_secs_f64())
        .fold(0.0_f64, f64::max);

    Analysis::Summary(SummaryStats {
        total_requests: total,
        successful_requests: successful,
        error_requests: errors,
        success_rate: percent(successful, total),
        cache_hits,
        cache_hit_rate: percent(cache_hits, total),
        average_response_time: mean(&response_times),
        median_response_time: median(&response_times),
        p95_response_time: tail_latency(&response_times, 20, 19, P95_MIN_SAMPLES),
        p99_response_time: tail_latency(&response_times, 100, 99, P99_MIN_SAMPLES),
        min_response_time: response_times.first().copied().unwrap_or(0.0),
        max_response_time: response_times.last().copied().unwrap_or(0.0),
        requests_per_second: if slowest > 0.0 {
            total as f64 / slowest
        } else {
            0.0
        },
    })
}

fn percent(part: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    part as f64 * PERCENT / total as f64
}
