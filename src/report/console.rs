use crate::config::RunConfig;
use crate::metrics::{Analysis, NO_RESULTS_MESSAGE, SummaryStats};

/// Width of the `=` rules framing the report.
const RULE_WIDTH: usize = 60;

/// Pre-run description of the resolved configuration.
#[must_use]
pub fn config_lines(config: &RunConfig) -> Vec<String> {
    vec![
        "Starting load test with configuration:".to_owned(),
        format!("  URL: {}", config.base_url),
        format!("  Concurrent requests: {}", config.concurrency_limit),
        format!("  Total requests: {}", config.total_requests),
        format!("  Test endpoints: {:?}", config.endpoints),
        format!("  Test type: {}", config.test_type),
    ]
}

/// Fixed-width results report.
#[must_use]
pub fn report_lines(analysis: &Analysis) -> Vec<String> {
    let rule = "=".repeat(RULE_WIDTH);
    let mut lines = vec![
        String::new(),
        rule.clone(),
        "LOAD TEST RESULTS".to_owned(),
        rule.clone(),
    ];

    match analysis {
        Analysis::Summary(stats) => push_summary(&mut lines, stats),
        Analysis::Empty => lines.push(NO_RESULTS_MESSAGE.to_owned()),
    }

    lines.push(rule);
    lines
}

fn push_summary(lines: &mut Vec<String>, stats: &SummaryStats) {
    lines.push(format!("Total Requests: {}", stats.total_requests));
    lines.push(format!("Successful Requests: {}", stats.successful_requests));
    lines.push(format!("Error Requests: {}", stats.error_requests));
    lines.push(format!("Success Rate: {:.2}%", stats.success_rate));
    lines.push(format!("Cache Hits: {}", stats.cache_hits));
    lines.push(format!("Cache Hit Rate: {:.2}%", stats.cache_hit_rate));

    lines.push(String::new());
    lines.push("Response Time Statistics:".to_owned());
    let timings = [
        ("Average", stats.average_response_time),
        ("Median", stats.median_response_time),
        ("95th Percentile", stats.p95_response_time),
        ("99th Percentile", stats.p99_response_time),
        ("Min", stats.min_response_time),
        ("Max", stats.max_response_time),
    ];
    for (label, seconds) in timings {
        lines.push(format!("  {}: {:.3}s", label, seconds));
    }

    lines.push(String::new());
    lines.push(format!(
        "Throughput: {:.2} requests/second",
        stats.requests_per_second
    ));
}

pub fn print_lines(lines: &[String]) {
    for line in lines {
        println!("{}", line);
    }
}
