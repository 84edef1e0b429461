use clap::Parser;
use std::path::PathBuf;

use super::defaults::DEFAULT_ENDPOINTS;
use super::parsers::{
    parse_bool_env, parse_cache_ratio, parse_header, parse_positive_u64, parse_positive_usize,
};
use super::types::{CacheRatio, PositiveU64, PositiveUsize, TestType};

#[derive(Debug, Parser, Clone)]
#[clap(
    version,
    about = "Load test a caching reverse proxy: throughput, latency percentiles and cache-hit rate.",
    next_help_heading = "Advanced Options"
)]
pub struct TesterArgs {
    /// Base URL of the proxy (e.g., http://localhost:8080)
    #[arg(long, short, help_heading = "Common Options")]
    pub url: Option<String>,

    /// Number of concurrent requests
    #[arg(
        long = "concurrent",
        short = 'c',
        default_value = "10",
        value_parser = parse_positive_usize,
        help_heading = "Common Options"
    )]
    pub concurrent: PositiveUsize,

    /// Total number of requests
    #[arg(long = "total", short = 'n', default_value = "100", help_heading = "Common Options")]
    pub total: usize,

    /// Endpoints appended to the base URL (space separated)
    #[arg(
        long,
        num_args = 1..,
        default_values = DEFAULT_ENDPOINTS,
        help_heading = "Common Options"
    )]
    pub endpoints: Vec<String>,

    /// Share of --total sent during the cache-hit wave (cache test only)
    #[arg(long = "cache-ratio", default_value = "0.7", value_parser = parse_cache_ratio)]
    pub cache_ratio: CacheRatio,

    /// Request timeout in seconds
    #[arg(long, default_value = "30", value_parser = parse_positive_u64)]
    pub timeout: PositiveU64,

    /// Type of test to run
    #[arg(
        long = "test-type",
        default_value = "concurrent",
        value_enum,
        help_heading = "Common Options"
    )]
    pub test_type: TestType,

    /// Duration of the throughput test in seconds
    #[arg(long, default_value = "60", value_parser = parse_positive_u64)]
    pub duration: PositiveU64,

    /// HTTP headers in 'Key: Value' format (repeatable)
    #[arg(long = "header", short = 'H', value_parser = parse_header)]
    pub headers: Vec<(String, String)>,

    /// Seed for endpoint selection (random when omitted)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Directory that receives the load_test_results_<timestamp>.json file
    #[arg(long = "output-dir", default_value = ".")]
    pub output_dir: PathBuf,

    /// Path to config file (TOML/JSON). Defaults to ./cacheload.toml or ./cacheload.json if present.
    #[arg(long, help_heading = "Common Options")]
    pub config: Option<String>,

    /// Enable verbose logging (sets log level to debug unless overridden by CACHELOAD_LOG/RUST_LOG)
    #[arg(long, short = 'v', help_heading = "Common Options")]
    pub verbose: bool,

    /// Disable color output
    #[arg(long = "no-color", env = "NO_COLOR", value_parser = parse_bool_env)]
    pub no_color: bool,
}
