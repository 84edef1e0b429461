use std::path::PathBuf;

use clap::ArgMatches;
use clap::parser::ValueSource;

use crate::args::{CacheRatio, PositiveU64, PositiveUsize, TesterArgs, parse_header};
use crate::error::{AppError, AppResult, ConfigError};

use super::types::ConfigFile;

/// Applies configuration values to CLI arguments. Values only fill in flags
/// that were not given on the command line.
///
/// # Errors
///
/// Returns an error when a config value is out of range or malformed.
pub fn apply_config(
    args: &mut TesterArgs,
    matches: &ArgMatches,
    config: &ConfigFile,
) -> AppResult<()> {
    if !is_cli(matches, "url")
        && let Some(url) = config.url.clone()
    {
        args.url = Some(url);
    }

    if !is_cli(matches, "concurrent")
        && let Some(concurrent) = config.concurrent
    {
        args.concurrent = PositiveUsize::try_from(concurrent)
            .map_err(|_err| ConfigError::FieldMustBePositive { field: "concurrent" })?;
    }

    if !is_cli(matches, "total")
        && let Some(total) = config.total
    {
        args.total = total;
    }

    if !is_cli(matches, "endpoints")
        && let Some(endpoints) = config.endpoints.as_ref()
    {
        if endpoints.is_empty() {
            return Err(AppError::config(ConfigError::EndpointsEmpty));
        }
        args.endpoints.clone_from(endpoints);
    }

    if !is_cli(matches, "cache_ratio")
        && let Some(ratio) = config.cache_ratio
    {
        args.cache_ratio = CacheRatio::try_from(ratio)
            .map_err(|err| ConfigError::InvalidCacheRatio { source: err })?;
    }

    if !is_cli(matches, "timeout")
        && let Some(timeout) = config.timeout
    {
        args.timeout = PositiveU64::try_from(timeout)
            .map_err(|_err| ConfigError::FieldMustBePositive { field: "timeout" })?;
    }

    if !is_cli(matches, "test_type")
        && let Some(test_type) = config.test_type
    {
        args.test_type = test_type;
    }

    if !is_cli(matches, "duration")
        && let Some(duration) = config.duration
    {
        args.duration = PositiveU64::try_from(duration)
            .map_err(|_err| ConfigError::FieldMustBePositive { field: "duration" })?;
    }

    if !is_cli(matches, "headers")
        && let Some(headers) = config.headers.as_ref()
    {
        args.headers = parse_headers(headers)?;
    }

    if !is_cli(matches, "seed")
        && let Some(seed) = config.seed
    {
        args.seed = Some(seed);
    }

    if !is_cli(matches, "output_dir")
        && let Some(output_dir) = config.output_dir.as_ref()
    {
        args.output_dir = PathBuf::from(output_dir);
    }

    if !is_cli(matches, "verbose")
        && let Some(verbose) = config.verbose
    {
        args.verbose = verbose;
    }

    Ok(())
}

fn is_cli(matches: &ArgMatches, name: &str) -> bool {
    matches.value_source(name) == Some(ValueSource::CommandLine)
}

fn parse_headers(headers: &[String]) -> AppResult<Vec<(String, String)>> {
    let mut parsed = Vec::with_capacity(headers.len());
    for header in headers {
        parsed.push(
            parse_header(header)
                .map_err(|err| AppError::config(ConfigError::InvalidHeader { source: err }))?,
        );
    }
    Ok(parsed)
}
