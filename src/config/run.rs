use std::path::PathBuf;
use std::time::Duration;

use crate::args::{CacheRatio, TestType, TesterArgs};
use crate::error::{AppError, AppResult, ValidationError};

/// Resolved, validated settings for one run. Built once at startup and only
/// read afterwards.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub base_url: String,
    pub concurrency_limit: usize,
    pub total_requests: usize,
    pub endpoints: Vec<String>,
    pub cache_test_ratio: CacheRatio,
    pub timeout: Duration,
    pub test_type: TestType,
    pub duration: Duration,
    pub headers: Vec<(String, String)>,
    pub seed: Option<u64>,
    pub output_dir: PathBuf,
}

impl RunConfig {
    /// Builds the run configuration from parsed (and config-merged) arguments.
    ///
    /// # Errors
    ///
    /// Returns an error when the URL is missing or invalid, or no endpoints are set.
    pub fn from_args(args: &TesterArgs) -> AppResult<Self> {
        let base_url = match args.url.as_deref().map(str::trim) {
            Some(url) if !url.is_empty() => url.to_owned(),
            Some(_) | None => return Err(AppError::validation(ValidationError::MissingUrl)),
        };
        validate_base_url(&base_url)?;

        if args.endpoints.is_empty() {
            return Err(AppError::validation(ValidationError::EndpointsEmpty));
        }

        Ok(Self {
            base_url,
            concurrency_limit: args.concurrent.get(),
            total_requests: args.total,
            endpoints: args.endpoints.clone(),
            cache_test_ratio: args.cache_ratio,
            timeout: Duration::from_secs(args.timeout.get()),
            test_type: args.test_type,
            duration: Duration::from_secs(args.duration.get()),
            headers: args.headers.clone(),
            seed: args.seed,
            output_dir: args.output_dir.clone(),
        })
    }

    /// Number of requests in the concurrent cache-hit wave.
    #[must_use]
    pub fn cache_wave_size(&self) -> usize {
        self.cache_test_ratio.portion_of(self.total_requests)
    }
}

fn validate_base_url(base_url: &str) -> AppResult<()> {
    let parsed = url::Url::parse(base_url).map_err(|err| {
        AppError::validation(ValidationError::InvalidUrl {
            url: base_url.to_owned(),
            source: err,
        })
    })?;
    if parsed.host_str().is_none() {
        return Err(AppError::validation(ValidationError::UrlMissingHost));
    }
    Ok(())
}
