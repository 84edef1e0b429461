use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::num::{NonZeroU64, NonZeroUsize};

use crate::error::ValidationError;

/// Dispatch strategy selected for a run.
#[derive(Debug, Clone, Copy, ValueEnum, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TestType {
    /// Warm each endpoint once, then fire a concurrent wave meant to hit the cache.
    Cache,
    /// Fixed request count behind a concurrency gate.
    Concurrent,
    /// Back-to-back batches until the duration elapses.
    Throughput,
}

impl TestType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            TestType::Cache => "cache",
            TestType::Concurrent => "concurrent",
            TestType::Throughput => "throughput",
        }
    }
}

impl std::fmt::Display for TestType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PositiveU64(NonZeroU64);

impl PositiveU64 {
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0.get()
    }
}

impl TryFrom<u64> for PositiveU64 {
    type Error = ValidationError;

    fn try_from(value: u64) -> Result<Self, Self::Error> {
        NonZeroU64::new(value)
            .map(PositiveU64)
            .ok_or(ValidationError::ValueTooSmall { min: 1 })
    }
}

impl std::str::FromStr for PositiveU64 {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: u64 = s
            .trim()
            .parse()
            .map_err(|err| ValidationError::InvalidNumber { source: err })?;
        PositiveU64::try_from(value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PositiveUsize(NonZeroUsize);

impl PositiveUsize {
    #[must_use]
    pub const fn get(self) -> usize {
        self.0.get()
    }
}

impl TryFrom<usize> for PositiveUsize {
    type Error = ValidationError;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        NonZeroUsize::new(value)
            .map(PositiveUsize)
            .ok_or(ValidationError::ValueTooSmall { min: 1 })
    }
}

impl std::str::FromStr for PositiveUsize {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: usize = s
            .trim()
            .parse()
            .map_err(|err| ValidationError::InvalidNumber { source: err })?;
        PositiveUsize::try_from(value)
    }
}

/// Share of `--total` sent during the cache-hit wave. Always within `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CacheRatio(f64);

impl CacheRatio {
    #[must_use]
    pub const fn get(self) -> f64 {
        self.0
    }

    /// Number of requests the ratio selects out of `total`, rounded down.
    #[must_use]
    pub fn portion_of(self, total: usize) -> usize {
        let scaled = (total as f64 * self.0).floor();
        if scaled <= 0.0 {
            0
        } else {
            // Bounded by `total` since the ratio is at most 1.
            (scaled as usize).min(total)
        }
    }
}

impl TryFrom<f64> for CacheRatio {
    type Error = ValidationError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        if (0.0..=1.0).contains(&value) {
            Ok(CacheRatio(value))
        } else {
            Err(ValidationError::RatioOutOfRange { value })
        }
    }
}

impl std::str::FromStr for CacheRatio {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: f64 = s
            .trim()
            .parse()
            .map_err(|err| ValidationError::InvalidRatio {
                value: s.to_owned(),
                source: err,
            })?;
        CacheRatio::try_from(value)
    }
}
