//! CLI argument types and parsing helpers.
mod cli;
mod defaults;
pub(crate) mod parsers;
mod types;

#[cfg(test)]
pub(crate) mod test_support;

pub use cli::TesterArgs;
pub use types::{CacheRatio, PositiveU64, PositiveUsize, TestType};

pub(crate) use defaults::{DEFAULT_ENDPOINTS, DEFAULT_USER_AGENT};
pub(crate) use parsers::{parse_cache_ratio, parse_header};
