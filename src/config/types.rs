use serde::Deserialize;

use crate::args::TestType;

/// File-based counterpart of the CLI flags. Every field is optional; flags
/// given on the command line take precedence.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    pub url: Option<String>,
    pub concurrent: Option<usize>,
    pub total: Option<usize>,
    pub endpoints: Option<Vec<String>>,
    pub cache_ratio: Option<f64>,
    pub timeout: Option<u64>,
    pub test_type: Option<TestType>,
    pub duration: Option<u64>,
    pub headers: Option<Vec<String>>,
    pub seed: Option<u64>,
    pub output_dir: Option<String>,
    pub verbose: Option<bool>,
}
