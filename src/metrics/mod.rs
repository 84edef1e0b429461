//! Request outcomes and the summary statistics derived from them.
mod aggregate;
mod percentiles;
mod types;


pub use aggregate::analyze;
pub use types::{Analysis, NO_RESULTS_MESSAGE, RequestOutcome, SummaryStats};
