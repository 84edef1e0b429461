//! Console report and result-file persistence.
mod console;
mod persist;


pub use console::{config_lines, print_lines, report_lines};
pub use persist::{results_file_name, write_results};
