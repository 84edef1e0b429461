mod entry;
mod logger;
mod shutdown;

use std::process::ExitCode;

use cacheload::error::AppError;

fn main() -> ExitCode {
    match entry::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{}", failure_message(&err));
            ExitCode::FAILURE
        }
    }
}

fn failure_message(err: &AppError) -> String {
    if err.is_interrupted() {
        "\nTest interrupted by user".to_owned()
    } else {
        format!("Test failed: {}", err)
    }
}
