mod app;
mod config;
mod dispatch;
mod http;
mod persist;
mod validation;

#[cfg(test)]
mod test_support;

pub use app::{AppError, AppResult};
pub use config::ConfigError;
pub use dispatch::DispatchError;
pub use http::HttpError;
pub use persist::PersistError;
pub use validation::ValidationError;
