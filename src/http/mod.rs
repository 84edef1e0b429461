//! Single-request execution against the proxy under test.
mod issuer;


pub use issuer::{CACHE_HEADER, CACHE_HIT_VALUE, HttpIssuer, RequestIssuer};
