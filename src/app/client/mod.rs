//! HTTP client used by the live forecast provider
//!
//! - `config`: HTTP client configuration and building
//! - `http`: Rate-limited JSON fetches

pub mod config;
pub mod http;

pub use config::ClientConfig;
pub use http::HttpHandler;
