//! Service implementations
//!
//! Production implementations of the service traits and their configuration.

pub mod config;
pub mod http_client;

#[cfg(test)]
mod tests;

pub use config::ServiceConfig;
pub use http_client::HttpPredictionService;
