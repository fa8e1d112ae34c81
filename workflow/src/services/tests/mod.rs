//! Service-specific tests

#[cfg(test)]
mod config;
