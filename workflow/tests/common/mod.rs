//! Common test utilities and infrastructure
//!
//! Shared fixtures, builders and fakes used across the workflow test suites.

#![allow(dead_code)]

pub mod fixtures;
pub mod helpers;

pub use fixtures::TestFixtures;
pub use helpers::{GatedService, StoreBuilder, TestHelpers};
