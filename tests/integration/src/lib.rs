//! Integration test utilities for the mentor booking server
//!
//! This crate provides helpers for running end-to-end tests against
//! the REST API.

pub mod fixtures;
pub mod helpers;

pub use fixtures::*;
pub use helpers::*;
