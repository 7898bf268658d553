//! # Liberation
//!
//! Library half of the Liberation binary: the HTTP API, the CLI and the
//! TOML configuration, exposed so integration tests can drive them.

pub mod api;
pub mod cli;
pub mod config;
