//! Reel CLI - command line configuration.
//!
//! The binary lives in `main.rs`; this library exposes the argument parser
//! so it can be tested without a database.

pub mod config;

pub use config::{Command, Config, version_info};
