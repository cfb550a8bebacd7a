//! # Cadence Common Library
//!
//! Shared code for the Cadence workspace:
//! - Error type
//! - TOML configuration loading and config path resolution
//! - Human-readable duration formatting

pub mod config;
pub mod error;
pub mod human_time;

pub use error::{Error, Result};
