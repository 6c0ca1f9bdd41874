//! colcut - validated settings for a delimited-text column picker
//!
//! This crate provides the configuration core for a line-oriented,
//! delimiter-separated text processing tool: it validates and normalizes
//! the `column` and `separator` settings so the downstream row splitter
//! can consume them without further checking.

pub mod config;

// Re-export commonly used types
pub use config::{ColumnValue, ConfigError, Configurator};
