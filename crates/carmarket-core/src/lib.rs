//! # carmarket-core
//!
//! Core types for the carmarket client: error types, settings, and logging.
//! This crate has no dependency on the other carmarket crates and provides
//! the foundation for all of them.
//!
//! ## Modules
//!
//! - [`error`] - Error types and result aliases
//! - [`settings`] - Client settings and global configuration
//! - [`settings_loader`] - Settings loading from TOML files and environment
//! - [`logging`] - Tracing-based logging integration

pub mod error;
pub mod logging;
pub mod settings;
pub mod settings_loader;

// Re-export the most commonly used types at the crate root.
pub use error::{CarmarketError, CarmarketResult, ValidationError};
pub use settings::{Settings, SETTINGS};
