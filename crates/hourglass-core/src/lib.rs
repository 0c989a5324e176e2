//! Core types, configuration, and error handling for hourglass.
//!
//! This crate provides the shared foundation used by the other hourglass
//! crates:
//! - [`HourglassError`] — unified error type using `thiserror`
//! - [`HourglassConfig`] — configuration loaded from `.hourglass.toml`
//! - Shared types: [`Experience`], [`OutputFormat`]

mod config;
mod error;
mod types;

pub use config::{EstimateConfig, HourglassConfig};
pub use error::HourglassError;
pub use types::{Experience, OutputFormat};

/// A convenience `Result` type for hourglass operations.
pub type Result<T> = std::result::Result<T, HourglassError>;
