//! Configuration module for page conversion
//!
//! This module provides the `MonolithConfig` struct and its builder
//! for configuring conversions with validation and sensible defaults.

// Sub-modules
pub mod builder;
pub mod getters;
pub mod methods;
pub mod types;

// Re-exports for public API
pub use builder::MonolithConfigBuilder;
pub use types::MonolithConfig;
