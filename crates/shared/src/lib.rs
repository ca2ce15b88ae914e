//! Shared types, errors, and configuration for Compta.
//!
//! This crate provides common types used across all other crates:
//! - Typed IDs for type-safe entity references
//! - French amount and compact date notation
//! - Application-wide error types
//! - Configuration management
//! - Tracing subscriber setup

pub mod config;
pub mod error;
pub mod telemetry;
pub mod types;

pub use config::AppConfig;
pub use error::AppError;
