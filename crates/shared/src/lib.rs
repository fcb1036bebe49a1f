//! Shared types, errors, and configuration for Despacho.
//!
//! This crate holds the pieces every other crate needs: the
//! application-wide error taxonomy, configuration loading, and the
//! acting-identity context value stamped by the upstream auth layer.

pub mod config;
pub mod error;
pub mod identity;

pub use config::{AppConfig, DatabaseConfig, ServerConfig, StorageSettings};
pub use error::{AppError, AppResult};
pub use identity::Identity;
