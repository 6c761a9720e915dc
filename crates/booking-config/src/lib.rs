//! # Booking Config
//!
//! Configuration management for the venue booking API.
//! Supports layered configuration from files, environment variables,
//! and the legacy flat variable names the service was first deployed with.

mod app_config;
mod duration;
mod loader;
mod validation;

pub use app_config::*;
pub use duration::parse_duration_secs;
pub use loader::*;
pub use validation::*;
