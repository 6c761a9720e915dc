//! # Booking REST
//!
//! REST API layer using Axum. Exposes authentication, user administration,
//! venue management and health checks under a role-gated router.

pub mod controllers;
pub mod extractors;
pub mod middleware;
pub mod responses;
pub mod router;
pub mod state;

pub use router::*;
pub use state::*;
