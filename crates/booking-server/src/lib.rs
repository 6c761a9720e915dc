//! # Booking Server
//!
//! Wiring and startup for the venue booking API.

pub mod app;
pub mod di;
pub mod startup;
