//! # Booking Security
//!
//! Credential helpers for the venue booking API: JWT issuing and
//! verification, argon2 password hashing, the auth response headers and
//! role checks.
//!
//! Every helper reports failure through `BookingResult`, `Option` or `bool`
//! and never panics. Services decide which domain error a failure becomes.

pub mod headers;
pub mod jwt;
pub mod password;
pub mod rbac;

pub use headers::*;
pub use jwt::*;
pub use password::*;
pub use rbac::*;
