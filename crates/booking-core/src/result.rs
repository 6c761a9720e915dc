//! Result type aliases.

use crate::BookingError;

/// A specialized `Result` type for booking operations.
pub type BookingResult<T> = Result<T, BookingError>;

/// A boxed future returning a `BookingResult`.
pub type BoxFuture<'a, T> =
    std::pin::Pin<Box<dyn std::future::Future<Output = BookingResult<T>> + Send + 'a>>;
