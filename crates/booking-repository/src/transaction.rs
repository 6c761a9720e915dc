//! Scoped transactions.

use booking_core::{BookingResult, BoxFuture};
use sqlx::{MySqlConnection, MySqlPool};
use tracing::{debug, warn};

/// Runs `work` inside a transaction on a connection from `pool`.
///
/// Commits when `work` returns `Ok` and rolls back when it returns `Err`.
/// If the future is dropped or panics before finishing, the transaction
/// guard rolls back when it goes out of scope.
///
/// ```ignore
/// let venue = in_transaction(pool, move |conn| {
///     Box::pin(async move {
///         sqlx::query("...").execute(&mut *conn).await?;
///         Ok(venue)
///     })
/// })
/// .await?;
/// ```
pub async fn in_transaction<T, F>(pool: &MySqlPool, work: F) -> BookingResult<T>
where
    T: Send,
    F: for<'c> FnOnce(&'c mut MySqlConnection) -> BoxFuture<'c, T> + Send,
{
    let mut tx = pool.begin().await?;

    match work(&mut *tx).await {
        Ok(value) => {
            tx.commit().await?;
            debug!("Transaction committed");
            Ok(value)
        }
        Err(e) => {
            if let Err(rollback) = tx.rollback().await {
                warn!("Transaction rollback failed: {}", rollback);
            } else {
                debug!("Transaction rolled back: {}", e);
            }
            Err(e)
        }
    }
}
