//! Combinator for remote calls whose failure must not interrupt the caller.

use std::future::Future;

use crate::error::AppError;

/// Awaits `fut`, logging and discarding any error.
///
/// Used by sweeps such as the guild clear step where a single rejected call (for
/// example a managed role the bot cannot delete) is expected and must not abort the
/// remaining work.
///
/// # Arguments
/// - `action` - Short description of the call, included in the warning
/// - `fut` - The remote call to await
///
/// # Returns
/// - `Some(T)` - The call succeeded
/// - `None` - The call failed and the error was logged at warn level
pub async fn ignore_error<T, F>(action: &str, fut: F) -> Option<T>
where
    F: Future<Output = Result<T, AppError>>,
{
    match fut.await {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!("Ignoring failed {}: {}", action, e);
            None
        }
    }
}
