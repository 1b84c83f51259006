//! Async timeout helpers shared by the transport and the login sequence.

use crate::error::{ProtocolError, Result};
use std::future::Future;
use std::time::Duration;
use tokio::time::timeout;
use tracing::warn;

/// Default connect and read timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// How long `disconnect` waits for the worker tasks to wind down.
pub const SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(5);

/// Server tick length, the processing loop's default cadence.
pub const TICK_INTERVAL: Duration = Duration::from_millis(50);

/// Run `fut` with a deadline, mapping expiry to `ProtocolError::Timeout`.
pub async fn with_timeout_error<F, T>(fut: F, duration: Duration) -> Result<T>
where
    F: Future<Output = Result<T>>,
{
    match timeout(duration, fut).await {
        Ok(result) => result,
        Err(_) => {
            warn!(timeout_ms = duration.as_millis() as u64, "Operation timed out");
            Err(ProtocolError::Timeout)
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_expiry_maps_to_timeout() {
        let res: Result<()> = with_timeout_error(
            async {
                tokio::time::sleep(Duration::from_millis(200)).await;
                Ok(())
            },
            Duration::from_millis(10),
        )
        .await;
        assert!(matches!(res, Err(ProtocolError::Timeout)));
    }

    #[tokio::test]
    async fn test_inner_result_passes_through() {
        let v = with_timeout_error(async { Ok(7) }, Duration::from_secs(1))
            .await
            .unwrap();
        assert_eq!(v, 7);
    }
}
