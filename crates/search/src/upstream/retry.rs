//! Bounded retry applied inside each upstream client.

use std::future::Future;

/// Run `op` up to `1 + max_attempts` times, re-issuing only failures for
/// which `is_retryable` returns true.
///
/// Once the bound is reached the last error is returned unchanged, so
/// callers see the same taxonomy and diagnostics as an unretried failure.
/// No delay is inserted between attempts.
pub async fn with_retry<T, E, F, Fut>(
    max_attempts: u32,
    is_retryable: impl Fn(&E) -> bool,
    mut op: F,
) -> Result<T, E>
where
    E: std::fmt::Display,
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    let mut attempt: u32 = 0;
    loop {
        match op().await {
            Ok(value) => return Ok(value),
            Err(err) if attempt < max_attempts && is_retryable(&err) => {
                attempt += 1;
                tracing::warn!(attempt, max_attempts, error = %err, "retrying upstream call");
            }
            Err(err) => return Err(err),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::atomic::{AtomicU32, Ordering};

    use super::*;

    /// Fails with `failures` retryable errors before succeeding.
    fn flaky(
        calls: &AtomicU32,
        failures: u32,
    ) -> impl FnMut() -> std::future::Ready<Result<u32, String>> + '_ {
        move || {
            let n = calls.fetch_add(1, Ordering::SeqCst);
            if n < failures {
                std::future::ready(Err(format!("boom {n}")))
            } else {
                std::future::ready(Ok(n + 1))
            }
        }
    }

    #[tokio::test]
    async fn test_success_on_first_attempt_issues_one_call() {
        let calls = AtomicU32::new(0);
        let result = with_retry(3, |_| true, flaky(&calls, 0)).await;
        assert_eq!(result, Ok(1));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_recovers_after_transient_failure() {
        let calls = AtomicU32::new(0);
        let result = with_retry(1, |_| true, flaky(&calls, 1)).await;
        assert_eq!(result, Ok(2));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_exhaustion_returns_last_error_after_bound() {
        let calls = AtomicU32::new(0);
        let result = with_retry(2, |_| true, flaky(&calls, 10)).await;
        // Total attempts = 1 + max_attempts; the final error is surfaced as-is.
        assert_eq!(result, Err("boom 2".to_string()));
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_non_retryable_error_is_terminal() {
        let calls = AtomicU32::new(0);
        let result = with_retry(5, |_| false, flaky(&calls, 10)).await;
        assert_eq!(result, Err("boom 0".to_string()));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_zero_max_attempts_means_single_call() {
        let calls = AtomicU32::new(0);
        let result = with_retry(0, |_| true, flaky(&calls, 10)).await;
        assert_eq!(result, Err("boom 0".to_string()));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
