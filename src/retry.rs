//! Caller-side retry with exponential backoff
//!
//! The resolver never retries on its own. Callers that want to ride out
//! transient helper failures (a busy Steam session, a dropped GC connection)
//! wrap the call in [`with_retry`].
//!
//! # Example
//!
//! ```no_run
//! use cs_sharecode::retry::with_retry;
//! use cs_sharecode::{Config, ShareCodeResolver};
//!
//! # async fn example() -> cs_sharecode::Result<()> {
//! let config = Config::default();
//! let resolver = ShareCodeResolver::from_config(&config)?;
//! let result = with_retry(&config.retry, || {
//!     resolver.resolve("CSGO-GADqf-jjyJ8-cSP2r-smZRo-TO2xK", true)
//! })
//! .await?;
//! # Ok(())
//! # }
//! ```

use crate::config::RetryConfig;
use crate::error::{Error, HelperError};
use rand::Rng;
use std::future::Future;
use std::time::Duration;

/// Trait for errors that can be classified as retryable or not
pub trait IsRetryable {
    /// Returns true if the error is transient and the operation should be retried
    fn is_retryable(&self) -> bool;
}

impl IsRetryable for Error {
    fn is_retryable(&self) -> bool {
        match self {
            Error::Helper(helper) => matches!(
                helper,
                HelperError::Generic
                    | HelperError::CommunicationFailure
                    | HelperError::AlreadyConnected
            ),
            // the helper may simply have been slow this time
            Error::OperationTimedOut { .. } => true,
            Error::InvalidShareCode(_)
            | Error::DecodeShareCode(_)
            | Error::ProcessLaunch { .. }
            | Error::PayloadDecode(_)
            | Error::NoMatchesFound
            | Error::DownloadLinkExpired
            | Error::Config { .. } => false,
        }
    }
}

/// Run `operation`, retrying transient failures with exponential backoff
///
/// A failure is retried only when [`IsRetryable::is_retryable`] says so and
/// fewer than `config.max_attempts` retries have been spent; otherwise that
/// failure is returned as is. With the default config (`max_attempts = 0`)
/// the operation runs exactly once.
pub async fn with_retry<F, Fut, T, E>(config: &RetryConfig, mut operation: F) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: IsRetryable + std::fmt::Display,
{
    let mut retries = 0;

    loop {
        let error = match operation().await {
            Ok(value) => {
                if retries > 0 {
                    tracing::info!(retries, "recovered after retrying");
                }
                return Ok(value);
            }
            Err(error) => error,
        };

        if !error.is_retryable() {
            tracing::debug!(error = %error, "permanent failure, not retrying");
            return Err(error);
        }
        if retries >= config.max_attempts {
            if config.max_attempts > 0 {
                tracing::warn!(error = %error, retries, "giving up, retry budget spent");
            }
            return Err(error);
        }

        retries += 1;
        let wait = backoff_delay(config, retries);
        tracing::warn!(
            error = %error,
            retry = retries,
            max_retries = config.max_attempts,
            wait_ms = wait.as_millis(),
            "transient failure, trying again"
        );
        tokio::time::sleep(wait).await;
    }
}

/// Wait before the `retry`-th retry (1-based)
///
/// `initial_delay * backoff_multiplier^(retry - 1)`, capped at `max_delay`.
/// With jitter the capped delay is stretched by a uniform 0-100%, so the
/// wait lies between the capped delay and twice that.
fn backoff_delay(config: &RetryConfig, retry: u32) -> Duration {
    let exponent = i32::try_from(retry.saturating_sub(1)).unwrap_or(i32::MAX);
    let grown = config.initial_delay.as_secs_f64() * config.backoff_multiplier.powi(exponent);
    let capped = grown.min(config.max_delay.as_secs_f64()).max(0.0);

    let stretch = if config.jitter {
        1.0 + rand::thread_rng().gen_range(0.0..=1.0)
    } else {
        1.0
    };
    Duration::try_from_secs_f64(capped * stretch).unwrap_or(config.max_delay)
}

// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicU32, Ordering};

    fn fast_config(max_attempts: u32) -> RetryConfig {
        RetryConfig {
            max_attempts,
            initial_delay: Duration::from_millis(1),
            max_delay: Duration::from_millis(5),
            backoff_multiplier: 2.0,
            jitter: false,
        }
    }

    #[test]
    fn transient_helper_failures_are_retryable() {
        assert!(Error::Helper(HelperError::CommunicationFailure).is_retryable());
        assert!(Error::Helper(HelperError::AlreadyConnected).is_retryable());
        assert!(Error::Helper(HelperError::Generic).is_retryable());
        assert!(
            Error::OperationTimedOut {
                after: Duration::from_secs(30)
            }
            .is_retryable()
        );
    }

    #[test]
    fn permanent_failures_are_not_retryable() {
        assert!(!Error::InvalidShareCode("x".into()).is_retryable());
        assert!(!Error::NoMatchesFound.is_retryable());
        assert!(!Error::DownloadLinkExpired.is_retryable());
        assert!(!Error::Helper(HelperError::NotRunningOrLoggedIn).is_retryable());
        assert!(!Error::Helper(HelperError::RestartRequired).is_retryable());
        assert!(!Error::Helper(HelperError::Unknown { code: Some(99) }).is_retryable());
    }

    #[tokio::test]
    async fn success_needs_no_retry() {
        let calls = Arc::new(AtomicU32::new(0));
        let counter = calls.clone();

        let result: Result<u32, Error> = with_retry(&fast_config(3), || {
            let counter = counter.clone();
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                Ok(7)
            }
        })
        .await;

        assert_eq!(result.unwrap(), 7);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn transient_failure_is_retried_until_success() {
        let calls = Arc::new(AtomicU32::new(0));
        let counter = calls.clone();

        let result: Result<&str, Error> = with_retry(&fast_config(3), || {
            let counter = counter.clone();
            async move {
                if counter.fetch_add(1, Ordering::SeqCst) < 2 {
                    Err(Error::Helper(HelperError::CommunicationFailure))
                } else {
                    Ok("done")
                }
            }
        })
        .await;

        assert_eq!(result.unwrap(), "done");
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn retries_stop_at_max_attempts() {
        let calls = Arc::new(AtomicU32::new(0));
        let counter = calls.clone();

        let result: Result<(), Error> = with_retry(&fast_config(2), || {
            let counter = counter.clone();
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                Err(Error::Helper(HelperError::AlreadyConnected))
            }
        })
        .await;

        assert!(matches!(
            result,
            Err(Error::Helper(HelperError::AlreadyConnected))
        ));
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn permanent_failure_is_not_retried() {
        let calls = Arc::new(AtomicU32::new(0));
        let counter = calls.clone();

        let result: Result<(), Error> = with_retry(&fast_config(5), || {
            let counter = counter.clone();
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                Err(Error::NoMatchesFound)
            }
        })
        .await;

        assert!(matches!(result, Err(Error::NoMatchesFound)));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn default_config_never_retries() {
        let calls = Arc::new(AtomicU32::new(0));
        let counter = calls.clone();

        let result: Result<(), Error> = with_retry(&RetryConfig::default(), || {
            let counter = counter.clone();
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                Err(Error::Helper(HelperError::CommunicationFailure))
            }
        })
        .await;

        assert!(result.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn backoff_grows_and_caps() {
        let config = RetryConfig {
            max_attempts: 10,
            initial_delay: Duration::from_secs(2),
            max_delay: Duration::from_secs(30),
            backoff_multiplier: 2.0,
            jitter: false,
        };

        assert_eq!(backoff_delay(&config, 1), Duration::from_secs(2));
        assert_eq!(backoff_delay(&config, 2), Duration::from_secs(4));
        assert_eq!(backoff_delay(&config, 4), Duration::from_secs(16));
        assert_eq!(backoff_delay(&config, 5), Duration::from_secs(30));
        assert_eq!(backoff_delay(&config, u32::MAX), Duration::from_secs(30));
    }

    #[test]
    fn jitter_stays_within_bounds() {
        let config = RetryConfig {
            initial_delay: Duration::from_millis(100),
            jitter: true,
            ..Default::default()
        };
        let delay = Duration::from_millis(100);
        for _ in 0..100 {
            let jittered = backoff_delay(&config, 1);
            assert!(jittered >= delay);
            assert!(jittered <= delay * 2);
        }
    }
}
