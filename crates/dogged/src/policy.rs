//! Retry policy configuration and validation.

use crate::error::ConfigError;
use crate::kind::ErrorKind;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::time::Duration;

/// Upper bound on the total attempt budget.
pub const MAX_RETRIES_LIMIT: u32 = 100;

/// Shortest permitted inter-attempt delay.
pub const MIN_DELAY: Duration = Duration::from_secs(1);

/// Longest permitted inter-attempt delay.
pub const MAX_DELAY: Duration = Duration::from_secs(3600);

/// Configuration for one retry run.
///
/// Plain data, so a policy block can live inside a host application's config
/// file and deserialize with defaults for anything omitted:
///
/// ```rust
/// use dogged::policy::RetryPolicy;
///
/// let policy: RetryPolicy = toml::from_str(
///     r#"
///     max_retries = 5
///     retry_on = ["timeout", "connection"]
///     "#,
/// )
/// .unwrap();
///
/// assert_eq!(policy.max_retries, 5);
/// assert_eq!(policy.delay, std::time::Duration::from_secs(1));
/// ```
///
/// # Examples
///
/// ```rust
/// use dogged::kind::ErrorKind;
/// use dogged::policy::RetryPolicy;
/// use std::time::Duration;
///
/// let policy = RetryPolicy::new()
///     .with_max_retries(5)
///     .with_delay(Duration::from_secs(2))
///     .retry_on_kind(ErrorKind::TIMEOUT);
///
/// assert!(policy.validate().is_ok());
/// assert!(policy.is_retryable(&ErrorKind::TIMEOUT));
/// assert!(!policy.is_retryable(&ErrorKind::IO));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryPolicy {
    /// Inclusive bound on total attempts, within `[1, 100]`.
    ///
    /// A budget of 1 runs the work exactly once with no retry.
    pub max_retries: u32,

    /// Kinds that are worth retrying. Empty means any failure is.
    pub retry_on: HashSet<ErrorKind>,

    /// Fixed wait between attempts, within `[1s, 3600s]`.
    // Last so the serialized form keeps TOML values ahead of the table.
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            retry_on: HashSet::new(),
            delay: Duration::from_secs(1),
        }
    }
}

impl RetryPolicy {
    /// Create a policy with the default budget (3 attempts, 1s delay, retry
    /// on any failure).
    pub fn new() -> Self {
        Self::default()
    }

    /// A policy that runs the work exactly once.
    pub fn no_retry() -> Self {
        Self {
            max_retries: 1,
            ..Self::default()
        }
    }

    /// Set the total attempt budget.
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Set the wait between attempts.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Restrict retrying to one more kind.
    ///
    /// The first call switches the policy from "retry anything" to selective
    /// retry; later calls widen the set.
    pub fn retry_on_kind(mut self, kind: ErrorKind) -> Self {
        self.retry_on.insert(kind);
        self
    }

    /// Whether a failure of `kind` is worth another attempt under this policy.
    pub fn is_retryable(&self, kind: &ErrorKind) -> bool {
        self.retry_on.is_empty() || self.retry_on.contains(kind)
    }

    /// Range-check the policy.
    ///
    /// Deterministic, no side effects. The executor runs this before the
    /// first attempt, so an invalid policy is rejected before any work runs.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_retries < 1 || self.max_retries > MAX_RETRIES_LIMIT {
            return Err(ConfigError::MaxRetriesOutOfRange(self.max_retries));
        }
        if self.delay < MIN_DELAY || self.delay > MAX_DELAY {
            return Err(ConfigError::DelayOutOfRange(self.delay));
        }
        Ok(())
    }
}
