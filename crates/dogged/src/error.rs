//! Error taxonomy for retry execution.
//!
//! Two layers: [`ConfigError`] for out-of-range policy values, rejected
//! before the first attempt, and [`RetryError`] for everything a run of the
//! executor can terminate with. Only work errors ever enter the retry logic;
//! hook panics unwind through the executor untouched.

use std::error::Error;
use std::time::Duration;

/// A policy value outside its permitted range.
///
/// Validation is deterministic and performed before the work unit is invoked,
/// so a rejected policy has no side effects.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// `max_retries` outside `[1, 100]`.
    #[error("max_retries must be within [1, 100], got {0}")]
    MaxRetriesOutOfRange(u32),

    /// `delay` outside `[1s, 3600s]`.
    #[error("delay must be within [1s, 3600s], got {0:?}")]
    DelayOutOfRange(Duration),
}

/// Terminal outcome of a failed [`execute`](crate::executor::RetryExecutor::execute) run.
///
/// The three variants keep the operator-visible distinction intact:
/// a rejected configuration, an error that was never going to be retried,
/// and a budget that ran out.
#[derive(Debug, thiserror::Error)]
pub enum RetryError<E>
where
    E: Error + 'static,
{
    /// The policy failed validation; the work unit was never invoked.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The work unit failed with a kind outside the configured retryable set.
    ///
    /// Carries the original error unchanged; `Display` and `source` delegate
    /// to it.
    #[error(transparent)]
    Fatal(E),

    /// Every attempt in the budget failed.
    ///
    /// Carries the configured attempt budget and the error from the last
    /// attempt for diagnostics.
    #[error("retry budget exhausted after {attempts} attempts: {source}")]
    Exhausted {
        /// Total attempts made, equal to the policy's `max_retries`.
        attempts: u32,
        /// The failure produced by the final attempt.
        source: E,
    },
}

impl<E> RetryError<E>
where
    E: Error + 'static,
{
    /// True when the retry budget was consumed without success.
    pub fn is_exhausted(&self) -> bool {
        matches!(self, RetryError::Exhausted { .. })
    }

    /// The number of attempts made, when the run exhausted its budget.
    pub fn attempts(&self) -> Option<u32> {
        match self {
            RetryError::Exhausted { attempts, .. } => Some(*attempts),
            _ => None,
        }
    }

    /// The underlying work error, when one was observed.
    pub fn work_error(&self) -> Option<&E> {
        match self {
            RetryError::Fatal(err) | RetryError::Exhausted { source: err, .. } => Some(err),
            RetryError::Config(_) => None,
        }
    }

    /// Consume the error and return the underlying work error, when present.
    pub fn into_work_error(self) -> Option<E> {
        match self {
            RetryError::Fatal(err) | RetryError::Exhausted { source: err, .. } => Some(err),
            RetryError::Config(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, thiserror::Error)]
    #[error("disk on fire")]
    struct DiskError;

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::MaxRetriesOutOfRange(0);
        assert_eq!(err.to_string(), "max_retries must be within [1, 100], got 0");

        let err = ConfigError::DelayOutOfRange(Duration::ZERO);
        assert!(err.to_string().starts_with("delay must be within [1s, 3600s]"));
    }

    #[test]
    fn test_fatal_is_transparent() {
        let err: RetryError<DiskError> = RetryError::Fatal(DiskError);
        assert_eq!(err.to_string(), "disk on fire");
        assert!(!err.is_exhausted());
        assert_eq!(err.attempts(), None);
    }

    #[test]
    fn test_exhausted_display_names_budget_and_cause() {
        let err: RetryError<DiskError> = RetryError::Exhausted {
            attempts: 3,
            source: DiskError,
        };
        assert_eq!(
            err.to_string(),
            "retry budget exhausted after 3 attempts: disk on fire"
        );
        assert!(err.is_exhausted());
        assert_eq!(err.attempts(), Some(3));
        assert!(err.source().is_some());
    }

    #[test]
    fn test_into_work_error() {
        let err: RetryError<DiskError> = RetryError::Exhausted {
            attempts: 2,
            source: DiskError,
        };
        assert!(err.into_work_error().is_some());

        let err: RetryError<DiskError> = RetryError::Config(ConfigError::MaxRetriesOutOfRange(0));
        assert!(err.into_work_error().is_none());
    }
}
