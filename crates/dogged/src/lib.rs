#![deny(unsafe_code)]
#![warn(missing_docs)]

//! Bounded, fixed-delay retry execution for fallible operations.
//!
//! `dogged` re-invokes a unit of work that may fail, waiting a fixed delay
//! between attempts, until it succeeds or its attempt budget runs out. It is
//! aimed at scripts and automation that call unreliable operations (flaky
//! I/O, network calls) and want declarative retry behavior instead of a
//! hand-written loop.
//!
//! # Key Types
//!
//! - [`RetryPolicy`](policy::RetryPolicy) - attempt budget, delay, retryable kinds
//! - [`RetryExecutor`](executor::RetryExecutor) - the retry loop and its hooks
//! - [`ErrorKind`](kind::ErrorKind) / [`Classify`](kind::Classify) - failure classification
//! - [`RetryError`](error::RetryError) - terminal outcomes
//!
//! # Design Philosophy
//!
//! One synchronous control-flow loop with a few configuration knobs. No
//! backoff curves, no jitter, no circuit breaking, no shared state: every
//! `execute` call owns its attempt counter and blocks its own thread,
//! including during delays. Selective retry is a set-membership test over
//! kind tags, so an error the policy was never going to retry short-circuits
//! on the first attempt with the original error intact.
//!
//! Progress is reported through [`tracing`]: a warning per failed attempt
//! (with the wait ahead), an error on exhaustion, and nothing that affects
//! control flow.
//!
//! # Examples
//!
//! ```rust
//! use dogged::prelude::*;
//! use std::time::Duration;
//!
//! let policy = RetryPolicy::new()
//!     .with_max_retries(5)
//!     .with_delay(Duration::from_secs(1))
//!     .retry_on_kind(ErrorKind::TIMEOUT);
//!
//! let mut executor = RetryExecutor::new(policy)
//!     .on_finally(|attempt| println!("attempt {attempt} finished"));
//!
//! let value = executor.execute(|| Ok::<_, std::io::Error>("stable"))?;
//! assert_eq!(value, "stable");
//! # Ok::<(), dogged::error::RetryError<std::io::Error>>(())
//! ```

pub mod error;
pub mod executor;
pub mod kind;
pub mod policy;
pub mod sleep;

/// Convenient re-exports of commonly used items.
///
/// Import everything needed for typical use with:
///
/// ```rust
/// use dogged::prelude::*;
/// ```
pub mod prelude {
    pub use crate::error::{ConfigError, RetryError};
    pub use crate::executor::{RetryExecutor, retry};
    pub use crate::kind::{Classify, ErrorKind};
    pub use crate::policy::RetryPolicy;
    pub use crate::sleep::{Sleeper, ThreadSleeper};
}
