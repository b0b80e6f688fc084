//! The retry execution loop.

use crate::error::RetryError;
use crate::kind::Classify;
use crate::policy::RetryPolicy;
use crate::sleep::{Sleeper, ThreadSleeper};
use std::error::Error;
use std::fmt;
use tracing::{debug, error, warn};

/// Hook run before each retry attempt (never before the first).
type RetryHook = Box<dyn FnMut(u32, &(dyn Error + 'static)) + Send>;

/// Hook run after every attempt, successful or not.
type FinallyHook = Box<dyn FnMut(u32) + Send>;

/// Runs a fallible unit of work under a [`RetryPolicy`].
///
/// One `execute` call owns its whole attempt lifecycle: invoke the work,
/// classify the failure, run the cleanup hook, wait, try again — until the
/// work succeeds, a non-retryable kind appears, or the budget runs out. All
/// attempt state is local to the call, so executors on different threads
/// never interfere.
///
/// # Examples
///
/// ```rust
/// use dogged::executor::RetryExecutor;
/// use dogged::policy::RetryPolicy;
///
/// let mut executor = RetryExecutor::new(RetryPolicy::default());
///
/// let value = executor.execute(|| Ok::<_, std::io::Error>(42))?;
/// assert_eq!(value, 42);
/// # Ok::<(), dogged::error::RetryError<std::io::Error>>(())
/// ```
///
/// With hooks and selective retry:
///
/// ```rust
/// use dogged::executor::RetryExecutor;
/// use dogged::kind::ErrorKind;
/// use dogged::policy::RetryPolicy;
///
/// let mut executor = RetryExecutor::new(
///     RetryPolicy::new().retry_on_kind(ErrorKind::TIMEOUT),
/// )
/// .on_retry(|attempt, err| eprintln!("attempt {attempt} after: {err}"))
/// .on_finally(|attempt| eprintln!("attempt {attempt} done"));
///
/// let value = executor.execute(|| Ok::<_, std::io::Error>("ready"))?;
/// assert_eq!(value, "ready");
/// # Ok::<(), dogged::error::RetryError<std::io::Error>>(())
/// ```
pub struct RetryExecutor<S: Sleeper = ThreadSleeper> {
    policy: RetryPolicy,
    on_retry: Option<RetryHook>,
    on_finally: Option<FinallyHook>,
    sleeper: S,
}

impl RetryExecutor<ThreadSleeper> {
    /// Create an executor that waits with [`std::thread::sleep`].
    pub fn new(policy: RetryPolicy) -> Self {
        Self {
            policy,
            on_retry: None,
            on_finally: None,
            sleeper: ThreadSleeper,
        }
    }
}

impl<S: Sleeper> RetryExecutor<S> {
    /// Replace the delay primitive.
    ///
    /// Tests inject a recording sleeper here; a host that needs interruptible
    /// waits supplies its own.
    pub fn with_sleeper<S2: Sleeper>(self, sleeper: S2) -> RetryExecutor<S2> {
        RetryExecutor {
            policy: self.policy,
            on_retry: self.on_retry,
            on_finally: self.on_finally,
            sleeper,
        }
    }

    /// Install a callback run before each retry attempt.
    ///
    /// The hook receives the upcoming attempt number (2-based by
    /// construction) and the failure that triggered the retry. It never runs
    /// before the first attempt. A panicking hook unwinds out of
    /// [`execute`](Self::execute); the executor does not catch it.
    pub fn on_retry<F>(mut self, hook: F) -> Self
    where
        F: FnMut(u32, &(dyn Error + 'static)) + Send + 'static,
    {
        self.on_retry = Some(Box::new(hook));
        self
    }

    /// Install a cleanup hook run after every attempt.
    ///
    /// The hook receives the number of the attempt that just finished and
    /// runs whether that attempt succeeded, failed retryably, failed
    /// fatally, or exhausted the budget. A panicking hook unwinds out of
    /// [`execute`](Self::execute); the executor does not catch it.
    pub fn on_finally<F>(mut self, hook: F) -> Self
    where
        F: FnMut(u32) + Send + 'static,
    {
        self.on_finally = Some(Box::new(hook));
        self
    }

    /// The policy this executor runs under.
    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    /// Run `work` until it succeeds or the policy says stop.
    ///
    /// The policy is validated first; an out-of-range value is rejected
    /// before `work`, either hook, or the sleeper is touched.
    ///
    /// Per attempt:
    /// 1. Invoke `work`. Success returns immediately (after the cleanup
    ///    hook).
    /// 2. On failure, classify. A kind outside a non-empty `retry_on` set
    ///    terminates with [`RetryError::Fatal`] carrying the original error
    ///    unchanged, without consuming the remaining budget.
    /// 3. A retryable failure on the final attempt terminates with
    ///    [`RetryError::Exhausted`].
    /// 4. Otherwise run the cleanup hook, advance the counter, run the
    ///    retry callback, wait the policy's delay, and go again.
    ///
    /// The delay only ever runs ahead of a subsequent attempt; terminal
    /// paths never wait.
    pub fn execute<F, T, E>(&mut self, mut work: F) -> Result<T, RetryError<E>>
    where
        F: FnMut() -> Result<T, E>,
        E: Classify + 'static,
    {
        self.policy.validate()?;

        let max_retries = self.policy.max_retries;
        let mut attempt: u32 = 1;
        loop {
            match work() {
                Ok(value) => {
                    if attempt > 1 {
                        debug!(attempt, "operation succeeded after retrying");
                    }
                    self.run_finally(attempt);
                    return Ok(value);
                }
                Err(err) => {
                    let kind = err.kind();
                    if !self.policy.is_retryable(&kind) {
                        warn!(attempt, %kind, error = %err, "error kind is not retryable, giving up");
                        self.run_finally(attempt);
                        return Err(RetryError::Fatal(err));
                    }
                    if attempt == max_retries {
                        error!(attempts = max_retries, error = %err, "retry budget exhausted");
                        self.run_finally(attempt);
                        return Err(RetryError::Exhausted {
                            attempts: max_retries,
                            source: err,
                        });
                    }
                    warn!(
                        attempt,
                        max_retries,
                        delay = ?self.policy.delay,
                        error = %err,
                        "attempt failed, retrying after delay"
                    );
                    self.run_finally(attempt);
                    attempt += 1;
                    if let Some(hook) = self.on_retry.as_mut() {
                        hook(attempt, &err);
                    }
                    self.sleeper.sleep(self.policy.delay);
                }
            }
        }
    }

    fn run_finally(&mut self, attempt: u32) {
        if let Some(hook) = self.on_finally.as_mut() {
            hook(attempt);
        }
    }
}

impl<S: Sleeper + fmt::Debug> fmt::Debug for RetryExecutor<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RetryExecutor")
            .field("policy", &self.policy)
            .field("on_retry", &self.on_retry.is_some())
            .field("on_finally", &self.on_finally.is_some())
            .field("sleeper", &self.sleeper)
            .finish()
    }
}

/// Run `work` under `policy` with a one-off executor.
///
/// # Examples
///
/// ```rust
/// use dogged::executor::retry;
/// use dogged::policy::RetryPolicy;
///
/// let value = retry(RetryPolicy::no_retry(), || Ok::<_, std::io::Error>(7))?;
/// assert_eq!(value, 7);
/// # Ok::<(), dogged::error::RetryError<std::io::Error>>(())
/// ```
pub fn retry<F, T, E>(policy: RetryPolicy, work: F) -> Result<T, RetryError<E>>
where
    F: FnMut() -> Result<T, E>,
    E: Classify + 'static,
{
    RetryExecutor::new(policy).execute(work)
}
