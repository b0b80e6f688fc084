//! Example: retrying a flaky operation with hooks and kind filtering
//!
//! This example demonstrates:
//! 1. Simple retry of an operation that fails a few times before succeeding
//! 2. Selective retry (only timeout-kind failures are retried)
//! 3. Fail-fast policy validation
//!
//! Run with:
//! ```bash
//! cargo run -p dogged --example flaky_fetch
//! ```

use dogged::prelude::*;
use std::error::Error;
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

/// A simulated fetch that fails the first few times
struct UnreliableSource {
    attempts: Arc<AtomicU32>,
    fail_count: u32,
}

impl UnreliableSource {
    fn new(fail_count: u32) -> Self {
        Self {
            attempts: Arc::new(AtomicU32::new(0)),
            fail_count,
        }
    }

    fn fetch(&self) -> Result<String, std::io::Error> {
        let attempt = self.attempts.fetch_add(1, Ordering::SeqCst);

        if attempt < self.fail_count {
            println!("  attempt {}: FAILED (transient)", attempt + 1);
            Err(std::io::Error::new(
                std::io::ErrorKind::TimedOut,
                format!("timed out on attempt {}", attempt + 1),
            ))
        } else {
            println!("  attempt {}: SUCCESS", attempt + 1);
            Ok("payload".to_string())
        }
    }

    fn total_attempts(&self) -> u32 {
        self.attempts.load(Ordering::SeqCst)
    }
}

/// Example 1: retry until the source recovers
fn example_simple_retry() -> Result<(), Box<dyn Error>> {
    println!("\n=== Example 1: Simple Retry ===\n");

    let source = UnreliableSource::new(2); // fail first 2 attempts

    let mut executor = RetryExecutor::new(
        RetryPolicy::new()
            .with_max_retries(5)
            .with_delay(Duration::from_secs(1)),
    )
    .on_retry(|attempt, err| println!("  -> retrying (attempt {attempt}) after: {err}"))
    .on_finally(|attempt| println!("  -> cleanup for attempt {attempt}"));

    println!("Fetching from an unreliable source (fails twice)...");
    let payload = executor.execute(|| source.fetch())?;

    println!("\nResult: {payload}");
    println!("Total attempts: {}", source.total_attempts());

    Ok(())
}

/// Example 2: only timeout-kind failures are worth retrying
fn example_selective_retry() {
    println!("\n=== Example 2: Selective Retry (timeouts only) ===\n");

    let mut executor = RetryExecutor::new(
        RetryPolicy::new()
            .with_max_retries(5)
            .with_delay(Duration::from_secs(1))
            .retry_on_kind(ErrorKind::TIMEOUT),
    );

    println!("Test 1: permission error (should NOT retry)");
    let result = executor.execute(|| {
        Err::<(), _>(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "access denied",
        ))
    });
    match result {
        Err(RetryError::Fatal(err)) => println!("  gave up immediately: {err}"),
        other => println!("  unexpected outcome: {other:?}"),
    }

    println!("\nTest 2: timeout error (should retry until exhaustion)");
    let attempts = AtomicU32::new(0);
    let result: Result<(), _> = executor.execute(|| {
        attempts.fetch_add(1, Ordering::SeqCst);
        Err(std::io::Error::new(std::io::ErrorKind::TimedOut, "slow mirror"))
    });
    match result {
        Err(err) if err.is_exhausted() => {
            println!("  exhausted after {} attempts: {err}", attempts.load(Ordering::SeqCst));
        }
        other => println!("  unexpected outcome: {other:?}"),
    }
}

/// Example 3: out-of-range policies are rejected before any work runs
fn example_validation() {
    println!("\n=== Example 3: Policy Validation ===\n");

    let result = retry(RetryPolicy::new().with_max_retries(0), || {
        println!("  this work never runs");
        Ok::<_, std::io::Error>(())
    });

    match result {
        Err(RetryError::Config(err)) => println!("rejected up front: {err}"),
        other => println!("unexpected outcome: {other:?}"),
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    // Surface the executor's progress notifications.
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    example_simple_retry()?;
    example_selective_retry();
    example_validation();

    println!("\nAll examples completed.");
    Ok(())
}
