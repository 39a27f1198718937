//! Wait engine: polls conditions under an interval/timeout policy.
//!
//! Each wait is one strictly sequential retry loop: evaluate, and on
//! `false` suspend for the configured interval before trying again.
//! Concurrency across waits comes from running them on separate tasks;
//! the sleep is a genuine suspension point, never a busy spin.
//!
//! The policy is a fixed interval with a hard timeout, no backoff. The
//! first `true` returns immediately (an immediately-true condition incurs
//! zero sleeps). A condition that stays `false` past the timeout fails
//! with [`EsperarError::Timeout`] carrying the condition description,
//! elapsed time and the last observed value. Evaluation errors are not
//! retried as if they were `false`; they abort the wait on the poll where
//! they occur. Cancellation takes effect at the next poll boundary and
//! yields [`EsperarError::Cancelled`], distinct from a timeout.

use crate::condition::{Condition, FnCondition, ScriptCondition};
use crate::context::current_session;
use crate::result::{EsperarError, EsperarResult};
use crate::session::{NullSession, Session};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Notify;
use tokio::time::{sleep, Instant};
use tracing::{debug, trace, warn};

/// Default timeout for wait operations (30 seconds)
pub const DEFAULT_WAIT_TIMEOUT_MS: u64 = 30_000;

/// Default polling interval (50ms)
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 50;

// =============================================================================
// CANCELLATION
// =============================================================================

#[derive(Debug, Default)]
struct CancelInner {
    cancelled: AtomicBool,
    notify: Notify,
}

/// Cloneable handle for aborting a wait.
///
/// Cancellation is observed at poll boundaries, never mid-evaluation.
/// `cancel` is idempotent.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    inner: Arc<CancelInner>,
}

impl CancelToken {
    /// Create a new, uncancelled token
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation of every wait holding a clone of this token
    pub fn cancel(&self) {
        self.inner.cancelled.store(true, Ordering::Release);
        self.inner.notify.notify_waiters();
    }

    /// Whether cancellation has been requested
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.inner.cancelled.load(Ordering::Acquire)
    }

    /// Resolves once cancellation has been requested
    pub async fn cancelled(&self) {
        loop {
            if self.is_cancelled() {
                return;
            }
            let notified = self.inner.notify.notified();
            // Re-check after registering, so a cancel racing the
            // registration is not missed
            if self.is_cancelled() {
                return;
            }
            notified.await;
        }
    }
}

// =============================================================================
// WAIT OPTIONS
// =============================================================================

/// Options for wait operations
#[derive(Debug, Clone)]
pub struct WaitOptions {
    /// Timeout in milliseconds
    pub timeout_ms: u64,
    /// Polling interval in milliseconds
    pub poll_interval_ms: u64,
    /// Evaluate remotely (one `run_script` round trip per poll) when the
    /// condition is script-capable
    pub prefer_remote: bool,
    /// Optional cancellation token
    pub cancel: Option<CancelToken>,
}

impl Default for WaitOptions {
    fn default() -> Self {
        Self {
            timeout_ms: DEFAULT_WAIT_TIMEOUT_MS,
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
            prefer_remote: false,
            cancel: None,
        }
    }
}

impl WaitOptions {
    /// Create new wait options with defaults
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set timeout in milliseconds
    #[must_use]
    pub const fn with_timeout(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    /// Set polling interval in milliseconds
    #[must_use]
    pub const fn with_poll_interval(mut self, poll_interval_ms: u64) -> Self {
        self.poll_interval_ms = poll_interval_ms;
        self
    }

    /// Prefer remote evaluation for script-capable conditions
    #[must_use]
    pub const fn with_prefer_remote(mut self, prefer_remote: bool) -> Self {
        self.prefer_remote = prefer_remote;
        self
    }

    /// Attach a cancellation token
    #[must_use]
    pub fn with_cancel(mut self, token: CancelToken) -> Self {
        self.cancel = Some(token);
        self
    }

    /// Get timeout as Duration
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Get poll interval as Duration
    #[must_use]
    pub const fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

// =============================================================================
// WAIT RESULT
// =============================================================================

/// Outcome of a satisfied wait
#[derive(Debug, Clone)]
pub struct WaitResult {
    /// Time spent waiting
    pub elapsed: Duration,
    /// Number of evaluations performed
    pub polls: u32,
    /// Description of the satisfied condition
    pub description: String,
}

// =============================================================================
// WAITER
// =============================================================================

/// Drives repeated evaluation of conditions against a deadline/interval
/// policy.
#[derive(Debug, Clone, Default)]
pub struct Waiter {
    options: WaitOptions,
}

impl Waiter {
    /// Create a waiter with default options
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with custom options
    #[must_use]
    pub fn with_options(options: WaitOptions) -> Self {
        Self { options }
    }

    /// The options this waiter polls with
    #[must_use]
    pub fn options(&self) -> &WaitOptions {
        &self.options
    }

    /// Poll a condition locally until it is true, times out, errors or is
    /// cancelled.
    pub async fn wait_for<C>(
        &self,
        session: &dyn Session,
        condition: &C,
    ) -> EsperarResult<WaitResult>
    where
        C: Condition + ?Sized,
    {
        let start = Instant::now();
        let description = condition.description();
        let mut polls: u32 = 0;

        loop {
            if self.cancel_requested() {
                return Err(self.cancelled_error(start, polls));
            }
            if start.elapsed() >= self.options.timeout() {
                let last_observed = condition.observed(session).await;
                warn!(condition = %description, polls, "wait timed out");
                return Err(EsperarError::Timeout {
                    elapsed_ms: elapsed_ms(start),
                    polls,
                    description,
                    last_observed,
                });
            }
            polls += 1;
            if condition.evaluate(session).await? {
                debug!(condition = %description, polls, "condition satisfied");
                return Ok(WaitResult {
                    elapsed: start.elapsed(),
                    polls,
                    description,
                });
            }
            trace!(condition = %description, polls, "condition not yet satisfied");
            if self.sleep_or_cancel().await {
                return Err(self.cancelled_error(start, polls));
            }
        }
    }

    /// Poll a script-capable condition, shipping its remote expression into
    /// the runtime when `prefer_remote` is set.
    ///
    /// The expression is generated once, before the loop, so a missing
    /// parameter surfaces immediately. Without `prefer_remote` this is the
    /// local loop of [`Waiter::wait_for`].
    pub async fn wait_for_script<C>(
        &self,
        session: &dyn Session,
        condition: &C,
    ) -> EsperarResult<WaitResult>
    where
        C: ScriptCondition + ?Sized,
    {
        if !self.options.prefer_remote {
            return self.wait_for(session, condition).await;
        }

        let expression = condition.to_remote_expression()?;
        let start = Instant::now();
        let description = condition.description();
        let mut polls: u32 = 0;

        loop {
            if self.cancel_requested() {
                return Err(self.cancelled_error(start, polls));
            }
            if start.elapsed() >= self.options.timeout() {
                let last_observed = condition.observed(session).await;
                warn!(condition = %description, polls, "remote wait timed out");
                return Err(EsperarError::Timeout {
                    elapsed_ms: elapsed_ms(start),
                    polls,
                    description,
                    last_observed,
                });
            }
            polls += 1;
            if session.run_script(expression.as_str()).await? {
                debug!(condition = %description, polls, "remote condition satisfied");
                return Ok(WaitResult {
                    elapsed: start.elapsed(),
                    polls,
                    description,
                });
            }
            trace!(condition = %description, polls, "remote condition not yet satisfied");
            if self.sleep_or_cancel().await {
                return Err(self.cancelled_error(start, polls));
            }
        }
    }

    /// Poll a condition against the session bound to the current task.
    ///
    /// Fails with [`EsperarError::NoActiveSession`] outside a
    /// [`crate::with_session`] scope.
    pub async fn wait_in_context<C>(&self, condition: &C) -> EsperarResult<WaitResult>
    where
        C: Condition + ?Sized,
    {
        let session = current_session()?;
        self.wait_for(session.as_ref(), condition).await
    }

    fn cancel_requested(&self) -> bool {
        self.options
            .cancel
            .as_ref()
            .is_some_and(CancelToken::is_cancelled)
    }

    fn cancelled_error(&self, start: Instant, polls: u32) -> EsperarError {
        warn!(polls, "wait cancelled");
        EsperarError::Cancelled {
            elapsed_ms: elapsed_ms(start),
            polls,
        }
    }

    /// Suspend for one interval; true if cancellation arrived first
    async fn sleep_or_cancel(&self) -> bool {
        let interval = self.options.poll_interval();
        match &self.options.cancel {
            Some(token) => {
                tokio::select! {
                    () = sleep(interval) => false,
                    () = token.cancelled() => true,
                }
            }
            None => {
                sleep(interval).await;
                false
            }
        }
    }
}

fn elapsed_ms(start: Instant) -> u64 {
    start.elapsed().as_millis() as u64
}

// =============================================================================
// CONVENIENCE FUNCTIONS
// =============================================================================

/// Wait for a closure to return true, with the default poll interval.
///
/// The closure never sees a session; use [`Waiter`] for page conditions.
pub async fn wait_until<F>(predicate: F, timeout_ms: u64) -> EsperarResult<()>
where
    F: Fn() -> bool + Send + Sync,
{
    let waiter = Waiter::with_options(WaitOptions::new().with_timeout(timeout_ms));
    let condition = FnCondition::new(predicate, "custom function");
    waiter.wait_for(&NullSession, &condition).await?;
    Ok(())
}
