//! Task-scoped session binding.
//!
//! Lets a wait run without threading a session handle through every call.
//! The binding is task-local storage, never a process global: concurrent
//! tests cannot observe each other's sessions. Explicit session passing on
//! the engine remains the primary API; this registry is a convenience for
//! the `wait_in_context` entry point.
//!
//! The binding is looked up once per evaluation and never cached inside a
//! condition, so a template built before any session exists is reusable
//! after one is bound.

use crate::result::{EsperarError, EsperarResult};
use crate::session::Session;
use std::future::Future;
use std::sync::Arc;

tokio::task_local! {
    static CURRENT_SESSION: Arc<dyn Session>;
}

/// Run `future` with `session` bound as the current task's active session.
///
/// The binding lives exactly as long as the future; nesting rebinds for the
/// inner scope only.
pub async fn with_session<F>(session: Arc<dyn Session>, future: F) -> F::Output
where
    F: Future,
{
    CURRENT_SESSION.scope(session, future).await
}

/// Resolve the session bound to the current task.
///
/// Fails with [`EsperarError::NoActiveSession`] when called outside a
/// [`with_session`] scope.
pub fn current_session() -> EsperarResult<Arc<dyn Session>> {
    CURRENT_SESSION
        .try_with(|session| Arc::clone(session))
        .map_err(|_| EsperarError::NoActiveSession)
}
