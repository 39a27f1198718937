//! Result and error types for Esperar.

use thiserror::Error;

/// Result type for Esperar operations
pub type EsperarResult<T> = Result<T, EsperarError>;

/// Errors that can occur in Esperar
#[derive(Debug, Error)]
pub enum EsperarError {
    /// A condition was evaluated before a required builder parameter was set.
    ///
    /// Programmer error: surfaced immediately, never retried by the wait
    /// engine.
    #[error("{condition}: required parameter `{parameter}` is not set")]
    MissingParameter {
        /// Condition type name
        condition: String,
        /// Name of the unset parameter
        parameter: String,
    },

    /// No session is bound to the current task.
    #[error("no active session is bound to the current task")]
    NoActiveSession,

    /// A wait ran out of time before its condition became true.
    #[error(
        "wait for {description} timed out after {elapsed_ms}ms ({polls} polls); last observed: {last}",
        last = .last_observed.as_deref().unwrap_or("<nothing>")
    )]
    Timeout {
        /// Elapsed wall-clock time in milliseconds
        elapsed_ms: u64,
        /// Number of evaluations performed
        polls: u32,
        /// Description of the condition that never became true
        description: String,
        /// Last value the condition observed, when it can report one
        last_observed: Option<String>,
    },

    /// A wait was aborted by its cancel token.
    #[error("wait cancelled after {elapsed_ms}ms ({polls} polls)")]
    Cancelled {
        /// Elapsed wall-clock time in milliseconds
        elapsed_ms: u64,
        /// Number of evaluations performed before cancellation
        polls: u32,
    },

    /// The session could not resolve a locator to an element.
    #[error("no element found for locator `{locator}`")]
    ElementNotFound {
        /// The locator that failed to resolve
        locator: String,
    },

    /// Remote evaluation failed inside the target runtime.
    #[error("script evaluation failed: {message}")]
    Script {
        /// Error message from the runtime
        message: String,
    },

    /// Transport or session-level failure.
    #[error("session error: {message}")]
    Session {
        /// Error message
        message: String,
    },
}
