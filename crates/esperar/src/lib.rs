//! Esperar: condition + wait engine for browser test synchronization.
//!
//! Esperar (Spanish: "to wait") lets test code express a condition about
//! page state (e.g. "element X has text Y") and poll it under an
//! interval/timeout policy, either by evaluating locally against a live
//! session or by shipping an equivalent script expression into the target
//! runtime so one round trip covers each check.
//!
//! # Architecture
//!
//! ```text
//! ┌────────────┐    ┌──────────────┐    ┌───────────────────┐
//! │ Condition  │───►│ Wait Engine  │───►│ Session           │
//! │ (template) │    │ (poll loop)  │    │ (resolve / text / │
//! │            │    │              │    │  run_script)      │
//! └────────────┘    └──────────────┘    └───────────────────┘
//! ```
//!
//! Conditions are immutable templates built copy-on-write and safely
//! shared across polling cycles and tasks. The session collaborator is a
//! trait — browser bootstrapping and protocol plumbing live elsewhere.
//!
//! # Example
//!
//! ```
//! use esperar::{FakeSession, TextEquals, WaitOptions, Waiter};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> esperar::EsperarResult<()> {
//! let session = FakeSession::new();
//! session.set_text("#status", "Done");
//!
//! let condition = TextEquals::new().locator("#status").text("Done");
//! let waiter = Waiter::with_options(WaitOptions::new().with_timeout(1000));
//! let result = waiter.wait_for(&session, &condition).await?;
//! assert_eq!(result.polls, 1);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod condition;
mod context;
mod locator;
mod result;
mod script;
mod session;
mod wait;

pub use condition::{
    AllOf, AnyOf, Condition, ElementPresent, FnCondition, Not, ScriptCondition, TextContains,
    TextEquals,
};
pub use context::{current_session, with_session};
pub use locator::Locator;
pub use result::{EsperarError, EsperarResult};
pub use script::{js_string, JsExpression};
pub use session::{ElementHandle, FakeSession, NullSession, Session};
pub use wait::{
    wait_until, CancelToken, WaitOptions, WaitResult, Waiter, DEFAULT_POLL_INTERVAL_MS,
    DEFAULT_WAIT_TIMEOUT_MS,
};
