//! Session collaborator contracts.
//!
//! The condition and wait engine never speaks a browser protocol itself.
//! It consumes exactly three collaborator operations, defined by the
//! [`Session`] trait: resolve a locator to an element handle, read an
//! element's text, and run a boolean script expression inside the target
//! runtime. Session bootstrapping and protocol plumbing live in
//! integration code, out of scope here.
//!
//! [`FakeSession`] is a deterministic in-memory implementation for testing
//! conditions and waits without a browser.

use crate::locator::Locator;
use crate::result::{EsperarError, EsperarResult};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

/// Opaque handle to a resolved element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementHandle {
    id: String,
}

impl ElementHandle {
    /// Create a handle from a session-assigned identifier
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }

    /// Get the session-assigned identifier
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }
}

/// The three collaborator operations the engine consumes.
#[async_trait]
pub trait Session: Send + Sync {
    /// Resolve a locator to a live element handle.
    ///
    /// Fails with [`EsperarError::ElementNotFound`] when nothing matches.
    async fn resolve_element(&self, locator: &Locator) -> EsperarResult<ElementHandle>;

    /// Read the visible text of a resolved element
    async fn read_text(&self, element: &ElementHandle) -> EsperarResult<String>;

    /// Run a boolean expression inside the target runtime
    async fn run_script(&self, expression: &str) -> EsperarResult<bool>;
}

// ============================================================================
// In-memory fake (deterministic, no browser required)
// ============================================================================

#[derive(Debug, Default)]
struct FakeState {
    texts: HashMap<String, String>,
    scripts: HashMap<String, bool>,
    executed: Vec<String>,
    reads: u32,
}

/// In-memory [`Session`] for testing conditions and waits.
///
/// Elements are `locator string -> text` entries; scripts are looked up in
/// a scripted `expression -> bool` table, and every executed expression is
/// recorded. Tests mutate the page through `&self` so a wait can race a
/// state change on another task.
#[derive(Debug, Default)]
pub struct FakeSession {
    state: Mutex<FakeState>,
}

impl FakeSession {
    /// Create an empty fake session
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace an element's text
    pub fn set_text(&self, locator: impl Into<String>, text: impl Into<String>) {
        self.lock().texts.insert(locator.into(), text.into());
    }

    /// Remove an element, making its locator unresolvable
    pub fn remove_element(&self, locator: &str) {
        self.lock().texts.remove(locator);
    }

    /// Script the result of a remote expression
    pub fn script_result(&self, expression: impl Into<String>, result: bool) {
        self.lock().scripts.insert(expression.into(), result);
    }

    /// Every expression executed so far, in order
    #[must_use]
    pub fn executed_scripts(&self) -> Vec<String> {
        self.lock().executed.clone()
    }

    /// Number of `read_text` calls performed (for short-circuit assertions)
    #[must_use]
    pub fn reads(&self) -> u32 {
        self.lock().reads
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, FakeState> {
        self.state.lock().expect("fake session state poisoned")
    }
}

#[async_trait]
impl Session for FakeSession {
    async fn resolve_element(&self, locator: &Locator) -> EsperarResult<ElementHandle> {
        let state = self.lock();
        if state.texts.contains_key(locator.as_str()) {
            Ok(ElementHandle::new(locator.as_str()))
        } else {
            Err(EsperarError::ElementNotFound {
                locator: locator.to_string(),
            })
        }
    }

    async fn read_text(&self, element: &ElementHandle) -> EsperarResult<String> {
        let mut state = self.lock();
        state.reads += 1;
        state
            .texts
            .get(element.id())
            .cloned()
            .ok_or_else(|| EsperarError::ElementNotFound {
                locator: element.id().to_string(),
            })
    }

    async fn run_script(&self, expression: &str) -> EsperarResult<bool> {
        let mut state = self.lock();
        state.executed.push(expression.to_string());
        state
            .scripts
            .get(expression)
            .copied()
            .ok_or_else(|| EsperarError::Script {
                message: format!("no scripted result for expression: {expression}"),
            })
    }
}

/// A session for purely local conditions.
///
/// Every collaborator call fails; useful with closure-backed conditions
/// that never touch the page.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSession;

#[async_trait]
impl Session for NullSession {
    async fn resolve_element(&self, locator: &Locator) -> EsperarResult<ElementHandle> {
        Err(EsperarError::Session {
            message: format!("null session cannot resolve `{locator}`"),
        })
    }

    async fn read_text(&self, _element: &ElementHandle) -> EsperarResult<String> {
        Err(EsperarError::Session {
            message: "null session has no elements".into(),
        })
    }

    async fn run_script(&self, _expression: &str) -> EsperarResult<bool> {
        Err(EsperarError::Session {
            message: "null session has no runtime".into(),
        })
    }
}
