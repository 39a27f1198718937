//! Opaque element locators.
//!
//! A [`Locator`] is owned by the caller and passed by reference into
//! conditions; this crate never parses or mutates it. Resolution to a live
//! element is the session collaborator's job.

use serde::{Deserialize, Serialize};
use std::fmt;

/// An opaque reference to "where in the page to look".
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Locator(String);

impl Locator {
    /// Create a locator from a raw selector string
    #[must_use]
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Get the raw selector string
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Locator {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl From<String> for Locator {
    fn from(raw: String) -> Self {
        Self(raw)
    }
}
