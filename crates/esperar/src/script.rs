//! Remote-expression values shipped into the target runtime.
//!
//! A remote-capable condition translates itself into a boolean JavaScript
//! expression so a single `run_script` round trip replaces a
//! read-then-compare pair. The expression must agree with the condition's
//! local evaluation for every parameter value, which makes quoting the
//! load-bearing part of this module: all dynamic values go through
//! [`js_string`].

use std::fmt;

/// A boolean JavaScript expression for the target runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsExpression(String);

impl JsExpression {
    /// Create an expression from raw JavaScript
    #[must_use]
    pub fn new(expr: impl Into<String>) -> Self {
        Self(expr.into())
    }

    /// Get the expression source
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume into the expression source
    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }

    /// Conjoin with another expression using JavaScript `&&`.
    ///
    /// Both operands are parenthesized so member precedence never leaks
    /// into the composite.
    #[must_use]
    pub fn and(self, other: &Self) -> Self {
        Self(format!("({}) && ({})", self.0, other.0))
    }

    /// Disjoin with another expression using JavaScript `||`
    #[must_use]
    pub fn or(self, other: &Self) -> Self {
        Self(format!("({}) || ({})", self.0, other.0))
    }

    /// Negate with JavaScript `!`
    #[must_use]
    pub fn negate(self) -> Self {
        Self(format!("!({})", self.0))
    }
}

impl fmt::Display for JsExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Quote a dynamic value as a JavaScript string literal.
///
/// JSON string syntax is a subset of JavaScript expression syntax, so the
/// JSON rendering doubles as the JS literal. Embedded quotes, backslashes
/// and control characters all survive the trip.
#[must_use]
pub fn js_string(value: &str) -> String {
    serde_json::Value::String(value.to_owned()).to_string()
}
