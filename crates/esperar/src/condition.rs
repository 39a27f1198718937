//! Conditions: reusable, parameterized boolean checks on page state.
//!
//! Two independent capabilities, per trait:
//!
//! - [`Condition`]: evaluate locally against a session (one or more
//!   collaborator round trips).
//! - [`ScriptCondition`]: additionally translate into a [`JsExpression`]
//!   the target runtime can evaluate in a single round trip. The remote
//!   translation is contractually equivalent to the local path for every
//!   parameter value, including embedded quote characters.
//!
//! Built-in conditions are immutable templates built copy-on-write: the
//! no-arg constructor yields an empty template, every setter returns a new
//! value and never mutates the receiver, and evaluation fails with
//! [`EsperarError::MissingParameter`] while a required parameter is unset.
//! A template can therefore be shared across polling cycles and tasks
//! without aliasing bugs.
//!
//! Remote expressions address the page through two accessors the session's
//! runtime glue installs before polling: `__esperar_find(selector)`
//! returning an element or `null`, and `__esperar_text(selector)` returning
//! the element's visible text.

use crate::locator::Locator;
use crate::result::{EsperarError, EsperarResult};
use crate::script::{js_string, JsExpression};
use crate::session::Session;
use async_trait::async_trait;
use std::fmt;
use std::sync::Arc;

/// A boolean check evaluated locally against a session.
#[async_trait]
pub trait Condition: Send + Sync {
    /// Evaluate the condition against a session.
    ///
    /// `false` means "not yet"; errors mean the condition could not even
    /// be checked and abort any surrounding wait.
    async fn evaluate(&self, session: &dyn Session) -> EsperarResult<bool>;

    /// Human-readable description for wait diagnostics
    fn description(&self) -> String;

    /// Last-observed value for timeout messages, when the condition can
    /// report one. Lookup failures degrade to `None`.
    async fn observed(&self, _session: &dyn Session) -> Option<String> {
        None
    }
}

/// Capability of a condition to run inside the target runtime.
pub trait ScriptCondition: Condition {
    /// Translate the condition into an equivalent boolean expression.
    ///
    /// Fails with [`EsperarError::MissingParameter`] exactly when local
    /// evaluation would.
    fn to_remote_expression(&self) -> EsperarResult<JsExpression>;
}

fn require<'a, T>(
    condition: &str,
    parameter: &str,
    value: &'a Option<T>,
) -> EsperarResult<&'a T> {
    value.as_ref().ok_or_else(|| EsperarError::MissingParameter {
        condition: condition.to_string(),
        parameter: parameter.to_string(),
    })
}

fn param_or_unset<T: fmt::Display>(value: Option<&T>) -> String {
    value.map_or_else(|| "<unset>".to_string(), ToString::to_string)
}

// ============================================================================
// TextEquals
// ============================================================================

/// Element text is exactly equal to an expected string.
#[derive(Debug, Clone, Default)]
pub struct TextEquals {
    locator: Option<Locator>,
    text: Option<String>,
}

impl TextEquals {
    /// Create an empty template
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of this template with the locator set; the receiver is unchanged
    #[must_use]
    pub fn locator(&self, locator: impl Into<Locator>) -> Self {
        Self {
            locator: Some(locator.into()),
            text: self.text.clone(),
        }
    }

    /// Copy of this template with the expected text set
    #[must_use]
    pub fn text(&self, text: impl Into<String>) -> Self {
        Self {
            locator: self.locator.clone(),
            text: Some(text.into()),
        }
    }
}

#[async_trait]
impl Condition for TextEquals {
    async fn evaluate(&self, session: &dyn Session) -> EsperarResult<bool> {
        let locator = require("TextEquals", "locator", &self.locator)?;
        let text = require("TextEquals", "text", &self.text)?;
        let element = session.resolve_element(locator).await?;
        Ok(session.read_text(&element).await? == *text)
    }

    fn description(&self) -> String {
        format!(
            "text of `{}` equals \"{}\"",
            param_or_unset(self.locator.as_ref()),
            param_or_unset(self.text.as_ref())
        )
    }

    async fn observed(&self, session: &dyn Session) -> Option<String> {
        let locator = self.locator.as_ref()?;
        let element = session.resolve_element(locator).await.ok()?;
        session.read_text(&element).await.ok()
    }
}

impl ScriptCondition for TextEquals {
    fn to_remote_expression(&self) -> EsperarResult<JsExpression> {
        let locator = require("TextEquals", "locator", &self.locator)?;
        let text = require("TextEquals", "text", &self.text)?;
        Ok(JsExpression::new(format!(
            "__esperar_text({}) === {}",
            js_string(locator.as_str()),
            js_string(text)
        )))
    }
}

// ============================================================================
// TextContains
// ============================================================================

/// Element text contains an expected substring.
#[derive(Debug, Clone, Default)]
pub struct TextContains {
    locator: Option<Locator>,
    text: Option<String>,
}

impl TextContains {
    /// Create an empty template
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of this template with the locator set
    #[must_use]
    pub fn locator(&self, locator: impl Into<Locator>) -> Self {
        Self {
            locator: Some(locator.into()),
            text: self.text.clone(),
        }
    }

    /// Copy of this template with the expected substring set
    #[must_use]
    pub fn text(&self, text: impl Into<String>) -> Self {
        Self {
            locator: self.locator.clone(),
            text: Some(text.into()),
        }
    }
}

#[async_trait]
impl Condition for TextContains {
    async fn evaluate(&self, session: &dyn Session) -> EsperarResult<bool> {
        let locator = require("TextContains", "locator", &self.locator)?;
        let text = require("TextContains", "text", &self.text)?;
        let element = session.resolve_element(locator).await?;
        Ok(session.read_text(&element).await?.contains(text.as_str()))
    }

    fn description(&self) -> String {
        format!(
            "text of `{}` contains \"{}\"",
            param_or_unset(self.locator.as_ref()),
            param_or_unset(self.text.as_ref())
        )
    }

    async fn observed(&self, session: &dyn Session) -> Option<String> {
        let locator = self.locator.as_ref()?;
        let element = session.resolve_element(locator).await.ok()?;
        session.read_text(&element).await.ok()
    }
}

impl ScriptCondition for TextContains {
    fn to_remote_expression(&self) -> EsperarResult<JsExpression> {
        let locator = require("TextContains", "locator", &self.locator)?;
        let text = require("TextContains", "text", &self.text)?;
        Ok(JsExpression::new(format!(
            "__esperar_text({}).includes({})",
            js_string(locator.as_str()),
            js_string(text)
        )))
    }
}

// ============================================================================
// ElementPresent
// ============================================================================

/// A locator resolves to an element.
///
/// This is the one condition for which a failed resolution is the answer
/// `false` rather than an error; any other session failure still aborts.
#[derive(Debug, Clone, Default)]
pub struct ElementPresent {
    locator: Option<Locator>,
}

impl ElementPresent {
    /// Create an empty template
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of this template with the locator set
    #[must_use]
    pub fn locator(&self, locator: impl Into<Locator>) -> Self {
        Self {
            locator: Some(locator.into()),
        }
    }
}

#[async_trait]
impl Condition for ElementPresent {
    async fn evaluate(&self, session: &dyn Session) -> EsperarResult<bool> {
        let locator = require("ElementPresent", "locator", &self.locator)?;
        match session.resolve_element(locator).await {
            Ok(_) => Ok(true),
            Err(EsperarError::ElementNotFound { .. }) => Ok(false),
            Err(other) => Err(other),
        }
    }

    fn description(&self) -> String {
        format!("element `{}` is present", param_or_unset(self.locator.as_ref()))
    }

    async fn observed(&self, session: &dyn Session) -> Option<String> {
        let locator = self.locator.as_ref()?;
        match session.resolve_element(locator).await {
            Ok(_) => Some("present".to_string()),
            Err(EsperarError::ElementNotFound { .. }) => Some("absent".to_string()),
            Err(_) => None,
        }
    }
}

impl ScriptCondition for ElementPresent {
    fn to_remote_expression(&self) -> EsperarResult<JsExpression> {
        let locator = require("ElementPresent", "locator", &self.locator)?;
        Ok(JsExpression::new(format!(
            "__esperar_find({}) !== null",
            js_string(locator.as_str())
        )))
    }
}

// ============================================================================
// Combinators
// ============================================================================

/// Logical negation of an inner condition.
#[derive(Debug, Clone)]
pub struct Not<C> {
    inner: C,
}

impl<C> Not<C> {
    /// Wrap a condition
    #[must_use]
    pub fn new(inner: C) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl<C: Condition> Condition for Not<C> {
    async fn evaluate(&self, session: &dyn Session) -> EsperarResult<bool> {
        Ok(!self.inner.evaluate(session).await?)
    }

    fn description(&self) -> String {
        format!("not ({})", self.inner.description())
    }

    async fn observed(&self, session: &dyn Session) -> Option<String> {
        self.inner.observed(session).await
    }
}

impl<C: ScriptCondition> ScriptCondition for Not<C> {
    fn to_remote_expression(&self) -> EsperarResult<JsExpression> {
        Ok(self.inner.to_remote_expression()?.negate())
    }
}

/// Logical AND over script-capable conditions.
///
/// Local evaluation short-circuits on the first `false`; the remote
/// translation joins member expressions with `&&` so one round trip covers
/// the whole composite. An empty composite is vacuously true.
#[derive(Clone, Default)]
pub struct AllOf {
    members: Vec<Arc<dyn ScriptCondition>>,
}

impl AllOf {
    /// Create an empty composite
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Composite extended with one more member
    #[must_use]
    pub fn with(mut self, condition: impl ScriptCondition + 'static) -> Self {
        self.members.push(Arc::new(condition));
        self
    }
}

impl fmt::Debug for AllOf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AllOf")
            .field(
                "members",
                &self.members.iter().map(|m| m.description()).collect::<Vec<_>>(),
            )
            .finish()
    }
}

#[async_trait]
impl Condition for AllOf {
    async fn evaluate(&self, session: &dyn Session) -> EsperarResult<bool> {
        for member in &self.members {
            if !member.evaluate(session).await? {
                return Ok(false);
            }
        }
        Ok(true)
    }

    fn description(&self) -> String {
        let parts: Vec<String> = self.members.iter().map(|m| m.description()).collect();
        format!("all of [{}]", parts.join("; "))
    }
}

impl ScriptCondition for AllOf {
    fn to_remote_expression(&self) -> EsperarResult<JsExpression> {
        let mut members = self.members.iter();
        let Some(first) = members.next() else {
            return Ok(JsExpression::new("true"));
        };
        let mut expr = first.to_remote_expression()?;
        for member in members {
            expr = expr.and(&member.to_remote_expression()?);
        }
        Ok(expr)
    }
}

/// Logical OR over script-capable conditions.
///
/// Local evaluation short-circuits on the first `true`; the remote
/// translation joins member expressions with `||`. An empty composite is
/// false.
#[derive(Clone, Default)]
pub struct AnyOf {
    members: Vec<Arc<dyn ScriptCondition>>,
}

impl AnyOf {
    /// Create an empty composite
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Composite extended with one more member
    #[must_use]
    pub fn with(mut self, condition: impl ScriptCondition + 'static) -> Self {
        self.members.push(Arc::new(condition));
        self
    }
}

impl fmt::Debug for AnyOf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnyOf")
            .field(
                "members",
                &self.members.iter().map(|m| m.description()).collect::<Vec<_>>(),
            )
            .finish()
    }
}

#[async_trait]
impl Condition for AnyOf {
    async fn evaluate(&self, session: &dyn Session) -> EsperarResult<bool> {
        for member in &self.members {
            if member.evaluate(session).await? {
                return Ok(true);
            }
        }
        Ok(false)
    }

    fn description(&self) -> String {
        let parts: Vec<String> = self.members.iter().map(|m| m.description()).collect();
        format!("any of [{}]", parts.join("; "))
    }
}

impl ScriptCondition for AnyOf {
    fn to_remote_expression(&self) -> EsperarResult<JsExpression> {
        let mut members = self.members.iter();
        let Some(first) = members.next() else {
            return Ok(JsExpression::new("false"));
        };
        let mut expr = first.to_remote_expression()?;
        for member in members {
            expr = expr.or(&member.to_remote_expression()?);
        }
        Ok(expr)
    }
}

// ============================================================================
// Closure-backed condition (local-only)
// ============================================================================

/// A function-based condition.
///
/// Implements [`Condition`] but not [`ScriptCondition`]: an arbitrary
/// closure has no remote translation.
pub struct FnCondition<F: Fn() -> bool + Send + Sync> {
    func: F,
    description: String,
}

impl<F: Fn() -> bool + Send + Sync> fmt::Debug for FnCondition<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnCondition")
            .field("description", &self.description)
            .finish_non_exhaustive()
    }
}

impl<F: Fn() -> bool + Send + Sync> FnCondition<F> {
    /// Create a new function condition
    pub fn new(func: F, description: impl Into<String>) -> Self {
        Self {
            func,
            description: description.into(),
        }
    }
}

#[async_trait]
impl<F: Fn() -> bool + Send + Sync> Condition for FnCondition<F> {
    async fn evaluate(&self, _session: &dyn Session) -> EsperarResult<bool> {
        Ok((self.func)())
    }

    fn description(&self) -> String {
        self.description.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::FakeSession;

    fn page_with(locator: &str, text: &str) -> FakeSession {
        let session = FakeSession::new();
        session.set_text(locator, text);
        session
    }

    // =========================================================================
    // Builder copy-on-write
    // =========================================================================

    mod builder_tests {
        use super::*;

        #[tokio::test]
        async fn test_setters_never_mutate_receiver() {
            let template = TextEquals::new().locator("#status");
            let done = template.text("Done");
            let pending = template.text("Pending");

            let session = page_with("#status", "Done");
            assert!(done.evaluate(&session).await.unwrap());
            assert!(!pending.evaluate(&session).await.unwrap());
            // The shared template is still incomplete
            assert!(matches!(
                template.evaluate(&session).await,
                Err(EsperarError::MissingParameter { ref parameter, .. }) if parameter == "text"
            ));
        }

        #[tokio::test]
        async fn test_template_reusable_across_sessions() {
            let condition = TextEquals::new().locator("#status").text("Done");
            let first = page_with("#status", "Done");
            let second = page_with("#status", "Pending");
            assert!(condition.evaluate(&first).await.unwrap());
            assert!(!condition.evaluate(&second).await.unwrap());
        }

        #[tokio::test]
        async fn test_missing_parameter_combinations() {
            let session = page_with("#status", "Done");

            let empty = TextEquals::new();
            assert!(matches!(
                empty.evaluate(&session).await,
                Err(EsperarError::MissingParameter { .. })
            ));

            let only_locator = TextEquals::new().locator("#status");
            assert!(matches!(
                only_locator.evaluate(&session).await,
                Err(EsperarError::MissingParameter { ref parameter, .. }) if parameter == "text"
            ));

            let only_text = TextEquals::new().text("Done");
            assert!(matches!(
                only_text.evaluate(&session).await,
                Err(EsperarError::MissingParameter { ref parameter, .. }) if parameter == "locator"
            ));

            let complete = TextEquals::new().locator("#status").text("Done");
            assert!(complete.evaluate(&session).await.unwrap());
        }

        #[tokio::test]
        async fn test_remote_expression_fails_fast_on_missing_parameter() {
            let incomplete = TextEquals::new().locator("#status");
            assert!(matches!(
                incomplete.to_remote_expression(),
                Err(EsperarError::MissingParameter { ref parameter, .. }) if parameter == "text"
            ));
            assert!(matches!(
                ElementPresent::new().to_remote_expression(),
                Err(EsperarError::MissingParameter { ref parameter, .. }) if parameter == "locator"
            ));
        }
    }

    // =========================================================================
    // TextEquals
    // =========================================================================

    mod text_equals_tests {
        use super::*;

        #[tokio::test]
        async fn test_true_on_exact_match() {
            let session = page_with("#status", "Done");
            let condition = TextEquals::new().locator("#status").text("Done");
            assert!(condition.evaluate(&session).await.unwrap());
        }

        #[tokio::test]
        async fn test_false_on_other_text() {
            let session = page_with("#status", "Pending");
            let condition = TextEquals::new().locator("#status").text("Done");
            assert!(!condition.evaluate(&session).await.unwrap());
        }

        #[tokio::test]
        async fn test_exact_not_substring_semantics() {
            let session = page_with("#status", "Done and dusted");
            let condition = TextEquals::new().locator("#status").text("Done");
            assert!(!condition.evaluate(&session).await.unwrap());
        }

        #[tokio::test]
        async fn test_missing_element_is_an_error_not_false() {
            let session = FakeSession::new();
            let condition = TextEquals::new().locator("#status").text("Done");
            assert!(matches!(
                condition.evaluate(&session).await,
                Err(EsperarError::ElementNotFound { .. })
            ));
        }

        #[test]
        fn test_remote_expression_shape() {
            let condition = TextEquals::new().locator("#status").text("Done");
            assert_eq!(
                condition.to_remote_expression().unwrap().as_str(),
                "__esperar_text(\"#status\") === \"Done\""
            );
        }

        #[tokio::test]
        async fn test_local_and_remote_agree() {
            let condition = TextEquals::new().locator("#status").text("Done");
            let expression = condition.to_remote_expression().unwrap();
            // Page text paired with what the runtime would return for the
            // expression, stated independently of the local path
            let scenarios = [("Done", true), ("Pending", false), ("Done ", false)];
            for (page_text, remote_result) in scenarios {
                let session = page_with("#status", page_text);
                session.script_result(expression.as_str(), remote_result);
                let local = condition.evaluate(&session).await.unwrap();
                let remote = session.run_script(expression.as_str()).await.unwrap();
                assert_eq!(local, remote_result, "local path diverged for {page_text:?}");
                assert_eq!(remote, remote_result);
            }
        }

        #[tokio::test]
        async fn test_local_and_remote_agree_with_embedded_quotes() {
            let condition = TextEquals::new().locator("#quote").text("she said \"hi\"");
            let expression = condition.to_remote_expression().unwrap();
            let scenarios = [("she said \"hi\"", true), ("she said hi", false)];
            for (page_text, remote_result) in scenarios {
                let session = page_with("#quote", page_text);
                session.script_result(expression.as_str(), remote_result);
                let local = condition.evaluate(&session).await.unwrap();
                assert_eq!(local, remote_result, "local path diverged for {page_text:?}");
                assert_eq!(
                    session.run_script(expression.as_str()).await.unwrap(),
                    remote_result
                );
            }
        }

        #[test]
        fn test_remote_expression_escapes_quotes() {
            let condition = TextEquals::new()
                .locator("a[title=\"x\"]")
                .text("she said \"hi\"");
            let expr = condition.to_remote_expression().unwrap();
            assert_eq!(
                expr.as_str(),
                "__esperar_text(\"a[title=\\\"x\\\"]\") === \"she said \\\"hi\\\"\""
            );
        }

        #[tokio::test]
        async fn test_observed_reports_current_text() {
            let session = page_with("#status", "Pending");
            let condition = TextEquals::new().locator("#status").text("Done");
            assert_eq!(
                condition.observed(&session).await,
                Some("Pending".to_string())
            );
        }

        #[test]
        fn test_description() {
            let condition = TextEquals::new().locator("#status").text("Done");
            assert_eq!(condition.description(), "text of `#status` equals \"Done\"");
        }
    }

    // =========================================================================
    // TextContains
    // =========================================================================

    mod text_contains_tests {
        use super::*;

        #[tokio::test]
        async fn test_substring_match() {
            let session = page_with("#log", "build finished OK");
            let condition = TextContains::new().locator("#log").text("finished");
            assert!(condition.evaluate(&session).await.unwrap());
        }

        #[tokio::test]
        async fn test_no_match() {
            let session = page_with("#log", "build running");
            let condition = TextContains::new().locator("#log").text("finished");
            assert!(!condition.evaluate(&session).await.unwrap());
        }

        #[test]
        fn test_remote_expression_shape() {
            let condition = TextContains::new().locator("#log").text("finished");
            assert_eq!(
                condition.to_remote_expression().unwrap().as_str(),
                "__esperar_text(\"#log\").includes(\"finished\")"
            );
        }
    }

    // =========================================================================
    // ElementPresent
    // =========================================================================

    mod element_present_tests {
        use super::*;

        #[tokio::test]
        async fn test_present() {
            let session = page_with("#dialog", "");
            let condition = ElementPresent::new().locator("#dialog");
            assert!(condition.evaluate(&session).await.unwrap());
        }

        #[tokio::test]
        async fn test_absent_is_false_not_error() {
            let session = FakeSession::new();
            let condition = ElementPresent::new().locator("#dialog");
            assert!(!condition.evaluate(&session).await.unwrap());
        }

        #[test]
        fn test_remote_expression_shape() {
            let condition = ElementPresent::new().locator("#dialog");
            assert_eq!(
                condition.to_remote_expression().unwrap().as_str(),
                "__esperar_find(\"#dialog\") !== null"
            );
        }

        #[tokio::test]
        async fn test_observed_reports_presence() {
            let session = page_with("#dialog", "");
            let condition = ElementPresent::new().locator("#dialog");
            assert_eq!(condition.observed(&session).await, Some("present".into()));
            session.remove_element("#dialog");
            assert_eq!(condition.observed(&session).await, Some("absent".into()));
        }
    }

    // =========================================================================
    // Combinators
    // =========================================================================

    mod combinator_tests {
        use super::*;

        #[tokio::test]
        async fn test_not_inverts() {
            let session = page_with("#spinner", "");
            let condition = Not::new(ElementPresent::new().locator("#spinner"));
            assert!(!condition.evaluate(&session).await.unwrap());
            session.remove_element("#spinner");
            assert!(condition.evaluate(&session).await.unwrap());
        }

        #[test]
        fn test_not_remote_expression() {
            let condition = Not::new(ElementPresent::new().locator("#spinner"));
            assert_eq!(
                condition.to_remote_expression().unwrap().as_str(),
                "!(__esperar_find(\"#spinner\") !== null)"
            );
        }

        #[tokio::test]
        async fn test_all_of_two_false_members_never_true() {
            let session = page_with("#status", "Pending");
            let composite = AllOf::new()
                .with(TextEquals::new().locator("#status").text("Done"))
                .with(TextEquals::new().locator("#status").text("Finished"));
            assert!(!composite.evaluate(&session).await.unwrap());
        }

        #[tokio::test]
        async fn test_all_of_short_circuits_after_first_false() {
            let session = page_with("#status", "Pending");
            let composite = AllOf::new()
                .with(TextEquals::new().locator("#status").text("Done"))
                .with(TextEquals::new().locator("#status").text("Pending"));
            assert!(!composite.evaluate(&session).await.unwrap());
            // Only the first member read the element
            assert_eq!(session.reads(), 1);
        }

        #[tokio::test]
        async fn test_all_of_all_true() {
            let session = page_with("#status", "Done");
            let composite = AllOf::new()
                .with(TextEquals::new().locator("#status").text("Done"))
                .with(ElementPresent::new().locator("#status"));
            assert!(composite.evaluate(&session).await.unwrap());
        }

        #[tokio::test]
        async fn test_any_of_short_circuits_after_first_true() {
            let session = page_with("#status", "Done");
            let composite = AnyOf::new()
                .with(TextEquals::new().locator("#status").text("Done"))
                .with(TextEquals::new().locator("#status").text("Pending"));
            assert!(composite.evaluate(&session).await.unwrap());
            assert_eq!(session.reads(), 1);
        }

        #[tokio::test]
        async fn test_any_of_all_false() {
            let session = page_with("#status", "Stalled");
            let composite = AnyOf::new()
                .with(TextEquals::new().locator("#status").text("Done"))
                .with(TextEquals::new().locator("#status").text("Pending"));
            assert!(!composite.evaluate(&session).await.unwrap());
        }

        #[test]
        fn test_all_of_remote_expression_is_single_round_trip() {
            let composite = AllOf::new()
                .with(TextEquals::new().locator("#status").text("Done"))
                .with(ElementPresent::new().locator("#dialog"));
            assert_eq!(
                composite.to_remote_expression().unwrap().as_str(),
                "(__esperar_text(\"#status\") === \"Done\") && (__esperar_find(\"#dialog\") !== null)"
            );
        }

        #[test]
        fn test_any_of_remote_expression() {
            let composite = AnyOf::new()
                .with(ElementPresent::new().locator("#a"))
                .with(ElementPresent::new().locator("#b"));
            assert_eq!(
                composite.to_remote_expression().unwrap().as_str(),
                "(__esperar_find(\"#a\") !== null) || (__esperar_find(\"#b\") !== null)"
            );
        }

        #[tokio::test]
        async fn test_empty_composites() {
            let session = FakeSession::new();
            assert!(AllOf::new().evaluate(&session).await.unwrap());
            assert!(!AnyOf::new().evaluate(&session).await.unwrap());
            assert_eq!(AllOf::new().to_remote_expression().unwrap().as_str(), "true");
            assert_eq!(AnyOf::new().to_remote_expression().unwrap().as_str(), "false");
        }

        #[tokio::test]
        async fn test_composite_propagates_member_errors() {
            let session = FakeSession::new();
            let composite = AllOf::new().with(TextEquals::new().locator("#gone").text("x"));
            assert!(matches!(
                composite.evaluate(&session).await,
                Err(EsperarError::ElementNotFound { .. })
            ));
        }
    }

    // =========================================================================
    // FnCondition
    // =========================================================================

    mod fn_condition_tests {
        use super::*;
        use crate::session::NullSession;

        #[tokio::test]
        async fn test_closure_result() {
            let truthy = FnCondition::new(|| true, "always true");
            let falsy = FnCondition::new(|| false, "always false");
            assert!(truthy.evaluate(&NullSession).await.unwrap());
            assert!(!falsy.evaluate(&NullSession).await.unwrap());
        }

        #[test]
        fn test_description() {
            let condition = FnCondition::new(|| true, "my condition");
            assert_eq!(condition.description(), "my condition");
        }
    }
}
