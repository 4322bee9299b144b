//! `RuleBuilder` — Staging step between a pattern and its result
//!
//! Returned by the `matches*` family on [`MatchExpression`]. Each `then*`
//! call turns the pending pattern into a [`MatchRule`] and returns a new
//! expression with that rule appended.

use crate::{MatchExpression, MatchRule, OnMatch, Pattern};
use std::fmt;

/// A pattern waiting for its result.
///
/// Finalizing is pure: the builder keeps its parent expression and pattern,
/// so calling `then*` twice yields two independent expressions that share
/// the parent's rules.
///
/// # Example
///
/// ```
/// use matcha::when;
///
/// let builder = when(0).matched_to::<&str>().matches_value(0);
/// let zero = builder.then("Zero");
/// let nothing = builder.then("Nothing");
///
/// assert_eq!(zero.evaluate(), Some("Zero"));
/// assert_eq!(nothing.evaluate(), Some("Nothing"));
/// ```
#[must_use = "a rule builder does nothing until finalized with `then*`"]
pub struct RuleBuilder<I, O: Clone + Send + Sync + 'static> {
    expression: MatchExpression<I, O>,
    pattern: Pattern<I>,
}

impl<I, O> RuleBuilder<I, O>
where
    I: Send + Sync + 'static,
    O: Clone + Send + Sync + 'static,
{
    pub(crate) fn new(expression: MatchExpression<I, O>, pattern: Pattern<I>) -> Self {
        Self {
            expression,
            pattern,
        }
    }

    /// The pending pattern.
    pub fn pattern(&self) -> &Pattern<I> {
        &self.pattern
    }

    /// Finalize with a constant result.
    pub fn then(&self, value: O) -> MatchExpression<I, O> {
        self.then_match(OnMatch::value(value))
    }

    /// Finalize with a supplier, called only if this rule is the first to match.
    pub fn then_with<F>(&self, supplier: F) -> MatchExpression<I, O>
    where
        F: Fn() -> O + Send + Sync + 'static,
    {
        self.then_match(OnMatch::supply(supplier))
    }

    /// Finalize with a function of the matched value.
    pub fn then_map<F>(&self, producer: F) -> MatchExpression<I, O>
    where
        F: Fn(&I) -> O + Send + Sync + 'static,
    {
        self.then_match(OnMatch::map(producer))
    }

    /// Finalize with an explicit [`OnMatch`].
    pub fn then_match(&self, on_match: OnMatch<I, O>) -> MatchExpression<I, O> {
        self.expression
            .with_rule(MatchRule::new(self.pattern.clone(), on_match))
    }
}

impl<I, O> fmt::Debug for RuleBuilder<I, O>
where
    I: Send + Sync + 'static,
    O: Clone + Send + Sync + 'static,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuleBuilder")
            .field("rules", &self.expression.len())
            .field("pattern", &self.pattern)
            .finish()
    }
}
