//! Rule — One predicate/result pair inside a match expression
//!
//! [`MatchRule`] binds a [`Pattern`] to an [`OnMatch`]. [`NarrowingRule`]
//! runs a type pipeline: check eligibility, narrow `I => T`, then derive the
//! result from `T`. Both implement the [`Rule`] trait, which is also the
//! extension point for hand-written rules.

use crate::{OnMatch, Pattern, PatternKind, TransformerPredicate};
use std::fmt::{self, Debug};
use std::sync::Arc;

/// A single condition in a [`MatchExpression`](crate::MatchExpression).
///
/// # Contract
///
/// [`result_for`](Self::result_for) is only called with inputs for which
/// [`is_match`](Self::is_match) returned `true`. Implementations may rely on
/// this and need not re-check.
///
/// # Thread Safety
///
/// Rules live inside persistent expressions that may be branched from
/// several threads, so implementations must be `Send + Sync`.
///
/// # Example
///
/// ```
/// use matcha::{when, Rule};
///
/// struct Negative;
///
/// impl Rule<i64, String> for Negative {
///     fn is_match(&self, input: &i64) -> bool {
///         *input < 0
///     }
///
///     fn result_for(&self, input: &i64) -> String {
///         format!("{} below zero", input.abs())
///     }
/// }
///
/// let result = when(-3_i64).matched_to::<String>().with_rule(Negative).evaluate();
/// assert_eq!(result.as_deref(), Some("3 below zero"));
/// ```
#[diagnostic::on_unimplemented(
    message = "`{Self}` does not implement `Rule<{I}, {O}>`",
    label = "this type cannot be used as a rule over `{I}` producing `{O}`",
    note = "implement `is_match(&self, &I) -> bool` and `result_for(&self, &I) -> O`"
)]
pub trait Rule<I, O>: Send + Sync {
    /// Does this rule apply to `input`?
    fn is_match(&self, input: &I) -> bool;

    /// The result for an input this rule applies to.
    fn result_for(&self, input: &I) -> O;

    /// How this rule's condition was declared. Used in traces.
    fn kind(&self) -> PatternKind {
        PatternKind::Custom
    }
}

/// A rule built from a [`Pattern`] and an [`OnMatch`].
pub struct MatchRule<I, O: Clone + Send + Sync + 'static> {
    /// The condition to evaluate.
    pub pattern: Pattern<I>,

    /// What to produce when the condition holds.
    pub on_match: OnMatch<I, O>,
}

impl<I, O: Clone + Send + Sync + 'static> MatchRule<I, O> {
    /// Create a new rule.
    pub fn new(pattern: Pattern<I>, on_match: OnMatch<I, O>) -> Self {
        Self { pattern, on_match }
    }
}

impl<I: 'static, O: Clone + Send + Sync + 'static> Rule<I, O> for MatchRule<I, O> {
    fn is_match(&self, input: &I) -> bool {
        self.pattern.matches(input)
    }

    fn result_for(&self, input: &I) -> O {
        self.on_match.resolve(input)
    }

    fn kind(&self) -> PatternKind {
        self.pattern.kind()
    }
}

impl<I, O: Clone + Send + Sync + Debug + 'static> Debug for MatchRule<I, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MatchRule")
            .field("pattern", &self.pattern)
            .field("on_match", &self.on_match)
            .finish()
    }
}

type ResultFn<T, O> = dyn Fn(T) -> O + Send + Sync;

/// A type-pipelined rule: `I => T => O`.
///
/// The effective result producer is `result ∘ transform`, run only after the
/// eligibility predicate held. `result` never sees an ineligible value.
pub struct NarrowingRule<I, T, O> {
    narrowing: TransformerPredicate<I, T>,
    result: Arc<ResultFn<T, O>>,
}

impl<I: 'static, T: 'static, O: 'static> NarrowingRule<I, T, O> {
    /// Create a rule from a transformer predicate and a function of the narrowed value.
    pub fn new<F>(narrowing: TransformerPredicate<I, T>, result: F) -> Self
    where
        F: Fn(T) -> O + Send + Sync + 'static,
    {
        Self {
            narrowing,
            result: Arc::new(result),
        }
    }
}

impl<I: 'static, T: 'static, O: 'static> Rule<I, O> for NarrowingRule<I, T, O> {
    fn is_match(&self, input: &I) -> bool {
        self.narrowing.predicate().test(input)
    }

    fn result_for(&self, input: &I) -> O {
        (self.result)(self.narrowing.transform(input))
    }

    fn kind(&self) -> PatternKind {
        self.narrowing.kind()
    }
}

impl<I, T, O> Debug for NarrowingRule<I, T, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NarrowingRule")
            .field("narrowing", &self.narrowing)
            .finish_non_exhaustive()
    }
}

// Note: No unsafe impl needed. Every closure is stored as
// `Arc<dyn Fn .. + Send + Sync>`, so both rule types are Send + Sync.
