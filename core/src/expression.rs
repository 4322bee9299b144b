//! `MatchExpression` — Immutable rule chain with first-match-wins evaluation
//!
//! An expression is opened on one value with [`when`], typed with
//! [`Initial::matched_to`], grown one rule at a time, and finally evaluated
//! with [`evaluate`](MatchExpression::evaluate) or one of the `otherwise*`
//! terminals.

use crate::chain::RuleChain;
use crate::{
    Downcast, EvalStep, EvalTrace, MatchError, NarrowingRule, OnMatch, Pattern, Rule,
    RuleBuilder, TransformerPredicate,
};
use std::any::Any;
use std::fmt::{self, Debug};
use std::sync::Arc;

/// Begin a match expression on `value`.
///
/// The output type is declared separately with [`Initial::matched_to`].
///
/// ```
/// use matcha::when;
///
/// let result = when(0)
///     .matched_to::<String>()
///     .matches_value(0).then("Zero".into())
///     .matches_value(1).then("One".into())
///     .otherwise("Other".into());
///
/// assert_eq!(result, "Zero");
/// ```
pub fn when<I>(value: I) -> Initial<I> {
    Initial { value }
}

/// An expression whose output type has not been declared yet.
#[must_use = "declare the output type with `matched_to`"]
#[derive(Debug, Clone)]
pub struct Initial<I> {
    value: I,
}

impl<I: Send + Sync + 'static> Initial<I> {
    /// Declare the output type. Type-level only: nothing happens at runtime.
    pub fn matched_to<O: Clone + Send + Sync + 'static>(self) -> MatchExpression<I, O> {
        MatchExpression::new(self.value)
    }
}

/// An ordered, immutable list of rules bound to one value.
///
/// Every declaration method takes `&self` and returns a new expression;
/// the receiver is never modified. Derived expressions share the unchanged
/// rule prefix, so keeping, cloning, and branching an intermediate stage is
/// cheap and safe across threads.
///
/// # Type Parameters
///
/// - `I`: The type of the matched value
/// - `O`: The result type (must be `Clone + Send + Sync + 'static`)
///
/// # INV: First-match-wins
///
/// Rules are evaluated in declaration order. The first rule whose predicate
/// holds produces the result; later predicates and producers are never run.
///
/// # Example
///
/// ```
/// use matcha::{when, matchers};
///
/// let describe = |value: Option<&'static str>| {
///     when(value)
///         .matched_to::<&str>()
///         .is(matchers::some(), matcha::OnMatch::value("Not null!"))
///         .is(matchers::none(), matcha::OnMatch::value("Null!"))
///         .evaluate()
/// };
///
/// assert_eq!(describe(None), Some("Null!"));
/// assert_eq!(describe(Some("x")), Some("Not null!"));
/// ```
pub struct MatchExpression<I, O: Clone + Send + Sync + 'static> {
    value: Arc<I>,
    rules: RuleChain<I, O>,
}

impl<I, O> MatchExpression<I, O>
where
    I: Send + Sync + 'static,
    O: Clone + Send + Sync + 'static,
{
    /// Create an empty expression on `value`.
    pub fn new(value: I) -> Self {
        Self {
            value: Arc::new(value),
            rules: RuleChain::new(),
        }
    }

    /// The value being matched.
    pub fn value(&self) -> &I {
        &self.value
    }

    /// Returns the number of rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Returns `true` if no rule has been declared.
    pub fn is_empty(&self) -> bool {
        self.rules.len() == 0
    }

    // ───────────────────────────────────────────────────────────────────────
    // Declaration
    // ───────────────────────────────────────────────────────────────────────

    /// A new expression with `rule` appended.
    #[must_use]
    pub fn with_rule<R: Rule<I, O> + 'static>(&self, rule: R) -> Self {
        Self {
            value: Arc::clone(&self.value),
            rules: self.rules.push(Box::new(rule)),
        }
    }

    /// Declare a rule from a compiled [`Pattern`].
    ///
    /// The other `matches*` methods are shorthands for this one.
    pub fn matches_pattern(&self, pattern: Pattern<I>) -> RuleBuilder<I, O> {
        RuleBuilder::new(self.clone(), pattern)
    }

    /// Declare a rule guarded by a predicate function.
    pub fn matches<F>(&self, predicate: F) -> RuleBuilder<I, O>
    where
        F: Fn(&I) -> bool + Send + Sync + 'static,
    {
        self.matches_pattern(Pattern::test(predicate))
    }

    /// Declare a rule holding when the value equals `target`.
    pub fn matches_value(&self, target: I) -> RuleBuilder<I, O>
    where
        I: PartialEq,
    {
        self.matches_pattern(Pattern::equals(target))
    }

    /// Declare a rule holding when the value's concrete type is `T`.
    pub fn matches_type<T: Any>(&self) -> RuleBuilder<I, O>
    where
        I: Downcast,
    {
        self.matches_pattern(Pattern::of_type::<T>())
    }

    /// Declare a pattern and its result in one step.
    #[must_use]
    pub fn is(&self, pattern: impl Into<Pattern<I>>, on_match: OnMatch<I, O>) -> Self {
        self.matches_pattern(pattern.into()).then_match(on_match)
    }

    /// Declare a type-pipelined rule: `I => T => O`.
    ///
    /// `result` receives the narrowed value and is never called when the
    /// narrowing predicate fails.
    #[must_use]
    pub fn narrows<T, F>(&self, narrowing: TransformerPredicate<I, T>, result: F) -> Self
    where
        T: 'static,
        F: Fn(T) -> O + Send + Sync + 'static,
    {
        self.with_rule(NarrowingRule::new(narrowing, result))
    }

    // ───────────────────────────────────────────────────────────────────────
    // Evaluation
    // ───────────────────────────────────────────────────────────────────────

    /// Evaluate the rules in declaration order.
    ///
    /// Returns the result of the first matching rule, or `None` if no rule
    /// matches.
    pub fn evaluate(&self) -> Option<O> {
        let value = &*self.value;
        self.rules
            .iter()
            .find(|rule| rule.is_match(value))
            .map(|rule| rule.result_for(value))
    }

    /// Evaluate with full trace for debugging.
    ///
    /// Runs the same scan as [`evaluate`](Self::evaluate); `steps` records
    /// every rule that was tested, ending at the first match.
    pub fn evaluate_with_trace(&self) -> EvalTrace<O> {
        let value = &*self.value;
        let mut steps = Vec::new();

        for (index, rule) in self.rules.iter().enumerate() {
            let matched = rule.is_match(value);
            steps.push(EvalStep {
                index,
                kind: rule.kind(),
                matched,
            });
            if matched {
                return EvalTrace {
                    result: Some(rule.result_for(value)),
                    steps,
                };
            }
        }

        EvalTrace {
            result: None,
            steps,
        }
    }

    /// The matched result, or `fallback` if nothing matched.
    pub fn otherwise(&self, fallback: O) -> O {
        self.evaluate().unwrap_or(fallback)
    }

    /// The matched result, or the supplier's value if nothing matched.
    ///
    /// The supplier is not called when a rule matches.
    pub fn otherwise_with<F: FnOnce() -> O>(&self, fallback: F) -> O {
        self.evaluate().unwrap_or_else(fallback)
    }

    /// The matched result, or `fallback` applied to the value if nothing matched.
    ///
    /// The function is not called when a rule matches.
    pub fn otherwise_map<F: FnOnce(&I) -> O>(&self, fallback: F) -> O {
        self.evaluate().unwrap_or_else(|| fallback(&self.value))
    }

    /// The matched result, or the failure built by `failure` if nothing matched.
    ///
    /// # Errors
    ///
    /// Returns whatever `failure` constructs when no rule matches.
    pub fn otherwise_fail<E, F: FnOnce() -> E>(&self, failure: F) -> Result<O, E> {
        self.evaluate().ok_or_else(failure)
    }

    /// [`otherwise_fail`](Self::otherwise_fail) with [`MatchError::NoMatch`].
    ///
    /// # Errors
    ///
    /// Returns [`MatchError::NoMatch`] when no rule matches.
    pub fn try_evaluate(&self) -> Result<O, MatchError> {
        self.otherwise_fail(|| MatchError::NoMatch { rules: self.len() })
    }
}

impl<I, O: Clone + Send + Sync + 'static> Clone for MatchExpression<I, O> {
    fn clone(&self) -> Self {
        Self {
            value: Arc::clone(&self.value),
            rules: self.rules.clone(),
        }
    }
}

impl<I: Debug, O: Clone + Send + Sync + 'static> Debug for MatchExpression<I, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MatchExpression")
            .field("value", &self.value)
            .field("rules", &self.rules.len())
            .finish()
    }
}

// Note: No unsafe impl needed. Send/Sync follow from Arc<I> and the
// `Rule: Send + Sync` supertrait bound on every stored rule.
