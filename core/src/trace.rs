//! Evaluation trace types for debugging rule chains.
//!
//! Rules hold opaque closures, so a trace cannot show *what* a predicate
//! looked at. It shows which rules were tested, how each one was declared
//! ([`PatternKind`]), and which one fired. Use
//! [`MatchExpression::evaluate_with_trace`](crate::MatchExpression::evaluate_with_trace).
//!
//! # Example
//!
//! ```
//! use matcha::when;
//!
//! let trace = when(3)
//!     .matched_to::<&str>()
//!     .matches_value(1).then("one")
//!     .matches(|i| i % 3 == 0).then("fizz")
//!     .evaluate_with_trace();
//!
//! println!("Result: {:?}", trace.result);
//! for step in &trace.steps {
//!     println!("  {step}");
//! }
//! assert_eq!(trace.matched_step().map(|s| s.index), Some(1));
//! ```

use crate::PatternKind;
use std::fmt;

/// Trace of a full [`MatchExpression`](crate::MatchExpression) evaluation.
///
/// # INV: `result` == `evaluate()` result
///
/// The `result` field always equals what
/// [`MatchExpression::evaluate()`](crate::MatchExpression::evaluate) returns
/// for the same expression.
pub struct EvalTrace<O> {
    /// The final result (identical to what `evaluate()` returns).
    pub result: Option<O>,
    /// Each rule that was tested, in declaration order.
    /// Stops after the first match (preserves first-match-wins).
    pub steps: Vec<EvalStep>,
}

impl<O> EvalTrace<O> {
    /// The step whose rule produced the result, if any.
    #[must_use]
    pub fn matched_step(&self) -> Option<&EvalStep> {
        self.steps.last().filter(|step| step.matched)
    }

    /// Number of rules whose predicate was run.
    #[must_use]
    pub fn rules_tested(&self) -> usize {
        self.steps.len()
    }
}

impl<O: fmt::Debug> fmt::Debug for EvalTrace<O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EvalTrace")
            .field("result", &self.result)
            .field("steps", &self.steps)
            .finish()
    }
}

/// One rule's evaluation in a trace.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EvalStep {
    /// Position of the rule in declaration order (0-based).
    pub index: usize,
    /// How the rule's predicate was declared.
    pub kind: PatternKind,
    /// Did the predicate hold?
    pub matched: bool,
}

impl fmt::Display for EvalStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let outcome = if self.matched { "matched" } else { "no match" };
        write!(f, "rule[{}] {}: {outcome}", self.index, self.kind)
    }
}
