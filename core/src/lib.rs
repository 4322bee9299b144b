//! matcha - expression-oriented pattern matching over arbitrary values
//!
//! A first-match-wins rule engine for places where a chain of `if`/`else`
//! or a `match` on a value is awkward: the shape of the value is only known
//! at runtime, the rules are assembled incrementally, or the same rule
//! prefix is shared between several call sites.
//!
//! # Architecture
//!
//! - [`Predicate<I>`] — Boolean test over the matched value, composable with `and`/`or`/`!`
//! - [`Pattern<I>`] — A predicate tagged with how it was declared (test, equality, type)
//! - [`TransformerPredicate<I, T>`] — Predicate plus a narrowing transform to `T`
//! - [`OnMatch<I, O>`] — What a matching rule produces (value, supplier, or function of the input)
//! - [`Rule<I, O>`] — A single `is_match` / `result_for` pair ([`MatchRule`], [`NarrowingRule`])
//! - [`RuleBuilder<I, O>`] — Staging object holding one pending pattern
//! - [`MatchExpression<I, O>`] — Immutable, append-only rule chain bound to one value
//!
//! # Key Design Insights
//!
//! 1. **First-match-wins**: rules are scanned in declaration order; once a
//!    predicate holds, no later predicate or producer runs.
//!
//! 2. **Persistent expressions**: every declaration returns a *new*
//!    expression sharing the unchanged prefix. The old expression stays
//!    valid, so one stage can be branched from several threads.
//!
//! 3. **Type pipeline**: a [`TransformerPredicate`] checks eligibility, then
//!    narrows `I => T`; the final function only ever sees a narrowed `T`.
//!
//! # Example
//!
//! ```
//! use matcha::prelude::*;
//!
//! let described = when(1024)
//!     .matched_to::<String>()
//!     .matches(|i| i % 5 == 0).then("Divisible by 5".to_string())
//!     .matches(|i| i % 2 == 0).then("Divisible by 2".to_string())
//!     .otherwise("Not sure what the number is divisible by!".to_string());
//!
//! assert_eq!(described, "Divisible by 2");
//! ```

// ═══════════════════════════════════════════════════════════════════════════════
// Modules
// ═══════════════════════════════════════════════════════════════════════════════

mod builder;
mod chain;
mod expression;
pub mod matchers;
mod on_match;
mod pattern;
mod predicate;
mod rule;
mod trace;

#[cfg(feature = "serde")]
mod config;

// ═══════════════════════════════════════════════════════════════════════════════
// Public API
// ═══════════════════════════════════════════════════════════════════════════════

// Core types
pub use builder::RuleBuilder;
pub use expression::{when, Initial, MatchExpression};
pub use on_match::OnMatch;
pub use pattern::{Downcast, Pattern, PatternKind, TransformerPredicate};
pub use predicate::Predicate;
pub use rule::{MatchRule, NarrowingRule, Rule};

// Config (feature-gated)
#[cfg(feature = "serde")]
pub use config::{PatternConfig, RuleConfig, TableConfig};

// Trace types
pub use trace::{EvalStep, EvalTrace};

// ═══════════════════════════════════════════════════════════════════════════════
// Prelude
// ═══════════════════════════════════════════════════════════════════════════════

/// Prelude module for convenient imports.
///
/// ```
/// use matcha::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        // Entry point
        when,
        // Traits
        Downcast,
        // Trace types
        EvalStep,
        EvalTrace,
        Initial,
        // Core types
        MatchError,
        MatchExpression,
        MatchRule,
        NarrowingRule,
        OnMatch,
        Pattern,
        PatternKind,
        Predicate,
        Rule,
        RuleBuilder,
        TransformerPredicate,
    };
}

// ═══════════════════════════════════════════════════════════════════════════════
// Constants
// ═══════════════════════════════════════════════════════════════════════════════

/// Maximum number of rules in a declarative [`TableConfig`].
///
/// Applies to config-loaded tables only; expressions built in code are not capped.
pub const MAX_RULES: usize = 256;

/// Maximum length for regex patterns.
///
/// Regex compilation cost grows with pattern length, so
/// [`matchers::regex`] rejects longer patterns before compiling.
pub const MAX_REGEX_PATTERN_LENGTH: usize = 4096;

// ═══════════════════════════════════════════════════════════════════════════════
// Errors
// ═══════════════════════════════════════════════════════════════════════════════

/// Errors produced by matcha.
///
/// Evaluation itself never fails: a miss is `None` from
/// [`MatchExpression::evaluate`]. [`MatchError::NoMatch`] exists for callers
/// who want a ready-made failure to hand to
/// [`MatchExpression::otherwise_fail`]. The remaining variants are raised
/// while building regex predicates or loading rule tables.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MatchError {
    /// No rule matched and no fallback was supplied.
    #[error("no rule matched the value ({rules} rules declared)")]
    NoMatch {
        /// Number of rules that were scanned.
        rules: usize,
    },

    /// A regex pattern failed to compile.
    #[error("invalid pattern \"{pattern}\": {reason}")]
    InvalidPattern {
        /// The pattern that failed to compile.
        pattern: String,
        /// The underlying error message.
        reason: String,
    },

    /// A regex pattern exceeds [`MAX_REGEX_PATTERN_LENGTH`].
    #[error("pattern length is {len}, but maximum allowed is {max}")]
    PatternTooLong {
        /// Actual length of the pattern.
        len: usize,
        /// Maximum allowed length.
        max: usize,
    },

    /// Too many rules in a single table.
    #[error("rule table has {count} rules, but maximum allowed is {max}")]
    TooManyRules {
        /// Actual count of rules.
        count: usize,
        /// Maximum allowed.
        max: usize,
    },

    /// A rule table could not be compiled.
    #[error("invalid config: {reason}")]
    InvalidConfig {
        /// What was wrong with the table.
        reason: String,
    },
}
