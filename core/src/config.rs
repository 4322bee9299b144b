//! Config types for declarative rule tables.
//!
//! These types mirror the runtime types but are serde-deserializable, so a
//! first-match-wins table over plain data values can live in JSON or YAML.
//!
//! # Relationship to runtime types
//!
//! | Config type | Runtime type | Loader method |
//! |-------------|-------------|---------------|
//! | [`TableConfig`] | [`MatchExpression`](crate::MatchExpression) | [`TableConfig::bind()`] |
//! | [`RuleConfig`] | [`MatchRule`](crate::MatchRule) | via `bind()` |
//! | [`PatternConfig`] | [`Pattern`](crate::Pattern) | [`PatternConfig::to_pattern()`] |
//!
//! # Format
//!
//! ```yaml
//! rules:
//!   - when: { type: equals, value: 0 }
//!     then: "zero"
//!   - when: { type: one_of, values: [1, 2, 3] }
//!     then: "small"
//!   - when: { type: any }
//!     then: "other"
//! otherwise: "unreachable"
//! ```

use crate::{
    matchers, EvalTrace, MatchError, MatchExpression, OnMatch, Pattern, Predicate, MAX_RULES,
};
use serde::{Deserialize, Deserializer};

/// Configuration for a rule table.
///
/// Binds to a [`MatchExpression`] for one value via [`bind()`](Self::bind).
#[derive(Debug, Clone, Deserialize)]
#[serde(bound(deserialize = "I: Deserialize<'de>, O: Deserialize<'de>"))]
pub struct TableConfig<I, O> {
    /// Rules to evaluate in order (first-match-wins).
    pub rules: Vec<RuleConfig<I, O>>,

    /// Fallback when no rule matches.
    ///
    /// A missing key means no fallback. A present key is always a fallback,
    /// even when its value is `null`.
    #[serde(default, deserialize_with = "present")]
    pub otherwise: Option<O>,
}

/// Deserialize a field that is present into `Some`, whatever its value.
fn present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

/// Configuration for a single rule.
#[derive(Debug, Clone, Deserialize)]
#[serde(bound(deserialize = "I: Deserialize<'de>, O: Deserialize<'de>"))]
pub struct RuleConfig<I, O> {
    /// The pattern that gates this rule.
    pub when: PatternConfig<I>,

    /// The result when the pattern holds.
    pub then: O,
}

/// Configuration for a [`Pattern`].
///
/// Uses `#[serde(tag = "type")]` for discriminated union deserialization:
///
/// ```json
/// { "type": "equals", "value": 3 }
/// { "type": "not_equals", "value": 3 }
/// { "type": "one_of", "values": [1, 2] }
/// { "type": "any" }
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
#[serde(bound(deserialize = "I: Deserialize<'de>"))]
pub enum PatternConfig<I> {
    /// Value equals the target.
    Equals {
        /// The target.
        value: I,
    },
    /// Value differs from the target.
    NotEquals {
        /// The target.
        value: I,
    },
    /// Value equals one of the targets. Must be non-empty.
    OneOf {
        /// The targets.
        values: Vec<I>,
    },
    /// Always holds.
    Any,
}

impl<I> PatternConfig<I>
where
    I: PartialEq + Clone + Send + Sync + 'static,
{
    /// Compile into a runtime [`Pattern`].
    ///
    /// # Errors
    ///
    /// Returns [`MatchError::InvalidConfig`] for an empty `one_of`.
    pub fn to_pattern(&self) -> Result<Pattern<I>, MatchError> {
        match self {
            Self::Equals { value } => Ok(matchers::equal_to(value.clone())),
            Self::NotEquals { value } => Ok(matchers::not_equal_to(value.clone())),
            Self::OneOf { values } if values.is_empty() => Err(MatchError::InvalidConfig {
                reason: "one_of requires at least one target".into(),
            }),
            Self::OneOf { values } => Ok(matchers::one_of(values.clone())),
            Self::Any => Ok(Pattern::predicate(Predicate::always())),
        }
    }
}

impl<I, O> TableConfig<I, O>
where
    I: PartialEq + Clone + Send + Sync + 'static,
    O: Clone + Send + Sync + 'static,
{
    /// Check structural limits and compile every pattern once.
    ///
    /// # Errors
    ///
    /// Returns [`MatchError::TooManyRules`] if the table exceeds [`MAX_RULES`],
    /// or the first pattern error.
    pub fn validate(&self) -> Result<(), MatchError> {
        self.check_rule_count()?;
        self.rules
            .iter()
            .try_for_each(|rule| rule.when.to_pattern().map(drop))
    }

    fn check_rule_count(&self) -> Result<(), MatchError> {
        if self.rules.len() > MAX_RULES {
            return Err(MatchError::TooManyRules {
                count: self.rules.len(),
                max: MAX_RULES,
            });
        }
        Ok(())
    }

    /// Build a [`MatchExpression`] over `value` with this table's rules.
    ///
    /// The fallback is not part of the expression; use
    /// [`evaluate()`](Self::evaluate) to apply it.
    ///
    /// # Errors
    ///
    /// Same as [`validate()`](Self::validate).
    pub fn bind(&self, value: I) -> Result<MatchExpression<I, O>, MatchError> {
        self.check_rule_count()?;
        let mut expr = MatchExpression::new(value);
        for rule in &self.rules {
            expr = expr.is(rule.when.to_pattern()?, OnMatch::value(rule.then.clone()));
        }
        Ok(expr)
    }

    /// Evaluate `value` against the table, falling back to `otherwise`.
    ///
    /// # Errors
    ///
    /// Same as [`validate()`](Self::validate).
    pub fn evaluate(&self, value: I) -> Result<Option<O>, MatchError> {
        let expr = self.bind(value)?;
        Ok(expr.evaluate().or_else(|| self.otherwise.clone()))
    }

    /// Evaluate with full trace. The trace's `result` excludes the fallback.
    ///
    /// # Errors
    ///
    /// Same as [`validate()`](Self::validate).
    pub fn evaluate_with_trace(&self, value: I) -> Result<EvalTrace<O>, MatchError> {
        Ok(self.bind(value)?.evaluate_with_trace())
    }
}
