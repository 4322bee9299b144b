//! Ready-made patterns and predicates.
//!
//! Null checks, equality, membership, runtime type checks, and string
//! tests, each returning a [`Pattern`], [`Predicate`], or
//! [`TransformerPredicate`] that plugs straight into a
//! [`MatchExpression`](crate::MatchExpression).
//!
//! Rust has no null reference; absence is `Option::None`, so [`none`] and
//! [`some`] match over `Option<T>` inputs.
//!
//! # Example
//!
//! ```
//! use matcha::{matchers, when, OnMatch};
//!
//! let greeting = |name: Option<&'static str>| {
//!     when(name)
//!         .matched_to::<String>()
//!         .is(matchers::none(), OnMatch::value("Hello, stranger".into()))
//!         .is(matchers::equal_to(Some("root")), OnMatch::value("Welcome back, admin".into()))
//!         .otherwise_map(|name| format!("Hello, {}", name.unwrap_or_default()))
//! };
//!
//! assert_eq!(greeting(None), "Hello, stranger");
//! assert_eq!(greeting(Some("root")), "Welcome back, admin");
//! assert_eq!(greeting(Some("ada")), "Hello, ada");
//! ```

use crate::{
    Downcast, MatchError, Pattern, PatternKind, Predicate, TransformerPredicate,
    MAX_REGEX_PATTERN_LENGTH,
};
use std::any::{type_name, Any};

// ───────────────────────────────────────────────────────────────────────────────
// Presence
// ───────────────────────────────────────────────────────────────────────────────

/// Holds when the value is absent.
#[must_use]
pub fn none<T: 'static>() -> Pattern<Option<T>> {
    Pattern::test(Option::is_none)
}

/// Holds when the value is present.
#[must_use]
pub fn some<T: 'static>() -> Pattern<Option<T>> {
    Pattern::test(Option::is_some)
}

// ───────────────────────────────────────────────────────────────────────────────
// Equality
// ───────────────────────────────────────────────────────────────────────────────

/// Holds when the value equals `target`.
pub fn equal_to<I>(target: I) -> Pattern<I>
where
    I: PartialEq + Send + Sync + 'static,
{
    Pattern::equals(target)
}

/// Holds when the value differs from `target`.
pub fn not_equal_to<I>(target: I) -> Pattern<I>
where
    I: PartialEq + Send + Sync + 'static,
{
    Pattern::predicate(!Pattern::equals(target).into_predicate())
}

/// Holds when the value equals any of `targets`. Empty `targets` never holds.
pub fn one_of<I>(targets: impl IntoIterator<Item = I>) -> Pattern<I>
where
    I: PartialEq + Send + Sync + 'static,
{
    let targets: Vec<I> = targets.into_iter().collect();
    Pattern::test(move |v| targets.contains(v))
}

// ───────────────────────────────────────────────────────────────────────────────
// Runtime type
// ───────────────────────────────────────────────────────────────────────────────

/// Holds when the value's concrete type is `T`.
#[must_use]
pub fn of_type<I, T>() -> Pattern<I>
where
    I: Downcast + 'static,
    T: Any,
{
    Pattern::of_type::<T>()
}

/// Type check plus downcast: eligible when the concrete type is `T`, narrows
/// to a clone of the concrete value.
///
/// ```
/// use std::any::Any;
/// use matcha::{matchers, when};
///
/// let value: Box<dyn Any + Send + Sync> = Box::new(7_u16);
/// let doubled = when(value)
///     .matched_to::<u32>()
///     .narrows(matchers::instance::<u16, _>(), |n| u32::from(n) * 2)
///     .otherwise(0);
/// assert_eq!(doubled, 14);
/// ```
#[must_use]
pub fn instance<T, I>() -> TransformerPredicate<I, T>
where
    T: Any + Clone,
    I: Downcast + 'static,
{
    TransformerPredicate::checked(|v: &I| v.as_any().downcast_ref::<T>().cloned())
        .with_kind(PatternKind::Type(type_name::<T>()))
}

/// Narrow through a checked projection: eligible when `project` returns `Some`.
pub fn narrow<I, T, F>(project: F) -> TransformerPredicate<I, T>
where
    I: 'static,
    T: 'static,
    F: Fn(&I) -> Option<T> + Send + Sync + 'static,
{
    TransformerPredicate::checked(project)
}

// ───────────────────────────────────────────────────────────────────────────────
// Strings
// ───────────────────────────────────────────────────────────────────────────────

/// Exact string equality.
pub fn exact<S: AsRef<str> + 'static>(value: impl Into<String>) -> Predicate<S> {
    let value = value.into();
    Predicate::new(move |s: &S| s.as_ref() == value)
}

/// String starts with `value`.
pub fn prefix<S: AsRef<str> + 'static>(value: impl Into<String>) -> Predicate<S> {
    let value = value.into();
    Predicate::new(move |s: &S| s.as_ref().starts_with(value.as_str()))
}

/// String ends with `value`.
pub fn suffix<S: AsRef<str> + 'static>(value: impl Into<String>) -> Predicate<S> {
    let value = value.into();
    Predicate::new(move |s: &S| s.as_ref().ends_with(value.as_str()))
}

/// String contains `value`.
pub fn contains<S: AsRef<str> + 'static>(value: impl Into<String>) -> Predicate<S> {
    let value = value.into();
    Predicate::new(move |s: &S| s.as_ref().contains(value.as_str()))
}

/// Regular expression match (Rust `regex` crate syntax, linear time).
///
/// # Errors
///
/// Returns [`MatchError::PatternTooLong`] if `pattern` exceeds
/// [`MAX_REGEX_PATTERN_LENGTH`], or [`MatchError::InvalidPattern`] if it
/// does not compile.
pub fn regex<S: AsRef<str> + 'static>(pattern: &str) -> Result<Predicate<S>, MatchError> {
    if pattern.len() > MAX_REGEX_PATTERN_LENGTH {
        return Err(MatchError::PatternTooLong {
            len: pattern.len(),
            max: MAX_REGEX_PATTERN_LENGTH,
        });
    }
    let re = regex::Regex::new(pattern).map_err(|e| MatchError::InvalidPattern {
        pattern: pattern.to_string(),
        reason: e.to_string(),
    })?;
    Ok(Predicate::new(move |s: &S| re.is_match(s.as_ref())))
}
