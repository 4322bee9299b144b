//! Predicate — Boolean tests over the matched value
//!
//! A [`Predicate`] wraps a shareable `Fn(&I) -> bool`. Predicates compose
//! with AND/OR/NOT and are cheap to clone, so one predicate can back rules
//! in several expressions at once.

use std::fmt;
use std::ops::Not;
use std::sync::Arc;

type TestFn<I> = dyn Fn(&I) -> bool + Send + Sync;

/// A boolean test over values of type `I`.
///
/// # Thread Safety
///
/// The wrapped function must be `Send + Sync` so expressions holding the
/// predicate can be shared and branched across threads. Any state the
/// closure captures is the caller's responsibility.
///
/// # Example
///
/// ```
/// use matcha::Predicate;
///
/// let even = Predicate::new(|i: &i32| i % 2 == 0);
/// let positive = Predicate::new(|i: &i32| *i > 0);
///
/// let both = even.clone().and(positive.clone());
/// assert!(both.test(&4));
/// assert!(!both.test(&-4));
///
/// let odd = !even;
/// assert!(odd.test(&3));
/// ```
pub struct Predicate<I> {
    test: Arc<TestFn<I>>,
}

impl<I: 'static> Predicate<I> {
    /// Create a predicate from a function.
    pub fn new<F>(test: F) -> Self
    where
        F: Fn(&I) -> bool + Send + Sync + 'static,
    {
        Self {
            test: Arc::new(test),
        }
    }

    /// A predicate that holds for every value.
    #[must_use]
    pub fn always() -> Self {
        Self::new(|_| true)
    }

    /// A predicate that holds for no value.
    #[must_use]
    pub fn never() -> Self {
        Self::new(|_| false)
    }

    /// Evaluate this predicate against a value.
    #[inline]
    pub fn test(&self, value: &I) -> bool {
        (self.test)(value)
    }

    /// Logical AND. Short-circuits: `other` is not run when `self` fails.
    #[must_use]
    pub fn and(self, other: Self) -> Self {
        Self::new(move |v| self.test(v) && other.test(v))
    }

    /// Logical OR. Short-circuits: `other` is not run when `self` holds.
    #[must_use]
    pub fn or(self, other: Self) -> Self {
        Self::new(move |v| self.test(v) || other.test(v))
    }

    /// Compose predicates with AND semantics.
    ///
    /// - Empty → [`always`](Self::always) (vacuous truth)
    /// - Single → unwrapped
    /// - Multiple → all must hold, evaluated in order, stopping at the first `false`
    #[must_use]
    pub fn all(predicates: Vec<Self>) -> Self {
        match <[Self; 1]>::try_from(predicates) {
            Ok([single]) => single,
            Err(predicates) => Self::new(move |v| predicates.iter().all(|p| p.test(v))),
        }
    }

    /// Compose predicates with OR semantics.
    ///
    /// - Empty → [`never`](Self::never)
    /// - Single → unwrapped
    /// - Multiple → any must hold, evaluated in order, stopping at the first `true`
    ///
    /// Symmetric with [`all`](Self::all).
    #[must_use]
    pub fn any(predicates: Vec<Self>) -> Self {
        match <[Self; 1]>::try_from(predicates) {
            Ok([single]) => single,
            Err(predicates) => Self::new(move |v| predicates.iter().any(|p| p.test(v))),
        }
    }
}

impl<I: 'static> Not for Predicate<I> {
    type Output = Self;

    fn not(self) -> Self {
        Self::new(move |v| !self.test(v))
    }
}

impl<I> Clone for Predicate<I> {
    fn clone(&self) -> Self {
        Self {
            test: Arc::clone(&self.test),
        }
    }
}

impl<I> fmt::Debug for Predicate<I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Predicate").finish_non_exhaustive()
    }
}
