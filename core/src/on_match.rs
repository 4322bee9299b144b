//! `OnMatch` — What a rule produces when its pattern holds
//!
//! Exactly one of: a constant value, a zero-argument supplier, or a
//! function of the matched input. Suppliers and functions are deferred:
//! they run only when their rule is the first to match.

use std::fmt::{self, Debug};
use std::sync::Arc;

type SupplyFn<O> = dyn Fn() -> O + Send + Sync;
type MapFn<I, O> = dyn Fn(&I) -> O + Send + Sync;

/// The result side of a rule.
///
/// # Type Parameters
///
/// - `I`: The matched input type
/// - `O`: The output type (must be `Clone + Send + Sync + 'static`)
///
/// # Example
///
/// ```
/// use matcha::OnMatch;
///
/// let constant: OnMatch<i32, String> = OnMatch::value("zero".to_string());
/// let deferred: OnMatch<i32, String> = OnMatch::supply(|| "computed".to_string());
/// let derived: OnMatch<i32, String> = OnMatch::map(|i| format!("{i} plus 1 is {}", i + 1));
///
/// assert_eq!(constant.resolve(&0), "zero");
/// assert_eq!(deferred.resolve(&0), "computed");
/// assert_eq!(derived.resolve(&1), "1 plus 1 is 2");
/// ```
pub enum OnMatch<I, O: Clone + Send + Sync + 'static> {
    /// Return this value (cloned on every match).
    Value(O),

    /// Call this supplier; it does not see the input.
    Supply(Arc<SupplyFn<O>>),

    /// Derive the result from the matched input.
    Map(Arc<MapFn<I, O>>),
}

impl<I, O: Clone + Send + Sync + 'static> OnMatch<I, O> {
    /// Create an `OnMatch` returning a constant.
    pub fn value(value: O) -> Self {
        Self::Value(value)
    }

    /// Create an `OnMatch` calling a supplier.
    pub fn supply<F>(supplier: F) -> Self
    where
        F: Fn() -> O + Send + Sync + 'static,
    {
        Self::Supply(Arc::new(supplier))
    }

    /// Create an `OnMatch` deriving its result from the input.
    pub fn map<F>(producer: F) -> Self
    where
        F: Fn(&I) -> O + Send + Sync + 'static,
    {
        Self::Map(Arc::new(producer))
    }

    /// Produce the result for a matched input.
    pub fn resolve(&self, input: &I) -> O {
        match self {
            Self::Value(value) => value.clone(),
            Self::Supply(supplier) => supplier(),
            Self::Map(producer) => producer(input),
        }
    }

    /// Returns `true` if this is a constant.
    pub fn is_value(&self) -> bool {
        matches!(self, Self::Value(_))
    }

    /// Get the constant if this is a `Value` variant.
    pub fn as_value(&self) -> Option<&O> {
        match self {
            Self::Value(value) => Some(value),
            Self::Supply(_) | Self::Map(_) => None,
        }
    }
}

impl<I, O: Clone + Send + Sync + 'static> Clone for OnMatch<I, O> {
    fn clone(&self) -> Self {
        match self {
            Self::Value(value) => Self::Value(value.clone()),
            Self::Supply(supplier) => Self::Supply(Arc::clone(supplier)),
            Self::Map(producer) => Self::Map(Arc::clone(producer)),
        }
    }
}

impl<I, O: Clone + Send + Sync + Debug + 'static> Debug for OnMatch<I, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Value(value) => f.debug_tuple("Value").field(value).finish(),
            Self::Supply(_) => f.debug_tuple("Supply").finish(),
            Self::Map(_) => f.debug_tuple("Map").finish(),
        }
    }
}
