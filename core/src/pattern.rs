//! Pattern — How a rule's predicate was declared
//!
//! Every declaration entry point on [`MatchExpression`](crate::MatchExpression)
//! (raw predicate, equality target, type membership) compiles to one canonical
//! [`Pattern`]: a [`Predicate`] plus a [`PatternKind`] tag kept for traces.
//!
//! The type pipeline lives here too: [`TransformerPredicate`] pairs an
//! eligibility check with a narrowing transform `I => T`.

use crate::Predicate;
use std::any::{type_name, Any};
use std::fmt;
use std::rc::Rc;
use std::sync::Arc;

/// Runtime access to the concrete type behind a value.
///
/// Needed for type-membership patterns ([`Pattern::of_type`],
/// [`matchers::instance`](crate::matchers::instance)). Smart pointers and
/// references forward to their pointee, so `Box<dyn Vehicle>` works as long
/// as `Vehicle: Downcast`.
///
/// # Example
///
/// ```
/// use std::any::Any;
/// use matcha::Downcast;
///
/// trait Shape: Downcast + Send + Sync {}
///
/// struct Circle;
/// impl Shape for Circle {}
/// impl Downcast for Circle {
///     fn as_any(&self) -> &dyn Any {
///         self
///     }
/// }
///
/// let shape: Box<dyn Shape> = Box::new(Circle);
/// assert!(shape.as_any().is::<Circle>());
/// ```
pub trait Downcast {
    /// Returns a reference to the concrete value as `&dyn Any`.
    fn as_any(&self) -> &dyn Any;
}

impl Downcast for dyn Any {
    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl Downcast for dyn Any + Send {
    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl Downcast for dyn Any + Send + Sync {
    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl<T: Downcast + ?Sized> Downcast for Box<T> {
    fn as_any(&self) -> &dyn Any {
        (**self).as_any()
    }
}

impl<T: Downcast + ?Sized> Downcast for Arc<T> {
    fn as_any(&self) -> &dyn Any {
        (**self).as_any()
    }
}

impl<T: Downcast + ?Sized> Downcast for Rc<T> {
    fn as_any(&self) -> &dyn Any {
        (**self).as_any()
    }
}

impl<T: Downcast + ?Sized> Downcast for &T {
    fn as_any(&self) -> &dyn Any {
        (**self).as_any()
    }
}

/// How a pattern was declared.
///
/// Carried into [`EvalStep`](crate::EvalStep) so a trace shows which kind
/// of rule fired, even though the predicates themselves are opaque closures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PatternKind {
    /// An arbitrary predicate over the input.
    Test,
    /// Equality with a target value.
    Equals,
    /// Runtime type membership (type name of the target).
    Type(&'static str),
    /// Type-pipelined rule narrowing to the named intermediate type.
    Narrow(&'static str),
    /// A user-supplied [`Rule`](crate::Rule) implementation.
    Custom,
}

impl fmt::Display for PatternKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Test => write!(f, "test"),
            Self::Equals => write!(f, "equals"),
            Self::Type(name) => write!(f, "type({name})"),
            Self::Narrow(name) => write!(f, "narrow({name})"),
            Self::Custom => write!(f, "custom"),
        }
    }
}

/// A compiled pattern: a canonical [`Predicate`] tagged with its [`PatternKind`].
pub struct Pattern<I> {
    kind: PatternKind,
    predicate: Predicate<I>,
}

impl<I: 'static> Pattern<I> {
    /// Pattern from an arbitrary predicate function.
    pub fn test<F>(test: F) -> Self
    where
        F: Fn(&I) -> bool + Send + Sync + 'static,
    {
        Self::predicate(Predicate::new(test))
    }

    /// Pattern from an existing [`Predicate`].
    #[must_use]
    pub fn predicate(predicate: Predicate<I>) -> Self {
        Self {
            kind: PatternKind::Test,
            predicate,
        }
    }

    /// Pattern holding when the input equals `target`.
    pub fn equals(target: I) -> Self
    where
        I: PartialEq + Send + Sync,
    {
        Self {
            kind: PatternKind::Equals,
            predicate: Predicate::new(move |v| *v == target),
        }
    }

    /// Pattern holding when the input's concrete type is `T`.
    #[must_use]
    pub fn of_type<T: Any>() -> Self
    where
        I: Downcast,
    {
        Self {
            kind: PatternKind::Type(type_name::<T>()),
            predicate: Predicate::new(|v: &I| v.as_any().is::<T>()),
        }
    }

    /// How this pattern was declared.
    #[must_use]
    pub fn kind(&self) -> PatternKind {
        self.kind
    }

    /// Evaluate the pattern against a value.
    #[inline]
    pub fn matches(&self, value: &I) -> bool {
        self.predicate.test(value)
    }

    /// Discard the kind tag, keeping the canonical predicate.
    #[must_use]
    pub fn into_predicate(self) -> Predicate<I> {
        self.predicate
    }
}

impl<I: 'static> From<Predicate<I>> for Pattern<I> {
    fn from(predicate: Predicate<I>) -> Self {
        Self::predicate(predicate)
    }
}

impl<I> Clone for Pattern<I> {
    fn clone(&self) -> Self {
        Self {
            kind: self.kind,
            predicate: self.predicate.clone(),
        }
    }
}

impl<I> fmt::Debug for Pattern<I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Pattern").field(&self.kind).finish()
    }
}

type TransformFn<I, T> = dyn Fn(&I) -> T + Send + Sync;

/// A predicate paired with a transformer from `I` to an intermediate type `T`.
///
/// The predicate decides eligibility (e.g. a type or shape check); the
/// transformer performs the narrowing (e.g. a checked downcast or a
/// projection). The transformer is only ever invoked on values the
/// predicate accepted, so it need not re-check.
///
/// # Example
///
/// ```
/// use matcha::{Predicate, TransformerPredicate};
///
/// let halves = TransformerPredicate::new(
///     Predicate::new(|i: &i32| i % 2 == 0),
///     |i: &i32| i / 2,
/// );
/// assert!(halves.predicate().test(&8));
/// assert_eq!(halves.transform(&8), 4);
/// ```
pub struct TransformerPredicate<I, T> {
    kind: PatternKind,
    predicate: Predicate<I>,
    transformer: Arc<TransformFn<I, T>>,
}

impl<I: 'static, T: 'static> TransformerPredicate<I, T> {
    /// Pair a predicate with a transformer.
    pub fn new<F>(predicate: Predicate<I>, transformer: F) -> Self
    where
        F: Fn(&I) -> T + Send + Sync + 'static,
    {
        Self {
            kind: PatternKind::Narrow(type_name::<T>()),
            predicate,
            transformer: Arc::new(transformer),
        }
    }

    /// Build both halves from one checked projection.
    ///
    /// The value is eligible when `project` returns `Some`; the transformer
    /// re-runs the projection and yields the narrowed value.
    ///
    /// # Panics
    ///
    /// The transformer panics if invoked on a value the projection rejects.
    /// The engine only transforms values whose predicate held, so this is
    /// unreachable through [`MatchExpression`](crate::MatchExpression).
    pub fn checked<F>(project: F) -> Self
    where
        F: Fn(&I) -> Option<T> + Send + Sync + 'static,
    {
        let project = Arc::new(project);
        let probe = Arc::clone(&project);
        Self::new(Predicate::new(move |v| probe(v).is_some()), move |v| {
            match project(v) {
                Some(narrowed) => narrowed,
                None => panic!(
                    "narrowing to `{}` applied to a value its predicate rejects",
                    type_name::<T>()
                ),
            }
        })
    }

    /// Override the kind tag reported in traces.
    #[must_use]
    pub fn with_kind(mut self, kind: PatternKind) -> Self {
        self.kind = kind;
        self
    }

    /// The kind tag reported in traces.
    #[must_use]
    pub fn kind(&self) -> PatternKind {
        self.kind
    }

    /// The eligibility predicate.
    #[must_use]
    pub fn predicate(&self) -> &Predicate<I> {
        &self.predicate
    }

    /// Narrow an eligible value to `T`.
    ///
    /// Callers must only pass values accepted by [`predicate`](Self::predicate).
    #[inline]
    pub fn transform(&self, value: &I) -> T {
        (self.transformer)(value)
    }
}

impl<I, T> Clone for TransformerPredicate<I, T> {
    fn clone(&self) -> Self {
        Self {
            kind: self.kind,
            predicate: self.predicate.clone(),
            transformer: Arc::clone(&self.transformer),
        }
    }
}

impl<I, T> fmt::Debug for TransformerPredicate<I, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransformerPredicate")
            .field("kind", &self.kind)
            .finish_non_exhaustive()
    }
}
