//! matcha-test: Test domain for conformance testing
//!
//! Provides a small trait-object hierarchy for runtime type matching and a
//! call counter for checking that deferred results and fallbacks stay lazy.
//!
//! # Example
//!
//! ```
//! use matcha_test::prelude::*;
//!
//! let vehicle: Box<dyn Vehicle> = Box::new(Car::new("Route 66"));
//! let kind = when(vehicle)
//!     .matched_to::<&str>()
//!     .matches_type::<Car>().then("car")
//!     .matches_type::<Airplane>().then("airplane")
//!     .otherwise("unknown");
//! assert_eq!(kind, "car");
//! ```

use matcha::Downcast;
use std::any::Any;
use std::fmt::Debug;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

#[cfg(feature = "fixtures")]
pub mod fixture;

// ═══════════════════════════════════════════════════════════════════════════════
// Vehicles
// ═══════════════════════════════════════════════════════════════════════════════

/// A value whose concrete type is only known at runtime.
pub trait Vehicle: Downcast + Send + Sync + Debug {
    /// Short human-readable name.
    fn name(&self) -> &'static str;
}

/// A car on a road.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Car {
    pub road: String,
}

impl Car {
    pub fn new(road: impl Into<String>) -> Self {
        Self { road: road.into() }
    }
}

/// An airplane at some altitude, in feet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Airplane {
    pub altitude: u32,
}

impl Airplane {
    pub fn new(altitude: u32) -> Self {
        Self { altitude }
    }
}

/// A spaceship bound for a planet. No rule in the shared fixtures knows it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Spaceship {
    pub planet: String,
}

impl Spaceship {
    pub fn new(planet: impl Into<String>) -> Self {
        Self {
            planet: planet.into(),
        }
    }
}

macro_rules! impl_vehicle {
    ($($ty:ident => $name:literal),* $(,)?) => {$(
        impl Vehicle for $ty {
            fn name(&self) -> &'static str {
                $name
            }
        }

        impl Downcast for $ty {
            fn as_any(&self) -> &dyn Any {
                self
            }
        }
    )*};
}

impl_vehicle! {
    Car => "car",
    Airplane => "airplane",
    Spaceship => "spaceship",
}

// ═══════════════════════════════════════════════════════════════════════════════
// Counter
// ═══════════════════════════════════════════════════════════════════════════════

/// Shared call counter.
///
/// Clones share the same count, so a clone can move into a `Send + Sync`
/// closure while the test keeps the original to inspect.
#[derive(Debug, Clone, Default)]
pub struct Counter {
    calls: Arc<AtomicUsize>,
}

impl Counter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one call.
    pub fn hit(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }

    /// Number of calls recorded so far.
    #[must_use]
    pub fn count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Wrap `value` in a supplier that records each call.
    pub fn supplier<O: Clone + Send + Sync + 'static>(
        &self,
        value: O,
    ) -> impl Fn() -> O + Send + Sync + 'static {
        let counter = self.clone();
        move || {
            counter.hit();
            value.clone()
        }
    }

    /// Wrap `test` in a predicate function that records each call.
    pub fn predicate<I, F>(&self, test: F) -> impl Fn(&I) -> bool + Send + Sync + 'static
    where
        I: 'static,
        F: Fn(&I) -> bool + Send + Sync + 'static,
    {
        let counter = self.clone();
        move |value: &I| {
            counter.hit();
            test(value)
        }
    }
}

/// Prelude for convenient imports.
pub mod prelude {
    pub use super::{Airplane, Car, Counter, Spaceship, Vehicle};
    pub use matcha::prelude::*;
}

#[cfg(test)]
mod tests {
    use super::*;
    use matcha::{matchers, when};

    #[test]
    fn test_counter_shared_between_clones() {
        let counter = Counter::new();
        let clone = counter.clone();
        clone.hit();
        clone.hit();
        assert_eq!(counter.count(), 2);
    }

    #[test]
    fn test_counter_supplier() {
        let counter = Counter::new();
        let supply = counter.supplier("x");
        assert_eq!(counter.count(), 0);
        assert_eq!(supply(), "x");
        assert_eq!(counter.count(), 1);
    }

    #[test]
    fn test_vehicle_downcast() {
        let vehicle: Box<dyn Vehicle> = Box::new(Airplane::new(30_000));
        assert_eq!(vehicle.name(), "airplane");
        assert_eq!(
            vehicle.as_any().downcast_ref::<Airplane>(),
            Some(&Airplane::new(30_000))
        );
        assert!(vehicle.as_any().downcast_ref::<Car>().is_none());
    }

    #[test]
    fn test_vehicle_narrowing() {
        let vehicle: Box<dyn Vehicle> = Box::new(Car::new("Main St"));
        let road = when(vehicle)
            .matched_to::<String>()
            .narrows(matchers::instance::<Car, _>(), |car| car.road)
            .otherwise_map(|other| other.name().to_string());
        assert_eq!(road, "Main St");
    }
}
