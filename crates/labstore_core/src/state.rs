//! Collection lifecycle states.

use std::fmt;

/// Lifecycle state of a collection or session.
///
/// The progression is `Uninitialized -> Hydrating -> Ready`, driven once at
/// construction. `Ready` is terminal: mutations never re-hydrate, and there
/// is no error state - hydration failures degrade to `Ready` with seed data,
/// recorded in the [`HydrationOutcome`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    /// Constructed, hydration not yet started.
    Uninitialized,
    /// The durable value is being read. The mirror may hold incomplete data.
    Hydrating,
    /// Hydration finished; reads reflect the latest completed mutation.
    Ready(HydrationOutcome),
}

impl LoadState {
    /// Returns whether hydration has completed.
    #[must_use]
    pub const fn is_ready(self) -> bool {
        matches!(self, Self::Ready(_))
    }

    /// Returns the hydration outcome, if hydration has completed.
    #[must_use]
    pub const fn outcome(self) -> Option<HydrationOutcome> {
        match self {
            Self::Ready(outcome) => Some(outcome),
            _ => None,
        }
    }
}

/// How a collection's initial contents were obtained.
///
/// This is what lets a consumer distinguish "the collection is empty" from
/// "the stored value was unreadable and we fell back to defaults".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HydrationOutcome {
    /// The stored value existed and parsed; the collection holds it.
    Loaded,
    /// No stored value existed; the collection holds its seed, which was
    /// written back to storage.
    Seeded,
    /// The stored value existed but could not be read or parsed; the
    /// collection holds its seed and the stored value was left untouched
    /// (unless the store is configured to reseed on corruption).
    Recovered,
}

impl fmt::Display for HydrationOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Loaded => write!(f, "loaded"),
            Self::Seeded => write!(f, "seeded"),
            Self::Recovered => write!(f, "recovered"),
        }
    }
}
