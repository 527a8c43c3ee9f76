//! Strongly typed, zero-cost identifier wrappers.
//!
//! All IDs are `Copy + Ord + Hash` so they can be used as map keys and set
//! elements without ceremony.  The inner integer is `pub` to allow direct
//! indexing into per-entity `Vec`s, but callers should prefer `.index()`.

use std::fmt;

/// Generate a typed ID wrapper around a primitive integer.
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty);) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis struct $name(pub $inner);

        impl $name {
            /// Sentinel meaning "no valid ID".
            pub const INVALID: $name = $name(<$inner>::MAX);

            /// Cast to `usize` for direct use as a `Vec` index.
            #[inline(always)]
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl Default for $name {
            /// Returns the `INVALID` sentinel so uninitialized IDs are visibly invalid.
            #[inline(always)]
            fn default() -> Self {
                Self::INVALID
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl From<$name> for usize {
            #[inline(always)]
            fn from(id: $name) -> usize {
                id.0 as usize
            }
        }

        impl TryFrom<usize> for $name {
            type Error = std::num::TryFromIntError;
            fn try_from(n: usize) -> Result<$name, Self::Error> {
                <$inner>::try_from(n).map($name)
            }
        }
    };
}

typed_id! {
    /// Ordinal floor number, `0` is the ground floor.
    pub struct FloorId(u32);
}

typed_id! {
    /// Index of an elevator car in the building's fleet.
    pub struct ElevatorId(u32);
}

typed_id! {
    /// Index of a resident in the building's person arena.
    pub struct PersonId(u32);
}

typed_id! {
    /// Index of an activity in the application's activity catalog.
    /// `u16` keeps schedule arrays compact.
    pub struct ActivityId(u16);
}

impl FloorId {
    /// Number of floors between `self` and `other`.
    #[inline]
    pub fn distance(self, other: FloorId) -> u32 {
        self.0.abs_diff(other.0)
    }

    /// `true` if this floor exists in a building of `floor_count` floors.
    #[inline]
    pub fn within(self, floor_count: usize) -> bool {
        self.index() < floor_count
    }
}
