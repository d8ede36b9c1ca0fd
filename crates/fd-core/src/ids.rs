//! Strongly typed, zero-cost identifier wrappers.
//!
//! All IDs are `Copy + Ord + Hash` so they can be used as map keys and in
//! ordered collections without ceremony.  Ordering matters: registries and
//! terminal indices iterate in ascending id order, which is what makes
//! refreshes and candidate walks deterministic across runs.

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

            #[inline(always)]
            pub fn is_valid(self) -> bool {
                self != Self::INVALID
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

        impl TryFrom<usize> for $name {
            type Error = std::num::TryFromIntError;
            fn try_from(n: usize) -> Result<$name, Self::Error> {
                <$inner>::try_from(n).map($name)
            }
        }
    };
}

typed_id! {
    /// A transit-capable hull (the grid a navigation terminal is mounted on).
    pub struct CraftId(u32);
}

typed_id! {
    /// A named landing destination.  Assigned sequentially in creation order.
    pub struct DestinationId(u32);
}

typed_id! {
    /// A navigation terminal (the in-world console players interact with).
    pub struct TerminalId(u32);
}

typed_id! {
    /// A boundary access point (airlock / docking door).
    pub struct DoorId(u32);
}

typed_id! {
    /// A user issuing commands: a player, an admin, or nobody for automation.
    pub struct ActorId(u32);
}

typed_id! {
    /// A faction used to pick broadcast audiences.
    pub struct FactionId(u16);
}
