//! `fd-registry` — named destinations and exclusive craft claims.
//!
//! # Crate layout
//!
//! | Module          | Contents                                                   |
//! |-----------------|------------------------------------------------------------|
//! | [`destination`] | `Destination`, `DestinationSpec`                           |
//! | [`registry`]    | `DestinationRegistry` (claim tables), `RegistryBuilder`    |
//! | [`loader`]      | `load_destinations_csv`, `load_destinations_reader`        |
//! | [`error`]       | `RegistryError`, `RegistryResult<T>`                       |
//!
//! # Claim model (summary)
//!
//! ```text
//! claim(d, c)   d held by c' ≠ c  → AlreadyClaimed, nothing changes
//!               otherwise         → c's old claim cleared, (c ↔ d) recorded
//! release(c)                      → (c ↔ d) removed, no-op if c holds nothing
//! ```
//!
//! At most one destination is primary; [`DestinationRegistry::designate_primary`]
//! refuses while another primary exists.
//!
//! # Feature flags
//!
//! | Flag      | Effect                                              |
//! |-----------|-----------------------------------------------------|
//! | `fx-hash` | Claim tables use `FxHashMap` instead of `HashMap`.  |
//! | `serde`   | `Serialize` on `Destination`.                       |

pub mod destination;
pub mod error;
pub mod loader;
pub mod registry;

#[cfg(test)]
mod tests;

pub use destination::{Destination, DestinationSpec};
pub use error::{RegistryError, RegistryResult};
pub use loader::{load_destinations_csv, load_destinations_reader};
pub use registry::{DestinationRegistry, RegistryBuilder};
