//! `fd-core` — foundational types for the FTL dispatch engine.
//!
//! This crate is a dependency of every other `fd-*` crate.  It has no `fd-*`
//! dependencies and minimal external ones (only `thiserror`, plus optional
//! `serde`).
//!
//! # What lives here
//!
//! | Module      | Contents                                                   |
//! |-------------|------------------------------------------------------------|
//! | [`ids`]     | `CraftId`, `DestinationId`, `TerminalId`, `DoorId`, …      |
//! | [`pose`]    | `Vec2`, `Pose`, the landing-pad alignment correction       |
//! | [`time`]    | `Tick`, `SimTime`, `SimClock`, `DispatchConfig`            |
//! | [`phase`]   | `TransitPhase`, `PhaseChange`, `PhaseNotice`, `PhaseSource`|
//! | [`site`]    | `SiteTags` — what kind of map a destination sits on        |
//! | [`error`]   | `CoreError`, `CoreResult`                                  |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod error;
pub mod ids;
pub mod phase;
pub mod pose;
pub mod site;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{CoreError, CoreResult};
pub use ids::{ActorId, CraftId, DestinationId, DoorId, FactionId, TerminalId};
pub use phase::{PhaseChange, PhaseNotice, PhaseSource, PhaseStatus, TransitPhase};
pub use pose::{PAD_ALIGNMENT, Pose, Vec2};
pub use site::SiteTags;
pub use time::{DispatchConfig, SimClock, SimTime, Tick};
