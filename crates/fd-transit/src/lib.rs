//! `fd-transit` — the per-craft transit state machine.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                        |
//! |-------------|-----------------------------------------------------------------|
//! | [`craft`]   | `Hull`, `Craft`, `CraftDefaults`, `TransitState`                |
//! | [`store`]   | `CraftStore` — registered hulls and dispatch records            |
//! | [`machine`] | `TransitMachine`, `LaunchRequest`, `LaunchReport`, `LockOutcome` |
//! | [`mover`]   | `TransportMover` trait, `TransitOrder`, `TimedMover`            |
//! | [`channel`] | `phase_channel`, `PhaseSender`, `PhaseReceiver`                 |
//! | [`outlets`] | Audit/broadcast/audio/event traits, `Silent`, `Outlets`         |
//! | [`error`]   | `LaunchError`, `LaunchErrorKind`, `LaunchResult<T>`             |
//!
//! # Data flow
//!
//! ```text
//! launch ──► registry.claim ──► mover.begin_transit
//!                                     │
//!                      PhaseSender ◄──┘ (Requesting, Travelling, Arriving, Completed)
//!                           │
//! dispatcher drains ──► TransitMachine::on_phase_changed ──► TransitEvents
//! ```

pub mod channel;
pub mod craft;
pub mod error;
pub mod machine;
pub mod mover;
pub mod outlets;
pub mod store;

#[cfg(test)]
mod tests;

pub use channel::{PhaseReceiver, PhaseSender, phase_channel};
pub use craft::{Craft, CraftDefaults, Hull, TransitState};
pub use error::{LaunchError, LaunchErrorKind, LaunchResult};
pub use machine::{LaunchReport, LaunchRequest, LockOutcome, TransitMachine};
pub use mover::{TimedMover, TransitOrder, TransportMover};
pub use outlets::{
    Actor, Audience, AuditLog, AudioCues, CueTarget, FactionBroadcast, LaunchRecord, Outlets,
    Silent, TracingAuditLog, TransitEvent, TransitEvents,
};
pub use store::CraftStore;
