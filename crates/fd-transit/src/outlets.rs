//! Collaborator contracts the transit machine reports through.
//!
//! None of these affect dispatch decisions; they exist so a host can route
//! announcements, sounds, and audit records into its own systems.  Every
//! trait has a no-op implementation in [`Silent`].

use std::time::Duration;

use fd_core::{ActorId, CraftId, DestinationId, FactionId};
use tracing::info;

// ── Actors ────────────────────────────────────────────────────────────────────

/// Whoever pressed the button.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct Actor {
    pub id:       ActorId,
    pub faction:  FactionId,
    /// Carries the hijack capability.
    pub hijacker: bool,
}

impl Actor {
    pub fn new(id: ActorId, faction: FactionId) -> Self {
        Self { id, faction, hijacker: false }
    }

    pub fn hijacker(id: ActorId, faction: FactionId) -> Self {
        Self { id, faction, hijacker: true }
    }
}

// ── Audit ─────────────────────────────────────────────────────────────────────

/// One successful dispatch, as written to the audit log.
#[derive(Clone, PartialEq, Debug)]
pub struct LaunchRecord {
    pub actor:       Option<ActorId>,
    pub craft:       CraftId,
    pub destination: DestinationId,
    pub name:        String,
    pub hijacked:    bool,
}

pub trait AuditLog {
    fn record(&mut self, entry: &LaunchRecord);
}

/// Audit log that writes each record as an `info` event on the
/// `fd_transit::audit` target.
#[derive(Copy, Clone, Default, Debug)]
pub struct TracingAuditLog;

impl AuditLog for TracingAuditLog {
    fn record(&mut self, entry: &LaunchRecord) {
        info!(
            target: "fd_transit::audit",
            actor       = ?entry.actor,
            craft       = %entry.craft,
            destination = %entry.destination,
            name        = %entry.name,
            hijacked    = entry.hijacked,
            "craft launched",
        );
    }
}

// ── Broadcast ─────────────────────────────────────────────────────────────────

/// Who hears an announcement or a cue.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Audience {
    Faction(FactionId),
    AllExcept(FactionId),
    Everyone,
}

pub trait FactionBroadcast {
    /// `delay` of `None` means immediately.
    fn announce(&mut self, audience: Audience, message: &str, delay: Option<Duration>);
}

// ── Audio ─────────────────────────────────────────────────────────────────────

/// Where a cue is heard.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum CueTarget {
    /// Positional, at the craft.
    Craft(CraftId),
    /// Global, filtered by audience.
    Audience(Audience),
}

pub trait AudioCues {
    fn play(&mut self, cue: &str, target: CueTarget);
}

// ── Events ────────────────────────────────────────────────────────────────────

/// Gameplay events raised when a transit completes.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum TransitEvent {
    LandedOnPlanet { craft: CraftId },
    HijackLanded { craft: CraftId },
}

pub trait TransitEvents {
    fn raise(&mut self, event: TransitEvent);
}

// ── Silent ────────────────────────────────────────────────────────────────────

/// Swallows everything.
#[derive(Copy, Clone, Default, Debug)]
pub struct Silent;

impl AuditLog for Silent {
    fn record(&mut self, _entry: &LaunchRecord) {}
}

impl FactionBroadcast for Silent {
    fn announce(&mut self, _audience: Audience, _message: &str, _delay: Option<Duration>) {}
}

impl AudioCues for Silent {
    fn play(&mut self, _cue: &str, _target: CueTarget) {}
}

impl TransitEvents for Silent {
    fn raise(&mut self, _event: TransitEvent) {}
}

// ── Outlets ───────────────────────────────────────────────────────────────────

/// The full set of sinks a [`TransitMachine`](crate::TransitMachine) writes to.
pub struct Outlets {
    pub audit:     Box<dyn AuditLog>,
    pub broadcast: Box<dyn FactionBroadcast>,
    pub audio:     Box<dyn AudioCues>,
    pub events:    Box<dyn TransitEvents>,
}

impl Default for Outlets {
    /// Audit records go to `tracing`; everything else is dropped.
    fn default() -> Self {
        Self {
            audit:     Box::new(TracingAuditLog),
            broadcast: Box::new(Silent),
            audio:     Box::new(Silent),
            events:    Box::new(Silent),
        }
    }
}

impl std::fmt::Debug for Outlets {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Outlets").finish_non_exhaustive()
    }
}
