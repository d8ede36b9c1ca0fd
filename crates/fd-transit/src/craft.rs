//! Per-craft dispatch state.

use std::time::Duration;

use fd_core::{CraftId, FactionId, PhaseStatus, SimTime, TransitPhase, Vec2};

/// Static facts about a transit-capable hull, registered by the host.
///
/// A craft id with no `Hull` is not a transit vehicle: launches from it fail
/// and lock toggles on it are ignored.
#[derive(Clone, Debug, PartialEq)]
pub struct Hull {
    /// Local centre of mass; the mover positions hulls by this point.
    pub center_of_mass: Vec2,
    /// Faction that owns and defends the craft.
    pub faction: FactionId,
}

impl Hull {
    pub fn new(center_of_mass: Vec2, faction: FactionId) -> Self {
        Self { center_of_mass, faction }
    }
}

/// Mutable dispatch record for one craft.
///
/// Created the first time a craft is dispatched (or locked, or crashed) and
/// kept for the craft's lifetime.  The claimed destination is not stored
/// here; it lives in the destination registry's claim tables.
#[derive(Clone, Debug, PartialEq)]
pub struct Craft {
    pub id: CraftId,

    /// Dock doors are forcibly locked.
    pub locked: bool,

    /// Time of the last lock flip; `None` if the lock was never toggled.
    pub last_lock_toggle: Option<SimTime>,

    pub lock_cooldown: Duration,

    /// Terminal failure.  A crashed craft is never dispatched again.
    pub crashed: bool,

    /// Delay before the defending faction hears about a hijack.
    pub announce_hijack_in: Duration,

    /// Cue played at the craft when it is hijacked.
    pub local_hijack_cue: String,

    /// Cue played to everybody outside the hijacker's faction.
    pub alarm_hijack_cue: String,
}

impl Craft {
    pub fn new(id: CraftId, defaults: &CraftDefaults) -> Self {
        Self {
            id,
            locked:             false,
            last_lock_toggle:   None,
            lock_cooldown:      defaults.lock_cooldown,
            crashed:            false,
            announce_hijack_in: defaults.announce_hijack_in,
            local_hijack_cue:   defaults.local_hijack_cue.clone(),
            alarm_hijack_cue:   defaults.alarm_hijack_cue.clone(),
        }
    }

    /// `true` if the lock may flip at `now`.
    #[inline]
    pub fn can_toggle_lock(&self, now: SimTime) -> bool {
        match self.last_lock_toggle {
            None => true,
            Some(last) => now.since(last) >= self.lock_cooldown,
        }
    }
}

/// Values copied into every newly created [`Craft`].
#[derive(Clone, Debug, PartialEq)]
pub struct CraftDefaults {
    pub lock_cooldown:      Duration,
    pub announce_hijack_in: Duration,
    pub local_hijack_cue:   String,
    pub alarm_hijack_cue:   String,
}

impl Default for CraftDefaults {
    fn default() -> Self {
        Self {
            lock_cooldown:      Duration::from_secs(5),
            announce_hijack_in: Duration::from_secs(7),
            local_hijack_cue:   "hijack_local".into(),
            alarm_hijack_cue:   "hijack_alarm".into(),
        }
    }
}

/// The externally visible state of a craft.
///
/// ```text
/// Idle → Requesting → Travelling → Arriving → Idle
///   └──────────────── Crashed (absorbing) ◄──────┘
/// ```
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum TransitState {
    Idle,
    Requesting,
    Travelling,
    Arriving,
    Crashed,
}

impl TransitState {
    /// Combine the crash flag with the mover's phase.
    pub fn resolve(crashed: bool, status: Option<PhaseStatus>) -> TransitState {
        if crashed {
            return TransitState::Crashed;
        }
        match status.filter(|s| s.running).map(|s| s.phase) {
            None | Some(TransitPhase::Available) => TransitState::Idle,
            Some(TransitPhase::Requesting) => TransitState::Requesting,
            Some(TransitPhase::Travelling) => TransitState::Travelling,
            Some(TransitPhase::Arriving) => TransitState::Arriving,
        }
    }
}
