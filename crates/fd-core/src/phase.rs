//! Transit phases reported by the transport mover.
//!
//! The mover owns the phase; everything else reads it through
//! [`PhaseSource`] and reacts to [`PhaseNotice`]s delivered over the phase
//! channel.

use crate::{CraftId, SimTime, SiteTags};

/// The mover's state for one craft.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TransitPhase {
    /// Not flying; free to accept a new transit.
    #[default]
    Available,
    /// Spooling up before the jump.
    Requesting,
    /// In FTL.
    Travelling,
    /// Dropping out of FTL at the target.
    Arriving,
}

impl TransitPhase {
    /// `true` for the two phases during which the hull is not where it can be
    /// boarded (door locks are frozen while in these).
    #[inline]
    pub fn is_in_flight(self) -> bool {
        matches!(self, TransitPhase::Travelling | TransitPhase::Arriving)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TransitPhase::Available  => "available",
            TransitPhase::Requesting => "requesting",
            TransitPhase::Travelling => "travelling",
            TransitPhase::Arriving   => "arriving",
        }
    }
}

impl std::fmt::Display for TransitPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Snapshot of a craft's transit as seen by the mover.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PhaseStatus {
    pub phase: TransitPhase,
    /// `false` once the mover has stopped driving this transit.
    pub running: bool,
    /// When the current phase began.
    pub since: SimTime,
}

impl PhaseStatus {
    /// A running transit that has not yet dropped back to `Available`.
    #[inline]
    pub fn is_active(&self) -> bool {
        self.running && self.phase != TransitPhase::Available
    }
}

/// One change reported by the mover.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PhaseChange {
    Requesting,
    Travelling,
    Arriving,
    /// Mid-phase progress update; nothing changes but views are re-rendered.
    Updated,
    /// Transit finished; `site` tags the map the craft landed on.
    Completed { site: SiteTags },
}

impl PhaseChange {
    pub fn as_str(self) -> &'static str {
        match self {
            PhaseChange::Requesting       => "requesting",
            PhaseChange::Travelling       => "travelling",
            PhaseChange::Arriving         => "arriving",
            PhaseChange::Updated          => "updated",
            PhaseChange::Completed { .. } => "completed",
        }
    }
}

impl std::fmt::Display for PhaseChange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A phase change addressed to a craft, as carried on the phase channel.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PhaseNotice {
    pub craft:  CraftId,
    pub change: PhaseChange,
    pub at:     SimTime,
}

/// Read access to the mover's per-craft phase.
pub trait PhaseSource {
    /// `None` when the craft has no transit in progress.
    fn status(&self, craft: CraftId) -> Option<PhaseStatus>;

    /// `true` while the mover holds any transit record for `craft`, including
    /// one that is still spooling up.
    fn in_transit(&self, craft: CraftId) -> bool {
        self.status(craft).is_some()
    }
}
