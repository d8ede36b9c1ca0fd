//! What a navigation terminal shows.

use fd_core::{DestinationId, SimTime, TransitPhase};
use fd_registry::Destination;

/// One row of the destination picker.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct DestinationEntry {
    pub id:      DestinationId,
    pub name:    String,
    /// Some craft holds this destination.
    pub claimed: bool,
    pub primary: bool,
}

impl DestinationEntry {
    pub fn from_destination(dest: &Destination, claimed: bool) -> Self {
        Self {
            id: dest.id,
            name: dest.name.clone(),
            claimed,
            primary: dest.is_primary(),
        }
    }
}

/// The in-flight panel.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct TravelStatus {
    pub phase:            TransitPhase,
    pub phase_started:    SimTime,
    /// Empty when the claim tables could not name a destination.
    pub destination_name: String,
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub enum NavView {
    /// Craft idle: pick where to go.
    Destinations(Vec<DestinationEntry>),
    /// Craft in transit.
    Travelling(TravelStatus),
    /// Hijacker console: only hijack targets are offered.
    HijackTargets(Vec<DestinationEntry>),
}

impl NavView {
    /// The selectable rows, if this view has any.
    pub fn entries(&self) -> &[DestinationEntry] {
        match self {
            NavView::Destinations(e) | NavView::HijackTargets(e) => e,
            NavView::Travelling(_) => &[],
        }
    }
}
