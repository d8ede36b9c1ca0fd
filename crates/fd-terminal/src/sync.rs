//! Render craft transit state onto open terminals.
//!
//! ```text
//! navigation console closed, or
//! terminal unmounted                  → untouched
//! craft idle (no phase / Available)   → Destinations
//! otherwise                           → Travelling(phase, since, name)
//! ```

use fd_core::{ActorId, CraftId, PhaseSource, TerminalId, TransitPhase};
use fd_registry::DestinationRegistry;
use tracing::{error, trace};

use crate::{
    ConsoleKind, DestinationEntry, NavView, TerminalDisplay, TerminalIndex, TravelStatus,
};

/// The destination picker for an idle craft: every destination in creation
/// order.
pub fn destinations_view(registry: &DestinationRegistry) -> NavView {
    NavView::Destinations(
        registry
            .list_available()
            .map(|d| DestinationEntry::from_destination(d, registry.claimed_by(d.id).is_some()))
            .collect(),
    )
}

/// The hijacker console list.
pub fn hijack_view(registry: &DestinationRegistry) -> NavView {
    NavView::HijackTargets(
        registry
            .hijack_destinations()
            .map(|d| DestinationEntry::from_destination(d, registry.claimed_by(d.id).is_some()))
            .collect(),
    )
}

/// The view an open terminal on `craft` should show right now.
pub fn view_for(craft: CraftId, registry: &DestinationRegistry, phases: &dyn PhaseSource) -> NavView {
    let status = match phases.status(craft) {
        Some(s) if s.running && s.phase != TransitPhase::Available => s,
        _ => return destinations_view(registry),
    };

    let destination_name = match registry.destination_of(craft).and_then(|id| registry.get(id)) {
        Some(dest) => dest.name.clone(),
        None => {
            error!(%craft, phase = %status.phase, "craft in transit has no claimed destination");
            String::new()
        }
    };

    NavView::Travelling(TravelStatus {
        phase: status.phase,
        phase_started: status.since,
        destination_name,
    })
}

/// Update the navigation console of one terminal.  Closed consoles,
/// unmounted terminals and the hijacker console are left alone.
pub fn refresh(
    index:    &TerminalIndex,
    terminal: TerminalId,
    registry: &DestinationRegistry,
    phases:   &dyn PhaseSource,
    display:  &mut dyn TerminalDisplay,
) {
    if !display.is_open(terminal, ConsoleKind::Navigation) {
        return;
    }
    let Some(craft) = index.mount_of(terminal) else { return };
    display.set_view(terminal, ConsoleKind::Navigation, view_for(craft, registry, phases));
}

/// Update every registered terminal in id order.
pub fn refresh_all(
    index:    &TerminalIndex,
    registry: &DestinationRegistry,
    phases:   &dyn PhaseSource,
    display:  &mut dyn TerminalDisplay,
) {
    for id in index.ids() {
        refresh(index, id, registry, phases, display);
    }
    trace!(terminals = index.len(), "terminals refreshed");
}

/// Open the hijacker console on `terminal` for `actor`, listing the hijack
/// targets.  Navigation refreshes never touch it.
pub fn open_hijack_console(
    terminal: TerminalId,
    actor:    ActorId,
    registry: &DestinationRegistry,
    display:  &mut dyn TerminalDisplay,
) {
    display.open(terminal, ConsoleKind::Hijacker, actor);
    display.set_view(terminal, ConsoleKind::Hijacker, hijack_view(registry));
}
