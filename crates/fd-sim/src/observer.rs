//! Dispatcher observer hooks.

use fd_core::{DestinationId, PhaseNotice, Tick};

/// Callbacks invoked by [`Dispatcher::tick`][crate::Dispatcher::tick].
///
/// All methods default to no-ops.
pub trait DispatchObserver {
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// Once per notice drained from the phase channel, after the transit
    /// machine has handled it.
    fn on_phase(&mut self, _notice: &PhaseNotice) {}

    /// The auto-designation monitor promoted `destination`.
    fn on_primary_designated(&mut self, _tick: Tick, _destination: DestinationId) {}

    /// `notices` is how many phase notices this tick handled.
    fn on_tick_end(&mut self, _tick: Tick, _notices: usize) {}

    /// Once after `run` reaches the configured end tick.
    fn on_run_end(&mut self, _final_tick: Tick) {}
}

/// A [`DispatchObserver`] that does nothing.
pub struct NoopObserver;

impl DispatchObserver for NoopObserver {}
