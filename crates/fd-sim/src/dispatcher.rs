//! The `Dispatcher` struct and its tick loop.

use std::time::Duration;

use fd_core::{
    ActorId, CraftId, DestinationId, DispatchConfig, PhaseChange, PhaseNotice, PhaseSource,
    SimClock, SimTime, TerminalId,
};
use fd_doors::DoorStore;
use fd_registry::DestinationRegistry;
use fd_terminal::{TerminalDisplay, TerminalIndex, open_hijack_console, refresh_all};
use fd_transit::{
    Actor, Audience, CueTarget, LaunchReport, LaunchRequest, LaunchResult, LockOutcome,
    PhaseReceiver, PhaseSender, TransitMachine, TransitState, TransportMover,
};
use tracing::{info, warn};

use crate::{AutoDesignationMonitor, DispatchObserver, PrimaryDesignator};

const PRIMARY_CUE: &str = "primary_designated";

// ── Dispatcher ────────────────────────────────────────────────────────────────

/// Owns every piece of dispatch state and drives it one tick at a time.
///
/// Each tick:
///
/// 1. **Mover**: `advance` the transport mover to the current time.
/// 2. **Notices**: drain the phase channel; the transit machine handles each
///    notice in send order.  Any notice triggers one terminal refresh.
/// 3. **Monitor**: run the auto-designation monitor.
///
/// Direct calls (`launch`, `toggle_lock`, `designate_primary`, …) run to
/// completion at the current clock time and refresh terminals themselves
/// where the visible state changed.
///
/// Create via [`DispatchBuilder`][crate::DispatchBuilder].
pub struct Dispatcher<M: TransportMover, D: TerminalDisplay> {
    pub config: DispatchConfig,

    pub clock: SimClock,

    /// Destinations and the craft claims on them.
    pub registry: DestinationRegistry,

    /// Per-craft transit state plus the mover and outlets.
    pub machine: TransitMachine<M>,

    pub doors: DoorStore,

    pub terminals: TerminalIndex,

    pub display: D,

    pub monitor: AutoDesignationMonitor,

    pub(crate) designator: Box<dyn PrimaryDesignator>,
    pub(crate) notices:    PhaseReceiver,
    pub(crate) updates:    PhaseSender,
}

impl<M: TransportMover, D: TerminalDisplay> Dispatcher<M, D> {
    // ── Time ──────────────────────────────────────────────────────────────

    #[inline]
    pub fn now(&self) -> SimTime {
        self.clock.now()
    }

    /// Time since the round started.
    #[inline]
    pub fn round_elapsed(&self) -> Duration {
        self.clock.elapsed()
    }

    // ── Tick loop ─────────────────────────────────────────────────────────

    /// Run until `config.end_tick()`.
    pub fn run<O: DispatchObserver>(&mut self, observer: &mut O) {
        while self.clock.current_tick < self.config.end_tick() {
            self.tick(observer);
        }
        observer.on_run_end(self.clock.current_tick);
    }

    /// Run exactly `n` ticks, ignoring the end tick.
    pub fn run_ticks<O: DispatchObserver>(&mut self, n: u64, observer: &mut O) {
        for _ in 0..n {
            self.tick(observer);
        }
    }

    /// Process one tick and advance the clock.  Returns the number of phase
    /// notices handled.
    pub fn tick<O: DispatchObserver>(&mut self, observer: &mut O) -> usize {
        let tick = self.clock.current_tick;
        let now = self.clock.now();
        observer.on_tick_start(tick);

        self.machine.mover_mut().advance(now);

        let notices = self.notices.drain();
        for notice in &notices {
            self.machine.on_phase_changed(*notice);
            observer.on_phase(notice);
        }
        if !notices.is_empty() {
            self.refresh_views();
        }

        if let Some(destination) = self.auto_designate() {
            observer.on_primary_designated(tick, destination);
        }

        observer.on_tick_end(tick, notices.len());
        self.clock.advance();
        notices.len()
    }

    fn auto_designate(&mut self) -> Option<DestinationId> {
        let elapsed = self.round_elapsed();
        let destination =
            self.monitor.check(&mut self.registry, self.designator.as_mut(), elapsed)?;
        self.announce_primary(destination);
        self.refresh_views();
        Some(destination)
    }

    // ── Launch ────────────────────────────────────────────────────────────

    /// Launch and refresh terminals on success.
    pub fn try_launch(&mut self, req: LaunchRequest) -> LaunchResult<LaunchReport> {
        let now = self.now();
        let report = self.machine.try_launch(&mut self.registry, req, now)?;
        self.refresh_views();
        Ok(report)
    }

    /// [`try_launch`](Self::try_launch) with refusals logged and reported as
    /// `false`.
    pub fn launch(&mut self, req: LaunchRequest) -> bool {
        let now = self.now();
        let ok = self.machine.launch(&mut self.registry, req, now);
        if ok {
            self.refresh_views();
        }
        ok
    }

    /// Launch the craft `terminal` is mounted on.
    ///
    /// A hijacker picking a hijack target counts as a hijack.
    pub fn launch_from(
        &mut self,
        terminal:    TerminalId,
        destination: DestinationId,
        user:        Option<Actor>,
    ) -> bool {
        let Some(craft) = self.terminals.mount_of(terminal) else {
            warn!(%terminal, "launch from an unmounted terminal");
            return false;
        };
        let hijack = user.is_some_and(|u| u.hijacker)
            && self.registry.get(destination).is_some_and(|d| d.hijack_target);

        let mut req = LaunchRequest::new(craft, destination);
        if let Some(user) = user {
            req = req.by(user);
        }
        if hijack {
            req = req.hijack();
        }
        self.launch(req)
    }

    // ── Terminals ─────────────────────────────────────────────────────────

    /// Flip the dock lock of the craft `terminal` is mounted on.
    pub fn toggle_lock(&mut self, terminal: TerminalId, requester: Option<ActorId>) -> LockOutcome {
        let now = self.now();
        let craft = self.terminals.mount_of(terminal);
        self.machine.toggle_lock(craft, requester, now, &mut self.doors)
    }

    /// A hijacker uses `terminal`: open the hijack console.
    ///
    /// Returns `false` (and opens nothing) for non-hijackers, unmounted
    /// terminals, and crashed craft.
    pub fn activate_terminal(&mut self, terminal: TerminalId, actor: Actor) -> bool {
        if !actor.hijacker {
            return false;
        }
        let Some(craft) = self.terminals.mount_of(terminal) else { return false };
        if self.machine.state(craft) == TransitState::Crashed {
            return false;
        }
        open_hijack_console(terminal, actor.id, &self.registry, &mut self.display);
        true
    }

    /// Re-render every open terminal.
    pub fn refresh_views(&mut self) {
        refresh_all(&self.terminals, &self.registry, &self.machine, &mut self.display);
    }

    // ── Primary destination ───────────────────────────────────────────────

    /// Manually designate `destination` as primary.
    pub fn designate_primary(&mut self, actor: Option<ActorId>, destination: DestinationId) -> bool {
        if !self.designator.designate(&mut self.registry, destination, actor) {
            return false;
        }
        self.announce_primary(destination);
        self.refresh_views();
        true
    }

    fn announce_primary(&mut self, destination: DestinationId) {
        let name = self
            .registry
            .get(destination)
            .map(|d| d.name.clone())
            .unwrap_or_default();
        let message = format!("{name} is now the primary landing zone.");
        let outlets = self.machine.outlets_mut();
        outlets.broadcast.announce(Audience::Everyone, &message, None);
        outlets.audio.play(PRIMARY_CUE, CueTarget::Audience(Audience::Everyone));
    }

    /// Live change of the auto-designation grace delay.  `config` and the
    /// monitor are updated together; the next tick uses the new delay.
    pub fn set_primary_auto_delay_mins(&mut self, mins: u64) {
        self.config.primary_auto_delay_mins = mins;
        self.monitor.set_delay(self.config.primary_auto_delay());
    }

    // ── Craft ─────────────────────────────────────────────────────────────

    /// Queue an `Updated` notice for `craft` so terminals re-render on the
    /// next tick.  `false` if the craft is not in transit.
    pub fn raise_update(&mut self, craft: CraftId) -> bool {
        if !self.machine.in_transit(craft) {
            return false;
        }
        self.updates.send(PhaseNotice { craft, change: PhaseChange::Updated, at: self.now() });
        true
    }

    /// Flag `craft` as crashed and refresh terminals.
    pub fn mark_crashed(&mut self, craft: CraftId) -> bool {
        if !self.machine.mark_crashed(craft) {
            return false;
        }
        info!(%craft, tick = %self.clock.current_tick, "crash recorded");
        self.refresh_views();
        true
    }

    pub fn state(&self, craft: CraftId) -> TransitState {
        self.machine.state(craft)
    }
}
