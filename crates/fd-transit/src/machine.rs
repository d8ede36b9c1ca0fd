//! `TransitMachine`: launch validation, phase reactions, and the dock lock.
//!
//! # Launch
//!
//! ```text
//! 1. craft has a registered hull           else NotTransitVehicle
//! 2. mover holds no transit for it         else AlreadyInTransit
//! 3. craft not crashed                     else Crashed
//! 4. destination differs from its claim    else SameDestination
//! 5. destination exists                    else DestinationNotFound
//! 6. destination unclaimed by others       else Claim(AlreadyClaimed)
//! ── nothing above writes ──
//! 7. swap claim, begin transit, hijack notices, audit record
//! ```

use std::time::Duration;

use fd_core::{
    ActorId, CraftId, DestinationId, PhaseChange, PhaseNotice, PhaseSource, PhaseStatus, SimTime,
};
use fd_doors::{DoorStore, set_all_docks};
use fd_registry::DestinationRegistry;
use tracing::{debug, info, trace, warn};

use crate::{
    Actor, Audience, CraftStore, CueTarget, LaunchError, LaunchRecord, LaunchResult, Outlets,
    TransitEvent, TransitOrder, TransitState, TransportMover,
};

const HIJACKER_NOTICE: &str = "Flight controls seized. The craft is yours; ride it home.";
const DEFENDER_WARNING: &str = "Unauthorised launch detected aboard a transport. Hostiles are inbound in a hijacked craft.";

// ── Requests and outcomes ─────────────────────────────────────────────────────

/// Everything a launch needs.
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct LaunchRequest {
    pub craft:       CraftId,
    pub destination: DestinationId,
    pub user:        Option<Actor>,
    pub hijack:      bool,
    pub startup:     Option<Duration>,
    pub hyperspace:  Option<Duration>,
}

impl LaunchRequest {
    pub fn new(craft: CraftId, destination: DestinationId) -> Self {
        Self { craft, destination, user: None, hijack: false, startup: None, hyperspace: None }
    }

    pub fn by(mut self, user: Actor) -> Self {
        self.user = Some(user);
        self
    }

    pub fn hijack(mut self) -> Self {
        self.hijack = true;
        self
    }

    pub fn startup(mut self, d: Duration) -> Self {
        self.startup = Some(d);
        self
    }

    pub fn hyperspace(mut self, d: Duration) -> Self {
        self.hyperspace = Some(d);
        self
    }
}

/// A launch that went through.
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct LaunchReport {
    pub craft:    CraftId,
    /// Destination whose claim was dropped to make room for the new one.
    pub released: Option<DestinationId>,
    pub order:    TransitOrder,
}

/// Result of a lock toggle request.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum LockOutcome {
    /// No craft, not a transit vehicle, crashed, or in flight.
    Ignored,
    /// Toggled too recently.
    Cooldown,
    Locked { doors: usize },
    Unlocked { doors: usize },
}

// ── TransitMachine ────────────────────────────────────────────────────────────

#[derive(Debug)]
pub struct TransitMachine<M: TransportMover> {
    mover:   M,
    crafts:  CraftStore,
    outlets: Outlets,
}

impl<M: TransportMover> TransitMachine<M> {
    pub fn new(mover: M, crafts: CraftStore, outlets: Outlets) -> Self {
        Self { mover, crafts, outlets }
    }

    pub fn mover(&self) -> &M {
        &self.mover
    }

    pub fn mover_mut(&mut self) -> &mut M {
        &mut self.mover
    }

    pub fn crafts(&self) -> &CraftStore {
        &self.crafts
    }

    pub fn crafts_mut(&mut self) -> &mut CraftStore {
        &mut self.crafts
    }

    pub fn outlets_mut(&mut self) -> &mut Outlets {
        &mut self.outlets
    }

    pub fn state(&self, craft: CraftId) -> TransitState {
        TransitState::resolve(self.crafts.is_crashed(craft), self.mover.status(craft))
    }

    // ── Launch ────────────────────────────────────────────────────────────

    /// Validate and, if everything passes, dispatch `req.craft`.
    ///
    /// # Errors
    ///
    /// See the module table.  On error neither the registry, the craft
    /// records, nor the mover are touched.
    pub fn try_launch(
        &mut self,
        registry: &mut DestinationRegistry,
        req:      LaunchRequest,
        now:      SimTime,
    ) -> LaunchResult<LaunchReport> {
        let craft = req.craft;
        let hull = self.crafts.hull(craft).ok_or(LaunchError::NotTransitVehicle(craft))?.clone();
        if self.mover.in_transit(craft) {
            return Err(LaunchError::AlreadyInTransit(craft));
        }
        if self.crafts.is_crashed(craft) {
            return Err(LaunchError::Crashed(craft));
        }
        if registry.destination_of(craft) == Some(req.destination) {
            return Err(LaunchError::SameDestination { craft, destination: req.destination });
        }
        let dest = registry
            .get(req.destination)
            .ok_or(LaunchError::DestinationNotFound(req.destination))?;
        let (pose, site, name) = (dest.pose, dest.site, dest.name.clone());
        registry.check_claim(req.destination, craft)?;

        // ── commit ──
        let released = registry.claim(req.destination, craft)?;
        let order = TransitOrder {
            target:     pose.landing_target(hull.center_of_mass),
            site,
            startup:    req.startup,
            hyperspace: req.hyperspace,
        };
        self.mover.begin_transit(craft, order, now);

        let record = self.crafts.ensure(craft);
        if req.hijack {
            if let Some(user) = req.user {
                self.outlets.broadcast.announce(Audience::Faction(user.faction), HIJACKER_NOTICE, None);
                self.outlets.audio.play(&record.local_hijack_cue, CueTarget::Craft(craft));
                self.outlets.broadcast.announce(
                    Audience::Faction(hull.faction),
                    DEFENDER_WARNING,
                    Some(record.announce_hijack_in),
                );
                self.outlets.audio.play(
                    &record.alarm_hijack_cue,
                    CueTarget::Audience(Audience::AllExcept(user.faction)),
                );
            } else {
                warn!(%craft, "hijack launch without a user; no notices sent");
            }
        }

        self.outlets.audit.record(&LaunchRecord {
            actor:       req.user.map(|u| u.id),
            craft,
            destination: req.destination,
            name:        name.clone(),
            hijacked:    req.hijack,
        });
        info!(%craft, destination = %req.destination, %name, hijack = req.hijack, "launch accepted");

        Ok(LaunchReport { craft, released, order })
    }

    /// [`try_launch`](Self::try_launch) that logs refusals and reports only
    /// success.
    pub fn launch(
        &mut self,
        registry: &mut DestinationRegistry,
        req:      LaunchRequest,
        now:      SimTime,
    ) -> bool {
        match self.try_launch(registry, req, now) {
            Ok(_) => true,
            Err(e) => {
                warn!(craft = %req.craft, destination = %req.destination, error = %e, "launch refused");
                false
            }
        }
    }

    // ── Phase reactions ───────────────────────────────────────────────────

    /// React to a notice from the mover.  Every notice warrants a view
    /// refresh; only completion raises gameplay events.
    pub fn on_phase_changed(&mut self, notice: PhaseNotice) {
        let craft = notice.craft;
        match notice.change {
            PhaseChange::Completed { site } => {
                debug!(%craft, %site, "transit completed");
                if site.planetary {
                    self.outlets.events.raise(TransitEvent::LandedOnPlanet { craft });
                }
                if site.home_carrier && self.crafts.is_crashed(craft) {
                    self.outlets.events.raise(TransitEvent::HijackLanded { craft });
                }
            }
            change => trace!(%craft, %change, at = %notice.at, "phase change"),
        }
    }

    /// Flag `craft` as crashed.  Returns `false` for unknown hulls.
    ///
    /// Accepted in any state.  A craft flagged mid-flight still completes
    /// its transit, and a carrier landing then raises `HijackLanded`.
    pub fn mark_crashed(&mut self, craft: CraftId) -> bool {
        if !self.crafts.is_hull(craft) {
            return false;
        }
        self.crafts.ensure(craft).crashed = true;
        info!(%craft, "craft crashed");
        true
    }

    // ── Dock lock ─────────────────────────────────────────────────────────

    /// Flip the dock lock of `craft`.
    ///
    /// Ignored without a craft, for non-vehicles, for crashed craft, and
    /// while travelling or arriving.  Refused while the cooldown since the
    /// last flip is running.
    pub fn toggle_lock(
        &mut self,
        craft:     Option<CraftId>,
        requester: Option<ActorId>,
        now:       SimTime,
        doors:     &mut DoorStore,
    ) -> LockOutcome {
        let Some(craft) = craft else { return LockOutcome::Ignored };
        if !self.crafts.is_hull(craft) {
            return LockOutcome::Ignored;
        }
        let in_flight = self.mover.status(craft).is_some_and(|s| s.phase.is_in_flight());
        if self.crafts.is_crashed(craft) || in_flight {
            return LockOutcome::Ignored;
        }
        if self.crafts.get(craft).is_some_and(|r| !r.can_toggle_lock(now)) {
            trace!(%craft, "lock toggle on cooldown");
            return LockOutcome::Cooldown;
        }

        let record = self.crafts.ensure(craft);
        record.locked = !record.locked;
        record.last_lock_toggle = Some(now);
        let locked = record.locked;
        let driven = set_all_docks(doors, craft, locked);
        info!(%craft, requester = ?requester, locked, doors = driven, "dock lock toggled");

        if locked {
            LockOutcome::Locked { doors: driven }
        } else {
            LockOutcome::Unlocked { doors: driven }
        }
    }
}

impl<M: TransportMover> PhaseSource for TransitMachine<M> {
    fn status(&self, craft: CraftId) -> Option<PhaseStatus> {
        self.mover.status(craft)
    }
}
