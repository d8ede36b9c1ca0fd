//! The transport mover contract and a timer-driven reference mover.
//!
//! The mover owns the physical side of a transit: it takes a target pose,
//! runs the phases, and reports every change on the phase channel.  The
//! dispatch logic never advances phases itself.

use std::collections::BTreeMap;
use std::time::Duration;

use fd_core::{
    CraftId, DispatchConfig, PhaseChange, PhaseNotice, PhaseSource, PhaseStatus, Pose, SimTime,
    SiteTags, TransitPhase,
};
use tracing::{debug, warn};

use crate::PhaseSender;

// ── Contract ──────────────────────────────────────────────────────────────────

/// What the transit machine asks of a mover.
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct TransitOrder {
    /// Where the craft's origin must end up (already corrected for centre of
    /// mass and pad alignment).
    pub target:     Pose,
    /// Tags of the map the target sits on, echoed back on completion.
    pub site:       SiteTags,
    /// Override for the spool-up time; `None` uses the mover's default.
    pub startup:    Option<Duration>,
    /// Override for time spent in FTL; `None` uses the mover's default.
    pub hyperspace: Option<Duration>,
}

/// Movers must also answer phase queries; see [`PhaseSource`].
pub trait TransportMover: PhaseSource {
    /// Start moving `craft`.  Called only when the craft is not in transit.
    fn begin_transit(&mut self, craft: CraftId, order: TransitOrder, now: SimTime);

    /// Drive in-progress transits up to `now`.  Movers that are driven from
    /// elsewhere leave this as a no-op.
    fn advance(&mut self, _now: SimTime) {}
}

// ── TimedMover ────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
struct Flight {
    order:      TransitOrder,
    phase:      TransitPhase,
    since:      SimTime,
    startup:    Duration,
    hyperspace: Duration,
}

/// Fixed-duration mover: `Requesting` for the startup time, `Travelling` for
/// the hyperspace time, `Arriving` for the arrival time, then `Completed`.
///
/// Several phase boundaries crossed by one `advance` call are reported in
/// order, each stamped with the time the boundary fell on.
#[derive(Debug)]
pub struct TimedMover {
    flights:    BTreeMap<CraftId, Flight>,
    positions:  BTreeMap<CraftId, Pose>,
    tx:         PhaseSender,
    startup:    Duration,
    hyperspace: Duration,
    arrival:    Duration,
}

impl TimedMover {
    pub fn new(tx: PhaseSender, config: &DispatchConfig) -> Self {
        Self::with_timings(tx, config.startup_time(), config.hyperspace_time(), config.arrival_time())
    }

    pub fn with_timings(
        tx:         PhaseSender,
        startup:    Duration,
        hyperspace: Duration,
        arrival:    Duration,
    ) -> Self {
        Self {
            flights: BTreeMap::new(),
            positions: BTreeMap::new(),
            tx,
            startup,
            hyperspace,
            arrival,
        }
    }

    /// Where `craft` came to rest at the end of its last completed transit.
    pub fn position_of(&self, craft: CraftId) -> Option<Pose> {
        self.positions.get(&craft).copied()
    }

    /// The order currently being flown by `craft`.
    pub fn order_of(&self, craft: CraftId) -> Option<&TransitOrder> {
        self.flights.get(&craft).map(|f| &f.order)
    }

    pub fn active_count(&self) -> usize {
        self.flights.len()
    }

    /// Retag the landing site of an in-progress transit (the craft is pulled
    /// off course).  Returns `false` if `craft` is not flying.
    pub fn divert(&mut self, craft: CraftId, site: SiteTags) -> bool {
        match self.flights.get_mut(&craft) {
            Some(f) => {
                debug!(%craft, from = %f.order.site, to = %site, "transit diverted");
                f.order.site = site;
                true
            }
            None => false,
        }
    }

    fn phase_length(&self, flight: &Flight) -> Option<Duration> {
        match flight.phase {
            TransitPhase::Requesting => Some(flight.startup),
            TransitPhase::Travelling => Some(flight.hyperspace),
            TransitPhase::Arriving   => Some(self.arrival),
            TransitPhase::Available  => None,
        }
    }
}

impl PhaseSource for TimedMover {
    fn status(&self, craft: CraftId) -> Option<PhaseStatus> {
        self.flights.get(&craft).map(|f| PhaseStatus {
            phase:   f.phase,
            running: true,
            since:   f.since,
        })
    }
}

impl TransportMover for TimedMover {
    fn begin_transit(&mut self, craft: CraftId, order: TransitOrder, now: SimTime) {
        if self.flights.contains_key(&craft) {
            warn!(%craft, "begin_transit on a craft already in transit; ignored");
            return;
        }
        let flight = Flight {
            order,
            phase:      TransitPhase::Requesting,
            since:      now,
            startup:    order.startup.unwrap_or(self.startup),
            hyperspace: order.hyperspace.unwrap_or(self.hyperspace),
        };
        debug!(%craft, target = %order.target.position, "transit started");
        self.flights.insert(craft, flight);
        self.tx.send(PhaseNotice { craft, change: PhaseChange::Requesting, at: now });
    }

    fn advance(&mut self, now: SimTime) {
        let crafts: Vec<CraftId> = self.flights.keys().copied().collect();
        for craft in crafts {
            loop {
                let Some(flight) = self.flights.get(&craft) else { break };
                let Some(length) = self.phase_length(flight) else { break };
                let ends = flight.since + length;
                if now < ends {
                    break;
                }

                let change = match flight.phase {
                    TransitPhase::Requesting => PhaseChange::Travelling,
                    TransitPhase::Travelling => PhaseChange::Arriving,
                    TransitPhase::Arriving   => PhaseChange::Completed { site: flight.order.site },
                    TransitPhase::Available  => break,
                };

                match change {
                    PhaseChange::Completed { .. } => {
                        if let Some(done) = self.flights.remove(&craft) {
                            self.positions.insert(craft, done.order.target);
                        }
                    }
                    _ => {
                        if let Some(f) = self.flights.get_mut(&craft) {
                            f.phase = match change {
                                PhaseChange::Travelling => TransitPhase::Travelling,
                                _ => TransitPhase::Arriving,
                            };
                            f.since = ends;
                        }
                    }
                }
                self.tx.send(PhaseNotice { craft, change, at: ends });
            }
        }
    }
}
