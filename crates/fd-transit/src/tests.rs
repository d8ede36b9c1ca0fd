//! Unit tests for fd-transit.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use fd_core::{
    ActorId, CraftId, DestinationId, DoorId, FactionId, PhaseChange, PhaseNotice, PhaseSource,
    Pose, SimTime, SiteTags, TransitPhase, Vec2,
};
use fd_doors::{Door, DoorState, DoorStore};
use fd_registry::{DestinationRegistry, DestinationSpec, RegistryBuilder, RegistryError};

use crate::{
    Actor, Audience, AuditLog, AudioCues, CraftDefaults, CraftStore, CueTarget, FactionBroadcast,
    Hull, LaunchError, LaunchErrorKind, LaunchRecord, LaunchRequest, LockOutcome, Outlets,
    PhaseReceiver, Silent, TimedMover, TransitEvent, TransitEvents, TransitMachine, TransitOrder,
    TransitState, TransportMover, phase_channel,
};

// ── Helpers ───────────────────────────────────────────────────────────────────

const SHIP: CraftId = CraftId(0);
const OTHER: CraftId = CraftId(1);
const ALPHA: DestinationId = DestinationId(0);
const BRAVO: DestinationId = DestinationId(1);
const OCEAN: DestinationId = DestinationId(2);

const DEFENDERS: FactionId = FactionId(0);
const RAIDERS: FactionId = FactionId(1);

#[derive(Clone, Debug, PartialEq)]
enum Entry {
    Audit(LaunchRecord),
    Announce(Audience, Option<Duration>),
    Cue(String, CueTarget),
    Event(TransitEvent),
}

/// Sink that records every outlet call into a shared journal.
#[derive(Clone, Default)]
struct Journal(Arc<Mutex<Vec<Entry>>>);

impl Journal {
    fn entries(&self) -> Vec<Entry> {
        self.0.lock().unwrap().clone()
    }

    fn outlets(&self) -> Outlets {
        Outlets {
            audit:     Box::new(self.clone()),
            broadcast: Box::new(self.clone()),
            audio:     Box::new(self.clone()),
            events:    Box::new(self.clone()),
        }
    }
}

impl AuditLog for Journal {
    fn record(&mut self, entry: &LaunchRecord) {
        self.0.lock().unwrap().push(Entry::Audit(entry.clone()));
    }
}

impl FactionBroadcast for Journal {
    fn announce(&mut self, audience: Audience, _message: &str, delay: Option<Duration>) {
        self.0.lock().unwrap().push(Entry::Announce(audience, delay));
    }
}

impl AudioCues for Journal {
    fn play(&mut self, cue: &str, target: CueTarget) {
        self.0.lock().unwrap().push(Entry::Cue(cue.to_string(), target));
    }
}

impl TransitEvents for Journal {
    fn raise(&mut self, event: TransitEvent) {
        self.0.lock().unwrap().push(Entry::Event(event));
    }
}

fn registry() -> DestinationRegistry {
    let mut b = RegistryBuilder::new();
    b.add(DestinationSpec::new("Alpha", Pose::new(Vec2::new(10.0, 0.0), 0.0)).designatable());
    b.add(DestinationSpec::new("Bravo", Pose::new(Vec2::new(-4.0, 8.0), 0.0)).site(SiteTags::PLANET));
    b.add(DestinationSpec::new("Ocean", Pose::new(Vec2::new(0.0, 0.0), 0.0)).site(SiteTags::CARRIER));
    b.build().unwrap()
}

fn machine_with(outlets: Outlets) -> (TransitMachine<TimedMover>, PhaseReceiver) {
    let (tx, rx) = phase_channel();
    let mover = TimedMover::with_timings(
        tx,
        Duration::from_secs(5),
        Duration::from_secs(20),
        Duration::from_secs(5),
    );
    let mut crafts = CraftStore::new(CraftDefaults::default());
    crafts.register_hull(SHIP, Hull::new(Vec2::new(2.0, 1.0), DEFENDERS));
    crafts.register_hull(OTHER, Hull::new(Vec2::ZERO, DEFENDERS));
    (TransitMachine::new(mover, crafts, outlets), rx)
}

fn machine() -> (TransitMachine<TimedMover>, PhaseReceiver) {
    machine_with(Outlets { audit: Box::new(Silent), ..Outlets::default() })
}

fn secs(s: u64) -> SimTime {
    SimTime(s * 1_000)
}

fn land(m: &mut TransitMachine<TimedMover>, rx: &PhaseReceiver, craft: CraftId, at: SimTime) {
    m.mover_mut().advance(at);
    for n in rx.drain() {
        m.on_phase_changed(n);
    }
    assert!(!m.in_transit(craft));
}

// ── Launch ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod launch {
    use super::*;

    #[test]
    fn first_launch_claims_and_starts_transit() {
        let (mut m, rx) = machine();
        let mut reg = registry();
        let report = m.try_launch(&mut reg, LaunchRequest::new(SHIP, ALPHA), SimTime::ZERO).unwrap();
        assert_eq!(report.released, None);
        assert_eq!(reg.destination_of(SHIP), Some(ALPHA));
        assert_eq!(reg.claimed_by(ALPHA), Some(SHIP));
        assert_eq!(m.state(SHIP), TransitState::Requesting);

        let notices = rx.drain();
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].change, PhaseChange::Requesting);
    }

    #[test]
    fn target_is_corrected_for_center_of_mass_and_pad() {
        let (mut m, _rx) = machine();
        let mut reg = registry();
        let report = m.try_launch(&mut reg, LaunchRequest::new(SHIP, ALPHA), SimTime::ZERO).unwrap();
        // (10,0) - (2,1) + (-0.5,-0.5)
        assert_eq!(report.order.target.position, Vec2::new(7.5, -1.5));
    }

    #[test]
    fn relaunch_releases_previous_claim() {
        let (mut m, rx) = machine();
        let mut reg = registry();
        assert!(m.launch(&mut reg, LaunchRequest::new(SHIP, ALPHA), SimTime::ZERO));
        land(&mut m, &rx, SHIP, secs(30));

        let report = m.try_launch(&mut reg, LaunchRequest::new(SHIP, BRAVO), secs(40)).unwrap();
        assert_eq!(report.released, Some(ALPHA));
        assert_eq!(reg.claimed_by(ALPHA), None);
        assert_eq!(reg.claimed_by(BRAVO), Some(SHIP));
        assert!(reg.is_consistent());
    }

    #[test]
    fn claim_conflict_changes_nothing() {
        let (mut m, rx) = machine();
        let mut reg = registry();
        assert!(m.launch(&mut reg, LaunchRequest::new(SHIP, ALPHA), SimTime::ZERO));
        rx.drain();

        let err = m.try_launch(&mut reg, LaunchRequest::new(OTHER, ALPHA), SimTime::ZERO).unwrap_err();
        assert!(matches!(err, LaunchError::Claim(RegistryError::AlreadyClaimed { holder, .. }) if holder == SHIP));
        assert_eq!(err.kind(), LaunchErrorKind::ClaimConflict);
        assert_eq!(reg.destination_of(OTHER), None);
        assert!(!m.in_transit(OTHER));
        assert!(rx.drain().is_empty());
        assert!(m.crafts().get(OTHER).is_none(), "no record created on refusal");
    }

    #[test]
    fn unregistered_craft_is_not_a_vehicle() {
        let (mut m, _rx) = machine();
        let mut reg = registry();
        let err = m.try_launch(&mut reg, LaunchRequest::new(CraftId(9), ALPHA), SimTime::ZERO).unwrap_err();
        assert!(matches!(err, LaunchError::NotTransitVehicle(_)));
        assert_eq!(err.kind(), LaunchErrorKind::PreconditionFailed);
    }

    #[test]
    fn in_transit_craft_cannot_relaunch() {
        let (mut m, _rx) = machine();
        let mut reg = registry();
        assert!(m.launch(&mut reg, LaunchRequest::new(SHIP, ALPHA), SimTime::ZERO));
        let err = m.try_launch(&mut reg, LaunchRequest::new(SHIP, BRAVO), secs(1)).unwrap_err();
        assert!(matches!(err, LaunchError::AlreadyInTransit(_)));
        assert_eq!(reg.destination_of(SHIP), Some(ALPHA));
    }

    #[test]
    fn same_destination_refused() {
        let (mut m, rx) = machine();
        let mut reg = registry();
        assert!(m.launch(&mut reg, LaunchRequest::new(SHIP, ALPHA), SimTime::ZERO));
        land(&mut m, &rx, SHIP, secs(30));
        let err = m.try_launch(&mut reg, LaunchRequest::new(SHIP, ALPHA), secs(31)).unwrap_err();
        assert!(matches!(err, LaunchError::SameDestination { .. }));
    }

    #[test]
    fn crashed_craft_refused() {
        let (mut m, _rx) = machine();
        let mut reg = registry();
        assert!(m.mark_crashed(SHIP));
        assert_eq!(m.state(SHIP), TransitState::Crashed);
        let err = m.try_launch(&mut reg, LaunchRequest::new(SHIP, ALPHA), SimTime::ZERO).unwrap_err();
        assert!(matches!(err, LaunchError::Crashed(_)));
        assert_eq!(reg.claim_count(), 0);
    }

    #[test]
    fn unknown_destination() {
        let (mut m, _rx) = machine();
        let mut reg = registry();
        let err = m.try_launch(&mut reg, LaunchRequest::new(SHIP, DestinationId(40)), SimTime::ZERO).unwrap_err();
        assert_eq!(err.kind(), LaunchErrorKind::NotFound);
    }

    #[test]
    fn duration_overrides_reach_the_mover() {
        let (mut m, rx) = machine();
        let mut reg = registry();
        let req = LaunchRequest::new(SHIP, ALPHA)
            .startup(Duration::from_secs(1))
            .hyperspace(Duration::from_secs(2));
        assert!(m.launch(&mut reg, req, SimTime::ZERO));
        rx.drain();
        m.mover_mut().advance(secs(3));
        let changes: Vec<_> = rx.drain().into_iter().map(|n| n.change).collect();
        assert_eq!(changes, vec![PhaseChange::Travelling, PhaseChange::Arriving]);
    }
}

// ── Hijack and audit ──────────────────────────────────────────────────────────

#[cfg(test)]
mod hijack {
    use super::*;

    #[test]
    fn plain_launch_writes_one_audit_record() {
        let journal = Journal::default();
        let (mut m, _rx) = machine_with(journal.outlets());
        let mut reg = registry();
        let pilot = Actor::new(ActorId(3), DEFENDERS);
        assert!(m.launch(&mut reg, LaunchRequest::new(SHIP, ALPHA).by(pilot), SimTime::ZERO));

        let entries = journal.entries();
        assert_eq!(entries.len(), 1);
        let Entry::Audit(rec) = &entries[0] else { panic!("expected audit, got {entries:?}") };
        assert_eq!(rec.actor, Some(ActorId(3)));
        assert_eq!(rec.name, "Alpha");
        assert!(!rec.hijacked);
    }

    #[test]
    fn hijack_notifies_both_sides() {
        let journal = Journal::default();
        let (mut m, _rx) = machine_with(journal.outlets());
        let mut reg = registry();
        let raider = Actor::hijacker(ActorId(7), RAIDERS);
        assert!(m.launch(&mut reg, LaunchRequest::new(SHIP, OCEAN).by(raider).hijack(), SimTime::ZERO));

        let entries = journal.entries();
        assert!(entries.contains(&Entry::Announce(Audience::Faction(RAIDERS), None)));
        assert!(entries.contains(&Entry::Announce(
            Audience::Faction(DEFENDERS),
            Some(Duration::from_secs(7)),
        )));
        assert!(entries.contains(&Entry::Cue("hijack_local".into(), CueTarget::Craft(SHIP))));
        assert!(entries.contains(&Entry::Cue(
            "hijack_alarm".into(),
            CueTarget::Audience(Audience::AllExcept(RAIDERS)),
        )));
        assert!(matches!(entries.last(), Some(Entry::Audit(r)) if r.hijacked));
    }

    #[test]
    fn refused_launch_is_silent() {
        let journal = Journal::default();
        let (mut m, _rx) = machine_with(journal.outlets());
        let mut reg = registry();
        m.mark_crashed(SHIP);
        let raider = Actor::hijacker(ActorId(7), RAIDERS);
        assert!(!m.launch(&mut reg, LaunchRequest::new(SHIP, OCEAN).by(raider).hijack(), SimTime::ZERO));
        assert!(journal.entries().is_empty());
    }
}

// ── Phase reactions ───────────────────────────────────────────────────────────

#[cfg(test)]
mod phases {
    use super::*;

    fn events(journal: &Journal) -> Vec<TransitEvent> {
        journal
            .entries()
            .into_iter()
            .filter_map(|e| match e {
                Entry::Event(ev) => Some(ev),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn full_cycle_reports_each_phase_once() {
        let (mut m, rx) = machine();
        let mut reg = registry();
        assert!(m.launch(&mut reg, LaunchRequest::new(SHIP, BRAVO), SimTime::ZERO));
        m.mover_mut().advance(secs(30));
        let notices: Vec<PhaseNotice> = rx.drain();
        let changes: Vec<_> = notices.iter().map(|n| n.change).collect();
        assert_eq!(
            changes,
            vec![
                PhaseChange::Requesting,
                PhaseChange::Travelling,
                PhaseChange::Arriving,
                PhaseChange::Completed { site: SiteTags::PLANET },
            ]
        );
        assert_eq!(notices[1].at, secs(5));
        assert_eq!(notices[2].at, secs(25));
        assert_eq!(notices[3].at, secs(30));
        assert_eq!(m.state(SHIP), TransitState::Idle);
        assert_eq!(m.mover().position_of(SHIP).map(|p| p.position), Some(Vec2::new(-6.5, 6.5)));
    }

    #[test]
    fn partial_advance_stops_mid_phase() {
        let (mut m, rx) = machine();
        let mut reg = registry();
        assert!(m.launch(&mut reg, LaunchRequest::new(SHIP, ALPHA), SimTime::ZERO));
        m.mover_mut().advance(secs(10));
        assert_eq!(m.state(SHIP), TransitState::Travelling);
        let status = m.status(SHIP).unwrap();
        assert_eq!(status.phase, TransitPhase::Travelling);
        assert_eq!(status.since, secs(5));
        assert_eq!(rx.drain().len(), 2);
    }

    #[test]
    fn planet_landing_raises_event() {
        let journal = Journal::default();
        let (mut m, rx) = machine_with(journal.outlets());
        let mut reg = registry();
        assert!(m.launch(&mut reg, LaunchRequest::new(SHIP, BRAVO), SimTime::ZERO));
        land(&mut m, &rx, SHIP, secs(30));
        assert_eq!(events(&journal), vec![TransitEvent::LandedOnPlanet { craft: SHIP }]);
    }

    #[test]
    fn carrier_landing_raises_hijack_only_when_crashed() {
        let journal = Journal::default();
        let (mut m, rx) = machine_with(journal.outlets());
        let mut reg = registry();
        assert!(m.launch(&mut reg, LaunchRequest::new(SHIP, OCEAN), SimTime::ZERO));
        land(&mut m, &rx, SHIP, secs(30));
        assert!(events(&journal).is_empty());

        assert!(m.launch(&mut reg, LaunchRequest::new(OTHER, ALPHA), secs(30)));
        m.mover_mut().divert(OTHER, SiteTags::CARRIER);
        m.mark_crashed(OTHER);
        land(&mut m, &rx, OTHER, secs(60));
        assert_eq!(events(&journal), vec![TransitEvent::HijackLanded { craft: OTHER }]);
    }

    #[test]
    fn completion_does_not_release_claim() {
        let (mut m, rx) = machine();
        let mut reg = registry();
        assert!(m.launch(&mut reg, LaunchRequest::new(SHIP, ALPHA), SimTime::ZERO));
        land(&mut m, &rx, SHIP, secs(30));
        assert_eq!(reg.claimed_by(ALPHA), Some(SHIP));
    }
}

// ── Dock lock ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod lock {
    use super::*;

    fn doors() -> (DoorStore, DoorId) {
        let mut store = DoorStore::new();
        let d = store.add_to(SHIP, |id| Door { state: DoorState::Open, ..Door::dock(id) });
        (store, d)
    }

    #[test]
    fn toggle_locks_then_unlocks_after_cooldown() {
        let (mut m, _rx) = machine();
        let (mut store, d) = doors();

        assert_eq!(m.toggle_lock(Some(SHIP), None, SimTime::ZERO, &mut store), LockOutcome::Locked { doors: 1 });
        assert!(store.get(d).unwrap().is_bolted());
        assert!(store.get(d).unwrap().is_closed());
        assert!(m.crafts().get(SHIP).unwrap().locked);

        assert_eq!(m.toggle_lock(Some(SHIP), None, secs(2), &mut store), LockOutcome::Cooldown);
        assert!(m.crafts().get(SHIP).unwrap().locked);

        assert_eq!(m.toggle_lock(Some(SHIP), None, secs(5), &mut store), LockOutcome::Unlocked { doors: 1 });
        assert!(!store.get(d).unwrap().is_bolted());
        assert_eq!(m.crafts().get(SHIP).unwrap().last_lock_toggle, Some(secs(5)));
    }

    #[test]
    fn no_craft_or_unknown_craft_is_ignored() {
        let (mut m, _rx) = machine();
        let (mut store, _) = doors();
        assert_eq!(m.toggle_lock(None, None, SimTime::ZERO, &mut store), LockOutcome::Ignored);
        assert_eq!(m.toggle_lock(Some(CraftId(9)), None, SimTime::ZERO, &mut store), LockOutcome::Ignored);
        assert!(m.crafts().is_empty());
    }

    #[test]
    fn ignored_while_travelling_but_allowed_while_requesting() {
        let (mut m, _rx) = machine();
        let (mut store, _) = doors();
        let mut reg = registry();
        assert!(m.launch(&mut reg, LaunchRequest::new(SHIP, ALPHA), SimTime::ZERO));

        assert_eq!(
            m.toggle_lock(Some(SHIP), None, secs(1), &mut store),
            LockOutcome::Locked { doors: 1 }
        );
        m.mover_mut().advance(secs(10));
        assert_eq!(m.toggle_lock(Some(SHIP), None, secs(10), &mut store), LockOutcome::Ignored);
        m.mover_mut().advance(secs(26));
        assert_eq!(m.toggle_lock(Some(SHIP), None, secs(26), &mut store), LockOutcome::Ignored);
    }

    #[test]
    fn crashed_craft_ignored() {
        let (mut m, _rx) = machine();
        let (mut store, d) = doors();
        m.mark_crashed(SHIP);
        assert_eq!(m.toggle_lock(Some(SHIP), None, SimTime::ZERO, &mut store), LockOutcome::Ignored);
        assert!(!store.get(d).unwrap().is_bolted());
    }

    #[test]
    fn custom_cooldown_respected() {
        let (mut m, _rx) = machine();
        let (mut store, _) = doors();
        m.crafts_mut().ensure(SHIP).lock_cooldown = Duration::from_secs(60);
        m.toggle_lock(Some(SHIP), None, SimTime::ZERO, &mut store);
        assert_eq!(m.toggle_lock(Some(SHIP), None, secs(59), &mut store), LockOutcome::Cooldown);
        assert_eq!(m.toggle_lock(Some(SHIP), None, secs(60), &mut store), LockOutcome::Unlocked { doors: 1 });
    }

    #[test]
    fn ignored_toggle_creates_no_record() {
        let (mut m, _rx) = machine();
        let (mut store, d) = doors();
        let order = TransitOrder {
            target:     Pose::default(),
            site:       SiteTags::PLANET,
            startup:    None,
            hyperspace: None,
        };
        m.mover_mut().begin_transit(SHIP, order, SimTime::ZERO);
        m.mover_mut().advance(secs(6));

        assert_eq!(m.toggle_lock(Some(SHIP), None, secs(6), &mut store), LockOutcome::Ignored);
        assert!(m.crafts().get(SHIP).is_none());
        assert!(!store.get(d).unwrap().is_bolted());
    }
}

// ── State ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod state {
    use super::*;
    use fd_core::PhaseStatus;

    #[test]
    fn crashed_overrides_phase() {
        let s = PhaseStatus { phase: TransitPhase::Travelling, running: true, since: SimTime::ZERO };
        assert_eq!(TransitState::resolve(true, Some(s)), TransitState::Crashed);
        assert_eq!(TransitState::resolve(false, Some(s)), TransitState::Travelling);
    }

    #[test]
    fn stopped_transit_reads_idle() {
        let s = PhaseStatus { phase: TransitPhase::Arriving, running: false, since: SimTime::ZERO };
        assert_eq!(TransitState::resolve(false, Some(s)), TransitState::Idle);
        assert_eq!(TransitState::resolve(false, None), TransitState::Idle);
    }

    #[test]
    fn mark_crashed_unknown_hull() {
        let (mut m, _rx) = machine();
        assert!(!m.mark_crashed(CraftId(9)));
    }
}
