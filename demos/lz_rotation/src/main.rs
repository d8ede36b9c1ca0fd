//! lz_rotation — a short round of two dropships over three landing zones.
//!
//! Loads an embedded destination manifest and dispatch config (or a config
//! file passed as the first argument), then walks through a normal launch, a
//! claim conflict, a dock lockdown, auto-designation of the primary LZ, and a
//! hijack that ends in a crash on the carrier.
//!
//! Set `RUST_LOG=debug` to see door and claim activity.

use std::io::Cursor;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use fd_core::{ActorId, CraftId, DestinationId, FactionId, PhaseChange, PhaseNotice, Tick, Vec2};
use fd_doors::{Door, DoorStore};
use fd_registry::load_destinations_reader;
use fd_sim::{DispatchBuilder, DispatchObserver, config_from_toml_str, load_config};
use fd_terminal::{ConsoleKind, MemoryDisplay, TerminalDisplay, TerminalIndex};
use fd_transit::{
    Actor, Audience, FactionBroadcast, Hull, Outlets, TracingAuditLog, TransitEvent,
    TransitEvents,
};

// ── Embedded inputs ───────────────────────────────────────────────────────────

const MANIFEST_CSV: &str = "\
name,x,y,rotation,site,designatable,hijack,primary\n\
Hangar,0.0,0.0,0.0,carrier,false,true,false\n\
LZ1 Lakeside,120.5,44.0,0.0,planet,true,false,false\n\
LZ2 Ridge,-80.0,12.5,1.5708,planet,true,false,false\n\
LZ3 Mines,30.0,-95.0,3.1416,planet,true,false,false\n\
";

// 1 tick = 1 s; a 5-minute round with a 2-minute grace delay.
const CONFIG_TOML: &str = "\
tick_duration_ms        = 1000\n\
total_ticks             = 300\n\
primary_auto_delay_mins = 2\n\
lock_cooldown_ms        = 5000\n\
startup_time_ms         = 5000\n\
hyperspace_time_ms      = 20000\n\
arrival_time_ms         = 5000\n\
";

const ALAMO: CraftId = CraftId(0);
const NORMANDY: CraftId = CraftId(1);

const MARINES: FactionId = FactionId(0);
const XENOS: FactionId = FactionId(1);

// ── Outlets ───────────────────────────────────────────────────────────────────

struct LogBroadcast;

impl FactionBroadcast for LogBroadcast {
    fn announce(&mut self, audience: Audience, message: &str, delay: Option<Duration>) {
        info!(?audience, ?delay, "announcement: {message}");
    }
}

struct LogEvents;

impl TransitEvents for LogEvents {
    fn raise(&mut self, event: TransitEvent) {
        info!(?event, "transit event");
    }
}

// ── Observer ──────────────────────────────────────────────────────────────────

#[derive(Default)]
struct RoundStats {
    notices:    usize,
    completed:  usize,
    designated: Option<(Tick, DestinationId)>,
}

impl DispatchObserver for RoundStats {
    fn on_phase(&mut self, notice: &PhaseNotice) {
        self.notices += 1;
        if matches!(notice.change, PhaseChange::Completed { .. }) {
            self.completed += 1;
        }
    }

    fn on_primary_designated(&mut self, tick: Tick, destination: DestinationId) {
        self.designated = Some((tick, destination));
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // 1. Config and manifest.
    let config = match std::env::args().nth(1) {
        Some(path) => load_config(Path::new(&path)).with_context(|| format!("loading {path}"))?,
        None => config_from_toml_str(CONFIG_TOML)?,
    };
    let registry = load_destinations_reader(Cursor::new(MANIFEST_CSV))?;
    let lz1 = registry.find_by_name("LZ1 Lakeside").context("manifest has no LZ1")?.id;
    let lz2 = registry.find_by_name("LZ2 Ridge").context("manifest has no LZ2")?.id;
    let hangar = registry.find_by_name("Hangar").context("manifest has no hangar")?.id;
    info!(destinations = registry.len(), ticks = config.total_ticks, "round loaded");

    // 2. Craft fittings.
    let mut doors = DoorStore::new();
    for craft in [ALAMO, NORMANDY] {
        doors.add_to(craft, Door::dock);
        doors.add_to(craft, Door::dock);
        doors.add_to(craft, Door::interior);
    }
    let mut terminals = TerminalIndex::new();
    let alamo_nav = terminals.add(Some(ALAMO));
    let normandy_nav = terminals.add(Some(NORMANDY));

    // 3. Dispatcher.
    let outlets = Outlets {
        audit:     Box::new(TracingAuditLog),
        broadcast: Box::new(LogBroadcast),
        events:    Box::new(LogEvents),
        ..Outlets::default()
    };
    let mut dispatcher = DispatchBuilder::new(config, registry, MemoryDisplay::new())
        .hull(ALAMO, Hull::new(Vec2::new(3.5, 7.0), MARINES))
        .hull(NORMANDY, Hull::new(Vec2::new(3.5, 7.0), MARINES))
        .doors(doors)
        .terminals(terminals)
        .outlets(outlets)
        .build_timed()?;

    let pilot = Actor::new(ActorId(1), MARINES);
    let queen = Actor::hijacker(ActorId(66), XENOS);
    let mut stats = RoundStats::default();

    // 4. Opening moves.
    dispatcher.display.open(alamo_nav, ConsoleKind::Navigation, pilot.id);
    dispatcher.launch_from(alamo_nav, lz1, Some(pilot));
    if !dispatcher.launch_from(normandy_nav, lz1, Some(pilot)) {
        warn!("Normandy could not take LZ1; rerouting to LZ2");
        dispatcher.launch_from(normandy_nav, lz2, Some(pilot));
    }
    let outcome = dispatcher.toggle_lock(alamo_nav, Some(pilot.id));
    info!(?outcome, "Alamo lockdown");

    // 5. Let both land and the grace delay run out.
    dispatcher.run_ticks(150, &mut stats);

    // 6. Hijack: the queen seizes the Normandy and flies it to the hangar.
    if dispatcher.activate_terminal(normandy_nav, queen) {
        dispatcher.launch_from(normandy_nav, hangar, Some(queen));
    }
    dispatcher.run_ticks(10, &mut stats);
    dispatcher.mark_crashed(NORMANDY);

    // 7. Rest of the round.
    dispatcher.run(&mut stats);

    // 8. Summary.
    println!();
    println!("notices handled : {}", stats.notices);
    println!("transits landed : {}", stats.completed);
    match stats.designated {
        Some((tick, dest)) => println!("primary LZ      : {dest} at tick {tick}"),
        None => println!("primary LZ      : none"),
    }
    println!();
    println!("{:<10} {:<12} {:<16}", "Craft", "State", "Destination");
    println!("{}", "-".repeat(40));
    for (name, craft) in [("Alamo", ALAMO), ("Normandy", NORMANDY)] {
        let dest = dispatcher
            .registry
            .destination_of(craft)
            .and_then(|id| dispatcher.registry.get(id))
            .map_or("-", |d| d.name.as_str());
        println!("{:<10} {:<12} {:<16}", name, format!("{:?}", dispatcher.state(craft)), dest);
    }

    Ok(())
}
