//! Simulation time model.
//!
//! # Design
//!
//! The host advances the engine in discrete `Tick`s.  The mapping to
//! simulated time is held in `SimClock`:
//!
//!   now = tick * tick_duration_ms
//!
//! `SimTime` is that value: milliseconds since the start of the round.  All
//! cooldown and grace-period checks are exact integer comparisons on
//! `SimTime`; nothing in the engine sleeps or waits.

use std::fmt;
use std::time::Duration;

use crate::{CoreError, CoreResult};

// ── Tick ─────────────────────────────────────────────────────────────────────

/// An absolute simulation tick counter.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Tick = Tick(0);
}

impl std::ops::Add<u64> for Tick {
    type Output = Tick;
    #[inline]
    fn add(self, rhs: u64) -> Tick {
        Tick(self.0 + rhs)
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

// ── SimTime ──────────────────────────────────────────────────────────────────

/// Milliseconds since the start of the round.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimTime(pub u64);

impl SimTime {
    pub const ZERO: SimTime = SimTime(0);

    #[inline]
    pub fn as_duration(self) -> Duration {
        Duration::from_millis(self.0)
    }

    /// Time elapsed from `earlier` to `self`; zero if `earlier` is later.
    #[inline]
    pub fn since(self, earlier: SimTime) -> Duration {
        Duration::from_millis(self.0.saturating_sub(earlier.0))
    }
}

impl std::ops::Add<Duration> for SimTime {
    type Output = SimTime;
    #[inline]
    fn add(self, rhs: Duration) -> SimTime {
        SimTime(self.0.saturating_add(rhs.as_millis() as u64))
    }
}

impl fmt::Display for SimTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let total_secs = self.0 / 1_000;
        write!(f, "{:02}:{:02}.{:03}", total_secs / 60, total_secs % 60, self.0 % 1_000)
    }
}

// ── SimClock ──────────────────────────────────────────────────────────────────

/// Converts between tick counts and round time.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimClock {
    /// How many milliseconds one tick represents.
    pub tick_duration_ms: u32,
    /// The current tick, advanced by `SimClock::advance()` each iteration.
    pub current_tick: Tick,
}

impl SimClock {
    pub fn new(tick_duration_ms: u32) -> Self {
        Self { tick_duration_ms, current_tick: Tick::ZERO }
    }

    /// Advance the clock by one tick.
    #[inline]
    pub fn advance(&mut self) {
        self.current_tick = self.current_tick + 1;
    }

    /// Current round time.
    #[inline]
    pub fn now(&self) -> SimTime {
        SimTime(self.current_tick.0 * self.tick_duration_ms as u64)
    }

    /// Round duration so far.
    #[inline]
    pub fn elapsed(&self) -> Duration {
        self.now().as_duration()
    }
}

impl fmt::Display for SimClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.current_tick, self.now())
    }
}

// ── DispatchConfig ────────────────────────────────────────────────────────────

/// Top-level engine configuration.
///
/// Loaded from TOML by `fd-sim` (or built in code) and handed to the
/// dispatcher builder.  Every duration is stored as an integer so the file
/// format stays trivial.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DispatchConfig {
    /// Milliseconds per tick.  Default: 1000.
    pub tick_duration_ms: u32,

    /// Ticks simulated by `Dispatcher::run`.
    pub total_ticks: u64,

    /// Minutes into the round after which a primary destination is picked
    /// automatically if nobody designated one.
    pub primary_auto_delay_mins: u64,

    /// Minimum time between two door lock toggles on the same craft.
    pub lock_cooldown_ms: u64,

    /// Delay before the defending faction hears about a hijack.
    pub announce_hijack_in_ms: u64,

    /// Default spool-up time before a craft enters FTL.
    pub startup_time_ms: u64,

    /// Default time spent travelling in FTL.
    pub hyperspace_time_ms: u64,

    /// Time spent in the arrival phase before the transit completes.
    pub arrival_time_ms: u64,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            tick_duration_ms:        1_000,
            total_ticks:             3_600,
            primary_auto_delay_mins: 25,
            lock_cooldown_ms:        5_000,
            announce_hijack_in_ms:   7_000,
            startup_time_ms:         5_500,
            hyperspace_time_ms:      20_000,
            arrival_time_ms:         5_000,
        }
    }
}

impl DispatchConfig {
    /// The tick at which `run` stops (exclusive upper bound).
    #[inline]
    pub fn end_tick(&self) -> Tick {
        Tick(self.total_ticks)
    }

    /// Construct a `SimClock` pre-configured for this run.
    pub fn make_clock(&self) -> SimClock {
        SimClock::new(self.tick_duration_ms)
    }

    pub fn primary_auto_delay(&self) -> Duration {
        Duration::from_secs(self.primary_auto_delay_mins * 60)
    }

    pub fn lock_cooldown(&self) -> Duration {
        Duration::from_millis(self.lock_cooldown_ms)
    }

    pub fn announce_hijack_in(&self) -> Duration {
        Duration::from_millis(self.announce_hijack_in_ms)
    }

    pub fn startup_time(&self) -> Duration {
        Duration::from_millis(self.startup_time_ms)
    }

    pub fn hyperspace_time(&self) -> Duration {
        Duration::from_millis(self.hyperspace_time_ms)
    }

    pub fn arrival_time(&self) -> Duration {
        Duration::from_millis(self.arrival_time_ms)
    }

    /// Reject configurations the tick loop cannot run with.
    pub fn validate(&self) -> CoreResult<()> {
        if self.tick_duration_ms == 0 {
            return Err(CoreError::Config("tick_duration_ms must be positive".into()));
        }
        Ok(())
    }
}
