//! The display collaborator: owns open/closed state and receives views.
//!
//! A terminal carries two independent consoles.  The navigation console is
//! kept in sync with the craft; the hijacker console is written once when it
//! opens and never refreshed.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use fd_core::{ActorId, TerminalId};

use crate::NavView;

/// Which console on a terminal a view belongs to.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ConsoleKind {
    Navigation,
    Hijacker,
}

impl ConsoleKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ConsoleKind::Navigation => "navigation",
            ConsoleKind::Hijacker   => "hijacker",
        }
    }
}

impl fmt::Display for ConsoleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub trait TerminalDisplay {
    /// Somebody has `console` open on this terminal.
    fn is_open(&self, terminal: TerminalId, console: ConsoleKind) -> bool;

    /// Open `console` on `terminal` for `actor`.
    fn open(&mut self, terminal: TerminalId, console: ConsoleKind, actor: ActorId);

    /// Replace whatever `console` shows.
    fn set_view(&mut self, terminal: TerminalId, console: ConsoleKind, view: NavView);
}

type Slot = (TerminalId, ConsoleKind);

/// In-process display that keeps the last view per console.
#[derive(Debug, Default)]
pub struct MemoryDisplay {
    open:   BTreeMap<Slot, ActorId>,
    views:  BTreeMap<Slot, NavView>,
    closed: BTreeSet<Slot>,
    writes: usize,
}

impl MemoryDisplay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn close(&mut self, terminal: TerminalId, console: ConsoleKind) {
        if self.open.remove(&(terminal, console)).is_some() {
            self.closed.insert((terminal, console));
        }
    }

    /// Who opened `console` on `terminal`, if it is open.
    pub fn viewer(&self, terminal: TerminalId, console: ConsoleKind) -> Option<ActorId> {
        self.open.get(&(terminal, console)).copied()
    }

    /// Last view written to `console` on `terminal`.
    pub fn view(&self, terminal: TerminalId, console: ConsoleKind) -> Option<&NavView> {
        self.views.get(&(terminal, console))
    }

    /// Consoles that were open at some point and have since been closed.
    pub fn closed(&self) -> impl Iterator<Item = (TerminalId, ConsoleKind)> + '_ {
        self.closed.iter().copied()
    }

    /// Total `set_view` calls.
    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl TerminalDisplay for MemoryDisplay {
    fn is_open(&self, terminal: TerminalId, console: ConsoleKind) -> bool {
        self.open.contains_key(&(terminal, console))
    }

    fn open(&mut self, terminal: TerminalId, console: ConsoleKind, actor: ActorId) {
        self.closed.remove(&(terminal, console));
        self.open.insert((terminal, console), actor);
    }

    fn set_view(&mut self, terminal: TerminalId, console: ConsoleKind, view: NavView) {
        self.views.insert((terminal, console), view);
        self.writes += 1;
    }
}
