//! A single boundary access point.

use fd_core::DoorId;

/// Physical state of a door leaf.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DoorState {
    #[default]
    Closed,
    Opening,
    Open,
    Closing,
}

/// A door on a craft's hull.
///
/// Normal operation goes through [`try_open`](Self::try_open),
/// [`start_closing`](Self::start_closing) and
/// [`on_partial_close`](Self::on_partial_close), which honour bolts and the
/// collision check.  The lock coordinator drives the same methods with the
/// collision check temporarily suppressed.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Door {
    pub id:    DoorId,
    pub state: DoorState,

    /// Exposes a docking interface (airlocks and ramp doors do, interior
    /// doors do not).
    pub dockable: bool,

    /// `None` for doors without bolts; `Some(down)` otherwise.
    pub bolts: Option<bool>,

    /// When set, closing is refused while something stands in the doorway.
    pub perform_collision_check: bool,

    /// Something is standing in the doorway.
    pub obstructed: bool,
}

impl Door {
    /// A closed, unbolted docking door with bolts and collision checks.
    pub fn dock(id: DoorId) -> Self {
        Self {
            id,
            state: DoorState::Closed,
            dockable: true,
            bolts: Some(false),
            perform_collision_check: true,
            obstructed: false,
        }
    }

    /// A closed interior door: not dockable, no bolts.
    pub fn interior(id: DoorId) -> Self {
        Self {
            id,
            state: DoorState::Closed,
            dockable: false,
            bolts: None,
            perform_collision_check: true,
            obstructed: false,
        }
    }

    #[inline]
    pub fn has_bolts(&self) -> bool {
        self.bolts.is_some()
    }

    #[inline]
    pub fn is_bolted(&self) -> bool {
        self.bolts == Some(true)
    }

    #[inline]
    pub fn is_closed(&self) -> bool {
        self.state == DoorState::Closed
    }

    /// Drive the bolts.  Returns `false` for doors without bolts.
    pub fn set_bolts_down(&mut self, down: bool) -> bool {
        match self.bolts.as_mut() {
            Some(bolts) => {
                *bolts = down;
                true
            }
            None => false,
        }
    }

    /// Begin opening.  Refused while bolted or unless fully closed.
    pub fn try_open(&mut self) -> bool {
        if self.is_bolted() || self.state != DoorState::Closed {
            return false;
        }
        self.state = DoorState::Opening;
        true
    }

    /// Finish an opening cycle.
    pub fn finish_opening(&mut self) {
        if self.state == DoorState::Opening {
            self.state = DoorState::Open;
        }
    }

    #[inline]
    fn blocked(&self) -> bool {
        self.perform_collision_check && self.obstructed
    }

    /// Begin closing.  Refused if already closed/closing or blocked.
    pub fn start_closing(&mut self) -> bool {
        if matches!(self.state, DoorState::Closed | DoorState::Closing) || self.blocked() {
            return false;
        }
        self.state = DoorState::Closing;
        true
    }

    /// Complete a closing cycle.  A blocked doorway springs back open.
    pub fn on_partial_close(&mut self) -> bool {
        if self.state != DoorState::Closing {
            return false;
        }
        if self.blocked() {
            self.state = DoorState::Open;
            return false;
        }
        self.state = DoorState::Closed;
        true
    }
}
