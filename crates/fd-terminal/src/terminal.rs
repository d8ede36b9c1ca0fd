//! Navigation terminals and the index that owns them.

use std::collections::BTreeMap;

use fd_core::{CraftId, TerminalId};

use crate::{TerminalError, TerminalResult};

/// A navigation console.  Reads and drives the craft it is mounted on.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct NavTerminal {
    pub id:    TerminalId,
    /// `None` for a console standing on open ground.
    pub mount: Option<CraftId>,
}

/// Every terminal in the session, iterated in id order.
#[derive(Debug, Default)]
pub struct TerminalIndex {
    terminals: BTreeMap<TerminalId, NavTerminal>,
}

impl TerminalIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a terminal.  Ids are assigned sequentially from 0.
    pub fn add(&mut self, mount: Option<CraftId>) -> TerminalId {
        let id = TerminalId(self.terminals.len() as u32);
        self.terminals.insert(id, NavTerminal { id, mount });
        id
    }

    #[inline]
    pub fn get(&self, id: TerminalId) -> Option<&NavTerminal> {
        self.terminals.get(&id)
    }

    /// The craft `id` is mounted on; `None` for unknown or unmounted
    /// terminals.
    #[inline]
    pub fn mount_of(&self, id: TerminalId) -> Option<CraftId> {
        self.terminals.get(&id).and_then(|t| t.mount)
    }

    /// Move `id` onto `mount` (or off any craft with `None`).
    pub fn remount(&mut self, id: TerminalId, mount: Option<CraftId>) -> TerminalResult<()> {
        let t = self.terminals.get_mut(&id).ok_or(TerminalError::TerminalNotFound(id))?;
        t.mount = mount;
        Ok(())
    }

    pub fn iter(&self) -> impl Iterator<Item = &NavTerminal> + '_ {
        self.terminals.values()
    }

    pub fn ids(&self) -> impl Iterator<Item = TerminalId> + '_ {
        self.terminals.keys().copied()
    }

    /// Terminals mounted on `craft`.
    pub fn on_craft(&self, craft: CraftId) -> impl Iterator<Item = &NavTerminal> + '_ {
        self.terminals.values().filter(move |t| t.mount == Some(craft))
    }

    pub fn len(&self) -> usize {
        self.terminals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terminals.is_empty()
    }
}
