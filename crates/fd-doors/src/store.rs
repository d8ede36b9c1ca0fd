//! The `DoorStore` — every door plus which craft each one is mounted on.

use std::collections::BTreeMap;

use fd_core::{CraftId, DoorId};

use crate::{Door, DoorError, DoorResult};

/// Doors indexed by `DoorId`, plus the parent craft of each.
///
/// `children` mirrors the host's transform hierarchy one level deep: a door
/// listed under a craft is a *direct* child of that craft's hull.
#[derive(Debug, Default)]
pub struct DoorStore {
    doors:    Vec<Door>,
    children: BTreeMap<CraftId, Vec<DoorId>>,
    parent:   Vec<Option<CraftId>>,
}

impl DoorStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a door built by `make` and return its `DoorId`.
    pub fn add(&mut self, make: impl FnOnce(DoorId) -> Door) -> DoorId {
        let id = DoorId(self.doors.len() as u32);
        let mut door = make(id);
        door.id = id;
        self.doors.push(door);
        self.parent.push(None);
        id
    }

    /// Register a door and mount it on `craft` in one call.
    pub fn add_to(&mut self, craft: CraftId, make: impl FnOnce(DoorId) -> Door) -> DoorId {
        let id = self.add(make);
        if let Some(slot) = self.parent.get_mut(id.index()) {
            *slot = Some(craft);
        }
        self.children.entry(craft).or_default().push(id);
        id
    }

    /// Mount an existing door on `craft`.
    ///
    /// # Errors
    ///
    /// `DoorNotFound` for unknown ids, `AlreadyMounted` if the door already
    /// has a parent.
    pub fn attach(&mut self, craft: CraftId, door: DoorId) -> DoorResult<()> {
        let slot = self.parent.get_mut(door.index()).ok_or(DoorError::DoorNotFound(door))?;
        if let Some(existing) = *slot {
            return Err(DoorError::AlreadyMounted { door, craft: existing });
        }
        *slot = Some(craft);
        self.children.entry(craft).or_default().push(door);
        Ok(())
    }

    #[inline]
    pub fn get(&self, id: DoorId) -> Option<&Door> {
        self.doors.get(id.index())
    }

    #[inline]
    pub fn get_mut(&mut self, id: DoorId) -> Option<&mut Door> {
        self.doors.get_mut(id.index())
    }

    /// Every door in id order.
    pub fn iter(&self) -> impl Iterator<Item = &Door> + '_ {
        self.doors.iter()
    }

    /// The craft a door is mounted on.
    pub fn parent_of(&self, door: DoorId) -> Option<CraftId> {
        self.parent.get(door.index()).copied().flatten()
    }

    /// Direct children of `craft`, in mount order.
    pub fn children_of(&self, craft: CraftId) -> &[DoorId] {
        self.children.get(&craft).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Crafts with at least one door, in ascending id order.
    pub fn crafts(&self) -> impl Iterator<Item = CraftId> + '_ {
        self.children.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.doors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.doors.is_empty()
    }
}
