//! Craft-wide dock locking.
//!
//! Locking is an authoritative override: a dock that is open gets slammed
//! shut even if someone is standing in it, then bolted.  Unlocking only lifts
//! the bolts; the door stays wherever it is and opens normally afterwards.

use fd_core::CraftId;
use tracing::{debug, trace};

use crate::{Door, DoorStore};

/// Force `door` closed and bolt it.
///
/// The collision check is switched off only for the forced close and put
/// back to its previous value afterwards.
pub fn lock_door(door: &mut Door) {
    if !door.is_closed() {
        let old_check = door.perform_collision_check;
        door.perform_collision_check = false;

        door.start_closing();
        door.on_partial_close();

        door.perform_collision_check = old_check;
        trace!(door = %door.id, "door force-closed");
    }

    if door.has_bolts() {
        door.set_bolts_down(true);
    }
}

/// Lift `door`'s bolts.  Never opens the door.
pub fn unlock_door(door: &mut Door) {
    if door.has_bolts() {
        door.set_bolts_down(false);
    }
}

/// Lock or unlock every dockable door mounted directly on `craft`.
///
/// Returns how many doors were driven.
pub fn set_all_docks(doors: &mut DoorStore, craft: CraftId, locked: bool) -> usize {
    let children = doors.children_of(craft).to_vec();
    let mut driven = 0;
    for id in children {
        let Some(door) = doors.get_mut(id) else { continue };
        if !door.dockable {
            continue;
        }
        if locked {
            lock_door(door);
        } else {
            unlock_door(door);
        }
        driven += 1;
    }
    debug!(%craft, locked, driven, "docks updated");
    driven
}
