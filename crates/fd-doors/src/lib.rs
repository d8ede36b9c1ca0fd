//! `fd-doors` — hull doors and the dock lock coordinator.
//!
//! # Crate layout
//!
//! | Module          | Contents                                                  |
//! |-----------------|-----------------------------------------------------------|
//! | [`door`]        | `Door`, `DoorState` — one boundary access point           |
//! | [`store`]       | `DoorStore` — doors plus their parent craft               |
//! | [`coordinator`] | `lock_door`, `unlock_door`, `set_all_docks`               |
//! | [`error`]       | `DoorError`, `DoorResult<T>`                              |
//!
//! # Lock semantics
//!
//! ```text
//! set_all_docks(craft, true)   every dockable child: closed (forced) + bolts down
//! set_all_docks(craft, false)  every dockable child: bolts up, state untouched
//! ```
//!
//! Non-dockable doors and doors mounted on other craft are never touched.

pub mod coordinator;
pub mod door;
pub mod error;
pub mod store;


pub use coordinator::{lock_door, set_all_docks, unlock_door};
pub use door::{Door, DoorState};
pub use error::{DoorError, DoorResult};
pub use store::DoorStore;
