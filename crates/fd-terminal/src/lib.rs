//! `fd-terminal` — navigation terminals and view synchronisation.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                   |
//! |--------------|------------------------------------------------------------|
//! | [`terminal`] | `NavTerminal`, `TerminalIndex`                             |
//! | [`view`]     | `NavView`, `DestinationEntry`, `TravelStatus`              |
//! | [`display`]  | `TerminalDisplay` trait, `ConsoleKind`, `MemoryDisplay`    |
//! | [`sync`]     | `refresh`, `refresh_all`, `view_for`, `open_hijack_console` |
//! | [`error`]    | `TerminalError`, `TerminalResult<T>`                       |
//!
//! This crate reads transit state only through [`fd_core::PhaseSource`] and
//! the destination registry; it never drives a transit.

pub mod display;
pub mod error;
pub mod sync;
pub mod terminal;
pub mod view;


pub use display::{ConsoleKind, MemoryDisplay, TerminalDisplay};
pub use error::{TerminalError, TerminalResult};
pub use sync::{destinations_view, hijack_view, open_hijack_console, refresh, refresh_all, view_for};
pub use terminal::{NavTerminal, TerminalIndex};
pub use view::{DestinationEntry, NavView, TravelStatus};
