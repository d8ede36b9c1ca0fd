//! `fd-sim` — tick loop orchestrator for the FTL dispatch engine.
//!
//! # Tick loop
//!
//! ```text
//! for tick in 0..config.total_ticks:
//!   ① Mover     — TransportMover::advance(now)
//!   ② Notices   — drain PhaseReceiver; TransitMachine::on_phase_changed each;
//!                 refresh_all once if anything arrived
//!   ③ Monitor   — AutoDesignationMonitor::check; announce + refresh on promotion
//! ```
//!
//! Launches, lock toggles, console activations, and manual designations are
//! direct calls on [`Dispatcher`] between ticks.
//!
//! # Cargo features
//!
//! | Feature   | Effect                                               |
//! |-----------|------------------------------------------------------|
//! | `fx-hash` | FxHash for the destination claim tables.             |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use fd_sim::{DispatchBuilder, NoopObserver, load_config};
//! use fd_registry::load_destinations_csv;
//! use fd_terminal::MemoryDisplay;
//!
//! let config = load_config(Path::new("dispatch.toml"))?;
//! let registry = load_destinations_csv(Path::new("destinations.csv"))?;
//! let mut dispatcher = DispatchBuilder::new(config, registry, MemoryDisplay::new())
//!     .hull(ship, hull)
//!     .build_timed()?;
//! dispatcher.run(&mut NoopObserver);
//! ```

pub mod builder;
pub mod config;
pub mod designator;
pub mod dispatcher;
pub mod error;
pub mod monitor;
pub mod observer;


pub use builder::DispatchBuilder;
pub use config::{config_from_toml_str, load_config};
pub use designator::{PrimaryDesignator, RegistryDesignator};
pub use dispatcher::Dispatcher;
pub use error::{DispatchError, DispatchResult};
pub use monitor::AutoDesignationMonitor;
pub use observer::{DispatchObserver, NoopObserver};
