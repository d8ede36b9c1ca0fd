//! Fluent builder for constructing a [`Dispatcher`].

use fd_core::{CraftId, DispatchConfig};
use fd_doors::DoorStore;
use fd_registry::DestinationRegistry;
use fd_terminal::{TerminalDisplay, TerminalIndex};
use fd_transit::{
    CraftDefaults, CraftStore, Hull, Outlets, PhaseSender, TimedMover, TransitMachine,
    TransportMover, phase_channel,
};

use crate::{
    AutoDesignationMonitor, DispatchError, DispatchResult, Dispatcher, PrimaryDesignator,
    RegistryDesignator,
};

/// Fluent builder for [`Dispatcher<M, D>`].
///
/// # Required inputs
///
/// - [`DispatchConfig`] — tick length, delays, cooldowns
/// - [`DestinationRegistry`] — from [`fd_registry::RegistryBuilder`] or a CSV manifest
/// - `D: TerminalDisplay` — where terminal views go
///
/// # Optional inputs (have defaults)
///
/// | Method            | Default                         |
/// |-------------------|---------------------------------|
/// | `.hull(c, h)`     | No transit vehicles             |
/// | `.doors(s)`       | Empty `DoorStore`               |
/// | `.terminals(i)`   | Empty `TerminalIndex`           |
/// | `.outlets(o)`     | `Outlets::default()`            |
/// | `.designator(d)`  | `RegistryDesignator`            |
///
/// The mover is supplied last, through [`build`](Self::build), because it
/// needs the phase sender the builder creates.
///
/// # Example
///
/// ```rust,ignore
/// let mut dispatcher = DispatchBuilder::new(config, registry, MemoryDisplay::new())
///     .hull(CraftId(0), Hull::new(Vec2::ZERO, FactionId(0)))
///     .terminals(terminals)
///     .build_timed()?;
/// dispatcher.run(&mut NoopObserver);
/// ```
pub struct DispatchBuilder<D: TerminalDisplay> {
    config:     DispatchConfig,
    registry:   DestinationRegistry,
    display:    D,
    hulls:      Vec<(CraftId, Hull)>,
    doors:      Option<DoorStore>,
    terminals:  Option<TerminalIndex>,
    outlets:    Option<Outlets>,
    designator: Option<Box<dyn PrimaryDesignator>>,
}

impl<D: TerminalDisplay> DispatchBuilder<D> {
    pub fn new(config: DispatchConfig, registry: DestinationRegistry, display: D) -> Self {
        Self {
            config,
            registry,
            display,
            hulls:      Vec::new(),
            doors:      None,
            terminals:  None,
            outlets:    None,
            designator: None,
        }
    }

    /// Register `craft` as a transit vehicle.
    pub fn hull(mut self, craft: CraftId, hull: Hull) -> Self {
        self.hulls.push((craft, hull));
        self
    }

    pub fn doors(mut self, doors: DoorStore) -> Self {
        self.doors = Some(doors);
        self
    }

    pub fn terminals(mut self, terminals: TerminalIndex) -> Self {
        self.terminals = Some(terminals);
        self
    }

    pub fn outlets(mut self, outlets: Outlets) -> Self {
        self.outlets = Some(outlets);
        self
    }

    pub fn designator(mut self, designator: impl PrimaryDesignator + 'static) -> Self {
        self.designator = Some(Box::new(designator));
        self
    }

    /// Validate inputs, create the phase channel, and hand the sender to
    /// `make_mover`.
    ///
    /// # Errors
    ///
    /// - invalid config
    /// - a door or terminal mounted on a craft with no registered hull
    pub fn build<M, F>(self, make_mover: F) -> DispatchResult<Dispatcher<M, D>>
    where
        M: TransportMover,
        F: FnOnce(PhaseSender, &DispatchConfig) -> M,
    {
        self.config.validate()?;

        let doors = self.doors.unwrap_or_default();
        let terminals = self.terminals.unwrap_or_default();

        // ── Every mount must name a registered hull ───────────────────────
        let is_hull = |craft: CraftId| self.hulls.iter().any(|(c, _)| *c == craft);
        if let Some(craft) = doors.crafts().find(|&c| !is_hull(c)) {
            return Err(DispatchError::UnknownHull { what: "door", craft });
        }
        if let Some(craft) = terminals.iter().filter_map(|t| t.mount).find(|&c| !is_hull(c)) {
            return Err(DispatchError::UnknownHull { what: "terminal", craft });
        }

        // ── Craft records ─────────────────────────────────────────────────
        let mut crafts = CraftStore::new(CraftDefaults {
            lock_cooldown:      self.config.lock_cooldown(),
            announce_hijack_in: self.config.announce_hijack_in(),
            ..CraftDefaults::default()
        });
        for (craft, hull) in self.hulls {
            crafts.register_hull(craft, hull);
        }

        // ── Phase channel and mover ───────────────────────────────────────
        let (tx, rx) = phase_channel();
        let mover = make_mover(tx.clone(), &self.config);
        let machine = TransitMachine::new(mover, crafts, self.outlets.unwrap_or_default());

        Ok(Dispatcher {
            clock:      self.config.make_clock(),
            monitor:    AutoDesignationMonitor::new(self.config.primary_auto_delay()),
            config:     self.config,
            registry:   self.registry,
            machine,
            doors,
            terminals,
            display:    self.display,
            designator: self.designator.unwrap_or_else(|| Box::new(RegistryDesignator)),
            notices:    rx,
            updates:    tx,
        })
    }

    /// [`build`](Self::build) with the timer-driven [`TimedMover`].
    pub fn build_timed(self) -> DispatchResult<Dispatcher<TimedMover, D>> {
        self.build(|tx, config| TimedMover::new(tx, config))
    }
}
