//! `CraftStore`: registered hulls plus lazily created dispatch records.

use std::collections::BTreeMap;

use fd_core::CraftId;
use tracing::debug;

use crate::{Craft, CraftDefaults, Hull};

#[derive(Debug, Default)]
pub struct CraftStore {
    hulls:    BTreeMap<CraftId, Hull>,
    crafts:   BTreeMap<CraftId, Craft>,
    defaults: CraftDefaults,
}

impl CraftStore {
    pub fn new(defaults: CraftDefaults) -> Self {
        Self { hulls: BTreeMap::new(), crafts: BTreeMap::new(), defaults }
    }

    pub fn defaults(&self) -> &CraftDefaults {
        &self.defaults
    }

    /// Mark `craft` as a transit vehicle.  Re-registering replaces the hull.
    pub fn register_hull(&mut self, craft: CraftId, hull: Hull) {
        debug!(%craft, faction = %hull.faction, "hull registered");
        self.hulls.insert(craft, hull);
    }

    #[inline]
    pub fn hull(&self, craft: CraftId) -> Option<&Hull> {
        self.hulls.get(&craft)
    }

    #[inline]
    pub fn is_hull(&self, craft: CraftId) -> bool {
        self.hulls.contains_key(&craft)
    }

    pub fn hulls(&self) -> impl Iterator<Item = (CraftId, &Hull)> + '_ {
        self.hulls.iter().map(|(&id, h)| (id, h))
    }

    #[inline]
    pub fn get(&self, craft: CraftId) -> Option<&Craft> {
        self.crafts.get(&craft)
    }

    /// The dispatch record for `craft`, creating it from the store defaults
    /// on first use.
    pub fn ensure(&mut self, craft: CraftId) -> &mut Craft {
        let defaults = &self.defaults;
        self.crafts.entry(craft).or_insert_with(|| Craft::new(craft, defaults))
    }

    /// `true` if a record exists and is flagged crashed.
    pub fn is_crashed(&self, craft: CraftId) -> bool {
        self.crafts.get(&craft).is_some_and(|c| c.crashed)
    }

    pub fn len(&self) -> usize {
        self.crafts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.crafts.is_empty()
    }
}
