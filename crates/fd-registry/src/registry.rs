//! `DestinationRegistry` and its builder.
//!
//! # Claim tables
//!
//! A claim is stored twice: `craft → destination` and `destination → craft`.
//! Both tables are only ever written inside [`DestinationRegistry::claim`] and
//! [`DestinationRegistry::release`], which validate first and then update
//! both sides together, so the tables are always exact inverses of each
//! other.  Callers never see a half-applied swap.
//!
//! # Ordering
//!
//! Destinations live in a `Vec` indexed by `DestinationId`, assigned
//! sequentially at build time.  Every iterator walks that `Vec`, so listing
//! order is creation order and is identical across runs.

use fd_core::{CraftId, DestinationId};
use tracing::debug;

use crate::{Destination, DestinationSpec, RegistryError, RegistryResult};

#[cfg(feature = "fx-hash")]
type ClaimMap<K, V> = rustc_hash::FxHashMap<K, V>;
#[cfg(not(feature = "fx-hash"))]
type ClaimMap<K, V> = std::collections::HashMap<K, V>;

// ── DestinationRegistry ───────────────────────────────────────────────────────

/// All destinations of a session plus the live craft claims on them.
///
/// Create via [`RegistryBuilder`] or the CSV loader.
#[derive(Debug, Default)]
pub struct DestinationRegistry {
    destinations:  Vec<Destination>,
    craft_to_dest: ClaimMap<CraftId, DestinationId>,
    dest_to_craft: ClaimMap<DestinationId, CraftId>,
}

impl DestinationRegistry {
    /// A registry with no destinations.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.destinations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.destinations.is_empty()
    }

    // ── Lookup ────────────────────────────────────────────────────────────

    #[inline]
    pub fn get(&self, id: DestinationId) -> Option<&Destination> {
        self.destinations.get(id.index())
    }

    pub fn find_by_name(&self, name: &str) -> Option<&Destination> {
        self.destinations.iter().find(|d| d.name == name)
    }

    /// The craft currently holding `destination`.
    #[inline]
    pub fn claimed_by(&self, destination: DestinationId) -> Option<CraftId> {
        self.dest_to_craft.get(&destination).copied()
    }

    /// The destination currently held by `craft`.
    #[inline]
    pub fn destination_of(&self, craft: CraftId) -> Option<DestinationId> {
        self.craft_to_dest.get(&craft).copied()
    }

    // ── Claims ────────────────────────────────────────────────────────────

    /// Check whether `craft` could claim `destination` right now, without
    /// changing anything.
    pub fn check_claim(&self, destination: DestinationId, craft: CraftId) -> RegistryResult<()> {
        if self.get(destination).is_none() {
            return Err(RegistryError::DestinationNotFound(destination));
        }
        match self.claimed_by(destination) {
            Some(holder) if holder != craft => Err(RegistryError::AlreadyClaimed { destination, holder }),
            _ => Ok(()),
        }
    }

    /// Assign `destination` to `craft`, releasing whatever `craft` held
    /// before.
    ///
    /// Returns the destination that was released, if any.  Re-claiming the
    /// destination a craft already holds is a no-op returning `None`.
    ///
    /// # Errors
    ///
    /// `AlreadyClaimed` if another craft holds `destination`;
    /// `DestinationNotFound` for unknown ids.  Nothing is modified on error.
    pub fn claim(
        &mut self,
        destination: DestinationId,
        craft:       CraftId,
    ) -> RegistryResult<Option<DestinationId>> {
        self.check_claim(destination, craft)?;

        let previous = self.craft_to_dest.insert(craft, destination);
        let released = previous.filter(|&p| p != destination);
        if let Some(old) = released {
            self.dest_to_craft.remove(&old);
        }
        self.dest_to_craft.insert(destination, craft);

        debug!(%craft, %destination, released = ?released, "destination claimed");
        debug_assert!(self.is_consistent());
        Ok(released)
    }

    /// Drop `craft`'s claim.  Returns the released destination; `None` if the
    /// craft held nothing.
    pub fn release(&mut self, craft: CraftId) -> Option<DestinationId> {
        let released = self.craft_to_dest.remove(&craft)?;
        self.dest_to_craft.remove(&released);
        debug!(%craft, destination = %released, "destination released");
        debug_assert!(self.is_consistent());
        Some(released)
    }

    /// Number of live claims.
    pub fn claim_count(&self) -> usize {
        self.dest_to_craft.len()
    }

    /// `true` when both claim tables are exact inverses.
    pub fn is_consistent(&self) -> bool {
        self.craft_to_dest.len() == self.dest_to_craft.len()
            && self
                .craft_to_dest
                .iter()
                .all(|(craft, dest)| self.dest_to_craft.get(dest) == Some(craft))
    }

    // ── Listing ───────────────────────────────────────────────────────────

    /// Every registered destination, in creation order.
    ///
    /// The iterator borrows the registry, so it always reflects one
    /// consistent snapshot.
    pub fn list_available(&self) -> impl Iterator<Item = &Destination> + '_ {
        self.destinations.iter()
    }

    /// Destinations eligible for automatic promotion to primary: designatable,
    /// unclaimed and not already primary, in creation order.
    pub fn find_primary_candidates(&self) -> impl Iterator<Item = &Destination> + '_ {
        self.destinations
            .iter()
            .filter(|d| d.designatable && !d.primary && !self.dest_to_craft.contains_key(&d.id))
    }

    /// Destinations listed on the hijacker console, in creation order.
    pub fn hijack_destinations(&self) -> impl Iterator<Item = &Destination> + '_ {
        self.destinations.iter().filter(|d| d.hijack_target)
    }

    // ── Primary designation ───────────────────────────────────────────────

    /// The current primary destination.
    pub fn primary(&self) -> Option<DestinationId> {
        self.destinations.iter().find(|d| d.primary).map(|d| d.id)
    }

    pub fn primary_count(&self) -> usize {
        self.destinations.iter().filter(|d| d.primary).count()
    }

    /// Mark `destination` as the primary.
    ///
    /// # Errors
    ///
    /// `PrimaryExists` if any destination (including this one) is already
    /// primary; `NotDesignatable` if the destination does not accept the
    /// role.
    pub fn designate_primary(&mut self, destination: DestinationId) -> RegistryResult<()> {
        if let Some(current) = self.primary() {
            return Err(RegistryError::PrimaryExists(current));
        }
        let dest = self
            .destinations
            .get_mut(destination.index())
            .ok_or(RegistryError::DestinationNotFound(destination))?;
        if !dest.designatable {
            return Err(RegistryError::NotDesignatable(destination));
        }
        dest.primary = true;
        debug!(%destination, name = %dest.name, "primary destination designated");
        Ok(())
    }

    /// Remove the primary flag.  Returns the destination that held it.
    pub fn clear_primary(&mut self) -> Option<DestinationId> {
        let dest = self.destinations.iter_mut().find(|d| d.primary)?;
        dest.primary = false;
        Some(dest.id)
    }
}

// ── RegistryBuilder ───────────────────────────────────────────────────────────

/// Construct a [`DestinationRegistry`] incrementally, then call
/// [`build`](Self::build).
///
/// # Example
///
/// ```
/// use fd_core::{Pose, Vec2};
/// use fd_registry::{DestinationSpec, RegistryBuilder};
///
/// let mut b = RegistryBuilder::new();
/// let lz1 = b.add(DestinationSpec::new("LZ1", Pose::new(Vec2::new(1.0, 1.0), 0.0)));
/// let lz2 = b.add(DestinationSpec::new("LZ2", Pose::new(Vec2::new(9.0, 1.0), 0.0)));
/// let registry = b.build().unwrap();
/// assert_eq!(registry.len(), 2);
/// assert!(lz1 < lz2);
/// ```
#[derive(Default)]
pub struct RegistryBuilder {
    specs: Vec<DestinationSpec>,
}

impl RegistryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a destination and return its `DestinationId` (sequential from 0).
    pub fn add(&mut self, spec: DestinationSpec) -> DestinationId {
        let id = DestinationId(self.specs.len() as u32);
        self.specs.push(spec);
        id
    }

    pub fn len(&self) -> usize {
        self.specs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }

    /// Consume the builder and produce a [`DestinationRegistry`].
    ///
    /// # Errors
    ///
    /// `DuplicateName` if two destinations share a name; `PrimaryExists` if
    /// more than one spec was marked primary.
    pub fn build(self) -> RegistryResult<DestinationRegistry> {
        let mut destinations: Vec<Destination> = Vec::with_capacity(self.specs.len());
        let mut primary: Option<DestinationId> = None;

        for (i, spec) in self.specs.into_iter().enumerate() {
            let id = DestinationId(i as u32);
            if destinations.iter().any(|d| d.name == spec.name) {
                return Err(RegistryError::DuplicateName(spec.name));
            }
            if spec.primary {
                if let Some(existing) = primary {
                    return Err(RegistryError::PrimaryExists(existing));
                }
                primary = Some(id);
            }
            destinations.push(Destination {
                id,
                name:          spec.name,
                pose:          spec.pose,
                site:          spec.site,
                designatable:  spec.designatable || spec.primary,
                hijack_target: spec.hijack_target,
                primary:       spec.primary,
            });
        }

        Ok(DestinationRegistry {
            destinations,
            craft_to_dest: ClaimMap::default(),
            dest_to_craft: ClaimMap::default(),
        })
    }
}
