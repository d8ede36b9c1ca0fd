//! Destination records and their construction-time description.

use fd_core::{DestinationId, Pose, SiteTags};

/// A named transit target.
///
/// Which craft holds a destination is *not* stored here; the registry keeps
/// claims in its own lookup tables so the two sides can never drift apart.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Destination {
    pub id:   DestinationId,
    pub name: String,

    /// Pad pose on its map.
    pub pose: Pose,

    /// What kind of map the pad sits on.
    pub site: SiteTags,

    /// May be promoted to primary (manually or automatically).
    pub designatable: bool,

    /// Listed on the hijacker console.
    pub hijack_target: bool,

    pub(crate) primary: bool,
}

impl Destination {
    #[inline]
    pub fn is_primary(&self) -> bool {
        self.primary
    }
}

/// Description of a destination before it is registered.
///
/// ```
/// use fd_core::{Pose, SiteTags, Vec2};
/// use fd_registry::DestinationSpec;
///
/// let lz = DestinationSpec::new("LZ1 Nexus", Pose::new(Vec2::new(4.0, 9.0), 0.0))
///     .site(SiteTags::PLANET)
///     .designatable();
/// assert!(lz.designatable);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct DestinationSpec {
    pub name:          String,
    pub pose:          Pose,
    pub site:          SiteTags,
    pub designatable:  bool,
    pub hijack_target: bool,
    pub primary:       bool,
}

impl DestinationSpec {
    pub fn new(name: impl Into<String>, pose: Pose) -> Self {
        Self {
            name:          name.into(),
            pose,
            site:          SiteTags::NONE,
            designatable:  false,
            hijack_target: false,
            primary:       false,
        }
    }

    pub fn site(mut self, site: SiteTags) -> Self {
        self.site = site;
        self
    }

    pub fn designatable(mut self) -> Self {
        self.designatable = true;
        self
    }

    pub fn hijack_target(mut self) -> Self {
        self.hijack_target = true;
        self
    }

    /// Start the session with this destination already primary.
    pub fn primary(mut self) -> Self {
        self.primary = true;
        self
    }
}
