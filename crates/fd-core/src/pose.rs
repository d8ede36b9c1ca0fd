//! Planar positions and poses handed to the transport mover.
//!
//! Positions are map-local tile coordinates in `f32`.  Rotation is in
//! radians, counter-clockwise.

/// Landing pads are anchored on tile corners while hulls are laid out on tile
/// centres; every transit target is shifted by this amount so the craft sits
/// flush on its pad.
pub const PAD_ALIGNMENT: Vec2 = Vec2 { x: -0.5, y: -0.5 };

/// A 2-D vector in map tile units.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    #[inline]
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn length(self) -> f32 {
        (self.x * self.x + self.y * self.y).sqrt()
    }
}

impl std::ops::Add for Vec2 {
    type Output = Vec2;
    #[inline]
    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl std::ops::Sub for Vec2 {
    type Output = Vec2;
    #[inline]
    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl std::ops::Neg for Vec2 {
    type Output = Vec2;
    #[inline]
    fn neg(self) -> Vec2 {
        Vec2::new(-self.x, -self.y)
    }
}

impl std::fmt::Display for Vec2 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.2}, {:.2})", self.x, self.y)
    }
}

/// A position plus a facing.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Pose {
    pub position: Vec2,
    /// Radians, counter-clockwise from +x.
    pub rotation: f32,
}

impl Pose {
    #[inline]
    pub fn new(position: Vec2, rotation: f32) -> Self {
        Self { position, rotation }
    }

    /// The same pose translated by `delta`; rotation is unchanged.
    #[inline]
    pub fn offset(self, delta: Vec2) -> Pose {
        Pose { position: self.position + delta, rotation: self.rotation }
    }

    /// Where a hull must be placed so that it lands on this pad.
    ///
    /// Subtracts the hull's local centre of mass (the mover positions hulls by
    /// their centre of mass) and then applies [`PAD_ALIGNMENT`].
    #[inline]
    pub fn landing_target(self, center_of_mass: Vec2) -> Pose {
        self.offset(-center_of_mass).offset(PAD_ALIGNMENT)
    }
}

impl std::fmt::Display for Pose {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} @ {:.3} rad", self.position, self.rotation)
    }
}
