//! Map classification for arrival sites.

/// Tags describing the map a destination (or an arrival point) belongs to.
///
/// The transit machine only looks at these on arrival: landing on a planetary
/// map and landing a crashed craft on the home carrier are both broadcast to
/// the rest of the simulation.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SiteTags {
    /// The map is a planet surface (ground-side landing zones).
    pub planetary: bool,
    /// The map is the home carrier (ship-side hangars).
    pub home_carrier: bool,
}

impl SiteTags {
    /// Neither planetary nor the carrier (e.g. open space staging points).
    pub const NONE: SiteTags = SiteTags { planetary: false, home_carrier: false };
    pub const PLANET: SiteTags = SiteTags { planetary: true, home_carrier: false };
    pub const CARRIER: SiteTags = SiteTags { planetary: false, home_carrier: true };

    /// Short label used in manifests and log lines.
    pub fn as_str(self) -> &'static str {
        match (self.planetary, self.home_carrier) {
            (true, false) => "planet",
            (false, true) => "carrier",
            (true, true)  => "planet+carrier",
            (false, false) => "none",
        }
    }

    /// Parse a manifest label (`planet`, `carrier`, `none`, or empty).
    pub fn parse(label: &str) -> Option<SiteTags> {
        match label.trim() {
            "planet" => Some(SiteTags::PLANET),
            "carrier" => Some(SiteTags::CARRIER),
            "planet+carrier" => Some(SiteTags { planetary: true, home_carrier: true }),
            "none" | "" => Some(SiteTags::NONE),
            _ => None,
        }
    }
}

impl std::fmt::Display for SiteTags {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
