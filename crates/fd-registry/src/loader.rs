//! CSV destination manifest loader.
//!
//! # CSV format
//!
//! One row per destination, in creation order.
//!
//! ```csv
//! name,x,y,rotation,site,designatable,hijack,primary
//! Hangar A,0.0,0.0,0.0,carrier,false,true,false
//! LZ1 Nexus,120.5,44.0,0.0,planet,true,false,false
//! LZ2 Caves,-80.0,12.5,1.5708,planet,true,false,false
//! ```
//!
//! **`site`** is `planet`, `carrier`, `none` or empty.  The three boolean
//! columns accept `true`/`false`.

use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use fd_core::{Pose, SiteTags, Vec2};

use crate::{DestinationRegistry, DestinationSpec, RegistryBuilder, RegistryError, RegistryResult};

// ── CSV record ────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct ManifestRecord {
    name:         String,
    x:            f32,
    y:            f32,
    rotation:     f32,
    site:         String,
    designatable: bool,
    hijack:       bool,
    primary:      bool,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load a destination registry from a CSV manifest file.
pub fn load_destinations_csv(path: &Path) -> RegistryResult<DestinationRegistry> {
    let file = std::fs::File::open(path).map_err(RegistryError::Io)?;
    load_destinations_reader(file)
}

/// Like [`load_destinations_csv`] but accepts any `Read` source.
///
/// Useful for testing (pass a `std::io::Cursor`) or for manifests embedded
/// in a map file.
pub fn load_destinations_reader<R: Read>(reader: R) -> RegistryResult<DestinationRegistry> {
    let mut csv_reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let mut builder = RegistryBuilder::new();

    for (line, result) in csv_reader.deserialize::<ManifestRecord>().enumerate() {
        let row = result.map_err(|e| RegistryError::Parse(e.to_string()))?;
        let site = SiteTags::parse(&row.site).ok_or_else(|| {
            RegistryError::Parse(format!(
                "row {}: invalid site {:?}: expected \"planet\", \"carrier\" or \"none\"",
                line + 1,
                row.site
            ))
        })?;

        let mut spec = DestinationSpec::new(row.name, Pose::new(Vec2::new(row.x, row.y), row.rotation))
            .site(site);
        spec.designatable  = row.designatable;
        spec.hijack_target = row.hijack;
        spec.primary       = row.primary;
        builder.add(spec);
    }

    builder.build()
}
