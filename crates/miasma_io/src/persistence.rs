//! Saved layout of the field layer.
//!
//! A field is written as `(type, density, age)` with the type as its stable
//! string key. Each submap keeps a list of `(x, y, record)` triples for its
//! non-empty tiles. Newborn bookkeeping is not saved: every loaded cell takes
//! part in the next pass.

use crate::error::{IoError, Result};
use miasma_core::{FieldLayer, SUBMAP_SIZE};
use miasma_data::{FieldCell, FieldType, Point, MAX_DENSITY, MIN_DENSITY};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Current save layout version.
pub const FORMAT_VERSION: u32 = 1;

/// Largest bubble side, in submaps, a save may describe.
pub const MAX_SUBMAPS: i32 = 32;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldRecord {
    #[serde(rename = "type")]
    pub kind: String,
    pub density: i32,
    pub age: i32,
}

impl FieldRecord {
    /// `None` for an empty cell.
    #[must_use]
    pub fn from_cell(cell: &FieldCell) -> Option<Self> {
        let key = cell.field_type().key()?;
        Some(Self {
            kind: key.to_string(),
            density: cell.density,
            age: cell.age,
        })
    }
}

/// A non-empty tile: local coordinates within its submap plus the field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellRecord(pub i32, pub i32, pub FieldRecord);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmapRecord {
    pub sx: i32,
    pub sy: i32,
    pub fields: Vec<CellRecord>,
}

/// Everything needed to rebuild a field layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayerSnapshot {
    pub version: u32,
    pub submaps_x: i32,
    pub submaps_y: i32,
    pub submaps: Vec<SubmapRecord>,
}

/// What a restore had to drop or fix.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    pub loaded: usize,
    /// Records whose type key this build does not know.
    pub unknown: usize,
    /// Records placed outside the bubble or their submap.
    pub misplaced: usize,
    /// Records whose density was clamped into range.
    pub clamped: usize,
}

impl LayerSnapshot {
    /// Records every non-empty cell. Submaps without fields are left out.
    #[must_use]
    pub fn capture(layer: &FieldLayer) -> Self {
        let (submaps_x, submaps_y) = layer.submaps();
        let mut submaps = Vec::new();
        for sy in 0..submaps_y {
            for sx in 0..submaps_x {
                let Some(grid) = layer.submap(sx, sy) else {
                    continue;
                };
                if grid.live_count() == 0 {
                    continue;
                }
                let fields: Vec<CellRecord> = grid
                    .iter()
                    .filter_map(|(lx, ly, cell)| {
                        FieldRecord::from_cell(cell).map(|r| CellRecord(lx, ly, r))
                    })
                    .collect();
                submaps.push(SubmapRecord { sx, sy, fields });
            }
        }
        Self {
            version: FORMAT_VERSION,
            submaps_x,
            submaps_y,
            submaps,
        }
    }

    /// Rebuilds the layer. Bad records degrade to empty tiles; only a bad
    /// header is an error.
    pub fn restore(&self) -> Result<(FieldLayer, LoadReport)> {
        if self.version > FORMAT_VERSION {
            return Err(IoError::validation(format!(
                "Save version {} is newer than supported version {FORMAT_VERSION}",
                self.version
            )));
        }
        let sizes = 1..=MAX_SUBMAPS;
        if !sizes.contains(&self.submaps_x) || !sizes.contains(&self.submaps_y) {
            return Err(IoError::validation(format!(
                "Bubble of {}x{} submaps is out of range",
                self.submaps_x, self.submaps_y
            )));
        }

        let mut layer = FieldLayer::new(self.submaps_x, self.submaps_y);
        let mut report = LoadReport::default();
        for submap in &self.submaps {
            if layer.submap(submap.sx, submap.sy).is_none() {
                warn!(sx = submap.sx, sy = submap.sy, "Submap outside the bubble, dropped");
                report.misplaced += submap.fields.len();
                continue;
            }
            for CellRecord(lx, ly, record) in &submap.fields {
                let local = 0..SUBMAP_SIZE;
                if !local.contains(lx) || !local.contains(ly) {
                    report.misplaced += 1;
                    continue;
                }
                let Some(kind) = FieldType::from_key(&record.kind) else {
                    warn!(key = %record.kind, "Unknown field type, loaded as empty");
                    report.unknown += 1;
                    continue;
                };
                let mut density = record.density;
                if !(MIN_DENSITY..=MAX_DENSITY).contains(&density) {
                    warn!(key = %record.kind, density, "Saved density out of range, clamped");
                    density = density.clamp(MIN_DENSITY, MAX_DENSITY);
                    report.clamped += 1;
                }
                let p = Point::new(
                    submap.sx * SUBMAP_SIZE + lx,
                    submap.sy * SUBMAP_SIZE + ly,
                );
                layer.restore(p, FieldCell::mature(kind, density, record.age));
                report.loaded += 1;
            }
        }
        debug!(
            loaded = report.loaded,
            unknown = report.unknown,
            misplaced = report.misplaced,
            clamped = report.clamped,
            "Field layer restored"
        );
        Ok((layer, report))
    }
}
