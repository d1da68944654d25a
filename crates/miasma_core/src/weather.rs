//! Rain putting out fires.

use crate::host::TerrainMap;
use crate::layer::FieldLayer;
use miasma_data::{FieldType, Point};
use serde::{Deserialize, Serialize};

/// How hard it is raining.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Wetness {
    Wet,
    VeryWet,
}

impl Wetness {
    /// Age added to each exposed fire per turn of rain.
    #[must_use]
    pub fn dousing(self) -> i32 {
        match self {
            Wetness::Wet => 15,
            Wetness::VeryWet => 45,
        }
    }
}

/// Radius around the observer that rain affects.
pub const RAIN_RADIUS: i32 = 24;

/// Ages every outdoor fire within `radius` of `centre`. Returns how many were hit.
pub fn douse_fires(
    layer: &mut FieldLayer,
    terrain: &dyn TerrainMap,
    centre: Point,
    radius: i32,
    wetness: Wetness,
) -> usize {
    let mut doused = 0;
    for x in centre.x - radius..=centre.x + radius {
        for y in centre.y - radius..=centre.y + radius {
            let p = Point::new(x, y);
            if !terrain.is_outside(p) {
                continue;
            }
            if let Some(cell) = layer.field_at_mut(p) {
                if cell.is(FieldType::Fire) {
                    cell.age += wetness.dousing();
                    doused += 1;
                }
            }
        }
    }
    if doused > 0 {
        tracing::debug!(doused, ?wetness, "Rain on open fires");
    }
    doused
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::TerrainLayer;
    use miasma_data::TerrainId;

    #[test]
    fn test_only_outdoor_fires_are_doused() {
        let mut layer = FieldLayer::new(1, 1);
        let mut terrain = TerrainLayer::new(12, 12, TerrainId::Grass);
        terrain.fill(Point::new(8, 8), Point::new(11, 11), TerrainId::Floor);
        let outside = Point::new(2, 2);
        let inside = Point::new(10, 10);
        layer.add_field(outside, FieldType::Fire, 2, 5);
        layer.add_field(inside, FieldType::Fire, 2, 5);
        layer.add_field(Point::new(3, 3), FieldType::Smoke, 2, 5);

        let doused = douse_fires(&mut layer, &terrain, Point::new(5, 5), RAIN_RADIUS, Wetness::VeryWet);
        assert_eq!(doused, 1);
        assert_eq!(layer.field_at(outside).age, 50);
        assert_eq!(layer.field_at(inside).age, 5);
        assert_eq!(layer.field_at(Point::new(3, 3)).age, 5);
    }
}
