//! Roof/enclosure detection by flood fill.

use crate::host::TerrainMap;
use miasma_data::{Point, TerrainFlags, ORTHOGONAL};
use std::collections::HashSet;

/// Whether a 4-way flood fill from `start`, bounded by roof-supporting
/// terrain, stays away from the edge of a `width` x `height` bubble.
#[must_use]
pub fn will_flood_stop(terrain: &dyn TerrainMap, start: Point, width: i32, height: i32) -> bool {
    let on_edge = |p: Point| p.x <= 0 || p.y <= 0 || p.x >= width - 1 || p.y >= height - 1;

    let mut visited = HashSet::from([start]);
    let mut stack = vec![start];
    while let Some(p) = stack.pop() {
        if on_edge(p) {
            return false;
        }
        for d in ORTHOGONAL {
            let next = p + d;
            if terrain.has_flag(next, TerrainFlags::SUPPORTS_ROOF) || !visited.insert(next) {
                continue;
            }
            stack.push(next);
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::TerrainLayer;
    use miasma_data::TerrainId;

    #[test]
    fn test_walled_room_is_enclosed() {
        let mut terrain = TerrainLayer::new(12, 12, TerrainId::Grass);
        terrain.fill(Point::new(3, 3), Point::new(8, 3), TerrainId::Wall);
        terrain.fill(Point::new(3, 8), Point::new(8, 8), TerrainId::Wall);
        terrain.fill(Point::new(3, 3), Point::new(3, 8), TerrainId::Wall);
        terrain.fill(Point::new(8, 3), Point::new(8, 8), TerrainId::Wall);
        assert!(will_flood_stop(&terrain, Point::new(5, 5), 12, 12));

        terrain.set_terrain(Point::new(8, 5), TerrainId::Floor);
        assert!(!will_flood_stop(&terrain, Point::new(5, 5), 12, 12));
    }

    #[test]
    fn test_edge_start_never_stops() {
        let terrain = TerrainLayer::new(12, 12, TerrainId::Rock);
        assert!(!will_flood_stop(&terrain, Point::new(0, 4), 12, 12));
    }

    #[test]
    fn test_large_open_area_does_not_recurse() {
        let terrain = TerrainLayer::new(400, 400, TerrainId::Grass);
        assert!(!will_flood_stop(&terrain, Point::new(200, 200), 400, 400));
    }
}
