use super::TerrainMap;
use miasma_data::{Point, TerrainId};
use std::collections::HashMap;

/// Terrain ids, background radiation and vehicle hull points for the bubble.
#[derive(Debug, Clone)]
pub struct TerrainLayer {
    width: i32,
    height: i32,
    tiles: Vec<TerrainId>,
    radiation: Vec<i32>,
    /// Remaining hit points of vehicle parts, by tile.
    vehicles: HashMap<Point, i32>,
}

impl TerrainLayer {
    #[must_use]
    pub fn new(width: i32, height: i32, fill: TerrainId) -> Self {
        let width = width.max(1);
        let height = height.max(1);
        let len = (width * height) as usize;
        Self {
            width,
            height,
            tiles: vec![fill; len],
            radiation: vec![0; len],
            vehicles: HashMap::new(),
        }
    }

    /// Builds a layer from rows of terrain glyphs; unknown glyphs become dirt.
    #[must_use]
    pub fn from_rows(rows: &[&str], width: i32, height: i32) -> Self {
        let mut layer = Self::new(width, height, TerrainId::Dirt);
        for (y, row) in rows.iter().enumerate() {
            for (x, glyph) in row.chars().enumerate() {
                let id = TerrainId::from_glyph(glyph).unwrap_or_default();
                layer.set_terrain(Point::new(x as i32, y as i32), id);
            }
        }
        layer
    }

    fn index(&self, p: Point) -> Option<usize> {
        self.inbounds(p).then(|| (p.y * self.width + p.x) as usize)
    }

    #[must_use]
    pub fn radiation(&self, p: Point) -> i32 {
        self.index(p).map_or(0, |i| self.radiation[i])
    }

    pub fn place_vehicle(&mut self, p: Point, hp: i32) {
        if self.inbounds(p) {
            self.vehicles.insert(p, hp);
        }
    }

    #[must_use]
    pub fn vehicle_hp(&self, p: Point) -> Option<i32> {
        self.vehicles.get(&p).copied()
    }

    /// Fills a rectangle (inclusive corners).
    pub fn fill(&mut self, from: Point, to: Point, id: TerrainId) {
        for x in from.x.min(to.x)..=from.x.max(to.x) {
            for y in from.y.min(to.y)..=from.y.max(to.y) {
                self.set_terrain(Point::new(x, y), id);
            }
        }
    }
}

impl TerrainMap for TerrainLayer {
    fn inbounds(&self, p: Point) -> bool {
        p.x >= 0 && p.y >= 0 && p.x < self.width && p.y < self.height
    }

    fn terrain(&self, p: Point) -> TerrainId {
        self.index(p).map_or(TerrainId::Rock, |i| self.tiles[i])
    }

    fn set_terrain(&mut self, p: Point, id: TerrainId) {
        if let Some(i) = self.index(p) {
            self.tiles[i] = id;
        }
    }

    /// Outdoors unless the tile or a neighbour is roofed floor.
    fn is_outside(&self, p: Point) -> bool {
        p.block()
            .all(|q| !matches!(self.terrain(q), TerrainId::Floor | TerrainId::FloorWax))
    }

    fn add_radiation(&mut self, p: Point, amount: i32) {
        if let Some(i) = self.index(p) {
            self.radiation[i] += amount;
        }
    }

    fn damage_vehicle(&mut self, p: Point, amount: i32) -> bool {
        match self.vehicles.get_mut(&p) {
            Some(hp) => {
                *hp -= amount;
                if *hp <= 0 {
                    self.vehicles.remove(&p);
                    tracing::debug!(x = p.x, y = p.y, "Vehicle part destroyed by fire");
                }
                true
            }
            None => false,
        }
    }
}
