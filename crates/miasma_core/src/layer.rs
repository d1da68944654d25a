//! The field layer of the loaded reality bubble.

use crate::grid::{FieldGrid, SUBMAP_SIZE};
use crate::rng::Roll;
use miasma_data::data::catalog;
use miasma_data::{FieldCell, FieldType, Point, MAX_DENSITY};
use rand::Rng;

/// Fields for every loaded submap, addressed in bubble coordinates.
#[derive(Debug, Clone)]
pub struct FieldLayer {
    submaps_x: i32,
    submaps_y: i32,
    grids: Vec<FieldGrid>,
}

impl FieldLayer {
    #[must_use]
    pub fn new(submaps_x: i32, submaps_y: i32) -> Self {
        let submaps_x = submaps_x.max(1);
        let submaps_y = submaps_y.max(1);
        Self {
            submaps_x,
            submaps_y,
            grids: vec![FieldGrid::new(); (submaps_x * submaps_y) as usize],
        }
    }

    #[must_use]
    pub fn width(&self) -> i32 {
        self.submaps_x * SUBMAP_SIZE
    }

    #[must_use]
    pub fn height(&self) -> i32 {
        self.submaps_y * SUBMAP_SIZE
    }

    #[must_use]
    pub fn submaps(&self) -> (i32, i32) {
        (self.submaps_x, self.submaps_y)
    }

    #[must_use]
    pub fn inbounds(&self, p: Point) -> bool {
        p.x >= 0 && p.y >= 0 && p.x < self.width() && p.y < self.height()
    }

    fn locate(&self, p: Point) -> Option<(usize, i32, i32)> {
        if !self.inbounds(p) {
            return None;
        }
        let sx = p.x / SUBMAP_SIZE;
        let sy = p.y / SUBMAP_SIZE;
        Some((
            (sx + sy * self.submaps_x) as usize,
            p.x % SUBMAP_SIZE,
            p.y % SUBMAP_SIZE,
        ))
    }

    #[must_use]
    pub fn submap(&self, sx: i32, sy: i32) -> Option<&FieldGrid> {
        if !(0..self.submaps_x).contains(&sx) || !(0..self.submaps_y).contains(&sy) {
            return None;
        }
        self.grids.get((sx + sy * self.submaps_x) as usize)
    }

    /// The cell at `p`; out-of-bounds tiles read as empty.
    #[must_use]
    pub fn field_at(&self, p: Point) -> FieldCell {
        self.locate(p)
            .map(|(g, lx, ly)| *self.grids[g].get(lx, ly))
            .unwrap_or_default()
    }

    /// Mutable access to an in-bounds cell. Use [`FieldLayer::remove_field`] to empty it.
    pub fn field_at_mut(&mut self, p: Point) -> Option<&mut FieldCell> {
        let (g, lx, ly) = self.locate(p)?;
        Some(self.grids[g].get_mut(lx, ly))
    }

    /// Places a new field.
    ///
    /// Fails out of bounds, on a tile holding anything but an empty or
    /// cosmetic field, and for non-positive densities. Fire feeds on webs and
    /// gains a density step when placed onto one.
    pub fn add_field(&mut self, p: Point, field_type: FieldType, density: i32, age: i32) -> bool {
        let Some((g, lx, ly)) = self.locate(p) else {
            return false;
        };
        if field_type == FieldType::Null {
            return false;
        }
        let existing = *self.grids[g].get(lx, ly);
        let mut density = density;
        if existing.is(FieldType::Web) && field_type == FieldType::Fire {
            density += 1;
        } else if !existing.is_null_like() {
            return false;
        }
        let density = density.min(MAX_DENSITY);
        if density <= 0 {
            return false;
        }
        self.grids[g].place(lx, ly, FieldCell::new(field_type, density, age));
        true
    }

    /// Puts a cell back exactly as given, as a save loader does.
    pub fn restore(&mut self, p: Point, cell: FieldCell) -> bool {
        let Some((g, lx, ly)) = self.locate(p) else {
            return false;
        };
        self.grids[g].place(lx, ly, cell);
        true
    }

    /// Empties a tile. Returns the type that was there.
    pub fn remove_field(&mut self, p: Point) -> FieldType {
        match self.locate(p) {
            Some((g, lx, ly)) => self.grids[g].clear(lx, ly),
            None => FieldType::Null,
        }
    }

    /// Sets the density of an active field, clearing it when it drops to zero.
    pub fn set_density(&mut self, p: Point, density: i32) {
        if density <= 0 {
            self.remove_field(p);
        } else if let Some(cell) = self.field_at_mut(p) {
            if !cell.is_empty() {
                cell.density = density.min(MAX_DENSITY);
            }
        }
    }

    /// Total active fields across the bubble.
    #[must_use]
    pub fn live_count(&self) -> usize {
        self.grids.iter().map(FieldGrid::live_count).sum()
    }

    /// Line of sight through the field on `p`. Empty tiles are transparent.
    #[must_use]
    pub fn is_transparent(&self, p: Point) -> bool {
        let cell = self.field_at(p);
        cell.is_empty() || catalog::is_transparent(cell.field_type(), cell.density)
    }

    /// Bashing a tile tears down any web on it.
    pub fn smash_web(&mut self, p: Point) -> bool {
        if self.field_at(p).is(FieldType::Web) {
            self.remove_field(p);
            true
        } else {
            false
        }
    }

    /// A projectile passing through `p`. Incendiary rounds set webs alight;
    /// others may tear through, losing some damage.
    pub fn shoot_web<R: Rng + ?Sized>(
        &mut self,
        p: Point,
        damage: &mut i32,
        incendiary: bool,
        rng: &mut R,
    ) {
        let web = self.field_at(p);
        if !web.is(FieldType::Web) {
            return;
        }
        if incendiary {
            self.add_field(p, FieldType::Fire, web.density - 1, 0);
        } else if *damage > 5 + web.density * 5 && rng.one_in(5 - web.density) {
            *damage -= rng.roll(1, 2 + web.density * 2);
            self.remove_field(p);
        }
    }

    /// Ends a pass: cells created during it take part from the next one.
    pub fn mature_newborns(&mut self) {
        for grid in &mut self.grids {
            grid.mature_newborns();
        }
    }

    /// Submaps in update order with their live counts.
    pub fn submap_order(&self) -> impl Iterator<Item = (i32, i32, usize)> + '_ {
        (0..self.submaps_x).flat_map(move |sx| {
            (0..self.submaps_y).map(move |sy| {
                let live = self.submap(sx, sy).map_or(0, FieldGrid::live_count);
                (sx, sy, live)
            })
        })
    }

    /// Every active cell with its bubble position.
    pub fn active(&self) -> impl Iterator<Item = (Point, &FieldCell)> + '_ {
        self.grids.iter().enumerate().flat_map(move |(i, grid)| {
            let sx = i as i32 % self.submaps_x;
            let sy = i as i32 / self.submaps_x;
            grid.iter()
                .filter(|(_, _, c)| !c.is_empty())
                .map(move |(lx, ly, c)| {
                    (Point::new(sx * SUBMAP_SIZE + lx, sy * SUBMAP_SIZE + ly), c)
                })
        })
    }

    /// Checks every grid's live count against a full recount.
    #[must_use]
    pub fn counts_consistent(&self) -> bool {
        self.grids.iter().all(|g| g.live_count() == g.counted_live())
    }
}
