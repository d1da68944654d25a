//! Per-submap storage of field cells.

use miasma_data::{FieldCell, FieldType};

/// Side length of a submap in tiles.
pub const SUBMAP_SIZE: i32 = 12;

/// One submap's fields plus an exact count of non-empty cells.
///
/// All writes that can change emptiness go through [`FieldGrid::place`] and
/// [`FieldGrid::clear`], which keep `live_count` in step.
#[derive(Debug, Clone)]
pub struct FieldGrid {
    cells: Vec<FieldCell>,
    live_count: usize,
}

impl Default for FieldGrid {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldGrid {
    #[must_use]
    pub fn new() -> Self {
        Self {
            cells: vec![FieldCell::default(); (SUBMAP_SIZE * SUBMAP_SIZE) as usize],
            live_count: 0,
        }
    }

    #[inline(always)]
    fn index(lx: i32, ly: i32) -> usize {
        debug_assert!((0..SUBMAP_SIZE).contains(&lx) && (0..SUBMAP_SIZE).contains(&ly));
        (ly * SUBMAP_SIZE + lx) as usize
    }

    #[must_use]
    pub fn live_count(&self) -> usize {
        self.live_count
    }

    #[must_use]
    pub fn get(&self, lx: i32, ly: i32) -> &FieldCell {
        &self.cells[Self::index(lx, ly)]
    }

    /// Mutable access for density/age/type changes. Emptiness must not be
    /// changed through this reference.
    pub fn get_mut(&mut self, lx: i32, ly: i32) -> &mut FieldCell {
        &mut self.cells[Self::index(lx, ly)]
    }

    /// Overwrites a tile with `cell`, counting it if the tile was empty.
    pub fn place(&mut self, lx: i32, ly: i32, cell: FieldCell) {
        let slot = &mut self.cells[Self::index(lx, ly)];
        match (slot.is_empty(), cell.is_empty()) {
            (true, false) => self.live_count += 1,
            (false, true) => self.live_count -= 1,
            _ => {}
        }
        *slot = cell;
    }

    /// Empties a tile. Returns the previous type.
    pub fn clear(&mut self, lx: i32, ly: i32) -> FieldType {
        let slot = &mut self.cells[Self::index(lx, ly)];
        let previous = slot.field_type();
        if !slot.is_empty() {
            self.live_count -= 1;
        }
        *slot = FieldCell::default();
        previous
    }

    /// Marks every newborn cell as having survived one pass.
    pub fn mature_newborns(&mut self) {
        if self.live_count == 0 {
            return;
        }
        for cell in self.cells.iter_mut().filter(|c| c.is_newborn()) {
            cell.ticks_alive = 1;
        }
    }

    /// Recomputes the live count from scratch.
    #[must_use]
    pub fn counted_live(&self) -> usize {
        self.cells.iter().filter(|c| !c.is_empty()).count()
    }

    pub fn iter(&self) -> impl Iterator<Item = (i32, i32, &FieldCell)> {
        self.cells.iter().enumerate().map(|(i, c)| {
            let i = i as i32;
            (i % SUBMAP_SIZE, i / SUBMAP_SIZE, c)
        })
    }
}
