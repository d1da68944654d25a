//! Plain-text map of the bubble.

use miasma_core::host::{Roster, TerrainLayer};
use miasma_core::{FieldLayer, TerrainMap};
use miasma_data::data::catalog;
use miasma_data::Point;

/// One character per tile: the player, then NPCs, then monsters, then
/// visible fields, then terrain. Vents and pushers stay hidden under their terrain.
#[must_use]
pub fn ascii(layer: &FieldLayer, terrain: &TerrainLayer, roster: &Roster) -> String {
    let (width, height) = (layer.width(), layer.height());
    let mut out = String::with_capacity(((width + 1) * height) as usize);
    for y in 0..height {
        for x in 0..width {
            out.push(glyph_at(Point::new(x, y), layer, terrain, roster));
        }
        out.push('\n');
    }
    out
}

fn glyph_at(p: Point, layer: &FieldLayer, terrain: &TerrainLayer, roster: &Roster) -> char {
    if roster.player.as_ref().is_some_and(|u| u.pos == p) {
        return '@';
    }
    if roster.npcs.iter().any(|n| n.pos == p) {
        return 'P';
    }
    if let Some(monster) = roster.monsters.iter().find(|m| m.pos == p) {
        return monster.glyph;
    }
    let cell = layer.field_at(p);
    if !cell.is_empty() && !catalog::is_hidden(cell.field_type()) {
        return catalog::info(cell.field_type()).glyph;
    }
    terrain.terrain(p).info().glyph
}
