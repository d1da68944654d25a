//! Reality tears: slowly widen, and once wide open let things through.

use super::Sweep;
use crate::rng::Roll;
use miasma_data::{FieldType, Point, MAX_DENSITY, NETHER_SPECIES};
use rand::Rng;
use tracing::debug;

pub(super) fn tear<R: Rng + ?Sized>(s: &mut Sweep<'_, '_, R>, p: Point) {
    let cell = s.layer.field_at(p);
    if !cell.is(FieldType::Fatigue) {
        return;
    }
    let period = s.config.fatigue_growth_period;
    if cell.density < MAX_DENSITY && s.turn % period == 0 && s.rng.one_in(10) {
        s.set_density(p, cell.density + 1);
    } else if cell.density == MAX_DENSITY && s.rng.one_in(s.config.fatigue_spawn_chance) {
        let Some(species) = s.rng.pick(&NETHER_SPECIES) else {
            return;
        };
        let dx = s.rng.roll(-3, 3);
        let dy = s.rng.roll(-3, 3);
        let at = p.offset(dx, dy);
        if s.inbounds(at) && s.passable(at) && !s.host.occupants.is_occupied(at) {
            s.host.occupants.spawn_monster(species, at);
        } else {
            debug!(species = species.name, x = at.x, y = at.y, "Tear spawn blocked");
        }
    }
}
