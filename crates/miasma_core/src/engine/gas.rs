//! Smoke, tear gas, toxic gas and radioactive gas drifting and upgrading.

use super::Sweep;
use crate::rng::Roll;
use miasma_data::{FieldType, Point, MAX_DENSITY};
use rand::Rng;

/// Extra ageing per turn in the open, and the one-in-N drift chance.
fn drift(kind: FieldType) -> (i32, i32) {
    match kind {
        FieldType::Smoke => (50, 2),
        FieldType::TearGas => (30, 3),
        FieldType::ToxicGas => (40, 2),
        _ => (40, 2),
    }
}

/// Whether gas of `rank` may flow into `p`.
fn accepts<R: Rng + ?Sized>(s: &Sweep<'_, '_, R>, p: Point, rank: u8) -> bool {
    if !s.inbounds(p) {
        return false;
    }
    let cell = s.layer.field_at(p);
    match cell.field_type().gas_rank() {
        Some(other) => other <= rank && cell.density < MAX_DENSITY,
        None => cell.is_null_like() && s.passable(p),
    }
}

pub(super) fn spread<R: Rng + ?Sized>(s: &mut Sweep<'_, '_, R>, p: Point, kind: FieldType) {
    let Some(rank) = kind.gas_rank() else {
        return;
    };
    if !s.layer.field_at(p).is(kind) {
        return;
    }
    for q in p.block() {
        s.host.events.clear_scent(q);
    }

    let (outdoor_age, chance) = drift(kind);
    if s.host.terrain.is_outside(p) {
        if let Some(cell) = s.layer.field_at_mut(p) {
            cell.age += outdoor_age;
        }
    }
    if kind == FieldType::NukeGas {
        let density = s.layer.field_at(p).density;
        let dose = s.rng.roll(0, density);
        s.host.terrain.add_radiation(p, dose);
    }

    let cell = s.layer.field_at(p);
    if cell.age <= 0 || !s.rng.one_in(chance) {
        return;
    }
    let view = &*s;
    let targets: Vec<Point> = p.neighbors().filter(|&q| accepts(view, q, rank)).collect();
    let Some(&target) = s.rng.pick(&targets) else {
        return;
    };

    let neighbour = s.layer.field_at(target);
    if neighbour.is(kind) {
        s.set_density(target, neighbour.density + 1);
    } else if neighbour.field_type().gas_rank().is_some() {
        if let Some(weaker) = s.layer.field_at_mut(target) {
            weaker.convert(kind);
        }
    } else if !s.add_field(target, kind, 1, cell.age) {
        return;
    }
    s.set_density(p, cell.density - 1);
}
