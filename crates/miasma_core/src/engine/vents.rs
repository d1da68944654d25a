//! Hidden emitters: gas vents, fire vents and flame bursts, shock vents and
//! acid vents.
//!
//! The oscillating ones use density as a countdown: they bleed density while
//! recharging and fire off when it reaches one.

use super::Sweep;
use crate::rng::Roll;
use miasma_data::{FieldType, Point, MAX_DENSITY};
use rand::Rng;

/// Keeps the surrounding block saturated with toxic gas.
pub(super) fn gas_vent<R: Rng + ?Sized>(s: &mut Sweep<'_, '_, R>, p: Point) {
    let mut vented = false;
    for q in p.block() {
        let cell = s.layer.field_at(q);
        if cell.is(FieldType::ToxicGas) {
            if cell.density < MAX_DENSITY {
                s.set_density(q, cell.density + 1);
                vented = true;
            }
        } else if s.add_field(q, FieldType::ToxicGas, 3, 0) {
            vented = true;
        }
    }
    if vented {
        s.host.events.sound(p, 3, "a hiss");
    }
}

fn flip<R: Rng + ?Sized>(s: &mut Sweep<'_, '_, R>, p: Point, into: FieldType) {
    if let Some(cell) = s.layer.field_at_mut(p) {
        cell.convert(into);
        cell.density = MAX_DENSITY;
    }
}

pub(super) fn fire_vent<R: Rng + ?Sized>(s: &mut Sweep<'_, '_, R>, p: Point) {
    let density = s.layer.field_at(p).density;
    if density > 1 {
        if s.rng.one_in(3) {
            s.set_density(p, density - 1);
        }
    } else {
        flip(s, p, FieldType::FlameBurst);
    }
}

pub(super) fn flame_burst<R: Rng + ?Sized>(s: &mut Sweep<'_, '_, R>, p: Point) {
    let density = s.layer.field_at(p).density;
    if density > 1 {
        s.set_density(p, density - 1);
    } else {
        flip(s, p, FieldType::FireVent);
    }
}

/// Recharges, then throws a handful of jagged lightning bolts.
pub(super) fn shock_vent<R: Rng + ?Sized>(s: &mut Sweep<'_, '_, R>, p: Point) {
    let density = s.layer.field_at(p).density;
    if density > 1 {
        if s.rng.one_in(5) {
            s.set_density(p, density - 1);
        }
        return;
    }
    s.set_density(p, MAX_DENSITY);

    let bolts = s.rng.roll(3, 6);
    for _ in 0..bolts {
        let (mut dx, mut dy) = (0, 0);
        while dx == 0 && dy == 0 {
            dx = s.rng.roll(-1, 1);
            dy = s.rng.roll(-1, 1);
        }
        let length = s.rng.roll(4, 12);
        let mut bolt = p;
        for _ in 0..length {
            bolt = bolt.offset(dx, dy);
            let charge = s.rng.roll(2, 3);
            s.add_field(bolt, FieldType::Electricity, charge, 0);
            if s.rng.one_in(4) {
                dx = if dx == 0 { s.rng.roll(0, 1) * 2 - 1 } else { 0 };
            }
            if s.rng.one_in(4) {
                dy = if dy == 0 { s.rng.roll(0, 1) * 2 - 1 } else { 0 };
            }
        }
    }
    s.host.events.sound(p, 12, "a loud zap");
}

/// Recharges every ten turns, then splashes acid over an 11x11 area.
pub(super) fn acid_vent<R: Rng + ?Sized>(s: &mut Sweep<'_, '_, R>, p: Point) {
    let vent = s.layer.field_at(p);
    if vent.density > 1 {
        if vent.age >= 10 {
            if let Some(cell) = s.layer.field_at_mut(p) {
                cell.density -= 1;
                cell.age = 0;
            }
        }
        return;
    }
    s.set_density(p, MAX_DENSITY);

    for x in p.x - 5..=p.x + 5 {
        for y in p.y - 5..=p.y + 5 {
            let q = Point::new(x, y);
            if !s.layer.field_at(q).is_empty() {
                continue;
            }
            let surge = if s.rng.one_in(3) { 1 } else { 0 };
            let density = (3 - p.rl_dist(q) / 2 + surge).min(MAX_DENSITY);
            if density > 0 {
                s.add_field(q, FieldType::Acid, density, 0);
            }
        }
    }
}
