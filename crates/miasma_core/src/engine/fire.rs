//! Fire: eats items and terrain for fuel, grows, merges and spreads.
//!
//! A fire's negative age is its fuel reserve. Every 300 points of reserve buy
//! one density step; a raging fire with reserve to spare donates it to a
//! weaker fire next door.

use super::Sweep;
use crate::rng::Roll;
use miasma_data::{AmmoType, FieldCell, FieldType, Item, Material, Point, TerrainFlags, TerrainId};
use rand::Rng;

pub(super) fn burn<R: Rng + ?Sized>(s: &mut Sweep<'_, '_, R>, p: Point) {
    let mut fire = s.layer.field_at(p);
    if !fire.is(FieldType::Fire) {
        return;
    }
    let mut smoke = consume_items(s, p, &mut fire);
    s.host.terrain.damage_vehicle(p, fire.density * 10);
    smoke += consume_terrain(s, p, &mut fire);

    let before = fire.density;
    while fire.density < 3 && fire.age < 0 {
        fire.age += 300;
        fire.density += 1;
    }
    if before < 3 && fire.density == 3 {
        s.host.events.sound(p, 6, "a roaring fire");
    }
    write_back(s, p, fire);

    let in_pit = s.host.terrain.terrain(p) == TerrainId::Pit;
    if fire.density == 3 && fire.age < 0 {
        merge(s, p, &mut fire, in_pit);
        write_back(s, p, fire);
    }
    spread(s, p, fire, smoke, in_pit);
}

fn write_back<R: Rng + ?Sized>(s: &mut Sweep<'_, '_, R>, p: Point, fire: FieldCell) {
    if let Some(cell) = s.layer.field_at_mut(p) {
        cell.density = fire.density;
        cell.age = fire.age;
    }
}

/// Burns through the top of the pile, at most two items per density step.
/// Returns the smoke produced.
fn consume_items<R: Rng + ?Sized>(s: &mut Sweep<'_, '_, R>, p: Point, fire: &mut FieldCell) -> i32 {
    let Some(stack) = s.host.items.stack_mut(p) else {
        return 0;
    };
    let rng = &mut *s.rng;
    let mut smoke = 0;
    let mut consumed = 0;
    let mut i = stack.len();
    while i > 0 && consumed < fire.density * 2 {
        i -= 1;
        let d = fire.density;
        let item = &mut stack[i];
        let vol = item.volume;
        let mut destroyed = false;

        if item.ammo.is_some_and(AmmoType::cooks_off) {
            fire.age /= 2;
            fire.age -= 600;
            destroyed = true;
            smoke += 6;
            consumed += 1;
        } else if item.made_of(Material::Paper) {
            destroyed = item.burn(d * 3);
            consumed += 1;
            if d == 1 {
                fire.age -= vol * 10;
            }
            if vol >= 4 {
                smoke += 1;
            }
        } else if item.made_of(Material::Wood) || item.made_of(Material::Veggy) {
            if vol <= d * 10 || d == 3 {
                fire.age -= 4;
                destroyed = item.burn(d);
                smoke += 1;
                consumed += 1;
            } else if item.burnt < d {
                destroyed = item.burn(1);
                smoke += 1;
            }
        } else if item.made_of(Material::Cotton) || item.made_of(Material::Wool) {
            if vol <= d * 5 || d == 3 {
                fire.age -= 1;
                destroyed = item.burn(d);
                smoke += 1;
                consumed += 1;
            } else if item.burnt < d {
                destroyed = item.burn(1);
                smoke += 1;
            }
        } else if item.made_of(Material::Flesh) {
            if vol <= d * 5 || (d == 3 && rng.one_in(vol / 20)) {
                fire.age -= 1;
                destroyed = item.burn(d);
                smoke += 3;
                consumed += 1;
            } else if item.burnt < d * 5 || d >= 2 {
                destroyed = item.burn(1);
                smoke += 1;
            }
        } else if item.made_of(Material::Liquid) {
            if item.spirits {
                fire.age -= 300;
                smoke += 6;
            } else {
                fire.age += rng.roll(80 * vol, 300 * vol);
                smoke += 1;
            }
            destroyed = true;
            consumed += 1;
        } else if item.made_of(Material::Powder) {
            fire.age -= vol;
            destroyed = true;
            smoke += 2;
        } else if item.made_of(Material::Plastic) {
            smoke += 3;
            if item.burnt <= d * 2 || (d == 3 && rng.one_in(vol)) {
                destroyed = item.burn(d);
                if rng.one_in(vol + item.burnt) {
                    fire.age -= 1;
                }
            }
        }

        if destroyed {
            let mut ash: Item = stack.remove(i);
            stack.append(&mut ash.contents);
        }
    }
    smoke
}

/// Feeds on the tile itself. Returns the smoke produced.
fn consume_terrain<R: Rng + ?Sized>(s: &mut Sweep<'_, '_, R>, p: Point, fire: &mut FieldCell) -> i32 {
    let ground = s.host.terrain.terrain(p);
    let d = fire.density;
    if ground.has_flag(TerrainFlags::EXPLODES) {
        if let Some(wreck) = ground.info().explodes_into {
            s.host.terrain.set_terrain(p, wreck);
        }
        fire.age = 0;
        fire.density = 3;
        s.explode(p, 40, true);
        0
    } else if ground.has_flag(TerrainFlags::FLAMMABLE) && s.rng.one_in(32 - d * 10) {
        fire.age -= d * d * 40;
        if d == 3 {
            s.host.terrain.set_terrain(p, TerrainId::Rubble);
        }
        15
    } else if ground.has_flag(TerrainFlags::L_FLAMMABLE) && s.rng.one_in(62 - d * 10) {
        fire.age -= d * d * 30;
        if d == 3 {
            s.host.terrain.set_terrain(p, TerrainId::Rubble);
        }
        10
    } else {
        if ground.has_flag(TerrainFlags::SWIMMABLE) {
            fire.age += 800;
        }
        0
    }
}

/// Offsets of the 3x3 block, rotated by a random start on each axis.
fn shuffled_block<R: Rng + ?Sized>(rng: &mut R) -> impl Iterator<Item = Point> {
    let start_i = rng.roll(0, 2);
    let start_j = rng.roll(0, 2);
    (0..3).flat_map(move |i| {
        (0..3).map(move |j| Point::new((i + start_i) % 3 - 1, (j + start_j) % 3 - 1))
    })
}

/// Passes surplus fuel to the first weaker fire found next door.
fn merge<R: Rng + ?Sized>(s: &mut Sweep<'_, '_, R>, p: Point, fire: &mut FieldCell, in_pit: bool) {
    for offset in shuffled_block(s.rng).collect::<Vec<_>>() {
        if fire.age >= 0 {
            break;
        }
        let q = p + offset;
        let other = s.layer.field_at(q);
        if other.is(FieldType::Fire)
            && other.density < 3
            && (!in_pit || s.host.terrain.terrain(q) == TerrainId::Pit)
        {
            if let Some(cell) = s.layer.field_at_mut(q) {
                cell.density += 1;
                cell.age = 0;
            }
            fire.age = 0;
        }
    }
}

fn spread<R: Rng + ?Sized>(
    s: &mut Sweep<'_, '_, R>,
    p: Point,
    fire: FieldCell,
    mut smoke: i32,
    in_pit: bool,
) {
    let d = fire.density;
    let neighborhood = s.config.neighborhood;
    for offset in shuffled_block(s.rng).collect::<Vec<_>>() {
        let q = p + offset;
        if offset == Point::default() || !s.inbounds(q) || !neighborhood.contains(offset) {
            continue;
        }
        let target = s.layer.field_at(q);
        let ground = s.host.terrain.terrain(q);
        let mut chance = 20 * (d - 1) + 10 * smoke;
        if target.is(FieldType::Web) {
            chance = 50 + chance / 2;
        }

        if ground.has_flag(TerrainFlags::EXPLODES) && s.rng.one_in(8 - d) {
            if let Some(wreck) = ground.info().explodes_into {
                s.host.terrain.set_terrain(q, wreck);
            }
            s.explode(q, 40, true);
        } else if s.rng.roll(1, 100) < chance
            && (!in_pit || ground == TerrainId::Pit)
            && catches(s, q, d, ground, target)
        {
            if target.is(FieldType::Smoke) || target.is(FieldType::Web) {
                s.replace_field(q, FieldType::Fire, 1, 0);
            } else {
                s.add_field(q, FieldType::Fire, 1, 0);
            }
        } else {
            let mut no_smoke = true;
            for r in p.block() {
                let near = s.layer.field_at(r);
                if near.is(FieldType::Fire) && near.density == 3 {
                    smoke += 1;
                } else if near.is(FieldType::Smoke) {
                    no_smoke = false;
                }
            }
            if s.passable(q)
                && (!s.rng.one_in(smoke) || (no_smoke && s.rng.one_in(40)))
                && s.rng.roll(3, 35) < d * 10
                && fire.age < 1000
            {
                smoke -= 1;
                let density = s.rng.roll(1, d);
                s.add_field(q, FieldType::Smoke, density, 0);
            }
        }
    }
}

/// Whether `q` has something to burn.
fn catches<R: Rng + ?Sized>(
    s: &mut Sweep<'_, '_, R>,
    q: Point,
    d: i32,
    ground: TerrainId,
    target: FieldCell,
) -> bool {
    (d == 3 && (ground.has_flag(TerrainFlags::FLAMMABLE) || s.rng.one_in(20)))
        || (d == 3 && ground.has_flag(TerrainFlags::L_FLAMMABLE) && s.rng.one_in(10))
        || s.host.items.items(q).iter().any(Item::is_fuel)
        || target.is(FieldType::Web)
}
