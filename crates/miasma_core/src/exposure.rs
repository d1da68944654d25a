//! What a field does to whoever is standing in it.
//!
//! These run outside the sweep, whenever the driver moves or ticks an
//! occupant. They may consume the field (webs, sap, vents).

use crate::host::{Collaborators, MonsterBody, PlayerBody};
use crate::layer::FieldLayer;
use crate::rng::Roll;
use miasma_data::{
    BodyPart, FieldType, Material, MonsterEffect, MonsterFlags, PlayerTrait, Point, Side, Status,
    TerrainFlags,
};
use rand::Rng;
use serde::Serialize;
use tracing::debug;

/// How far a teleport can throw someone along each axis.
pub const TELEPORT_RANGE: i32 = 12;

/// Result of a monster standing in a field. A `killed` monster still has to
/// be removed by the caller through [`crate::host::Occupants::kill_monster`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MonsterExposure {
    pub damage: i32,
    pub killed: bool,
}

/// `dice(strength, 3)` against the protection on `part`.
fn infect<R: Rng + ?Sized>(
    u: &mut dyn PlayerBody,
    rng: &mut R,
    status: Status,
    part: BodyPart,
    strength: i32,
    duration: i32,
) {
    if rng.dice(strength, 3) > rng.dice(u.resist(part), 3) {
        u.add_status(status, duration);
    }
}

fn burn_legs<R: Rng + ?Sized>(u: &mut dyn PlayerBody, rng: &mut R) {
    u.hit(BodyPart::Legs, Side::Left, 0, rng.roll(2, 6));
    u.hit(BodyPart::Legs, Side::Right, 0, rng.roll(2, 6));
    u.hit(BodyPart::Torso, Side::Left, 4, rng.roll(4, 9));
}

/// Applies the field under the player, if any.
pub fn apply_to_player<R: Rng + ?Sized>(
    layer: &mut FieldLayer,
    host: &mut Collaborators<'_>,
    rng: &mut R,
) {
    let Some(pos) = host.occupants.player_position() else {
        return;
    };
    let cell = layer.field_at(pos);
    if cell.is_empty() {
        return;
    }
    let d = cell.density;
    let events = &mut *host.events;
    let Some(u) = host.occupants.player() else {
        return;
    };

    let mut teleport = false;
    match cell.field_type() {
        FieldType::Null
        | FieldType::Blood
        | FieldType::Bile
        | FieldType::Slime
        | FieldType::GasVent
        | FieldType::FireVent
        | FieldType::PushItems => {}
        FieldType::Web => {
            if !u.has_trait(PlayerTrait::WebWalker) {
                let web = d * 5 - u.status_level(Status::Webbed);
                if web > 0 {
                    u.add_status(Status::Webbed, web);
                }
                layer.remove_field(pos);
            }
        }
        FieldType::Acid => {
            if d == 3 {
                events.message("The acid burns your legs and feet!");
                u.hit(BodyPart::Feet, Side::Left, 0, rng.roll(4, 10));
                u.hit(BodyPart::Feet, Side::Right, 0, rng.roll(4, 10));
                u.hit(BodyPart::Legs, Side::Left, 0, rng.roll(2, 8));
                u.hit(BodyPart::Legs, Side::Right, 0, rng.roll(2, 8));
            } else {
                events.message("The acid burns your feet!");
                u.hit(BodyPart::Feet, Side::Left, 0, rng.roll(d, 4 * d));
                u.hit(BodyPart::Feet, Side::Right, 0, rng.roll(d, 4 * d));
            }
        }
        FieldType::Sap => {
            events.message("The sap sticks to you!");
            u.add_status(Status::Sap, d * 2);
            layer.set_density(pos, d - 1);
        }
        FieldType::Fire => {
            if !u.has_trait(PlayerTrait::Heatsink) {
                match d {
                    1 => {
                        events.message("You burn your legs and feet!");
                        u.hit(BodyPart::Feet, Side::Left, 0, rng.roll(2, 6));
                        u.hit(BodyPart::Feet, Side::Right, 0, rng.roll(2, 6));
                        u.hit(BodyPart::Legs, Side::Left, 0, rng.roll(1, 4));
                        u.hit(BodyPart::Legs, Side::Right, 0, rng.roll(1, 4));
                    }
                    2 => {
                        events.message("You're burning up!");
                        burn_legs(u, rng);
                        infect(u, rng, Status::Smoke, BodyPart::Mouth, 5, 20);
                    }
                    _ => {
                        events.message("You're set ablaze!");
                        burn_legs(u, rng);
                        u.add_status(Status::OnFire, 5);
                        infect(u, rng, Status::Smoke, BodyPart::Mouth, 7, 30);
                    }
                }
            }
        }
        FieldType::Smoke => {
            if d == 3 {
                infect(u, rng, Status::Smoke, BodyPart::Mouth, 4, 15);
            }
        }
        FieldType::TearGas => {
            if d > 1 || !rng.one_in(3) {
                infect(u, rng, Status::TearGas, BodyPart::Mouth, 5, 20);
            }
            if d > 1 {
                infect(u, rng, Status::Blind, BodyPart::Eyes, d * 2, 10);
            }
        }
        FieldType::ToxicGas => match d {
            2 => infect(u, rng, Status::Poison, BodyPart::Mouth, 5, 30),
            3 => infect(u, rng, Status::BadPoison, BodyPart::Mouth, 5, 30),
            _ => {}
        },
        FieldType::NukeGas => {
            u.add_radiation(rng.roll(0, d * (d + 1)));
            if d == 3 {
                events.message("This radioactive gas burns!");
                u.hurt_all(rng.roll(1, 3));
            }
        }
        FieldType::FlameBurst => {
            if u.has_trait(PlayerTrait::Heatsink) {
                events.message("These flames do not burn you.");
            } else {
                events.message("You're torched by flames!");
                burn_legs(u, rng);
            }
        }
        FieldType::Electricity => {
            if u.has_trait(PlayerTrait::ElectricityResistant) {
                events.message("The electricity flows around you.");
            } else {
                events.message("You're electrocuted!");
                u.hurt_all(rng.roll(1, d));
                if rng.one_in(8 - d) && !rng.one_in(30 - u.strength()) {
                    events.message("You're paralyzed!");
                    u.spend_moves(rng.roll(d * 50, d * 150));
                }
            }
        }
        FieldType::Fatigue => {
            if rng.roll(0, 2) < d {
                events.message("You're violently teleported!");
                u.hurt_all(d);
                teleport = true;
            }
        }
        FieldType::ShockVent | FieldType::AcidVent => {
            layer.remove_field(pos);
        }
    }

    if teleport {
        teleport_player(host, rng);
    }
}

/// Picks a landing spot within [`TELEPORT_RANGE`], retrying up to `tries`
/// times until `fits` accepts one. The last pick stands even if it does not fit.
fn teleport_destination<R: Rng + ?Sized>(
    rng: &mut R,
    origin: Point,
    tries: usize,
    fits: impl Fn(Point) -> bool,
) -> Point {
    let jump = |rng: &mut R| {
        let dx = rng.roll(-TELEPORT_RANGE, TELEPORT_RANGE);
        let dy = rng.roll(-TELEPORT_RANGE, TELEPORT_RANGE);
        origin.offset(dx, dy)
    };
    let mut dest = jump(rng);
    for _ in 0..tries {
        if fits(dest) {
            break;
        }
        dest = jump(rng);
    }
    dest
}

fn teleport_player<R: Rng + ?Sized>(host: &mut Collaborators<'_>, rng: &mut R) {
    let Some(origin) = host.occupants.player_position() else {
        return;
    };
    let dest = {
        let terrain = &*host.terrain;
        let occupants = &*host.occupants;
        teleport_destination(rng, origin, 15, |q| {
            terrain.inbounds(q)
                && (terrain.move_cost(q) > 0 || terrain.has_flag(q, TerrainFlags::LIQUID))
                && !occupants.is_occupied(q)
        })
    };
    if !host.terrain.inbounds(dest) {
        debug!(x = dest.x, y = dest.y, "Teleport landed off the map, staying put");
        return;
    }
    let victim = host.occupants.monster_at(dest);
    if let Some(u) = host.occupants.player() {
        u.set_position(dest);
        if host.terrain.move_cost(dest) == 0 {
            let name = host.terrain.terrain(dest).info().name;
            host.events
                .message(&format!("You teleport into the middle of a {name}!"));
            u.hit(BodyPart::Torso, Side::Left, 0, 500);
            return;
        }
    }
    if let Some(index) = victim {
        let name = host
            .occupants
            .monster(index)
            .map(|m| m.name().to_string())
            .unwrap_or_default();
        host.events
            .message(&format!("You teleport into the middle of a {name}!"));
        host.occupants.kill_monster(index);
    }
}

/// Base damage of flames against a body, by what it is made of.
fn flame_damage(z: &dyn MonsterBody, kindling: i32, fireproof: i32) -> i32 {
    match z.material() {
        Some(Material::Flesh) => 3,
        Some(Material::Veggy) => 12,
        Some(
            Material::Paper
            | Material::Liquid
            | Material::Powder
            | Material::Wood
            | Material::Cotton
            | Material::Wool,
        ) => kindling,
        Some(Material::Stone | Material::Kevlar | Material::Steel) => fireproof,
        _ => 0,
    }
}

fn choke<R: Rng + ?Sized>(z: &mut dyn MonsterBody, rng: &mut R, d: i32) {
    if d == 3 {
        z.set_speed(z.speed() - rng.roll(10, 20));
    }
    if z.made_of(Material::Veggy) {
        z.set_speed(z.speed() - rng.roll(1, d * 12));
    }
}

/// Applies the field under monster `index`. Burrowers are immune.
pub fn apply_to_monster<R: Rng + ?Sized>(
    layer: &mut FieldLayer,
    host: &mut Collaborators<'_>,
    index: usize,
    rng: &mut R,
) -> MonsterExposure {
    let mut out = MonsterExposure::default();
    let terrain = &*host.terrain;
    let Some(z) = host.occupants.monster(index) else {
        return out;
    };
    if z.has_flag(MonsterFlags::DIGS) {
        return out;
    }
    let pos = z.position();
    let cell = layer.field_at(pos);
    let d = cell.density;
    let flies = z.has_flag(MonsterFlags::FLIES);
    let mut dam = 0;

    match cell.field_type() {
        FieldType::Web => {
            if !z.has_flag(MonsterFlags::WEBWALK) {
                z.set_speed(z.speed() * 4 / 5);
                layer.remove_field(pos);
            }
        }
        FieldType::Acid => {
            if !flies && !z.has_flag(MonsterFlags::ACIDPROOF) {
                dam = if d == 3 {
                    rng.roll(4, 10) + rng.roll(2, 8)
                } else {
                    rng.roll(d, d * 4)
                };
            }
        }
        FieldType::Sap => {
            z.set_speed(z.speed() - d * 5);
            layer.set_density(pos, d - 1);
        }
        FieldType::Fire => {
            dam = flame_damage(z, 20, -20);
            if flies {
                dam -= 15;
            }
            match d {
                1 => dam += rng.roll(2, 6),
                2 => {
                    dam += rng.roll(6, 12);
                    if !flies {
                        z.spend_moves(20);
                        if z.ignitable() {
                            z.add_effect(MonsterEffect::OnFire, rng.roll(3, 8));
                        }
                    }
                }
                _ => {
                    dam += rng.roll(10, 20);
                    if !flies || rng.one_in(3) {
                        z.spend_moves(40);
                        if z.ignitable() {
                            z.add_effect(MonsterEffect::OnFire, rng.roll(8, 12));
                        }
                    }
                }
            }
            choke(z, rng, d);
        }
        FieldType::Smoke => choke(z, rng, d),
        FieldType::TearGas => {
            if z.made_of(Material::Flesh) || z.made_of(Material::Veggy) {
                z.add_effect(MonsterEffect::Blind, d * 8);
                match d {
                    3 => {
                        z.add_effect(MonsterEffect::Stunned, rng.roll(10, 20));
                        dam = rng.roll(4, 10);
                    }
                    2 => {
                        z.add_effect(MonsterEffect::Stunned, rng.roll(5, 10));
                        dam = rng.roll(2, 5);
                    }
                    _ => z.add_effect(MonsterEffect::Stunned, rng.roll(1, 5)),
                }
                if z.made_of(Material::Veggy) {
                    z.set_speed(z.speed() - rng.roll(d * 5, d * 12));
                    dam += d * rng.roll(8, 14);
                }
            }
        }
        FieldType::ToxicGas => {
            dam = d;
            z.set_speed(z.speed() - d);
        }
        FieldType::NukeGas => {
            let (slow, hurt) = match d {
                3 => (rng.roll(60, 120), rng.roll(30, 50)),
                2 => (rng.roll(20, 50), rng.roll(10, 25)),
                _ => (rng.roll(0, 15), rng.roll(0, 12)),
            };
            z.set_speed(z.speed() - slow);
            dam = hurt;
            if z.made_of(Material::Veggy) {
                z.set_speed(z.speed() - rng.roll(d * 5, d * 12));
                dam *= d;
            }
        }
        FieldType::FlameBurst => {
            dam = flame_damage(z, 50, -25) + rng.roll(0, 8);
            z.spend_moves(20);
        }
        FieldType::Electricity => {
            dam = rng.roll(1, d);
            if rng.one_in(8 - d) {
                z.spend_moves(d * 150);
            }
        }
        FieldType::Fatigue => {
            if rng.roll(0, 2) < d {
                dam = d;
                let dest = teleport_destination(rng, pos, 10, |q| terrain.move_cost(q) > 0);
                if terrain.inbounds(dest) {
                    z.set_position(dest);
                } else {
                    debug!(name = z.name(), "Teleport landed off the map, staying put");
                }
            }
        }
        FieldType::Null
        | FieldType::Blood
        | FieldType::Bile
        | FieldType::Slime
        | FieldType::GasVent
        | FieldType::FireVent
        | FieldType::PushItems
        | FieldType::ShockVent
        | FieldType::AcidVent => {}
    }

    out.damage = dam.max(0);
    if dam > 0 {
        out.killed = z.hurt(dam);
    }
    out
}
