//! Charge moving between electric fields and toward ground.
//!
//! Impassable terrain counts as grounded. An electric cell first tries to
//! pull charge from stronger ungrounded neighbours; only when nothing was
//! absorbed does it spark or discharge. Charge is never created here.

use super::Sweep;
use crate::rng::Roll;
use miasma_data::{FieldType, Point};
use rand::Rng;
use serde::Serialize;

/// What an electric cell did during one pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ElectricOutcome {
    /// Skipped this turn.
    Flicker,
    /// Pulled charge from one or more neighbours.
    Absorbed,
    /// Pushed a unit of charge into open air.
    Sparked,
    /// Pushed a unit of charge toward ground.
    Discharged,
    /// Ran out of charge and vanished.
    Extinguished,
    Idle,
}

/// Neighbours on one side of the grounding divide, bucketed by charge.
#[derive(Default)]
struct Buckets {
    empty: Vec<Point>,
    lesser: Vec<Point>,
    same: Vec<Point>,
    greater: Vec<Point>,
    /// Neighbours holding exactly two more units than this cell.
    overcharged: Vec<Point>,
}

impl Buckets {
    fn electrified(&self) -> bool {
        !(self.lesser.is_empty() && self.same.is_empty() && self.greater.is_empty())
    }

    /// Who to absorb from: overcharged neighbours before merely stronger ones.
    fn donors(&self) -> &[Point] {
        if self.overcharged.is_empty() {
            &self.greater
        } else {
            &self.overcharged
        }
    }
}

struct Survey {
    grounded: Buckets,
    ungrounded: Buckets,
}

fn survey<R: Rng + ?Sized>(s: &Sweep<'_, '_, R>, p: Point, density: i32) -> Survey {
    let mut out = Survey {
        grounded: Buckets::default(),
        ungrounded: Buckets::default(),
    };
    for n in p.neighbors() {
        if !s.inbounds(n) {
            continue;
        }
        let bucket = if s.passable(n) {
            &mut out.ungrounded
        } else {
            &mut out.grounded
        };
        let cell = s.layer.field_at(n);
        if cell.is(FieldType::Electricity) {
            if cell.density == density + 2 {
                bucket.overcharged.push(n);
            }
            match cell.density.cmp(&density) {
                std::cmp::Ordering::Less => bucket.lesser.push(n),
                std::cmp::Ordering::Equal => bucket.same.push(n),
                std::cmp::Ordering::Greater => bucket.greater.push(n),
            }
        } else if cell.is_null_like() {
            bucket.empty.push(n);
        }
    }
    out
}

/// Draws over `0..=len`, so a draw of `len` picks nothing.
fn pick_or_miss<R: Rng + ?Sized>(rng: &mut R, candidates: &[Point]) -> Option<Point> {
    let i = rng.roll(0, candidates.len() as i32);
    candidates.get(i as usize).copied()
}

/// Moves one unit of charge from `from` to `to`, creating a field at `to` if needed.
fn move_charge<R: Rng + ?Sized>(s: &mut Sweep<'_, '_, R>, from: Point, to: Point) {
    let target = s.layer.field_at(to);
    if target.is(FieldType::Electricity) {
        s.set_density(to, target.density + 1);
    } else if !s.add_field(to, FieldType::Electricity, 1, 0) {
        return;
    }
    let source = s.layer.field_at(from).density;
    s.set_density(from, source - 1);
}

pub(super) fn arc<R: Rng + ?Sized>(s: &mut Sweep<'_, '_, R>, p: Point) -> ElectricOutcome {
    let flicker = s.config.electricity_flicker_chance;
    if flicker > 0 && s.rng.one_in(flicker) {
        return ElectricOutcome::Flicker;
    }
    let grounded = !s.passable(p);

    let mut absorbed = false;
    loop {
        let density = s.layer.field_at(p).density;
        if density >= 3 {
            break;
        }
        let donors = survey(s, p, density).ungrounded.donors().to_vec();
        if donors.is_empty() {
            break;
        }
        match pick_or_miss(s.rng, &donors) {
            Some(donor) => {
                move_charge(s, donor, p);
                absorbed = true;
            }
            None => break,
        }
    }
    if absorbed {
        return ElectricOutcome::Absorbed;
    }

    let density = s.layer.field_at(p).density;
    let around = survey(s, p, density);
    if grounded {
        if density > 1 {
            let targets: Vec<Point> = around
                .ungrounded
                .lesser
                .iter()
                .chain(&around.ungrounded.empty)
                .copied()
                .collect();
            if let Some(t) = pick_or_miss(s.rng, &targets) {
                move_charge(s, p, t);
                s.host.events.sound(p, 2, "an electric crackle");
                return ElectricOutcome::Sparked;
            }
        } else if !around.grounded.electrified() && !around.ungrounded.electrified() {
            let targets: Vec<Point> = around
                .grounded
                .empty
                .iter()
                .chain(&around.grounded.lesser)
                .copied()
                .collect();
            if targets.is_empty() {
                s.remove_field(p);
                return ElectricOutcome::Extinguished;
            }
            if let Some(t) = pick_or_miss(s.rng, &targets) {
                move_charge(s, p, t);
                return ElectricOutcome::Discharged;
            }
        }
        return ElectricOutcome::Idle;
    }

    let targets: Vec<Point> = around
        .grounded
        .lesser
        .iter()
        .chain(&around.grounded.empty)
        .copied()
        .collect();
    if !targets.is_empty() {
        if let Some(t) = pick_or_miss(s.rng, &targets) {
            move_charge(s, p, t);
            return ElectricOutcome::Discharged;
        }
        return ElectricOutcome::Idle;
    }
    if density == 1 {
        s.remove_field(p);
        return ElectricOutcome::Extinguished;
    }
    ElectricOutcome::Idle
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::testing::World;
    use crate::host::TerrainMap;
    use miasma_data::TerrainId;

    fn charge(world: &World) -> i32 {
        world
            .layer
            .active()
            .filter(|(_, c)| c.is(FieldType::Electricity))
            .map(|(_, c)| c.density)
            .sum()
    }

    fn calm_world(fill: TerrainId) -> World {
        let mut world = World::new(fill);
        world.config.electricity_flicker_chance = 0;
        world
    }

    #[test]
    fn test_lone_spark_in_open_air_goes_out() {
        let mut world = calm_world(TerrainId::Floor);
        let p = Point::new(5, 5);
        world.seed(p, FieldType::Electricity, 1, 0);
        let outcome = world.with_sweep(1, |s| arc(s, p));
        assert_eq!(outcome, ElectricOutcome::Extinguished);
        assert!(world.layer.field_at(p).is_empty());
    }

    #[test]
    fn test_buried_charge_leaks_to_ground() {
        // every neighbour is grounded and empty, so the charge moves into one
        // of them unless the draw misses
        for seed in 0..20 {
            let mut world = calm_world(TerrainId::Rock);
            world.rng = crate::rng::stream(Some(seed));
            let p = Point::new(5, 5);
            world.seed(p, FieldType::Electricity, 1, 0);
            let outcome = world.with_sweep(1, |s| arc(s, p));
            assert!(matches!(
                outcome,
                ElectricOutcome::Discharged | ElectricOutcome::Idle
            ));
            assert_eq!(charge(&world), 1);
        }
    }

    #[test]
    fn test_flicker_skips_everything() {
        let mut world = World::new(TerrainId::Floor);
        world.config.electricity_flicker_chance = 1;
        let p = Point::new(5, 5);
        world.seed(p, FieldType::Electricity, 1, 0);
        let outcome = world.with_sweep(1, |s| arc(s, p));
        assert_eq!(outcome, ElectricOutcome::Flicker);
        assert_eq!(world.layer.field_at(p).density, 1);
    }

    #[test]
    fn test_absorbing_never_discharges_in_same_pass() {
        for seed in 0..50 {
            let mut world = calm_world(TerrainId::Floor);
            world.rng = crate::rng::stream(Some(seed));
            let p = Point::new(5, 5);
            world.terrain.set_terrain(p, TerrainId::Wall);
            world.seed(p, FieldType::Electricity, 1, 0);
            world.seed(Point::new(6, 5), FieldType::Electricity, 3, 0);
            let before = charge(&world);
            let outcome = world.with_sweep(1, |s| arc(s, p));
            assert_eq!(charge(&world), before);
            if outcome == ElectricOutcome::Absorbed {
                assert!(world.layer.field_at(p).density > 1);
            } else {
                assert_eq!(outcome, ElectricOutcome::Idle);
                assert_eq!(world.layer.field_at(p).density, 1);
            }
        }
    }

    #[test]
    fn test_charge_never_grows() {
        for seed in 0..30 {
            let mut world = calm_world(TerrainId::Floor);
            world.rng = crate::rng::stream(Some(seed));
            world.terrain.fill(Point::new(4, 0), Point::new(4, 11), TerrainId::Wall);
            world.seed(Point::new(3, 3), FieldType::Electricity, 3, 0);
            world.seed(Point::new(4, 3), FieldType::Electricity, 2, 0);
            world.seed(Point::new(5, 4), FieldType::Electricity, 1, 0);
            let mut last = charge(&world);
            for turn in 0..20 {
                let stats = world.advance(turn);
                let now = charge(&world);
                assert!(now <= last, "charge grew from {last} to {now}");
                last = now;
                assert!(stats.arcs.iter().all(|(_, o)| *o != ElectricOutcome::Flicker));
            }
        }
    }
}
