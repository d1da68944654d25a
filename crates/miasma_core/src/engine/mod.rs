//! The once-per-turn field update.
//!
//! [`FieldEngine::advance_one_turn`] walks every tile of the bubble in raster
//! order, runs the transition for the field found there, then ages it. Cells
//! created during the pass are left alone until the next one.

mod acid;
mod electricity;
mod fatigue;
mod fire;
mod gas;
mod push;
mod vents;

pub use electricity::ElectricOutcome;

use crate::config::EngineConfig;
use crate::host::Collaborators;
use crate::layer::FieldLayer;
use crate::metrics::SweepStats;
use crate::rng::Roll;
use miasma_data::data::catalog;
use miasma_data::{FieldCell, FieldType, Point, MAX_DENSITY};
use rand::Rng;
use tracing::{trace, warn};

/// Runs field transitions for a whole bubble.
#[derive(Debug, Clone, Default)]
pub struct FieldEngine {
    config: EngineConfig,
}

impl FieldEngine {
    #[must_use]
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// One full pass: transitions and decay for every field that existed when
    /// the pass began.
    pub fn advance_one_turn<R: Rng + ?Sized>(
        &self,
        layer: &mut FieldLayer,
        host: &mut Collaborators<'_>,
        turn: i64,
        rng: &mut R,
    ) -> SweepStats {
        let mut sweep = Sweep {
            layer,
            host,
            rng,
            config: &self.config,
            turn,
            stats: SweepStats::default(),
        };

        let live: Vec<(i32, i32, usize)> = sweep.layer.submap_order().collect();
        for (sx, sy, count) in live {
            if count == 0 {
                continue;
            }
            trace!(sx, sy, count, "Sweeping submap");
            sweep.sweep_submap(sx, sy);
        }

        sweep.layer.mature_newborns();
        let mut stats = sweep.stats;
        for (_, cell) in sweep.layer.active() {
            if let Some(key) = cell.field_type().key() {
                *stats.active.entry(key).or_insert(0) += 1;
            }
        }
        stats
    }
}

/// State shared by every transition during one pass.
pub(crate) struct Sweep<'s, 'h, R: ?Sized> {
    pub layer: &'s mut FieldLayer,
    pub host: &'s mut Collaborators<'h>,
    pub rng: &'s mut R,
    pub config: &'s EngineConfig,
    pub turn: i64,
    pub stats: SweepStats,
}

impl<R: Rng + ?Sized> Sweep<'_, '_, R> {
    fn sweep_submap(&mut self, sx: i32, sy: i32) {
        let size = crate::grid::SUBMAP_SIZE;
        for lx in 0..size {
            for ly in 0..size {
                self.process(Point::new(sx * size + lx, sy * size + ly));
            }
        }
    }

    fn process(&mut self, p: Point) {
        let Some(cell) = self.layer.field_at_mut(p) else {
            return;
        };
        if cell.is_empty() {
            return;
        }
        if let Some(bad) = cell.repair_density() {
            warn!(x = p.x, y = p.y, density = bad, kind = ?cell.field_type(), "Density out of range, clamped");
            self.stats.repaired += 1;
        }
        if cell.is_newborn() {
            self.stats.newborn_skipped += 1;
            return;
        }
        let kind = cell.field_type();

        self.stats.visited += 1;
        self.transition(p, kind);

        let after = self.layer.field_at(p);
        if !after.is_empty() {
            self.decay(p, after);
        }
    }

    fn transition(&mut self, p: Point, kind: FieldType) {
        match kind {
            FieldType::Null | FieldType::Web | FieldType::Sap => {}
            FieldType::Blood | FieldType::Bile | FieldType::Slime => acid::soak_stain(self, p),
            FieldType::Acid => acid::corrode(self, p),
            FieldType::Fire => fire::burn(self, p),
            FieldType::Smoke | FieldType::TearGas | FieldType::ToxicGas | FieldType::NukeGas => {
                gas::spread(self, p, kind)
            }
            FieldType::GasVent => vents::gas_vent(self, p),
            FieldType::FireVent => vents::fire_vent(self, p),
            FieldType::FlameBurst => vents::flame_burst(self, p),
            FieldType::ShockVent => vents::shock_vent(self, p),
            FieldType::AcidVent => vents::acid_vent(self, p),
            FieldType::Electricity => {
                let outcome = electricity::arc(self, p);
                self.stats.arcs.push((p, outcome));
            }
            FieldType::Fatigue => fatigue::tear(self, p),
            FieldType::PushItems => push::shove(self, p),
        }
    }

    /// Ages a surviving cell and lets its half-life eat a density step.
    fn decay(&mut self, p: Point, cell: FieldCell) {
        let half_life = catalog::info(cell.field_type()).half_life;
        let mut age = cell.age + 1;
        let mut density = cell.density;
        if half_life > 0 && age > 0 && self.rng.dice(3, age) > self.rng.dice(3, half_life) {
            age = 0;
            density -= 1;
        }
        if density <= 0 {
            self.remove_field(p);
            return;
        }
        if let Some(slot) = self.layer.field_at_mut(p) {
            slot.age = age;
            slot.density = density;
            slot.ticks_alive = slot.ticks_alive.saturating_add(1);
        }
    }

    /// Places a field, warning the player standing on it when it is dangerous.
    pub fn add_field(&mut self, p: Point, kind: FieldType, density: i32, age: i32) -> bool {
        if !self.layer.add_field(p, kind, density, age) {
            return false;
        }
        self.stats.created += 1;
        let placed = self.layer.field_at(p);
        if self.host.occupants.player_position() == Some(p)
            && catalog::is_dangerous(kind, placed.density)
        {
            let name = catalog::display_name(kind, placed.density);
            self.host.events.message(&format!("You're in a {name}!"));
        }
        true
    }

    pub fn remove_field(&mut self, p: Point) {
        if self.layer.remove_field(p) != FieldType::Null {
            self.stats.removed += 1;
        }
    }

    /// Sets an existing field's density; zero or less clears it.
    pub fn set_density(&mut self, p: Point, density: i32) {
        if density <= 0 {
            self.remove_field(p);
        } else {
            self.layer.set_density(p, density.min(MAX_DENSITY));
        }
    }

    /// Swaps whatever is on `p` for a fresh field that waits for the next pass.
    pub fn replace_field(&mut self, p: Point, kind: FieldType, density: i32, age: i32) {
        self.remove_field(p);
        self.add_field(p, kind, density, age);
    }

    pub fn explode(&mut self, p: Point, power: i32, fire: bool) {
        self.stats.explosions += 1;
        self.host.events.explosion(p, power, fire);
    }

    pub fn passable(&self, p: Point) -> bool {
        self.host.terrain.move_cost(p) > 0
    }

    pub fn inbounds(&self, p: Point) -> bool {
        self.layer.inbounds(p)
    }
}


#[cfg(test)]
mod tests {
    use super::testing::World;
    use super::*;
    use crate::host::{Player, Roster};
    use miasma_data::TerrainId;

    #[test]
    fn test_newborn_cells_wait_a_pass() {
        let mut world = World::new(TerrainId::Floor);
        let p = Point::new(4, 4);
        world.layer.add_field(p, FieldType::Web, 2, 0);
        let stats = world.advance(1);
        assert_eq!(stats.visited, 0);
        assert_eq!(stats.newborn_skipped, 1);
        assert_eq!(world.layer.field_at(p).age, 0);

        let stats = world.advance(2);
        assert_eq!(stats.visited, 1);
        assert_eq!(world.layer.field_at(p).age, 1);
    }

    #[test]
    fn test_out_of_range_density_is_repaired() {
        let mut world = World::new(TerrainId::Floor);
        let p = Point::new(2, 2);
        world.layer.restore(p, FieldCell::mature(FieldType::Web, 7, 0));
        let stats = world.advance(1);
        assert_eq!(stats.repaired, 1);
        assert_eq!(world.layer.field_at(p).density, 3);
    }

    #[test]
    fn test_inert_web_only_ages() {
        let mut world = World::new(TerrainId::Floor);
        let p = Point::new(6, 6);
        world.seed(p, FieldType::Web, 2, 0);
        for turn in 0..10_000 {
            world.advance(turn);
        }
        let cell = world.layer.field_at(p);
        assert_eq!(cell.density, 2);
        assert_eq!(cell.age, 10_000);
        assert_eq!(world.layer.live_count(), 1);
    }

    #[test]
    fn test_blood_eventually_dries() {
        let mut world = World::new(TerrainId::Floor);
        let p = Point::new(6, 6);
        world.seed(p, FieldType::Blood, 1, 5000);
        for turn in 0..100 {
            world.advance(turn);
        }
        assert!(world.layer.field_at(p).is_empty());
        assert_eq!(world.layer.live_count(), 0);
    }

    #[test]
    fn test_dangerous_field_under_player_warns() {
        let mut world = World::new(TerrainId::Floor);
        let p = Point::new(3, 3);
        world.roster = Roster::new(Some(Player::new(p)));
        let placed = world.with_sweep(1, |s| s.add_field(p, FieldType::Fire, 2, 0));
        assert!(placed);
        let messages: Vec<&str> = world.events.messages().collect();
        assert_eq!(messages, vec!["You're in a fire!"]);
    }

    #[test]
    fn test_stats_count_active_by_key() {
        let mut world = World::new(TerrainId::Floor);
        world.seed(Point::new(1, 1), FieldType::Web, 1, 0);
        world.seed(Point::new(1, 2), FieldType::Sap, 1, 0);
        world.seed(Point::new(1, 3), FieldType::Web, 3, 0);
        let stats = world.advance(1);
        assert_eq!(stats.active.get("web"), Some(&2));
        assert_eq!(stats.total_active(), 3);
        assert!(world.layer.counts_consistent());
    }
}
