//! Configuration for the field simulation.
//!
//! Maps onto `config.toml`:
//!
//! ```toml
//! [world]
//! submaps_x = 3
//! submaps_y = 3
//! seed = 42
//! deterministic = true
//!
//! [engine]
//! neighborhood = "moore"
//! electricity_flicker_chance = 5
//!
//! [run]
//! turns = 200
//! scenario = "house_fire"
//! ```

use miasma_data::{Point, MOORE, ORTHOGONAL};
use serde::{Deserialize, Serialize};

/// Size and seeding of the reality bubble.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct WorldConfig {
    pub submaps_x: i32,
    pub submaps_y: i32,
    pub seed: Option<u64>,
    pub deterministic: bool,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            submaps_x: 3,
            submaps_y: 3,
            seed: None,
            deterministic: false,
        }
    }
}

/// Which neighbours fire may spread into.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum Neighborhood {
    #[default]
    Moore,
    Orthogonal,
}

impl Neighborhood {
    #[must_use]
    pub fn offsets(self) -> &'static [Point] {
        match self {
            Neighborhood::Moore => &MOORE,
            Neighborhood::Orthogonal => &ORTHOGONAL,
        }
    }

    #[must_use]
    pub fn contains(self, offset: Point) -> bool {
        self.offsets().contains(&offset)
    }
}

/// Tunables of the update engine. Defaults are the classic values.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct EngineConfig {
    pub neighborhood: Neighborhood,
    /// One-in-N chance that an electric field idles for a turn. Zero disables flicker.
    pub electricity_flicker_chance: i32,
    /// Turns between chances for a reality tear to widen.
    pub fatigue_growth_period: i64,
    /// One-in-N chance per turn that a wide-open tear lets something through.
    pub fatigue_spawn_chance: i32,
    /// Turns between info-level sweep summaries.
    pub summary_interval: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            neighborhood: Neighborhood::Moore,
            electricity_flicker_chance: 5,
            fatigue_growth_period: 3600,
            fatigue_spawn_chance: 600,
            summary_interval: 100,
        }
    }
}

/// What the headless driver runs.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct RunConfig {
    pub turns: u64,
    pub scenario: String,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            turns: 200,
            scenario: "house_fire".to_string(),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct AppConfig {
    pub world: WorldConfig,
    pub engine: EngineConfig,
    pub run: RunConfig,
}

impl AppConfig {
    pub fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(
            (1..=32).contains(&self.world.submaps_x),
            "submaps_x must be between 1 and 32"
        );
        anyhow::ensure!(
            (1..=32).contains(&self.world.submaps_y),
            "submaps_y must be between 1 and 32"
        );
        anyhow::ensure!(
            !self.world.deterministic || self.world.seed.is_some(),
            "Deterministic runs need a seed"
        );
        anyhow::ensure!(
            self.engine.electricity_flicker_chance >= 0,
            "Electricity flicker chance must not be negative"
        );
        anyhow::ensure!(
            self.engine.fatigue_growth_period > 0,
            "Fatigue growth period must be positive"
        );
        anyhow::ensure!(
            self.engine.fatigue_spawn_chance >= 1,
            "Fatigue spawn chance must be at least 1"
        );
        anyhow::ensure!(
            self.engine.summary_interval > 0,
            "Summary interval must be positive"
        );
        anyhow::ensure!(
            self.run.turns <= 1_000_000,
            "Too many turns (max 1000000)"
        );
        Ok(())
    }

    pub fn from_toml(content: &str) -> anyhow::Result<Self> {
        let config = toml::from_str::<Self>(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Seed for the random stream. Non-deterministic runs draw from entropy
    /// even when a seed is configured.
    #[must_use]
    pub fn seed(&self) -> Option<u64> {
        if self.world.deterministic {
            self.world.seed
        } else {
            None
        }
    }
}
