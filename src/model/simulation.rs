//! A self-contained reality bubble: field layer, the collaborators the engine
//! works against, and the turn loop that ties them together.

use crate::model::render;
use crate::model::scenario::Scenario;
use anyhow::Result;
use miasma_core::host::{Collaborators, EventLog, ItemLayer, Occupants, Roster, TerrainLayer};
use miasma_core::{
    apply_to_monster, apply_to_player, douse_fires, stream, will_flood_stop, AppConfig,
    FieldEngine, FieldLayer, Metrics, SweepStats, Wetness, RAIN_RADIUS,
};
use miasma_data::{HpPart, Point, TerrainId};
use miasma_io::{LayerSnapshot, LoadReport};
use rand_chacha::ChaCha8Rng;
use serde::Serialize;
use std::collections::BTreeMap;
use std::time::Instant;

/// End-of-run numbers printed by the driver.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunSummary {
    pub turns: i64,
    pub active: BTreeMap<&'static str, usize>,
    pub created: usize,
    pub removed: usize,
    pub explosions: usize,
    pub repaired: usize,
    pub messages: Vec<String>,
    pub player_hp: Option<[i32; HpPart::COUNT]>,
    pub player_indoors: Option<bool>,
    pub monsters_alive: usize,
    pub monsters_dead: usize,
}

pub struct Simulation {
    pub layer: FieldLayer,
    pub terrain: TerrainLayer,
    pub items: ItemLayer,
    pub roster: Roster,
    pub events: EventLog,
    pub turn: i64,
    /// Rain falling on the bubble, if any.
    pub weather: Option<Wetness>,
    engine: FieldEngine,
    rng: ChaCha8Rng,
    metrics: Metrics,
}

impl Simulation {
    /// An empty bubble of bare dirt.
    pub fn new(config: &AppConfig) -> Result<Self> {
        config.validate()?;
        let layer = FieldLayer::new(config.world.submaps_x, config.world.submaps_y);
        let (width, height) = (layer.width(), layer.height());
        Ok(Self {
            layer,
            terrain: TerrainLayer::new(width, height, TerrainId::Dirt),
            items: ItemLayer::new(width, height),
            roster: Roster::new(None),
            events: EventLog::new(),
            turn: 0,
            weather: None,
            engine: FieldEngine::new(config.engine.clone()),
            rng: stream(config.seed()),
            metrics: Metrics::new(config.engine.summary_interval),
        })
    }

    /// A bubble laid out as the scenario named in `config.run.scenario`.
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let scenario: Scenario = config.run.scenario.parse()?;
        let mut sim = Self::new(config)?;
        scenario.build(&mut sim);
        Ok(sim)
    }

    #[must_use]
    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    /// One game turn: the field sweep, rain, then every occupant steps in
    /// whatever lies under them.
    pub fn step(&mut self) -> SweepStats {
        let started = Instant::now();
        self.turn += 1;

        let stats = {
            let mut host = Collaborators {
                terrain: &mut self.terrain,
                items: &mut self.items,
                occupants: &mut self.roster,
                events: &mut self.events,
            };
            self.engine
                .advance_one_turn(&mut self.layer, &mut host, self.turn, &mut self.rng)
        };

        if let Some(wetness) = self.weather {
            let centre = self
                .roster
                .player_position()
                .unwrap_or_else(|| Point::new(self.layer.width() / 2, self.layer.height() / 2));
            douse_fires(&mut self.layer, &self.terrain, centre, RAIN_RADIUS, wetness);
        }

        self.expose_occupants();
        self.metrics.record_sweep(&stats, started.elapsed());
        stats
    }

    fn expose_occupants(&mut self) {
        {
            let mut host = Collaborators {
                terrain: &mut self.terrain,
                items: &mut self.items,
                occupants: &mut self.roster,
                events: &mut self.events,
            };
            apply_to_player(&mut self.layer, &mut host, &mut self.rng);
        }

        let mut alive = self.roster.monsters.len();
        let mut host = Collaborators {
            terrain: &mut self.terrain,
            items: &mut self.items,
            occupants: &mut self.roster,
            events: &mut self.events,
        };
        let mut index = 0;
        while index < alive {
            let exposure = apply_to_monster(&mut self.layer, &mut host, index, &mut self.rng);
            if exposure.killed {
                host.occupants.kill_monster(index);
                alive -= 1;
            } else {
                index += 1;
            }
        }
    }

    /// Runs `turns` turns and sums up what happened.
    pub fn run(&mut self, turns: u64) -> RunSummary {
        self.run_with(turns, |_| {})
    }

    /// Like [`Simulation::run`], calling `after_turn` once each turn has resolved.
    pub fn run_with(&mut self, turns: u64, mut after_turn: impl FnMut(&Self)) -> RunSummary {
        let mut summary = RunSummary::default();
        for _ in 0..turns {
            let stats = self.step();
            after_turn(self);
            summary.created += stats.created;
            summary.removed += stats.removed;
            summary.explosions += stats.explosions;
            summary.repaired += stats.repaired;
            summary.active = stats.active;
        }
        summary.turns = self.turn;
        summary.messages = self.events.messages().map(str::to_string).collect();
        summary.player_hp = self.roster.player.as_ref().map(|u| u.hp);
        summary.player_indoors = self.roster.player_position().map(|p| self.is_enclosed(p));
        summary.monsters_alive = self.roster.monsters.len();
        summary.monsters_dead = self.roster.graveyard.len();
        tracing::info!(
            turns = summary.turns,
            active = summary.active.values().sum::<usize>(),
            explosions = summary.explosions,
            elapsed_ms = self.metrics.elapsed().as_millis() as u64,
            "Run finished"
        );
        summary
    }

    /// Whether `p` sits under a roof.
    #[must_use]
    pub fn is_enclosed(&self, p: Point) -> bool {
        will_flood_stop(&self.terrain, p, self.layer.width(), self.layer.height())
    }

    #[must_use]
    pub fn render(&self) -> String {
        render::ascii(&self.layer, &self.terrain, &self.roster)
    }

    #[must_use]
    pub fn snapshot(&self) -> LayerSnapshot {
        LayerSnapshot::capture(&self.layer)
    }

    /// Replaces the field layer with a saved one of the same size.
    pub fn load_fields(&mut self, snapshot: &LayerSnapshot) -> Result<LoadReport> {
        anyhow::ensure!(
            (snapshot.submaps_x, snapshot.submaps_y) == self.layer.submaps(),
            "Saved bubble is {}x{} submaps but this one is {}x{}",
            snapshot.submaps_x,
            snapshot.submaps_y,
            self.layer.submaps().0,
            self.layer.submaps().1
        );
        let (layer, report) = snapshot.restore()?;
        self.layer = layer;
        Ok(report)
    }
}
