use miasma_core::host::{ItemMap, Monster, Player};
use miasma_core::{AppConfig, FieldLayer};
use miasma_data::{FieldCell, FieldType, Item, Point, TerrainId, MAX_DENSITY, MIN_DENSITY};
use miasma_lib::Simulation;

type Layout = Box<dyn FnOnce(&mut Simulation)>;

#[allow(dead_code)]
pub struct BubbleBuilder {
    config: AppConfig,
    layout: Vec<Layout>,
}

#[allow(dead_code)]
impl BubbleBuilder {
    /// A single-submap bubble with a fixed seed.
    pub fn new() -> Self {
        let mut config = AppConfig::default();
        config.world.submaps_x = 1;
        config.world.submaps_y = 1;
        config.world.seed = Some(42);
        config.world.deterministic = true;
        Self {
            config,
            layout: Vec::new(),
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.config.world.seed = Some(seed);
        self
    }

    pub fn with_config<F>(mut self, modifier: F) -> Self
    where
        F: FnOnce(&mut AppConfig),
    {
        modifier(&mut self.config);
        self
    }

    pub fn with_ground(mut self, id: TerrainId) -> Self {
        self.layout.push(Box::new(move |sim| {
            let corner = Point::new(sim.layer.width() - 1, sim.layer.height() - 1);
            sim.terrain.fill(Point::new(0, 0), corner, id);
        }));
        self
    }

    pub fn with_terrain(mut self, from: Point, to: Point, id: TerrainId) -> Self {
        self.layout
            .push(Box::new(move |sim| sim.terrain.fill(from, to, id)));
        self
    }

    /// A field that takes part in the very first turn.
    pub fn with_field(mut self, p: Point, kind: FieldType, density: i32, age: i32) -> Self {
        self.layout.push(Box::new(move |sim| {
            sim.layer.restore(p, FieldCell::mature(kind, density, age));
        }));
        self
    }

    pub fn with_item(mut self, p: Point, item: Item) -> Self {
        self.layout.push(Box::new(move |sim| sim.items.add_item(p, item)));
        self
    }

    pub fn with_player(mut self, player: Player) -> Self {
        self.layout
            .push(Box::new(move |sim| sim.roster.player = Some(player)));
        self
    }

    pub fn with_monster(mut self, monster: Monster) -> Self {
        self.layout
            .push(Box::new(move |sim| sim.roster.add_monster(monster)));
        self
    }

    pub fn build(self) -> Simulation {
        let mut sim = Simulation::new(&self.config).expect("Failed to create bubble in test builder");
        for step in self.layout {
            step(&mut sim);
        }
        sim
    }
}

/// Every active cell has an in-range density and every submap's live count
/// matches a recount.
#[allow(dead_code)]
pub fn layer_is_sound(layer: &FieldLayer) -> bool {
    layer.counts_consistent()
        && layer
            .active()
            .all(|(_, c)| (MIN_DENSITY..=MAX_DENSITY).contains(&c.density))
}

#[allow(dead_code)]
pub fn count_of(layer: &FieldLayer, kind: FieldType) -> usize {
    layer.active().filter(|(_, c)| c.is(kind)).count()
}

#[allow(dead_code)]
pub fn total_density(layer: &FieldLayer, kind: FieldType) -> i32 {
    layer
        .active()
        .filter(|(_, c)| c.is(kind))
        .map(|(_, c)| c.density)
        .sum()
}

/// Items named `name` anywhere in the bubble, nested ones included.
#[allow(dead_code)]
pub fn items_named(sim: &Simulation, name: &str) -> usize {
    fn count(items: &[Item], name: &str) -> usize {
        items
            .iter()
            .map(|i| usize::from(i.name == name) + count(&i.contents, name))
            .sum()
    }
    let mut total = 0;
    for x in 0..sim.layer.width() {
        for y in 0..sim.layer.height() {
            total += count(sim.items.items(Point::new(x, y)), name);
        }
    }
    total
}

