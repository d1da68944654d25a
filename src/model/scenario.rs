//! Named starting layouts for the headless driver.
//!
//! Every layout fits inside the first submap so it runs on any bubble size.

use crate::model::simulation::Simulation;
use miasma_core::host::{ItemMap, Monster, Player, TerrainMap};
use miasma_data::{AmmoType, FieldType, Item, Material, MonsterFlags, Point, TerrainId};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scenario {
    /// A furnished wooden house with a small fire in one corner.
    HouseFire,
    /// A toxic vent, smoke and tear gas mixing in an open yard.
    Gas,
    /// A shock vent throwing bolts next to a metal wall.
    Electric,
    /// Hidden emitters, a push field with rocks, a bystander and a reality tear.
    Vents,
}

impl Scenario {
    pub const ALL: [Scenario; 4] = [
        Scenario::HouseFire,
        Scenario::Gas,
        Scenario::Electric,
        Scenario::Vents,
    ];

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Scenario::HouseFire => "house_fire",
            Scenario::Gas => "gas",
            Scenario::Electric => "electric",
            Scenario::Vents => "vents",
        }
    }

    /// Lays the scenario out on top of whatever the simulation holds.
    pub fn build(self, sim: &mut Simulation) {
        match self {
            Scenario::HouseFire => house_fire(sim),
            Scenario::Gas => gas(sim),
            Scenario::Electric => electric(sim),
            Scenario::Vents => vents(sim),
        }
        tracing::debug!(
            scenario = self.name(),
            fields = sim.layer.live_count(),
            monsters = sim.roster.monsters.len(),
            "Scenario built"
        );
    }
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Scenario {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|scenario| scenario.name() == s)
            .ok_or_else(|| {
                let known: Vec<&str> = Self::ALL.iter().map(|s| s.name()).collect();
                anyhow::anyhow!("Unknown scenario '{}' (known: {})", s, known.join(", "))
            })
    }
}

fn house_fire(sim: &mut Simulation) {
    let t = &mut sim.terrain;
    t.fill(Point::new(0, 0), Point::new(11, 11), TerrainId::Grass);
    t.fill(Point::new(1, 1), Point::new(9, 9), TerrainId::WallWood);
    t.fill(Point::new(2, 2), Point::new(8, 8), TerrainId::Floor);
    t.set_terrain(Point::new(9, 5), TerrainId::DoorClosed);
    t.set_terrain(Point::new(3, 7), TerrainId::Bed);
    t.set_terrain(Point::new(6, 3), TerrainId::Table);

    let items = &mut sim.items;
    items.add_item(Point::new(3, 3), Item::new("newspaper", Material::Paper, 4));
    items.add_item(Point::new(3, 4), Item::new("2x4", Material::Wood, 8));
    items.add_item(Point::new(4, 3), Item::new("blanket", Material::Cotton, 6));
    items.add_item(
        Point::new(7, 7),
        Item::new("backpack", Material::Cotton, 4).with_contents(vec![
            Item::new("box of 9mm", Material::Cotton, 1).with_ammo(AmmoType::Pistol),
            Item::new("silver coin", Material::Silver, 0),
        ]),
    );
    items.add_item(
        Point::new(6, 6),
        Item::new("bottle of whiskey", Material::Glass, 2).as_spirits(),
    );

    sim.layer.add_field(Point::new(3, 3), FieldType::Fire, 1, 0);
    sim.roster.player = Some(Player::new(Point::new(11, 5)));
    sim.roster
        .add_monster(Monster::new("zombie", Some(Material::Flesh), 80, 70, Point::new(5, 5)));
}

fn gas(sim: &mut Simulation) {
    sim.terrain
        .fill(Point::new(0, 0), Point::new(11, 11), TerrainId::Dirt);
    sim.terrain
        .fill(Point::new(5, 0), Point::new(5, 3), TerrainId::Wall);

    sim.layer.add_field(Point::new(2, 2), FieldType::GasVent, 3, 0);
    sim.layer.add_field(Point::new(8, 8), FieldType::Smoke, 3, 0);
    sim.layer.add_field(Point::new(8, 2), FieldType::TearGas, 3, 0);
    sim.layer.add_field(Point::new(2, 9), FieldType::NukeGas, 2, 0);

    sim.roster.player = Some(Player::new(Point::new(6, 6)));
    sim.roster
        .add_monster(Monster::new("zombie", Some(Material::Flesh), 80, 70, Point::new(9, 9)));
    sim.roster
        .add_monster(Monster::new("triffid", Some(Material::Veggy), 80, 75, Point::new(3, 5)));
}

fn electric(sim: &mut Simulation) {
    sim.terrain
        .fill(Point::new(0, 0), Point::new(11, 11), TerrainId::Pavement);
    sim.terrain
        .fill(Point::new(6, 1), Point::new(6, 10), TerrainId::WallMetal);

    sim.layer.add_field(Point::new(3, 6), FieldType::ShockVent, 1, 0);
    sim.layer.add_field(Point::new(5, 3), FieldType::Electricity, 3, 0);
    sim.layer.add_field(Point::new(6, 4), FieldType::Electricity, 3, 0);

    sim.roster.player = Some(Player::new(Point::new(9, 6)));
    sim.roster.add_monster(Monster::new(
        "manhack",
        Some(Material::Steel),
        15,
        130,
        Point::new(2, 2),
    )
    .with_flags(MonsterFlags::FLIES));
}

fn vents(sim: &mut Simulation) {
    sim.terrain
        .fill(Point::new(0, 0), Point::new(11, 11), TerrainId::Floor);

    sim.layer.add_field(Point::new(2, 2), FieldType::FireVent, 1, 0);
    sim.layer.add_field(Point::new(9, 9), FieldType::AcidVent, 1, 0);
    sim.layer.add_field(Point::new(2, 9), FieldType::Fatigue, 3, 0);
    for x in 5..=7 {
        sim.layer.add_field(Point::new(x, 5), FieldType::PushItems, 3, 0);
    }
    for _ in 0..4 {
        sim.items
            .add_item(Point::new(6, 5), Item::new("rock", Material::Stone, 1).as_throwable());
    }
    sim.layer.add_field(Point::new(4, 8), FieldType::Web, 3, 0);
    sim.layer.add_field(Point::new(8, 2), FieldType::Sap, 2, 0);

    sim.roster.player = Some(Player::new(Point::new(6, 6)));
    sim.roster.add_npc(Player::npc("Doc", Point::new(5, 5)));
    sim.roster
        .add_monster(Monster::new("rat", Some(Material::Flesh), 6, 100, Point::new(7, 5)));
}
