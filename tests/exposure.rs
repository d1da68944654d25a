mod common;

use common::{layer_is_sound, BubbleBuilder};
use miasma_core::host::{Monster, Player};
use miasma_data::{FieldType, Material, PlayerTrait, Point, Status, TerrainId};
use miasma_lib::Scenario;

const SPOT: Point = Point::new(6, 6);

fn total_hp(sim: &miasma_lib::Simulation) -> i32 {
    sim.roster.player.as_ref().map_or(0, Player::total_hp)
}

#[test]
fn test_deep_acid_burns_legs_and_feet() {
    for seed in 0..10 {
        let mut sim = BubbleBuilder::new()
            .with_seed(seed)
            .with_ground(TerrainId::Floor)
            .with_field(SPOT, FieldType::Acid, 3, 0)
            .with_player(Player::new(SPOT))
            .build();
        let before = total_hp(&sim);
        sim.step();
        let lost = before - total_hp(&sim);
        assert!((12..=36).contains(&lost), "lost {lost} hp (seed {seed})");
        assert!(sim
            .events
            .messages()
            .any(|m| m == "The acid burns your legs and feet!"));
    }
}

#[test]
fn test_deep_acid_damage_is_fixed_by_the_seed() {
    let mut sim = BubbleBuilder::new()
        .with_seed(1)
        .with_ground(TerrainId::Floor)
        .with_field(SPOT, FieldType::Acid, 3, 0)
        .with_player(Player::new(SPOT))
        .build();
    let before = total_hp(&sim);
    sim.step();
    assert_eq!(before - total_hp(&sim), 24);
}

#[test]
fn test_web_walker_is_not_caught() {
    let mut caught = BubbleBuilder::new()
        .with_ground(TerrainId::Floor)
        .with_field(SPOT, FieldType::Web, 2, 0)
        .with_player(Player::new(SPOT))
        .build();
    caught.step();
    let player = caught.roster.player.as_ref().unwrap();
    assert!(player.statuses.get(&Status::Webbed).copied().unwrap_or(0) > 0);
    assert!(caught.layer.field_at(SPOT).is_empty());

    let mut walker = BubbleBuilder::new()
        .with_ground(TerrainId::Floor)
        .with_field(SPOT, FieldType::Web, 2, 0)
        .with_player(Player::new(SPOT).with_trait(PlayerTrait::WebWalker))
        .build();
    walker.step();
    let player = walker.roster.player.as_ref().unwrap();
    assert!(!player.statuses.contains_key(&Status::Webbed));
    assert!(walker.layer.field_at(SPOT).is(FieldType::Web));
}

#[test]
fn test_toxic_gas_kills_a_weak_monster() {
    let mut sim = BubbleBuilder::new()
        .with_ground(TerrainId::Floor)
        .with_field(SPOT, FieldType::ToxicGas, 3, -1000)
        .with_monster(Monster::new("rat", Some(Material::Flesh), 2, 100, SPOT))
        .build();
    sim.step();
    assert!(sim.roster.monsters.is_empty());
    assert_eq!(sim.roster.graveyard.len(), 1);
    assert!(layer_is_sound(&sim.layer));
}

#[test]
fn test_every_scenario_runs_soundly() {
    for scenario in Scenario::ALL {
        let mut config = miasma_core::AppConfig::default();
        config.world.seed = Some(2024);
        config.world.deterministic = true;
        config.run.scenario = scenario.name().to_string();
        let mut sim = miasma_lib::Simulation::from_config(&config).unwrap();
        let summary = sim.run_with(150, |sim| {
            assert!(layer_is_sound(&sim.layer), "{scenario} broke the layer");
            if let Some(player) = &sim.roster.player {
                assert!(sim.layer.inbounds(player.pos));
            }
            for monster in &sim.roster.monsters {
                assert!(sim.layer.inbounds(monster.pos));
            }
        });
        assert_eq!(summary.turns, 150);
        assert_eq!(summary.monsters_alive, sim.roster.monsters.len());
        assert_eq!(summary.monsters_dead, sim.roster.graveyard.len());
    }
}
