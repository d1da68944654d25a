//! Push-item fields fling loose rocks around, hitting whoever stands in the way.

use super::Sweep;
use crate::rng::Roll;
use miasma_data::{BodyPart, FieldType, Item, Point, Side};
use rand::Rng;

/// Blunt damage of a thrown rock.
const IMPACT: i32 = 6;

pub(super) fn shove<R: Rng + ?Sized>(s: &mut Sweep<'_, '_, R>, p: Point) {
    let mut landing = vec![p];
    landing.extend(
        p.neighbors()
            .filter(|q| s.layer.field_at(*q).is(FieldType::PushItems)),
    );

    let mut i = s.host.items.items(p).len();
    while i > 0 {
        i -= 1;
        let ready = s
            .host
            .items
            .items(p)
            .get(i)
            .is_some_and(|item| item.throwable && s.turn - 1 > item.birthday);
        if !ready {
            continue;
        }
        let Some(stack) = s.host.items.stack_mut(p) else {
            return;
        };
        let rock = stack.remove(i);
        let Some(&dest) = s.rng.pick(&landing) else {
            return;
        };
        strike(s, dest, &rock);
        s.host.items.add_item(dest, rock);
    }
}

fn strike<R: Rng + ?Sized>(s: &mut Sweep<'_, '_, R>, at: Point, rock: &Item) {
    if s.host.occupants.player_position() == Some(at) {
        s.host.events.message(&format!("A {} hits you!", rock.name));
        let part = s.rng.pick(&BodyPart::ALL).copied().unwrap_or(BodyPart::Torso);
        let side = Side::from_index(s.rng.roll(0, 1));
        if let Some(u) = s.host.occupants.player() {
            u.hit(part, side, IMPACT, 0);
        }
    } else if let Some(index) = s.host.occupants.npc_at(at) {
        let part = s.rng.pick(&BodyPart::ALL).copied().unwrap_or(BodyPart::Torso);
        let side = Side::from_index(s.rng.roll(0, 1));
        let Some(npc) = s.host.occupants.npc(index) else {
            return;
        };
        npc.hit(part, side, IMPACT, 0);
        let name = npc.name().to_string();
        s.host.events.message(&format!("A {} hits {name}!", rock.name));
    } else if let Some(index) = s.host.occupants.monster_at(at) {
        let Some(monster) = s.host.occupants.monster(index) else {
            return;
        };
        let name = monster.name().to_string();
        let damage = (IMPACT - monster.armor_bash()).max(0);
        let lethal = monster.hurt(damage);
        s.host.events.message(&format!("A {} hits the {name}!", rock.name));
        if lethal {
            s.host.occupants.kill_monster(index);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::testing::World;
    use crate::host::{ItemMap, Monster, Player, Roster};
    use miasma_data::{Material, TerrainId};

    fn rock(birthday: i64) -> Item {
        let mut rock = Item::new("rock", Material::Stone, 1).as_throwable();
        rock.birthday = birthday;
        rock
    }

    #[test]
    fn test_fresh_and_heavy_items_stay() {
        let mut world = World::new(TerrainId::Floor);
        let p = Point::new(5, 5);
        world.seed(p, FieldType::PushItems, 3, 0);
        world.seed(Point::new(6, 5), FieldType::PushItems, 3, 0);
        world.items.add_item(p, Item::new("anvil", Material::Iron, 10));
        world.items.add_item(p, rock(9));
        world.with_sweep(10, |s| shove(s, p));
        assert_eq!(world.items.items(p).len(), 2);
    }

    #[test]
    fn test_rocks_only_land_on_pushers() {
        let mut world = World::new(TerrainId::Floor);
        let p = Point::new(5, 5);
        let q = Point::new(6, 5);
        world.seed(p, FieldType::PushItems, 3, 0);
        world.seed(q, FieldType::PushItems, 3, 0);
        for _ in 0..6 {
            world.items.add_item(p, rock(0));
        }
        world.with_sweep(10, |s| shove(s, p));
        let moved = world.items.items(q).len();
        assert_eq!(world.items.items(p).len() + moved, 6);
        assert_eq!(world.items.total_items(), 6);
    }

    #[test]
    fn test_rock_hits_player_standing_in_the_way() {
        let mut world = World::new(TerrainId::Floor);
        let p = Point::new(5, 5);
        world.roster = Roster::new(Some(Player::new(p)));
        world.seed(p, FieldType::PushItems, 3, 0);
        world.items.add_item(p, rock(0));
        let before = world.roster.player.as_ref().unwrap().total_hp();
        world.with_sweep(10, |s| shove(s, p));

        let after = world.roster.player.as_ref().unwrap().total_hp();
        assert_eq!(before - after, IMPACT);
        assert_eq!(world.events.messages().collect::<Vec<_>>(), vec!["A rock hits you!"]);
    }

    #[test]
    fn test_rock_hits_npc_on_the_landing_tile() {
        let mut world = World::new(TerrainId::Floor);
        let p = Point::new(5, 5);
        world.roster.add_npc(Player::npc("Doc", p));
        world
            .roster
            .add_monster(Monster::new("rat", Some(Material::Flesh), 30, 100, Point::new(7, 7)));
        world.seed(p, FieldType::PushItems, 3, 0);
        world.items.add_item(p, rock(0));
        let before = world.roster.npcs[0].total_hp();
        world.with_sweep(10, |s| shove(s, p));

        assert_eq!(before - world.roster.npcs[0].total_hp(), IMPACT);
        assert_eq!(world.roster.monsters[0].hp, 30);
        assert_eq!(world.events.messages().collect::<Vec<_>>(), vec!["A rock hits Doc!"]);
        assert_eq!(world.items.items(p).len(), 1);
    }

    #[test]
    fn test_rock_can_kill_a_frail_monster() {
        let mut world = World::new(TerrainId::Floor);
        let p = Point::new(5, 5);
        world
            .roster
            .add_monster(Monster::new("rat", Some(Material::Flesh), 3, 100, p));
        world.seed(p, FieldType::PushItems, 3, 0);
        world.items.add_item(p, rock(0));
        world.with_sweep(10, |s| shove(s, p));
        assert!(world.roster.monsters.is_empty());
        assert_eq!(world.roster.graveyard.len(), 1);
    }
}
