//! Acid eating through the item pile, and stains washing out in water.

use super::Sweep;
use crate::rng::Roll;
use miasma_data::{Item, Material, Point, TerrainFlags};
use rand::Rng;

const SOFT: [Material; 8] = [
    Material::Liquid,
    Material::Veggy,
    Material::Flesh,
    Material::Powder,
    Material::Cotton,
    Material::Wool,
    Material::Paper,
    Material::Plastic,
];

fn age_by<R: Rng + ?Sized>(s: &mut Sweep<'_, '_, R>, p: Point, amount: i32) {
    if let Some(cell) = s.layer.field_at_mut(p) {
        cell.age += amount;
    }
}

/// Blood, bile and slime dissipate faster in water.
pub(super) fn soak_stain<R: Rng + ?Sized>(s: &mut Sweep<'_, '_, R>, p: Point) {
    if s.host.terrain.has_flag(p, TerrainFlags::SWIMMABLE) {
        age_by(s, p, 250);
    }
}

pub(super) fn corrode<R: Rng + ?Sized>(s: &mut Sweep<'_, '_, R>, p: Point) {
    if s.host.terrain.has_flag(p, TerrainFlags::SWIMMABLE) {
        age_by(s, p, 20);
    }

    let Some(stack) = s.host.items.stack_mut(p) else {
        return;
    };
    let rng = &mut *s.rng;
    let mut spent = 0;
    let mut i = stack.len();
    while i > 0 {
        i -= 1;
        let item = &mut stack[i];
        let soft = SOFT.iter().any(|m| item.made_of(*m));
        if !(soft || (item.made_of(Material::Glass) && !rng.one_in(3)) || rng.one_in(4)) {
            continue;
        }
        item.damage += 1;
        if item.damage >= 5 || (item.made_of(Material::Paper) && item.damage >= 3) {
            spent += item.volume;
            let mut sludge: Item = stack.remove(i);
            stack.append(&mut sludge.contents);
        }
    }
    if spent > 0 {
        age_by(s, p, spent);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::testing::World;
    use crate::host::ItemMap;
    use miasma_data::{FieldType, TerrainId};

    #[test]
    fn test_paper_dissolves_and_spills() {
        let mut world = World::new(TerrainId::Floor);
        let p = Point::new(3, 3);
        world.seed(p, FieldType::Acid, 2, 0);
        let key = Item::new("key", Material::Iron, 0);
        world
            .items
            .add_item(p, Item::new("envelope", Material::Paper, 2).with_contents(vec![key]));

        for _ in 0..3 {
            world.with_sweep(1, |s| corrode(s, p));
        }
        let left = world.items.items(p);
        assert_eq!(left.len(), 1);
        assert_eq!(left[0].name, "key");
        assert_eq!(world.layer.field_at(p).age, 2);
    }

    #[test]
    fn test_soft_items_always_corrode() {
        let mut world = World::new(TerrainId::Floor);
        let p = Point::new(3, 3);
        world.seed(p, FieldType::Acid, 1, 0);
        world.items.add_item(p, Item::new("rag", Material::Cotton, 1));
        world.with_sweep(1, |s| corrode(s, p));
        assert_eq!(world.items.items(p)[0].damage, 1);
    }

    #[test]
    fn test_water_speeds_up_dilution() {
        let mut world = World::new(TerrainId::WaterShallow);
        let p = Point::new(3, 3);
        world.seed(p, FieldType::Acid, 1, 0);
        world.seed(Point::new(4, 4), FieldType::Blood, 1, 0);
        world.with_sweep(1, |s| {
            corrode(s, p);
            soak_stain(s, Point::new(4, 4));
        });
        assert_eq!(world.layer.field_at(p).age, 20);
        assert_eq!(world.layer.field_at(Point::new(4, 4)).age, 250);
    }
}
