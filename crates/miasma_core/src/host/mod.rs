//! Collaborator seams: everything the field engine reads or mutates that it
//! does not own.
//!
//! The engine only ever sees these traits, bundled in [`Collaborators`]. The
//! concrete types in the submodules back the headless driver and the tests.

mod events;
mod items;
mod roster;
mod terrain;

pub use events::{Event, EventLog};
pub use items::ItemLayer;
pub use roster::{Monster, Player, Roster};
pub use terrain::TerrainLayer;

use miasma_data::{
    BodyPart, Item, Material, MonsterEffect, MonsterFlags, PlayerTrait, Point, Side, Species,
    Status, TerrainFlags, TerrainId,
};

/// Terrain, radiation and vehicles under the field layer.
pub trait TerrainMap {
    fn inbounds(&self, p: Point) -> bool;

    /// Terrain at `p`. Out-of-bounds tiles read as solid rock.
    fn terrain(&self, p: Point) -> TerrainId;

    fn set_terrain(&mut self, p: Point, id: TerrainId);

    fn has_flag(&self, p: Point, flag: TerrainFlags) -> bool {
        self.terrain(p).has_flag(flag)
    }

    /// Zero means impassable (and electrically grounded).
    fn move_cost(&self, p: Point) -> i32 {
        self.terrain(p).move_cost()
    }

    fn is_outside(&self, p: Point) -> bool;

    fn add_radiation(&mut self, p: Point, amount: i32);

    /// Damages a vehicle part on `p`, if any. Returns whether one was hit.
    fn damage_vehicle(&mut self, p: Point, amount: i32) -> bool;
}

/// Loose item stacks.
pub trait ItemMap {
    /// Items on `p`, bottom of the pile first.
    fn items(&self, p: Point) -> &[Item];

    /// The stack on `p`, or `None` out of bounds.
    fn stack_mut(&mut self, p: Point) -> Option<&mut Vec<Item>>;

    fn add_item(&mut self, p: Point, item: Item) {
        if let Some(stack) = self.stack_mut(p) {
            stack.push(item);
        }
    }
}

/// A humanoid body the exposure hook can harm: the player, or an NPC built
/// the same way.
pub trait PlayerBody {
    fn name(&self) -> &str;
    fn position(&self) -> Point;
    fn set_position(&mut self, p: Point);
    fn has_trait(&self, t: PlayerTrait) -> bool;
    /// A hit on one body part: `bash` is blunt damage, `cut` is burns/cuts.
    fn hit(&mut self, part: BodyPart, side: Side, bash: i32, cut: i32);
    /// Damage applied to every hit-point pool.
    fn hurt_all(&mut self, damage: i32);
    fn status_level(&self, status: Status) -> i32;
    fn add_status(&mut self, status: Status, duration: i32);
    /// Environmental protection covering `part`.
    fn resist(&self, part: BodyPart) -> i32;
    fn strength(&self) -> i32;
    fn add_radiation(&mut self, amount: i32);
    fn spend_moves(&mut self, amount: i32);
}

/// A monster body the exposure hook can harm.
pub trait MonsterBody {
    fn name(&self) -> &str;
    fn position(&self) -> Point;
    fn set_position(&mut self, p: Point);
    fn material(&self) -> Option<Material>;
    fn has_flag(&self, flag: MonsterFlags) -> bool;
    fn speed(&self) -> i32;
    fn set_speed(&mut self, speed: i32);
    fn spend_moves(&mut self, amount: i32);
    fn add_effect(&mut self, effect: MonsterEffect, duration: i32);
    fn armor_bash(&self) -> i32;
    /// Applies damage; returns `true` when it is lethal.
    fn hurt(&mut self, damage: i32) -> bool;

    fn made_of(&self, material: Material) -> bool {
        self.material() == Some(material)
    }

    /// Whether fire can set this body alight.
    fn ignitable(&self) -> bool {
        !matches!(
            self.material(),
            Some(Material::Liquid | Material::Stone | Material::Kevlar | Material::Steel)
        ) && !self.has_flag(MonsterFlags::FIREY)
    }
}

/// Who stands where.
pub trait Occupants {
    fn player_position(&self) -> Option<Point>;
    fn player(&mut self) -> Option<&mut dyn PlayerBody>;
    fn monster_at(&self, p: Point) -> Option<usize>;
    fn monster(&mut self, index: usize) -> Option<&mut dyn MonsterBody>;
    fn npc_at(&self, p: Point) -> Option<usize>;
    fn npc(&mut self, index: usize) -> Option<&mut dyn PlayerBody>;
    fn spawn_monster(&mut self, species: &'static Species, p: Point);
    /// Death signal for a monster the exposure hook killed.
    fn kill_monster(&mut self, index: usize);

    fn is_occupied(&self, p: Point) -> bool {
        self.player_position() == Some(p)
            || self.npc_at(p).is_some()
            || self.monster_at(p).is_some()
    }
}

/// Fire-and-forget observations: sounds, flavour text, blasts, scent.
pub trait EventSink {
    fn sound(&mut self, p: Point, radius: i32, description: &str);
    fn message(&mut self, text: &str);
    fn explosion(&mut self, p: Point, power: i32, fire: bool);
    fn clear_scent(&mut self, p: Point);
}

/// Everything a field transition may touch besides the field layer itself.
pub struct Collaborators<'a> {
    pub terrain: &'a mut dyn TerrainMap,
    pub items: &'a mut dyn ItemMap,
    pub occupants: &'a mut dyn Occupants,
    pub events: &'a mut dyn EventSink,
}
