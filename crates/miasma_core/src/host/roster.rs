use super::{MonsterBody, Occupants, PlayerBody};
use miasma_data::{
    BodyPart, HpPart, Material, MonsterEffect, MonsterFlags, PlayerTrait, Point, Side, Species,
    Status,
};
use std::collections::{BTreeMap, HashMap, HashSet};

/// A player body with per-limb hit points and a status list.
#[derive(Debug, Clone)]
pub struct Player {
    pub name: String,
    pub pos: Point,
    pub hp: [i32; HpPart::COUNT],
    pub pain: i32,
    pub radiation: i32,
    pub moves: i32,
    pub strength: i32,
    pub traits: HashSet<PlayerTrait>,
    pub statuses: BTreeMap<Status, i32>,
    /// Environmental protection per body part.
    pub resistances: HashMap<BodyPart, i32>,
}

impl Player {
    #[must_use]
    pub fn new(pos: Point) -> Self {
        Self {
            name: "you".to_string(),
            pos,
            hp: [60, 80, 60, 60, 60, 60],
            pain: 0,
            radiation: 0,
            moves: 100,
            strength: 8,
            traits: HashSet::new(),
            statuses: BTreeMap::new(),
            resistances: HashMap::new(),
        }
    }

    /// A non-player character with the same body as the player.
    #[must_use]
    pub fn npc(name: &str, pos: Point) -> Self {
        Self {
            name: name.to_string(),
            ..Self::new(pos)
        }
    }

    #[must_use]
    pub fn with_trait(mut self, t: PlayerTrait) -> Self {
        self.traits.insert(t);
        self
    }

    #[must_use]
    pub fn total_hp(&self) -> i32 {
        self.hp.iter().sum()
    }

    #[must_use]
    pub fn hp_of(&self, part: HpPart) -> i32 {
        self.hp[part as usize]
    }

    #[must_use]
    pub fn is_dead(&self) -> bool {
        self.hp_of(HpPart::Head) <= 0 || self.hp_of(HpPart::Torso) <= 0
    }

    fn drain(&mut self, part: HpPart, damage: i32) {
        let pool = &mut self.hp[part as usize];
        *pool = (*pool - damage).max(0);
    }
}

impl PlayerBody for Player {
    fn name(&self) -> &str {
        &self.name
    }

    fn position(&self) -> Point {
        self.pos
    }

    fn set_position(&mut self, p: Point) {
        self.pos = p;
    }

    fn has_trait(&self, t: PlayerTrait) -> bool {
        self.traits.contains(&t)
    }

    fn hit(&mut self, part: BodyPart, side: Side, bash: i32, cut: i32) {
        let damage = bash + cut;
        if damage <= 0 {
            return;
        }
        self.pain += damage / 4;
        self.drain(HpPart::for_hit(part, side), damage);
    }

    fn hurt_all(&mut self, damage: i32) {
        for part in 0..HpPart::COUNT {
            self.hp[part] = (self.hp[part] - damage).max(0);
            self.pain += damage / 2;
        }
    }

    fn status_level(&self, status: Status) -> i32 {
        self.statuses.get(&status).copied().unwrap_or(0)
    }

    fn add_status(&mut self, status: Status, duration: i32) {
        if duration == 0 {
            return;
        }
        *self.statuses.entry(status).or_insert(0) += duration;
    }

    fn resist(&self, part: BodyPart) -> i32 {
        self.resistances.get(&part).copied().unwrap_or(0)
    }

    fn strength(&self) -> i32 {
        self.strength
    }

    fn add_radiation(&mut self, amount: i32) {
        self.radiation += amount;
    }

    fn spend_moves(&mut self, amount: i32) {
        self.moves -= amount;
    }
}

/// A monster instance.
#[derive(Debug, Clone)]
pub struct Monster {
    pub name: String,
    pub glyph: char,
    pub pos: Point,
    pub material: Option<Material>,
    pub flags: MonsterFlags,
    pub hp: i32,
    pub speed: i32,
    pub moves: i32,
    pub armor_bash: i32,
    pub effects: HashMap<MonsterEffect, i32>,
}

impl Monster {
    #[must_use]
    pub fn from_species(species: &Species, pos: Point) -> Self {
        Self {
            name: species.name.to_string(),
            glyph: species.glyph,
            pos,
            material: species.material,
            flags: species.flags,
            hp: species.hp,
            speed: species.speed,
            moves: 0,
            armor_bash: species.armor_bash,
            effects: HashMap::new(),
        }
    }

    /// A plain monster for scenarios and tests.
    #[must_use]
    pub fn new(name: &str, material: Option<Material>, hp: i32, speed: i32, pos: Point) -> Self {
        Self {
            name: name.to_string(),
            glyph: 'Z',
            pos,
            material,
            flags: MonsterFlags::empty(),
            hp,
            speed,
            moves: 0,
            armor_bash: 0,
            effects: HashMap::new(),
        }
    }

    #[must_use]
    pub fn with_flags(mut self, flags: MonsterFlags) -> Self {
        self.flags = flags;
        self
    }

    #[must_use]
    pub fn effect(&self, effect: MonsterEffect) -> i32 {
        self.effects.get(&effect).copied().unwrap_or(0)
    }
}

impl MonsterBody for Monster {
    fn name(&self) -> &str {
        &self.name
    }

    fn position(&self) -> Point {
        self.pos
    }

    fn set_position(&mut self, p: Point) {
        self.pos = p;
    }

    fn material(&self) -> Option<Material> {
        self.material
    }

    fn has_flag(&self, flag: MonsterFlags) -> bool {
        self.flags.contains(flag)
    }

    fn speed(&self) -> i32 {
        self.speed
    }

    fn set_speed(&mut self, speed: i32) {
        self.speed = speed;
    }

    fn spend_moves(&mut self, amount: i32) {
        self.moves -= amount;
    }

    fn add_effect(&mut self, effect: MonsterEffect, duration: i32) {
        *self.effects.entry(effect).or_insert(0) += duration;
    }

    fn armor_bash(&self) -> i32 {
        self.armor_bash
    }

    fn hurt(&mut self, damage: i32) -> bool {
        self.hp -= damage;
        self.hp < 1
    }
}

/// The player (if any), NPCs, living monsters and the dead.
#[derive(Debug, Clone, Default)]
pub struct Roster {
    pub player: Option<Player>,
    pub npcs: Vec<Player>,
    pub monsters: Vec<Monster>,
    pub graveyard: Vec<Monster>,
}

impl Roster {
    #[must_use]
    pub fn new(player: Option<Player>) -> Self {
        Self {
            player,
            ..Self::default()
        }
    }

    pub fn add_monster(&mut self, monster: Monster) {
        self.monsters.push(monster);
    }

    pub fn add_npc(&mut self, npc: Player) {
        self.npcs.push(npc);
    }
}

impl Occupants for Roster {
    fn player_position(&self) -> Option<Point> {
        self.player.as_ref().map(|p| p.pos)
    }

    fn player(&mut self) -> Option<&mut dyn PlayerBody> {
        self.player.as_mut().map(|p| p as &mut dyn PlayerBody)
    }

    fn monster_at(&self, p: Point) -> Option<usize> {
        self.monsters.iter().position(|m| m.pos == p)
    }

    fn monster(&mut self, index: usize) -> Option<&mut dyn MonsterBody> {
        self.monsters
            .get_mut(index)
            .map(|m| m as &mut dyn MonsterBody)
    }

    fn npc_at(&self, p: Point) -> Option<usize> {
        self.npcs.iter().position(|n| n.pos == p)
    }

    fn npc(&mut self, index: usize) -> Option<&mut dyn PlayerBody> {
        self.npcs.get_mut(index).map(|n| n as &mut dyn PlayerBody)
    }

    fn spawn_monster(&mut self, species: &'static Species, p: Point) {
        tracing::debug!(species = species.name, x = p.x, y = p.y, "Monster spawned");
        self.monsters.push(Monster::from_species(species, p));
    }

    fn kill_monster(&mut self, index: usize) {
        if index < self.monsters.len() {
            let dead = self.monsters.remove(index);
            tracing::debug!(name = %dead.name, x = dead.pos.x, y = dead.pos.y, "Monster died");
            self.graveyard.push(dead);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hits_drain_the_matching_pool() {
        let mut u = Player::new(Point::new(0, 0));
        let before = u.total_hp();
        u.hit(BodyPart::Feet, Side::Left, 0, 7);
        u.hit(BodyPart::Torso, Side::Left, 4, 5);
        assert_eq!(u.hp_of(HpPart::LegLeft), 53);
        assert_eq!(u.hp_of(HpPart::Torso), 71);
        assert_eq!(before - u.total_hp(), 16);
    }

    #[test]
    fn test_hurt_all_floors_at_zero() {
        let mut u = Player::new(Point::new(0, 0));
        u.hurt_all(100);
        assert_eq!(u.total_hp(), 0);
        assert!(u.is_dead());
    }

    #[test]
    fn test_statuses_stack_durations() {
        let mut u = Player::new(Point::new(0, 0));
        u.add_status(Status::Sap, 4);
        u.add_status(Status::Sap, 2);
        u.add_status(Status::Blind, 0);
        assert_eq!(u.status_level(Status::Sap), 6);
        assert_eq!(u.status_level(Status::Blind), 0);
    }

    #[test]
    fn test_kill_moves_monster_to_graveyard() {
        let mut roster = Roster::new(None);
        roster.add_monster(Monster::new("zombie", Some(Material::Flesh), 20, 70, Point::new(2, 2)));
        assert_eq!(roster.monster_at(Point::new(2, 2)), Some(0));
        roster.kill_monster(0);
        assert!(roster.monsters.is_empty());
        assert_eq!(roster.graveyard.len(), 1);
        assert!(!roster.is_occupied(Point::new(2, 2)));
    }

    #[test]
    fn test_npcs_occupy_their_tile() {
        let mut roster = Roster::new(None);
        roster.add_npc(Player::npc("Doc", Point::new(4, 1)));
        assert_eq!(roster.npc_at(Point::new(4, 1)), Some(0));
        assert!(roster.is_occupied(Point::new(4, 1)));
        let name = roster.npc(0).map(|n| n.name().to_string());
        assert_eq!(name.as_deref(), Some("Doc"));
        assert_eq!(roster.player_position(), None);
    }

    #[test]
    fn test_ignitable_excludes_fireproof_bodies() {
        let flesh = Monster::new("zombie", Some(Material::Flesh), 20, 70, Point::new(0, 0));
        let steel = Monster::new("robot", Some(Material::Steel), 20, 70, Point::new(0, 0));
        let eye = flesh.clone().with_flags(MonsterFlags::FIREY);
        assert!(flesh.ignitable());
        assert!(!steel.ignitable());
        assert!(!eye.ignitable());
    }
}
