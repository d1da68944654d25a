use super::item::Material;
use bitflags::bitflags;
use serde::{Deserialize, Serialize};

/// Where a hit lands on a humanoid body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BodyPart {
    Eyes,
    Head,
    Mouth,
    Torso,
    Arms,
    Hands,
    Legs,
    Feet,
}

impl BodyPart {
    pub const ALL: [BodyPart; 8] = [
        BodyPart::Eyes,
        BodyPart::Head,
        BodyPart::Mouth,
        BodyPart::Torso,
        BodyPart::Arms,
        BodyPart::Hands,
        BodyPart::Legs,
        BodyPart::Feet,
    ];
}

/// Which side of a paired body part is hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    #[must_use]
    pub fn from_index(i: i32) -> Self {
        if i == 0 {
            Side::Left
        } else {
            Side::Right
        }
    }
}

/// Hit-point pools a player tracks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HpPart {
    Head,
    Torso,
    ArmLeft,
    ArmRight,
    LegLeft,
    LegRight,
}

impl HpPart {
    pub const COUNT: usize = 6;

    /// The pool a hit to `part` on `side` drains.
    #[must_use]
    pub fn for_hit(part: BodyPart, side: Side) -> Self {
        match (part, side) {
            (BodyPart::Eyes | BodyPart::Head | BodyPart::Mouth, _) => HpPart::Head,
            (BodyPart::Torso, _) => HpPart::Torso,
            (BodyPart::Arms | BodyPart::Hands, Side::Left) => HpPart::ArmLeft,
            (BodyPart::Arms | BodyPart::Hands, Side::Right) => HpPart::ArmRight,
            (BodyPart::Legs | BodyPart::Feet, Side::Left) => HpPart::LegLeft,
            (BodyPart::Legs | BodyPart::Feet, Side::Right) => HpPart::LegRight,
        }
    }
}

/// Lingering conditions a player can pick up from fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Status {
    Webbed,
    Sap,
    OnFire,
    Smoke,
    TearGas,
    Blind,
    Poison,
    BadPoison,
}

/// Player traits and implants that change how fields affect them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayerTrait {
    WebWalker,
    /// Active heat-sink implant: ignores fire and flame bursts.
    Heatsink,
    /// Carries something that grounds electricity away from the body.
    ElectricityResistant,
}

bitflags! {
    /// Monster traits the exposure hook reads.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    pub struct MonsterFlags: u8 {
        /// Burrows underground; immune to every field.
        const DIGS      = 1 << 0;
        const FLIES     = 1 << 1;
        const ACIDPROOF = 1 << 2;
        const WEBWALK   = 1 << 3;
        /// Made of fire; never ignites.
        const FIREY     = 1 << 4;
    }
}

/// Timed conditions on a monster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MonsterEffect {
    OnFire,
    Stunned,
    Blind,
}

/// Static description of a monster kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Species {
    pub name: &'static str,
    pub glyph: char,
    /// `None` for bodies with no meaningful material.
    pub material: Option<Material>,
    pub hp: i32,
    pub speed: i32,
    pub armor_bash: i32,
    pub flags: MonsterFlags,
}

const fn species(
    name: &'static str,
    glyph: char,
    material: Option<Material>,
    speed: i32,
    armor_bash: i32,
    hp: i32,
    flags: MonsterFlags,
) -> Species {
    Species {
        name,
        glyph,
        material,
        hp,
        speed,
        armor_bash,
        flags,
    }
}

/// Creatures that crawl out of a fully opened reality tear.
pub static NETHER_SPECIES: [Species; 8] = [
    species("flying polyp", 'H', Some(Material::Flesh), 280, 8, 350, MonsterFlags::FLIES),
    species("hunting horror", 'h', None, 180, 0, 80, MonsterFlags::FLIES),
    species("mi-go", 'H', Some(Material::Flesh), 120, 4, 110, MonsterFlags::empty()),
    species("yugg", 'H', Some(Material::Flesh), 80, 6, 320, MonsterFlags::DIGS),
    species("gelatinous blob", 'O', Some(Material::Liquid), 40, 10, 200, MonsterFlags::empty()),
    species(
        "flaming eye",
        'E',
        Some(Material::Flesh),
        90,
        3,
        300,
        MonsterFlags::FIREY.union(MonsterFlags::FLIES),
    ),
    species("kreck", 'h', Some(Material::Flesh), 105, 0, 35, MonsterFlags::empty()),
    species("blank body", 'h', Some(Material::Flesh), 80, 0, 100, MonsterFlags::empty()),
];
