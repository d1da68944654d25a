use bitflags::bitflags;
use serde::{Deserialize, Serialize};

bitflags! {
    /// Physical properties of a terrain kind.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    pub struct TerrainFlags: u16 {
        const TRANSPARENT   = 1 << 0;
        const BASHABLE      = 1 << 1;
        /// Burns readily.
        const FLAMMABLE     = 1 << 2;
        /// Burns slowly (floors).
        const L_FLAMMABLE   = 1 << 3;
        const EXPLODES      = 1 << 4;
        const DIGGABLE      = 1 << 5;
        const LIQUID        = 1 << 6;
        const SWIMMABLE     = 1 << 7;
        const NOITEM        = 1 << 8;
        const SUPPORTS_ROOF = 1 << 9;
    }
}

/// Terrain kinds known to the simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TerrainId {
    /// Default open ground.
    #[default]
    Dirt,
    Grass,
    Rubble,
    Pit,
    Floor,
    /// Hive floor; roofed like ordinary floor.
    FloorWax,
    Pavement,
    WallWood,
    Wall,
    WallMetal,
    Rock,
    WallPaper,
    Tree,
    TreeYoung,
    Underbrush,
    Shrub,
    Log,
    WaterShallow,
    WaterDeep,
    Sewage,
    Lava,
    Bed,
    Table,
    DoorClosed,
    GasPump,
    GasPumpSmashed,
    Missile,
    MissileExploded,
}

/// Static properties of one terrain kind.
#[derive(Debug, Clone, Copy)]
pub struct TerrainInfo {
    pub name: &'static str,
    pub glyph: char,
    /// Zero means impassable.
    pub move_cost: i32,
    pub flags: TerrainFlags,
    /// What an exploding terrain turns into.
    pub explodes_into: Option<TerrainId>,
}

const T: TerrainFlags = TerrainFlags::TRANSPARENT;
const B: TerrainFlags = TerrainFlags::BASHABLE;
const F: TerrainFlags = TerrainFlags::FLAMMABLE;
const LF: TerrainFlags = TerrainFlags::L_FLAMMABLE;
const X: TerrainFlags = TerrainFlags::EXPLODES;
const D: TerrainFlags = TerrainFlags::DIGGABLE;
const LQ: TerrainFlags = TerrainFlags::LIQUID;
const SW: TerrainFlags = TerrainFlags::SWIMMABLE;
const NI: TerrainFlags = TerrainFlags::NOITEM;
const R: TerrainFlags = TerrainFlags::SUPPORTS_ROOF;

const fn ter(name: &'static str, glyph: char, move_cost: i32, flags: TerrainFlags) -> TerrainInfo {
    TerrainInfo {
        name,
        glyph,
        move_cost,
        flags,
        explodes_into: None,
    }
}

impl TerrainId {
    #[must_use]
    pub fn info(self) -> TerrainInfo {
        use TerrainId::*;
        match self {
            Dirt => ter("dirt", '.', 2, T.union(D)),
            Grass => ter("grass", '.', 2, T.union(D)),
            Rubble => ter("rubble", '^', 4, T.union(D)),
            Pit => ter("pit", '0', 10, T.union(D)),
            Floor => ter("floor", '.', 2, T.union(LF)),
            FloorWax => ter("wax floor", '.', 2, T.union(LF)),
            Pavement => ter("pavement", '.', 2, T),
            WallWood => ter("wooden wall", '#', 0, B.union(F).union(NI).union(R)),
            Wall => ter("wall", '|', 0, F.union(NI).union(R)),
            WallMetal => ter("metal wall", '#', 0, NI.union(R)),
            Rock => ter("solid rock", '#', 0, NI.union(R)),
            WallPaper => ter("paper wall", '#', 0, B.union(F).union(NI)),
            Tree => ter("tree", '7', 0, F.union(NI).union(R)),
            TreeYoung => ter("young tree", '1', 0, T.union(B).union(F).union(NI)),
            Underbrush => ter("underbrush", '#', 6, T.union(B).union(D)),
            Shrub => ter("shrub", '#', 0, T.union(B).union(F)),
            Log => ter("log", '1', 4, T.union(F).union(D)),
            WaterShallow => ter("shallow water", '~', 5, T.union(LQ).union(SW)),
            WaterDeep => ter("deep water", '~', 0, T.union(LQ).union(SW)),
            Sewage => ter("sewage", '~', 6, T.union(SW)),
            Lava => ter("lava", '~', 4, T.union(LQ)),
            Bed => ter("bed", '#', 5, T.union(F)),
            Table => ter("table", '#', 4, T.union(F)),
            DoorClosed => ter("closed wood door", '+', 0, B.union(F).union(NI).union(R)),
            GasPump => TerrainInfo {
                explodes_into: Some(GasPumpSmashed),
                ..ter("gasoline pump", '&', 0, T.union(X).union(NI))
            },
            GasPumpSmashed => ter("smashed gas pump", '&', 0, T.union(NI)),
            Missile => TerrainInfo {
                explodes_into: Some(MissileExploded),
                ..ter("missile", '#', 0, X.union(NI))
            },
            MissileExploded => ter("blown-out missile", '#', 0, NI),
        }
    }

    #[must_use]
    pub fn has_flag(self, flag: TerrainFlags) -> bool {
        self.info().flags.contains(flag)
    }

    #[must_use]
    pub fn move_cost(self) -> i32 {
        self.info().move_cost
    }

    /// Map glyph used by the ASCII renderer and scenario files.
    #[must_use]
    pub fn from_glyph(glyph: char) -> Option<Self> {
        use TerrainId::*;
        Some(match glyph {
            '.' => Floor,
            ',' => Dirt,
            '"' => Grass,
            '#' => WallWood,
            '|' => Wall,
            'M' => WallMetal,
            '0' => Pit,
            '~' => WaterShallow,
            'W' => WaterDeep,
            '7' => Tree,
            'T' => Table,
            'B' => Bed,
            'P' => GasPump,
            'w' => FloorWax,
            '=' => Pavement,
            '^' => Rubble,
            _ => return None,
        })
    }
}
