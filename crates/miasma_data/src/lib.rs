pub mod data;

pub use data::catalog::{Color, FieldTypeInfo};
pub use data::creature::{
    BodyPart, HpPart, MonsterEffect, MonsterFlags, PlayerTrait, Side, Species, Status,
    NETHER_SPECIES,
};
pub use data::field::{FieldCell, FieldType, MAX_DENSITY, MIN_DENSITY};
pub use data::geometry::{Point, MOORE, ORTHOGONAL};
pub use data::item::{AmmoType, Item, Material};
pub use data::terrain::{TerrainFlags, TerrainId, TerrainInfo};
