//! Plain data shared by the simulation and persistence crates.

pub mod catalog;
pub mod creature;
pub mod field;
pub mod geometry;
pub mod item;
pub mod terrain;
