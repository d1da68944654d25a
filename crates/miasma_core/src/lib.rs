//! # Miasma Core
//!
//! The environmental field simulation: fire, smoke and gases, acid, electricity,
//! webs and the odder hazards that live on top of a roguelike tile map.
//!
//! This crate contains:
//! - Submap grids of field cells with exact live counts
//! - The once-per-turn update engine and its per-type transitions
//! - Exposure hooks applying a field's effect to the player or a monster
//! - Roof detection and rain dousing
//! - Collaborator traits for terrain, items, occupants and events
//! - Sweep statistics and structured logging
//!
//! ## Example
//!
//! ```
//! use miasma_core::host::{Collaborators, EventLog, ItemLayer, Roster, TerrainLayer};
//! use miasma_core::{stream, FieldEngine, FieldLayer};
//! use miasma_data::{FieldType, Point, TerrainId};
//!
//! let mut layer = FieldLayer::new(1, 1);
//! let mut terrain = TerrainLayer::new(12, 12, TerrainId::Floor);
//! let mut items = ItemLayer::new(12, 12);
//! let mut roster = Roster::new(None);
//! let mut events = EventLog::new();
//! layer.add_field(Point::new(4, 4), FieldType::Smoke, 2, 0);
//!
//! let engine = FieldEngine::default();
//! let mut rng = stream(Some(42));
//! let mut host = Collaborators {
//!     terrain: &mut terrain,
//!     items: &mut items,
//!     occupants: &mut roster,
//!     events: &mut events,
//! };
//! let stats = engine.advance_one_turn(&mut layer, &mut host, 1, &mut rng);
//! assert_eq!(stats.newborn_skipped, 1);
//! ```

/// Configuration management for simulation parameters
pub mod config;
/// Roof detection by flood fill
pub mod enclosure;
/// The per-turn update pass and field transitions
pub mod engine;
/// Field effects on the player and monsters
pub mod exposure;
/// Fixed-size submap grid of field cells
pub mod grid;
/// Collaborator traits and their in-memory implementations
pub mod host;
/// The reality bubble: a rectangle of submap grids
pub mod layer;
/// Sweep statistics and structured logging
pub mod metrics;
/// Dice helpers and the seeded random stream
pub mod rng;
/// Rain on open fires
pub mod weather;

pub use config::{AppConfig, EngineConfig, Neighborhood, RunConfig, WorldConfig};
pub use enclosure::will_flood_stop;
pub use engine::{ElectricOutcome, FieldEngine};
pub use exposure::{apply_to_monster, apply_to_player, MonsterExposure};
pub use grid::{FieldGrid, SUBMAP_SIZE};
pub use host::{
    Collaborators, EventSink, ItemMap, MonsterBody, Occupants, PlayerBody, TerrainMap,
};
pub use layer::FieldLayer;
pub use metrics::{init_logging, Metrics, SweepStats};
pub use rng::{stream, Roll};
pub use weather::{douse_fires, Wetness, RAIN_RADIUS};
