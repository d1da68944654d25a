//! # Miasma
//!
//! Headless driver for the field simulation: builds a reality bubble from a
//! named scenario, steps it turn by turn and reports what the fields did.

pub mod model;

pub use model::{RunSummary, Scenario, Simulation};
