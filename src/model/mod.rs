pub mod render;
pub mod scenario;
pub mod simulation;

pub use scenario::Scenario;
pub use simulation::{RunSummary, Simulation};
