//! Application systems
//!
//! The per-frame work of the game, kept out of main.rs so it can be tested
//! headless.

mod render;
mod simulation;

pub use render::{camera_from_level, RenderSystem};
pub use simulation::{avatar_status, SimulationResult, SimulationSystem};
