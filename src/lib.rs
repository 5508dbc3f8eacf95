//! RoadRage - a small driving demo
//!
//! The binary wires the engine crates together; this library exposes its
//! configuration and systems so they can be tested.

pub mod config;
pub mod systems;
