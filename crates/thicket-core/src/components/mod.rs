//! Component definitions for the ECS simulation.
//!
//! Components are pure data structs attached to entities.
//! They have no behavior - that lives in systems.

mod common;
mod enemy;
mod player;

pub use common::*;
pub use enemy::*;
pub use player::*;
