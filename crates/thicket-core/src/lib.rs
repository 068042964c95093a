//! Thicket Core - Side-Scroller Simulation Engine
//!
//! The movement-and-collision core of a 2D platformer: the player's
//! jump/knockback state machine and the enemy behaviors, driven one
//! fixed step at a time by a host that owns rendering, input devices
//! and physics integration.
//!
//! # Architecture
//!
//! The simulation uses an Entity Component System (ECS) architecture via `hecs`:
//! - **Entities**: the player and the enemies
//! - **Components**: pure data attached to entities (Body, Player, Brain)
//! - **Systems**: logic that queries and updates components each tick
//!
//! The host talks to the core through [`engine::Stage`]: spawn actors,
//! feed each tick an [`host::InputSnapshot`] and a [`host::WorldQuery`]
//! over its geometry, then drain the animation and lifecycle queues and
//! integrate velocities.
//!
//! # Example
//!
//! ```rust,no_run
//! use thicket_core::prelude::*;
//! use thicket_logic::geometry::Vec2;
//!
//! let mut stage = Stage::new();
//!
//! let player = stage.spawn_player(Vec2::new(0.0, 1.0), PlayerTuning::default());
//! stage.bind_player(player);
//! stage.finish_spawn(player);
//!
//! // Run simulation
//! loop {
//!     stage.tick(&EmptyWorld, &InputSnapshot::idle(), 1.0 / 60.0); // 60 FPS
//!     for _event in stage.drain_lifecycle() { /* respawn flows, scoring */ }
//!     for _cmd in stage.drain_anim() { /* animator parameters */ }
//! }
//! ```

pub mod components;
pub mod config;
pub mod engine;
pub mod events;
pub mod host;
pub mod schedule;
pub mod systems;

/// Commonly used types for convenient importing
pub mod prelude {
    pub use crate::components::*;
    pub use crate::config::{ChickenTuning, EnemyTuning, PlayerTuning, RinoTuning};
    pub use crate::engine::Stage;
    pub use crate::events::{AnimCommand, LifecycleEvent};
    pub use crate::host::{layers, EmptyWorld, InputSnapshot, WorldQuery};
}
