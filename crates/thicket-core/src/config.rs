//! Actor tuning values.
//!
//! Every speed, force, window and probe distance the state machines use
//! is supplied here at spawn time; the systems themselves carry no magic
//! numbers. Defaults reproduce the reference level's feel. All structs
//! deserialize leniently so a scenario file can override a single field.

use serde::{Deserialize, Serialize};
use thicket_logic::geometry::Vec2;

/// Player movement tuning.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerTuning {
    pub move_speed: f32,
    pub jump_force: f32,
    pub double_jump_force: f32,
    /// Horizontal component is applied away from the wall.
    pub wall_jump_force: Vec2,
    /// Seconds horizontal control stays locked after a wall jump.
    pub wall_jump_duration: f32,
    /// Seconds a mid-air jump press stays banked for the next landing.
    pub buffer_jump_window: f32,
    /// Seconds after walking off a ledge during which a jump still counts
    /// as grounded.
    pub coyote_jump_window: f32,
    pub knockback_force: Vec2,
    pub knockback_duration: f32,
    /// Downward velocity multiplier per tick while wall sliding without
    /// holding down.
    pub wall_slide_factor: f32,
    pub ground_check: f32,
    pub wall_check: f32,
    /// Center of the stomp overlap circle, relative to the body.
    pub stomp_offset: Vec2,
    pub stomp_radius: f32,
    pub half_extents: Vec2,
}

impl Default for PlayerTuning {
    fn default() -> Self {
        Self {
            move_speed: 8.0,
            jump_force: 13.0,
            double_jump_force: 11.0,
            wall_jump_force: Vec2::new(10.0, 13.0),
            wall_jump_duration: 0.6,
            buffer_jump_window: 0.25,
            coyote_jump_window: 0.5,
            knockback_force: Vec2::new(6.0, 7.0),
            knockback_duration: 1.0,
            wall_slide_factor: 0.05,
            ground_check: 1.0,
            wall_check: 0.55,
            stomp_offset: Vec2::new(0.0, -0.8),
            stomp_radius: 0.7,
            half_extents: Vec2::new(0.35, 0.9),
        }
    }
}

/// Tuning shared by every enemy species.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemyTuning {
    pub move_speed: f32,
    /// Upward pop a corpse receives on death.
    pub death_impact: f32,
    /// Corpse spin in degrees per second; sign is chosen at random.
    pub death_spin_rate: f32,
    pub ground_check: f32,
    pub wall_check: f32,
    /// Local offset of the ledge sensor ahead of the body.
    pub ahead_anchor: Vec2,
    /// How far the enemy can see the player along its facing.
    pub sight_range: f32,
    pub half_extents: Vec2,
}

impl Default for EnemyTuning {
    fn default() -> Self {
        Self {
            move_speed: 2.0,
            death_impact: 5.0,
            death_spin_rate: 150.0,
            ground_check: 1.1,
            wall_check: 0.7,
            ahead_anchor: Vec2::new(0.6, 0.0),
            sight_range: 15.0,
            half_extents: Vec2::new(0.4, 0.4),
        }
    }
}

/// Chicken: patrol, chase while the aggro window is fresh.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct ChickenTuning {
    pub base: EnemyTuning,
    /// Seconds the chase persists after the player was last sighted.
    pub aggro_duration: f32,
    /// Delay between deciding to face the player and actually flipping.
    pub flip_guard_delay: f32,
}

impl Default for ChickenTuning {
    fn default() -> Self {
        Self {
            base: EnemyTuning::default(),
            aggro_duration: 2.0,
            flip_guard_delay: 0.3,
        }
    }
}

/// Rino: accelerating charge, stunned by wall impact.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct RinoTuning {
    pub base: EnemyTuning,
    /// Hard ceiling on charge speed.
    pub max_speed: f32,
    /// Charge acceleration in units per second per second.
    pub speed_up_rate: f32,
    /// Impulse knocking the rino away from a wall it slammed into.
    pub impact_power: Vec2,
    /// Seconds of stun before the rino turns around and may charge again.
    pub charge_recovery_delay: f32,
}

impl Default for RinoTuning {
    fn default() -> Self {
        Self {
            base: EnemyTuning::default(),
            max_speed: 6.0,
            speed_up_rate: 0.6,
            impact_power: Vec2::new(7.0, 5.0),
            charge_recovery_delay: 1.0,
        }
    }
}
