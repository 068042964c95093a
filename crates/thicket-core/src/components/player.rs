//! Player state component.

use thicket_logic::timing::EventStamp;

use crate::config::PlayerTuning;

/// Player control state. Movement flags here are driven exclusively by
/// [`crate::systems::player_system`] and the scheduled releases.
#[derive(Debug, Clone)]
pub struct Player {
    pub tuning: PlayerTuning,
    /// False during spawn-in and scripted pushes. Input is ignored while
    /// false, but grounded bookkeeping still runs.
    pub controllable: bool,
    pub airborne: bool,
    /// Knockback in progress. Freezes the whole state machine until the
    /// scheduled release.
    pub knocked: bool,
    /// Horizontal control lock after a wall jump.
    pub wall_jumping: bool,
    /// Single-use mid-air jump charge, restored on landing and by wall
    /// jumps.
    pub can_double_jump: bool,
    /// When the last mid-air jump press happened.
    pub buffer_jump: EventStamp,
    /// When the ground was last left without upward velocity.
    pub coyote_jump: EventStamp,
}

impl Player {
    /// Starts uncontrollable: the spawn-in lock is lifted by
    /// [`crate::engine::Stage::finish_spawn`].
    pub fn new(tuning: PlayerTuning) -> Self {
        Self {
            tuning,
            controllable: false,
            airborne: false,
            knocked: false,
            wall_jumping: false,
            can_double_jump: false,
            buffer_jump: EventStamp::unset(),
            coyote_jump: EventStamp::unset(),
        }
    }
}
