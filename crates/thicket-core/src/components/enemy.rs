//! Enemy state components.
//!
//! Species share the probe, facing and death machinery through [`Body`];
//! what differs is the decision logic, so each species gets its own state
//! record behind one [`Brain`] tag dispatched in the enemy system.
//!
//! [`Body`]: crate::components::Body

use crate::config::{ChickenTuning, EnemyTuning, RinoTuning};

/// Species tag plus per-species state.
#[derive(Debug, Clone)]
pub enum Brain {
    Chicken(ChickenState),
    Rino(RinoState),
}

impl Brain {
    /// Tuning shared by all species.
    pub fn base(&self) -> &EnemyTuning {
        match self {
            Brain::Chicken(state) => &state.tuning.base,
            Brain::Rino(state) => &state.tuning.base,
        }
    }

    pub fn can_move(&self) -> bool {
        match self {
            Brain::Chicken(state) => state.can_move,
            Brain::Rino(state) => state.can_move,
        }
    }
}

/// Chase-while-recently-seen patroller.
#[derive(Debug, Clone)]
pub struct ChickenState {
    pub tuning: ChickenTuning,
    /// Movement enable. Off until the player is first sighted, off again
    /// when the aggro window lapses or a turnaround stops the chase.
    pub can_move: bool,
    /// Seconds of chase remaining since the player was last sighted.
    pub aggro_timer: f32,
    /// A delayed flip toward the player is pending.
    pub flip_guard: bool,
}

impl ChickenState {
    pub fn new(tuning: ChickenTuning) -> Self {
        Self {
            tuning,
            can_move: false,
            aggro_timer: 0.0,
            flip_guard: false,
        }
    }
}

/// Accelerating charger, stunned by wall impact.
#[derive(Debug, Clone)]
pub struct RinoState {
    pub tuning: RinoTuning,
    /// Charge enable. Armed when the player is sighted while grounded
    /// and not stunned.
    pub can_move: bool,
    /// Current charge speed, ramping from the base move speed up to the
    /// configured maximum.
    pub current_speed: f32,
    /// Wall-impact stun in progress; cleared by the scheduled recovery.
    pub stunned: bool,
}

impl RinoState {
    pub fn new(tuning: RinoTuning) -> Self {
        Self {
            current_speed: tuning.base.move_speed,
            tuning,
            can_move: false,
            stunned: false,
        }
    }
}
