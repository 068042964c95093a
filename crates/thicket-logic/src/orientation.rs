//! Horizontal facing. The sign is derived from the variant so the two
//! can never disagree.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Facing {
    Left,
    #[default]
    Right,
}

impl Facing {
    /// -1.0 for left, +1.0 for right. Multiplies into velocities and
    /// probe directions.
    pub fn sign(self) -> f32 {
        match self {
            Facing::Left => -1.0,
            Facing::Right => 1.0,
        }
    }

    pub fn flipped(self) -> Facing {
        match self {
            Facing::Left => Facing::Right,
            Facing::Right => Facing::Left,
        }
    }

    /// Facing that looks along `dx`, or `None` when `dx` is zero and no
    /// direction is implied.
    pub fn toward(dx: f32) -> Option<Facing> {
        if dx > 0.0 {
            Some(Facing::Right)
        } else if dx < 0.0 {
            Some(Facing::Left)
        } else {
            None
        }
    }
}
