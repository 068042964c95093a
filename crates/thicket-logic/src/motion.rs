//! Axis-separated movement against solid rectangles.
//!
//! The X axis resolves before the Y axis, so an actor sliding along a
//! floor into a wall stops horizontally without losing its footing.
//! Resolution is discrete: per-tick travel must stay smaller than the
//! thinnest solid, which holds for the speeds and tick rates the sim
//! runs at.

use crate::geometry::{Aabb, Vec2};

/// Result of one integration step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SweepOutcome {
    pub position: Vec2,
    pub velocity: Vec2,
    /// Clamped upward onto a solid while falling.
    pub hit_ground: bool,
    /// Clamped downward off a solid while rising.
    pub hit_ceiling: bool,
    /// Clamped horizontally against a solid.
    pub hit_wall: bool,
}

/// Advance a box by `velocity * dt`, clamping against `solids` and
/// zeroing the velocity component on each axis that made contact.
pub fn sweep_aabb(
    position: Vec2,
    half: Vec2,
    velocity: Vec2,
    dt: f32,
    solids: &[Aabb],
) -> SweepOutcome {
    let mut out = SweepOutcome {
        position,
        velocity,
        hit_ground: false,
        hit_ceiling: false,
        hit_wall: false,
    };

    // X axis.
    if out.velocity.x != 0.0 {
        out.position.x += out.velocity.x * dt;
        for solid in solids {
            if !Aabb::new(out.position, half).overlaps(solid) {
                continue;
            }
            out.position.x = if out.velocity.x > 0.0 {
                solid.min().x - half.x
            } else {
                solid.max().x + half.x
            };
            out.velocity.x = 0.0;
            out.hit_wall = true;
        }
    }

    // Y axis.
    if out.velocity.y != 0.0 {
        out.position.y += out.velocity.y * dt;
        for solid in solids {
            if !Aabb::new(out.position, half).overlaps(solid) {
                continue;
            }
            if out.velocity.y > 0.0 {
                out.position.y = solid.min().y - half.y;
                out.hit_ceiling = true;
            } else {
                out.position.y = solid.max().y + half.y;
                out.hit_ground = true;
            }
            out.velocity.y = 0.0;
        }
    }

    out
}
