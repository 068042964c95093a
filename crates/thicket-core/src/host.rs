//! Contracts between the simulation core and its host.
//!
//! The core never owns level geometry, input devices, or rendering. Each
//! tick the host hands in an [`InputSnapshot`] and a [`WorldQuery`]
//! implementation; the core answers with component mutations and the
//! drained queues in [`crate::events::Outbox`].

use hecs::Entity;
use thicket_logic::geometry::Vec2;

/// Collision layer bitmask. Actors carry the layer they live on and the
/// layers they probe for.
pub type LayerMask = u8;

/// Well-known collision layers.
pub mod layers {
    use super::LayerMask;

    pub const GROUND: LayerMask = 1 << 0;
    pub const PLAYER: LayerMask = 1 << 1;
    pub const ENEMY: LayerMask = 1 << 2;
    pub const ALL: LayerMask = LayerMask::MAX;
}

/// Read-only geometry and overlap queries answered by the host.
///
/// `ray_hit` must return false rather than failing when the mask matches
/// nothing. Rays filter by layer only: a target-layer ray is not occluded
/// by ground in between. `actors_in_circle` must exclude actors whose
/// collision surfaces are disabled (corpses).
pub trait WorldQuery {
    fn ray_hit(&self, origin: Vec2, dir: Vec2, max_dist: f32, mask: LayerMask) -> bool;

    fn actors_in_circle(&self, center: Vec2, radius: f32, mask: LayerMask) -> Vec<Entity>;
}

/// A world with no geometry and no actors. Probes all come back false.
pub struct EmptyWorld;

impl WorldQuery for EmptyWorld {
    fn ray_hit(&self, _origin: Vec2, _dir: Vec2, _max_dist: f32, _mask: LayerMask) -> bool {
        false
    }

    fn actors_in_circle(&self, _center: Vec2, _radius: f32, _mask: LayerMask) -> Vec<Entity> {
        Vec::new()
    }
}

/// Player input sampled by the host for one tick.
///
/// Axis values are in [-1, 1]. `jump_pressed` is an edge, not a level:
/// true only on the tick the button went down.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct InputSnapshot {
    pub x_axis: f32,
    pub y_axis: f32,
    pub jump_pressed: bool,
}

impl InputSnapshot {
    /// No sticks held, no buttons pressed.
    pub fn idle() -> Self {
        Self::default()
    }

    pub fn walk(x_axis: f32) -> Self {
        InputSnapshot { x_axis, ..Self::default() }
    }

    pub fn jump() -> Self {
        InputSnapshot { jump_pressed: true, ..Self::default() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_world_answers_nothing() {
        let world = EmptyWorld;
        assert!(!world.ray_hit(Vec2::ZERO, Vec2::DOWN, 100.0, layers::ALL));
        assert!(world.actors_in_circle(Vec2::ZERO, 50.0, layers::ALL).is_empty());
    }

    #[test]
    fn test_layers_are_distinct_bits() {
        assert_eq!(layers::GROUND & layers::PLAYER, 0);
        assert_eq!(layers::GROUND & layers::ENEMY, 0);
        assert_eq!(layers::PLAYER & layers::ENEMY, 0);
    }
}
