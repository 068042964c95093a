//! Environment sensing. Every actor samples the same small set of rays
//! once per tick and downstream logic reads the cached flags instead of
//! re-querying the world.
//!
//! | Probe          | Origin                  | Direction      |
//! |----------------|-------------------------|----------------|
//! | `grounded`     | body center             | straight down  |
//! | `ground_ahead` | ahead anchor (mirrored) | straight down  |
//! | `wall`         | body center             | facing         |
//! | `target`       | body center             | facing         |
//!
//! The ahead anchor and target ray only apply to patrolling actors; a
//! reach without an anchor reports `ground_ahead` equal to `grounded`,
//! and a zero target range never sights anything.

use serde::{Deserialize, Serialize};

use crate::geometry::Vec2;

/// Per-actor probe distances. Built once from tuning at spawn time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProbeReach {
    /// Downward ray length for ground contact.
    pub ground: f32,
    /// Forward ray length for wall contact.
    pub wall: f32,
    /// Local offset of the ledge sensor, mirrored by facing. `None`
    /// for actors without ledge sensing.
    pub ahead_anchor: Option<Vec2>,
    /// Forward sight distance for target detection. Zero disables it.
    pub target_range: f32,
}

impl ProbeReach {
    pub fn grounded_only(ground: f32, wall: f32) -> Self {
        ProbeReach { ground, wall, ahead_anchor: None, target_range: 0.0 }
    }
}

/// Flags sampled this tick. Consumers read these, never the rays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ProbeFlags {
    pub grounded: bool,
    pub ground_ahead: bool,
    pub wall: bool,
    pub target_sighted: bool,
}

/// Sample all probes for one actor.
///
/// `ground_ray` answers against level geometry, `target_ray` against
/// the actor's target layer; both take (origin, unit direction, max
/// distance). Ahead-anchor x is mirrored by `facing_sign` so the sensor
/// leads the walk direction.
pub fn run_probes(
    origin: Vec2,
    facing_sign: f32,
    reach: &ProbeReach,
    ground_ray: &dyn Fn(Vec2, Vec2, f32) -> bool,
    target_ray: &dyn Fn(Vec2, Vec2, f32) -> bool,
) -> ProbeFlags {
    let forward = Vec2::new(facing_sign, 0.0);
    let grounded = ground_ray(origin, Vec2::DOWN, reach.ground);
    let ground_ahead = match reach.ahead_anchor {
        Some(anchor) => {
            let ahead = Vec2::new(origin.x + anchor.x * facing_sign, origin.y + anchor.y);
            ground_ray(ahead, Vec2::DOWN, reach.ground)
        }
        None => grounded,
    };
    ProbeFlags {
        grounded,
        ground_ahead,
        wall: ground_ray(origin, forward, reach.wall),
        target_sighted: reach.target_range > 0.0
            && target_ray(origin, forward, reach.target_range),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Aabb;
    use crate::level::StaticLevel;

    fn ledge_level() -> StaticLevel {
        // Floor ends at x = 2; wall stands at x = -1.5.
        StaticLevel::new(vec![
            Aabb::from_corners(Vec2::new(-1.0, -1.0), Vec2::new(2.0, 0.0)),
            Aabb::from_corners(Vec2::new(-2.0, 0.0), Vec2::new(-1.5, 3.0)),
        ])
    }

    fn reach_with_anchor() -> ProbeReach {
        ProbeReach {
            ground: 1.1,
            wall: 0.7,
            ahead_anchor: Some(Vec2::new(0.6, 0.0)),
            target_range: 0.0,
        }
    }

    #[test]
    fn test_ahead_anchor_mirrors_with_facing() {
        let level = ledge_level();
        let ground = |o: Vec2, d: Vec2, m: f32| level.ray_hit(o, d, m);
        let none = |_: Vec2, _: Vec2, _: f32| false;
        let origin = Vec2::new(1.6, 0.5);

        // Facing right the sensor hangs past the ledge at x = 2.2.
        let right = run_probes(origin, 1.0, &reach_with_anchor(), &ground, &none);
        assert!(right.grounded);
        assert!(!right.ground_ahead);

        // Facing left it sits back over the floor at x = 1.0.
        let left = run_probes(origin, -1.0, &reach_with_anchor(), &ground, &none);
        assert!(left.grounded);
        assert!(left.ground_ahead);
    }

    #[test]
    fn test_wall_probe_follows_facing() {
        let level = ledge_level();
        let ground = |o: Vec2, d: Vec2, m: f32| level.ray_hit(o, d, m);
        let none = |_: Vec2, _: Vec2, _: f32| false;
        let origin = Vec2::new(-0.9, 0.5);

        let left = run_probes(origin, -1.0, &reach_with_anchor(), &ground, &none);
        assert!(left.wall);
        let right = run_probes(origin, 1.0, &reach_with_anchor(), &ground, &none);
        assert!(!right.wall);
    }

    #[test]
    fn test_missing_anchor_mirrors_grounded() {
        let level = ledge_level();
        let ground = |o: Vec2, d: Vec2, m: f32| level.ray_hit(o, d, m);
        let none = |_: Vec2, _: Vec2, _: f32| false;
        let reach = ProbeReach::grounded_only(1.1, 0.55);

        let flags = run_probes(Vec2::new(0.0, 0.5), 1.0, &reach, &ground, &none);
        assert!(flags.grounded);
        assert!(flags.ground_ahead);
        assert!(!flags.target_sighted);
    }

    #[test]
    fn test_target_ray_uses_its_own_backend() {
        let level = StaticLevel::empty();
        let ground = |o: Vec2, d: Vec2, m: f32| level.ray_hit(o, d, m);
        let target = |_: Vec2, d: Vec2, m: f32| d.x < 0.0 && m >= 15.0;
        let mut reach = reach_with_anchor();
        reach.target_range = 15.0;

        let left = run_probes(Vec2::ZERO, -1.0, &reach, &ground, &target);
        assert!(left.target_sighted);
        let right = run_probes(Vec2::ZERO, 1.0, &reach, &ground, &target);
        assert!(!right.target_sighted);
    }

    #[test]
    fn test_zero_range_never_sights() {
        let always = |_: Vec2, _: Vec2, _: f32| true;
        let reach = ProbeReach::grounded_only(1.0, 0.5);
        let flags = run_probes(Vec2::ZERO, 1.0, &reach, &always, &always);
        assert!(!flags.target_sighted);
    }
}
