//! Static level geometry: a flat list of solid rectangles with the ray
//! query the probe layer needs. This is the reference world-geometry
//! backend used by tests and the headless harness; real hosts may answer
//! the same queries from their own physics world.

use crate::geometry::{ray_hits_aabb, Aabb, Vec2};

#[derive(Debug, Clone, Default)]
pub struct StaticLevel {
    pub solids: Vec<Aabb>,
}

impl StaticLevel {
    pub fn new(solids: Vec<Aabb>) -> Self {
        StaticLevel { solids }
    }

    /// An empty level answers every query with "no hit".
    pub fn empty() -> Self {
        StaticLevel::default()
    }

    pub fn add_solid(&mut self, solid: Aabb) {
        self.solids.push(solid);
    }

    /// True if the segment from `origin` along unit `dir` for `max_dist`
    /// touches any solid.
    pub fn ray_hit(&self, origin: Vec2, dir: Vec2, max_dist: f32) -> bool {
        self.solids
            .iter()
            .any(|s| ray_hits_aabb(origin, dir, max_dist, s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn floor_and_wall() -> StaticLevel {
        StaticLevel::new(vec![
            Aabb::from_corners(Vec2::new(-10.0, -1.0), Vec2::new(10.0, 0.0)),
            Aabb::from_corners(Vec2::new(5.0, 0.0), Vec2::new(6.0, 4.0)),
        ])
    }

    #[test]
    fn test_empty_level_never_hits() {
        let level = StaticLevel::empty();
        assert!(!level.ray_hit(Vec2::ZERO, Vec2::DOWN, 100.0));
    }

    #[test]
    fn test_hits_any_solid() {
        let level = floor_and_wall();
        assert!(level.ray_hit(Vec2::new(0.0, 0.5), Vec2::DOWN, 1.0));
        assert!(level.ray_hit(Vec2::new(4.6, 1.0), Vec2::new(1.0, 0.0), 0.5));
        assert!(!level.ray_hit(Vec2::new(4.6, 1.0), Vec2::new(-1.0, 0.0), 0.5));
    }
}
