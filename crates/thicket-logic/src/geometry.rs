//! 2D geometry primitives: vectors, axis-aligned boxes, intersection tests.
//!
//! Rays here are segments: a unit direction scaled by a maximum distance.
//! A query with a non-positive distance or radius never hits anything, so
//! degenerate configuration values degrade to "not detected" rather than
//! failing.

use serde::{Deserialize, Serialize};
use std::ops::{Add, Mul, Neg, Sub};

/// 2D vector / point. Y points up, so falling means `y < 0.0`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };
    pub const DOWN: Vec2 = Vec2 { x: 0.0, y: -1.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Vec2 { x, y }
    }

    pub fn length(self) -> f32 {
        (self.x * self.x + self.y * self.y).sqrt()
    }
}

impl Add for Vec2 {
    type Output = Vec2;
    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Vec2 {
    type Output = Vec2;
    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f32> for Vec2 {
    type Output = Vec2;
    fn mul(self, rhs: f32) -> Vec2 {
        Vec2::new(self.x * rhs, self.y * rhs)
    }
}

impl Neg for Vec2 {
    type Output = Vec2;
    fn neg(self) -> Vec2 {
        Vec2::new(-self.x, -self.y)
    }
}

/// Axis-aligned box stored as center + half extents.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Aabb {
    pub center: Vec2,
    pub half: Vec2,
}

impl Aabb {
    pub const fn new(center: Vec2, half: Vec2) -> Self {
        Aabb { center, half }
    }

    /// Build from opposite corners; the corner order doesn't matter.
    pub fn from_corners(a: Vec2, b: Vec2) -> Self {
        let min = Vec2::new(a.x.min(b.x), a.y.min(b.y));
        let max = Vec2::new(a.x.max(b.x), a.y.max(b.y));
        Aabb {
            center: (min + max) * 0.5,
            half: (max - min) * 0.5,
        }
    }

    pub fn min(&self) -> Vec2 {
        self.center - self.half
    }

    pub fn max(&self) -> Vec2 {
        self.center + self.half
    }

    /// Strict overlap; boxes that merely touch do not overlap.
    pub fn overlaps(&self, other: &Aabb) -> bool {
        let (amin, amax) = (self.min(), self.max());
        let (bmin, bmax) = (other.min(), other.max());
        amin.x < bmax.x && bmin.x < amax.x && amin.y < bmax.y && bmin.y < amax.y
    }
}

/// Segment-vs-box test using the slab method.
///
/// `dir` is assumed unit length; the segment runs from `origin` to
/// `origin + dir * max_dist`. A segment starting inside the box hits it.
pub fn ray_hits_aabb(origin: Vec2, dir: Vec2, max_dist: f32, rect: &Aabb) -> bool {
    if max_dist <= 0.0 {
        return false;
    }
    let (min, max) = (rect.min(), rect.max());
    let mut t_enter = 0.0_f32;
    let mut t_exit = max_dist;

    if dir.x == 0.0 {
        if origin.x < min.x || origin.x > max.x {
            return false;
        }
    } else {
        let inv = 1.0 / dir.x;
        let (t0, t1) = ((min.x - origin.x) * inv, (max.x - origin.x) * inv);
        t_enter = t_enter.max(t0.min(t1));
        t_exit = t_exit.min(t0.max(t1));
    }

    if dir.y == 0.0 {
        if origin.y < min.y || origin.y > max.y {
            return false;
        }
    } else {
        let inv = 1.0 / dir.y;
        let (t0, t1) = ((min.y - origin.y) * inv, (max.y - origin.y) * inv);
        t_enter = t_enter.max(t0.min(t1));
        t_exit = t_exit.min(t0.max(t1));
    }

    t_enter <= t_exit
}

/// Circle-vs-box overlap via the closest point on the box.
pub fn circle_overlaps_aabb(center: Vec2, radius: f32, rect: &Aabb) -> bool {
    if radius <= 0.0 {
        return false;
    }
    let (min, max) = (rect.min(), rect.max());
    let dx = center.x - center.x.clamp(min.x, max.x);
    let dy = center.y - center.y.clamp(min.y, max.y);
    dx * dx + dy * dy <= radius * radius
}
