//! Reference host rig: answers the core's world queries from the static
//! level plus live hurtbox mirrors, then integrates gravity and sweeps
//! bodies between ticks. This is the same contract a real host fulfils
//! with its physics engine.

use hecs::Entity;
use thicket_core::prelude::*;
use thicket_logic::geometry::{circle_overlaps_aabb, ray_hits_aabb, Aabb, Vec2};
use thicket_logic::level::StaticLevel;
use thicket_logic::motion::sweep_aabb;

pub const DT: f32 = 1.0 / 60.0;
pub const GRAVITY: f32 = 30.0;

pub struct Rig {
    pub level: StaticLevel,
}

struct RigQuery<'a> {
    level: &'a StaticLevel,
    actors: Vec<(Entity, u8, Aabb)>,
}

impl WorldQuery for RigQuery<'_> {
    fn ray_hit(&self, origin: Vec2, dir: Vec2, max_dist: f32, mask: u8) -> bool {
        if mask & layers::GROUND != 0 && self.level.ray_hit(origin, dir, max_dist) {
            return true;
        }
        self.actors
            .iter()
            .any(|(_, layer, rect)| layer & mask != 0 && ray_hits_aabb(origin, dir, max_dist, rect))
    }

    fn actors_in_circle(&self, center: Vec2, radius: f32, mask: u8) -> Vec<Entity> {
        self.actors
            .iter()
            .filter(|(_, layer, rect)| layer & mask != 0 && circle_overlaps_aabb(center, radius, rect))
            .map(|(entity, _, _)| *entity)
            .collect()
    }
}

impl Rig {
    pub fn new(level: StaticLevel) -> Self {
        Rig { level }
    }

    /// One host frame: snapshot hurtboxes, tick, integrate.
    pub fn step(&self, stage: &mut Stage, input: InputSnapshot) {
        let actors: Vec<(Entity, u8, Aabb)> = stage
            .world
            .query::<&Body>()
            .iter()
            .filter(|(_, body)| body.surfaces_enabled)
            .map(|(entity, body)| (entity, body.layer, Aabb::new(body.position, body.half_extents)))
            .collect();
        let query = RigQuery {
            level: &self.level,
            actors,
        };
        stage.tick(&query, &input, DT);

        for (_entity, body) in stage.world.query_mut::<&mut Body>() {
            if body.gravity_enabled {
                body.velocity.y -= GRAVITY * DT;
            }
            if body.surfaces_enabled {
                let out = sweep_aabb(
                    body.position,
                    body.half_extents,
                    body.velocity,
                    DT,
                    &self.level.solids,
                );
                body.position = out.position;
                body.velocity = out.velocity;
            } else {
                // Disabled surfaces (corpses, spawn-in) ignore geometry.
                body.position = body.position + body.velocity * DT;
            }
        }
    }
}
