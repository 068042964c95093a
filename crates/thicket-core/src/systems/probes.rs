//! Probe system - refreshes every actor's environment flags.
//!
//! Runs first in the tick so the state machines read flags sampled from
//! the same world state. Flags on corpses go stale deliberately; nothing
//! reads them again.

use hecs::World;
use thicket_logic::geometry::Vec2;
use thicket_logic::probes::run_probes;

use crate::components::Body;
use crate::host::{layers, WorldQuery};

pub fn probe_system(world: &mut World, query: &dyn WorldQuery) {
    for (_entity, body) in world.query_mut::<&mut Body>() {
        if body.dead {
            continue;
        }
        let reach = body.reach;
        let sight_mask = body.sight_mask;
        let ground = |origin: Vec2, dir: Vec2, max: f32| query.ray_hit(origin, dir, max, layers::GROUND);
        let target = |origin: Vec2, dir: Vec2, max: f32| query.ray_hit(origin, dir, max, sight_mask);
        body.probes = run_probes(body.position, body.facing.sign(), &reach, &ground, &target);
    }
}
