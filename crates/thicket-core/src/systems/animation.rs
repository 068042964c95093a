//! Per-tick animation parameter sync.
//!
//! Runs last so the presentation layer sees the velocities and flags the
//! tick actually produced. Event-driven parameters (`is-knocked`,
//! `hit-wall`, the `hit` trigger) are pushed at their transition points
//! by the systems that cause them; this system only streams the
//! continuous ones. Dead and uncontrolled actors still sync, so spawn-in
//! and corpse animations track the body.

use hecs::World;

use crate::components::{Body, Brain, Player};
use crate::events::{anim_params, Outbox};

pub fn animation_system(world: &World, outbox: &mut Outbox) {
    for (entity, (body, _player)) in world.query::<(&Body, &Player)>().iter() {
        outbox.set_float(entity, anim_params::X_VELOCITY, body.velocity.x);
        outbox.set_float(entity, anim_params::Y_VELOCITY, body.velocity.y);
        outbox.set_flag(entity, anim_params::IS_GROUNDED, body.probes.grounded);
        outbox.set_flag(entity, anim_params::IS_WALL_DETECTED, body.probes.wall);
    }
    for (entity, (body, _brain)) in world.query::<(&Body, &Brain)>().iter() {
        outbox.set_float(entity, anim_params::X_VELOCITY, body.velocity.x);
    }
}
