//! Enemy behavior: chicken patrol/chase and rino charge, plus the death
//! entry point both species (and the player's stomp) share.
//!
//! Both species run the same skeleton each tick: read the probe flags,
//! decide whether movement is enabled, drive horizontal velocity from
//! facing, and react to walls and ledges. Everything time-delayed (the
//! chicken's guarded flip, the rino's stun recovery) goes through the
//! scheduler; the engine applies the tasks when they come due.

use hecs::{Entity, World};
use rand::Rng;
use thicket_logic::geometry::Vec2;
use thicket_logic::orientation::Facing;

use crate::components::{Body, Brain, ChickenState, RinoState};
use crate::events::{anim_params, LifecycleEvent, Outbox};
use crate::schedule::{Scheduler, TaskKind};

/// Advance every live enemy one tick. `target` is the bound player's
/// position, if one is bound; without it the chicken cannot steer but
/// still patrols.
pub fn enemy_system(
    world: &mut World,
    scheduler: &mut Scheduler,
    outbox: &mut Outbox,
    target: Option<Vec2>,
    now: f64,
    dt: f32,
) {
    for (entity, (body, brain)) in world.query_mut::<(&mut Body, &mut Brain)>() {
        if body.dead {
            continue;
        }
        match brain {
            Brain::Chicken(state) => chicken_tick(entity, body, state, scheduler, target, now, dt),
            Brain::Rino(state) => rino_tick(entity, body, state, scheduler, outbox, now, dt),
        }
    }
}

/// Kill one enemy: surfaces off, death pop, random corpse spin. Returns
/// false when the actor is not a live enemy, so callers can treat "kill
/// something already dead" as a no-op.
pub fn execute_enemy_death(
    world: &mut World,
    scheduler: &mut Scheduler,
    outbox: &mut Outbox,
    actor: Entity,
) -> bool {
    let died = {
        let mut query = match world.query_one::<(&mut Body, &Brain)>(actor) {
            Ok(query) => query,
            Err(_) => return false,
        };
        match query.get() {
            Some((body, brain)) if !body.dead => {
                let base = brain.base();
                body.dead = true;
                body.surfaces_enabled = false;
                body.velocity.y = base.death_impact;
                let spin_sign = if rand::thread_rng().gen_range(0..100) < 50 {
                    -1.0
                } else {
                    1.0
                };
                body.spin_rate = base.death_spin_rate * spin_sign;
                true
            }
            _ => false,
        }
    };
    if died {
        scheduler.cancel_all(actor);
        outbox.trigger(actor, anim_params::HIT);
        outbox.lifecycle(LifecycleEvent::EnemyDied { actor });
        log::info!("enemy {:?} died", actor);
    }
    died
}

fn chicken_tick(
    entity: Entity,
    body: &mut Body,
    state: &mut ChickenState,
    scheduler: &mut Scheduler,
    target: Option<Vec2>,
    now: f64,
    dt: f32,
) {
    state.aggro_timer -= dt;
    if body.probes.target_sighted {
        state.can_move = true;
        state.aggro_timer = state.tuning.aggro_duration;
    }
    if state.aggro_timer < 0.0 {
        state.can_move = false;
    }

    if state.can_move {
        if let Some(target) = target {
            steer_toward(entity, body, state, scheduler, target.x, now);
        }
        body.velocity.x = state.tuning.base.move_speed * body.facing.sign();
    }

    if body.probes.grounded && (!body.probes.ground_ahead || body.probes.wall) {
        turn_around(entity, body, state, scheduler);
    }
}

/// Request a flip toward the player. The actual flip runs after the
/// guard delay so a target sitting right on the detection ray does not
/// make the chicken oscillate every tick.
fn steer_toward(
    entity: Entity,
    body: &Body,
    state: &mut ChickenState,
    scheduler: &mut Scheduler,
    target_x: f32,
    now: f64,
) {
    let Some(want) = Facing::toward(target_x - body.position.x) else {
        return;
    };
    if want != body.facing && !state.flip_guard {
        state.flip_guard = true;
        scheduler.schedule(
            entity,
            TaskKind::GuardedFlip,
            now + state.tuning.flip_guard_delay as f64,
        );
        log::debug!("chicken {:?} guarded flip armed", entity);
    }
}

fn turn_around(
    entity: Entity,
    body: &mut Body,
    state: &mut ChickenState,
    scheduler: &mut Scheduler,
) {
    body.flip();
    state.can_move = false;
    body.velocity = Vec2::ZERO;
    // A reversal makes a pending guarded flip stale.
    if state.flip_guard {
        state.flip_guard = false;
        scheduler.cancel(entity, TaskKind::GuardedFlip);
    }
}

fn rino_tick(
    entity: Entity,
    body: &mut Body,
    state: &mut RinoState,
    scheduler: &mut Scheduler,
    outbox: &mut Outbox,
    now: f64,
    dt: f32,
) {
    if body.probes.target_sighted && body.probes.grounded && !state.stunned {
        state.can_move = true;
    }
    if !state.can_move {
        return;
    }

    // The charge ramps but never escapes the configured ceiling.
    state.current_speed = (state.current_speed + state.tuning.speed_up_rate * dt)
        .min(state.tuning.max_speed);
    body.velocity.x = state.current_speed * body.facing.sign();

    if body.probes.wall {
        wall_hit(entity, body, state, scheduler, outbox, now);
    } else if !body.probes.ground_ahead {
        // Ledge ahead: ordinary turnaround, no stun.
        state.current_speed = state.tuning.base.move_speed;
        state.can_move = false;
        body.velocity = Vec2::ZERO;
        body.flip();
    }
}

fn wall_hit(
    entity: Entity,
    body: &mut Body,
    state: &mut RinoState,
    scheduler: &mut Scheduler,
    outbox: &mut Outbox,
    now: f64,
) {
    state.can_move = false;
    state.current_speed = state.tuning.base.move_speed;
    state.stunned = true;
    outbox.set_flag(entity, anim_params::HIT_WALL, true);
    body.velocity = Vec2::new(
        state.tuning.impact_power.x * -body.facing.sign(),
        state.tuning.impact_power.y,
    );
    scheduler.schedule(
        entity,
        TaskKind::ChargeRecovery,
        now + state.tuning.charge_recovery_delay as f64,
    );
    log::debug!("rino {:?} slammed into a wall", entity);
}
