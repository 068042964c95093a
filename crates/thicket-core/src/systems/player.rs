//! Player movement state machine.
//!
//! Per-tick priority order is fixed and load-bearing:
//!
//! 1. knockback freeze
//! 2. grounded/airborne bookkeeping (buffered jump, coyote arming)
//! 3. control gate (spawn-in and push locks)
//! 4. stomp check, before movement so the bounce survives the tick
//! 5. jump input
//! 6. wall slide
//! 7. horizontal drive
//! 8. facing

use hecs::{Entity, World};
use thicket_logic::geometry::Vec2;
use thicket_logic::orientation::Facing;

use crate::components::{Body, Player};
use crate::events::{LifecycleEvent, Outbox};
use crate::host::{layers, InputSnapshot, WorldQuery};
use crate::schedule::{Scheduler, TaskKind};
use crate::systems::execute_enemy_death;

/// Advance every player one tick.
pub fn player_system(
    world: &mut World,
    scheduler: &mut Scheduler,
    outbox: &mut Outbox,
    query: &dyn WorldQuery,
    input: &InputSnapshot,
    now: f64,
) {
    // Stomp victims die after the query loop releases the world borrow.
    let mut stomped: Vec<Entity> = Vec::new();

    for (entity, (body, player)) in world.query_mut::<(&mut Body, &mut Player)>() {
        if body.dead {
            continue;
        }
        // Knockback suspends the whole machine, grounded bookkeeping
        // included, until the scheduled release.
        if player.knocked {
            continue;
        }

        update_airborne_status(body, player, now);

        if !player.controllable {
            continue;
        }

        stomped.extend(stomp_check(body, player, query));

        if input.jump_pressed {
            jump_button(entity, body, player, scheduler, now);
            // A press that left us still airborne is banked for landing.
            if player.airborne {
                player.buffer_jump.mark(now);
            }
        }

        handle_wall_slide(body, player, input);
        handle_movement(body, player, input);
        handle_flip(body, input);
    }

    for victim in stomped {
        if execute_enemy_death(world, scheduler, outbox, victim) {
            outbox.lifecycle(LifecycleEvent::EnemyStomped { actor: victim });
        }
    }
}

fn update_airborne_status(body: &mut Body, player: &mut Player, now: f64) {
    if body.probes.grounded && player.airborne {
        handle_landing(body, player, now);
    }
    if !body.probes.grounded && !player.airborne {
        become_airborne(body, player, now);
    }
}

// A wall-jump lock in flight survives the touchdown; only the scheduled
// release (or a superseding jump) ends it.
fn handle_landing(body: &mut Body, player: &mut Player, now: f64) {
    player.airborne = false;
    player.can_double_jump = true;
    if player
        .buffer_jump
        .consume(now, player.tuning.buffer_jump_window as f64)
    {
        jump(body, player);
    }
}

fn become_airborne(body: &Body, player: &mut Player, now: f64) {
    player.airborne = true;
    // Only a fall arms coyote time; a jump leaves the ground rising. On
    // the walk-off tick the host's clamp still has vertical velocity at
    // zero, so zero counts as falling.
    if body.velocity.y <= 0.0 {
        player.coyote_jump.mark(now);
    }
}

/// Resolve one jump press: grounded/coyote jump, else wall jump, else
/// double jump. The coyote window is gone after any press.
fn jump_button(
    entity: Entity,
    body: &mut Body,
    player: &mut Player,
    scheduler: &mut Scheduler,
    now: f64,
) {
    let coyote_available = player
        .coyote_jump
        .within(now, player.tuning.coyote_jump_window as f64);

    if body.probes.grounded || coyote_available {
        jump(body, player);
    } else if body.probes.wall && !body.probes.grounded {
        wall_jump(entity, body, player, scheduler, now);
    } else if player.can_double_jump {
        double_jump(entity, body, player, scheduler);
    }

    player.coyote_jump.clear();
}

fn jump(body: &mut Body, player: &Player) {
    body.velocity.y = player.tuning.jump_force;
}

fn wall_jump(
    entity: Entity,
    body: &mut Body,
    player: &mut Player,
    scheduler: &mut Scheduler,
    now: f64,
) {
    player.can_double_jump = true;
    // Push away from the wall we are facing, then face the flight.
    body.velocity = Vec2::new(
        player.tuning.wall_jump_force.x * -body.facing.sign(),
        player.tuning.wall_jump_force.y,
    );
    body.flip();
    player.wall_jumping = true;
    // A fresh wall jump supersedes everything still pending on this actor.
    scheduler.cancel_all(entity);
    scheduler.schedule(
        entity,
        TaskKind::WallJumpRelease,
        now + player.tuning.wall_jump_duration as f64,
    );
}

fn double_jump(entity: Entity, body: &mut Body, player: &mut Player, scheduler: &mut Scheduler) {
    player.wall_jumping = false;
    scheduler.cancel(entity, TaskKind::WallJumpRelease);
    player.can_double_jump = false;
    body.velocity.y = player.tuning.double_jump_force;
}

/// Falling enemies-underfoot check. Kills everything inside the stomp
/// circle and bounces the player.
fn stomp_check(body: &mut Body, player: &Player, query: &dyn WorldQuery) -> Vec<Entity> {
    if body.velocity.y >= 0.0 {
        return Vec::new();
    }
    let center = body.position + player.tuning.stomp_offset;
    let victims = query.actors_in_circle(center, player.tuning.stomp_radius, layers::ENEMY);
    if !victims.is_empty() {
        jump(body, player);
    }
    victims
}

fn handle_wall_slide(body: &mut Body, player: &Player, input: &InputSnapshot) {
    if player.wall_jumping {
        return;
    }
    let sliding = body.probes.wall && body.velocity.y < 0.0;
    if !sliding {
        return;
    }
    // Holding down releases the slide into a free fall.
    let damp = if input.y_axis < 0.0 {
        1.0
    } else {
        player.tuning.wall_slide_factor
    };
    body.velocity.y *= damp;
}

fn handle_movement(body: &mut Body, player: &Player, input: &InputSnapshot) {
    if body.probes.wall || player.wall_jumping {
        return;
    }
    body.velocity.x = input.x_axis * player.tuning.move_speed;
}

fn handle_flip(body: &mut Body, input: &InputSnapshot) {
    if let Some(want) = Facing::toward(input.x_axis) {
        if want != body.facing {
            body.flip();
        }
    }
}
