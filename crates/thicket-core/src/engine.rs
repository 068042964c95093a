//! Simulation engine - main entry point for running the simulation.
//!
//! [`Stage`] owns the ECS world, the simulation clock, the scheduler and
//! the outbound queues. The host calls [`Stage::tick`] once per fixed
//! step with that frame's input and a [`WorldQuery`] over its geometry,
//! then drains the queues and integrates bodies. Spawning, binding,
//! kills, knockbacks and pushes are explicit calls on the stage; nothing
//! in the core reaches for globals or polls.

use hecs::{Entity, World};
use thicket_logic::geometry::Vec2;
use thicket_logic::orientation::Facing;
use thicket_logic::probes::ProbeReach;

use crate::components::{Body, Brain, ChickenState, Player, RinoState};
use crate::config::{ChickenTuning, PlayerTuning, RinoTuning};
use crate::events::{anim_params, AnimCommand, LifecycleEvent, Outbox};
use crate::host::{layers, InputSnapshot, WorldQuery};
use crate::schedule::{Scheduler, Task, TaskKind};
use crate::systems::{
    animation_system, death_system, enemy_system, execute_enemy_death, player_system, probe_system,
};

/// The simulation core: world, clock, scheduler, outbox.
pub struct Stage {
    /// ECS world containing all actors.
    pub world: World,
    sim_time: f64,
    scheduler: Scheduler,
    outbox: Outbox,
    /// The actor enemies steer toward. Bound once by the spawn
    /// collaborator when the player exists.
    player: Option<Entity>,
}

impl Stage {
    pub fn new() -> Self {
        Self {
            world: World::new(),
            sim_time: 0.0,
            scheduler: Scheduler::new(),
            outbox: Outbox::new(),
            player: None,
        }
    }

    /// Current simulation time in seconds.
    pub fn sim_time(&self) -> f64 {
        self.sim_time
    }

    pub fn bound_player(&self) -> Option<Entity> {
        self.player
    }

    /// Advance the simulation one fixed step.
    pub fn tick(&mut self, query: &dyn WorldQuery, input: &InputSnapshot, dt: f32) {
        self.sim_time += dt as f64;

        for task in self.scheduler.drain_due(self.sim_time) {
            self.apply_task(task);
        }

        probe_system(&mut self.world, query);
        player_system(
            &mut self.world,
            &mut self.scheduler,
            &mut self.outbox,
            query,
            input,
            self.sim_time,
        );
        let target = self.player_position();
        enemy_system(
            &mut self.world,
            &mut self.scheduler,
            &mut self.outbox,
            target,
            self.sim_time,
            dt,
        );
        death_system(&mut self.world, dt);
        animation_system(&self.world, &mut self.outbox);
    }

    // ── Spawning and binding ────────────────────────────────────────────

    /// Spawn a player under the spawn-in lock: uncontrollable, gravity
    /// off, hurtbox disabled until [`Stage::finish_spawn`].
    pub fn spawn_player(&mut self, position: Vec2, tuning: PlayerTuning) -> Entity {
        let mut body = Body::new(
            position,
            tuning.half_extents,
            layers::PLAYER,
            ProbeReach::grounded_only(tuning.ground_check, tuning.wall_check),
        );
        body.gravity_enabled = false;
        body.surfaces_enabled = false;
        let entity = self.world.spawn((body, Player::new(tuning)));
        log::info!("player {:?} spawned at {:?}", entity, position);
        entity
    }

    /// End the spawn-in lock: restore gravity, surfaces and control.
    pub fn finish_spawn(&mut self, actor: Entity) {
        if let Ok(mut query) = self.world.query_one::<(&mut Body, &mut Player)>(actor) {
            if let Some((body, player)) = query.get() {
                if !body.dead {
                    body.gravity_enabled = true;
                    body.surfaces_enabled = true;
                    player.controllable = true;
                }
            }
        }
    }

    /// Tell enemies which actor to hunt. Called once by the spawn
    /// collaborator; re-binding after a respawn is fine.
    pub fn bind_player(&mut self, actor: Entity) {
        self.player = Some(actor);
    }

    pub fn spawn_chicken(&mut self, position: Vec2, tuning: ChickenTuning) -> Entity {
        let body = Self::enemy_body(
            position,
            tuning.base.half_extents,
            ProbeReach {
                ground: tuning.base.ground_check,
                wall: tuning.base.wall_check,
                ahead_anchor: Some(tuning.base.ahead_anchor),
                target_range: tuning.base.sight_range,
            },
        );
        let entity = self
            .world
            .spawn((body, Brain::Chicken(ChickenState::new(tuning))));
        log::info!("chicken {:?} spawned at {:?}", entity, position);
        entity
    }

    pub fn spawn_rino(&mut self, position: Vec2, tuning: RinoTuning) -> Entity {
        let body = Self::enemy_body(
            position,
            tuning.base.half_extents,
            ProbeReach {
                ground: tuning.base.ground_check,
                wall: tuning.base.wall_check,
                ahead_anchor: Some(tuning.base.ahead_anchor),
                target_range: tuning.base.sight_range,
            },
        );
        let entity = self.world.spawn((body, Brain::Rino(RinoState::new(tuning))));
        log::info!("rino {:?} spawned at {:?}", entity, position);
        entity
    }

    fn enemy_body(position: Vec2, half: Vec2, reach: ProbeReach) -> Body {
        let mut body = Body::new(position, half, layers::ENEMY, reach);
        body.facing = Facing::Left;
        body.sight_mask = layers::PLAYER;
        body
    }

    /// Remove an actor and every pending task tied to it. The host calls
    /// this after it has finished with the corpse.
    pub fn despawn(&mut self, actor: Entity) {
        self.scheduler.cancel_all(actor);
        if self.player == Some(actor) {
            self.player = None;
        }
        let _ = self.world.despawn(actor);
    }

    // ── Commands ────────────────────────────────────────────────────────

    /// Kill an actor. Enemies get the shared pop-and-spin death; the
    /// player reports its death position for the host's respawn flow.
    /// Dead or unknown actors are ignored.
    pub fn kill(&mut self, actor: Entity) {
        if self.world.get::<&Brain>(actor).is_ok() {
            execute_enemy_death(&mut self.world, &mut self.scheduler, &mut self.outbox, actor);
            return;
        }
        let died_at = match self.world.query_one::<(&mut Body, &Player)>(actor) {
            Ok(mut query) => match query.get() {
                Some((body, _player)) if !body.dead => {
                    body.dead = true;
                    body.surfaces_enabled = false;
                    Some(body.position)
                }
                _ => None,
            },
            Err(_) => None,
        };
        if let Some(position) = died_at {
            self.scheduler.cancel_all(actor);
            self.outbox
                .lifecycle(LifecycleEvent::PlayerDied { actor, position });
            log::info!("player {:?} died at {:?}", actor, position);
        }
    }

    /// Knock the player away from a damage source. Ignored while a
    /// knockback or push is already in flight.
    pub fn knockback(&mut self, actor: Entity, source_x: f32) {
        let knocked = {
            let mut query = match self.world.query_one::<(&mut Body, &mut Player)>(actor) {
                Ok(query) => query,
                Err(_) => return,
            };
            match query.get() {
                Some((body, player)) if !body.dead && !player.knocked && player.controllable => {
                    let dir = if body.position.x < source_x { -1.0 } else { 1.0 };
                    body.velocity = Vec2::new(
                        player.tuning.knockback_force.x * dir,
                        player.tuning.knockback_force.y,
                    );
                    player.knocked = true;
                    Some(player.tuning.knockback_duration)
                }
                _ => None,
            }
        };
        match knocked {
            Some(duration) => {
                self.outbox.set_flag(actor, anim_params::IS_KNOCKED, true);
                self.scheduler.schedule(
                    actor,
                    TaskKind::KnockbackRelease,
                    self.sim_time + duration as f64,
                );
                log::debug!("player {:?} knocked back", actor);
            }
            None => log::debug!("knockback on {:?} ignored", actor),
        }
    }

    /// Scripted impulse: replace the player's velocity and lock control
    /// for `duration` seconds. Ignored while knocked or already locked.
    pub fn push(&mut self, actor: Entity, impulse: Vec2, duration: f32) {
        let pushed = {
            let mut query = match self.world.query_one::<(&mut Body, &mut Player)>(actor) {
                Ok(query) => query,
                Err(_) => return,
            };
            match query.get() {
                Some((body, player)) if !body.dead && !player.knocked && player.controllable => {
                    body.velocity = impulse;
                    player.controllable = false;
                    true
                }
                _ => false,
            }
        };
        if pushed {
            self.scheduler
                .schedule(actor, TaskKind::PushRelease, self.sim_time + duration as f64);
            log::debug!("player {:?} pushed", actor);
        } else {
            log::debug!("push on {:?} ignored", actor);
        }
    }

    // ── Outbox ──────────────────────────────────────────────────────────

    pub fn drain_anim(&mut self) -> Vec<AnimCommand> {
        self.outbox.drain_anim()
    }

    pub fn drain_lifecycle(&mut self) -> Vec<LifecycleEvent> {
        self.outbox.drain_lifecycle()
    }

    // ── Deferred continuations ──────────────────────────────────────────

    fn apply_task(&mut self, task: Task) {
        match task.kind {
            TaskKind::WallJumpRelease => {
                if let Ok(mut player) = self.world.get::<&mut Player>(task.actor) {
                    player.wall_jumping = false;
                }
            }
            TaskKind::KnockbackRelease => {
                let released = match self.world.get::<&mut Player>(task.actor) {
                    Ok(mut player) => {
                        player.knocked = false;
                        true
                    }
                    Err(_) => false,
                };
                if released {
                    self.outbox.set_flag(task.actor, anim_params::IS_KNOCKED, false);
                    log::debug!("player {:?} knockback released", task.actor);
                }
            }
            TaskKind::PushRelease => {
                if let Ok(mut query) = self.world.query_one::<(&Body, &mut Player)>(task.actor) {
                    if let Some((body, player)) = query.get() {
                        if !body.dead {
                            player.controllable = true;
                        }
                    }
                }
            }
            TaskKind::GuardedFlip => {
                if let Ok(mut query) = self.world.query_one::<(&mut Body, &mut Brain)>(task.actor) {
                    if let Some((body, Brain::Chicken(state))) = query.get() {
                        state.flip_guard = false;
                        if !body.dead {
                            body.flip();
                        }
                    }
                }
            }
            TaskKind::ChargeRecovery => {
                let recovered = match self.world.query_one::<(&mut Body, &mut Brain)>(task.actor) {
                    Ok(mut query) => match query.get() {
                        Some((body, Brain::Rino(state))) if !body.dead => {
                            state.stunned = false;
                            body.flip();
                            true
                        }
                        _ => false,
                    },
                    Err(_) => false,
                };
                if recovered {
                    self.outbox.set_flag(task.actor, anim_params::HIT_WALL, false);
                    log::debug!("rino {:?} recovered from wall stun", task.actor);
                }
            }
        }
    }

    fn player_position(&self) -> Option<Vec2> {
        let actor = self.player?;
        self.world.get::<&Body>(actor).ok().map(|body| body.position)
    }
}

impl Default for Stage {
    fn default() -> Self {
        Self::new()
    }
}
