//! End-to-end scenarios against a reference host rig.
//!
//! The rig plays the part of the host: it answers world queries from a
//! [`StaticLevel`] plus live hurtbox mirrors, applies gravity, and sweeps
//! bodies against the level between ticks. All tests are pure
//! simulation with no rendering and no real clock.

use hecs::Entity;
use thicket_core::prelude::*;
use thicket_logic::geometry::{circle_overlaps_aabb, ray_hits_aabb, Aabb, Vec2};
use thicket_logic::level::StaticLevel;
use thicket_logic::motion::sweep_aabb;
use thicket_logic::orientation::Facing;

const DT: f32 = 1.0 / 60.0;
const GRAVITY: f32 = 30.0;

// ── Reference rig ──────────────────────────────────────────────────────

struct Rig {
    level: StaticLevel,
}

/// Per-tick world snapshot: level geometry plus hurtbox mirrors taken
/// before the tick borrows the world.
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
    fn new(solids: Vec<Aabb>) -> Self {
        Rig {
            level: StaticLevel::new(solids),
        }
    }

    /// One host frame: snapshot hurtboxes, tick the stage, integrate.
    fn step(&self, stage: &mut Stage, input: InputSnapshot) {
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
                let out = sweep_aabb(body.position, body.half_extents, body.velocity, DT, &self.level.solids);
                body.position = out.position;
                body.velocity = out.velocity;
            } else {
                // Corpses and spawn-locked bodies fall through geometry.
                body.position = body.position + body.velocity * DT;
            }
        }
    }
}

// ── Helpers ────────────────────────────────────────────────────────────

fn flat_floor() -> Vec<Aabb> {
    vec![Aabb::from_corners(Vec2::new(-20.0, -1.0), Vec2::new(20.0, 0.0))]
}

fn ready_player(stage: &mut Stage, position: Vec2) -> Entity {
    let actor = stage.spawn_player(position, PlayerTuning::default());
    stage.bind_player(actor);
    stage.finish_spawn(actor);
    actor
}

fn body_of(stage: &Stage, actor: Entity) -> Body {
    (*stage.world.get::<&Body>(actor).unwrap()).clone()
}

fn player_of(stage: &Stage, actor: Entity) -> Player {
    (*stage.world.get::<&Player>(actor).unwrap()).clone()
}

fn settle(rig: &Rig, stage: &mut Stage, actor: Entity) {
    for _ in 0..30 {
        rig.step(stage, InputSnapshot::idle());
        if body_of(stage, actor).probes.grounded {
            return;
        }
    }
    panic!("actor never settled onto the ground");
}

// ── Player scenarios ───────────────────────────────────────────────────

#[test]
fn jump_arc_leaves_and_regains_the_ground() {
    let rig = Rig::new(flat_floor());
    let mut stage = Stage::new();
    let actor = ready_player(&mut stage, Vec2::new(0.0, 0.9));
    settle(&rig, &mut stage, actor);

    rig.step(&mut stage, InputSnapshot::jump());
    assert!(body_of(&stage, actor).velocity.y > 0.0);

    // Ride the arc back down; grounded and airborne must stay mutually
    // exclusive the whole way.
    let mut landed = false;
    for _ in 0..240 {
        rig.step(&mut stage, InputSnapshot::idle());
        let body = body_of(&stage, actor);
        let player = player_of(&stage, actor);
        assert_eq!(player.airborne, !body.probes.grounded);
        if body.probes.grounded && body.velocity.y == 0.0 {
            landed = true;
            break;
        }
    }
    assert!(landed, "jump arc never came back down");
    assert!(player_of(&stage, actor).can_double_jump);
}

#[test]
fn buffered_press_just_before_landing_jumps_on_touchdown() {
    let rig = Rig::new(flat_floor());
    let mut stage = Stage::new();
    // High enough that the coyote window from the falling spawn has
    // expired by the time the press happens near the ground.
    let actor = ready_player(&mut stage, Vec2::new(0.0, 8.0));

    let mut pressed = false;
    let mut bounced = false;
    for _ in 0..300 {
        let before = body_of(&stage, actor);
        // Press once on the way down, just above the ground: inside the
        // buffer window but too high to be grounded yet.
        let input = if !pressed && before.velocity.y < 0.0 && before.position.y < 2.0 {
            pressed = true;
            InputSnapshot::jump()
        } else {
            InputSnapshot::idle()
        };
        rig.step(&mut stage, input);
        let after = body_of(&stage, actor);
        if after.probes.grounded && after.velocity.y > 0.0 {
            bounced = true;
            break;
        }
    }
    assert!(pressed);
    assert!(bounced, "buffered jump never fired on landing");
}

#[test]
fn coyote_press_shortly_after_walkoff_still_jumps() {
    // Floor ends at x = 3.
    let rig = Rig::new(vec![Aabb::from_corners(Vec2::new(-5.0, -1.0), Vec2::new(3.0, 0.0))]);
    let mut stage = Stage::new();
    let actor = ready_player(&mut stage, Vec2::new(0.0, 0.9));
    settle(&rig, &mut stage, actor);

    // Walk right until the ground probe lets go.
    for _ in 0..300 {
        rig.step(&mut stage, InputSnapshot::walk(1.0));
        if !body_of(&stage, actor).probes.grounded {
            break;
        }
    }
    assert!(player_of(&stage, actor).airborne);

    // A couple of frames late, still inside the coyote window.
    rig.step(&mut stage, InputSnapshot::idle());
    rig.step(&mut stage, InputSnapshot::jump());
    let body = body_of(&stage, actor);
    assert!(body.velocity.y > PlayerTuning::default().jump_force - GRAVITY * DT * 2.0);
    assert!(!body.probes.grounded);
}

#[test]
fn stomp_through_the_rig_kills_and_bounces() {
    let rig = Rig::new(flat_floor());
    let mut stage = Stage::new();
    let actor = ready_player(&mut stage, Vec2::new(0.0, 4.0));
    let chicken = stage.spawn_chicken(Vec2::new(0.0, 0.4), ChickenTuning::default());

    let mut stomped = false;
    for _ in 0..300 {
        rig.step(&mut stage, InputSnapshot::idle());
        if body_of(&stage, chicken).dead {
            stomped = true;
            break;
        }
    }
    assert!(stomped, "falling player never stomped the chicken");

    let corpse = body_of(&stage, chicken);
    assert!(!corpse.surfaces_enabled);
    assert!(body_of(&stage, actor).velocity.y > 0.0, "no bounce after the stomp");

    let lifecycle = stage.drain_lifecycle();
    assert!(lifecycle
        .iter()
        .any(|ev| matches!(ev, LifecycleEvent::EnemyStomped { actor } if *actor == chicken)));

    // The corpse spins on subsequent frames.
    let rotation_before = corpse.rotation;
    for _ in 0..10 {
        rig.step(&mut stage, InputSnapshot::idle());
    }
    assert_ne!(body_of(&stage, chicken).rotation, rotation_before);
}

// ── Enemy scenarios ────────────────────────────────────────────────────

#[test]
fn chicken_chases_and_halts_at_the_ledge() {
    // Patrol platform from -4 to 4; the player stands on a lower shelf
    // past the left ledge so the chase runs out of ground first.
    let rig = Rig::new(vec![
        Aabb::from_corners(Vec2::new(-4.0, -1.0), Vec2::new(4.0, 0.0)),
        Aabb::from_corners(Vec2::new(-8.0, -1.0), Vec2::new(-5.0, 0.0)),
    ]);
    let mut stage = Stage::new();
    let actor = ready_player(&mut stage, Vec2::new(-6.0, 0.9));
    settle(&rig, &mut stage, actor);
    let chicken = stage.spawn_chicken(Vec2::new(2.0, 0.4), ChickenTuning::default());

    // Left-facing chicken sights the player and walks toward it; when
    // the player steps away the chicken keeps going and stops at the
    // left edge, turned around.
    let mut turned = false;
    for _ in 0..600 {
        rig.step(&mut stage, InputSnapshot::idle());
        let body = body_of(&stage, chicken);
        if body.facing == Facing::Right && body.velocity.x == 0.0 && body.position.x < -2.5 {
            turned = true;
            break;
        }
    }
    assert!(turned, "chicken never reached the ledge and turned");
    assert!(body_of(&stage, chicken).probes.grounded);
}

#[test]
fn rino_charge_slams_the_wall_and_recovers() {
    // Floor plus a wall at the right end.
    let rig = Rig::new(vec![
        Aabb::from_corners(Vec2::new(-10.0, -1.0), Vec2::new(10.0, 0.0)),
        Aabb::from_corners(Vec2::new(10.0, 0.0), Vec2::new(11.0, 5.0)),
    ]);
    let mut stage = Stage::new();
    let actor = ready_player(&mut stage, Vec2::new(8.0, 0.9));
    settle(&rig, &mut stage, actor);

    let tuning = RinoTuning::default();
    let rino = stage.spawn_rino(Vec2::new(-5.0, 0.4), tuning);
    stage.world.get::<&mut Body>(rino).unwrap().facing = Facing::Right;

    // Charge until the slam.
    let mut slammed = false;
    let mut last_speed = 0.0_f32;
    for _ in 0..1200 {
        rig.step(&mut stage, InputSnapshot::idle());
        match &*stage.world.get::<&Brain>(rino).unwrap() {
            Brain::Rino(state) => {
                if state.stunned {
                    slammed = true;
                    break;
                }
                if state.can_move {
                    assert!(state.current_speed >= last_speed);
                    assert!(state.current_speed <= tuning.max_speed);
                    last_speed = state.current_speed;
                }
            }
            _ => unreachable!(),
        }
    }
    assert!(slammed, "rino never hit the wall");
    assert!(last_speed > tuning.base.move_speed, "charge never ramped");
    match &*stage.world.get::<&Brain>(rino).unwrap() {
        Brain::Rino(state) => assert_eq!(state.current_speed, tuning.base.move_speed),
        _ => unreachable!(),
    }

    // The knock pushes it back off the wall face.
    let after_slam = body_of(&stage, rino).position.x;
    assert!(after_slam < 10.0 - tuning.base.half_extents.x + 0.01);

    // Recovery turns it away from the wall.
    let ticks = (tuning.charge_recovery_delay / DT) as u32 + 5;
    for _ in 0..ticks {
        rig.step(&mut stage, InputSnapshot::idle());
    }
    assert_eq!(body_of(&stage, rino).facing, Facing::Left);
    let _ = actor;
}

#[test]
fn knockback_during_rig_run_suspends_control() {
    let rig = Rig::new(flat_floor());
    let mut stage = Stage::new();
    let actor = ready_player(&mut stage, Vec2::new(0.0, 0.9));
    settle(&rig, &mut stage, actor);

    stage.knockback(actor, -1.0);
    let tuning = PlayerTuning::default();
    assert_eq!(
        body_of(&stage, actor).velocity,
        Vec2::new(tuning.knockback_force.x, tuning.knockback_force.y)
    );

    // Input is dead while knocked.
    rig.step(&mut stage, InputSnapshot::walk(-1.0));
    assert!(body_of(&stage, actor).velocity.x >= 0.0);

    let ticks = (tuning.knockback_duration / DT) as u32 + 5;
    for _ in 0..ticks {
        rig.step(&mut stage, InputSnapshot::idle());
    }
    assert!(!player_of(&stage, actor).knocked);
    rig.step(&mut stage, InputSnapshot::walk(-1.0));
    assert!(body_of(&stage, actor).velocity.x < 0.0);
}
