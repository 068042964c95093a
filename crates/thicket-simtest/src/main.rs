//! Thicket Headless Simulation Harness
//!
//! Validates the movement core and its timing logic without a host
//! engine. Runs entirely in-process with no rendering, no real clock
//! and no input devices.
//!
//! Usage:
//!   cargo run -p thicket-simtest
//!   cargo run -p thicket-simtest -- --verbose

mod rig;

use rig::{Rig, DT};
use serde::Deserialize;
use thicket_core::prelude::*;
use thicket_core::events::anim_params;
use thicket_logic::geometry::{Aabb, Vec2};
use thicket_logic::level::StaticLevel;
use thicket_logic::orientation::Facing;
use thicket_logic::timing::EventStamp;

// ── Testing ground (level data the reference rig runs on) ───────────────
const GROUND_JSON: &str = include_str!("../../../data/testing_ground.json");

#[derive(Debug, Deserialize)]
struct TestingGround {
    solids: Vec<Aabb>,
    player_spawn: Vec2,
    chicken_spawn: Vec2,
    rino_spawn: Vec2,
}

// ── Test harness ────────────────────────────────────────────────────────

struct TestResult {
    name: String,
    passed: bool,
    detail: String,
}

fn check(name: &str, passed: bool, detail: String) -> TestResult {
    TestResult {
        name: name.into(),
        passed,
        detail,
    }
}

fn main() {
    let verbose = std::env::args().any(|a| a == "--verbose");
    println!("=== Thicket Simulation Harness ===\n");

    let mut results = Vec::new();

    // 1. Testing ground data
    results.extend(validate_testing_ground());

    // 2. Timing windows
    results.extend(validate_timing_windows());

    // 3. Facing / orientation
    results.extend(validate_facing());

    // 4. Player machine (synthetic worlds, exact numbers)
    results.extend(validate_player_machine());

    // 5. Enemy behavior
    results.extend(validate_enemy_behavior());

    // 6. Full run on the testing ground
    results.extend(validate_full_run());

    // ── Summary ──
    println!();
    let passed = results.iter().filter(|r| r.passed).count();
    let failed = results.iter().filter(|r| !r.passed).count();
    let total = results.len();

    for r in &results {
        let icon = if r.passed { "✓" } else { "✗" };
        if !r.passed || verbose {
            println!("  {} {}: {}", icon, r.name, r.detail);
        }
    }

    println!(
        "\n=== RESULT: {}/{} passed, {} failed ===",
        passed, total, failed
    );

    if failed > 0 {
        std::process::exit(1);
    }
}

// ── Synthetic worlds for exact-number checks ────────────────────────────

/// Flat ground everywhere, nothing else.
struct Flat;
impl WorldQuery for Flat {
    fn ray_hit(&self, _: Vec2, dir: Vec2, _: f32, mask: u8) -> bool {
        mask & layers::GROUND != 0 && dir.y < 0.0
    }
    fn actors_in_circle(&self, _: Vec2, _: f32, _: u8) -> Vec<hecs::Entity> {
        Vec::new()
    }
}

/// Open air, no geometry at all.
struct Air;
impl WorldQuery for Air {
    fn ray_hit(&self, _: Vec2, _: Vec2, _: f32, _: u8) -> bool {
        false
    }
    fn actors_in_circle(&self, _: Vec2, _: f32, _: u8) -> Vec<hecs::Entity> {
        Vec::new()
    }
}

/// A wall in front, no floor below.
struct WallAhead;
impl WorldQuery for WallAhead {
    fn ray_hit(&self, _: Vec2, dir: Vec2, _: f32, mask: u8) -> bool {
        mask & layers::GROUND != 0 && dir.y == 0.0
    }
    fn actors_in_circle(&self, _: Vec2, _: f32, _: u8) -> Vec<hecs::Entity> {
        Vec::new()
    }
}

/// Grounded with the player in sight; `wall` adds a wall dead ahead.
struct Sighted {
    wall: bool,
}
impl WorldQuery for Sighted {
    fn ray_hit(&self, _: Vec2, dir: Vec2, _: f32, mask: u8) -> bool {
        if mask & layers::PLAYER != 0 {
            return dir.y == 0.0;
        }
        if mask & layers::GROUND != 0 {
            return dir.y < 0.0 || (self.wall && dir.y == 0.0);
        }
        false
    }
    fn actors_in_circle(&self, _: Vec2, _: f32, _: u8) -> Vec<hecs::Entity> {
        Vec::new()
    }
}

fn ready_player(stage: &mut Stage) -> hecs::Entity {
    let actor = stage.spawn_player(Vec2::new(0.0, 0.9), PlayerTuning::default());
    stage.bind_player(actor);
    stage.finish_spawn(actor);
    actor
}

fn vy(stage: &Stage, actor: hecs::Entity) -> f32 {
    stage.world.get::<&Body>(actor).unwrap().velocity.y
}

fn ticks_for(seconds: f32) -> u32 {
    (seconds / DT).ceil() as u32 + 1
}

// ── 1. Testing ground ───────────────────────────────────────────────────

fn validate_testing_ground() -> Vec<TestResult> {
    println!("--- Testing Ground ---");
    let mut results = Vec::new();

    let ground: TestingGround = match serde_json::from_str(GROUND_JSON) {
        Ok(g) => g,
        Err(e) => {
            results.push(check("ground_parse", false, format!("JSON parse error: {}", e)));
            return results;
        }
    };

    results.push(check(
        "ground_has_geometry",
        ground.solids.len() >= 3,
        format!("{} solids loaded", ground.solids.len()),
    ));

    let level = StaticLevel::new(ground.solids.clone());
    let spawns = [
        ("player", ground.player_spawn),
        ("chicken", ground.chicken_spawn),
        ("rino", ground.rino_spawn),
    ];
    for (who, spawn) in spawns {
        let supported = level.ray_hit(spawn, Vec2::DOWN, 2.0);
        let embedded = ground
            .solids
            .iter()
            .any(|s| s.overlaps(&Aabb::new(spawn, Vec2::new(0.1, 0.1))));
        results.push(check(
            &format!("{}_spawn_supported", who),
            supported && !embedded,
            format!("spawn {:?} has ground below and open space", spawn),
        ));
    }

    results
}

// ── 2. Timing windows ───────────────────────────────────────────────────

fn validate_timing_windows() -> Vec<TestResult> {
    println!("--- Timing Windows ---");
    let mut results = Vec::new();

    let mut stamp = EventStamp::unset();
    results.push(check(
        "unset_stamp_outside_all_windows",
        !stamp.within(0.0, f64::MAX),
        "fresh stamp never inside a window".into(),
    ));

    stamp.mark(10.0);
    let strict = stamp.within(10.24, 0.25) && !stamp.within(10.25, 0.25);
    results.push(check(
        "window_boundary_is_strict",
        strict,
        "0.25s window open at 0.24s, closed at 0.25s".into(),
    ));

    // A later event overwrites an earlier unconsumed one.
    stamp.mark(20.0);
    results.push(check(
        "later_mark_overwrites",
        stamp.within(20.2, 0.25) && !stamp.within(20.3, 0.25),
        "single slot remembers only the newest event".into(),
    ));

    let fired_once = stamp.consume(20.1, 0.25) && !stamp.consume(20.1, 0.25);
    results.push(check(
        "consume_fires_exactly_once",
        fired_once,
        "consumed window cannot re-trigger".into(),
    ));

    results
}

// ── 3. Facing ───────────────────────────────────────────────────────────

fn validate_facing() -> Vec<TestResult> {
    println!("--- Facing ---");
    let mut results = Vec::new();

    let signs_match = Facing::Left.sign() == -1.0 && Facing::Right.sign() == 1.0;
    results.push(check(
        "sign_derived_from_direction",
        signs_match,
        "left = -1, right = +1".into(),
    ));

    let round_trip = Facing::Left.flipped() == Facing::Right
        && Facing::Left.flipped().flipped() == Facing::Left;
    results.push(check(
        "double_flip_restores",
        round_trip,
        "flip toggles direction and sign together".into(),
    ));

    results
}

// ── 4. Player machine ───────────────────────────────────────────────────

fn validate_player_machine() -> Vec<TestResult> {
    println!("--- Player Machine ---");
    let mut results = Vec::new();
    let tuning = PlayerTuning::default();

    // Grounded jump, double jump, inert third press.
    {
        let mut stage = Stage::new();
        let actor = ready_player(&mut stage);
        // Start mid-air so the first grounded tick counts as a landing
        // and restores the double-jump charge.
        stage.world.get::<&mut Player>(actor).unwrap().airborne = true;
        stage.tick(&Flat, &InputSnapshot::idle(), DT);
        stage.tick(&Flat, &InputSnapshot::jump(), DT);
        let first = vy(&stage, actor);

        stage.tick(&Air, &InputSnapshot::jump(), DT);
        let second = vy(&stage, actor);
        stage.tick(&Air, &InputSnapshot::jump(), DT);
        let third = vy(&stage, actor);

        results.push(check(
            "grounded_jump_force",
            first == tuning.jump_force,
            format!("velocity.y = {} after grounded press", first),
        ));
        results.push(check(
            "double_jump_spends_charge",
            second == tuning.double_jump_force && third == second,
            format!("second press {} / third press {}", second, third),
        ));
    }

    // Buffered jump inside and outside the window.
    for (label, wait, expect_jump) in [
        ("buffer_inside_window", 0.1_f32, true),
        ("buffer_outside_window", tuning.buffer_jump_window + 0.1, false),
    ] {
        let mut stage = Stage::new();
        let actor = ready_player(&mut stage);
        // Mid-air already: the press can only be banked, never spent on
        // a coyote jump.
        stage.world.get::<&mut Player>(actor).unwrap().airborne = true;
        stage.tick(&Air, &InputSnapshot::jump(), DT);
        for _ in 0..ticks_for(wait) {
            stage.tick(&Air, &InputSnapshot::idle(), DT);
        }
        stage.tick(&Flat, &InputSnapshot::idle(), DT);
        let jumped = vy(&stage, actor) == tuning.jump_force;
        results.push(check(
            label,
            jumped == expect_jump,
            format!("waited {:.2}s, jumped = {}", wait, jumped),
        ));
    }

    // Coyote jump inside and outside the window, single-use.
    {
        let mut stage = Stage::new();
        let actor = ready_player(&mut stage);
        stage.tick(&Flat, &InputSnapshot::idle(), DT);
        stage.world.get::<&mut Body>(actor).unwrap().velocity.y = -1.0;
        stage.tick(&Air, &InputSnapshot::idle(), DT);
        stage.tick(&Air, &InputSnapshot::jump(), DT);
        results.push(check(
            "coyote_inside_window",
            vy(&stage, actor) == tuning.jump_force,
            format!("velocity.y = {}", vy(&stage, actor)),
        ));
    }
    {
        let mut stage = Stage::new();
        let actor = ready_player(&mut stage);
        stage.tick(&Flat, &InputSnapshot::idle(), DT);
        stage.world.get::<&mut Body>(actor).unwrap().velocity.y = -1.0;
        for _ in 0..ticks_for(tuning.coyote_jump_window + 0.1) {
            stage.tick(&Air, &InputSnapshot::idle(), DT);
        }
        stage.tick(&Air, &InputSnapshot::jump(), DT);
        results.push(check(
            "coyote_outside_window",
            vy(&stage, actor) != tuning.jump_force,
            format!("late press left velocity.y = {}", vy(&stage, actor)),
        ));
    }

    // Wall jump pushes away, flips, locks, and the lock restarts.
    {
        let mut stage = Stage::new();
        let actor = ready_player(&mut stage);
        stage.world.get::<&mut Player>(actor).unwrap().airborne = true;
        stage.tick(&WallAhead, &InputSnapshot::jump(), DT);
        let body = (*stage.world.get::<&Body>(actor).unwrap()).clone();
        let pushed = body.velocity.x == -tuning.wall_jump_force.x
            && body.velocity.y == tuning.wall_jump_force.y
            && body.facing == Facing::Left;
        results.push(check(
            "wall_jump_pushes_and_flips",
            pushed,
            format!("velocity {:?}, facing {:?}", body.velocity, body.facing),
        ));

        for _ in 0..ticks_for(tuning.wall_jump_duration) {
            stage.tick(&Air, &InputSnapshot::idle(), DT);
        }
        let unlocked = !stage.world.get::<&Player>(actor).unwrap().wall_jumping;
        results.push(check(
            "wall_jump_lock_expires",
            unlocked,
            format!("lock released after {:.2}s", tuning.wall_jump_duration),
        ));
    }

    // Knockback direction, rejection while active, release.
    {
        let mut stage = Stage::new();
        let actor = ready_player(&mut stage);
        stage.knockback(actor, -5.0);
        let first = (*stage.world.get::<&Body>(actor).unwrap()).clone();
        stage.knockback(actor, 5.0);
        let second = (*stage.world.get::<&Body>(actor).unwrap()).clone();

        results.push(check(
            "knockback_away_from_source",
            first.velocity.x == tuning.knockback_force.x
                && first.velocity.y == tuning.knockback_force.y,
            format!("source on the left gives velocity {:?}", first.velocity),
        ));
        results.push(check(
            "second_knockback_ignored",
            second.velocity == first.velocity,
            "overlapping knockback is a no-op".into(),
        ));

        for _ in 0..ticks_for(tuning.knockback_duration) {
            stage.tick(&Flat, &InputSnapshot::idle(), DT);
        }
        results.push(check(
            "knockback_releases_on_schedule",
            !stage.world.get::<&Player>(actor).unwrap().knocked,
            format!("released after {:.2}s", tuning.knockback_duration),
        ));
    }

    results
}

// ── 5. Enemy behavior ───────────────────────────────────────────────────

fn validate_enemy_behavior() -> Vec<TestResult> {
    println!("--- Enemy Behavior ---");
    let mut results = Vec::new();

    // Chicken aggro window.
    {
        let tuning = ChickenTuning::default();
        let mut stage = Stage::new();
        let chicken = stage.spawn_chicken(Vec2::new(0.0, 0.4), tuning);

        stage.tick(&Sighted { wall: false }, &InputSnapshot::idle(), DT);
        let chasing = matches!(&*stage.world.get::<&Brain>(chicken).unwrap(),
            Brain::Chicken(s) if s.can_move);

        for _ in 0..ticks_for(tuning.aggro_duration) {
            stage.tick(&Flat, &InputSnapshot::idle(), DT);
        }
        let lapsed = matches!(&*stage.world.get::<&Brain>(chicken).unwrap(),
            Brain::Chicken(s) if !s.can_move);

        stage.tick(&Sighted { wall: false }, &InputSnapshot::idle(), DT);
        let rearmed = matches!(&*stage.world.get::<&Brain>(chicken).unwrap(),
            Brain::Chicken(s) if s.can_move);

        results.push(check(
            "chicken_aggro_window",
            chasing && lapsed && rearmed,
            format!(
                "chase on sight = {}, lapse after {:.1}s = {}, re-sight = {}",
                chasing, tuning.aggro_duration, lapsed, rearmed
            ),
        ));
    }

    // Rino ramp stays under the ceiling and resets on the wall slam.
    {
        let tuning = RinoTuning::default();
        let mut stage = Stage::new();
        let rino = stage.spawn_rino(Vec2::new(0.0, 0.4), tuning);
        stage.world.get::<&mut Body>(rino).unwrap().facing = Facing::Right;

        let mut monotone = true;
        let mut capped = true;
        let mut last = 0.0_f32;
        for _ in 0..2000 {
            stage.tick(&Sighted { wall: false }, &InputSnapshot::idle(), DT);
            if let Brain::Rino(s) = &*stage.world.get::<&Brain>(rino).unwrap() {
                monotone &= s.current_speed >= last;
                capped &= s.current_speed <= tuning.max_speed;
                last = s.current_speed;
            }
        }
        results.push(check(
            "rino_ramp_monotone_and_capped",
            monotone && capped && last == tuning.max_speed,
            format!("speed ramped to {} (ceiling {})", last, tuning.max_speed),
        ));

        stage.tick(&Sighted { wall: true }, &InputSnapshot::idle(), DT);
        let body = (*stage.world.get::<&Body>(rino).unwrap()).clone();
        let slammed = body.velocity.x == -tuning.impact_power.x
            && body.velocity.y == tuning.impact_power.y;
        let reset = matches!(&*stage.world.get::<&Brain>(rino).unwrap(),
            Brain::Rino(s) if s.stunned && !s.can_move && s.current_speed == tuning.base.move_speed);
        results.push(check(
            "rino_wall_slam",
            slammed && reset,
            format!("impact velocity {:?}, speed reset = {}", body.velocity, reset),
        ));

        for _ in 0..ticks_for(tuning.charge_recovery_delay) {
            stage.tick(&Air, &InputSnapshot::idle(), DT);
        }
        let recovered = stage.world.get::<&Body>(rino).unwrap().facing == Facing::Left
            && matches!(&*stage.world.get::<&Brain>(rino).unwrap(), Brain::Rino(s) if !s.stunned);
        results.push(check(
            "rino_recovery_turns_around",
            recovered,
            format!("faces away from the wall after {:.1}s", tuning.charge_recovery_delay),
        ));
    }

    // Shared death rule.
    {
        let tuning = ChickenTuning::default();
        let mut stage = Stage::new();
        let chicken = stage.spawn_chicken(Vec2::new(0.0, 0.4), tuning);
        stage.kill(chicken);

        let body = (*stage.world.get::<&Body>(chicken).unwrap()).clone();
        let well_formed = body.dead
            && !body.surfaces_enabled
            && body.velocity.y == tuning.base.death_impact
            && body.spin_rate.abs() == tuning.base.death_spin_rate;
        let reported = stage
            .drain_lifecycle()
            .iter()
            .any(|ev| matches!(ev, LifecycleEvent::EnemyDied { actor } if *actor == chicken));
        let flinched = stage.drain_anim().iter().any(|cmd| {
            matches!(cmd, AnimCommand::Trigger { actor, param }
                if *actor == chicken && *param == anim_params::HIT)
        });
        results.push(check(
            "enemy_death_rule",
            well_formed && reported && flinched,
            format!(
                "dead = {}, pop = {}, spin = {}",
                body.dead, body.velocity.y, body.spin_rate
            ),
        ));

        // Corpse spins, nothing else runs.
        stage.tick(&Sighted { wall: false }, &InputSnapshot::idle(), DT);
        let corpse = (*stage.world.get::<&Body>(chicken).unwrap()).clone();
        results.push(check(
            "corpse_only_spins",
            corpse.rotation != 0.0 && corpse.velocity.x == 0.0,
            format!("rotation {:.2} deg after one tick", corpse.rotation),
        ));
    }

    results
}

// ── 6. Full run on the testing ground ───────────────────────────────────

fn validate_full_run() -> Vec<TestResult> {
    println!("--- Full Run ---");
    let mut results = Vec::new();

    let ground: TestingGround = match serde_json::from_str(GROUND_JSON) {
        Ok(g) => g,
        Err(_) => return results, // already reported by group 1
    };
    let rig = Rig::new(StaticLevel::new(ground.solids.clone()));

    let mut stage = Stage::new();
    let player = stage.spawn_player(ground.player_spawn, PlayerTuning::default());
    stage.bind_player(player);
    stage.finish_spawn(player);
    let chicken = stage.spawn_chicken(ground.chicken_spawn, ChickenTuning::default());
    let rino = stage.spawn_rino(ground.rino_spawn, RinoTuning::default());

    let rino_max = RinoTuning::default().max_speed;
    let mut exclusive = true;
    let mut capped = true;
    let mut chicken_on_platform = true;
    let seconds = 12.0_f32;
    let total = ticks_for(seconds);

    for frame in 0..total {
        // Walk back and forth, hop every second or so.
        let dir = if (frame / 180) % 2 == 0 { 1.0 } else { -1.0 };
        let input = if frame % 60 == 30 {
            InputSnapshot::jump()
        } else {
            InputSnapshot::walk(dir)
        };
        rig.step(&mut stage, input);

        let body = (*stage.world.get::<&Body>(player).unwrap()).clone();
        let control = (*stage.world.get::<&Player>(player).unwrap()).clone();
        exclusive &= control.airborne == !body.probes.grounded;

        if let Brain::Rino(s) = &*stage.world.get::<&Brain>(rino).unwrap() {
            capped &= s.current_speed <= rino_max;
        }
        let coop = stage.world.get::<&Body>(chicken).unwrap();
        if !coop.dead {
            // The patrol platform runs from x = 2 to 6.
            chicken_on_platform &= coop.position.x > 1.0 && coop.position.x < 7.0;
        }
    }

    results.push(check(
        "grounded_airborne_exclusive",
        exclusive,
        format!("held over {} frames", total),
    ));
    results.push(check(
        "rino_speed_never_exceeds_ceiling",
        capped,
        format!("ceiling {} held for the whole run", rino_max),
    ));
    results.push(check(
        "chicken_stays_on_its_platform",
        chicken_on_platform,
        "ledge turnarounds kept the patrol on the platform".into(),
    ));
    results.push(check(
        "player_survived_the_run",
        !stage.world.get::<&Body>(player).unwrap().dead,
        format!("{:.0}s of mixed input without a death", seconds),
    ));

    // The outbox kept streaming animation parameters.
    let anim = stage.drain_anim();
    results.push(check(
        "animation_sync_streams",
        !anim.is_empty(),
        format!("{} queued parameter updates at run end", anim.len()),
    ));

    results
}
