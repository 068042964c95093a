//! Outbound notifications: animation parameter updates and lifecycle
//! events.
//!
//! The core never calls into the host. Systems push fire-and-forget
//! commands into the [`Outbox`] and the host drains both queues after
//! each tick, in push order. The core does not wait for or observe any
//! response.

use hecs::Entity;
use thicket_logic::geometry::Vec2;

/// Semantic animation parameter names shared with the presentation layer.
pub mod anim_params {
    pub const X_VELOCITY: &str = "x-velocity";
    pub const Y_VELOCITY: &str = "y-velocity";
    pub const IS_GROUNDED: &str = "is-grounded";
    pub const IS_WALL_DETECTED: &str = "is-wall-detected";
    pub const IS_KNOCKED: &str = "is-knocked";
    /// Rino wall-impact stun loop.
    pub const HIT_WALL: &str = "hit-wall";
    /// One-shot death flinch.
    pub const HIT: &str = "hit";
}

/// One animation parameter update for one actor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AnimCommand {
    SetFloat {
        actor: Entity,
        param: &'static str,
        value: f32,
    },
    SetFlag {
        actor: Entity,
        param: &'static str,
        value: bool,
    },
    Trigger {
        actor: Entity,
        param: &'static str,
    },
}

/// Actor lifecycle notifications. The host owns despawning; the core
/// only reports.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LifecycleEvent {
    /// The player died; the host runs its respawn flow.
    PlayerDied { actor: Entity, position: Vec2 },
    /// An enemy died, by stomp or by a scripted kill.
    EnemyDied { actor: Entity },
    /// The kill was a player stomp. Follows the `EnemyDied` event for
    /// the same actor in the queue.
    EnemyStomped { actor: Entity },
}

/// Per-tick queues drained by the host.
#[derive(Debug, Default)]
pub struct Outbox {
    anim: Vec<AnimCommand>,
    lifecycle: Vec<LifecycleEvent>,
}

impl Outbox {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_float(&mut self, actor: Entity, param: &'static str, value: f32) {
        self.anim.push(AnimCommand::SetFloat { actor, param, value });
    }

    pub fn set_flag(&mut self, actor: Entity, param: &'static str, value: bool) {
        self.anim.push(AnimCommand::SetFlag { actor, param, value });
    }

    pub fn trigger(&mut self, actor: Entity, param: &'static str) {
        self.anim.push(AnimCommand::Trigger { actor, param });
    }

    pub fn lifecycle(&mut self, event: LifecycleEvent) {
        self.lifecycle.push(event);
    }

    /// Take all queued animation commands, oldest first.
    pub fn drain_anim(&mut self) -> Vec<AnimCommand> {
        std::mem::take(&mut self.anim)
    }

    /// Take all queued lifecycle events, oldest first.
    pub fn drain_lifecycle(&mut self) -> Vec<LifecycleEvent> {
        std::mem::take(&mut self.lifecycle)
    }
}
