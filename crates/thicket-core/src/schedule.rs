//! Deferred one-shot actions on the simulation clock.
//!
//! Every "do X after N seconds" in the sim goes through here instead of
//! ad-hoc countdown fields: wall-jump lock expiry, knockback and push
//! release, the chicken's delayed flip, the rino's stun recovery. Tasks
//! are keyed by actor and purpose so they can be replaced or canceled
//! explicitly, and the engine applies the due ones at the top of each
//! tick.

use hecs::Entity;

/// What a scheduled task does when it comes due.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskKind {
    /// Unlock horizontal control after a wall jump.
    WallJumpRelease,
    /// End a knockback and hand control back.
    KnockbackRelease,
    /// End a scripted push and hand control back.
    PushRelease,
    /// Execute a chicken's delayed flip toward the player.
    GuardedFlip,
    /// End a rino's wall stun and turn it around.
    ChargeRecovery,
}

#[derive(Debug, Clone, Copy)]
pub struct Task {
    pub actor: Entity,
    pub kind: TaskKind,
    pub due: f64,
}

/// One-shot task queue. Scheduling the same (actor, kind) again replaces
/// the pending deadline.
#[derive(Debug, Default)]
pub struct Scheduler {
    tasks: Vec<Task>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `kind` for `actor` at the absolute sim time `due`. A
    /// pending task with the same key is superseded.
    pub fn schedule(&mut self, actor: Entity, kind: TaskKind, due: f64) {
        self.cancel(actor, kind);
        self.tasks.push(Task { actor, kind, due });
    }

    /// Drop a pending task. Returns whether one was pending.
    pub fn cancel(&mut self, actor: Entity, kind: TaskKind) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|t| !(t.actor == actor && t.kind == kind));
        self.tasks.len() != before
    }

    /// Drop every pending task for `actor`.
    pub fn cancel_all(&mut self, actor: Entity) {
        self.tasks.retain(|t| t.actor != actor);
    }

    pub fn is_scheduled(&self, actor: Entity, kind: TaskKind) -> bool {
        self.tasks.iter().any(|t| t.actor == actor && t.kind == kind)
    }

    /// Remove and return every task due at or before `now`, earliest
    /// deadline first.
    pub fn drain_due(&mut self, now: f64) -> Vec<Task> {
        let mut due: Vec<Task> = Vec::new();
        let mut i = 0;
        while i < self.tasks.len() {
            if self.tasks[i].due <= now {
                due.push(self.tasks.swap_remove(i));
            } else {
                i += 1;
            }
        }
        due.sort_by(|a, b| a.due.total_cmp(&b.due));
        due
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hecs::World;

    fn two_actors() -> (Entity, Entity) {
        let mut world = World::new();
        (world.spawn(()), world.spawn(()))
    }

    #[test]
    fn test_drain_returns_due_in_deadline_order() {
        let (a, b) = two_actors();
        let mut sched = Scheduler::new();
        sched.schedule(a, TaskKind::KnockbackRelease, 2.0);
        sched.schedule(b, TaskKind::ChargeRecovery, 1.0);
        sched.schedule(a, TaskKind::WallJumpRelease, 5.0);

        let due = sched.drain_due(3.0);
        assert_eq!(due.len(), 2);
        assert_eq!(due[0].kind, TaskKind::ChargeRecovery);
        assert_eq!(due[1].kind, TaskKind::KnockbackRelease);
        assert_eq!(sched.len(), 1);
        assert!(sched.is_scheduled(a, TaskKind::WallJumpRelease));
    }

    #[test]
    fn test_reschedule_replaces_pending() {
        let (a, _) = two_actors();
        let mut sched = Scheduler::new();
        sched.schedule(a, TaskKind::WallJumpRelease, 1.0);
        sched.schedule(a, TaskKind::WallJumpRelease, 4.0);

        assert!(sched.drain_due(2.0).is_empty());
        let due = sched.drain_due(4.0);
        assert_eq!(due.len(), 1);
        assert!(sched.is_empty());
    }

    #[test]
    fn test_cancel_all_spares_other_actors() {
        let (a, b) = two_actors();
        let mut sched = Scheduler::new();
        sched.schedule(a, TaskKind::WallJumpRelease, 1.0);
        sched.schedule(a, TaskKind::KnockbackRelease, 2.0);
        sched.schedule(b, TaskKind::GuardedFlip, 1.5);

        sched.cancel_all(a);
        assert_eq!(sched.len(), 1);
        assert!(sched.is_scheduled(b, TaskKind::GuardedFlip));
    }

    #[test]
    fn test_cancel_reports_whether_pending() {
        let (a, _) = two_actors();
        let mut sched = Scheduler::new();
        sched.schedule(a, TaskKind::GuardedFlip, 1.0);
        assert!(sched.cancel(a, TaskKind::GuardedFlip));
        assert!(!sched.cancel(a, TaskKind::GuardedFlip));
    }

    #[test]
    fn test_due_exactly_now_fires() {
        let (a, _) = two_actors();
        let mut sched = Scheduler::new();
        sched.schedule(a, TaskKind::PushRelease, 1.0);
        assert_eq!(sched.drain_due(1.0).len(), 1);
    }
}
