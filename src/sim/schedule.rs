//! Cooperative task scheduling
//!
//! Recurring work is registered under a key naming the entity it belongs to.
//! The owner of the scheduler asks for the keys that are due, checks each
//! one's liveness, and either runs it or cancels it. A due task runs at most
//! once per [`Scheduler::take_due`] call and is re-armed one period later.

use serde::{Deserialize, Serialize};

use super::state::{BotId, Millis, ProjectileId};

/// What a recurring task drives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaskKey {
    /// Ship motion on the frame clock
    Motion,
    /// One in-flight projectile on the frame clock
    Projectile(ProjectileId),
    /// One bot's decision loop on the AI clock
    Bot(BotId),
}

#[derive(Debug, Clone)]
struct Task {
    key: TaskKey,
    period_ms: Millis,
    next_due_ms: Millis,
}

/// Tasks in registration order
#[derive(Debug, Clone, Default)]
pub struct Scheduler {
    tasks: Vec<Task>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `key` to first run at `first_due_ms`, then every `period_ms`.
    ///
    /// Re-registering an existing key replaces its timing.
    pub fn schedule(&mut self, key: TaskKey, period_ms: Millis, first_due_ms: Millis) {
        self.cancel(key);
        self.tasks.push(Task {
            key,
            period_ms,
            next_due_ms: first_due_ms,
        });
    }

    pub fn cancel(&mut self, key: TaskKey) {
        self.tasks.retain(|t| t.key != key);
    }

    pub fn clear(&mut self) {
        self.tasks.clear();
    }

    pub fn is_scheduled(&self, key: TaskKey) -> bool {
        self.tasks.iter().any(|t| t.key == key)
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Keys due at `now`, in registration order, each re-armed for `now + period`
    pub fn take_due(&mut self, now: Millis) -> Vec<TaskKey> {
        let mut due = Vec::new();
        for task in &mut self.tasks {
            if task.next_due_ms <= now {
                task.next_due_ms = now + task.period_ms;
                due.push(task.key);
            }
        }
        due
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_runs_once_per_call_without_catch_up() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule(TaskKey::Bot(BotId(1)), 1000, 1000);

        assert!(scheduler.take_due(999).is_empty());
        assert_eq!(scheduler.take_due(5000), vec![TaskKey::Bot(BotId(1))]);
        // Re-armed relative to the late run
        assert!(scheduler.take_due(5999).is_empty());
        assert_eq!(scheduler.take_due(6000).len(), 1);
    }

    #[test]
    fn test_registration_order_is_kept() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule(TaskKey::Motion, 16, 0);
        scheduler.schedule(TaskKey::Projectile(ProjectileId(3)), 16, 0);
        scheduler.schedule(TaskKey::Bot(BotId(1)), 1000, 0);
        assert_eq!(
            scheduler.take_due(0),
            vec![
                TaskKey::Motion,
                TaskKey::Projectile(ProjectileId(3)),
                TaskKey::Bot(BotId(1))
            ]
        );
    }

    #[test]
    fn test_cancelled_task_never_runs() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule(TaskKey::Projectile(ProjectileId(1)), 16, 0);
        scheduler.cancel(TaskKey::Projectile(ProjectileId(1)));
        assert!(scheduler.take_due(100).is_empty());
        assert!(!scheduler.is_scheduled(TaskKey::Projectile(ProjectileId(1))));
    }

    #[test]
    fn test_reschedule_replaces() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule(TaskKey::Motion, 16, 0);
        scheduler.schedule(TaskKey::Motion, 16, 100);
        assert_eq!(scheduler.len(), 1);
        assert!(scheduler.take_due(50).is_empty());
    }
}
