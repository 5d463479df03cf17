//! Cooperative round scheduler
//!
//! Replaces free-running interval timers with one logical timeline the round
//! controller advances explicitly. Tasks are data, not callbacks: `advance`
//! reports what came due and the controller applies every state change
//! itself, so no timer can observe a half-updated tick.

/// Cancellation handle for a scheduled task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskId(u64);

/// What to do when a task fires. Indices refer to the round's target list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskKind {
    /// One patrol step for the target at this index
    TargetMove(usize),
    /// One rise step for the in-flight projectile
    ProjectileRise,
    /// One-second countdown tick
    Countdown,
    /// Clear a hit target's explosion sprite
    ExplosionClear(usize),
    /// Re-enter a hit target into the field
    Respawn(usize),
}

#[derive(Debug, Clone)]
struct Task {
    id: TaskId,
    kind: TaskKind,
    due: u64,
    period: Option<u64>,
}

/// Single-timeline task scheduler with explicit cancellation.
///
/// Task counts are tiny (one per target plus a handful of timers), so a flat
/// vector beats a queue here.
#[derive(Debug, Default)]
pub struct Scheduler {
    now_ms: u64,
    next_id: u64,
    tasks: Vec<Task>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current position on the logical timeline.
    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Schedule `kind` every `period_ms`, first firing one period from now.
    pub fn every(&mut self, period_ms: u64, kind: TaskKind) -> TaskId {
        debug_assert!(period_ms > 0);
        self.push(kind, self.now_ms + period_ms, Some(period_ms))
    }

    /// Schedule `kind` once, `delay_ms` from now.
    pub fn once(&mut self, delay_ms: u64, kind: TaskKind) -> TaskId {
        self.push(kind, self.now_ms + delay_ms, None)
    }

    fn push(&mut self, kind: TaskKind, due: u64, period: Option<u64>) -> TaskId {
        self.next_id += 1;
        let id = TaskId(self.next_id);
        self.tasks.push(Task { id, kind, due, period });
        id
    }

    /// Cancel a task; returns whether it was still scheduled.
    pub fn cancel(&mut self, id: TaskId) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.id != id);
        self.tasks.len() != before
    }

    /// Drop every outstanding task.
    pub fn clear(&mut self) {
        self.tasks.clear();
    }

    /// Number of outstanding tasks.
    pub fn pending(&self) -> usize {
        self.tasks.len()
    }

    /// Advance the timeline by `elapsed_ms`, returning fired tasks in
    /// (due time, schedule order) order. A periodic task fires as many times
    /// as its period fits into the window; a one-shot fires once and is gone.
    pub fn advance(&mut self, elapsed_ms: u64) -> Vec<TaskKind> {
        let deadline = self.now_ms + elapsed_ms;
        let mut fired = Vec::new();

        loop {
            let next = self
                .tasks
                .iter()
                .enumerate()
                .filter(|(_, t)| t.due <= deadline)
                .min_by_key(|(_, t)| (t.due, t.id.0))
                .map(|(i, _)| i);
            let Some(i) = next else { break };

            fired.push(self.tasks[i].kind);
            match self.tasks[i].period {
                Some(period) => self.tasks[i].due += period,
                None => {
                    self.tasks.swap_remove(i);
                }
            }
        }

        self.now_ms = deadline;
        fired
    }
}
