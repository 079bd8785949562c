//! Deferred transitions on virtual time.
//!
//! The engine never sleeps. Anything that must happen "later" (resolving a
//! revealed pair, raising the win flag) is queued here with a due time and
//! the generation of the round that queued it. Callers advance the queue with
//! elapsed milliseconds and receive the tasks that came due, oldest first.

use arrayvec::ArrayVec;

/// Upper bound on simultaneously pending tasks.
///
/// A round has at most one pending resolution and one pending win flag.
pub const MAX_PENDING: usize = 4;

/// Work the engine defers until a delay has elapsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Deferred {
    /// Compare the two selected cards and apply the outcome
    ResolveSelection,
    /// Raise the win flag after the final match
    FinalizeWin,
}

/// A task that came due.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DueTask {
    pub generation: u64,
    pub task: Deferred,
}

#[derive(Debug, Clone, Copy)]
struct Scheduled {
    due_ms: u64,
    seq: u64,
    generation: u64,
    task: Deferred,
}

#[derive(Debug, Clone, Default)]
pub struct Scheduler {
    now_ms: u64,
    next_seq: u64,
    pending: ArrayVec<Scheduled, MAX_PENDING>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time in milliseconds.
    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_idle(&self) -> bool {
        self.pending.is_empty()
    }

    /// Milliseconds until the earliest pending task, if any.
    pub fn next_due_in(&self) -> Option<u64> {
        self.pending
            .iter()
            .map(|s| s.due_ms.saturating_sub(self.now_ms))
            .min()
    }

    /// Queue `task` to come due after `delay_ms`.
    ///
    /// Returns `false` (and drops the task) when the queue is full.
    pub fn schedule(&mut self, delay_ms: u32, generation: u64, task: Deferred) -> bool {
        let scheduled = Scheduled {
            due_ms: self.now_ms + u64::from(delay_ms),
            seq: self.next_seq,
            generation,
            task,
        };
        if self.pending.try_push(scheduled).is_err() {
            return false;
        }
        self.next_seq = self.next_seq.wrapping_add(1);
        true
    }

    /// Drop every pending task.
    pub fn cancel_all(&mut self) -> usize {
        let n = self.pending.len();
        self.pending.clear();
        n
    }

    /// Pop the earliest task due at or before `end_ms`, moving virtual time
    /// to its due time. Ties are broken by scheduling order.
    ///
    /// Tasks scheduled while handling a popped task are timed from that
    /// task's due time, so chained delays never absorb the rest of a step.
    pub fn pop_due(&mut self, end_ms: u64) -> Option<DueTask> {
        let (idx, _) = self
            .pending
            .iter()
            .enumerate()
            .filter(|(_, s)| s.due_ms <= end_ms)
            .min_by_key(|(_, s)| (s.due_ms, s.seq))?;
        let s = self.pending.remove(idx);
        self.now_ms = self.now_ms.max(s.due_ms);
        Some(DueTask {
            generation: s.generation,
            task: s.task,
        })
    }

    /// Move virtual time forward to `end_ms` without firing anything.
    pub fn advance_to(&mut self, end_ms: u64) {
        self.now_ms = self.now_ms.max(end_ms);
    }

    /// Advance virtual time and return the tasks that came due, in due order
    /// (ties broken by scheduling order).
    pub fn advance(&mut self, elapsed_ms: u32) -> ArrayVec<DueTask, MAX_PENDING> {
        let end = self.now_ms + u64::from(elapsed_ms);
        let mut due = ArrayVec::new();
        while let Some(task) = self.pop_due(end) {
            due.push(task);
        }
        self.advance_to(end);
        due
    }
}
