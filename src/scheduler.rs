// SPDX-License-Identifier: MPL-2.0
//! Deferred-callback scheduling consumed by the controller.
//!
//! Two primitives are needed: "run before the next paint" (so an opacity
//! change is observed as a transition) and "run after a fixed delay" (so the
//! fade-out can finish before the overlay leaves the layout). Both are
//! fire-and-forget; staleness is handled by the caller's generation guard.
//!
//! [`ManualScheduler`] is host-driven: the host runs frames and advances a
//! monotonic clock explicitly, which keeps every test deterministic.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::fmt;
use std::time::Duration;

/// A deferred callback.
pub type Task = Box<dyn FnOnce()>;

pub trait Scheduler {
    /// Runs `task` right before the next rendering frame.
    fn request_frame(&self, task: Task);

    /// Runs `task` once `delay` has elapsed.
    fn set_timeout(&self, delay: Duration, task: Task);
}

struct Timer {
    due: Duration,
    seq: u64,
    task: Task,
}

/// Deterministic scheduler whose frames and clock are driven by the host.
#[derive(Default)]
pub struct ManualScheduler {
    now: Cell<Duration>,
    seq: Cell<u64>,
    frames: RefCell<VecDeque<Task>>,
    timers: RefCell<Vec<Timer>>,
}

impl fmt::Debug for ManualScheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ManualScheduler")
            .field("now", &self.now.get())
            .field("pending_frames", &self.pending_frames())
            .field("pending_timers", &self.pending_timers())
            .finish()
    }
}

impl ManualScheduler {
    /// Creates a scheduler whose clock starts at `0`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current monotonic time.
    #[must_use]
    pub fn now(&self) -> Duration {
        self.now.get()
    }

    #[must_use]
    pub fn pending_frames(&self) -> usize {
        self.frames.borrow().len()
    }

    #[must_use]
    pub fn pending_timers(&self) -> usize {
        self.timers.borrow().len()
    }

    /// Runs every task queued before this call. Tasks queued while running
    /// wait for the following frame. Returns how many ran.
    pub fn run_frame(&self) -> usize {
        let batch: Vec<Task> = self.frames.borrow_mut().drain(..).collect();
        let count = batch.len();
        for task in batch {
            task();
        }
        count
    }

    /// Advances the clock by `dt`, running due timers in deadline order.
    /// Returns how many ran.
    pub fn advance(&self, dt: Duration) -> usize {
        let target = self.now.get().saturating_add(dt);
        let mut ran = 0;
        while let Some(timer) = self.pop_due(target) {
            self.now.set(timer.due);
            (timer.task)();
            ran += 1;
        }
        self.now.set(target);
        ran
    }

    /// Runs a frame and then flushes every pending timer, however far away.
    pub fn run_until_idle(&self) -> usize {
        let mut ran = self.run_frame();
        loop {
            let next_due = self.timers.borrow().iter().map(|t| t.due).min();
            match next_due {
                Some(due) => ran += self.advance(due.saturating_sub(self.now.get())),
                None => break,
            }
            ran += self.run_frame();
        }
        ran
    }

    fn pop_due(&self, target: Duration) -> Option<Timer> {
        let mut timers = self.timers.borrow_mut();
        let position = timers
            .iter()
            .enumerate()
            .filter(|(_, t)| t.due <= target)
            .min_by_key(|(_, t)| (t.due, t.seq))
            .map(|(i, _)| i)?;
        Some(timers.swap_remove(position))
    }
}

impl Scheduler for ManualScheduler {
    fn request_frame(&self, task: Task) {
        self.frames.borrow_mut().push_back(task);
    }

    fn set_timeout(&self, delay: Duration, task: Task) {
        let seq = self.seq.get();
        self.seq.set(seq + 1);
        self.timers.borrow_mut().push(Timer {
            due: self.now.get().saturating_add(delay),
            seq,
            task,
        });
    }
}
