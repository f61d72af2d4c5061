//! Frame-driven timers with explicit cancellation.
//!
//! Nothing here reads a wall clock; owners advance time by the frame `dt`.
//! Delayed work is stamped with the [`Generation`] that created it so a mode
//! change can invalidate everything scheduled by the previous activation.

use smallvec::SmallVec;

/// Identifies one activation of a mode. Strictly increasing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Generation(u64);

impl Generation {
    #[must_use]
    pub fn next(self) -> Self {
        Generation(self.0 + 1)
    }
}

/// Fixed-period repeating timer.
#[derive(Clone, Debug)]
pub struct Interval {
    period: f32,
    accumulated: f32,
}

impl Interval {
    pub fn new(period: f32) -> Self {
        Self {
            period: period.max(f32::EPSILON),
            accumulated: 0.0,
        }
    }

    /// Advance by `dt` and return how many periods elapsed.
    pub fn tick(&mut self, dt: f32) -> u32 {
        self.accumulated += dt.max(0.0);
        let mut fired = 0;
        while self.accumulated >= self.period {
            self.accumulated -= self.period;
            fired += 1;
        }
        fired
    }

    pub fn reset(&mut self) {
        self.accumulated = 0.0;
    }
}

#[derive(Clone, Debug)]
struct Pending<T> {
    due: f32,
    generation: Generation,
    payload: T,
}

/// Delayed one-shot payloads keyed by generation.
#[derive(Clone, Debug)]
pub struct TaskQueue<T> {
    now: f32,
    pending: Vec<Pending<T>>,
}

impl<T> Default for TaskQueue<T> {
    fn default() -> Self {
        Self {
            now: 0.0,
            pending: Vec::new(),
        }
    }
}

impl<T> TaskQueue<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, delay: f32, generation: Generation, payload: T) {
        self.pending.push(Pending {
            due: self.now + delay.max(0.0),
            generation,
            payload,
        });
    }

    /// Advance the queue clock and return every payload that came due for
    /// `current`. Payloads from other generations are dropped unfired.
    pub fn advance(&mut self, dt: f32, current: Generation) -> SmallVec<[T; 8]> {
        self.now += dt.max(0.0);
        let now = self.now;
        let mut due = SmallVec::new();
        let mut i = 0;
        while i < self.pending.len() {
            let p = &self.pending[i];
            if p.generation != current {
                self.pending.swap_remove(i);
            } else if p.due <= now {
                due.push(self.pending.swap_remove(i).payload);
            } else {
                i += 1;
            }
        }
        due
    }

    pub fn cancel_all(&mut self) {
        self.pending.clear();
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interval_counts_whole_periods() {
        let mut iv = Interval::new(0.5);
        assert_eq!(iv.tick(0.2), 0);
        assert_eq!(iv.tick(0.4), 1);
        assert_eq!(iv.tick(1.1), 2);
        iv.reset();
        assert_eq!(iv.tick(0.49), 0);
    }

    #[test]
    fn stale_generation_never_fires() {
        let g0 = Generation::default();
        let g1 = g0.next();
        let mut q = TaskQueue::new();
        q.schedule(0.1, g0, "old");
        q.schedule(0.1, g1, "new");
        let fired = q.advance(1.0, g1);
        assert_eq!(fired.as_slice(), &["new"]);
        assert!(q.is_empty());
    }

    #[test]
    fn payloads_wait_until_due() {
        let g = Generation::default();
        let mut q = TaskQueue::new();
        q.schedule(0.5, g, 1);
        assert!(q.advance(0.3, g).is_empty());
        assert_eq!(q.len(), 1);
        assert_eq!(q.advance(0.3, g).as_slice(), &[1]);
    }
}
