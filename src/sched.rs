//! Deterministic timer scheduler
//!
//! Games never touch ambient timers. Each game owns a `Scheduler` holding
//! one-shot and repeating timers with cancellable handles, and the host
//! drives it with real or synthetic timestamps (`advance_to`). Due timers
//! fire in deadline order; a cancelled handle never fires again. This keeps
//! timer behavior reproducible in tests and makes teardown a single
//! `clear()` with no orphaned callbacks.

/// Handle to a scheduled timer. Stale handles (already fired one-shots,
/// cancelled timers) are simply ignored by `cancel`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerHandle(u64);

#[derive(Debug, Clone)]
struct TimerEntry<E> {
    id: u64,
    deadline_ms: f64,
    /// Repeat period; `None` for one-shot timers
    period_ms: Option<f64>,
    event: E,
}

/// Minimum repeat period, prevents a zero-period timer from spinning forever
const MIN_PERIOD_MS: f64 = 1.0;

/// A deterministic, host-driven timer queue
#[derive(Debug, Clone)]
pub struct Scheduler<E> {
    now_ms: f64,
    next_id: u64,
    entries: Vec<TimerEntry<E>>,
}

impl<E: Copy> Scheduler<E> {
    /// Create a scheduler anchored at the given host timestamp
    pub fn new(now_ms: f64) -> Self {
        Self {
            now_ms,
            next_id: 1,
            entries: Vec::new(),
        }
    }

    /// Current scheduler time (last timestamp passed to `advance_to`)
    pub fn now_ms(&self) -> f64 {
        self.now_ms
    }

    fn alloc_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Schedule a one-shot timer `delay_ms` from now
    pub fn schedule(&mut self, delay_ms: f64, event: E) -> TimerHandle {
        let id = self.alloc_id();
        self.entries.push(TimerEntry {
            id,
            deadline_ms: self.now_ms + delay_ms.max(0.0),
            period_ms: None,
            event,
        });
        TimerHandle(id)
    }

    /// Schedule a repeating timer firing every `period_ms`, first at
    /// `now + period_ms`
    pub fn schedule_repeating(&mut self, period_ms: f64, event: E) -> TimerHandle {
        let period = period_ms.max(MIN_PERIOD_MS);
        let id = self.alloc_id();
        self.entries.push(TimerEntry {
            id,
            deadline_ms: self.now_ms + period,
            period_ms: Some(period),
            event,
        });
        TimerHandle(id)
    }

    /// Cancel a timer. Returns false for stale/unknown handles.
    pub fn cancel(&mut self, handle: TimerHandle) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.id != handle.0);
        self.entries.len() != before
    }

    /// True if the handle refers to a live timer
    pub fn is_scheduled(&self, handle: TimerHandle) -> bool {
        self.entries.iter().any(|e| e.id == handle.0)
    }

    /// Drop all timers (atomic teardown)
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Advance to the host timestamp, returning every event whose deadline
    /// passed, in deadline order (ties break by scheduling order). Repeating
    /// timers are rescheduled from their own deadline, not from `now_ms`, so
    /// long host frames do not drift the period.
    pub fn advance_to(&mut self, now_ms: f64) -> Vec<E> {
        // Time never runs backwards; a stale host timestamp is a no-op
        if now_ms > self.now_ms {
            self.now_ms = now_ms;
        }

        let mut fired = Vec::new();
        loop {
            let due = self
                .entries
                .iter()
                .enumerate()
                .filter(|(_, e)| e.deadline_ms <= self.now_ms)
                .min_by(|(_, a), (_, b)| {
                    a.deadline_ms
                        .partial_cmp(&b.deadline_ms)
                        .unwrap_or(std::cmp::Ordering::Equal)
                        .then(a.id.cmp(&b.id))
                })
                .map(|(i, _)| i);

            let Some(i) = due else { break };
            fired.push(self.entries[i].event);
            match self.entries[i].period_ms {
                Some(period) => self.entries[i].deadline_ms += period,
                None => {
                    let _ = self.entries.swap_remove(i);
                }
            }
        }
        fired
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Tick {
        Fast,
        Slow,
    }

    #[test]
    fn test_one_shot_fires_once() {
        let mut sched = Scheduler::new(0.0);
        let h = sched.schedule(100.0, Tick::Fast);
        assert!(sched.is_scheduled(h));
        assert_eq!(sched.advance_to(99.0), vec![]);
        assert_eq!(sched.advance_to(100.0), vec![Tick::Fast]);
        assert!(!sched.is_scheduled(h));
        assert_eq!(sched.advance_to(500.0), vec![]);
    }

    #[test]
    fn test_repeating_catches_up_without_drift() {
        let mut sched = Scheduler::new(0.0);
        let _ = sched.schedule_repeating(100.0, Tick::Fast);
        // One long host frame spans three periods
        assert_eq!(
            sched.advance_to(310.0),
            vec![Tick::Fast, Tick::Fast, Tick::Fast]
        );
        // Next deadline is 400, anchored to the period grid
        assert_eq!(sched.advance_to(399.0), vec![]);
        assert_eq!(sched.advance_to(400.0), vec![Tick::Fast]);
    }

    #[test]
    fn test_deadline_order_with_tie_break() {
        let mut sched = Scheduler::new(0.0);
        let _ = sched.schedule(200.0, Tick::Slow);
        let _ = sched.schedule_repeating(100.0, Tick::Fast);
        // Fast at 100 and 200, Slow at 200; tie at 200 goes to the
        // earlier-scheduled Slow
        assert_eq!(
            sched.advance_to(200.0),
            vec![Tick::Fast, Tick::Slow, Tick::Fast]
        );
    }

    #[test]
    fn test_cancel_prevents_firing() {
        let mut sched = Scheduler::new(0.0);
        let h = sched.schedule_repeating(50.0, Tick::Fast);
        assert_eq!(sched.advance_to(50.0), vec![Tick::Fast]);
        assert!(sched.cancel(h));
        assert!(!sched.cancel(h)); // stale handle
        assert_eq!(sched.advance_to(1_000.0), vec![]);
    }

    #[test]
    fn test_clear_tears_down_everything() {
        let mut sched = Scheduler::new(0.0);
        let _ = sched.schedule(10.0, Tick::Fast);
        let _ = sched.schedule_repeating(10.0, Tick::Slow);
        sched.clear();
        assert_eq!(sched.advance_to(1_000.0), vec![]);
    }

    #[test]
    fn test_time_never_runs_backwards() {
        let mut sched = Scheduler::new(100.0);
        let _ = sched.schedule(50.0, Tick::Fast);
        assert_eq!(sched.advance_to(20.0), vec![]);
        assert_eq!(sched.now_ms(), 100.0);
        assert_eq!(sched.advance_to(150.0), vec![Tick::Fast]);
    }
}
