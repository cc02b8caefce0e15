//! Timer capability used by the animator
//!
//! The animator never sleeps or spawns anything. It asks a [`Timers`]
//! implementation to schedule expirations and the host feeds each expiry
//! back through `Animator::on_timer`. Two implementations ship here:
//!
//! - [`ManualTimers`] - virtual clock advanced explicitly, for tests and
//!   deterministic simulation
//! - [`SystemTimers`] - wall-clock deadlines polled by an event loop

use core::ops::Add;
use std::time::{Duration, Instant};

/// Shortest period a periodic timer re-arms with
pub const MIN_PERIOD: Duration = Duration::from_micros(1);

/// Handle for a scheduled expiration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

impl TimerId {
    /// Raw numeric id
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

/// Schedule-once / schedule-periodic / cancel
pub trait Timers {
    /// Fire every `period`, first after one full period
    fn schedule_periodic(&mut self, period: Duration) -> TimerId;

    /// Fire once after `delay`
    fn schedule_once(&mut self, delay: Duration) -> TimerId;

    /// Stop a timer; unknown or finished ids are ignored
    fn cancel(&mut self, id: TimerId);
}

impl<T: Timers + ?Sized> Timers for &mut T {
    fn schedule_periodic(&mut self, period: Duration) -> TimerId {
        (**self).schedule_periodic(period)
    }

    fn schedule_once(&mut self, delay: Duration) -> TimerId {
        (**self).schedule_once(delay)
    }

    fn cancel(&mut self, id: TimerId) {
        (**self).cancel(id);
    }
}

#[derive(Debug, Clone)]
struct Entry<I> {
    id: TimerId,
    deadline: I,
    period: Option<Duration>,
}

/// Deadline queue shared by both clocks
#[derive(Debug, Clone)]
struct TimerQueue<I> {
    next_id: u64,
    entries: Vec<Entry<I>>,
}

impl<I> Default for TimerQueue<I> {
    fn default() -> Self {
        Self {
            next_id: 1,
            entries: Vec::new(),
        }
    }
}

impl<I: Copy + Ord + Add<Duration, Output = I>> TimerQueue<I> {
    fn schedule(&mut self, now: I, delay: Duration, period: Option<Duration>) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        let period = period.map(|p| p.max(MIN_PERIOD));
        let delay = period.map_or(delay, |p| delay.max(p));
        self.entries.push(Entry {
            id,
            deadline: now + delay,
            period,
        });
        id
    }

    fn cancel(&mut self, id: TimerId) {
        self.entries.retain(|e| e.id != id);
    }

    fn is_active(&self, id: TimerId) -> bool {
        self.entries.iter().any(|e| e.id == id)
    }

    fn next_deadline(&self) -> Option<I> {
        self.entries.iter().map(|e| e.deadline).min()
    }

    /// Earliest expiry at or before `until`, ties broken by schedule order
    ///
    /// With `skip_missed`, a periodic timer more than one period behind
    /// re-arms one period after `until` instead of replaying each miss.
    fn pop_due(&mut self, until: I, skip_missed: bool) -> Option<(TimerId, I)> {
        let index = self
            .entries
            .iter()
            .enumerate()
            .filter(|(_, e)| e.deadline <= until)
            .min_by_key(|(_, e)| (e.deadline, e.id))
            .map(|(i, _)| i)?;

        let Entry {
            id,
            deadline,
            period,
        } = self.entries[index];
        match period {
            Some(period) => {
                let next = deadline + period;
                self.entries[index].deadline = if skip_missed && next <= until {
                    until + period
                } else {
                    next
                };
            }
            None => {
                self.entries.swap_remove(index);
            }
        }
        Some((id, deadline))
    }
}

/// Virtual clock for deterministic tests
///
/// Time only moves through [`ManualTimers::pop_due`] and
/// [`ManualTimers::advance_to`]; nothing fires on its own.
#[derive(Debug, Clone, Default)]
pub struct ManualTimers {
    now: Duration,
    queue: TimerQueue<Duration>,
}

impl ManualTimers {
    /// Clock at time zero with nothing scheduled
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time since creation
    #[must_use]
    pub const fn now(&self) -> Duration {
        self.now
    }

    /// Pop the next expiry no later than `until`, moving the clock to it
    pub fn pop_due(&mut self, until: Duration) -> Option<TimerId> {
        let (id, at) = self.queue.pop_due(until, false)?;
        self.now = self.now.max(at);
        Some(id)
    }

    /// Move the clock forward without firing anything
    pub fn advance_to(&mut self, until: Duration) {
        self.now = self.now.max(until);
    }

    /// Whether `id` is still scheduled
    #[must_use]
    pub fn is_active(&self, id: TimerId) -> bool {
        self.queue.is_active(id)
    }

    /// Number of scheduled timers
    #[must_use]
    pub fn active_count(&self) -> usize {
        self.queue.entries.len()
    }

    /// Number of scheduled periodic timers
    #[must_use]
    pub fn periodic_count(&self) -> usize {
        self.queue
            .entries
            .iter()
            .filter(|e| e.period.is_some())
            .count()
    }

    /// Next scheduled expiry
    #[must_use]
    pub fn next_deadline(&self) -> Option<Duration> {
        self.queue.next_deadline()
    }
}

impl Timers for ManualTimers {
    fn schedule_periodic(&mut self, period: Duration) -> TimerId {
        self.queue.schedule(self.now, period, Some(period))
    }

    fn schedule_once(&mut self, delay: Duration) -> TimerId {
        self.queue.schedule(self.now, delay, None)
    }

    fn cancel(&mut self, id: TimerId) {
        self.queue.cancel(id);
    }
}

/// Wall-clock timers polled by a host event loop
#[derive(Debug, Clone, Default)]
pub struct SystemTimers {
    queue: TimerQueue<Instant>,
}

impl SystemTimers {
    /// Empty timer set
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Pop the next expiry at or before `now`
    ///
    /// A periodic timer that fell behind, e.g. across a suspended process,
    /// fires once and resumes one period after `now`.
    pub fn pop_due(&mut self, now: Instant) -> Option<TimerId> {
        self.queue.pop_due(now, true).map(|(id, _)| id)
    }

    /// Next scheduled expiry, for sleeping until it
    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        self.queue.next_deadline()
    }

    /// Whether `id` is still scheduled
    #[must_use]
    pub fn is_active(&self, id: TimerId) -> bool {
        self.queue.is_active(id)
    }
}

impl Timers for SystemTimers {
    fn schedule_periodic(&mut self, period: Duration) -> TimerId {
        self.queue.schedule(Instant::now(), period, Some(period))
    }

    fn schedule_once(&mut self, delay: Duration) -> TimerId {
        self.queue.schedule(Instant::now(), delay, None)
    }

    fn cancel(&mut self, id: TimerId) {
        self.queue.cancel(id);
    }
}
