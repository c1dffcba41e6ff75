//! Timer system for Banner Carousel.
//!
//! Provides one-shot and repeating timers. Timers never call back into their
//! owners: the host loop asks the manager which timers expired and routes each
//! [`TimerId`] to whoever started it. A stopped timer therefore can never
//! reach a dropped owner.
//!
//! Repeating timers keep a fixed cadence. If the host falls behind and several
//! periods elapse before `process_expired` runs, the timer fires once and its
//! next deadline is re-aligned to the original cadence; missed ticks are not
//! queued up.

use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::Mutex;
use slotmap::{new_key_type, SlotMap};

use crate::clock::{Clock, SystemClock};
use crate::error::{Result, TimerError};
use crate::logging::targets;

new_key_type! {
    /// A unique identifier for a timer.
    pub struct TimerId;
}

/// The type of timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerKind {
    /// Fires once after the specified duration.
    OneShot,
    /// Fires repeatedly at the specified interval.
    Repeating,
}

#[derive(Debug)]
struct TimerData {
    next_fire: Instant,
    interval: Duration,
    kind: TimerKind,
}

/// An entry in the timer queue (min-heap by fire time).
#[derive(Debug, Clone, Copy)]
struct TimerQueueEntry {
    id: TimerId,
    fire_time: Instant,
}

impl PartialEq for TimerQueueEntry {
    fn eq(&self, other: &Self) -> bool {
        self.fire_time == other.fire_time
    }
}

impl Eq for TimerQueueEntry {}

impl PartialOrd for TimerQueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for TimerQueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse order for min-heap (BinaryHeap is max-heap by default).
        other.fire_time.cmp(&self.fire_time)
    }
}

/// Manages all timers for a host environment.
pub struct TimerManager {
    clock: Arc<dyn Clock>,
    timers: SlotMap<TimerId, TimerData>,
    queue: BinaryHeap<TimerQueueEntry>,
}

impl TimerManager {
    /// Create a timer manager driven by the system clock.
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    /// Create a timer manager driven by the given clock.
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            clock,
            timers: SlotMap::with_key(),
            queue: BinaryHeap::new(),
        }
    }

    /// Start a one-shot timer that fires after the specified duration.
    pub fn start_one_shot(&mut self, duration: Duration) -> TimerId {
        self.insert(duration, TimerKind::OneShot)
    }

    /// Start a repeating timer that fires at the specified interval.
    ///
    /// The first fire occurs one `interval` from now.
    pub fn start_repeating(&mut self, interval: Duration) -> Result<TimerId> {
        if interval.is_zero() {
            return Err(TimerError::ZeroInterval.into());
        }
        Ok(self.insert(interval, TimerKind::Repeating))
    }

    fn insert(&mut self, interval: Duration, kind: TimerKind) -> TimerId {
        let next_fire = self.clock.now() + interval;
        let id = self.timers.insert(TimerData {
            next_fire,
            interval,
            kind,
        });
        self.queue.push(TimerQueueEntry {
            id,
            fire_time: next_fire,
        });
        tracing::trace!(target: targets::TIMER, ?id, ?kind, ?interval, "timer started");
        id
    }

    /// Stop and remove a timer.
    pub fn stop(&mut self, id: TimerId) -> Result<()> {
        if self.timers.remove(id).is_some() {
            tracing::trace!(target: targets::TIMER, ?id, "timer stopped");
            Ok(())
        } else {
            Err(TimerError::InvalidTimerId.into())
        }
    }

    /// Check if a timer is currently active.
    pub fn is_active(&self, id: TimerId) -> bool {
        self.timers.contains_key(id)
    }

    /// Get the duration until the next timer fires, if any.
    pub fn time_until_next(&mut self) -> Option<Duration> {
        self.discard_stale();
        let now = self.clock.now();
        self.queue
            .peek()
            .map(|entry| entry.fire_time.saturating_duration_since(now))
    }

    /// Drop queue entries whose timer was stopped or rescheduled.
    fn discard_stale(&mut self) {
        while let Some(entry) = self.queue.peek() {
            let live = self
                .timers
                .get(entry.id)
                .is_some_and(|t| t.next_fire == entry.fire_time);
            if live {
                break;
            }
            self.queue.pop();
        }
    }

    /// Process all timers that should fire now.
    ///
    /// Returns the IDs of the timers that fired, in deadline order.
    #[tracing::instrument(skip(self), target = "banner_carousel_core::timer", level = "trace")]
    pub fn process_expired(&mut self) -> Vec<TimerId> {
        let now = self.clock.now();
        let mut fired = Vec::new();

        while let Some(entry) = self.queue.peek().copied() {
            if entry.fire_time > now {
                break;
            }
            self.queue.pop();

            let Some(timer) = self.timers.get_mut(entry.id) else {
                continue;
            };
            if timer.next_fire != entry.fire_time {
                continue;
            }

            tracing::trace!(target: targets::TIMER, id = ?entry.id, "timer fired");
            fired.push(entry.id);

            match timer.kind {
                TimerKind::OneShot => {
                    self.timers.remove(entry.id);
                }
                TimerKind::Repeating => {
                    let next = next_on_cadence(timer.next_fire, timer.interval, now);
                    timer.next_fire = next;
                    self.queue.push(TimerQueueEntry {
                        id: entry.id,
                        fire_time: next,
                    });
                }
            }
        }

        fired
    }

    /// Get the number of active timers.
    pub fn active_count(&self) -> usize {
        self.timers.len()
    }
}

/// The first deadline after `now` on the grid `last + k * interval`.
///
/// Missed periods are skipped in one step, so a long suspend costs the same
/// as a single late tick. `interval` is never zero.
fn next_on_cadence(last: Instant, interval: Duration, now: Instant) -> Instant {
    let step = interval.as_nanos();
    let periods = now.saturating_duration_since(last).as_nanos() / step + 1;
    periods
        .checked_mul(step)
        .and_then(|nanos| u64::try_from(nanos).ok())
        .and_then(|nanos| last.checked_add(Duration::from_nanos(nanos)))
        .unwrap_or_else(|| now + interval)
}

impl Default for TimerManager {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for TimerManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TimerManager")
            .field("clock", &self.clock)
            .field("active", &self.timers.len())
            .finish()
    }
}

/// A thread-safe wrapper around [`TimerManager`], shared between the host
/// loop and the widgets that own timers.
#[derive(Debug, Default)]
pub struct SharedTimerManager {
    inner: Mutex<TimerManager>,
}

impl SharedTimerManager {
    /// Create a shared manager driven by the system clock.
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(TimerManager::new()),
        }
    }

    /// Create a shared manager driven by the given clock.
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            inner: Mutex::new(TimerManager::with_clock(clock)),
        }
    }

    pub fn start_one_shot(&self, duration: Duration) -> TimerId {
        self.inner.lock().start_one_shot(duration)
    }

    pub fn start_repeating(&self, interval: Duration) -> Result<TimerId> {
        self.inner.lock().start_repeating(interval)
    }

    pub fn stop(&self, id: TimerId) -> Result<()> {
        self.inner.lock().stop(id)
    }

    pub fn is_active(&self, id: TimerId) -> bool {
        self.inner.lock().is_active(id)
    }

    pub fn time_until_next(&self) -> Option<Duration> {
        self.inner.lock().time_until_next()
    }

    pub fn process_expired(&self) -> Vec<TimerId> {
        self.inner.lock().process_expired()
    }

    pub fn active_count(&self) -> usize {
        self.inner.lock().active_count()
    }
}

static_assertions::assert_impl_all!(SharedTimerManager: Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;

    fn manager() -> (ManualClock, TimerManager) {
        let clock = ManualClock::new();
        let manager = TimerManager::with_clock(Arc::new(clock.clone()));
        (clock, manager)
    }

    #[test]
    fn test_one_shot_fires_once() {
        let (clock, mut timers) = manager();
        let id = timers.start_one_shot(Duration::from_millis(100));

        clock.advance(Duration::from_millis(99));
        assert!(timers.process_expired().is_empty());

        clock.advance(Duration::from_millis(1));
        assert_eq!(timers.process_expired(), vec![id]);
        assert!(!timers.is_active(id));

        clock.advance(Duration::from_millis(500));
        assert!(timers.process_expired().is_empty());
    }

    #[test]
    fn test_repeating_fires_each_interval() {
        let (clock, mut timers) = manager();
        let id = timers.start_repeating(Duration::from_millis(100)).unwrap();

        for _ in 0..3 {
            clock.advance(Duration::from_millis(100));
            assert_eq!(timers.process_expired(), vec![id]);
        }
        assert!(timers.is_active(id));
    }

    #[test]
    fn test_repeating_coalesces_missed_ticks() {
        let (clock, mut timers) = manager();
        let id = timers.start_repeating(Duration::from_millis(100)).unwrap();

        clock.advance(Duration::from_millis(450));
        assert_eq!(timers.process_expired(), vec![id]);

        // Next deadline stays on the original 100ms grid (t = 500ms).
        assert_eq!(timers.time_until_next(), Some(Duration::from_millis(50)));
        clock.advance(Duration::from_millis(50));
        assert_eq!(timers.process_expired(), vec![id]);
    }

    #[test]
    fn test_repeating_catches_up_after_long_suspend() {
        let (clock, mut timers) = manager();
        let id = timers.start_repeating(Duration::from_millis(1)).unwrap();

        clock.advance(Duration::from_secs(30 * 24 * 60 * 60));
        let started = Instant::now();
        assert_eq!(timers.process_expired(), vec![id]);
        assert!(started.elapsed() < Duration::from_secs(1));

        assert_eq!(timers.time_until_next(), Some(Duration::from_millis(1)));
        clock.advance(Duration::from_millis(1));
        assert_eq!(timers.process_expired(), vec![id]);
    }

    #[test]
    fn test_next_on_cadence_stays_on_grid() {
        let base = Instant::now();
        let interval = Duration::from_millis(100);
        let at = |ms| base + Duration::from_millis(ms);

        assert_eq!(next_on_cadence(at(100), interval, at(100)), at(200));
        assert_eq!(next_on_cadence(at(100), interval, at(199)), at(200));
        assert_eq!(next_on_cadence(at(100), interval, at(450)), at(500));
        assert_eq!(next_on_cadence(at(100), interval, at(500)), at(600));
    }

    #[test]
    fn test_stop_prevents_firing() {
        let (clock, mut timers) = manager();
        let id = timers.start_repeating(Duration::from_millis(10)).unwrap();
        timers.stop(id).unwrap();

        clock.advance(Duration::from_millis(100));
        assert!(timers.process_expired().is_empty());
        assert_eq!(timers.active_count(), 0);
        assert_eq!(timers.time_until_next(), None);
    }

    #[test]
    fn test_stop_unknown_timer_errors() {
        let (_clock, mut timers) = manager();
        let id = timers.start_one_shot(Duration::from_millis(10));
        timers.stop(id).unwrap();
        assert!(timers.stop(id).is_err());
    }

    #[test]
    fn test_zero_interval_rejected() {
        let (_clock, mut timers) = manager();
        assert!(matches!(
            timers.start_repeating(Duration::ZERO),
            Err(crate::CoreError::Timer(TimerError::ZeroInterval))
        ));
    }

    #[test]
    fn test_timers_fire_in_deadline_order() {
        let (clock, mut timers) = manager();
        let slow = timers.start_one_shot(Duration::from_millis(30));
        let fast = timers.start_one_shot(Duration::from_millis(10));

        clock.advance(Duration::from_millis(30));
        assert_eq!(timers.process_expired(), vec![fast, slow]);
    }
}
