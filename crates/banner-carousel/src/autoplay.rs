//! Autoplay scheduling.
//!
//! [`Autoplay`] owns at most one repeating timer in the host's
//! [`SharedTimerManager`]. On each tick it advances the carousel unless a
//! pause reason is active. A paused tick is simply skipped: the timer keeps
//! its cadence, so the first tick after un-pausing advances normally.
//!
//! The timer exists only while there is something to cycle through. It is
//! stopped when the slide count drops to one or zero, restarted when it grows
//! back, and always stopped when the `Autoplay` is dropped or shut down.
//! After [`Autoplay::shutdown`] nothing is ever scheduled again.

use std::sync::Arc;
use std::time::Duration;

use banner_carousel_core::logging::targets;
use banner_carousel_core::{SharedTimerManager, TimerId};

use crate::state::CarouselState;

/// What a timer tick did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The timer does not belong to this autoplay.
    NotOwned,
    /// The carousel was paused; nothing happened.
    Skipped,
    /// The carousel advanced. Carries whether the index actually changed.
    Advanced(bool),
}

/// Periodic advancement for one carousel.
#[derive(Debug)]
pub struct Autoplay {
    timers: Arc<SharedTimerManager>,
    interval: Duration,
    enabled: bool,
    shut_down: bool,
    timer_id: Option<TimerId>,
}

impl Autoplay {
    /// Create an idle autoplay. Nothing is scheduled until [`sync`](Self::sync).
    pub fn new(timers: Arc<SharedTimerManager>, interval: Duration, enabled: bool) -> Self {
        Self {
            timers,
            interval,
            enabled,
            shut_down: false,
            timer_id: None,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn is_shut_down(&self) -> bool {
        self.shut_down
    }

    /// Whether a timer is currently scheduled.
    pub fn is_running(&self) -> bool {
        self.timer_id.is_some()
    }

    pub fn timer_id(&self) -> Option<TimerId> {
        self.timer_id
    }

    /// Whether `id` is this autoplay's timer.
    pub fn owns(&self, id: TimerId) -> bool {
        self.timer_id == Some(id)
    }

    /// Start or stop the timer to match the slide count.
    pub fn sync(&mut self, slide_count: usize) {
        if self.enabled && !self.shut_down && slide_count >= 2 {
            self.start();
        } else {
            self.stop();
        }
    }

    /// Enable or disable autoplay, then re-sync with `slide_count`.
    pub fn set_enabled(&mut self, enabled: bool, slide_count: usize) {
        self.enabled = enabled;
        self.sync(slide_count);
    }

    /// Change the interval. A running timer is rescheduled from now.
    pub fn set_interval(&mut self, interval: Duration) {
        self.interval = interval;
        if self.is_running() {
            self.stop();
            self.start();
        }
    }

    fn start(&mut self) {
        if self.timer_id.is_some() {
            return;
        }
        match self.timers.start_repeating(self.interval) {
            Ok(id) => {
                tracing::debug!(
                    target: targets::AUTOPLAY,
                    ?id,
                    interval = ?self.interval,
                    "autoplay started"
                );
                self.timer_id = Some(id);
            }
            Err(err) => {
                tracing::warn!(target: targets::AUTOPLAY, %err, "autoplay not started");
            }
        }
    }

    /// Cancel the timer, if one is scheduled.
    pub fn stop(&mut self) {
        if let Some(id) = self.timer_id.take() {
            if let Err(err) = self.timers.stop(id) {
                tracing::trace!(target: targets::AUTOPLAY, ?id, %err, "timer already gone");
            }
            tracing::debug!(target: targets::AUTOPLAY, ?id, "autoplay stopped");
        }
    }

    /// Cancel the timer for good. Later calls to [`sync`](Self::sync) and
    /// [`set_enabled`](Self::set_enabled) no longer schedule anything.
    pub fn shutdown(&mut self) {
        self.shut_down = true;
        self.stop();
    }

    /// Handle an expired timer on behalf of `state`.
    pub fn tick(&self, id: TimerId, state: &mut CarouselState) -> TickOutcome {
        if !self.owns(id) {
            return TickOutcome::NotOwned;
        }
        if state.is_paused() {
            tracing::trace!(
                target: targets::AUTOPLAY,
                reasons = ?state.pause_reasons(),
                "tick skipped"
            );
            return TickOutcome::Skipped;
        }
        TickOutcome::Advanced(state.next())
    }
}

impl Drop for Autoplay {
    fn drop(&mut self) {
        self.stop();
    }
}
