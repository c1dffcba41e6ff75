//! Pointer, focus and keyboard input translation.
//!
//! [`InputHandler`] turns raw host events into state-machine operations. It
//! does not decide outcomes itself: a pointer release is forwarded to
//! [`CarouselState::end_drag`] with the cumulative displacement and an
//! estimated release velocity, and the state machine applies its thresholds.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use banner_carousel_core::logging::targets;

use crate::config::DEFAULT_VELOCITY_WINDOW_MS;
use crate::state::{CarouselState, PauseReason};

/// Keys the carousel reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    ArrowLeft,
    ArrowRight,
    /// Any other key; never consumed.
    Other,
}

/// A raw input event delivered by the host.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// A pointer was pressed on the slide region.
    PointerDown { x: f32, timestamp: Instant },
    /// The pressed pointer moved.
    PointerMove { x: f32, timestamp: Instant },
    /// The pressed pointer was released.
    PointerUp { x: f32, timestamp: Instant },
    /// The host aborted the gesture (e.g. the pointer capture was lost).
    PointerCancel,
    /// The pointer entered the carousel region.
    PointerEnter,
    /// The pointer left the carousel region.
    PointerLeave,
    /// The carousel region gained keyboard focus.
    FocusIn,
    /// The carousel region lost keyboard focus.
    FocusOut,
    /// A key was pressed.
    KeyPress(Key),
    /// The navigation indicator for a slide was clicked.
    IndicatorClick(usize),
}

/// Position sample used for velocity estimation.
#[derive(Debug, Clone, Copy)]
struct Sample {
    x: f32,
    timestamp: Instant,
}

/// Tracks one drag gesture from press to release.
#[derive(Debug)]
struct DragTracker {
    start_x: f32,
    samples: VecDeque<Sample>,
}

impl DragTracker {
    fn new(x: f32, timestamp: Instant) -> Self {
        let mut samples = VecDeque::new();
        samples.push_back(Sample { x, timestamp });
        Self {
            start_x: x,
            samples,
        }
    }

    /// Record a sample and drop the ones that fell out of `window`.
    fn record(&mut self, x: f32, timestamp: Instant, window: Duration) {
        self.samples.push_back(Sample { x, timestamp });
        // Always keep at least two samples so a slow, steady drag still has a
        // velocity to report.
        while self.samples.len() > 2 {
            let oldest = self.samples[0].timestamp;
            if timestamp.saturating_duration_since(oldest) > window {
                self.samples.pop_front();
            } else {
                break;
            }
        }
    }

    /// Displacement from the press position.
    fn delta(&self, x: f32) -> f32 {
        x - self.start_x
    }

    /// Horizontal velocity in pixels per second across the retained samples.
    fn velocity(&self) -> f32 {
        let (Some(first), Some(last)) = (self.samples.front(), self.samples.back()) else {
            return 0.0;
        };
        let elapsed = last.timestamp.saturating_duration_since(first.timestamp).as_secs_f32();
        if elapsed <= f32::EPSILON {
            return 0.0;
        }
        (last.x - first.x) / elapsed
    }
}

/// Translates input events into carousel operations.
#[derive(Debug)]
pub struct InputHandler {
    velocity_window: Duration,
    has_focus: bool,
    drag: Option<DragTracker>,
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new(Duration::from_millis(DEFAULT_VELOCITY_WINDOW_MS))
    }
}

impl InputHandler {
    /// Create a handler that estimates release velocity over `velocity_window`.
    pub fn new(velocity_window: Duration) -> Self {
        Self {
            velocity_window,
            has_focus: false,
            drag: None,
        }
    }

    /// Whether the carousel region currently has keyboard focus.
    pub fn has_focus(&self) -> bool {
        self.has_focus
    }

    /// Whether a pointer drag is being tracked.
    pub fn is_tracking_drag(&self) -> bool {
        self.drag.is_some()
    }

    pub fn set_velocity_window(&mut self, window: Duration) {
        self.velocity_window = window;
    }

    /// Forget any gesture in progress, e.g. after the slide data changed.
    pub fn reset_drag(&mut self) {
        self.drag = None;
    }

    /// Apply one event to `state`.
    ///
    /// Returns `true` if the event was consumed.
    pub fn handle(&mut self, event: &InputEvent, state: &mut CarouselState) -> bool {
        tracing::trace!(target: targets::INPUT, ?event, "input event");
        match *event {
            InputEvent::PointerDown { x, timestamp } => {
                if state.slide_count() == 0 {
                    return false;
                }
                self.drag = Some(DragTracker::new(x, timestamp));
                state.begin_drag();
                true
            }
            InputEvent::PointerMove { x, timestamp } => {
                let Some(drag) = self.drag.as_mut() else {
                    return false;
                };
                drag.record(x, timestamp, self.velocity_window);
                state.update_drag(drag.delta(x));
                true
            }
            InputEvent::PointerUp { x, timestamp } => {
                let Some(mut drag) = self.drag.take() else {
                    return false;
                };
                drag.record(x, timestamp, self.velocity_window);
                let delta_x = drag.delta(x);
                let velocity_x = drag.velocity();
                tracing::debug!(target: targets::INPUT, delta_x, velocity_x, "pointer released");
                state.end_drag(delta_x, velocity_x);
                true
            }
            InputEvent::PointerCancel => {
                if self.drag.take().is_none() {
                    return false;
                }
                state.cancel_drag();
                true
            }
            InputEvent::PointerEnter => {
                state.set_paused(PauseReason::Hover, true);
                true
            }
            InputEvent::PointerLeave => {
                state.set_paused(PauseReason::Hover, false);
                true
            }
            InputEvent::FocusIn => {
                self.has_focus = true;
                state.set_paused(PauseReason::Focus, true);
                true
            }
            InputEvent::FocusOut => {
                self.has_focus = false;
                state.set_paused(PauseReason::Focus, false);
                true
            }
            InputEvent::KeyPress(key) => {
                if !self.has_focus {
                    return false;
                }
                match key {
                    Key::ArrowLeft => {
                        state.previous();
                        true
                    }
                    Key::ArrowRight => {
                        state.next();
                        true
                    }
                    Key::Other => false,
                }
            }
            InputEvent::IndicatorClick(index) => {
                // Indices beyond i64 cannot name a real slide; wrap what fits.
                let Ok(index) = i64::try_from(index) else {
                    return false;
                };
                state.go_to(index);
                true
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::SwipeThresholds;

    fn setup(count: usize) -> (InputHandler, CarouselState, Instant) {
        (
            InputHandler::default(),
            CarouselState::new(count, SwipeThresholds::default()),
            Instant::now(),
        )
    }

    fn ms(t0: Instant, millis: u64) -> Instant {
        t0 + Duration::from_millis(millis)
    }

    #[test]
    fn test_slow_long_drag_commits_on_distance() {
        let (mut input, mut state, t0) = setup(3);
        input.handle(&InputEvent::PointerDown { x: 200.0, timestamp: t0 }, &mut state);
        assert!(state.is_dragging());

        input.handle(&InputEvent::PointerMove { x: 180.0, timestamp: ms(t0, 200) }, &mut state);
        input.handle(&InputEvent::PointerMove { x: 150.0, timestamp: ms(t0, 400) }, &mut state);
        assert_eq!(state.drag_offset(), -50.0, "offset is cumulative");

        input.handle(&InputEvent::PointerUp { x: 140.0, timestamp: ms(t0, 600) }, &mut state);
        assert_eq!(state.current_index(), 1);
        assert!(!state.is_dragging());
        assert_eq!(state.drag_offset(), 0.0);
    }

    #[test]
    fn test_short_drag_below_thresholds_stays() {
        let (mut input, mut state, t0) = setup(3);
        input.handle(&InputEvent::PointerDown { x: 100.0, timestamp: t0 }, &mut state);
        input.handle(&InputEvent::PointerMove { x: 90.0, timestamp: ms(t0, 100) }, &mut state);
        input.handle(&InputEvent::PointerUp { x: 80.0, timestamp: ms(t0, 200) }, &mut state);
        assert_eq!(state.current_index(), 0);
    }

    #[test]
    fn test_quick_flick_commits_on_velocity() {
        let (mut input, mut state, t0) = setup(3);
        input.handle(&InputEvent::PointerDown { x: 100.0, timestamp: t0 }, &mut state);
        input.handle(&InputEvent::PointerMove { x: 90.0, timestamp: ms(t0, 10) }, &mut state);
        // 30px in 30ms = 1000 px/s to the left, distance only 30px.
        input.handle(&InputEvent::PointerUp { x: 70.0, timestamp: ms(t0, 30) }, &mut state);
        assert_eq!(state.current_index(), 1);
    }

    #[test]
    fn test_velocity_uses_recent_window_only() {
        let (mut input, mut state, t0) = setup(3);
        input.handle(&InputEvent::PointerDown { x: 300.0, timestamp: t0 }, &mut state);
        // Fast early movement...
        input.handle(&InputEvent::PointerMove { x: 260.0, timestamp: ms(t0, 20) }, &mut state);
        // ...then the pointer rests before release.
        input.handle(&InputEvent::PointerMove { x: 259.0, timestamp: ms(t0, 500) }, &mut state);
        input.handle(&InputEvent::PointerMove { x: 259.0, timestamp: ms(t0, 550) }, &mut state);
        input.handle(&InputEvent::PointerUp { x: 259.0, timestamp: ms(t0, 600) }, &mut state);
        // 41px displacement and near-zero release velocity: no swipe.
        assert_eq!(state.current_index(), 0);
    }

    #[test]
    fn test_swipe_right_goes_back() {
        let (mut input, mut state, t0) = setup(3);
        input.handle(&InputEvent::PointerDown { x: 0.0, timestamp: t0 }, &mut state);
        input.handle(&InputEvent::PointerUp { x: 80.0, timestamp: ms(t0, 400) }, &mut state);
        assert_eq!(state.current_index(), 2);
    }

    #[test]
    fn test_move_and_up_without_down_ignored() {
        let (mut input, mut state, t0) = setup(3);
        assert!(!input.handle(&InputEvent::PointerMove { x: 10.0, timestamp: t0 }, &mut state));
        assert!(!input.handle(&InputEvent::PointerUp { x: -500.0, timestamp: t0 }, &mut state));
        assert!(!input.handle(&InputEvent::PointerCancel, &mut state));
        assert_eq!(state.current_index(), 0);
    }

    #[test]
    fn test_pointer_cancel_aborts_drag() {
        let (mut input, mut state, t0) = setup(3);
        input.handle(&InputEvent::PointerDown { x: 100.0, timestamp: t0 }, &mut state);
        input.handle(&InputEvent::PointerMove { x: 0.0, timestamp: ms(t0, 50) }, &mut state);
        assert!(input.handle(&InputEvent::PointerCancel, &mut state));
        assert_eq!(state.current_index(), 0);
        assert!(!state.is_dragging());
        assert!(!input.is_tracking_drag());
    }

    #[test]
    fn test_pointer_down_without_slides_not_consumed() {
        let (mut input, mut state, t0) = setup(0);
        assert!(!input.handle(&InputEvent::PointerDown { x: 0.0, timestamp: t0 }, &mut state));
        assert!(!state.is_paused());
    }

    #[test]
    fn test_hover_and_focus_pause() {
        let (mut input, mut state, _t0) = setup(2);
        input.handle(&InputEvent::PointerEnter, &mut state);
        input.handle(&InputEvent::FocusIn, &mut state);
        input.handle(&InputEvent::PointerLeave, &mut state);
        assert!(state.is_paused());
        assert!(input.has_focus());
        input.handle(&InputEvent::FocusOut, &mut state);
        assert!(!state.is_paused());
        assert!(!input.has_focus());
    }

    #[test]
    fn test_arrow_keys_require_focus() {
        let (mut input, mut state, _t0) = setup(3);
        assert!(!input.handle(&InputEvent::KeyPress(Key::ArrowRight), &mut state));
        assert_eq!(state.current_index(), 0);

        input.handle(&InputEvent::FocusIn, &mut state);
        input.handle(&InputEvent::KeyPress(Key::ArrowRight), &mut state);
        input.handle(&InputEvent::KeyPress(Key::ArrowRight), &mut state);
        assert_eq!(state.current_index(), 2);
        input.handle(&InputEvent::KeyPress(Key::ArrowLeft), &mut state);
        assert_eq!(state.current_index(), 1);
        assert!(!input.handle(&InputEvent::KeyPress(Key::Other), &mut state));
    }

    #[test]
    fn test_indicator_click_jumps_directly() {
        let (mut input, mut state, _t0) = setup(4);
        assert!(input.handle(&InputEvent::IndicatorClick(3), &mut state));
        assert_eq!(state.current_index(), 3);
        input.handle(&InputEvent::IndicatorClick(9), &mut state);
        assert_eq!(state.current_index(), 1);
    }
}
