//! Carousel state machine.
//!
//! [`CarouselState`] is the single source of truth for which slide is showing
//! and whether automatic advancement is suspended. Navigation always wraps
//! modulo the slide count, so every integer is a valid `go_to` target and
//! the current index can never leave range.
//!
//! # Example
//!
//! ```
//! use banner_carousel::{CarouselState, PauseReason, SwipeThresholds};
//!
//! let mut state = CarouselState::new(3, SwipeThresholds::default());
//! state.go_to(-1);
//! assert_eq!(state.current_index(), 2);
//!
//! state.set_paused(PauseReason::Hover, true);
//! state.set_paused(PauseReason::Focus, true);
//! state.set_paused(PauseReason::Hover, false);
//! assert!(state.is_paused());
//!
//! // A fast flick to the left advances even over a short distance.
//! state.end_drag(-20.0, -600.0);
//! assert_eq!(state.current_index(), 0);
//! ```

use std::fmt;

use banner_carousel_core::{carousel_debug, carousel_trace};

use crate::config::{DEFAULT_SWIPE_DISTANCE_THRESHOLD, DEFAULT_SWIPE_VELOCITY_THRESHOLD};

/// An independent reason for suspending autoplay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PauseReason {
    /// The pointer is over the carousel.
    Hover,
    /// The carousel region has keyboard focus.
    Focus,
    /// A drag gesture is in progress.
    DragInProgress,
}

impl PauseReason {
    /// All pause reasons, in bit order.
    pub const ALL: [PauseReason; 3] = [Self::Hover, Self::Focus, Self::DragInProgress];

    fn bit(self) -> u8 {
        match self {
            Self::Hover => 1 << 0,
            Self::Focus => 1 << 1,
            Self::DragInProgress => 1 << 2,
        }
    }
}

/// The set of currently active pause reasons.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct PauseFlags(u8);

impl PauseFlags {
    /// An empty set.
    pub const fn empty() -> Self {
        Self(0)
    }

    /// Whether `reason` is active.
    pub fn contains(self, reason: PauseReason) -> bool {
        self.0 & reason.bit() != 0
    }

    /// Activate `reason`. Returns `true` if it was not already active.
    pub fn insert(&mut self, reason: PauseReason) -> bool {
        let was = self.contains(reason);
        self.0 |= reason.bit();
        !was
    }

    /// Deactivate `reason`. Returns `true` if it was active.
    pub fn remove(&mut self, reason: PauseReason) -> bool {
        let was = self.contains(reason);
        self.0 &= !reason.bit();
        was
    }

    /// Whether no reason is active.
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Number of active reasons.
    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    /// Iterate active reasons.
    pub fn iter(self) -> impl Iterator<Item = PauseReason> {
        PauseReason::ALL.into_iter().filter(move |r| self.contains(*r))
    }
}

impl fmt::Debug for PauseFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

/// Direction of the last committed transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Towards higher indices (wrapping to the first slide).
    Forward,
    /// Towards lower indices (wrapping to the last slide).
    Backward,
}

/// Distance and velocity thresholds for committing a swipe.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SwipeThresholds {
    /// Minimum absolute drag distance, in logical pixels.
    pub distance: f32,
    /// Minimum absolute release velocity, in pixels per second.
    pub velocity: f32,
}

impl Default for SwipeThresholds {
    fn default() -> Self {
        Self {
            distance: DEFAULT_SWIPE_DISTANCE_THRESHOLD,
            velocity: DEFAULT_SWIPE_VELOCITY_THRESHOLD,
        }
    }
}

impl SwipeThresholds {
    /// Whether a release commits to the next slide (swipe left).
    fn commits_next(&self, delta_x: f32, velocity_x: f32) -> bool {
        delta_x <= -self.distance || velocity_x <= -self.velocity
    }

    /// Whether a release commits to the previous slide (swipe right).
    fn commits_previous(&self, delta_x: f32, velocity_x: f32) -> bool {
        delta_x >= self.distance || velocity_x >= self.velocity
    }
}

/// Index, pause and drag state of one carousel.
#[derive(Debug, Clone)]
pub struct CarouselState {
    slide_count: usize,
    current_index: usize,
    pause_flags: PauseFlags,
    drag_offset: f32,
    direction: Option<Direction>,
    thresholds: SwipeThresholds,
}

impl CarouselState {
    /// Create the state for `slide_count` slides, starting at index 0.
    pub fn new(slide_count: usize, thresholds: SwipeThresholds) -> Self {
        Self {
            slide_count,
            current_index: 0,
            pause_flags: PauseFlags::empty(),
            drag_offset: 0.0,
            direction: None,
            thresholds,
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn slide_count(&self) -> usize {
        self.slide_count
    }

    /// The current index. Always `0` when there are no slides.
    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn pause_reasons(&self) -> PauseFlags {
        self.pause_flags
    }

    /// Whether any pause reason is active.
    pub fn is_paused(&self) -> bool {
        !self.pause_flags.is_empty()
    }

    pub fn is_dragging(&self) -> bool {
        self.pause_flags.contains(PauseReason::DragInProgress)
    }

    /// Horizontal displacement of the drag in progress, or `0.0`.
    pub fn drag_offset(&self) -> f32 {
        self.drag_offset
    }

    pub fn direction(&self) -> Option<Direction> {
        self.direction
    }

    pub fn thresholds(&self) -> SwipeThresholds {
        self.thresholds
    }

    pub fn set_thresholds(&mut self, thresholds: SwipeThresholds) {
        self.thresholds = thresholds;
    }

    // =========================================================================
    // Navigation
    // =========================================================================

    /// Show the slide at `index`, wrapping any integer into range.
    ///
    /// Returns `true` if the current index changed. Does nothing when there
    /// are no slides.
    pub fn go_to(&mut self, index: i64) -> bool {
        let Some(target) = self.wrap(index) else {
            return false;
        };
        let direction = if target > self.current_index {
            Direction::Forward
        } else {
            Direction::Backward
        };
        self.move_to(target, direction)
    }

    /// Advance one slide, wrapping from the last to the first.
    pub fn next(&mut self) -> bool {
        match self.wrap(self.current_index as i64 + 1) {
            Some(target) => self.move_to(target, Direction::Forward),
            None => false,
        }
    }

    /// Go back one slide, wrapping from the first to the last.
    pub fn previous(&mut self) -> bool {
        match self.wrap(self.current_index as i64 - 1) {
            Some(target) => self.move_to(target, Direction::Backward),
            None => false,
        }
    }

    fn wrap(&self, index: i64) -> Option<usize> {
        if self.slide_count == 0 {
            return None;
        }
        let count = self.slide_count as i64;
        Some(index.rem_euclid(count) as usize)
    }

    fn move_to(&mut self, target: usize, direction: Direction) -> bool {
        if target == self.current_index {
            return false;
        }
        carousel_debug!(from = self.current_index, to = target, ?direction, "slide transition");
        self.current_index = target;
        self.direction = Some(direction);
        true
    }

    /// Replace the slide count, re-wrapping the current index into range.
    ///
    /// Returns `true` if the current index changed.
    pub fn set_slide_count(&mut self, slide_count: usize) -> bool {
        self.slide_count = slide_count;
        if slide_count == 0 {
            let changed = self.current_index != 0;
            self.current_index = 0;
            self.clear_drag();
            return changed;
        }
        let wrapped = self.current_index % slide_count;
        let changed = wrapped != self.current_index;
        self.current_index = wrapped;
        changed
    }

    // =========================================================================
    // Dragging
    // =========================================================================

    /// Start a drag gesture.
    pub fn begin_drag(&mut self) {
        if self.slide_count == 0 {
            return;
        }
        self.pause_flags.insert(PauseReason::DragInProgress);
        self.drag_offset = 0.0;
        carousel_trace!("drag started");
    }

    /// Record the cumulative displacement of the drag in progress.
    pub fn update_drag(&mut self, delta_x: f32) {
        if self.is_dragging() {
            self.drag_offset = delta_x;
        }
    }

    /// Finish a drag gesture and commit a transition if either threshold is
    /// crossed.
    ///
    /// Swiping left (negative displacement or velocity) advances; swiping
    /// right goes back. Returns `true` if the current index changed.
    pub fn end_drag(&mut self, delta_x: f32, velocity_x: f32) -> bool {
        let changed = if self.thresholds.commits_next(delta_x, velocity_x) {
            self.next()
        } else if self.thresholds.commits_previous(delta_x, velocity_x) {
            self.previous()
        } else {
            false
        };
        carousel_trace!(delta_x, velocity_x, changed, "drag ended");
        self.clear_drag();
        changed
    }

    /// Abandon the drag in progress without navigating.
    pub fn cancel_drag(&mut self) {
        self.clear_drag();
    }

    fn clear_drag(&mut self) {
        self.pause_flags.remove(PauseReason::DragInProgress);
        self.drag_offset = 0.0;
    }

    // =========================================================================
    // Pausing
    // =========================================================================

    /// Activate or deactivate one pause reason.
    ///
    /// Returns `true` if the set of active reasons changed.
    pub fn set_paused(&mut self, reason: PauseReason, active: bool) -> bool {
        let changed = if active {
            self.pause_flags.insert(reason)
        } else {
            self.pause_flags.remove(reason)
        };
        if changed {
            carousel_trace!(?reason, active, "pause reason changed");
        }
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(count: usize) -> CarouselState {
        CarouselState::new(count, SwipeThresholds::default())
    }

    #[test]
    fn test_next_wraps_to_start_after_full_cycle() {
        for count in 1..=6 {
            for start in 0..count {
                let mut s = state(count);
                s.go_to(start as i64);
                for _ in 0..count {
                    s.next();
                }
                assert_eq!(s.current_index(), start, "count={count} start={start}");
            }
        }
    }

    #[test]
    fn test_go_to_wraps_any_integer() {
        let mut s = state(3);
        s.go_to(-1);
        assert_eq!(s.current_index(), 2);
        s.go_to(-5);
        assert_eq!(s.current_index(), 1);
        s.go_to(7);
        assert_eq!(s.current_index(), 1);
        s.go_to(i64::MIN);
        assert!(s.current_index() < 3);
        s.go_to(i64::MAX);
        assert!(s.current_index() < 3);
    }

    #[test]
    fn test_navigation_without_slides_is_noop() {
        let mut s = state(0);
        assert!(!s.next());
        assert!(!s.previous());
        assert!(!s.go_to(4));
        s.begin_drag();
        assert!(!s.is_dragging());
        assert!(!s.end_drag(-100.0, -1000.0));
        assert_eq!(s.current_index(), 0);
    }

    #[test]
    fn test_single_slide_stays_put() {
        let mut s = state(1);
        assert!(!s.next());
        assert!(!s.previous());
        assert_eq!(s.current_index(), 0);
        assert_eq!(s.direction(), None);
    }

    #[test]
    fn test_direction_tracks_last_transition() {
        let mut s = state(4);
        s.next();
        assert_eq!(s.direction(), Some(Direction::Forward));
        s.previous();
        assert_eq!(s.direction(), Some(Direction::Backward));
        s.go_to(3);
        assert_eq!(s.direction(), Some(Direction::Forward));
        s.go_to(1);
        assert_eq!(s.direction(), Some(Direction::Backward));
        // Wrapping forward from the last slide is still forward.
        s.go_to(3);
        s.next();
        assert_eq!(s.current_index(), 0);
        assert_eq!(s.direction(), Some(Direction::Forward));
    }

    #[test]
    fn test_pause_reasons_compose() {
        let mut s = state(3);
        assert!(!s.is_paused());
        s.set_paused(PauseReason::Hover, true);
        s.set_paused(PauseReason::Focus, true);
        s.set_paused(PauseReason::Hover, false);
        assert!(s.is_paused());
        assert_eq!(s.pause_reasons().iter().collect::<Vec<_>>(), vec![PauseReason::Focus]);
        s.set_paused(PauseReason::Focus, false);
        assert!(!s.is_paused());
    }

    #[test]
    fn test_set_paused_reports_changes() {
        let mut s = state(2);
        assert!(s.set_paused(PauseReason::Hover, true));
        assert!(!s.set_paused(PauseReason::Hover, true));
        assert!(s.set_paused(PauseReason::Hover, false));
        assert!(!s.set_paused(PauseReason::Hover, false));
    }

    #[test]
    fn test_swipe_distance_threshold() {
        let mut s = state(3);
        s.end_drag(-60.0, 0.0);
        assert_eq!(s.current_index(), 1);

        let mut s = state(3);
        s.end_drag(-30.0, 0.0);
        assert_eq!(s.current_index(), 0);
    }

    #[test]
    fn test_swipe_velocity_threshold() {
        let mut s = state(3);
        s.end_drag(-20.0, -600.0);
        assert_eq!(s.current_index(), 1);

        let mut s = state(3);
        s.end_drag(10.0, 600.0);
        assert_eq!(s.current_index(), 2);
    }

    #[test]
    fn test_swipe_right_wraps_backward() {
        let mut s = state(3);
        s.end_drag(60.0, 0.0);
        assert_eq!(s.current_index(), 2);
    }

    #[test]
    fn test_thresholds_are_inclusive() {
        let mut s = state(3);
        assert!(s.end_drag(-50.0, 0.0));
        assert!(s.end_drag(0.0, 500.0));
        assert_eq!(s.current_index(), 0);
    }

    #[test]
    fn test_drag_lifecycle() {
        let mut s = state(3);
        s.update_drag(-15.0);
        assert_eq!(s.drag_offset(), 0.0, "ignored outside a drag");

        s.begin_drag();
        assert!(s.is_dragging());
        assert!(s.is_paused());
        s.update_drag(-15.0);
        s.update_drag(-42.0);
        assert_eq!(s.drag_offset(), -42.0);

        s.end_drag(-42.0, -100.0);
        assert!(!s.is_dragging());
        assert!(!s.is_paused());
        assert_eq!(s.drag_offset(), 0.0);
        assert_eq!(s.current_index(), 0);
    }

    #[test]
    fn test_cancel_drag_clears_without_navigating() {
        let mut s = state(3);
        s.begin_drag();
        s.update_drag(-200.0);
        s.cancel_drag();
        assert_eq!(s.current_index(), 0);
        assert!(!s.is_dragging());
        assert_eq!(s.drag_offset(), 0.0);
    }

    #[test]
    fn test_custom_thresholds() {
        let mut s = CarouselState::new(
            3,
            SwipeThresholds {
                distance: 10.0,
                velocity: 100.0,
            },
        );
        s.end_drag(-12.0, 0.0);
        assert_eq!(s.current_index(), 1);
        s.end_drag(0.0, 150.0);
        assert_eq!(s.current_index(), 0);
    }

    #[test]
    fn test_shrinking_slide_count_rewraps_index() {
        let mut s = state(5);
        s.go_to(4);
        assert!(s.set_slide_count(3));
        assert_eq!(s.current_index(), 1);

        assert!(!s.set_slide_count(10));
        assert_eq!(s.current_index(), 1);

        s.begin_drag();
        s.set_slide_count(0);
        assert_eq!(s.current_index(), 0);
        assert!(!s.is_dragging());
    }

    #[test]
    fn test_pause_flags_debug_lists_reasons() {
        let mut flags = PauseFlags::empty();
        flags.insert(PauseReason::DragInProgress);
        flags.insert(PauseReason::Hover);
        assert_eq!(format!("{flags:?}"), "{Hover, DragInProgress}");
        assert_eq!(flags.len(), 2);
    }
}
