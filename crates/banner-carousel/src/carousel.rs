//! The carousel widget.
//!
//! [`Carousel`] is the single owner of a banner carousel's mutable state. It
//! ties together the slide deck, the [`CarouselState`] machine, the
//! [`Autoplay`] timer and the [`InputHandler`], and reports changes through
//! signals.
//!
//! # Example
//!
//! ```
//! use banner_carousel::{Carousel, CarouselConfig, InputEvent, Key, Slide, SlideDeck};
//! use banner_carousel_core::SharedTimerManager;
//! use std::sync::Arc;
//!
//! let timers = Arc::new(SharedTimerManager::new());
//! let deck = SlideDeck::new(vec![Slide::new("a"), Slide::new("b"), Slide::new("c")]).unwrap();
//! let mut carousel = Carousel::new(deck, &CarouselConfig::default(), timers.clone());
//!
//! carousel.current_changed.connect(|index| println!("showing slide {index}"));
//!
//! carousel.handle_input(&InputEvent::FocusIn);
//! carousel.handle_input(&InputEvent::KeyPress(Key::ArrowRight));
//! assert_eq!(carousel.current_index(), 1);
//!
//! // The host loop routes expired timers back to their owner.
//! for id in timers.process_expired() {
//!     carousel.handle_timer(id);
//! }
//! ```

use std::sync::Arc;

use banner_carousel_core::{PerfSpan, SharedTimerManager, Signal, TimerId};

use crate::autoplay::{Autoplay, TickOutcome};
use crate::config::CarouselConfig;
use crate::input::{InputEvent, InputHandler};
use crate::slide::{Slide, SlideDeck};
use crate::state::{CarouselState, PauseReason, SwipeThresholds};
use crate::view::CarouselView;

/// Observable values compared before and after each operation.
#[derive(Clone, Copy, PartialEq, Eq)]
struct Observed {
    index: usize,
    paused: bool,
}

/// A notification-banner carousel.
///
/// # Signals
///
/// - `current_changed(usize)`: Emitted when the current slide changes
/// - `paused_changed(bool)`: Emitted when autoplay becomes suspended or resumes
pub struct Carousel {
    deck: SlideDeck,
    state: CarouselState,
    autoplay: Autoplay,
    input: InputHandler,

    /// Signal emitted when the current slide changes.
    pub current_changed: Signal<usize>,

    /// Signal emitted when the composite pause flag flips.
    pub paused_changed: Signal<bool>,
}

impl Carousel {
    /// Create a carousel over `deck`, scheduling autoplay on `timers` when
    /// there are at least two slides.
    pub fn new(deck: SlideDeck, config: &CarouselConfig, timers: Arc<SharedTimerManager>) -> Self {
        let state = CarouselState::new(deck.len(), thresholds(config));
        let mut autoplay = Autoplay::new(timers, config.autoplay_interval(), config.autoplay);
        autoplay.sync(deck.len());

        Self {
            deck,
            state,
            autoplay,
            input: InputHandler::new(config.velocity_window()),
            current_changed: Signal::new(),
            paused_changed: Signal::new(),
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn slides(&self) -> &SlideDeck {
        &self.deck
    }

    pub fn slide_count(&self) -> usize {
        self.state.slide_count()
    }

    pub fn current_index(&self) -> usize {
        self.state.current_index()
    }

    /// The slide currently showing, if there are any.
    pub fn current_slide(&self) -> Option<&Slide> {
        self.deck.get(self.state.current_index())
    }

    pub fn is_paused(&self) -> bool {
        self.state.is_paused()
    }

    /// Read-only access to the state machine.
    pub fn state(&self) -> &CarouselState {
        &self.state
    }

    pub fn autoplay(&self) -> &Autoplay {
        &self.autoplay
    }

    /// A presentation snapshot for the renderer.
    pub fn view(&self) -> CarouselView {
        CarouselView::new(&self.state, &self.deck)
    }

    // =========================================================================
    // Operations
    // =========================================================================

    /// Show the slide at `index`, wrapping any integer into range.
    pub fn go_to(&mut self, index: i64) -> bool {
        let before = self.observe();
        let changed = self.state.go_to(index);
        self.notify(before);
        changed
    }

    pub fn next(&mut self) -> bool {
        let before = self.observe();
        let changed = self.state.next();
        self.notify(before);
        changed
    }

    pub fn previous(&mut self) -> bool {
        let before = self.observe();
        let changed = self.state.previous();
        self.notify(before);
        changed
    }

    pub fn begin_drag(&mut self) {
        let before = self.observe();
        self.state.begin_drag();
        self.notify(before);
    }

    pub fn update_drag(&mut self, delta_x: f32) {
        self.state.update_drag(delta_x);
    }

    pub fn end_drag(&mut self, delta_x: f32, velocity_x: f32) -> bool {
        let before = self.observe();
        let changed = self.state.end_drag(delta_x, velocity_x);
        self.notify(before);
        changed
    }

    pub fn set_paused(&mut self, reason: PauseReason, active: bool) {
        let before = self.observe();
        self.state.set_paused(reason, active);
        self.notify(before);
    }

    /// Apply a raw input event. Returns `true` if it was consumed.
    pub fn handle_input(&mut self, event: &InputEvent) -> bool {
        let before = self.observe();
        let consumed = self.input.handle(event, &mut self.state);
        self.notify(before);
        consumed
    }

    /// Handle an expired timer from the host loop.
    ///
    /// Returns `true` if the timer belonged to this carousel.
    pub fn handle_timer(&mut self, id: TimerId) -> bool {
        let before = self.observe();
        let outcome = self.autoplay.tick(id, &mut self.state);
        self.notify(before);
        outcome != TickOutcome::NotOwned
    }

    /// Replace the slides.
    ///
    /// The current index is re-wrapped into the new range immediately, and
    /// autoplay is stopped or restarted to match the new slide count.
    pub fn set_slides(&mut self, deck: SlideDeck) {
        let _span = PerfSpan::new("set_slides");
        let before = self.observe();

        let count = deck.len();
        self.deck = deck;
        self.state.set_slide_count(count);
        if count == 0 {
            self.input.reset_drag();
        }
        self.autoplay.sync(count);

        self.notify(before);
    }

    /// Apply new configuration values without resetting position or pauses.
    pub fn apply_config(&mut self, config: &CarouselConfig) {
        self.state.set_thresholds(thresholds(config));
        self.input.set_velocity_window(config.velocity_window());
        if self.autoplay.interval() != config.autoplay_interval() {
            self.autoplay.set_interval(config.autoplay_interval());
        }
        self.autoplay.set_enabled(config.autoplay, self.state.slide_count());
    }

    /// Cancel autoplay permanently. The carousel stays usable for manual
    /// navigation, but neither [`set_slides`](Self::set_slides) nor
    /// [`apply_config`](Self::apply_config) will schedule it again.
    pub fn shutdown(&mut self) {
        self.autoplay.shutdown();
    }

    fn observe(&self) -> Observed {
        Observed {
            index: self.state.current_index(),
            paused: self.state.is_paused(),
        }
    }

    fn notify(&self, before: Observed) {
        let after = self.observe();
        if after.index != before.index {
            self.current_changed.emit(after.index);
        }
        if after.paused != before.paused {
            self.paused_changed.emit(after.paused);
        }
    }
}

fn thresholds(config: &CarouselConfig) -> SwipeThresholds {
    SwipeThresholds {
        distance: config.swipe_distance_threshold,
        velocity: config.swipe_velocity_threshold,
    }
}

impl std::fmt::Debug for Carousel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Carousel")
            .field("slide_count", &self.state.slide_count())
            .field("state", &self.state)
            .field("autoplay", &self.autoplay)
            .finish_non_exhaustive()
    }
}

// Ensure Carousel is Send + Sync
static_assertions::assert_impl_all!(Carousel: Send, Sync);
