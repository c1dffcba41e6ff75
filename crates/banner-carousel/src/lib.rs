//! Notification-banner carousel for Banner Carousel.
//!
//! This crate implements the interaction logic of a banner carousel:
//!
//! - **State machine**: current index with modulo wrap, composable pause
//!   reasons, drag offset and swipe commit thresholds
//! - **Autoplay**: fixed-cadence advancement that skips paused ticks and is
//!   cancelled whenever there is nothing to cycle through
//! - **Input**: pointer drag, hover, focus, arrow keys and indicator clicks
//! - **View**: a read-only snapshot with accessibility labels for the renderer
//!
//! Rendering is left to the host; see [`CarouselView`].
//!
//! # Example
//!
//! ```
//! use banner_carousel::{Carousel, CarouselConfig, SlideDeck};
//! use banner_carousel_core::{ManualClock, SharedTimerManager};
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! let clock = ManualClock::new();
//! let timers = Arc::new(SharedTimerManager::with_clock(Arc::new(clock.clone())));
//! let deck = SlideDeck::from_json(r#"[{"id": "a"}, {"id": "b"}]"#).unwrap();
//! let config = CarouselConfig::from_toml_str("autoplay_interval_ms = 1000").unwrap();
//! let mut carousel = Carousel::new(deck, &config, timers.clone());
//!
//! clock.advance(Duration::from_millis(1000));
//! for id in timers.process_expired() {
//!     carousel.handle_timer(id);
//! }
//! assert_eq!(carousel.current_index(), 1);
//! ```

mod autoplay;
mod carousel;
mod config;
mod error;
mod input;
mod slide;
mod state;
mod view;

pub use autoplay::{Autoplay, TickOutcome};
pub use carousel::Carousel;
pub use config::{
    CarouselConfig, DEFAULT_AUTOPLAY_INTERVAL_MS, DEFAULT_SWIPE_DISTANCE_THRESHOLD,
    DEFAULT_SWIPE_VELOCITY_THRESHOLD, DEFAULT_VELOCITY_WINDOW_MS,
};
pub use error::{Error, Result};
pub use input::{InputEvent, InputHandler, Key};
pub use slide::{Slide, SlideDeck, SlideId, SlideStyle};
pub use state::{CarouselState, Direction, PauseFlags, PauseReason, SwipeThresholds};
pub use view::{
    CarouselView, IndicatorView, SlideView, CAROUSEL_ROLE_DESCRIPTION, SLIDE_ROLE_DESCRIPTION,
};
