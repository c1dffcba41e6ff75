//! Read-only presentation snapshot.
//!
//! The rendering layer never touches [`CarouselState`] directly. It asks the
//! carousel for a [`CarouselView`] and maps that onto markup, transforms and
//! accessibility attributes.

use crate::slide::{SlideDeck, SlideId};
use crate::state::{CarouselState, Direction, PauseFlags};

/// `aria-roledescription` of the carousel container.
pub const CAROUSEL_ROLE_DESCRIPTION: &str = "carousel";

/// `aria-roledescription` of each slide.
pub const SLIDE_ROLE_DESCRIPTION: &str = "slide";

/// Presentation data for one slide.
#[derive(Debug, Clone, PartialEq)]
pub struct SlideView {
    pub index: usize,
    pub id: SlideId,
    /// Accessible label, e.g. `"2 of 5"`.
    pub label: String,
    pub is_current: bool,
    /// Shortest signed distance from the current slide around the cycle.
    ///
    /// `0` for the current slide, `1` for the next one, `-1` for the previous
    /// one. On even-sized decks the slide directly opposite is reported as
    /// positive.
    pub relative_position: i64,
}

impl SlideView {
    pub fn role_description(&self) -> &'static str {
        SLIDE_ROLE_DESCRIPTION
    }
}

/// Presentation data for one navigation indicator (tab).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndicatorView {
    pub index: usize,
    /// Value of `aria-selected`.
    pub selected: bool,
    /// Accessible label, e.g. `"Go to slide 3"`.
    pub label: String,
}

/// A snapshot of everything the renderer needs.
#[derive(Debug, Clone, PartialEq)]
pub struct CarouselView {
    pub current_index: usize,
    pub slide_count: usize,
    pub paused: bool,
    pub pause_reasons: PauseFlags,
    pub drag_offset: f32,
    pub direction: Option<Direction>,
    pub slides: Vec<SlideView>,
    pub indicators: Vec<IndicatorView>,
}

impl CarouselView {
    /// Build a snapshot of `state` over `deck`.
    pub fn new(state: &CarouselState, deck: &SlideDeck) -> Self {
        let count = deck.len();
        let current = state.current_index();

        let slides = deck
            .iter()
            .enumerate()
            .map(|(index, slide)| SlideView {
                index,
                id: slide.id.clone(),
                label: format!("{} of {}", index + 1, count),
                is_current: index == current,
                relative_position: relative_position(index, current, count),
            })
            .collect();

        let indicators = (0..count)
            .map(|index| IndicatorView {
                index,
                selected: index == current,
                label: format!("Go to slide {}", index + 1),
            })
            .collect();

        Self {
            current_index: current,
            slide_count: count,
            paused: state.is_paused(),
            pause_reasons: state.pause_reasons(),
            drag_offset: state.drag_offset(),
            direction: state.direction(),
            slides,
            indicators,
        }
    }

    pub fn role_description(&self) -> &'static str {
        CAROUSEL_ROLE_DESCRIPTION
    }

    /// The view of the current slide, if there are any slides.
    pub fn current_slide(&self) -> Option<&SlideView> {
        self.slides.get(self.current_index)
    }

    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }
}

fn relative_position(index: usize, current: usize, count: usize) -> i64 {
    if count == 0 {
        return 0;
    }
    let count = count as i64;
    let forward = (index as i64 - current as i64).rem_euclid(count);
    if forward * 2 > count {
        forward - count
    } else {
        forward
    }
}
