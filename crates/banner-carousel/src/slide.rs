//! Banner slide records and the ordered deck the carousel indexes into.
//!
//! Slides are produced by a data provider before the carousel is built and
//! never change afterwards. The carousel only ever refers to them by index.
//!
//! # Example
//!
//! ```
//! use banner_carousel::{Slide, SlideDeck};
//!
//! let deck = SlideDeck::new(vec![
//!     Slide::new("tour").with_message("Summer tour dates announced"),
//!     Slide::new("release").with_message("New EP out Friday"),
//! ])
//! .unwrap();
//!
//! assert_eq!(deck.len(), 2);
//! assert_eq!(deck.position(&"release".into()), Some(1));
//! ```

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Opaque, stable identifier of a slide, unique within a deck.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SlideId(String);

impl SlideId {
    /// Create an id from any string-like value.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SlideId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SlideId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for SlideId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Display hints for a slide.
///
/// These are passed through to the presentation layer untouched; the state
/// machine never reads them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SlideStyle {
    pub font_family: Option<String>,
    pub font_size: Option<f32>,
    pub text_color: Option<String>,
    pub background_color: Option<String>,
    /// Rotation of the message text, in degrees.
    pub rotation: Option<f32>,
    /// Horizontal position of the message, as a percentage of the slide width.
    pub position_x: Option<f32>,
    /// Vertical position of the message, as a percentage of the slide height.
    pub position_y: Option<f32>,
}

/// One banner record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Slide {
    pub id: SlideId,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub secondary_message: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub link_url: Option<String>,
    #[serde(default)]
    pub style: SlideStyle,
    /// How long the presentation layer would like this slide shown, in
    /// milliseconds. Autoplay runs on the configured interval regardless.
    #[serde(default)]
    pub display_duration_ms: Option<u64>,
}

impl Slide {
    /// Create a slide with only an id.
    pub fn new(id: impl Into<SlideId>) -> Self {
        Self {
            id: id.into(),
            message: None,
            secondary_message: None,
            image_url: None,
            link_url: None,
            style: SlideStyle::default(),
            display_duration_ms: None,
        }
    }

    /// Set the primary message using builder pattern.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Set the secondary message using builder pattern.
    pub fn with_secondary_message(mut self, message: impl Into<String>) -> Self {
        self.secondary_message = Some(message.into());
        self
    }

    /// Set the image URL using builder pattern.
    pub fn with_image_url(mut self, url: impl Into<String>) -> Self {
        self.image_url = Some(url.into());
        self
    }

    /// Set the link URL using builder pattern.
    pub fn with_link_url(mut self, url: impl Into<String>) -> Self {
        self.link_url = Some(url.into());
        self
    }

    /// Set the display hints using builder pattern.
    pub fn with_style(mut self, style: SlideStyle) -> Self {
        self.style = style;
        self
    }
}

/// An ordered, immutable sequence of slides with unique ids.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Slide>", into = "Vec<Slide>")]
pub struct SlideDeck {
    slides: Vec<Slide>,
}

impl SlideDeck {
    /// Build a deck, rejecting duplicate slide ids.
    pub fn new(slides: Vec<Slide>) -> Result<Self> {
        let mut seen = HashSet::with_capacity(slides.len());
        for slide in &slides {
            if !seen.insert(&slide.id) {
                return Err(Error::DuplicateSlideId(slide.id.clone()));
            }
        }
        Ok(Self { slides })
    }

    /// An empty deck.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Parse a deck from a JSON array of slide records.
    pub fn from_json(json: &str) -> Result<Self> {
        let slides: Vec<Slide> = serde_json::from_str(json)?;
        Self::new(slides)
    }

    /// Number of slides.
    pub fn len(&self) -> usize {
        self.slides.len()
    }

    /// Whether the deck has no slides.
    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    /// The slide at `index`, if any.
    pub fn get(&self, index: usize) -> Option<&Slide> {
        self.slides.get(index)
    }

    /// Index of the slide with the given id.
    pub fn position(&self, id: &SlideId) -> Option<usize> {
        self.slides.iter().position(|slide| &slide.id == id)
    }

    /// Iterate slides in display order.
    pub fn iter(&self) -> std::slice::Iter<'_, Slide> {
        self.slides.iter()
    }
}

impl TryFrom<Vec<Slide>> for SlideDeck {
    type Error = Error;

    fn try_from(slides: Vec<Slide>) -> Result<Self> {
        Self::new(slides)
    }
}

impl From<SlideDeck> for Vec<Slide> {
    fn from(deck: SlideDeck) -> Self {
        deck.slides
    }
}

impl<'a> IntoIterator for &'a SlideDeck {
    type Item = &'a Slide;
    type IntoIter = std::slice::Iter<'a, Slide>;

    fn into_iter(self) -> Self::IntoIter {
        self.slides.iter()
    }
}
