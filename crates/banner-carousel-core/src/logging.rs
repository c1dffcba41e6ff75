//! Logging facilities for Banner Carousel.
//!
//! Banner Carousel uses the `tracing` crate for instrumentation. To see logs,
//! install a subscriber in the host application:
//!
//! ```ignore
//! tracing_subscriber::fmt()
//!     .with_env_filter("banner_carousel=debug,banner_carousel_core::timer=trace")
//!     .init();
//! ```
//!
//! Every event is emitted under one of the [`targets`] so that subsystems can
//! be filtered independently.

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Core framework target.
    pub const CORE: &str = "banner_carousel_core";
    /// Timer system target.
    pub const TIMER: &str = "banner_carousel_core::timer";
    /// Signal/slot system target.
    pub const SIGNAL: &str = "banner_carousel_core::signal";
    /// Carousel state machine target.
    pub const STATE: &str = "banner_carousel::state";
    /// Autoplay scheduling target.
    pub const AUTOPLAY: &str = "banner_carousel::autoplay";
    /// Pointer, focus and keyboard input target.
    pub const INPUT: &str = "banner_carousel::input";
    /// Configuration loading target.
    pub const CONFIG: &str = "banner_carousel::config";
}

/// A guard that keeps a tracing span entered until dropped.
///
/// Useful for timing a whole operation such as swapping in new slide data.
#[derive(Debug)]
pub struct PerfSpan {
    _span: tracing::span::EnteredSpan,
}

impl PerfSpan {
    /// Create and enter a new performance span.
    pub fn new(name: &'static str) -> Self {
        let span = tracing::debug_span!(target: "banner_carousel::perf", "perf", operation = name);
        Self {
            _span: span.entered(),
        }
    }
}

/// Macros for common tracing patterns.
///
/// These are thin wrappers around the `tracing` macros that pin the target to
/// the carousel state machine, where most events originate.
#[macro_export]
macro_rules! carousel_trace {
    ($($arg:tt)*) => {
        tracing::trace!(target: "banner_carousel::state", $($arg)*)
    };
}

#[macro_export]
macro_rules! carousel_debug {
    ($($arg:tt)*) => {
        tracing::debug!(target: "banner_carousel::state", $($arg)*)
    };
}
