//! Core systems for Banner Carousel.
//!
//! This crate provides the host-environment facilities the carousel widget
//! sits on:
//!
//! - **Clock**: Monotonic time source, swappable for deterministic tests
//! - **Timers**: One-shot and repeating timers with fixed-cadence repetition
//! - **Signal/Slot System**: Synchronous change notification
//! - **Logging**: `tracing` targets and helper macros
//!
//! # Timer Example
//!
//! ```
//! use banner_carousel_core::{ManualClock, SharedTimerManager};
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! let clock = ManualClock::new();
//! let timers = SharedTimerManager::with_clock(Arc::new(clock.clone()));
//! let id = timers.start_repeating(Duration::from_millis(500)).unwrap();
//!
//! clock.advance(Duration::from_millis(500));
//! assert_eq!(timers.process_expired(), vec![id]);
//! ```

mod clock;
mod error;
pub mod logging;
pub mod signal;
mod timer;

pub use clock::{Clock, ManualClock, SystemClock};
pub use error::{CoreError, Result, SignalError, TimerError};
pub use logging::PerfSpan;
pub use signal::{ConnectionId, Signal};
pub use timer::{SharedTimerManager, TimerId, TimerKind, TimerManager};
