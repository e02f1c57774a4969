//! Core types shared by the carbonzero crates.
//!
//! Colors, plain geometry, the page palette and the frame/timer clocks that
//! stand in for the host's animation-frame and interval facilities.

mod color;
mod geometry;
pub mod palette;
mod timing;

pub use color::Rgba;
pub use geometry::{Point, Size};
pub use timing::{FrameClock, FrameScheduler, Interval};
