//! Frame-tick driven scroll controller for the `windower` engine.
//!
//! The engine itself is time-free; this crate adds the pieces that need a
//! clock or a frame loop:
//!
//! - animated (smooth) scrolling with configurable easing and duration
//! - `scroll_to_item` with post-landing re-aim when estimated sizes were off
//! - frame-deferred completion callbacks and scroll-settle detection
//!
//! The host drives everything through [`Controller`]: forward user scroll
//! offsets and observed item sizes as they happen, and call
//! [`Controller::tick`] once per frame with the current time in milliseconds.

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

#[macro_use]
mod macros;

mod animation;
mod controller;

#[cfg(test)]
mod tests;

pub use animation::ScrollAnimation;
pub use controller::{
    COMPLETION_DEFER_FRAMES, Controller, SCROLL_SETTLE_FRAMES, ScrollCallback,
    ScrollToItemOptions, ScrollToOptions,
};
