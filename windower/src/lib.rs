//! A headless windowing (virtualization) engine for large scrollable lists.
//!
//! Renders only the items intersecting the viewport (plus overscan) out of an
//! arbitrarily long list: cached position measurements, anchor-seeded binary
//! search for offset → index lookup, and snapshot publication gated on
//! structural change. Sizes start as estimates and are corrected by observed
//! measurements, with scroll compensation when an item above the viewport
//! changes size.
//!
//! The engine is UI-agnostic and time-free. A host layer provides:
//! - viewport size and scroll offsets (from its scroll container)
//! - observed item sizes (from whatever measurement facility it has)
//! - a render of [`EngineState`] into actual widgets/DOM/cells
//!
//! Animated scrolls and frame-deferred callbacks live in the
//! `windower-adapter` crate.

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

#[macro_use]
mod macros;

mod engine;
mod error;
mod events;
mod measures;
mod options;
mod range;
mod remeasure;
mod types;


pub use engine::{Engine, SizeChange};
pub use error::Error;
pub use events::{EventFlags, ReachEndEvent, ResizeEvent, ScrollEvent};
pub use options::{
    DurationSpec, EasingFn, EngineOptions, OnChangeCallback, OnReachEndCallback,
    OnResizeCallback, OnScrollCallback, ScrollingConfig, SizeSpec, default_duration,
    ease_in_out_sine,
};
pub use types::{Align, EngineState, Frame, Item, Measure, Viewport};
