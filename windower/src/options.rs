use std::f64::consts::PI;
use std::fmt;
use std::sync::Arc;

use crate::error::Error;
use crate::events::{ReachEndEvent, ResizeEvent, ScrollEvent};
use crate::types::{EngineState, Viewport};

/// Estimated item size: a constant, or a function of index and viewport.
///
/// The function form makes sizes responsive to container resizes; observed
/// sizes always win over either form once recorded.
#[derive(Clone)]
pub enum SizeSpec {
    Fixed(f64),
    PerItem(Arc<dyn Fn(usize, Viewport) -> f64 + Send + Sync>),
}

impl SizeSpec {
    pub fn fixed(size: f64) -> Self {
        Self::Fixed(size)
    }

    pub fn per_item(f: impl Fn(usize, Viewport) -> f64 + Send + Sync + 'static) -> Self {
        Self::PerItem(Arc::new(f))
    }

    pub fn resolve(&self, index: usize, viewport: Viewport) -> f64 {
        match self {
            Self::Fixed(size) => *size,
            Self::PerItem(f) => f(index, viewport),
        }
    }

    /// Identity comparison, matching how hosts reason about "the same size
    /// function": fixed values by value, closures by pointer.
    pub(crate) fn same_identity(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Fixed(a), Self::Fixed(b)) => a == b,
            (Self::PerItem(a), Self::PerItem(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl fmt::Debug for SizeSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fixed(size) => f.debug_tuple("Fixed").field(size).finish(),
            Self::PerItem(_) => f.debug_tuple("PerItem").field(&"<fn>").finish(),
        }
    }
}

/// Animated scroll duration: fixed milliseconds, or derived from the scroll
/// distance in pixels.
#[derive(Clone)]
pub enum DurationSpec {
    Millis(f64),
    PerDistance(Arc<dyn Fn(f64) -> f64 + Send + Sync>),
}

impl DurationSpec {
    pub fn per_distance(f: impl Fn(f64) -> f64 + Send + Sync + 'static) -> Self {
        Self::PerDistance(Arc::new(f))
    }

    /// Resolved duration in milliseconds, floored at 1 so a degenerate
    /// function result cannot stall an animation forever.
    pub fn resolve(&self, distance: f64) -> f64 {
        let ms = match self {
            Self::Millis(ms) => *ms,
            Self::PerDistance(f) => f(distance),
        };
        ms.max(1.0)
    }
}

impl fmt::Debug for DurationSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Millis(ms) => f.debug_tuple("Millis").field(ms).finish(),
            Self::PerDistance(_) => f.debug_tuple("PerDistance").field(&"<fn>").finish(),
        }
    }
}

pub type EasingFn = Arc<dyn Fn(f64) -> f64 + Send + Sync>;

/// Default easing: ease-in-out sine.
pub fn ease_in_out_sine(t: f64) -> f64 {
    (1.0 - (PI * t).cos()) / 2.0
}

/// Default duration: 0.075 ms per pixel of distance, clamped to 100..=500 ms.
pub fn default_duration(distance: f64) -> f64 {
    (distance * 0.075).clamp(100.0, 500.0)
}

/// Tuning for animated scrolls.
#[derive(Clone)]
pub struct ScrollingConfig {
    pub easing: EasingFn,
    pub duration: DurationSpec,
    /// How many times `scroll_to_item` may re-aim after landing on a target
    /// that moved underneath it (estimated sizes corrected mid-flight).
    pub retry_limit: usize,
}

impl Default for ScrollingConfig {
    fn default() -> Self {
        Self {
            easing: Arc::new(ease_in_out_sine),
            duration: DurationSpec::per_distance(default_duration),
            retry_limit: 8,
        }
    }
}

impl fmt::Debug for ScrollingConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScrollingConfig")
            .field("easing", &"<fn>")
            .field("duration", &self.duration)
            .field("retry_limit", &self.retry_limit)
            .finish()
    }
}

pub type OnResizeCallback = Arc<dyn Fn(&ResizeEvent) + Send + Sync>;
pub type OnScrollCallback = Arc<dyn Fn(&ScrollEvent) + Send + Sync>;
pub type OnReachEndCallback = Arc<dyn Fn(&ReachEndEvent) + Send + Sync>;
pub type OnChangeCallback = Arc<dyn Fn(&EngineState) + Send + Sync>;

/// Engine configuration. Cheap to clone; closures are shared by `Arc`.
#[derive(Clone)]
pub struct EngineOptions {
    /// Logical item count.
    pub count: usize,
    /// Estimated item size along the scroll axis.
    pub size: SizeSpec,
    /// Extra items rendered on each side of the visible range.
    pub overscan: usize,
    /// Scroll along the x axis instead of y.
    pub horizontal: bool,
    /// Sticky item indexes, strictly ascending.
    pub stickies: Vec<usize>,
    /// Fire `on_reach_end` this many items before the actual end.
    pub reach_threshold: usize,
    /// While scrolling, hold the frame size at its previous larger value so
    /// the scrollbar does not flicker when a shrink lands mid-gesture.
    pub scrollbar_aware: bool,
    pub scrolling: ScrollingConfig,
    pub initial_viewport: Option<Viewport>,
    pub initial_offset: f64,
    pub on_resize: Option<OnResizeCallback>,
    pub on_scroll: Option<OnScrollCallback>,
    pub on_reach_end: Option<OnReachEndCallback>,
    /// Fired with every newly published snapshot.
    pub on_change: Option<OnChangeCallback>,
}

impl EngineOptions {
    pub fn new(count: usize, size: SizeSpec) -> Self {
        Self {
            count,
            size,
            overscan: 10,
            horizontal: false,
            stickies: Vec::new(),
            reach_threshold: 0,
            scrollbar_aware: true,
            scrolling: ScrollingConfig::default(),
            initial_viewport: None,
            initial_offset: 0.0,
            on_resize: None,
            on_scroll: None,
            on_reach_end: None,
            on_change: None,
        }
    }

    pub fn with_overscan(mut self, overscan: usize) -> Self {
        self.overscan = overscan;
        self
    }

    pub fn with_horizontal(mut self, horizontal: bool) -> Self {
        self.horizontal = horizontal;
        self
    }

    pub fn with_stickies(mut self, stickies: Vec<usize>) -> Self {
        self.stickies = stickies;
        self
    }

    pub fn with_reach_threshold(mut self, threshold: usize) -> Self {
        self.reach_threshold = threshold;
        self
    }

    pub fn with_scrollbar_aware(mut self, aware: bool) -> Self {
        self.scrollbar_aware = aware;
        self
    }

    pub fn with_scrolling(mut self, scrolling: ScrollingConfig) -> Self {
        self.scrolling = scrolling;
        self
    }

    pub fn with_initial_viewport(mut self, viewport: Viewport) -> Self {
        self.initial_viewport = Some(viewport);
        self
    }

    pub fn with_initial_offset(mut self, offset: f64) -> Self {
        self.initial_offset = offset;
        self
    }

    pub fn with_on_resize(mut self, f: impl Fn(&ResizeEvent) + Send + Sync + 'static) -> Self {
        self.on_resize = Some(Arc::new(f));
        self
    }

    pub fn with_on_scroll(mut self, f: impl Fn(&ScrollEvent) + Send + Sync + 'static) -> Self {
        self.on_scroll = Some(Arc::new(f));
        self
    }

    pub fn with_on_reach_end(mut self, f: impl Fn(&ReachEndEvent) + Send + Sync + 'static) -> Self {
        self.on_reach_end = Some(Arc::new(f));
        self
    }

    pub fn with_on_change(mut self, f: impl Fn(&EngineState) + Send + Sync + 'static) -> Self {
        self.on_change = Some(Arc::new(f));
        self
    }

    pub(crate) fn validate(&self) -> Result<(), Error> {
        if let SizeSpec::Fixed(size) = &self.size {
            if !(size.is_finite() && *size > 0.0) {
                return Err(Error::InvalidSize {
                    index: 0,
                    size: *size,
                });
            }
        }
        if self.stickies.windows(2).any(|pair| pair[0] >= pair[1]) {
            return Err(Error::InvalidStickies);
        }
        if let DurationSpec::Millis(ms) = &self.scrolling.duration {
            if !(ms.is_finite() && *ms > 0.0) {
                return Err(Error::InvalidDuration(*ms));
            }
        }
        Ok(())
    }
}

impl fmt::Debug for EngineOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EngineOptions")
            .field("count", &self.count)
            .field("size", &self.size)
            .field("overscan", &self.overscan)
            .field("horizontal", &self.horizontal)
            .field("stickies", &self.stickies)
            .field("reach_threshold", &self.reach_threshold)
            .field("scrollbar_aware", &self.scrollbar_aware)
            .field("scrolling", &self.scrolling)
            .field("initial_viewport", &self.initial_viewport)
            .field("initial_offset", &self.initial_offset)
            .finish_non_exhaustive()
    }
}
