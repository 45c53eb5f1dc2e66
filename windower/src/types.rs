/// Last-known on-screen size of the scroll container.
///
/// Refreshed only by the host's size-observation callback; the engine never
/// guesses at it.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// The extent along the scroll axis.
    pub fn extent(&self, horizontal: bool) -> f64 {
        if horizontal { self.width } else { self.height }
    }
}

/// Cached position + size record for one list item.
///
/// A valid store is contiguous: `measures[0].start == 0` and every later
/// `start` equals the previous `end`.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Measure {
    pub index: usize,
    pub start: f64,
    pub size: f64,
    pub end: f64,
}

impl Measure {
    /// Whether `offset` falls inside this item's `[start, end)` interval.
    pub fn contains(&self, offset: f64) -> bool {
        self.start <= offset && offset < self.end
    }
}

/// Target alignment for `scroll_to_item`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Align {
    Start,
    Center,
    End,
    /// Leave the offset alone when the item is already fully visible,
    /// otherwise scroll the minimal distance to bring it into view.
    #[default]
    Auto,
}

/// Immutable descriptor for one rendered (overscanned) item.
///
/// Regenerated on every recomputation; snapshots replace rather than patch.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Item {
    pub index: usize,
    pub start: f64,
    pub size: f64,
    pub end: f64,
    /// Set for configured sticky indexes, including the one floated in from
    /// above the rendered range.
    pub sticky: bool,
    pub viewport: Viewport,
}

/// Extent of the scrollable placeholder frame.
///
/// `offset` is where the rendered range starts, `size` the full scrollable
/// length of the logical list. `size == -1.0` means "empty list" and tells
/// the host to drop the explicit frame size entirely.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Frame {
    pub offset: f64,
    pub size: f64,
}

impl Frame {
    pub const EMPTY: Self = Self {
        offset: 0.0,
        size: -1.0,
    };

    pub fn is_empty(&self) -> bool {
        self.size < 0.0
    }
}

impl Default for Frame {
    fn default() -> Self {
        Self::EMPTY
    }
}

/// The published snapshot: renderable items plus the frame extent.
///
/// Structurally compared before being replaced, so hosts can treat any new
/// snapshot reference as a real change.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EngineState {
    pub items: Vec<Item>,
    pub frame: Frame,
}
