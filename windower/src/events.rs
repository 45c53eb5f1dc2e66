bitflags::bitflags! {
    /// Which callbacks a recomputation is allowed to fire.
    ///
    /// Distinguishing the event kinds keeps a resize-triggered update from
    /// spuriously reporting a scroll with a stale delta, and vice versa.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct EventFlags: u8 {
        const RESIZE = 1 << 0;
        const SCROLL = 1 << 1;
        const REACH_END = 1 << 2;
        /// Modifier: the scroll offset came from the user (wheel/drag), not
        /// from a programmatic scroll the engine issued itself.
        const USER = 1 << 3;
    }
}

/// Payload for `on_resize`.
///
/// `visible`/`rendered` are `None` when the recomputation produced an empty
/// range (no items, or a zero-size viewport).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ResizeEvent {
    pub width: f64,
    pub height: f64,
    pub visible: Option<(usize, usize)>,
    pub rendered: Option<(usize, usize)>,
}

/// Payload for `on_scroll`. Only fired for non-empty ranges.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollEvent {
    pub offset: f64,
    /// Offset change relative to the previous recomputation.
    pub delta: f64,
    pub forward: bool,
    pub user_scroll: bool,
    pub visible: (usize, usize),
    pub rendered: (usize, usize),
}

/// Payload for `on_reach_end`.
///
/// `index` is `None` when the list is empty (there was nothing to reach);
/// hosts typically use that to kick off the initial data load.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ReachEndEvent {
    pub offset: f64,
    pub index: Option<usize>,
    pub visible: Option<(usize, usize)>,
    pub rendered: Option<(usize, usize)>,
}
