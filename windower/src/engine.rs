use crate::error::Error;
use crate::events::{EventFlags, ReachEndEvent, ResizeEvent, ScrollEvent};
use crate::measures::MeasureStore;
use crate::options::EngineOptions;
use crate::range;
use crate::remeasure::RemeasureScheduler;
use crate::types::{Align, EngineState, Frame, Item, Measure, Viewport};

/// Outcome of feeding an observed item size into the engine.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SizeChange {
    /// The size matched what was already recorded (or the index is not
    /// measured yet); nothing to do.
    Unchanged,
    /// The item sits above the viewport, so the scroll offset was shifted by
    /// the size delta to keep visible content pinned in place. The host must
    /// move its scroll position to `scroll_offset` before the next paint.
    Compensated { scroll_offset: f64, delta: f64 },
    /// The item sits at or below the viewport; a recomputation will pick up
    /// the new layout.
    RefreshNeeded,
}

/// The windowing engine: owns the measurement cache and publishes snapshots
/// of what should be rendered.
///
/// Purely synchronous and time-free; anything animated or frame-deferred
/// lives in the adapter crate.
#[derive(Clone, Debug)]
pub struct Engine {
    options: EngineOptions,
    measures: MeasureStore,
    remeasure: RemeasureScheduler,
    viewport: Viewport,
    scroll_offset: f64,
    anchor: usize,
    is_scrolling: bool,
    state: EngineState,
}

impl Engine {
    pub fn new(options: EngineOptions) -> Result<Self, Error> {
        options.validate()?;
        let viewport = options.initial_viewport.unwrap_or_default();
        let initial_offset = options.initial_offset.max(0.0);
        let mut engine = Self {
            options,
            measures: MeasureStore::new(),
            remeasure: RemeasureScheduler::default(),
            viewport,
            scroll_offset: initial_offset,
            anchor: 0,
            is_scrolling: false,
            state: EngineState::default(),
        };
        if engine.options.count > 0 {
            engine.remeasure.mark_stale(0);
        }
        // The first recomputation must deliver reach-end when the viewport is
        // already known and the list renders out fully (or is empty): hosts
        // rely on it to kick off the initial data load.
        engine.update(initial_offset, EventFlags::REACH_END)?;
        wdebug!(
            count = engine.options.count,
            offset = engine.scroll_offset,
            "engine created"
        );
        Ok(engine)
    }

    pub fn options(&self) -> &EngineOptions {
        &self.options
    }

    pub fn state(&self) -> &EngineState {
        &self.state
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn scroll_offset(&self) -> f64 {
        self.scroll_offset
    }

    pub fn is_scrolling(&self) -> bool {
        self.is_scrolling
    }

    /// Mark a scroll gesture as in flight. Affects only the scrollbar-aware
    /// frame hold; the adapter flips this around scroll activity.
    pub fn set_scrolling(&mut self, scrolling: bool) {
        self.is_scrolling = scrolling;
    }

    /// Measurement records in index order. Intended for diagnostics.
    pub fn measures(&self) -> &[Measure] {
        self.measures.as_slice()
    }

    pub fn measure_of(&self, index: usize) -> Option<Measure> {
        self.measures.get(index).copied()
    }

    pub fn scroll_size(&self) -> f64 {
        self.measures.scroll_size()
    }

    fn viewport_extent(&self) -> f64 {
        self.viewport.extent(self.options.horizontal)
    }

    fn max_scroll_offset(&self) -> f64 {
        (self.measures.scroll_size() - self.viewport_extent()).max(0.0)
    }

    /// Clamp an offset into `[0, scroll_size - viewport_extent]`.
    pub fn clamp_offset(&self, offset: f64) -> f64 {
        offset.min(self.max_scroll_offset()).max(0.0)
    }

    /// Lowest index whose measurement is stale, if any.
    pub fn pending_remeasure(&self) -> Option<usize> {
        self.remeasure.pending()
    }

    /// Rebuild the measurement cache from the stale watermark, if one is
    /// pending. Returns whether anything was rebuilt.
    pub fn consume_remeasure(&mut self) -> Result<bool, Error> {
        let Some(from) = self.remeasure.take() else {
            return Ok(false);
        };
        self.measures
            .rebuild_from(from, self.options.count, &self.options.size, self.viewport)?;
        wtrace!(from, count = self.options.count, "measures rebuilt");
        Ok(true)
    }

    /// Replace the viewport and recompute. No-op if the size is unchanged.
    pub fn set_viewport(&mut self, viewport: Viewport) -> Result<bool, Error> {
        if viewport == self.viewport {
            return Ok(false);
        }
        self.viewport = viewport;
        self.update(
            self.scroll_offset,
            EventFlags::RESIZE | EventFlags::REACH_END,
        )
    }

    /// Swap in a new configuration, invalidating only what actually changed:
    /// a different size spec drops every cached measurement, a count change
    /// truncates or extends, everything else takes effect on the recompute.
    pub fn set_options(&mut self, options: EngineOptions) -> Result<bool, Error> {
        options.validate()?;
        let prev_count = self.options.count;
        let size_unchanged = self.options.size.same_identity(&options.size);
        self.options = options;
        if !size_unchanged {
            self.measures.clear();
            self.remeasure.mark_stale(0);
        } else if self.options.count != prev_count {
            let measured = self.measures.len();
            if measured > self.options.count {
                self.measures.truncate(self.options.count);
            } else if measured < self.options.count {
                self.remeasure.mark_stale(measured);
            }
        }
        self.anchor = self.anchor.min(self.options.count.saturating_sub(1));
        self.update(self.scroll_offset, EventFlags::REACH_END)
    }

    pub fn update_options(
        &mut self,
        f: impl FnOnce(&mut EngineOptions),
    ) -> Result<bool, Error> {
        let mut options = self.options.clone();
        f(&mut options);
        self.set_options(options)
    }

    pub fn set_count(&mut self, count: usize) -> Result<bool, Error> {
        self.update_options(|options| options.count = count)
    }

    /// Record an observed item size.
    ///
    /// When the item lies above the viewport the growth or shrink happens in
    /// scrolled-past content, so the offset is shifted by the delta to keep
    /// what the user is looking at stationary.
    pub fn apply_size_event(&mut self, index: usize, size: f64) -> Result<SizeChange, Error> {
        if !(size.is_finite() && size > 0.0) {
            return Err(Error::InvalidSize { index, size });
        }
        let Some(measure) = self.measures.get(index) else {
            return Ok(SizeChange::Unchanged);
        };
        if measure.size == size {
            return Ok(SizeChange::Unchanged);
        }
        let above = measure.start < self.scroll_offset;
        let delta = self.measures.set_size(index, size);
        self.remeasure.mark_stale(index);
        wtrace!(index, size, delta, above, "size observed");
        if above {
            self.scroll_offset += delta;
            Ok(SizeChange::Compensated {
                scroll_offset: self.scroll_offset,
                delta,
            })
        } else {
            Ok(SizeChange::RefreshNeeded)
        }
    }

    /// Scroll offset that brings `index` into view with the given alignment,
    /// clamped to the scrollable range. `None` when the list is empty.
    ///
    /// Consumes any pending remeasure first so the target reflects current
    /// knowledge; with estimated sizes still in play the aim can be off, and
    /// the adapter re-checks after the scroll lands.
    pub fn scroll_target_for(&mut self, index: usize, align: Align) -> Result<Option<f64>, Error> {
        self.consume_remeasure()?;
        if self.measures.is_empty() {
            return Ok(None);
        }
        let max_index = self.measures.len() - 1;
        let measure = self.measures.as_slice()[index.min(max_index)];
        let extent = self.viewport_extent();
        let current = self.scroll_offset;
        let target = match align {
            Align::Start => measure.start,
            Align::Center => measure.start + measure.size / 2.0 - extent / 2.0,
            Align::End => measure.end - extent,
            Align::Auto => {
                if measure.start >= current && measure.end <= current + extent {
                    current
                } else if measure.start < current {
                    measure.start
                } else {
                    measure.end - extent
                }
            }
        };
        Ok(Some(self.clamp_offset(target)))
    }

    /// Recompute the window at `scroll_offset` and publish a snapshot if the
    /// result differs structurally from the current one.
    ///
    /// `events` selects which host callbacks this recomputation may fire.
    /// Returns whether a new snapshot was published.
    pub fn update(&mut self, scroll_offset: f64, events: EventFlags) -> Result<bool, Error> {
        self.consume_remeasure()?;
        let extent = self.viewport_extent();
        let prev_offset = self.scroll_offset;
        let offset = self.clamp_offset(scroll_offset);
        self.scroll_offset = offset;

        let Some((start, end)) =
            range::visible_range(extent, offset, self.measures.as_slice(), self.anchor)
        else {
            let changed = self.publish(EngineState::default());
            if events.contains(EventFlags::RESIZE) {
                if let Some(on_resize) = &self.options.on_resize {
                    on_resize(&ResizeEvent {
                        width: self.viewport.width,
                        height: self.viewport.height,
                        visible: None,
                        rendered: None,
                    });
                }
            }
            if events.contains(EventFlags::REACH_END) && extent > 0.0 {
                if let Some(on_reach_end) = &self.options.on_reach_end {
                    on_reach_end(&ReachEndEvent {
                        offset,
                        index: None,
                        visible: None,
                        rendered: None,
                    });
                }
            }
            return Ok(changed);
        };
        self.anchor = start;

        let max_index = self.measures.len() - 1;
        let over_start = start.saturating_sub(self.options.overscan);
        let over_end = end.saturating_add(self.options.overscan).min(max_index);

        let mut items = Vec::with_capacity(over_end - over_start + 2);
        if let Some(sticky) = self.floated_sticky(start, over_start) {
            items.push(self.item(sticky, true));
        }
        for index in over_start..=over_end {
            items.push(self.item(index, self.is_sticky(index)));
        }
        let frame = self.frame_for(over_start, offset, extent);
        let changed = self.publish(EngineState { items, frame });
        wtrace!(
            offset,
            start,
            end,
            over_start,
            over_end,
            changed,
            "window recomputed"
        );

        if events.contains(EventFlags::RESIZE) {
            if let Some(on_resize) = &self.options.on_resize {
                on_resize(&ResizeEvent {
                    width: self.viewport.width,
                    height: self.viewport.height,
                    visible: Some((start, end)),
                    rendered: Some((over_start, over_end)),
                });
            }
        }
        if events.contains(EventFlags::SCROLL) {
            if let Some(on_scroll) = &self.options.on_scroll {
                on_scroll(&ScrollEvent {
                    offset,
                    delta: offset - prev_offset,
                    forward: offset > prev_offset,
                    user_scroll: events.contains(EventFlags::USER),
                    visible: (start, end),
                    rendered: (over_start, over_end),
                });
            }
        }
        if events.contains(EventFlags::REACH_END)
            && over_end.saturating_add(self.options.reach_threshold) >= max_index
        {
            if let Some(on_reach_end) = &self.options.on_reach_end {
                on_reach_end(&ReachEndEvent {
                    offset,
                    index: Some(end),
                    visible: Some((start, end)),
                    rendered: Some((over_start, over_end)),
                });
            }
        }
        Ok(changed)
    }

    fn is_sticky(&self, index: usize) -> bool {
        self.options.stickies.binary_search(&index).is_ok()
    }

    /// The active sticky for the current window: the last configured index at
    /// or before the visible start. Prepended only when it falls above the
    /// rendered range; otherwise it is already among the rendered items and
    /// just gets flagged in place.
    fn floated_sticky(&self, start: usize, over_start: usize) -> Option<usize> {
        self.options
            .stickies
            .iter()
            .rev()
            .find(|&&sticky| sticky <= start && sticky < self.measures.len())
            .copied()
            .filter(|&sticky| sticky < over_start)
    }

    fn item(&self, index: usize, sticky: bool) -> Item {
        let measure = self.measures.as_slice()[index];
        Item {
            index,
            start: measure.start,
            size: measure.size,
            end: measure.end,
            sticky,
            viewport: self.viewport,
        }
    }

    fn frame_for(&self, over_start: usize, offset: f64, extent: f64) -> Frame {
        let size = self.measures.scroll_size();
        let mut frame = Frame {
            offset: self.measures.as_slice()[over_start].start,
            size,
        };
        if self.options.scrollbar_aware && self.is_scrolling {
            // Mid-gesture shrinks would yank the scrollbar; hold the previous
            // larger size until the gesture settles, unless the viewport
            // bottom has already run past it.
            let prev = self.state.frame.size;
            if size < prev && (offset + extent + 0.5).floor() < prev {
                frame.size = prev;
            }
        }
        frame
    }

    fn publish(&mut self, next: EngineState) -> bool {
        if next == self.state {
            return false;
        }
        self.state = next;
        if let Some(on_change) = &self.options.on_change {
            on_change(&self.state);
        }
        true
    }
}
