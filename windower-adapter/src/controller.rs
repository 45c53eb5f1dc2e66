use windower::{Align, Engine, EngineOptions, Error, EventFlags, SizeChange, Viewport};

use crate::animation::ScrollAnimation;

/// Frames a completion callback waits after its scroll lands, so the host
/// has painted the final position before the callback observes it.
pub const COMPLETION_DEFER_FRAMES: u32 = 6;

/// Frames without scroll activity before a gesture counts as settled.
pub const SCROLL_SETTLE_FRAMES: u32 = 2;

/// Offsets closer than this are considered the same target; re-aiming stops
/// once the landing point is within it.
const CONVERGENCE_EPSILON: f64 = 0.5;

pub type ScrollCallback = Box<dyn FnOnce() + Send>;

/// Target of a plain offset scroll.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollToOptions {
    pub offset: f64,
    pub smooth: bool,
}

impl ScrollToOptions {
    pub fn new(offset: f64) -> Self {
        Self {
            offset,
            smooth: false,
        }
    }

    pub fn smooth(offset: f64) -> Self {
        Self {
            offset,
            smooth: true,
        }
    }
}

impl From<f64> for ScrollToOptions {
    fn from(offset: f64) -> Self {
        Self::new(offset)
    }
}

/// Target of an item scroll.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollToItemOptions {
    pub index: usize,
    pub align: Align,
    pub smooth: bool,
}

impl ScrollToItemOptions {
    pub fn new(index: usize) -> Self {
        Self {
            index,
            align: Align::Auto,
            smooth: false,
        }
    }

    pub fn with_align(mut self, align: Align) -> Self {
        self.align = align;
        self
    }

    pub fn with_smooth(mut self, smooth: bool) -> Self {
        self.smooth = smooth;
        self
    }
}

impl From<usize> for ScrollToItemOptions {
    fn from(index: usize) -> Self {
        Self::new(index)
    }
}

/// What happens once a scroll's defer window elapses.
enum Completion {
    /// Plain offset scroll: just run the host callback, if any.
    Invoke(Option<ScrollCallback>),
    /// Item scroll: re-derive the target first. Measurements taken while the
    /// scroll was in flight may have moved the item, in which case we re-aim
    /// instead of completing.
    Settle {
        index: usize,
        align: Align,
        smooth: bool,
        expected: f64,
        retries_left: usize,
        callback: Option<ScrollCallback>,
    },
}

struct Deferred {
    frames_left: u32,
    completion: Completion,
}

/// Drives an [`Engine`] from a frame loop.
///
/// All time comes in through `now_ms` arguments; the controller never reads
/// a clock, which keeps animation behavior deterministic under test.
pub struct Controller {
    engine: Engine,
    animation: Option<(ScrollAnimation, Completion)>,
    deferred: Option<Deferred>,
    settle_frames: Option<u32>,
    refresh_pending: bool,
}

impl Controller {
    pub fn new(options: EngineOptions) -> Result<Self, Error> {
        Ok(Self::from_engine(Engine::new(options)?))
    }

    pub fn from_engine(engine: Engine) -> Self {
        Self {
            engine,
            animation: None,
            deferred: None,
            settle_frames: None,
            refresh_pending: false,
        }
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut Engine {
        &mut self.engine
    }

    pub fn into_engine(self) -> Engine {
        self.engine
    }

    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    /// Drop any in-flight animation and pending completion. Their callbacks
    /// never fire.
    pub fn cancel_animation(&mut self) {
        self.animation = None;
        self.deferred = None;
    }

    /// Forward a container resize.
    pub fn on_viewport_resize(&mut self, viewport: Viewport) -> Result<bool, Error> {
        self.engine.set_viewport(viewport)
    }

    /// Forward a user scroll (wheel, drag, keyboard). Supersedes any
    /// programmatic scroll in flight.
    pub fn on_scroll(&mut self, offset: f64) -> Result<bool, Error> {
        self.cancel_animation();
        self.engine.set_scrolling(true);
        self.settle_frames = Some(SCROLL_SETTLE_FRAMES);
        self.engine.update(
            offset,
            EventFlags::SCROLL | EventFlags::REACH_END | EventFlags::USER,
        )
    }

    /// Forward an observed item size.
    ///
    /// Returns the compensated scroll offset the host must apply before the
    /// next paint, when the change happened above the viewport. Does not
    /// cancel an in-flight animation; the item-scroll retry loop absorbs any
    /// drift the observation introduced.
    pub fn observe_size(&mut self, index: usize, size: f64) -> Result<Option<f64>, Error> {
        match self.engine.apply_size_event(index, size)? {
            SizeChange::Unchanged => Ok(None),
            SizeChange::Compensated { scroll_offset, .. } => {
                self.refresh_pending = true;
                Ok(Some(scroll_offset))
            }
            SizeChange::RefreshNeeded => {
                if !self.engine.is_scrolling() {
                    self.refresh_pending = true;
                }
                Ok(None)
            }
        }
    }

    /// Scroll to an offset. Returns the clamped target.
    ///
    /// `callback` runs [`COMPLETION_DEFER_FRAMES`] ticks after the scroll
    /// lands; starting another scroll first discards it.
    pub fn scroll_to(
        &mut self,
        target: impl Into<ScrollToOptions>,
        now_ms: f64,
        callback: Option<ScrollCallback>,
    ) -> Result<f64, Error> {
        self.start_scroll(target.into(), now_ms, Completion::Invoke(callback))
    }

    /// Scroll an item into view. Returns the initial clamped target, or
    /// `None` (running `callback` immediately) when the list is empty.
    ///
    /// The target is computed from possibly-estimated sizes, so after
    /// landing the controller re-derives it and re-aims if it moved, up to
    /// the configured retry limit.
    pub fn scroll_to_item(
        &mut self,
        target: impl Into<ScrollToItemOptions>,
        now_ms: f64,
        callback: Option<ScrollCallback>,
    ) -> Result<Option<f64>, Error> {
        let opts = target.into();
        let Some(offset) = self.engine.scroll_target_for(opts.index, opts.align)? else {
            if let Some(callback) = callback {
                callback();
            }
            return Ok(None);
        };
        let retries_left = self.engine.options().scrolling.retry_limit;
        self.start_scroll(
            ScrollToOptions {
                offset,
                smooth: opts.smooth,
            },
            now_ms,
            Completion::Settle {
                index: opts.index,
                align: opts.align,
                smooth: opts.smooth,
                expected: offset,
                retries_left,
                callback,
            },
        )?;
        Ok(Some(offset))
    }

    /// Advance one frame. Returns the new scroll offset when an animation
    /// moved it, which the host applies to its scroll container.
    pub fn tick(&mut self, now_ms: f64) -> Result<Option<f64>, Error> {
        if self.refresh_pending {
            self.refresh_pending = false;
            let offset = self.engine.scroll_offset();
            self.engine.update(offset, EventFlags::REACH_END)?;
        }

        let mut moved = None;
        if let Some((animation, _)) = &self.animation {
            let animation = *animation;
            let easing = self.engine.options().scrolling.easing.clone();
            let offset = animation.sample(now_ms, easing.as_ref());
            self.engine.set_scrolling(true);
            self.settle_frames = Some(SCROLL_SETTLE_FRAMES);
            self.engine
                .update(offset, EventFlags::SCROLL | EventFlags::REACH_END)?;
            moved = Some(self.engine.scroll_offset());
            if animation.is_done(now_ms) {
                if let Some((_, completion)) = self.animation.take() {
                    self.queue_completion(completion);
                }
            }
        } else if let Some(frames_left) = self.deferred.as_ref().map(|d| d.frames_left) {
            if frames_left > 1 {
                if let Some(deferred) = &mut self.deferred {
                    deferred.frames_left -= 1;
                }
            } else if let Some(deferred) = self.deferred.take() {
                self.run_completion(deferred.completion, now_ms)?;
            }
        }

        if self.animation.is_none() {
            if let Some(frames) = self.settle_frames {
                if frames > 1 {
                    self.settle_frames = Some(frames - 1);
                } else {
                    self.settle_frames = None;
                    self.engine.set_scrolling(false);
                    let offset = self.engine.scroll_offset();
                    self.engine.update(offset, EventFlags::empty())?;
                }
            }
        }
        Ok(moved)
    }

    fn start_scroll(
        &mut self,
        opts: ScrollToOptions,
        now_ms: f64,
        completion: Completion,
    ) -> Result<f64, Error> {
        self.cancel_animation();
        self.engine.consume_remeasure()?;
        let target = self.engine.clamp_offset(opts.offset.max(0.0));
        let current = self.engine.scroll_offset();
        wtrace!(target, current, smooth = opts.smooth, "scroll requested");

        if target == current {
            self.queue_completion(completion);
            return Ok(target);
        }
        if opts.smooth {
            let duration = self
                .engine
                .options()
                .scrolling
                .duration
                .resolve((target - current).abs());
            self.animation = Some((
                ScrollAnimation::new(current, target, now_ms, duration),
                completion,
            ));
        } else {
            self.engine.set_scrolling(true);
            self.settle_frames = Some(SCROLL_SETTLE_FRAMES);
            self.engine
                .update(target, EventFlags::SCROLL | EventFlags::REACH_END)?;
            self.queue_completion(completion);
        }
        Ok(target)
    }

    fn queue_completion(&mut self, completion: Completion) {
        self.deferred = Some(Deferred {
            frames_left: COMPLETION_DEFER_FRAMES,
            completion,
        });
    }

    fn run_completion(&mut self, completion: Completion, now_ms: f64) -> Result<(), Error> {
        match completion {
            Completion::Invoke(callback) => {
                if let Some(callback) = callback {
                    callback();
                }
            }
            Completion::Settle {
                index,
                align,
                smooth,
                expected,
                retries_left,
                callback,
            } => match self.engine.scroll_target_for(index, align)? {
                Some(next) if (next - expected).abs() > CONVERGENCE_EPSILON => {
                    if retries_left == 0 {
                        wwarn!(index, expected, next, "item scroll did not converge");
                        if let Some(callback) = callback {
                            callback();
                        }
                    } else {
                        self.start_scroll(
                            ScrollToOptions {
                                offset: next,
                                smooth,
                            },
                            now_ms,
                            Completion::Settle {
                                index,
                                align,
                                smooth,
                                expected: next,
                                retries_left: retries_left - 1,
                                callback,
                            },
                        )?;
                    }
                }
                _ => {
                    if let Some(callback) = callback {
                        callback();
                    }
                }
            },
        }
        Ok(())
    }
}

impl std::fmt::Debug for Controller {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Controller")
            .field("engine", &self.engine)
            .field("animating", &self.animation.is_some())
            .field("deferred", &self.deferred.as_ref().map(|d| d.frames_left))
            .field("settle_frames", &self.settle_frames)
            .field("refresh_pending", &self.refresh_pending)
            .finish()
    }
}
