/// An in-flight animated scroll from one offset to another.
///
/// Pure sampling, no clock of its own: the controller feeds it `now_ms` on
/// every tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollAnimation {
    from: f64,
    to: f64,
    start_ms: f64,
    duration_ms: f64,
}

impl ScrollAnimation {
    pub fn new(from: f64, to: f64, start_ms: f64, duration_ms: f64) -> Self {
        Self {
            from,
            to,
            start_ms,
            duration_ms: duration_ms.max(1.0),
        }
    }

    pub fn target(&self) -> f64 {
        self.to
    }

    pub fn is_done(&self, now_ms: f64) -> bool {
        now_ms - self.start_ms >= self.duration_ms
    }

    /// Offset at `now_ms` under `easing`, with progress clamped to `[0, 1]`.
    pub fn sample(&self, now_ms: f64, easing: &dyn Fn(f64) -> f64) -> f64 {
        let progress = ((now_ms - self.start_ms) / self.duration_ms).clamp(0.0, 1.0);
        self.from + easing(progress) * (self.to - self.from)
    }
}
