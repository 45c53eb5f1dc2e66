/// Watermark of the lowest index whose measurement is known stale.
///
/// Size observations fire asynchronously and possibly for many items in the
/// same paint; batching them into one watermark and deferring the re-walk to
/// the next recomputation keeps invalidation O(1) per observation.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct RemeasureScheduler {
    pending: Option<usize>,
}

impl RemeasureScheduler {
    pub(crate) fn mark_stale(&mut self, index: usize) {
        self.pending = Some(match self.pending {
            Some(pending) => pending.min(index),
            None => index,
        });
    }

    pub(crate) fn take(&mut self) -> Option<usize> {
        self.pending.take()
    }

    pub(crate) fn pending(&self) -> Option<usize> {
        self.pending
    }
}
