use crate::error::Error;
use crate::options::SizeSpec;
use crate::types::{Measure, Viewport};

/// Contiguous prefix-sum cache of item positions.
///
/// Observed sizes live here as the `size` field of each record; rebuilding
/// from a watermark keeps observed sizes in place and only re-derives the
/// `start`/`end` chain below them.
#[derive(Clone, Debug, Default)]
pub(crate) struct MeasureStore {
    measures: Vec<Measure>,
}

impl MeasureStore {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn len(&self) -> usize {
        self.measures.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.measures.is_empty()
    }

    pub(crate) fn get(&self, index: usize) -> Option<&Measure> {
        self.measures.get(index)
    }

    pub(crate) fn as_slice(&self) -> &[Measure] {
        &self.measures
    }

    /// Total scrollable length, 0 when empty.
    pub(crate) fn scroll_size(&self) -> f64 {
        self.measures.last().map_or(0.0, |m| m.end)
    }

    /// Size for `index`: the cached observation if one exists, otherwise the
    /// estimate from `spec`. Estimates are validated on the spot.
    fn resolve_size(&self, index: usize, spec: &SizeSpec, viewport: Viewport) -> Result<f64, Error> {
        if let Some(measure) = self.measures.get(index) {
            return Ok(measure.size);
        }
        let size = spec.resolve(index, viewport);
        if !(size.is_finite() && size > 0.0) {
            return Err(Error::InvalidSize { index, size });
        }
        Ok(size)
    }

    /// Rebuild records from `from` up to `count`, chaining each `start` off
    /// the previous `end`. Shrinks the store first when `count` dropped.
    pub(crate) fn rebuild_from(
        &mut self,
        from: usize,
        count: usize,
        spec: &SizeSpec,
        viewport: Viewport,
    ) -> Result<(), Error> {
        self.measures.truncate(count);
        let mut index = from.min(self.measures.len());
        while index < count {
            let size = self.resolve_size(index, spec, viewport)?;
            let start = if index == 0 {
                0.0
            } else {
                self.measures[index - 1].end
            };
            let measure = Measure {
                index,
                start,
                size,
                end: start + size,
            };
            if index < self.measures.len() {
                self.measures[index] = measure;
            } else {
                self.measures.push(measure);
            }
            index += 1;
        }
        Ok(())
    }

    /// Record an observed size in place, keeping `start` untouched. Records
    /// after `index` go stale; the caller schedules the rebuild. Returns the
    /// size delta.
    pub(crate) fn set_size(&mut self, index: usize, size: f64) -> f64 {
        let measure = &mut self.measures[index];
        let delta = size - measure.size;
        measure.size = size;
        measure.end = measure.start + size;
        delta
    }

    pub(crate) fn clear(&mut self) {
        self.measures.clear();
    }

    pub(crate) fn truncate(&mut self, count: usize) {
        self.measures.truncate(count);
    }
}
