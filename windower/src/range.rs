use crate::types::Measure;

/// Last index in `measures[low..=high]` satisfying `pred`, assuming `pred`
/// is monotone (true then false) over that slice. Falls back to
/// `max(low - 1, 0)` when nothing matches.
pub(crate) fn binary_search_last(
    measures: &[Measure],
    low: usize,
    high: usize,
    pred: impl Fn(&Measure) -> bool,
) -> usize {
    let mut low = low as isize;
    let mut high = high as isize;
    while low <= high {
        let middle = (low + high) / 2;
        if pred(&measures[middle as usize]) {
            low = middle + 1;
        } else {
            high = middle - 1;
        }
    }
    (low - 1).max(0) as usize
}

/// Inclusive range of items intersecting `[offset, offset + extent)`.
///
/// `anchor` seeds the search with the start index of the previous
/// recomputation. Scrolling moves the window by a handful of items per frame,
/// so the anchor usually contains the offset outright, or else halves the
/// search space; it never changes the result.
///
/// An item whose `end` equals `offset` has scrolled fully out and is
/// excluded; one whose `start` equals `offset` is included. An item whose
/// `start` equals `offset + extent` sits fully below and is excluded.
pub(crate) fn visible_range(
    extent: f64,
    offset: f64,
    measures: &[Measure],
    anchor: usize,
) -> Option<(usize, usize)> {
    if measures.is_empty() || extent <= 0.0 {
        return None;
    }
    let max_index = measures.len() - 1;
    let anchor = anchor.min(max_index);
    let offset_end = offset + extent;

    let hint = &measures[anchor];
    let start = if hint.contains(offset) {
        anchor
    } else if hint.start > offset {
        binary_search_last(measures, 0, anchor, |m| m.start <= offset)
    } else {
        binary_search_last(measures, anchor, max_index, |m| m.start <= offset)
    };
    let end = binary_search_last(measures, start, max_index, |m| m.start < offset_end);

    Some((start, end))
}
