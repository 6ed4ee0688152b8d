//! Pure offset ↔ index math for uniform-height rows.
//!
//! Nothing here holds state; [`crate::Window`] calls into these functions on every recompute.

use core::cmp;

use crate::{ViewportState, VisibleRange};

/// The window used before the first viewport measurement: `[0, initial_last_index]`, clamped to
/// the sequence.
pub fn initial_range(len: usize, initial_last_index: usize) -> Option<VisibleRange> {
    let last = len.checked_sub(1)?;
    Some(VisibleRange {
        start: 0,
        end: cmp::min(initial_last_index, last),
    })
}

/// Computes the buffered window for a viewport.
///
/// - raw start: `floor(scroll_offset / item_height)`
/// - end: `min(len - 1, floor((scroll_offset + visible_height) / item_height) + buffer_after)`
/// - start: `max(0, raw_start - buffer_before)`, then clamped to `end`
///
/// The final clamp only matters when the viewport lies entirely past the last row; the
/// window then collapses onto the last item instead of inverting.
pub fn compute_visible_range(
    len: usize,
    item_height: u32,
    viewport: ViewportState,
    buffer_before: usize,
    buffer_after: usize,
) -> Option<VisibleRange> {
    let last = len.checked_sub(1)?;
    let height = item_height.max(1) as u64;

    let raw_start = offset_to_index(viewport.scroll_offset, height);
    let raw_end = offset_to_index(viewport.bottom(), height).saturating_add(buffer_after);

    let end = cmp::min(last, raw_end);
    let start = cmp::min(raw_start.saturating_sub(buffer_before), end);
    Some(VisibleRange { start, end })
}

/// Total scrollable extent of `len` rows.
pub fn total_height(len: usize, item_height: u32) -> u64 {
    (len as u64).saturating_mul(item_height as u64)
}

/// Absolute offset of the row at `index`.
pub fn index_offset(index: usize, item_height: u32) -> u64 {
    (index as u64).saturating_mul(item_height as u64)
}

fn offset_to_index(offset: u64, height: u64) -> usize {
    usize::try_from(offset / height).unwrap_or(usize::MAX)
}
