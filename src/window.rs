use alloc::vec::Vec;
use core::cell::Cell;

use crate::range::{compute_visible_range, index_offset, initial_range, total_height};
use crate::{Align, PositionedItem, ViewportState, VisibleRange, WindowOptions, WindowPhase};

/// The windowing engine behind [`crate::WindowedList`].
///
/// This type is UI-agnostic:
/// - It never touches the items themselves, only the sequence length.
/// - Your adapter (or [`crate::Mounted`]) feeds it viewport snapshots.
/// - The visible range is recomputed synchronously on every input change, so it is never stale
///   with respect to the last event applied.
#[derive(Clone, Debug)]
pub struct Window {
    options: WindowOptions,
    len: usize,
    phase: WindowPhase,
    viewport: ViewportState,
    range: Option<VisibleRange>,

    notify_depth: Cell<usize>,
    notify_pending: Cell<bool>,
}

impl Window {
    /// Creates an engine in the `Uninitialized` phase with the default window applied.
    pub fn new(len: usize, options: WindowOptions) -> Self {
        wdebug!(
            len,
            item_height = options.item_height,
            buffer_before = options.buffer_before,
            buffer_after = options.buffer_after,
            "Window::new"
        );
        let range = initial_range(len, options.initial_last_index);
        Self {
            options,
            len,
            phase: WindowPhase::Uninitialized,
            viewport: ViewportState::default(),
            range,
            notify_depth: Cell::new(0),
            notify_pending: Cell::new(false),
        }
    }

    pub fn options(&self) -> &WindowOptions {
        &self.options
    }

    pub fn set_options(&mut self, options: WindowOptions) {
        self.options = options;
        wtrace!(
            item_height = self.options.item_height,
            buffer_before = self.options.buffer_before,
            buffer_after = self.options.buffer_after,
            "Window::set_options"
        );
        self.recompute_inner(false);
    }

    /// Clones the current options, applies `f`, then delegates to `set_options`.
    pub fn update_options(&mut self, f: impl FnOnce(&mut WindowOptions)) {
        let mut next = self.options.clone();
        f(&mut next);
        self.set_options(next);
    }

    pub fn set_on_change(&mut self, on_change: Option<impl Fn(&Window) + Send + Sync + 'static>) {
        self.options.on_change = on_change.map(|f| alloc::sync::Arc::new(f) as _);
    }

    fn notify_now(&self) {
        if let Some(cb) = &self.options.on_change {
            cb(self);
        }
    }

    fn notify(&self) {
        if self.notify_depth.get() > 0 {
            self.notify_pending.set(true);
            return;
        }
        self.notify_now();
    }

    /// Batches multiple updates into a single `on_change` notification.
    ///
    /// Useful when a frame changes the sequence length and the viewport together: each setter
    /// recomputes the range, but the callback only runs once, after `f` returns.
    pub fn batch_update(&mut self, f: impl FnOnce(&mut Self)) {
        let depth = self.notify_depth.get();
        self.notify_depth.set(depth.saturating_add(1));

        f(self);

        let depth = self.notify_depth.get();
        debug_assert!(depth > 0, "notify_depth underflow");
        let next = depth.saturating_sub(1);
        self.notify_depth.set(next);

        if next == 0 && self.notify_pending.replace(false) {
            self.notify_now();
        }
    }

    pub fn phase(&self) -> WindowPhase {
        self.phase
    }

    pub fn is_tracking(&self) -> bool {
        self.phase == WindowPhase::Tracking
    }

    pub fn viewport(&self) -> ViewportState {
        self.viewport
    }

    /// Applies a viewport measurement from the scroll host.
    ///
    /// The first call moves the engine from `Uninitialized` to `Tracking`.
    pub fn apply_viewport(&mut self, viewport: ViewportState) {
        wtrace!(
            scroll_offset = viewport.scroll_offset,
            visible_height = viewport.visible_height,
            "apply_viewport"
        );
        let entered_tracking = self.phase != WindowPhase::Tracking;
        self.viewport = viewport;
        self.phase = WindowPhase::Tracking;
        self.recompute_inner(entered_tracking);
    }

    /// Drops back to `Uninitialized`, discarding the measured viewport.
    pub fn reset(&mut self) {
        wdebug!(len = self.len, "Window::reset");
        let left_tracking = self.phase != WindowPhase::Uninitialized;
        self.phase = WindowPhase::Uninitialized;
        self.viewport = ViewportState::default();
        self.recompute_inner(left_tracking);
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Updates the sequence length and re-clamps the range before anything can render it.
    pub fn set_len(&mut self, len: usize) {
        if self.len == len {
            return;
        }
        wtrace!(from = self.len, to = len, "set_len");
        self.len = len;
        self.recompute_inner(false);
    }

    pub fn item_height(&self) -> u32 {
        self.options.effective_item_height()
    }

    pub fn set_item_height(&mut self, item_height: u32) {
        if item_height == 0 {
            wwarn!("set_item_height: zero item height clamped to 1");
        }
        let item_height = item_height.max(1);
        if self.options.item_height == item_height {
            return;
        }
        self.options.item_height = item_height;
        self.recompute_inner(false);
    }

    pub fn set_buffers(&mut self, buffer_before: usize, buffer_after: usize) {
        self.options.buffer_before = buffer_before;
        self.options.buffer_after = buffer_after;
        self.recompute_inner(false);
    }

    /// Recomputes the range from the current inputs and returns it.
    ///
    /// Every setter already does this; calling it again with unchanged inputs yields the same
    /// range and fires no notification.
    pub fn recompute(&mut self) -> Option<VisibleRange> {
        self.recompute_inner(false);
        self.range
    }

    fn recompute_inner(&mut self, force_notify: bool) {
        let next = match self.phase {
            WindowPhase::Uninitialized => initial_range(self.len, self.options.initial_last_index),
            WindowPhase::Tracking => self.range_for(self.viewport),
        };
        let changed = next != self.range;
        if changed {
            wtrace!(?next, "visible range changed");
            self.range = next;
        }
        if changed || force_notify {
            self.notify();
        }
    }

    /// The range currently materialized, or `None` for an empty sequence.
    pub fn range(&self) -> Option<VisibleRange> {
        self.range
    }

    /// The range a given viewport would produce, without applying it.
    pub fn range_for(&self, viewport: ViewportState) -> Option<VisibleRange> {
        compute_visible_range(
            self.len,
            self.item_height(),
            viewport,
            self.options.buffer_before,
            self.options.buffer_after,
        )
    }

    pub fn total_height(&self) -> u64 {
        total_height(self.len, self.item_height())
    }

    /// Offset of the materialized block, i.e. the start of the first rendered row.
    pub fn block_offset(&self) -> u64 {
        self.range
            .map(|r| index_offset(r.start, self.item_height()))
            .unwrap_or(0)
    }

    pub fn item_offset(&self, index: usize) -> Option<u64> {
        (index < self.len).then(|| index_offset(index, self.item_height()))
    }

    pub fn item(&self, index: usize) -> Option<PositionedItem> {
        let offset = self.item_offset(index)?;
        Some(PositionedItem {
            index,
            offset,
            height: self.item_height(),
        })
    }

    /// The row under `offset`, clamped to the last row.
    pub fn index_at_offset(&self, offset: u64) -> Option<usize> {
        let last = self.len.checked_sub(1)?;
        let index = usize::try_from(offset / self.item_height() as u64).unwrap_or(usize::MAX);
        Some(index.min(last))
    }

    pub fn for_each_visible_item(&self, mut f: impl FnMut(PositionedItem)) {
        let Some(range) = self.range else {
            return;
        };
        let height = self.item_height();
        let mut offset = index_offset(range.start, height);
        for index in range.indexes() {
            f(PositionedItem {
                index,
                offset,
                height,
            });
            offset = offset.saturating_add(height as u64);
        }
    }

    /// Collects the materialized items into `out` (clears `out` first).
    pub fn collect_visible_items(&self, out: &mut Vec<PositionedItem>) {
        out.clear();
        self.for_each_visible_item(|it| out.push(it));
    }

    pub fn max_scroll_offset(&self) -> u64 {
        self.total_height()
            .saturating_sub(self.viewport.visible_height as u64)
    }

    pub fn clamp_scroll_offset(&self, offset: u64) -> u64 {
        offset.min(self.max_scroll_offset())
    }

    /// Computes the scroll offset that brings `index` into view.
    ///
    /// Out-of-range indexes are clamped to the last row. The result is clamped to
    /// `max_scroll_offset`, so it can be handed straight to the scroll host.
    pub fn scroll_offset_for_index(&self, index: usize, align: Align) -> u64 {
        let Some(last) = self.len.checked_sub(1) else {
            return 0;
        };
        let height = self.item_height();
        let start = index_offset(index.min(last), height);
        let end = start.saturating_add(height as u64);
        let view = self.viewport.visible_height as u64;

        let target = match align {
            Align::Start => start,
            Align::End => end.saturating_sub(view),
            Align::Center => start
                .saturating_add(height as u64 / 2)
                .saturating_sub(view / 2),
            Align::Auto => {
                let cur = self.viewport.scroll_offset;
                let cur_end = self.viewport.bottom();
                if start >= cur && end <= cur_end {
                    cur
                } else if start < cur {
                    start
                } else {
                    end.saturating_sub(view)
                }
            }
        };

        self.clamp_scroll_offset(target)
    }
}
