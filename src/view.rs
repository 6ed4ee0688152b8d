use alloc::boxed::Box;
use alloc::collections::VecDeque;
use alloc::rc::Rc;
use alloc::vec::Vec;
use core::cell::RefCell;
use core::ops::Deref;

use crate::{
    ScrollHost, SubscriptionId, ViewportState, VisibleRange, Window, WindowOptions, WindowPhase,
};

/// An ordered, randomly indexable sequence of opaque items.
///
/// `len` must be O(1). The windowed list never inspects items; it only hands them to the
/// [`RenderItem`] implementation together with their index.
pub trait ItemSource {
    type Item;

    fn len(&self) -> usize;

    fn get(&self, index: usize) -> Option<&Self::Item>;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T> ItemSource for [T] {
    type Item = T;

    fn len(&self) -> usize {
        <[T]>::len(self)
    }

    fn get(&self, index: usize) -> Option<&T> {
        <[T]>::get(self, index)
    }
}

impl<T, const N: usize> ItemSource for [T; N] {
    type Item = T;

    fn len(&self) -> usize {
        N
    }

    fn get(&self, index: usize) -> Option<&T> {
        self.as_slice().get(index)
    }
}

impl<T> ItemSource for Vec<T> {
    type Item = T;

    fn len(&self) -> usize {
        Vec::len(self)
    }

    fn get(&self, index: usize) -> Option<&T> {
        self.as_slice().get(index)
    }
}

impl<T> ItemSource for VecDeque<T> {
    type Item = T;

    fn len(&self) -> usize {
        VecDeque::len(self)
    }

    fn get(&self, index: usize) -> Option<&T> {
        VecDeque::get(self, index)
    }
}

impl<S: ItemSource + ?Sized> ItemSource for &S {
    type Item = S::Item;

    fn len(&self) -> usize {
        (**self).len()
    }

    fn get(&self, index: usize) -> Option<&S::Item> {
        (**self).get(index)
    }
}

/// Maps one item and its index to a presentational unit.
///
/// Any `Fn(&T, usize) -> U` closure qualifies. Annotate the closure's parameter types when
/// passing it to [`WindowedList::new`], since inference does not see through this trait.
pub trait RenderItem<T: ?Sized> {
    type Output;

    fn render(&self, item: &T, index: usize) -> Self::Output;
}

impl<T: ?Sized, U, F> RenderItem<T> for F
where
    F: Fn(&T, usize) -> U,
{
    type Output = U;

    fn render(&self, item: &T, index: usize) -> U {
        self(item, index)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RenderedItem<U> {
    pub index: usize,
    /// Absolute offset from the top of the scrollable region (`index * item_height`).
    pub offset: u64,
    pub height: u32,
    pub unit: U,
}

/// Output of one render pass.
///
/// A UI layer reproduces it with a spacer of `total_height` and, inside it, a block translated
/// by `block_offset` that stacks `items` in order. Because every row has the same height, the
/// stacked rows land exactly on their absolute offsets.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RenderedWindow<U> {
    pub total_height: u64,
    pub block_offset: u64,
    pub items: Vec<RenderedItem<U>>,
}

impl<U> RenderedWindow<U> {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// The index range actually rendered.
    pub fn range(&self) -> Option<VisibleRange> {
        let first = self.items.first()?;
        let last = self.items.last()?;
        Some(VisibleRange {
            start: first.index,
            end: last.index,
        })
    }

    pub fn units(&self) -> impl Iterator<Item = &U> {
        self.items.iter().map(|it| &it.unit)
    }
}

/// A list view that materializes only the rows near the viewport.
///
/// Construct it with the items, a render function and a fixed row height, then either drive the
/// engine directly through [`Self::with_window_mut`] or [`mount`](Self::mount) it into a
/// [`ScrollHost`] so scroll events keep the window in sync.
pub struct WindowedList<S, R> {
    items: S,
    render_item: R,
    window: Rc<RefCell<Window>>,
}

impl<S, R> WindowedList<S, R>
where
    S: ItemSource,
    R: RenderItem<S::Item>,
{
    /// Builds a list with the default buffers (5 rows each side) and default first window
    /// (`[0, 20]`, clamped).
    pub fn new(items: S, render_item: R, item_height: u32) -> Self {
        Self::with_options(items, render_item, WindowOptions::new(item_height))
    }

    pub fn with_options(items: S, render_item: R, options: WindowOptions) -> Self {
        let window = Window::new(items.len(), options);
        Self {
            items,
            render_item,
            window: Rc::new(RefCell::new(window)),
        }
    }

    pub fn items(&self) -> &S {
        &self.items
    }

    /// Replaces the sequence. The range is re-clamped before this returns.
    pub fn set_items(&mut self, items: S) {
        self.items = items;
        self.sync_len();
    }

    /// Mutates the sequence in place (append, truncate, ...), then re-clamps the range.
    pub fn update_items(&mut self, f: impl FnOnce(&mut S)) {
        f(&mut self.items);
        self.sync_len();
    }

    fn sync_len(&mut self) {
        let len = self.items.len();
        self.window.borrow_mut().set_len(len);
    }

    pub fn set_item_height(&mut self, item_height: u32) {
        self.window.borrow_mut().set_item_height(item_height);
    }

    pub fn range(&self) -> Option<VisibleRange> {
        self.window.borrow().range()
    }

    pub fn phase(&self) -> WindowPhase {
        self.window.borrow().phase()
    }

    pub fn total_height(&self) -> u64 {
        self.window.borrow().total_height()
    }

    pub fn with_window<T>(&self, f: impl FnOnce(&Window) -> T) -> T {
        f(&self.window.borrow())
    }

    /// Direct access to the engine, for adapters that feed viewport updates themselves.
    pub fn with_window_mut<T>(&mut self, f: impl FnOnce(&mut Window) -> T) -> T {
        f(&mut self.window.borrow_mut())
    }

    /// Renders the current window.
    ///
    /// Only indexes present in the sequence are rendered, so a stale range can never reach the
    /// render function with an out-of-bounds index.
    ///
    /// If the render function moves the scroll host this list is mounted in, that notification is
    /// skipped (the window is being read); call [`Mounted::remeasure`] afterwards.
    pub fn render(&self) -> RenderedWindow<R::Output> {
        let window = self.window.borrow();
        let mut items = Vec::with_capacity(window.range().map_or(0, |r| r.len()));
        window.for_each_visible_item(|pos| {
            let Some(item) = self.items.get(pos.index) else {
                wwarn!(index = pos.index, len = self.items.len(), "render: index past end");
                return;
            };
            items.push(RenderedItem {
                index: pos.index,
                offset: pos.offset,
                height: pos.height,
                unit: self.render_item.render(item, pos.index),
            });
        });
        wtrace!(rendered = items.len(), "render");
        RenderedWindow {
            total_height: window.total_height(),
            block_offset: window.block_offset(),
            items,
        }
    }

    /// Attaches the list to `host`.
    ///
    /// Subscribes to viewport changes, then takes the mount-time measurement synchronously, which
    /// moves the window into the `Tracking` phase. The subscription is released when the
    /// returned guard is dropped.
    pub fn mount<'a, H>(&'a mut self, host: &'a H) -> Mounted<'a, S, R, H>
    where
        H: ScrollHost + ?Sized,
    {
        let window = Rc::clone(&self.window);
        let subscription = host.subscribe(Box::new(move |viewport: ViewportState| {
            // Busy only when the host is moved from inside `render`; `Mounted::remeasure` catches
            // up afterwards.
            match window.try_borrow_mut() {
                Ok(mut window) => window.apply_viewport(viewport),
                Err(_) => {
                    wwarn!(
                        scroll_offset = viewport.scroll_offset,
                        "viewport change skipped: window is being rendered"
                    );
                }
            }
        }));
        wdebug!(subscription = subscription.get(), "WindowedList::mount");

        // Build the guard first so the subscription is released even if measuring panics.
        let mounted = Mounted {
            list: self,
            host,
            subscription,
        };
        mounted
            .list
            .window
            .borrow_mut()
            .apply_viewport(host.viewport());
        mounted
    }
}

impl<S: ItemSource, R> core::fmt::Debug for WindowedList<S, R> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("WindowedList")
            .field("len", &self.items.len())
            .field("window", &self.window)
            .finish_non_exhaustive()
    }
}

/// A [`WindowedList`] attached to a [`ScrollHost`].
///
/// Dropping the guard unsubscribes from the host exactly once and discards the visible range
/// (the list returns to `Uninitialized`). Read access to the list goes through `Deref`; sequence
/// updates go through the forwarding methods below so they cannot re-mount the list.
pub struct Mounted<'a, S, R, H>
where
    S: ItemSource,
    R: RenderItem<S::Item>,
    H: ScrollHost + ?Sized,
{
    list: &'a mut WindowedList<S, R>,
    host: &'a H,
    subscription: SubscriptionId,
}

impl<S, R, H> Mounted<'_, S, R, H>
where
    S: ItemSource,
    R: RenderItem<S::Item>,
    H: ScrollHost + ?Sized,
{
    pub fn subscription(&self) -> SubscriptionId {
        self.subscription
    }

    pub fn set_items(&mut self, items: S) {
        self.list.set_items(items);
    }

    pub fn update_items(&mut self, f: impl FnOnce(&mut S)) {
        self.list.update_items(f);
    }

    pub fn set_item_height(&mut self, item_height: u32) {
        self.list.set_item_height(item_height);
    }

    /// Re-reads the host viewport and applies it.
    ///
    /// Needed only if the host moved while this list was rendering, since that notification
    /// could not be applied.
    pub fn remeasure(&mut self) {
        let viewport = self.host.viewport();
        self.list.with_window_mut(|w| w.apply_viewport(viewport));
    }

    /// Explicit teardown; equivalent to dropping the guard.
    pub fn unmount(self) {}
}

impl<S, R, H> Deref for Mounted<'_, S, R, H>
where
    S: ItemSource,
    R: RenderItem<S::Item>,
    H: ScrollHost + ?Sized,
{
    type Target = WindowedList<S, R>;

    fn deref(&self) -> &Self::Target {
        self.list
    }
}

impl<S, R, H> Drop for Mounted<'_, S, R, H>
where
    S: ItemSource,
    R: RenderItem<S::Item>,
    H: ScrollHost + ?Sized,
{
    fn drop(&mut self) {
        wdebug!(subscription = self.subscription.get(), "Mounted::drop");
        self.host.unsubscribe(self.subscription);
        match self.list.window.try_borrow_mut() {
            Ok(mut window) => window.reset(),
            Err(_) => {
                wwarn!(
                    subscription = self.subscription.get(),
                    "Mounted::drop: window busy, range not discarded"
                );
            }
        }
    }
}
