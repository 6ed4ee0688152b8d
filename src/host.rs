use alloc::boxed::Box;
use alloc::vec::Vec;
use core::cell::{Cell, RefCell};

use crate::ViewportState;

/// A listener notified with the new viewport after every scroll or resize.
pub type ScrollListener = Box<dyn FnMut(ViewportState)>;

/// Handle returned by [`ScrollHost::subscribe`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

impl SubscriptionId {
    pub fn get(self) -> u64 {
        self.0
    }
}

/// The scrollable viewport a [`crate::WindowedList`] is mounted into.
///
/// Hosts are single-threaded and use interior mutability, so every method takes `&self`.
/// Implementations must deliver change notifications synchronously, in event order.
pub trait ScrollHost {
    /// Current scroll offset and visible height.
    fn viewport(&self) -> ViewportState;

    fn subscribe(&self, listener: ScrollListener) -> SubscriptionId;

    /// Removes a listener. Unknown ids are ignored.
    fn unsubscribe(&self, id: SubscriptionId);
}

/// An in-memory scroll host.
///
/// Useful for headless adapters and tests: the embedding code moves the viewport with
/// [`Self::scroll_to`] / [`Self::resize`], and every subscriber is notified before the call
/// returns. Listeners may unsubscribe (for example by dropping a [`crate::Mounted`]) or move
/// the viewport while a notification is being dispatched, and a panicking listener leaves the
/// registry intact.
#[derive(Default)]
pub struct MemoryScrollHost {
    state: Cell<ViewportState>,
    listeners: RefCell<Vec<(SubscriptionId, ScrollListener)>>,
    next_id: Cell<u64>,
    dispatching: Cell<bool>,
    pending: Cell<bool>,
    removed_during_dispatch: RefCell<Vec<SubscriptionId>>,
}

impl MemoryScrollHost {
    pub fn new(visible_height: u32) -> Self {
        Self::with_viewport(ViewportState::new(0, visible_height))
    }

    pub fn with_viewport(viewport: ViewportState) -> Self {
        Self {
            state: Cell::new(viewport),
            ..Self::default()
        }
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().len()
    }

    pub fn scroll_to(&self, scroll_offset: u64) {
        let mut next = self.state.get();
        next.scroll_offset = scroll_offset;
        self.set_viewport(next);
    }

    pub fn scroll_by(&self, delta: i64) {
        let cur = self.state.get().scroll_offset;
        let next = if delta >= 0 {
            cur.saturating_add(delta as u64)
        } else {
            cur.saturating_sub(delta.unsigned_abs())
        };
        self.scroll_to(next);
    }

    pub fn resize(&self, visible_height: u32) {
        let mut next = self.state.get();
        next.visible_height = visible_height;
        self.set_viewport(next);
    }

    /// Replaces the viewport and notifies every listener, even when nothing changed.
    ///
    /// When called from inside a listener, the new viewport is queued and the running dispatch
    /// restarts with it, so every listener ends on the newest viewport.
    pub fn set_viewport(&self, viewport: ViewportState) {
        self.state.set(viewport);
        self.dispatch();
    }

    fn dispatch(&self) {
        if self.dispatching.replace(true) {
            wtrace!("MemoryScrollHost: viewport changed during dispatch, queued");
            self.pending.set(true);
            return;
        }

        // Listeners run with the registry released so they can (un)subscribe. The guard puts
        // them back and clears `dispatching` even if a listener unwinds.
        let mut guard = DispatchGuard {
            host: self,
            active: core::mem::take(&mut *self.listeners.borrow_mut()),
        };

        let mut rounds = 0usize;
        loop {
            self.pending.set(false);
            let viewport = self.state.get();
            wtrace!(
                scroll_offset = viewport.scroll_offset,
                visible_height = viewport.visible_height,
                rounds,
                "MemoryScrollHost::dispatch"
            );
            for (id, listener) in guard.active.iter_mut() {
                if self.removed_during_dispatch.borrow().contains(id) {
                    continue;
                }
                listener(viewport);
                if self.pending.get() {
                    // Superseded; the rest would only see a stale viewport.
                    break;
                }
            }

            if !self.pending.get() {
                break;
            }
            rounds += 1;
            if rounds >= MAX_REDISPATCH_ROUNDS {
                wwarn!(rounds, "MemoryScrollHost: listeners keep moving the viewport");
                break;
            }
        }
    }
}

/// Upper bound on restarts caused by listeners that move the viewport themselves.
const MAX_REDISPATCH_ROUNDS: usize = 64;

struct DispatchGuard<'a> {
    host: &'a MemoryScrollHost,
    active: Vec<(SubscriptionId, ScrollListener)>,
}

impl Drop for DispatchGuard<'_> {
    fn drop(&mut self) {
        let host = self.host;
        let removed = core::mem::take(&mut *host.removed_during_dispatch.borrow_mut());
        let mut active = core::mem::take(&mut self.active);
        active.retain(|(id, _)| !removed.contains(id));

        let mut listeners = host.listeners.borrow_mut();
        let added = core::mem::replace(&mut *listeners, active);
        listeners.extend(added);
        drop(listeners);

        host.pending.set(false);
        host.dispatching.set(false);
    }
}

impl ScrollHost for MemoryScrollHost {
    fn viewport(&self) -> ViewportState {
        self.state.get()
    }

    fn subscribe(&self, listener: ScrollListener) -> SubscriptionId {
        let id = SubscriptionId(self.next_id.get());
        self.next_id.set(id.0.wrapping_add(1));
        self.listeners.borrow_mut().push((id, listener));
        wdebug!(id = id.0, "MemoryScrollHost::subscribe");
        id
    }

    fn unsubscribe(&self, id: SubscriptionId) {
        wdebug!(id = id.0, "MemoryScrollHost::unsubscribe");
        self.listeners.borrow_mut().retain(|(i, _)| *i != id);
        if self.dispatching.get() {
            self.removed_during_dispatch.borrow_mut().push(id);
        }
    }
}

impl core::fmt::Debug for MemoryScrollHost {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("MemoryScrollHost")
            .field("state", &self.state.get())
            .field("listeners", &self.listener_count())
            .finish_non_exhaustive()
    }
}
