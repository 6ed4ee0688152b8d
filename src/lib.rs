//! A headless windowed list renderer for long sequences of fixed-height rows.
//!
//! Only the rows near the viewport are materialized, so render work scales with the viewport
//! rather than the sequence. The crate keeps the full scrollable extent correct
//! (`len * item_height`) and places each rendered row at `index * item_height`.
//!
//! It is UI-agnostic. The embedding layer provides:
//! - the items and a render function ([`ItemSource`], [`RenderItem`])
//! - a scrollable viewport ([`ScrollHost`]) reporting scroll offset and visible height
//!
//! [`Window`] is the engine (pure range math plus a small state machine); [`WindowedList`] is
//! the mountable view on top of it.
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod error;
mod host;
mod options;
pub mod range;
mod state;
mod types;
mod view;
mod window;


pub use error::WindowError;
pub use host::{MemoryScrollHost, ScrollHost, ScrollListener, SubscriptionId};
pub use options::{
    DEFAULT_BUFFER_AFTER, DEFAULT_BUFFER_BEFORE, DEFAULT_INITIAL_LAST_INDEX, OnChangeCallback,
    WindowConfig, WindowOptions,
};
pub use state::{ViewportState, WindowPhase};
pub use types::{Align, PositionedItem, VisibleRange};
pub use view::{ItemSource, Mounted, RenderItem, RenderedItem, RenderedWindow, WindowedList};
pub use window::Window;
