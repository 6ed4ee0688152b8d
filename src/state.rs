/// A snapshot of the scroll host's viewport.
///
/// The engine only ever reads this; the host owns the real values.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ViewportState {
    pub scroll_offset: u64,
    pub visible_height: u32,
}

impl ViewportState {
    pub fn new(scroll_offset: u64, visible_height: u32) -> Self {
        Self {
            scroll_offset,
            visible_height,
        }
    }

    /// First offset past the bottom edge of the viewport.
    pub fn bottom(&self) -> u64 {
        self.scroll_offset.saturating_add(self.visible_height as u64)
    }
}

/// Lifecycle of a [`crate::Window`].
///
/// `Uninitialized` keeps the default window in effect until the first measurement arrives;
/// `Tracking` follows every viewport and input change.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum WindowPhase {
    #[default]
    Uninitialized,
    Tracking,
}
