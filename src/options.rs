use alloc::sync::Arc;

use crate::WindowError;
use crate::window::Window;

/// Items rendered above the first visible row.
pub const DEFAULT_BUFFER_BEFORE: usize = 5;
/// Items rendered below the last visible row.
pub const DEFAULT_BUFFER_AFTER: usize = 5;
/// Last index of the window used before the first viewport measurement.
pub const DEFAULT_INITIAL_LAST_INDEX: usize = 20;

/// A callback fired after the engine's visible range or phase changed.
pub type OnChangeCallback = Arc<dyn Fn(&Window) + Send + Sync>;

/// Plain-data configuration for a [`Window`].
///
/// With `feature = "serde"`, this type implements `Serialize`/`Deserialize` and every field
/// falls back to its default, so a partial document such as `{"item_height": 48}` is enough.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct WindowConfig {
    pub item_height: u32,
    pub buffer_before: usize,
    pub buffer_after: usize,
    pub initial_last_index: usize,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            item_height: 1,
            buffer_before: DEFAULT_BUFFER_BEFORE,
            buffer_after: DEFAULT_BUFFER_AFTER,
            initial_last_index: DEFAULT_INITIAL_LAST_INDEX,
        }
    }
}

/// Configuration for [`Window`].
///
/// Cheap to clone: the callback lives in an `Arc`, so adapters can tweak a field and hand the
/// result to `Window::set_options` without reallocating closures.
pub struct WindowOptions {
    pub item_height: u32,
    pub buffer_before: usize,
    pub buffer_after: usize,
    pub initial_last_index: usize,
    pub on_change: Option<OnChangeCallback>,
}

impl Clone for WindowOptions {
    fn clone(&self) -> Self {
        Self {
            item_height: self.item_height,
            buffer_before: self.buffer_before,
            buffer_after: self.buffer_after,
            initial_last_index: self.initial_last_index,
            on_change: self.on_change.clone(),
        }
    }
}

impl WindowOptions {
    /// Creates options with the default buffers and initial window.
    ///
    /// A zero `item_height` is a caller error. It is clamped to 1 rather than rejected so that
    /// rendering stays well defined; use [`Self::from_config`] or [`Self::validate`] to surface
    /// it as a [`WindowError`] instead.
    pub fn new(item_height: u32) -> Self {
        if item_height == 0 {
            wwarn!("WindowOptions::new: zero item height clamped to 1");
        }
        Self {
            item_height: item_height.max(1),
            buffer_before: DEFAULT_BUFFER_BEFORE,
            buffer_after: DEFAULT_BUFFER_AFTER,
            initial_last_index: DEFAULT_INITIAL_LAST_INDEX,
            on_change: None,
        }
    }

    /// Builds options from a deserialized config, rejecting a zero item height.
    pub fn from_config(config: WindowConfig) -> Result<Self, WindowError> {
        let options = Self {
            item_height: config.item_height,
            buffer_before: config.buffer_before,
            buffer_after: config.buffer_after,
            initial_last_index: config.initial_last_index,
            on_change: None,
        };
        options.validate()?;
        Ok(options)
    }

    pub fn config(&self) -> WindowConfig {
        WindowConfig {
            item_height: self.item_height,
            buffer_before: self.buffer_before,
            buffer_after: self.buffer_after,
            initial_last_index: self.initial_last_index,
        }
    }

    pub fn validate(&self) -> Result<(), WindowError> {
        if self.item_height == 0 {
            return Err(WindowError::ZeroItemHeight);
        }
        Ok(())
    }

    pub fn with_item_height(mut self, item_height: u32) -> Self {
        self.item_height = item_height;
        self
    }

    pub fn with_buffers(mut self, buffer_before: usize, buffer_after: usize) -> Self {
        self.buffer_before = buffer_before;
        self.buffer_after = buffer_after;
        self
    }

    pub fn with_initial_last_index(mut self, initial_last_index: usize) -> Self {
        self.initial_last_index = initial_last_index;
        self
    }

    pub fn with_on_change(
        mut self,
        on_change: Option<impl Fn(&Window) + Send + Sync + 'static>,
    ) -> Self {
        self.on_change = on_change.map(|f| Arc::new(f) as _);
        self
    }

    /// The height the engine actually divides by.
    pub(crate) fn effective_item_height(&self) -> u32 {
        self.item_height.max(1)
    }
}

impl Default for WindowOptions {
    fn default() -> Self {
        Self::new(1)
    }
}

impl core::fmt::Debug for WindowOptions {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("WindowOptions")
            .field("item_height", &self.item_height)
            .field("buffer_before", &self.buffer_before)
            .field("buffer_after", &self.buffer_after)
            .field("initial_last_index", &self.initial_last_index)
            .finish_non_exhaustive()
    }
}
