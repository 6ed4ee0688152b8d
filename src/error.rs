use thiserror::Error;

/// Errors reported by the validated configuration entry points.
///
/// The infallible constructors never return these; they clamp instead (see
/// [`crate::WindowOptions::new`]).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum WindowError {
    /// Every row must occupy at least one pixel for offset ↔ index mapping to be defined.
    #[error("item height must be greater than zero")]
    ZeroItemHeight,
}
