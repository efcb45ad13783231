//! Error type for wheel and picker construction.

use thiserror::Error;

/// Configuration errors raised while building wheels or pickers.
///
/// Runtime index requests never fail; they are clamped instead.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PickerError {
    #[error("wheel items cannot be empty")]
    EmptyItems,

    #[error("visible items count must be at least 1 (got {0})")]
    InvalidVisibleCount(usize),

    #[error("invalid time {hour:02}:{minute:02}")]
    InvalidTime { hour: u32, minute: u32 },

    #[error("curve bound `{name}` must be within 0.0..=1.0 (got {value})")]
    InvalidCurveBound { name: &'static str, value: f32 },
}
