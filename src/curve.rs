//! Curve effect: fades and flattens rows as they move away from the center.

use serde::{Deserialize, Serialize};

use crate::constants;
use crate::error::PickerError;

/// Opacity and vertical-scale falloff applied to each rendered row.
///
/// Both multipliers fall linearly from 1.0 at the viewport center to their
/// configured floor at `max_distance` and stay there beyond it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CurveEffect {
    pub alpha_enabled: bool,
    pub min_alpha: f32,
    pub scale_y_enabled: bool,
    pub min_scale_y: f32,
}

impl Default for CurveEffect {
    fn default() -> Self {
        Self {
            alpha_enabled: true,
            min_alpha: constants::DEFAULT_MIN_ALPHA,
            scale_y_enabled: true,
            min_scale_y: constants::DEFAULT_MIN_SCALE_Y,
        }
    }
}

/// Presentation multipliers for one row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RowEffect {
    pub alpha: f32,
    pub scale_y: f32,
}

impl CurveEffect {
    /// A curve that leaves every row fully opaque and unscaled.
    pub fn disabled() -> Self {
        Self {
            alpha_enabled: false,
            scale_y_enabled: false,
            ..Self::default()
        }
    }

    pub fn with_alpha(mut self, enabled: bool, min_alpha: f32) -> Self {
        self.alpha_enabled = enabled;
        self.min_alpha = min_alpha;
        self
    }

    pub fn with_scale_y(mut self, enabled: bool, min_scale_y: f32) -> Self {
        self.scale_y_enabled = enabled;
        self.min_scale_y = min_scale_y;
        self
    }

    /// Rejects floors outside `0.0..=1.0`.
    pub fn validate(&self) -> Result<(), PickerError> {
        for (name, value) in [("min_alpha", self.min_alpha), ("min_scale_y", self.min_scale_y)] {
            if !(0.0..=1.0).contains(&value) {
                return Err(PickerError::InvalidCurveBound { name, value });
            }
        }
        Ok(())
    }

    pub fn calculate_alpha(&self, distance_from_center: f32, max_distance: f32) -> f32 {
        if !self.alpha_enabled {
            return 1.0;
        }
        falloff(distance_from_center, max_distance, self.min_alpha)
    }

    pub fn calculate_scale_y(&self, distance_from_center: f32, max_distance: f32) -> f32 {
        if !self.scale_y_enabled {
            return 1.0;
        }
        falloff(distance_from_center, max_distance, self.min_scale_y)
    }

    /// Both multipliers at once, as the renderer consumes them.
    pub fn row_effect(&self, distance_from_center: f32, max_distance: f32) -> RowEffect {
        RowEffect {
            alpha: self.calculate_alpha(distance_from_center, max_distance),
            scale_y: self.calculate_scale_y(distance_from_center, max_distance),
        }
    }
}

fn falloff(distance: f32, max_distance: f32, floor: f32) -> f32 {
    let ratio = distance_ratio(distance, max_distance);
    (1.0 - ratio) * (1.0 - floor) + floor
}

/// `distance / max_distance` clamped to `0.0..=1.0`.
///
/// A single-row window has no room to fall off in, so any non-zero
/// distance counts as the far end.
fn distance_ratio(distance: f32, max_distance: f32) -> f32 {
    if max_distance <= 0.0 {
        return if distance > 0.0 { 1.0 } else { 0.0 };
    }
    (distance / max_distance).clamp(0.0, 1.0)
}
