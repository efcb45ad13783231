//! Picker configuration: wheel behavior, time format, and visual style.

use chrono::NaiveTime;
use floem::peniko::Color;
use serde::{Deserialize, Serialize};

use crate::constants;
use crate::curve::CurveEffect;
use crate::engine::{WheelOptions, normalize_visible_count};
use crate::error::PickerError;
use crate::time::{self, TimeFormat};

/// Row label appearance.
#[derive(Debug, Clone, PartialEq)]
pub struct PickerStyle {
    pub font_size: f32,
    pub text_color: Color,
    /// Comma-separated family list; the system default when `None`.
    pub font_family: Option<String>,
}

impl Default for PickerStyle {
    fn default() -> Self {
        Self {
            font_size: constants::FONT_SIZE,
            text_color: Color::WHITE,
            font_family: None,
        }
    }
}

impl PickerStyle {
    /// Height one label takes before spacing is added.
    pub fn row_height(&self) -> f32 {
        self.font_size * constants::LINE_HEIGHT + constants::ROW_PADDING * 2.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SelectorBorder {
    pub width: f64,
    pub color: Color,
}

/// Highlight band drawn behind the centered row.
#[derive(Debug, Clone, PartialEq)]
pub struct PickerSelector {
    pub enabled: bool,
    pub color: Color,
    pub radius: f64,
    pub border: Option<SelectorBorder>,
}

impl Default for PickerSelector {
    fn default() -> Self {
        Self {
            enabled: true,
            color: Color::rgba8(103, 80, 164, 51),
            radius: constants::SELECTOR_RADIUS,
            border: None,
        }
    }
}

/// Everything needed to build a time picker.
///
/// The behavioral fields (de)serialize so hosts can keep them in their own
/// settings files; style and selector are code-only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimePickerConfig {
    pub time_format: TimeFormat,
    pub visible_items_count: usize,
    pub item_spacing: f64,
    pub curve_effect: CurveEffect,
    /// Defaults to the local time when the picker is built.
    pub initial_time: Option<NaiveTime>,
    #[serde(skip)]
    pub style: PickerStyle,
    #[serde(skip)]
    pub selector: PickerSelector,
}

impl Default for TimePickerConfig {
    fn default() -> Self {
        Self {
            time_format: TimeFormat::default(),
            visible_items_count: constants::DEFAULT_VISIBLE_ITEMS_COUNT,
            item_spacing: constants::DEFAULT_ITEM_SPACING,
            curve_effect: CurveEffect::default(),
            initial_time: None,
            style: PickerStyle::default(),
            selector: PickerSelector::default(),
        }
    }
}

impl TimePickerConfig {
    pub fn with_time_format(mut self, time_format: TimeFormat) -> Self {
        self.time_format = time_format;
        self
    }

    pub fn with_visible_items_count(mut self, count: usize) -> Self {
        self.visible_items_count = count;
        self
    }

    pub fn with_item_spacing(mut self, item_spacing: f64) -> Self {
        self.item_spacing = item_spacing;
        self
    }

    pub fn with_curve_effect(mut self, curve_effect: CurveEffect) -> Self {
        self.curve_effect = curve_effect;
        self
    }

    pub fn with_initial_time(mut self, time: NaiveTime) -> Self {
        self.initial_time = Some(time);
        self
    }

    pub fn with_style(mut self, style: PickerStyle) -> Self {
        self.style = style;
        self
    }

    pub fn with_selector(mut self, selector: PickerSelector) -> Self {
        self.selector = selector;
        self
    }

    pub fn validate(&self) -> Result<(), PickerError> {
        normalize_visible_count(self.visible_items_count)?;
        self.curve_effect.validate()
    }

    /// Visible rows after rounding an even count down.
    pub fn visible_count(&self) -> Result<usize, PickerError> {
        normalize_visible_count(self.visible_items_count)
    }

    pub fn initial_time_or_now(&self) -> NaiveTime {
        self.initial_time.unwrap_or_else(time::now)
    }

    /// Options for the hour and minute wheels.
    pub fn wheel_options(&self) -> WheelOptions {
        WheelOptions::infinite(self.visible_items_count)
            .with_item_spacing(self.item_spacing)
            .with_curve_effect(self.curve_effect)
    }

    /// Options for the am/pm wheel.
    pub fn period_wheel_options(&self) -> WheelOptions {
        WheelOptions::finite(constants::PERIOD_VISIBLE_ITEMS_COUNT)
            .with_item_spacing(self.item_spacing)
            .with_curve_effect(self.curve_effect)
    }

    /// Estimated height of one row plus spacing, used to size the wheels.
    pub fn slot_height(&self) -> f32 {
        self.style.row_height() + self.item_spacing.max(0.0) as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_widget_defaults() {
        let config = TimePickerConfig::default();
        assert_eq!(config.visible_items_count, 5);
        assert_eq!(config.time_format, TimeFormat::TwelveHour);
        assert!(config.validate().is_ok());
        assert!(config.wheel_options().infinite);
        assert!(!config.period_wheel_options().infinite);
        assert_eq!(config.period_wheel_options().visible_items_count, 3);
    }

    #[test]
    fn partial_json_fills_in_defaults() {
        let config: TimePickerConfig = serde_json::from_str(
            r#"{"time_format":"twenty_four_hour","curve_effect":{"min_alpha":0.5},"initial_time":"13:45:00"}"#,
        )
        .unwrap();
        assert_eq!(config.time_format, TimeFormat::TwentyFourHour);
        assert_eq!(config.curve_effect.min_alpha, 0.5);
        assert_eq!(config.curve_effect.min_scale_y, constants::DEFAULT_MIN_SCALE_Y);
        assert_eq!(config.item_spacing, constants::DEFAULT_ITEM_SPACING);
        assert_eq!(config.initial_time, NaiveTime::from_hms_opt(13, 45, 0));
        assert_eq!(config.style, PickerStyle::default());
    }

    #[test]
    fn validate_reports_bad_fields() {
        let zero = TimePickerConfig::default().with_visible_items_count(0);
        assert_eq!(zero.validate(), Err(PickerError::InvalidVisibleCount(0)));

        let curve = CurveEffect::default().with_scale_y(true, -0.1);
        let config = TimePickerConfig::default().with_curve_effect(curve);
        assert!(matches!(
            config.validate(),
            Err(PickerError::InvalidCurveBound { name: "min_scale_y", .. })
        ));

        let even = TimePickerConfig::default().with_visible_items_count(6);
        assert_eq!(even.visible_count(), Ok(5));
    }
}
