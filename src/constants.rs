//! Sizing, timing, and styling constants for the picker.

use std::time::Duration;

/// Rows shown at once by the hour and minute wheels
pub const DEFAULT_VISIBLE_ITEMS_COUNT: usize = 5;

/// Rows shown at once by the am/pm wheel
pub const PERIOD_VISIBLE_ITEMS_COUNT: usize = 3;

/// Vertical gap between rows
pub const DEFAULT_ITEM_SPACING: f64 = 2.0;

/// Curve effect floor for row opacity
pub const DEFAULT_MIN_ALPHA: f32 = 0.2;

/// Curve effect floor for row vertical scale
pub const DEFAULT_MIN_SCALE_Y: f32 = 0.8;

/// Row label font size
pub const FONT_SIZE: f32 = 16.0;

/// Line height as a multiple of the font size
pub const LINE_HEIGHT: f32 = 1.2;

/// Padding above and below each row label
pub const ROW_PADDING: f32 = 8.0;

/// Minimum width of one wheel column
pub const WHEEL_MIN_WIDTH: f32 = 48.0;

/// Horizontal inset of the selector band
pub const SELECTOR_INSET: f32 = 20.0;

/// Horizontal inset of the wheel row inside the band
pub const WHEELS_INSET: f32 = 50.0;

/// Extra height of the selector band around the centered row
pub const SELECTOR_EXTRA_HEIGHT: f32 = 20.0;

/// Selector band corner radius
pub const SELECTOR_RADIUS: f64 = 16.0;

/// Pointer travel before a press turns into a drag
pub const DRAG_THRESHOLD: f64 = 8.0;

/// Fling velocity cap in pixels per second
pub const MAX_FLING_VELOCITY: f64 = 8_000.0;

/// How far ahead a release velocity is projected when settling
pub const FLING_PROJECTION: f64 = 0.12;

/// Settle-on-row animation length
pub const SNAP_DURATION: Duration = Duration::from_millis(180);

/// Programmatic scroll animation length (am/pm flip, tap to select)
pub const SCROLL_DURATION: Duration = Duration::from_millis(300);

/// Frame interval for animation ticks
pub const FRAME_INTERVAL: Duration = Duration::from_millis(16);
