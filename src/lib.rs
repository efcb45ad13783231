//! # floem-timepicker
//!
//! A scrolling wheel time picker for [Floem](https://github.com/lapce/floem).
//!
//! Hour, minute, and am/pm values sit on vertically scrolling wheels that
//! snap to the nearest row, wrap around infinitely, and fade and shrink rows
//! away from the center. The wheel engine underneath is toolkit-free and can
//! back any list of items.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use chrono::NaiveTime;
//! use floem::prelude::*;
//! use floem_timepicker::{time_picker, TimeFormat, TimePickerConfig};
//!
//! let time = RwSignal::new(NaiveTime::from_hms_opt(13, 45, 0).unwrap());
//! let config = TimePickerConfig::default().with_time_format(TimeFormat::TwentyFourHour);
//! // Use `time_picker(time, config)?` in your Floem view tree.
//! ```

mod animation;
mod composer;
mod config;
mod constants;
mod curve;
mod engine;
mod error;
mod index;
mod state;
mod time;
mod time_picker;
mod wheel_view;

pub use animation::ScrollTween;
pub use composer::{HourChange, TimeComposer, WheelSeeds, period_index};
pub use config::{PickerSelector, PickerStyle, SelectorBorder, TimePickerConfig};
pub use curve::{CurveEffect, RowEffect};
pub use engine::{VisibleRow, WheelEngine, WheelOptions, normalize_visible_count};
pub use error::PickerError;
pub use index::{INFINITE_SCROLL_COUNT, ScrollSpace, logical_index, seed_scroll_index};
pub use state::{PickerState, SubscriptionId, WheelItems};
pub use time::{
    LocaleTimeFormat, TimeFormat, TimePeriod, format_hour, format_minute, hour_items, hour12_of,
    hour24_of, minute_items, period_items, picker_time,
};
pub use time_picker::{time_picker, time_picker_with};
pub use wheel_view::{PickerWheel, WheelHandle, picker_wheel};
