//! Time formats, meridiem periods, and the hour arithmetic between them.

use chrono::{Local, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};
use strum::{EnumIter, IntoEnumIterator};

use crate::error::PickerError;
use crate::state::WheelItems;

/// Language of the am/pm labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, EnumIter)]
#[serde(rename_all = "lowercase")]
pub enum LocaleTimeFormat {
    #[default]
    English,
    Korean,
}

/// Which wheels the picker shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, EnumIter)]
#[serde(rename_all = "snake_case")]
pub enum TimeFormat {
    /// am/pm, 1–12 hours, minutes; English labels
    #[default]
    TwelveHour,
    /// am/pm, 1–12 hours, minutes; Korean labels
    TwelveHourKorean,
    /// 0–23 hours, minutes
    TwentyFourHour,
}

impl TimeFormat {
    pub fn is_24_hour(&self) -> bool {
        matches!(self, TimeFormat::TwentyFourHour)
    }

    pub fn locale(&self) -> LocaleTimeFormat {
        match self {
            TimeFormat::TwelveHourKorean => LocaleTimeFormat::Korean,
            TimeFormat::TwelveHour | TimeFormat::TwentyFourHour => LocaleTimeFormat::English,
        }
    }
}

/// Half of the day. The wheel stores these, never their labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumIter)]
pub enum TimePeriod {
    Am,
    Pm,
}

impl TimePeriod {
    pub fn label(&self, locale: LocaleTimeFormat) -> &'static str {
        match (self, locale) {
            (TimePeriod::Am, LocaleTimeFormat::English) => "AM",
            (TimePeriod::Pm, LocaleTimeFormat::English) => "PM",
            (TimePeriod::Am, LocaleTimeFormat::Korean) => "오전",
            (TimePeriod::Pm, LocaleTimeFormat::Korean) => "오후",
        }
    }

    pub fn toggled(&self) -> Self {
        match self {
            TimePeriod::Am => TimePeriod::Pm,
            TimePeriod::Pm => TimePeriod::Am,
        }
    }

    pub fn of_hour(hour24: u32) -> Self {
        if hour24 < 12 {
            TimePeriod::Am
        } else {
            TimePeriod::Pm
        }
    }
}

/// Clock-face hour (1–12) for a 24-hour value.
pub fn hour12_of(hour24: u32) -> u32 {
    match hour24 % 12 {
        0 => 12,
        hour => hour,
    }
}

/// 24-hour value for a clock-face hour and period.
///
/// 12 AM is midnight and 12 PM is noon.
pub fn hour24_of(hour12: u32, period: TimePeriod) -> u32 {
    match (period, hour12) {
        (TimePeriod::Am, 12) => 0,
        (TimePeriod::Pm, hour) if hour != 12 => hour + 12,
        (_, hour) => hour,
    }
}

/// Builds a time from wheel values, rejecting anything off the clock.
pub fn picker_time(hour: u32, minute: u32) -> Result<NaiveTime, PickerError> {
    NaiveTime::from_hms_opt(hour, minute, 0).ok_or(PickerError::InvalidTime { hour, minute })
}

/// Local wall-clock time truncated to the minute.
pub fn now() -> NaiveTime {
    truncate_to_minute(Local::now().time())
}

pub fn truncate_to_minute(time: NaiveTime) -> NaiveTime {
    NaiveTime::from_hms_opt(time.hour(), time.minute(), 0).unwrap_or(time)
}

pub fn hour_items(format: TimeFormat) -> WheelItems<u32> {
    let range = if format.is_24_hour() { 0..=23 } else { 1..=12 };
    WheelItems::from_known(range.collect())
}

pub fn minute_items() -> WheelItems<u32> {
    WheelItems::from_known((0..=59).collect())
}

pub fn period_items() -> WheelItems<TimePeriod> {
    WheelItems::from_known(TimePeriod::iter().collect())
}

pub fn format_hour(hour: &u32) -> String {
    hour.to_string()
}

pub fn format_minute(minute: &u32) -> String {
    format!("{:02}", minute)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn twelve_hour_composition() {
        for minute in [0, 7, 59] {
            assert_eq!(hour24_of(12, TimePeriod::Am), 0, "12 AM at :{minute}");
            assert_eq!(hour24_of(12, TimePeriod::Pm), 12);
            assert_eq!(hour24_of(1, TimePeriod::Am), 1);
            assert_eq!(hour24_of(11, TimePeriod::Pm), 23);
            assert_eq!(
                picker_time(hour24_of(11, TimePeriod::Pm), minute).unwrap(),
                NaiveTime::from_hms_opt(23, minute, 0).unwrap()
            );
        }
    }

    #[test]
    fn hour12_round_trips_every_hour() {
        for hour in 0..24 {
            let period = TimePeriod::of_hour(hour);
            assert_eq!(hour24_of(hour12_of(hour), period), hour);
        }
    }

    #[test]
    fn labels_follow_locale() {
        assert_eq!(TimePeriod::Am.label(LocaleTimeFormat::English), "AM");
        assert_eq!(TimePeriod::Pm.label(LocaleTimeFormat::Korean), "오후");
        for locale in LocaleTimeFormat::iter() {
            assert_ne!(TimePeriod::Am.label(locale), TimePeriod::Pm.label(locale));
        }
    }

    #[test]
    fn formats_pick_locale_and_hour_domain() {
        assert_eq!(TimeFormat::TwelveHourKorean.locale(), LocaleTimeFormat::Korean);
        assert!(TimeFormat::TwentyFourHour.is_24_hour());
        assert_eq!(hour_items(TimeFormat::TwentyFourHour).len(), 24);
        assert_eq!(hour_items(TimeFormat::TwelveHour).position(&12), Some(11));
        assert_eq!(period_items().position(&TimePeriod::Pm), Some(1));
    }

    #[test]
    fn invalid_time_is_rejected() {
        assert_eq!(
            picker_time(24, 0),
            Err(PickerError::InvalidTime { hour: 24, minute: 0 })
        );
    }

    #[test]
    fn minutes_are_zero_padded() {
        assert_eq!(format_minute(&5), "05");
        assert_eq!(format_hour(&5), "5");
    }
}
