//! Combines the hour, minute, and am/pm wheels into one time value.

use chrono::{NaiveTime, Timelike};

use crate::time::{self, TimeFormat, TimePeriod};

/// Initial selected index of each wheel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WheelSeeds {
    /// `None` for the 24-hour format, which has no am/pm wheel.
    pub period: Option<usize>,
    pub hour: usize,
    pub minute: usize,
}

/// Result of the hour wheel moving.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HourChange {
    /// New composed time, if it differs from the last one emitted.
    pub time: Option<NaiveTime>,
    /// Period the am/pm wheel should scroll to after crossing 11↔12.
    pub flip_to: Option<TimePeriod>,
}

/// Tracks the centered value of each wheel and derives the picked time.
///
/// Every `*_changed` call returns the new time only when it differs from the
/// previous emission, so callers can forward results without filtering.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeComposer {
    format: TimeFormat,
    /// Centered hour wheel value: 0–23, or 1–12 for 12-hour formats.
    hour: u32,
    minute: u32,
    period: TimePeriod,
    /// Period an in-flight auto-flip is heading to.
    pending_period: Option<TimePeriod>,
    fallback: NaiveTime,
    last_emitted: Option<NaiveTime>,
}

impl TimeComposer {
    pub fn new(format: TimeFormat, initial: NaiveTime) -> Self {
        let initial = time::truncate_to_minute(initial);
        let mut composer = Self {
            format,
            hour: 0,
            minute: 0,
            period: TimePeriod::Am,
            pending_period: None,
            fallback: initial,
            last_emitted: None,
        };
        composer.load(initial);
        composer
    }

    pub fn format(&self) -> TimeFormat {
        self.format
    }

    pub fn period(&self) -> TimePeriod {
        self.period
    }

    pub fn seeds(&self) -> WheelSeeds {
        let hour = if self.format.is_24_hour() {
            self.hour as usize
        } else {
            (self.hour - 1) as usize
        };
        WheelSeeds {
            period: (!self.format.is_24_hour()).then(|| period_index(self.period)),
            hour,
            minute: self.minute as usize,
        }
    }

    /// Time currently shown by the wheels.
    pub fn current(&self) -> NaiveTime {
        let hour = if self.format.is_24_hour() {
            self.hour
        } else {
            time::hour24_of(self.hour, self.period)
        };
        time::picker_time(hour, self.minute).unwrap_or(self.fallback)
    }

    /// The time to report once when the picker is mounted.
    pub fn mount(&mut self) -> NaiveTime {
        let current = self.current();
        self.last_emitted = Some(current);
        current
    }

    /// Replaces every wheel value, as when the bound time changes from
    /// outside. Nothing is emitted for the new time.
    pub fn reset(&mut self, time: NaiveTime) -> WheelSeeds {
        let time = time::truncate_to_minute(time);
        self.load(time);
        self.fallback = time;
        self.pending_period = None;
        self.last_emitted = Some(time);
        self.seeds()
    }

    /// Records a new centered hour.
    ///
    /// Moving between 11 and 12 in a 12-hour format asks for the am/pm
    /// wheel to flip, whichever way the wheel was turned.
    pub fn hour_changed(&mut self, hour: u32) -> HourChange {
        if !self.hour_in_domain(hour) {
            log::warn!("ignoring hour {} outside the {:?} wheel", hour, self.format);
            return HourChange::default();
        }
        let crossed_noon = matches!((self.hour, hour), (11, 12) | (12, 11));
        let flip_to = if !self.format.is_24_hour() && crossed_noon {
            let target = self.pending_period.unwrap_or(self.period).toggled();
            log::debug!("hour moved {} -> {}, flipping period to {:?}", self.hour, hour, target);
            self.pending_period = Some(target);
            Some(target)
        } else {
            None
        };
        self.hour = hour;
        HourChange {
            time: self.emit(),
            flip_to,
        }
    }

    pub fn minute_changed(&mut self, minute: u32) -> Option<NaiveTime> {
        if minute > 59 {
            log::warn!("ignoring minute {}", minute);
            return None;
        }
        self.minute = minute;
        self.emit()
    }

    pub fn period_changed(&mut self, period: TimePeriod) -> Option<NaiveTime> {
        self.period = period;
        self.pending_period = None;
        self.emit()
    }

    /// Records the am/pm wheel coming to rest, or its animation being cut
    /// short, on `period`. Any flip still in flight is dropped, so the next
    /// 11↔12 crossing toggles from where the wheel actually is.
    pub fn period_settled(&mut self, period: TimePeriod) -> Option<NaiveTime> {
        if let Some(pending) = self.pending_period.take()
            && pending != period
        {
            log::debug!("period flip to {:?} interrupted on {:?}", pending, period);
        }
        self.period = period;
        self.emit()
    }

    fn load(&mut self, time: NaiveTime) {
        self.hour = if self.format.is_24_hour() {
            time.hour()
        } else {
            time::hour12_of(time.hour())
        };
        self.minute = time.minute();
        self.period = TimePeriod::of_hour(time.hour());
    }

    fn hour_in_domain(&self, hour: u32) -> bool {
        if self.format.is_24_hour() {
            hour <= 23
        } else {
            (1..=12).contains(&hour)
        }
    }

    fn emit(&mut self) -> Option<NaiveTime> {
        let current = self.current();
        if self.last_emitted == Some(current) {
            return None;
        }
        self.last_emitted = Some(current);
        Some(current)
    }
}

/// Index of `period` on the am/pm wheel.
pub fn period_index(period: TimePeriod) -> usize {
    match period {
        TimePeriod::Am => 0,
        TimePeriod::Pm => 1,
    }
}
