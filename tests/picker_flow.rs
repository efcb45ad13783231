//! Drives wheel engines and the composer together the way the picker view
//! wires them, without opening a window.

use std::time::Instant;

use chrono::{NaiveTime, Timelike};
use floem_timepicker::{
    TimeComposer, TimeFormat, TimePeriod, WheelEngine, WheelItems, WheelOptions, hour_items,
    minute_items, period_index, period_items,
};

fn at(hour: u32, minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).unwrap()
}

fn wheel<T: Clone>(items: WheelItems<T>, options: WheelOptions, index: usize) -> WheelEngine<T> {
    let mut engine = WheelEngine::new(items, options, index).unwrap();
    engine.seed();
    engine.detect_center();
    // 18px rows plus the default 2px spacing: one row per 20px of drag
    engine.measure_row_height(18.0);
    engine
}

/// Runs the engine's animation to completion, collecting what it publishes.
fn run_animation<T: Clone>(engine: &mut WheelEngine<T>, now: Instant) -> Vec<T> {
    let mut published = Vec::new();
    let mut t = now;
    while engine.is_animating() {
        t += std::time::Duration::from_millis(16);
        published.extend(engine.tick(t));
    }
    published
}

#[test]
fn twenty_four_hour_minute_drag_keeps_hour() {
    let mut composer = TimeComposer::new(TimeFormat::TwentyFourHour, at(13, 45));
    assert_eq!(composer.mount(), at(13, 45));

    let seeds = composer.seeds();
    let hour = wheel(hour_items(TimeFormat::TwentyFourHour), WheelOptions::infinite(5), seeds.hour);
    let mut minute = wheel(minute_items(), WheelOptions::infinite(5), seeds.minute);
    assert_eq!(*hour.selected_item(), 13);
    assert_eq!(*minute.selected_item(), 45);

    let mut emitted = Vec::new();
    // 45 -> 59 -> 0 -> 7, one row at a time
    for _ in 0..22 {
        if let Some(value) = minute.drag_by(-20.0) {
            emitted.extend(composer.minute_changed(value));
        }
    }

    assert_eq!(emitted.len(), 22);
    assert_eq!(emitted.last(), Some(&at(13, 7)));
    assert!(emitted.iter().all(|time| time.hour() == 13));
    assert_eq!(*hour.selected_item(), 13);
}

#[test]
fn eleven_to_twelve_flips_am_to_pm() {
    let mut composer = TimeComposer::new(TimeFormat::TwelveHour, at(11, 0));
    composer.mount();
    let seeds = composer.seeds();
    let mut period = wheel(period_items(), WheelOptions::finite(3), seeds.period.unwrap());
    let mut hour = wheel(hour_items(TimeFormat::TwelveHour), WheelOptions::infinite(5), seeds.hour);
    assert_eq!(*period.selected_item(), TimePeriod::Am);
    assert_eq!(*hour.selected_item(), 11);

    let change = composer.hour_changed(hour.drag_by(-20.0).unwrap());
    assert_eq!(change.flip_to, Some(TimePeriod::Pm));

    let now = Instant::now();
    period.animate_to_index(period_index(TimePeriod::Pm), now);
    let landed = run_animation(&mut period, now);
    assert_eq!(landed, vec![TimePeriod::Pm]);
    assert_eq!(composer.period_changed(TimePeriod::Pm), Some(at(12, 0)));
}

#[test]
fn twelve_to_eleven_flips_pm_to_am() {
    let mut composer = TimeComposer::new(TimeFormat::TwelveHourKorean, at(12, 30));
    composer.mount();
    let seeds = composer.seeds();
    let mut period = wheel(period_items(), WheelOptions::finite(3), seeds.period.unwrap());
    let mut hour = wheel(
        hour_items(TimeFormat::TwelveHourKorean),
        WheelOptions::infinite(5),
        seeds.hour,
    );
    assert_eq!(*period.selected_item(), TimePeriod::Pm);
    assert_eq!(*hour.selected_item(), 12);

    let change = composer.hour_changed(hour.drag_by(20.0).unwrap());
    assert_eq!(change.flip_to, Some(TimePeriod::Am));

    let now = Instant::now();
    period.animate_to_index(period_index(TimePeriod::Am), now);
    assert_eq!(run_animation(&mut period, now), vec![TimePeriod::Am]);
    assert_eq!(composer.period_changed(TimePeriod::Am), Some(at(11, 30)));
}

#[test]
fn interrupted_period_flip_still_flips_on_next_crossing() {
    let mut composer = TimeComposer::new(TimeFormat::TwelveHour, at(11, 0));
    composer.mount();
    let seeds = composer.seeds();
    let mut period = wheel(period_items(), WheelOptions::finite(3), seeds.period.unwrap());
    let mut hour = wheel(hour_items(TimeFormat::TwelveHour), WheelOptions::infinite(5), seeds.hour);

    let change = composer.hour_changed(hour.drag_by(-20.0).unwrap());
    assert_eq!(change.flip_to, Some(TimePeriod::Pm));

    // the period wheel is pressed early in its flip and released in place
    let now = Instant::now();
    period.animate_to_index(period_index(TimePeriod::Pm), now);
    let pressed = now + std::time::Duration::from_millis(40);
    assert_eq!(period.tick(pressed), None);
    period.cancel_animation();
    composer.period_settled(*period.selected_item());
    period.settle(0.0, pressed);
    assert!(run_animation(&mut period, pressed).is_empty());
    composer.period_settled(*period.selected_item());
    assert_eq!(*period.selected_item(), TimePeriod::Am);

    // go once around the clock back to 12
    let mut flip = None;
    for _ in 0..12 {
        let change = composer.hour_changed(hour.drag_by(-20.0).unwrap());
        flip = flip.or(change.flip_to);
    }
    assert_eq!(*hour.selected_item(), 12);
    assert_eq!(flip, Some(TimePeriod::Pm));

    let later = Instant::now();
    period.animate_to_index(period_index(TimePeriod::Pm), later);
    assert_eq!(run_animation(&mut period, later), vec![TimePeriod::Pm]);
    assert_eq!(composer.period_changed(TimePeriod::Pm), Some(at(12, 0)));
}

#[test]
fn five_to_six_leaves_period_alone() {
    let mut composer = TimeComposer::new(TimeFormat::TwelveHour, at(17, 0));
    composer.mount();
    let mut hour = wheel(
        hour_items(TimeFormat::TwelveHour),
        WheelOptions::infinite(5),
        composer.seeds().hour,
    );
    let change = composer.hour_changed(hour.drag_by(-20.0).unwrap());
    assert_eq!(change.flip_to, None);
    assert_eq!(change.time, Some(at(18, 0)));
    assert_eq!(composer.period(), TimePeriod::Pm);
}

#[test]
fn every_clock_value_round_trips_through_seeding() {
    for format in [TimeFormat::TwelveHour, TimeFormat::TwentyFourHour] {
        let items = hour_items(format);
        for index in 0..items.len() {
            let mut engine = WheelEngine::new(items.clone(), WheelOptions::infinite(5), index).unwrap();
            engine.seed();
            assert_eq!(engine.detect_center(), items.get(index).copied());
        }
    }
    for index in 0..60 {
        let mut engine = WheelEngine::new(minute_items(), WheelOptions::infinite(5), index).unwrap();
        engine.seed();
        assert_eq!(engine.detect_center(), Some(index as u32));
    }
    for index in 0..2 {
        let mut engine = WheelEngine::new(period_items(), WheelOptions::finite(3), index).unwrap();
        assert_eq!(engine.seed(), period_items().get(index).copied());
    }
}

#[test]
fn external_reset_reseeds_without_emitting() {
    let mut composer = TimeComposer::new(TimeFormat::TwelveHour, at(9, 15));
    composer.mount();
    let mut minute = wheel(minute_items(), WheelOptions::infinite(5), composer.seeds().minute);

    let seeds = composer.reset(at(21, 40));
    assert_eq!(seeds.period, Some(period_index(TimePeriod::Pm)));
    minute.reseed(seeds.minute);
    let centered = minute.detect_center();
    assert_eq!(centered, Some(40));
    assert_eq!(composer.minute_changed(40), None);
    assert_eq!(composer.current(), at(21, 40));
}
