//! Standalone demo: opens a window with a 24-hour and a 12-hour time picker.

use chrono::NaiveTime;
use floem::peniko::Color;
use floem::prelude::*;
use floem::window::WindowConfig;
use floem_timepicker::{TimeFormat, TimePickerConfig, time_picker, time_picker_with};

fn main() {
    env_logger::init();

    let time = RwSignal::new(NaiveTime::from_hms_opt(13, 45, 0).unwrap());

    floem::Application::new()
        .window(
            move |_| {
                let twenty_four = match time_picker(
                    time,
                    TimePickerConfig::default().with_time_format(TimeFormat::TwentyFourHour),
                ) {
                    Ok(picker) => picker.into_any(),
                    Err(err) => label(move || err.to_string()).into_any(),
                };
                let twelve = match time_picker_with(
                    TimePickerConfig::default().with_time_format(TimeFormat::TwelveHourKorean),
                    |picked| log::info!("picked {}", picked.format("%H:%M")),
                ) {
                    Ok(picker) => picker.into_any(),
                    Err(err) => label(move || err.to_string()).into_any(),
                };
                let bound = label(move || format!("bound: {}", time.get().format("%H:%M")))
                    .style(|s| s.color(Color::WHITE).font_size(14.0));

                v_stack((twenty_four, bound, twelve))
                    .style(|s| s.width_full().gap(24.0).padding(16.0).background(Color::BLACK))
                    .on_event_stop(floem::event::EventListener::WindowClosed, |_| {
                        floem::quit_app()
                    })
            },
            Some(
                WindowConfig::default()
                    .size((360.0, 520.0))
                    .title("floem-timepicker"),
            ),
        )
        .run();
}
