//! Time picker: hour, minute, and (for 12-hour formats) am/pm wheels laid
//! out over a selector band.

use std::cell::RefCell;
use std::rc::Rc;

use chrono::NaiveTime;
use floem::AnyView;
use floem::prelude::*;
use floem::reactive::{RwSignal, SignalGet, SignalUpdate, create_effect};
use floem::views::{Stack, h_stack_from_iter};

use crate::composer::{TimeComposer, WheelSeeds, period_index};
use crate::config::TimePickerConfig;
use crate::constants;
use crate::engine::WheelEngine;
use crate::error::PickerError;
use crate::time::{self, TimePeriod};
use crate::wheel_view::{WheelHandle, picker_wheel};

#[derive(Clone, Copy)]
struct WheelHandles {
    period: Option<WheelHandle>,
    hour: WheelHandle,
    minute: WheelHandle,
}

impl WheelHandles {
    fn reseed(&self, seeds: WheelSeeds) {
        if let (Some(handle), Some(index)) = (self.period, seeds.period) {
            handle.reseed(index);
        }
        self.hour.reseed(seeds.hour);
        self.minute.reseed(seeds.minute);
    }
}

struct Picker {
    view: Stack,
    composer: Rc<RefCell<TimeComposer>>,
    handles: WheelHandles,
}

/// Creates a time picker bound to `time`.
///
/// The picker starts at the signal's value, writes every picked time back
/// to it, and re-seeds its wheels when the signal is set from outside.
/// `config.initial_time` is ignored in favor of the signal.
pub fn time_picker(
    time: RwSignal<NaiveTime>,
    config: TimePickerConfig,
) -> Result<impl IntoView, PickerError> {
    let config = config.with_initial_time(time.get_untracked());
    let picker = build(config, move |picked| {
        if time.get_untracked() != picked {
            time.set(picked);
        }
    })?;

    let composer = picker.composer;
    let handles = picker.handles;

    // External time -> wheels
    create_effect(move |_| {
        let external = time::truncate_to_minute(time.get());
        let current = composer.borrow().current();
        if current == external {
            return;
        }
        log::debug!("time set to {} from outside, reseeding wheels", external);
        let seeds = composer.borrow_mut().reset(external);
        handles.reseed(seeds);
    });

    Ok(picker.view)
}

/// Creates a time picker that reports picked times to `on_value_change`.
///
/// The callback runs once while the picker is built, with the initial time,
/// and again for every distinct time the wheels settle or pass through.
pub fn time_picker_with(
    config: TimePickerConfig,
    on_value_change: impl Fn(NaiveTime) + 'static,
) -> Result<impl IntoView, PickerError> {
    build(config, on_value_change).map(|picker| picker.view)
}

fn build(
    config: TimePickerConfig,
    on_value_change: impl Fn(NaiveTime) + 'static,
) -> Result<Picker, PickerError> {
    config.validate()?;
    let format = config.time_format;
    let composer = Rc::new(RefCell::new(TimeComposer::new(
        format,
        config.initial_time_or_now(),
    )));
    let emit: Rc<dyn Fn(NaiveTime)> = Rc::new(on_value_change);

    let mounted = composer.borrow_mut().mount();
    log::debug!("time picker mounted at {} ({:?})", mounted, format);
    emit(mounted);

    let seeds = composer.borrow().seeds();
    let style = config.style.clone();
    let mut columns: Vec<AnyView> = Vec::new();

    let period = match seeds.period {
        Some(index) => {
            let engine =
                WheelEngine::new(time::period_items(), config.period_wheel_options(), index)?;
            let locale = format.locale();
            let changed = {
                let composer = composer.clone();
                let emit = emit.clone();
                move |period| {
                    let picked = composer.borrow_mut().period_changed(period);
                    if let Some(picked) = picked {
                        emit(picked);
                    }
                }
            };
            let settled = {
                let composer = composer.clone();
                let emit = emit.clone();
                move |period| {
                    let picked = composer.borrow_mut().period_settled(period);
                    if let Some(picked) = picked {
                        emit(picked);
                    }
                }
            };
            let wheel = picker_wheel(
                engine,
                style.clone(),
                move |period: &TimePeriod| period.label(locale).to_string(),
                changed,
            )
            .on_settle(settled);
            let handle = wheel.handle();
            columns.push(wheel.into_any());
            Some(handle)
        }
        None => None,
    };

    let hour_engine =
        WheelEngine::new(time::hour_items(format), config.wheel_options(), seeds.hour)?;
    let hour_wheel = {
        let composer = composer.clone();
        let emit = emit.clone();
        picker_wheel(hour_engine, style.clone(), time::format_hour, move |hour| {
            let change = composer.borrow_mut().hour_changed(hour);
            if let (Some(handle), Some(target)) = (period, change.flip_to) {
                handle.scroll_to(period_index(target));
            }
            if let Some(picked) = change.time {
                emit(picked);
            }
        })
    };
    let hour = hour_wheel.handle();
    columns.push(hour_wheel.into_any());

    if format.is_24_hour() {
        let font_size = style.font_size;
        let color = style.text_color;
        columns.push(
            label(|| ":")
                .style(move |s| s.font_size(font_size).color(color))
                .into_any(),
        );
    }

    let minute_engine =
        WheelEngine::new(time::minute_items(), config.wheel_options(), seeds.minute)?;
    let minute_wheel = {
        let composer = composer.clone();
        let emit = emit.clone();
        picker_wheel(minute_engine, style, time::format_minute, move |minute| {
            let picked = composer.borrow_mut().minute_changed(minute);
            if let Some(picked) = picked {
                emit(picked);
            }
        })
    };
    let minute = minute_wheel.handle();
    columns.push(minute_wheel.into_any());

    let slot = config.slot_height();
    let visible = config.visible_count()? as f32;
    let wheels_height = slot * visible;
    let band_top = slot * (visible - 1.0) / 2.0 - constants::SELECTOR_EXTRA_HEIGHT / 2.0;
    let selector = config.selector.clone();

    let band = empty().style(move |s| {
        s.absolute()
            .inset_top(band_top)
            .inset_left(constants::SELECTOR_INSET)
            .inset_right(constants::SELECTOR_INSET)
            .height(slot + constants::SELECTOR_EXTRA_HEIGHT)
            .background(selector.color)
            .border_radius(selector.radius as f32)
            .apply_opt(selector.border, |s, border| {
                s.border(border.width).border_color(border.color)
            })
            .apply_if(!selector.enabled, |s| s.hide())
    });

    let wheels = h_stack_from_iter(columns).style(move |s| {
        s.width_full()
            .height(wheels_height)
            .items_center()
            .padding_horiz(constants::WHEELS_INSET)
    });

    Ok(Picker {
        view: v_stack((band, wheels)).style(|s| s.width_full()),
        composer,
        handles: WheelHandles {
            period,
            hour,
            minute,
        },
    })
}
