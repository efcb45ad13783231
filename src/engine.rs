//! Wheel engine: keeps one scrolling column in sync with its [`PickerState`].
//!
//! The engine tracks the scroll offset in rows (the fractional index of the
//! row at the top edge of the viewport), decides which row sits in the
//! center, and publishes the centered item whenever it changes. It knows
//! nothing about the UI toolkit; the Floem view feeds it pointer deltas,
//! measured row heights, and animation ticks.

use std::time::{Duration, Instant};

use crate::animation::ScrollTween;
use crate::constants;
use crate::curve::{CurveEffect, RowEffect};
use crate::error::PickerError;
use crate::index::ScrollSpace;
use crate::state::{PickerState, SubscriptionId, WheelItems};

/// Construction options for one wheel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WheelOptions {
    pub visible_items_count: usize,
    pub infinite: bool,
    pub item_spacing: f64,
    pub curve_effect: CurveEffect,
}

impl Default for WheelOptions {
    fn default() -> Self {
        Self {
            visible_items_count: constants::DEFAULT_VISIBLE_ITEMS_COUNT,
            infinite: true,
            item_spacing: constants::DEFAULT_ITEM_SPACING,
            curve_effect: CurveEffect::default(),
        }
    }
}

impl WheelOptions {
    pub fn finite(visible_items_count: usize) -> Self {
        Self {
            visible_items_count,
            infinite: false,
            ..Self::default()
        }
    }

    pub fn infinite(visible_items_count: usize) -> Self {
        Self {
            visible_items_count,
            infinite: true,
            ..Self::default()
        }
    }

    pub fn with_item_spacing(mut self, item_spacing: f64) -> Self {
        self.item_spacing = item_spacing;
        self
    }

    pub fn with_curve_effect(mut self, curve_effect: CurveEffect) -> Self {
        self.curve_effect = curve_effect;
        self
    }
}

/// Rounds an even visible count down to the nearest odd one.
///
/// Zero leaves no row to center and is rejected.
pub fn normalize_visible_count(count: usize) -> Result<usize, PickerError> {
    if count == 0 {
        return Err(PickerError::InvalidVisibleCount(count));
    }
    if count % 2 == 0 {
        log::warn!(
            "visible items count {} is even, using {} so a single row is centered",
            count,
            count - 1
        );
        return Ok(count - 1);
    }
    Ok(count)
}

/// One rendered row with its layout relative to the viewport top.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisibleRow<'a, T> {
    pub scroll_index: usize,
    pub logical_index: Option<usize>,
    pub item: Option<&'a T>,
    /// Top edge in pixels; negative for a row partly above the viewport.
    pub top: f64,
    pub height: f64,
    pub effect: RowEffect,
}

pub struct WheelEngine<T> {
    state: PickerState<T>,
    space: ScrollSpace,
    offset: f64,
    row_height: f64,
    item_spacing: f64,
    curve: CurveEffect,
    last_published: Option<usize>,
    tween: Option<ScrollTween>,
}

impl<T: std::fmt::Debug> std::fmt::Debug for WheelEngine<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WheelEngine")
            .field("state", &self.state)
            .field("space", &self.space)
            .field("offset", &self.offset)
            .field("row_height", &self.row_height)
            .field("last_published", &self.last_published)
            .field("animating", &self.tween.is_some())
            .finish()
    }
}

impl<T: Clone> WheelEngine<T> {
    /// Builds an unseeded engine. Call [`seed`](Self::seed) before use.
    pub fn new(
        items: WheelItems<T>,
        options: WheelOptions,
        initial_index: usize,
    ) -> Result<Self, PickerError> {
        let visible_count = normalize_visible_count(options.visible_items_count)?;
        options.curve_effect.validate()?;
        let space = ScrollSpace::new(items.len(), visible_count, options.infinite);
        Ok(Self {
            state: PickerState::new(items, initial_index),
            space,
            offset: 0.0,
            row_height: 0.0,
            item_spacing: options.item_spacing.max(0.0),
            curve: options.curve_effect,
            last_published: None,
            tween: None,
        })
    }

    pub fn state(&self) -> &PickerState<T> {
        &self.state
    }

    pub fn items(&self) -> &WheelItems<T> {
        self.state.items()
    }

    pub fn selected_index(&self) -> usize {
        self.state.selected_index()
    }

    pub fn selected_item(&self) -> &T {
        self.state.selected_item()
    }

    pub fn space(&self) -> ScrollSpace {
        self.space
    }

    /// Fractional row index at the top edge of the viewport.
    pub fn offset(&self) -> f64 {
        self.offset
    }

    pub fn row_height(&self) -> f64 {
        self.row_height
    }

    pub fn item_spacing(&self) -> f64 {
        self.item_spacing
    }

    /// Height of one row including its spacing; zero until measured.
    pub fn slot_height(&self) -> f64 {
        if self.row_height <= 0.0 {
            return 0.0;
        }
        self.row_height + self.item_spacing
    }

    pub fn viewport_height(&self) -> f64 {
        self.slot_height() * self.space.visible_count() as f64
    }

    pub fn subscribe(&mut self, listener: impl FnMut(usize) + 'static) -> SubscriptionId {
        self.state.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.state.unsubscribe(id)
    }

    /// Records the measured height of a rendered row.
    pub fn measure_row_height(&mut self, height: f64) {
        if height > 0.0 && (height - self.row_height).abs() > f64::EPSILON {
            log::debug!("wheel row height measured at {:.1}px", height);
            self.row_height = height;
        }
    }

    /// Jumps to the row that centers the selected index.
    ///
    /// Finite wheels publish the seeded item right away. Infinite wheels
    /// publish on the next [`detect_center`](Self::detect_center).
    pub fn seed(&mut self) -> Option<T> {
        let index = self.state.selected_index();
        let top = self.space.seed_top(index);
        log::debug!(
            "seeding wheel at item {} (top row {}, infinite: {})",
            index,
            top,
            self.space.is_infinite()
        );
        self.tween = None;
        self.offset = top as f64;
        if self.space.is_infinite() {
            return None;
        }
        self.publish(index)
    }

    /// Selects `index` (clamped) and seeds again.
    pub fn reseed(&mut self, index: usize) -> Option<T> {
        self.state.update_selected_index(index);
        self.seed()
    }

    /// Publishes the centered item if it differs from the last one.
    pub fn detect_center(&mut self) -> Option<T> {
        let logical = self.space.logical_index(self.centered_scroll_index())?;
        self.publish(logical)
    }

    /// Scroll index of the row whose center is nearest the viewport center.
    ///
    /// Measured in rows so the answer holds before the row height is known.
    /// Ties go to the upper row.
    pub fn centered_scroll_index(&self) -> usize {
        let viewport_center = self.space.visible_count() as f64 / 2.0;
        let first = self.first_row();
        self.row_range()
            .map(|scroll_index| {
                let center = scroll_index as f64 - self.offset + 0.5;
                (scroll_index, (center - viewport_center).abs())
            })
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map_or(first, |(scroll_index, _)| scroll_index)
    }

    /// Rows intersecting the viewport with their curve effect applied.
    pub fn visible_rows(&self) -> Vec<VisibleRow<'_, T>> {
        let slot = self.slot_height();
        let viewport_center = self.viewport_height() / 2.0;
        let max_distance = (slot * self.space.visible_middle() as f64) as f32;
        self.row_range()
            .map(|scroll_index| {
                let top = (scroll_index as f64 - self.offset) * slot;
                let distance = (top + slot / 2.0 - viewport_center).abs() as f32;
                let logical_index = self.space.logical_index(scroll_index);
                VisibleRow {
                    scroll_index,
                    logical_index,
                    item: logical_index.and_then(|index| self.state.items().get(index)),
                    top,
                    height: slot,
                    effect: self.curve.row_effect(distance, max_distance),
                }
            })
            .collect()
    }

    /// Scroll index of the row under `y` pixels from the viewport top.
    pub fn scroll_index_at(&self, y: f64) -> Option<usize> {
        let slot = self.slot_height();
        if slot <= 0.0 || y < 0.0 || y >= self.viewport_height() {
            return None;
        }
        let row = (self.offset + y / slot).floor() as usize;
        (row < self.space.len()).then_some(row)
    }

    /// Moves the wheel by a pointer delta. Positive `delta_px` pulls the
    /// rows down, revealing earlier items.
    pub fn drag_by(&mut self, delta_px: f64) -> Option<T> {
        let slot = self.slot_height();
        if slot <= 0.0 {
            return None;
        }
        self.tween = None;
        self.offset = self.clamp_offset(self.offset - delta_px / slot);
        self.detect_center()
    }

    /// Animates onto the row boundary nearest `offset + projected_rows`.
    pub fn settle(&mut self, projected_rows: f64, now: Instant) {
        let target = (self.offset + projected_rows).round();
        self.animate_to_offset(target, constants::SNAP_DURATION, now);
    }

    /// Animates `delta` rows from the current target, so repeated calls
    /// accumulate while an animation is running.
    pub fn scroll_by_rows(&mut self, delta: isize, now: Instant) {
        let base = self
            .tween
            .map_or(self.offset.round(), |tween| tween.target());
        self.animate_to_offset(base + delta as f64, constants::SNAP_DURATION, now);
    }

    /// Animates the row at `scroll_index` into the center.
    pub fn animate_to_scroll_index(&mut self, scroll_index: usize, now: Instant) {
        let top = scroll_index.saturating_sub(self.space.visible_middle());
        self.animate_to_offset(top as f64, constants::SCROLL_DURATION, now);
    }

    /// Animates the shortest way to the row that centers `logical`.
    pub fn animate_to_index(&mut self, logical: usize, now: Instant) {
        let current_top = self.offset.round().max(0.0) as usize;
        let top = self.space.nearest_top_for(current_top, logical);
        self.animate_to_offset(top as f64, constants::SCROLL_DURATION, now);
    }

    /// Starts an animation to `target`, superseding any running one.
    pub fn animate_to_offset(&mut self, target: f64, duration: Duration, now: Instant) {
        let target = self.clamp_offset(target);
        match self.tween.as_mut() {
            Some(tween) => {
                log::debug!(
                    "wheel animation retargeted from {:.2} to {:.2}",
                    tween.target(),
                    target
                );
                tween.retarget(now, target, duration);
            }
            None => self.tween = Some(ScrollTween::new(self.offset, target, now, duration)),
        }
    }

    pub fn is_animating(&self) -> bool {
        self.tween.is_some()
    }

    pub fn cancel_animation(&mut self) {
        self.tween = None;
    }

    /// Advances the running animation and publishes any centering change.
    pub fn tick(&mut self, now: Instant) -> Option<T> {
        let tween = self.tween?;
        self.offset = self.clamp_offset(tween.sample(now));
        if tween.is_done(now) {
            self.tween = None;
        }
        self.detect_center()
    }

    fn publish(&mut self, logical: usize) -> Option<T> {
        if self.last_published == Some(logical) {
            return None;
        }
        if self.state.selected_index() != logical {
            self.state.update_selected_index(logical);
        }
        self.last_published = Some(logical);
        Some(self.state.selected_item().clone())
    }

    fn clamp_offset(&self, offset: f64) -> f64 {
        offset.clamp(0.0, self.space.max_top() as f64)
    }

    fn first_row(&self) -> usize {
        self.offset.max(0.0).floor() as usize
    }

    /// The visible rows plus the one partly revealed below them.
    fn row_range(&self) -> std::ops::RangeInclusive<usize> {
        let first = self.first_row();
        let last = (first + self.space.visible_count()).min(self.space.len().saturating_sub(1));
        first..=last
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minute_wheel(initial: usize) -> WheelEngine<u32> {
        WheelEngine::new(
            WheelItems::range(0..=59).unwrap(),
            WheelOptions::infinite(5),
            initial,
        )
        .unwrap()
    }

    fn period_wheel(initial: usize) -> WheelEngine<&'static str> {
        WheelEngine::new(
            WheelItems::new(vec!["AM", "PM"]).unwrap(),
            WheelOptions::finite(3),
            initial,
        )
        .unwrap()
    }

    #[test]
    fn seed_then_detect_round_trips_infinite() {
        for i in 0..60 {
            let mut wheel = minute_wheel(i);
            assert_eq!(wheel.seed(), None);
            assert_eq!(wheel.detect_center(), Some(i as u32));
            assert_eq!(wheel.selected_index(), i);
        }
    }

    #[test]
    fn seed_then_detect_round_trips_finite() {
        let items: Vec<u32> = (0..10).collect();
        for i in 0..10 {
            let mut wheel = WheelEngine::new(
                WheelItems::new(items.clone()).unwrap(),
                WheelOptions::finite(5),
                i,
            )
            .unwrap();
            assert_eq!(wheel.seed(), Some(i as u32));
            assert_eq!(wheel.detect_center(), None);
            assert_eq!(
                wheel.space().logical_index(wheel.centered_scroll_index()),
                Some(i)
            );
        }
    }

    #[test]
    fn round_trip_survives_row_measurement() {
        let mut wheel = minute_wheel(42);
        wheel.seed();
        wheel.measure_row_height(30.0);
        assert_eq!(wheel.detect_center(), Some(42));
    }

    #[test]
    fn finite_seed_publishes_once() {
        let mut wheel = period_wheel(1);
        assert_eq!(wheel.seed(), Some("PM"));
        assert_eq!(wheel.seed(), None);
    }

    #[test]
    fn single_item_wheel_always_reports_it() {
        let mut wheel = WheelEngine::new(
            WheelItems::new(vec![7u32]).unwrap(),
            WheelOptions::infinite(5),
            3,
        )
        .unwrap();
        wheel.seed();
        assert_eq!(wheel.detect_center(), Some(7));
        wheel.measure_row_height(20.0);
        wheel.drag_by(-95.0);
        assert_eq!(*wheel.selected_item(), 7);
    }

    #[test]
    fn drag_publishes_distinct_values_only() {
        let mut wheel = minute_wheel(10);
        wheel.seed();
        wheel.detect_center();
        wheel.measure_row_height(18.0);
        // slot is 20px; under half a row does not move the center
        assert_eq!(wheel.drag_by(-4.0), None);
        assert_eq!(wheel.drag_by(-4.0), None);
        // past half a row the next item takes the center
        assert_eq!(wheel.drag_by(-4.0), Some(11));
        assert_eq!(wheel.drag_by(-1.0), None);
        assert_eq!(wheel.drag_by(40.0), Some(9));
    }

    #[test]
    fn drag_before_measurement_is_ignored() {
        let mut wheel = minute_wheel(10);
        wheel.seed();
        let offset = wheel.offset();
        assert_eq!(wheel.drag_by(-100.0), None);
        assert_eq!(wheel.offset(), offset);
    }

    #[test]
    fn finite_wheel_clamps_at_both_ends() {
        let mut wheel = period_wheel(0);
        wheel.seed();
        wheel.measure_row_height(20.0);
        assert_eq!(wheel.drag_by(200.0), None);
        assert_eq!(wheel.offset(), 0.0);
        assert_eq!(wheel.drag_by(-500.0), Some("PM"));
        assert_eq!(wheel.offset(), 1.0);
    }

    #[test]
    fn settle_snaps_to_nearest_row() {
        let mut wheel = minute_wheel(10);
        wheel.seed();
        wheel.detect_center();
        wheel.measure_row_height(18.0);
        let start = wheel.offset();
        wheel.drag_by(-26.0); // 1.3 rows
        let now = Instant::now();
        wheel.settle(0.0, now);
        assert!(wheel.is_animating());
        wheel.tick(now + constants::SNAP_DURATION);
        assert!(!wheel.is_animating());
        assert_eq!(wheel.offset(), start + 1.0);
        assert_eq!(*wheel.selected_item(), 11);
    }

    #[test]
    fn animate_to_index_publishes_target() {
        let mut wheel = period_wheel(0);
        wheel.seed();
        let now = Instant::now();
        wheel.animate_to_index(1, now);
        let mut published = Vec::new();
        let mut t = now;
        while wheel.is_animating() {
            t += constants::FRAME_INTERVAL;
            if let Some(item) = wheel.tick(t) {
                published.push(item);
            }
        }
        assert_eq!(published, vec!["PM"]);
    }

    #[test]
    fn newer_animation_supersedes_running_one() {
        let mut wheel = minute_wheel(0);
        wheel.seed();
        wheel.detect_center();
        let now = Instant::now();
        wheel.animate_to_index(5, now);
        wheel.tick(now + Duration::from_millis(50));
        wheel.animate_to_index(58, now + Duration::from_millis(50));
        let end = now + Duration::from_secs(1);
        wheel.tick(end);
        assert!(!wheel.is_animating());
        assert_eq!(*wheel.selected_item(), 58);
    }

    #[test]
    fn scroll_by_rows_accumulates_onto_target() {
        let mut wheel = minute_wheel(0);
        wheel.seed();
        wheel.detect_center();
        let now = Instant::now();
        wheel.scroll_by_rows(1, now);
        wheel.scroll_by_rows(1, now);
        wheel.scroll_by_rows(1, now);
        wheel.tick(now + Duration::from_secs(1));
        assert_eq!(*wheel.selected_item(), 3);
    }

    #[test]
    fn visible_rows_fade_symmetrically() {
        let mut wheel = minute_wheel(30);
        wheel.seed();
        wheel.measure_row_height(20.0);
        let rows = wheel.visible_rows();
        assert_eq!(rows.len(), 6);
        let center = &rows[2];
        assert_eq!(center.item, Some(&30));
        assert_eq!(center.effect.alpha, 1.0);
        assert_eq!(rows[1].effect, rows[3].effect);
        assert_eq!(rows[0].effect.alpha, constants::DEFAULT_MIN_ALPHA);
        assert_eq!(rows[4].effect.alpha, constants::DEFAULT_MIN_ALPHA);
    }

    #[test]
    fn padding_rows_have_no_item() {
        let mut wheel = period_wheel(0);
        wheel.seed();
        wheel.measure_row_height(20.0);
        let rows = wheel.visible_rows();
        assert_eq!(rows[0].item, None);
        assert_eq!(rows[1].item, Some(&"AM"));
        assert_eq!(rows[2].item, Some(&"PM"));
    }

    #[test]
    fn scroll_index_at_maps_pointer_rows() {
        let mut wheel = period_wheel(0);
        wheel.seed();
        assert_eq!(wheel.scroll_index_at(10.0), None);
        wheel.measure_row_height(20.0);
        assert_eq!(wheel.scroll_index_at(10.0), Some(0));
        assert_eq!(wheel.scroll_index_at(50.0), Some(2));
        assert_eq!(wheel.scroll_index_at(70.0), None);
    }

    #[test]
    fn state_subscribers_follow_the_center() {
        use std::cell::RefCell;
        use std::rc::Rc;

        let mut wheel = minute_wheel(0);
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        wheel.subscribe(move |index| sink.borrow_mut().push(index));
        wheel.seed();
        wheel.detect_center();
        wheel.measure_row_height(20.0);
        wheel.drag_by(-22.0);
        assert_eq!(*seen.borrow(), vec![1]);
    }

    #[test]
    fn visible_count_is_normalized() {
        assert_eq!(normalize_visible_count(5), Ok(5));
        assert_eq!(normalize_visible_count(4), Ok(3));
        assert_eq!(normalize_visible_count(1), Ok(1));
        assert_eq!(
            normalize_visible_count(0),
            Err(PickerError::InvalidVisibleCount(0))
        );
        let wheel = WheelEngine::new(
            WheelItems::range(0..=59).unwrap(),
            WheelOptions::infinite(6),
            0,
        )
        .unwrap();
        assert_eq!(wheel.space().visible_count(), 5);
    }
}
