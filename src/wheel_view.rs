//! Floem view for a single picker wheel.
//!
//! Paints the visible rows of a [`WheelEngine`] with their curve effect and
//! turns pointer input into engine drags, settles, and scroll animations.
//! Animation frames are driven by `exec_after` timers; every new animation
//! bumps a generation counter so frames from a superseded one are dropped.

use std::time::Instant;

use floem::action::exec_after;
use floem::kurbo::{Point, Rect};
use floem::text::{Attrs, AttrsList, FamilyOwned, TextLayout};
use floem::views::Decorators;
use floem::{
    View, ViewId,
    context::{ComputeLayoutCx, EventCx, PaintCx, UpdateCx},
    event::{Event, EventPropagation},
};
use floem_renderer::Renderer;

use crate::config::PickerStyle;
use crate::constants;
use crate::engine::WheelEngine;

enum WheelUpdate {
    Reseed(usize),
    ScrollTo(usize),
    Frame(u64),
}

/// Sends commands to a mounted wheel from outside its view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WheelHandle(ViewId);

impl WheelHandle {
    /// Jumps the wheel to `index` without animating.
    pub fn reseed(&self, index: usize) {
        self.0.update_state(WheelUpdate::Reseed(index));
    }

    /// Animates the wheel to `index`, replacing any running animation.
    pub fn scroll_to(&self, index: usize) {
        self.0.update_state(WheelUpdate::ScrollTo(index));
    }
}

/// Press that may turn into a drag once it travels far enough.
struct DragState {
    start_y: f64,
    last_y: f64,
    last_time: Instant,
    /// Pixels per second, positive downward.
    velocity: f64,
    dragging: bool,
}

impl DragState {
    fn new(y: f64, now: Instant) -> Self {
        Self {
            start_y: y,
            last_y: y,
            last_time: now,
            velocity: 0.0,
            dragging: false,
        }
    }

    /// Pointer delta to apply, once past the drag threshold.
    fn track(&mut self, y: f64, now: Instant) -> Option<f64> {
        if !self.dragging {
            if (y - self.start_y).abs() < constants::DRAG_THRESHOLD {
                return None;
            }
            self.dragging = true;
        }
        let delta = y - self.last_y;
        let elapsed = now.saturating_duration_since(self.last_time).as_secs_f64();
        if elapsed > 0.0 {
            self.velocity = (delta / elapsed)
                .clamp(-constants::MAX_FLING_VELOCITY, constants::MAX_FLING_VELOCITY);
        }
        self.last_y = y;
        self.last_time = now;
        Some(delta)
    }
}

pub struct PickerWheel<T> {
    id: ViewId,
    engine: WheelEngine<T>,
    style: PickerStyle,
    format_item: Box<dyn Fn(&T) -> String>,
    on_change: Box<dyn Fn(T)>,
    on_settle: Option<Box<dyn Fn(T)>>,
    size: floem::taffy::prelude::Size<f32>,
    families: Vec<FamilyOwned>,
    drag: Option<DragState>,
    frame_generation: u64,
}

/// Creates a wheel view around `engine`.
///
/// The engine is seeded here, and `on_change` receives the seeded item
/// before the view is returned.
pub fn picker_wheel<T: Clone + 'static>(
    mut engine: WheelEngine<T>,
    style: PickerStyle,
    format_item: impl Fn(&T) -> String + 'static,
    on_change: impl Fn(T) + 'static,
) -> PickerWheel<T> {
    let id = ViewId::new();

    let seeded = engine.seed();
    let centered = engine.detect_center();
    for item in seeded.into_iter().chain(centered) {
        on_change(item);
    }

    engine.subscribe(move |_| id.request_paint());

    let families = style
        .font_family
        .as_deref()
        .map(|family| FamilyOwned::parse_list(family).collect())
        .unwrap_or_default();
    let height = (style.row_height() + engine.item_spacing() as f32)
        * engine.space().visible_count() as f32;

    PickerWheel {
        id,
        engine,
        style,
        format_item: Box::new(format_item),
        on_change: Box::new(on_change),
        on_settle: None,
        size: Default::default(),
        families,
        drag: None,
        frame_generation: 0,
    }
    .style(move |s| {
        s.height(height)
            .min_width(constants::WHEEL_MIN_WIDTH)
            .flex_grow(1.0)
            .cursor(floem::style::CursorStyle::Pointer)
    })
}

impl<T: Clone + 'static> PickerWheel<T> {
    pub fn handle(&self) -> WheelHandle {
        WheelHandle(self.id)
    }

    /// Called with the centered item whenever an animation finishes or is
    /// cut short by a press.
    pub fn on_settle(mut self, on_settle: impl Fn(T) + 'static) -> Self {
        self.on_settle = Some(Box::new(on_settle));
        self
    }

    fn settled(&self) {
        if let Some(on_settle) = &self.on_settle {
            on_settle(self.engine.selected_item().clone());
        }
    }

    fn publish(&self, item: Option<T>) {
        if let Some(item) = item {
            (self.on_change)(item);
        }
    }

    fn start_frames(&mut self) {
        self.frame_generation += 1;
        self.schedule_frame();
    }

    fn stop_frames(&mut self) {
        self.frame_generation += 1;
    }

    fn schedule_frame(&self) {
        let id = self.id;
        let generation = self.frame_generation;
        exec_after(constants::FRAME_INTERVAL, move |_| {
            id.update_state(WheelUpdate::Frame(generation));
        });
    }

    fn release(&mut self, drag: DragState, y: f64) {
        let now = Instant::now();
        if drag.dragging {
            let slot = self.engine.slot_height();
            let projected = if slot > 0.0 {
                -drag.velocity * constants::FLING_PROJECTION / slot
            } else {
                0.0
            };
            self.engine.settle(projected, now);
        } else if let Some(row) = self.engine.scroll_index_at(y) {
            self.engine.animate_to_scroll_index(row, now);
        } else {
            self.engine.settle(0.0, now);
        }
        self.start_frames();
    }
}

impl<T: Clone + 'static> View for PickerWheel<T> {
    fn id(&self) -> ViewId {
        self.id
    }

    fn update(&mut self, _cx: &mut UpdateCx, state: Box<dyn std::any::Any>) {
        if let Ok(update) = state.downcast::<WheelUpdate>() {
            match *update {
                WheelUpdate::Reseed(index) => {
                    self.stop_frames();
                    self.drag = None;
                    let seeded = self.engine.reseed(index);
                    self.publish(seeded);
                    let centered = self.engine.detect_center();
                    self.publish(centered);
                }
                WheelUpdate::ScrollTo(index) => {
                    self.engine.animate_to_index(index, Instant::now());
                    self.start_frames();
                }
                WheelUpdate::Frame(generation) => {
                    if generation != self.frame_generation {
                        return;
                    }
                    let centered = self.engine.tick(Instant::now());
                    self.publish(centered);
                    if self.engine.is_animating() {
                        self.schedule_frame();
                    } else {
                        self.settled();
                    }
                }
            }
            self.id.request_paint();
        }
    }

    fn event_before_children(&mut self, cx: &mut EventCx, event: &Event) -> EventPropagation {
        match event {
            Event::PointerDown(e) => {
                cx.update_active(self.id());
                if self.engine.is_animating() {
                    self.engine.cancel_animation();
                    self.settled();
                }
                self.stop_frames();
                self.drag = Some(DragState::new(e.pos.y, Instant::now()));
                EventPropagation::Stop
            }
            Event::PointerMove(e) => {
                let Some(drag) = self.drag.as_mut() else {
                    return EventPropagation::Continue;
                };
                if let Some(delta) = drag.track(e.pos.y, Instant::now()) {
                    let centered = self.engine.drag_by(delta);
                    self.publish(centered);
                    self.id.request_paint();
                }
                EventPropagation::Stop
            }
            Event::PointerUp(e) => {
                let Some(drag) = self.drag.take() else {
                    return EventPropagation::Continue;
                };
                self.release(drag, e.pos.y);
                EventPropagation::Stop
            }
            Event::PointerWheel(e) => {
                if e.delta.y == 0.0 {
                    return EventPropagation::Continue;
                }
                self.engine
                    .scroll_by_rows(e.delta.y.signum() as isize, Instant::now());
                self.start_frames();
                EventPropagation::Stop
            }
            Event::FocusLost => {
                if let Some(drag) = self.drag.take() {
                    let y = drag.last_y;
                    self.release(drag, y);
                }
                EventPropagation::Continue
            }
            _ => EventPropagation::Continue,
        }
    }

    fn compute_layout(&mut self, _cx: &mut ComputeLayoutCx) -> Option<Rect> {
        let layout = self.id.get_layout().unwrap_or_default();
        self.size = layout.size;
        let visible = self.engine.space().visible_count() as f64;
        let row_height = self.size.height as f64 / visible - self.engine.item_spacing();
        self.engine.measure_row_height(row_height);
        None
    }

    fn paint(&mut self, cx: &mut PaintCx) {
        let w = self.size.width as f64;
        let h = self.size.height as f64;
        if w == 0.0 || h == 0.0 {
            return;
        }

        cx.save();
        cx.clip(&Rect::new(0.0, 0.0, w, h));

        for row in self.engine.visible_rows() {
            let Some(item) = row.item else {
                continue;
            };
            // Text has no vertical-only scale here, so scale_y shrinks the glyphs.
            let color = self.style.text_color.multiply_alpha(row.effect.alpha);
            let mut attrs = Attrs::new()
                .color(color)
                .font_size(self.style.font_size * row.effect.scale_y);
            if !self.families.is_empty() {
                attrs = attrs.family(&self.families);
            }
            let mut layout = TextLayout::new();
            layout.set_text(&(self.format_item)(item), AttrsList::new(attrs));

            let text_size = layout.size();
            let x = (w - text_size.width) / 2.0;
            let y = row.top + (row.height - text_size.height) / 2.0;
            cx.draw_text(&layout, Point::new(x, y));
        }

        cx.restore();
    }
}
