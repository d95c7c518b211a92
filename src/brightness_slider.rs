//! Floem view for the picker's connected brightness slider.
//!
//! Renders a horizontal gradient from the track color at full brightness
//! (left) to black (right) as a rasterized image, avoiding vger's broken
//! linear gradient coordinate handling. Without a connected slider the
//! track is drawn gray and ignores the pointer.

use std::sync::Arc;

use floem::kurbo::{Circle, Rect, Stroke};
use floem::peniko::{self, Blob, Color};

use floem::reactive::create_effect;
use floem::views::Decorators;
use floem::{
    context::{ComputeLayoutCx, EventCx, PaintCx, UpdateCx},
    event::{Event, EventPropagation},
    View, ViewId,
};
use floem_renderer::Renderer;

use crate::color::SolidColor;
use crate::color_wheel::Refresh;
use crate::constants;
use crate::sampling::cell_offset;
use crate::shared::SharedPicker;

/// Rasterize a horizontal gradient: `color` on the left → black on the right.
fn rasterize_brightness_gradient(width: u32, height: u32, color: SolidColor) -> Vec<u8> {
    let (r, g, b) = (color.r(), color.g(), color.b());
    let mut buf = vec![0u8; cell_offset(width, 0, height)];
    for px in 0..width {
        let t = px as f64 / (width - 1).max(1) as f64; // 0 at left, 1 at right
        let cr = ((1.0 - t) * r * 255.0 + 0.5) as u8;
        let cg = ((1.0 - t) * g * 255.0 + 0.5) as u8;
        let cb = ((1.0 - t) * b * 255.0 + 0.5) as u8;
        for py in 0..height {
            let offset = cell_offset(width, px, py);
            buf[offset] = cr;
            buf[offset + 1] = cg;
            buf[offset + 2] = cb;
            buf[offset + 3] = 255;
        }
    }
    buf
}

/// Slider value under a pointer at `x`, for a track `width` wide.
fn value_at(x: f64, width: f64) -> Option<f64> {
    let r = constants::THUMB_RADIUS;
    let usable = width - 2.0 * r;
    (usable > 0.0).then(|| ((x - r) / usable).clamp(0.0, 1.0))
}

pub struct BrightnessSliderView {
    id: ViewId,
    held: bool,
    picker: SharedPicker,
    /// Track color and value of the connected slider, if any.
    model: Option<(SolidColor, f64)>,
    size: floem::taffy::prelude::Size<f32>,
    grad_img: Option<peniko::Image>,
    grad_hash: Vec<u8>,
    cached_color: (u8, u8, u8),
    cached_dims: (u32, u32),
}

fn read_model(picker: &SharedPicker) -> Option<(SolidColor, f64)> {
    picker.with(|picker| {
        picker
            .brightness_slider()
            .map(|slider| (slider.track_color().with_brightness(1.0), slider.current_value()))
    })
}

/// Creates a horizontal brightness slider bound to `picker`'s connected slider.
pub fn brightness_slider(picker: SharedPicker) -> BrightnessSliderView {
    let id = ViewId::new();

    let watched = picker.clone();
    create_effect(move |_| {
        watched.revision();
        id.update_state(Refresh);
    });

    BrightnessSliderView {
        id,
        held: false,
        model: read_model(&picker),
        picker,
        size: Default::default(),
        grad_img: None,
        grad_hash: Vec::new(),
        cached_color: (0, 0, 0),
        cached_dims: (0, 0),
    }
    .style(|s| {
        s.height(constants::SLIDER_HEIGHT)
            .border_radius(constants::THUMB_RADIUS as f32)
            .cursor(floem::style::CursorStyle::Pointer)
    })
}

impl BrightnessSliderView {
    fn apply_pointer(&mut self, x: f64) {
        if let Some(value) = value_at(x, self.size.width as f64) {
            self.picker.update(|picker| picker.set_brightness_value(value));
        }
    }

    fn ensure_gradient_image(&mut self, scale: f64, color: SolidColor) {
        let s = scale.max(1.0);
        let pw = (self.size.width as f64 * s).round() as u32;
        let ph = (self.size.height as f64 * s).round() as u32;
        if pw == 0 || ph == 0 {
            return;
        }

        let color_key = color.to_rgb();
        let dims = (pw, ph);
        if self.cached_dims == dims && self.cached_color == color_key {
            return;
        }

        let pixels = rasterize_brightness_gradient(pw, ph, color);
        let blob = Blob::new(Arc::new(pixels));
        let img = peniko::Image::new(blob.clone(), peniko::Format::Rgba8, pw, ph);

        let id = blob.id();
        self.grad_hash = id.to_le_bytes().to_vec();
        self.grad_img = Some(img);
        self.cached_color = color_key;
        self.cached_dims = dims;
    }
}

impl View for BrightnessSliderView {
    fn id(&self) -> ViewId {
        self.id
    }

    fn update(&mut self, _cx: &mut UpdateCx, state: Box<dyn std::any::Any>) {
        if state.downcast::<Refresh>().is_ok() {
            self.model = read_model(&self.picker);
            self.id.request_layout();
        }
    }

    fn event_before_children(
        &mut self,
        cx: &mut EventCx,
        event: &Event,
    ) -> EventPropagation {
        match event {
            Event::PointerDown(e) => {
                if self.model.is_none() {
                    return EventPropagation::Continue;
                }
                cx.update_active(self.id());
                self.held = true;
                self.apply_pointer(e.pos.x);
                EventPropagation::Stop
            }
            Event::PointerMove(e) => {
                if self.held {
                    self.apply_pointer(e.pos.x);
                    EventPropagation::Stop
                } else {
                    EventPropagation::Continue
                }
            }
            Event::PointerUp(_) | Event::FocusLost => {
                self.held = false;
                EventPropagation::Continue
            }
            _ => EventPropagation::Continue,
        }
    }

    fn compute_layout(&mut self, _cx: &mut ComputeLayoutCx) -> Option<Rect> {
        let layout = self.id.get_layout().unwrap_or_default();
        self.size = layout.size;
        None
    }

    fn paint(&mut self, cx: &mut PaintCx) {
        let w = self.size.width as f64;
        let h = self.size.height as f64;
        if w == 0.0 || h == 0.0 {
            return;
        }
        let rect = Rect::new(0.0, 0.0, w, h);
        let rrect = rect.to_rounded_rect(constants::THUMB_RADIUS);

        let Some((track, value)) = self.model else {
            cx.fill(&rrect, Color::rgba8(0, 0, 0, 25), 0.0);
            return;
        };

        cx.save();
        cx.clip(&rrect);
        let scale = cx.scale();
        self.ensure_gradient_image(scale, track);
        if let Some(ref img) = self.grad_img {
            cx.draw_img(
                floem_renderer::Img {
                    img: img.clone(),
                    hash: &self.grad_hash,
                },
                rect,
            );
        }
        cx.restore();

        cx.stroke(&rrect, Color::rgba8(0, 0, 0, 40), &Stroke::new(1.0));

        // Thumb (left = 0.0, right = 1.0)
        let radius = constants::THUMB_RADIUS;
        let thumb_x = radius + value * (w - 2.0 * radius);
        let thumb_cy = h / 2.0;
        let circle = Circle::new((thumb_x, thumb_cy), radius);
        cx.stroke(&circle, Color::rgba8(0, 0, 0, 80), &Stroke::new(1.0));
        let inner = Circle::new((thumb_x, thumb_cy), radius - 1.5);
        cx.stroke(&inner, Color::WHITE, &Stroke::new(2.0));
        let innermost = Circle::new((thumb_x, thumb_cy), radius - 3.0);
        cx.stroke(&innermost, Color::rgba8(0, 0, 0, 80), &Stroke::new(1.0));
    }
}
