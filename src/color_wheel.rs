//! Floem view for the wheel and its handles.
//!
//! The view owns no color state. Pointer events are forwarded to the shared
//! [`ChromaPicker`](crate::ChromaPicker) as tracking calls, and painting reads
//! the picker's wheel image and handles back out.

use floem::kurbo::{BezPath, Circle, Point, Rect, Stroke, Vec2};
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
use crate::handle::Handle;
use crate::shared::SharedPicker;

pub(crate) fn to_peniko(color: SolidColor) -> Color {
    Color::rgba(color.r(), color.g(), color.b(), 1.0)
}

/// The picker changed; repaint.
pub(crate) struct Refresh;

pub struct ChromaWheel {
    id: ViewId,
    held: bool,
    picker: SharedPicker,
    wheel_img: Option<peniko::Image>,
    wheel_hash: Vec<u8>,
    wheel_revision: Option<u64>,
}

/// Creates the wheel view for `picker`.
pub fn chroma_wheel(picker: SharedPicker) -> ChromaWheel {
    let id = ViewId::new();

    let watched = picker.clone();
    create_effect(move |_| {
        watched.revision();
        id.update_state(Refresh);
    });

    ChromaWheel {
        id,
        held: false,
        picker,
        wheel_img: None,
        wheel_hash: Vec::new(),
        wheel_revision: None,
    }
    .style(|s| {
        s.flex_grow(1.0)
            .aspect_ratio(1.0)
            .min_height(100.0)
            .cursor(floem::style::CursorStyle::Default)
    })
}

impl ChromaWheel {
    /// Refresh the cached peniko image from the picker's render.
    fn ensure_wheel_image(&mut self, scale: f64) {
        let image = {
            let mut picker = self.picker.borrow_mut();
            picker.set_surface_scale(scale);
            picker.wheel_image()
        };
        let Some(image) = image else {
            self.wheel_img = None;
            self.wheel_revision = None;
            return;
        };
        if self.wheel_revision == Some(image.revision) {
            return;
        }

        let blob = Blob::new(image.pixels);
        let img = peniko::Image::new(blob, peniko::Format::Rgba8, image.width, image.height);

        self.wheel_hash = image.revision.to_le_bytes().to_vec();
        self.wheel_img = Some(img);
        self.wheel_revision = Some(image.revision);
    }
}

/// A pin: round head, pointed tip at the bottom of `frame`.
fn pin_path(frame: Rect) -> (Circle, BezPath) {
    let radius = frame.width() / 2.0;
    let head = Point::new(frame.center().x, frame.y0 + radius);
    let tip = Point::new(frame.center().x, frame.y1);

    let shoulder = radius * 0.7;
    let mut body = BezPath::new();
    body.move_to(tip);
    body.line_to((head.x - shoulder, head.y + shoulder));
    body.line_to((head.x + shoulder, head.y + shoulder));
    body.close_path();

    (Circle::new(head, radius), body)
}

fn paint_handle(cx: &mut PaintCx, handle: &Handle, offset: Vec2) {
    let frame = handle.paint_frame() + offset;
    let (head, body) = pin_path(frame);
    let outline = if handle.color().is_light() {
        Color::rgba8(0, 0, 0, 90)
    } else {
        Color::rgba8(0, 0, 0, 40)
    };

    cx.fill(&body, Color::WHITE, 0.0);
    cx.fill(&head, Color::WHITE, 0.0);
    cx.stroke(&head, outline, &Stroke::new(1.0));

    let swatch = Circle::new(head.center, (head.radius - 4.0).max(0.0));
    cx.fill(&swatch, to_peniko(handle.color()), 0.0);
    cx.stroke(&swatch, outline, &Stroke::new(1.0));
}

impl View for ChromaWheel {
    fn id(&self) -> ViewId {
        self.id
    }

    fn update(&mut self, _cx: &mut UpdateCx, state: Box<dyn std::any::Any>) {
        if state.downcast::<Refresh>().is_ok() {
            self.id.request_layout();
        }
    }

    fn event_before_children(&mut self, cx: &mut EventCx, event: &Event) -> EventPropagation {
        match event {
            Event::PointerDown(e) => {
                let pos = e.pos;
                if self.picker.update(|picker| picker.begin_tracking(pos)) {
                    cx.update_active(self.id());
                    self.held = true;
                    EventPropagation::Stop
                } else {
                    EventPropagation::Continue
                }
            }
            Event::PointerMove(e) => {
                if self.held {
                    let pos = e.pos;
                    self.picker.update(|picker| picker.continue_tracking(pos));
                    EventPropagation::Stop
                } else {
                    EventPropagation::Continue
                }
            }
            Event::PointerUp(_) => {
                if self.held {
                    self.held = false;
                    self.picker.update(|picker| picker.end_tracking());
                }
                EventPropagation::Continue
            }
            Event::FocusLost => {
                if self.held {
                    self.held = false;
                    self.picker.update(|picker| picker.cancel_tracking());
                }
                EventPropagation::Continue
            }
            _ => EventPropagation::Continue,
        }
    }

    fn compute_layout(&mut self, _cx: &mut ComputeLayoutCx) -> Option<Rect> {
        let layout = self.id.get_layout().unwrap_or_default();
        let bounds = Rect::new(
            0.0,
            0.0,
            layout.size.width as f64,
            layout.size.height as f64,
        );
        let mut picker = self.picker.borrow_mut();
        if picker.bounds() != bounds {
            picker.set_bounds(bounds);
        }
        None
    }

    fn paint(&mut self, cx: &mut PaintCx) {
        let scale = cx.scale();
        self.ensure_wheel_image(scale);

        let (frame, config, offset, handles) = self.picker.with(|picker| {
            let handles: Vec<Handle> = picker.paint_order().cloned().collect();
            (picker.wheel_frame(), picker.config().clone(), picker.wheel_offset(), handles)
        });
        if frame.width() <= 0.0 {
            return;
        }

        let center = frame.center();
        let radius = frame.width() / 2.0;
        let outer = radius + config.border_width;

        if config.shows_shadow {
            let shadow = Circle::new(center + Vec2::new(0.0, 2.0), outer + 1.0);
            cx.fill(&shadow, Color::rgba8(0, 0, 0, 40), 4.0);
        }
        if config.border_width > 0.0 {
            cx.fill(&Circle::new(center, outer), to_peniko(config.border_color), 0.0);
        }

        cx.save();
        cx.clip(&Circle::new(center, radius));
        if let Some(ref img) = self.wheel_img {
            cx.draw_img(
                floem_renderer::Img {
                    img: img.clone(),
                    hash: &self.wheel_hash,
                },
                frame,
            );
        }
        cx.restore();

        for handle in &handles {
            paint_handle(cx, handle, offset);
        }
    }
}
