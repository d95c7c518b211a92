//! The picker controller: handle set, touch tracking, slider coordination.
//!
//! Touch handling is a two-state machine. A touch that begins on a handle's
//! hitbox starts tracking that handle; a touch that begins elsewhere on the
//! wheel first recolors the first handle to the tapped color (creating one
//! if there are none) and then picks it up. While tracking, every move is
//! clamped onto the interactive region, sampled, and applied to the handle
//! with its brightness preserved.
//!
//! All points passed to the tracking methods are in the control's own
//! coordinates; the picker maps them into the wheel's.

use floem::kurbo::{Point, Rect, Size, Vec2};

use crate::brightness::BrightnessSlider;
use crate::color::SolidColor;
use crate::config::{HandleSize, PickerConfig};
use crate::error::ConfigError;
use crate::geometry::{WheelGeometry, WheelMode};
use crate::handle::{Handle, HandleId};
use crate::kelvin;
use crate::sampling::{self, RasterSurface, WheelImage, WheelSurface};

/// Receives color changes made through the wheel or the brightness slider.
pub trait ChromaPickerDelegate {
    fn handle_did_change(&mut self, picker: &ChromaPicker, handle: HandleId, color: SolidColor);
}

impl<F> ChromaPickerDelegate for F
where
    F: FnMut(&ChromaPicker, HandleId, SolidColor),
{
    fn handle_did_change(&mut self, picker: &ChromaPicker, handle: HandleId, color: SolidColor) {
        (*self)(picker, handle, color)
    }
}

/// Low-level control notifications, independent of the delegate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlEvent {
    /// A drag changed the active handle's color.
    ValueChanged,
    /// A touch sequence ended normally.
    TouchUpInside,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TrackingState {
    #[default]
    Idle,
    Tracking(HandleId),
}

type Action = Box<dyn FnMut(ControlEvent)>;

pub struct ChromaPicker {
    config: PickerConfig,
    bounds: Rect,
    wheel_frame: Rect,
    geometry: WheelGeometry,
    surface: Box<dyn WheelSurface>,
    /// Insertion order.
    handles: Vec<Handle>,
    /// Back to front.
    paint_order: Vec<HandleId>,
    current_handle: Option<HandleId>,
    state: TrackingState,
    next_handle_id: u64,
    slider: Option<BrightnessSlider>,
    delegate: Option<Box<dyn ChromaPickerDelegate>>,
    targets: Vec<(ControlEvent, Action)>,
}

impl Default for ChromaPicker {
    fn default() -> Self {
        Self::new()
    }
}

impl ChromaPicker {
    pub fn new() -> Self {
        Self::build(PickerConfig::default(), Box::<RasterSurface>::default())
    }

    pub fn with_config(config: PickerConfig) -> Result<Self, ConfigError> {
        Self::with_surface(config, Box::<RasterSurface>::default())
    }

    /// Use a custom rendering backend for the wheel.
    pub fn with_surface(
        config: PickerConfig,
        surface: Box<dyn WheelSurface>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(config, surface))
    }

    fn build(config: PickerConfig, surface: Box<dyn WheelSurface>) -> Self {
        let geometry = WheelGeometry::new(config.mode, Size::ZERO)
            .with_ring_thickness(config.temperature_ring_thickness);
        Self {
            config,
            bounds: Rect::ZERO,
            wheel_frame: Rect::ZERO,
            geometry,
            surface,
            handles: Vec::new(),
            paint_order: Vec::new(),
            current_handle: None,
            state: TrackingState::Idle,
            next_handle_id: 0,
            slider: None,
            delegate: None,
            targets: Vec::new(),
        }
    }

    // ── Configuration ───────────────────────────────────────────────────

    pub fn config(&self) -> &PickerConfig {
        &self.config
    }

    pub fn mode(&self) -> WheelMode {
        self.config.mode
    }

    pub fn set_config(&mut self, config: PickerConfig) -> Result<(), ConfigError> {
        if let Err(e) = config.validate() {
            log::warn!("rejected picker configuration: {e}");
            return Err(e);
        }
        if config.mode != self.config.mode {
            log::debug!("wheel mode {:?} -> {:?}", self.config.mode, config.mode);
            self.surface.invalidate();
        }
        self.config = config;
        self.update_frames();
        Ok(())
    }

    pub fn set_mode(&mut self, mode: WheelMode) {
        if mode == self.config.mode {
            return;
        }
        log::debug!("wheel mode {:?} -> {:?}", self.config.mode, mode);
        self.config.mode = mode;
        self.surface.invalidate();
        self.update_frames();
    }

    pub fn set_border_width(&mut self, border_width: f64) -> Result<(), ConfigError> {
        self.set_config(PickerConfig {
            border_width,
            ..self.config.clone()
        })
    }

    /// Only affects painting, but re-runs layout like every other option.
    pub fn set_border_color(&mut self, border_color: SolidColor) {
        self.config.border_color = border_color;
        self.layout();
    }

    /// Only affects painting; see [`ChromaPicker::set_border_color`].
    pub fn set_shows_shadow(&mut self, shows_shadow: bool) {
        self.config.shows_shadow = shows_shadow;
        self.layout();
    }

    pub fn set_handle_size(&mut self, handle_size: HandleSize) -> Result<(), ConfigError> {
        self.set_config(PickerConfig {
            handle_size,
            ..self.config.clone()
        })
    }

    pub fn set_handle_hitbox_extension_y(&mut self, extension: f64) -> Result<(), ConfigError> {
        self.set_config(PickerConfig {
            handle_hitbox_extension_y: extension,
            ..self.config.clone()
        })
    }

    pub fn set_temperature_ring_thickness(&mut self, thickness: f64) -> Result<(), ConfigError> {
        self.set_config(PickerConfig {
            temperature_ring_thickness: thickness,
            ..self.config.clone()
        })
    }

    // ── Layout ──────────────────────────────────────────────────────────

    /// Set the control's bounds, in its own coordinates.
    pub fn set_bounds(&mut self, bounds: Rect) {
        self.bounds = bounds;
        self.update_frames();
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// The wheel's square, inside the border, in control coordinates.
    pub fn wheel_frame(&self) -> Rect {
        self.wheel_frame
    }

    pub fn geometry(&self) -> &WheelGeometry {
        &self.geometry
    }

    pub fn control_to_wheel(&self, point: Point) -> Point {
        point - self.wheel_frame.origin().to_vec2()
    }

    pub fn wheel_to_control(&self, point: Point) -> Point {
        point + self.wheel_frame.origin().to_vec2()
    }

    fn update_frames(&mut self) {
        let border = self.config.border_width;
        let side = (self.bounds.width().min(self.bounds.height()) - 2.0 * border).max(0.0);
        self.wheel_frame = Rect::from_center_size(self.bounds.center(), Size::new(side, side));

        self.geometry.set_size(self.wheel_frame.size());
        self.geometry.set_mode(self.config.mode);
        self.geometry
            .set_ring_thickness(self.config.temperature_ring_thickness);
        self.layout();
    }

    /// Re-derive every handle's size and position from its color.
    pub fn layout(&mut self) {
        let size: Size = self.config.handle_size.into();
        for handle in &mut self.handles {
            handle.set_size(size);
            handle.set_location(self.geometry.location_for_color(handle.color()));
        }
    }

    /// Device pixels per unit for the wheel image.
    pub fn set_surface_scale(&mut self, scale: f64) {
        self.surface.set_scale(scale);
    }

    /// The wheel image for painting, rendered if stale.
    pub fn wheel_image(&mut self) -> Option<WheelImage> {
        let size = self.geometry.size();
        if size.width <= 0.0 || size.height <= 0.0 {
            return None;
        }
        if !self.surface.is_current(&self.geometry) {
            self.surface.render(&self.geometry);
        }
        self.surface.image()
    }

    /// Color displayed at a wheel-local point.
    pub fn pixel_color(&mut self, point: Point) -> Option<SolidColor> {
        sampling::pixel_color(&self.geometry, self.surface.as_mut(), point)
    }

    // ── Handles ─────────────────────────────────────────────────────────

    pub fn handles(&self) -> &[Handle] {
        &self.handles
    }

    pub fn handle(&self, id: HandleId) -> Option<&Handle> {
        self.handles.iter().find(|h| h.id() == id)
    }

    fn handle_mut(&mut self, id: HandleId) -> Option<&mut Handle> {
        self.handles.iter_mut().find(|h| h.id() == id)
    }

    /// Handles from back to front.
    pub fn paint_order(&self) -> impl Iterator<Item = &Handle> + '_ {
        self.paint_order
            .iter()
            .filter_map(move |&id| self.handle(id))
    }

    /// Handle ids from back to front.
    pub fn paint_order_ids(&self) -> &[HandleId] {
        &self.paint_order
    }

    /// The last handle touched, if it still exists.
    pub fn current_handle(&self) -> Option<&Handle> {
        self.current_handle.and_then(|id| self.handle(id))
    }

    pub fn current_handle_id(&self) -> Option<HandleId> {
        self.current_handle
    }

    /// Add a handle with `color`, or white.
    ///
    /// The first handle added becomes the current one.
    pub fn add_handle(&mut self, color: Option<SolidColor>) -> HandleId {
        let id = HandleId::new(self.next_handle_id);
        self.next_handle_id += 1;

        let color = color.unwrap_or(SolidColor::WHITE);
        let mut handle = Handle::new(id, color, self.config.handle_size.into());
        handle.set_location(self.geometry.location_for_color(color));

        self.handles.push(handle);
        self.paint_order.push(id);
        if let Some(slider) = self.slider.as_mut() {
            slider.set_track_color(color);
        }
        if self.current_handle.is_none() {
            self.current_handle = Some(id);
        }

        log::debug!("added {id} at {color}");
        id
    }

    /// Remove a handle. Unknown ids are ignored.
    pub fn remove_handle(&mut self, id: HandleId) -> Option<Handle> {
        let Some(index) = self.handles.iter().position(|h| h.id() == id) else {
            log::trace!("ignoring removal of unknown {id}");
            return None;
        };
        let handle = self.handles.remove(index);
        self.paint_order.retain(|&other| other != id);

        if self.current_handle == Some(id) {
            if let Some(slider) = self.slider.as_mut() {
                slider.set_track_color(SolidColor::WHITE);
            }
            self.current_handle = None;
        }
        if self.state == TrackingState::Tracking(id) {
            self.state = TrackingState::Idle;
        }

        log::debug!("removed {id}");
        Some(handle)
    }

    fn bring_to_front(&mut self, id: HandleId) {
        self.paint_order.retain(|&other| other != id);
        self.paint_order.push(id);
    }

    // ── Brightness slider ───────────────────────────────────────────────

    /// Attach a slider, returning the one it replaces.
    pub fn connect(&mut self, slider: BrightnessSlider) -> Option<BrightnessSlider> {
        log::debug!("brightness slider connected");
        self.slider.replace(slider)
    }

    pub fn disconnect(&mut self) -> Option<BrightnessSlider> {
        self.slider.take()
    }

    pub fn brightness_slider(&self) -> Option<&BrightnessSlider> {
        self.slider.as_ref()
    }

    /// Move the connected slider, recoloring the current handle to match.
    ///
    /// Returns false if there is no slider or no current handle.
    pub fn set_brightness_value(&mut self, value: f64) -> bool {
        let Some(slider) = self.slider.as_mut() else {
            return false;
        };
        slider.set_current_value(value);
        let color = slider.current_color();

        let Some(id) = self.current_handle else {
            return false;
        };
        let Some(handle) = self.handle_mut(id) else {
            return false;
        };
        handle.set_color(color);
        self.inform_delegate(id);
        true
    }

    // ── Observers ───────────────────────────────────────────────────────

    pub fn set_delegate(&mut self, delegate: impl ChromaPickerDelegate + 'static) {
        self.delegate = Some(Box::new(delegate));
    }

    pub fn clear_delegate(&mut self) {
        self.delegate = None;
    }

    /// Run `action` whenever `event` is emitted.
    pub fn add_target(&mut self, event: ControlEvent, action: impl FnMut(ControlEvent) + 'static) {
        self.targets.push((event, Box::new(action)));
    }

    fn send_actions(&mut self, event: ControlEvent) {
        for (kind, action) in self.targets.iter_mut() {
            if *kind == event {
                action(event);
            }
        }
    }

    /// In temperature mode, snap the handle onto the temperature grid first.
    fn inform_delegate(&mut self, id: HandleId) {
        let quantize = self.geometry.mode() == WheelMode::Temperature;
        let Some(handle) = self.handle_mut(id) else {
            return;
        };
        if quantize {
            handle.set_color(kelvin::quantize(handle.color()));
        }
        let color = handle.color();

        if let Some(mut delegate) = self.delegate.take() {
            delegate.handle_did_change(self, id, color);
            self.delegate = Some(delegate);
        }
    }

    // ── Touch tracking ──────────────────────────────────────────────────

    pub fn tracking_state(&self) -> TrackingState {
        self.state
    }

    pub fn is_tracking(&self) -> bool {
        matches!(self.state, TrackingState::Tracking(_))
    }

    /// Start a touch. Returns whether the picker claimed it.
    pub fn begin_tracking(&mut self, point: Point) -> bool {
        let location = self.control_to_wheel(point);

        if self.handles.is_empty() && self.geometry.point_is_interactive(location) {
            if let Some(color) = self.pixel_color(location) {
                let id = self.add_handle(Some(color));
                self.inform_delegate(id);
            }
        }

        self.pick_up(location)
    }

    /// Hit-test handles in insertion order; failing that, recolor the first
    /// handle to the tapped color and pick it up.
    ///
    /// The recolor fallback only makes sense with a single handle.
    fn pick_up(&mut self, location: Point) -> bool {
        let extension = self.config.handle_hitbox_extension_y;
        let hit = self
            .handles
            .iter()
            .find(|h| h.hit_frame(extension).contains(location))
            .map(Handle::id);
        if let Some(id) = hit {
            self.activate(id);
            return true;
        }

        if !self.geometry.point_is_interactive(location) {
            return false;
        }
        let Some(first) = self.handles.first().map(Handle::id) else {
            return false;
        };
        let Some(sampled) = self.pixel_color(location) else {
            return false;
        };
        if let Some(handle) = self.handle_mut(first) {
            let brightness = handle.color().brightness();
            handle.set_color(sampled.with_brightness(brightness));
            handle.set_location(location);
        }
        self.inform_delegate(first);
        // the tip now sits on `location`, which a zero hitbox extension
        // leaves on the excluded bottom edge, so no second hit test
        self.activate(first);
        true
    }

    fn activate(&mut self, id: HandleId) {
        self.bring_to_front(id);
        let Some(handle) = self.handle_mut(id) else {
            return;
        };
        handle.grow();
        let color = handle.color();

        if let Some(slider) = self.slider.as_mut() {
            slider.set_track_color(color.with_brightness(1.0));
            let value = slider.value_for_brightness(color.brightness());
            slider.set_current_value(value);
        }

        self.current_handle = Some(id);
        self.state = TrackingState::Tracking(id);
        log::debug!("tracking {id}");
    }

    /// Drag the active handle. Returns false when nothing is being tracked.
    pub fn continue_tracking(&mut self, point: Point) -> bool {
        let TrackingState::Tracking(id) = self.state else {
            return false;
        };
        let location = self
            .geometry
            .clamp_to_interactive(self.control_to_wheel(point));

        let Some(sampled) = self.pixel_color(location) else {
            return true;
        };
        let Some(handle) = self.handle_mut(id) else {
            return false;
        };
        let brightness = handle.color().brightness();
        handle.set_color(sampled.with_brightness(brightness));
        handle.set_location(location);
        log::trace!("{id} dragged to {location:?}, sampled {sampled}");

        if let Some(slider) = self.slider.as_mut() {
            slider.set_track_color(sampled);
            let value = slider.value_for_brightness(brightness);
            slider.set_current_value(value);
        }

        self.inform_delegate(id);
        self.send_actions(ControlEvent::ValueChanged);
        true
    }

    /// Finish a touch. The current handle stays current.
    pub fn end_tracking(&mut self) {
        self.settle();
        self.send_actions(ControlEvent::TouchUpInside);
    }

    /// Abandon a touch without signalling completion.
    pub fn cancel_tracking(&mut self) {
        self.settle();
    }

    fn settle(&mut self) {
        if let Some(id) = self.current_handle {
            if let Some(handle) = self.handle_mut(id) {
                handle.shrink();
            }
        }
        self.state = TrackingState::Idle;
    }

    /// Offset that moves wheel-local painting into control coordinates.
    pub fn wheel_offset(&self) -> Vec2 {
        self.wheel_frame.origin().to_vec2()
    }
}
