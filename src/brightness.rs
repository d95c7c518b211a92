//! Brightness slider model.
//!
//! The slider shows the active handle's hue and saturation as its track and
//! the handle's brightness as its position. It never owns handle state: the
//! picker writes the track color, and value changes are routed back through
//! [`ChromaPicker::set_brightness_value`](crate::ChromaPicker::set_brightness_value).
//!
//! Values run the same way as the track is drawn: 0.0 is full brightness
//! (left) and 1.0 is black (right).

use crate::color::SolidColor;

#[derive(Debug, Clone, PartialEq)]
pub struct BrightnessSlider {
    track_color: SolidColor,
    current_value: f64,
}

impl Default for BrightnessSlider {
    fn default() -> Self {
        Self {
            track_color: SolidColor::WHITE,
            current_value: 0.0,
        }
    }
}

impl BrightnessSlider {
    pub fn new() -> Self {
        Self::default()
    }

    /// The full-brightness end of the track.
    pub fn track_color(&self) -> SolidColor {
        self.track_color
    }

    pub(crate) fn set_track_color(&mut self, color: SolidColor) {
        self.track_color = color;
    }

    pub fn current_value(&self) -> f64 {
        self.current_value
    }

    pub(crate) fn set_current_value(&mut self, value: f64) {
        self.current_value = value.clamp(0.0, 1.0);
    }

    /// Slider position showing `brightness`.
    pub fn value_for_brightness(&self, brightness: f64) -> f64 {
        1.0 - brightness.clamp(0.0, 1.0)
    }

    /// Brightness shown at the current position.
    pub fn brightness(&self) -> f64 {
        1.0 - self.current_value
    }

    /// The track color at the current position.
    pub fn current_color(&self) -> SolidColor {
        self.track_color.with_brightness(self.brightness())
    }
}
