//! Picker configuration.
//!
//! Every field has a default from [`crate::constants`], so a partial
//! document deserializes into a complete configuration:
//!
//! ```rust
//! use floem_chroma::{PickerConfig, WheelMode};
//!
//! let config: PickerConfig = serde_json::from_str(r#"{ "mode": "temperature" }"#).unwrap();
//! assert_eq!(config.mode, WheelMode::Temperature);
//! assert_eq!(config.border_width, 6.0);
//! ```

use floem::kurbo::Size;
use serde::{Deserialize, Serialize};

use crate::color::SolidColor;
use crate::constants;
use crate::error::ConfigError;
use crate::geometry::WheelMode;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HandleSize {
    pub width: f64,
    pub height: f64,
}

impl Default for HandleSize {
    fn default() -> Self {
        Self {
            width: constants::HANDLE_WIDTH,
            height: constants::HANDLE_HEIGHT,
        }
    }
}

impl From<HandleSize> for Size {
    fn from(size: HandleSize) -> Self {
        Size::new(size.width, size.height)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PickerConfig {
    /// Ring drawn around the wheel; the wheel shrinks to make room for it.
    pub border_width: f64,
    pub border_color: SolidColor,
    pub shows_shadow: bool,
    pub handle_size: HandleSize,
    /// Hitbox growth below each handle.
    pub handle_hitbox_extension_y: f64,
    pub mode: WheelMode,
    pub temperature_ring_thickness: f64,
}

impl Default for PickerConfig {
    fn default() -> Self {
        Self {
            border_width: constants::BORDER_WIDTH,
            border_color: SolidColor::WHITE,
            shows_shadow: true,
            handle_size: HandleSize::default(),
            handle_hitbox_extension_y: constants::HANDLE_HITBOX_EXTENSION_Y,
            mode: WheelMode::Rgb,
            temperature_ring_thickness: constants::TEMPERATURE_RING_THICKNESS,
        }
    }
}

impl PickerConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.border_width.is_finite() || self.border_width < 0.0 {
            return Err(ConfigError::BorderWidth(self.border_width));
        }
        let HandleSize { width, height } = self.handle_size;
        if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
            return Err(ConfigError::HandleSize { width, height });
        }
        let extension = self.handle_hitbox_extension_y;
        if !extension.is_finite() || extension < 0.0 {
            return Err(ConfigError::HitboxExtension(extension));
        }
        let ring = self.temperature_ring_thickness;
        if !ring.is_finite() || ring <= 0.0 {
            return Err(ConfigError::RingThickness(ring));
        }
        Ok(())
    }
}
