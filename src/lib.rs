//! # floem-chroma
//!
//! A multi-handle color wheel for [Floem](https://github.com/lapce/floem).
//!
//! The wheel maps hue to angle and saturation to distance from the center.
//! Any number of handles sit on it, each carrying a color; dragging one
//! recolors it while keeping its brightness, which is edited separately with
//! a connected brightness slider. A temperature mode swaps the disc for a
//! black-body ring and snaps reported colors onto a Kelvin grid.
//!
//! [`ChromaPicker`] holds all of the state and works without a window, so
//! it can be driven and tested directly. The views in this crate are thin
//! adapters over a [`SharedPicker`].
//!
//! ## Usage
//!
//! ```rust,no_run
//! use floem_chroma::{chroma_picker, ChromaPicker, HandleId, SharedPicker, SolidColor};
//!
//! let mut picker = ChromaPicker::new();
//! picker.add_handle(Some(SolidColor::from_hsb(0.6, 0.8, 1.0)));
//! picker.set_delegate(|_: &ChromaPicker, id: HandleId, color: SolidColor| {
//!     println!("{id} is now {color}");
//! });
//! let shared = SharedPicker::new(picker);
//! // Use `chroma_picker(shared)` in your Floem view tree.
//! ```

mod brightness;
mod brightness_slider;
mod color;
mod color_wheel;
mod config;
pub mod constants;
mod error;
mod geometry;
mod handle;
pub mod kelvin;
mod math;
mod picker;
mod sampling;
mod shared;

pub use brightness::BrightnessSlider;
pub use brightness_slider::{brightness_slider, BrightnessSliderView};
pub use color::SolidColor;
pub use color_wheel::{chroma_wheel, ChromaWheel};
pub use config::{HandleSize, PickerConfig};
pub use error::{ConfigError, ParseColorError};
pub use geometry::{WheelGeometry, WheelMode};
pub use handle::{Handle, HandleId, HandleScale};
pub use picker::{ChromaPicker, ChromaPickerDelegate, ControlEvent, TrackingState};
pub use sampling::{pixel_color, RasterSurface, WheelImage, WheelSurface};
pub use shared::SharedPicker;

use floem::prelude::*;

/// Creates the wheel with a brightness slider underneath.
///
/// Connects a fresh [`BrightnessSlider`] if the picker has none.
pub fn chroma_picker(picker: SharedPicker) -> impl IntoView {
    if picker.with(|p| p.brightness_slider().is_none()) {
        picker.update(|p| p.connect(BrightnessSlider::new()));
    }

    v_stack((chroma_wheel(picker.clone()), brightness_slider(picker))).style(|s| {
        s.width_full()
            .gap(constants::GAP)
            .padding(constants::PADDING)
    })
}
