//! Black-body color temperature ↔ RGB.
//!
//! The forward direction is Tanner Helland's piecewise fit of the Planckian
//! locus, evaluated on `kelvin / 100`. Every channel is clamped to 0–255 and
//! then normalized. The fit has a visible jump between roughly 1600 K and
//! 2000 K; callers compare against exact values, so it is kept as is.
//!
//! The reverse direction has no closed form and is a nearest-match scan over
//! the same grid the picker quantizes to.
//!
//! Reference: https://tannerhelland.com/2012/09/18/convert-temperature-rgb-algorithm-code.html

use crate::color::SolidColor;

/// Lowest temperature considered by [`temperature_for_color`].
pub const MIN_KELVIN: f64 = 1000.0;
/// Highest temperature considered by [`temperature_for_color`].
pub const MAX_KELVIN: f64 = 40000.0;
/// Scan step of [`temperature_for_color`].
pub const KELVIN_STEP: f64 = 100.0;

/// The color of a black body at `kelvin` degrees.
#[allow(clippy::excessive_precision)]
pub fn color_for_temperature(kelvin: f64) -> SolidColor {
    let t = kelvin / 100.0;

    let red = if t <= 66.0 {
        255.0
    } else {
        329.698727446 * (t - 60.0).powf(-0.1332047592)
    };

    let green = if t <= 66.0 {
        99.4708025861 * t.ln() - 161.1195681661
    } else {
        288.1221695283 * (t - 60.0).powf(-0.0755148492)
    };

    let blue = if t >= 66.0 {
        255.0
    } else if t <= 19.0 {
        0.0
    } else {
        138.5177312231 * (t - 10.0).ln() - 305.0447927307
    };

    SolidColor::from_rgb_f64(
        clamp_channel(red) / 255.0,
        clamp_channel(green) / 255.0,
        clamp_channel(blue) / 255.0,
    )
}

fn clamp_channel(value: f64) -> f64 {
    // NaN (from ln of a non-positive input) collapses to 0
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 255.0)
    }
}

/// The scanned temperature whose color is closest to `color`.
///
/// Scans [`MIN_KELVIN`]..=[`MAX_KELVIN`] ascending in [`KELVIN_STEP`]
/// increments by straight Euclidean RGB distance. Only a strictly smaller
/// distance replaces the best match, so ties go to the lowest temperature.
pub fn temperature_for_color(color: SolidColor) -> f64 {
    let steps = ((MAX_KELVIN - MIN_KELVIN) / KELVIN_STEP).round() as u32;

    let mut closest_kelvin = MIN_KELVIN;
    let mut min_difference = color_difference(color, color_for_temperature(MIN_KELVIN));

    for i in 1..=steps {
        let kelvin = MIN_KELVIN + i as f64 * KELVIN_STEP;
        let difference = color_difference(color, color_for_temperature(kelvin));
        if difference < min_difference {
            min_difference = difference;
            closest_kelvin = kelvin;
        }
    }

    closest_kelvin
}

/// Snap `color` onto the scanned temperature grid.
pub fn quantize(color: SolidColor) -> SolidColor {
    color_for_temperature(temperature_for_color(color))
}

fn color_difference(a: SolidColor, b: SolidColor) -> f64 {
    let dr = a.r() - b.r();
    let dg = a.g() - b.g();
    let db = a.b() - b.b();
    (dr * dr + dg * dg + db * db).sqrt()
}
