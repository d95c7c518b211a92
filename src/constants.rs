//! Sizing, geometry, and styling defaults for the picker.

/// Default handle width.
pub const HANDLE_WIDTH: f64 = 42.0;

/// Default handle height. The handle's tip sits on its color location.
pub const HANDLE_HEIGHT: f64 = 52.0;

/// Extra hitbox height below a handle, so it can be grabbed by its tip.
pub const HANDLE_HITBOX_EXTENSION_Y: f64 = 10.0;

/// Scale applied to a handle while it is being dragged.
pub const HANDLE_GROW_SCALE: f64 = 1.25;

/// Width of the border drawn around the wheel.
pub const BORDER_WIDTH: f64 = 6.0;

/// Thickness of the interactive ring in temperature mode.
pub const TEMPERATURE_RING_THICKNESS: f64 = 50.0;

/// Slack around the wheel's bounding box for edge jitter.
pub const BOUNDS_TOLERANCE: f64 = 1.0;

/// Band inside the rim where the computed edge color replaces sampling.
pub const EDGE_TOLERANCE: f64 = 1.0;

/// Inset used when projecting an out-of-range drag back onto the wheel.
pub const CLAMP_INSET: f64 = 2.0;

/// Temperature gradient stops, top to bottom, in Kelvin.
pub const TEMPERATURE_STOPS: [f64; 3] = [2001.0, 5500.0, 9000.0];

/// Feather width in raster pixels for anti-aliasing mask edges.
pub const FEATHER: f64 = 1.5;

/// 1D slider track height
pub const SLIDER_HEIGHT: f32 = 16.0;

/// Thumb radius on the brightness slider
pub const THUMB_RADIUS: f64 = 7.0;

/// Gap between picker elements
pub const GAP: f32 = 12.0;

/// Padding around the whole picker
pub const PADDING: f32 = 8.0;
