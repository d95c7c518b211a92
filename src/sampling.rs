//! Wheel rendering and pixel read-back.
//!
//! The hue/saturation disc is produced as an image, and the color reported
//! for a point is whatever that image shows there, so what the user sees and
//! what the picker reports cannot drift apart. The one exception is the rim,
//! where the mask is anti-aliased: there the color is computed from the
//! angle instead.

use std::f64::consts::TAU;
use std::sync::Arc;

use floem::kurbo::{Point, Size};

use crate::color::SolidColor;
use crate::constants;
use crate::geometry::{WheelGeometry, WheelMode};
use crate::kelvin;
use crate::math;

/// A rendered RGBA8 wheel image, shared with the painter.
#[derive(Debug, Clone)]
pub struct WheelImage {
    pub width: u32,
    pub height: u32,
    /// Straight (non-premultiplied) RGBA8, row-major.
    pub pixels: Arc<Vec<u8>>,
    /// Bumped on every render; usable as a cache key.
    pub revision: u64,
}

/// Something that can render the wheel and read single pixels back.
///
/// Rendering is synchronous and runs on the interaction thread.
pub trait WheelSurface {
    /// Render the wheel described by `geometry`.
    fn render(&mut self, geometry: &WheelGeometry);

    /// Whether the last render still matches `geometry`.
    fn is_current(&self, geometry: &WheelGeometry) -> bool;

    /// Drop the cached render.
    fn invalidate(&mut self);

    /// The RGBA8 value at a wheel-local point, if anything has been rendered.
    fn read_pixel(&self, point: Point) -> Option<[u8; 4]>;

    /// The current render, for painting.
    fn image(&self) -> Option<WheelImage>;

    /// Device pixels per wheel unit.
    fn set_scale(&mut self, _scale: f64) {}
}

/// Color shown at `point`, or `None` off the interactive region.
///
/// Renders the surface first if it is stale. Alpha is discarded.
pub fn pixel_color(
    geometry: &WheelGeometry,
    surface: &mut dyn WheelSurface,
    point: Point,
) -> Option<SolidColor> {
    if !geometry.point_is_interactive(point) {
        return None;
    }

    if geometry.mode() == WheelMode::Rgb && geometry.point_on_wheel_edge(point) {
        return Some(geometry.edge_color(geometry.edge_angle(point)));
    }

    if !surface.is_current(geometry) {
        surface.render(geometry);
    }
    let [r, g, b, _] = surface.read_pixel(point)?;
    Some(SolidColor::from_rgb(r, g, b))
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct RenderKey {
    mode: WheelMode,
    size: Size,
    ring_thickness: f64,
    scale: f64,
}

/// Software rasterizer backing the wheel.
pub struct RasterSurface {
    scale: f64,
    width: u32,
    height: u32,
    pixels: Arc<Vec<u8>>,
    rendered: Option<RenderKey>,
    revision: u64,
}

impl Default for RasterSurface {
    fn default() -> Self {
        Self::new(1.0)
    }
}

impl RasterSurface {
    pub fn new(scale: f64) -> Self {
        Self {
            scale: scale.max(f64::MIN_POSITIVE),
            width: 0,
            height: 0,
            pixels: Arc::new(Vec::new()),
            rendered: None,
            revision: 0,
        }
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    fn key(&self, geometry: &WheelGeometry) -> RenderKey {
        RenderKey {
            mode: geometry.mode(),
            size: geometry.size(),
            ring_thickness: geometry.ring_thickness(),
            scale: self.scale,
        }
    }
}

impl WheelSurface for RasterSurface {
    fn render(&mut self, geometry: &WheelGeometry) {
        let size = geometry.size();
        let width = (size.width * self.scale).ceil().max(0.0) as u32;
        let height = (size.height * self.scale).ceil().max(0.0) as u32;

        let pixels = match geometry.mode() {
            WheelMode::Rgb => rasterize_hue_disc(geometry, self.scale, width, height),
            WheelMode::Temperature => rasterize_temperature_ring(geometry, self.scale, width, height),
        };

        log::debug!(
            "rendered {:?} wheel at {width}x{height} (scale {})",
            geometry.mode(),
            self.scale
        );

        self.width = width;
        self.height = height;
        self.pixels = Arc::new(pixels);
        self.rendered = Some(self.key(geometry));
        self.revision += 1;
    }

    fn is_current(&self, geometry: &WheelGeometry) -> bool {
        self.rendered == Some(self.key(geometry))
    }

    fn invalidate(&mut self) {
        self.rendered = None;
    }

    fn read_pixel(&self, point: Point) -> Option<[u8; 4]> {
        if self.rendered.is_none() || self.width == 0 || self.height == 0 {
            return None;
        }
        // points up to the tolerance band past the edge land on the last cell
        let px = ((point.x * self.scale).floor().max(0.0) as u32).min(self.width - 1);
        let py = ((point.y * self.scale).floor().max(0.0) as u32).min(self.height - 1);
        let offset = cell_offset(self.width, px, py);
        let cell = self.pixels.get(offset..offset + 4)?;
        Some([cell[0], cell[1], cell[2], cell[3]])
    }

    fn image(&self) -> Option<WheelImage> {
        self.rendered?;
        Some(WheelImage {
            width: self.width,
            height: self.height,
            pixels: self.pixels.clone(),
            revision: self.revision,
        })
    }

    fn set_scale(&mut self, scale: f64) {
        if scale > 0.0 && scale != self.scale {
            self.scale = scale;
            self.rendered = None;
        }
    }
}

/// Byte offset of an RGBA8 cell in a row-major buffer `width` cells wide.
pub(crate) fn cell_offset(width: u32, px: u32, py: u32) -> usize {
    (py as usize * width as usize + px as usize) * 4
}

/// Alpha for a mask edge at `inside` units inside the shape (negative = outside).
fn feather_alpha(inside: f64) -> u8 {
    let alpha = ((inside + constants::FEATHER) / constants::FEATHER).clamp(0.0, 1.0);
    (alpha * 255.0 + 0.5) as u8
}

fn put(buf: &mut [u8], offset: usize, (r, g, b): (f64, f64, f64), alpha: u8) {
    buf[offset] = (r * 255.0 + 0.5) as u8;
    buf[offset + 1] = (g * 255.0 + 0.5) as u8;
    buf[offset + 2] = (b * 255.0 + 0.5) as u8;
    buf[offset + 3] = alpha;
}

/// Full-brightness hue/saturation disc.
///
/// Every cell carries a color, including the transparent ones outside the
/// disc (saturation is clamped at the rim), so read-back near the mask
/// edge never sees black.
fn rasterize_hue_disc(geometry: &WheelGeometry, scale: f64, width: u32, height: u32) -> Vec<u8> {
    let center = geometry.center();
    let radius = geometry.radius();
    let mut buf = vec![0u8; cell_offset(width, 0, height)];
    if radius <= 0.0 {
        return buf;
    }

    for py in 0..height {
        let dy = (py as f64 + 0.5) / scale - center.y;
        let row_offset = cell_offset(width, 0, py);

        for px in 0..width {
            let dx = (px as f64 + 0.5) / scale - center.x;
            let dist = (dx * dx + dy * dy).sqrt();

            let saturation = (dist / radius).min(1.0);
            // Y grows downward, hue grows counter-clockwise
            let hue = math::wrap_unit((-dy).atan2(dx) / TAU);
            let alpha = feather_alpha((radius - dist) * scale);

            let offset = row_offset + px as usize * 4;
            put(&mut buf, offset, math::hsb_to_rgb(hue, saturation, 1.0), alpha);
        }
    }

    buf
}

/// Black-body gradient through [`constants::TEMPERATURE_STOPS`], top to
/// bottom, masked to the ring.
fn rasterize_temperature_ring(
    geometry: &WheelGeometry,
    scale: f64,
    width: u32,
    height: u32,
) -> Vec<u8> {
    let center = geometry.center();
    let radius = geometry.radius();
    let inner = (radius - geometry.ring_thickness()).max(0.0);
    let stops = constants::TEMPERATURE_STOPS.map(kelvin::color_for_temperature);
    let mut buf = vec![0u8; cell_offset(width, 0, height)];
    if radius <= 0.0 {
        return buf;
    }

    for py in 0..height {
        let y = (py as f64 + 0.5) / scale;
        let t = (y / geometry.size().height).clamp(0.0, 1.0);
        let color = gradient_at(&stops, t);
        let dy = y - center.y;
        let row_offset = cell_offset(width, 0, py);

        for px in 0..width {
            let dx = (px as f64 + 0.5) / scale - center.x;
            let dist = (dx * dx + dy * dy).sqrt();
            let inside = (radius - dist).min(dist - inner) * scale;

            let offset = row_offset + px as usize * 4;
            put(&mut buf, offset, color, feather_alpha(inside));
        }
    }

    buf
}

/// Evenly spaced linear gradient, `t` in 0.0–1.0.
fn gradient_at(stops: &[SolidColor; 3], t: f64) -> (f64, f64, f64) {
    let segment = t * (stops.len() - 1) as f64;
    let i = (segment.floor() as usize).min(stops.len() - 2);
    let f = segment - i as f64;
    let (a, b) = (stops[i], stops[i + 1]);
    (
        a.r() + (b.r() - a.r()) * f,
        a.g() + (b.g() - a.g()) * f,
        a.b() + (b.b() - a.b()) * f,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn surface_and_wheel(mode: WheelMode) -> (RasterSurface, WheelGeometry) {
        (
            RasterSurface::new(2.0),
            WheelGeometry::new(mode, Size::new(300.0, 300.0)),
        )
    }

    fn hue_distance(a: f64, b: f64) -> f64 {
        let d = (a - b).abs();
        d.min(1.0 - d)
    }

    #[test]
    fn sampling_inverts_location_for_color() {
        let (mut surface, wheel) = surface_and_wheel(WheelMode::Rgb);
        for i in 0..24 {
            let hue = i as f64 / 24.0;
            for saturation in [0.2, 0.45, 0.7, 0.95] {
                let at = wheel.location_for_color(SolidColor::from_hsb(hue, saturation, 1.0));
                let sampled = pixel_color(&wheel, &mut surface, at).unwrap();
                let (h, s, _) = sampled.to_hsb();
                assert!(hue_distance(h, hue) < 0.02, "hue {hue} sampled as {h}");
                assert!((s - saturation).abs() < 0.02, "sat {saturation} sampled as {s}");
            }
        }
    }

    #[test]
    fn rim_uses_computed_edge_color() {
        let (mut surface, wheel) = surface_and_wheel(WheelMode::Rgb);
        let at = wheel.location_for_color(SolidColor::from_hsb(0.4, 0.997, 1.0));
        assert!(wheel.point_on_wheel_edge(at));
        let sampled = pixel_color(&wheel, &mut surface, at).unwrap();
        assert_eq!(sampled, wheel.edge_color(wheel.edge_angle(at)));
        // the edge path does not need a render
        assert!(surface.image().is_none());
    }

    #[test]
    fn nothing_is_sampled_outside_the_wheel() {
        let (mut surface, wheel) = surface_and_wheel(WheelMode::Rgb);
        for point in [
            Point::new(5.0, 5.0),
            Point::new(301.0, 150.0),
            Point::new(-20.0, -20.0),
            Point::new(150.0, 1000.0),
        ] {
            assert!(!wheel.point_in_wheel(point));
            assert_eq!(pixel_color(&wheel, &mut surface, point), None);
        }
    }

    #[test]
    fn temperature_hole_is_not_sampled() {
        let (mut surface, wheel) = surface_and_wheel(WheelMode::Temperature);
        assert_eq!(pixel_color(&wheel, &mut surface, wheel.center()), None);
    }

    #[test]
    fn temperature_ring_runs_warm_to_cool() {
        let (mut surface, wheel) = surface_and_wheel(WheelMode::Temperature);
        let top = pixel_color(&wheel, &mut surface, Point::new(150.0, 10.0)).unwrap();
        let bottom = pixel_color(&wheel, &mut surface, Point::new(150.0, 290.0)).unwrap();
        assert!(top.r() > top.b());
        assert!(bottom.b() > bottom.r());
        assert!(top.temperature() < bottom.temperature());
    }

    #[test]
    fn renders_are_cached_until_the_geometry_changes() {
        let (mut surface, mut wheel) = surface_and_wheel(WheelMode::Rgb);
        pixel_color(&wheel, &mut surface, Point::new(150.0, 150.0));
        let first = surface.image().unwrap().revision;
        pixel_color(&wheel, &mut surface, Point::new(140.0, 150.0));
        assert_eq!(surface.image().unwrap().revision, first);

        wheel.set_mode(WheelMode::Temperature);
        assert!(!surface.is_current(&wheel));
        pixel_color(&wheel, &mut surface, Point::new(150.0, 10.0));
        assert_eq!(surface.image().unwrap().revision, first + 1);
    }

    #[test]
    fn image_matches_scaled_size() {
        let (mut surface, wheel) = surface_and_wheel(WheelMode::Rgb);
        surface.render(&wheel);
        let image = surface.image().unwrap();
        assert_eq!((image.width, image.height), (600, 600));
        assert_eq!(image.pixels.len(), 600 * 600 * 4);
        // corner is masked out, center is opaque and nearly white
        assert_eq!(surface.read_pixel(Point::new(0.0, 0.0)).unwrap()[3], 0);
        let [r, g, b, a] = surface.read_pixel(Point::new(150.0, 150.0)).unwrap();
        assert_eq!(a, 255);
        assert!(r >= 252 && g >= 252 && b >= 252);
    }

    #[test]
    fn cell_offsets_do_not_wrap_on_huge_surfaces() {
        assert_eq!(cell_offset(300, 2, 1), (300 + 2) * 4);
        let offset = cell_offset(40_000, 39_999, 30_000);
        assert_eq!(offset, (30_000usize * 40_000 + 39_999) * 4);
        assert!(offset > u32::MAX as usize);
    }

    #[test]
    fn rescaling_invalidates() {
        let (mut surface, wheel) = surface_and_wheel(WheelMode::Rgb);
        surface.render(&wheel);
        assert!(surface.is_current(&wheel));
        surface.set_scale(1.0);
        assert!(!surface.is_current(&wheel));
    }
}
