//! Wheel geometry: mapping between colors and points on the wheel.
//!
//! Coordinates are wheel-local, with the origin at the top-left of the
//! wheel's bounding box and Y growing downward. Hue runs counter-clockwise
//! from 3 o'clock (hence the Y flip in [`WheelGeometry::location_for_color`]);
//! saturation runs from the center (0.0) to the rim (1.0). Brightness has no
//! dimension on the wheel.

use std::f64::consts::{FRAC_PI_2, PI, TAU};

use floem::kurbo::{Point, Rect, Size};
use serde::{Deserialize, Serialize};

use crate::color::SolidColor;
use crate::constants;
use crate::math;

/// What the wheel shows and where it accepts input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WheelMode {
    /// Full hue/saturation disc.
    #[default]
    Rgb,
    /// Black-body gradient, interactive only on an outer ring.
    Temperature,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WheelGeometry {
    mode: WheelMode,
    size: Size,
    border_width: f64,
    ring_thickness: f64,
}

impl Default for WheelGeometry {
    fn default() -> Self {
        Self::new(WheelMode::default(), Size::ZERO)
    }
}

impl WheelGeometry {
    pub fn new(mode: WheelMode, size: Size) -> Self {
        Self {
            mode,
            size,
            border_width: 0.0,
            ring_thickness: constants::TEMPERATURE_RING_THICKNESS,
        }
    }

    pub fn with_border_width(mut self, border_width: f64) -> Self {
        self.border_width = border_width;
        self
    }

    pub fn with_ring_thickness(mut self, ring_thickness: f64) -> Self {
        self.ring_thickness = ring_thickness;
        self
    }

    pub fn mode(&self) -> WheelMode {
        self.mode
    }

    pub(crate) fn set_mode(&mut self, mode: WheelMode) {
        self.mode = mode;
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub(crate) fn set_size(&mut self, size: Size) {
        self.size = size;
    }

    pub fn border_width(&self) -> f64 {
        self.border_width
    }

    pub fn ring_thickness(&self) -> f64 {
        self.ring_thickness
    }

    pub(crate) fn set_ring_thickness(&mut self, ring_thickness: f64) {
        self.ring_thickness = ring_thickness;
    }

    pub fn bounds(&self) -> Rect {
        Rect::from_origin_size(Point::ZERO, self.size)
    }

    /// Half of the shorter bounding dimension.
    pub fn radius(&self) -> f64 {
        self.size.width.min(self.size.height) / 2.0
    }

    pub fn center(&self) -> Point {
        Point::new(self.size.width / 2.0, self.size.height / 2.0)
    }

    fn distance_to_center(&self, point: Point) -> f64 {
        self.center().distance(point)
    }

    fn within_tolerant_bounds(&self, point: Point) -> bool {
        let tolerance = constants::BOUNDS_TOLERANCE;
        let b = self.bounds();
        // inclusive on every side
        point.x >= b.x0 - tolerance
            && point.x <= b.x1 + tolerance
            && point.y >= b.y0 - tolerance
            && point.y <= b.y1 + tolerance
    }

    /// Where `color`'s hue and saturation sit on the wheel.
    pub fn location_for_color(&self, color: SolidColor) -> Point {
        let (hue, saturation, _) = color.to_hsb();
        let angle = hue * TAU;
        let distance = saturation * self.radius();
        let center = self.center();
        Point::new(
            center.x + distance * angle.cos(),
            center.y - distance * angle.sin(),
        )
    }

    /// Whether `point` lies on the disc, inside the border.
    pub fn point_in_wheel(&self, point: Point) -> bool {
        if !self.within_tolerant_bounds(point) {
            return false;
        }
        self.distance_to_center(point) <= self.radius() - self.border_width
    }

    /// Whether `point` lies on the temperature-mode ring.
    pub fn point_in_temperature_ring(&self, point: Point) -> bool {
        if !self.within_tolerant_bounds(point) {
            return false;
        }
        let distance = self.distance_to_center(point);
        let radius = self.radius();
        distance >= radius - self.ring_thickness && distance <= radius - self.border_width
    }

    /// Whether `point` is in the band at the rim where rendered pixels are
    /// anti-aliased and cannot be trusted.
    pub fn point_on_wheel_edge(&self, point: Point) -> bool {
        self.distance_to_center(point) >= self.radius() - constants::EDGE_TOLERANCE
    }

    /// Mode-appropriate interactivity test: the disc in RGB mode, the ring in
    /// temperature mode.
    pub fn point_is_interactive(&self, point: Point) -> bool {
        match self.mode {
            WheelMode::Rgb => self.point_in_wheel(point),
            WheelMode::Temperature => self.point_in_temperature_ring(point),
        }
    }

    /// Angle of `point` as seen from the center, in the rim-sampling
    /// convention consumed by [`WheelGeometry::edge_color`]: `atan2(dx, dy)`.
    pub fn edge_angle(&self, point: Point) -> f64 {
        let center = self.center();
        (point.x - center.x).atan2(point.y - center.y)
    }

    /// Fully saturated, fully bright color for a rim angle from
    /// [`WheelGeometry::edge_angle`].
    pub fn edge_color(&self, angle: f64) -> SolidColor {
        // [-pi, pi] -> [0, 2pi], then a quarter turn into hue orientation
        let normalized = angle + PI + FRAC_PI_2;
        let hue = math::wrap_unit(normalized / TAU);
        SolidColor::from_hsb(hue, 1.0, 1.0)
    }

    /// Pull a drag location back onto the interactive region.
    ///
    /// Points off the disc are projected radially onto the rim (slightly
    /// inset). In temperature mode, points inside the disc but inside the
    /// ring's hole are projected onto the ring's inner edge.
    pub fn clamp_to_interactive(&self, point: Point) -> Point {
        let center = self.center();
        let radius = self.radius();
        if !self.point_in_wheel(point) {
            let reach = radius - self.border_width - constants::CLAMP_INSET;
            return project(center, point, reach);
        }
        if self.mode == WheelMode::Temperature && !self.point_in_temperature_ring(point) {
            let reach = radius - (self.ring_thickness - constants::CLAMP_INSET);
            return project(center, point, reach);
        }
        point
    }
}

fn project(center: Point, toward: Point, distance: f64) -> Point {
    let angle = (toward.y - center.y).atan2(toward.x - center.x);
    Point::new(
        center.x + distance * angle.cos(),
        center.y + distance * angle.sin(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wheel(mode: WheelMode) -> WheelGeometry {
        WheelGeometry::new(mode, Size::new(300.0, 300.0))
    }

    fn approx_eq(a: f64, b: f64) {
        assert!((a - b).abs() < 1e-6, "expected {a} ~= {b}");
    }

    #[test]
    fn radius_uses_shorter_side() {
        let g = WheelGeometry::new(WheelMode::Rgb, Size::new(300.0, 200.0));
        assert_eq!(g.radius(), 100.0);
        assert_eq!(g.center(), Point::new(150.0, 100.0));
    }

    #[test]
    fn white_sits_at_center() {
        let g = wheel(WheelMode::Rgb);
        assert_eq!(g.location_for_color(SolidColor::WHITE), g.center());
    }

    #[test]
    fn hue_runs_counter_clockwise_with_y_down() {
        let g = wheel(WheelMode::Rgb);
        let red = g.location_for_color(SolidColor::from_hsb(0.0, 1.0, 1.0));
        approx_eq(red.x, 300.0);
        approx_eq(red.y, 150.0);
        let quarter = g.location_for_color(SolidColor::from_hsb(0.25, 1.0, 1.0));
        approx_eq(quarter.x, 150.0);
        approx_eq(quarter.y, 0.0);
    }

    #[test]
    fn brightness_does_not_move_location() {
        let g = wheel(WheelMode::Rgb);
        let bright = g.location_for_color(SolidColor::from_hsb(0.6, 0.5, 1.0));
        let dim = g.location_for_color(SolidColor::from_hsb(0.6, 0.5, 0.3));
        assert!(bright.distance(dim) < 1e-6);
    }

    #[test]
    fn points_beyond_the_rim_are_outside() {
        let g = wheel(WheelMode::Rgb);
        assert!(g.point_in_wheel(Point::new(150.0, 150.0)));
        assert!(g.point_in_wheel(Point::new(300.0, 150.0)));
        assert!(!g.point_in_wheel(Point::new(300.5, 150.0)));
        assert!(!g.point_in_wheel(Point::new(10.0, 10.0)));
        assert!(!g.point_in_wheel(Point::new(-50.0, 150.0)));
    }

    #[test]
    fn border_shrinks_the_disc() {
        let g = wheel(WheelMode::Rgb).with_border_width(5.0);
        assert!(!g.point_in_wheel(Point::new(297.0, 150.0)));
        assert!(g.point_in_wheel(Point::new(295.0, 150.0)));
    }

    #[test]
    fn temperature_ring_excludes_hole() {
        let g = wheel(WheelMode::Temperature);
        assert!(!g.point_in_temperature_ring(g.center()));
        assert!(!g.point_in_temperature_ring(Point::new(240.0, 150.0)));
        assert!(g.point_in_temperature_ring(Point::new(260.0, 150.0)));
        assert!(g.point_in_temperature_ring(Point::new(299.0, 150.0)));
        assert!(!g.point_is_interactive(g.center()));
        assert!(wheel(WheelMode::Rgb).point_is_interactive(g.center()));
    }

    #[test]
    fn edge_band_is_one_unit_wide() {
        let g = wheel(WheelMode::Rgb);
        assert!(g.point_on_wheel_edge(Point::new(299.0, 150.0)));
        assert!(!g.point_on_wheel_edge(Point::new(298.5, 150.0)));
    }

    #[test]
    fn edge_color_is_fully_saturated_and_bright() {
        let g = wheel(WheelMode::Rgb);
        for i in 0..64 {
            let angle = -PI + TAU * i as f64 / 64.0;
            let (_, s, b) = g.edge_color(angle).to_hsb();
            approx_eq(s, 1.0);
            approx_eq(b, 1.0);
        }
    }

    #[test]
    fn edge_color_hue_increases_with_angle() {
        let g = wheel(WheelMode::Rgb);
        let mut wraps = 0;
        let mut previous = g.edge_color(0.0).hue();
        for i in 1..=360 {
            let angle = TAU * i as f64 / 360.0;
            let hue = g.edge_color(angle).hue();
            if hue < previous {
                wraps += 1;
            }
            previous = hue;
        }
        assert_eq!(wraps, 1);
    }

    #[test]
    fn edge_color_matches_location_hue() {
        let g = wheel(WheelMode::Rgb);
        for hue in [0.0, 0.125, 0.3, 0.5, 0.77, 0.9] {
            let at = g.location_for_color(SolidColor::from_hsb(hue, 1.0, 1.0));
            let found = g.edge_color(g.edge_angle(at)).hue();
            let delta = (found - hue).abs();
            assert!(delta.min(1.0 - delta) < 1e-6, "hue {hue} came back {found}");
        }
    }

    #[test]
    fn drags_off_the_disc_project_onto_the_rim() {
        let g = wheel(WheelMode::Rgb);
        let clamped = g.clamp_to_interactive(Point::new(600.0, 150.0));
        approx_eq(clamped.x, 150.0 + 148.0);
        approx_eq(clamped.y, 150.0);
        assert!(g.point_in_wheel(clamped));

        let inside = Point::new(160.0, 170.0);
        assert_eq!(g.clamp_to_interactive(inside), inside);
    }

    #[test]
    fn temperature_drags_into_the_hole_project_onto_the_ring() {
        let g = wheel(WheelMode::Temperature);
        let clamped = g.clamp_to_interactive(Point::new(150.0, 140.0));
        approx_eq(clamped.x, 150.0);
        approx_eq(clamped.y, 150.0 - 102.0);
        assert!(g.point_in_temperature_ring(clamped));
    }
}
