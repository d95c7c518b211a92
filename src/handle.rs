//! Draggable color handles.
//!
//! A handle is a pin whose tip marks its color's location on the wheel. Its
//! position is derived from its color during layout; while a drag is in
//! progress it follows the pointer instead.

use std::fmt;

use floem::kurbo::{Point, Rect, Size};

use crate::color::SolidColor;
use crate::constants;

/// Stable key of a handle within its picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HandleId(u64);

impl HandleId {
    pub(crate) fn new(raw: u64) -> Self {
        Self(raw)
    }
}

impl fmt::Display for HandleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "handle#{}", self.0)
    }
}

/// Target of the grow/shrink animation. The painter animates toward it; the
/// picker never waits on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HandleScale {
    #[default]
    Normal,
    Grown,
}

impl HandleScale {
    pub fn factor(self) -> f64 {
        match self {
            HandleScale::Normal => 1.0,
            HandleScale::Grown => constants::HANDLE_GROW_SCALE,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Handle {
    id: HandleId,
    color: SolidColor,
    location: Point,
    size: Size,
    scale: HandleScale,
}

impl Handle {
    pub(crate) fn new(id: HandleId, color: SolidColor, size: Size) -> Self {
        Self {
            id,
            color,
            location: Point::ZERO,
            size,
            scale: HandleScale::Normal,
        }
    }

    pub fn id(&self) -> HandleId {
        self.id
    }

    pub fn color(&self) -> SolidColor {
        self.color
    }

    pub(crate) fn set_color(&mut self, color: SolidColor) {
        self.color = color;
    }

    /// Wheel-local point under the handle's tip.
    pub fn location(&self) -> Point {
        self.location
    }

    pub(crate) fn set_location(&mut self, location: Point) {
        self.location = location;
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub(crate) fn set_size(&mut self, size: Size) {
        self.size = size;
    }

    pub fn scale(&self) -> HandleScale {
        self.scale
    }

    /// Returns false if the handle was already grown.
    pub(crate) fn grow(&mut self) -> bool {
        if self.scale == HandleScale::Grown {
            return false;
        }
        self.scale = HandleScale::Grown;
        true
    }

    pub(crate) fn shrink(&mut self) {
        self.scale = HandleScale::Normal;
    }

    /// Unscaled bounds: horizontally centered on the location, tip at the bottom.
    pub fn frame(&self) -> Rect {
        let half_width = self.size.width / 2.0;
        Rect::new(
            self.location.x - half_width,
            self.location.y - self.size.height,
            self.location.x + half_width,
            self.location.y,
        )
    }

    /// Bounds at the current animation target, scaled about the tip.
    pub fn paint_frame(&self) -> Rect {
        let factor = self.scale.factor();
        let half_width = self.size.width * factor / 2.0;
        Rect::new(
            self.location.x - half_width,
            self.location.y - self.size.height * factor,
            self.location.x + half_width,
            self.location.y,
        )
    }

    /// Touch target: the frame, extended downward by `extension_y`.
    pub fn hit_frame(&self, extension_y: f64) -> Rect {
        let frame = self.frame();
        Rect::new(frame.x0, frame.y0, frame.x1, frame.y1 + extension_y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn handle_at(location: Point) -> Handle {
        let mut handle = Handle::new(
            HandleId::new(1),
            SolidColor::WHITE,
            Size::new(constants::HANDLE_WIDTH, constants::HANDLE_HEIGHT),
        );
        handle.set_location(location);
        handle
    }

    #[test]
    fn tip_sits_on_location() {
        let handle = handle_at(Point::new(100.0, 100.0));
        assert_eq!(handle.frame(), Rect::new(79.0, 48.0, 121.0, 100.0));
    }

    #[test]
    fn hitbox_reaches_below_the_tip() {
        let handle = handle_at(Point::new(100.0, 100.0));
        let hit = handle.hit_frame(10.0);
        assert!(hit.contains(Point::new(100.0, 105.0)));
        assert!(!handle.frame().contains(Point::new(100.0, 105.0)));
        assert!(!hit.contains(Point::new(100.0, 111.0)));
    }

    #[test]
    fn growing_twice_is_a_no_op() {
        let mut handle = handle_at(Point::ZERO);
        assert!(handle.grow());
        assert!(!handle.grow());
        assert_eq!(handle.scale(), HandleScale::Grown);
        handle.shrink();
        assert_eq!(handle.scale(), HandleScale::Normal);
    }

    #[test]
    fn grown_frame_keeps_the_tip() {
        let mut handle = handle_at(Point::new(50.0, 80.0));
        handle.grow();
        let frame = handle.paint_frame();
        assert_eq!(frame.y1, 80.0);
        assert_eq!(frame.width(), constants::HANDLE_WIDTH * constants::HANDLE_GROW_SCALE);
        assert_eq!(frame.center().x, 50.0);
    }
}
