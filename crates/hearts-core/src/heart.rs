use crate::types::Color;
use kurbo::{BezPath, Point, Rect, Shape, Size};
use serde::Serialize;

/// Side of the square the outline below is drawn in.
const VIEWBOX: f64 = 24.0;

/// Default size of a heart in layout units.
pub const DEFAULT_HEART_SIZE: f64 = 30.0;

/// The default shape content: a filled heart outline.
///
/// This is geometry only. Hosts fill `path()` with `color` using their own
/// renderer.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct HeartShape {
    pub color: Color,
    pub size: f64,
}

impl HeartShape {
    pub fn new(color: Color) -> Self {
        Self {
            color,
            size: DEFAULT_HEART_SIZE,
        }
    }

    pub fn with_size(mut self, size: f64) -> Self {
        self.size = size;
        self
    }

    /// The heart outline, scaled to `size` with its top-left corner at the origin.
    pub fn path(&self) -> BezPath {
        let k = self.size / VIEWBOX;
        let p = |x: f64, y: f64| Point::new(x * k, y * k);

        let mut path = BezPath::new();
        path.move_to(p(12.0, 21.35));
        path.line_to(p(10.55, 20.03));
        path.curve_to(p(5.4, 15.36), p(2.0, 12.28), p(2.0, 8.5));
        path.curve_to(p(2.0, 5.42), p(4.42, 3.0), p(7.5, 3.0));
        path.curve_to(p(9.24, 3.0), p(10.91, 3.81), p(12.0, 5.09));
        path.curve_to(p(13.09, 3.81), p(14.76, 3.0), p(16.5, 3.0));
        path.curve_to(p(19.58, 3.0), p(22.0, 5.42), p(22.0, 8.5));
        path.curve_to(p(22.0, 12.28), p(18.6, 15.36), p(13.45, 20.04));
        path.close_path();
        path
    }

    /// The layout box the heart occupies. This is what a host reports as the
    /// shape's measured size.
    pub fn layout_size(&self) -> Size {
        Size::new(self.size, self.size)
    }

    /// Tight bounds of the outline inside its layout box.
    pub fn bounds(&self) -> Rect {
        self.path().bounding_box()
    }
}
