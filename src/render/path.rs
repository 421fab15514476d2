use std::f64::consts::TAU;

use kurbo::Shape;

use crate::foundation::core::{BezPath, Point, Rect, Vec2};

const CURVE_TOLERANCE: f64 = 0.1;

/// The single path that `Add*` operations build up and `FillPath` consumes.
///
/// Contours follow the usual drawing-surface rules: arcs, circles and rectangles always start
/// a new contour, and a line added after a closed contour restarts from that contour's first
/// point.
#[derive(Clone, Debug, Default)]
pub(crate) struct PathAccumulator {
    path: BezPath,
    contour_start: Option<Point>,
    open: bool,
}

impl PathAccumulator {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.path.elements().is_empty()
    }

    #[cfg(test)]
    pub(crate) fn as_bezpath(&self) -> &BezPath {
        &self.path
    }

    /// Arc of the circle at `center`, sweeping from `start` to `end` radians.
    ///
    /// Sweeps of a full turn or more become a closed circle beginning at `start`.
    pub(crate) fn add_arc(&mut self, center: Point, radius: f64, start: f64, end: f64) {
        let sweep = end - start;
        if radius.is_nan() || radius <= 0.0 || sweep == 0.0 || !sweep.is_finite() {
            return;
        }
        let full = sweep.abs() >= TAU;
        let arc = kurbo::Arc {
            center,
            radii: Vec2::new(radius, radius),
            start_angle: start,
            sweep_angle: if full { TAU.copysign(sweep) } else { sweep },
            x_rotation: 0.0,
        };
        let p0 = center + Vec2::from_angle(start) * radius;
        self.path.move_to(p0);
        for el in arc.append_iter(CURVE_TOLERANCE) {
            self.path.push(el);
        }
        if full {
            self.path.close_path();
        }
        self.contour_start = Some(p0);
        self.open = !full;
    }

    pub(crate) fn add_circle(&mut self, center: Point, radius: f64) {
        if radius.is_nan() || radius <= 0.0 {
            return;
        }
        let circle = kurbo::Circle::new(center, radius);
        for el in circle.path_elements(CURVE_TOLERANCE) {
            if let kurbo::PathEl::MoveTo(p) = el {
                self.contour_start = Some(p);
            }
            self.path.push(el);
        }
        self.open = false;
    }

    pub(crate) fn line_to(&mut self, p: Point) {
        match (self.open, self.contour_start) {
            (true, _) => self.path.line_to(p),
            (false, Some(start)) => {
                self.path.move_to(start);
                self.path.line_to(p);
                self.open = true;
            }
            (false, None) => {
                self.path.move_to(p);
                self.contour_start = Some(p);
                self.open = true;
            }
        }
    }

    /// Closed clockwise contour starting at the rectangle's origin corner.
    pub(crate) fn add_rect(&mut self, rect: Rect) {
        let origin = Point::new(rect.x0, rect.y0);
        self.path.move_to(origin);
        self.path.line_to((rect.x1, rect.y0));
        self.path.line_to((rect.x1, rect.y1));
        self.path.line_to((rect.x0, rect.y1));
        self.path.close_path();
        self.contour_start = Some(origin);
        self.open = false;
    }

    /// Hand out the accumulated geometry and start over with an empty path.
    pub(crate) fn take(&mut self) -> BezPath {
        let out = std::mem::take(&mut self.path);
        self.contour_start = None;
        self.open = false;
        out
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/path.rs"]
mod tests;
