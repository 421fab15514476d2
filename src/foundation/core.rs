use crate::foundation::math::premul_rgba8;

pub use kurbo::{Affine, BezPath, Point, Rect, Vec2};

/// Output canvas width in pixels. The output size is fixed.
pub const CANVAS_WIDTH: u16 = 64;

/// Output canvas height in pixels.
pub const CANVAS_HEIGHT: u16 = 32;

/// 8-bit straight-alpha color, in the channel order used on the wire.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Argb {
    /// Alpha channel.
    pub a: u8,
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Argb {
    /// Opaque black, the initial paint color.
    pub const BLACK: Self = Self::new(255, 0, 0, 0);

    /// Fully transparent black, the initial surface content.
    pub const TRANSPARENT: Self = Self::new(0, 0, 0, 0);

    /// Build a color from its alpha, red, green and blue channels.
    pub const fn new(a: u8, r: u8, g: u8, b: u8) -> Self {
        Self { a, r, g, b }
    }

    /// Straight-alpha `[r, g, b, a]` bytes.
    pub fn to_rgba8(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Premultiplied `[r, g, b, a]` bytes.
    pub fn to_premul_rgba8(self) -> [u8; 4] {
        premul_rgba8(self.to_rgba8())
    }

    pub(crate) fn to_cpu_color(self) -> vello_cpu::peniko::Color {
        vello_cpu::peniko::Color::from_rgba8(self.r, self.g, self.b, self.a)
    }
}

impl Default for Argb {
    fn default() -> Self {
        Self::BLACK
    }
}

pub(crate) fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

pub(crate) fn rect_to_cpu(r: Rect) -> vello_cpu::kurbo::Rect {
    vello_cpu::kurbo::Rect::new(r.x0, r.y0, r.x1, r.y1)
}

pub(crate) fn bezpath_to_cpu(path: &BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let pt = |p: Point| vello_cpu::kurbo::Point::new(p.x, p.y);
    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(pt(p)),
            PathEl::LineTo(p) => out.line_to(pt(p)),
            PathEl::QuadTo(p1, p2) => out.quad_to(pt(p1), pt(p2)),
            PathEl::CurveTo(p1, p2, p3) => out.curve_to(pt(p1), pt(p2), pt(p3)),
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
