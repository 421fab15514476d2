use std::io::Cursor;

use anyhow::Context;

use crate::foundation::core::Argb;
use crate::foundation::error::{CanvasError, CanvasResult};
use crate::ops::model::{OpKind, Operation};
use crate::ops::wire::{HEADER_LEN, MAGIC, WIRE_VERSION};

/// Incremental encoder for the operation list wire format.
///
/// This is the caller-side half of the protocol: a host describes a drawing by calling one
/// method per operation and ships the bytes from [`OperationListBuilder::finish`].
///
/// Payloads and record counts that do not fit the format's `u32` fields are reported by
/// `finish` rather than written truncated.
#[derive(Debug, Clone)]
pub struct OperationListBuilder {
    buf: Vec<u8>,
    count: u32,
    overflow: Option<String>,
}

impl Default for OperationListBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl OperationListBuilder {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self::with_capacity(1024)
    }

    /// Create an empty builder with room for `bytes` of encoded operations.
    pub fn with_capacity(bytes: usize) -> Self {
        let mut buf = Vec::with_capacity(HEADER_LEN + bytes);
        buf.extend_from_slice(&MAGIC);
        buf.push(WIRE_VERSION);
        buf.extend_from_slice(&0u32.to_le_bytes());
        Self {
            buf,
            count: 0,
            overflow: None,
        }
    }

    /// Number of operations written so far.
    pub fn len(&self) -> usize {
        self.count as usize
    }

    /// Return `true` when no operation has been written.
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Append an already-decoded operation.
    pub fn push_op(&mut self, op: &Operation<'_>) -> &mut Self {
        self.begin(op.kind());
        match *op {
            Operation::AddArc {
                x,
                y,
                radius,
                start_angle,
                end_angle,
            } => self.f64s(&[x, y, radius, start_angle, end_angle]),
            Operation::AddCircle { x, y, radius } => self.f64s(&[x, y, radius]),
            Operation::AddLineTo { x, y } => self.f64s(&[x, y]),
            Operation::AddRectangle {
                x,
                y,
                width,
                height,
            }
            | Operation::ClipRectangle {
                x,
                y,
                width,
                height,
            } => self.f64s(&[x, y, width, height]),
            Operation::DrawImage {
                x,
                y,
                width,
                height,
                image,
            } => {
                self.f64s(&[x, y, width, height]);
                self.bytes(image);
            }
            Operation::DrawPixel { x, y } => {
                self.buf.extend_from_slice(&x.to_le_bytes());
                self.buf.extend_from_slice(&y.to_le_bytes());
            }
            Operation::DrawString { x, y, text } => {
                self.f64s(&[x, y]);
                self.bytes(text.as_bytes());
            }
            Operation::Clear | Operation::FillPath | Operation::Pop | Operation::Push => {}
            Operation::Rotate { angle } => self.f64s(&[angle]),
            Operation::Scale { x, y } => self.f64s(&[x, y]),
            Operation::SetColor { color } => {
                self.buf.extend_from_slice(&[color.a, color.r, color.g, color.b]);
            }
            Operation::SetFontFace { name, size } => {
                self.buf.extend_from_slice(&size.to_le_bytes());
                self.bytes(name.as_bytes());
            }
            Operation::Translate { dx, dy } => self.f64s(&[dx, dy]),
        }
        self
    }

    /// Append an arc; angles in radians.
    pub fn add_arc(&mut self, x: f64, y: f64, radius: f64, start: f64, end: f64) -> &mut Self {
        self.push_op(&Operation::AddArc {
            x,
            y,
            radius,
            start_angle: start,
            end_angle: end,
        })
    }

    /// Append a circle.
    pub fn add_circle(&mut self, x: f64, y: f64, radius: f64) -> &mut Self {
        self.push_op(&Operation::AddCircle { x, y, radius })
    }

    /// Append a line to `(x, y)`.
    pub fn add_line_to(&mut self, x: f64, y: f64) -> &mut Self {
        self.push_op(&Operation::AddLineTo { x, y })
    }

    /// Append a rectangle.
    pub fn add_rectangle(&mut self, x: f64, y: f64, width: f64, height: f64) -> &mut Self {
        self.push_op(&Operation::AddRectangle {
            x,
            y,
            width,
            height,
        })
    }

    /// Clear the surface to the current color.
    pub fn clear(&mut self) -> &mut Self {
        self.push_op(&Operation::Clear)
    }

    /// Intersect the clip with a rectangle.
    pub fn clip_rectangle(&mut self, x: f64, y: f64, width: f64, height: f64) -> &mut Self {
        self.push_op(&Operation::ClipRectangle {
            x,
            y,
            width,
            height,
        })
    }

    /// Draw encoded image bytes into a destination rectangle.
    pub fn draw_image(
        &mut self,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        image: &[u8],
    ) -> &mut Self {
        self.push_op(&Operation::DrawImage {
            x,
            y,
            width,
            height,
            image,
        })
    }

    /// Encode `img` as PNG and draw it at `(x, y)` at its natural size.
    pub fn draw_rgba_image(
        &mut self,
        x: f64,
        y: f64,
        img: &image::RgbaImage,
    ) -> CanvasResult<&mut Self> {
        let mut png = Vec::new();
        img.write_to(&mut Cursor::new(&mut png), image::ImageFormat::Png)
            .context("encode image operand as png")?;
        let (w, h) = img.dimensions();
        Ok(self.draw_image(x, y, f64::from(w), f64::from(h), &png))
    }

    /// Paint one pixel.
    pub fn draw_pixel(&mut self, x: i32, y: i32) -> &mut Self {
        self.push_op(&Operation::DrawPixel { x, y })
    }

    /// Draw text at a baseline origin.
    pub fn draw_string(&mut self, x: f64, y: f64, text: &str) -> &mut Self {
        self.push_op(&Operation::DrawString { x, y, text })
    }

    /// Fill and reset the current path.
    pub fn fill_path(&mut self) -> &mut Self {
        self.push_op(&Operation::FillPath)
    }

    /// Restore the last saved context.
    pub fn pop(&mut self) -> &mut Self {
        self.push_op(&Operation::Pop)
    }

    /// Save the current context.
    pub fn push(&mut self) -> &mut Self {
        self.push_op(&Operation::Push)
    }

    /// Rotate by `angle` radians.
    pub fn rotate(&mut self, angle: f64) -> &mut Self {
        self.push_op(&Operation::Rotate { angle })
    }

    /// Scale by `(x, y)`.
    pub fn scale(&mut self, x: f64, y: f64) -> &mut Self {
        self.push_op(&Operation::Scale { x, y })
    }

    /// Set the paint color.
    pub fn set_color(&mut self, color: Argb) -> &mut Self {
        self.push_op(&Operation::SetColor { color })
    }

    /// Select a font family at a pixel size.
    pub fn set_font_face(&mut self, name: &str, size: i32) -> &mut Self {
        self.push_op(&Operation::SetFontFace { name, size })
    }

    /// Translate by `(dx, dy)`.
    pub fn translate(&mut self, dx: f64, dy: f64) -> &mut Self {
        self.push_op(&Operation::Translate { dx, dy })
    }

    /// Patch the record count into the header and return the encoded list.
    ///
    /// Fails with [`CanvasError::Validation`] when an operand or the record count overflowed
    /// the format's `u32` fields.
    pub fn finish(mut self) -> CanvasResult<Vec<u8>> {
        if let Some(msg) = self.overflow {
            return Err(CanvasError::validation(msg));
        }
        let at = MAGIC.len() + 1;
        self.buf[at..at + 4].copy_from_slice(&self.count.to_le_bytes());
        Ok(self.buf)
    }

    fn begin(&mut self, kind: OpKind) {
        self.buf.push(kind.tag());
        match self.count.checked_add(1) {
            Some(count) => self.count = count,
            None => self.overflowed(format!(
                "operation list holds more than {} records",
                u32::MAX
            )),
        }
    }

    fn overflowed(&mut self, msg: String) {
        self.overflow.get_or_insert(msg);
    }

    fn f64s(&mut self, vals: &[f64]) {
        for v in vals {
            self.buf.extend_from_slice(&v.to_le_bytes());
        }
    }

    fn bytes(&mut self, data: &[u8]) {
        let Ok(len) = u32::try_from(data.len()) else {
            self.buf.extend_from_slice(&0u32.to_le_bytes());
            self.overflowed(format!(
                "operand of {} bytes exceeds the {} byte limit",
                data.len(),
                u32::MAX
            ));
            return;
        };
        self.buf.extend_from_slice(&len.to_le_bytes());
        self.buf.extend_from_slice(data);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/ops/builder.rs"]
mod tests;
