use crate::assets::decode::decode_image;
use crate::fonts::layout::TextLayoutEngine;
use crate::fonts::registry::TypefaceRegistry;
use crate::foundation::core::{CANVAS_HEIGHT, CANVAS_WIDTH, Point, Rect};
use crate::foundation::error::CanvasResult;
use crate::ops::model::Operation;
use crate::ops::wire::OperationList;
use crate::render::frame::FrameRGBA;
use crate::render::path::PathAccumulator;
use crate::render::state::{FontState, PaintState, TransformClipStack};
use crate::render::surface::Surface;

/// Drawing state machine for one render call.
///
/// Everything here is created per render and dropped with it; the typeface registry is only
/// borrowed for font resolution.
pub(crate) struct Interpreter<'r> {
    registry: &'r TypefaceRegistry,
    surface: Surface,
    path: PathAccumulator,
    paint: PaintState,
    font: FontState,
    stack: TransformClipStack,
    text: Option<TextLayoutEngine>,
}

impl<'r> Interpreter<'r> {
    /// Fresh state over a transparent canvas of the fixed output size.
    pub(crate) fn new(registry: &'r TypefaceRegistry) -> Self {
        Self::with_size(registry, CANVAS_WIDTH, CANVAS_HEIGHT)
    }

    pub(crate) fn with_size(registry: &'r TypefaceRegistry, width: u16, height: u16) -> Self {
        let paint = PaintState::default();
        Self {
            registry,
            surface: Surface::new(width, height, paint.anti_alias),
            path: PathAccumulator::new(),
            paint,
            font: FontState::initial(registry),
            stack: TransformClipStack::new(),
            text: None,
        }
    }

    /// Decode and apply every operation in `ops`, then read back the canvas.
    ///
    /// The first decode, image or allocation failure aborts the whole render.
    pub(crate) fn run(mut self, ops: OperationList<'_>) -> CanvasResult<FrameRGBA> {
        for op in ops {
            self.apply(&op?)?;
        }
        self.finish()
    }

    pub(crate) fn apply(&mut self, op: &Operation<'_>) -> CanvasResult<()> {
        tracing::trace!(op = ?op.kind(), "apply");
        match *op {
            Operation::AddArc {
                x,
                y,
                radius,
                start_angle,
                end_angle,
            } => self.path.add_arc(Point::new(x, y), radius, start_angle, end_angle),
            Operation::AddCircle { x, y, radius } => self.path.add_circle(Point::new(x, y), radius),
            Operation::AddLineTo { x, y } => self.path.line_to(Point::new(x, y)),
            Operation::AddRectangle {
                x,
                y,
                width,
                height,
            } => self.path.add_rect(Rect::new(x, y, x + width, y + height)),
            Operation::Clear => self.surface.clear(self.paint.color),
            Operation::ClipRectangle {
                x,
                y,
                width,
                height,
            } => self.stack.clip_rect(Rect::new(x, y, x + width, y + height).abs()),
            Operation::DrawImage {
                x,
                y,
                width,
                height,
                image,
            } => {
                let prepared = decode_image(image)?;
                self.surface.draw_image(
                    self.stack.current(),
                    &prepared,
                    Rect::new(x, y, x + width, y + height),
                )?;
            }
            Operation::DrawPixel { x, y } => {
                let (x, y) = (f64::from(x), f64::from(y));
                self.surface.fill_rect(
                    self.stack.current(),
                    Rect::new(x, y, x + 1.0, y + 1.0),
                    self.paint.color,
                );
            }
            Operation::DrawString { x, y, text } => self.draw_string(Point::new(x, y), text)?,
            Operation::FillPath => {
                let path = self.path.take();
                if !path.elements().is_empty() {
                    self.surface.fill_path(self.stack.current(), &path, self.paint.color);
                }
            }
            Operation::Pop => {
                if !self.stack.pop() {
                    tracing::debug!("pop without a saved state ignored");
                }
            }
            Operation::Push => self.stack.push(),
            Operation::Rotate { angle } => self.stack.rotate(angle),
            Operation::Scale { x, y } => self.stack.scale(x, y),
            Operation::SetColor { color } => self.paint.color = color,
            Operation::SetFontFace { name, size } => self.font.select(self.registry, name, size),
            Operation::Translate { dx, dy } => self.stack.translate(dx, dy),
        }
        Ok(())
    }

    fn draw_string(&mut self, origin: Point, text: &str) -> CanvasResult<()> {
        let Some(face) = self.font.face.clone() else {
            tracing::debug!("no typeface available, skipping text");
            return Ok(());
        };
        if text.is_empty() || self.font.size <= 0 {
            return Ok(());
        }
        let engine = self.text.get_or_insert_with(TextLayoutEngine::new);
        let shaped = engine.shape(text, &face, self.font.size as f32)?;
        self.surface.draw_glyphs(self.stack.current(), origin, &shaped, self.paint.color);
        Ok(())
    }

    /// Read back the canvas as it stands.
    pub(crate) fn finish(self) -> CanvasResult<FrameRGBA> {
        tracing::trace!(
            unbalanced_pushes = self.stack.depth(),
            pending_path = !self.path.is_empty(),
            "finish"
        );
        self.surface.snapshot()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/interpreter.rs"]
mod tests;
