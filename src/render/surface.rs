use crate::assets::decode::{MAX_PIXMAP_SIDE, PreparedImage};
use crate::fonts::layout::ShapedText;
use crate::foundation::core::{
    Affine, Argb, BezPath, Point, Rect, affine_to_cpu, bezpath_to_cpu, rect_to_cpu,
};
use crate::foundation::error::{CanvasError, CanvasResult};
use crate::foundation::math::{premul_over_in_place, unpremultiply_rgba8_in_place};
use crate::render::frame::FrameRGBA;
use crate::render::state::CanvasState;

/// Coverage above this threshold paints a whole pixel; anything below paints nothing.
const ALIASING_THRESHOLD: u8 = 128;

/// Fixed-size raster target for one render.
///
/// Draws go through a `vello_cpu` context. `Clear` is kept out of the context as a flat
/// premultiplied background, so it replaces every pixel regardless of clip or transform.
pub(crate) struct Surface {
    width: u16,
    height: u16,
    background: [u8; 4],
    aliasing: Option<u8>,
    ctx: vello_cpu::RenderContext,
}

impl std::fmt::Debug for Surface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Surface")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("background", &self.background)
            .finish_non_exhaustive()
    }
}

impl Surface {
    /// Transparent surface of `width` x `height` pixels.
    pub(crate) fn new(width: u16, height: u16, anti_alias: bool) -> Self {
        let mut surface = Self {
            width,
            height,
            background: Argb::TRANSPARENT.to_premul_rgba8(),
            aliasing: (!anti_alias).then_some(ALIASING_THRESHOLD),
            ctx: vello_cpu::RenderContext::new(width, height),
        };
        surface.configure();
        surface
    }

    fn configure(&mut self) {
        self.ctx.set_aliasing_threshold(self.aliasing);
        self.ctx.set_blend_mode(vello_cpu::peniko::BlendMode::default());
        self.ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
    }

    /// Replace every pixel with `color`, dropping everything drawn so far.
    pub(crate) fn clear(&mut self, color: Argb) {
        self.ctx.reset();
        self.configure();
        self.background = color.to_premul_rgba8();
    }

    pub(crate) fn fill_path(&mut self, state: &CanvasState, path: &BezPath, color: Argb) {
        let cpu_path = bezpath_to_cpu(path);
        self.with_clip(state, |ctx| {
            ctx.set_transform(affine_to_cpu(state.transform));
            ctx.set_paint(color.to_cpu_color());
            ctx.fill_path(&cpu_path);
        });
    }

    pub(crate) fn fill_rect(&mut self, state: &CanvasState, rect: Rect, color: Argb) {
        self.with_clip(state, |ctx| {
            ctx.set_transform(affine_to_cpu(state.transform));
            ctx.set_paint(color.to_cpu_color());
            ctx.fill_rect(&rect_to_cpu(rect));
        });
    }

    /// Stretch `image` over `dst` with nearest-neighbour sampling.
    pub(crate) fn draw_image(
        &mut self,
        state: &CanvasState,
        image: &PreparedImage,
        dst: Rect,
    ) -> CanvasResult<()> {
        if image.is_empty() || dst.width() == 0.0 || dst.height() == 0.0 {
            return Ok(());
        }
        let fitted;
        let image = if image.fits_pixmap() {
            image
        } else {
            // Oversized sources are reduced to their on-canvas extent before painting.
            let device = state.transform.transform_rect_bbox(dst);
            let limit = device.width().max(device.height()).ceil();
            let limit = (limit.min(f64::from(MAX_PIXMAP_SIDE)) as u32).max(1);
            let (w, h) = (image.width.min(limit), image.height.min(limit));
            tracing::debug!(
                from_width = image.width,
                from_height = image.height,
                width = w,
                height = h,
                "resampling oversized image operand"
            );
            fitted = image.resample_nearest(w, h)?;
            &fitted
        };
        let (iw, ih) = (f64::from(image.width), f64::from(image.height));
        let placement = state.transform
            * Affine::translate((dst.x0, dst.y0))
            * Affine::scale_non_uniform(dst.width() / iw, dst.height() / ih);
        let paint = image.to_cpu_image()?;
        self.with_clip(state, |ctx| {
            ctx.set_transform(affine_to_cpu(placement));
            ctx.set_paint(paint);
            ctx.fill_rect(&vello_cpu::kurbo::Rect::new(0.0, 0.0, iw, ih));
        });
        Ok(())
    }

    /// Fill shaped glyphs with their first baseline at `origin`.
    pub(crate) fn draw_glyphs(
        &mut self,
        state: &CanvasState,
        origin: Point,
        text: &ShapedText,
        color: Argb,
    ) {
        if text.glyphs.is_empty() {
            return;
        }
        let placement = state.transform * Affine::translate(origin.to_vec2());
        self.with_clip(state, |ctx| {
            ctx.set_transform(affine_to_cpu(placement));
            ctx.set_paint(color.to_cpu_color());
            ctx.glyph_run(&text.font)
                .font_size(text.size_px)
                .fill_glyphs(text.glyphs.iter().cloned());
        });
    }

    fn with_clip(
        &mut self,
        state: &CanvasState,
        draw: impl FnOnce(&mut vello_cpu::RenderContext),
    ) {
        for clip in &state.clips {
            self.ctx.set_transform(affine_to_cpu(clip.transform));
            self.ctx.push_clip_layer(&rect_path(clip.rect));
        }
        draw(&mut self.ctx);
        for _ in &state.clips {
            self.ctx.pop_layer();
        }
    }

    /// Composite everything drawn over the background and read it back as straight RGBA8.
    pub(crate) fn snapshot(mut self) -> CanvasResult<FrameRGBA> {
        let len = usize::from(self.width) * usize::from(self.height) * 4;

        let mut pixmap = vello_cpu::Pixmap::new(self.width, self.height);
        self.ctx.flush();
        self.ctx.render_to_pixmap(&mut pixmap);

        let mut data = Vec::new();
        data.try_reserve_exact(len).map_err(|e| {
            tracing::error!(bytes = len, error = %e, "failed to allocate output pixels");
            CanvasError::allocation(format!("output buffer of {len} bytes: {e}"))
        })?;
        for _ in 0..usize::from(self.width) * usize::from(self.height) {
            data.extend_from_slice(&self.background);
        }
        premul_over_in_place(&mut data, pixmap.data_as_u8_slice());
        unpremultiply_rgba8_in_place(&mut data);

        Ok(FrameRGBA {
            width: u32::from(self.width),
            height: u32::from(self.height),
            data,
        })
    }
}

fn rect_path(rect: Rect) -> vello_cpu::kurbo::BezPath {
    use vello_cpu::kurbo::Shape;

    rect_to_cpu(rect).to_path(0.1)
}

#[cfg(test)]
#[path = "../../tests/unit/render/surface.rs"]
mod tests;
