use std::sync::Arc;

use crate::foundation::error::{CanvasError, CanvasResult};
use crate::foundation::math::premultiply_rgba8_in_place;

/// Largest width or height a paint pixmap can hold.
pub(crate) const MAX_PIXMAP_SIDE: u32 = u16::MAX as u32;

/// Decoded raster image in premultiplied RGBA8 form.
#[derive(Clone, Debug)]
pub struct PreparedImage {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Pixel bytes in row-major premultiplied RGBA8.
    pub rgba8_premul: Arc<Vec<u8>>,
}

impl PreparedImage {
    /// Return `true` when the image has no pixels.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Return `true` when both sides fit a paint pixmap.
    pub(crate) fn fits_pixmap(&self) -> bool {
        self.width <= MAX_PIXMAP_SIDE && self.height <= MAX_PIXMAP_SIDE
    }

    /// Nearest-neighbour resample to `width` x `height`, sampling source pixels at the centers
    /// of destination pixels.
    pub(crate) fn resample_nearest(&self, width: u32, height: u32) -> CanvasResult<Self> {
        let len = (width as usize)
            .checked_mul(height as usize)
            .and_then(|n| n.checked_mul(4))
            .ok_or_else(|| CanvasError::allocation("resampled image size overflows usize"))?;
        let mut out = Vec::new();
        out.try_reserve_exact(len).map_err(|_| {
            CanvasError::allocation(format!("resample image to {width}x{height}"))
        })?;

        if !self.is_empty() {
            let stride = self.width as usize;
            for y in 0..height {
                let row = nearest_source(y, height, self.height) * stride;
                for x in 0..width {
                    let i = (row + nearest_source(x, width, self.width)) * 4;
                    out.extend_from_slice(&self.rgba8_premul[i..i + 4]);
                }
            }
        } else {
            out.resize(len, 0);
        }

        Ok(Self {
            width,
            height,
            rgba8_premul: Arc::new(out),
        })
    }

    pub(crate) fn to_cpu_image(&self) -> CanvasResult<vello_cpu::Image> {
        let w: u16 = self
            .width
            .try_into()
            .map_err(|_| CanvasError::image("image width exceeds u16"))?;
        let h: u16 = self
            .height
            .try_into()
            .map_err(|_| CanvasError::image("image height exceeds u16"))?;

        let mut pixels = Vec::<vello_cpu::peniko::color::PremulRgba8>::with_capacity(
            (self.width as usize) * (self.height as usize),
        );
        for px in self.rgba8_premul.chunks_exact(4) {
            pixels.push(vello_cpu::peniko::color::PremulRgba8::from_u8_array([
                px[0], px[1], px[2], px[3],
            ]));
        }
        let pixmap = vello_cpu::Pixmap::from_parts_with_opacity(pixels, w, h, true);

        Ok(vello_cpu::Image {
            image: vello_cpu::ImageSource::Pixmap(Arc::new(pixmap)),
            sampler: vello_cpu::peniko::ImageSampler {
                quality: vello_cpu::peniko::ImageQuality::Low,
                ..vello_cpu::peniko::ImageSampler::default()
            },
        })
    }
}

fn nearest_source(dst: u32, dst_len: u32, src_len: u32) -> usize {
    let src = (2 * u64::from(dst) + 1) * u64::from(src_len) / (2 * u64::from(dst_len));
    src.min(u64::from(src_len) - 1) as usize
}

/// Decode encoded image bytes and convert to premultiplied RGBA8.
///
/// Both format detection and pixel extraction failures are reported as [`CanvasError::Image`].
pub fn decode_image(bytes: &[u8]) -> CanvasResult<PreparedImage> {
    let format = image::guess_format(bytes)
        .map_err(|e| CanvasError::image(format!("unrecognized image format: {e}")))?;
    let dyn_img = image::load_from_memory_with_format(bytes, format)
        .map_err(|e| CanvasError::image(format!("decode {format:?} image: {e}")))?;
    let rgba = dyn_img.to_rgba8();
    let (width, height) = rgba.dimensions();

    let mut rgba8_premul = rgba.into_raw();
    premultiply_rgba8_in_place(&mut rgba8_premul);

    Ok(PreparedImage {
        width,
        height,
        rgba8_premul: Arc::new(rgba8_premul),
    })
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
