use std::str::FromStr;

use ::image::{ExtendedColorType, ImageEncoder};

use crate::foundation::error::{CanvasError, CanvasResult};
use crate::render::frame::FrameRGBA;

/// Lossless still-image container for rendered canvases.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Lossless WebP.
    #[default]
    Webp,
    /// PNG.
    Png,
}

impl OutputFormat {
    /// Lowercase name, also accepted by [`FromStr`].
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Webp => "webp",
            Self::Png => "png",
        }
    }

    /// Conventional file extension.
    pub fn extension(self) -> &'static str {
        self.as_str()
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputFormat {
    type Err = CanvasError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "webp" => Ok(Self::Webp),
            "png" => Ok(Self::Png),
            other => Err(CanvasError::validation(format!(
                "unknown output format '{other}' (expected webp or png)"
            ))),
        }
    }
}

/// Encoded image bytes, owned by the caller.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EncodedImage {
    /// Encoded file contents.
    pub bytes: Vec<u8>,
    /// Container the bytes are encoded in.
    pub format: OutputFormat,
}

impl EncodedImage {
    /// Encoded length in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Return `true` when no bytes were produced.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Give up ownership of the encoded bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}

/// Encode a straight-alpha frame without loss.
pub fn encode_frame(frame: &FrameRGBA, format: OutputFormat) -> CanvasResult<EncodedImage> {
    let expected = (frame.width as usize) * (frame.height as usize) * 4;
    if frame.data.len() != expected {
        return Err(CanvasError::encode(format!(
            "frame data is {} bytes, expected {expected} for {}x{}",
            frame.data.len(),
            frame.width,
            frame.height
        )));
    }

    let mut bytes = Vec::new();
    let res = match format {
        OutputFormat::Webp => ::image::codecs::webp::WebPEncoder::new_lossless(&mut bytes)
            .write_image(&frame.data, frame.width, frame.height, ExtendedColorType::Rgba8),
        OutputFormat::Png => ::image::codecs::png::PngEncoder::new(&mut bytes).write_image(
            &frame.data,
            frame.width,
            frame.height,
            ExtendedColorType::Rgba8,
        ),
    };
    if let Err(e) = res {
        tracing::error!(%format, error = %e, "failed to encode canvas");
        return Err(CanvasError::encode(format!("{format}: {e}")));
    }

    Ok(EncodedImage { bytes, format })
}

#[cfg(test)]
#[path = "../../tests/unit/encode/image.rs"]
mod tests;
