use std::sync::{LazyLock, PoisonError, RwLock};

use crate::encode::image::{EncodedImage, OutputFormat, encode_frame};
use crate::fonts::registry::TypefaceRegistry;
use crate::foundation::error::CanvasResult;
use crate::ops::wire::OperationList;
use crate::render::frame::FrameRGBA;
use crate::render::interpreter::Interpreter;

/// Environment variable read by [`RenderOpts::from_env`].
pub const FORMAT_ENV: &str = "PIXCANVAS_FORMAT";

/// Output options for [`render`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderOpts {
    /// Container for the encoded image.
    pub format: OutputFormat,
}

impl RenderOpts {
    /// Defaults, with the format overridden by `PIXCANVAS_FORMAT` when it names a known one.
    pub fn from_env() -> Self {
        Self::with_format_override(std::env::var(FORMAT_ENV).ok().as_deref())
    }

    fn with_format_override(value: Option<&str>) -> Self {
        let mut opts = Self::default();
        if let Some(v) = value {
            match v.parse() {
                Ok(format) => opts.format = format,
                Err(err) => {
                    tracing::warn!(var = FORMAT_ENV, error = %err, "ignoring output format override")
                }
            }
        }
        opts
    }
}

/// Replay an encoded operation list onto a fresh canvas and return its pixels.
///
/// Fails on malformed operation bytes, undecodable image operands, and allocation failure.
/// No partial frame is returned on failure.
#[tracing::instrument(skip(ops, registry), fields(ops_len = ops.len()))]
pub fn render_frame(ops: &[u8], registry: &TypefaceRegistry) -> CanvasResult<FrameRGBA> {
    let list = OperationList::parse(ops)?;
    Interpreter::new(registry).run(list)
}

/// [`render_frame`], then encode the result losslessly.
pub fn render(
    ops: &[u8],
    registry: &TypefaceRegistry,
    opts: &RenderOpts,
) -> CanvasResult<EncodedImage> {
    let frame = render_frame(ops, registry)?;
    encode_frame(&frame, opts.format)
}

static REGISTRY: LazyLock<RwLock<TypefaceRegistry>> =
    LazyLock::new(|| RwLock::new(TypefaceRegistry::new()));

/// Render against the process-wide typeface registry.
///
/// Returns the encoded lossless WebP bytes, or `None` if anything failed. The failure is
/// logged; the caller only sees that no image was produced.
pub fn canvas_draw(ops: &[u8]) -> Option<Vec<u8>> {
    let registry = REGISTRY.read().unwrap_or_else(PoisonError::into_inner);
    match render(ops, &registry, &RenderOpts::default()) {
        Ok(image) => Some(image.into_bytes()),
        Err(err) => {
            tracing::error!(error = %err, "canvas render aborted");
            None
        }
    }
}

/// Add a typeface to the process-wide registry under `alias`.
///
/// Bytes that do not decode as a font are ignored.
pub fn canvas_register_typeface(bytes: &[u8], alias: &str) {
    REGISTRY
        .write()
        .unwrap_or_else(PoisonError::into_inner)
        .register(bytes, alias);
}

#[cfg(test)]
#[path = "../tests/unit/api.rs"]
mod tests;
