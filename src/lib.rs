//! pixcanvas replays a compact binary list of canvas operations into a fixed-size image.
//!
//! A caller that has no rendering engine of its own describes a drawing as an operation list
//! (see [`OperationListBuilder`] or the JSON [`CanvasScript`]) and gets back a finished,
//! losslessly encoded 64x32 bitmap:
//!
//! - Register typefaces in a [`TypefaceRegistry`]
//! - Replay operations with [`render_frame`] (pixels) or [`render`] (encoded bytes)
//! - Or use the process-wide pair [`canvas_register_typeface`] / [`canvas_draw`]
//!
//! Rendering is aliased and never consults system fonts, so output depends only on the
//! operation bytes and the registry contents.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod api;
mod assets;
mod encode;
mod fonts;
mod foundation;
mod ops;
mod render;

pub use crate::api::{
    FORMAT_ENV, RenderOpts, canvas_draw, canvas_register_typeface, render, render_frame,
};
pub use crate::assets::decode::{PreparedImage, decode_image};
pub use crate::encode::image::{EncodedImage, OutputFormat, encode_frame};
pub use crate::fonts::registry::{Typeface, TypefaceRegistry};
pub use crate::foundation::core::{
    Affine, Argb, BezPath, CANVAS_HEIGHT, CANVAS_WIDTH, Point, Rect, Vec2,
};
pub use crate::foundation::error::{CanvasError, CanvasResult};
pub use crate::ops::builder::OperationListBuilder;
pub use crate::ops::model::{OpKind, Operation};
pub use crate::ops::script::{CanvasScript, ScriptOp, normalize_rel_path};
pub use crate::ops::wire::{MAGIC, OperationList, Operations, WIRE_VERSION};
pub use crate::render::frame::FrameRGBA;
