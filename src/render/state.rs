use std::sync::Arc;

use smallvec::SmallVec;

use crate::fonts::registry::{Typeface, TypefaceRegistry};
use crate::foundation::core::{Affine, Argb, Rect};

/// Font size used until the first `SetFontFace`.
pub(crate) const DEFAULT_FONT_SIZE: i32 = 12;

/// Fill paint. Drawing is fill-only with square pixel coverage; `anti_alias` stays off so
/// output is pixel-exact.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct PaintState {
    pub(crate) color: Argb,
    pub(crate) anti_alias: bool,
}

impl Default for PaintState {
    fn default() -> Self {
        Self {
            color: Argb::BLACK,
            anti_alias: false,
        }
    }
}

#[derive(Clone, Debug)]
pub(crate) struct FontState {
    pub(crate) face: Option<Arc<Typeface>>,
    pub(crate) size: i32,
}

impl FontState {
    pub(crate) fn initial(registry: &TypefaceRegistry) -> Self {
        Self {
            face: registry.default_typeface().cloned(),
            size: DEFAULT_FONT_SIZE,
        }
    }

    pub(crate) fn select(&mut self, registry: &TypefaceRegistry, name: &str, size: i32) {
        self.face = registry.resolve(name).cloned();
        self.size = size;
    }
}

/// A clip rectangle captured together with the transform that was active when it was set.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct ClipRect {
    pub(crate) rect: Rect,
    pub(crate) transform: Affine,
}

/// Transform plus clip region: the part of the drawing state that `Push`/`Pop` checkpoint.
///
/// The visible region is the intersection of every entry in `clips`.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct CanvasState {
    pub(crate) transform: Affine,
    pub(crate) clips: SmallVec<[ClipRect; 4]>,
}

impl Default for CanvasState {
    fn default() -> Self {
        Self {
            transform: Affine::IDENTITY,
            clips: SmallVec::new(),
        }
    }
}

#[derive(Debug, Default)]
pub(crate) struct TransformClipStack {
    current: CanvasState,
    saved: Vec<CanvasState>,
}

impl TransformClipStack {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn current(&self) -> &CanvasState {
        &self.current
    }

    pub(crate) fn depth(&self) -> usize {
        self.saved.len()
    }

    pub(crate) fn push(&mut self) {
        self.saved.push(self.current.clone());
    }

    /// Restore the last saved state. Returns `false`, leaving the state untouched, when
    /// nothing was saved.
    pub(crate) fn pop(&mut self) -> bool {
        match self.saved.pop() {
            Some(state) => {
                self.current = state;
                true
            }
            None => false,
        }
    }

    pub(crate) fn translate(&mut self, dx: f64, dy: f64) {
        self.concat(Affine::translate((dx, dy)));
    }

    /// Rotate about the current origin; `angle` in radians.
    pub(crate) fn rotate(&mut self, angle: f64) {
        self.concat(Affine::rotate(angle));
    }

    pub(crate) fn scale(&mut self, sx: f64, sy: f64) {
        self.concat(Affine::scale_non_uniform(sx, sy));
    }

    pub(crate) fn clip_rect(&mut self, rect: Rect) {
        self.current.clips.push(ClipRect {
            rect,
            transform: self.current.transform,
        });
    }

    fn concat(&mut self, m: Affine) {
        self.current.transform *= m;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/state.rs"]
mod tests;
