use std::borrow::Cow;
use std::collections::HashMap;
use std::collections::hash_map::Entry;

use crate::fonts::registry::Typeface;
use crate::foundation::error::{CanvasError, CanvasResult};

/// Glyphs of one shaped string, positioned relative to the first line's baseline origin.
#[derive(Clone, Debug)]
pub(crate) struct ShapedText {
    pub(crate) font: vello_cpu::peniko::FontData,
    pub(crate) size_px: f32,
    pub(crate) glyphs: Vec<vello_cpu::Glyph>,
}

/// Font collection holding exactly one typeface, so shaping cannot substitute another face
/// that happens to share its family name.
struct LoadedFace {
    font_ctx: parley::FontContext,
    family: String,
}

/// Per-render Parley shaping state.
///
/// Typefaces are loaded on first use, each into its own collection, so a render only pays for
/// the faces it actually draws with.
pub(crate) struct TextLayoutEngine {
    layout_ctx: parley::LayoutContext<()>,
    loaded: HashMap<u64, LoadedFace>,
}

impl Default for TextLayoutEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl TextLayoutEngine {
    /// Construct a layout engine that only sees explicitly loaded typefaces.
    pub(crate) fn new() -> Self {
        Self {
            layout_ctx: parley::LayoutContext::new(),
            loaded: HashMap::new(),
        }
    }

    fn load(face: &Typeface) -> CanvasResult<LoadedFace> {
        let mut font_ctx = parley::FontContext {
            collection: parley::fontique::Collection::new(parley::fontique::CollectionOptions {
                shared: false,
                system_fonts: false,
                ..Default::default()
            }),
            source_cache: parley::fontique::SourceCache::default(),
        };
        let families = font_ctx
            .collection
            .register_fonts(parley::fontique::Blob::new(face.shared_bytes()), None);
        let family_id = families.first().map(|(id, _)| *id).ok_or_else(|| {
            CanvasError::validation(format!("typeface '{}' has no font families", face.alias()))
        })?;
        let family = font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| CanvasError::validation("registered font family has no name"))?
            .to_string();
        Ok(LoadedFace { font_ctx, family })
    }

    /// Shape `text` as a single paragraph without wrapping.
    pub(crate) fn shape(
        &mut self,
        text: &str,
        face: &Typeface,
        size_px: f32,
    ) -> CanvasResult<ShapedText> {
        let loaded = match self.loaded.entry(face.id()) {
            Entry::Occupied(e) => e.into_mut(),
            Entry::Vacant(e) => e.insert(Self::load(face)?),
        };

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut loaded.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(Cow::Owned(loaded.family.clone())),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px));

        let mut layout: parley::Layout<()> = builder.build(text);
        layout.break_all_lines(None);

        let baseline = layout
            .lines()
            .next()
            .map(|line| line.metrics().baseline)
            .unwrap_or(0.0);

        let mut glyphs = Vec::new();
        for line in layout.lines() {
            for item in line.items() {
                let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                    continue;
                };
                glyphs.extend(run.positioned_glyphs().map(|g| vello_cpu::Glyph {
                    id: g.id,
                    x: g.x,
                    y: g.y - baseline,
                }));
            }
        }

        Ok(ShapedText {
            font: face.font_data().clone(),
            size_px,
            glyphs,
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/fonts/layout.rs"]
mod tests;
