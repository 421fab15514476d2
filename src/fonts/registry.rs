use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, LazyLock};

use crate::foundation::error::{CanvasError, CanvasResult};

/// A decoded typeface registered under a caller-chosen alias.
#[derive(Clone)]
pub struct Typeface {
    id: u64,
    alias: String,
    family_name: String,
    bytes: Arc<Vec<u8>>,
    font: vello_cpu::peniko::FontData,
}

impl std::fmt::Debug for Typeface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Typeface")
            .field("alias", &self.alias)
            .field("family_name", &self.family_name)
            .field("len", &self.bytes.len())
            .finish()
    }
}

impl Typeface {
    /// Decode font bytes, reading the family name from the font itself.
    pub fn decode(alias: impl Into<String>, bytes: Vec<u8>) -> CanvasResult<Self> {
        let mut collection =
            parley::fontique::Collection::new(parley::fontique::CollectionOptions {
                shared: false,
                system_fonts: false,
                ..Default::default()
            });
        let bytes = Arc::new(bytes);
        let families =
            collection.register_fonts(parley::fontique::Blob::new(bytes.clone()), None);
        let family_id = families
            .first()
            .map(|(id, _)| *id)
            .ok_or_else(|| CanvasError::validation("no font families found in typeface bytes"))?;
        let family_name = collection
            .family_name(family_id)
            .ok_or_else(|| CanvasError::validation("registered font family has no name"))?
            .to_string();

        let font =
            vello_cpu::peniko::FontData::new(vello_cpu::peniko::Blob::new(bytes.clone()), 0);
        static NEXT_ID: AtomicU64 = AtomicU64::new(0);
        Ok(Self {
            id: NEXT_ID.fetch_add(1, Ordering::Relaxed),
            alias: alias.into(),
            family_name,
            bytes,
            font,
        })
    }

    /// Alias this typeface was registered under.
    pub fn alias(&self) -> &str {
        &self.alias
    }

    /// Family name declared by the font file.
    pub fn family_name(&self) -> &str {
        &self.family_name
    }

    /// Raw font file bytes.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Process-unique identity of this decoded face.
    pub(crate) fn id(&self) -> u64 {
        self.id
    }

    pub(crate) fn shared_bytes(&self) -> Arc<Vec<u8>> {
        self.bytes.clone()
    }

    pub(crate) fn font_data(&self) -> &vello_cpu::peniko::FontData {
        &self.font
    }
}

/// Alias-keyed store of typefaces available to `SetFontFace`.
///
/// Entries are only ever added. An alias keeps resolving to the first typeface registered under
/// it; later registrations under the same alias are kept and still match by family name. The
/// registry is a plain owned value: mutation requires `&mut`, so callers sharing one across
/// threads must wrap it in a lock.
#[derive(Debug, Clone, Default)]
pub struct TypefaceRegistry {
    faces: Vec<Arc<Typeface>>,
    by_alias: HashMap<String, usize>,
}

impl TypefaceRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode `bytes` and register the result under `alias`.
    ///
    /// Bytes that are not a usable font are dropped without registering anything.
    pub fn register(&mut self, bytes: &[u8], alias: &str) {
        if let Err(err) = self.try_register(bytes, alias) {
            tracing::debug!(alias, error = %err, "dropping undecodable typeface");
        }
    }

    /// Like [`TypefaceRegistry::register`], but reports decode failures.
    pub fn try_register(&mut self, bytes: &[u8], alias: &str) -> CanvasResult<Arc<Typeface>> {
        let face = Arc::new(Typeface::decode(alias, bytes.to_vec())?);
        self.by_alias.entry(alias.to_string()).or_insert(self.faces.len());
        self.faces.push(face.clone());
        tracing::debug!(alias, family = face.family_name(), "registered typeface");
        Ok(face)
    }

    /// Number of registered typefaces.
    pub fn len(&self) -> usize {
        self.faces.len()
    }

    /// Return `true` when nothing has been registered.
    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    /// Exact alias lookup.
    pub fn get(&self, alias: &str) -> Option<&Arc<Typeface>> {
        self.by_alias.get(alias).map(|&idx| &self.faces[idx])
    }

    /// Nearest match for a requested family.
    ///
    /// Tries, in order: exact alias, case-insensitive alias, case-insensitive family name
    /// declared by the font. Returns `None` when nothing matches.
    pub fn match_family(&self, name: &str) -> Option<&Arc<Typeface>> {
        self.get(name)
            .or_else(|| self.faces.iter().find(|f| f.alias.eq_ignore_ascii_case(name)))
            .or_else(|| {
                self.faces
                    .iter()
                    .find(|f| f.family_name.eq_ignore_ascii_case(name))
            })
    }

    /// Typeface used when nothing else resolves: the first one registered, or the bundled
    /// engine face while the registry is empty.
    pub fn default_typeface(&self) -> Option<&Arc<Typeface>> {
        self.faces.first().or_else(|| engine_typeface())
    }

    /// Resolve `name`, falling back to [`TypefaceRegistry::default_typeface`].
    pub fn resolve(&self, name: &str) -> Option<&Arc<Typeface>> {
        self.match_family(name).or_else(|| {
            tracing::debug!(family = name, "no typeface matches family, using default");
            self.default_typeface()
        })
    }
}

static ENGINE_FONT: &[u8] = include_bytes!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/assets/fonts/DejaVuSans.ttf"
));

static ENGINE_TYPEFACE: LazyLock<Option<Arc<Typeface>>> = LazyLock::new(|| {
    Typeface::decode("", ENGINE_FONT.to_vec())
        .inspect_err(|err| tracing::error!(error = %err, "bundled typeface failed to decode"))
        .ok()
        .map(Arc::new)
});

/// Built-in face used when no typeface has been registered.
pub(crate) fn engine_typeface() -> Option<&'static Arc<Typeface>> {
    ENGINE_TYPEFACE.as_ref()
}

#[cfg(test)]
#[path = "../../tests/unit/fonts/registry.rs"]
mod tests;
