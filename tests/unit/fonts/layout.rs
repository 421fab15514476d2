use super::*;

fn face() -> Typeface {
    let bytes = std::fs::read(concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/tests/data/fonts/DejaVuSans.ttf"
    ))
    .unwrap();
    Typeface::decode("sans", bytes).unwrap()
}

fn mono() -> Typeface {
    let bytes = std::fs::read(concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/tests/data/fonts/DejaVuSansMono.ttf"
    ))
    .unwrap();
    Typeface::decode("mono", bytes).unwrap()
}

fn advances(shaped: &ShapedText) -> Vec<f32> {
    shaped.glyphs.windows(2).map(|p| p[1].x - p[0].x).collect()
}

#[test]
fn shapes_glyphs_left_to_right_on_the_baseline() {
    let face = face();
    let mut engine = TextLayoutEngine::new();
    let shaped = engine.shape("Hi!", &face, 12.0).unwrap();

    assert_eq!(shaped.size_px, 12.0);
    assert_eq!(shaped.glyphs.len(), 3);
    for pair in shaped.glyphs.windows(2) {
        assert!(pair[1].x > pair[0].x);
    }
    for g in &shaped.glyphs {
        assert!(g.y.abs() < 1e-3, "glyph off baseline: {}", g.y);
    }
}

#[test]
fn empty_text_has_no_glyphs() {
    let face = face();
    let mut engine = TextLayoutEngine::new();
    let shaped = engine.shape("", &face, 12.0).unwrap();
    assert!(shaped.glyphs.is_empty());
}

#[test]
fn typeface_is_loaded_once_per_engine() {
    let face = face();
    let mut engine = TextLayoutEngine::new();
    engine.shape("a", &face, 10.0).unwrap();
    engine.shape("b", &face, 20.0).unwrap();
    assert_eq!(engine.loaded.len(), 1);
}

#[test]
fn each_typeface_shapes_against_a_collection_of_its_own() {
    let sans = face();
    let sans_again = Typeface::decode("sans-copy", sans.bytes().to_vec()).unwrap();
    let mono = mono();
    let mut engine = TextLayoutEngine::new();
    engine.shape("x", &sans, 12.0).unwrap();
    engine.shape("x", &sans_again, 12.0).unwrap();
    engine.shape("x", &mono, 12.0).unwrap();
    assert_eq!(engine.loaded.len(), 3);

    for loaded in engine.loaded.values_mut() {
        let collection = &mut loaded.font_ctx.collection;
        assert_eq!(collection.family_names().count(), 1);
        let id = collection.family_id(&loaded.family).unwrap();
        assert_eq!(collection.family(id).unwrap().fonts().len(), 1);
    }
}

#[test]
fn shaping_uses_the_requested_face_after_others_are_loaded() {
    let sans = face();
    let mono = mono();

    let alone = TextLayoutEngine::new().shape("il WW", &mono, 16.0).unwrap();

    let mut engine = TextLayoutEngine::new();
    let proportional = engine.shape("il WW", &sans, 16.0).unwrap();
    let shaped = engine.shape("il WW", &mono, 16.0).unwrap();

    assert_eq!(shaped.font, mono.font_data().clone());
    let ids = |s: &ShapedText| s.glyphs.iter().map(|g| g.id).collect::<Vec<_>>();
    assert_eq!(ids(&shaped), ids(&alone));
    assert_eq!(advances(&shaped), advances(&alone));

    let widths = advances(&shaped);
    assert!(widths.iter().all(|w| (w - widths[0]).abs() < 1e-3));
    let widths = advances(&proportional);
    assert!(widths.iter().any(|w| (w - widths[0]).abs() > 1.0));
}
