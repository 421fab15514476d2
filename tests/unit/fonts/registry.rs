use super::*;

fn sans() -> Vec<u8> {
    std::fs::read(concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/tests/data/fonts/DejaVuSans.ttf"
    ))
    .unwrap()
}

fn mono() -> Vec<u8> {
    std::fs::read(concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/tests/data/fonts/DejaVuSansMono.ttf"
    ))
    .unwrap()
}

#[test]
fn decode_reads_family_name() {
    let face = Typeface::decode("body", sans()).unwrap();
    assert_eq!(face.alias(), "body");
    assert_eq!(face.family_name(), "DejaVu Sans");
    assert!(!face.bytes().is_empty());
}

#[test]
fn garbage_bytes_are_dropped() {
    let mut reg = TypefaceRegistry::new();
    reg.register(b"not a font", "junk");
    assert!(reg.is_empty());
    assert!(reg.try_register(b"not a font", "junk").is_err());
    let fallback = reg.resolve("junk").unwrap();
    assert_eq!(fallback.alias(), "");
    assert_eq!(fallback.family_name(), "DejaVu Sans");
    assert!(Arc::ptr_eq(fallback, reg.default_typeface().unwrap()));
}

#[test]
fn resolution_order_and_default() {
    let mut reg = TypefaceRegistry::new();
    reg.register(&sans(), "Body");
    reg.register(&mono(), "code");
    assert_eq!(reg.len(), 2);

    assert_eq!(reg.get("code").unwrap().family_name(), "DejaVu Sans Mono");
    assert!(reg.get("CODE").is_none());
    assert_eq!(reg.match_family("CODE").unwrap().alias(), "code");
    assert_eq!(
        reg.match_family("dejavu sans mono").unwrap().alias(),
        "code"
    );
    assert_eq!(reg.default_typeface().unwrap().alias(), "Body");
    assert_eq!(reg.resolve("Comic Sans").unwrap().alias(), "Body");
}

#[test]
fn first_registration_under_an_alias_wins() {
    let mut reg = TypefaceRegistry::new();
    reg.register(&sans(), "a");
    reg.register(&mono(), "a");
    assert_eq!(reg.len(), 2);

    let a = reg.get("a").unwrap();
    assert_eq!(a.family_name(), "DejaVu Sans");
    assert!(Arc::ptr_eq(a, reg.default_typeface().unwrap()));
    assert_eq!(reg.resolve("A").unwrap().family_name(), "DejaVu Sans");

    let later = reg.match_family("DejaVu Sans Mono").unwrap();
    assert_eq!(later.alias(), "a");
    assert!(!Arc::ptr_eq(a, later));
}

#[test]
fn each_decode_gets_its_own_identity() {
    let a = Typeface::decode("a", sans()).unwrap();
    let b = Typeface::decode("a", sans()).unwrap();
    assert_ne!(a.id(), b.id());
    assert_eq!(a.clone().id(), a.id());
}
