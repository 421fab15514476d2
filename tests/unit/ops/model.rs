use super::*;

#[test]
fn tags_follow_declaration_order() {
    for (i, kind) in OpKind::ALL.iter().enumerate() {
        assert_eq!(usize::from(kind.tag()), i);
        assert_eq!(OpKind::from_tag(kind.tag()), Some(*kind));
    }
    assert_eq!(OpKind::from_tag(17), None);
    assert_eq!(OpKind::from_tag(u8::MAX), None);
}

#[test]
fn kind_matches_variant() {
    assert_eq!(Operation::Clear.kind(), OpKind::Clear);
    assert_eq!(
        Operation::SetColor {
            color: Argb::BLACK
        }
        .kind(),
        OpKind::SetColor
    );
    assert_eq!(
        Operation::DrawImage {
            x: 0.0,
            y: 0.0,
            width: 1.0,
            height: 1.0,
            image: &[],
        }
        .kind(),
        OpKind::DrawImage
    );
    assert_eq!(
        Operation::Translate { dx: 1.0, dy: 2.0 }.kind().tag(),
        16
    );
}
