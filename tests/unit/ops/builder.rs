use super::*;
use crate::ops::wire::OperationList;

#[test]
fn header_carries_patched_count() {
    let mut b = OperationListBuilder::new();
    assert!(b.is_empty());
    b.push().pop().clear();
    assert_eq!(b.len(), 3);

    let bytes = b.finish().unwrap();
    assert_eq!(&bytes[..4], b"PXCV");
    assert_eq!(bytes[4], WIRE_VERSION);
    assert_eq!(u32::from_le_bytes(bytes[5..9].try_into().unwrap()), 3);
    assert_eq!(&bytes[HEADER_LEN..], &[11, 10, 4]);
}

#[test]
fn set_color_writes_alpha_first() {
    let mut b = OperationListBuilder::new();
    b.set_color(Argb::new(1, 2, 3, 4));
    let bytes = b.finish().unwrap();
    assert_eq!(&bytes[HEADER_LEN..], &[14, 1, 2, 3, 4]);
}

#[test]
fn every_helper_decodes_back_to_its_operation() {
    let mut b = OperationListBuilder::new();
    b.add_arc(1.0, 2.0, 3.0, 0.0, 1.0)
        .add_circle(4.0, 5.0, 6.0)
        .add_line_to(7.0, 8.0)
        .add_rectangle(0.0, 0.0, 2.0, 2.0)
        .clip_rectangle(1.0, 1.0, 3.0, 3.0)
        .rotate(0.5)
        .scale(2.0, 3.0);
    let bytes = b.finish().unwrap();

    let kinds: Vec<OpKind> = OperationList::parse(&bytes)
        .unwrap()
        .iter()
        .map(|op| op.unwrap().kind())
        .collect();
    assert_eq!(
        kinds,
        vec![
            OpKind::AddArc,
            OpKind::AddCircle,
            OpKind::AddLineTo,
            OpKind::AddRectangle,
            OpKind::ClipRectangle,
            OpKind::Rotate,
            OpKind::Scale,
        ]
    );
}

#[test]
fn draw_rgba_image_embeds_png_at_natural_size() {
    let img = image::RgbaImage::from_pixel(3, 2, image::Rgba([1, 2, 3, 255]));
    let mut b = OperationListBuilder::new();
    b.draw_rgba_image(5.0, 6.0, &img).unwrap();
    let bytes = b.finish().unwrap();

    let op = OperationList::parse(&bytes)
        .unwrap()
        .iter()
        .next()
        .unwrap()
        .unwrap();
    let Operation::DrawImage {
        x,
        y,
        width,
        height,
        image: data,
    } = op
    else {
        panic!("expected DrawImage, got {op:?}");
    };
    assert_eq!((x, y, width, height), (5.0, 6.0, 3.0, 2.0));
    assert_eq!(
        image::guess_format(data).unwrap(),
        image::ImageFormat::Png
    );
}

#[test]
fn finish_reports_overflowed_fields_instead_of_truncating() {
    let mut b = OperationListBuilder::new();
    b.draw_string(0.0, 0.0, "ok");
    b.overflowed("operand of 4294967296 bytes exceeds the 4294967295 byte limit".to_string());
    b.overflowed("later overflow".to_string());

    let err = b.finish().unwrap_err();
    assert!(matches!(err, CanvasError::Validation(_)));
    assert!(err.to_string().contains("4294967296 bytes"));
}

#[test]
fn record_count_overflow_is_reported() {
    let mut b = OperationListBuilder::new();
    b.count = u32::MAX;
    b.push();
    assert!(matches!(b.finish(), Err(CanvasError::Validation(_))));
}

#[test]
fn string_operands_are_written_whole() {
    let text = "x".repeat(70_000);
    let mut b = OperationListBuilder::new();
    b.draw_string(1.0, 2.0, &text);
    let bytes = b.finish().unwrap();

    let op = OperationList::parse(&bytes)
        .unwrap()
        .iter()
        .next()
        .unwrap()
        .unwrap();
    assert_eq!(
        op,
        Operation::DrawString {
            x: 1.0,
            y: 2.0,
            text: &text
        }
    );
}
