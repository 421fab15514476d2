use super::*;

fn checker() -> FrameRGBA {
    let mut data = Vec::new();
    for i in 0..6u8 {
        data.extend_from_slice(&[i * 40, 255 - i * 40, 7, if i % 2 == 0 { 255 } else { 128 }]);
    }
    FrameRGBA {
        width: 3,
        height: 2,
        data,
    }
}

#[test]
fn webp_is_lossless_and_default() {
    assert_eq!(OutputFormat::default(), OutputFormat::Webp);
    let frame = checker();
    let encoded = encode_frame(&frame, OutputFormat::Webp).unwrap();
    assert_eq!(encoded.format, OutputFormat::Webp);
    assert_eq!(&encoded.bytes[..4], b"RIFF");
    assert_eq!(&encoded.bytes[8..12], b"WEBP");

    let decoded = ::image::load_from_memory(&encoded.bytes).unwrap().to_rgba8();
    assert_eq!(decoded.dimensions(), (3, 2));
    assert_eq!(decoded.into_raw(), frame.data);
}

#[test]
fn png_round_trips_pixels() {
    let frame = checker();
    let encoded = encode_frame(&frame, OutputFormat::Png).unwrap();
    assert_eq!(encoded.len(), encoded.bytes.len());
    assert!(!encoded.is_empty());
    let decoded = ::image::load_from_memory_with_format(&encoded.bytes, ::image::ImageFormat::Png)
        .unwrap()
        .to_rgba8();
    assert_eq!(decoded.into_raw(), frame.data);
}

#[test]
fn mismatched_buffer_is_an_encode_error() {
    let mut frame = checker();
    frame.data.pop();
    assert!(matches!(
        encode_frame(&frame, OutputFormat::Png),
        Err(CanvasError::Encode(_))
    ));
}

#[test]
fn format_names() {
    assert_eq!("PNG".parse::<OutputFormat>().unwrap(), OutputFormat::Png);
    assert_eq!(" webp ".parse::<OutputFormat>().unwrap(), OutputFormat::Webp);
    assert!("gif".parse::<OutputFormat>().is_err());
    assert_eq!(OutputFormat::Png.to_string(), "png");
    assert_eq!(OutputFormat::Webp.extension(), "webp");
}
