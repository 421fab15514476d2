use super::*;
use crate::foundation::core::Argb;
use crate::ops::builder::OperationListBuilder;

#[test]
fn env_override_parsing() {
    assert_eq!(RenderOpts::with_format_override(None).format, OutputFormat::Webp);
    assert_eq!(
        RenderOpts::with_format_override(Some("png")).format,
        OutputFormat::Png
    );
    assert_eq!(
        RenderOpts::with_format_override(Some("tiff")).format,
        OutputFormat::Webp
    );
}

#[test]
fn render_uses_requested_format() {
    let mut b = OperationListBuilder::new();
    b.set_color(Argb::new(255, 0, 128, 0)).clear();
    let ops = b.finish().unwrap();

    let png = render(
        &ops,
        &TypefaceRegistry::new(),
        &RenderOpts {
            format: OutputFormat::Png,
        },
    )
    .unwrap();
    assert_eq!(
        ::image::guess_format(&png.bytes).unwrap(),
        ::image::ImageFormat::Png
    );
}

#[test]
fn malformed_ops_fail_render_frame() {
    assert!(render_frame(b"PXCV", &TypefaceRegistry::new()).is_err());
    assert!(canvas_draw(b"garbage").is_none());
}
