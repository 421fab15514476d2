use super::*;

#[test]
fn argb_channel_order_and_premul() {
    let c = Argb::new(128, 255, 0, 0);
    assert_eq!(c.to_rgba8(), [255, 0, 0, 128]);
    assert_eq!(c.to_premul_rgba8(), [128, 0, 0, 128]);
    assert_eq!(Argb::default(), Argb::BLACK);
    assert_eq!(Argb::TRANSPARENT.to_premul_rgba8(), [0, 0, 0, 0]);
}

#[test]
fn bezpath_conversion_preserves_elements() {
    let mut p = BezPath::new();
    p.move_to((1.0, 2.0));
    p.line_to((3.0, 4.0));
    p.quad_to((5.0, 6.0), (7.0, 8.0));
    p.curve_to((9.0, 10.0), (11.0, 12.0), (13.0, 14.0));
    p.close_path();

    let cpu = bezpath_to_cpu(&p);
    assert_eq!(cpu.elements().len(), p.elements().len());
}

#[test]
fn affine_conversion_preserves_coeffs() {
    let a = Affine::translate((3.0, 4.0)) * Affine::scale(2.0);
    assert_eq!(affine_to_cpu(a).as_coeffs(), a.as_coeffs());
}
