use super::*;

#[test]
fn mul_div255_rounds_to_nearest() {
    assert_eq!(mul_div255_u8(255, 255), 255);
    assert_eq!(mul_div255_u8(0, 255), 0);
    assert_eq!(mul_div255_u8(128, 255), 128);
    assert_eq!(mul_div255_u8(100, 128), ((100u16 * 128 + 127) / 255) as u8);
}

#[test]
fn premul_then_unpremul_is_identity_for_opaque_and_clears_transparent() {
    let mut px = vec![10, 20, 30, 255, 200, 100, 50, 0];
    premultiply_rgba8_in_place(&mut px);
    assert_eq!(&px[..4], &[10, 20, 30, 255]);
    assert_eq!(&px[4..], &[0, 0, 0, 0]);

    unpremultiply_rgba8_in_place(&mut px);
    assert_eq!(&px[..4], &[10, 20, 30, 255]);
    assert_eq!(&px[4..], &[0, 0, 0, 0]);
}

#[test]
fn unpremultiply_half_alpha() {
    let mut px = premul_rgba8([255, 0, 128, 128]).to_vec();
    unpremultiply_rgba8_in_place(&mut px);
    assert_eq!(px[0], 255);
    assert_eq!(px[1], 0);
    assert!((i16::from(px[2]) - 128).abs() <= 1);
    assert_eq!(px[3], 128);
}

#[test]
fn premul_over_opaque_source_replaces_destination() {
    let mut dst = vec![1, 2, 3, 255];
    premul_over_in_place(&mut dst, &[9, 8, 7, 255]);
    assert_eq!(dst, vec![9, 8, 7, 255]);
}

#[test]
fn premul_over_transparent_source_keeps_destination() {
    let mut dst = vec![1, 2, 3, 255];
    premul_over_in_place(&mut dst, &[0, 0, 0, 0]);
    assert_eq!(dst, vec![1, 2, 3, 255]);
}

#[test]
fn premul_over_half_alpha_blends() {
    let mut dst = vec![0, 0, 255, 255];
    let src = premul_rgba8([255, 0, 0, 128]);
    premul_over_in_place(&mut dst, &src);
    assert_eq!(dst[3], 255);
    assert!(dst[0] >= 127 && dst[0] <= 129);
    assert!(dst[2] >= 126 && dst[2] <= 128);
}
