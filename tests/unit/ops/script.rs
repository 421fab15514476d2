use super::*;
use crate::ops::wire::OperationList;

#[test]
fn parses_tagged_operations() {
    let json = r#"{ "operations": [
        { "op": "set_color", "r": 255, "g": 0, "b": 0 },
        { "op": "clear" },
        { "op": "draw_pixel", "x": 3, "y": 4 },
        { "op": "set_font_face", "name": "Sans", "size": 10 }
    ] }"#;
    let script = CanvasScript::from_reader(json.as_bytes()).unwrap();
    assert_eq!(script.operations.len(), 4);
    assert_eq!(
        script.operations[0],
        ScriptOp::SetColor {
            a: 255,
            r: 255,
            g: 0,
            b: 0
        }
    );
    assert_eq!(script.operations[1], ScriptOp::Clear);
}

#[test]
fn unknown_fields_and_ops_are_rejected() {
    let bad_field = r#"{ "operations": [ { "op": "clear", "color": 1 } ] }"#;
    assert!(matches!(
        CanvasScript::from_reader(bad_field.as_bytes()),
        Err(CanvasError::Validation(_))
    ));
    let bad_op = r#"{ "operations": [ { "op": "stroke_path" } ] }"#;
    assert!(CanvasScript::from_reader(bad_op.as_bytes()).is_err());
}

#[test]
fn to_wire_inlines_image_files() {
    let dir = std::env::temp_dir().join(format!("pixcanvas_script_{}", std::process::id()));
    std::fs::create_dir_all(dir.join("img")).unwrap();
    let img = image::RgbaImage::from_pixel(2, 2, image::Rgba([0, 255, 0, 255]));
    img.save(dir.join("img/dot.png")).unwrap();

    let script = CanvasScript {
        operations: vec![
            ScriptOp::Push,
            ScriptOp::DrawImage {
                x: 1.0,
                y: 1.0,
                width: 4.0,
                height: 4.0,
                path: "./img/dot.png".to_string(),
            },
            ScriptOp::Pop,
        ],
    };
    let bytes = script.to_wire(&dir).unwrap();
    let ops: Vec<_> = OperationList::parse(&bytes)
        .unwrap()
        .iter()
        .collect::<CanvasResult<_>>()
        .unwrap();
    assert_eq!(ops.len(), 3);
    let Operation::DrawImage { image: data, .. } = ops[1] else {
        panic!("expected DrawImage, got {:?}", ops[1]);
    };
    assert_eq!(data, std::fs::read(dir.join("img/dot.png")).unwrap().as_slice());

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn missing_image_file_is_reported() {
    let script = CanvasScript {
        operations: vec![ScriptOp::DrawImage {
            x: 0.0,
            y: 0.0,
            width: 1.0,
            height: 1.0,
            path: "definitely_missing.png".to_string(),
        }],
    };
    let err = script.to_wire(std::env::temp_dir()).unwrap_err();
    assert!(err.to_string().contains("definitely_missing.png"));
}

#[test]
fn rel_path_normalization() {
    assert_eq!(normalize_rel_path("a/./b.png").unwrap(), "a/b.png");
    assert_eq!(normalize_rel_path("a\\b.png").unwrap(), "a/b.png");
    assert!(normalize_rel_path("/abs.png").is_err());
    assert!(normalize_rel_path("../up.png").is_err());
    assert!(normalize_rel_path("").is_err());
    assert!(normalize_rel_path("./").is_err());
}

#[test]
fn drive_prefixed_paths_are_rejected() {
    for path in ["C:/x.png", "c:\\x.png", "z:x.png"] {
        let err = normalize_rel_path(path).unwrap_err();
        assert!(matches!(err, CanvasError::Validation(_)), "{path}: {err}");
    }
    assert_eq!(normalize_rel_path("img/c:x.png").unwrap(), "img/c:x.png");
}
