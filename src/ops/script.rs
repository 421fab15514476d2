use std::fs::File;
use std::io::BufReader;
use std::path::{Component, Path};

use anyhow::Context;

use crate::foundation::core::Argb;
use crate::foundation::error::{CanvasError, CanvasResult};
use crate::ops::builder::OperationListBuilder;
use crate::ops::model::Operation;

/// Human-editable JSON form of an operation list.
///
/// ```json
/// { "operations": [
///     { "op": "set_color", "a": 255, "r": 0, "g": 0, "b": 64 },
///     { "op": "clear" },
///     { "op": "draw_image", "x": 0, "y": 0, "width": 16, "height": 16, "path": "icon.png" }
/// ] }
/// ```
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CanvasScript {
    /// Operations in replay order.
    pub operations: Vec<ScriptOp>,
}

/// One operation in a [`CanvasScript`].
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "op", rename_all = "snake_case", deny_unknown_fields)]
#[allow(missing_docs)]
pub enum ScriptOp {
    AddArc {
        x: f64,
        y: f64,
        radius: f64,
        start_angle: f64,
        end_angle: f64,
    },
    AddCircle {
        x: f64,
        y: f64,
        radius: f64,
    },
    AddLineTo {
        x: f64,
        y: f64,
    },
    AddRectangle {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    },
    Clear,
    ClipRectangle {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    },
    /// `path` is relative to the script's directory.
    DrawImage {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        path: String,
    },
    DrawPixel {
        x: i32,
        y: i32,
    },
    DrawString {
        x: f64,
        y: f64,
        text: String,
    },
    FillPath,
    Pop,
    Push,
    Rotate {
        angle: f64,
    },
    Scale {
        x: f64,
        y: f64,
    },
    SetColor {
        #[serde(default = "opaque")]
        a: u8,
        r: u8,
        g: u8,
        b: u8,
    },
    SetFontFace {
        name: String,
        size: i32,
    },
    Translate {
        dx: f64,
        dy: f64,
    },
}

fn opaque() -> u8 {
    255
}

impl CanvasScript {
    /// Parse a script from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> CanvasResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| CanvasError::validation(format!("parse canvas script JSON: {e}")))
    }

    /// Parse a script from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> CanvasResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            CanvasError::validation(format!("open canvas script '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Encode the script into wire bytes, reading image operands relative to `assets_root`.
    pub fn to_wire(&self, assets_root: impl AsRef<Path>) -> CanvasResult<Vec<u8>> {
        let root = assets_root.as_ref();
        let mut b = OperationListBuilder::new();
        for op in &self.operations {
            match op {
                ScriptOp::DrawImage {
                    x,
                    y,
                    width,
                    height,
                    path,
                } => {
                    let rel = normalize_rel_path(path)?;
                    let full = root.join(&rel);
                    let bytes = std::fs::read(&full)
                        .with_context(|| format!("read image operand '{}'", full.display()))?;
                    b.draw_image(*x, *y, *width, *height, &bytes);
                }
                other => {
                    b.push_op(&other.as_operation());
                }
            }
        }
        b.finish()
    }
}

impl ScriptOp {
    /// Borrow as a wire operation. Image operands are not inlined here; `DrawImage`
    /// maps to an empty image payload.
    fn as_operation(&self) -> Operation<'_> {
        match self {
            Self::AddArc {
                x,
                y,
                radius,
                start_angle,
                end_angle,
            } => Operation::AddArc {
                x: *x,
                y: *y,
                radius: *radius,
                start_angle: *start_angle,
                end_angle: *end_angle,
            },
            Self::AddCircle { x, y, radius } => Operation::AddCircle {
                x: *x,
                y: *y,
                radius: *radius,
            },
            Self::AddLineTo { x, y } => Operation::AddLineTo { x: *x, y: *y },
            Self::AddRectangle {
                x,
                y,
                width,
                height,
            } => Operation::AddRectangle {
                x: *x,
                y: *y,
                width: *width,
                height: *height,
            },
            Self::Clear => Operation::Clear,
            Self::ClipRectangle {
                x,
                y,
                width,
                height,
            } => Operation::ClipRectangle {
                x: *x,
                y: *y,
                width: *width,
                height: *height,
            },
            Self::DrawImage {
                x,
                y,
                width,
                height,
                ..
            } => Operation::DrawImage {
                x: *x,
                y: *y,
                width: *width,
                height: *height,
                image: &[],
            },
            Self::DrawPixel { x, y } => Operation::DrawPixel { x: *x, y: *y },
            Self::DrawString { x, y, text } => Operation::DrawString {
                x: *x,
                y: *y,
                text,
            },
            Self::FillPath => Operation::FillPath,
            Self::Pop => Operation::Pop,
            Self::Push => Operation::Push,
            Self::Rotate { angle } => Operation::Rotate { angle: *angle },
            Self::Scale { x, y } => Operation::Scale { x: *x, y: *y },
            Self::SetColor { a, r, g, b } => Operation::SetColor {
                color: Argb::new(*a, *r, *g, *b),
            },
            Self::SetFontFace { name, size } => Operation::SetFontFace { name, size: *size },
            Self::Translate { dx, dy } => Operation::Translate { dx: *dx, dy: *dy },
        }
    }
}

/// Resolve an image operand path against the script directory's namespace.
///
/// Either separator is accepted; the result is joined with `/` and has `.` segments removed.
/// Rooted paths, drive prefixes such as `C:` and `..` segments are rejected so an operand can
/// never name a file outside the script directory.
pub fn normalize_rel_path(source: &str) -> CanvasResult<String> {
    let unified = source.replace('\\', "/");
    if names_drive(&unified) {
        return Err(CanvasError::validation(format!(
            "image path '{source}' names a drive"
        )));
    }

    let mut segments = Vec::new();
    for component in Path::new(&unified).components() {
        match component {
            Component::Normal(seg) => segments.push(seg.to_string_lossy()),
            Component::CurDir => {}
            Component::ParentDir => {
                return Err(CanvasError::validation(format!(
                    "image path '{source}' leaves the script directory"
                )));
            }
            Component::RootDir | Component::Prefix(_) => {
                return Err(CanvasError::validation(format!(
                    "image path '{source}' must be relative"
                )));
            }
        }
    }
    if segments.is_empty() {
        return Err(CanvasError::validation("image path must name a file"));
    }
    Ok(segments.join("/"))
}

fn names_drive(path: &str) -> bool {
    let mut chars = path.chars();
    matches!(
        (chars.next(), chars.next()),
        (Some(letter), Some(':')) if letter.is_ascii_alphabetic()
    )
}

#[cfg(test)]
#[path = "../../tests/unit/ops/script.rs"]
mod tests;
