use crate::foundation::core::Argb;

/// One decoded canvas operation.
///
/// Variable-length payloads borrow from the operation byte buffer, so decoding never copies
/// image bytes or text. Coordinates and lengths are in canvas user space; angles are radians.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Operation<'a> {
    /// Append an arc of the circle centered at `(x, y)` to the current path.
    AddArc {
        /// Center x.
        x: f64,
        /// Center y.
        y: f64,
        /// Radius.
        radius: f64,
        /// Start angle in radians.
        start_angle: f64,
        /// End angle in radians.
        end_angle: f64,
    },
    /// Append a full circle contour to the current path.
    AddCircle {
        /// Center x.
        x: f64,
        /// Center y.
        y: f64,
        /// Radius.
        radius: f64,
    },
    /// Append a line from the current point to `(x, y)`.
    AddLineTo {
        /// Target x.
        x: f64,
        /// Target y.
        y: f64,
    },
    /// Append an axis-aligned rectangle contour to the current path.
    AddRectangle {
        /// Left edge.
        x: f64,
        /// Top edge.
        y: f64,
        /// Width.
        width: f64,
        /// Height.
        height: f64,
    },
    /// Replace every pixel of the surface with the current color.
    Clear,
    /// Intersect the clip with a rectangle under the current transform.
    ClipRectangle {
        /// Left edge.
        x: f64,
        /// Top edge.
        y: f64,
        /// Width.
        width: f64,
        /// Height.
        height: f64,
    },
    /// Decode an encoded image and draw it into a destination rectangle.
    DrawImage {
        /// Destination left edge.
        x: f64,
        /// Destination top edge.
        y: f64,
        /// Destination width.
        width: f64,
        /// Destination height.
        height: f64,
        /// Encoded image bytes (any format the image codec understands).
        image: &'a [u8],
    },
    /// Paint a single pixel with the current color.
    DrawPixel {
        /// Pixel x.
        x: i32,
        /// Pixel y.
        y: i32,
    },
    /// Draw text with its first baseline starting at `(x, y)`.
    DrawString {
        /// Baseline origin x.
        x: f64,
        /// Baseline origin y.
        y: f64,
        /// UTF-8 text.
        text: &'a str,
    },
    /// Fill the current path and reset it to empty.
    FillPath,
    /// Restore the most recently saved transform/clip context, if any.
    Pop,
    /// Save the current transform/clip context.
    Push,
    /// Rotate subsequent drawing about the current origin.
    Rotate {
        /// Rotation in radians, clockwise in y-down space.
        angle: f64,
    },
    /// Scale subsequent drawing about the current origin.
    Scale {
        /// Horizontal factor.
        x: f64,
        /// Vertical factor.
        y: f64,
    },
    /// Replace the current paint color.
    SetColor {
        /// New paint color.
        color: Argb,
    },
    /// Resolve a font family through the typeface registry and make it current.
    SetFontFace {
        /// Requested family name or registry alias.
        name: &'a str,
        /// Font size in pixels.
        size: i32,
    },
    /// Translate subsequent drawing.
    Translate {
        /// Horizontal offset.
        dx: f64,
        /// Vertical offset.
        dy: f64,
    },
}

/// Wire tag identifying an [`Operation`] variant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum OpKind {
    /// [`Operation::AddArc`].
    AddArc = 0,
    /// [`Operation::AddCircle`].
    AddCircle = 1,
    /// [`Operation::AddLineTo`].
    AddLineTo = 2,
    /// [`Operation::AddRectangle`].
    AddRectangle = 3,
    /// [`Operation::Clear`].
    Clear = 4,
    /// [`Operation::ClipRectangle`].
    ClipRectangle = 5,
    /// [`Operation::DrawImage`].
    DrawImage = 6,
    /// [`Operation::DrawPixel`].
    DrawPixel = 7,
    /// [`Operation::DrawString`].
    DrawString = 8,
    /// [`Operation::FillPath`].
    FillPath = 9,
    /// [`Operation::Pop`].
    Pop = 10,
    /// [`Operation::Push`].
    Push = 11,
    /// [`Operation::Rotate`].
    Rotate = 12,
    /// [`Operation::Scale`].
    Scale = 13,
    /// [`Operation::SetColor`].
    SetColor = 14,
    /// [`Operation::SetFontFace`].
    SetFontFace = 15,
    /// [`Operation::Translate`].
    Translate = 16,
}

impl OpKind {
    /// Every kind, in tag order.
    pub const ALL: [Self; 17] = [
        Self::AddArc,
        Self::AddCircle,
        Self::AddLineTo,
        Self::AddRectangle,
        Self::Clear,
        Self::ClipRectangle,
        Self::DrawImage,
        Self::DrawPixel,
        Self::DrawString,
        Self::FillPath,
        Self::Pop,
        Self::Push,
        Self::Rotate,
        Self::Scale,
        Self::SetColor,
        Self::SetFontFace,
        Self::Translate,
    ];

    /// Map a wire tag back to its kind.
    pub fn from_tag(tag: u8) -> Option<Self> {
        Self::ALL.get(usize::from(tag)).copied()
    }

    /// Wire tag for this kind.
    pub fn tag(self) -> u8 {
        self as u8
    }
}

impl Operation<'_> {
    /// Variant tag of this operation.
    pub fn kind(&self) -> OpKind {
        match self {
            Self::AddArc { .. } => OpKind::AddArc,
            Self::AddCircle { .. } => OpKind::AddCircle,
            Self::AddLineTo { .. } => OpKind::AddLineTo,
            Self::AddRectangle { .. } => OpKind::AddRectangle,
            Self::Clear => OpKind::Clear,
            Self::ClipRectangle { .. } => OpKind::ClipRectangle,
            Self::DrawImage { .. } => OpKind::DrawImage,
            Self::DrawPixel { .. } => OpKind::DrawPixel,
            Self::DrawString { .. } => OpKind::DrawString,
            Self::FillPath => OpKind::FillPath,
            Self::Pop => OpKind::Pop,
            Self::Push => OpKind::Push,
            Self::Rotate { .. } => OpKind::Rotate,
            Self::Scale { .. } => OpKind::Scale,
            Self::SetColor { .. } => OpKind::SetColor,
            Self::SetFontFace { .. } => OpKind::SetFontFace,
            Self::Translate { .. } => OpKind::Translate,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/ops/model.rs"]
mod tests;
