//! Binary operation list format.
//!
//! Layout (little-endian):
//!
//! ```text
//! header    := magic "PXCV" | version u8 | count u32
//! operation := tag u8 | payload
//! bytes     := len u32 | len bytes
//! ```
//!
//! | tag | operation     | payload                                        |
//! |-----|---------------|------------------------------------------------|
//! | 0   | AddArc        | x, y, radius, start_angle, end_angle: f64      |
//! | 1   | AddCircle     | x, y, radius: f64                              |
//! | 2   | AddLineTo     | x, y: f64                                      |
//! | 3   | AddRectangle  | x, y, width, height: f64                       |
//! | 4   | Clear         |                                                |
//! | 5   | ClipRectangle | x, y, width, height: f64                       |
//! | 6   | DrawImage     | x, y, width, height: f64, image: bytes         |
//! | 7   | DrawPixel     | x, y: i32                                      |
//! | 8   | DrawString    | x, y: f64, text: bytes (UTF-8)                 |
//! | 9   | FillPath      |                                                |
//! | 10  | Pop           |                                                |
//! | 11  | Push          |                                                |
//! | 12  | Rotate        | angle: f64                                     |
//! | 13  | Scale         | x, y: f64                                      |
//! | 14  | SetColor      | alpha, r, g, b: u8                             |
//! | 15  | SetFontFace   | size: i32, name: bytes (UTF-8)                 |
//! | 16  | Translate     | dx, dy: f64                                    |
//!
//! The reader hands out slices of the input buffer and never copies payloads.

use crate::foundation::core::Argb;
use crate::foundation::error::{CanvasError, CanvasResult};
use crate::ops::model::{OpKind, Operation};

/// Leading magic bytes of every operation list.
pub const MAGIC: [u8; 4] = *b"PXCV";

/// Current wire format version.
pub const WIRE_VERSION: u8 = 1;

pub(crate) const HEADER_LEN: usize = MAGIC.len() + 1 + 4;

/// Validated view over an encoded operation list.
///
/// Only the header is checked up front; records are decoded lazily, in order, as the list is
/// iterated. A record that fails to decode ends iteration with an error.
#[derive(Clone, Copy, Debug)]
pub struct OperationList<'a> {
    body: &'a [u8],
    count: u32,
}

impl<'a> OperationList<'a> {
    /// Check the header of `bytes` and expose its records.
    pub fn parse(bytes: &'a [u8]) -> CanvasResult<Self> {
        let mut r = Reader::new(bytes);
        let magic = r.take(MAGIC.len())?;
        if magic != MAGIC {
            return Err(CanvasError::decode("missing operation list magic"));
        }
        let version = r.u8()?;
        if version != WIRE_VERSION {
            return Err(CanvasError::decode(format!(
                "unsupported operation list version {version} (expected {WIRE_VERSION})"
            )));
        }
        let count = r.u32()?;
        Ok(Self {
            body: r.rest(),
            count,
        })
    }

    /// Number of records declared in the header.
    pub fn len(&self) -> usize {
        self.count as usize
    }

    /// Return `true` when the list declares no records.
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Iterate the records in order.
    pub fn iter(&self) -> Operations<'a> {
        Operations {
            reader: Reader::new(self.body),
            remaining: self.count,
            done: false,
        }
    }
}

impl<'a> IntoIterator for OperationList<'a> {
    type Item = CanvasResult<Operation<'a>>;
    type IntoIter = Operations<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over the records of an [`OperationList`].
#[derive(Debug)]
pub struct Operations<'a> {
    reader: Reader<'a>,
    remaining: u32,
    done: bool,
}

impl<'a> Iterator for Operations<'a> {
    type Item = CanvasResult<Operation<'a>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        if self.remaining == 0 {
            self.done = true;
            if self.reader.is_empty() {
                return None;
            }
            return Some(Err(CanvasError::decode(format!(
                "{} trailing bytes after last operation",
                self.reader.remaining()
            ))));
        }
        self.remaining -= 1;
        let res = read_operation(&mut self.reader);
        if res.is_err() {
            self.done = true;
        }
        Some(res)
    }
}

impl std::iter::FusedIterator for Operations<'_> {}

fn read_operation<'a>(r: &mut Reader<'a>) -> CanvasResult<Operation<'a>> {
    let at = r.pos;
    let tag = r.u8()?;
    let kind = OpKind::from_tag(tag)
        .ok_or_else(|| CanvasError::decode(format!("unknown operation tag {tag} at byte {at}")))?;

    let op = match kind {
        OpKind::AddArc => Operation::AddArc {
            x: r.f64()?,
            y: r.f64()?,
            radius: r.f64()?,
            start_angle: r.f64()?,
            end_angle: r.f64()?,
        },
        OpKind::AddCircle => Operation::AddCircle {
            x: r.f64()?,
            y: r.f64()?,
            radius: r.f64()?,
        },
        OpKind::AddLineTo => Operation::AddLineTo {
            x: r.f64()?,
            y: r.f64()?,
        },
        OpKind::AddRectangle => Operation::AddRectangle {
            x: r.f64()?,
            y: r.f64()?,
            width: r.f64()?,
            height: r.f64()?,
        },
        OpKind::Clear => Operation::Clear,
        OpKind::ClipRectangle => Operation::ClipRectangle {
            x: r.f64()?,
            y: r.f64()?,
            width: r.f64()?,
            height: r.f64()?,
        },
        OpKind::DrawImage => Operation::DrawImage {
            x: r.f64()?,
            y: r.f64()?,
            width: r.f64()?,
            height: r.f64()?,
            image: r.bytes()?,
        },
        OpKind::DrawPixel => Operation::DrawPixel {
            x: r.i32()?,
            y: r.i32()?,
        },
        OpKind::DrawString => Operation::DrawString {
            x: r.f64()?,
            y: r.f64()?,
            text: r.str()?,
        },
        OpKind::FillPath => Operation::FillPath,
        OpKind::Pop => Operation::Pop,
        OpKind::Push => Operation::Push,
        OpKind::Rotate => Operation::Rotate { angle: r.f64()? },
        OpKind::Scale => Operation::Scale {
            x: r.f64()?,
            y: r.f64()?,
        },
        OpKind::SetColor => {
            let [a, red, g, b] = r.array::<4>()?;
            Operation::SetColor {
                color: Argb::new(a, red, g, b),
            }
        }
        OpKind::SetFontFace => {
            let size = r.i32()?;
            Operation::SetFontFace {
                name: r.str()?,
                size,
            }
        }
        OpKind::Translate => Operation::Translate {
            dx: r.f64()?,
            dy: r.f64()?,
        },
    };
    Ok(op)
}

#[derive(Debug)]
struct Reader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    fn rest(&self) -> &'a [u8] {
        &self.buf[self.pos..]
    }

    fn take(&mut self, n: usize) -> CanvasResult<&'a [u8]> {
        if n > self.remaining() {
            return Err(CanvasError::decode(format!(
                "truncated operation list: need {n} bytes at offset {}, have {}",
                self.pos,
                self.remaining()
            )));
        }
        let out = &self.buf[self.pos..self.pos + n];
        self.pos += n;
        Ok(out)
    }

    fn array<const N: usize>(&mut self) -> CanvasResult<[u8; N]> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.take(N)?);
        Ok(out)
    }

    fn u8(&mut self) -> CanvasResult<u8> {
        Ok(self.array::<1>()?[0])
    }

    fn u32(&mut self) -> CanvasResult<u32> {
        Ok(u32::from_le_bytes(self.array()?))
    }

    fn i32(&mut self) -> CanvasResult<i32> {
        Ok(i32::from_le_bytes(self.array()?))
    }

    fn f64(&mut self) -> CanvasResult<f64> {
        Ok(f64::from_le_bytes(self.array()?))
    }

    fn bytes(&mut self) -> CanvasResult<&'a [u8]> {
        let len = self.u32()? as usize;
        self.take(len)
    }

    fn str(&mut self) -> CanvasResult<&'a str> {
        let at = self.pos;
        let raw = self.bytes()?;
        std::str::from_utf8(raw)
            .map_err(|e| CanvasError::decode(format!("invalid UTF-8 string at byte {at}: {e}")))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/ops/wire.rs"]
mod tests;
