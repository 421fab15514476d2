/// Convenience result type used across pixcanvas.
pub type CanvasResult<T> = Result<T, CanvasError>;

/// Error taxonomy for decoding, rendering and encoding a canvas.
///
/// Every variant is fatal to the render call that produced it: no partial image is ever
/// returned alongside an error.
#[derive(thiserror::Error, Debug)]
pub enum CanvasError {
    /// The operation byte stream is not a well-formed operation list.
    #[error("decode error: {0}")]
    Decode(String),

    /// An embedded image operand could not be decoded into pixels.
    #[error("image error: {0}")]
    Image(String),

    /// The finished surface could not be encoded.
    #[error("encode error: {0}")]
    Encode(String),

    /// A surface or output buffer could not be allocated.
    #[error("allocation error: {0}")]
    Allocation(String),

    /// Invalid caller-provided data outside the wire format (scripts, options).
    #[error("validation error: {0}")]
    Validation(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CanvasError {
    /// Build a [`CanvasError::Decode`] value.
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    /// Build a [`CanvasError::Image`] value.
    pub fn image(msg: impl Into<String>) -> Self {
        Self::Image(msg.into())
    }

    /// Build a [`CanvasError::Encode`] value.
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }

    /// Build a [`CanvasError::Allocation`] value.
    pub fn allocation(msg: impl Into<String>) -> Self {
        Self::Allocation(msg.into())
    }

    /// Build a [`CanvasError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
