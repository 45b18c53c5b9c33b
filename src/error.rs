use thiserror::Error;

/// Errors produced by the ray tracer.
///
/// Most of the kernel is infallible; failures are numerical (a transform
/// which cannot be inverted, a vector which cannot be normalized) or come
/// from the outer layers (reading scenes, writing images).
#[derive(Debug, Error)]
pub enum Error {
    /// A matrix with a zero determinant was inverted.
    #[error("transform is degenerate (determinant is zero)")]
    DegenerateTransform,

    /// An operation received an operand it is undefined for.
    #[error("invalid operand: {0}")]
    InvalidOperand(&'static str),

    /// Reading a scene or writing an image failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A scene description could not be parsed.
    #[error("malformed scene description: {0}")]
    Scene(#[from] serde_json::Error),

    /// A scene description parsed, but describes something unrenderable.
    #[error("invalid scene: {0}")]
    InvalidScene(String),
}

pub type Result<T> = std::result::Result<T, Error>;
