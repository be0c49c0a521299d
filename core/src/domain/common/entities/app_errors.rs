use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    #[error("No ingredient text or label image was provided")]
    MissingInput,

    #[error("Unsupported image format, expected PNG, JPEG, WEBP, HEIC or HEIF")]
    UnsupportedImageFormat,

    #[error("External service error: {0}")]
    ExternalServiceError(String),

    #[error("Failed to render report: {0}")]
    RenderError(String),
}
