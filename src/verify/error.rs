/// Error types for deck verification.
use thiserror::Error;

/// Result type for deck verification.
pub type Result<T> = std::result::Result<T, VerifyError>;

/// Error types for deck verification.
///
/// Shape-level failures never surface here; they are contained in the
/// descriptor builder. These variants cover the fatal paths only: opening
/// and reading the presentation, and writing the report file.
#[derive(Error, Debug)]
pub enum VerifyError {
    /// Presentation could not be opened or read
    #[error("presentation error: {0}")]
    Pptx(#[from] crate::pptx::PptxError),

    /// Report serialization failed
    #[error("report serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// Report file could not be written
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
