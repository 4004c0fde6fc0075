//! Typed gallery failure taxonomy.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
/// Failures surfaced by the capture pipeline and the gallery index.
///
/// User-driven aborts (permission denial, cancellation) are not errors; they
/// resolve to [`crate::capture::CaptureOutcome::Aborted`] instead.
pub enum GalleryError {
    /// The gallery index has not been hydrated yet; mutations are rejected to
    /// avoid overwriting persisted history with an empty-seeded list.
    #[error("gallery index is not hydrated")]
    NotLoaded,
    /// The capture primitive did not resolve before the deadline.
    #[error("capture timed out")]
    Timeout,
    /// The capture primitive failed after being invoked.
    #[error("capture failed: {0}")]
    Capture(String),
    /// Reading the captured bytes from private storage failed.
    #[error("failed to read captured image: {0}")]
    Read(String),
    /// Writing the captured bytes to private storage failed.
    #[error("failed to write captured image: {0}")]
    Write(String),
    /// Converting the transient display reference into bytes failed.
    #[error("failed to decode captured image: {0}")]
    Decode(String),
    /// Loading or persisting the serialized gallery index failed.
    #[error("gallery store failure: {0}")]
    Store(String),
}
