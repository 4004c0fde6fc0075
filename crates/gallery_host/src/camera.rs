//! Camera capture contracts and shared capture models.

use std::{cell::RefCell, collections::VecDeque, future::Future, pin::Pin, rc::Rc};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
/// Source the capture primitive should pull the image from.
pub enum CaptureSource {
    /// Device camera.
    #[default]
    Camera,
    /// Existing photo library.
    Photos,
    /// Let the host prompt the user to choose.
    Prompt,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
/// Options forwarded to the host capture primitive.
pub struct CaptureRequest {
    /// Encoder quality hint in percent (0-100).
    pub quality: u8,
    /// Requested capture source.
    pub source: CaptureSource,
}

impl Default for CaptureRequest {
    fn default() -> Self {
        Self {
            quality: 100,
            source: CaptureSource::Camera,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// Transient handle for one captured image.
///
/// Exactly one reference is populated per host strategy: `source_uri` on
/// native-bridge hosts (a bridged file URI the bytes can be read from) and
/// `web_path` on browser hosts (a transient display reference that does not
/// survive a restart).
pub struct CapturedImage {
    /// Direct byte-source reference (native-bridge hosts only).
    pub source_uri: Option<String>,
    /// Transient display reference (browser hosts only).
    pub web_path: Option<String>,
}

impl CapturedImage {
    /// Builds a native-bridge capture handle from a bridged file URI.
    pub fn from_source_uri(uri: impl Into<String>) -> Self {
        Self {
            source_uri: Some(uri.into()),
            web_path: None,
        }
    }

    /// Builds a browser capture handle from a transient display reference.
    pub fn from_web_path(path: impl Into<String>) -> Self {
        Self {
            source_uri: None,
            web_path: Some(path.into()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "detail", rename_all = "kebab-case")]
/// Typed failure reported by the capture primitive.
pub enum CaptureError {
    /// The user or host denied camera permission.
    PermissionDenied,
    /// The user dismissed the capture UI without taking a photo.
    Cancelled,
    /// The capture primitive is not available on the active host.
    Unavailable(String),
    /// The capture primitive failed after being invoked.
    Failed(String),
}

impl CaptureError {
    /// Returns whether the failure is a user-driven abort that callers treat as a no-op.
    pub const fn is_abort(&self) -> bool {
        matches!(self, Self::PermissionDenied | Self::Cancelled)
    }
}

impl std::fmt::Display for CaptureError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::PermissionDenied => write!(f, "camera permission denied"),
            Self::Cancelled => write!(f, "capture cancelled"),
            Self::Unavailable(op) => write!(f, "camera unavailable: {op}"),
            Self::Failed(reason) => write!(f, "capture failed: {reason}"),
        }
    }
}

impl std::error::Error for CaptureError {}

/// Object-safe boxed future used by [`CameraService`] async methods.
pub type CameraFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// Host service producing captured images on demand.
pub trait CameraService {
    /// Invokes the host capture primitive and resolves with a transient image handle.
    fn take_photo<'a>(
        &'a self,
        request: CaptureRequest,
    ) -> CameraFuture<'a, Result<CapturedImage, CaptureError>>;
}

#[derive(Debug, Clone, Copy, Default)]
/// No-op camera adapter for unsupported targets and baseline tests.
pub struct NoopCameraService;

impl CameraService for NoopCameraService {
    fn take_photo<'a>(
        &'a self,
        _request: CaptureRequest,
    ) -> CameraFuture<'a, Result<CapturedImage, CaptureError>> {
        Box::pin(async { Err(CaptureError::Unavailable("take_photo".to_string())) })
    }
}

#[derive(Debug, Clone, Default)]
/// In-memory camera adapter replaying scripted capture outcomes.
pub struct MemoryCameraService {
    outcomes: Rc<RefCell<VecDeque<Result<CapturedImage, CaptureError>>>>,
}

impl MemoryCameraService {
    /// Queues the next outcome [`take_photo`](CameraService::take_photo) will resolve with.
    pub fn enqueue(&self, outcome: Result<CapturedImage, CaptureError>) {
        self.outcomes.borrow_mut().push_back(outcome);
    }

    /// Returns the number of scripted outcomes not yet consumed.
    pub fn remaining(&self) -> usize {
        self.outcomes.borrow().len()
    }
}

impl CameraService for MemoryCameraService {
    fn take_photo<'a>(
        &'a self,
        _request: CaptureRequest,
    ) -> CameraFuture<'a, Result<CapturedImage, CaptureError>> {
        Box::pin(async move {
            self.outcomes
                .borrow_mut()
                .pop_front()
                .unwrap_or_else(|| Err(CaptureError::Unavailable("no scripted capture".to_string())))
        })
    }
}
