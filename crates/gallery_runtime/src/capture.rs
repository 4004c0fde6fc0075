//! Capture orchestration: camera → byte resolution → persistence → index.

use gallery_host::{capture_file_name, CameraService, CaptureRequest, FileStore, StorageDirectory};
use gallery_host_web::{with_deadline, DeadlineElapsed};
use leptos::logging;

use crate::{
    error::GalleryError, host::GalleryHostContext, index::GalleryIndex, model::GalleryEntry,
    resolver, writer,
};

/// Deadline for one capture round-trip through the host camera UI.
///
/// Generous because the camera UI can legitimately stay open for a while;
/// the bound exists to unstick a hung bridge call, not to rush the user.
pub const CAPTURE_TIMEOUT_MS: u32 = 120_000;

#[derive(Debug, Clone, PartialEq, Eq)]
/// Result of a completed capture attempt.
pub enum CaptureOutcome {
    /// The capture was persisted and appended to the gallery.
    Saved {
        /// The freshly appended gallery entry.
        entry: GalleryEntry,
        /// File name the capture was stored under, used by the diagnostics read.
        file_name: String,
    },
    /// The user cancelled or denied permission; nothing was written.
    Aborted,
}

/// Runs one full capture cycle against the gallery.
///
/// The sequence is strictly resolve → persist → append: any failure before
/// the append leaves the index untouched, so the gallery never references a
/// file that failed to write. User-driven aborts (cancel, permission denial)
/// resolve to [`CaptureOutcome::Aborted`] without an error.
///
/// # Errors
///
/// Returns [`GalleryError::NotLoaded`] before hydration,
/// [`GalleryError::Timeout`] when the capture primitive does not resolve in
/// time, and the read/write/decode/store variants for pipeline failures.
pub async fn take_photo(
    ctx: &GalleryHostContext,
    index: &GalleryIndex,
) -> Result<CaptureOutcome, GalleryError> {
    take_photo_with_deadline(ctx, index, CAPTURE_TIMEOUT_MS).await
}

/// [`take_photo`] with an explicit capture deadline in milliseconds.
///
/// # Errors
///
/// As [`take_photo`].
pub async fn take_photo_with_deadline(
    ctx: &GalleryHostContext,
    index: &GalleryIndex,
    deadline_ms: u32,
) -> Result<CaptureOutcome, GalleryError> {
    if !index.is_loaded() {
        return Err(GalleryError::NotLoaded);
    }

    let captured = match with_deadline(
        ctx.camera().take_photo(CaptureRequest::default()),
        deadline_ms,
    )
    .await
    {
        Ok(result) => result,
        Err(DeadlineElapsed) => return Err(GalleryError::Timeout),
    };

    let image = match captured {
        Ok(image) => image,
        Err(err) if err.is_abort() => return Ok(CaptureOutcome::Aborted),
        Err(gallery_host::CaptureError::Failed(reason)) => {
            return Err(GalleryError::Capture(reason))
        }
        Err(err) => return Err(GalleryError::Capture(err.to_string())),
    };

    let file_name = capture_file_name();
    let data = resolver::resolve_image_data(ctx, &image).await?;
    let entry = writer::persist_capture(ctx, &image, &data, &file_name).await?;
    index.append(ctx, entry.clone()).await?;

    Ok(CaptureOutcome::Saved { entry, file_name })
}

/// Best-effort diagnostics read performed after a successful capture.
///
/// Reads `file_name` from the `Documents` root and logs the outcome. All
/// failures are swallowed; this path must never block or fail a capture, so
/// callers fire it as a detached task.
pub async fn read_capture_diagnostics(ctx: &GalleryHostContext, file_name: &str) -> Option<String> {
    match ctx
        .files()
        .read_file(file_name, StorageDirectory::Documents)
        .await
    {
        Ok(contents) => {
            logging::log!("capture diagnostics {file_name}: {contents}");
            Some(contents)
        }
        Err(err) => {
            logging::log!("capture diagnostics unavailable for {file_name}: {err}");
            None
        }
    }
}
