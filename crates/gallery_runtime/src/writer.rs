//! Storage writing and display-reference derivation for captured images.

use gallery_host::{CapturedImage, FileStore, StorageDirectory};
use gallery_host_web::bridge_display_url;

use crate::{error::GalleryError, host::GalleryHostContext, model::GalleryEntry};

/// Persists a resolved capture under `file_name` and derives its gallery entry.
///
/// Native-bridge hosts keep the written file URI as the storage path and
/// rewrite it into a webview-fetchable display URL. Browser hosts keep the
/// bare file name and reuse the capture's original transient reference, which
/// is already loaded in memory and cheaper than re-reading the just-written
/// file.
///
/// # Errors
///
/// Returns [`GalleryError::Write`] when the underlying store rejects the
/// write; the failure is propagated without retrying and without touching the
/// gallery index.
pub async fn persist_capture(
    ctx: &GalleryHostContext,
    image: &CapturedImage,
    data: &str,
    file_name: &str,
) -> Result<GalleryEntry, GalleryError> {
    let written = ctx
        .files()
        .write_file(file_name, data, StorageDirectory::Data)
        .await
        .map_err(GalleryError::Write)?;

    if ctx.strategy().uses_source_uri() {
        Ok(GalleryEntry {
            display_reference: Some(bridge_display_url(&written.uri)),
            storage_path: written.uri,
        })
    } else {
        Ok(GalleryEntry {
            storage_path: file_name.to_string(),
            display_reference: image.web_path.clone(),
        })
    }
}
