//! Reactive gallery hook for Leptos shells.

use leptos::{create_effect, create_rw_signal, logging, spawn_local, RwSignal, SignalSet};

use crate::{
    capture::{self, CaptureOutcome},
    host::GalleryHostContext,
    index::GalleryIndex,
    model::GalleryEntry,
};

#[derive(Clone)]
/// Reactive handle over the persisted photo gallery.
///
/// Owns the gallery index and a signal mirroring its newest-first sequence.
/// Obtained through [`use_photo_gallery`] inside a reactive scope.
pub struct PhotoGallery {
    ctx: GalleryHostContext,
    index: GalleryIndex,
    photos: RwSignal<Vec<GalleryEntry>>,
}

/// Creates the gallery handle for the compile-time selected host strategy and
/// installs boot hydration.
///
/// Hydration runs once as a detached task; captures requested before it lands
/// are rejected by the index and logged.
pub fn use_photo_gallery() -> PhotoGallery {
    use_photo_gallery_with_context(GalleryHostContext::default())
}

/// [`use_photo_gallery`] over an explicit host context.
pub fn use_photo_gallery_with_context(ctx: GalleryHostContext) -> PhotoGallery {
    let gallery = PhotoGallery {
        ctx,
        index: GalleryIndex::new(),
        photos: create_rw_signal(Vec::new()),
    };

    let boot = gallery.clone();
    create_effect(move |_| {
        let boot = boot.clone();
        spawn_local(async move {
            match boot.index.hydrate(&boot.ctx).await {
                Ok(entries) => boot.photos.set(entries),
                Err(err) => logging::warn!("gallery hydration failed: {err}"),
            }
        });
    });

    gallery
}

impl PhotoGallery {
    /// Signal carrying the newest-first gallery sequence.
    pub fn photos(&self) -> RwSignal<Vec<GalleryEntry>> {
        self.photos
    }

    /// Starts one capture cycle as a detached task.
    ///
    /// On success the photos signal is refreshed and the best-effort
    /// diagnostics read fires as its own detached task, decoupled from the
    /// capture result. Failures are logged for the shell to surface.
    pub fn take_photo(&self) {
        let gallery = self.clone();
        spawn_local(async move {
            match capture::take_photo(&gallery.ctx, &gallery.index).await {
                Ok(CaptureOutcome::Saved { file_name, .. }) => {
                    gallery.photos.set(gallery.index.current());
                    let diagnostics_ctx = gallery.ctx.clone();
                    spawn_local(async move {
                        let _ =
                            capture::read_capture_diagnostics(&diagnostics_ctx, &file_name).await;
                    });
                }
                Ok(CaptureOutcome::Aborted) => {}
                Err(err) => logging::warn!("capture failed: {err}"),
            }
        });
    }
}
