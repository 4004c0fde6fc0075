//! Key-value persistence for the serialized gallery index.

use gallery_host::KeyValueStore;

use crate::{
    host::GalleryHostContext,
    model::{deserialize_entries, serialize_entries, GalleryEntry, GALLERY_STORE_KEY},
};

/// Loads the persisted gallery sequence; `None` when nothing was stored yet.
///
/// # Errors
///
/// Returns an error when the store read fails or the payload is malformed.
pub(crate) async fn load_entries(
    ctx: &GalleryHostContext,
) -> Result<Option<Vec<GalleryEntry>>, String> {
    let Some(raw) = ctx.values().load_value(GALLERY_STORE_KEY).await? else {
        return Ok(None);
    };
    deserialize_entries(&raw).map(Some)
}

/// Persists the full gallery sequence under the fixed store key.
///
/// # Errors
///
/// Returns an error when serialization or the store write fails.
pub(crate) async fn save_entries(
    ctx: &GalleryHostContext,
    entries: &[GalleryEntry],
) -> Result<(), String> {
    let raw = serialize_entries(entries)?;
    ctx.values().save_value(GALLERY_STORE_KEY, &raw).await
}
