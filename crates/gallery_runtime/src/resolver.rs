//! Byte resolution for freshly captured images.

use gallery_host::{CapturedImage, FileStore, StorageDirectory, TransientFetchService};
use gallery_host_web::data_url_payload;

use crate::{error::GalleryError, host::GalleryHostContext};

/// Resolves a capture handle into the base64 payload of its encoded bytes.
///
/// Native-bridge hosts hand out a direct byte-source reference which is read
/// through the private file store; browser hosts hand out a transient display
/// reference which is fetched and decoded before the host can revoke it. Data
/// URLs are normalized to their bare base64 payload so the storage writer
/// always persists the same shape.
///
/// # Errors
///
/// Returns [`GalleryError::Read`] when the byte-source reference is absent or
/// unreadable, and [`GalleryError::Decode`] when the transient reference is
/// absent or cannot be decoded into a base64 string.
pub async fn resolve_image_data(
    ctx: &GalleryHostContext,
    image: &CapturedImage,
) -> Result<String, GalleryError> {
    if ctx.strategy().uses_source_uri() {
        let source = image.source_uri.as_deref().ok_or_else(|| {
            GalleryError::Read("capture is missing a byte-source reference".to_string())
        })?;
        let data = ctx
            .files()
            .read_file(source, StorageDirectory::Data)
            .await
            .map_err(GalleryError::Read)?;
        Ok(data_url_payload(&data).to_string())
    } else {
        let web_path = image.web_path.as_deref().ok_or_else(|| {
            GalleryError::Decode("capture is missing a display reference".to_string())
        })?;
        let data_url = ctx
            .transients()
            .fetch_data_url(web_path)
            .await
            .map_err(GalleryError::Decode)?;
        Ok(data_url_payload(&data_url).to_string())
    }
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;
    use gallery_host::HostStrategy;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::testing::memory_host;

    #[test]
    fn native_bridge_captures_resolve_through_the_file_store() {
        let host = memory_host(HostStrategy::NativeBridge);
        host.files.insert(
            "file:///captures/1000.jpeg",
            "aGVsbG8=",
            StorageDirectory::Data,
        );

        let image = CapturedImage::from_source_uri("file:///captures/1000.jpeg");
        let data = block_on(resolve_image_data(&host.ctx, &image)).expect("resolve");
        assert_eq!(data, "aGVsbG8=");
    }

    #[test]
    fn native_bridge_capture_without_source_reference_is_a_read_error() {
        let host = memory_host(HostStrategy::NativeBridge);
        let image = CapturedImage {
            source_uri: None,
            web_path: Some("blob:abc".to_string()),
        };

        let err = block_on(resolve_image_data(&host.ctx, &image)).expect_err("resolve should fail");
        assert!(matches!(err, GalleryError::Read(_)));
    }

    #[test]
    fn unreadable_source_reference_is_a_read_error() {
        let host = memory_host(HostStrategy::NativeBridge);
        let image = CapturedImage::from_source_uri("file:///captures/missing.jpeg");

        let err = block_on(resolve_image_data(&host.ctx, &image)).expect_err("resolve should fail");
        assert!(matches!(err, GalleryError::Read(_)));
    }

    #[test]
    fn browser_captures_resolve_through_the_transient_fetcher() {
        let host = memory_host(HostStrategy::Browser);
        host.transients
            .insert("blob:abc", "data:image/jpeg;base64,aGVsbG8=");

        let image = CapturedImage::from_web_path("blob:abc");
        let data = block_on(resolve_image_data(&host.ctx, &image)).expect("resolve");
        assert_eq!(data, "aGVsbG8=");
    }

    #[test]
    fn revoked_transient_reference_is_a_decode_error() {
        let host = memory_host(HostStrategy::Browser);
        let image = CapturedImage::from_web_path("blob:revoked");

        let err = block_on(resolve_image_data(&host.ctx, &image)).expect_err("resolve should fail");
        assert!(matches!(err, GalleryError::Decode(_)));
    }

    #[test]
    fn browser_capture_without_display_reference_is_a_decode_error() {
        let host = memory_host(HostStrategy::Browser);
        let image = CapturedImage {
            source_uri: Some("file:///captures/1000.jpeg".to_string()),
            web_path: None,
        };

        let err = block_on(resolve_image_data(&host.ctx, &image)).expect_err("resolve should fail");
        assert!(matches!(err, GalleryError::Decode(_)));
    }
}
