//! File-store adapters for browser and native-bridge strategies.

use gallery_host::{FileStore, FileStoreFuture, StorageDirectory, WrittenFile};

#[derive(Debug, Clone, Copy, Default)]
/// Browser file store backed by an IndexedDB object store.
///
/// Payloads stay base64-encoded text records keyed by storage root and path,
/// which keeps the browser store shape-compatible with the on-disk native
/// store.
pub struct WebFileStore;

impl FileStore for WebFileStore {
    fn read_file<'a>(
        &'a self,
        path: &'a str,
        directory: StorageDirectory,
    ) -> FileStoreFuture<'a, Result<String, String>> {
        Box::pin(async move { crate::bridge::gallery_file_read(path, directory).await })
    }

    fn write_file<'a>(
        &'a self,
        path: &'a str,
        data: &'a str,
        directory: StorageDirectory,
    ) -> FileStoreFuture<'a, Result<WrittenFile, String>> {
        Box::pin(async move { crate::bridge::gallery_file_write(path, data, directory).await })
    }
}

#[derive(Debug, Clone, Copy, Default)]
/// Native-bridge file store routed over host command transport.
pub struct BridgeFileStore;

impl FileStore for BridgeFileStore {
    fn read_file<'a>(
        &'a self,
        path: &'a str,
        directory: StorageDirectory,
    ) -> FileStoreFuture<'a, Result<String, String>> {
        Box::pin(async move { crate::bridge::bridge_file_read(path, directory).await })
    }

    fn write_file<'a>(
        &'a self,
        path: &'a str,
        data: &'a str,
        directory: StorageDirectory,
    ) -> FileStoreFuture<'a, Result<WrittenFile, String>> {
        Box::pin(async move { crate::bridge::bridge_file_write(path, data, directory).await })
    }
}
