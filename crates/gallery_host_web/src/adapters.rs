//! Compile-time host-strategy selection and concrete adapter factories.
//!
//! All strategy branching happens here, once, at adapter construction. The
//! gallery runtime receives trait objects and never re-queries a global
//! runtime flag mid-operation.

use gallery_host::{
    CameraFuture, CameraService, CaptureError, CaptureRequest, CapturedImage, FileStore,
    FileStoreFuture, HostCapabilities, HostStrategy, KeyValueFuture, KeyValueStore,
    NoopCameraService, NoopFileStore, NoopKeyValueStore, NoopTransientFetchService,
    StorageDirectory, TransientFetchFuture, TransientFetchService, WrittenFile,
};

use crate::{
    BridgeCameraService, BridgeFileStore, BridgeKeyValueStore, WebCameraService, WebFileStore,
    WebKeyValueStore, WebTransientFetchService,
};

#[cfg(all(feature = "native-bridge-stub", feature = "native-bridge-tauri"))]
compile_error!(
    "features `native-bridge-stub` and `native-bridge-tauri` are mutually exclusive; enable only one"
);

/// Returns the compile-time selected host strategy for the active build.
pub const fn selected_host_strategy() -> HostStrategy {
    #[cfg(feature = "native-bridge-tauri")]
    {
        HostStrategy::NativeBridge
    }

    #[cfg(feature = "native-bridge-stub")]
    {
        HostStrategy::NativeStub
    }

    #[cfg(not(any(feature = "native-bridge-stub", feature = "native-bridge-tauri")))]
    {
        HostStrategy::Browser
    }
}

/// Returns the capability posture for the compile-time selected host strategy.
pub const fn host_capabilities() -> HostCapabilities {
    match selected_host_strategy() {
        HostStrategy::Browser => HostCapabilities::browser(),
        HostStrategy::NativeBridge => HostCapabilities::native_bridge(),
        HostStrategy::NativeStub => HostCapabilities::native_stub(),
    }
}

/// Adapter enum that erases the concrete camera backend behind [`CameraService`].
#[derive(Debug, Clone, Copy)]
pub enum CameraServiceAdapter {
    /// Browser file-input capture.
    Browser(WebCameraService),
    /// Native-bridge transport capture.
    NativeBridge(BridgeCameraService),
    /// No-op fallback used when the native transport is intentionally stubbed.
    NativeStub(NoopCameraService),
}

impl CameraService for CameraServiceAdapter {
    fn take_photo<'a>(
        &'a self,
        request: CaptureRequest,
    ) -> CameraFuture<'a, Result<CapturedImage, CaptureError>> {
        match self {
            Self::Browser(service) => service.take_photo(request),
            Self::NativeBridge(service) => service.take_photo(request),
            Self::NativeStub(service) => service.take_photo(request),
        }
    }
}

/// Adapter enum that erases the concrete file backend behind [`FileStore`].
#[derive(Debug, Clone, Copy)]
pub enum FileStoreAdapter {
    /// Browser IndexedDB-backed file storage.
    Browser(WebFileStore),
    /// Native-bridge transport file storage.
    NativeBridge(BridgeFileStore),
    /// No-op fallback used when the native transport is intentionally stubbed.
    NativeStub(NoopFileStore),
}

impl FileStore for FileStoreAdapter {
    fn read_file<'a>(
        &'a self,
        path: &'a str,
        directory: StorageDirectory,
    ) -> FileStoreFuture<'a, Result<String, String>> {
        match self {
            Self::Browser(store) => store.read_file(path, directory),
            Self::NativeBridge(store) => store.read_file(path, directory),
            Self::NativeStub(store) => store.read_file(path, directory),
        }
    }

    fn write_file<'a>(
        &'a self,
        path: &'a str,
        data: &'a str,
        directory: StorageDirectory,
    ) -> FileStoreFuture<'a, Result<WrittenFile, String>> {
        match self {
            Self::Browser(store) => store.write_file(path, data, directory),
            Self::NativeBridge(store) => store.write_file(path, data, directory),
            Self::NativeStub(store) => store.write_file(path, data, directory),
        }
    }
}

/// Adapter enum that erases the concrete key-value backend behind [`KeyValueStore`].
#[derive(Debug, Clone, Copy)]
pub enum KeyValueStoreAdapter {
    /// Browser localStorage-backed persistence.
    Browser(WebKeyValueStore),
    /// Native-bridge transport persistence.
    NativeBridge(BridgeKeyValueStore),
    /// No-op fallback used when the native transport is intentionally stubbed.
    NativeStub(NoopKeyValueStore),
}

impl KeyValueStore for KeyValueStoreAdapter {
    fn load_value<'a>(
        &'a self,
        key: &'a str,
    ) -> KeyValueFuture<'a, Result<Option<String>, String>> {
        match self {
            Self::Browser(store) => store.load_value(key),
            Self::NativeBridge(store) => store.load_value(key),
            Self::NativeStub(store) => store.load_value(key),
        }
    }

    fn save_value<'a>(
        &'a self,
        key: &'a str,
        raw_json: &'a str,
    ) -> KeyValueFuture<'a, Result<(), String>> {
        match self {
            Self::Browser(store) => store.save_value(key, raw_json),
            Self::NativeBridge(store) => store.save_value(key, raw_json),
            Self::NativeStub(store) => store.save_value(key, raw_json),
        }
    }

    fn delete_value<'a>(&'a self, key: &'a str) -> KeyValueFuture<'a, Result<(), String>> {
        match self {
            Self::Browser(store) => store.delete_value(key),
            Self::NativeBridge(store) => store.delete_value(key),
            Self::NativeStub(store) => store.delete_value(key),
        }
    }
}

/// Adapter enum that erases the concrete transient-fetch backend behind
/// [`TransientFetchService`].
#[derive(Debug, Clone, Copy)]
pub enum TransientFetchAdapter {
    /// Browser fetch + FileReader resolution.
    Browser(WebTransientFetchService),
    /// Native-bridge hosts derive display references from storage paths and
    /// never fetch transient resources.
    NativeBridge(NoopTransientFetchService),
    /// No-op fallback used when the native transport is intentionally stubbed.
    NativeStub(NoopTransientFetchService),
}

impl TransientFetchService for TransientFetchAdapter {
    fn fetch_data_url<'a>(
        &'a self,
        path: &'a str,
    ) -> TransientFetchFuture<'a, Result<String, String>> {
        match self {
            Self::Browser(fetcher) => fetcher.fetch_data_url(path),
            Self::NativeBridge(fetcher) | Self::NativeStub(fetcher) => fetcher.fetch_data_url(path),
        }
    }
}

/// Builds the camera adapter for the compile-time selected host strategy.
pub fn camera_service() -> CameraServiceAdapter {
    match selected_host_strategy() {
        HostStrategy::Browser => CameraServiceAdapter::Browser(WebCameraService),
        HostStrategy::NativeBridge => CameraServiceAdapter::NativeBridge(BridgeCameraService),
        HostStrategy::NativeStub => CameraServiceAdapter::NativeStub(NoopCameraService),
    }
}

/// Builds the file-store adapter for the compile-time selected host strategy.
pub fn file_store() -> FileStoreAdapter {
    match selected_host_strategy() {
        HostStrategy::Browser => FileStoreAdapter::Browser(WebFileStore),
        HostStrategy::NativeBridge => FileStoreAdapter::NativeBridge(BridgeFileStore),
        HostStrategy::NativeStub => FileStoreAdapter::NativeStub(NoopFileStore),
    }
}

/// Builds the key-value adapter for the compile-time selected host strategy.
pub fn key_value_store() -> KeyValueStoreAdapter {
    match selected_host_strategy() {
        HostStrategy::Browser => KeyValueStoreAdapter::Browser(WebKeyValueStore),
        HostStrategy::NativeBridge => KeyValueStoreAdapter::NativeBridge(BridgeKeyValueStore),
        HostStrategy::NativeStub => KeyValueStoreAdapter::NativeStub(NoopKeyValueStore),
    }
}

/// Builds the transient-fetch adapter for the compile-time selected host strategy.
pub fn transient_fetch_service() -> TransientFetchAdapter {
    match selected_host_strategy() {
        HostStrategy::Browser => TransientFetchAdapter::Browser(WebTransientFetchService),
        HostStrategy::NativeBridge => TransientFetchAdapter::NativeBridge(NoopTransientFetchService),
        HostStrategy::NativeStub => TransientFetchAdapter::NativeStub(NoopTransientFetchService),
    }
}
