//! Typed host-domain contracts and shared models for the camroll gallery core.
//!
//! This crate is the API-first boundary for the platform services the gallery
//! depends on: camera capture, private file storage, and key-value
//! persistence. Concrete browser/webview adapters live in `gallery_host_web`
//! and the native desktop transport remains behind `gallery_tauri`.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

pub mod camera;
pub mod fs;
pub mod host;
pub mod storage;
pub mod time;
pub mod transient;

pub use camera::{
    CameraFuture, CameraService, CaptureError, CaptureRequest, CaptureSource, CapturedImage,
    MemoryCameraService, NoopCameraService,
};
pub use fs::{
    FileStore, FileStoreFuture, MemoryFileStore, NoopFileStore, StorageDirectory, WrittenFile,
};
pub use host::{CapabilityStatus, HostCapabilities, HostStrategy};
pub use storage::{
    load_value_with, save_value_with, KeyValueFuture, KeyValueStore, MemoryKeyValueStore,
    NoopKeyValueStore,
};
pub use time::{capture_file_name, next_capture_timestamp_ms, unix_time_ms_now};
pub use transient::{
    MemoryTransientFetchService, NoopTransientFetchService, TransientFetchFuture,
    TransientFetchService,
};
