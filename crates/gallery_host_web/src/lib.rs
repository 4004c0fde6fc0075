//! Browser (`wasm32`) and native-bridge implementations of [`gallery_host`]
//! service contracts.
//!
//! This crate is the concrete host wiring layer for camera capture, private
//! file storage, and key-value persistence. The browser strategy keeps
//! everything inside the browser sandbox (file picker, IndexedDB,
//! localStorage); the native-bridge strategy routes the same contracts over
//! host command transport. Shared wasm/non-wasm glue lives in `bridge`.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

/// Compile-time host-strategy selection and concrete adapter factories for runtime wiring.
pub mod adapters;
mod bridge;
pub mod camera;
pub mod data_url;
pub mod display_url;
pub mod files;
pub mod storage;
pub mod task;
pub mod transient;

pub use adapters::{
    camera_service, file_store, host_capabilities, key_value_store, selected_host_strategy,
    transient_fetch_service, CameraServiceAdapter, FileStoreAdapter, KeyValueStoreAdapter,
    TransientFetchAdapter,
};
pub use camera::{BridgeCameraService, WebCameraService};
pub use data_url::{data_url_payload, jpeg_data_url};
pub use display_url::bridge_display_url;
pub use files::{BridgeFileStore, WebFileStore};
pub use storage::{BridgeKeyValueStore, WebKeyValueStore};
pub use task::{sleep_ms, with_deadline, DeadlineElapsed};
pub use transient::WebTransientFetchService;
