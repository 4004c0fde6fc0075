//! Host transport glue for `gallery_host_web` service adapters.
//!
//! This module contains the WASM/JS interop layer and a non-WASM fallback
//! shim. Browser-strategy file storage is backed by an IndexedDB object
//! store; native-bridge calls route over the host command transport
//! (`window.__TAURI__.core.invoke`).

use gallery_host::{CaptureError, CaptureRequest, CapturedImage, StorageDirectory, WrittenFile};

#[cfg(target_arch = "wasm32")]
mod imp {
    use super::*;
    use js_sys::Promise;
    use serde::de::DeserializeOwned;
    use serde::Serialize;
    use serde_wasm_bindgen::{from_value, Serializer};
    use wasm_bindgen::prelude::*;
    use wasm_bindgen_futures::JsFuture;

    #[wasm_bindgen(inline_js = r#"
const DB_NAME = 'camroll';
const DB_VERSION = 1;
const FILES_STORE = 'gallery_files';

function fail(message) {
  throw new Error(message);
}

function requestToPromise(req) {
  return new Promise((resolve, reject) => {
    req.onsuccess = () => resolve(req.result);
    req.onerror = () => reject(req.error || new Error('IndexedDB request failed'));
  });
}

function txDone(tx) {
  return new Promise((resolve, reject) => {
    tx.oncomplete = () => resolve();
    tx.onabort = () => reject(tx.error || new Error('IndexedDB transaction aborted'));
    tx.onerror = () => reject(tx.error || new Error('IndexedDB transaction error'));
  });
}

async function openDb() {
  if (typeof indexedDB === 'undefined') {
    fail('IndexedDB is unavailable in this browser context');
  }
  return await new Promise((resolve, reject) => {
    const req = indexedDB.open(DB_NAME, DB_VERSION);
    req.onupgradeneeded = () => {
      const db = req.result;
      if (!db.objectStoreNames.contains(FILES_STORE)) {
        db.createObjectStore(FILES_STORE, { keyPath: 'key' });
      }
    };
    req.onsuccess = () => resolve(req.result);
    req.onerror = () => reject(req.error || new Error('Failed to open IndexedDB'));
  });
}

async function withFiles(mode, fn) {
  const db = await openDb();
  const tx = db.transaction(FILES_STORE, mode);
  const store = tx.objectStore(FILES_STORE);
  const result = await fn(store);
  await txDone(tx);
  return result;
}

function fileKey(directory, path) {
  return directory + ':' + path;
}

async function galleryFileRead(directory, path) {
  const record = await withFiles('readonly', async (store) => {
    return await requestToPromise(store.get(fileKey(directory, path)));
  });
  if (!record) fail('File not found: ' + directory + '/' + path);
  return record.data;
}

async function galleryFileWrite(directory, path, data) {
  const uri = 'vfs://' + directory + '/' + path;
  await withFiles('readwrite', async (store) => {
    await requestToPromise(store.put({
      key: fileKey(directory, path),
      directory,
      path,
      data,
      uri,
      modifiedAt: Date.now(),
    }));
    return null;
  });
  return uri;
}

async function invokeHost(command, payload) {
  const tauri = window.__TAURI__;
  if (!tauri || !tauri.core || typeof tauri.core.invoke !== 'function') {
    fail('Native bridge transport is unavailable in this context');
  }
  return await tauri.core.invoke(command, payload || {});
}

export async function jsGalleryFileRead(directory, path) { return await galleryFileRead(directory, path); }
export async function jsGalleryFileWrite(directory, path, data) { return await galleryFileWrite(directory, path, data); }

export async function jsBridgeValuesLoad(key) { return await invokeHost('values_load', { key }); }
export async function jsBridgeValuesSave(key, rawJson) { return await invokeHost('values_save', { key, rawJson }); }
export async function jsBridgeValuesDelete(key) { return await invokeHost('values_delete', { key }); }

export async function jsBridgeFilesRead(path, directory) { return await invokeHost('files_read', { path, directory }); }
export async function jsBridgeFilesWrite(path, data, directory) { return await invokeHost('files_write', { path, data, directory }); }

export async function jsBridgeCameraCapture(request) { return await invokeHost('camera_capture', { request }); }
"#)]
    extern "C" {
        #[wasm_bindgen(js_name = jsGalleryFileRead)]
        fn js_gallery_file_read(directory: &str, path: &str) -> Promise;
        #[wasm_bindgen(js_name = jsGalleryFileWrite)]
        fn js_gallery_file_write(directory: &str, path: &str, data: &str) -> Promise;

        #[wasm_bindgen(js_name = jsBridgeValuesLoad)]
        fn js_bridge_values_load(key: &str) -> Promise;
        #[wasm_bindgen(js_name = jsBridgeValuesSave)]
        fn js_bridge_values_save(key: &str, raw_json: &str) -> Promise;
        #[wasm_bindgen(js_name = jsBridgeValuesDelete)]
        fn js_bridge_values_delete(key: &str) -> Promise;

        #[wasm_bindgen(js_name = jsBridgeFilesRead)]
        fn js_bridge_files_read(path: &str, directory: &str) -> Promise;
        #[wasm_bindgen(js_name = jsBridgeFilesWrite)]
        fn js_bridge_files_write(path: &str, data: &str, directory: &str) -> Promise;

        #[wasm_bindgen(js_name = jsBridgeCameraCapture)]
        fn js_bridge_camera_capture(request: JsValue) -> Promise;
    }

    async fn await_promise(promise: Promise) -> Result<JsValue, String> {
        JsFuture::from(promise).await.map_err(js_error_to_string)
    }

    fn js_error_to_string(err: JsValue) -> String {
        if let Some(text) = err.as_string() {
            return text;
        }
        if let Ok(message) = js_sys::Reflect::get(&err, &JsValue::from_str("message")) {
            if let Some(text) = message.as_string() {
                return text;
            }
        }
        format!("{err:?}")
    }

    async fn promise_to_json<T: DeserializeOwned>(promise: Promise) -> Result<T, String> {
        let value = await_promise(promise).await?;
        from_value(value).map_err(|e| e.to_string())
    }

    async fn promise_to_string(promise: Promise) -> Result<String, String> {
        let value = await_promise(promise).await?;
        value
            .as_string()
            .ok_or_else(|| "host transport returned non-string payload".to_string())
    }

    pub async fn gallery_file_read(
        path: &str,
        directory: StorageDirectory,
    ) -> Result<String, String> {
        promise_to_string(js_gallery_file_read(directory.as_str(), path)).await
    }

    pub async fn gallery_file_write(
        path: &str,
        data: &str,
        directory: StorageDirectory,
    ) -> Result<WrittenFile, String> {
        let uri = promise_to_string(js_gallery_file_write(directory.as_str(), path, data)).await?;
        Ok(WrittenFile { uri })
    }

    pub async fn bridge_values_load(key: &str) -> Result<Option<String>, String> {
        let value = await_promise(js_bridge_values_load(key)).await?;
        if value.is_null() || value.is_undefined() {
            Ok(None)
        } else {
            value
                .as_string()
                .map(Some)
                .ok_or_else(|| "host transport returned non-string payload".to_string())
        }
    }

    pub async fn bridge_values_save(key: &str, raw_json: &str) -> Result<(), String> {
        let _ = await_promise(js_bridge_values_save(key, raw_json)).await?;
        Ok(())
    }

    pub async fn bridge_values_delete(key: &str) -> Result<(), String> {
        let _ = await_promise(js_bridge_values_delete(key)).await?;
        Ok(())
    }

    pub async fn bridge_file_read(
        path: &str,
        directory: StorageDirectory,
    ) -> Result<String, String> {
        promise_to_string(js_bridge_files_read(path, directory.as_str())).await
    }

    pub async fn bridge_file_write(
        path: &str,
        data: &str,
        directory: StorageDirectory,
    ) -> Result<WrittenFile, String> {
        promise_to_json(js_bridge_files_write(path, data, directory.as_str())).await
    }

    pub async fn bridge_camera_capture(
        request: CaptureRequest,
    ) -> Result<CapturedImage, CaptureError> {
        let payload = request
            .serialize(&Serializer::json_compatible())
            .map_err(|e| CaptureError::Failed(e.to_string()))?;
        match await_promise(js_bridge_camera_capture(payload)).await {
            Ok(value) => from_value(value).map_err(|e| CaptureError::Failed(e.to_string())),
            Err(message) => Err(super::capture_error_from_transport(&message)),
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod imp {
    use super::*;

    fn unsupported() -> String {
        "Host bridge APIs are only available when compiled for wasm32".to_string()
    }

    pub async fn gallery_file_read(
        _path: &str,
        _directory: StorageDirectory,
    ) -> Result<String, String> {
        Err(unsupported())
    }

    pub async fn gallery_file_write(
        _path: &str,
        _data: &str,
        _directory: StorageDirectory,
    ) -> Result<WrittenFile, String> {
        Err(unsupported())
    }

    pub async fn bridge_values_load(_key: &str) -> Result<Option<String>, String> {
        Ok(None)
    }

    pub async fn bridge_values_save(_key: &str, _raw_json: &str) -> Result<(), String> {
        Ok(())
    }

    pub async fn bridge_values_delete(_key: &str) -> Result<(), String> {
        Ok(())
    }

    pub async fn bridge_file_read(
        _path: &str,
        _directory: StorageDirectory,
    ) -> Result<String, String> {
        Err(unsupported())
    }

    pub async fn bridge_file_write(
        _path: &str,
        _data: &str,
        _directory: StorageDirectory,
    ) -> Result<WrittenFile, String> {
        Err(unsupported())
    }

    pub async fn bridge_camera_capture(
        _request: CaptureRequest,
    ) -> Result<CapturedImage, CaptureError> {
        Err(CaptureError::Unavailable("native bridge transport".to_string()))
    }
}

/// Maps a host-transport rejection message to a typed capture error.
///
/// Host camera commands signal user-driven aborts with the stable tokens
/// `permission-denied` and `cancelled`; everything else is a real failure.
fn capture_error_from_transport(message: &str) -> CaptureError {
    match message {
        "permission-denied" => CaptureError::PermissionDenied,
        "cancelled" => CaptureError::Cancelled,
        other => CaptureError::Failed(other.to_string()),
    }
}

pub(crate) async fn gallery_file_read(
    path: &str,
    directory: StorageDirectory,
) -> Result<String, String> {
    imp::gallery_file_read(path, directory).await
}

pub(crate) async fn gallery_file_write(
    path: &str,
    data: &str,
    directory: StorageDirectory,
) -> Result<WrittenFile, String> {
    imp::gallery_file_write(path, data, directory).await
}

pub(crate) async fn bridge_values_load(key: &str) -> Result<Option<String>, String> {
    imp::bridge_values_load(key).await
}

pub(crate) async fn bridge_values_save(key: &str, raw_json: &str) -> Result<(), String> {
    imp::bridge_values_save(key, raw_json).await
}

pub(crate) async fn bridge_values_delete(key: &str) -> Result<(), String> {
    imp::bridge_values_delete(key).await
}

pub(crate) async fn bridge_file_read(
    path: &str,
    directory: StorageDirectory,
) -> Result<String, String> {
    imp::bridge_file_read(path, directory).await
}

pub(crate) async fn bridge_file_write(
    path: &str,
    data: &str,
    directory: StorageDirectory,
) -> Result<WrittenFile, String> {
    imp::bridge_file_write(path, data, directory).await
}

pub(crate) async fn bridge_camera_capture(
    request: CaptureRequest,
) -> Result<CapturedImage, CaptureError> {
    imp::bridge_camera_capture(request).await
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;

    use super::*;

    #[test]
    fn transport_abort_tokens_map_to_typed_capture_errors() {
        assert_eq!(
            capture_error_from_transport("permission-denied"),
            CaptureError::PermissionDenied
        );
        assert_eq!(
            capture_error_from_transport("cancelled"),
            CaptureError::Cancelled
        );
        assert_eq!(
            capture_error_from_transport("camera hardware fault"),
            CaptureError::Failed("camera hardware fault".to_string())
        );
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn non_wasm_file_transport_reports_unsupported() {
        let expected = "Host bridge APIs are only available when compiled for wasm32";
        assert_eq!(
            block_on(gallery_file_read("1000.jpeg", StorageDirectory::Data))
                .expect_err("read should fail"),
            expected
        );
        assert_eq!(
            block_on(bridge_file_write("1000.jpeg", "aGk=", StorageDirectory::Data))
                .expect_err("write should fail"),
            expected
        );
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn non_wasm_value_transport_is_empty_and_successful() {
        assert_eq!(
            block_on(bridge_values_load("camroll.gallery.v1")).expect("load"),
            None
        );
        block_on(bridge_values_save("camroll.gallery.v1", "[]")).expect("save");
        block_on(bridge_values_delete("camroll.gallery.v1")).expect("delete");
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn non_wasm_camera_transport_reports_unavailable() {
        let err = block_on(bridge_camera_capture(gallery_host::CaptureRequest::default()))
            .expect_err("capture should fail");
        assert_eq!(
            err,
            CaptureError::Unavailable("native bridge transport".to_string())
        );
    }
}
