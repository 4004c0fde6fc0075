//! Data-URL helpers for turning transient display references into base64 payloads.

/// Fetches a resource (typically a blob/object URL) and returns it as a
/// base64 data URL via `FileReader.readAsDataURL`.
///
/// # Errors
///
/// Returns an error when the fetch fails (network error, revoked reference)
/// or the reader does not yield a string result (malformed/empty resource).
pub async fn fetch_as_data_url(path: &str) -> Result<String, String> {
    #[cfg(not(target_arch = "wasm32"))]
    {
        let _ = path;
        Err("resource fetch is only available when compiled for wasm32".to_string())
    }

    #[cfg(target_arch = "wasm32")]
    {
        use wasm_bindgen::JsCast;
        use wasm_bindgen_futures::JsFuture;

        let window = web_sys::window().ok_or_else(|| "window unavailable".to_string())?;
        let response = JsFuture::from(window.fetch_with_str(path))
            .await
            .map_err(|err| format!("failed to fetch {path}: {err:?}"))?
            .dyn_into::<web_sys::Response>()
            .map_err(|_| "fetch returned a non-Response value".to_string())?;
        if !response.ok() {
            return Err(format!("failed to fetch {path}: status {}", response.status()));
        }
        let blob = JsFuture::from(
            response
                .blob()
                .map_err(|err| format!("failed to read response body: {err:?}"))?,
        )
        .await
        .map_err(|err| format!("failed to read response body: {err:?}"))?
        .dyn_into::<web_sys::Blob>()
        .map_err(|_| "response body is not a blob".to_string())?;
        read_blob_as_data_url(&blob).await
    }
}

#[cfg(target_arch = "wasm32")]
async fn read_blob_as_data_url(blob: &web_sys::Blob) -> Result<String, String> {
    use std::{cell::RefCell, rc::Rc};

    use futures::channel::oneshot;
    use wasm_bindgen::{closure::Closure, JsCast};

    let reader = web_sys::FileReader::new().map_err(|err| format!("{err:?}"))?;
    let (tx, rx) = oneshot::channel::<Result<String, String>>();
    let sender = Rc::new(RefCell::new(Some(tx)));

    let reader_for_load = reader.clone();
    let load_sender = sender.clone();
    let on_load = Closure::<dyn FnMut(web_sys::ProgressEvent)>::wrap(Box::new(move |_| {
        let result = reader_for_load
            .result()
            .map_err(|err| format!("failed to read captured image: {err:?}"))
            .and_then(|value| {
                value
                    .as_string()
                    .ok_or_else(|| "file reader returned non-string result".to_string())
            });
        if let Some(tx) = load_sender.borrow_mut().take() {
            let _ = tx.send(result);
        }
    }));
    reader.set_onload(Some(on_load.as_ref().unchecked_ref()));

    let error_sender = sender.clone();
    let on_error = Closure::<dyn FnMut(web_sys::ProgressEvent)>::wrap(Box::new(move |_| {
        if let Some(tx) = error_sender.borrow_mut().take() {
            let _ = tx.send(Err("failed to load captured image".to_string()));
        }
    }));
    reader.set_onerror(Some(on_error.as_ref().unchecked_ref()));

    reader
        .read_as_data_url(blob)
        .map_err(|err| format!("failed to start image read: {err:?}"))?;

    let result = rx
        .await
        .map_err(|_| "image read was interrupted".to_string())?;
    on_load.forget();
    on_error.forget();
    result
}

/// Returns the base64 payload of a data URL, or the input unchanged when it
/// is already a bare base64 string.
pub fn data_url_payload(data: &str) -> &str {
    match data.split_once(";base64,") {
        Some((prefix, payload)) if prefix.starts_with("data:") => payload,
        _ => data,
    }
}

/// Wraps a base64 payload into an inline JPEG data URL.
pub fn jpeg_data_url(payload: &str) -> String {
    format!("data:image/jpeg;base64,{payload}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_url_payload_strips_media_prefix() {
        assert_eq!(data_url_payload("data:image/jpeg;base64,aGVsbG8="), "aGVsbG8=");
        assert_eq!(data_url_payload("data:image/png;base64,aGk="), "aGk=");
    }

    #[test]
    fn data_url_payload_passes_bare_base64_through() {
        assert_eq!(data_url_payload("aGVsbG8="), "aGVsbG8=");
        assert_eq!(data_url_payload(""), "");
    }

    #[test]
    fn jpeg_data_url_round_trips_with_payload_extraction() {
        let url = jpeg_data_url("aGVsbG8=");
        assert_eq!(url, "data:image/jpeg;base64,aGVsbG8=");
        assert_eq!(data_url_payload(&url), "aGVsbG8=");
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn non_wasm_fetch_reports_unsupported() {
        let err = futures::executor::block_on(fetch_as_data_url("blob:abc"))
            .expect_err("fetch should fail");
        assert!(err.contains("wasm32"));
    }
}
