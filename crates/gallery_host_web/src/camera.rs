//! Camera capture adapters for browser and native-bridge strategies.

use gallery_host::{CameraFuture, CameraService, CaptureError, CaptureRequest, CapturedImage};

#[cfg(target_arch = "wasm32")]
use futures::channel::oneshot;
#[cfg(target_arch = "wasm32")]
use std::{cell::RefCell, rc::Rc};
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::{closure::Closure, JsCast};

#[derive(Debug, Clone, Copy, Default)]
/// Browser camera adapter backed by a hidden file input.
///
/// There is no direct camera API surface to drive headlessly, so the browser
/// strategy relies on the host picker with `capture` hinting; the selected
/// file is exposed through a transient object URL, matching the browser
/// handle shape (`web_path` set, `source_uri` absent).
pub struct WebCameraService;

impl CameraService for WebCameraService {
    fn take_photo<'a>(
        &'a self,
        request: CaptureRequest,
    ) -> CameraFuture<'a, Result<CapturedImage, CaptureError>> {
        Box::pin(async move { pick_capture_file(request).await })
    }
}

#[derive(Debug, Clone, Copy, Default)]
/// Native-bridge camera adapter routed over host command transport.
pub struct BridgeCameraService;

impl CameraService for BridgeCameraService {
    fn take_photo<'a>(
        &'a self,
        request: CaptureRequest,
    ) -> CameraFuture<'a, Result<CapturedImage, CaptureError>> {
        Box::pin(async move { crate::bridge::bridge_camera_capture(request).await })
    }
}

#[cfg(not(target_arch = "wasm32"))]
async fn pick_capture_file(_request: CaptureRequest) -> Result<CapturedImage, CaptureError> {
    Err(CaptureError::Unavailable(
        "browser capture requires a wasm32 target".to_string(),
    ))
}

#[cfg(target_arch = "wasm32")]
async fn pick_capture_file(request: CaptureRequest) -> Result<CapturedImage, CaptureError> {
    use gallery_host::CaptureSource;

    let window = web_sys::window()
        .ok_or_else(|| CaptureError::Unavailable("window unavailable".to_string()))?;
    let document = window
        .document()
        .ok_or_else(|| CaptureError::Unavailable("document unavailable".to_string()))?;
    let input = document
        .create_element("input")
        .map_err(|err| CaptureError::Failed(format!("failed to create file input: {err:?}")))?
        .dyn_into::<web_sys::HtmlInputElement>()
        .map_err(|_| CaptureError::Failed("failed to cast file input".to_string()))?;
    input.set_type("file");
    input.set_accept("image/jpeg,image/png,image/webp");
    if matches!(request.source, CaptureSource::Camera) {
        // `capture` asks mobile browsers to open the camera instead of the picker.
        let _ = input.set_attribute("capture", "environment");
    }
    input.set_hidden(true);

    if let Some(body) = document.body() {
        let _ = body.append_child(&input);
    }

    let (tx, rx) = oneshot::channel::<Result<web_sys::File, CaptureError>>();
    let sender = Rc::new(RefCell::new(Some(tx)));

    let input_for_change = input.clone();
    let change_sender = sender.clone();
    let on_change = Closure::<dyn FnMut(web_sys::Event)>::wrap(Box::new(move |_| {
        let result = input_for_change
            .files()
            .and_then(|files| files.get(0))
            .ok_or(CaptureError::Cancelled);
        if let Some(tx) = change_sender.borrow_mut().take() {
            let _ = tx.send(result);
        }
    }));
    input.set_onchange(Some(on_change.as_ref().unchecked_ref()));

    let cancel_sender = sender.clone();
    let on_cancel = Closure::<dyn FnMut(web_sys::Event)>::wrap(Box::new(move |_| {
        if let Some(tx) = cancel_sender.borrow_mut().take() {
            let _ = tx.send(Err(CaptureError::Cancelled));
        }
    }));
    let _ = input.add_event_listener_with_callback("cancel", on_cancel.as_ref().unchecked_ref());

    input.click();

    let file = rx.await.map_err(|_| CaptureError::Cancelled)??;
    input.remove();
    on_change.forget();
    on_cancel.forget();

    let web_path = web_sys::Url::create_object_url_with_blob(&file)
        .map_err(|err| CaptureError::Failed(format!("failed to create object url: {err:?}")))?;
    Ok(CapturedImage::from_web_path(web_path))
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;

    use super::*;

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn non_wasm_web_camera_reports_unavailable() {
        let camera = WebCameraService;
        let camera_obj: &dyn CameraService = &camera;
        let err = block_on(camera_obj.take_photo(CaptureRequest::default()))
            .expect_err("capture should fail");
        assert!(matches!(err, CaptureError::Unavailable(_)));
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn non_wasm_bridge_camera_matches_transport_fallback() {
        let camera = BridgeCameraService;
        let camera_obj: &dyn CameraService = &camera;
        let err = block_on(camera_obj.take_photo(CaptureRequest::default()))
            .expect_err("capture should fail");
        assert_eq!(
            err,
            CaptureError::Unavailable("native bridge transport".to_string())
        );
    }
}
