//! Small async task helpers shared by capture orchestration.

use std::future::Future;

use futures::future::{select, Either};

/// Marker returned when a deadline elapses before the wrapped task resolves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeadlineElapsed;

impl std::fmt::Display for DeadlineElapsed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "deadline elapsed")
    }
}

impl std::error::Error for DeadlineElapsed {}

/// Suspends the current task for roughly `ms` milliseconds.
pub async fn sleep_ms(ms: u32) {
    #[cfg(target_arch = "wasm32")]
    {
        use wasm_bindgen::JsValue;

        let promise = js_sys::Promise::new(&mut |resolve, _reject| {
            match web_sys::window() {
                Some(window) => {
                    let _ = window
                        .set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, ms as i32);
                }
                None => {
                    let _ = resolve.call0(&JsValue::NULL);
                }
            }
        });
        let _ = wasm_bindgen_futures::JsFuture::from(promise).await;
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        let (tx, rx) = futures::channel::oneshot::channel::<()>();
        std::thread::spawn(move || {
            std::thread::sleep(std::time::Duration::from_millis(u64::from(ms)));
            let _ = tx.send(());
        });
        let _ = rx.await;
    }
}

/// Runs `task` against a deadline of `ms` milliseconds.
///
/// # Errors
///
/// Returns [`DeadlineElapsed`] when the deadline fires first; the task is
/// dropped at that point.
pub async fn with_deadline<T>(
    task: impl Future<Output = T>,
    ms: u32,
) -> Result<T, DeadlineElapsed> {
    match select(Box::pin(task), Box::pin(sleep_ms(ms))).await {
        Either::Left((value, _)) => Ok(value),
        Either::Right(((), _)) => Err(DeadlineElapsed),
    }
}
