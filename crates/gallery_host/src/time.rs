//! Time helpers shared across host contracts and adapters.

use std::cell::Cell;
#[cfg(not(target_arch = "wasm32"))]
use std::time::{SystemTime, UNIX_EPOCH};

thread_local! {
    static LAST_CAPTURE_TIMESTAMP_MS: Cell<u64> = const { Cell::new(0) };
}

/// Returns the current unix timestamp in milliseconds.
pub fn unix_time_ms_now() -> u64 {
    #[cfg(target_arch = "wasm32")]
    {
        js_sys::Date::now().max(0.0) as u64
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis() as u64
    }
}

/// Returns a unix millisecond timestamp for a new capture, monotonic within
/// the current process even when the system clock does not advance.
///
/// Two captures allocated in the same millisecond therefore still receive
/// distinct timestamps, which keeps capture file names collision-free.
pub fn next_capture_timestamp_ms() -> u64 {
    let now = unix_time_ms_now();
    LAST_CAPTURE_TIMESTAMP_MS.with(|last| {
        let next = now.max(last.get().saturating_add(1));
        last.set(next);
        next
    })
}

/// Allocates the stable file name for a new capture: `<timestamp-ms>.jpeg`.
pub fn capture_file_name() -> String {
    format!("{}.jpeg", next_capture_timestamp_ms())
}
