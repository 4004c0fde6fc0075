//! Tauri desktop host shell for the camroll gallery runtime.
//!
//! This crate keeps command registration localized so host-domain IPC
//! handlers can be added without coupling the runtime layer directly to Tauri
//! internals. It implements the key-value and private-file primitives on
//! disk; camera capture is provided by the host camera plugin registered by
//! the embedding application, not by this crate.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

#[doc(hidden)]
pub mod files;
mod values;

/// Starts the Tauri desktop host process.
pub fn run() {
    tauri::Builder::default()
        .invoke_handler(tauri::generate_handler![
            files::files_read,
            files::files_write,
            values::values_load,
            values::values_save,
            values::values_delete
        ])
        .run(tauri::generate_context!())
        .expect("gallery_tauri failed to run Tauri application");
}
