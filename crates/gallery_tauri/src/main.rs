//! Native desktop host entry point.

fn main() {
    gallery_tauri::run();
}
