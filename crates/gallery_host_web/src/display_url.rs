//! Display-URL rewriting for bridged file URIs.

/// Rewrites a bridged `file://` URI into a form the rendering webview can
/// fetch through the host asset protocol.
///
/// Native webviews refuse to load raw filesystem URIs, so the written file's
/// URI must be rewritten before it can be used as an image source. URIs that
/// are not `file://` scoped (data URLs, object URLs, asset URLs) pass through
/// unchanged.
pub fn bridge_display_url(uri: &str) -> String {
    match uri.strip_prefix("file://") {
        Some(path) => format!("asset://localhost{}", encode_path(path)),
        None => uri.to_string(),
    }
}

fn encode_path(path: &str) -> String {
    let mut encoded = String::with_capacity(path.len());
    for byte in path.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' | b'/' => {
                encoded.push(byte as char)
            }
            other => {
                encoded.push('%');
                encoded.push_str(&format!("{other:02X}"));
            }
        }
    }
    encoded
}
