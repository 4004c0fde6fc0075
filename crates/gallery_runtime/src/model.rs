//! Persisted gallery models and serialization helpers.

use serde::{Deserialize, Serialize};

/// Key-value store key holding the serialized gallery index.
pub const GALLERY_STORE_KEY: &str = "camroll.gallery.v1";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// One persisted gallery entry.
pub struct GalleryEntry {
    /// Stable identifier of the persisted file: the bare file name on browser
    /// hosts, the written file URI on native-bridge hosts.
    pub storage_path: String,
    /// String usable directly as an image source: an inline data URL, a
    /// transient object URL, or a bridged asset URL. Absent when the entry
    /// could not be rehydrated.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_reference: Option<String>,
}

impl GalleryEntry {
    /// Returns whether `storage_path` is a relative on-disk name that the
    /// private file store can read back directly.
    ///
    /// Native-bridge entries carry absolute URIs (`file://...`) and are never
    /// re-read during hydration.
    pub fn has_relative_storage_path(&self) -> bool {
        !self.storage_path.contains("://") && !self.storage_path.starts_with('/')
    }
}

/// Serializes the gallery sequence for key-value persistence.
///
/// # Errors
///
/// Returns an error when JSON serialization fails.
pub(crate) fn serialize_entries(entries: &[GalleryEntry]) -> Result<String, String> {
    serde_json::to_string(entries).map_err(|e| e.to_string())
}

/// Deserializes a persisted gallery sequence.
///
/// # Errors
///
/// Returns an error when the stored payload is not a valid entry array.
pub(crate) fn deserialize_entries(raw: &str) -> Result<Vec<GalleryEntry>, String> {
    serde_json::from_str(raw).map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn entries_serialize_with_camel_case_wire_names() {
        let entry = GalleryEntry {
            storage_path: "1000.jpeg".to_string(),
            display_reference: Some("blob:abc".to_string()),
        };

        let value = serde_json::to_value(&entry).expect("serialize entry");
        assert_eq!(
            value,
            json!({"storagePath": "1000.jpeg", "displayReference": "blob:abc"})
        );
    }

    #[test]
    fn entries_without_display_reference_omit_the_field() {
        let entry = GalleryEntry {
            storage_path: "1000.jpeg".to_string(),
            display_reference: None,
        };

        let value = serde_json::to_value(&entry).expect("serialize entry");
        assert_eq!(value, json!({"storagePath": "1000.jpeg"}));

        let parsed: GalleryEntry =
            serde_json::from_value(json!({"storagePath": "1000.jpeg"})).expect("deserialize entry");
        assert_eq!(parsed.display_reference, None);
    }

    #[test]
    fn entry_sequences_round_trip_in_order() {
        let entries = vec![
            GalleryEntry {
                storage_path: "1001.jpeg".to_string(),
                display_reference: Some("data:image/jpeg;base64,aGk=".to_string()),
            },
            GalleryEntry {
                storage_path: "1000.jpeg".to_string(),
                display_reference: None,
            },
        ];

        let raw = serialize_entries(&entries).expect("serialize sequence");
        let parsed = deserialize_entries(&raw).expect("deserialize sequence");
        assert_eq!(parsed, entries);
    }

    #[test]
    fn malformed_sequences_are_reported() {
        deserialize_entries("{\"storagePath\":").expect_err("malformed payload should fail");
        deserialize_entries("{}").expect_err("non-array payload should fail");
    }

    #[test]
    fn relative_storage_path_detection_excludes_uris() {
        let relative = GalleryEntry {
            storage_path: "1000.jpeg".to_string(),
            display_reference: None,
        };
        assert!(relative.has_relative_storage_path());

        let bridged = GalleryEntry {
            storage_path: "file:///data/app/files/1000.jpeg".to_string(),
            display_reference: None,
        };
        assert!(!bridged.has_relative_storage_path());

        let absolute = GalleryEntry {
            storage_path: "/data/app/files/1000.jpeg".to_string(),
            display_reference: None,
        };
        assert!(!absolute.has_relative_storage_path());
    }
}
