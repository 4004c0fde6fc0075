//! Typed Tauri command handlers for key-value gallery persistence.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use tauri::Manager;

type ValueMap = BTreeMap<String, String>;

fn values_file(app: &tauri::AppHandle) -> Result<PathBuf, String> {
    let dir = app
        .path()
        .app_data_dir()
        .map_err(|err| format!("failed to resolve app data dir: {err}"))?
        .join("values");
    fs::create_dir_all(&dir).map_err(|err| format!("failed to create values dir: {err}"))?;
    Ok(dir.join("values.json"))
}

fn load_value_map(path: &Path) -> Result<ValueMap, String> {
    if !path.exists() {
        return Ok(ValueMap::new());
    }
    let raw = fs::read_to_string(path)
        .map_err(|err| format!("failed to read {}: {err}", path.display()))?;
    if raw.trim().is_empty() {
        return Ok(ValueMap::new());
    }
    serde_json::from_str(&raw)
        .map_err(|err| format!("failed to parse value map {}: {err}", path.display()))
}

fn save_value_map(path: &Path, map: &ValueMap) -> Result<(), String> {
    let serialized = serde_json::to_string(map)
        .map_err(|err| format!("failed to serialize value map: {err}"))?;
    fs::write(path, serialized).map_err(|err| format!("failed to write {}: {err}", path.display()))
}

fn validate_key(key: &str) -> Result<(), String> {
    if key.is_empty() {
        Err("Value key must not be empty".to_string())
    } else {
        Ok(())
    }
}

#[derive(Debug, Clone)]
/// Scoped key-value storage service backed by a single JSON map file.
pub(crate) struct ScopedValueStore {
    file: PathBuf,
}

impl ScopedValueStore {
    /// Creates a scoped value store rooted at `root`.
    pub fn from_root(root: impl AsRef<Path>) -> Result<Self, String> {
        let root = root.as_ref();
        fs::create_dir_all(root)
            .map_err(|err| format!("failed to create values dir {}: {err}", root.display()))?;
        Ok(Self {
            file: root.join("values.json"),
        })
    }

    fn from_app(app: &tauri::AppHandle) -> Result<Self, String> {
        let file = values_file(app)?;
        let root = file
            .parent()
            .ok_or_else(|| format!("values file {} has no parent", file.display()))?;
        Self::from_root(root)
    }

    /// Loads a value payload by key.
    pub fn load(&self, key: &str) -> Result<Option<String>, String> {
        validate_key(key)?;
        let map = load_value_map(&self.file)?;
        Ok(map.get(key).cloned())
    }

    /// Saves a value payload by key.
    pub fn save(&self, key: &str, raw_json: &str) -> Result<(), String> {
        validate_key(key)?;
        let mut map = load_value_map(&self.file)?;
        map.insert(key.to_string(), raw_json.to_string());
        save_value_map(&self.file, &map)
    }

    /// Deletes a value key.
    pub fn delete(&self, key: &str) -> Result<(), String> {
        validate_key(key)?;
        let mut map = load_value_map(&self.file)?;
        map.remove(key);
        save_value_map(&self.file, &map)
    }
}

/// Loads a raw JSON payload by key.
#[tauri::command]
pub fn values_load(app: tauri::AppHandle, key: String) -> Result<Option<String>, String> {
    ScopedValueStore::from_app(&app)?.load(&key)
}

/// Saves a raw JSON payload by key.
#[tauri::command]
pub fn values_save(app: tauri::AppHandle, key: String, raw_json: String) -> Result<(), String> {
    ScopedValueStore::from_app(&app)?.save(&key, &raw_json)
}

/// Deletes a value key.
#[tauri::command]
pub fn values_delete(app: tauri::AppHandle, key: String) -> Result<(), String> {
    ScopedValueStore::from_app(&app)?.delete(&key)
}

#[cfg(test)]
mod tests {
    use super::{load_value_map, save_value_map, ScopedValueStore, ValueMap};
    use std::fs;
    use std::path::PathBuf;
    use std::process;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn temp_file_path() -> PathBuf {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos();
        std::env::temp_dir().join(format!("gallery_tauri_values_{}_{}.json", process::id(), now))
    }

    fn temp_dir_path() -> PathBuf {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos();
        let path =
            std::env::temp_dir().join(format!("gallery_tauri_values_dir_{}_{}", process::id(), now));
        fs::create_dir_all(&path).expect("create temp dir");
        path
    }

    #[test]
    fn value_map_round_trips() {
        let path = temp_file_path();
        let _ = fs::remove_file(&path);

        let initial = load_value_map(&path).expect("load should succeed when file is missing");
        assert!(initial.is_empty());

        let mut map = ValueMap::new();
        map.insert(
            "camroll.gallery.v1".to_string(),
            "[{\"storagePath\":\"1000.jpeg\"}]".to_string(),
        );
        save_value_map(&path, &map).expect("save map");
        let loaded = load_value_map(&path).expect("reload map");
        assert_eq!(loaded, map);

        let _ = fs::remove_file(path);
    }

    #[test]
    fn scoped_value_store_rejects_empty_key_for_all_operations() {
        let root = temp_dir_path();
        let store = ScopedValueStore::from_root(&root).expect("init scoped value store");

        let expected = "Value key must not be empty";
        let load_err = store.load("").expect_err("empty key load should fail");
        assert_eq!(load_err, expected);
        let save_err = store
            .save("", "[]")
            .expect_err("empty key save should fail");
        assert_eq!(save_err, expected);
        let delete_err = store.delete("").expect_err("empty key delete should fail");
        assert_eq!(delete_err, expected);

        let _ = fs::remove_dir_all(root);
    }

    #[test]
    fn scoped_value_store_overwrites_and_deletes() {
        let root = temp_dir_path();
        let store = ScopedValueStore::from_root(&root).expect("init scoped value store");

        store.save("camroll.gallery.v1", "[]").expect("save initial");
        store
            .save("camroll.gallery.v1", "[{\"storagePath\":\"1000.jpeg\"}]")
            .expect("overwrite");
        assert_eq!(
            store.load("camroll.gallery.v1").expect("load"),
            Some("[{\"storagePath\":\"1000.jpeg\"}]".to_string())
        );

        store.delete("camroll.gallery.v1").expect("delete");
        assert_eq!(store.load("camroll.gallery.v1").expect("load"), None);

        let _ = fs::remove_dir_all(root);
    }

    #[test]
    fn scoped_value_store_reports_malformed_map_parse_error() {
        let root = temp_dir_path();
        let values_path = root.join("values.json");
        fs::write(&values_path, "{\"bad\":").expect("write malformed value map");
        let store = ScopedValueStore::from_root(&root).expect("init scoped value store");

        let err = store
            .load("camroll.gallery.v1")
            .expect_err("malformed value map should fail");
        assert!(
            err.starts_with(&format!("failed to parse value map {}:", values_path.display())),
            "unexpected error: {err}"
        );

        let _ = fs::remove_dir_all(root);
    }
}
