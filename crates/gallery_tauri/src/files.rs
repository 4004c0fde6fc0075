//! Typed Tauri command handlers for private gallery file storage.
//!
//! Payloads cross the command boundary base64-encoded. Relative names are
//! scoped to per-directory roots under the app data dir; absolute reads are
//! allowed only for paths that resolve inside one of those roots, which is
//! where the host camera plugin drops fresh captures.

use std::fs;
use std::path::{Path, PathBuf};

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use gallery_host::{StorageDirectory, WrittenFile};
use tauri::Manager;

fn validate_file_name(name: &str) -> Result<&str, String> {
    if name.is_empty() {
        return Err("file name must not be empty".to_string());
    }
    if name.contains('/') || name.contains('\\') {
        return Err(format!("file name `{name}` must not contain path separators"));
    }
    if name == "." || name == ".." {
        return Err(format!("file name `{name}` must not reference directories"));
    }
    Ok(name)
}

#[derive(Debug, Clone)]
/// Scoped file storage service with one on-disk root per storage directory.
pub struct ScopedFileStore {
    data: PathBuf,
    documents: PathBuf,
    cache: PathBuf,
}

impl ScopedFileStore {
    /// Creates a scoped store over explicit per-directory roots.
    pub fn from_roots(
        data: impl Into<PathBuf>,
        documents: impl Into<PathBuf>,
        cache: impl Into<PathBuf>,
    ) -> Result<Self, String> {
        let store = Self {
            data: data.into(),
            documents: documents.into(),
            cache: cache.into(),
        };
        for root in [&store.data, &store.documents, &store.cache] {
            fs::create_dir_all(root)
                .map_err(|err| format!("failed to create storage root {}: {err}", root.display()))?;
        }
        Ok(store)
    }

    fn from_app(app: &tauri::AppHandle) -> Result<Self, String> {
        let base = app
            .path()
            .app_data_dir()
            .map_err(|err| format!("failed to resolve app data dir: {err}"))?;
        Self::from_roots(
            base.join("gallery_data"),
            base.join("gallery_documents"),
            base.join("gallery_cache"),
        )
    }

    fn root(&self, directory: StorageDirectory) -> &Path {
        match directory {
            StorageDirectory::Data => &self.data,
            StorageDirectory::Documents => &self.documents,
            StorageDirectory::Cache => &self.cache,
        }
    }

    fn resolve_read_target(
        &self,
        path: &str,
        directory: StorageDirectory,
    ) -> Result<PathBuf, String> {
        let raw = path.strip_prefix("file://").unwrap_or(path);
        if !Path::new(raw).is_absolute() {
            return Ok(self.root(directory).join(validate_file_name(raw)?));
        }

        let canonical = fs::canonicalize(raw)
            .map_err(|err| format!("failed to resolve {raw}: {err}"))?;
        let scoped = [&self.data, &self.documents, &self.cache]
            .into_iter()
            .any(|root| {
                fs::canonicalize(root)
                    .map(|root| canonical.starts_with(&root))
                    .unwrap_or(false)
            });
        if !scoped {
            return Err(format!(
                "path {} resolves outside scoped storage roots",
                canonical.display()
            ));
        }
        Ok(canonical)
    }

    /// Reads a file and returns its contents base64-encoded.
    pub fn read(&self, path: &str, directory: StorageDirectory) -> Result<String, String> {
        let target = self.resolve_read_target(path, directory)?;
        let bytes = fs::read(&target)
            .map_err(|err| format!("failed to read {}: {err}", target.display()))?;
        Ok(BASE64.encode(bytes))
    }

    /// Decodes a base64 payload and writes it under `path` in the directory root.
    pub fn write(
        &self,
        path: &str,
        data: &str,
        directory: StorageDirectory,
    ) -> Result<WrittenFile, String> {
        let name = validate_file_name(path)?;
        let target = self.root(directory).join(name);
        let bytes = BASE64
            .decode(data.as_bytes())
            .map_err(|err| format!("invalid base64 payload for {name}: {err}"))?;
        fs::write(&target, bytes)
            .map_err(|err| format!("failed to write {}: {err}", target.display()))?;
        Ok(WrittenFile {
            uri: format!("file://{}", target.display()),
        })
    }
}

/// Reads a file from private storage as a base64 payload.
#[tauri::command]
pub fn files_read(
    app: tauri::AppHandle,
    path: String,
    directory: StorageDirectory,
) -> Result<String, String> {
    ScopedFileStore::from_app(&app)?.read(&path, directory)
}

/// Writes a base64 payload into private storage.
#[tauri::command]
pub fn files_write(
    app: tauri::AppHandle,
    path: String,
    data: String,
    directory: StorageDirectory,
) -> Result<WrittenFile, String> {
    ScopedFileStore::from_app(&app)?.write(&path, &data, directory)
}
