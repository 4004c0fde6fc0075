//! Private file storage contracts shared across host implementations.

use std::{cell::RefCell, collections::HashMap, future::Future, pin::Pin, rc::Rc};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
/// Application-private storage root a file operation is scoped to.
pub enum StorageDirectory {
    /// Durable app data root; gallery images live here.
    #[default]
    Data,
    /// User-document root; used by the diagnostics read path.
    Documents,
    /// Evictable cache root.
    Cache,
}

impl StorageDirectory {
    /// Returns a stable string token for interop and diagnostics.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Data => "data",
            Self::Documents => "documents",
            Self::Cache => "cache",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// Result payload for a completed file write.
pub struct WrittenFile {
    /// Host URI of the written file, stable for the lifetime of the file.
    pub uri: String,
}

/// Object-safe boxed future used by [`FileStore`] async methods.
pub type FileStoreFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// Host service for byte-level file access in application-private storage.
///
/// Payloads cross this boundary base64-encoded; the store never interprets
/// them beyond opaque text.
pub trait FileStore {
    /// Reads a file and returns its contents as a base64 string.
    fn read_file<'a>(
        &'a self,
        path: &'a str,
        directory: StorageDirectory,
    ) -> FileStoreFuture<'a, Result<String, String>>;

    /// Writes a base64 payload to a file, creating or replacing it.
    fn write_file<'a>(
        &'a self,
        path: &'a str,
        data: &'a str,
        directory: StorageDirectory,
    ) -> FileStoreFuture<'a, Result<WrittenFile, String>>;
}

#[derive(Debug, Clone, Copy, Default)]
/// No-op file store for unsupported targets and baseline tests.
pub struct NoopFileStore;

impl NoopFileStore {
    fn unsupported(op: &str) -> String {
        format!("file store unavailable: {op}")
    }
}

impl FileStore for NoopFileStore {
    fn read_file<'a>(
        &'a self,
        _path: &'a str,
        _directory: StorageDirectory,
    ) -> FileStoreFuture<'a, Result<String, String>> {
        Box::pin(async { Err(Self::unsupported("read_file")) })
    }

    fn write_file<'a>(
        &'a self,
        _path: &'a str,
        _data: &'a str,
        _directory: StorageDirectory,
    ) -> FileStoreFuture<'a, Result<WrittenFile, String>> {
        Box::pin(async { Err(Self::unsupported("write_file")) })
    }
}

#[derive(Debug, Clone, Default)]
/// In-memory file store keyed by storage root and path.
pub struct MemoryFileStore {
    inner: Rc<RefCell<HashMap<(StorageDirectory, String), String>>>,
}

impl MemoryFileStore {
    /// Seeds a file without going through the async write path.
    pub fn insert(&self, path: impl Into<String>, data: impl Into<String>, dir: StorageDirectory) {
        self.inner.borrow_mut().insert((dir, path.into()), data.into());
    }

    /// Removes a file, simulating external deletion.
    pub fn remove(&self, path: &str, dir: StorageDirectory) {
        self.inner.borrow_mut().remove(&(dir, path.to_string()));
    }

    fn uri_for(path: &str, dir: StorageDirectory) -> String {
        format!("memory://{}/{}", dir.as_str(), path)
    }
}

impl FileStore for MemoryFileStore {
    fn read_file<'a>(
        &'a self,
        path: &'a str,
        directory: StorageDirectory,
    ) -> FileStoreFuture<'a, Result<String, String>> {
        Box::pin(async move {
            self.inner
                .borrow()
                .get(&(directory, path.to_string()))
                .cloned()
                .ok_or_else(|| format!("file not found: {}/{}", directory.as_str(), path))
        })
    }

    fn write_file<'a>(
        &'a self,
        path: &'a str,
        data: &'a str,
        directory: StorageDirectory,
    ) -> FileStoreFuture<'a, Result<WrittenFile, String>> {
        Box::pin(async move {
            self.inner
                .borrow_mut()
                .insert((directory, path.to_string()), data.to_string());
            Ok(WrittenFile {
                uri: Self::uri_for(path, directory),
            })
        })
    }
}
