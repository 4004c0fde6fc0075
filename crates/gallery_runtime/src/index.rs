//! Persisted, ordered gallery index with a typed hydration state machine.

use std::{cell::RefCell, rc::Rc};

use gallery_host::{FileStore, HostStrategy, StorageDirectory};
use gallery_host_web::{data_url_payload, jpeg_data_url};
use leptos::logging;

use crate::{error::GalleryError, host::GalleryHostContext, model::GalleryEntry, persistence};

#[derive(Debug, Default)]
enum IndexState {
    #[default]
    Unloaded,
    Loaded {
        entries: Vec<GalleryEntry>,
        generation: u64,
    },
}

#[derive(Debug, Clone, Default)]
/// Ordered gallery of persisted captures, newest first.
///
/// The index starts `Unloaded` and must be hydrated from the key-value store
/// before it accepts mutations; appending while unloaded would overwrite the
/// persisted history with an empty-seeded list. Every mutation re-serializes
/// the full sequence, which stays cheap at gallery scale.
pub struct GalleryIndex {
    state: Rc<RefCell<IndexState>>,
}

impl GalleryIndex {
    /// Creates an unloaded index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns whether hydration has completed.
    pub fn is_loaded(&self) -> bool {
        matches!(&*self.state.borrow(), IndexState::Loaded { .. })
    }

    /// Returns the latest in-memory sequence without touching storage.
    ///
    /// Unloaded indexes report an empty sequence.
    pub fn current(&self) -> Vec<GalleryEntry> {
        match &*self.state.borrow() {
            IndexState::Unloaded => Vec::new(),
            IndexState::Loaded { entries, .. } => entries.clone(),
        }
    }

    /// Hydrates the index from the key-value store.
    ///
    /// An absent store value yields an empty gallery. On browser hosts every
    /// entry with a relative storage path is re-read from the private file
    /// store and its display reference rebuilt as an inline data URL, because
    /// transient references do not survive a restart. A failed per-entry read
    /// is logged and leaves that entry without a display reference; it never
    /// aborts hydration of the rest.
    ///
    /// # Errors
    ///
    /// Returns [`GalleryError::Store`] when the store itself cannot be read or
    /// its payload is malformed.
    pub async fn hydrate(
        &self,
        ctx: &GalleryHostContext,
    ) -> Result<Vec<GalleryEntry>, GalleryError> {
        let stored = persistence::load_entries(ctx)
            .await
            .map_err(GalleryError::Store)?;
        let mut entries = stored.unwrap_or_default();

        if ctx.strategy() == HostStrategy::Browser {
            for entry in &mut entries {
                if !entry.has_relative_storage_path() {
                    continue;
                }
                match ctx
                    .files()
                    .read_file(&entry.storage_path, StorageDirectory::Data)
                    .await
                {
                    Ok(data) => {
                        entry.display_reference = Some(jpeg_data_url(data_url_payload(&data)));
                    }
                    Err(err) => {
                        logging::warn!(
                            "gallery entry {} could not be rehydrated: {err}",
                            entry.storage_path
                        );
                        entry.display_reference = None;
                    }
                }
            }
        }

        let mut state = self.state.borrow_mut();
        let generation = match &*state {
            IndexState::Unloaded => 0,
            IndexState::Loaded { generation, .. } => generation + 1,
        };
        *state = IndexState::Loaded {
            entries: entries.clone(),
            generation,
        };
        Ok(entries)
    }

    /// Prepends `entry`, persists the full updated sequence, and returns it.
    ///
    /// The persist is validated against the generation observed on entry: if
    /// another append committed while this one was suspended at the store
    /// write, the prepend is recomputed on the fresh sequence and persisted
    /// again, so concurrent captures cannot lose each other's entries.
    ///
    /// # Errors
    ///
    /// Returns [`GalleryError::NotLoaded`] before hydration and
    /// [`GalleryError::Store`] when persisting fails; the in-memory sequence
    /// is left untouched on failure.
    pub async fn append(
        &self,
        ctx: &GalleryHostContext,
        entry: GalleryEntry,
    ) -> Result<Vec<GalleryEntry>, GalleryError> {
        loop {
            let (observed_generation, next) = {
                let state = self.state.borrow();
                match &*state {
                    IndexState::Unloaded => return Err(GalleryError::NotLoaded),
                    IndexState::Loaded {
                        entries,
                        generation,
                    } => {
                        let mut next = Vec::with_capacity(entries.len() + 1);
                        next.push(entry.clone());
                        next.extend(entries.iter().cloned());
                        (*generation, next)
                    }
                }
            };

            persistence::save_entries(ctx, &next)
                .await
                .map_err(GalleryError::Store)?;

            let mut state = self.state.borrow_mut();
            match &mut *state {
                IndexState::Unloaded => return Err(GalleryError::NotLoaded),
                IndexState::Loaded {
                    entries,
                    generation,
                } => {
                    if *generation == observed_generation {
                        *entries = next;
                        *generation += 1;
                        return Ok(entries.clone());
                    }
                    // Another append landed while this one was persisting;
                    // recompute against the fresh sequence.
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;
    use gallery_host::{HostStrategy, KeyValueStore};
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{model::GALLERY_STORE_KEY, testing::memory_host};

    fn entry(storage_path: &str, display_reference: Option<&str>) -> GalleryEntry {
        GalleryEntry {
            storage_path: storage_path.to_string(),
            display_reference: display_reference.map(str::to_string),
        }
    }

    #[test]
    fn unloaded_index_reports_empty_and_rejects_appends() {
        let host = memory_host(HostStrategy::Browser);
        let index = GalleryIndex::new();

        assert!(!index.is_loaded());
        assert_eq!(index.current(), Vec::<GalleryEntry>::new());
        assert_eq!(
            block_on(index.append(&host.ctx, entry("1000.jpeg", None))),
            Err(GalleryError::NotLoaded)
        );
        assert_eq!(
            host.values.raw(GALLERY_STORE_KEY),
            None,
            "a rejected append must not seed the store"
        );
    }

    #[test]
    fn hydrating_an_empty_store_yields_an_empty_loaded_gallery() {
        let host = memory_host(HostStrategy::Browser);
        let index = GalleryIndex::new();

        let entries = block_on(index.hydrate(&host.ctx)).expect("hydrate");
        assert_eq!(entries, Vec::<GalleryEntry>::new());
        assert!(index.is_loaded());
    }

    #[test]
    fn append_prepends_and_persists_the_full_sequence() {
        let host = memory_host(HostStrategy::Browser);
        let index = GalleryIndex::new();
        block_on(index.hydrate(&host.ctx)).expect("hydrate");

        block_on(index.append(&host.ctx, entry("1000.jpeg", Some("blob:one")))).expect("append");
        let latest =
            block_on(index.append(&host.ctx, entry("1001.jpeg", Some("blob:two")))).expect("append");

        assert_eq!(latest[0].storage_path, "1001.jpeg");
        assert_eq!(latest[1].storage_path, "1000.jpeg");
        assert_eq!(index.current(), latest);

        let raw = host.values.raw(GALLERY_STORE_KEY).expect("persisted sequence");
        let stored: Vec<GalleryEntry> = serde_json::from_str(&raw).expect("stored json");
        assert_eq!(stored, latest);
    }

    #[test]
    fn browser_hydration_rebuilds_display_references_from_stored_files() {
        let host = memory_host(HostStrategy::Browser);
        host.files
            .insert("1000.jpeg", "aGVsbG8=", StorageDirectory::Data);
        block_on(host.ctx.values().save_value(
            GALLERY_STORE_KEY,
            "[{\"storagePath\":\"1000.jpeg\",\"displayReference\":\"blob:stale\"}]",
        ))
        .expect("seed store");

        let index = GalleryIndex::new();
        let entries = block_on(index.hydrate(&host.ctx)).expect("hydrate");
        assert_eq!(
            entries,
            vec![entry("1000.jpeg", Some("data:image/jpeg;base64,aGVsbG8="))]
        );
    }

    #[test]
    fn native_bridge_hydration_trusts_stored_display_references() {
        let host = memory_host(HostStrategy::NativeBridge);
        block_on(host.ctx.values().save_value(
            GALLERY_STORE_KEY,
            "[{\"storagePath\":\"file:///captures/1000.jpeg\",\"displayReference\":\"asset://localhost/captures/1000.jpeg\"}]",
        ))
        .expect("seed store");

        let index = GalleryIndex::new();
        let entries = block_on(index.hydrate(&host.ctx)).expect("hydrate");
        assert_eq!(
            entries,
            vec![entry(
                "file:///captures/1000.jpeg",
                Some("asset://localhost/captures/1000.jpeg")
            )]
        );
    }

    #[test]
    fn missing_file_for_one_entry_does_not_abort_hydration_of_the_rest() {
        let host = memory_host(HostStrategy::Browser);
        host.files
            .insert("1000.jpeg", "b25l", StorageDirectory::Data);
        host.files
            .insert("1002.jpeg", "dGhyZWU=", StorageDirectory::Data);
        block_on(host.ctx.values().save_value(
            GALLERY_STORE_KEY,
            "[{\"storagePath\":\"1002.jpeg\"},{\"storagePath\":\"1001.jpeg\"},{\"storagePath\":\"1000.jpeg\"}]",
        ))
        .expect("seed store");

        let index = GalleryIndex::new();
        let entries = block_on(index.hydrate(&host.ctx)).expect("hydrate");

        assert_eq!(entries.len(), 3);
        assert_eq!(
            entries[0].display_reference.as_deref(),
            Some("data:image/jpeg;base64,dGhyZWU=")
        );
        assert_eq!(
            entries[1].display_reference, None,
            "the entry with a missing file stays listed without an image"
        );
        assert_eq!(
            entries[2].display_reference.as_deref(),
            Some("data:image/jpeg;base64,b25l")
        );
    }

    #[test]
    fn rehydrating_twice_is_idempotent_over_path_order_and_count() {
        let host = memory_host(HostStrategy::Browser);
        host.files
            .insert("1000.jpeg", "b25l", StorageDirectory::Data);
        host.files
            .insert("1001.jpeg", "dHdv", StorageDirectory::Data);
        block_on(host.ctx.values().save_value(
            GALLERY_STORE_KEY,
            "[{\"storagePath\":\"1001.jpeg\"},{\"storagePath\":\"1000.jpeg\"}]",
        ))
        .expect("seed store");

        let index = GalleryIndex::new();
        let first = block_on(index.hydrate(&host.ctx)).expect("first hydrate");
        let second = block_on(index.hydrate(&host.ctx)).expect("second hydrate");

        assert_eq!(first, second);
        let paths: Vec<_> = second.iter().map(|e| e.storage_path.as_str()).collect();
        assert_eq!(paths, vec!["1001.jpeg", "1000.jpeg"]);
    }

    mod interleaving {
        use std::{
            future::Future,
            pin::Pin,
            rc::Rc,
            task::{Context, Poll},
        };

        use gallery_host::{
            KeyValueFuture, MemoryCameraService, MemoryFileStore, MemoryKeyValueStore,
            MemoryTransientFetchService,
        };

        use super::*;
        use crate::host::GalleryHostContext;
        use pretty_assertions::assert_eq;

        struct YieldOnce(bool);

        impl Future for YieldOnce {
            type Output = ();

            fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
                if self.0 {
                    Poll::Ready(())
                } else {
                    self.0 = true;
                    cx.waker().wake_by_ref();
                    Poll::Pending
                }
            }
        }

        #[derive(Clone, Default)]
        /// Store whose saves suspend once before committing, forcing two
        /// in-flight appends to interleave at the persist await.
        struct YieldingStore {
            inner: MemoryKeyValueStore,
        }

        impl KeyValueStore for YieldingStore {
            fn load_value<'a>(
                &'a self,
                key: &'a str,
            ) -> KeyValueFuture<'a, Result<Option<String>, String>> {
                self.inner.load_value(key)
            }

            fn save_value<'a>(
                &'a self,
                key: &'a str,
                raw_json: &'a str,
            ) -> KeyValueFuture<'a, Result<(), String>> {
                Box::pin(async move {
                    YieldOnce(false).await;
                    self.inner.save_value(key, raw_json).await
                })
            }

            fn delete_value<'a>(&'a self, key: &'a str) -> KeyValueFuture<'a, Result<(), String>> {
                self.inner.delete_value(key)
            }
        }

        #[test]
        fn interleaved_appends_preserve_both_entries() {
            let store = YieldingStore::default();
            let ctx = GalleryHostContext::new(
                Rc::new(MemoryCameraService::default()),
                Rc::new(MemoryFileStore::default()),
                Rc::new(store.clone()),
                Rc::new(MemoryTransientFetchService::default()),
                HostStrategy::Browser,
            );
            let index = GalleryIndex::new();
            block_on(index.hydrate(&ctx)).expect("hydrate");

            let first = index.append(&ctx, entry("1000.jpeg", None));
            let second = index.append(&ctx, entry("1001.jpeg", None));
            let (first, second) = block_on(futures::future::join(first, second));
            first.expect("first append");
            second.expect("second append");

            let current = index.current();
            let paths: Vec<_> = current.iter().map(|e| e.storage_path.as_str()).collect();
            assert_eq!(current.len(), 2, "neither append may be lost: {paths:?}");
            assert!(paths.contains(&"1000.jpeg"));
            assert!(paths.contains(&"1001.jpeg"));

            let raw = store.inner.raw(GALLERY_STORE_KEY).expect("persisted sequence");
            let stored: Vec<GalleryEntry> = serde_json::from_str(&raw).expect("stored json");
            assert_eq!(stored, current, "persisted state must match the final sequence");
        }
    }

    #[test]
    fn malformed_store_payload_fails_hydration_with_a_store_error() {
        let host = memory_host(HostStrategy::Browser);
        block_on(host.ctx.values().save_value(GALLERY_STORE_KEY, "not-json")).expect("seed store");

        let index = GalleryIndex::new();
        let err = block_on(index.hydrate(&host.ctx)).expect_err("hydrate should fail");
        assert!(matches!(err, GalleryError::Store(_)));
        assert!(!index.is_loaded());
    }
}
