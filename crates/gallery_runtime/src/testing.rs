//! Shared in-memory host fixtures for runtime tests.

use std::rc::Rc;

use gallery_host::{
    HostStrategy, MemoryCameraService, MemoryFileStore, MemoryKeyValueStore,
    MemoryTransientFetchService,
};

use crate::host::GalleryHostContext;

/// Memory-backed host bundle with handles kept open for scripting and inspection.
pub(crate) struct MemoryHost {
    pub camera: MemoryCameraService,
    pub files: MemoryFileStore,
    pub values: MemoryKeyValueStore,
    pub transients: MemoryTransientFetchService,
    pub ctx: GalleryHostContext,
}

/// Builds a memory-backed host context composed for `strategy`.
pub(crate) fn memory_host(strategy: HostStrategy) -> MemoryHost {
    let camera = MemoryCameraService::default();
    let files = MemoryFileStore::default();
    let values = MemoryKeyValueStore::default();
    let transients = MemoryTransientFetchService::default();
    let ctx = GalleryHostContext::new(
        Rc::new(camera.clone()),
        Rc::new(files.clone()),
        Rc::new(values.clone()),
        Rc::new(transients.clone()),
        strategy,
    );
    MemoryHost {
        camera,
        files,
        values,
        transients,
        ctx,
    }
}
