//! Host service bundle injected into the gallery runtime.

use std::rc::Rc;

use gallery_host::{
    CameraService, FileStore, HostCapabilities, HostStrategy, KeyValueStore, TransientFetchService,
};
use gallery_host_web::{
    camera_service, file_store, host_capabilities, key_value_store, selected_host_strategy,
    transient_fetch_service,
};

#[derive(Clone)]
/// Runtime-selected host services for the capture pipeline and gallery index.
///
/// All environment-specific service selection happens before this bundle is
/// built; the pipeline itself only sees trait objects plus the strategy the
/// bundle was composed for.
pub struct GalleryHostContext {
    camera: Rc<dyn CameraService>,
    files: Rc<dyn FileStore>,
    values: Rc<dyn KeyValueStore>,
    transients: Rc<dyn TransientFetchService>,
    capabilities: HostCapabilities,
    strategy: HostStrategy,
}

impl Default for GalleryHostContext {
    fn default() -> Self {
        Self {
            camera: Rc::new(camera_service()),
            files: Rc::new(file_store()),
            values: Rc::new(key_value_store()),
            transients: Rc::new(transient_fetch_service()),
            capabilities: host_capabilities(),
            strategy: selected_host_strategy(),
        }
    }
}

impl GalleryHostContext {
    /// Builds a context from explicit services, primarily for tests and
    /// alternative shell compositions.
    pub fn new(
        camera: Rc<dyn CameraService>,
        files: Rc<dyn FileStore>,
        values: Rc<dyn KeyValueStore>,
        transients: Rc<dyn TransientFetchService>,
        strategy: HostStrategy,
    ) -> Self {
        let capabilities = match strategy {
            HostStrategy::Browser => HostCapabilities::browser(),
            HostStrategy::NativeBridge => HostCapabilities::native_bridge(),
            HostStrategy::NativeStub => HostCapabilities::native_stub(),
        };
        Self {
            camera,
            files,
            values,
            transients,
            capabilities,
            strategy,
        }
    }

    /// Camera capture service.
    pub fn camera(&self) -> &dyn CameraService {
        self.camera.as_ref()
    }

    /// Private file store.
    pub fn files(&self) -> &dyn FileStore {
        self.files.as_ref()
    }

    /// Key-value store holding the serialized gallery index.
    pub fn values(&self) -> &dyn KeyValueStore {
        self.values.as_ref()
    }

    /// Transient display-reference resolver.
    pub fn transients(&self) -> &dyn TransientFetchService {
        self.transients.as_ref()
    }

    /// Capability posture of the composed host.
    pub fn capabilities(&self) -> HostCapabilities {
        self.capabilities
    }

    /// Host strategy this context was composed for.
    pub fn strategy(&self) -> HostStrategy {
        self.strategy
    }
}
