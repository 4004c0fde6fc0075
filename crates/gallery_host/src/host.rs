//! Shared host-strategy and capability models for browser and native-bridge composition.

/// Stable host strategy selected for the current build/runtime composition path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostStrategy {
    /// Plain browser runtime; files and captures stay inside the browser sandbox.
    Browser,
    /// Web UI hosted in a native shell with bridged camera/filesystem access.
    NativeBridge,
    /// Native composition with placeholder/no-op adapters.
    NativeStub,
}

impl HostStrategy {
    /// Returns a stable string token for diagnostics and runtime inspection.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Browser => "browser",
            Self::NativeBridge => "native-bridge",
            Self::NativeStub => "native-stub",
        }
    }

    /// Returns whether captures on this strategy carry a direct byte-source reference.
    pub const fn uses_source_uri(self) -> bool {
        matches!(self, Self::NativeBridge | Self::NativeStub)
    }
}

/// Host availability state for one optional capability domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CapabilityStatus {
    /// Capability is available and may be used immediately.
    Available,
    /// Capability is not implemented or not supported on the active host.
    Unavailable,
    /// Capability exists but requires an explicit user activation or permission grant.
    RequiresUserActivation,
}

impl CapabilityStatus {
    /// Returns whether the capability can be used without further activation.
    pub const fn is_available(self) -> bool {
        matches!(self, Self::Available)
    }
}

/// Host capability snapshot exposed to the gallery runtime.
///
/// The snapshot is intentionally coarse-grained and stable across browser and
/// native-bridge compositions so the runtime can branch on capability posture
/// without importing host-specific adapter types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HostCapabilities {
    /// Camera capture availability.
    pub camera: CapabilityStatus,
    /// Private file read/write availability.
    pub private_files: CapabilityStatus,
    /// Key-value persistence availability.
    pub key_value: CapabilityStatus,
}

impl HostCapabilities {
    /// Browser-default capability posture.
    pub const fn browser() -> Self {
        Self {
            camera: CapabilityStatus::RequiresUserActivation,
            private_files: CapabilityStatus::Available,
            key_value: CapabilityStatus::Available,
        }
    }

    /// Native-bridge capability posture.
    pub const fn native_bridge() -> Self {
        Self {
            camera: CapabilityStatus::Available,
            private_files: CapabilityStatus::Available,
            key_value: CapabilityStatus::Available,
        }
    }

    /// Stub native capability posture.
    pub const fn native_stub() -> Self {
        Self {
            camera: CapabilityStatus::Unavailable,
            private_files: CapabilityStatus::Unavailable,
            key_value: CapabilityStatus::Unavailable,
        }
    }
}
