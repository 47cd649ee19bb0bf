//! Fallback provider for platforms without volume support

use crate::error::CacheDiskResult;
use crate::platform::provider::{Locality, MountedVolume, VolumeProvider};
use tracing::warn;

/// Provider that reports no volumes and never classifies
pub struct UnsupportedProvider;

impl UnsupportedProvider {
    pub fn new() -> Self {
        Self
    }
}

impl Default for UnsupportedProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl VolumeProvider for UnsupportedProvider {
    fn provider_name(&self) -> &'static str {
        "unsupported"
    }

    fn volumes(&self) -> CacheDiskResult<Vec<MountedVolume>> {
        warn!(
            "Volume enumeration is not supported on {}.",
            std::env::consts::OS
        );
        Ok(Vec::new())
    }

    fn locality(&self, _volume: &MountedVolume) -> Locality {
        Locality::Unknown
    }
}
