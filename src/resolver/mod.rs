//! Cache path resolution
//!
//! Walks the preferred volumes in order, keeps the first one that is
//! mounted, local, and proven writable, and falls back to the home
//! directory when none qualifies. Skipped candidates are recorded on the
//! resolution so callers can show why each one lost.

mod probe;

pub use probe::{ensure_directory, probe_write};

use crate::error::{CacheDiskError, CacheDiskResult};
use crate::platform::{create_provider, Locality, MountedVolume, VolumeProvider};
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Why a preferred volume was passed over
#[derive(Debug, Clone, PartialEq)]
pub enum RejectReason {
    /// No mounted volume carries this name
    NotMounted,
    /// The volume is backed by a network filesystem
    NetworkMounted,
    /// The platform could not say whether the volume is local
    LocalityUnknown,
    /// The cache directory could not be created on the volume
    CreateFailed { detail: String },
    /// The write probe failed inside the cache directory
    ProbeFailed { detail: String },
}

impl RejectReason {
    pub fn as_label(&self) -> &'static str {
        match self {
            Self::NotMounted => "not-mounted",
            Self::NetworkMounted => "network-mounted",
            Self::LocalityUnknown => "locality-unknown",
            Self::CreateFailed { .. } => "create-failed",
            Self::ProbeFailed { .. } => "probe-failed",
        }
    }
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotMounted => write!(f, "not mounted"),
            Self::NetworkMounted => write!(f, "network drive"),
            Self::LocalityUnknown => write!(f, "could not determine locality"),
            Self::CreateFailed { detail } => {
                write!(f, "cache directory could not be created: {}", detail)
            }
            Self::ProbeFailed { detail } => write!(f, "not writable: {}", detail),
        }
    }
}

/// One passed-over candidate in the decision trail
#[derive(Debug, Clone, PartialEq)]
pub struct Rejection {
    pub volume: String,
    pub reason: RejectReason,
}

/// Where the resolved path landed
#[derive(Debug, Clone, PartialEq)]
pub enum ResolutionSource {
    /// A preferred volume won
    Volume { name: String },
    /// No preferred volume qualified
    HomeFallback,
}

impl ResolutionSource {
    pub fn as_label(&self) -> &'static str {
        match self {
            Self::Volume { .. } => "volume",
            Self::HomeFallback => "home-fallback",
        }
    }

    /// Winning volume name, when a volume won
    pub fn volume_name(&self) -> Option<&str> {
        match self {
            Self::Volume { name } => Some(name),
            Self::HomeFallback => None,
        }
    }
}

/// Outcome of a resolution, including the trail of skipped candidates
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    pub path: PathBuf,
    pub source: ResolutionSource,
    pub rejections: Vec<Rejection>,
}

impl Resolution {
    pub fn is_fallback(&self) -> bool {
        self.source == ResolutionSource::HomeFallback
    }
}

/// Resolves cache paths against a volume provider and a home directory
pub struct Resolver {
    provider: Box<dyn VolumeProvider>,
    home: PathBuf,
}

impl Resolver {
    pub fn new(provider: Box<dyn VolumeProvider>, home: PathBuf) -> Self {
        Self { provider, home }
    }

    /// Build a resolver for the detected platform and the current user
    pub fn from_host() -> CacheDiskResult<Self> {
        let home = dirs::home_dir().ok_or_else(|| CacheDiskError::HomeUnavailable {
            reason: "no home directory for the current user".to_string(),
        })?;
        Ok(Self::new(create_provider(), home))
    }

    /// Resolve a cache path.
    ///
    /// `preferred` is walked in order; the first volume that is mounted,
    /// local, and passes the write probe wins. When none does, the cache
    /// directory is created under the home directory instead. `cache_dir`
    /// must be relative; an absolute path fails before any volume or
    /// filesystem state is touched.
    pub fn resolve(&self, preferred: &[String], cache_dir: &str) -> CacheDiskResult<Resolution> {
        if Path::new(cache_dir).is_absolute() {
            return Err(CacheDiskError::invalid_argument(format!(
                "cache directory '{}' must be a relative path",
                cache_dir
            )));
        }

        debug!(
            "Resolving via the {} provider with preferred volumes {:?} and cache dir '{}'",
            self.provider.provider_name(),
            preferred,
            cache_dir
        );

        let volumes = match self.provider.volumes() {
            Ok(volumes) => volumes,
            Err(e) => {
                warn!("Failed to enumerate volumes: {}", e);
                Vec::new()
            }
        };

        let mut rejections = Vec::new();
        for name in preferred {
            match self.try_volume(name, &volumes, cache_dir) {
                Ok(path) => {
                    info!("Cache path set to '{}' on volume '{}'.", path.display(), name);
                    return Ok(Resolution {
                        path,
                        source: ResolutionSource::Volume { name: name.clone() },
                        rejections,
                    });
                }
                Err(reason) => rejections.push(Rejection {
                    volume: name.clone(),
                    reason,
                }),
            }
        }

        let home_path = self.home.join(cache_dir);
        ensure_directory(&home_path).map_err(|e| CacheDiskError::HomeUnavailable {
            reason: format!(
                "failed to create '{}' in the home directory: {}",
                cache_dir, e
            ),
        })?;
        info!(
            "No suitable volume found. Falling back to home directory: '{}'.",
            home_path.display()
        );
        Ok(Resolution {
            path: home_path,
            source: ResolutionSource::HomeFallback,
            rejections,
        })
    }

    /// Vet one preferred volume, returning the ready cache path or the
    /// reason it was skipped
    fn try_volume(
        &self,
        name: &str,
        volumes: &[MountedVolume],
        cache_dir: &str,
    ) -> Result<PathBuf, RejectReason> {
        let Some(volume) = volumes.iter().find(|v| v.name == name) else {
            warn!("Volume '{}' is not mounted.", name);
            return Err(RejectReason::NotMounted);
        };

        match self.provider.locality(volume) {
            Locality::Local => {}
            Locality::Network => {
                warn!("Volume '{}' is a network drive. Skipping.", name);
                return Err(RejectReason::NetworkMounted);
            }
            Locality::Unknown => {
                warn!(
                    "Could not determine whether volume '{}' is local. Skipping.",
                    name
                );
                return Err(RejectReason::LocalityUnknown);
            }
        }

        let cache_path = volume.root.join(cache_dir);
        if let Err(e) = ensure_directory(&cache_path) {
            warn!("Failed to create directory '{}': {}", cache_path.display(), e);
            return Err(RejectReason::CreateFailed {
                detail: e.to_string(),
            });
        }
        if let Err(e) = probe_write(&cache_path) {
            warn!("Directory '{}' is not writable: {}", cache_path.display(), e);
            return Err(RejectReason::ProbeFailed {
                detail: e.to_string(),
            });
        }

        Ok(cache_path)
    }
}
