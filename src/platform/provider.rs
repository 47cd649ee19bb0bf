//! Volume provider abstraction
//!
//! Each supported platform implements `VolumeProvider`; the resolver only
//! ever talks to the trait.

use crate::error::CacheDiskResult;
use std::fmt;
use std::path::PathBuf;

/// Filesystem-type markers that identify a network-backed mount.
///
/// Matched as substrings of the parsed filesystem type, so `nfs4`,
/// `fuse.sshfs` and `afpfs` all classify as network.
pub const NETWORK_FS_MARKERS: &[&str] = &[
    "smb", "nfs", "afp", "cifs", "webdav", "sshfs", "davfs",
];

/// Classifier verdict for a mounted volume
///
/// `Unknown` is treated as non-local by the resolver: a volume that cannot
/// be classified is rejected, never trusted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Locality {
    /// Directly attached local storage
    Local,
    /// Backed by a remote filesystem protocol
    Network,
    /// Could not be determined
    Unknown,
}

impl Locality {
    /// Label used in listings and JSON output
    pub fn as_label(&self) -> &'static str {
        match self {
            Self::Local => "local",
            Self::Network => "network",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for Locality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_label())
    }
}

/// A mounted volume discovered on the host
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MountedVolume {
    /// Volume name used for preference matching
    pub name: String,
    /// Filesystem root of the volume
    pub root: PathBuf,
}

/// Platform backend for volume discovery and locality classification
pub trait VolumeProvider: Send + Sync {
    /// Short name of the backing implementation, for diagnostics
    fn provider_name(&self) -> &'static str;

    /// Enumerate currently mounted volumes
    fn volumes(&self) -> CacheDiskResult<Vec<MountedVolume>>;

    /// Classify whether a volume is backed by local storage
    fn locality(&self, volume: &MountedVolume) -> Locality;
}

/// Check a parsed filesystem type against the network markers
pub(crate) fn is_network_fstype(fstype: &str) -> bool {
    let fstype = fstype.to_ascii_lowercase();
    NETWORK_FS_MARKERS
        .iter()
        .any(|marker| fstype.contains(marker))
}
