//! Linux volume provider
//!
//! `/proc/mounts` backs both enumeration and classification. Named volumes
//! are mount points under the conventional roots (`/mnt`, `/media`,
//! `/run/media`); the kernel escapes whitespace in paths as octal (`\040`),
//! so fields are whitespace-splittable.

use crate::error::{CacheDiskError, CacheDiskResult};
use crate::platform::provider::{is_network_fstype, Locality, MountedVolume, VolumeProvider};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

const PROC_MOUNTS: &str = "/proc/mounts";

/// Mount-point roots where named volumes conventionally appear
const VOLUME_ROOTS: &[&str] = &["/mnt", "/media", "/run/media"];

/// Volume provider for Linux
pub struct LinuxProvider {
    mounts_path: PathBuf,
}

impl LinuxProvider {
    /// Create a provider reading `/proc/mounts`
    pub fn new() -> Self {
        Self {
            mounts_path: PathBuf::from(PROC_MOUNTS),
        }
    }

    #[cfg(test)]
    fn with_table(path: PathBuf) -> Self {
        Self { mounts_path: path }
    }

    fn read_table(&self) -> CacheDiskResult<String> {
        fs::read_to_string(&self.mounts_path).map_err(|e| {
            CacheDiskError::io(format!("reading {}", self.mounts_path.display()), e)
        })
    }
}

impl Default for LinuxProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl VolumeProvider for LinuxProvider {
    fn provider_name(&self) -> &'static str {
        "linux"
    }

    fn volumes(&self) -> CacheDiskResult<Vec<MountedVolume>> {
        let table = self.read_table()?;
        Ok(volumes_from_table(&table))
    }

    fn locality(&self, volume: &MountedVolume) -> Locality {
        let table = match self.read_table() {
            Ok(table) => table,
            Err(e) => {
                debug!("{}", e);
                return Locality::Unknown;
            }
        };
        classify_mount_point(&table, &volume.root)
    }
}

/// One entry parsed from the mount table
#[derive(Debug, PartialEq)]
struct MountEntry {
    mount_point: PathBuf,
    fstype: String,
}

fn parse_mount_table(table: &str) -> Vec<MountEntry> {
    table.lines().filter_map(parse_mount_line).collect()
}

fn parse_mount_line(line: &str) -> Option<MountEntry> {
    let mut fields = line.split_whitespace();
    let _device = fields.next()?;
    let mount_point = PathBuf::from(decode_mount_path(fields.next()?));
    let fstype = fields.next()?.to_string();
    Some(MountEntry { mount_point, fstype })
}

/// Decode the octal escapes the kernel uses for whitespace in mount paths
/// (`\040` space, `\011` tab, `\012` newline, `\134` backslash)
fn decode_mount_path(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars().peekable();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        let digits: String = chars.clone().take(3).collect();
        if digits.len() == 3 {
            if let Ok(code) = u8::from_str_radix(&digits, 8) {
                out.push(code as char);
                chars.nth(2);
                continue;
            }
        }
        out.push('\\');
    }
    out
}

fn volumes_from_table(table: &str) -> Vec<MountedVolume> {
    let mut volumes: Vec<MountedVolume> = Vec::new();
    for entry in parse_mount_table(table) {
        let Some(name) = volume_name(&entry.mount_point) else {
            continue;
        };
        // First mount wins for duplicate names
        if volumes.iter().any(|v| v.name == name) {
            continue;
        }
        volumes.push(MountedVolume {
            name,
            root: entry.mount_point,
        });
    }
    volumes
}

/// Volume name for a mount point under one of the conventional roots
fn volume_name(mount_point: &Path) -> Option<String> {
    let under_root = VOLUME_ROOTS.iter().any(|root| {
        mount_point.starts_with(root) && mount_point != Path::new(root)
    });
    if !under_root {
        return None;
    }
    mount_point.file_name()?.to_str().map(str::to_string)
}

/// Classify the volume mounted at `root`.
///
/// Later table entries shadow earlier ones (overmounts). The table gives a
/// definitive fstype, so anything matched without a network marker is local.
fn classify_mount_point(table: &str, root: &Path) -> Locality {
    let mut verdict = Locality::Unknown;
    for entry in parse_mount_table(table) {
        if entry.mount_point != root {
            continue;
        }
        verdict = if is_network_fstype(&entry.fstype) {
            Locality::Network
        } else {
            Locality::Local
        };
    }
    verdict
}
