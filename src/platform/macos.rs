//! macOS volume provider
//!
//! Volumes appear as mount points under `/Volumes`; locality comes from
//! parsing `mount` output, whose lines look like
//! `/dev/disk6s1 on /Volumes/FastSSD (apfs, local, journaled)`.

use crate::error::{CacheDiskError, CacheDiskResult};
use crate::platform::provider::{is_network_fstype, Locality, MountedVolume, VolumeProvider};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use tracing::debug;

const VOLUMES_ROOT: &str = "/Volumes";

/// Volume provider for macOS
pub struct MacOsProvider {
    volumes_root: PathBuf,
}

impl MacOsProvider {
    /// Create a provider rooted at `/Volumes`
    pub fn new() -> Self {
        Self {
            volumes_root: PathBuf::from(VOLUMES_ROOT),
        }
    }

    #[cfg(test)]
    fn with_root(root: PathBuf) -> Self {
        Self { volumes_root: root }
    }

    fn mount_output(&self) -> Option<String> {
        let output = Command::new("mount")
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .output();

        match output {
            Ok(out) if out.status.success() => {
                Some(String::from_utf8_lossy(&out.stdout).into_owned())
            }
            Ok(out) => {
                debug!("mount exited with {}", out.status);
                None
            }
            Err(e) => {
                debug!("failed to run mount: {}", e);
                None
            }
        }
    }
}

impl Default for MacOsProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl VolumeProvider for MacOsProvider {
    fn provider_name(&self) -> &'static str {
        "macos"
    }

    fn volumes(&self) -> CacheDiskResult<Vec<MountedVolume>> {
        let entries = match fs::read_dir(&self.volumes_root) {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(CacheDiskError::io(
                    format!("reading {}", self.volumes_root.display()),
                    e,
                ))
            }
        };

        let mut volumes = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| {
                CacheDiskError::io(format!("reading {}", self.volumes_root.display()), e)
            })?;
            let path = entry.path();
            if !is_mount_point(&path) {
                continue;
            }
            if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
                volumes.push(MountedVolume {
                    name: name.to_string(),
                    root: path.clone(),
                });
            }
        }
        Ok(volumes)
    }

    fn locality(&self, volume: &MountedVolume) -> Locality {
        let Some(output) = self.mount_output() else {
            return Locality::Unknown;
        };
        classify_mount_point(&output, &volume.root)
    }
}

/// One entry parsed from `mount` output
#[derive(Debug, PartialEq)]
struct MountEntry {
    mount_point: PathBuf,
    fstype: String,
    attrs: Vec<String>,
}

fn parse_mount_line(line: &str) -> Option<MountEntry> {
    let (_device, rest) = line.split_once(" on ")?;
    let open = rest.rfind(" (")?;
    let mount_point = PathBuf::from(&rest[..open]);
    let attrs_raw = rest[open + 2..].trim_end().strip_suffix(')')?;

    let mut parts = attrs_raw.split(", ");
    let fstype = parts.next()?.to_string();
    let attrs: Vec<String> = parts.map(str::to_string).collect();

    Some(MountEntry {
        mount_point,
        fstype,
        attrs,
    })
}

/// Classify the volume mounted at `root` from full `mount` output.
///
/// Later lines shadow earlier ones, matching mount-table ordering.
fn classify_mount_point(mount_output: &str, root: &Path) -> Locality {
    let mut verdict = Locality::Unknown;
    for line in mount_output.lines() {
        let Some(entry) = parse_mount_line(line) else {
            continue;
        };
        if entry.mount_point != root {
            continue;
        }
        verdict = if is_network_fstype(&entry.fstype) {
            Locality::Network
        } else if entry.attrs.iter().any(|a| a == "local") {
            Locality::Local
        } else {
            Locality::Unknown
        };
    }
    verdict
}

/// POSIX `ismount` semantics: a non-symlink directory on a different device
/// than its parent (or sharing the parent's inode, for filesystem roots).
#[cfg(unix)]
fn is_mount_point(path: &Path) -> bool {
    use std::os::unix::fs::MetadataExt;

    let Ok(meta) = fs::symlink_metadata(path) else {
        return false;
    };
    if meta.file_type().is_symlink() {
        return false;
    }
    let Some(parent) = path.parent() else {
        return true;
    };
    let Ok(parent_meta) = fs::metadata(parent) else {
        return false;
    };
    meta.dev() != parent_meta.dev() || meta.ino() == parent_meta.ino()
}

#[cfg(not(unix))]
fn is_mount_point(_path: &Path) -> bool {
    false
}
