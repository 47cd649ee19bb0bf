//! Windows volume provider
//!
//! Volumes are drive letters. `net use` lists mapped network drives; when
//! the command cannot be run, mapped state is unknown rather than assumed
//! local.

use crate::error::CacheDiskResult;
use crate::platform::provider::{Locality, MountedVolume, VolumeProvider};
use std::collections::HashSet;
use std::path::PathBuf;
use std::process::Command;
use tracing::debug;

/// Volume provider for Windows
pub struct WindowsProvider;

impl WindowsProvider {
    pub fn new() -> Self {
        Self
    }

    fn net_use_output(&self) -> Option<String> {
        let output = Command::new("net").arg("use").output().ok()?;
        if !output.status.success() {
            debug!("net use exited with {}", output.status);
            return None;
        }
        Some(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

impl Default for WindowsProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl VolumeProvider for WindowsProvider {
    fn provider_name(&self) -> &'static str {
        "windows"
    }

    fn volumes(&self) -> CacheDiskResult<Vec<MountedVolume>> {
        let mut volumes = Vec::new();
        for letter in b'A'..=b'Z' {
            // Preferences name drives by bare letter, e.g. "D"
            let name = (letter as char).to_string();
            let root = PathBuf::from(format!("{}:\\", name));
            if root.is_dir() {
                volumes.push(MountedVolume { name, root });
            }
        }
        Ok(volumes)
    }

    fn locality(&self, volume: &MountedVolume) -> Locality {
        let Some(output) = self.net_use_output() else {
            return Locality::Unknown;
        };
        if mapped_drives(&output).contains(&volume.name) {
            Locality::Network
        } else {
            Locality::Local
        }
    }
}

/// Drive letters that `net use` reports as mapped, uppercased
fn mapped_drives(output: &str) -> HashSet<String> {
    let mut drives = HashSet::new();
    for line in output.lines() {
        for token in line.split_whitespace() {
            if is_drive_token(token) {
                drives.insert(token[..1].to_uppercase());
            }
        }
    }
    drives
}

fn is_drive_token(token: &str) -> bool {
    let mut chars = token.chars();
    matches!(
        (chars.next(), chars.next(), chars.next()),
        (Some(letter), Some(':'), None) if letter.is_ascii_alphabetic()
    )
}
