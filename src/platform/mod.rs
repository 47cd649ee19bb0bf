//! Platform detection and volume providers

mod factory;
mod linux;
mod macos;
mod provider;
mod unsupported;
mod windows;

pub use factory::{create_provider, Platform};
pub use linux::LinuxProvider;
pub use macos::MacOsProvider;
pub use provider::{Locality, MountedVolume, VolumeProvider, NETWORK_FS_MARKERS};
pub use unsupported::UnsupportedProvider;
pub use windows::WindowsProvider;

use std::path::Path;

const KB: u64 = 1024;
const MB: u64 = KB * 1024;
const GB: u64 = MB * 1024;

/// Free space on the filesystem holding `path`, when the platform can say
#[cfg(unix)]
pub fn free_bytes(path: &Path) -> Option<u64> {
    use std::ffi::CString;
    use std::os::unix::ffi::OsStrExt;

    let c_path = CString::new(path.as_os_str().as_bytes()).ok()?;
    let mut stat: libc::statvfs = unsafe { std::mem::zeroed() };
    let rc = unsafe { libc::statvfs(c_path.as_ptr(), &mut stat) };
    if rc != 0 {
        return None;
    }
    Some(stat.f_bavail as u64 * stat.f_frsize as u64)
}

#[cfg(not(unix))]
pub fn free_bytes(_path: &Path) -> Option<u64> {
    None
}

/// Format bytes in human-readable form
pub fn format_bytes(bytes: u64) -> String {
    if bytes >= GB {
        format!("{:.1} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}
