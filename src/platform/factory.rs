//! Provider factory for platform-appropriate volume backends
//!
//! Provides automatic platform detection and provider instantiation.

use crate::platform::linux::LinuxProvider;
use crate::platform::macos::MacOsProvider;
use crate::platform::provider::VolumeProvider;
use crate::platform::unsupported::UnsupportedProvider;
use crate::platform::windows::WindowsProvider;

/// Detected platform
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    /// macOS - volumes under /Volumes, classified via `mount`
    MacOS,
    /// Linux - volumes from /proc/mounts under the conventional roots
    Linux,
    /// Windows - drive letters, classified via `net use`
    Windows,
    /// Unsupported platform
    Unsupported,
}

impl Platform {
    /// Detect the current platform
    pub fn detect() -> Self {
        match std::env::consts::OS {
            "macos" => Platform::MacOS,
            "linux" => Platform::Linux,
            "windows" => Platform::Windows,
            _ => Platform::Unsupported,
        }
    }

    /// Get a human-readable platform name
    pub fn name(&self) -> &'static str {
        match self {
            Platform::MacOS => "macOS",
            Platform::Linux => "Linux",
            Platform::Windows => "Windows",
            Platform::Unsupported => "Unsupported",
        }
    }
}

/// Create a volume provider appropriate for the current platform
///
/// Platforms without a real backend get `UnsupportedProvider`, which
/// enumerates nothing and classifies everything as unknown.
pub fn create_provider() -> Box<dyn VolumeProvider> {
    match Platform::detect() {
        Platform::MacOS => Box::new(MacOsProvider::new()),
        Platform::Linux => Box::new(LinuxProvider::new()),
        Platform::Windows => Box::new(WindowsProvider::new()),
        Platform::Unsupported => Box::new(UnsupportedProvider::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn platform_detect_returns_valid() {
        let platform = Platform::detect();
        assert!(matches!(
            platform,
            Platform::MacOS | Platform::Linux | Platform::Windows | Platform::Unsupported
        ));
    }

    #[test]
    fn platform_name() {
        assert_eq!(Platform::MacOS.name(), "macOS");
        assert_eq!(Platform::Linux.name(), "Linux");
        assert_eq!(Platform::Windows.name(), "Windows");
        assert_eq!(Platform::Unsupported.name(), "Unsupported");
    }

    #[test]
    fn provider_matches_platform() {
        let provider = create_provider();
        let expected = match Platform::detect() {
            Platform::MacOS => "macos",
            Platform::Linux => "linux",
            Platform::Windows => "windows",
            Platform::Unsupported => "unsupported",
        };
        assert_eq!(provider.provider_name(), expected);
    }
}
