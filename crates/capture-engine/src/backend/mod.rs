use deskshot_common::config::CaptureDefaults;
use deskshot_common::error::{DeskshotError, DeskshotResult};
use deskshot_common::TempFile;
use deskshot_platform_core::{CaptureTarget, MonitorInfo, Platform};

/// Abstract interface for platform-specific capture capabilities.
///
/// Every artifact returned by [`CaptureBackend::capture`] is a PNG owned by
/// the caller; dropping it removes the file.
#[async_trait::async_trait]
pub trait CaptureBackend: Send + Sync {
    /// Platform this backend serves.
    fn platform(&self) -> Platform;

    /// Enumerate monitors in reading order, numbered from 1.
    ///
    /// An empty list means enumeration is unavailable; callers fall back to
    /// whole-desktop capture.
    async fn detect_monitors(&self) -> Vec<MonitorInfo>;

    /// Capture the whole desktop or one monitor into a temporary PNG.
    async fn capture(&self, target: &CaptureTarget) -> DeskshotResult<TempFile>;
}

pub mod linux;
pub mod macos;
pub mod windows;

pub use linux::LinuxBackend;
pub use macos::MacOSBackend;
pub use windows::WindowsBackend;

/// Get the backend for a detected platform.
pub fn backend_for(
    platform: &Platform,
    defaults: &CaptureDefaults,
) -> DeskshotResult<Box<dyn CaptureBackend>> {
    let timeout = defaults.timeout();
    match platform {
        Platform::NativeWindows => Ok(Box::new(WindowsBackend::native(timeout))),
        Platform::LinuxUnderWindows => Ok(Box::new(WindowsBackend::guest(
            timeout,
            defaults.prefer_bridged_temp,
        ))),
        Platform::NativeMacos => Ok(Box::new(MacOSBackend::new(timeout))),
        Platform::NativeLinux => Ok(Box::new(LinuxBackend::new(timeout))),
        Platform::Unsupported(os) => Err(DeskshotError::unsupported(os.clone())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn each_platform_gets_its_own_backend() {
        let defaults = CaptureDefaults {
            prefer_bridged_temp: false,
            ..CaptureDefaults::default()
        };
        for platform in [
            Platform::NativeWindows,
            Platform::LinuxUnderWindows,
            Platform::NativeMacos,
            Platform::NativeLinux,
        ] {
            let backend = backend_for(&platform, &defaults).unwrap();
            assert_eq!(backend.platform(), platform);
        }
    }

    #[test]
    fn unsupported_platform_is_an_error() {
        let err = backend_for(
            &Platform::Unsupported("haiku".to_string()),
            &CaptureDefaults::default(),
        )
        .err()
        .unwrap();
        assert_eq!(err.to_string(), "Unsupported platform: haiku");
    }
}
