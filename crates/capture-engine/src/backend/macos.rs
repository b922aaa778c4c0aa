use std::path::PathBuf;
use std::time::Duration;

use deskshot_common::error::DeskshotResult;
use deskshot_common::TempFile;
use deskshot_platform_core::{CaptureTarget, MonitorInfo, Platform};
use deskshot_platform_macos as platform_macos;

use crate::backend::CaptureBackend;

/// `system_profiler` + `screencapture` backend.
///
/// Monitor origins are always `(0,0)` on this platform, so per-monitor
/// crops of secondary displays are approximate.
pub struct MacOSBackend {
    timeout: Duration,
    temp_dir: PathBuf,
}

impl MacOSBackend {
    pub fn new(timeout: Duration) -> Self {
        Self {
            timeout,
            temp_dir: std::env::temp_dir(),
        }
    }
}

#[async_trait::async_trait]
impl CaptureBackend for MacOSBackend {
    fn platform(&self) -> Platform {
        Platform::NativeMacos
    }

    async fn detect_monitors(&self) -> Vec<MonitorInfo> {
        platform_macos::detect_monitors(self.timeout).await
    }

    async fn capture(&self, target: &CaptureTarget) -> DeskshotResult<TempFile> {
        platform_macos::capture(target.monitor(), &self.temp_dir, self.timeout).await
    }
}
