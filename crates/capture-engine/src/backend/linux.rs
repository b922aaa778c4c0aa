use std::path::PathBuf;
use std::time::Duration;

use deskshot_common::error::DeskshotResult;
use deskshot_common::TempFile;
use deskshot_platform_core::{CaptureTarget, MonitorInfo, Platform};
use deskshot_platform_linux as platform_linux;

use crate::backend::CaptureBackend;

/// X11 backend: `xrandr` for monitors, `import` for pixels.
pub struct LinuxBackend {
    timeout: Duration,
    temp_dir: PathBuf,
}

impl LinuxBackend {
    pub fn new(timeout: Duration) -> Self {
        Self {
            timeout,
            temp_dir: std::env::temp_dir(),
        }
    }
}

#[async_trait::async_trait]
impl CaptureBackend for LinuxBackend {
    fn platform(&self) -> Platform {
        Platform::NativeLinux
    }

    async fn detect_monitors(&self) -> Vec<MonitorInfo> {
        platform_linux::detect_monitors(self.timeout).await
    }

    async fn capture(&self, target: &CaptureTarget) -> DeskshotResult<TempFile> {
        platform_linux::capture(target.monitor(), &self.temp_dir, self.timeout).await
    }
}
