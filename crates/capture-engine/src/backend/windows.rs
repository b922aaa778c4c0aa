use std::time::Duration;

use deskshot_common::error::DeskshotResult;
use deskshot_common::TempFile;
use deskshot_platform_core::{CaptureTarget, MonitorInfo, Platform};
use deskshot_platform_windows::{ScriptHost, TempLocation};

use crate::backend::CaptureBackend;

/// Host-script backend for native Windows and for a Linux guest on a
/// Windows host.
pub struct WindowsBackend {
    platform: Platform,
    host: ScriptHost,
}

impl WindowsBackend {
    pub fn native(timeout: Duration) -> Self {
        Self {
            platform: Platform::NativeWindows,
            host: ScriptHost::new(TempLocation::native(), timeout),
        }
    }

    pub fn guest(timeout: Duration, prefer_bridged_temp: bool) -> Self {
        let temp = TempLocation::guest(prefer_bridged_temp);
        tracing::info!(
            dir = %temp.dir().display(),
            mapping = ?temp.mapping(),
            "Using host temp location for Windows-side capture"
        );
        Self {
            platform: Platform::LinuxUnderWindows,
            host: ScriptHost::new(temp, timeout),
        }
    }
}

#[async_trait::async_trait]
impl CaptureBackend for WindowsBackend {
    fn platform(&self) -> Platform {
        self.platform.clone()
    }

    async fn detect_monitors(&self) -> Vec<MonitorInfo> {
        self.host.detect_monitors().await
    }

    async fn capture(&self, target: &CaptureTarget) -> DeskshotResult<TempFile> {
        self.host.capture(target.monitor()).await
    }
}
