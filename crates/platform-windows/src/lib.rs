//! Windows host integration.
//!
//! Monitor enumeration and capture run as short PowerShell scripts on the
//! Windows host. The same path serves native Windows and a Linux guest on
//! a Windows host; the only difference is where temporary files live and
//! how their paths are spelled for the host (see [`paths`]).

pub mod paths;
pub mod script;

use std::process::Output;
use std::time::Duration;

use deskshot_common::error::{DeskshotError, DeskshotResult};
use deskshot_common::process::{ensure_output, ensure_success, run_with_timeout};
use deskshot_common::TempFile;
use deskshot_platform_core::{arrange_monitors, MonitorInfo};
use tokio::process::Command;

pub use paths::{PathMapping, TempLocation};
pub use script::CaptureRegion;

const POWERSHELL: &str = "powershell.exe";

/// Runs generated scripts through the host's PowerShell.
#[derive(Debug, Clone)]
pub struct ScriptHost {
    temp: TempLocation,
    timeout: Duration,
}

impl ScriptHost {
    pub fn new(temp: TempLocation, timeout: Duration) -> Self {
        Self { temp, timeout }
    }

    /// Enumerate screens through the host windowing subsystem.
    ///
    /// Any failure yields an empty list.
    pub async fn detect_monitors(&self) -> Vec<MonitorInfo> {
        tracing::debug!("Detecting monitors with PowerShell");

        let output = match self.run_script(&script::enumerate_script()).await {
            Ok(output) => output,
            Err(e) => {
                tracing::warn!(error = %e, "Screen enumeration failed; continuing without monitor list");
                return Vec::new();
            }
        };
        if let Err(e) = ensure_success(POWERSHELL, &output) {
            tracing::warn!(error = %e, "Screen enumeration failed; continuing without monitor list");
            return Vec::new();
        }

        let raw = script::parse_screen_bounds(&String::from_utf8_lossy(&output.stdout));
        let monitors = arrange_monitors(raw);
        tracing::debug!(count = monitors.len(), "Host reported monitors");
        monitors
    }

    /// Capture the virtual screen, or exactly one monitor, into a fresh PNG.
    pub async fn capture(&self, monitor: Option<&MonitorInfo>) -> DeskshotResult<TempFile> {
        let region = match monitor {
            Some(m) if m.width == 0 || m.height == 0 => {
                return Err(DeskshotError::InvalidMonitor {
                    width: m.width,
                    height: m.height,
                });
            }
            Some(m) => CaptureRegion::for_monitor(m),
            None => CaptureRegion::VirtualScreen,
        };

        let artifact = TempFile::reserve(self.temp.dir(), "deskshot_capture", "png");
        let host_output = self.temp.host_path(artifact.path());
        tracing::debug!(?region, %host_output, "Capturing through host script");

        let output = self
            .run_script(&script::capture_script(region, &host_output))
            .await?;
        ensure_success(POWERSHELL, &output)?;
        ensure_output(POWERSHELL, artifact.path())?;
        Ok(artifact)
    }

    /// Write `body` to a temporary `.ps1`, run it, and remove it again.
    async fn run_script(&self, body: &str) -> DeskshotResult<Output> {
        // Windows PowerShell reads BOM-less files in the ANSI code page.
        let contents = format!("\u{feff}{body}");
        let script = TempFile::create_with(
            self.temp.dir(),
            "deskshot_script",
            "ps1",
            contents.as_bytes(),
        )?;

        let mut cmd = Command::new(POWERSHELL);
        cmd.args([
            "-NoProfile",
            "-NonInteractive",
            "-ExecutionPolicy",
            "Bypass",
            "-File",
        ])
        .arg(self.temp.host_path(script.path()));

        run_with_timeout(cmd, self.timeout).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn host_in(dir: PathBuf) -> ScriptHost {
        let temp = TempLocation::guest_with(None, false, dir, |_| false);
        ScriptHost::new(temp, Duration::from_secs(2))
    }

    #[tokio::test]
    async fn invalid_monitor_rejected_before_running_powershell() {
        let dir = tempfile::tempdir().unwrap();
        let host = host_in(dir.path().to_path_buf());
        let monitor = MonitorInfo {
            index: 1,
            name: None,
            x: 0,
            y: 0,
            width: 1920,
            height: 0,
        };

        let err = host.capture(Some(&monitor)).await.unwrap_err();
        assert!(matches!(
            err,
            DeskshotError::InvalidMonitor {
                width: 1920,
                height: 0
            }
        ));
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn script_file_is_removed_even_when_powershell_is_missing() {
        if cfg!(windows) {
            return;
        }
        let dir = tempfile::tempdir().unwrap();
        let host = host_in(dir.path().to_path_buf());

        assert!(host.detect_monitors().await.is_empty());
        assert!(host.capture(None).await.is_err());
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }
}
