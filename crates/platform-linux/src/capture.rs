//! Root-window capture through ImageMagick `import`.

use std::ffi::OsString;
use std::path::Path;
use std::time::Duration;

use deskshot_common::error::{DeskshotError, DeskshotResult};
use deskshot_common::process::{ensure_output, ensure_success, run_with_timeout};
use deskshot_common::TempFile;
use deskshot_platform_core::MonitorInfo;
use tokio::process::Command;

const IMPORT: &str = "import";

/// X11 crop geometry `WxH+X+Y`.
pub fn crop_geometry(monitor: &MonitorInfo) -> String {
    format!(
        "{}x{}{:+}{:+}",
        monitor.width, monitor.height, monitor.x, monitor.y
    )
}

/// Arguments for `import`: the root window, optionally cropped to one
/// monitor, written to `output`.
pub fn import_args(output: &Path, monitor: Option<&MonitorInfo>) -> Vec<OsString> {
    let mut args: Vec<OsString> = vec!["-window".into(), "root".into()];
    if let Some(monitor) = monitor {
        args.push("-crop".into());
        args.push(crop_geometry(monitor).into());
    }
    args.push(output.as_os_str().to_owned());
    args
}

/// Capture the root window (or one monitor of it) into a fresh PNG in
/// `temp_dir`.
pub async fn capture(
    monitor: Option<&MonitorInfo>,
    temp_dir: &Path,
    timeout: Duration,
) -> DeskshotResult<TempFile> {
    if let Some(m) = monitor {
        if m.width == 0 || m.height == 0 {
            return Err(DeskshotError::InvalidMonitor {
                width: m.width,
                height: m.height,
            });
        }
    }

    let artifact = TempFile::reserve(temp_dir, "deskshot_capture", "png");

    let mut cmd = Command::new(IMPORT);
    cmd.args(import_args(artifact.path(), monitor));

    tracing::debug!(
        monitor = monitor.map(|m| m.index),
        path = %artifact.path().display(),
        "Capturing with import"
    );

    let output = run_with_timeout(cmd, timeout).await?;
    ensure_success(IMPORT, &output)?;
    ensure_output(IMPORT, artifact.path())?;
    Ok(artifact)
}
