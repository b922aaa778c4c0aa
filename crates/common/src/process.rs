//! Bounded execution of external tools.
//!
//! Every platform helper (PowerShell, xrandr, screencapture, ...) runs
//! through [`run_with_timeout`]. A wedged child is killed when the timeout
//! elapses instead of hanging the invocation.

use std::path::Path;
use std::process::{Output, Stdio};
use std::time::Duration;

use tokio::process::Command;

use crate::error::{DeskshotError, DeskshotResult};

/// Run `command` to completion, capturing stdout/stderr, or fail once
/// `timeout` has elapsed.
pub async fn run_with_timeout(mut command: Command, timeout: Duration) -> DeskshotResult<Output> {
    let program = command
        .as_std()
        .get_program()
        .to_string_lossy()
        .into_owned();

    command
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);

    tracing::debug!(%program, timeout_secs = timeout.as_secs(), "Spawning external tool");

    let child = command
        .spawn()
        .map_err(|e| DeskshotError::platform(format!("Failed to launch {program}: {e}")))?;

    match tokio::time::timeout(timeout, child.wait_with_output()).await {
        Ok(result) => Ok(result?),
        Err(_) => {
            tracing::warn!(%program, "External tool timed out");
            Err(DeskshotError::Timeout {
                program,
                secs: timeout.as_secs(),
            })
        }
    }
}

/// Turn a non-zero exit into a capture error carrying the tool's own
/// diagnostic text.
pub fn ensure_success(program: &str, output: &Output) -> DeskshotResult<()> {
    if output.status.success() {
        return Ok(());
    }

    Err(DeskshotError::capture(format!(
        "{program} failed ({}): {}",
        output.status,
        diagnostic_text(output)
    )))
}

/// Fail when a tool reported success but left no file at `path`.
pub fn ensure_output(program: &str, path: &Path) -> DeskshotResult<()> {
    if path.is_file() {
        Ok(())
    } else {
        Err(DeskshotError::capture(format!(
            "{program} reported success but produced no file at {}",
            path.display()
        )))
    }
}

/// Trimmed stderr, or stdout when stderr is empty.
pub fn diagnostic_text(output: &Output) -> String {
    let stderr = String::from_utf8_lossy(&output.stderr);
    let stderr = stderr.trim();
    if !stderr.is_empty() {
        return stderr.to_string();
    }
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stdout = stdout.trim();
    if stdout.is_empty() {
        "no diagnostic output".to_string()
    } else {
        stdout.to_string()
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    fn sh(script: &str) -> Command {
        let mut cmd = Command::new("sh");
        cmd.arg("-c").arg(script);
        cmd
    }

    #[tokio::test]
    async fn captures_stdout() {
        let output = run_with_timeout(sh("echo 1,2,3,4"), Duration::from_secs(5))
            .await
            .unwrap();
        assert!(output.status.success());
        assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "1,2,3,4");
    }

    #[tokio::test]
    async fn slow_tool_times_out() {
        let err = run_with_timeout(sh("sleep 5"), Duration::from_millis(200))
            .await
            .unwrap_err();
        assert!(matches!(err, DeskshotError::Timeout { .. }));
    }

    #[tokio::test]
    async fn failure_keeps_stderr() {
        let output = run_with_timeout(sh("echo boom >&2; exit 3"), Duration::from_secs(5))
            .await
            .unwrap();
        let err = ensure_success("sh", &output).unwrap_err();
        assert!(err.to_string().contains("boom"));
    }

    #[test]
    fn silent_tool_failure_is_caught() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("capture.png");
        let err = ensure_output("screencapture", &missing).unwrap_err();
        assert!(matches!(err, DeskshotError::Capture { .. }));

        std::fs::write(&missing, b"png").unwrap();
        assert!(ensure_output("screencapture", &missing).is_ok());
    }

    #[tokio::test]
    async fn missing_program_is_platform_error() {
        let cmd = Command::new("definitely-not-a-real-tool-deskshot");
        let err = run_with_timeout(cmd, Duration::from_secs(1))
            .await
            .unwrap_err();
        assert!(matches!(err, DeskshotError::Platform { .. }));
    }
}
