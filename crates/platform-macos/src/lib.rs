//! macOS platform integration.
//!
//! Monitors come from `system_profiler SPDisplaysDataType -json`, captures
//! from the native `screencapture` command.
//!
//! The profiler reports resolutions but no per-display origin, so every
//! monitor is placed at `(0,0)`. Cropped captures of secondary displays are
//! therefore only as accurate as that origin; no offsets are invented here.

use std::ffi::OsString;
use std::path::Path;
use std::time::Duration;

use deskshot_common::error::{DeskshotError, DeskshotResult};
use deskshot_common::process::{ensure_output, ensure_success, run_with_timeout};
use deskshot_common::TempFile;
use deskshot_platform_core::{arrange_monitors, MonitorGeometry, MonitorInfo};
use serde::Deserialize;
use tokio::process::Command;

const SCREENCAPTURE: &str = "screencapture";

#[derive(Debug, Deserialize)]
struct ProfilerReport {
    #[serde(rename = "SPDisplaysDataType", default)]
    adapters: Vec<GraphicsAdapter>,
}

#[derive(Debug, Deserialize)]
struct GraphicsAdapter {
    #[serde(rename = "spdisplays_ndrvs", default)]
    displays: Vec<DisplayEntry>,
}

#[derive(Debug, Deserialize)]
struct DisplayEntry {
    #[serde(rename = "_name")]
    name: Option<String>,
    #[serde(rename = "_spdisplays_resolution")]
    resolution: Option<String>,
}

/// Parse a resolution string such as `"2560 x 1440 @ 60.00Hz"`.
pub fn parse_resolution(text: &str) -> Option<(i32, i32)> {
    let (width, rest) = text.split_once(" x ")?;
    let height: String = rest
        .trim_start()
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    Some((width.trim().parse().ok()?, height.parse().ok()?))
}

/// Parse the JSON display report into raw monitor rectangles at `(0,0)`.
pub fn parse_display_report(json: &str) -> DeskshotResult<Vec<MonitorGeometry>> {
    let report: ProfilerReport = serde_json::from_str(json)?;

    Ok(report
        .adapters
        .into_iter()
        .flat_map(|adapter| adapter.displays)
        .filter_map(|display| {
            let resolution = display.resolution?;
            let Some((width, height)) = parse_resolution(&resolution) else {
                tracing::debug!(%resolution, "Unrecognized display resolution");
                return None;
            };
            let geometry = MonitorGeometry::new(0, 0, width, height);
            Some(match display.name {
                Some(name) => geometry.named(name),
                None => geometry,
            })
        })
        .collect())
}

/// Detect monitors on macOS.
///
/// Returns an empty list when the profiler is unavailable or its output
/// cannot be parsed.
pub async fn detect_monitors(timeout: Duration) -> Vec<MonitorInfo> {
    tracing::debug!("Detecting monitors with system_profiler");

    let mut cmd = Command::new("system_profiler");
    cmd.args(["SPDisplaysDataType", "-json"]);

    let raw = match run_with_timeout(cmd, timeout).await {
        Ok(output) => ensure_success("system_profiler", &output).and_then(|_| {
            parse_display_report(&String::from_utf8_lossy(&output.stdout))
        }),
        Err(e) => Err(e),
    };

    match raw {
        Ok(raw) => arrange_monitors(raw),
        Err(e) => {
            tracing::warn!(error = %e, "Display query failed; continuing without monitor list");
            Vec::new()
        }
    }
}

/// Arguments for `screencapture`: silent, optionally restricted to the
/// monitor's rectangle.
pub fn screencapture_args(output: &Path, monitor: Option<&MonitorInfo>) -> Vec<OsString> {
    let mut args: Vec<OsString> = vec!["-x".into()];
    if let Some(m) = monitor {
        args.push("-R".into());
        args.push(format!("{},{},{},{}", m.x, m.y, m.width, m.height).into());
    }
    args.push(output.as_os_str().to_owned());
    args
}

/// Capture the full screen (or one monitor rectangle) into a fresh PNG in
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
    let mut cmd = Command::new(SCREENCAPTURE);
    cmd.args(screencapture_args(artifact.path(), monitor));

    tracing::debug!(
        monitor = monitor.map(|m| m.index),
        path = %artifact.path().display(),
        "Capturing with screencapture"
    );

    let output = run_with_timeout(cmd, timeout).await?;
    ensure_success(SCREENCAPTURE, &output)?;
    ensure_output(SCREENCAPTURE, artifact.path())?;
    Ok(artifact)
}

#[cfg(test)]
mod tests {
    use super::*;

    const REPORT: &str = r#"{
      "SPDisplaysDataType" : [
        {
          "_name" : "Apple M2 Pro",
          "spdisplays_ndrvs" : [
            {
              "_name" : "Color LCD",
              "_spdisplays_resolution" : "1512 x 982 @ 120.00Hz",
              "spdisplays_main" : "spdisplays_yes"
            },
            {
              "_name" : "DELL U2720Q",
              "_spdisplays_resolution" : "3840 x 2160 @ 60.00Hz"
            },
            {
              "_name" : "Sidecar"
            }
          ]
        },
        {
          "_name" : "Headless adapter"
        }
      ]
    }"#;

    #[test]
    fn resolution_strings() {
        assert_eq!(parse_resolution("2560 x 1440"), Some((2560, 1440)));
        assert_eq!(parse_resolution("1512 x 982 @ 120.00Hz"), Some((1512, 982)));
        assert_eq!(parse_resolution("Retina"), None);
        assert_eq!(parse_resolution("x 1080"), None);
    }

    #[test]
    fn report_entries_sit_at_origin() {
        let raw = parse_display_report(REPORT).unwrap();
        assert_eq!(
            raw,
            vec![
                MonitorGeometry::new(0, 0, 1512, 982).named("Color LCD"),
                MonitorGeometry::new(0, 0, 3840, 2160).named("DELL U2720Q"),
            ]
        );
    }

    #[test]
    fn arrangement_keeps_profiler_order() {
        let monitors = arrange_monitors(parse_display_report(REPORT).unwrap());
        assert_eq!(monitors[0].name.as_deref(), Some("Color LCD"));
        assert_eq!(monitors[1].index, 2);
    }

    #[test]
    fn malformed_report_is_an_error() {
        assert!(parse_display_report("not json").is_err());
        assert!(parse_display_report("{}").unwrap().is_empty());
    }

    #[test]
    fn crop_rectangle_argument() {
        let m = arrange_monitors(vec![MonitorGeometry::new(0, 0, 3840, 2160)]).remove(0);
        let args: Vec<String> = screencapture_args(Path::new("/tmp/a.png"), Some(&m))
            .into_iter()
            .map(|a| a.to_string_lossy().into_owned())
            .collect();
        assert_eq!(args, vec!["-x", "-R", "0,0,3840,2160", "/tmp/a.png"]);
    }

    #[tokio::test]
    async fn zero_sized_monitor_fails_before_running_tool() {
        let m = MonitorInfo {
            index: 1,
            name: None,
            x: 0,
            y: 0,
            width: 0,
            height: 900,
        };
        let err = capture(Some(&m), &std::env::temp_dir(), Duration::from_secs(1))
            .await
            .unwrap_err();
        assert!(matches!(err, DeskshotError::InvalidMonitor { .. }));
    }
}
