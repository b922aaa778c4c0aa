//! Display/monitor detection via `xrandr`.

use std::sync::OnceLock;
use std::time::Duration;

use deskshot_common::process::{ensure_success, run_with_timeout};
use deskshot_platform_core::{arrange_monitors, MonitorGeometry, MonitorInfo};
use regex::Regex;
use tokio::process::Command;

fn connected_output_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^(\S+) connected\b.*?\b(\d+)x(\d+)\+(-?\d+)\+(-?\d+)")
            .expect("xrandr pattern is valid")
    })
}

/// Parse `xrandr --query` output into raw monitor rectangles.
///
/// Only `connected` outputs with an active mode produce an entry;
/// disconnected outputs, connected-but-disabled outputs and mode lines are
/// skipped.
pub fn parse_xrandr(output: &str) -> Vec<MonitorGeometry> {
    output
        .lines()
        .filter_map(|line| {
            let caps = connected_output_pattern().captures(line)?;
            let width = caps[2].parse().ok()?;
            let height = caps[3].parse().ok()?;
            let x = caps[4].parse().ok()?;
            let y = caps[5].parse().ok()?;
            Some(MonitorGeometry::new(x, y, width, height).named(&caps[1]))
        })
        .collect()
}

/// Detect connected monitors.
///
/// Any failure (xrandr missing, no X display, non-zero exit) yields an
/// empty list so callers fall back to whole-desktop capture.
pub async fn detect_monitors(timeout: Duration) -> Vec<MonitorInfo> {
    tracing::debug!("Detecting monitors with xrandr");

    let mut cmd = Command::new("xrandr");
    cmd.arg("--query");

    let output = match run_with_timeout(cmd, timeout).await {
        Ok(output) => output,
        Err(e) => {
            tracing::warn!(error = %e, "xrandr unavailable; continuing without monitor list");
            return Vec::new();
        }
    };
    if let Err(e) = ensure_success("xrandr", &output) {
        tracing::warn!(error = %e, "xrandr query failed; continuing without monitor list");
        return Vec::new();
    }

    let monitors = arrange_monitors(parse_xrandr(&String::from_utf8_lossy(&output.stdout)));
    tracing::debug!(count = monitors.len(), "xrandr reported monitors");
    monitors
}

#[cfg(test)]
mod tests {
    use super::*;

    const DUAL_HEAD: &str = "\
Screen 0: minimum 320 x 200, current 4480 x 1440, maximum 16384 x 16384
eDP-1 connected primary 2560x1440+1920+0 (normal left inverted right x axis y axis) 309mm x 174mm
   2560x1440     60.00*+
   1920x1080     60.00
HDMI-1 connected 1920x1080+0+180 (normal left inverted right x axis y axis) 527mm x 296mm
   1920x1080     60.00*+
DP-1 disconnected (normal left inverted right x axis y axis)
DP-2 connected (normal left inverted right x axis y axis)
   3840x2160     60.00 +
";

    #[test]
    fn parses_connected_outputs_only() {
        let raw = parse_xrandr(DUAL_HEAD);
        assert_eq!(
            raw,
            vec![
                MonitorGeometry::new(1920, 0, 2560, 1440).named("eDP-1"),
                MonitorGeometry::new(0, 180, 1920, 1080).named("HDMI-1"),
            ]
        );
    }

    #[test]
    fn arranged_in_reading_order() {
        let monitors = arrange_monitors(parse_xrandr(DUAL_HEAD));
        assert_eq!(monitors[0].name.as_deref(), Some("eDP-1"));
        assert_eq!(monitors[0].index, 1);
        assert_eq!(monitors[1].name.as_deref(), Some("HDMI-1"));
        assert_eq!(monitors[1].index, 2);
    }

    #[test]
    fn garbage_yields_nothing() {
        assert!(parse_xrandr("Can't open display\n").is_empty());
        assert!(parse_xrandr("").is_empty());
    }
}
