//! PowerShell scripts executed on the Windows host.
//!
//! Both scripts switch the PowerShell process to per-monitor DPI awareness
//! first (falling back to system DPI awareness on older Windows), so
//! enumeration and capture agree on true device pixels.

use deskshot_platform_core::{MonitorGeometry, MonitorInfo};

const PREAMBLE: &str = r#"$ErrorActionPreference = 'Stop'
Add-Type -TypeDefinition @'
using System;
using System.Runtime.InteropServices;
public static class DeskshotDpi {
    [DllImport("user32.dll")]
    public static extern bool SetProcessDpiAwarenessContext(IntPtr value);
    [DllImport("user32.dll")]
    public static extern bool SetProcessDPIAware();
}
'@
$perMonitorAware = $false
try {
    # DPI_AWARENESS_CONTEXT_PER_MONITOR_AWARE_V2
    $perMonitorAware = [DeskshotDpi]::SetProcessDpiAwarenessContext([IntPtr]::new(-4))
} catch {
    $perMonitorAware = $false
}
if (-not $perMonitorAware) {
    [void][DeskshotDpi]::SetProcessDPIAware()
}
"#;

const ENUMERATE_BODY: &str = r#"Add-Type -AssemblyName System.Windows.Forms
foreach ($screen in [System.Windows.Forms.Screen]::AllScreens) {
    $b = $screen.Bounds
    Write-Output ('{0},{1},{2},{3}' -f $b.X, $b.Y, $b.Width, $b.Height)
}
"#;

/// Script printing one `x,y,width,height` line per screen.
pub fn enumerate_script() -> String {
    format!("{PREAMBLE}{ENUMERATE_BODY}")
}

/// Rectangle a capture script copies from the screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureRegion {
    /// The bounding rectangle of all screens, possibly with a negative origin.
    VirtualScreen,
    /// An explicit rectangle with a non-negative origin.
    Rect {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
    },
}

impl CaptureRegion {
    /// Region for one monitor, with its origin clamped to be non-negative.
    pub fn for_monitor(monitor: &MonitorInfo) -> Self {
        Self::Rect {
            x: monitor.x.max(0) as u32,
            y: monitor.y.max(0) as u32,
            width: monitor.width,
            height: monitor.height,
        }
    }
}

/// Script copying `region` from the screen into a PNG at `host_output`.
pub fn capture_script(region: CaptureRegion, host_output: &str) -> String {
    let bounds = match region {
        CaptureRegion::VirtualScreen => "Add-Type -AssemblyName System.Windows.Forms\n\
             $bounds = [System.Windows.Forms.SystemInformation]::VirtualScreen\n\
             $left = $bounds.X\n\
             $top = $bounds.Y\n\
             $width = $bounds.Width\n\
             $height = $bounds.Height\n"
            .to_string(),
        CaptureRegion::Rect {
            x,
            y,
            width,
            height,
        } => format!("$left = {x}\n$top = {y}\n$width = {width}\n$height = {height}\n"),
    };

    format!(
        "{PREAMBLE}Add-Type -AssemblyName System.Drawing\n\
         {bounds}\
         $bitmap = New-Object System.Drawing.Bitmap $width, $height\n\
         $graphics = [System.Drawing.Graphics]::FromImage($bitmap)\n\
         try {{\n\
         \x20   $graphics.CopyFromScreen($left, $top, 0, 0, $bitmap.Size)\n\
         \x20   $bitmap.Save({}, [System.Drawing.Imaging.ImageFormat]::Png)\n\
         }} finally {{\n\
         \x20   $graphics.Dispose()\n\
         \x20   $bitmap.Dispose()\n\
         }}\n",
        quote(host_output)
    )
}

/// Single-quoted PowerShell literal.
pub fn quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}

/// Parse enumeration output: one `x,y,width,height` tuple per line.
/// Unparseable lines are skipped.
pub fn parse_screen_bounds(output: &str) -> Vec<MonitorGeometry> {
    output
        .lines()
        .filter_map(|line| {
            let line = line.trim();
            if line.is_empty() {
                return None;
            }
            let fields: Vec<i32> = line
                .split(',')
                .map(|field| field.trim().parse::<i32>())
                .collect::<Result<_, _>>()
                .ok()?;
            match fields.as_slice() {
                [x, y, width, height] => Some(MonitorGeometry::new(*x, *y, *width, *height)),
                _ => {
                    tracing::debug!(line, "Ignoring malformed screen bounds line");
                    None
                }
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use deskshot_platform_core::arrange_monitors;

    #[test]
    fn scripts_enable_dpi_awareness_with_fallback() {
        for script in [
            enumerate_script(),
            capture_script(CaptureRegion::VirtualScreen, r"C:\t\a.png"),
        ] {
            assert!(script.contains("SetProcessDpiAwarenessContext([IntPtr]::new(-4))"));
            assert!(script.contains("SetProcessDPIAware()"));
        }
    }

    #[test]
    fn enumeration_reports_every_screen() {
        let script = enumerate_script();
        assert!(script.contains("[System.Windows.Forms.Screen]::AllScreens"));
        assert!(script.contains("'{0},{1},{2},{3}'"));
    }

    #[test]
    fn desktop_capture_uses_virtual_screen() {
        let script = capture_script(CaptureRegion::VirtualScreen, r"C:\t\a.png");
        assert!(script.contains("SystemInformation]::VirtualScreen"));
        assert!(script.contains("$bitmap.Save('C:\\t\\a.png', [System.Drawing.Imaging.ImageFormat]::Png)"));
        assert!(script.contains("} finally {"));
    }

    #[test]
    fn monitor_capture_uses_literal_rect() {
        let script = capture_script(
            CaptureRegion::Rect {
                x: 1920,
                y: 0,
                width: 2560,
                height: 1440,
            },
            r"C:\t\a.png",
        );
        assert!(script.contains("$left = 1920\n$top = 0\n$width = 2560\n$height = 1440\n"));
        assert!(script.contains("CopyFromScreen($left, $top, 0, 0, $bitmap.Size)"));
        assert!(!script.contains("VirtualScreen"));
    }

    #[test]
    fn monitor_region_clamps_negative_origin() {
        let monitor = arrange_monitors(vec![MonitorGeometry::new(-1920, -200, 1920, 1080)]).remove(0);
        assert_eq!(
            CaptureRegion::for_monitor(&monitor),
            CaptureRegion::Rect {
                x: 0,
                y: 0,
                width: 1920,
                height: 1080
            }
        );
    }

    #[test]
    fn quotes_are_doubled() {
        assert_eq!(quote(r"C:\Users\o'brien\a.png"), r"'C:\Users\o''brien\a.png'");
    }

    #[test]
    fn parses_bounds_lines() {
        let output = "0,0,2560,1440\r\n-1920,120,1920,1080\r\n\r\nwarning: something\r\n1,2,3\r\n";
        assert_eq!(
            parse_screen_bounds(output),
            vec![
                MonitorGeometry::new(0, 0, 2560, 1440),
                MonitorGeometry::new(-1920, 120, 1920, 1080),
            ]
        );
    }
}
