//! Runtime platform detection.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Mount point that only exists when a Windows host drive is bridged into
/// a Linux guest.
///
/// This is a heuristic: a native Linux machine that happens to have
/// something mounted at `/mnt/c` is reported as a nested environment.
pub const BRIDGE_MOUNT_PROBE: &str = "/mnt/c";

/// Platform the process runs on, determined once per invocation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Platform {
    NativeWindows,
    NativeMacos,
    NativeLinux,
    /// Linux guest running on a Windows host with the host drive bridged in.
    LinuxUnderWindows,
    /// Any other OS family, carrying its raw name.
    Unsupported(String),
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NativeWindows => f.write_str("native-windows"),
            Self::NativeMacos => f.write_str("native-macos"),
            Self::NativeLinux => f.write_str("native-linux"),
            Self::LinuxUnderWindows => f.write_str("linux-under-windows"),
            Self::Unsupported(os) => write!(f, "unsupported ({os})"),
        }
    }
}

/// Detect the platform of the running process.
pub fn detect_platform() -> Platform {
    let platform = detect_with(std::env::consts::OS, |path| path.exists());
    tracing::debug!(%platform, "Detected platform");
    platform
}

/// Map an OS family name to a [`Platform`], probing the bridge mount
/// through `path_exists` for Linux.
pub fn detect_with(os_family: &str, path_exists: impl Fn(&Path) -> bool) -> Platform {
    match os_family {
        "windows" => Platform::NativeWindows,
        "macos" => Platform::NativeMacos,
        "linux" => {
            if path_exists(Path::new(BRIDGE_MOUNT_PROBE)) {
                Platform::LinuxUnderWindows
            } else {
                Platform::NativeLinux
            }
        }
        other => Platform::Unsupported(other.to_string()),
    }
}
