//! Guest/host path translation for a Linux guest on a Windows host.
//!
//! The host's PowerShell can only write where it can resolve a path. Under
//! a Linux guest we therefore prefer the user's host temp directory as seen
//! through the bridged drive mount (`/mnt/c/Users/<user>/AppData/Local/Temp`)
//! and translate paths between the two namespaces.
//!
//! When that directory is not reachable we fall back to the guest's own
//! temp directory and hand the host the unchanged guest path. That only
//! works if the host side can resolve it; this is an accepted limitation
//! and is logged when it happens.

use std::path::{Path, PathBuf};

/// Where drive letters are mounted inside the guest.
pub const BRIDGE_MOUNT_ROOT: &str = "/mnt";

/// How guest paths map onto host paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathMapping {
    /// Host and guest see the same path string.
    Identity,
    /// `/mnt/<drive>/...` on the guest is `<DRIVE>:\...` on the host.
    Bridged,
}

/// Directory for temporary scripts and images plus the mapping needed to
/// name them for the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TempLocation {
    dir: PathBuf,
    mapping: PathMapping,
}

impl TempLocation {
    /// Native Windows: one namespace, the process temp dir.
    pub fn native() -> Self {
        Self {
            dir: std::env::temp_dir(),
            mapping: PathMapping::Identity,
        }
    }

    /// Linux guest on a Windows host, probing the real filesystem and the
    /// current user name.
    pub fn guest(prefer_bridged: bool) -> Self {
        let user = std::env::var("USER")
            .or_else(|_| std::env::var("LOGNAME"))
            .ok();
        Self::guest_with(
            user.as_deref(),
            prefer_bridged,
            std::env::temp_dir(),
            is_accessible_dir,
        )
    }

    /// Linux guest on a Windows host with injected probes.
    pub fn guest_with(
        user: Option<&str>,
        prefer_bridged: bool,
        fallback_dir: PathBuf,
        accessible: impl Fn(&Path) -> bool,
    ) -> Self {
        if prefer_bridged {
            if let Some(user) = user.filter(|u| !u.is_empty()) {
                let bridged = bridged_temp_dir(user);
                if accessible(&bridged) {
                    tracing::debug!(dir = %bridged.display(), "Using bridged host temp directory");
                    return Self {
                        dir: bridged,
                        mapping: PathMapping::Bridged,
                    };
                }
                tracing::warn!(
                    dir = %bridged.display(),
                    "Bridged host temp directory is not accessible; \
                     the host capture tool must resolve guest paths itself"
                );
            } else {
                tracing::warn!("Current user unknown; cannot locate bridged host temp directory");
            }
        }

        Self {
            dir: fallback_dir,
            mapping: PathMapping::Identity,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn mapping(&self) -> PathMapping {
        self.mapping
    }

    /// Name `guest_path` the way the host sees it.
    pub fn host_path(&self, guest_path: &Path) -> String {
        match self.mapping {
            PathMapping::Identity => guest_path.display().to_string(),
            PathMapping::Bridged => {
                to_host_path(guest_path).unwrap_or_else(|| guest_path.display().to_string())
            }
        }
    }
}

/// `/mnt/c/Users/<user>/AppData/Local/Temp`.
pub fn bridged_temp_dir(user: &str) -> PathBuf {
    Path::new(BRIDGE_MOUNT_ROOT)
        .join("c")
        .join("Users")
        .join(user)
        .join("AppData")
        .join("Local")
        .join("Temp")
}

/// Translate `/mnt/<drive>/a/b` into `<DRIVE>:\a\b`.
///
/// Returns `None` for paths outside the bridge mount.
pub fn to_host_path(guest_path: &Path) -> Option<String> {
    let guest = guest_path.to_str()?;
    let rest = guest.strip_prefix(BRIDGE_MOUNT_ROOT)?.strip_prefix('/')?;
    let (drive, tail) = match rest.split_once('/') {
        Some((drive, tail)) => (drive, tail),
        None => (rest, ""),
    };
    if drive.len() != 1 || !drive.chars().all(|c| c.is_ascii_alphabetic()) {
        return None;
    }

    let tail = tail
        .split('/')
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("\\");
    Some(format!("{}:\\{}", drive.to_ascii_uppercase(), tail))
}

/// Translate `<DRIVE>:\a\b` into `/mnt/<drive>/a/b`.
///
/// Returns `None` for anything that is not a drive-absolute host path.
pub fn to_guest_path(host_path: &str) -> Option<PathBuf> {
    let mut chars = host_path.chars();
    let drive = chars.next().filter(|c| c.is_ascii_alphabetic())?;
    if chars.next() != Some(':') {
        return None;
    }
    let tail = chars.as_str();
    if !(tail.is_empty() || tail.starts_with('\\') || tail.starts_with('/')) {
        return None;
    }

    let mut guest = Path::new(BRIDGE_MOUNT_ROOT).join(drive.to_ascii_lowercase().to_string());
    for part in tail.split(|c: char| c == '\\' || c == '/').filter(|p| !p.is_empty()) {
        guest.push(part);
    }
    Some(guest)
}

fn is_accessible_dir(path: &Path) -> bool {
    std::fs::metadata(path)
        .map(|meta| meta.is_dir() && !meta.permissions().readonly())
        .unwrap_or(false)
}
