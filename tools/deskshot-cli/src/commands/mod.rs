pub mod capture;
pub mod list;

use deskshot_capture_engine::{backend_for, CaptureBackend};
use deskshot_common::config::AppConfig;
use deskshot_platform_core::detect_platform;

/// Detect the running platform and build its capture backend.
pub(crate) fn platform_backend(config: &AppConfig) -> anyhow::Result<Box<dyn CaptureBackend>> {
    Ok(backend_for(&detect_platform(), &config.capture)?)
}
