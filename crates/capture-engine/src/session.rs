//! Capture orchestration for one invocation.
//!
//! ```text
//! detect monitors ──► single display? ──yes──► validate index ──► capture ──► place
//!                          │
//!                          no
//!                          ▼
//!                 capture desktop ──► place ──► for each monitor: capture ──► place
//!                                                  (failures logged and skipped)
//! ```

use std::path::PathBuf;

use deskshot_common::clock::RunTimestamp;
use deskshot_common::error::{DeskshotError, DeskshotResult};
use deskshot_platform_core::{CaptureTarget, MonitorInfo};

use crate::backend::CaptureBackend;
use crate::convert::{place_artifact, ImageFormat, Transcoder};
use crate::naming::output_file_name;

/// What one invocation should produce.
#[derive(Debug, Clone)]
pub struct CaptureRequest {
    /// 1-based display to capture alone; `None` captures the desktop and
    /// then every display.
    pub display: Option<u32>,

    /// Directory receiving the output files; created when missing.
    pub output_dir: PathBuf,

    /// Output format.
    pub format: ImageFormat,

    /// JPEG quality (1-100). Ignored for other formats.
    pub quality: u8,
}

impl Default for CaptureRequest {
    fn default() -> Self {
        Self {
            display: None,
            output_dir: PathBuf::from("."),
            format: ImageFormat::Png,
            quality: 100,
        }
    }
}

/// A display that could not be captured during an all-displays run.
#[derive(Debug)]
pub struct DisplayFailure {
    pub index: u32,
    pub error: DeskshotError,
}

/// Outcome of a run that did not fail as a whole.
#[derive(Debug, Default)]
pub struct CaptureReport {
    /// Files written, in capture order.
    pub written: Vec<PathBuf>,

    /// Individual displays that failed and were skipped.
    pub failures: Vec<DisplayFailure>,

    /// Number of monitors enumerated.
    pub monitor_count: usize,
}

impl CaptureReport {
    pub fn is_partial(&self) -> bool {
        !self.failures.is_empty()
    }
}

/// Runs one invocation against a backend, sequentially.
pub struct CaptureSession<'a> {
    backend: &'a dyn CaptureBackend,
    transcoder: &'a dyn Transcoder,
    stamp: RunTimestamp,
}

impl<'a> CaptureSession<'a> {
    /// `stamp` names every output of this session.
    pub fn new(
        backend: &'a dyn CaptureBackend,
        transcoder: &'a dyn Transcoder,
        stamp: RunTimestamp,
    ) -> Self {
        Self {
            backend,
            transcoder,
            stamp,
        }
    }

    /// Execute `request`.
    ///
    /// Fails as a whole when the requested display does not exist, when the
    /// single requested display cannot be captured, or when the desktop
    /// composite cannot be captured. Failures of individual displays in an
    /// all-displays run are recorded in the report instead.
    pub async fn run(&self, request: &CaptureRequest) -> DeskshotResult<CaptureReport> {
        let platform = self.backend.platform();
        tracing::info!(
            %platform,
            stamp = %self.stamp.to_rfc3339(),
            display = ?request.display,
            format = %request.format,
            "Starting capture"
        );

        let monitors = self.backend.detect_monitors().await;
        if monitors.is_empty() {
            tracing::warn!("No monitors enumerated; only the whole desktop can be captured");
        }

        let mut report = CaptureReport {
            monitor_count: monitors.len(),
            ..CaptureReport::default()
        };

        match request.display {
            Some(requested) => {
                let monitor = select_display(&monitors, requested)?;
                prepare_output_dir(request)?;
                let path = self
                    .capture_and_place(&CaptureTarget::Monitor(monitor), request)
                    .await?;
                report.written.push(path);
            }
            None => {
                prepare_output_dir(request)?;
                let path = self
                    .capture_and_place(&CaptureTarget::Desktop, request)
                    .await?;
                report.written.push(path);

                for monitor in monitors {
                    let index = monitor.index;
                    match self
                        .capture_and_place(&CaptureTarget::Monitor(monitor), request)
                        .await
                    {
                        Ok(path) => report.written.push(path),
                        Err(error) => {
                            tracing::error!(display = index, %error, "Display capture failed; skipping");
                            report.failures.push(DisplayFailure { index, error });
                        }
                    }
                }
            }
        }

        tracing::info!(
            written = report.written.len(),
            failed = report.failures.len(),
            "Capture finished"
        );
        Ok(report)
    }

    async fn capture_and_place(
        &self,
        target: &CaptureTarget,
        request: &CaptureRequest,
    ) -> DeskshotResult<PathBuf> {
        let artifact = self.backend.capture(target).await?;
        let destination = request
            .output_dir
            .join(output_file_name(target, &self.stamp, request.format));

        place_artifact(
            artifact,
            &destination,
            request.format,
            request.quality,
            self.transcoder,
        )?;
        tracing::debug!(path = %destination.display(), "Saved capture");
        Ok(destination)
    }
}

/// Pick display `requested` (1-based) from the enumerated monitors.
pub fn select_display(monitors: &[MonitorInfo], requested: u32) -> DeskshotResult<MonitorInfo> {
    monitors
        .iter()
        .find(|m| m.index == requested)
        .cloned()
        .ok_or(DeskshotError::DisplayNotFound {
            requested,
            available: monitors.len(),
        })
}

fn prepare_output_dir(request: &CaptureRequest) -> DeskshotResult<()> {
    std::fs::create_dir_all(&request.output_dir).map_err(|e| {
        DeskshotError::config(format!(
            "Cannot create output directory {}: {e}",
            request.output_dir.display()
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use deskshot_platform_core::{arrange_monitors, MonitorGeometry};

    #[test]
    fn select_display_is_one_based() {
        let monitors = arrange_monitors(vec![
            MonitorGeometry::new(0, 0, 800, 600),
            MonitorGeometry::new(800, 0, 800, 600),
        ]);
        assert_eq!(select_display(&monitors, 2).unwrap().x, 800);

        for requested in [0, 3] {
            let err = select_display(&monitors, requested).unwrap_err();
            assert_eq!(
                err.to_string(),
                format!("Display {requested} not found. Available displays: 1-2")
            );
        }
    }

    #[test]
    fn select_display_with_no_monitors() {
        let err = select_display(&[], 1).unwrap_err();
        assert_eq!(err.to_string(), "Display 1 not found. Available displays: 1-0");
    }
}
