//! Deskshot platform core contracts.
//!
//! This crate contains the cross-platform data structures shared by the
//! platform crates and the capture engine: which platform we run on, what
//! a monitor looks like, and what a single capture request targets.

pub mod platform;

pub use platform::*;

use serde::{Deserialize, Serialize};

/// A monitor rectangle as reported by a platform tool, before validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonitorGeometry {
    /// Output name when the platform reports one (e.g. `HDMI-1`).
    pub name: Option<String>,
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl MonitorGeometry {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            name: None,
            x,
            y,
            width,
            height,
        }
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

/// A connected monitor, numbered in reading order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MonitorInfo {
    /// 1-based position in reading order. Recomputed every invocation.
    pub index: u32,
    /// Output name when known.
    pub name: Option<String>,
    /// Position in the virtual desktop (pixels, may be negative).
    pub x: i32,
    pub y: i32,
    /// Resolution in physical pixels.
    pub width: u32,
    pub height: u32,
}

impl MonitorInfo {
    /// Human label such as `2: 1920x1080 at (1920,0) [HDMI-1]`.
    pub fn describe(&self) -> String {
        let mut label = format!(
            "{}: {}x{} at ({},{})",
            self.index, self.width, self.height, self.x, self.y
        );
        if let Some(name) = &self.name {
            label.push_str(&format!(" [{name}]"));
        }
        label
    }
}

/// Drop rectangles without a positive size, sort the rest top-to-bottom
/// then left-to-right, and number them `1..=N`.
pub fn arrange_monitors(raw: Vec<MonitorGeometry>) -> Vec<MonitorInfo> {
    let mut valid: Vec<MonitorGeometry> = raw
        .into_iter()
        .filter(|m| {
            let keep = m.width > 0 && m.height > 0;
            if !keep {
                tracing::debug!(?m, "Dropping monitor with non-positive size");
            }
            keep
        })
        .collect();

    valid.sort_by_key(|m| (m.y, m.x));

    valid
        .into_iter()
        .enumerate()
        .map(|(i, m)| MonitorInfo {
            index: i as u32 + 1,
            name: m.name,
            x: m.x,
            y: m.y,
            width: m.width as u32,
            height: m.height as u32,
        })
        .collect()
}

/// Compute virtual desktop bounds that include all connected monitors.
/// Returns `(min_x, min_y, width, height)` in physical pixels, or `None`
/// when there are no monitors.
pub fn virtual_desktop_bounds(monitors: &[MonitorInfo]) -> Option<(i32, i32, u32, u32)> {
    let min_x = monitors.iter().map(|m| m.x).min()?;
    let min_y = monitors.iter().map(|m| m.y).min()?;
    let max_x = monitors
        .iter()
        .map(|m| m.x as i64 + m.width as i64)
        .max()?;
    let max_y = monitors
        .iter()
        .map(|m| m.y as i64 + m.height as i64)
        .max()?;

    let width = (max_x - min_x as i64).max(1) as u32;
    let height = (max_y - min_y as i64).max(1) as u32;
    Some((min_x, min_y, width, height))
}

/// What a single capture produces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaptureTarget {
    /// The whole virtual desktop.
    Desktop,
    /// Exactly one monitor, cropped to its rectangle.
    Monitor(MonitorInfo),
}

impl CaptureTarget {
    pub fn monitor(&self) -> Option<&MonitorInfo> {
        match self {
            Self::Desktop => None,
            Self::Monitor(m) => Some(m),
        }
    }

    /// Output file name prefix: `DesktopImage` or `DisplayImage{index}`.
    pub fn file_prefix(&self) -> String {
        match self {
            Self::Desktop => "DesktopImage".to_string(),
            Self::Monitor(m) => format!("DisplayImage{}", m.index),
        }
    }
}
