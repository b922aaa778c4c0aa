//! List detected displays.

use deskshot_common::config::AppConfig;
use deskshot_platform_core::virtual_desktop_bounds;

pub async fn run(config: &AppConfig) -> anyhow::Result<()> {
    let backend = super::platform_backend(config)?;
    let monitors = backend.detect_monitors().await;

    println!("Platform: {}", backend.platform());
    if monitors.is_empty() {
        println!("No displays detected (only the whole desktop can be captured)");
        return Ok(());
    }

    println!("Displays:");
    for monitor in &monitors {
        println!("  {}", monitor.describe());
    }
    if let Some((x, y, width, height)) = virtual_desktop_bounds(&monitors) {
        println!("Desktop: {width}x{height} at ({x},{y})");
    }
    Ok(())
}
