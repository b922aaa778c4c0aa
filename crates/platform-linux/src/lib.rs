//! Deskshot Linux Platform Integration
//!
//! Platform-specific implementations for native Linux (X11):
//! - **Display Detection:** monitor enumeration through `xrandr`
//! - **Capture:** root-window screenshots through ImageMagick `import`

pub mod capture;
pub mod display;

pub use capture::*;
pub use display::*;
