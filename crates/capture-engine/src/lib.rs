//! Deskshot Capture Engine
//!
//! Turns a capture request into image files on disk. Platform backends
//! produce temporary PNGs through native tools; the session converts and
//! names them, then removes the temporaries.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │               CaptureSession                 │
//! │  ┌────────────────┐      ┌────────────────┐  │
//! │  │ CaptureBackend │      │   Transcoder   │  │
//! │  │ win/mac/linux  │      │ (image crate)  │  │
//! │  └───────┬────────┘      └───────┬────────┘  │
//! │          │ temp PNG              │           │
//! │          ▼                       ▼           │
//! │  ┌─────────────────────────────────────────┐ │
//! │  │            Output directory             │ │
//! │  │ DesktopImage_…  DisplayImage1_…  …      │ │
//! │  └─────────────────────────────────────────┘ │
//! └──────────────────────────────────────────────┘
//! ```

pub mod backend;
pub mod convert;
pub mod naming;
pub mod session;

pub use backend::{backend_for, CaptureBackend};
pub use convert::{ImageFormat, ImageTranscoder, Transcoder};
pub use session::*;
