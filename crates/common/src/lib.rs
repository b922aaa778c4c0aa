//! Deskshot Common Utilities
//!
//! Shared infrastructure for all Deskshot crates:
//! - Error types and result aliases
//! - Run timestamps and unique temp names
//! - Tracing/logging initialization
//! - Configuration loading
//! - Bounded external process execution
//! - Scoped temporary files

pub mod clock;
pub mod config;
pub mod error;
pub mod logging;
pub mod process;
pub mod temp;

pub use clock::*;
pub use config::*;
pub use error::*;
pub use temp::TempFile;
