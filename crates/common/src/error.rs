//! Error types shared across Deskshot crates.

/// Top-level error type for Deskshot operations.
#[derive(Debug, thiserror::Error)]
pub enum DeskshotError {
    #[error("Capture error: {message}")]
    Capture { message: String },

    #[error("Invalid monitor dimensions: {width}x{height}")]
    InvalidMonitor { width: u32, height: u32 },

    #[error("Display {requested} not found. Available displays: 1-{available}")]
    DisplayNotFound { requested: u32, available: usize },

    #[error("Conversion error: {message}")]
    Conversion { message: String },

    #[error("Platform error: {message}")]
    Platform { message: String },

    #[error("Unsupported platform: {message}")]
    Unsupported { message: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("{program} timed out after {secs}s")]
    Timeout { program: String, secs: u64 },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias using DeskshotError.
pub type DeskshotResult<T> = Result<T, DeskshotError>;

impl DeskshotError {
    pub fn capture(msg: impl Into<String>) -> Self {
        Self::Capture {
            message: msg.into(),
        }
    }

    pub fn conversion(msg: impl Into<String>) -> Self {
        Self::Conversion {
            message: msg.into(),
        }
    }

    pub fn platform(msg: impl Into<String>) -> Self {
        Self::Platform {
            message: msg.into(),
        }
    }

    pub fn unsupported(msg: impl Into<String>) -> Self {
        Self::Unsupported {
            message: msg.into(),
        }
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }
}
