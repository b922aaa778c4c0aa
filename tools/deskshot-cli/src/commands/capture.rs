//! Capture the desktop and displays to files.

use std::path::PathBuf;

use deskshot_capture_engine::{CaptureRequest, CaptureSession, ImageFormat, ImageTranscoder};
use deskshot_common::clock::RunTimestamp;
use deskshot_common::config::AppConfig;

/// Flags from the command line; unset values fall back to the config file.
pub struct CaptureOptions {
    pub display: Option<u32>,
    pub output: Option<PathBuf>,
    pub format: String,
    pub quality: Option<u8>,
}

pub async fn run(options: CaptureOptions, config: &AppConfig) -> anyhow::Result<()> {
    let request = build_request(options, config)?;
    let backend = super::platform_backend(config)?;
    let transcoder = ImageTranscoder;

    let session = CaptureSession::new(backend.as_ref(), &transcoder, RunTimestamp::now());
    let report = session.run(&request).await?;

    for path in &report.written {
        println!("Saved {}", path.display());
    }
    if report.is_partial() {
        let skipped: Vec<String> = report
            .failures
            .iter()
            .map(|f| f.index.to_string())
            .collect();
        eprintln!(
            "Warning: skipped display(s) {} of {}",
            skipped.join(", "),
            report.monitor_count
        );
    }
    Ok(())
}

fn build_request(options: CaptureOptions, config: &AppConfig) -> anyhow::Result<CaptureRequest> {
    let format: ImageFormat = options.format.parse()?;
    let output_dir = options
        .output
        .or_else(|| config.output.dir.clone())
        .unwrap_or_else(|| PathBuf::from("."));

    Ok(CaptureRequest {
        display: options.display,
        output_dir,
        format,
        quality: options.quality.unwrap_or(config.output.quality),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options(format: &str) -> CaptureOptions {
        CaptureOptions {
            display: None,
            output: None,
            format: format.to_string(),
            quality: None,
        }
    }

    #[test]
    fn flags_override_config() {
        let mut config = AppConfig::default();
        config.output.dir = Some(PathBuf::from("/srv/shots"));
        config.output.quality = 60;

        let request = build_request(
            CaptureOptions {
                display: Some(2),
                output: Some(PathBuf::from("here")),
                format: "jpg".to_string(),
                quality: Some(90),
            },
            &config,
        )
        .unwrap();
        assert_eq!(request.display, Some(2));
        assert_eq!(request.output_dir, PathBuf::from("here"));
        assert_eq!(request.format, ImageFormat::Jpg);
        assert_eq!(request.quality, 90);
    }

    #[test]
    fn config_then_builtin_defaults() {
        let mut config = AppConfig::default();
        let request = build_request(options("png"), &config).unwrap();
        assert_eq!(request.output_dir, PathBuf::from("."));
        assert_eq!(request.quality, 100);

        config.output.dir = Some(PathBuf::from("/srv/shots"));
        config.output.quality = 75;
        let request = build_request(options("bmp"), &config).unwrap();
        assert_eq!(request.output_dir, PathBuf::from("/srv/shots"));
        assert_eq!(request.quality, 75);
        assert_eq!(request.format, ImageFormat::Bmp);
    }
}
