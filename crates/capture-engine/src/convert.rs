//! Output formats and conversion of captured PNGs.
//!
//! Every backend produces PNG. Requesting PNG output is a plain copy; any
//! other format goes through a [`Transcoder`].

use std::fmt;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::str::FromStr;

use deskshot_common::error::{DeskshotError, DeskshotResult};
use deskshot_common::TempFile;
use image::codecs::jpeg::JpegEncoder;
use image::DynamicImage;

/// Requested output format. `Jpg` and `Jpeg` differ only in the file
/// extension they produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ImageFormat {
    #[default]
    Png,
    Jpg,
    Jpeg,
    Bmp,
}

impl ImageFormat {
    /// File extension, exactly as requested.
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpg => "jpg",
            Self::Jpeg => "jpeg",
            Self::Bmp => "bmp",
        }
    }

    /// Whether captures can be copied without re-encoding.
    pub fn is_native(&self) -> bool {
        matches!(self, Self::Png)
    }
}

impl fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ImageFormat {
    type Err = DeskshotError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "png" => Ok(Self::Png),
            "jpg" => Ok(Self::Jpg),
            "jpeg" => Ok(Self::Jpeg),
            "bmp" => Ok(Self::Bmp),
            other => Err(DeskshotError::config(format!(
                "Unsupported format '{other}' (expected png, jpg, jpeg or bmp)"
            ))),
        }
    }
}

/// Re-encodes a raster file into another format.
pub trait Transcoder {
    /// Decode `source` and write it to `destination` as `format`.
    /// `quality` (1-100) only applies to JPEG.
    fn transcode(
        &self,
        source: &Path,
        destination: &Path,
        format: ImageFormat,
        quality: u8,
    ) -> DeskshotResult<()>;
}

/// [`Transcoder`] backed by the `image` crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImageTranscoder;

impl Transcoder for ImageTranscoder {
    fn transcode(
        &self,
        source: &Path,
        destination: &Path,
        format: ImageFormat,
        quality: u8,
    ) -> DeskshotResult<()> {
        let decoded = image::open(source).map_err(|e| {
            DeskshotError::conversion(format!("Failed to decode {}: {e}", source.display()))
        })?;

        let file = File::create(destination)?;
        let mut writer = BufWriter::new(file);
        let encoded = match format {
            ImageFormat::Jpg | ImageFormat::Jpeg => {
                let encoder = JpegEncoder::new_with_quality(&mut writer, quality.clamp(1, 100));
                DynamicImage::ImageRgb8(decoded.to_rgb8()).write_with_encoder(encoder)
            }
            ImageFormat::Bmp => decoded.write_to(&mut writer, image::ImageFormat::Bmp),
            ImageFormat::Png => decoded.write_to(&mut writer, image::ImageFormat::Png),
        };
        encoded.map_err(|e| {
            DeskshotError::conversion(format!("Failed to encode {format}: {e}"))
        })?;
        writer.flush()?;
        Ok(())
    }
}

/// Move a captured artifact to `destination` in `format`.
///
/// The artifact is consumed and removed whether or not conversion
/// succeeds. On failure a destination this call created is removed; a file
/// that already existed there is left alone.
pub fn place_artifact(
    artifact: TempFile,
    destination: &Path,
    format: ImageFormat,
    quality: u8,
    transcoder: &dyn Transcoder,
) -> DeskshotResult<()> {
    let existed = destination.exists();
    let result = if format.is_native() {
        std::fs::copy(artifact.path(), destination)
            .map(|_| ())
            .map_err(|e| {
                DeskshotError::conversion(format!(
                    "Failed to copy capture to {}: {e}",
                    destination.display()
                ))
            })
    } else {
        tracing::debug!(%format, quality, "Transcoding capture");
        transcoder.transcode(artifact.path(), destination, format, quality)
    };

    drop(artifact);

    if result.is_err() && !existed {
        let _ = std::fs::remove_file(destination);
    }
    result
}
