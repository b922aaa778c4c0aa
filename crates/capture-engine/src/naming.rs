//! Output file names.

use deskshot_common::clock::RunTimestamp;
use deskshot_platform_core::CaptureTarget;

use crate::convert::ImageFormat;

/// `{prefix}_{YYYY-MM-DD}_{HH-MM-SS}.{format}`.
pub fn output_file_name(target: &CaptureTarget, stamp: &RunTimestamp, format: ImageFormat) -> String {
    format!(
        "{}_{}.{}",
        target.file_prefix(),
        stamp.file_stamp(),
        format.extension()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Local, TimeZone};
    use deskshot_platform_core::{arrange_monitors, MonitorGeometry};

    #[test]
    fn names_follow_prefix_stamp_format() {
        let stamp = RunTimestamp::from_datetime(Local.with_ymd_and_hms(2025, 1, 31, 23, 59, 8).unwrap());
        let monitor = arrange_monitors(vec![
            MonitorGeometry::new(0, 0, 1920, 1080),
            MonitorGeometry::new(1920, 0, 1920, 1080),
        ])
        .remove(1);

        assert_eq!(
            output_file_name(&CaptureTarget::Desktop, &stamp, ImageFormat::Png),
            "DesktopImage_2025-01-31_23-59-08.png"
        );
        assert_eq!(
            output_file_name(&CaptureTarget::Monitor(monitor), &stamp, ImageFormat::Jpeg),
            "DisplayImage2_2025-01-31_23-59-08.jpeg"
        );
    }
}
