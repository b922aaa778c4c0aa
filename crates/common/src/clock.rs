//! Run timestamps and unique temporary names.
//!
//! A single [`RunTimestamp`] is taken when an invocation starts and passed
//! down to every filename computation, so all outputs of one run share the
//! same stamp regardless of how long the individual captures take.

use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Local, TimeZone};

/// Wall-clock instant an invocation started.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunTimestamp {
    at: DateTime<Local>,
}

impl RunTimestamp {
    /// Capture the current local time.
    pub fn now() -> Self {
        Self { at: Local::now() }
    }

    /// Build a timestamp from an explicit instant (tests, replays).
    pub fn from_datetime<Tz: TimeZone>(at: DateTime<Tz>) -> Self {
        Self {
            at: at.with_timezone(&Local),
        }
    }

    /// `YYYY-MM-DD_HH-MM-SS`, as used in output file names.
    pub fn file_stamp(&self) -> String {
        self.at.format("%Y-%m-%d_%H-%M-%S").to_string()
    }

    /// RFC 3339 rendering for logs.
    pub fn to_rfc3339(&self) -> String {
        self.at.to_rfc3339()
    }
}

static TEMP_COUNTER: AtomicU64 = AtomicU64::new(0);

/// A file name that is unique within this process and very unlikely to
/// collide with other processes: `{prefix}_{millis}_{pid}_{seq}.{ext}`.
pub fn unique_temp_name(prefix: &str, extension: &str) -> String {
    let millis = chrono::Utc::now().timestamp_millis();
    let seq = TEMP_COUNTER.fetch_add(1, Ordering::Relaxed);
    format!(
        "{prefix}_{millis}_{}_{seq}.{extension}",
        std::process::id()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_stamp_layout() {
        let at = Local.with_ymd_and_hms(2024, 3, 9, 7, 5, 2).unwrap();
        let stamp = RunTimestamp::from_datetime(at);
        assert_eq!(stamp.file_stamp(), "2024-03-09_07-05-02");
    }

    #[test]
    fn stamp_is_stable_once_taken() {
        let stamp = RunTimestamp::now();
        let first = stamp.file_stamp();
        std::thread::sleep(std::time::Duration::from_millis(5));
        assert_eq!(stamp.file_stamp(), first);
    }

    #[test]
    fn temp_names_never_repeat() {
        let a = unique_temp_name("deskshot", "png");
        let b = unique_temp_name("deskshot", "png");
        assert_ne!(a, b);
        assert!(a.starts_with("deskshot_"));
        assert!(a.ends_with(".png"));
    }
}
