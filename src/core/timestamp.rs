use std::fs;
use std::path::Path;
use std::process::Command;

use chrono::{DateTime, FixedOffset, Local, SecondsFormat, TimeZone};

/// Something that may know when a file last changed.
pub trait TimestampSource: Send + Sync {
    fn last_modified(&self, path: &Path) -> Option<DateTime<FixedOffset>>;
}

/// Asks git for the author time of the last commit touching the file.
#[derive(Debug, Default, Clone, Copy)]
pub struct GitTimestamps;

impl TimestampSource for GitTimestamps {
    fn last_modified(&self, path: &Path) -> Option<DateTime<FixedOffset>> {
        let dir = path.parent().filter(|p| !p.as_os_str().is_empty())?;
        let file = path.file_name()?;

        let output = Command::new("git")
            .args(["--no-pager", "log", "-1", "--format=%ct", "--"])
            .arg(file)
            .current_dir(dir)
            .output()
            .ok()?;

        if !output.status.success() {
            log::debug!("git log failed for {}", path.display());
            return None;
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let seconds: i64 = stdout.trim().parse().ok()?;
        Local
            .timestamp_opt(seconds, 0)
            .single()
            .map(|dt| dt.fixed_offset())
    }
}

/// Never knows anything; used when source-control dates are disabled.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoTimestamps;

impl TimestampSource for NoTimestamps {
    fn last_modified(&self, _path: &Path) -> Option<DateTime<FixedOffset>> {
        None
    }
}

impl<F> TimestampSource for F
where
    F: Fn(&Path) -> Option<DateTime<FixedOffset>> + Send + Sync,
{
    fn last_modified(&self, path: &Path) -> Option<DateTime<FixedOffset>> {
        self(path)
    }
}

pub fn file_modified(path: &Path) -> Option<DateTime<FixedOffset>> {
    let modified = fs::metadata(path).and_then(|m| m.modified()).ok()?;
    Some(DateTime::<Local>::from(modified).fixed_offset())
}

/// RFC 3339 with offset, e.g. `2024-05-01T09:30:00+02:00`.
pub fn format_date<Tz: TimeZone>(dt: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    dt.to_rfc3339_opts(SecondsFormat::Secs, false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_timestamps() {
        assert!(NoTimestamps.last_modified(Path::new("a.md")).is_none());
    }

    #[test]
    fn test_git_outside_repo_is_none() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("note.md");
        fs::write(&path, "x").unwrap();
        // a fresh temp dir is not tracked, so git either fails or prints nothing
        assert!(GitTimestamps.last_modified(&path).is_none());
    }

    #[test]
    fn test_file_modified() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("note.md");
        fs::write(&path, "x").unwrap();
        assert!(file_modified(&path).is_some());
        assert!(file_modified(&dir.path().join("missing.md")).is_none());
    }

    #[test]
    fn test_format_date() {
        let dt = FixedOffset::east_opt(2 * 3600)
            .unwrap()
            .with_ymd_and_hms(2024, 5, 1, 9, 30, 0)
            .unwrap();
        assert_eq!(format_date(&dt), "2024-05-01T09:30:00+02:00");
    }

    #[test]
    fn test_closure_source() {
        let fixed = |_: &Path| {
            DateTime::parse_from_rfc3339("2020-01-01T00:00:00+00:00").ok()
        };
        assert_eq!(
            fixed.last_modified(Path::new("x.md")).map(|d| format_date(&d)),
            Some("2020-01-01T00:00:00+00:00".to_string())
        );
    }
}
