//! Formatting and display logic
//!
//! Pure functions for formatting data for human-readable display.

use crate::api::RemoteFileRecord;

const SIZE_UNITS: [&str; 6] = ["B", "KB", "MB", "GB", "TB", "PB"];

/// Format a byte count with decimal unit scaling
///
/// Divides by 1000 until the value drops below 1000, then drops the
/// fraction. Sizes beyond the petabyte range stay expressed in PB.
///
/// # Examples
/// ```
/// use siaview::logic::formatting::readable_filesize;
///
/// assert_eq!(readable_filesize(0), "0 B");
/// assert_eq!(readable_filesize(999), "999 B");
/// assert_eq!(readable_filesize(1_500_000), "1 MB");
/// assert_eq!(readable_filesize(2_000_000_000_000), "2 TB");
/// ```
pub fn readable_filesize(bytes: u64) -> String {
    let mut size = bytes;
    for (i, unit) in SIZE_UNITS.iter().enumerate() {
        if size < 1000 || i == SIZE_UNITS.len() - 1 {
            return format!("{} {}", size, unit);
        }
        size /= 1000;
    }
    format!("{} B", bytes)
}

/// Summed `filesize` of `files`, saturating at `u64::MAX`
pub fn total_filesize<'a, I>(files: I) -> u64
where
    I: IntoIterator<Item = &'a RemoteFileRecord>,
{
    files
        .into_iter()
        .fold(0u64, |total, f| total.saturating_add(f.filesize))
}

/// Total size of a file list, formatted
pub fn total_usage(files: &[RemoteFileRecord]) -> String {
    readable_filesize(total_filesize(files))
}

/// Whole percent, clamped to 0..=100
pub fn floor_progress(progress: f64) -> u32 {
    if progress.is_nan() {
        return 0;
    }
    progress.floor().clamp(0.0, 100.0) as u32
}
