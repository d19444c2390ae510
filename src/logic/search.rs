//! Search Logic
//!
//! Pure functions for filtering remote files by free text.

use crate::api::RemoteFileRecord;

use super::path::{is_under, PathMatch};

/// Case-insensitive substring match of `query` against a siapath
///
/// # Examples
/// ```
/// use siaview::logic::search::search_matches;
///
/// assert!(search_matches("", "any-file.txt"));
/// assert!(search_matches("BEACH", "photos/beach.jpg"));
/// assert!(search_matches("photos/be", "photos/beach.jpg"));
/// assert!(!search_matches("*.jpg", "photos/beach.jpg"));
/// ```
pub fn search_matches(query: &str, siapath: &str) -> bool {
    if query.is_empty() {
        return true;
    }
    siapath.to_lowercase().contains(&query.to_lowercase())
}

/// Files under `path` whose siapath contains `text`, using segment-wise
/// path matching
pub fn search_files(files: &[RemoteFileRecord], text: &str, path: &str) -> Vec<RemoteFileRecord> {
    search_files_with(files, text, path, PathMatch::default())
}

/// Files under `path` whose siapath contains `text`
///
/// The directory test is case-sensitive, the text match is not. Input order
/// is preserved.
pub fn search_files_with(
    files: &[RemoteFileRecord],
    text: &str,
    path: &str,
    mode: PathMatch,
) -> Vec<RemoteFileRecord> {
    files
        .iter()
        .filter(|file| is_under(&file.siapath, path, mode))
        .filter(|file| search_matches(text, &file.siapath))
        .cloned()
        .collect()
}
