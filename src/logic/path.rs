//! Virtual path utilities
//!
//! Siapaths are `/`-delimited and carry no leading slash, e.g.
//! `photos/2017/beach.jpg`. The root directory is the empty string.

use serde::{Deserialize, Serialize};

/// How "is this siapath under that directory" is decided
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PathMatch {
    /// True prefix test on whole path segments
    #[default]
    Segment,
    /// Any siapath containing the directory path as a substring.
    /// Over-matches siblings that share a substring (`foo` matches
    /// `barfoo/x`); kept for parity with older clients.
    Substring,
}

/// Strip leading and trailing slashes so `"/photos/"` and `"photos"` agree
pub fn normalize_dir(path: &str) -> &str {
    path.trim_matches('/')
}

/// Check whether `siapath` lives below directory `dir`
///
/// # Examples
/// ```
/// use siaview::logic::path::{is_under, PathMatch};
///
/// assert!(is_under("photos/a.jpg", "photos", PathMatch::Segment));
/// assert!(!is_under("photos-old/a.jpg", "photos", PathMatch::Segment));
/// assert!(is_under("photos-old/a.jpg", "photos", PathMatch::Substring));
/// assert!(is_under("anything", "", PathMatch::Segment));
/// ```
pub fn is_under(siapath: &str, dir: &str, mode: PathMatch) -> bool {
    relative_to(siapath, dir, mode).is_some()
}

/// Path of `siapath` relative to directory `dir`, if it is under it
///
/// In [`PathMatch::Substring`] mode the relative path is whatever follows the
/// first occurrence of `dir`.
///
/// # Examples
/// ```
/// use siaview::logic::path::{relative_to, PathMatch};
///
/// assert_eq!(relative_to("a/b/c.txt", "a", PathMatch::Segment), Some("b/c.txt"));
/// assert_eq!(relative_to("a/b/c.txt", "/a/", PathMatch::Segment), Some("b/c.txt"));
/// assert_eq!(relative_to("c.txt", "", PathMatch::Segment), Some("c.txt"));
/// assert_eq!(relative_to("ab/c.txt", "a", PathMatch::Segment), None);
/// ```
pub fn relative_to<'a>(siapath: &'a str, dir: &str, mode: PathMatch) -> Option<&'a str> {
    let dir = normalize_dir(dir);
    if dir.is_empty() {
        return Some(siapath);
    }

    match mode {
        PathMatch::Segment => siapath.strip_prefix(dir)?.strip_prefix('/'),
        PathMatch::Substring => {
            let at = siapath.find(dir)?;
            Some(siapath[at + dir.len()..].trim_start_matches('/'))
        }
    }
}

/// Check whether `siapath` lives below a directory siapath ending in `/`
pub fn is_under_dir_siapath(siapath: &str, dir_siapath: &str, mode: PathMatch) -> bool {
    match mode {
        PathMatch::Segment => siapath.starts_with(dir_siapath),
        PathMatch::Substring => siapath.contains(dir_siapath),
    }
}

/// Siapath of child directory `name` inside `dir`, with a trailing slash
pub fn child_dir_siapath(dir: &str, name: &str) -> String {
    let dir = normalize_dir(dir);
    if dir.is_empty() {
        format!("{}/", name)
    } else {
        format!("{}/{}/", dir, name)
    }
}

/// Last path segment, e.g. `beach.jpg` for `photos/2017/beach.jpg`
pub fn basename(siapath: &str) -> &str {
    let trimmed = siapath.trim_end_matches('/');
    trimmed.rsplit('/').next().unwrap_or(trimmed)
}
