//! Directory listing logic
//!
//! The daemon only knows a flat list of siapaths. A listing for one
//! directory is rebuilt from that list on every call: direct children become
//! file entries, and every deeper path contributes to a synthesized directory
//! entry named after its first segment below the listed directory.

use std::collections::HashSet;

use log::debug;

use crate::api::{EntryType, ListEntry, RemoteFileRecord};

use super::formatting::{floor_progress, readable_filesize, total_filesize};
use super::path::{child_dir_siapath, is_under_dir_siapath, relative_to, PathMatch};
use super::redundancy::min_redundancy;

/// List the contents of `path` using segment-wise path matching
///
/// # Examples
/// ```
/// use siaview::api::{EntryType, RemoteFileRecord};
/// use siaview::logic::directory::ls;
///
/// let file = |siapath: &str| RemoteFileRecord {
///     siapath: siapath.to_string(),
///     filesize: 1000,
///     redundancy: 1.5,
///     uploadprogress: 100.0,
///     available: true,
/// };
/// let files = vec![file("notes.txt"), file("photos/a.jpg"), file("photos/b.jpg")];
///
/// let entries = ls(&files, "");
/// assert_eq!(entries.len(), 2);
/// assert_eq!(entries[0].name, "notes.txt");
/// assert_eq!(entries[1].name, "photos");
/// assert_eq!(entries[1].siapath, "photos/");
/// assert_eq!(entries[1].size, "2 KB");
/// assert_eq!(entries[1].entry_type, EntryType::Directory);
/// ```
pub fn ls(files: &[RemoteFileRecord], path: &str) -> Vec<ListEntry> {
    ls_with(files, path, PathMatch::default())
}

/// List the contents of `path`
///
/// Entries are unique by name and sorted by name. When two records map to
/// the same name, the first one in `files` wins; later ones are dropped.
/// A directory entry takes `available` and `uploadprogress` from the first
/// record that produced it, while size and redundancy are aggregated over
/// every record below it.
pub fn ls_with(files: &[RemoteFileRecord], path: &str, mode: PathMatch) -> Vec<ListEntry> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut entries: Vec<ListEntry> = Vec::new();

    for file in files {
        let relative = match relative_to(&file.siapath, path, mode) {
            Some(rel) if !rel.is_empty() => rel,
            _ => continue,
        };

        let entry = match relative.split_once('/') {
            None => {
                if seen.contains(relative) {
                    continue;
                }
                file_entry(file, relative)
            }
            Some((dir_name, _)) => {
                if seen.contains(dir_name) {
                    continue;
                }
                directory_entry(files, file, path, dir_name, mode)
            }
        };

        seen.insert(entry.name.clone());
        entries.push(entry);
    }

    entries.sort_by(|a, b| a.name.cmp(&b.name));
    debug!(
        "ls {:?}: {} entries from {} records",
        path,
        entries.len(),
        files.len()
    );
    entries
}

fn file_entry(file: &RemoteFileRecord, name: &str) -> ListEntry {
    ListEntry {
        name: name.to_string(),
        siapath: file.siapath.clone(),
        size: readable_filesize(file.filesize),
        available: file.available,
        redundancy: file.redundancy,
        uploadprogress: floor_progress(file.uploadprogress),
        entry_type: EntryType::File,
    }
}

fn directory_entry(
    files: &[RemoteFileRecord],
    first: &RemoteFileRecord,
    path: &str,
    name: &str,
    mode: PathMatch,
) -> ListEntry {
    let siapath = child_dir_siapath(path, name);
    let descendants: Vec<&RemoteFileRecord> = files
        .iter()
        .filter(|f| is_under_dir_siapath(&f.siapath, &siapath, mode))
        .collect();

    let total_size = total_filesize(descendants.iter().copied());
    // `first` is always one of the descendants, so the set is never empty
    let redundancy = min_redundancy(descendants.iter().copied()).unwrap_or(first.redundancy);

    ListEntry {
        name: name.to_string(),
        siapath,
        size: readable_filesize(total_size),
        available: first.available,
        redundancy,
        uploadprogress: floor_progress(first.uploadprogress),
        entry_type: EntryType::Directory,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(siapath: &str, filesize: u64, redundancy: f64) -> RemoteFileRecord {
        RemoteFileRecord {
            siapath: siapath.to_string(),
            filesize,
            redundancy,
            uploadprogress: 100.0,
            available: true,
        }
    }

    #[test]
    fn test_empty_listing() {
        assert!(ls(&[], "").is_empty());
    }

    #[test]
    fn test_root_listing_sorted() {
        let files = vec![
            file("zeta.txt", 1, 1.0),
            file("alpha.txt", 1, 1.0),
            file("music/a.mp3", 1, 1.0),
        ];
        let names: Vec<_> = ls(&files, "").into_iter().map(|e| e.name).collect();
        assert_eq!(names, vec!["alpha.txt", "music", "zeta.txt"]);
    }

    #[test]
    fn test_directory_aggregates_descendants() {
        let files = vec![
            file("music/rock/a.mp3", 400, 2.5),
            file("music/jazz/b.mp3", 300, 0.8),
            file("music/c.mp3", 300, 3.0),
            file("video/d.mp4", 5000, 0.1),
        ];
        let entries = ls(&files, "");
        let music = entries.iter().find(|e| e.name == "music").unwrap();
        assert_eq!(music.size, "1 KB");
        assert_eq!(music.redundancy, 0.8);
        assert_eq!(music.siapath, "music/");
        assert!(music.is_directory());
    }

    #[test]
    fn test_nested_listing() {
        let files = vec![
            file("music/rock/a.mp3", 400, 2.5),
            file("music/rock/live/b.mp3", 300, 1.0),
            file("music/c.mp3", 300, 3.0),
        ];
        let entries = ls(&files, "music/");
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].name, "c.mp3");
        assert_eq!(entries[0].entry_type, EntryType::File);
        assert_eq!(entries[1].name, "rock");
        assert_eq!(entries[1].siapath, "music/rock/");
        assert_eq!(entries[1].size, "700 B");
        assert_eq!(entries[1].redundancy, 1.0);
    }

    #[test]
    fn test_segment_mode_ignores_similar_siblings() {
        let files = vec![file("music/a.mp3", 1, 1.0), file("oldmusic/b.mp3", 1, 1.0)];
        let entries = ls(&files, "music");
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].name, "a.mp3");
    }

    #[test]
    fn test_substring_mode_over_matches() {
        let files = vec![file("music/a.mp3", 1, 1.0), file("oldmusic/b.mp3", 1, 1.0)];
        let names: Vec<_> = ls_with(&files, "music", PathMatch::Substring)
            .into_iter()
            .map(|e| e.name)
            .collect();
        assert_eq!(names, vec!["a.mp3", "b.mp3"]);
    }

    #[test]
    fn test_file_and_directory_name_collision_first_wins() {
        // "report" as a file and as a directory both map to the name "report"
        let files = vec![file("report", 10, 1.0), file("report/q1.pdf", 999, 0.2)];
        let entries = ls(&files, "");
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].entry_type, EntryType::File);
        assert_eq!(entries[0].size, "10 B");

        let reversed = vec![file("report/q1.pdf", 999, 0.2), file("report", 10, 1.0)];
        let entries = ls(&reversed, "");
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].entry_type, EntryType::Directory);
    }

    #[test]
    fn test_upload_progress_clamped() {
        let mut over = file("a.txt", 1, 1.0);
        over.uploadprogress = 100.4;
        let mut partial = file("b.txt", 1, 1.0);
        partial.uploadprogress = 42.9;
        let entries = ls(&[over, partial], "");
        assert_eq!(entries[0].uploadprogress, 100);
        assert_eq!(entries[1].uploadprogress, 42);
    }

    #[test]
    fn test_directory_size_saturates() {
        let half = u64::MAX / 2 + 1;
        let files = vec![file("d/a", half, 1.0), file("d/b", half, 1.0)];
        let entries = ls(&files, "");
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].size, "18446 PB");
    }

    #[test]
    fn test_same_file_name_from_two_sources_first_wins() {
        let files = vec![file("music/a.mp3", 1, 1.0), file("oldmusic/a.mp3", 5000, 2.0)];
        let entries = ls_with(&files, "music", PathMatch::Substring);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].siapath, "music/a.mp3");
        assert_eq!(entries[0].size, "1 B");

        let reversed = vec![file("oldmusic/a.mp3", 5000, 2.0), file("music/a.mp3", 1, 1.0)];
        let entries = ls_with(&reversed, "music", PathMatch::Substring);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].siapath, "oldmusic/a.mp3");
        assert_eq!(entries[0].size, "5 KB");
    }
}
