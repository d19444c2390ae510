//! Transfer queue logic
//!
//! Pure functions turning download jobs and file records into the rows of
//! the transfer queue. The queue is rebuilt from scratch on every poll.

use crate::api::{DownloadRecord, RemoteFileRecord, TransferEntry, TransferStatus, TransferType};

use super::formatting::floor_progress;
use super::path::basename;

/// Uploads at or above this redundancy are considered done
pub const UPLOAD_REDUNDANCY_DONE: f64 = 2.5;

/// Below this redundancy the file is not yet recoverable from the network
pub const UPLOAD_REDUNDANCY_RECOVERABLE: f64 = 1.0;

/// Download queue, most recently started first
///
/// A zero-byte download counts as completed.
pub fn parse_downloads(downloads: &[DownloadRecord]) -> Vec<TransferEntry> {
    let mut entries: Vec<TransferEntry> = downloads
        .iter()
        .map(|download| {
            let (status, progress) = if download.received >= download.filesize {
                (TransferStatus::Completed, 100)
            } else {
                let ratio = download.received as f64 / download.filesize as f64;
                (TransferStatus::Downloading, floor_progress(ratio * 100.0))
            };

            TransferEntry {
                siapath: download.siapath.clone(),
                name: basename(&download.siapath).to_string(),
                progress,
                status,
                transfer_type: TransferType::Download,
                starttime: Some(download.starttime),
                destination: Some(download.destination.clone()),
            }
        })
        .collect();

    entries.sort_by(|a, b| b.starttime.cmp(&a.starttime));
    entries
}

/// Upload queue, furthest along first
///
/// Files that are fully uploaded or already redundant enough are hidden.
/// Rows with equal progress are ordered by name.
pub fn parse_uploads(files: &[RemoteFileRecord]) -> Vec<TransferEntry> {
    let mut entries: Vec<TransferEntry> = files
        .iter()
        .filter(|file| file.redundancy < UPLOAD_REDUNDANCY_DONE)
        .filter(|file| file.uploadprogress < 100.0)
        .map(|file| TransferEntry {
            siapath: file.siapath.clone(),
            name: basename(&file.siapath).to_string(),
            progress: floor_progress(file.uploadprogress),
            status: if file.redundancy < UPLOAD_REDUNDANCY_RECOVERABLE {
                TransferStatus::Uploading
            } else {
                TransferStatus::BoostingRedundancy
            },
            transfer_type: TransferType::Upload,
            starttime: None,
            destination: None,
        })
        .collect();

    // Both sorts are stable, so name order survives as the tie-break
    entries.sort_by(|a, b| a.name.cmp(&b.name));
    entries.sort_by(|a, b| b.progress.cmp(&a.progress));
    entries
}
