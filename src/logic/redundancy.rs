//! Redundancy aggregation over file sets

use crate::api::RemoteFileRecord;

use super::errors::{EngineError, Result};

/// Lowest redundancy found in `files`
///
/// Fails with [`EngineError::EmptyInput`] when there is nothing to compare.
pub fn min_redundancy<'a, I>(files: I) -> Result<f64>
where
    I: IntoIterator<Item = &'a RemoteFileRecord>,
{
    files
        .into_iter()
        .map(|file| file.redundancy)
        .reduce(f64::min)
        .ok_or_else(|| EngineError::EmptyInput("no files to take a minimum redundancy over".into()))
}
