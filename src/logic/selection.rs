//! Range selection logic
//!
//! Shift-click style selection over the files currently on screen. Each call
//! replaces the selection rather than adding to it.

use crate::api::RemoteFileRecord;

use super::errors::{EngineError, Result};

/// Files picked by a range selection, kept in view order
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Selection {
    files: Vec<RemoteFileRecord>,
}

impl Selection {
    pub fn contains(&self, siapath: &str) -> bool {
        self.files.iter().any(|f| f.siapath == siapath)
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn first(&self) -> Option<&RemoteFileRecord> {
        self.files.first()
    }

    pub fn last(&self) -> Option<&RemoteFileRecord> {
        self.files.last()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, RemoteFileRecord> {
        self.files.iter()
    }

    pub fn siapaths(&self) -> Vec<&str> {
        self.files.iter().map(|f| f.siapath.as_str()).collect()
    }

    pub fn as_slice(&self) -> &[RemoteFileRecord] {
        &self.files
    }
}

impl IntoIterator for Selection {
    type Item = RemoteFileRecord;
    type IntoIter = std::vec::IntoIter<RemoteFileRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.files.into_iter()
    }
}

fn index_in_view(view: &[RemoteFileRecord], siapath: &str) -> Result<usize> {
    view.iter()
        .position(|f| f.siapath == siapath)
        .ok_or_else(|| EngineError::NotFound(siapath.to_string()))
}

/// Select every file in `view` between the previous selection and `target`
///
/// The window runs from the first previously selected file to `target`. When
/// `target` sits before that anchor, the window instead runs from `target` to
/// the *last* previously selected file. A window whose low end ends up past
/// its high end selects nothing.
///
/// Fails with [`EngineError::NotFound`] when `target` or the anchor used is
/// not in `view`, and with [`EngineError::EmptyInput`] when there is no
/// previous selection to anchor on.
///
/// # Examples
/// ```
/// use siaview::api::RemoteFileRecord;
/// use siaview::logic::selection::select_range;
///
/// let file = |siapath: &str| RemoteFileRecord {
///     siapath: siapath.to_string(),
///     filesize: 0,
///     redundancy: 0.0,
///     uploadprogress: 0.0,
///     available: true,
/// };
/// let view: Vec<_> = ["A", "B", "C", "D", "E"].into_iter().map(file).collect();
///
/// let selection = select_range(&view[3], &view, &[view[1].clone()]).unwrap();
/// assert_eq!(selection.siapaths(), vec!["B", "C", "D"]);
///
/// let previous = vec![view[1].clone(), view[3].clone()];
/// let selection = select_range(&view[0], &view, &previous).unwrap();
/// assert_eq!(selection.siapaths(), vec!["A", "B", "C", "D"]);
/// ```
pub fn select_range(
    target: &RemoteFileRecord,
    view: &[RemoteFileRecord],
    previous: &[RemoteFileRecord],
) -> Result<Selection> {
    let anchor = previous
        .first()
        .ok_or_else(|| EngineError::EmptyInput("no previous selection to extend".into()))?;

    let mut end = index_in_view(view, &target.siapath)?;
    let mut start = index_in_view(view, &anchor.siapath)?;

    if start > end {
        // `previous` is non-empty, so `last` exists
        let last = previous.last().unwrap_or(anchor);
        start = end;
        end = index_in_view(view, &last.siapath)?;
    }

    if start > end {
        return Ok(Selection::default());
    }

    Ok(Selection {
        files: view[start..=end].to_vec(),
    })
}
