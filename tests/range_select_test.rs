//! Tests for shift-click range selection over a listing
//!
//! View: [A, B, C, D, E]
//! Forward drag from B to D selects B..D. A reversed drag re-derives the far
//! end of the window from the last previously selected file, so with
//! {B, D} selected, clicking A selects A..D rather than A..B.

use siaview::api::RemoteFileRecord;
use siaview::logic::errors::ErrorKind;
use siaview::logic::search::search_files;
use siaview::logic::selection::select_range;

fn file(siapath: &str) -> RemoteFileRecord {
    RemoteFileRecord {
        siapath: siapath.to_string(),
        filesize: 1,
        redundancy: 1.0,
        uploadprogress: 100.0,
        available: true,
    }
}

fn view() -> Vec<RemoteFileRecord> {
    ["A", "B", "C", "D", "E"].into_iter().map(file).collect()
}

/// Test: Forward range from the anchor to the target
#[test]
fn test_forward_range() {
    let view = view();
    let selection = select_range(&view[3], &view, &[view[1].clone()]).unwrap();
    assert_eq!(selection.siapaths(), vec!["B", "C", "D"]);
}

/// Test: Reversed range extends to the last previously selected file
#[test]
fn test_reversed_range() {
    let view = view();
    let previous = vec![view[1].clone(), view[3].clone()];
    let selection = select_range(&view[0], &view, &previous).unwrap();
    assert_eq!(selection.siapaths(), vec!["A", "B", "C", "D"]);
}

/// Test: Selection is a contiguous run of the view
#[test]
fn test_contiguous() {
    let view = view();
    let selection = select_range(&view[4], &view, &[view[1].clone()]).unwrap();
    let first = view.iter().position(|f| f.siapath == "B").unwrap();
    assert_eq!(selection.as_slice(), &view[first..first + selection.len()]);
}

/// Test: Range selection over filtered search results uses the filtered order
#[test]
fn test_range_over_search_results() {
    let files = vec![
        file("docs/a-report.pdf"),
        file("docs/b-notes.txt"),
        file("docs/c-report.pdf"),
        file("docs/d-report.pdf"),
    ];
    let results = search_files(&files, "report", "docs");
    let selection = select_range(&results[2], &results, &[results[0].clone()]).unwrap();
    assert_eq!(
        selection.siapaths(),
        vec!["docs/a-report.pdf", "docs/c-report.pdf", "docs/d-report.pdf"]
    );
}

/// Test: A target missing from the view is reported, not guessed
#[test]
fn test_missing_target() {
    let view = view();
    let err = select_range(&file("Q"), &view, &[view[0].clone()]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
    assert_eq!(err.to_string(), "Q is not in the current view");
}
