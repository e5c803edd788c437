use crate::render::{RenderError, render_ascii};
use crate::store::RequestStore;
use crate::test_support::LogLine;
use pretty_assertions::assert_eq;

#[test]
fn draws_requested_cells() {
    // Arrange
    let store: RequestStore = [
        LogLine::tile("abc", 1, 0, 1),
        LogLine::tile("abc", 2, 3, 0),
        LogLine::tile("abc", 0, 0, 0),
    ]
    .iter()
    .map(LogLine::request)
    .collect();

    // Act
    let map = render_ascii(&store, 1, None).unwrap();

    // Assert
    assert_eq!(map, ". #\n# .");
}

#[test]
fn refuses_wide_grids() {
    let store = RequestStore::new();

    let outcome = render_ascii(&store, 9, None);

    assert!(matches!(
        outcome,
        Err(RenderError::InvalidRenderParameters(_))
    ));
}
