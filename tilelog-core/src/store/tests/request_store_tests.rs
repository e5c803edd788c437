use crate::request::ResourceKind;
use crate::store::RequestStore;
use crate::test_support::LogLine;
use pretty_assertions::assert_eq;

fn store() -> RequestStore {
    [
        LogLine::tile("abc", 2, 0, 1).from_ip("1.1.1.1"),
        LogLine::tile("def", 2, 3, 3).from_ip("2.2.2.2"),
        LogLine::tile("abc", 4, 5, 6).from_ip("1.1.1.1").grid("0"),
        LogLine::tile("abc", 2, 0, 1).from_ip("3.3.3.3"),
    ]
    .iter()
    .map(LogLine::request)
    .collect()
}

#[test]
fn add_appends_in_arrival_order() {
    // Arrange
    let mut store = RequestStore::new();

    // Act
    store.add(LogLine::tile("abc", 1, 1, 1).request());
    store.add(LogLine::tile("abc", 0, 0, 0).request());

    // Assert
    let zooms: Vec<u8> = store.iter().map(|r| r.zoom()).collect();
    assert_eq!(zooms, vec![1, 0]);
    assert_eq!(store.len(), 2);
}

#[test]
fn filter_by_map_preserves_order() {
    let store = store();

    let rows: Vec<u32> = store.filter_by_map("abc").iter().map(|r| r.row()).collect();

    assert_eq!(rows, vec![0, 5, 0]);
}

#[test]
fn filter_by_unknown_map_is_empty() {
    assert!(store().filter_by_map("zzz").is_empty());
}

#[test]
fn filter_by_zoom_selects_exact_level() {
    let store = store();

    let maps: Vec<&str> = store
        .filter_by_zoom(2)
        .iter()
        .map(|r| r.map_layer_group_id())
        .collect();

    assert_eq!(maps, vec!["abc", "def", "abc"]);
}

#[test]
fn filter_by_kind_separates_grids() {
    let store = store();

    assert_eq!(store.filter_by_kind(ResourceKind::GridJson).len(), 1);
    assert_eq!(store.filter_by_kind(ResourceKind::Tile).len(), 3);
}

#[test]
fn filter_by_source_ip() {
    assert_eq!(store().filter_by_source_ip("1.1.1.1").len(), 2);
}

#[test]
fn group_by_source_ip_counts_each_address() {
    // Arrange
    let store = store();

    // Act
    let groups = store.group_by_source_ip();

    // Assert
    assert_eq!(groups.len(), 3);
    assert_eq!(groups["1.1.1.1"], 2);
    assert_eq!(groups["2.2.2.2"], 1);
    assert_eq!(groups["3.3.3.3"], 1);
}

#[test]
fn distinct_values_keep_first_seen_order() {
    let store = store();

    assert_eq!(store.distinct_maps(), vec!["abc", "def"]);
    assert_eq!(
        store.distinct_source_ips(),
        vec!["1.1.1.1", "2.2.2.2", "3.3.3.3"]
    );
}
