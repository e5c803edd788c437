use crate::report::{render_activity, render_summary};
use tilelog_core::parse::BatchParser;
use tilelog_core::stats::StatsAggregator;

fn line(second: u32, zoom: u8, row: u32, column: u32) -> String {
    format!(
        "<134>2015-03-04T10:12:{second:02}Z cache-mad2120 fastly[308373]: 10.0.0.1 \"-\" \"-\" Wed, 04 Mar 2015 10:12:55 GMT \"GET /documentation/api/v1/map/abc:1/{zoom}/{row}/{column}.png HTTP/1.1\" MISS 200"
    )
}

#[test]
fn summary_lists_zooms_and_tiles() {
    // Arrange
    let lines = vec![line(1, 0, 0, 0), line(2, 1, 1, 0), "garbage".to_string()];
    let report = BatchParser::default().parse_lines(&lines);
    let summary = StatsAggregator::new(&report.store).summary(5);

    // Act
    let out = render_summary(&summary, &report);

    // Assert
    assert!(out.contains("parsed: 2"));
    assert!(out.contains("skipped: 0"));
    assert!(out.contains("Top tiles:"));
    assert!(out.contains("1/1/0"));
    assert!(out.contains("50.0%"));
}

#[test]
fn summary_includes_counts_cache_and_status_lines() {
    let lines = vec![line(1, 0, 0, 0), line(2, 1, 1, 0), "garbage".to_string()];
    let report = BatchParser::default().parse_lines(&lines);
    let summary = StatsAggregator::new(&report.store).summary(5);

    let out = render_summary(&summary, &report);

    assert!(out.contains("lines: 3 | parsed: 2 | skipped: 0 | failed: "));
    assert!(out.contains("tiles: 2 | grids: 0 | maps: 1 | clients: 1\n"));
    assert!(out.contains("Edge cache: hit="));
    assert!(out.contains("Status: 2xx=2 4xx="));
    assert!(out.ends_with('\n'));
}

#[test]
fn empty_summary_says_so() {
    let report = BatchParser::default().parse_lines(Vec::<String>::new());
    let summary = StatsAggregator::new(&report.store).summary(5);

    let out = render_summary(&summary, &report);

    assert!(out.contains("<no requests>"));
    assert!(!out.contains("Top tiles:"));
}

#[test]
fn activity_shows_moves() {
    let lines = vec![line(1, 0, 0, 0), line(2, 1, 0, 0), line(3, 1, 0, 1)];
    let report = BatchParser::default().parse_lines(&lines);
    let steps = StatsAggregator::new(&report.store).activity("10.0.0.1");

    let out = render_activity("10.0.0.1", &steps);

    assert!(out.contains("3 requests"));
    assert!(out.contains("zoom-in"));
    assert!(out.contains("pan-right"));
}

#[test]
fn activity_for_unknown_client() {
    let out = render_activity("10.9.9.9", &[]);

    assert_eq!(out, "no requests from 10.9.9.9\n");
}
