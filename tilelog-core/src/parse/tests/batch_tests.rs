use crate::conf::ParserConfig;
use crate::parse::{BatchParser, LineError, LineOutcome};
use crate::test_support::{LogLine, README_SAMPLE};
use pretty_assertions::assert_eq;
use std::num::NonZeroUsize;

fn mixed_batch() -> Vec<String> {
    let mut stale = LogLine::tile("abc", 2, 1, 1);
    stale.tail = "STALE 200".to_string();

    vec![
        LogLine::tile("abc", 1, 0, 1).render(),
        "garbage".to_string(),
        LogLine::tile("abc", 1, 2, 0).render(),
        String::new(),
        LogLine::tile("def", 3, 7, 7).render(),
        stale.render(),
        LogLine::default()
            .render()
            .replacen("/5/10/21.png", "/favicon.ico", 1),
    ]
}

#[test]
fn batch_continues_past_failures() {
    // Arrange
    let parser = BatchParser::default();

    // Act
    let report = parser.parse_lines(mixed_batch());

    // Assert
    assert_eq!(report.lines_read, 7);
    assert_eq!(report.parsed(), 3);
    assert_eq!(report.skipped, 2);

    let failed_lines: Vec<usize> = report.failures.iter().map(|f| f.line_number).collect();
    assert_eq!(failed_lines, vec![2, 3]);
    assert!(matches!(
        report.failures[0].error,
        LineError::MalformedEnvelope { .. }
    ));
    assert!(matches!(
        report.failures[1].error,
        LineError::MalformedCoordinates { .. }
    ));
}

#[test]
fn unknown_cache_outcome_is_a_warning() {
    let report = BatchParser::default().parse_lines(mixed_batch());

    assert_eq!(report.warnings.len(), 1);
    assert_eq!(report.warnings[0].line_number, 6);
    assert_eq!(
        report.warnings[0].error,
        LineError::UnknownCacheOutcome {
            token: "STALE".to_string()
        }
    );
    assert!(!report.warnings[0].error.is_fatal());
}

#[test]
fn truncated_line_does_not_stop_following_lines() {
    // Arrange
    let mut lines: Vec<&str> = README_SAMPLE.lines().collect();
    let first = lines[0];
    let truncated = &first[..first.find(".png").unwrap()];
    lines.insert(1, truncated);

    // Act
    let report = BatchParser::default().parse_lines(lines);

    // Assert
    assert_eq!(report.parsed(), 3);
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].line_number, 2);
}

#[test]
fn ignore_patterns_come_from_config() {
    // Arrange
    let cfg = ParserConfig {
        ignore: vec!["/def/".to_string()],
        workers: 1,
    };
    let parser = BatchParser::from_config(&cfg);

    // Act
    let outcome = parser.classify(&LogLine::tile("def", 0, 0, 0).render());

    // Assert
    assert_eq!(outcome, LineOutcome::Skipped);
}

#[test]
fn miss_404_lines_are_skipped_by_default() {
    let mut line = LogLine::default();
    line.tail = "MISS 404".to_string();

    let outcome = BatchParser::default().classify(&line.render());

    assert_eq!(outcome, LineOutcome::Skipped);
}

#[test]
fn failure_rate_ignores_skipped_lines() {
    let report = BatchParser::default().parse_lines(mixed_batch());

    assert!((report.failure_rate() - 0.4).abs() < f64::EPSILON);
}

#[test]
fn parallel_parse_matches_sequential_order() {
    // Arrange
    let mut lines = Vec::new();
    for i in 0..97u32 {
        let ip = format!("10.0.0.{}", i % 7);
        lines.push(LogLine::tile("abc", 7, i, 127 - i).from_ip(&ip).render());
        if i % 11 == 0 {
            lines.push("not a log line".to_string());
        }
    }
    let parser = BatchParser::default();

    // Act
    let sequential = parser.parse_lines(&lines);
    let parallel = parser.parse_parallel(&lines, NonZeroUsize::new(4).unwrap());

    // Assert
    assert_eq!(parallel.store.as_slice(), sequential.store.as_slice());
    assert_eq!(parallel.failures, sequential.failures);
    assert_eq!(parallel.lines_read, lines.len());
}

#[test]
fn parallel_parse_with_more_workers_than_lines() {
    let lines: Vec<String> = README_SAMPLE.lines().map(str::to_string).collect();

    let report = BatchParser::default().parse_parallel(&lines, NonZeroUsize::new(16).unwrap());

    let zooms: Vec<u8> = report.store.iter().map(|r| r.zoom()).collect();
    assert_eq!(zooms, vec![5, 11, 0]);
}
