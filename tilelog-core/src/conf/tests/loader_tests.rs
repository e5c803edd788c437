use crate::conf::{ConfigError, DEFAULT_IGNORE_PATTERNS, TilelogConfig, load_config, parse_config};
use crate::render::{OverlayStyle, Shading};
use image::Rgba;
use pretty_assertions::assert_eq;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

#[test]
fn load_full_config_file() {
    // Arrange
    let dir = tempdir().unwrap();
    let path = dir.path().join("tilelog.hcl");

    fs::write(
        &path,
        r#"
parser {
  ignore  = ["/favicon.ico", "/static/"]
  workers = 4
}

render {
  fill         = [0, 128, 255, 40]
  outline      = [0, 0, 0, 255]
  shading      = "by_count"
  opacity_step = 10
}

stats {
  top_tiles = 25
}
"#,
    )
    .unwrap();

    // Act
    let cfg = load_config(&path).unwrap();

    // Assert
    assert_eq!(cfg.parser.ignore, vec!["/favicon.ico", "/static/"]);
    assert_eq!(cfg.parser.workers, 4);
    assert_eq!(cfg.render.fill, [0, 128, 255, 40]);
    assert_eq!(cfg.render.shading, Shading::ByCount);
    assert_eq!(cfg.render.opacity_step, 10);
    assert_eq!(cfg.stats.top_tiles, 25);
}

#[test]
fn empty_config_uses_defaults() {
    let cfg = parse_config("", Path::new("tilelog.hcl")).unwrap();

    assert_eq!(cfg, TilelogConfig::default());
    assert_eq!(cfg.parser.ignore, DEFAULT_IGNORE_PATTERNS.to_vec());
    assert_eq!(cfg.parser.workers, 1);
    assert_eq!(cfg.stats.top_tiles, 10);
}

#[test]
fn partial_block_keeps_other_defaults() {
    let cfg = parse_config("render {\n  shading = \"by_count\"\n}\n", Path::new("x.hcl")).unwrap();

    assert_eq!(cfg.render.shading, Shading::ByCount);
    assert_eq!(cfg.render.fill, [255, 0, 0, 22]);
}

#[test]
fn render_config_becomes_overlay_style() {
    let cfg = TilelogConfig::default();

    let style = OverlayStyle::from(&cfg.render);

    assert_eq!(style.fill, Rgba([255, 0, 0, 22]));
    assert_eq!(style.outline, Rgba([255, 0, 0, 255]));
}

#[test]
fn zero_workers_is_invalid() {
    let err = parse_config("parser {\n  workers = 0\n}\n", Path::new("x.hcl")).unwrap_err();

    assert!(matches!(
        err,
        ConfigError::Invalid {
            field: "parser.workers",
            ..
        }
    ));
}

#[test]
fn empty_ignore_pattern_is_invalid() {
    let err = parse_config("parser {\n  ignore = [\"\"]\n}\n", Path::new("x.hcl")).unwrap_err();

    assert!(matches!(
        err,
        ConfigError::Invalid {
            field: "parser.ignore",
            ..
        }
    ));
}

#[test]
fn zero_top_tiles_is_invalid() {
    let err = parse_config("stats {\n  top_tiles = 0\n}\n", Path::new("x.hcl")).unwrap_err();

    assert!(matches!(
        err,
        ConfigError::Invalid {
            field: "stats.top_tiles",
            ..
        }
    ));
}

#[test]
fn unknown_field_is_a_parse_error() {
    let err = parse_config("stats {\n  top = 3\n}\n", Path::new("x.hcl")).unwrap_err();

    assert!(matches!(err, ConfigError::Parse { .. }));
}

#[test]
fn missing_file_is_a_read_error() {
    let dir = tempdir().unwrap();

    let err = load_config(&dir.path().join("missing.hcl")).unwrap_err();

    assert!(matches!(err, ConfigError::ReadFile { .. }));
}
