use anyhow::{Context, Result};
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;
use tilelog_core::conf::{TilelogConfig, load_config};

const DEFAULT_CONFIG: &str = "tilelog.hcl";

/// Reads log lines from `path`, or stdin when absent.
pub fn read_lines(path: Option<&Path>) -> Result<Vec<String>> {
    match path {
        Some(path) => {
            let file =
                File::open(path).with_context(|| format!("opening log file {}", path.display()))?;
            collect_lines(BufReader::new(file))
                .with_context(|| format!("reading log file {}", path.display()))
        }
        None => collect_lines(io::stdin().lock()).context("reading logs from stdin"),
    }
}

fn collect_lines(reader: impl BufRead) -> io::Result<Vec<String>> {
    // CDN logs are not guaranteed UTF-8; keep going past bad bytes.
    reader
        .split(b'\n')
        .map(|line| line.map(|bytes| String::from_utf8_lossy(&bytes).into_owned()))
        .collect()
}

/// An explicit `--config` must load. Without one, `./tilelog.hcl` is used if
/// present and defaults otherwise.
pub fn resolve_config(path: Option<&Path>) -> Result<TilelogConfig> {
    let path = match path {
        Some(path) => path,
        None if Path::new(DEFAULT_CONFIG).is_file() => Path::new(DEFAULT_CONFIG),
        None => {
            tracing::debug!("no config file, using defaults");
            return Ok(TilelogConfig::default());
        }
    };

    load_config(path).with_context(|| format!("loading config {}", path.display()))
}
