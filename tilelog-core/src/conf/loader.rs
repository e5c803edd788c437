use crate::conf::{ConfigError, TilelogConfig};
use std::fs;
use std::path::Path;

/// Reads, parses and validates a `tilelog.hcl` file.
pub fn load_config(path: &Path) -> Result<TilelogConfig, ConfigError> {
    let src = fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;
    parse_config(&src, path)
}

/// Parses HCL source. `origin` is only used in error messages.
pub fn parse_config(src: &str, origin: &Path) -> Result<TilelogConfig, ConfigError> {
    let cfg: TilelogConfig = hcl::from_str(src).map_err(|e| ConfigError::parse(origin, e))?;
    cfg.validate()?;

    tracing::debug!(
        path = %origin.display(),
        ignore_patterns = cfg.parser.ignore.len(),
        workers = cfg.parser.workers,
        "loaded tilelog config"
    );

    Ok(cfg)
}
