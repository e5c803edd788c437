use crate::conf::ConfigError;
use crate::render::Shading;
use serde::{Deserialize, Serialize};

/// Lines containing any of these are not tile traffic (bbox/center previews,
/// favicons, and 404s for tiles that never existed).
pub const DEFAULT_IGNORE_PATTERNS: &[&str] =
    &["/static/bbox/", "/static/center", "/favicon.ico", "MISS 404"];

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct TilelogConfig {
    pub parser: ParserConfig,
    pub render: RenderConfig,
    pub stats: StatsConfig,
}

impl TilelogConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.parser.workers == 0 {
            return Err(ConfigError::invalid(
                "parser.workers",
                "at least one worker is required",
            ));
        }

        if self.parser.ignore.iter().any(String::is_empty) {
            return Err(ConfigError::invalid(
                "parser.ignore",
                "an empty pattern would ignore every line",
            ));
        }

        if self.stats.top_tiles == 0 {
            return Err(ConfigError::invalid("stats.top_tiles", "must be greater than zero"));
        }

        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct ParserConfig {
    /// Substrings that mark a line as skippable.
    pub ignore: Vec<String>,

    /// Worker threads for batch parsing. `1` parses on the calling thread.
    pub workers: usize,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            ignore: DEFAULT_IGNORE_PATTERNS
                .iter()
                .map(|p| p.to_string())
                .collect(),
            workers: 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderConfig {
    /// RGBA fill for requested cells.
    pub fill: [u8; 4],

    /// RGBA outline for highlighted cells.
    pub outline: [u8; 4],

    pub shading: Shading,

    /// Alpha added per zoom layer in multi-zoom renders.
    pub opacity_step: u8,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            fill: [255, 0, 0, 22],
            outline: [255, 0, 0, 255],
            shading: Shading::Presence,
            opacity_step: 22,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct StatsConfig {
    /// Length of most-requested-tile listings.
    pub top_tiles: usize,
}

impl Default for StatsConfig {
    fn default() -> Self {
        Self { top_tiles: 10 }
    }
}
