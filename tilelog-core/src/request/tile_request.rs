use crate::request::{CacheChain, CacheOutcome, TileCoord};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// What was fetched for a tile address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    /// Raster image, `.png`.
    Tile,
    /// UTFGrid interactivity sidecar, `.grid.json`.
    GridJson,
}

/// One tile request recovered from a CDN log line.
///
/// Only the parser constructs these; everything downstream reads them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileRequest {
    timestamp: DateTime<Utc>,
    source_ip: String,
    user: String,
    map_layer_group_id: String,
    coord: TileCoord,
    resource_kind: ResourceKind,
    cache_outcome: CacheChain,
    http_status: Option<u16>,
}

impl TileRequest {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        timestamp: DateTime<Utc>,
        source_ip: String,
        user: String,
        map_layer_group_id: String,
        coord: TileCoord,
        resource_kind: ResourceKind,
        cache_outcome: CacheChain,
        http_status: Option<u16>,
    ) -> Self {
        Self {
            timestamp,
            source_ip,
            user,
            map_layer_group_id,
            coord,
            resource_kind,
            cache_outcome,
            http_status,
        }
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn source_ip(&self) -> &str {
        &self.source_ip
    }

    /// Account segment of the `/<user>/api/v1/map/` prefix.
    pub fn user(&self) -> &str {
        &self.user
    }

    pub fn map_layer_group_id(&self) -> &str {
        &self.map_layer_group_id
    }

    pub fn coord(&self) -> TileCoord {
        self.coord
    }

    pub fn zoom(&self) -> u8 {
        self.coord.zoom
    }

    pub fn row(&self) -> u32 {
        self.coord.row
    }

    pub fn column(&self) -> u32 {
        self.coord.column
    }

    pub fn resource_kind(&self) -> ResourceKind {
        self.resource_kind
    }

    pub fn cache_outcome(&self) -> &[CacheOutcome] {
        &self.cache_outcome
    }

    /// `None` when the status field was absent or not numeric.
    pub fn http_status(&self) -> Option<u16> {
        self.http_status
    }

    pub fn unknown_cache_outcomes(&self) -> impl Iterator<Item = &str> {
        self.cache_outcome.iter().filter_map(|outcome| match outcome {
            CacheOutcome::Other(raw) => Some(raw.as_str()),
            _ => None,
        })
    }
}
