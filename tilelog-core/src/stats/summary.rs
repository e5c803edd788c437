use crate::request::{CacheOutcome, ResourceKind};
use crate::stats::{StatsAggregator, TileCount};
use serde::Serialize;

/// Presentation-ready roll-up of a request batch.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatsSummary {
    pub total_requests: usize,
    pub tiles: usize,
    pub grids: usize,
    pub distinct_maps: usize,
    pub distinct_source_ips: usize,
    pub by_zoom: Vec<ZoomCount>,
    pub top_source_ips: Vec<SourceCount>,
    pub top_tiles: Vec<TileCount>,
    /// Requests whose edge-most cache layer hit / missed / anything else.
    pub edge_cache: CacheBreakdown,
    pub status: StatusBreakdown,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ZoomCount {
    pub zoom: u8,
    pub count: usize,
    pub share: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceCount {
    pub source_ip: String,
    pub count: usize,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CacheBreakdown {
    pub hit: usize,
    pub miss: usize,
    pub other: usize,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatusBreakdown {
    pub ok: usize,
    pub client_error: usize,
    pub server_error: usize,
    pub unknown: usize,
}

impl StatsAggregator<'_> {
    /// Builds the summary, listing at most `top_n` source addresses and tiles.
    pub fn summary(&self, top_n: usize) -> StatsSummary {
        let requests = self.requests();
        let counts = self.counts_by_zoom();
        let total = self.total();

        let by_zoom = counts
            .into_iter()
            .map(|(zoom, count)| ZoomCount {
                zoom,
                count,
                share: count as f64 / total as f64,
            })
            .collect();

        let ips = self.counts_by_source_ip();
        let distinct_source_ips = ips.len();
        let top_source_ips = ips
            .into_iter()
            .take(top_n)
            .map(|(ip, count)| SourceCount {
                source_ip: ip.to_string(),
                count,
            })
            .collect();

        let mut edge_cache = CacheBreakdown::default();
        let mut status = StatusBreakdown::default();
        let mut grids = 0;

        for request in requests {
            if request.resource_kind() == ResourceKind::GridJson {
                grids += 1;
            }

            match request.cache_outcome().first() {
                Some(CacheOutcome::Hit) => edge_cache.hit += 1,
                Some(CacheOutcome::Miss) => edge_cache.miss += 1,
                _ => edge_cache.other += 1,
            }

            match request.http_status() {
                Some(200..=299) => status.ok += 1,
                Some(400..=499) => status.client_error += 1,
                Some(500..=599) => status.server_error += 1,
                _ => status.unknown += 1,
            }
        }

        let mut maps: Vec<&str> = requests.iter().map(|r| r.map_layer_group_id()).collect();
        maps.sort_unstable();
        maps.dedup();

        StatsSummary {
            total_requests: total,
            tiles: total - grids,
            grids,
            distinct_maps: maps.len(),
            distinct_source_ips,
            by_zoom,
            top_source_ips,
            top_tiles: self.top_tiles(top_n, None),
            edge_cache,
            status,
        }
    }
}
