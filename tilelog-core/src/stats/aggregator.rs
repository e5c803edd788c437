use crate::request::{ResourceKind, TileCoord, TileRequest};
use crate::stats::ranking::rank_by_count;
use crate::store::RequestStore;
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TileCount {
    pub coord: TileCoord,
    pub count: usize,
}

/// Aggregations over an immutable snapshot of requests.
///
/// `Tile` and `GridJson` requests count the same for coordinate statistics:
/// what is measured is the map cell, not the format it was fetched in.
#[derive(Debug, Clone, Copy)]
pub struct StatsAggregator<'a> {
    requests: &'a [TileRequest],
}

impl<'a> StatsAggregator<'a> {
    pub fn new(store: &'a RequestStore) -> Self {
        Self::from_slice(store.as_slice())
    }

    pub fn from_slice(requests: &'a [TileRequest]) -> Self {
        Self { requests }
    }

    pub fn total(&self) -> usize {
        self.requests.len()
    }

    /// `(ip, count)` by descending count.
    pub fn counts_by_source_ip(&self) -> Vec<(&'a str, usize)> {
        rank_by_count(self.requests.iter().map(TileRequest::source_ip))
    }

    pub fn counts_by_zoom(&self) -> BTreeMap<u8, usize> {
        let mut counts = BTreeMap::new();
        for request in self.requests {
            *counts.entry(request.zoom()).or_insert(0) += 1;
        }
        counts
    }

    /// Share of all requests per zoom level, ascending by zoom.
    pub fn zoom_shares(&self) -> Vec<(u8, f64)> {
        let total = self.total();
        if total == 0 {
            return Vec::new();
        }

        self.counts_by_zoom()
            .into_iter()
            .map(|(zoom, count)| (zoom, count as f64 / total as f64))
            .collect()
    }

    /// Up to `n` most requested cells, optionally for one map only.
    pub fn top_tiles(&self, n: usize, map_layer_group_id: Option<&str>) -> Vec<TileCount> {
        self.ranked_tiles(map_layer_group_id, None)
            .into_iter()
            .take(n)
            .collect()
    }

    /// Like [`StatsAggregator::top_tiles`], counting only one resource kind.
    pub fn top_tiles_of_kind(
        &self,
        n: usize,
        map_layer_group_id: Option<&str>,
        kind: ResourceKind,
    ) -> Vec<TileCount> {
        self.ranked_tiles(map_layer_group_id, Some(kind))
            .into_iter()
            .take(n)
            .collect()
    }

    /// Every cell of a map tied at the highest request count.
    pub fn hottest_tiles(&self, map_layer_group_id: &str) -> Vec<TileCoord> {
        let ranked = self.ranked_tiles(Some(map_layer_group_id), None);
        let Some(max) = ranked.first().map(|t| t.count) else {
            return Vec::new();
        };

        ranked
            .into_iter()
            .take_while(|t| t.count == max)
            .map(|t| t.coord)
            .collect()
    }

    fn ranked_tiles(
        &self,
        map_layer_group_id: Option<&str>,
        kind: Option<ResourceKind>,
    ) -> Vec<TileCount> {
        let coords = self
            .requests
            .iter()
            .filter(|r| map_layer_group_id.is_none_or(|id| r.map_layer_group_id() == id))
            .filter(|r| kind.is_none_or(|k| r.resource_kind() == k))
            .map(TileRequest::coord);

        rank_by_count(coords)
            .into_iter()
            .map(|(coord, count)| TileCount { coord, count })
            .collect()
    }

    pub(crate) fn requests(&self) -> &'a [TileRequest] {
        self.requests
    }
}
