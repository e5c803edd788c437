use crate::request::{ResourceKind, TileRequest};
use std::collections::HashMap;

/// Append-only, log-ordered collection of parsed tile requests.
///
/// Models a finished log batch: there is no update or delete. Readers borrow
/// it immutably, so any number of aggregations can share one store.
#[derive(Debug, Default, Clone)]
pub struct RequestStore {
    requests: Vec<TileRequest>,
}

impl RequestStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, request: TileRequest) {
        self.requests.push(request);
    }

    pub fn len(&self) -> usize {
        self.requests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TileRequest> {
        self.requests.iter()
    }

    /// The stored requests in log order.
    pub fn as_slice(&self) -> &[TileRequest] {
        &self.requests
    }

    pub fn filter_by_map(&self, map_layer_group_id: &str) -> Vec<&TileRequest> {
        self.filter(|r| r.map_layer_group_id() == map_layer_group_id)
    }

    pub fn filter_by_zoom(&self, zoom: u8) -> Vec<&TileRequest> {
        self.filter(|r| r.zoom() == zoom)
    }

    pub fn filter_by_source_ip(&self, source_ip: &str) -> Vec<&TileRequest> {
        self.filter(|r| r.source_ip() == source_ip)
    }

    pub fn filter_by_kind(&self, kind: ResourceKind) -> Vec<&TileRequest> {
        self.filter(|r| r.resource_kind() == kind)
    }

    pub fn group_by_source_ip(&self) -> HashMap<&str, usize> {
        let mut counts = HashMap::new();
        for request in &self.requests {
            *counts.entry(request.source_ip()).or_insert(0) += 1;
        }
        counts
    }

    /// Layergroup ids in first-seen order.
    pub fn distinct_maps(&self) -> Vec<&str> {
        first_seen(self.requests.iter().map(TileRequest::map_layer_group_id))
    }

    /// Source addresses in first-seen order.
    pub fn distinct_source_ips(&self) -> Vec<&str> {
        first_seen(self.requests.iter().map(TileRequest::source_ip))
    }

    fn filter(&self, keep: impl Fn(&TileRequest) -> bool) -> Vec<&TileRequest> {
        self.requests.iter().filter(|r| keep(r)).collect()
    }
}

impl Extend<TileRequest> for RequestStore {
    fn extend<T: IntoIterator<Item = TileRequest>>(&mut self, iter: T) {
        self.requests.extend(iter);
    }
}

impl FromIterator<TileRequest> for RequestStore {
    fn from_iter<T: IntoIterator<Item = TileRequest>>(iter: T) -> Self {
        Self {
            requests: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a RequestStore {
    type Item = &'a TileRequest;
    type IntoIter = std::slice::Iter<'a, TileRequest>;

    fn into_iter(self) -> Self::IntoIter {
        self.requests.iter()
    }
}

fn first_seen<'a>(values: impl Iterator<Item = &'a str>) -> Vec<&'a str> {
    let mut seen = std::collections::HashSet::new();
    values.filter(|v| seen.insert(*v)).collect()
}
