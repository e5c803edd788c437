//! Tile request analysis for CDN access logs of a tiled-map service.
//!
//! ```text
//! raw lines -> parse::BatchParser -> store::RequestStore
//!                                       |-> stats::StatsAggregator
//!                                       '-> render::QuadtreeRenderer
//! ```

pub mod conf;
pub mod parse;
pub mod render;
pub mod request;
pub mod stats;
pub mod store;

#[cfg(test)]
pub(crate) mod test_support;
