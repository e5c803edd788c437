//! Log line parsing
//!
//! Turns one syslog-wrapped CDN access-log line into a [`TileRequest`].
//!
//! The work is split in three layers, each testable on its own:
//!
//! - [`split_envelope`] checks the fixed-format prefix and cuts out the client
//!   address, the request target and the trailing cache/status fields.
//! - [`parse_tile_path`] decodes the request target by trying each
//!   [`PathShape`] in priority order.
//! - [`parse_tail`] reads the cache chain and status on a best-effort basis.
//!
//! Coordinate problems reject the whole line since the tile address is the
//! key of every later analysis. Cache and status problems never do.
//!
//! [`BatchParser`] runs lines through [`parse_line`] and collects failures
//! per line instead of stopping at the first one.

mod batch;
mod cache_chain;
mod envelope;
mod error;
mod map_id;
mod path;
#[cfg(test)]
mod tests;

pub use batch::*;
pub use cache_chain::parse_tail;
pub use envelope::{Envelope, split_envelope};
pub use error::*;
pub use map_id::layer_group_id;
pub use path::{PathShape, ShapeMatch, TilePath, parse_tile_path};

use crate::request::TileRequest;

/// Parses one log line. Pure and safe to call from any thread.
pub fn parse_line(line: &str) -> Result<TileRequest, LineError> {
    let envelope = split_envelope(line)?;
    let tile = parse_tile_path(envelope.request_path)?;
    let (cache_outcome, http_status) = parse_tail(envelope.tail);

    Ok(TileRequest::new(
        envelope.timestamp,
        envelope.source_ip.to_string(),
        tile.user.to_string(),
        tile.layer_group_id.to_string(),
        tile.coord,
        tile.kind,
        cache_outcome,
        http_status,
    ))
}
