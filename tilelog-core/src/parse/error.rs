use std::fmt::{Display, Formatter};
use thiserror::Error;

/// Why a single log line could not become a [`TileRequest`](crate::request::TileRequest).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LineError {
    #[error("malformed log envelope: {reason}")]
    MalformedEnvelope { reason: EnvelopeViolation },

    #[error("malformed tile coordinates in {path}: {reason}")]
    MalformedCoordinates {
        path: String,
        reason: CoordinateViolation,
    },

    /// Non-fatal. The record is kept and the token is stored as `CacheOutcome::Other`.
    #[error("unknown cache outcome '{token}'")]
    UnknownCacheOutcome { token: String },
}

impl LineError {
    /// Whether the line was dropped because of this error.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, Self::UnknownCacheOutcome { .. })
    }
}

impl From<EnvelopeViolation> for LineError {
    fn from(reason: EnvelopeViolation) -> Self {
        Self::MalformedEnvelope { reason }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EnvelopeViolation {
    #[error("missing <priority> prefix")]
    MissingPriority,

    #[error("timestamp is not a valid YYYY-MM-DDTHH:MM:SSZ date")]
    InvalidTimestamp,

    #[error("missing process tag")]
    MissingProcessTag,

    #[error("missing client address")]
    MissingClientIp,

    #[error("missing quoted field")]
    MissingQuotedField,

    #[error("missing or unterminated request line")]
    MissingRequest,

    #[error("only GET requests are tile requests")]
    UnsupportedMethod,

    #[error("request path is not under /<user>/api/v1/map/")]
    UnknownBasePath,

    #[error("missing layergroup id")]
    MissingLayerGroup,

    #[error("request path is neither a .png tile nor a .grid.json grid")]
    UnrecognisedPathShape,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Zoom,
    Row,
    Column,
}

impl Display for Axis {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Axis::Zoom => f.write_str("zoom"),
            Axis::Row => f.write_str("row"),
            Axis::Column => f.write_str("column"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoordinateViolation {
    #[error("{0} is missing")]
    Missing(Axis),

    #[error("{0} is not a number")]
    NotNumeric(Axis),

    #[error("zoom {0} is deeper than the supported maximum")]
    ZoomTooDeep(String),

    #[error("{axis} {value} is outside the grid at zoom {zoom}")]
    OutOfRange { axis: Axis, value: String, zoom: u8 },

    #[error("unexpected path segments after the tile address")]
    TrailingSegments,
}
