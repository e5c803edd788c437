use crate::request::{TileCoord, TileRequest};
use crate::stats::StatsAggregator;
use chrono::{DateTime, Utc};
use serde::Serialize;
use smallvec::SmallVec;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Movement {
    ZoomIn,
    ZoomOut,
    PanLeft,
    PanRight,
    PanUp,
    PanDown,
}

/// One request in a client's navigation trace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActivityStep {
    pub timestamp: DateTime<Utc>,
    pub coord: TileCoord,
    /// How the viewport moved since the previous step. Empty for the first step.
    pub movements: SmallVec<[Movement; 3]>,
}

impl StatsAggregator<'_> {
    /// Requests from `source_ip` ordered by timestamp, annotated with zoom and pan moves.
    pub fn activity(&self, source_ip: &str) -> Vec<ActivityStep> {
        let mut requests: Vec<&TileRequest> = self
            .requests()
            .iter()
            .filter(|r| r.source_ip() == source_ip)
            .collect();

        // Stable: same-second requests keep log order.
        requests.sort_by_key(|r| r.timestamp());

        let mut previous: Option<TileCoord> = None;
        requests
            .into_iter()
            .map(|request| {
                let coord = request.coord();
                let movements = previous.map(|p| moves_between(p, coord)).unwrap_or_default();
                previous = Some(coord);

                ActivityStep {
                    timestamp: request.timestamp(),
                    coord,
                    movements,
                }
            })
            .collect()
    }
}

/// Pans are measured on the shallower of the two grids, so a zoom step alone
/// does not read as a pan.
fn moves_between(from: TileCoord, to: TileCoord) -> SmallVec<[Movement; 3]> {
    let mut out = SmallVec::new();

    if to.zoom > from.zoom {
        out.push(Movement::ZoomIn);
    } else if to.zoom < from.zoom {
        out.push(Movement::ZoomOut);
    }

    let common = from.zoom.min(to.zoom);
    let (Some(a), Some(b)) = (from.project_to(common), to.project_to(common)) else {
        return out;
    };

    if b.column > a.column {
        out.push(Movement::PanRight);
    } else if b.column < a.column {
        out.push(Movement::PanLeft);
    }

    if b.row > a.row {
        out.push(Movement::PanDown);
    } else if b.row < a.row {
        out.push(Movement::PanUp);
    }

    out
}
