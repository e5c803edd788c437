use crate::parse::envelope::is_digits;
use crate::parse::map_id::layer_group_id;
use crate::parse::{Axis, CoordinateViolation, EnvelopeViolation, LineError};
use crate::request::{MAX_ZOOM, ResourceKind, TileCoord, grid_span};

const API_SEGMENT: &str = "api/v1/map/";

/// A decoded `/<user>/api/v1/map/...` request target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TilePath<'a> {
    pub user: &'a str,
    pub layer_group_id: &'a str,
    pub coord: TileCoord,
    pub kind: ResourceKind,
}

/// The request-path layouts a tile server answers.
///
/// Each shape decides on its own whether it applies to a path; the parser tries
/// them in [`PathShape::PRIORITY`] order and takes the first that does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathShape {
    /// `<map>/<z>/<row>/<column>/<extra>.grid.json`
    GridJson,
    /// `<map>/<z>/<row>/<column>.png`
    Tile,
}

/// Shape-specific result before the map token is resolved.
#[derive(Debug, PartialEq, Eq)]
pub struct ShapeMatch<'a> {
    pub map_token: &'a str,
    pub coord: TileCoord,
}

impl PathShape {
    pub const PRIORITY: [PathShape; 2] = [PathShape::GridJson, PathShape::Tile];

    pub fn kind(&self) -> ResourceKind {
        match self {
            PathShape::GridJson => ResourceKind::GridJson,
            PathShape::Tile => ResourceKind::Tile,
        }
    }

    fn suffix(&self) -> &'static str {
        match self {
            PathShape::GridJson => ".grid.json",
            PathShape::Tile => ".png",
        }
    }

    /// Number of path segments after the map token.
    fn arity(&self) -> usize {
        match self {
            PathShape::GridJson => 4,
            PathShape::Tile => 3,
        }
    }

    /// `None` means the shape does not apply to `map_path`. `Some(Err(..))` means
    /// it applies but the tile address is broken.
    pub fn try_match<'a>(
        &self,
        map_path: &'a str,
    ) -> Option<Result<ShapeMatch<'a>, CoordinateViolation>> {
        let body = map_path.strip_suffix(self.suffix())?;
        Some(self.match_segments(body))
    }

    fn match_segments<'a>(&self, body: &'a str) -> Result<ShapeMatch<'a>, CoordinateViolation> {
        let mut segments = body.split('/');
        let map_token = segments.next().unwrap_or_default();

        // Some clients emit `<map>//<z>/...`.
        let mut segments = segments.peekable();
        if segments.peek() == Some(&"") {
            segments.next();
        }

        let segments: Vec<&str> = segments.collect();
        if segments.len() > self.arity() {
            return Err(CoordinateViolation::TrailingSegments);
        }

        let zoom = segments.first().copied().unwrap_or_default();
        let row = segments.get(1).copied().unwrap_or_default();
        let column = segments.get(2).copied().unwrap_or_default();

        let coord = parse_coord(zoom, row, column)?;

        Ok(ShapeMatch { map_token, coord })
    }
}

/// Decodes a request target into user, layergroup and tile address.
pub fn parse_tile_path(target: &str) -> Result<TilePath<'_>, LineError> {
    let path = target.split_once('?').map_or(target, |(path, _query)| path);

    let (user, map_path) = split_base(path).ok_or(EnvelopeViolation::UnknownBasePath)?;

    for shape in PathShape::PRIORITY {
        let Some(matched) = shape.try_match(map_path) else {
            continue;
        };

        let ShapeMatch { map_token, coord } =
            matched.map_err(|reason| LineError::MalformedCoordinates {
                path: path.to_string(),
                reason,
            })?;

        let layer_group_id = layer_group_id(map_token);
        if layer_group_id.is_empty() {
            return Err(EnvelopeViolation::MissingLayerGroup.into());
        }

        return Ok(TilePath {
            user,
            layer_group_id,
            coord,
            kind: shape.kind(),
        });
    }

    Err(EnvelopeViolation::UnrecognisedPathShape.into())
}

/// Splits `/<user>/api/v1/map/<rest>` into `(user, rest)`.
fn split_base(path: &str) -> Option<(&str, &str)> {
    let (user, rest) = path.strip_prefix('/')?.split_once('/')?;

    let valid_user = !user.is_empty()
        && user
            .chars()
            .all(|c| c.is_alphanumeric() || c == '_' || c == '-');
    if !valid_user {
        return None;
    }

    Some((user, rest.strip_prefix(API_SEGMENT)?))
}

fn parse_coord(zoom: &str, row: &str, column: &str) -> Result<TileCoord, CoordinateViolation> {
    let zoom_value = parse_axis(Axis::Zoom, zoom)?;
    let zoom = u8::try_from(zoom_value)
        .ok()
        .filter(|z| *z <= MAX_ZOOM)
        .ok_or_else(|| CoordinateViolation::ZoomTooDeep(zoom.to_string()))?;

    let row = in_grid(Axis::Row, row, zoom)?;
    let column = in_grid(Axis::Column, column, zoom)?;

    TileCoord::new(zoom, row, column).ok_or(CoordinateViolation::OutOfRange {
        axis: Axis::Row,
        value: row.to_string(),
        zoom,
    })
}

fn in_grid(axis: Axis, raw: &str, zoom: u8) -> Result<u32, CoordinateViolation> {
    let out_of_range = || CoordinateViolation::OutOfRange {
        axis,
        value: raw.to_string(),
        zoom,
    };

    let value = parse_axis(axis, raw).map_err(|err| match err {
        // Negative indices are addresses, just not ones on the grid.
        CoordinateViolation::NotNumeric(_) if is_negative_number(raw) => out_of_range(),
        other => other,
    })?;

    u32::try_from(value)
        .ok()
        .filter(|v| u64::from(*v) < grid_span(zoom))
        .ok_or_else(out_of_range)
}

fn parse_axis(axis: Axis, raw: &str) -> Result<u64, CoordinateViolation> {
    if raw.is_empty() {
        return Err(CoordinateViolation::Missing(axis));
    }
    if !is_digits(raw) {
        return Err(CoordinateViolation::NotNumeric(axis));
    }

    // Digits that overflow u64 are far outside any grid.
    Ok(raw.parse::<u64>().unwrap_or(u64::MAX))
}

fn is_negative_number(raw: &str) -> bool {
    raw.strip_prefix('-').is_some_and(is_digits)
}
