use crate::render::{RenderError, coverage};
use crate::request::TileRequest;

/// Deepest zoom drawn as text; zoom 7 is already 128 columns wide.
pub const ASCII_MAX_ZOOM: u8 = 7;

/// Draws the `zoom` grid as text, one line per row: `#` for a requested cell,
/// `.` otherwise. Deeper requests are projected as in the raster renderer.
pub fn render_ascii<'r>(
    requests: impl IntoIterator<Item = &'r TileRequest>,
    zoom: u8,
    map_layer_group_id: Option<&str>,
) -> Result<String, RenderError> {
    if zoom > ASCII_MAX_ZOOM {
        return Err(RenderError::InvalidRenderParameters(format!(
            "ASCII maps stop at zoom {ASCII_MAX_ZOOM}, got {zoom}"
        )));
    }

    let span = 1usize << zoom;
    let mut grid = vec![vec!['.'; span]; span];

    for coord in coverage(requests, zoom, map_layer_group_id).into_keys() {
        grid[coord.row as usize][coord.column as usize] = '#';
    }

    let lines: Vec<String> = grid
        .into_iter()
        .map(|row| {
            row.into_iter()
                .map(String::from)
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect();

    Ok(lines.join("\n"))
}
