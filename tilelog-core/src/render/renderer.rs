use crate::render::{CellRect, OverlayStyle, RenderError};
use crate::request::{MAX_ZOOM, TileCoord, TileRequest};
use image::{Pixel, Rgba, RgbaImage};
use std::collections::{BTreeMap, BTreeSet};

/// Projected request counts per cell at one zoom level.
pub type Coverage = BTreeMap<TileCoord, usize>;

/// Paints requested-tile coverage over a basemap.
///
/// The basemap is assumed to span the full tile extent at the rendered zoom.
/// A basemap of a different extent still renders, just at the wrong place.
#[derive(Debug, Clone, Default)]
pub struct QuadtreeRenderer {
    style: OverlayStyle,
}

impl QuadtreeRenderer {
    pub fn new(style: OverlayStyle) -> Self {
        Self { style }
    }

    pub fn style(&self) -> &OverlayStyle {
        &self.style
    }

    /// Marks every cell at `target_zoom` that was requested, optionally for one map.
    ///
    /// Deeper requests are projected onto the `target_zoom` grid; shallower ones
    /// are left out. Pixels outside marked cells are copied unchanged.
    pub fn render<'r>(
        &self,
        requests: impl IntoIterator<Item = &'r TileRequest>,
        basemap: &RgbaImage,
        target_zoom: i32,
        map_layer_group_id: Option<&str>,
    ) -> Result<RgbaImage, RenderError> {
        self.render_with_highlights(requests, basemap, target_zoom, map_layer_group_id, &[])
    }

    /// [`QuadtreeRenderer::render`], then outlines each of `highlights` that
    /// projects onto the target grid.
    pub fn render_with_highlights<'r>(
        &self,
        requests: impl IntoIterator<Item = &'r TileRequest>,
        basemap: &RgbaImage,
        target_zoom: i32,
        map_layer_group_id: Option<&str>,
        highlights: &[TileCoord],
    ) -> Result<RgbaImage, RenderError> {
        let zoom = validate(basemap, target_zoom)?;
        let coverage = coverage(requests, zoom, map_layer_group_id);

        let mut out = basemap.clone();
        self.fill_cells(&mut out, &coverage, self.style.fill);

        let outlined: BTreeSet<TileCoord> =
            highlights.iter().filter_map(|c| c.project_to(zoom)).collect();
        self.outline_cells(&mut out, outlined.iter().copied());

        tracing::debug!(
            zoom,
            cells = coverage.len(),
            highlights = outlined.len(),
            "rendered coverage overlay"
        );

        Ok(out)
    }

    /// One layer per zoom level present, shallowest first, each layer a step
    /// more opaque than the last. Stops at the first zoom whose cells are
    /// smaller than a pixel.
    pub fn render_all_zooms<'r>(
        &self,
        requests: impl IntoIterator<Item = &'r TileRequest>,
        basemap: &RgbaImage,
        map_layer_group_id: Option<&str>,
    ) -> Result<RgbaImage, RenderError> {
        validate(basemap, 0)?;

        let mut layers: BTreeMap<u8, Coverage> = BTreeMap::new();
        for request in requests
            .into_iter()
            .filter(|r| map_layer_group_id.is_none_or(|id| r.map_layer_group_id() == id))
        {
            *layers
                .entry(request.zoom())
                .or_default()
                .entry(request.coord())
                .or_insert(0) += 1;
        }

        let (width, height) = basemap.dimensions();
        let mut out = basemap.clone();
        let Rgba([r, g, b, base_alpha]) = self.style.fill;

        for (layer, (zoom, cells)) in layers.into_iter().enumerate() {
            let probe = TileCoord {
                zoom,
                row: 0,
                column: 0,
            };
            if CellRect::of(probe, width, height).is_empty() {
                tracing::debug!(zoom, "cells below one pixel, skipping deeper layers");
                break;
            }

            let step = usize::from(self.style.opacity_step) * layer;
            let alpha = (usize::from(base_alpha) + step).min(usize::from(u8::MAX)) as u8;
            self.fill_cells(&mut out, &cells, Rgba([r, g, b, alpha]));
        }

        Ok(out)
    }

    fn fill_cells(&self, image: &mut RgbaImage, coverage: &Coverage, fill: Rgba<u8>) {
        let max = coverage.values().copied().max().unwrap_or(0);
        let style = OverlayStyle { fill, ..self.style };
        let (width, height) = image.dimensions();

        for (coord, count) in coverage {
            let color = style.fill_for(*count, max);
            for (x, y) in CellRect::of(*coord, width, height).pixels() {
                image.get_pixel_mut(x, y).blend(&color);
            }
        }
    }

    fn outline_cells(&self, image: &mut RgbaImage, cells: impl Iterator<Item = TileCoord>) {
        let (width, height) = image.dimensions();
        for coord in cells {
            for (x, y) in CellRect::of(coord, width, height).border() {
                image.get_pixel_mut(x, y).blend(&self.style.outline);
            }
        }
    }
}

/// Counts requests per cell of the `zoom` grid, projecting deeper requests up
/// and dropping shallower ones.
pub fn coverage<'r>(
    requests: impl IntoIterator<Item = &'r TileRequest>,
    zoom: u8,
    map_layer_group_id: Option<&str>,
) -> Coverage {
    let mut cells = Coverage::new();

    for request in requests {
        if map_layer_group_id.is_some_and(|id| request.map_layer_group_id() != id) {
            continue;
        }
        if let Some(cell) = request.coord().project_to(zoom) {
            *cells.entry(cell).or_insert(0) += 1;
        }
    }

    cells
}

fn validate(basemap: &RgbaImage, target_zoom: i32) -> Result<u8, RenderError> {
    let (width, height) = basemap.dimensions();
    if width == 0 || height == 0 {
        return Err(RenderError::InvalidRenderParameters(format!(
            "basemap is {width}x{height}"
        )));
    }

    if target_zoom < 0 {
        return Err(RenderError::InvalidRenderParameters(format!(
            "zoom {target_zoom} is negative"
        )));
    }

    // No request is deeper than MAX_ZOOM, so anything past it renders nothing.
    let zoom = target_zoom.min(i32::from(MAX_ZOOM) + 1);
    u8::try_from(zoom).map_err(|_| {
        RenderError::InvalidRenderParameters(format!("zoom {target_zoom} is out of range"))
    })
}
