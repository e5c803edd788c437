use crate::request::TileCoord;

/// Half-open pixel rectangle `[x0, x1) x [y0, y1)` covered by one quadtree cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellRect {
    pub x0: u32,
    pub y0: u32,
    pub x1: u32,
    pub y1: u32,
}

impl CellRect {
    /// The rectangle of `coord` on a `width` x `height` image spanning the full
    /// `2^zoom x 2^zoom` grid. Edges use integer division, so neighbouring cells
    /// tile the image without gaps or overlap.
    pub fn of(coord: TileCoord, width: u32, height: u32) -> Self {
        let z = u32::from(coord.zoom);
        let edge = |index: u64, extent: u32| ((index * u64::from(extent)) >> z) as u32;

        let column = u64::from(coord.column);
        let row = u64::from(coord.row);

        Self {
            x0: edge(column, width),
            x1: edge(column + 1, width),
            y0: edge(row, height),
            y1: edge(row + 1, height),
        }
    }

    pub fn width(&self) -> u32 {
        self.x1 - self.x0
    }

    pub fn height(&self) -> u32 {
        self.y1 - self.y0
    }

    /// True when the cell is narrower than a pixel on this basemap.
    pub fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }

    pub fn contains(&self, x: u32, y: u32) -> bool {
        (self.x0..self.x1).contains(&x) && (self.y0..self.y1).contains(&y)
    }

    pub fn pixels(&self) -> impl Iterator<Item = (u32, u32)> + use<> {
        let (x0, x1) = (self.x0, self.x1);
        (self.y0..self.y1).flat_map(move |y| (x0..x1).map(move |x| (x, y)))
    }

    /// The one-pixel border of the rectangle.
    pub fn border(&self) -> impl Iterator<Item = (u32, u32)> + use<> {
        let rect = *self;
        rect.pixels().filter(move |&(x, y)| {
            x == rect.x0 || x + 1 == rect.x1 || y == rect.y0 || y + 1 == rect.y1
        })
    }
}
