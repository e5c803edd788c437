//! Quadtree coverage rendering
//!
//! Maps `(zoom, row, column)` addresses onto pixel rectangles of a basemap that
//! spans the whole tile extent, and composites an overlay marking every
//! requested cell.

mod ascii;
mod cell;
mod error;
mod renderer;
mod style;
#[cfg(test)]
mod tests;

pub use ascii::*;
pub use cell::*;
pub use error::*;
pub use renderer::*;
pub use style::*;
