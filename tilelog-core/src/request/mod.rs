mod cache_outcome;
mod coord;
mod tile_request;

pub use cache_outcome::*;
pub use coord::*;
pub use tile_request::*;
