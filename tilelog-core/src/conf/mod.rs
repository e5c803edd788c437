mod error;
mod loader;
#[cfg(test)]
mod tests;
mod types;

pub use error::ConfigError;
pub use loader::{load_config, parse_config};
pub use types::*;
