mod request_store;
#[cfg(test)]
mod tests;

pub use request_store::*;
