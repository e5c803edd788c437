//! Read-side statistics over a finished [`RequestStore`](crate::store::RequestStore).
//!
//! Everything here borrows the store immutably and is deterministic for a
//! given input. Rankings break ties by first-seen (log) order.

mod activity;
mod aggregator;
mod ranking;
mod summary;

pub use activity::*;
pub use aggregator::*;
pub use summary::*;
