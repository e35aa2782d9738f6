//! Core domain entities.
//!
//! - [`Link`] - A stored short link with its click counter
//! - [`NewLink`] - Input for creating a link
//! - [`LinkTotals`] - Link count and click sum

pub mod link;

pub use link::{Link, LinkTotals, NewLink};
