//! Data types shared by the layout engine and its callers.

mod config;
mod geometry;

pub use config::*;
pub use geometry::*;
