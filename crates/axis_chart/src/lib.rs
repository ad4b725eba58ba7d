//! Axis Chart - Scale and layout engine for axis-based charts
//!
//! This crate provides support for:
//! - Nice-number value scales
//! - Resolving the plotting rectangle from margins, titles, legend and label gutters
//! - Projecting data values to pixel coordinates
//! - Partitioning the category axis into sections
//! - Placing axis labels, with right-to-left mirroring
//!
//! The engine is pure geometry: it never draws, and every layout pass builds
//! its output from scratch.

mod error;
mod model;
mod options;
mod scale;
mod grid;
mod projection;
mod sections;
mod format;
mod measure;
mod labels;
mod layout;

pub use error::*;
pub use model::*;
pub use options::*;
pub use scale::*;
pub use grid::*;
pub use projection::*;
pub use sections::*;
pub use format::*;
pub use measure::*;
pub use labels::*;
pub use layout::*;
