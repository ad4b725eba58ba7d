//! Data point projection
//!
//! Maps every slot of every group to pixel coordinates inside the resolved
//! grid. Stacked layouts differ only in the scale they are projected with;
//! the per-point formula is the same.

use crate::grid::GridGeometry;
use crate::model::Series;
use crate::options::Orientation;
use crate::scale::Scale;
use serde::Serialize;

/// Pixel coordinates of one data value
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Point {
    pub left: f64,
    pub top: f64,
    /// Value used for projection (zero for a missing point)
    pub value: f64,
    /// Whether the series actually holds a value for this slot
    pub defined: bool,
    pub group_index: usize,
    pub category_index: usize,
}

/// Project a series onto the grid.
///
/// The outer vector holds one entry per group and the inner one a point per
/// category slot. Groups shorter than the longest group are padded with
/// undefined zero-valued points.
pub fn project(series: &Series, scale: &Scale, grid: &GridGeometry) -> Vec<Vec<Point>> {
    let marker_count = series.marker_count();

    series
        .groups
        .iter()
        .enumerate()
        .map(|(group_index, group)| {
            (0..marker_count)
                .map(|category_index| {
                    let raw = group.data.get(category_index).and_then(|p| p.value);
                    let value = raw.unwrap_or(0.0);
                    let along_values = grid.value_position(scale.percent(value));
                    let along_categories = grid.category_position(category_index);

                    let (left, top) = match grid.orientation {
                        Orientation::Vertical => (along_categories, along_values),
                        Orientation::Horizontal => (along_values, along_categories),
                    };

                    Point {
                        left,
                        top,
                        value,
                        defined: raw.is_some(),
                        group_index,
                        category_index,
                    }
                })
                .collect()
        })
        .collect()
}
