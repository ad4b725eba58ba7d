//! Grid geometry
//!
//! Resolves the pixel rectangle available for plotting from the outer chart
//! size and everything that eats into it: base and inner insets, axis
//! titles, the legend, label gutters and rotated category-label overflow.
//! The rectangle is not clamped; callers must supply outer dimensions larger
//! than the reserved margins.

use crate::options::{AxisTitles, LegendPosition, NameLabelAlign, Orientation};
use serde::{Deserialize, Serialize};

/// Width subtracted from the widest category label before scaling the
/// rotated-label overflow
pub const ROTATED_LABEL_INSET: f64 = 12.0;

/// Distances from the four edges of a rectangle
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Insets {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Insets {
    pub fn new(top: f64, right: f64, bottom: f64, left: f64) -> Self {
        Self { top, right, bottom, left }
    }

    /// Same inset on every side
    pub fn uniform(value: f64) -> Self {
        Self::new(value, value, value, value)
    }

    pub fn is_finite(&self) -> bool {
        self.top.is_finite()
            && self.right.is_finite()
            && self.bottom.is_finite()
            && self.left.is_finite()
    }

    /// Side-by-side sum of two insets
    pub fn add(&self, other: &Insets) -> Self {
        Self {
            top: self.top + other.top,
            right: self.right + other.right,
            bottom: self.bottom + other.bottom,
            left: self.left + other.left,
        }
    }
}

/// Gutter thickness reserved for each axis' labels
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextWidths {
    pub value_axis: f64,
    pub name_axis: f64,
}

/// Inputs of [`resolve_grid`]
#[derive(Debug, Clone)]
pub struct GridConfig {
    /// Outer chart width
    pub width: f64,
    /// Outer chart height
    pub height: f64,
    pub orientation: Orientation,
    pub align: NameLabelAlign,
    /// Outermost insets
    pub base_margins: Insets,
    /// Breathing room between the axis lines and the plot
    pub inner_margins: Insets,
    /// Outer insets replacing `base_margins` and `inner_margins`
    pub margin_override: Option<Insets>,
    pub legend: LegendPosition,
    pub legend_size: f64,
    /// Gap between the legend and the chart body
    pub legend_gap: f64,
    pub axis_titles: AxisTitles,
    /// Margin added per side carrying an axis title
    pub axis_title_margin: f64,
    pub text_widths: TextWidths,
    /// Category label rotation in degrees
    pub name_label_rotation: f64,
    /// Width of the widest category label
    pub max_name_label_width: f64,
    /// Number of category slots
    pub marker_count: usize,
    /// Number of value-axis ticks
    pub tick_count: usize,
}

impl GridConfig {
    /// A config with no margins, titles, legend or labels
    pub fn new(width: f64, height: f64, marker_count: usize, tick_count: usize) -> Self {
        Self {
            width,
            height,
            orientation: Orientation::Vertical,
            align: NameLabelAlign::Start,
            base_margins: Insets::default(),
            inner_margins: Insets::default(),
            margin_override: None,
            legend: LegendPosition::None,
            legend_size: 0.0,
            legend_gap: 0.0,
            axis_titles: AxisTitles::default(),
            axis_title_margin: 0.0,
            text_widths: TextWidths::default(),
            name_label_rotation: 0.0,
            max_name_label_width: 0.0,
            marker_count,
            tick_count,
        }
    }

    /// Total margins.
    ///
    /// The outer insets (`margin_override`, or base plus inner insets) get
    /// axis titles, the legend, label gutters and rotated-label overflow
    /// added on top.
    pub fn margins(&self) -> Insets {
        let mut margins = match self.margin_override {
            Some(margins) => margins,
            None => self.base_margins.add(&self.inner_margins),
        };

        let title = self.axis_title_margin;
        if self.axis_titles.top {
            margins.top += title;
        }
        if self.axis_titles.right {
            margins.right += title;
        }
        if self.axis_titles.bottom {
            margins.bottom += title;
        }
        if self.axis_titles.left {
            margins.left += title;
        }

        if self.legend_size > 0.0 {
            let reserved = self.legend_size + self.legend_gap;
            match self.legend {
                LegendPosition::Left => margins.left += reserved,
                LegendPosition::Right => margins.right += reserved,
                LegendPosition::Top => margins.top += reserved,
                LegendPosition::Bottom => margins.bottom += reserved,
                LegendPosition::None => {}
            }
        }

        let overflow = rotated_label_overflow(self.name_label_rotation, self.max_name_label_width);
        match self.orientation {
            Orientation::Vertical => {
                margins.left += self.text_widths.value_axis;
                margins.bottom += self.text_widths.name_axis + overflow;
            }
            Orientation::Horizontal => {
                margins.left += self.text_widths.name_axis + overflow;
                margins.bottom += self.text_widths.value_axis;
            }
        }

        margins
    }
}

/// Extra room needed by rotated category labels.
///
/// Grows linearly with the angle inside each quadrant.
pub fn rotated_label_overflow(degrees: f64, max_label_width: f64) -> f64 {
    if degrees == 0.0 || !degrees.is_finite() {
        return 0.0;
    }
    (degrees % 90.0).abs() / 90.0 * (max_label_width - ROTATED_LABEL_INSET).max(0.0)
}

/// The resolved plotting rectangle and its grid lines
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GridGeometry {
    pub orientation: Orientation,
    pub align: NameLabelAlign,
    pub marker_count: usize,
    pub tick_count: usize,
    pub top: f64,
    pub bottom: f64,
    pub left: f64,
    pub right: f64,
    /// Total margins the rectangle was cut with
    pub margins: Insets,
    pub text_widths: TextWidths,
    /// Pixel distance between adjacent value ticks
    pub value_gap: f64,
    /// Pixel distance between adjacent categories
    pub category_gap: f64,
    /// One line per value tick, from `nice_min` to `nice_max`
    pub value_lines: Vec<f64>,
    /// Category lines (`start`) or section boundaries (`middle`)
    pub category_lines: Vec<f64>,
}

/// Resolve the plotting rectangle and grid lines
pub fn resolve_grid(config: &GridConfig) -> GridGeometry {
    let margins = config.margins();

    let mut grid = GridGeometry {
        orientation: config.orientation,
        align: config.align,
        marker_count: config.marker_count,
        tick_count: config.tick_count,
        top: margins.top,
        bottom: config.height - margins.bottom,
        left: margins.left,
        right: config.width - margins.right,
        margins,
        text_widths: config.text_widths,
        value_gap: 0.0,
        category_gap: 0.0,
        value_lines: Vec::new(),
        category_lines: Vec::new(),
    };

    grid.value_gap = if config.tick_count > 1 {
        grid.value_span() / (config.tick_count - 1) as f64
    } else {
        tracing::trace!("single tick, value gap collapsed to zero");
        0.0
    };

    let category_span = grid.category_span();
    grid.category_gap = match config.align {
        NameLabelAlign::Start if config.marker_count > 1 => {
            category_span / (config.marker_count - 1) as f64
        }
        NameLabelAlign::Middle if config.marker_count > 0 => {
            category_span / config.marker_count as f64
        }
        _ => 0.0,
    };

    grid.value_lines = (0..config.tick_count)
        .map(|i| grid.value_position_at(i as f64 * grid.value_gap))
        .collect();

    grid.category_lines = match config.align {
        NameLabelAlign::Start => (0..config.marker_count)
            .map(|i| grid.category_position(i))
            .collect(),
        NameLabelAlign::Middle if config.marker_count > 0 => (0..=config.marker_count)
            .map(|i| grid.category_origin() + i as f64 * grid.category_gap)
            .collect(),
        NameLabelAlign::Middle => Vec::new(),
    };

    grid
}

impl GridGeometry {
    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }

    /// Pixel length of the value axis
    pub fn value_span(&self) -> f64 {
        match self.orientation {
            Orientation::Vertical => self.height(),
            Orientation::Horizontal => self.width(),
        }
    }

    /// Pixel length of the category axis
    pub fn category_span(&self) -> f64 {
        match self.orientation {
            Orientation::Vertical => self.width(),
            Orientation::Horizontal => self.height(),
        }
    }

    /// Where the category axis starts (left edge or top edge)
    pub fn category_origin(&self) -> f64 {
        match self.orientation {
            Orientation::Vertical => self.left,
            Orientation::Horizontal => self.top,
        }
    }

    /// Coordinate of category `index` along the category axis
    pub fn category_position(&self, index: usize) -> f64 {
        let origin = self.category_origin();
        match self.align {
            NameLabelAlign::Start if self.marker_count <= 1 => origin + self.category_span() / 2.0,
            NameLabelAlign::Start => origin + index as f64 * self.category_gap,
            NameLabelAlign::Middle => origin + (index as f64 + 0.5) * self.category_gap,
        }
    }

    /// Coordinate along the value axis for a fraction of the scale
    pub fn value_position(&self, percent: f64) -> f64 {
        self.value_position_at(percent * self.value_span())
    }

    fn value_position_at(&self, offset: f64) -> f64 {
        match self.orientation {
            Orientation::Vertical => self.bottom - offset,
            Orientation::Horizontal => self.left + offset,
        }
    }
}
