//! Chart layout calculations
//!
//! This module runs the full layout pass: series statistics, the value
//! scale, the grid rectangle, point coordinates, category sections and axis
//! labels. Every pass builds a fresh [`ChartLayout`]; nothing is carried over
//! from earlier passes.

use crate::error::{ChartError, ChartResult};
use crate::format::Formatters;
use crate::grid::{
    resolve_grid, rotated_label_overflow, GridConfig, GridGeometry, Insets, TextWidths,
};
use crate::labels::{
    mirror_labels, name_label_texts, place_name_labels, place_value_labels, value_label_texts,
    LabelSpacing, MirrorStrategy, PlacedLabel,
};
use crate::measure::{FontContext, HeuristicTextMeasurer, TextMeasurer};
use crate::model::{Series, SeriesStats};
use crate::options::{LayoutOptions, Orientation};
use crate::projection::{project, Point};
use crate::scale::{compute_scale, Scale};
use crate::sections::{partition, Section};
use serde::Serialize;

/// Aggregates of one layout pass
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkerData {
    /// Number of category slots (points in the longest group)
    pub marker_count: usize,
    pub group_count: usize,
    pub min: f64,
    pub max: f64,
    /// Per-group sum of values
    pub group_totals: Vec<f64>,
    pub scale: Scale,
    /// Tick values from `nice_min` to `nice_max`
    pub scale_values: Vec<f64>,
    pub grid_top: f64,
    pub grid_bottom: f64,
    pub grid_left: f64,
    pub grid_right: f64,
}

/// Complete layout for a chart
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartLayout {
    pub width: f64,
    pub height: f64,
    pub markers: MarkerData,
    pub grid: GridGeometry,
    /// One vector per group, one point per category slot
    pub points: Vec<Vec<Point>>,
    pub sections: Vec<Section>,
    pub value_labels: Vec<PlacedLabel>,
    pub name_labels: Vec<PlacedLabel>,
}

impl ChartLayout {
    /// Serialize the layout for a renderer
    pub fn to_json(&self) -> ChartResult<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Layout calculator for axis charts
pub struct ChartLayoutCalculator {
    /// Font used to measure axis labels
    pub font: FontContext,
    /// Outermost insets around the chart
    pub base_margins: Insets,
    /// Room between the axis lines and the plot
    pub inner_margins: Insets,
    /// Margin added per side carrying an axis title
    pub axis_title_margin: f64,
    /// Gap between the legend and the chart body
    pub legend_gap: f64,
    /// Gap between labels and the grid
    pub label_padding: f64,
    measurer: Box<dyn TextMeasurer + Send + Sync>,
}

impl Default for ChartLayoutCalculator {
    fn default() -> Self {
        Self {
            font: FontContext::default(),
            base_margins: Insets::uniform(10.0),
            inner_margins: Insets::uniform(5.0),
            axis_title_margin: 20.0,
            legend_gap: 10.0,
            label_padding: 5.0,
            measurer: Box::new(HeuristicTextMeasurer),
        }
    }
}

impl ChartLayoutCalculator {
    /// Create a new layout calculator
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a different measurement service
    pub fn with_measurer<M>(mut self, measurer: M) -> Self
    where
        M: TextMeasurer + Send + Sync + 'static,
    {
        self.measurer = Box::new(measurer);
        self
    }

    /// Calculate the complete layout for a series
    pub fn calculate(
        &self,
        series: &Series,
        options: &LayoutOptions,
        formatters: &Formatters,
        width: f64,
        height: f64,
    ) -> ChartResult<ChartLayout> {
        options.validate()?;
        series.validate()?;
        if !width.is_finite() || !height.is_finite() || width < 0.0 || height < 0.0 {
            tracing::warn!(width, height, "rejecting chart dimensions");
            return Err(ChartError::InvalidConfig(format!(
                "chart size must be finite and non-negative, got {}x{}",
                width, height
            )));
        }

        let stats = SeriesStats::collect(series);
        let (min, max) = stats.domain(options.stacked);
        let scale = compute_scale(min, max, options.max_ticks);

        let value_texts = value_label_texts(&scale, &formatters.value, series, options);
        let name_texts = name_label_texts(&series.categories(), &formatters.name, series, options);

        let max_name_width = self.measurer.max_text_width(&name_texts, &self.font);
        let grid = resolve_grid(&GridConfig {
            width,
            height,
            orientation: options.orientation,
            align: options.align_name_labels,
            base_margins: self.base_margins,
            inner_margins: self.inner_margins,
            margin_override: options.margins,
            legend: options.legend,
            legend_size: options.legend_size,
            legend_gap: self.legend_gap,
            axis_titles: options.axis_titles,
            axis_title_margin: self.axis_title_margin,
            text_widths: self.text_widths(&value_texts, &name_texts, options),
            name_label_rotation: options.rotate_name_labels,
            max_name_label_width: max_name_width,
            marker_count: stats.marker_count,
            tick_count: scale.tick_count(),
        });

        if stats.marker_count == 1 {
            tracing::trace!("single category, centering on the category axis");
        }

        let points = project(series, &scale, &grid);
        let sections = partition(&grid, stats.marker_count);

        let spacing = LabelSpacing {
            padding: self.label_padding,
        };
        let mut value_labels = place_value_labels(&grid, &value_texts, &spacing);
        let mut name_labels =
            place_name_labels(&grid, &name_texts, options.rotate_name_labels, &spacing);

        if options.is_rtl {
            let flip = MirrorStrategy::Transform { translate_x: width };
            let gutter = MirrorStrategy::Reposition {
                extent: left_gutter_extent(&grid, options, max_name_width),
            };
            match options.orientation {
                Orientation::Vertical => {
                    value_labels = mirror_labels(&value_labels, gutter);
                    name_labels = mirror_labels(&name_labels, flip);
                }
                Orientation::Horizontal => {
                    name_labels = mirror_labels(&name_labels, gutter);
                    value_labels = mirror_labels(&value_labels, flip);
                }
            }
        }

        tracing::debug!(
            target: "axis_chart::layout",
            marker_count = stats.marker_count,
            group_count = stats.group_count,
            nice_min = scale.nice_min,
            nice_max = scale.nice_max,
            tick_spacing = scale.tick_spacing,
            grid_top = grid.top,
            grid_bottom = grid.bottom,
            grid_left = grid.left,
            grid_right = grid.right,
            "layout pass complete"
        );

        let markers = MarkerData {
            marker_count: stats.marker_count,
            group_count: stats.group_count,
            min: stats.min,
            max: stats.max,
            group_totals: stats.group_totals,
            scale,
            scale_values: scale.values(),
            grid_top: grid.top,
            grid_bottom: grid.bottom,
            grid_left: grid.left,
            grid_right: grid.right,
        };

        Ok(ChartLayout {
            width,
            height,
            markers,
            grid,
            points,
            sections,
            value_labels,
            name_labels,
        })
    }

    /// Gutter sizes for both axes, measured unless overridden
    fn text_widths(
        &self,
        value_texts: &[String],
        name_texts: &[String],
        options: &LayoutOptions,
    ) -> TextWidths {
        let padding = self.label_padding;
        let line = self.measurer.line_height(&self.font) + padding;
        let widest_value = self.measurer.max_text_width(value_texts, &self.font) + padding;
        let widest_name = self.measurer.max_text_width(name_texts, &self.font) + padding;

        let (value_axis, name_axis) = match options.orientation {
            Orientation::Vertical => (widest_value, line),
            Orientation::Horizontal => (line, widest_name),
        };

        TextWidths {
            value_axis: options.text_widths.value_axis.unwrap_or(value_axis),
            name_axis: options.text_widths.name_axis.unwrap_or(name_axis),
        }
    }
}

/// Sum of both edges of the label gutter left of the grid.
///
/// Reflecting `x` to `extent - x` keeps gutter labels inside the gutter.
fn left_gutter_extent(grid: &GridGeometry, options: &LayoutOptions, max_name_width: f64) -> f64 {
    let gutter = match options.orientation {
        Orientation::Vertical => grid.text_widths.value_axis,
        Orientation::Horizontal => {
            grid.text_widths.name_axis
                + rotated_label_overflow(options.rotate_name_labels, max_name_width)
        }
    };
    let margin_left = grid.margins.left - gutter;
    margin_left + grid.left
}
