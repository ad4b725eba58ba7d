//! Layout options
//!
//! The flat option bag consumed at the start of every layout pass. Hosts can
//! build it in code or hand it over as JSON.

use crate::error::{ChartError, ChartResult};
use crate::grid::Insets;
use crate::scale::{DEFAULT_MAX_TICKS, MAX_TICKS_LIMIT};
use serde::{Deserialize, Serialize};

/// Which axis carries the values
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    /// Values grow upward, categories run left to right
    #[default]
    Vertical,
    /// Values grow rightward, categories run top to bottom (bar charts)
    Horizontal,
}

impl Orientation {
    pub fn is_vertical(self) -> bool {
        matches!(self, Orientation::Vertical)
    }
}

/// How categories share the category axis
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NameLabelAlign {
    /// Categories sit on grid lines, first and last on the plot edges
    #[default]
    Start,
    /// Categories sit in the middle of equal sections
    Middle,
}

/// Where the legend is reserved
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LegendPosition {
    #[default]
    None,
    Left,
    Right,
    Top,
    Bottom,
}

/// Which sides carry an axis title
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AxisTitles {
    pub top: bool,
    pub right: bool,
    pub bottom: bool,
    pub left: bool,
}

/// Per-axis gutter overrides, replacing measured label sizes
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TextWidthOverrides {
    pub value_axis: Option<f64>,
    pub name_axis: Option<f64>,
}

/// Options for one layout pass
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LayoutOptions {
    /// Upper bound on scale intervals
    pub max_ticks: usize,
    /// Scale the value axis by group totals
    pub stacked: bool,
    pub orientation: Orientation,
    /// Category label rotation in degrees (0 = not rotated)
    pub rotate_name_labels: f64,
    pub align_name_labels: NameLabelAlign,
    /// Outer insets replacing the calculator's base and inner insets
    pub margins: Option<Insets>,
    /// Mirror the placed labels for right-to-left reading
    pub is_rtl: bool,
    pub text_widths: TextWidthOverrides,
    pub legend: LegendPosition,
    /// Space reserved for the legend on its side
    pub legend_size: f64,
    pub axis_titles: AxisTitles,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            max_ticks: DEFAULT_MAX_TICKS,
            stacked: false,
            orientation: Orientation::Vertical,
            rotate_name_labels: 0.0,
            align_name_labels: NameLabelAlign::Start,
            margins: None,
            is_rtl: false,
            text_widths: TextWidthOverrides::default(),
            legend: LegendPosition::None,
            legend_size: 0.0,
            axis_titles: AxisTitles::default(),
        }
    }
}

impl LayoutOptions {
    /// Parse options from a JSON object
    pub fn from_json(json: &str) -> ChartResult<Self> {
        let options: LayoutOptions = serde_json::from_str(json)?;
        options.validate()?;
        Ok(options)
    }

    pub fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }

    pub fn with_stacked(mut self, stacked: bool) -> Self {
        self.stacked = stacked;
        self
    }

    pub fn with_max_ticks(mut self, max_ticks: usize) -> Self {
        self.max_ticks = max_ticks;
        self
    }

    pub fn with_rotation(mut self, degrees: f64) -> Self {
        self.rotate_name_labels = degrees;
        self
    }

    pub fn with_alignment(mut self, align: NameLabelAlign) -> Self {
        self.align_name_labels = align;
        self
    }

    pub fn with_rtl(mut self, is_rtl: bool) -> Self {
        self.is_rtl = is_rtl;
        self
    }

    pub fn with_margins(mut self, margins: Insets) -> Self {
        self.margins = Some(margins);
        self
    }

    pub fn with_legend(mut self, position: LegendPosition, size: f64) -> Self {
        self.legend = position;
        self.legend_size = size;
        self
    }

    /// Reject options the layout pass cannot work with
    pub fn validate(&self) -> ChartResult<()> {
        if self.max_ticks < 2 || self.max_ticks > MAX_TICKS_LIMIT {
            return Err(invalid(format!(
                "maxTicks must be between 2 and {}, got {}",
                MAX_TICKS_LIMIT, self.max_ticks
            )));
        }
        if !self.rotate_name_labels.is_finite() {
            return Err(invalid("rotateNameLabels must be finite"));
        }
        if !self.legend_size.is_finite() || self.legend_size < 0.0 {
            return Err(invalid(format!(
                "legendSize must be a non-negative number, got {}",
                self.legend_size
            )));
        }
        if let Some(margins) = &self.margins {
            if !margins.is_finite() {
                return Err(invalid("margin overrides must be finite"));
            }
        }
        for (axis, width) in [
            ("valueAxis", self.text_widths.value_axis),
            ("nameAxis", self.text_widths.name_axis),
        ] {
            if let Some(width) = width {
                if !width.is_finite() || width < 0.0 {
                    return Err(invalid(format!(
                        "textWidths.{} must be a non-negative number, got {}",
                        axis, width
                    )));
                }
            }
        }
        Ok(())
    }
}

fn invalid(message: impl Into<String>) -> ChartError {
    let message = message.into();
    tracing::warn!(%message, "rejecting layout options");
    ChartError::InvalidConfig(message)
}
