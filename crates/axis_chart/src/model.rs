//! Series model types
//!
//! This module defines the caller-owned input of a layout pass: an ordered
//! list of data groups, each holding named data points. The engine only ever
//! reads these values; every derived quantity is recomputed per pass.

use crate::error::{ChartError, ChartResult};
use serde::{Deserialize, Serialize};

/// The full input of a layout pass: data groups in insertion order.
///
/// Group order defines stacking order, and point order inside each group
/// defines category order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Series {
    pub groups: Vec<DataGroup>,
}

impl Series {
    /// Create a series from its groups
    pub fn new(groups: Vec<DataGroup>) -> Self {
        Self { groups }
    }

    /// Parse a series document (a JSON array of groups)
    pub fn from_json(json: &str) -> ChartResult<Self> {
        let series: Series = serde_json::from_str(json)?;
        series.validate()?;
        Ok(series)
    }

    /// Check that every defined value is usable by the layout pass
    pub fn validate(&self) -> ChartResult<()> {
        for (group_idx, group) in self.groups.iter().enumerate() {
            for (point_idx, point) in group.data.iter().enumerate() {
                if let Some(value) = point.value {
                    if !value.is_finite() {
                        tracing::warn!(
                            group = group_idx,
                            point = point_idx,
                            "rejecting non-finite data value"
                        );
                        return Err(ChartError::InvalidData(format!(
                            "group {} point {} ('{}') has non-finite value {}",
                            group_idx, point_idx, point.name, value
                        )));
                    }
                }
            }
        }
        Ok(())
    }

    /// Number of category slots (the longest group)
    pub fn marker_count(&self) -> usize {
        self.groups.iter().map(|g| g.data.len()).max().unwrap_or(0)
    }

    /// Category names, one per slot.
    ///
    /// Slot `i` is named by the first group that has a point there.
    pub fn categories(&self) -> Vec<String> {
        (0..self.marker_count())
            .map(|idx| {
                self.groups
                    .iter()
                    .find_map(|g| g.data.get(idx))
                    .map(|p| p.name.clone())
                    .unwrap_or_default()
            })
            .collect()
    }

    /// Value at a slot, with missing points read as zero
    pub fn value_at(&self, group: usize, slot: usize) -> f64 {
        self.groups
            .get(group)
            .and_then(|g| g.data.get(slot))
            .map(DataPoint::value_or_zero)
            .unwrap_or(0.0)
    }
}

/// One named collection of data points plotted together
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DataGroup {
    /// Display name (shown by legends and tooltips)
    #[serde(default)]
    pub name: Option<String>,
    /// Optional explicit color
    #[serde(default)]
    pub color: Option<Color>,
    /// Optional fill pattern identifier
    #[serde(default)]
    pub pattern: Option<String>,
    /// Data points in category order
    pub data: Vec<DataPoint>,
}

impl DataGroup {
    /// Create a group from its points
    pub fn new(name: impl Into<String>, data: Vec<DataPoint>) -> Self {
        Self {
            name: Some(name.into()),
            color: None,
            pattern: None,
            data,
        }
    }

    /// Create a group from `(category, value)` pairs
    pub fn from_values<S: Into<String>>(
        name: impl Into<String>,
        values: impl IntoIterator<Item = (S, f64)>,
    ) -> Self {
        let data = values
            .into_iter()
            .map(|(category, value)| DataPoint::new(category, value))
            .collect();
        Self::new(name, data)
    }

    /// Set the group color
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    /// Set the group fill pattern
    pub fn with_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = Some(pattern.into());
        self
    }

    /// Sum of every value in the group (missing points count as zero)
    pub fn total(&self) -> f64 {
        self.data.iter().map(DataPoint::value_or_zero).sum()
    }
}

/// A single named value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataPoint {
    /// Category name
    pub name: String,
    /// Value, absent for a gap in the data
    #[serde(default)]
    pub value: Option<f64>,
}

impl DataPoint {
    pub fn new(name: impl Into<String>, value: f64) -> Self {
        Self {
            name: name.into(),
            value: Some(value),
        }
    }

    /// A point with no value
    pub fn missing(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: None,
        }
    }

    pub fn value_or_zero(&self) -> f64 {
        self.value.unwrap_or(0.0)
    }
}

/// Aggregate statistics over a series.
///
/// Missing points count as zero for `min`, `max` and the totals, but the
/// slot count always comes from the longest group.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SeriesStats {
    /// Number of category slots (points in the longest group)
    pub marker_count: usize,
    /// Number of groups
    pub group_count: usize,
    /// Smallest value across all slots
    pub min: f64,
    /// Largest value across all slots
    pub max: f64,
    /// Per-group sum of values
    pub group_totals: Vec<f64>,
}

impl SeriesStats {
    /// Collect statistics in a single pass over the series
    pub fn collect(series: &Series) -> Self {
        let marker_count = series.marker_count();
        let group_count = series.groups.len();

        if marker_count == 0 {
            return Self {
                marker_count,
                group_count,
                min: 0.0,
                max: 0.0,
                group_totals: vec![0.0; group_count],
            };
        }

        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        let mut group_totals = Vec::with_capacity(group_count);

        for (group_idx, group) in series.groups.iter().enumerate() {
            for slot in 0..marker_count {
                let value = series.value_at(group_idx, slot);
                min = min.min(value);
                max = max.max(value);
            }
            group_totals.push(group.total());
        }

        Self {
            marker_count,
            group_count,
            min,
            max,
            group_totals,
        }
    }

    /// The value domain fed to the scale calculator.
    ///
    /// The domain always includes zero. Stacked layouts take their extent
    /// from the group totals instead of single values.
    pub fn domain(&self, stacked: bool) -> (f64, f64) {
        let (low, high) = if stacked {
            let low = self.group_totals.iter().cloned().fold(f64::INFINITY, f64::min);
            let high = self.group_totals.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
            (low, high)
        } else {
            (self.min, self.max)
        };
        let low = if low.is_finite() { low } else { 0.0 };
        let high = if high.is_finite() { high } else { 0.0 };
        (low.min(0.0), high.max(0.0))
    }
}

/// RGBA color representation
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    /// Create a new color from RGB values (fully opaque)
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Create a new color from RGBA values
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Create a color from a hex string (e.g., "#FF0000" or "FF0000")
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim_start_matches('#');
        let channel = |i: usize| hex.get(i..i + 2).and_then(|c| u8::from_str_radix(c, 16).ok());
        match hex.len() {
            6 => Some(Self::rgb(channel(0)?, channel(2)?, channel(4)?)),
            8 => Some(Self::rgba(channel(0)?, channel(2)?, channel(4)?, channel(6)?)),
            _ => None,
        }
    }

    /// Convert to hex string with a leading `#`
    pub fn to_hex(&self) -> String {
        if self.a == 255 {
            format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
        } else {
            format!("#{:02X}{:02X}{:02X}{:02X}", self.r, self.g, self.b, self.a)
        }
    }
}

impl TryFrom<String> for Color {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Color::from_hex(&value).ok_or_else(|| format!("invalid color '{}'", value))
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_hex()
    }
}
