//! Axis label placement
//!
//! Labels are placed in logical left-to-right coordinates first. Right-to-left
//! output is produced afterwards by [`mirror_labels`], so none of the
//! placement formulas know about reading direction.

use crate::format::{FormatContext, NameFormatter, ValueFormatter};
use crate::grid::GridGeometry;
use crate::model::Series;
use crate::options::{LayoutOptions, NameLabelAlign, Orientation};
use crate::scale::Scale;
use serde::Serialize;

/// Horizontal text anchoring
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAnchor {
    Start,
    Middle,
    End,
}

impl TextAnchor {
    /// The anchor after a horizontal flip
    pub fn mirrored(self) -> Self {
        match self {
            TextAnchor::Start => TextAnchor::End,
            TextAnchor::Middle => TextAnchor::Middle,
            TextAnchor::End => TextAnchor::Start,
        }
    }
}

/// Rotation of a label about a pivot, in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Rotation {
    pub angle: f64,
    pub pivot_x: f64,
    pub pivot_y: f64,
}

/// Group transform `translate(translate_x, 0) scale(-1, 1)`
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MirrorTransform {
    pub translate_x: f64,
}

/// A label ready for the renderer
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlacedLabel {
    /// Tick index (value labels) or category index (name labels)
    pub index: usize,
    pub text: String,
    pub x: f64,
    pub y: f64,
    pub anchor: TextAnchor,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rotation: Option<Rotation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mirror: Option<MirrorTransform>,
}

impl PlacedLabel {
    fn new(index: usize, text: String, x: f64, y: f64, anchor: TextAnchor) -> Self {
        Self {
            index,
            text,
            x,
            y,
            anchor,
            rotation: None,
            mirror: None,
        }
    }

    /// Horizontal position after the group transform, if any
    pub fn rendered_x(&self) -> f64 {
        match self.mirror {
            Some(mirror) => mirror.translate_x - self.x,
            None => self.x,
        }
    }
}

/// Spacing between labels and the grid
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabelSpacing {
    /// Distance between a label and the grid edge it belongs to
    pub padding: f64,
}

/// Format every tick of `scale`, in ascending tick order
pub fn value_label_texts(
    scale: &Scale,
    formatter: &ValueFormatter,
    series: &Series,
    options: &LayoutOptions,
) -> Vec<String> {
    let format = formatter.resolve(scale);
    scale
        .values()
        .into_iter()
        .enumerate()
        .map(|(index, value)| {
            let ctx = FormatContext {
                series,
                options,
                index,
            };
            format(value, &ctx)
        })
        .collect()
}

/// Format every category name, in category order
pub fn name_label_texts(
    categories: &[String],
    formatter: &NameFormatter,
    series: &Series,
    options: &LayoutOptions,
) -> Vec<String> {
    let format = formatter.resolve();
    categories
        .iter()
        .enumerate()
        .map(|(index, name)| {
            let ctx = FormatContext {
                series,
                options,
                index,
            };
            format(name, &ctx)
        })
        .collect()
}

/// Place value-axis labels.
///
/// `texts` are in ascending tick order. Vertical charts list the labels top
/// to bottom (largest value first) in the left gutter; horizontal charts list
/// them left to right below the grid.
pub fn place_value_labels(
    grid: &GridGeometry,
    texts: &[String],
    spacing: &LabelSpacing,
) -> Vec<PlacedLabel> {
    let count = texts.len();
    match grid.orientation {
        Orientation::Vertical => (0..count)
            .map(|row| {
                let tick = count - 1 - row;
                PlacedLabel::new(
                    tick,
                    texts[tick].clone(),
                    grid.left - spacing.padding,
                    grid.top + row as f64 * grid.value_gap,
                    TextAnchor::End,
                )
            })
            .collect(),
        Orientation::Horizontal => texts
            .iter()
            .enumerate()
            .map(|(tick, text)| {
                PlacedLabel::new(
                    tick,
                    text.clone(),
                    grid.left + tick as f64 * grid.value_gap,
                    grid.bottom + spacing.padding,
                    TextAnchor::Middle,
                )
            })
            .collect(),
    }
}

/// Place category-axis labels.
///
/// `start` alignment anchors each label on its category line, `middle`
/// centers it in its section. A non-zero `rotation` (degrees) turns each
/// label about its anchor point.
pub fn place_name_labels(
    grid: &GridGeometry,
    texts: &[String],
    rotation: f64,
    spacing: &LabelSpacing,
) -> Vec<PlacedLabel> {
    texts
        .iter()
        .enumerate()
        .map(|(index, text)| {
            let along = grid.category_position(index);
            let (x, y, anchor) = match grid.orientation {
                Orientation::Vertical => {
                    let anchor = match grid.align {
                        NameLabelAlign::Start => TextAnchor::Start,
                        NameLabelAlign::Middle => TextAnchor::Middle,
                    };
                    (along, grid.bottom + spacing.padding, anchor)
                }
                Orientation::Horizontal => (grid.left - spacing.padding, along, TextAnchor::End),
            };

            let mut label = PlacedLabel::new(index, text.clone(), x, y, anchor);
            if rotation != 0.0 {
                label.rotation = Some(Rotation {
                    angle: rotation,
                    pivot_x: x,
                    pivot_y: y,
                });
                if grid.orientation.is_vertical() {
                    label.anchor = TextAnchor::Start;
                }
            }
            label
        })
        .collect()
}

/// How a label set is flipped for right-to-left output
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MirrorStrategy {
    /// Re-derive x as `extent - x`, flip anchors and mirror rotations
    Reposition { extent: f64 },
    /// Leave coordinates alone and toggle a `scale(-1, 1)` group transform
    Transform { translate_x: f64 },
}

/// Mirror an already-placed label set.
///
/// Both strategies are involutions: mirroring twice with the same strategy
/// restores the logical labels.
pub fn mirror_labels(labels: &[PlacedLabel], strategy: MirrorStrategy) -> Vec<PlacedLabel> {
    labels
        .iter()
        .map(|label| {
            let mut mirrored = label.clone();
            match strategy {
                MirrorStrategy::Reposition { extent } => {
                    mirrored.x = extent - label.x;
                    mirrored.anchor = label.anchor.mirrored();
                    mirrored.rotation = label.rotation.map(|r| Rotation {
                        angle: -r.angle,
                        pivot_x: extent - r.pivot_x,
                        pivot_y: r.pivot_y,
                    });
                }
                MirrorStrategy::Transform { translate_x } => {
                    mirrored.mirror = match label.mirror {
                        Some(_) => None,
                        None => Some(MirrorTransform { translate_x }),
                    };
                }
            }
            mirrored
        })
        .collect()
}
