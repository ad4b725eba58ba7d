//! Integration tests for the layout pass
//! Covers full passes from series and options to placed geometry
//!
//! These tests drive the public API the way a renderer would: build or load
//! a series, run one pass, then read points, sections and labels back.

use axis_chart::{
    section_at, ChartError, ChartLayout, ChartLayoutCalculator, DataGroup, DataPoint, FontContext,
    Formatters, LayoutOptions, LegendPosition, LocaleFormat, NameFormatter, NameLabelAlign,
    Orientation, Series, TextAnchor, TextMeasurer, ValueFormatter,
};

const WIDTH: f64 = 400.0;
const HEIGHT: f64 = 300.0;

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

fn run(series: &Series, options: &LayoutOptions) -> ChartLayout {
    run_with(series, options, &Formatters::default())
}

fn run_with(series: &Series, options: &LayoutOptions, formatters: &Formatters) -> ChartLayout {
    ChartLayoutCalculator::new()
        .calculate(series, options, formatters, WIDTH, HEIGHT)
        .expect("layout pass failed")
}

fn two_quarters() -> Series {
    Series::new(vec![DataGroup::from_values("A", [("Q1", 10.0), ("Q2", 50.0)])])
}

/// Measures every label at a fixed width
struct FixedMeasurer(f64);

impl TextMeasurer for FixedMeasurer {
    fn measure_text_width(&self, text: &str, _font: &FontContext) -> f64 {
        if text.is_empty() {
            0.0
        } else {
            self.0
        }
    }
}

#[test]
fn test_two_quarter_line_chart() {
    let layout = run(&two_quarters(), &LayoutOptions::default().with_max_ticks(5));
    let scale = layout.markers.scale;

    assert_eq!(scale.nice_min, 0.0);
    assert_eq!(scale.nice_max, 50.0);
    assert_eq!(scale.tick_spacing, 10.0);
    assert_eq!(layout.markers.scale_values, vec![0.0, 10.0, 20.0, 30.0, 40.0, 50.0]);

    let grid = &layout.grid;
    let q1 = layout.points[0][0];
    let q2 = layout.points[0][1];
    assert!(approx(q2.top, grid.top));
    assert!(approx(q1.top, grid.bottom - 0.2 * grid.height()));
    assert_eq!(q1.left, grid.left);
    assert!(approx(q2.left, grid.right));

    let texts: Vec<&str> = layout.value_labels.iter().map(|l| l.text.as_str()).collect();
    assert_eq!(texts, vec!["50", "40", "30", "20", "10", "0"]);
    let names: Vec<&str> = layout.name_labels.iter().map(|l| l.text.as_str()).collect();
    assert_eq!(names, vec!["Q1", "Q2"]);
}

#[test]
fn test_stacked_scale_follows_group_totals() {
    let series = Series::new(vec![
        DataGroup::from_values("A", [("x", 1.0), ("y", 2.0)]),
        DataGroup::from_values("B", [("x", 3.0), ("y", 4.0)]),
    ]);

    let unstacked = run(&series, &LayoutOptions::default());
    let stacked = run(&series, &LayoutOptions::default().with_stacked(true));

    assert_eq!(unstacked.markers.max, 4.0);
    assert_eq!(unstacked.markers.scale.nice_max, 4.0);
    assert_eq!(stacked.markers.group_totals, vec![3.0, 7.0]);
    assert_eq!(stacked.markers.scale.nice_max, 7.0);
    assert_eq!(stacked.points.len(), 2);
}

#[test]
fn test_negative_values_keep_zero_inside() {
    let series = Series::new(vec![DataGroup::from_values("A", [("a", -13.0), ("b", 27.0)])]);
    let layout = run(&series, &LayoutOptions::default());
    let scale = layout.markers.scale;

    assert_eq!((scale.nice_min, scale.nice_max, scale.tick_spacing), (-15.0, 30.0, 5.0));
    assert!(layout.markers.scale_values.contains(&0.0));
    assert!(layout.points[0][0].top > layout.points[0][1].top);
}

#[test]
fn test_missing_values_are_padded() {
    let series = Series::new(vec![
        DataGroup::from_values("A", [("a", 5.0), ("b", 10.0), ("c", 20.0)]),
        DataGroup::new("B", vec![DataPoint::new("a", 8.0), DataPoint::missing("b")]),
    ]);
    let layout = run(&series, &LayoutOptions::default());

    assert_eq!(layout.points[1].len(), 3);
    let gap = layout.points[1][1];
    assert!(!gap.defined);
    assert_eq!(gap.value, 0.0);
    assert!(approx(gap.top, layout.grid.bottom));
    assert!(!layout.points[1][2].defined);
}

#[test]
fn test_horizontal_bar_layout() {
    let options = LayoutOptions::default()
        .with_max_ticks(5)
        .with_orientation(Orientation::Horizontal)
        .with_alignment(NameLabelAlign::Middle);
    let layout = run(&two_quarters(), &options);
    let grid = &layout.grid;

    let q2 = layout.points[0][1];
    assert!(approx(q2.left, grid.right));
    assert!(approx(layout.points[0][0].left, grid.left + 0.2 * grid.width()));
    assert!(approx(layout.points[0][0].top, grid.top + grid.height() / 4.0));

    assert_eq!(layout.sections.len(), 2);
    assert!(approx(layout.sections[1].end(), grid.bottom));
    for label in &layout.name_labels {
        assert_eq!(label.anchor, TextAnchor::End);
        assert!(label.x < grid.left);
    }
}

#[test]
fn test_sections_support_hit_testing() {
    let options = LayoutOptions::default().with_alignment(NameLabelAlign::Middle);
    let layout = run(&two_quarters(), &options);

    for point in &layout.points[0] {
        assert_eq!(section_at(&layout.sections, point.left), Some(point.category_index));
    }
    assert_eq!(section_at(&layout.sections, 0.0), None);

    let (start, size) = layout.sections[0].group_slot(1, 2, 4.0);
    assert!(start > layout.sections[0].start);
    assert!(start + size <= layout.sections[0].end() + 1e-9);
}

#[test]
fn test_rtl_layout() {
    let ltr = run(&two_quarters(), &LayoutOptions::default());
    let rtl = run(&two_quarters(), &LayoutOptions::default().with_rtl(true));

    assert_eq!(ltr.points, rtl.points);
    assert_eq!(ltr.sections, rtl.sections);

    for (logical, mirrored) in ltr.value_labels.iter().zip(&rtl.value_labels) {
        assert_eq!(logical.anchor, TextAnchor::End);
        assert_eq!(mirrored.anchor, TextAnchor::Start);
        assert_eq!(logical.y, mirrored.y);
    }
    for (logical, mirrored) in ltr.name_labels.iter().zip(&rtl.name_labels) {
        assert!(approx(mirrored.rendered_x(), WIDTH - logical.x));
    }
}

#[test]
fn test_rtl_horizontal_mirrors_name_gutter() {
    let options = LayoutOptions::default().with_orientation(Orientation::Horizontal);
    let ltr = run(&two_quarters(), &options);
    let rtl = run(&two_quarters(), &options.clone().with_rtl(true));

    let gutter_start = ltr.grid.left - ltr.grid.text_widths.name_axis;
    assert!(approx(gutter_start, 15.0));
    assert!(approx(rtl.name_labels[0].x, gutter_start + ltr.grid.left - ltr.name_labels[0].x));
    assert!(approx(rtl.name_labels[0].x, gutter_start + 5.0));
    assert_eq!(rtl.name_labels[0].anchor, TextAnchor::Start);
    assert!(rtl.value_labels[0].mirror.is_some());
}

#[test]
fn test_margins_and_legend() {
    let with_legend = run(
        &two_quarters(),
        &LayoutOptions::default().with_legend(LegendPosition::Right, 80.0),
    );
    let plain = run(&two_quarters(), &LayoutOptions::default());
    assert!(approx(plain.grid.right - with_legend.grid.right, 90.0));

    let fixed = run(
        &two_quarters(),
        &LayoutOptions::default().with_margins(axis_chart::Insets::new(20.0, 30.0, 40.0, 50.0)),
    );
    // the override replaces the outer insets; label gutters still come on top
    assert_eq!((fixed.grid.top, fixed.grid.right), (20.0, 370.0));
    assert!(approx(fixed.grid.bottom, 260.0 - fixed.grid.text_widths.name_axis));
    assert!(approx(fixed.grid.left, 50.0 + fixed.grid.text_widths.value_axis));
    assert!(approx(fixed.grid.left, 69.4));
}

#[test]
fn test_rtl_with_left_legend_stays_on_canvas() {
    let options = LayoutOptions::default()
        .with_legend(LegendPosition::Left, 100.0)
        .with_rtl(true);
    let layout = run(&two_quarters(), &options);
    let grid = &layout.grid;

    for label in &layout.value_labels {
        assert!(label.x >= grid.left - grid.text_widths.value_axis);
        assert!(label.x <= grid.left);
        assert_eq!(label.anchor, TextAnchor::Start);
    }
}

#[test]
fn test_custom_measurer_sizes_gutters() {
    let layout = ChartLayoutCalculator::new()
        .with_measurer(FixedMeasurer(40.0))
        .calculate(
            &two_quarters(),
            &LayoutOptions::default(),
            &Formatters::default(),
            WIDTH,
            HEIGHT,
        )
        .unwrap();

    assert_eq!(layout.grid.text_widths.value_axis, 45.0);
    assert_eq!(layout.grid.left, 60.0);
}

#[test]
fn test_formatters() {
    let series = Series::new(vec![DataGroup::from_values("A", [("jan", 1500.0), ("feb", 3000.0)])]);
    let formatters = Formatters {
        value: ValueFormatter::Locale(LocaleFormat::from_name("de").unwrap()),
        name: NameFormatter::callback(|name, ctx| format!("{}. {}", ctx.index + 1, name)),
    };
    let layout = run_with(&series, &LayoutOptions::default(), &formatters);

    assert_eq!(layout.value_labels[0].text, "3.000");
    assert_eq!(layout.name_labels[1].text, "2. feb");
}

#[test]
fn test_json_inputs() {
    let series = Series::from_json(
        r##"[
            {"name": "Sales", "color": "#4472C4", "data": [
                {"name": "Q1", "value": 10},
                {"name": "Q2", "value": 50},
                {"name": "Q3"}
            ]}
        ]"##,
    )
    .unwrap();
    let options = LayoutOptions::from_json(
        r#"{"maxTicks": 5, "orientation": "horizontal",
            "alignNameLabels": "middle", "isRtl": true}"#,
    )
    .unwrap();

    assert_eq!(options.orientation, Orientation::Horizontal);
    assert_eq!(series.groups[0].color.map(|c| c.to_hex()), Some("#4472C4".to_string()));
    let layout = run(&series, &options);

    assert_eq!(layout.markers.marker_count, 3);
    assert_eq!(layout.markers.scale.nice_max, 50.0);
    assert!(!layout.points[0][2].defined);
}

#[test]
fn test_invalid_inputs_are_rejected() {
    let bad_options = LayoutOptions::default().with_max_ticks(1);
    let result = ChartLayoutCalculator::new().calculate(
        &two_quarters(),
        &bad_options,
        &Formatters::default(),
        WIDTH,
        HEIGHT,
    );
    assert!(matches!(result, Err(ChartError::InvalidConfig(_))));

    let series = Series::new(vec![DataGroup::from_values("A", [("x", f64::INFINITY)])]);
    let result = ChartLayoutCalculator::new().calculate(
        &series,
        &LayoutOptions::default(),
        &Formatters::default(),
        WIDTH,
        HEIGHT,
    );
    assert!(matches!(result, Err(ChartError::InvalidData(_))));

    assert!(matches!(
        Series::from_json("{not json"),
        Err(ChartError::Serialization(_))
    ));
}

#[test]
fn test_layout_json_output() {
    let layout = run(&two_quarters(), &LayoutOptions::default().with_rotation(45.0));
    let value: serde_json::Value = serde_json::from_str(&layout.to_json().unwrap()).unwrap();

    assert_eq!(value["markers"]["markerCount"], 2);
    assert_eq!(value["markers"]["scale"]["niceMax"], 50.0);
    assert_eq!(value["points"][0][1]["categoryIndex"], 1);
    assert_eq!(value["nameLabels"][0]["rotation"]["angle"], 45.0);
    assert!(value["valueLabels"][0].get("rotation").is_none());
}
