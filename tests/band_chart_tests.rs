use approx::assert_relative_eq;
use chart_plan::api::{BandXAxis, ChartConfigOverrides, MAX_TICK_COUNT, ORDINAL_BAND_NICE_COUNT};
use chart_plan::core::{
    BandValue, ContainerSize, DateLabelFormat, Interpolation, InvalidLabelPolicy, Margin, RawLabel,
};
use chart_plan::render::{ChartKind, PathGeometry, TickValue};
use chart_plan::{BandChart, Chart, ChartError};

fn labels(items: &[&str]) -> Vec<RawLabel> {
    items.iter().copied().map(RawLabel::from).collect()
}

fn small_chart() -> BandChart {
    BandChart::new(
        &ChartConfigOverrides::new()
            .with_size(300.0, 300.0)
            .with_margin(Margin::uniform(20.0)),
    )
}

fn abc_values() -> Vec<BandValue> {
    vec![
        BandValue::new(1.0, 3.0),
        BandValue::new(2.0, 5.0),
        BandValue::new(0.0, 4.0),
    ]
}

#[test]
fn ordinal_band_scenario_matches_expected_geometry() {
    let chart = small_chart().with_x_axis(BandXAxis::Ordinal);
    let plan = chart
        .render(&labels(&["A", "B", "C"]), &abc_values(), ContainerSize::new(300, 300))
        .expect("band render");

    assert_eq!(plan.kind, ChartKind::Band);
    assert_eq!(plan.inner_width, 260.0);
    assert_eq!(plan.inner_height, 260.0);
    assert_eq!(plan.viewport.min_x, -20.0);
    assert_eq!(plan.viewport.min_y, -10.0);

    let y_axis = plan.y_axis.as_ref().expect("y axis");
    assert_eq!(y_axis.ticks.first().map(|tick| &tick.value), Some(&TickValue::Number(0.0)));
    assert_eq!(y_axis.ticks.last().map(|tick| &tick.value), Some(&TickValue::Number(5.0)));

    let x_axis = plan.x_axis.as_ref().expect("x axis");
    let offsets: Vec<f64> = x_axis.ticks.iter().map(|tick| tick.offset).collect();
    assert_eq!(offsets.len(), 3);
    assert_relative_eq!(offsets[1] - offsets[0], 260.0 / 3.0, epsilon = 1e-9);
    assert_relative_eq!(offsets[2] - offsets[1], 260.0 / 3.0, epsilon = 1e-9);
    assert_eq!(offsets[0], 20.0);

    let [PathGeometry::Envelope(envelope)] = plan.paths.as_slice() else {
        panic!("expected one band envelope, got {:?}", plan.paths);
    };
    // step interpolation: first anchor, two vertices per gap, last anchor
    assert_eq!(envelope.upper.len(), 6);
    assert_eq!(envelope.lower.len(), 6);
    assert_eq!(envelope.upper[0].x, 20.0);
    assert_relative_eq!(envelope.upper[0].y, 104.0, epsilon = 1e-9);
    assert_relative_eq!(envelope.lower[0].y, 208.0, epsilon = 1e-9);
    assert_eq!(envelope.outline().len(), 13);
}

#[test]
fn shape_mismatch_fails_before_any_geometry() {
    let err = small_chart()
        .render(
            &labels(&["A", "B", "C"]),
            &abc_values()[..2],
            ContainerSize::new(300, 300),
        )
        .expect_err("3 labels, 2 values");
    assert_eq!(err, ChartError::ShapeMismatch { labels: 3, values: 2 });
}

#[test]
fn time_axis_is_the_default_for_band_charts() {
    let chart = BandChart::default();
    assert_eq!(chart.x_axis(), BandXAxis::Time);
    assert_eq!(chart.interpolation(), Interpolation::Step);

    let plan = chart
        .render(
            &labels(&["2021-01-01", "2021-01-02", "2021-01-03"]),
            &abc_values(),
            ContainerSize::new(879, 804),
        )
        .expect("band render");

    let x_axis = plan.x_axis.as_ref().expect("x axis");
    assert!(matches!(x_axis.ticks[0].value, TickValue::Time(_)));
    assert_eq!(x_axis.ticks.first().map(|tick| tick.offset), Some(0.0));
    assert_eq!(x_axis.ticks.last().map(|tick| tick.offset), Some(779.0));
    assert_eq!(plan.x_gridlines.as_ref().map(|grid| grid.lines.len()), Some(x_axis.ticks.len()));
}

#[test]
fn niced_y_domain_never_narrows_the_band() {
    let values = vec![BandValue::new(0.37, 2.2), BandValue::new(1.1, 9.61)];
    let plan = BandChart::default()
        .with_x_axis(BandXAxis::Ordinal)
        .render(&labels(&["x", "y"]), &values, ContainerSize::new(400, 400))
        .expect("band render");

    let y_axis = plan.y_axis.as_ref().expect("y axis");
    let TickValue::Number(lowest) = y_axis.ticks[0].value else {
        panic!("numeric y ticks expected");
    };
    assert!(lowest <= 0.37);
    // niced domain [0, 10] puts the top tick at the top of the plot
    assert_eq!(y_axis.ticks.last().map(|tick| tick.offset), Some(0.0));
}

#[test]
fn unparseable_labels_are_rejected_by_default() {
    let err = BandChart::default()
        .render(
            &labels(&["2021-01-01", "not a date", "2021-01-03"]),
            &abc_values(),
            ContainerSize::default(),
        )
        .expect_err("bad date label");
    assert_eq!(
        err,
        ChartError::InvalidLabelFormat {
            index: 1,
            label: "not a date".to_owned()
        }
    );
}

#[test]
fn skip_policy_reports_dropped_labels_in_the_plan() {
    let plan = BandChart::default()
        .with_label_policy(InvalidLabelPolicy::Skip)
        .render(
            &labels(&["2021-01-01", "not a date", "2021-01-03"]),
            &abc_values(),
            ContainerSize::default(),
        )
        .expect("band render");

    assert_eq!(plan.skipped_labels, vec![1]);
    assert_eq!(plan.vertex_count(), 8);
}

#[test]
fn explicit_date_pattern_is_honoured() {
    let plan = BandChart::default()
        .with_date_format(DateLabelFormat::pattern("%d/%m/%Y"))
        .with_interpolation(Interpolation::Linear)
        .render(
            &labels(&["01/02/2020", "15/02/2020", "29/02/2020"]),
            &abc_values(),
            ContainerSize::default(),
        )
        .expect("band render");
    assert_eq!(plan.vertex_count(), 6);
}

#[test]
fn empty_series_yields_an_empty_plan() {
    let plan = small_chart()
        .render(&[], &[], ContainerSize::new(300, 300))
        .expect("empty render");

    assert!(plan.is_blank());
    assert!(plan.x_axis.is_none());
    assert!(plan.paths.is_empty());
    assert_eq!(plan.viewport.width, 300.0);
}

#[test]
fn inverted_band_fails_the_pass() {
    let err = small_chart()
        .with_x_axis(BandXAxis::Ordinal)
        .render(
            &labels(&["A", "B"]),
            &[BandValue::new(1.0, 3.0), BandValue::new(4.0, 2.0)],
            ContainerSize::default(),
        )
        .expect_err("low above high");
    assert!(matches!(err, ChartError::InvertedBand { index: 1, .. }));
}

#[test]
fn degenerate_configuration_is_an_error() {
    let err = BandChart::new(&ChartConfigOverrides::new().with_size(100.0, 100.0))
        .with_x_axis(BandXAxis::Ordinal)
        .render(&labels(&["A"]), &abc_values()[..1], ContainerSize::default())
        .expect_err("margins eat the plot");
    assert!(matches!(err, ChartError::DegenerateLayout { .. }));
}

#[test]
fn axis_titles_are_emitted_when_configured() {
    let chart = BandChart::new(&ChartConfigOverrides::new().with_axis_labels("Month", "Range"))
        .with_x_axis(BandXAxis::Ordinal);
    let plan = chart
        .render(&labels(&["A", "B", "C"]), &abc_values(), ContainerSize::default())
        .expect("band render");

    let texts: Vec<&str> = plan.titles.iter().map(|title| title.text.as_str()).collect();
    assert_eq!(texts, vec!["Month", "Range"]);
}

#[test]
fn oversized_tick_hint_is_clamped() {
    let chart = BandChart::new(&ChartConfigOverrides::new().with_tick_count(2_000_000))
        .with_x_axis(BandXAxis::Ordinal);
    assert_eq!(chart.config().resolved_tick_count(), MAX_TICK_COUNT);

    let plan = chart
        .render(
            &labels(&["A", "B"]),
            &[BandValue::new(0.0, 1.0), BandValue::new(2.0, 5.0)],
            ContainerSize::default(),
        )
        .expect("band render");

    let gridlines = plan.y_gridlines.as_ref().map_or(0, |grid| grid.lines.len());
    assert!(gridlines <= MAX_TICK_COUNT + 1, "{gridlines} gridlines");
    assert!(plan.y_axis.as_ref().is_some_and(|axis| axis.ticks.len() <= MAX_TICK_COUNT + 1));
}

#[test]
fn ordinal_band_nices_with_five_unless_a_hint_is_set() {
    let values = vec![BandValue::new(1.3, 4.0), BandValue::new(2.0, 8.6)];
    let y_extent = |chart: &BandChart| {
        let plan = chart
            .render(&labels(&["p", "q"]), &values, ContainerSize::default())
            .expect("band render");
        let ticks = &plan.y_axis.as_ref().expect("y axis").ticks;
        (ticks[0].value.clone(), ticks[ticks.len() - 1].value.clone())
    };

    let ordinal = BandChart::default().with_x_axis(BandXAxis::Ordinal);
    assert_eq!(ordinal.nice_count(), ORDINAL_BAND_NICE_COUNT);
    assert_eq!(
        y_extent(&ordinal),
        (TickValue::Number(0.0), TickValue::Number(10.0))
    );

    let hinted = BandChart::new(&ChartConfigOverrides::new().with_tick_count(10))
        .with_x_axis(BandXAxis::Ordinal);
    assert_eq!(hinted.nice_count(), 10);
    assert_eq!(
        y_extent(&hinted),
        (TickValue::Number(1.0), TickValue::Number(9.0))
    );

    assert_eq!(BandChart::default().nice_count(), 10);
}
