use approx::assert_relative_eq;
use chart_plan::ChartError;
use chart_plan::core::{LinearScale, OrdinalScale, PositionScale, TimeScale};
use chrono::{TimeZone, Utc};

#[test]
fn linear_scale_maps_and_inverts_inverted_ranges() {
    let scale = LinearScale::new((0.0, 5.0), (260.0, 0.0)).expect("valid scale");

    assert_eq!(scale.map(0.0), 260.0);
    assert_eq!(scale.map(5.0), 0.0);
    assert_relative_eq!(scale.map(3.0), 104.0, epsilon = 1e-9);
    assert_relative_eq!(scale.invert(104.0), 3.0, epsilon = 1e-9);
}

#[test]
fn zero_width_domain_maps_to_range_midpoint() {
    let scale = LinearScale::new((7.0, 7.0), (0.0, 100.0)).expect("valid scale");
    assert_eq!(scale.map(7.0), 50.0);
    assert_eq!(scale.position(&123.0), Some(50.0));
}

#[test]
fn linear_scale_rejects_non_finite_inputs() {
    let err = LinearScale::new((0.0, f64::NAN), (0.0, 1.0)).expect_err("nan domain");
    assert!(matches!(err, ChartError::InvalidData(_)));

    let err = LinearScale::new((0.0, 1.0), (f64::INFINITY, 0.0)).expect_err("infinite range");
    assert!(matches!(err, ChartError::InvalidData(_)));
}

#[test]
fn nice_returns_a_widened_copy() {
    let scale = LinearScale::new((0.13, 9.42), (100.0, 0.0)).expect("valid scale");
    let niced = scale.nice(10);

    assert_eq!(scale.domain(), (0.13, 9.42));
    assert_eq!(niced.domain(), (0.0, 10.0));
    assert_eq!(niced.range(), (100.0, 0.0));
}

#[test]
fn linear_ticks_and_labels_follow_step_precision() {
    let scale = LinearScale::new((0.0, 5.0), (260.0, 0.0)).expect("valid scale");
    let ticks = scale.ticks(10);

    assert_eq!(ticks.len(), 11);
    assert_eq!(ticks.first().copied(), Some(0.0));
    assert_eq!(ticks.last().copied(), Some(5.0));
    assert_eq!(scale.format_tick(2.5, 10), "2.5");
    assert_eq!(scale.format_tick(5.0, 10), "5.0");

    let wide = LinearScale::new((0.0, 12_000.0), (0.0, 1.0)).expect("valid scale");
    assert_eq!(wide.format_tick(10_000.0, 5), "10,000");
}

#[test]
fn ordinal_scale_spaces_categories_by_span_over_count() {
    let scale = OrdinalScale::new(["A", "B", "C"], 20.0, 260.0).expect("valid scale");
    let step = 260.0 / 3.0;

    assert_eq!(scale.len(), 3);
    assert_relative_eq!(scale.step(), step);
    let positions = scale.positions();
    assert_eq!(positions[0], 20.0);
    assert_relative_eq!(positions[1], 20.0 + step, epsilon = 1e-9);
    assert_relative_eq!(positions[2], 20.0 + 2.0 * step, epsilon = 1e-9);
    assert_eq!(scale.range(), (positions[0], positions[2]));
    assert_eq!(scale.position(&"D".to_owned()), None);
}

#[test]
fn ordinal_scale_rejects_negative_span() {
    let err = OrdinalScale::new(["A"], 0.0, -1.0).expect_err("negative span");
    assert!(matches!(err, ChartError::InvalidData(_)));
}

#[test]
fn empty_ordinal_scale_has_no_positions() {
    let scale = OrdinalScale::new(Vec::<String>::new(), 0.0, 100.0).expect("valid scale");
    assert!(scale.is_empty());
    assert!(scale.positions().is_empty());
    assert_eq!(scale.step(), 0.0);
}

#[test]
fn time_scale_maps_domain_ends_to_range_ends() {
    let start = Utc.with_ymd_and_hms(2012, 4, 23, 0, 0, 0).unwrap();
    let end = Utc.with_ymd_and_hms(2012, 5, 1, 0, 0, 0).unwrap();
    let scale = TimeScale::new((start, end), (0.0, 800.0)).expect("valid scale");

    assert_eq!(scale.map(start), 0.0);
    assert_eq!(scale.map(end), 800.0);
    assert_eq!(scale.invert(400.0), Some(Utc.with_ymd_and_hms(2012, 4, 27, 0, 0, 0).unwrap()));
    assert_eq!(scale.domain().expect("domain"), (start, end));
}

#[test]
fn time_ticks_land_on_midnights_for_multi_day_spans() {
    let start = Utc.with_ymd_and_hms(2012, 4, 23, 6, 0, 0).unwrap();
    let end = Utc.with_ymd_and_hms(2012, 5, 1, 18, 0, 0).unwrap();
    let scale = TimeScale::new((start, end), (0.0, 800.0)).expect("valid scale");

    let ticks = scale.ticks(10);
    assert!(!ticks.is_empty());
    for tick in &ticks {
        assert!(*tick >= start && *tick <= end);
        assert_eq!(tick.timestamp() % 86_400, 0, "tick {tick} is not a midnight");
    }
}

#[test]
fn time_nice_snaps_domain_outward_to_interval_boundaries() {
    let start = Utc.with_ymd_and_hms(2012, 4, 23, 6, 0, 0).unwrap();
    let end = Utc.with_ymd_and_hms(2012, 5, 1, 18, 0, 0).unwrap();
    let niced = TimeScale::new((start, end), (0.0, 800.0))
        .expect("valid scale")
        .nice(10);

    let (lo, hi) = niced.domain().expect("domain");
    assert_eq!(lo, Utc.with_ymd_and_hms(2012, 4, 23, 0, 0, 0).unwrap());
    assert_eq!(hi, Utc.with_ymd_and_hms(2012, 5, 2, 0, 0, 0).unwrap());
}

#[test]
fn time_tick_labels_use_the_coarsest_fitting_format() {
    let year = Utc.with_ymd_and_hms(2012, 1, 1, 0, 0, 0).unwrap();
    let month = Utc.with_ymd_and_hms(2012, 5, 1, 0, 0, 0).unwrap();
    let sunday = Utc.with_ymd_and_hms(2012, 4, 29, 0, 0, 0).unwrap();
    let friday = Utc.with_ymd_and_hms(2012, 4, 27, 0, 0, 0).unwrap();
    let noon = Utc.with_ymd_and_hms(2012, 4, 27, 12, 0, 0).unwrap();

    assert_eq!(TimeScale::format_tick(year), "2012");
    assert_eq!(TimeScale::format_tick(month), "May");
    assert_eq!(TimeScale::format_tick(sunday), "Apr 29");
    assert_eq!(TimeScale::format_tick(friday), "Fri 27");
    assert_eq!(TimeScale::format_tick(noon), "12 PM");
}
