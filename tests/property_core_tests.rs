use chart_plan::api::BandXAxis;
use chart_plan::core::{
    BandValue, ContainerSize, Interpolation, LinearScale, OrdinalScale, RawLabel,
    band_value_domain, build_line_path, combine, combine_categories, line_value_domain,
};
use chart_plan::{BandChart, Chart};
use proptest::prelude::*;

fn band_values() -> impl Strategy<Value = Vec<BandValue>> {
    prop::collection::vec((-1_000.0f64..1_000.0, 0.0f64..500.0), 1..40).prop_map(|pairs| {
        pairs
            .into_iter()
            .map(|(low, width)| BandValue::new(low, low + width))
            .collect()
    })
}

proptest! {
    #[test]
    fn combine_preserves_length_and_order(values in prop::collection::vec(-1e6f64..1e6, 1..64)) {
        let labels: Vec<String> = (0..values.len()).map(|i| format!("label-{i}")).collect();
        let points = combine(&labels, &values).expect("combine");

        prop_assert_eq!(points.len(), labels.len());
        for (index, point) in points.iter().enumerate() {
            prop_assert_eq!(&point.position, &labels[index]);
            prop_assert_eq!(point.value, values[index]);
        }
    }

    #[test]
    fn line_domain_lower_bound_is_zero(values in prop::collection::vec(0.001f64..1e6, 1..64)) {
        let labels: Vec<usize> = (0..values.len()).collect();
        let points = combine(&labels, &values).expect("combine");
        let (lo, hi) = line_value_domain(&points).expect("non-empty");

        prop_assert_eq!(lo, 0.0);
        prop_assert!(values.iter().all(|value| *value <= hi));
    }

    #[test]
    fn band_nicing_only_widens(values in band_values(), tick_count in 1usize..20) {
        let labels: Vec<RawLabel> = (0..values.len()).map(|i| RawLabel::from(format!("c{i}"))).collect();
        let series = combine_categories(&labels, &values).expect("combine");
        let (lo, hi) = band_value_domain(&series.points).expect("non-empty");

        let min_low = values.iter().map(|value| value.low).fold(f64::INFINITY, f64::min);
        let max_high = values.iter().map(|value| value.high).fold(f64::NEG_INFINITY, f64::max);
        prop_assert_eq!((lo, hi), (min_low, max_high));

        let niced = LinearScale::new((lo, hi), (300.0, 0.0)).expect("scale").nice(tick_count);
        let (niced_lo, niced_hi) = niced.domain();
        prop_assert!(niced_lo <= min_low);
        prop_assert!(niced_hi >= max_high);
    }

    #[test]
    fn ordinal_spacing_is_width_over_count(count in 1usize..60, width in 1.0f64..5_000.0, start in -500.0f64..500.0) {
        let categories: Vec<String> = (0..count).map(|i| format!("k{i}")).collect();
        let scale = OrdinalScale::new(categories, start, width).expect("scale");
        let positions = scale.positions();
        let expected = width / count as f64;

        for pair in positions.windows(2) {
            prop_assert!(((pair[1] - pair[0]) - expected).abs() <= 1e-9 * width.max(1.0));
        }
    }

    #[test]
    fn curve_builder_is_pure(values in prop::collection::vec(-1e3f64..1e3, 2..32)) {
        let xs: Vec<f64> = (0..values.len()).map(|i| i as f64).collect();
        let points = combine(&xs, &values).expect("combine");
        let x_scale = LinearScale::new((0.0, xs.len() as f64), (0.0, 640.0)).expect("x scale");
        let y_scale = LinearScale::new((-1e3, 1e3), (480.0, 0.0)).expect("y scale");

        for interpolation in [
            Interpolation::Linear,
            Interpolation::Step,
            Interpolation::StepBefore,
            Interpolation::StepAfter,
        ] {
            let first = build_line_path(&points, &x_scale, &y_scale, interpolation).expect("path");
            let second = build_line_path(&points, &x_scale, &y_scale, interpolation).expect("path");
            prop_assert_eq!(first, second);
        }
    }

    #[test]
    fn band_render_plans_are_finite(values in band_values()) {
        let labels: Vec<RawLabel> = (0..values.len()).map(|i| RawLabel::from(format!("c{i}"))).collect();
        let plan = BandChart::default()
            .with_x_axis(BandXAxis::Ordinal)
            .render(&labels, &values, ContainerSize::new(640, 480))
            .expect("render");

        prop_assert!(plan.validate().is_ok());
        prop_assert_eq!(plan.x_axis.as_ref().map(|axis| axis.ticks.len()), Some(values.len()));
    }
}
