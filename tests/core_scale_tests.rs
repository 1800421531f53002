use chart_geometry::core::LinearScale;

#[test]
fn linear_scale_round_trip() {
    let scale = LinearScale::new(0.0, 10_000.0, 0.0, 1_920.0).expect("valid scale");

    let px = scale.value_to_pixel(4_321.123);
    let back = scale.pixel_to_value(px);

    assert!((back - 4_321.123).abs() <= 1e-9);
    assert!((scale.pixels_per_unit() - 0.192).abs() <= 1e-12);
}

#[test]
fn reversed_pixel_range_grows_upward() {
    let scale = LinearScale::new(0.0, 100.0, 500.0, 0.0).expect("valid scale");

    assert_eq!(scale.value_to_pixel(0.0), 500.0);
    assert_eq!(scale.value_to_pixel(100.0), 0.0);
    assert!(scale.pixels_per_unit() < 0.0);
    assert_eq!(scale.range(), (500.0, 0.0));
    assert_eq!(scale.domain(), (0.0, 100.0));
}

#[test]
fn degenerate_scales_map_as_identity() {
    let flat_domain = LinearScale::new(5.0, 5.0, 0.0, 100.0).expect("flat domain accepted");
    let flat_range = LinearScale::new(0.0, 1.0, 40.0, 40.0).expect("flat range accepted");

    for scale in [flat_domain, flat_range, LinearScale::identity()] {
        assert!(scale.is_degenerate());
        assert_eq!(scale.value_to_pixel(12.5), 12.5);
        assert_eq!(scale.pixel_to_value(-3.0), -3.0);
        assert_eq!(scale.pixels_per_unit(), 1.0);
    }
}

#[test]
fn non_finite_bounds_are_rejected() {
    assert!(LinearScale::new(f64::NAN, 1.0, 0.0, 1.0).is_err());
    assert!(LinearScale::new(0.0, f64::INFINITY, 0.0, 1.0).is_err());
    assert!(LinearScale::new(0.0, 1.0, f64::NEG_INFINITY, 1.0).is_err());
}
