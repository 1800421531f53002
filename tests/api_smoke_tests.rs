use chart_geometry::api::{ChartEngine, ChartEngineConfig};
use chart_geometry::core::{AxisDependency, ChartData, DataSet, Entry, EntryAddress, Viewport};
use chart_geometry::render::NullRenderer;
use chart_geometry::{ChartError, VirtualViewProvider};

fn stacked_bars() -> ChartData {
    let entries = vec![
        Entry::stacked(0.0, vec![2.0, -1.0, 3.0]).expect("stacked"),
        Entry::stacked(1.0, vec![1.0, 1.0]).expect("stacked"),
        Entry::new(2.0, 4.0).expect("entry"),
    ];
    ChartData::bar(vec![DataSet::new("revenue", entries)], 0.8).expect("bar data")
}

#[test]
fn engine_smoke_flow() {
    let renderer = NullRenderer::default();
    let config = ChartEngineConfig::new(Viewport::new(800, 600)).with_fit_bars(true);
    let mut engine = ChartEngine::new(renderer, config).expect("engine init");

    engine.set_data(stacked_bars());
    let (low, high) = engine.visible_x_range();
    assert!((low + 0.4).abs() <= 1e-9);
    assert!((high - 2.4).abs() <= 1e-9);

    let left = engine.axis_range(AxisDependency::Left);
    assert_eq!(left.min, -1.0);
    assert_eq!(left.max, 5.0);

    let transformer = engine.transformer();
    let point = transformer.value_to_pixel(0.0, 4.5, AxisDependency::Left);
    let highlight = engine.highlight_at(point.x, point.y).expect("highlight");
    assert_eq!(highlight.x(), 0.0);
    assert_eq!(highlight.stack_index(), Some(2));

    let (entry, selected) = engine.selected_entry().expect("selected entry");
    assert_eq!(entry.stack_values(), Some(&[2.0, -1.0, 3.0][..]));
    assert_eq!(selected, highlight);
    assert!(engine.highlight_rect().is_some());

    engine.render().expect("render should succeed");
    let renderer = engine.renderer();
    assert_eq!(renderer.frames_rendered, 1);
    assert_eq!(renderer.last_bar_count, 6);
    assert_eq!(renderer.last_highlight_count, 1);
}

#[test]
fn tap_toggles_selection() {
    let mut engine = ChartEngine::new(
        NullRenderer::default(),
        ChartEngineConfig::new(Viewport::new(400, 300)),
    )
    .expect("engine init");
    engine.set_data(stacked_bars());

    let point = engine
        .transformer()
        .value_to_pixel(2.0, 2.0, AxisDependency::Left);
    let first = engine.tap_at(point.x, point.y);
    assert!(first.is_some());
    assert_eq!(engine.tap_at(point.x, point.y), None);
    assert_eq!(engine.highlighted(), None);

    engine.tap_at(point.x, point.y);
    engine.clear_highlight();
    assert_eq!(engine.highlighted(), None);
}

#[test]
fn missing_pointer_clears_selection() {
    let mut engine = ChartEngine::new(
        NullRenderer::default(),
        ChartEngineConfig::new(Viewport::new(400, 300)).with_max_highlight_distance_px(10.0),
    )
    .expect("engine init");
    engine.set_data(stacked_bars());

    engine
        .highlight_entry(EntryAddress::new(0, 2))
        .expect("highlight");
    assert!(engine.highlighted().is_some());

    let far = engine
        .transformer()
        .value_to_pixel(2.0, -1.0, AxisDependency::Left);
    assert_eq!(engine.highlight_at(far.x, far.y), None);
    assert_eq!(engine.highlighted(), None);
}

#[test]
fn hiding_selected_data_set_drops_selection() {
    let mut engine = ChartEngine::new(
        NullRenderer::default(),
        ChartEngineConfig::new(Viewport::new(400, 300)),
    )
    .expect("engine init");
    engine.set_data(stacked_bars());
    engine.perform_click(1).expect("click");

    engine.set_data_set_visible(0, false).expect("hide");
    assert_eq!(engine.highlighted(), None);
    assert!(matches!(
        engine.set_data_set_visible(3, true),
        Err(ChartError::IndexOutOfRange { index: 3, len: 1 })
    ));

    engine.render().expect("render");
    assert_eq!(engine.renderer().last_bar_count, 0);
}

#[test]
fn group_bars_through_engine_refits_and_reports_revision() {
    let mut engine = ChartEngine::new(
        NullRenderer::default(),
        ChartEngineConfig::new(Viewport::new(400, 300)),
    )
    .expect("engine init");
    assert_eq!(engine.group_bars(0.0, 0.1, 0.0), Err(ChartError::NoData));

    let sets = vec![
        DataSet::new("a", vec![Entry::new(0.0, 1.0).expect("entry")]),
        DataSet::new("b", vec![Entry::new(0.0, 2.0).expect("entry")]),
    ];
    engine.set_data(ChartData::bar(sets, 0.45).expect("bar data"));
    let revision = engine.group_bars(0.0, 0.1, 0.0).expect("group");

    assert_eq!(engine.data().map(ChartData::revision), Some(revision));
    let frame = engine.build_frame().expect("frame");
    assert_eq!(frame.revision, revision);
    frame.validate().expect("current buffers validate");
}

#[test]
fn viewport_controls_validate_input() {
    let mut engine = ChartEngine::new(
        NullRenderer::default(),
        ChartEngineConfig::new(Viewport::new(400, 300)),
    )
    .expect("engine init");

    engine.set_visible_x_range(0.0, 10.0).expect("range");
    engine.pan_by_value(2.0).expect("pan");
    assert_eq!(engine.visible_x_range(), (2.0, 12.0));
    engine.zoom_around_pixel(200.0, 2.0).expect("zoom");
    let (low, high) = engine.visible_x_range();
    assert!((low - 4.5).abs() <= 1e-9);
    assert!((high - 9.5).abs() <= 1e-9);

    assert!(engine.resize(0, 300).is_err());
    assert_eq!(engine.viewport().width, 400);
    engine.resize(800, 300).expect("resize");
    assert_eq!(engine.viewport().width, 800);

    engine.set_animation_phase(2.0, -1.0);
    assert_eq!(engine.animation_phase().x, 1.0);
    assert_eq!(engine.animation_phase().y, 0.0);

    let empty = ChartEngineConfig::new(Viewport::new(0, 0));
    assert!(ChartEngine::new(NullRenderer::default(), empty).is_err());
}

#[test]
fn flat_data_autoscales_into_the_content_rect() {
    let config = ChartEngineConfig::new(Viewport::new(800, 400));
    let mut engine = ChartEngine::new(NullRenderer::default(), config).expect("engine init");

    engine.set_data(ChartData::line(vec![DataSet::new(
        "flat",
        vec![
            Entry::new(0.0, 5.0).expect("entry"),
            Entry::new(1.0, 5.0).expect("entry"),
        ],
    )]));
    let left = engine.axis_range(AxisDependency::Left);
    assert!(left.min < 5.0 && left.max > 5.0);

    let frame = engine.build_frame().expect("line frame");
    for point in &frame.lines[0].points {
        assert!((point.center.y - 200.0).abs() <= 1e-9);
    }

    let zeros = vec![
        Entry::new(0.0, 0.0).expect("entry"),
        Entry::new(1.0, 0.0).expect("entry"),
    ];
    engine.set_data(ChartData::bar(vec![DataSet::new("zeros", zeros)], 0.5).expect("bar data"));
    let frame = engine.build_frame().expect("bar frame");
    for bar in &frame.bars[0].bars {
        assert!((bar.rect.top - 200.0).abs() <= 1e-9);
        assert!((bar.rect.bottom - 200.0).abs() <= 1e-9);
    }
}
