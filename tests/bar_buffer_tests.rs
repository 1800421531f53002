use approx::assert_abs_diff_eq;
use chart_geometry::ChartError;
use chart_geometry::core::{
    AnimationPhase, AxisDependency, AxisRange, BarBufferBuilder, BarBufferOptions, BarDirection,
    ChartData, CoordinateTransformer, DataSet, Entry, PixelRect, RoundedEdge, Viewport,
    clamp_bar_height,
};
use chart_geometry::interaction::Highlight;

fn viewport() -> Viewport {
    Viewport::new(100, 100)
        .with_visible_x_range(0.0, 10.0)
        .expect("valid range")
}

fn transformer(y_min: f64, y_max: f64) -> CoordinateTransformer {
    CoordinateTransformer::new(
        viewport(),
        AxisRange::new(y_min, y_max).expect("axis"),
        AxisRange::default(),
    )
}

fn bars(set: DataSet) -> ChartData {
    ChartData::bar(vec![set], 1.0).expect("bar data")
}

fn stacked_set() -> DataSet {
    DataSet::new(
        "stack",
        vec![Entry::stacked(5.0, vec![2.0, -1.0, 3.0]).expect("stacked")],
    )
}

#[test]
fn plain_bar_spans_baseline_to_value() {
    let data = bars(DataSet::new("s", vec![Entry::new(2.0, 5.0).expect("entry")]));
    let t = transformer(0.0, 10.0);
    let buffer = BarBufferBuilder::new(&data, &t, viewport())
        .build(0, BarBufferOptions::default())
        .expect("buffer");

    assert_eq!(buffer.len(), 1);
    let bar = buffer.bars[0];
    assert_eq!(bar.entry_index, 0);
    assert_eq!(bar.stack_index, None);
    assert_eq!(bar.direction, BarDirection::Up);
    assert_abs_diff_eq!(bar.rect.left, 15.0, epsilon = 1e-9);
    assert_abs_diff_eq!(bar.rect.right, 25.0, epsilon = 1e-9);
    assert_abs_diff_eq!(bar.rect.top, 50.0, epsilon = 1e-9);
    assert_abs_diff_eq!(bar.rect.bottom, 100.0, epsilon = 1e-9);
}

#[test]
fn stacked_entry_emits_one_rect_per_value_in_stack_order() {
    let data = bars(stacked_set());
    let t = transformer(-5.0, 5.0);
    let buffer = BarBufferBuilder::new(&data, &t, viewport())
        .build(0, BarBufferOptions::default())
        .expect("buffer");

    assert_eq!(buffer.len(), 3);
    let slices: Vec<_> = buffer.bars.iter().map(|bar| bar.stack_index).collect();
    assert_eq!(slices, vec![Some(0), Some(1), Some(2)]);

    let expected = [
        (30.0, 50.0, BarDirection::Up),
        (50.0, 60.0, BarDirection::Down),
        (0.0, 30.0, BarDirection::Up),
    ];
    for (bar, (top, bottom, direction)) in buffer.bars.iter().zip(expected) {
        assert_abs_diff_eq!(bar.rect.top, top, epsilon = 1e-9);
        assert_abs_diff_eq!(bar.rect.bottom, bottom, epsilon = 1e-9);
        assert_eq!(bar.direction, direction);
    }
    assert_eq!(buffer.bars_for_entry(0).len(), 3);
    assert!(buffer.bars_for_entry(1).is_empty());
}

#[test]
fn inverted_axis_flips_bar_direction() {
    let data = bars(DataSet::new("s", vec![Entry::new(2.0, 5.0).expect("entry")]));
    let t = CoordinateTransformer::new(
        viewport(),
        AxisRange::new(0.0, 10.0).expect("axis").with_inverted(true),
        AxisRange::default(),
    );
    let buffer = BarBufferBuilder::new(&data, &t, viewport())
        .build(0, BarBufferOptions::default())
        .expect("buffer");

    let bar = buffer.bars[0];
    assert_eq!(bar.direction, BarDirection::Down);
    assert_abs_diff_eq!(bar.rect.top, 0.0, epsilon = 1e-9);
    assert_abs_diff_eq!(bar.rect.bottom, 50.0, epsilon = 1e-9);
}

#[test]
fn thin_bars_are_clamped_away_from_baseline() {
    let set = DataSet::new(
        "s",
        vec![
            Entry::new(2.0, 0.1).expect("entry"),
            Entry::new(3.0, 0.0).expect("entry"),
            Entry::new(4.0, 5.0).expect("entry"),
        ],
    )
    .with_min_bar_height(4.0)
    .expect("min height");
    let data = bars(set);
    let t = transformer(0.0, 10.0);
    let buffer = BarBufferBuilder::new(&data, &t, viewport())
        .build(0, BarBufferOptions::default())
        .expect("buffer");

    let thin = buffer.bars[0];
    assert_abs_diff_eq!(thin.rect.top, 96.0, epsilon = 1e-9);
    assert_abs_diff_eq!(thin.rect.bottom, 100.0, epsilon = 1e-9);

    let zero = buffer.bars[1];
    assert_eq!(zero.rect.height(), 0.0);

    let tall = buffer.bars[2];
    assert_abs_diff_eq!(tall.rect.top, 50.0, epsilon = 1e-9);

    let again = clamp_bar_height(thin.rect, thin.direction, 4.0);
    assert_eq!(again, thin.rect);
}

#[test]
fn clamp_grows_downward_bars_toward_screen_bottom() {
    let rect = PixelRect::new(0.0, 10.0, 5.0, 11.0);
    let clamped = clamp_bar_height(rect, BarDirection::Down, 3.0);

    assert_eq!(clamped.top, 10.0);
    assert_eq!(clamped.bottom, 13.0);
}

#[test]
fn only_the_outermost_slice_is_rounded() {
    let set = DataSet::new(
        "s",
        vec![
            Entry::stacked(2.0, vec![2.0, -1.0, 3.0]).expect("stacked"),
            Entry::stacked(5.0, vec![-1.0, -2.0]).expect("stacked"),
        ],
    )
    .with_corner_radius(2.0)
    .expect("radius");
    let data = bars(set);
    let t = transformer(-5.0, 5.0);
    let buffer = BarBufferBuilder::new(&data, &t, viewport())
        .build(0, BarBufferOptions::default())
        .expect("buffer");

    let rounded: Vec<_> = buffer
        .bars
        .iter()
        .filter_map(|bar| {
            bar.rounding
                .map(|rounding| (bar.entry_index, bar.stack_index, rounding.edge))
        })
        .collect();
    assert_eq!(
        rounded,
        vec![
            (0, Some(2), RoundedEdge::Top),
            (1, Some(0), RoundedEdge::Bottom),
        ]
    );

    let farthest = buffer.bars_for_entry(1)[0];
    assert_abs_diff_eq!(farthest.rect.bottom, 80.0, epsilon = 1e-9);
}

#[test]
fn empty_data_set_yields_empty_buffer() {
    let data = bars(DataSet::new("empty", Vec::new()));
    let t = transformer(0.0, 10.0);
    let buffer = BarBufferBuilder::new(&data, &t, viewport())
        .build(0, BarBufferOptions::default())
        .expect("buffer");

    assert!(buffer.is_empty());
    assert!(buffer.shadows.is_empty());
}

#[test]
fn builder_rejects_line_data_and_unknown_sets() {
    let line = ChartData::line(vec![DataSet::new("s", Vec::new())]);
    let t = transformer(0.0, 10.0);
    assert_eq!(
        BarBufferBuilder::new(&line, &t, viewport()).build(0, BarBufferOptions::default()),
        Err(ChartError::NotBarData)
    );

    let data = bars(DataSet::new("s", Vec::new()));
    assert!(matches!(
        BarBufferBuilder::new(&data, &t, viewport()).build(3, BarBufferOptions::default()),
        Err(ChartError::IndexOutOfRange { index: 3, len: 1 })
    ));
}

fn wide_set() -> DataSet {
    let entries = (0..=20)
        .map(|x| Entry::new(f64::from(x), 1.0).expect("entry"))
        .collect();
    DataSet::new("wide", entries)
}

#[test]
fn only_visible_window_is_laid_out() {
    let data = bars(wide_set());
    let t = transformer(0.0, 10.0);
    let builder = BarBufferBuilder::new(&data, &t, viewport());

    let buffer = builder.build(0, BarBufferOptions::default()).expect("buffer");
    assert_eq!(buffer.len(), 12);
    assert_eq!(buffer.bars.first().map(|bar| bar.entry_index), Some(0));
    assert_eq!(buffer.bars.last().map(|bar| bar.entry_index), Some(11));

    let half = BarBufferOptions {
        phase: AnimationPhase::new(0.5, 1.0),
        ..BarBufferOptions::default()
    };
    assert_eq!(builder.build(0, half).expect("buffer").len(), 6);
}

#[test]
fn phase_y_scales_bar_height() {
    let data = bars(DataSet::new("s", vec![Entry::new(2.0, 5.0).expect("entry")]));
    let t = transformer(0.0, 10.0);
    let options = BarBufferOptions {
        phase: AnimationPhase::new(1.0, 0.5),
        ..BarBufferOptions::default()
    };
    let buffer = BarBufferBuilder::new(&data, &t, viewport())
        .build(0, options)
        .expect("buffer");

    assert_abs_diff_eq!(buffer.bars[0].rect.top, 75.0, epsilon = 1e-9);
}

#[test]
fn shadows_and_width_scale() {
    let data = bars(DataSet::new(
        "s",
        vec![Entry::new(2.0, 5.0).expect("entry"), Entry::new(4.0, 1.0).expect("entry")],
    ));
    let t = transformer(0.0, 10.0);
    let options = BarBufferOptions {
        width_scale: 0.5,
        draw_shadow: true,
        ..BarBufferOptions::default()
    };
    let buffer = BarBufferBuilder::new(&data, &t, viewport())
        .build(0, options)
        .expect("buffer");

    assert_eq!(buffer.shadows.len(), 2);
    assert_eq!(buffer.shadows[0].top, 0.0);
    assert_eq!(buffer.shadows[0].bottom, 100.0);
    assert_abs_diff_eq!(buffer.bars[0].rect.width(), 5.0, epsilon = 1e-9);
}

#[test]
fn single_entry_buffer_and_hidden_sets() {
    let hidden =
        DataSet::new("hidden", vec![Entry::new(1.0, 1.0).expect("entry")]).with_visible(false);
    let data = ChartData::bar(vec![wide_set(), hidden], 1.0).expect("bar data");
    let t = transformer(0.0, 10.0);
    let builder = BarBufferBuilder::new(&data, &t, viewport());

    let single = builder
        .build_for_entry(0, 3, BarBufferOptions::default())
        .expect("buffer");
    assert_eq!(single.len(), 1);
    assert_eq!(single.bars[0].entry_index, 3);
    assert!(builder.build_for_entry(0, 99, BarBufferOptions::default()).is_err());

    let all = builder.build_all(BarBufferOptions::default()).expect("buffers");
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].data_set_index, 0);
}

#[test]
fn highlight_rect_outlines_slice_or_whole_bar() {
    let data = bars(stacked_set());
    let t = transformer(-5.0, 5.0);
    let builder = BarBufferBuilder::new(&data, &t, viewport());
    let highlight =
        Highlight::new(5.0, 4.0, 50.0, 0.0, 0, AxisDependency::Left).with_stack_index(Some(2));

    let slice = builder
        .highlight_rect(&highlight, false, BarBufferOptions::default())
        .expect("slice rect");
    assert_abs_diff_eq!(slice.top, 0.0, epsilon = 1e-9);
    assert_abs_diff_eq!(slice.bottom, 30.0, epsilon = 1e-9);
    assert_abs_diff_eq!(slice.left, 45.0, epsilon = 1e-9);

    let whole = builder
        .highlight_rect(&highlight, true, BarBufferOptions::default())
        .expect("whole rect");
    assert_abs_diff_eq!(whole.top, 0.0, epsilon = 1e-9);
    assert_abs_diff_eq!(whole.bottom, 60.0, epsilon = 1e-9);

    let hidden_phase = BarBufferOptions {
        phase: AnimationPhase::new(0.0, 1.0),
        ..BarBufferOptions::default()
    };
    assert_eq!(builder.highlight_rect(&highlight, false, hidden_phase), None);
}

#[test]
fn buffers_carry_the_data_revision() {
    let mut data = ChartData::bar(vec![wide_set(), wide_set()], 0.4).expect("bar data");
    let revision = data.group_bars(0.0, 0.2, 0.0).expect("grouped");
    assert_eq!(data.revision(), revision);

    let t = transformer(0.0, 10.0);
    let buffers = BarBufferBuilder::new(&data, &t, viewport())
        .build_all(BarBufferOptions::default())
        .expect("buffers");
    assert!(buffers.iter().all(|buffer| buffer.revision == revision));
}
