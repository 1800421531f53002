use chart_geometry::core::{ChartData, DataSet, Entry, IndexingMode, IntRect, Viewport};
use chart_geometry::render::NullRenderer;
use chart_geometry::{ChartEngine, ChartEngineConfig, VirtualViewProvider};

fn entries(points: &[(f64, f64)]) -> Vec<Entry> {
    points
        .iter()
        .map(|(x, y)| Entry::new(*x, *y).expect("entry"))
        .collect()
}

fn engine(config: ChartEngineConfig, data: ChartData) -> ChartEngine<NullRenderer> {
    let mut engine = ChartEngine::new(NullRenderer::default(), config).expect("engine");
    engine.set_data(data);
    engine
}

fn config() -> ChartEngineConfig {
    ChartEngineConfig::new(Viewport::new(100, 100))
}

fn bar_engine() -> ChartEngine<NullRenderer> {
    let data = ChartData::bar(
        vec![
            DataSet::new("a", entries(&[(0.0, 1.0), (1.0, 2.0), (2.0, 4.0)])),
            DataSet::new("b", entries(&[(0.5, 3.0)])),
        ],
        0.5,
    )
    .expect("bar data");
    engine(config(), data)
}

fn line_engine(config: ChartEngineConfig) -> ChartEngine<NullRenderer> {
    let data = ChartData::line(vec![
        DataSet::new("a", entries(&[(0.0, 1.0), (1.0, 2.0)])),
        DataSet::new("b", entries(&[(0.0, 3.0), (2.0, 5.0)])),
    ]);
    engine(config, data)
}

#[test]
fn bar_views_follow_x_sorted_order() {
    let engine = bar_engine();

    assert_eq!(engine.virtual_view_mode(), Some(IndexingMode::SortedByX));
    assert_eq!(engine.virtual_view_ids(), vec![0, 1, 2, 3]);
    assert_eq!(engine.visible_x_range(), (0.0, 2.0));

    assert_eq!(engine.virtual_view_id_at(25.0, 50.0), Some(1));
    assert_eq!(engine.virtual_view_id_at(50.0, 50.0), Some(2));
    assert_eq!(engine.virtual_view_id_at(75.0, 50.0), None);
    assert_eq!(engine.virtual_view_id_at(150.0, 50.0), None);
}

#[test]
fn bar_bounds_span_bar_width_and_content_height() {
    let engine = bar_engine();

    assert_eq!(
        engine.bounds_for(2),
        Some(IntRect {
            left: 37,
            top: 0,
            right: 62,
            bottom: 100,
        })
    );
    assert_eq!(engine.bounds_for(4), None);
}

#[test]
fn descriptions_use_labels_and_fall_back_to_values() {
    let data = ChartData::bar(
        vec![DataSet::new(
            "sales",
            vec![
                Entry::new(0.0, 1.5).expect("entry"),
                Entry::new(1.0, 2.0).expect("entry").with_label("Q2 sales"),
            ],
        )],
        0.5,
    )
    .expect("bar data");
    let engine = engine(config(), data);

    let plain = engine.description_for(0).expect("description");
    assert_eq!(plain.text, "sales: x 0, y 1.5");
    assert!(!plain.selected);
    assert_eq!(engine.description_for(1).expect("description").text, "Q2 sales");
    assert_eq!(engine.description_for(2), None);
}

#[test]
fn click_selects_the_entry_and_marks_it_selected() {
    let mut engine = bar_engine();

    let highlight = engine.perform_click(2).expect("highlight");
    assert_eq!(highlight.x(), 1.0);
    assert_eq!(highlight.data_set_index(), 0);
    assert_eq!(engine.highlighted(), Some(highlight));

    assert!(engine.description_for(2).expect("description").selected);
    assert!(!engine.description_for(0).expect("description").selected);
    assert_eq!(engine.perform_click(9), None);
}

#[test]
fn flat_line_views_use_global_indices() {
    let engine = line_engine(config());

    assert_eq!(engine.virtual_view_mode(), Some(IndexingMode::Flat));
    assert_eq!(engine.virtual_view_ids(), vec![0, 1, 2, 3]);
    assert_eq!(engine.virtual_view_id_at(60.0, 50.0), Some(1));
    assert_eq!(engine.virtual_view_id_at(10.0, 50.0), Some(0));
    assert_eq!(
        engine.description_for(3).expect("description").text,
        "b: x 2, y 5"
    );
}

#[test]
fn grouped_line_views_use_distinct_x_values() {
    let mut engine = line_engine(config().with_line_bounds_half_width(0.5));
    engine.set_group_selection_enabled(true);

    assert_eq!(engine.virtual_view_mode(), Some(IndexingMode::Grouped));
    assert_eq!(engine.virtual_view_ids(), vec![0, 1, 2]);
    assert_eq!(engine.virtual_view_id_at(75.0, 50.0), Some(1));

    assert_eq!(engine.description_for(0).expect("description").text, "x 0: 1 to 3");
    assert_eq!(engine.description_for(2).expect("description").text, "x 2: 5");
    assert_eq!(
        engine.bounds_for(1),
        Some(IntRect {
            left: 25,
            top: 0,
            right: 75,
            bottom: 100,
        })
    );

    let highlight = engine.perform_click(2).expect("highlight");
    assert_eq!(highlight.data_set_index(), 1);
    assert_eq!(highlight.x(), 2.0);
}

#[test]
fn engine_without_data_exposes_no_views() {
    let mut engine = ChartEngine::new(NullRenderer::default(), config()).expect("engine");

    assert_eq!(engine.virtual_view_mode(), None);
    assert!(engine.virtual_view_ids().is_empty());
    assert_eq!(engine.virtual_view_id_at(10.0, 10.0), None);
    assert_eq!(engine.description_for(0), None);
    assert_eq!(engine.bounds_for(0), None);
    assert_eq!(engine.perform_click(0), None);
}

#[test]
fn full_traversal_sorts_entries_once_per_revision() {
    let points: Vec<(f64, f64)> = (0..40).map(|i| (f64::from(i), 1.0)).collect();
    let data = ChartData::bar(
        vec![
            DataSet::new("a", entries(&points)),
            DataSet::new("b", entries(&points)),
        ],
        0.4,
    )
    .expect("bar data");
    let mut engine = engine(config(), data);

    let ids = engine.virtual_view_ids();
    assert_eq!(ids.len(), 80);
    for id in &ids {
        assert!(engine.description_for(*id).is_some());
        assert!(engine.bounds_for(*id).is_some());
    }
    let x_px = engine.transformer().x_value_to_pixel(19.0);
    assert_eq!(engine.virtual_view_id_at(x_px, 50.0), Some(38));

    let stats = engine.virtual_view_cache_stats();
    assert_eq!(stats.misses, 1);
    assert!(stats.hits >= 160);

    engine.group_bars(0.0, 0.2, 0.0).expect("group");
    assert_eq!(engine.virtual_view_ids().len(), 80);
    assert!(engine.description_for(79).is_some());
    assert_eq!(engine.virtual_view_cache_stats().misses, 2);
}
