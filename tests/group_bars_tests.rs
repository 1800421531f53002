use approx::assert_abs_diff_eq;
use chart_geometry::ChartError;
use chart_geometry::core::{ChartData, DataRevision, DataSet, Entry};

fn set(label: &str, count: usize) -> DataSet {
    let entries = (0..count)
        .map(|index| Entry::new(index as f64 * 10.0, 1.0).expect("entry"))
        .collect();
    DataSet::new(label, entries)
}

fn xs(data: &ChartData, data_set_index: usize) -> Vec<f64> {
    data.data_set(data_set_index)
        .expect("data set")
        .entries()
        .iter()
        .map(Entry::x)
        .collect()
}

#[test]
fn bars_are_centered_in_their_slots() {
    let mut data = ChartData::bar(vec![set("a", 2), set("b", 2)], 0.4).expect("bar data");
    assert_abs_diff_eq!(data.group_width(0.2, 0.0), 1.0, epsilon = 1e-12);

    data.group_bars(0.0, 0.2, 0.0).expect("grouped");

    let a = xs(&data, 0);
    let b = xs(&data, 1);
    assert_abs_diff_eq!(a[0], 0.3, epsilon = 1e-12);
    assert_abs_diff_eq!(b[0], 0.7, epsilon = 1e-12);
    assert_abs_diff_eq!(a[1], 1.3, epsilon = 1e-12);
    assert_abs_diff_eq!(b[1], 1.7, epsilon = 1e-12);
}

#[test]
fn bar_space_widens_each_slot() {
    let mut data =
        ChartData::bar(vec![set("a", 1), set("b", 1), set("c", 1)], 0.2).expect("bar data");
    data.group_bars(5.0, 0.1, 0.1).expect("grouped");

    let centers: Vec<f64> = (0..3).map(|index| xs(&data, index)[0]).collect();
    assert_abs_diff_eq!(centers[0], 5.2, epsilon = 1e-12);
    assert_abs_diff_eq!(centers[1], 5.5, epsilon = 1e-12);
    assert_abs_diff_eq!(centers[2], 5.8, epsilon = 1e-12);
    assert_abs_diff_eq!(data.group_width(0.1, 0.1), 1.0, epsilon = 1e-12);
}

#[test]
fn shorter_data_sets_leave_later_groups_partial() {
    let mut data = ChartData::bar(vec![set("long", 3), set("short", 1)], 0.4).expect("bar data");
    data.group_bars(0.0, 0.2, 0.0).expect("grouped");

    assert_eq!(xs(&data, 0).len(), 3);
    assert_abs_diff_eq!(xs(&data, 0)[2], 2.3, epsilon = 1e-12);
    assert_eq!(xs(&data, 1).len(), 1);
    assert_abs_diff_eq!(xs(&data, 1)[0], 0.7, epsilon = 1e-12);
}

#[test]
fn every_call_produces_a_new_revision() {
    let mut data = ChartData::bar(vec![set("a", 2)], 0.5).expect("bar data");
    let initial = data.revision();

    let first = data.group_bars(0.0, 0.5, 0.0).expect("grouped");
    let second = data.group_bars(0.0, 0.5, 0.0).expect("grouped");

    assert_ne!(first, initial);
    assert_ne!(second, first);
    assert_eq!(data.revision(), second);
}

#[test]
fn grouping_requires_bar_data_sets_and_valid_spacing() {
    let mut line = ChartData::line(vec![set("a", 1)]);
    assert_eq!(line.group_bars(0.0, 0.1, 0.1), Err(ChartError::NotBarData));

    let mut empty = ChartData::bar(Vec::new(), 0.5).expect("bar data");
    assert_eq!(empty.group_bars(0.0, 0.1, 0.1), Err(ChartError::NoData));

    let mut data = ChartData::bar(vec![set("a", 1)], 0.5).expect("bar data");
    let before = data.revision();
    assert!(data.group_bars(0.0, -0.1, 0.0).is_err());
    assert!(data.group_bars(f64::NAN, 0.1, 0.0).is_err());
    assert_eq!(data.revision(), before);
    assert_eq!(xs(&data, 0), vec![0.0]);
}

#[test]
fn revisions_never_repeat_across_data_replacements() {
    let mut first = ChartData::bar(vec![set("a", 2)], 0.5).expect("bar data");
    let mut second = ChartData::bar(vec![set("a", 2)], 0.5).expect("bar data");
    let line = ChartData::line(vec![set("a", 2)]);

    assert_ne!(first.revision(), second.revision());
    assert_ne!(line.revision(), first.revision());
    assert_ne!(line.revision(), second.revision());
    assert_ne!(first.revision(), DataRevision::default());

    let grouped_first = first.group_bars(0.0, 0.5, 0.0).expect("grouped");
    let grouped_second = second.group_bars(0.0, 0.5, 0.0).expect("grouped");
    assert_ne!(grouped_first, grouped_second);
    assert_ne!(grouped_second, first.revision());
}
