//! Chart-ready records built from backend aggregates.

use super::wire::OrderedMap;

/// A single named value, the unit of every bar, pie and line chart.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesPoint {
    pub name: String,
    pub value: Option<f64>,
}

impl SeriesPoint {
    pub fn new(name: impl Into<String>, value: impl Into<Option<f64>>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// A headline figure: label, formatted value and a caption underneath.
#[derive(Debug, Clone, PartialEq)]
pub struct StatCard {
    pub label: String,
    pub value: String,
    pub caption: String,
}

impl StatCard {
    pub fn new(label: &str, value: String, caption: &str) -> Self {
        Self {
            label: label.to_string(),
            value,
            caption: caption.to_string(),
        }
    }
}

/// Maps every entry of a backend object to a chart record, in backend order.
pub fn records_from_map<V, T>(map: &OrderedMap<V>, to_record: impl Fn(&str, &V) -> T) -> Vec<T> {
    map.iter().map(|(name, stats)| to_record(name, stats)).collect()
}

/// Count map as a series, in backend order.
pub fn count_series(map: &OrderedMap<u64>) -> Vec<SeriesPoint> {
    records_from_map(map, |name, count| SeriesPoint::new(name, *count as f64))
}

/// The `n` largest counts, descending. Equal counts keep backend order.
pub fn top_n_by_count(map: &OrderedMap<u64>, n: usize) -> Vec<SeriesPoint> {
    let mut entries: Vec<(&str, u64)> = map.iter().map(|(k, v)| (k, *v)).collect();
    entries.sort_by(|a, b| b.1.cmp(&a.1));
    entries.truncate(n);
    entries
        .into_iter()
        .map(|(name, count)| SeriesPoint::new(name, count as f64))
        .collect()
}
