//! Average-rank percentile normalization.
//!
//! Scores are batch-relative: ranks are computed over the whole table, so
//! the same row can normalize differently in a different batch even with
//! unchanged raw metrics. A normalized score is meaningless in isolation.

use std::collections::BTreeMap;

use ranking_core::{Direction, Metric, MetricRow};

/// Normalize one column to 0-100 scores.
///
/// Tied values receive the mean rank of the tied group; score is
/// `rank / max_rank * 100`. Missing (or non-finite) values score 0,
/// worst-ranked rather than excluded. A zero-variance column scores 50
/// for every present row.
pub fn normalize_column(values: &[Option<f64>], direction: Direction) -> Vec<f64> {
    let mut scores = vec![0.0; values.len()];

    let mut present: Vec<(usize, f64)> = values
        .iter()
        .enumerate()
        .filter_map(|(i, v)| v.filter(|x| x.is_finite()).map(|x| (i, x)))
        .collect();
    if present.is_empty() {
        return scores;
    }

    let min = present.iter().map(|(_, v)| *v).fold(f64::INFINITY, f64::min);
    let max = present
        .iter()
        .map(|(_, v)| *v)
        .fold(f64::NEG_INFINITY, f64::max);
    if max == min {
        // No variance: neutral score, not an arbitrary extreme
        for (i, _) in &present {
            scores[*i] = 50.0;
        }
        return scores;
    }

    // Sort so the best value lands at the highest rank
    match direction {
        Direction::HigherIsBetter => {
            present.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal))
        }
        Direction::LowerIsBetter => {
            present.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal))
        }
    }

    // Average ranks over tie groups (1-based)
    let mut ranks = vec![0.0; present.len()];
    let mut start = 0;
    while start < present.len() {
        let mut end = start;
        while end + 1 < present.len() && present[end + 1].1 == present[start].1 {
            end += 1;
        }
        let avg_rank = (start + 1 + end + 1) as f64 / 2.0;
        for rank in ranks.iter_mut().take(end + 1).skip(start) {
            *rank = avg_rank;
        }
        start = end + 1;
    }

    let max_rank = ranks[present.len() - 1];
    for (pos, (i, _)) in present.iter().enumerate() {
        scores[*i] = ranks[pos] / max_rank * 100.0;
    }
    scores
}

/// The normalized view of a metric table: one 0-100 score column per
/// metric present in at least one row.
#[derive(Debug, Clone)]
pub struct NormalizedTable {
    columns: BTreeMap<Metric, Vec<f64>>,
}

impl NormalizedTable {
    pub fn from_rows(rows: &[MetricRow]) -> Self {
        let mut columns = BTreeMap::new();
        for metric in Metric::ALL {
            let values: Vec<Option<f64>> = rows.iter().map(|r| r.get(metric)).collect();
            if values.iter().any(|v| v.is_some_and(|x| x.is_finite())) {
                columns.insert(metric, normalize_column(&values, metric.direction()));
            }
        }
        Self { columns }
    }

    /// Score for one row and metric; 0 when the metric is absent from the
    /// entire table (missing data is worst-ranked, never neutral).
    pub fn score(&self, row_idx: usize, metric: Metric) -> f64 {
        self.columns
            .get(&metric)
            .map(|col| col[row_idx])
            .unwrap_or(0.0)
    }

    pub fn metrics(&self) -> impl Iterator<Item = Metric> + '_ {
        self.columns.keys().copied()
    }
}
