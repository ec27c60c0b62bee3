//! Sparse source -> destination tables.
//!
//! Training fills a [`CountTable`]; [`CountTable::normalize`] consumes it and
//! yields the [`ProbabilityTable`] used for decoding. Counts can only be added
//! before normalization.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Destination id -> value, iterated in ascending id.
pub type Row = BTreeMap<usize, f64>;

#[derive(Debug, Default, Clone)]
pub struct CountTable {
    rows: Vec<Row>,
}

impl CountTable {
    pub fn add(&mut self, src: usize, dst: usize) {
        if self.rows.len() <= src {
            self.rows.resize_with(src + 1, Row::default);
        }
        *self.rows[src].entry(dst).or_insert(0.0) += 1.0;
    }

    pub fn count(&self, src: usize, dst: usize) -> f64 {
        self.rows.get(src).and_then(|r| r.get(&dst)).copied().unwrap_or_default()
    }

    pub fn total(&self, src: usize) -> f64 {
        self.rows.get(src).map(|r| r.values().sum()).unwrap_or_default()
    }

    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    /// Number of distinct (source, destination) pairs seen.
    pub fn num_entries(&self) -> usize {
        self.rows.iter().map(Row::len).sum()
    }

    /// Turns every row into natural-log probabilities, `ln(count / row_total)`.
    pub fn normalize(self) -> ProbabilityTable {
        let rows = self.rows.into_iter().map(log_normalize).collect();
        ProbabilityTable { rows }
    }
}

/// `ln(count / total)` for every entry of a row of counts.
pub(crate) fn log_normalize(row: Row) -> Row {
    let total: f64 = row.values().sum();
    row.into_iter().map(|(dst, count)| (dst, (count / total).ln())).collect()
}

/// Linear-space sum of a row of log-probabilities.
pub(crate) fn row_mass(row: &Row) -> f64 {
    row.values().map(|p| p.exp()).sum()
}

/// Log-probabilities, `rows[src][dst] = ln P(dst | src)`.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProbabilityTable {
    rows: Vec<Row>,
}

impl ProbabilityTable {
    pub fn get(&self, src: usize, dst: usize) -> Option<f64> {
        self.rows.get(src).and_then(|r| r.get(&dst)).copied()
    }

    /// Outgoing entries of `src` in ascending destination id; empty when `src`
    /// was never observed as a source.
    pub fn row(&self, src: usize) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.rows.get(src).into_iter().flat_map(|r| r.iter().map(|(&dst, &p)| (dst, p)))
    }

    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    /// Ids with at least one outgoing entry.
    pub fn sources(&self) -> impl Iterator<Item = usize> + '_ {
        self.rows.iter().enumerate().filter(|(_, r)| !r.is_empty()).map(|(i, _)| i)
    }

    /// Linear-space mass of the row, 1 for every observed source.
    pub fn mass(&self, src: usize) -> f64 {
        self.rows.get(src).map(row_mass).unwrap_or_default()
    }

    pub(crate) fn max_destination(&self) -> Option<usize> {
        self.rows.iter().filter_map(|r| r.keys().next_back().copied()).max()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn count_then_normalize() {
        let mut counts = CountTable::default();
        counts.add(0, 1);
        counts.add(0, 1);
        counts.add(0, 2);
        counts.add(3, 1);
        assert_eq!(counts.num_rows(), 4);
        assert_eq!(counts.num_entries(), 3);
        assert_eq!(counts.count(0, 1), 2.0);
        assert_eq!(counts.total(0), 3.0);
        assert_eq!(counts.total(2), 0.0);

        let probs = counts.normalize();
        assert!((probs.get(0, 1).unwrap() - (2.0f64 / 3.0).ln()).abs() < 1e-12);
        assert!((probs.get(0, 2).unwrap() - (1.0f64 / 3.0).ln()).abs() < 1e-12);
        assert_eq!(probs.get(3, 1), Some(0.0));
        assert_eq!(probs.get(1, 1), None);
        assert_eq!(probs.get(9, 0), None);
        assert_eq!(probs.sources().collect::<Vec<_>>(), [0, 3]);
        for src in probs.sources() {
            assert!((probs.mass(src) - 1.0).abs() < 1e-9);
        }
        assert_eq!(probs.max_destination(), Some(2));
    }

    #[test]
    fn row_order() {
        let mut counts = CountTable::default();
        for dst in [5, 2, 7, 2] {
            counts.add(1, dst);
        }
        let probs = counts.normalize();
        let dsts: Vec<usize> = probs.row(1).map(|(d, _)| d).collect();
        assert_eq!(dsts, [2, 5, 7]);
        assert_eq!(probs.row(0).count(), 0);
        assert_eq!(probs.row(42).count(), 0);
    }

    #[test]
    fn single_row() {
        let counts = Row::from([(4, 1.0), (0, 3.0)]);
        let probs = log_normalize(counts);
        assert_eq!(probs.keys().copied().collect::<Vec<_>>(), [0, 4]);
        assert!((probs[&0] - 0.75f64.ln()).abs() < 1e-12);
        assert!((row_mass(&probs) - 1.0).abs() < 1e-12);
        assert!(log_normalize(Row::new()).is_empty());
    }
}
