use crate::model::network::EdgeKey;
use itertools::Itertools;
use std::collections::HashMap;

/// how many times each edge was traversed.
///
/// the sum of all counts always equals the number of occurrences recorded,
/// so a table built from a route set sums to the total route length in edges.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EdgeUsageTable(HashMap<EdgeKey, u64>);

impl EdgeUsageTable {
    pub fn new() -> EdgeUsageTable {
        EdgeUsageTable(HashMap::new())
    }

    pub fn from_occurrences<'a>(occurrences: impl IntoIterator<Item = &'a EdgeKey>) -> EdgeUsageTable {
        let mut table = EdgeUsageTable::new();
        for key in occurrences {
            table.record(*key);
        }
        table
    }

    pub fn record(&mut self, key: EdgeKey) {
        *self.0.entry(key).or_default() += 1;
    }

    pub fn get(&self, key: &EdgeKey) -> u64 {
        self.0.get(key).copied().unwrap_or_default()
    }

    /// adds the counts of another table into this one. used to combine tables
    /// accumulated independently, such as one per worker.
    pub fn merge(&mut self, other: EdgeUsageTable) {
        for (key, count) in other.0 {
            *self.0.entry(key).or_default() += count;
        }
    }

    /// sum of all counts.
    pub fn total(&self) -> u64 {
        self.0.values().sum()
    }

    /// number of distinct edges.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// (key, count) pairs ordered by key.
    pub fn into_sorted_vec(self) -> Vec<(EdgeKey, u64)> {
        self.0.into_iter().sorted_by_key(|(k, _)| *k).collect_vec()
    }
}
