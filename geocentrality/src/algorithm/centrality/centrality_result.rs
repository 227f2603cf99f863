use crate::model::network::EdgeKey;
use geo::LineString;
use itertools::Itertools;

/// centrality of a single edge joined with its static attributes. the
/// attributes are None when the edge was absent from the attribute table.
#[derive(Debug, Clone, PartialEq)]
pub struct CentralityRow<V> {
    pub edge_key: EdgeKey,
    pub centrality: V,
    /// stable identifier in its scalar display form
    pub osmid: Option<String>,
    pub geometry: Option<LineString<f64>>,
}

/// scored edges ordered by [`EdgeKey`].
///
/// geographic centrality holds usage counts (`u64`) for traversed edges only,
/// while edge betweenness holds normalized values (`f64`) for every edge.
#[derive(Debug, Clone, PartialEq)]
pub struct CentralityResult<V> {
    rows: Vec<CentralityRow<V>>,
}

impl<V> CentralityResult<V> {
    pub fn new(rows: Vec<CentralityRow<V>>) -> CentralityResult<V> {
        let rows = rows
            .into_iter()
            .sorted_by_key(|r| r.edge_key)
            .collect_vec();
        CentralityResult { rows }
    }

    pub fn rows(&self) -> &[CentralityRow<V>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn get(&self, edge_key: &EdgeKey) -> Option<&CentralityRow<V>> {
        self.rows
            .binary_search_by_key(edge_key, |r| r.edge_key)
            .ok()
            .map(|idx| &self.rows[idx])
    }

    /// number of rows that found no attributes in the join.
    pub fn unmatched(&self) -> usize {
        self.rows.iter().filter(|r| r.geometry.is_none()).count()
    }
}
