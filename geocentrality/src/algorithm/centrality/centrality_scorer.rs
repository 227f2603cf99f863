use super::{CentralityResult, CentralityRow, EdgeUsageTable};
use crate::algorithm::CentralityError;
use crate::model::network::{EdgeAttributeTable, EdgeKey};

/// counts edge occurrences and joins the counts onto the edge attributes.
///
/// the occurrence side drives the join, so only traversed edges are scored.
/// fails when there are no occurrences at all.
pub fn score(
    occurrences: &[EdgeKey],
    edge_attributes: &EdgeAttributeTable,
    number_of_routes: usize,
    area: &str,
) -> Result<CentralityResult<u64>, CentralityError> {
    if occurrences.is_empty() {
        return Err(CentralityError::NoCentralityData(
            number_of_routes,
            String::from(area),
        ));
    }
    let usage = EdgeUsageTable::from_occurrences(occurrences);
    log::debug!(
        "{} occurrences over {} distinct edges",
        usage.total(),
        usage.len()
    );
    Ok(join_attributes(usage.into_sorted_vec(), edge_attributes))
}

/// left-joins per-edge values onto the attribute table by composite key.
pub fn join_attributes<V>(
    values: impl IntoIterator<Item = (EdgeKey, V)>,
    edge_attributes: &EdgeAttributeTable,
) -> CentralityResult<V> {
    let rows = values
        .into_iter()
        .map(|(edge_key, centrality)| {
            let attributes = edge_attributes.get(&edge_key);
            CentralityRow {
                edge_key,
                centrality,
                osmid: attributes.and_then(|a| a.osmid_string()),
                geometry: attributes.map(|a| a.geometry.clone()),
            }
        })
        .collect();
    let result = CentralityResult::new(rows);
    let unmatched = result.unmatched();
    if unmatched > 0 {
        log::warn!("{unmatched} scored edges have no entry in the edge attribute table");
    }
    result
}

#[cfg(test)]
mod tests {
    use super::score;
    use geo::line_string;
    use crate::algorithm::CentralityError;
    use crate::model::network::{
        AttributeValue, EdgeAttributeTable, EdgeAttributes, EdgeKey, NodeId,
    };

    fn key(src: i64, dst: i64, k: u32) -> EdgeKey {
        EdgeKey::new(NodeId(src), NodeId(dst), k)
    }

    fn attributes() -> EdgeAttributeTable {
        vec![
            (
                key(1, 2, 0),
                EdgeAttributes {
                    osmid: AttributeValue::parse("[10, 11]"),
                    highway: AttributeValue::parse("residential"),
                    geometry: geo::line_string![(x: 0.0, y: 0.0), (x: 1.0, y: 0.0)],
                },
            ),
            (
                key(2, 3, 0),
                EdgeAttributes {
                    osmid: AttributeValue::parse("12"),
                    highway: None,
                    geometry: geo::line_string![(x: 1.0, y: 0.0), (x: 2.0, y: 0.0)],
                },
            ),
            (
                key(3, 1, 0),
                EdgeAttributes {
                    osmid: None,
                    highway: None,
                    geometry: geo::line_string![(x: 2.0, y: 0.0), (x: 0.0, y: 0.0)],
                },
            ),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn counts_and_joins() {
        let occurrences = vec![key(2, 3, 0), key(1, 2, 0), key(2, 3, 0)];
        let result = score(&occurrences, &attributes(), 2, "test").expect("should score");
        assert_eq!(result.len(), 2);
        let first = &result.rows()[0];
        assert_eq!(first.edge_key, key(1, 2, 0));
        assert_eq!(first.centrality, 1);
        assert_eq!(first.osmid.as_deref(), Some("[10, 11]"));
        let second = result.get(&key(2, 3, 0)).expect("should be scored");
        assert_eq!(second.centrality, 2);
        assert_eq!(second.osmid.as_deref(), Some("12"));
        // never traversed edges are absent, not zero
        assert!(result.get(&key(3, 1, 0)).is_none());
    }

    #[test]
    fn unmatched_edges_are_kept() {
        let occurrences = vec![key(9, 8, 0)];
        let result = score(&occurrences, &attributes(), 1, "test").expect("should score");
        assert_eq!(result.unmatched(), 1);
        assert!(result.rows()[0].geometry.is_none());
    }

    #[test]
    fn join_is_idempotent() {
        let occurrences = vec![key(3, 1, 0), key(1, 2, 0), key(3, 1, 0), key(2, 3, 0)];
        let a = score(&occurrences, &attributes(), 2, "test").expect("should score");
        let mut reversed = occurrences.clone();
        reversed.reverse();
        let b = score(&reversed, &attributes(), 2, "test").expect("should score");
        assert_eq!(a, b);
    }

    #[test]
    fn empty_occurrences_fail() {
        match score(&[], &attributes(), 5, "somewhere") {
            Err(CentralityError::NoCentralityData(n, area)) => {
                assert_eq!(n, 5);
                assert_eq!(area, "somewhere");
            }
            other => panic!("unexpected result {other:?}"),
        }
    }
}
