use super::{AttributeValue, EdgeData, EdgeKey};
use geo::LineString;
use std::collections::HashMap;

/// static, non-routing attributes of an edge that are attached to scored
/// centrality rows.
#[derive(Debug, Clone, PartialEq)]
pub struct EdgeAttributes {
    pub osmid: Option<AttributeValue>,
    pub highway: Option<AttributeValue>,
    pub geometry: LineString<f64>,
}

impl From<&EdgeData> for EdgeAttributes {
    fn from(edge: &EdgeData) -> Self {
        EdgeAttributes {
            osmid: edge.osmid.clone(),
            highway: edge.highway.clone(),
            geometry: edge.geometry.clone(),
        }
    }
}

impl EdgeAttributes {
    /// scalar form of the stable identifier, empty if absent.
    pub fn osmid_string(&self) -> Option<String> {
        self.osmid.as_ref().map(|o| o.to_scalar_string())
    }
}

/// edge attributes keyed by the same composite identity used for routing.
#[derive(Debug, Clone, Default)]
pub struct EdgeAttributeTable(HashMap<EdgeKey, EdgeAttributes>);

impl EdgeAttributeTable {
    pub fn get(&self, key: &EdgeKey) -> Option<&EdgeAttributes> {
        self.0.get(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(EdgeKey, EdgeAttributes)> for EdgeAttributeTable {
    fn from_iter<T: IntoIterator<Item = (EdgeKey, EdgeAttributes)>>(iter: T) -> Self {
        EdgeAttributeTable(iter.into_iter().collect())
    }
}
