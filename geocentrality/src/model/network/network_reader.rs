use super::{
    attribute_value::deserialize_optional_attribute, geometry_ops::deserialize_optional_linestring,
    AttributeValue, EdgeData, EdgeKey, NetworkError, NodeData, NodeId, RoadGraph,
};
use flate2::read::GzDecoder;
use geo::{Haversine, Length, LineString};
use kdam::tqdm;
use serde::Deserialize;
use std::{collections::HashMap, fs::File, io::Read, path::Path};

/// row of the edges file. only `src` and `dst` are required.
#[derive(Debug, Clone, Deserialize)]
pub struct EdgeRow {
    pub src: NodeId,
    pub dst: NodeId,
    #[serde(default)]
    pub key: Option<u32>,
    #[serde(default, deserialize_with = "deserialize_optional_attribute")]
    pub osmid: Option<AttributeValue>,
    #[serde(default, deserialize_with = "deserialize_optional_attribute")]
    pub highway: Option<AttributeValue>,
    #[serde(default)]
    pub maxspeed: Option<String>,
    /// length in meters
    #[serde(default)]
    pub length: Option<f64>,
    #[serde(default, deserialize_with = "deserialize_optional_linestring")]
    pub geometry: Option<LineString<f64>>,
}

impl EdgeRow {
    /// builds the edge, filling missing geometry with the straight segment
    /// between the endpoint nodes and missing length with the Haversine
    /// length of the geometry.
    pub fn into_edge_data(self, nodes: &HashMap<NodeId, NodeData>) -> Result<EdgeData, NetworkError> {
        let edge_key = EdgeKey::new(self.src, self.dst, self.key.unwrap_or_default());
        let geometry = match self.geometry {
            Some(g) => g,
            None => {
                let src = nodes
                    .get(&self.src)
                    .ok_or(NetworkError::EdgeMissingNodeId(edge_key, self.src))?;
                let dst = nodes
                    .get(&self.dst)
                    .ok_or(NetworkError::EdgeMissingNodeId(edge_key, self.dst))?;
                LineString::from(vec![(src.x, src.y), (dst.x, dst.y)])
            }
        };
        let length_meters = self
            .length
            .unwrap_or_else(|| Haversine.length(&geometry));
        let maxspeed = self.maxspeed.filter(|m| !m.trim().is_empty());
        Ok(EdgeData {
            edge_key,
            osmid: self.osmid,
            highway: self.highway,
            maxspeed,
            length_meters,
            speed_kph: None,
            travel_time_seconds: None,
            geometry,
        })
    }
}

/// reads a road network from a vertices file (`node_id,x,y`) and an edges
/// file (`src,dst,key,osmid,highway,maxspeed,length,geometry`). files ending
/// in `.gz` are decompressed.
pub fn read_road_graph(vertices_file: &Path, edges_file: &Path) -> Result<RoadGraph, NetworkError> {
    log::info!("reading road network vertices from {}", vertices_file.display());
    let nodes = read_rows::<NodeData>(vertices_file, "read vertices")?;
    log::info!("reading road network edges from {}", edges_file.display());
    let edge_rows = read_rows::<EdgeRow>(edges_file, "read edges")?;
    if edge_rows.is_empty() {
        return Err(NetworkError::NoEdgesFound);
    }

    let node_lookup: HashMap<NodeId, NodeData> =
        nodes.iter().map(|n| (n.node_id, n.clone())).collect();
    let edges = edge_rows
        .into_iter()
        .map(|row| row.into_edge_data(&node_lookup))
        .collect::<Result<Vec<_>, _>>()?;

    let graph = RoadGraph::new(nodes, edges)?;
    log::info!(
        "loaded road network with {} nodes and {} edges",
        graph.node_count(),
        graph.edge_count()
    );
    Ok(graph)
}

fn read_rows<T>(path: &Path, desc: &str) -> Result<Vec<T>, NetworkError>
where
    T: for<'de> Deserialize<'de>,
{
    let filename = path.to_string_lossy().to_string();
    let file = File::open(path).map_err(|e| NetworkError::FileOpenError(filename.clone(), e))?;
    let buffer: Box<dyn Read> = if filename.ends_with(".gz") {
        Box::new(GzDecoder::new(file))
    } else {
        Box::new(file)
    };
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(buffer);
    let iter = tqdm!(reader.deserialize::<T>(), desc = desc);
    let rows = iter
        .collect::<Result<Vec<T>, _>>()
        .map_err(|e| NetworkError::CsvReadError(filename, e))?;
    eprintln!();
    Ok(rows)
}
