use super::{speed_ops, FillValueLookup, HighwaySpeeds};
use crate::model::network::{AttributeValue, EdgeData, EdgeKey, NetworkError, RoadGraph};
use std::collections::HashMap;
use uom::si::f64::{Length, Time, Velocity};
use uom::si::{length, time, velocity};

/// where the speed of an edge came from during travel time assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpeedSource {
    /// the edge's own maxspeed tag
    Maxspeed,
    /// the configured speed of the edge's highway class
    HighwayClass,
    /// the observed average maxspeed of the edge's highway class
    ClassAverage,
    /// the configured fallback speed
    Fallback,
    /// the observed average maxspeed over the whole network
    GlobalAverage,
}

pub type SpeedSourceCounts = HashMap<SpeedSource, usize>;

struct SpeedObservation {
    highway: Option<String>,
    maxspeed_kph: Option<f64>,
    length_meters: f64,
}

/// assigns a speed and travel time (seconds) to every edge of the graph.
///
/// the speed of an edge is, in order of preference: its parsed `maxspeed`
/// tag, the configured speed of its highway class, the length-weighted
/// average maxspeed observed on its class, the fallback speed, and the
/// average maxspeed observed over the whole network. fails if none apply.
pub fn assign_travel_times(
    graph: &mut RoadGraph,
    speeds: &HighwaySpeeds,
    fallback_speed_kph: Option<f64>,
    ignore_invalid_maxspeed: bool,
) -> Result<SpeedSourceCounts, NetworkError> {
    let observations = graph
        .edges()
        .map(|edge| {
            Ok(SpeedObservation {
                highway: edge.highway_class().map(String::from),
                maxspeed_kph: parse_maxspeed(edge, ignore_invalid_maxspeed)?,
                length_meters: edge.length_meters,
            })
        })
        .collect::<Result<Vec<_>, NetworkError>>()?;
    let lookup = FillValueLookup::new(
        &observations,
        "highway",
        "maxspeed",
        |o| o.highway.clone(),
        |o| Ok(o.maxspeed_kph),
        |o| o.length_meters,
    )?;
    let fallback = fallback_speed_kph
        .filter(|kph| kph.is_finite() && *kph > 0.0)
        .map(Velocity::new::<velocity::kilometer_per_hour>);

    let mut counts: SpeedSourceCounts = HashMap::new();
    for (edge, observation) in graph.edges_mut().zip(observations.iter()) {
        let (speed, source) = resolve_speed(edge.edge_key, observation, speeds, &lookup, fallback)?;
        let distance = Length::new::<length::meter>(edge.length_meters);
        let travel_time: Time = distance / speed;
        edge.speed_kph = Some(speed.get::<velocity::kilometer_per_hour>());
        edge.travel_time_seconds = Some(travel_time.get::<time::second>());
        *counts.entry(source).or_default() += 1;
    }

    log::info!("assigned travel times by speed source: {counts:?}");
    Ok(counts)
}

fn parse_maxspeed(edge: &EdgeData, ignore_invalid: bool) -> Result<Option<f64>, NetworkError> {
    match &edge.maxspeed {
        None => Ok(None),
        Some(raw) => {
            let parsed = speed_ops::deserialize_speed(
                raw,
                Some(AttributeValue::VALUE_DELIMITER),
                ignore_invalid,
            )
            .map_err(|e| NetworkError::InvalidMaxspeed(edge.edge_key, e))?;
            Ok(parsed.map(|v| v.get::<velocity::kilometer_per_hour>()))
        }
    }
}

fn resolve_speed(
    edge_key: EdgeKey,
    observation: &SpeedObservation,
    speeds: &HighwaySpeeds,
    lookup: &FillValueLookup,
    fallback: Option<Velocity>,
) -> Result<(Velocity, SpeedSource), NetworkError> {
    let kph = Velocity::new::<velocity::kilometer_per_hour>;
    if let Some(observed) = observation.maxspeed_kph {
        return Ok((kph(observed), SpeedSource::Maxspeed));
    }
    if let Some(class) = &observation.highway {
        if let Some(configured) = speeds.get(class) {
            return Ok((configured, SpeedSource::HighwayClass));
        }
        if let Some(average) = lookup.get_class(class) {
            return Ok((kph(average), SpeedSource::ClassAverage));
        }
    }
    if let Some(f) = fallback {
        return Ok((f, SpeedSource::Fallback));
    }
    match lookup.global_average {
        Some(average) => Ok((kph(average), SpeedSource::GlobalAverage)),
        None => Err(NetworkError::UnresolvedSpeed(
            edge_key,
            observation.highway.clone().unwrap_or_default(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::{assign_travel_times, SpeedSource};
    use crate::model::network::{AttributeValue, EdgeKey, NetworkError, NodeData, NodeId, RoadGraph};
    use crate::model::network::road_graph::tests::edge;
    use crate::model::speed::HighwaySpeeds;
    use std::collections::HashMap;

    fn graph(tags: &[(Option<&str>, Option<&str>)]) -> RoadGraph {
        let nodes = vec![
            NodeData::new(NodeId(1), 0.0, 0.0),
            NodeData::new(NodeId(2), 0.0, 1.0),
        ];
        let edges = tags
            .iter()
            .enumerate()
            .map(|(i, (highway, maxspeed))| {
                let mut e = edge(1, 2, i as u32, 1000.0, &nodes);
                e.highway = highway.and_then(AttributeValue::parse);
                e.maxspeed = maxspeed.map(String::from);
                e
            })
            .collect();
        RoadGraph::new(nodes, edges).expect("test invariant: valid graph")
    }

    fn travel_time(g: &RoadGraph, key: u32) -> f64 {
        g.get_edge_data(&EdgeKey::new(NodeId(1), NodeId(2), key))
            .ok()
            .and_then(|e| e.travel_time_seconds)
            .expect("travel time should be assigned")
    }

    #[test]
    fn resolution_order() {
        let mut g = graph(&[
            (Some("residential"), Some("50")),
            (Some("residential"), None),
            (Some("cycleway"), Some("20")),
            (Some("cycleway"), None),
            (None, None),
        ]);
        let counts = assign_travel_times(&mut g, &HighwaySpeeds::default(), Some(36.0), false)
            .expect("should assign");
        // 1km at 50 kph is 72 seconds
        assert!((travel_time(&g, 0) - 72.0).abs() < 1e-9);
        // residential is configured at 30 kph
        assert!((travel_time(&g, 1) - 120.0).abs() < 1e-9);
        // cycleway average observed maxspeed is 20 kph
        assert!((travel_time(&g, 3) - 180.0).abs() < 1e-9);
        // untagged falls back to 36 kph
        assert!((travel_time(&g, 4) - 100.0).abs() < 1e-9);
        assert_eq!(counts.get(&SpeedSource::Maxspeed), Some(&2));
        assert_eq!(counts.get(&SpeedSource::HighwayClass), Some(&1));
        assert_eq!(counts.get(&SpeedSource::ClassAverage), Some(&1));
        assert_eq!(counts.get(&SpeedSource::Fallback), Some(&1));
    }

    #[test]
    fn global_average_without_fallback() {
        let mut g = graph(&[(Some("primary"), Some("40;60")), (None, None)]);
        let counts = assign_travel_times(&mut g, &HighwaySpeeds::new(HashMap::new()), None, false)
            .expect("should assign");
        assert!((travel_time(&g, 1) - 90.0).abs() < 1e-9);
        assert_eq!(counts.get(&SpeedSource::GlobalAverage), Some(&1));
    }

    #[test]
    fn list_valued_highway_uses_first_class() {
        let mut g = graph(&[(Some("[living_street, residential]"), None)]);
        assign_travel_times(&mut g, &HighwaySpeeds::default(), None, false).expect("should assign");
        // living_street is 10 kph
        assert!((travel_time(&g, 0) - 360.0).abs() < 1e-9);
    }

    #[test]
    fn unresolved_speed_fails() {
        let mut g = graph(&[(Some("footway"), None)]);
        let result = assign_travel_times(&mut g, &HighwaySpeeds::default(), None, false);
        assert!(matches!(result, Err(NetworkError::UnresolvedSpeed(_, _))));
    }

    #[test]
    fn invalid_maxspeed_fails_unless_ignored() {
        let mut g = graph(&[(Some("primary"), Some("fast"))]);
        let strict = assign_travel_times(&mut g, &HighwaySpeeds::default(), None, false);
        assert!(matches!(strict, Err(NetworkError::InvalidMaxspeed(_, _))));
        let counts = assign_travel_times(&mut g, &HighwaySpeeds::default(), None, true)
            .expect("should assign");
        assert_eq!(counts.get(&SpeedSource::HighwayClass), Some(&1));
    }
}
