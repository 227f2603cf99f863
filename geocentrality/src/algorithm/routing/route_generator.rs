use super::{shortest_path, DrawOutcome, DrawStatistics, RejectReason, RouteRecord};
use crate::algorithm::sampling::{PolygonSampler, RetryPolicy};
use crate::algorithm::CentralityError;
use crate::model::network::{NodeId, RoadGraph, Weight};
use crate::model::study_area::StudyArea;
use geo::Point;
use kdam::tqdm;
use rand::Rng;

/// lifecycle of a single random route draw.
///
/// `Sampling -> Resolving -> Routing -> {Accepted | Rejected}`. a rejected
/// draw is retried from `Sampling` by [`RouteGenerator::generate_routes`].
#[derive(Debug, Clone, PartialEq)]
pub enum RouteState {
    Sampling,
    Resolving(Point<f64>, Point<f64>),
    Routing(NodeId, NodeId),
    Accepted(RouteRecord),
    Rejected(RejectReason),
}

impl RouteState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, RouteState::Accepted(_) | RouteState::Rejected(_))
    }

    /// the outcome of a terminal state, None while the draw is in progress.
    pub fn into_outcome(self) -> Option<DrawOutcome> {
        match self {
            RouteState::Accepted(r) => Some(DrawOutcome::Accepted(r)),
            RouteState::Rejected(r) => Some(DrawOutcome::Rejected(r)),
            _ => None,
        }
    }
}

/// generates random routes between pairs of points sampled inside a study
/// area, resolved to their nearest network nodes and connected by weighted
/// shortest paths.
pub struct RouteGenerator<'a> {
    graph: &'a RoadGraph,
    sampler: PolygonSampler<'a>,
    weight: Weight,
    retry_policy: RetryPolicy,
}

impl<'a> RouteGenerator<'a> {
    /// fails if the retry policy is invalid or if some edge of the graph
    /// has no value for the routing weight.
    pub fn new(
        graph: &'a RoadGraph,
        study_area: &'a StudyArea,
        weight: Weight,
        retry_policy: RetryPolicy,
    ) -> Result<RouteGenerator<'a>, CentralityError> {
        retry_policy
            .validate()
            .map_err(CentralityError::InvalidRetryPolicy)?;
        if !graph.has_weight(weight) {
            return Err(CentralityError::MissingWeight(weight));
        }
        Ok(RouteGenerator {
            graph,
            sampler: PolygonSampler::new(study_area, retry_policy),
            weight,
            retry_policy,
        })
    }

    pub fn weight(&self) -> Weight {
        self.weight
    }

    /// advances a draw by one state. terminal states are returned unchanged.
    pub fn step<R: Rng>(
        &self,
        state: RouteState,
        rng: &mut R,
        stats: &mut DrawStatistics,
    ) -> Result<RouteState, CentralityError> {
        match state {
            RouteState::Sampling => {
                let sample = self.sampler.sample_points(2, rng)?;
                stats.sampler_batches += sample.batches;
                match sample.points.as_slice() {
                    [p1, p2] => Ok(RouteState::Resolving(*p1, *p2)),
                    other => Err(CentralityError::InternalError(format!(
                        "expected 2 sampled points, found {}",
                        other.len()
                    ))),
                }
            }
            RouteState::Resolving(p1, p2) => {
                let origin = self.graph.nearest_node(&p1)?;
                let destination = self.graph.nearest_node(&p2)?;
                Ok(RouteState::Routing(origin, destination))
            }
            RouteState::Routing(origin, destination) => self.route_between(origin, destination),
            terminal => Ok(terminal),
        }
    }

    /// resolves a pair of points to their nearest nodes and routes between
    /// them.
    pub fn generate_route(
        &self,
        p1: &Point<f64>,
        p2: &Point<f64>,
    ) -> Result<DrawOutcome, CentralityError> {
        let origin = self.graph.nearest_node(p1)?;
        let destination = self.graph.nearest_node(p2)?;
        self.route_between(origin, destination)?
            .into_outcome()
            .ok_or_else(|| {
                CentralityError::InternalError(String::from(
                    "routing ended in a non-terminal state",
                ))
            })
    }

    /// runs one complete draw from fresh sample points.
    pub fn draw<R: Rng>(
        &self,
        rng: &mut R,
        stats: &mut DrawStatistics,
    ) -> Result<DrawOutcome, CentralityError> {
        let outcome = self.run(RouteState::Sampling, rng, stats)?;
        stats.record(&outcome);
        Ok(outcome)
    }

    /// generates exactly `number_of_routes` accepted routes. rejected draws
    /// are retried with fresh points under the retry policy.
    ///
    /// a network without edges or with a single node can never yield a
    /// route and fails immediately, whatever the retry policy.
    pub fn generate_routes<R: Rng>(
        &self,
        number_of_routes: usize,
        rng: &mut R,
    ) -> Result<(Vec<RouteRecord>, DrawStatistics), CentralityError> {
        if number_of_routes == 0 {
            return Err(CentralityError::ZeroRoutes);
        }
        if self.graph.edge_count() == 0 || self.graph.node_count() < 2 {
            return Err(CentralityError::UnroutableNetwork(
                self.graph.node_count(),
                self.graph.edge_count(),
                number_of_routes,
                String::from(self.sampler.study_area().name()),
            ));
        }
        let mut stats = DrawStatistics::default();
        let mut routes: Vec<RouteRecord> = Vec::with_capacity(number_of_routes);
        let route_iter = tqdm!(
            0..number_of_routes,
            total = number_of_routes,
            desc = "generate routes"
        );
        for _ in route_iter {
            let mut attempts: u64 = 0;
            loop {
                attempts += 1;
                if !self.retry_policy.permits(attempts) {
                    eprintln!();
                    return Err(CentralityError::RetriesExhausted(
                        attempts - 1,
                        number_of_routes,
                        String::from(self.sampler.study_area().name()),
                    ));
                }
                match self.draw(rng, &mut stats)? {
                    DrawOutcome::Accepted(route) => {
                        routes.push(route);
                        break;
                    }
                    DrawOutcome::Rejected(reason) => {
                        log::debug!("rejected draw {attempts}: {reason}");
                    }
                }
            }
        }
        eprintln!();
        log::info!("{stats}");
        Ok((routes, stats))
    }

    fn route_between(
        &self,
        origin: NodeId,
        destination: NodeId,
    ) -> Result<RouteState, CentralityError> {
        if origin == destination {
            return Ok(RouteState::Rejected(RejectReason::SameNode(origin)));
        }
        match shortest_path(self.graph, origin, destination, self.weight)? {
            Some(path) => Ok(RouteState::Accepted(RouteRecord {
                origin,
                destination,
                edges: path.edges,
                cost: path.cost,
            })),
            None => Ok(RouteState::Rejected(RejectReason::Unreachable(
                origin,
                destination,
            ))),
        }
    }

    fn run<R: Rng>(
        &self,
        initial: RouteState,
        rng: &mut R,
        stats: &mut DrawStatistics,
    ) -> Result<DrawOutcome, CentralityError> {
        let mut state = initial;
        while !state.is_terminal() {
            state = self.step(state, rng, stats)?;
        }
        state.into_outcome().ok_or_else(|| {
            CentralityError::InternalError(String::from("route draw ended in a non-terminal state"))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{RouteGenerator, RouteState};
    use crate::algorithm::routing::{DrawOutcome, DrawStatistics, RejectReason};
    use crate::algorithm::sampling::RetryPolicy;
    use crate::algorithm::CentralityError;
    use crate::model::network::road_graph::tests::{edge, unit_cycle};
    use crate::model::network::{NodeData, NodeId, RoadGraph, Weight};
    use crate::model::study_area::StudyArea;
    use geo::Point;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn unit_square() -> StudyArea {
        StudyArea::from_wkt_str("unit square", "POLYGON ((0 0, 1 0, 1 1, 0 1, 0 0))")
            .expect("valid polygon")
    }

    #[test]
    fn generates_exact_number_of_routes() {
        let graph = unit_cycle();
        let area = unit_square();
        let generator = RouteGenerator::new(&graph, &area, Weight::Length, RetryPolicy::Unbounded)
            .expect("valid generator");
        let mut rng = StdRng::seed_from_u64(1234);
        let (routes, stats) = generator
            .generate_routes(10, &mut rng)
            .expect("should generate");
        assert_eq!(routes.len(), 10);
        assert_eq!(stats.accepted, 10);
        assert!(stats.sampler_batches >= 10);
        for route in routes.iter() {
            assert_ne!(route.origin, route.destination);
            assert!(!route.is_empty());
            assert!(route.len() <= 2);
            assert_eq!(route.edges.first().map(|e| e.src), Some(route.origin));
            assert_eq!(route.edges.last().map(|e| e.dst), Some(route.destination));
            for pair in route.edges.windows(2) {
                assert_eq!(pair[0].dst, pair[1].src);
            }
        }
    }

    #[test]
    fn same_node_is_rejected() {
        let graph = unit_cycle();
        let area = unit_square();
        let generator = RouteGenerator::new(&graph, &area, Weight::Length, RetryPolicy::Unbounded)
            .expect("valid generator");
        let outcome = generator
            .generate_route(&Point::new(0.05, 0.05), &Point::new(0.2, 0.15))
            .expect("should route");
        assert_eq!(
            outcome,
            DrawOutcome::Rejected(RejectReason::SameNode(NodeId(1)))
        );
    }

    #[test]
    fn opposite_corners_are_accepted() {
        let graph = unit_cycle();
        let area = unit_square();
        let generator = RouteGenerator::new(&graph, &area, Weight::Length, RetryPolicy::Unbounded)
            .expect("valid generator");
        match generator.generate_route(&Point::new(0.05, 0.05), &Point::new(0.95, 0.95)) {
            Ok(DrawOutcome::Accepted(route)) => {
                assert_eq!(route.origin, NodeId(1));
                assert_eq!(route.destination, NodeId(3));
                assert_eq!(route.cost, 2.0);
            }
            other => panic!("unexpected result {other:?}"),
        }
    }

    #[test]
    fn state_machine_steps() {
        let graph = unit_cycle();
        let area = unit_square();
        let generator = RouteGenerator::new(&graph, &area, Weight::Length, RetryPolicy::Unbounded)
            .expect("valid generator");
        let mut rng = StdRng::seed_from_u64(5);
        let mut stats = DrawStatistics::default();
        let resolving = generator
            .step(RouteState::Sampling, &mut rng, &mut stats)
            .expect("should step");
        assert!(matches!(resolving, RouteState::Resolving(_, _)));
        let routing = generator
            .step(resolving, &mut rng, &mut stats)
            .expect("should step");
        assert!(matches!(routing, RouteState::Routing(_, _)));
        let done = generator
            .step(routing, &mut rng, &mut stats)
            .expect("should step");
        assert!(done.is_terminal());
        let again = generator
            .step(done.clone(), &mut rng, &mut stats)
            .expect("should step");
        assert_eq!(done, again);
    }

    #[test]
    fn disconnected_graph_exhausts_bounded_policy() {
        // the only edge lies far outside the study area, so nodes 1 and 2
        // never connect
        let nodes = vec![
            NodeData::new(NodeId(1), 0.25, 0.5),
            NodeData::new(NodeId(2), 0.75, 0.5),
            NodeData::new(NodeId(3), 5.0, 5.0),
            NodeData::new(NodeId(4), 6.0, 6.0),
        ];
        let edges = vec![edge(3, 4, 0, 1.0, &nodes)];
        let graph = RoadGraph::new(nodes, edges).expect("valid graph");
        let area = unit_square();
        let policy = RetryPolicy::MaxAttempts { max_attempts: 5 };
        let generator =
            RouteGenerator::new(&graph, &area, Weight::Length, policy).expect("valid generator");
        let mut rng = StdRng::seed_from_u64(99);
        match generator.generate_routes(3, &mut rng) {
            Err(CentralityError::RetriesExhausted(attempts, n, area)) => {
                assert_eq!(attempts, 5);
                assert_eq!(n, 3);
                assert_eq!(area, "unit square");
            }
            other => panic!("unexpected result {other:?}"),
        }
    }

    #[test]
    fn edgeless_graph_fails_under_unbounded_policy() {
        let area = unit_square();
        let single = RoadGraph::new(vec![NodeData::new(NodeId(1), 0.5, 0.5)], vec![])
            .expect("valid graph");
        let pair = RoadGraph::new(
            vec![
                NodeData::new(NodeId(1), 0.25, 0.5),
                NodeData::new(NodeId(2), 0.75, 0.5),
            ],
            vec![],
        )
        .expect("valid graph");
        for graph in [single, pair] {
            let generator =
                RouteGenerator::new(&graph, &area, Weight::Length, RetryPolicy::Unbounded)
                    .expect("valid generator");
            let mut rng = StdRng::seed_from_u64(7);
            match generator.generate_routes(1, &mut rng) {
                Err(CentralityError::UnroutableNetwork(nodes, edges, n, name)) => {
                    assert_eq!(nodes, graph.node_count());
                    assert_eq!(edges, 0);
                    assert_eq!(n, 1);
                    assert_eq!(name, "unit square");
                }
                other => panic!("unexpected result {other:?}"),
            }
        }
    }

    #[test]
    fn zero_routes_is_error() {
        let graph = unit_cycle();
        let area = unit_square();
        let generator = RouteGenerator::new(&graph, &area, Weight::Length, RetryPolicy::Unbounded)
            .expect("valid generator");
        let mut rng = StdRng::seed_from_u64(0);
        assert!(matches!(
            generator.generate_routes(0, &mut rng),
            Err(CentralityError::ZeroRoutes)
        ));
    }

    #[test]
    fn missing_travel_time_is_error() {
        let graph = unit_cycle();
        let area = unit_square();
        let result = RouteGenerator::new(&graph, &area, Weight::TravelTime, RetryPolicy::Unbounded);
        assert!(matches!(
            result,
            Err(CentralityError::MissingWeight(Weight::TravelTime))
        ));
    }
}
