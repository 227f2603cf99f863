use super::{aggregate, score, CentralityResult};
use crate::algorithm::routing::{DrawStatistics, RouteGenerator, RouteRecord};
use crate::algorithm::sampling::RetryPolicy;
use crate::algorithm::CentralityError;
use crate::model::network::{EdgeAttributeTable, RoadGraph, Weight};
use crate::model::study_area::StudyArea;
use rand::Rng;

/// output of one geographic centrality run.
#[derive(Debug, Clone)]
pub struct GeographicalRun {
    pub result: CentralityResult<u64>,
    pub routes: Vec<RouteRecord>,
    pub statistics: DrawStatistics,
}

/// Monte-Carlo estimate of how central each edge is to movement within a
/// study area: edges are scored by how many random trips between points in
/// the area traverse them.
pub struct GeographicalCentrality<'a> {
    graph: &'a RoadGraph,
    study_area: &'a StudyArea,
    edge_attributes: &'a EdgeAttributeTable,
    weight: Weight,
    number_of_routes: usize,
    retry_policy: RetryPolicy,
}

impl<'a> GeographicalCentrality<'a> {
    pub fn new(
        graph: &'a RoadGraph,
        study_area: &'a StudyArea,
        edge_attributes: &'a EdgeAttributeTable,
        weight: Weight,
        number_of_routes: usize,
        retry_policy: RetryPolicy,
    ) -> GeographicalCentrality<'a> {
        GeographicalCentrality {
            graph,
            study_area,
            edge_attributes,
            weight,
            number_of_routes,
            retry_policy,
        }
    }

    /// samples routes, aggregates their edges and scores edge usage.
    pub fn run<R: Rng>(&self, rng: &mut R) -> Result<GeographicalRun, CentralityError> {
        log::info!(
            "generating {} random {} routes in '{}'",
            self.number_of_routes,
            self.weight,
            self.study_area.name()
        );
        let generator =
            RouteGenerator::new(self.graph, self.study_area, self.weight, self.retry_policy)?;
        let (routes, statistics) = generator.generate_routes(self.number_of_routes, rng)?;
        let occurrences = aggregate(&routes);
        let result = score(
            &occurrences,
            self.edge_attributes,
            self.number_of_routes,
            self.study_area.name(),
        )?;
        log::info!(
            "scored {} edges from {} edge occurrences",
            result.len(),
            occurrences.len()
        );
        Ok(GeographicalRun {
            result,
            routes,
            statistics,
        })
    }
}
