use super::{RetryPolicy, SampledPoint};
use crate::algorithm::CentralityError;
use crate::model::study_area::StudyArea;
use geo::Point;
use itertools::Itertools;
use rand::Rng;

/// points held by a completed sample along with the number of candidate
/// batches it took to collect them.
#[derive(Debug, Clone, PartialEq)]
pub struct PointSample {
    pub points: Vec<Point<f64>>,
    pub batches: u64,
}

/// rejection sampler of uniform points inside a study area polygon.
///
/// candidates are drawn uniformly over the bounding box. each batch only
/// redraws the shortfall of the previous one, and in-polygon points are kept
/// in the order they were accepted.
#[derive(Debug, Clone, Copy)]
pub struct PolygonSampler<'a> {
    study_area: &'a StudyArea,
    retry_policy: RetryPolicy,
}

impl<'a> PolygonSampler<'a> {
    pub fn new(study_area: &'a StudyArea, retry_policy: RetryPolicy) -> PolygonSampler<'a> {
        PolygonSampler {
            study_area,
            retry_policy,
        }
    }

    pub fn study_area(&self) -> &StudyArea {
        self.study_area
    }

    /// draws exactly `n` points strictly inside the study area. fails only if
    /// the retry policy is exhausted before the sample is complete.
    pub fn sample_points<R: Rng>(
        &self,
        n: usize,
        rng: &mut R,
    ) -> Result<PointSample, CentralityError> {
        let mut points: Vec<Point<f64>> = Vec::with_capacity(n);
        let mut batches: u64 = 0;
        while points.len() < n {
            batches += 1;
            if !self.retry_policy.permits(batches) {
                return Err(CentralityError::SamplerExhausted(
                    batches - 1,
                    n,
                    String::from(self.study_area.name()),
                ));
            }
            let shortfall = n - points.len();
            let accepted = self
                .draw_candidates(shortfall, rng)
                .into_iter()
                .filter(|c| c.inside)
                .map(|c| c.point)
                .collect_vec();
            log::trace!(
                "sampler batch {batches}: {} of {shortfall} candidates inside '{}'",
                accepted.len(),
                self.study_area.name()
            );
            points.extend(accepted);
        }
        Ok(PointSample { points, batches })
    }

    /// draws `n` uniform candidates over the bounding box.
    pub fn draw_candidates<R: Rng>(&self, n: usize, rng: &mut R) -> Vec<SampledPoint> {
        let bounds = self.study_area.bounding_rect();
        let (min, max) = (bounds.min(), bounds.max());
        (0..n)
            .map(|_| {
                let x = rng.random_range(min.x..=max.x);
                let y = rng.random_range(min.y..=max.y);
                SampledPoint::new(Point::new(x, y), self.study_area)
            })
            .collect_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::PolygonSampler;
    use crate::algorithm::sampling::RetryPolicy;
    use crate::algorithm::CentralityError;
    use crate::model::study_area::StudyArea;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn l_shape() -> StudyArea {
        StudyArea::from_wkt_str(
            "l-shape",
            "POLYGON ((0 0, 2 0, 2 1, 1 1, 1 2, 0 2, 0 0))",
        )
        .expect("valid polygon")
    }

    #[test]
    fn exact_count_inside() {
        let area = l_shape();
        let sampler = PolygonSampler::new(&area, RetryPolicy::Unbounded);
        let mut rng = StdRng::seed_from_u64(42);
        let sample = sampler.sample_points(200, &mut rng).expect("should sample");
        assert_eq!(sample.points.len(), 200);
        assert!(sample.batches >= 1);
        for p in sample.points.iter() {
            assert!(area.contains(p), "point {p:?} outside of polygon");
            // the notch of the L is never sampled
            assert!(!(p.x() > 1.0 && p.y() > 1.0));
        }
    }

    #[test]
    fn zero_points_is_empty() {
        let area = l_shape();
        let sampler = PolygonSampler::new(&area, RetryPolicy::Unbounded);
        let mut rng = StdRng::seed_from_u64(0);
        let sample = sampler.sample_points(0, &mut rng).expect("should sample");
        assert!(sample.points.is_empty());
        assert_eq!(sample.batches, 0);
    }

    #[test]
    fn same_seed_same_points() {
        let area = l_shape();
        let sampler = PolygonSampler::new(&area, RetryPolicy::Unbounded);
        let a = sampler
            .sample_points(10, &mut StdRng::seed_from_u64(7))
            .expect("should sample");
        let b = sampler
            .sample_points(10, &mut StdRng::seed_from_u64(7))
            .expect("should sample");
        assert_eq!(a, b);
    }

    #[test]
    fn sliver_exhausts_bounded_policy() {
        // a thin diagonal sliver covers a tiny fraction of its bounding box
        let area = StudyArea::from_wkt_str(
            "sliver",
            "POLYGON ((0 0, 1000 1000, 1000 1000.000001, 0 0))",
        )
        .expect("valid polygon");
        let sampler = PolygonSampler::new(&area, RetryPolicy::MaxAttempts { max_attempts: 3 });
        let mut rng = StdRng::seed_from_u64(1);
        match sampler.sample_points(50, &mut rng) {
            Err(CentralityError::SamplerExhausted(attempts, n, name)) => {
                assert_eq!(attempts, 3);
                assert_eq!(n, 50);
                assert_eq!(name, "sliver");
            }
            other => panic!("unexpected result {other:?}"),
        }
    }
}
