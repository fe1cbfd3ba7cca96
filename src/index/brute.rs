use super::{Metric, RadiusIndex};
use crate::types::PointSet;
use std::ops::ControlFlow;

/// Exhaustive scan; every query touches all N points.
#[derive(Clone, Debug)]
pub struct BruteForce<'a> {
    points: PointSet<'a>,
    eps: f32,
    metric: Metric,
    threshold: f64,
}

impl<'a> BruteForce<'a> {
    pub fn new(points: PointSet<'a>, eps: f32, metric: Metric) -> Self {
        Self {
            points,
            eps,
            metric,
            threshold: metric.threshold(eps),
        }
    }
}

impl RadiusIndex for BruteForce<'_> {
    fn points(&self) -> PointSet<'_> {
        self.points
    }

    fn eps(&self) -> f32 {
        self.eps
    }

    fn metric(&self) -> Metric {
        self.metric
    }

    fn visit_within<F>(&self, query: &[f32], mut visit: F)
    where
        F: FnMut(usize) -> ControlFlow<()>,
    {
        for j in 0..self.points.len() {
            if self.metric.within(query, self.points.point(j), self.threshold)
                && visit(j).is_break()
            {
                return;
            }
        }
    }
}
