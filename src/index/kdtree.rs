use super::{Metric, RadiusIndex};
use crate::types::PointSet;
use std::ops::ControlFlow;

/// Maximum number of points stored in a leaf.
pub const LEAF_SIZE: usize = 10;

/// Subtrees smaller than this are built on the calling thread.
#[cfg(feature = "parallel")]
const PARALLEL_BUILD_MIN: usize = 4096;

#[derive(Debug)]
enum Node {
    Leaf {
        start: usize,
        end: usize,
    },
    Split {
        axis: usize,
        value: f32,
        left: Box<Node>,
        right: Box<Node>,
    },
}

/// Balanced k-d tree over point indices.
///
/// Each split partitions on the axis of largest spread at the median point,
/// so left holds coordinates `<= value` and right `>= value`. Leaves refer to
/// contiguous ranges of `order`.
#[derive(Debug)]
pub struct KdTree<'a> {
    points: PointSet<'a>,
    eps: f32,
    metric: Metric,
    threshold: f64,
    order: Vec<usize>,
    root: Node,
}

impl<'a> KdTree<'a> {
    pub fn build(points: PointSet<'a>, eps: f32, metric: Metric, parallel: bool) -> Self {
        let mut order: Vec<usize> = (0..points.len()).collect();
        let root = build_node(points, &mut order, 0, parallel);
        Self {
            points,
            eps,
            metric,
            threshold: metric.threshold(eps),
            order,
            root,
        }
    }

    pub fn depth(&self) -> usize {
        fn depth_of(node: &Node) -> usize {
            match node {
                Node::Leaf { .. } => 1,
                Node::Split { left, right, .. } => 1 + depth_of(left).max(depth_of(right)),
            }
        }
        depth_of(&self.root)
    }

    fn visit_node<F>(&self, node: &Node, query: &[f32], visit: &mut F) -> ControlFlow<()>
    where
        F: FnMut(usize) -> ControlFlow<()>,
    {
        match node {
            Node::Leaf { start, end } => {
                for &j in &self.order[*start..*end] {
                    if self.metric.within(query, self.points.point(j), self.threshold) {
                        visit(j)?;
                    }
                }
                ControlFlow::Continue(())
            }
            Node::Split {
                axis,
                value,
                left,
                right,
            } => {
                let q = query[*axis];
                if q <= *value {
                    self.visit_node(left, query, visit)?;
                    if !self.metric.axis_excludes(q, *value, self.threshold) {
                        self.visit_node(right, query, visit)?;
                    }
                } else {
                    self.visit_node(right, query, visit)?;
                    if !self.metric.axis_excludes(q, *value, self.threshold) {
                        self.visit_node(left, query, visit)?;
                    }
                }
                ControlFlow::Continue(())
            }
        }
    }
}

impl RadiusIndex for KdTree<'_> {
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
        let _ = self.visit_node(&self.root, query, &mut visit);
    }
}

fn build_node(points: PointSet<'_>, order: &mut [usize], offset: usize, parallel: bool) -> Node {
    let len = order.len();
    let leaf = Node::Leaf {
        start: offset,
        end: offset + len,
    };
    if len <= LEAF_SIZE {
        return leaf;
    }
    let Some(axis) = widest_axis(points, order) else {
        // All points coincide; no split can separate them.
        return leaf;
    };

    let mid = len / 2;
    order.select_nth_unstable_by(mid, |&a, &b| {
        points
            .coord(a, axis)
            .total_cmp(&points.coord(b, axis))
            .then(a.cmp(&b))
    });
    let value = points.coord(order[mid], axis);
    let (lo, hi) = order.split_at_mut(mid);

    let (left, right) = build_children(points, lo, hi, offset, mid, parallel);
    Node::Split {
        axis,
        value,
        left: Box::new(left),
        right: Box::new(right),
    }
}

#[cfg(feature = "parallel")]
fn build_children(
    points: PointSet<'_>,
    lo: &mut [usize],
    hi: &mut [usize],
    offset: usize,
    mid: usize,
    parallel: bool,
) -> (Node, Node) {
    if parallel && lo.len() + hi.len() >= PARALLEL_BUILD_MIN {
        rayon::join(
            || build_node(points, lo, offset, parallel),
            || build_node(points, hi, offset + mid, parallel),
        )
    } else {
        (
            build_node(points, lo, offset, parallel),
            build_node(points, hi, offset + mid, parallel),
        )
    }
}

#[cfg(not(feature = "parallel"))]
fn build_children(
    points: PointSet<'_>,
    lo: &mut [usize],
    hi: &mut [usize],
    offset: usize,
    mid: usize,
    parallel: bool,
) -> (Node, Node) {
    (
        build_node(points, lo, offset, parallel),
        build_node(points, hi, offset + mid, parallel),
    )
}

/// Axis with the largest coordinate range, or `None` when every range is zero.
fn widest_axis(points: PointSet<'_>, order: &[usize]) -> Option<usize> {
    let mut best: Option<(usize, f32)> = None;
    for axis in 0..points.dim() {
        let mut lo = f32::INFINITY;
        let mut hi = f32::NEG_INFINITY;
        for &i in order {
            let v = points.coord(i, axis);
            lo = lo.min(v);
            hi = hi.max(v);
        }
        let spread = hi - lo;
        if spread > 0.0 && best.map_or(true, |(_, s)| spread > s) {
            best = Some((axis, spread));
        }
    }
    best.map(|(axis, _)| axis)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tree_is_balanced() {
        let data: Vec<f32> = (0..1000).map(|i| i as f32).collect();
        let points = PointSet::new(&data, 1000, 1).unwrap();
        let tree = KdTree::build(points, 1.0, Metric::Euclidean, false);
        // 1000 points, leaves of <= 10: ceil(log2(100)) + 1 levels.
        assert!(tree.depth() <= 9, "depth={}", tree.depth());
        assert_eq!(tree.query(500), vec![499, 500, 501]);
    }

    #[test]
    fn coincident_points_collapse_into_one_leaf() {
        let data = vec![2.0f32; 64];
        let points = PointSet::new(&data, 32, 2).unwrap();
        let tree = KdTree::build(points, 0.0, Metric::Euclidean, false);
        assert_eq!(tree.depth(), 1);
        assert_eq!(tree.query(7).len(), 32);
    }

    #[test]
    fn visit_stops_on_break() {
        let data: Vec<f32> = (0..100).map(|i| (i % 10) as f32 * 0.01).collect();
        let points = PointSet::new(&data, 100, 1).unwrap();
        let tree = KdTree::build(points, 1.0, Metric::Euclidean, false);
        let mut seen = 0;
        tree.visit_within(points.point(0), |_| {
            seen += 1;
            if seen == 5 {
                ControlFlow::Break(())
            } else {
                ControlFlow::Continue(())
            }
        });
        assert_eq!(seen, 5);
    }
}
