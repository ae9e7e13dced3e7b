use crate::distance::{DistanceMetric, EuclideanDistance};
use crate::error::Result;
use crate::quadtree::geometry::{Point, Rect};
use crate::quadtree::index::QuadTree;
use crate::quadtree::knn::KnnStrategy;
use crate::r#type::QuadTreeNum;

/// The default number of quadrants pre-allocated by [`QuadTreeBuilder::new`]
pub const DEFAULT_QUADTREE_CAPACITY: usize = 64;

/// A builder to configure and create a [`QuadTree`].
///
/// ```
/// use geo_quadtree::distance::ManhattanDistance;
/// use geo_quadtree::quadtree::{KnnStrategy, Point, QuadTree, QuadTreeBuilder};
///
/// let tree: QuadTree<u32, i32, _> =
///     QuadTreeBuilder::new(Point::new(-180, 90), Point::new(180, -90))
///         .metric(ManhattanDistance)
///         .knn_strategy(KnnStrategy::BestFirst)
///         .finish()
///         .unwrap();
/// assert!(tree.is_valid_point(&Point::new(0, 0)));
/// assert!(!tree.is_valid_point(&Point::new(0, 91)));
/// ```
///
/// Closures work as metrics when their argument types are spelled out:
///
/// ```
/// use geo_quadtree::quadtree::{Point, QuadTreeBuilder};
///
/// let mut tree = QuadTreeBuilder::new(Point::new(0., 10.), Point::new(10., 0.))
///     .metric(|a: &Point<f64>, b: &Point<f64>| (a.x - b.x).abs().max((a.y - b.y).abs()))
///     .finish()
///     .unwrap();
/// tree.insert(Point::new(1., 1.), ());
/// assert_eq!(tree.search_k_nearest(&Point::new(4., 3.), 1)[0].1, 3.);
/// ```
#[derive(Debug, Clone)]
pub struct QuadTreeBuilder<S, D = EuclideanDistance> {
    top_left: Point<S>,
    bottom_right: Point<S>,
    metric: D,
    strategy: KnnStrategy,
    capacity: usize,
}

impl<S: QuadTreeNum> QuadTreeBuilder<S> {
    /// Create a new builder for the domain spanned by `top_left` and `bottom_right`, with
    /// Euclidean distance and the default traversal.
    pub fn new(top_left: Point<S>, bottom_right: Point<S>) -> Self {
        Self {
            top_left,
            bottom_right,
            metric: EuclideanDistance,
            strategy: KnnStrategy::default(),
            capacity: DEFAULT_QUADTREE_CAPACITY,
        }
    }
}

impl<S: QuadTreeNum, D: DistanceMetric<S>> QuadTreeBuilder<S, D> {
    /// Use a different distance metric.
    pub fn metric<D2: DistanceMetric<S>>(self, metric: D2) -> QuadTreeBuilder<S, D2> {
        QuadTreeBuilder {
            top_left: self.top_left,
            bottom_right: self.bottom_right,
            metric,
            strategy: self.strategy,
            capacity: self.capacity,
        }
    }

    /// Choose the traversal used by [`QuadTree::search_k_nearest`].
    pub fn knn_strategy(mut self, strategy: KnnStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Pre-allocate room for this many quadrants.
    pub fn capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Validate the domain and create an empty tree.
    pub fn finish<T>(self) -> Result<QuadTree<T, S, D>> {
        let domain = Rect::try_new(self.top_left, self.bottom_right)?;
        log::debug!(
            "creating quadtree over {domain:?} with {:?} neighbor search",
            self.strategy
        );
        Ok(QuadTree::from_parts(
            domain,
            self.metric,
            self.strategy,
            self.capacity,
        ))
    }

    /// Create a tree and insert every item, dropping out-of-domain and duplicate points.
    pub fn build_from<T, I>(self, items: I) -> Result<QuadTree<T, S, D>>
    where
        I: IntoIterator<Item = (Point<S>, T)>,
    {
        let mut tree = self.finish()?;
        tree.extend(items);
        Ok(tree)
    }
}
