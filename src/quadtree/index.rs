use geo_traits::CoordTrait;

use crate::distance::{DistanceMetric, EuclideanDistance};
use crate::error::{QuadTreeError, Result};
use crate::quadtree::builder::QuadTreeBuilder;
use crate::quadtree::geometry::{Point, Rect};
use crate::quadtree::knn::KnnStrategy;
use crate::quadtree::node::{AncestorPath, NodeId, Quadrant, Record, ROOT};
use crate::r#type::QuadTreeNum;

/// A region quadtree over a fixed rectangular domain.
///
/// Each quadrant stores at most one record directly. Inserting a second distinct point into an
/// occupied quadrant splits it at its midpoint and pushes both records down into the children.
/// Quadrants are kept in a flat arena and addressed by [`NodeId`], with the root at `0`.
///
/// ```
/// use geo_quadtree::distance::EuclideanDistance;
/// use geo_quadtree::quadtree::{Point, QuadTree};
///
/// let mut tree = QuadTree::new(Point::new(0., 100.), Point::new(100., 0.), EuclideanDistance)
///     .unwrap();
/// tree.insert(Point::new(10., 10.), "A");
/// tree.insert(Point::new(90., 90.), "B");
/// tree.insert(Point::new(50., 50.), "C");
///
/// assert_eq!(tree.search(&Point::new(50., 50.)).map(|r| *r.tag()), Some("C"));
///
/// let nearest: Vec<_> = tree
///     .search_k_nearest(&Point::new(49., 49.), 2)
///     .into_iter()
///     .map(|(record, _distance)| *record.tag())
///     .collect();
/// assert_eq!(nearest, vec!["C", "A"]);
/// ```
#[derive(Debug, Clone)]
pub struct QuadTree<T, S, D = EuclideanDistance> {
    /// Empty once the tree has been cleared
    pub(crate) nodes: Vec<Quadrant<T, S>>,
    pub(crate) metric: D,
    pub(crate) strategy: KnnStrategy,
}

/// Outcome of placing a record into a subtree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Placement {
    Stored,
    OutOfBounds,
    Duplicate,
    Indivisible,
}

/// The result of [`QuadTree::locate`], which tells a miss inside the domain apart from a point
/// the tree could never hold.
#[derive(Debug, PartialEq)]
pub enum Lookup<'a, T, S> {
    /// A record exists at exactly these coordinates.
    Found(&'a Record<T, S>),
    /// The point is inside the domain but nothing is stored there.
    NotFound,
    /// The point is outside the domain, or the tree has been cleared.
    OutOfDomain,
}

impl<'a, T, S> Lookup<'a, T, S> {
    /// The record, if one was found.
    pub fn found(self) -> Option<&'a Record<T, S>> {
        match self {
            Self::Found(record) => Some(record),
            _ => None,
        }
    }
}

impl<T, S> Clone for Lookup<'_, T, S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T, S> Copy for Lookup<'_, T, S> {}

impl<T, S: QuadTreeNum, D: DistanceMetric<S>> QuadTree<T, S, D> {
    /// Create an empty tree over the rectangle spanned by `top_left` and `bottom_right`.
    ///
    /// Use [`QuadTreeBuilder`] for the remaining options.
    pub fn new(top_left: Point<S>, bottom_right: Point<S>, metric: D) -> Result<Self> {
        QuadTreeBuilder::new(top_left, bottom_right)
            .metric(metric)
            .finish()
    }

    pub(crate) fn from_parts(
        domain: Rect<S>,
        metric: D,
        strategy: KnnStrategy,
        capacity: usize,
    ) -> Self {
        let mut nodes = Vec::with_capacity(capacity.max(1));
        nodes.push(Quadrant::new(domain));
        Self {
            nodes,
            metric,
            strategy,
        }
    }
}

impl<T, S: QuadTreeNum, D> QuadTree<T, S, D> {
    /// Insert a tagged point.
    ///
    /// Points outside the domain and points whose coordinates are already stored are dropped
    /// silently; the first tag at a coordinate wins. Use [`try_insert`][Self::try_insert] to
    /// observe rejections.
    pub fn insert(&mut self, point: Point<S>, tag: T) {
        if let Err(err) = self.try_insert(point, tag) {
            log::trace!("dropped insert: {err}");
        }
    }

    /// Insert a tagged point, reporting why it was rejected.
    ///
    /// On error the tree is unchanged and the tag is dropped.
    pub fn try_insert(&mut self, point: Point<S>, tag: T) -> Result<()> {
        if self.nodes.is_empty() {
            return Err(QuadTreeError::Cleared);
        }

        let (x, y) = (point.x.as_f64(), point.y.as_f64());
        match self.insert_at(ROOT, Record::new(point, tag)) {
            Placement::Stored => Ok(()),
            Placement::OutOfBounds => Err(QuadTreeError::OutOfDomain { x, y }),
            Placement::Duplicate => Err(QuadTreeError::Duplicate { x, y }),
            Placement::Indivisible => Err(QuadTreeError::Indivisible { x, y }),
        }
    }

    /// Insert a tagged point given as any [`CoordTrait`].
    pub fn insert_coord(&mut self, coord: &impl CoordTrait<T = S>, tag: T) {
        self.insert(Point::from_coord(coord), tag)
    }

    /// Place `record` in the subtree rooted at `id`.
    fn insert_at(&mut self, id: NodeId, record: Record<T, S>) -> Placement {
        let quadrant = &self.nodes[id];
        if !quadrant.rect.contains(&record.point()) {
            return Placement::OutOfBounds;
        }

        if let Some(held) = &quadrant.record {
            if held.point() == record.point() {
                return Placement::Duplicate;
            }
            // Check before touching anything so that a failed split leaves the tree unchanged
            if !quadrant.rect.separates(&held.point(), &record.point()) {
                return Placement::Indivisible;
            }
        }

        if self.nodes[id].is_vacant() {
            let quadrant = &mut self.nodes[id];
            quadrant.record = Some(record);
            quadrant.count = 1;
            return Placement::Stored;
        }

        let displaced = self.nodes[id].record.take();
        let placement = self.insert_into_child(id, record);
        if let Some(displaced) = displaced {
            log::trace!("splitting quadrant {id} at {:?}", self.nodes[id].rect.mid());
            let replaced = self.insert_into_child(id, displaced);
            debug_assert_eq!(replaced, Placement::Stored);
        }

        if placement == Placement::Stored {
            self.nodes[id].count += 1;
        }
        placement
    }

    /// Route `record` to the child of `id` selected by the midpoint rule, allocating it on first
    /// use.
    fn insert_into_child(&mut self, id: NodeId, record: Record<T, S>) -> Placement {
        let rect = self.nodes[id].rect;
        let slot = rect.slot_of(&record.point());
        let child = match self.nodes[id].child(slot) {
            Some(child) => child,
            None => {
                let child = self.nodes.len();
                self.nodes.push(Quadrant::new(rect.child_rect(slot)));
                self.nodes[id].children[slot.index()] = Some(child);
                child
            }
        };
        self.insert_at(child, record)
    }

    /// Descend from `from` toward `target`, pushing every visited quadrant onto `path`.
    ///
    /// Returns the quadrant where the descent stopped if it holds a record. That record's
    /// coordinates need not equal `target`.
    pub(crate) fn descend(
        &self,
        from: NodeId,
        target: &Point<S>,
        path: &mut AncestorPath,
    ) -> Option<NodeId> {
        let mut id = from;
        loop {
            path.push(id);
            let quadrant = &self.nodes[id];
            if !quadrant.rect.contains(target) {
                return None;
            }
            if quadrant.record.is_some() {
                return Some(id);
            }
            id = quadrant.child(quadrant.rect.slot_of(target))?;
        }
    }

    /// Find the record stored at exactly these coordinates.
    pub fn search(&self, point: &Point<S>) -> Option<&Record<T, S>> {
        self.search_with_path(point).0
    }

    /// Find the record stored at exactly the coordinates of `coord`.
    pub fn search_coord(&self, coord: &impl CoordTrait<T = S>) -> Option<&Record<T, S>> {
        self.search(&Point::from_coord(coord))
    }

    /// Like [`search`][Self::search], also returning every quadrant visited from the root down,
    /// whether or not the search succeeded.
    pub fn search_with_path(&self, point: &Point<S>) -> (Option<&Record<T, S>>, Vec<NodeId>) {
        if self.nodes.is_empty() {
            return (None, vec![]);
        }

        let mut path = AncestorPath::new();
        let record = self
            .descend(ROOT, point, &mut path)
            .and_then(|id| self.nodes[id].record.as_ref())
            .filter(|record| record.point() == *point);
        (record, path.to_vec())
    }

    /// Look up a point, distinguishing a miss inside the domain from an out-of-domain point.
    pub fn locate(&self, point: &Point<S>) -> Lookup<'_, T, S> {
        if !self.is_valid_point(point) {
            return Lookup::OutOfDomain;
        }
        match self.search(point) {
            Some(record) => Lookup::Found(record),
            None => Lookup::NotFound,
        }
    }

    /// Returns `true` if the point lies within the domain. Always `false` after
    /// [`clear`][Self::clear].
    pub fn is_valid_point(&self, point: &Point<S>) -> bool {
        self.nodes
            .first()
            .is_some_and(|root| root.rect.contains(point))
    }

    /// The domain rectangle, or `None` after [`clear`][Self::clear].
    pub fn domain(&self) -> Option<Rect<S>> {
        self.nodes.first().map(|root| root.rect)
    }

    /// Discard every quadrant and record, including the domain.
    ///
    /// This is a destructive reset, not a resize: inserts are ignored until a new domain is set
    /// with [`reconfigure`][Self::reconfigure].
    pub fn clear(&mut self) {
        log::debug!("clearing quadtree with {} records", self.len());
        self.nodes = Vec::new();
    }

    /// Discard the contents and start over with an empty tree on a new domain.
    ///
    /// On error the tree is left untouched.
    pub fn reconfigure(&mut self, top_left: Point<S>, bottom_right: Point<S>) -> Result<()> {
        let domain = Rect::try_new(top_left, bottom_right)?;
        log::debug!("reconfiguring quadtree to {domain:?}");
        self.nodes.clear();
        self.nodes.push(Quadrant::new(domain));
        Ok(())
    }

    /// The number of records stored.
    pub fn len(&self) -> usize {
        self.nodes.first().map_or(0, |root| root.count)
    }

    /// Returns `true` if no records are stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The number of allocated quadrants, including the root.
    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
    }

    /// The number of levels of the tree. A lone root counts as one level and a cleared tree has
    /// none.
    pub fn depth(&self) -> usize {
        if self.nodes.is_empty() {
            return 0;
        }

        let mut deepest = 0;
        let mut stack = vec![(ROOT, 1)];
        while let Some((id, level)) = stack.pop() {
            deepest = deepest.max(level);
            for child in self.nodes[id].allocated_children() {
                stack.push((child, level + 1));
            }
        }
        deepest
    }

    /// Iterate over every stored record in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = &Record<T, S>> + '_ {
        self.nodes.iter().filter_map(|quadrant| quadrant.record.as_ref())
    }

    /// The configured distance metric.
    pub fn metric(&self) -> &D {
        &self.metric
    }

    /// The traversal used by [`search_k_nearest`][Self::search_k_nearest].
    pub fn knn_strategy(&self) -> KnnStrategy {
        self.strategy
    }
}

impl<T, S: QuadTreeNum, D> Extend<(Point<S>, T)> for QuadTree<T, S, D> {
    fn extend<I: IntoIterator<Item = (Point<S>, T)>>(&mut self, iter: I) {
        for (point, tag) in iter {
            self.insert(point, tag);
        }
    }
}
