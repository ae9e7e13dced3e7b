//! Neighbor, radius and range queries.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

use geo_traits::{CoordTrait, RectTrait};

use crate::distance::DistanceMetric;
use crate::quadtree::geometry::Point;
use crate::quadtree::index::QuadTree;
use crate::quadtree::node::{AncestorPath, NodeId, Record, ROOT};
use crate::r#type::QuadTreeNum;

/// How [`QuadTree::search_k_nearest`] walks the tree.
///
/// Both traversals skip a quadrant only when the distance from the query to the closest point of
/// its rectangle cannot beat the current `k`-th candidate, so they return the same neighbors for
/// any metric that respects that bound. They differ in the order quadrants are visited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KnnStrategy {
    /// Descend to the quadrant containing the query, then walk back up the ancestor path and
    /// search each unvisited sibling, aiming at the sibling's closest point to the query.
    #[default]
    Backtracking,
    /// Visit quadrants and records from a priority queue ordered by their lower-bound distance.
    BestFirst,
}

/// A distance-sorted list holding at most `k` candidates.
#[derive(Debug, Clone)]
pub(crate) struct CandidateList {
    k: usize,
    entries: Vec<(NodeId, f64)>,
}

impl CandidateList {
    pub(crate) fn new(k: usize) -> Self {
        Self {
            k,
            entries: Vec::new(),
        }
    }

    #[inline]
    pub(crate) fn is_full(&self) -> bool {
        self.entries.len() >= self.k
    }

    /// Distance of the last candidate when the list is full.
    #[inline]
    fn worst(&self) -> Option<f64> {
        if self.is_full() {
            self.entries.last().map(|&(_, distance)| distance)
        } else {
            None
        }
    }

    /// Insert at the sorted position, after any equal distances, and drop whatever falls past
    /// `k`.
    pub(crate) fn offer(&mut self, id: NodeId, distance: f64) {
        if self.k == 0 {
            return;
        }
        if self.worst().is_some_and(|worst| distance.total_cmp(&worst).is_ge()) {
            return;
        }
        let pos = self
            .entries
            .partition_point(|&(_, d)| d.total_cmp(&distance).is_le());
        self.entries.insert(pos, (id, distance));
        self.entries.truncate(self.k);
    }

    /// Returns `true` if something at distance `bound` could still enter the list.
    #[inline]
    pub(crate) fn admits(&self, bound: f64) -> bool {
        match self.worst() {
            Some(worst) => worst > bound,
            None => self.k > 0,
        }
    }

    pub(crate) fn into_vec(self) -> Vec<(NodeId, f64)> {
        self.entries
    }
}

/// State of one backtracking query.
struct Backtracking<'a, T, S, D> {
    tree: &'a QuadTree<T, S, D>,
    query: Point<S>,
    candidates: CandidateList,
}

impl<T, S: QuadTreeNum, D: DistanceMetric<S>> Backtracking<'_, T, S, D> {
    /// Search the subtree at `quadrant`, descending toward `target` first.
    ///
    /// Distances are always measured to the query point itself, never to `target`.
    fn explore(&mut self, quadrant: NodeId, target: Point<S>) {
        let tree = self.tree;

        let mut path = AncestorPath::new();
        if let Some(id) = tree.descend(quadrant, &target, &mut path) {
            if let Some(record) = &tree.nodes[id].record {
                let distance = tree.metric.distance(&self.query, &record.point());
                self.candidates.offer(id, distance);
            }
        }

        // A leaf at the end of the path has been handled. A subdivided quadrant there means the
        // descent hit a missing child, and its other children still need a look.
        let mut came_from = None;
        let mut end = path.len();
        if let Some(&last) = path.last() {
            if !tree.nodes[last].is_subdivided() {
                came_from = Some(last);
                end -= 1;
            }
        }

        for &ancestor in path[..end].iter().rev() {
            for sibling in tree.nodes[ancestor].allocated_children() {
                if Some(sibling) == came_from {
                    continue;
                }
                let closest = tree.nodes[sibling].rect.closest_point(&self.query);
                let bound = tree.metric.distance(&self.query, &closest);
                if self.candidates.admits(bound) {
                    self.explore(sibling, closest);
                }
            }
            came_from = Some(ancestor);
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum QueueItem {
    // Records sort before quadrants at equal distance
    Record(NodeId),
    Quadrant(NodeId),
}

/// A wrapper around a queue item and its distance for use in the priority queue.
#[derive(Debug, Clone, Copy)]
struct QueueEntry {
    distance: f64,
    item: QueueItem,
}

impl PartialEq for QueueEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for QueueEntry {}

impl Ord for QueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.distance
            .total_cmp(&other.distance)
            .then_with(|| self.item.cmp(&other.item))
    }
}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T, S: QuadTreeNum, D: DistanceMetric<S>> QuadTree<T, S, D> {
    /// Lower bound on the distance from `query` to anything stored under `id`.
    #[inline]
    fn bound(&self, id: NodeId, query: &Point<S>) -> f64 {
        let closest = self.nodes[id].rect.closest_point(query);
        self.metric.distance(query, &closest)
    }

    fn records_for(&self, found: Vec<(NodeId, f64)>) -> Vec<(&Record<T, S>, f64)> {
        found
            .into_iter()
            .filter_map(|(id, distance)| {
                self.nodes[id]
                    .record
                    .as_ref()
                    .map(|record| (record, distance))
            })
            .collect()
    }

    /// Find up to `k` records nearest to `point` under the configured metric, closest first.
    ///
    /// Fewer than `k` records are returned when the tree holds fewer. A query outside the domain
    /// starts from the nearest point of the domain but still measures distances to `point`.
    pub fn search_k_nearest(&self, point: &Point<S>, k: usize) -> Vec<(&Record<T, S>, f64)> {
        self.search_k_nearest_with(point, k, self.strategy)
    }

    /// Like [`search_k_nearest`][Self::search_k_nearest] with an explicit traversal.
    pub fn search_k_nearest_with(
        &self,
        point: &Point<S>,
        k: usize,
        strategy: KnnStrategy,
    ) -> Vec<(&Record<T, S>, f64)> {
        if k == 0 || self.is_empty() {
            return vec![];
        }

        let found = match strategy {
            KnnStrategy::Backtracking => self.backtracking(point, k),
            KnnStrategy::BestFirst => self.best_first(point, k),
        };
        log::trace!(
            "{strategy:?} search at {point:?} found {} of {k} neighbors",
            found.len()
        );
        self.records_for(found)
    }

    /// Find up to `k` records nearest to `coord`, closest first.
    pub fn search_k_nearest_coord(
        &self,
        coord: &impl CoordTrait<T = S>,
        k: usize,
    ) -> Vec<(&Record<T, S>, f64)> {
        self.search_k_nearest(&Point::from_coord(coord), k)
    }

    fn backtracking(&self, point: &Point<S>, k: usize) -> Vec<(NodeId, f64)> {
        let mut search = Backtracking {
            tree: self,
            query: *point,
            candidates: CandidateList::new(k),
        };
        let start = self.nodes[ROOT].rect.closest_point(point);
        search.explore(ROOT, start);
        search.candidates.into_vec()
    }

    fn best_first(&self, point: &Point<S>, k: usize) -> Vec<(NodeId, f64)> {
        let mut queue = BinaryHeap::new();
        let mut results = Vec::new();

        queue.push(Reverse(QueueEntry {
            distance: self.bound(ROOT, point),
            item: QueueItem::Quadrant(ROOT),
        }));

        while let Some(Reverse(entry)) = queue.pop() {
            match entry.item {
                QueueItem::Record(id) => {
                    results.push((id, entry.distance));
                    if results.len() == k {
                        break;
                    }
                }
                QueueItem::Quadrant(id) => {
                    let quadrant = &self.nodes[id];
                    if let Some(record) = &quadrant.record {
                        queue.push(Reverse(QueueEntry {
                            distance: self.metric.distance(point, &record.point()),
                            item: QueueItem::Record(id),
                        }));
                    }
                    for child in quadrant.allocated_children() {
                        queue.push(Reverse(QueueEntry {
                            distance: self.bound(child, point),
                            item: QueueItem::Quadrant(child),
                        }));
                    }
                }
            }
        }

        results
    }

    /// Find every record within `radius` of `point`, closest first.
    pub fn within(&self, point: &Point<S>, radius: f64) -> Vec<(&Record<T, S>, f64)> {
        if self.nodes.is_empty() {
            return vec![];
        }

        let mut stack = vec![ROOT];
        let mut results = vec![];
        while let Some(id) = stack.pop() {
            if self.bound(id, point) > radius {
                continue;
            }
            let quadrant = &self.nodes[id];
            if let Some(record) = &quadrant.record {
                let distance = self.metric.distance(point, &record.point());
                if distance <= radius {
                    results.push((record, distance));
                }
            }
            stack.extend(quadrant.allocated_children());
        }

        results.sort_by(|a, b| a.1.total_cmp(&b.1));
        results
    }

    /// Search the tree for records inside the given bounding box, boundaries included.
    ///
    /// Results are in no particular order.
    pub fn range(&self, min_x: S, min_y: S, max_x: S, max_y: S) -> Vec<&Record<T, S>> {
        if self.nodes.is_empty() {
            return vec![];
        }

        let mut stack = vec![ROOT];
        let mut results = vec![];
        while let Some(id) = stack.pop() {
            let quadrant = &self.nodes[id];
            if !quadrant.rect.intersects(min_x, min_y, max_x, max_y) {
                continue;
            }
            if let Some(record) = &quadrant.record {
                let p = record.point();
                if p.x >= min_x && p.x <= max_x && p.y >= min_y && p.y <= max_y {
                    results.push(record);
                }
            }
            stack.extend(quadrant.allocated_children());
        }
        results
    }

    /// Search the tree for records inside the given rectangle.
    pub fn range_rect(&self, rect: &impl RectTrait<T = S>) -> Vec<&Record<T, S>> {
        self.range(
            rect.min().x(),
            rect.min().y(),
            rect.max().x(),
            rect.max().y(),
        )
    }

    /// Run [`search_k_nearest`][Self::search_k_nearest] for many points in parallel.
    ///
    /// Queries never mutate the tree, so they can share it across threads.
    #[cfg(feature = "rayon")]
    pub fn search_k_nearest_batch(
        &self,
        points: &[Point<S>],
        k: usize,
    ) -> Vec<Vec<(&Record<T, S>, f64)>>
    where
        T: Sync,
        D: Sync,
    {
        use rayon::prelude::*;

        points
            .par_iter()
            .map(|point| self.search_k_nearest(point, k))
            .collect()
    }
}
