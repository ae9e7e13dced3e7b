//! Utilities to traverse the QuadTree structure.

use geo_traits::{
    GeometryTrait, GeometryType, RectTrait, UnimplementedGeometryCollection, UnimplementedLine,
    UnimplementedLineString, UnimplementedMultiLineString, UnimplementedMultiPoint,
    UnimplementedMultiPolygon, UnimplementedPoint, UnimplementedPolygon, UnimplementedTriangle,
};

use crate::quadtree::geometry::{ChildSlot, Point, Rect};
use crate::quadtree::index::QuadTree;
use crate::quadtree::node::{NodeId, Record, ROOT};
use crate::r#type::QuadTreeNum;

/// A quadrant in the QuadTree.
#[derive(Debug)]
pub struct Node<'a, T, S, D> {
    /// The tree that this node is a reference onto
    tree: &'a QuadTree<T, S, D>,
    id: NodeId,
}

impl<T, S, D> Clone for Node<'_, T, S, D> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T, S, D> Copy for Node<'_, T, S, D> {}

impl<'a, T, S: QuadTreeNum, D> Node<'a, T, S, D> {
    fn new(tree: &'a QuadTree<T, S, D>, id: NodeId) -> Self {
        Self { tree, id }
    }

    /// The arena position of this quadrant. Matches the ids returned by
    /// [`QuadTree::search_with_path`].
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// The region covered by this quadrant.
    pub fn rect(&self) -> Rect<S> {
        self.tree.nodes[self.id].rect
    }

    /// The record held directly by this quadrant. Only undivided quadrants hold one.
    pub fn record(&self) -> Option<&'a Record<T, S>> {
        self.tree.nodes[self.id].record.as_ref()
    }

    /// The number of records in this subtree.
    pub fn len(&self) -> usize {
        self.tree.nodes[self.id].count
    }

    /// Returns `true` if nothing is stored in this subtree.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns `true` if this quadrant has not been subdivided.
    pub fn is_leaf(&self) -> bool {
        !self.tree.nodes[self.id].is_subdivided()
    }

    /// Returns `true` if this quadrant has at least one child.
    pub fn is_parent(&self) -> bool {
        !self.is_leaf()
    }

    /// The child in the given slot, if it has been allocated.
    pub fn child(&self, slot: ChildSlot) -> Option<Node<'a, T, S, D>> {
        self.tree.nodes[self.id]
            .child(slot)
            .map(|id| Node::new(self.tree, id))
    }

    /// Returns an iterator over the allocated children of this quadrant.
    pub fn children(&self) -> impl Iterator<Item = (ChildSlot, Node<'a, T, S, D>)> + 'a {
        let tree = self.tree;
        let quadrant = &tree.nodes[self.id];
        ChildSlot::ALL
            .into_iter()
            .filter_map(move |slot| quadrant.child(slot).map(|id| (slot, Node::new(tree, id))))
    }
}

impl<'a, T, S: QuadTreeNum, D> GeometryTrait for Node<'a, T, S, D> {
    type T = S;
    type PointType<'b>
        = UnimplementedPoint<S>
    where
        Self: 'b;
    type LineStringType<'b>
        = UnimplementedLineString<S>
    where
        Self: 'b;
    type PolygonType<'b>
        = UnimplementedPolygon<S>
    where
        Self: 'b;
    type MultiPointType<'b>
        = UnimplementedMultiPoint<S>
    where
        Self: 'b;
    type MultiLineStringType<'b>
        = UnimplementedMultiLineString<S>
    where
        Self: 'b;
    type MultiPolygonType<'b>
        = UnimplementedMultiPolygon<S>
    where
        Self: 'b;
    type GeometryCollectionType<'b>
        = UnimplementedGeometryCollection<S>
    where
        Self: 'b;
    type RectType<'b>
        = Node<'a, T, S, D>
    where
        Self: 'b;
    type TriangleType<'b>
        = UnimplementedTriangle<S>
    where
        Self: 'b;
    type LineType<'b>
        = UnimplementedLine<S>
    where
        Self: 'b;

    fn dim(&self) -> geo_traits::Dimensions {
        geo_traits::Dimensions::Xy
    }

    fn as_type(
        &self,
    ) -> GeometryType<
        '_,
        Self::PointType<'_>,
        Self::LineStringType<'_>,
        Self::PolygonType<'_>,
        Self::MultiPointType<'_>,
        Self::MultiLineStringType<'_>,
        Self::MultiPolygonType<'_>,
        Self::GeometryCollectionType<'_>,
        Self::RectType<'_>,
        Self::TriangleType<'_>,
        Self::LineType<'_>,
    > {
        GeometryType::Rect(self)
    }
}

impl<T, S: QuadTreeNum, D> RectTrait for Node<'_, T, S, D> {
    type CoordType<'b>
        = Point<S>
    where
        Self: 'b;

    fn min(&self) -> Self::CoordType<'_> {
        let rect = self.rect();
        Point::new(rect.min_x(), rect.min_y())
    }

    fn max(&self) -> Self::CoordType<'_> {
        let rect = self.rect();
        Point::new(rect.max_x(), rect.max_y())
    }
}

impl<T, S: QuadTreeNum, D> QuadTree<T, S, D> {
    /// Access the root quadrant for manual traversal. `None` after [`clear`][Self::clear].
    pub fn root(&self) -> Option<Node<'_, T, S, D>> {
        if self.nodes.is_empty() {
            None
        } else {
            Some(Node::new(self, ROOT))
        }
    }
}
