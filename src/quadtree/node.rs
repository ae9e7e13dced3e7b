use tinyvec::TinyVec;

use crate::quadtree::geometry::{ChildSlot, Point, Rect};

/// Position of a quadrant in the tree's node arena. The root is always `0`.
pub type NodeId = usize;

pub(crate) const ROOT: NodeId = 0;

/// Quadrants visited while descending toward a point, root first.
///
/// Use TinyVec to avoid heap allocations for trees of ordinary depth.
pub(crate) type AncestorPath = TinyVec<[NodeId; 32]>;

/// A stored point together with its caller-supplied tag.
///
/// The tree never inspects the tag. To keep the payload owned elsewhere, use a reference or a
/// shared handle such as `Rc<U>` as the tag type.
#[derive(Debug, Clone, PartialEq)]
pub struct Record<T, S> {
    point: Point<S>,
    tag: T,
}

impl<T, S: Copy> Record<T, S> {
    pub(crate) fn new(point: Point<S>, tag: T) -> Self {
        Self { point, tag }
    }

    /// The coordinates of this record.
    pub fn point(&self) -> Point<S> {
        self.point
    }

    /// The tag supplied at insertion.
    pub fn tag(&self) -> &T {
        &self.tag
    }
}

/// A rectangular region of the domain.
///
/// Holds at most one record directly until a second distinct point has to be placed in it, after
/// which the record moves into one of up to four lazily allocated children.
#[derive(Debug, Clone)]
pub(crate) struct Quadrant<T, S> {
    pub(crate) rect: Rect<S>,
    pub(crate) record: Option<Record<T, S>>,
    /// Indexed by [`ChildSlot::index`]
    pub(crate) children: [Option<NodeId>; 4],
    /// Number of records in this subtree
    pub(crate) count: usize,
}

impl<T, S> Quadrant<T, S> {
    pub(crate) fn new(rect: Rect<S>) -> Self {
        Self {
            rect,
            record: None,
            children: [None; 4],
            count: 0,
        }
    }

    #[inline]
    pub(crate) fn child(&self, slot: ChildSlot) -> Option<NodeId> {
        self.children[slot.index()]
    }

    /// Returns `true` once any child has been allocated.
    #[inline]
    pub(crate) fn is_subdivided(&self) -> bool {
        self.children.iter().any(Option::is_some)
    }

    /// No record and no children.
    #[inline]
    pub(crate) fn is_vacant(&self) -> bool {
        self.record.is_none() && !self.is_subdivided()
    }

    pub(crate) fn allocated_children(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.children.iter().flatten().copied()
    }
}
