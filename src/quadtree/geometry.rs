//! Points, rectangles and the midpoint split that drives subdivision.

use geo_traits::CoordTrait;

use crate::error::{QuadTreeError, Result};
use crate::r#type::QuadTreeNum;

/// A point in the plane. `x` increases rightward and `y` increases upward.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point<S> {
    /// Horizontal coordinate
    pub x: S,
    /// Vertical coordinate
    pub y: S,
}

impl<S> Point<S> {
    /// Create a new point.
    pub const fn new(x: S, y: S) -> Self {
        Self { x, y }
    }
}

impl<S: QuadTreeNum> Point<S> {
    /// Create a point from any [`CoordTrait`] with a matching coordinate type.
    pub fn from_coord(coord: &impl CoordTrait<T = S>) -> Self {
        Self::new(coord.x(), coord.y())
    }
}

impl<S> From<(S, S)> for Point<S> {
    fn from((x, y): (S, S)) -> Self {
        Self::new(x, y)
    }
}

impl<S: QuadTreeNum> CoordTrait for Point<S> {
    type T = S;

    fn dim(&self) -> geo_traits::Dimensions {
        geo_traits::Dimensions::Xy
    }

    fn x(&self) -> Self::T {
        self.x
    }

    fn y(&self) -> Self::T {
        self.y
    }

    fn nth_or_panic(&self, n: usize) -> Self::T {
        match n {
            0 => self.x,
            1 => self.y,
            _ => panic!("Invalid index of coord"),
        }
    }
}

/// One of the four children of a subdivided quadrant.
///
/// The discriminant is the position of the child in its parent's child array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChildSlot {
    /// `x <= mid_x`, `y >= mid_y`
    TopLeft = 0,
    /// `x > mid_x`, `y >= mid_y`
    TopRight = 1,
    /// `x <= mid_x`, `y < mid_y`
    BottomLeft = 2,
    /// `x > mid_x`, `y < mid_y`
    BottomRight = 3,
}

impl ChildSlot {
    /// All slots in child-array order.
    pub const ALL: [ChildSlot; 4] = [
        ChildSlot::TopLeft,
        ChildSlot::TopRight,
        ChildSlot::BottomLeft,
        ChildSlot::BottomRight,
    ];

    /// Position of this slot in the child array.
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }
}

/// A closed axis-aligned rectangle described by its top-left and bottom-right corners.
///
/// Invariant: `top_left.x <= bottom_right.x` and `top_left.y >= bottom_right.y`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect<S> {
    top_left: Point<S>,
    bottom_right: Point<S>,
}

impl<S: QuadTreeNum> Rect<S> {
    /// Create a rectangle, validating the corner convention.
    ///
    /// Corners must be finite. An infinite extent has no midpoint to split at.
    pub fn try_new(top_left: Point<S>, bottom_right: Point<S>) -> Result<Self> {
        let finite = [top_left.x, top_left.y, bottom_right.x, bottom_right.y]
            .into_iter()
            .all(|v| v.as_f64().is_finite());
        if finite && top_left.x <= bottom_right.x && top_left.y >= bottom_right.y {
            Ok(Self {
                top_left,
                bottom_right,
            })
        } else {
            Err(QuadTreeError::InvalidDomain {
                top_left: (top_left.x.as_f64(), top_left.y.as_f64()),
                bottom_right: (bottom_right.x.as_f64(), bottom_right.y.as_f64()),
            })
        }
    }

    /// The top-left corner.
    pub fn top_left(&self) -> Point<S> {
        self.top_left
    }

    /// The bottom-right corner.
    pub fn bottom_right(&self) -> Point<S> {
        self.bottom_right
    }

    /// Minimum `x` value.
    pub fn min_x(&self) -> S {
        self.top_left.x
    }

    /// Minimum `y` value.
    pub fn min_y(&self) -> S {
        self.bottom_right.y
    }

    /// Maximum `x` value.
    pub fn max_x(&self) -> S {
        self.bottom_right.x
    }

    /// Maximum `y` value.
    pub fn max_y(&self) -> S {
        self.top_left.y
    }

    /// Returns `true` if the point lies inside or on the boundary of this rectangle.
    #[inline]
    pub fn contains(&self, point: &Point<S>) -> bool {
        self.top_left.x <= point.x
            && point.x <= self.bottom_right.x
            && self.bottom_right.y <= point.y
            && point.y <= self.top_left.y
    }

    /// Returns `true` if this rectangle and the given bounds overlap, boundaries included.
    #[inline]
    pub fn intersects(&self, min_x: S, min_y: S, max_x: S, max_y: S) -> bool {
        if max_x < self.min_x() {
            return false;
        }
        if max_y < self.min_y() {
            return false;
        }
        if min_x > self.max_x() {
            return false;
        }
        if min_y > self.max_y() {
            return false;
        }
        true
    }

    /// The split point. Ties go to the left and top halves, so `x` rounds down and `y` up.
    #[inline]
    pub(crate) fn mid(&self) -> Point<S> {
        Point::new(
            S::midpoint_down(self.top_left.x, self.bottom_right.x),
            S::midpoint_up(self.bottom_right.y, self.top_left.y),
        )
    }

    /// The child quadrant that a point belongs to.
    #[inline]
    pub fn slot_of(&self, point: &Point<S>) -> ChildSlot {
        let mid = self.mid();
        match (point.x <= mid.x, point.y >= mid.y) {
            (true, true) => ChildSlot::TopLeft,
            (false, true) => ChildSlot::TopRight,
            (true, false) => ChildSlot::BottomLeft,
            (false, false) => ChildSlot::BottomRight,
        }
    }

    /// Bounds of the given child after a midpoint split.
    pub fn child_rect(&self, slot: ChildSlot) -> Self {
        let mid = self.mid();
        let (min_x, max_x) = match slot {
            ChildSlot::TopLeft | ChildSlot::BottomLeft => (self.min_x(), mid.x),
            ChildSlot::TopRight | ChildSlot::BottomRight => (mid.x.successor(), self.max_x()),
        };
        let (min_y, max_y) = match slot {
            ChildSlot::TopLeft | ChildSlot::TopRight => (mid.y, self.max_y()),
            ChildSlot::BottomLeft | ChildSlot::BottomRight => (self.min_y(), mid.y.predecessor()),
        };
        Self {
            top_left: Point::new(min_x, max_y),
            bottom_right: Point::new(max_x, min_y),
        }
    }

    /// The point inside or on the boundary of this rectangle that is closest to `query`.
    ///
    /// Each axis is handled independently: a query left of, right of, or within the `x` extent
    /// (and likewise for `y`) maps to the near edge or to itself.
    pub fn closest_point(&self, query: &Point<S>) -> Point<S> {
        let x = if query.x < self.min_x() {
            self.min_x()
        } else if query.x > self.max_x() {
            self.max_x()
        } else {
            query.x
        };
        let y = if query.y < self.min_y() {
            self.min_y()
        } else if query.y > self.max_y() {
            self.max_y()
        } else {
            query.y
        };
        Point::new(x, y)
    }

    /// Returns `true` if repeated subdivision eventually puts `a` and `b` into different
    /// children. Both points must lie in this rectangle.
    ///
    /// This fails only when the coordinate type runs out of precision, e.g. two floats that are
    /// adjacent on both axes.
    pub(crate) fn separates(&self, a: &Point<S>, b: &Point<S>) -> bool {
        let mut rect = *self;
        loop {
            let slot = rect.slot_of(a);
            if slot != rect.slot_of(b) {
                return true;
            }
            let child = rect.child_rect(slot);
            if child == rect {
                return false;
            }
            rect = child;
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn domain() -> Rect<f64> {
        Rect::try_new(Point::new(0., 100.), Point::new(100., 0.)).unwrap()
    }

    #[test]
    fn rejects_inverted_corners() {
        let err = Rect::try_new(Point::new(10., 0.), Point::new(0., 10.)).unwrap_err();
        assert!(matches!(err, QuadTreeError::InvalidDomain { .. }));
        assert!(Rect::try_new(Point::new(f64::NAN, 1.), Point::new(1., 0.)).is_err());
        // degenerate rectangles are allowed
        assert!(Rect::try_new(Point::new(5, 5), Point::new(5, 5)).is_ok());
    }

    #[test]
    fn rejects_infinite_corners() {
        let (inf, neg_inf) = (f64::INFINITY, f64::NEG_INFINITY);
        let half = Rect::try_new(Point::new(0., inf), Point::new(inf, 0.)).unwrap_err();
        assert!(matches!(half, QuadTreeError::InvalidDomain { .. }));
        let full = Rect::try_new(Point::new(neg_inf, inf), Point::new(inf, neg_inf)).unwrap_err();
        assert!(matches!(full, QuadTreeError::InvalidDomain { .. }));
        assert!(Rect::try_new(Point::new(0f32, 1.), Point::new(f32::INFINITY, 0.)).is_err());

        // the widest finite domain still splits
        let widest = Rect::try_new(Point::new(-f64::MAX, f64::MAX), Point::new(f64::MAX, -f64::MAX))
            .unwrap();
        assert_eq!(widest.mid(), Point::new(0., 0.));
        assert!(widest.separates(&Point::new(0., 0.), &Point::new(1., 1.)));
    }

    #[test]
    fn containment_is_closed() {
        let rect = domain();
        assert!(rect.contains(&Point::new(0., 0.)));
        assert!(rect.contains(&Point::new(100., 100.)));
        assert!(rect.contains(&Point::new(50., 0.)));
        assert!(!rect.contains(&Point::new(100.1, 50.)));
        assert!(!rect.contains(&Point::new(50., -0.1)));
        assert!(!rect.contains(&Point::new(f64::NAN, 50.)));
    }

    #[test]
    fn midpoint_ties_go_top_left() {
        let rect = domain();
        assert_eq!(rect.slot_of(&Point::new(50., 50.)), ChildSlot::TopLeft);
        assert_eq!(rect.slot_of(&Point::new(50.1, 50.)), ChildSlot::TopRight);
        assert_eq!(rect.slot_of(&Point::new(50., 49.9)), ChildSlot::BottomLeft);
        assert_eq!(rect.slot_of(&Point::new(99., 1.)), ChildSlot::BottomRight);
    }

    #[test]
    fn float_children_share_boundaries() {
        let rect = domain();
        let tl = rect.child_rect(ChildSlot::TopLeft);
        assert_eq!(tl.top_left(), Point::new(0., 100.));
        assert_eq!(tl.bottom_right(), Point::new(50., 50.));
        let br = rect.child_rect(ChildSlot::BottomRight);
        assert_eq!(br.top_left(), Point::new(50., 50.));
        assert_eq!(br.bottom_right(), Point::new(100., 0.));
    }

    #[test]
    fn integer_children_partition_cells() {
        let rect = Rect::try_new(Point::new(0, 1), Point::new(1, 0)).unwrap();
        for slot in ChildSlot::ALL {
            let child = rect.child_rect(slot);
            assert_eq!(child.min_x(), child.max_x(), "{slot:?} is a single column");
            assert_eq!(child.min_y(), child.max_y(), "{slot:?} is a single row");
        }
        assert_eq!(rect.child_rect(ChildSlot::TopRight).top_left(), Point::new(1, 1));
        assert_eq!(
            rect.child_rect(ChildSlot::BottomLeft).bottom_right(),
            Point::new(0, 0)
        );
    }

    #[test]
    fn closest_point_regions() {
        let rect = Rect::try_new(Point::new(10., 20.), Point::new(20., 10.)).unwrap();
        let cases = [
            ((15., 15.), (15., 15.)), // inside
            ((0., 30.), (10., 20.)),  // above left
            ((15., 30.), (15., 20.)), // above
            ((30., 30.), (20., 20.)), // above right
            ((30., 15.), (20., 15.)), // right
            ((30., 0.), (20., 10.)),  // below right
            ((15., 0.), (15., 10.)),  // below
            ((0., 0.), (10., 10.)),   // below left
            ((0., 15.), (10., 15.)),  // left
        ];
        for (query, expected) in cases {
            assert_eq!(
                rect.closest_point(&Point::from(query)),
                Point::from(expected),
                "query {query:?}"
            );
        }
    }

    #[test]
    fn intersects_touching_bounds() {
        let rect = domain();
        assert!(rect.intersects(100., 100., 200., 200.));
        assert!(rect.intersects(-10., -10., 0., 0.));
        assert!(!rect.intersects(100.5, 0., 200., 200.));
        assert!(!rect.intersects(0., -20., 10., -10.));
    }

    #[test]
    fn separation() {
        let rect = Rect::try_new(Point::new(0, 1), Point::new(1, 0)).unwrap();
        assert!(rect.separates(&Point::new(1, 1), &Point::new(1, 0)));
        assert!(domain().separates(&Point::new(1., 1.), &Point::new(1., 1.0000001)));

        // a square one ulp wide cannot be split any further
        let up = f64::from_bits(1f64.to_bits() + 1);
        let rect = Rect::try_new(Point::new(1., up), Point::new(up, 1.)).unwrap();
        assert!(!rect.separates(&Point::new(up, up), &Point::new(up, 1.)));
    }
}
