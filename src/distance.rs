//! Distance metrics for neighbor queries.
//!
//! A metric is anything implementing [`DistanceMetric`], including plain closures of the form
//! `Fn(&Point<S>, &Point<S>) -> f64`. Queries also evaluate the metric between the query point and
//! the closest point of a quadrant's rectangle to decide whether that quadrant can be skipped, so a
//! metric gives exact neighbor results only when that value never exceeds its distance to any
//! point inside the rectangle. Every metric in this module satisfies that on a planar domain.

use crate::quadtree::Point;
use crate::r#type::QuadTreeNum;

/// A function from two points to a non-negative distance.
pub trait DistanceMetric<S> {
    /// Distance between `a` and `b`.
    fn distance(&self, a: &Point<S>, b: &Point<S>) -> f64;
}

impl<S, F> DistanceMetric<S> for F
where
    F: Fn(&Point<S>, &Point<S>) -> f64,
{
    #[inline]
    fn distance(&self, a: &Point<S>, b: &Point<S>) -> f64 {
        self(a, b)
    }
}

/// Euclidean distance metric.
///
/// This is the standard straight-line distance calculation suitable for planar coordinate
/// systems. When working with longitude/latitude coordinates, the unit of distance will be
/// degrees.
#[derive(Debug, Clone, Copy, Default)]
pub struct EuclideanDistance;

impl<S: QuadTreeNum> DistanceMetric<S> for EuclideanDistance {
    #[inline]
    fn distance(&self, a: &Point<S>, b: &Point<S>) -> f64 {
        let dx = a.x.as_f64() - b.x.as_f64();
        let dy = a.y.as_f64() - b.y.as_f64();
        dx.hypot(dy)
    }
}

/// Squared Euclidean distance. Orders neighbors like [`EuclideanDistance`] without the square
/// root.
#[derive(Debug, Clone, Copy, Default)]
pub struct SquaredEuclideanDistance;

impl<S: QuadTreeNum> DistanceMetric<S> for SquaredEuclideanDistance {
    #[inline]
    fn distance(&self, a: &Point<S>, b: &Point<S>) -> f64 {
        let dx = a.x.as_f64() - b.x.as_f64();
        let dy = a.y.as_f64() - b.y.as_f64();
        dx * dx + dy * dy
    }
}

/// Manhattan (taxicab) distance.
#[derive(Debug, Clone, Copy, Default)]
pub struct ManhattanDistance;

impl<S: QuadTreeNum> DistanceMetric<S> for ManhattanDistance {
    #[inline]
    fn distance(&self, a: &Point<S>, b: &Point<S>) -> f64 {
        (a.x.as_f64() - b.x.as_f64()).abs() + (a.y.as_f64() - b.y.as_f64()).abs()
    }
}

#[cfg(feature = "use-geo_0_31")]
pub use geographic::{HaversineDistance, SpheroidDistance};

#[cfg(feature = "use-geo_0_31")]
mod geographic {
    use geo_0_31::algorithm::{Distance, Geodesic, Haversine};

    use super::DistanceMetric;
    use crate::quadtree::Point;
    use crate::r#type::QuadTreeNum;

    /// The mean earth radius used by [`Haversine`], in meters.
    const MEAN_EARTH_RADIUS: f64 = 6_371_008.8;

    fn to_geo<S: QuadTreeNum>(point: &Point<S>) -> geo_0_31::Point<f64> {
        geo_0_31::Point::new(point.x.as_f64(), point.y.as_f64())
    }

    /// Haversine distance metric.
    ///
    /// This calculates the great-circle distance between two points on a sphere. Coordinates
    /// are longitude (`x`) and latitude (`y`) in degrees and the output distance is in meters.
    #[derive(Debug, Clone, Copy)]
    pub struct HaversineDistance {
        /// Sphere radius in meters
        pub earth_radius: f64,
    }

    impl Default for HaversineDistance {
        fn default() -> Self {
            Self {
                earth_radius: MEAN_EARTH_RADIUS,
            }
        }
    }

    impl HaversineDistance {
        /// Create a new Haversine distance metric with custom radius.
        pub fn with_radius(earth_radius: f64) -> Self {
            Self { earth_radius }
        }
    }

    impl<S: QuadTreeNum> DistanceMetric<S> for HaversineDistance {
        fn distance(&self, a: &Point<S>, b: &Point<S>) -> f64 {
            // great-circle distance scales linearly with the radius
            Haversine.distance(to_geo(a), to_geo(b)) * (self.earth_radius / MEAN_EARTH_RADIUS)
        }
    }

    /// Spheroid distance metric (using Geodesic/Karney's formula on the WGS84 ellipsoid).
    ///
    /// Coordinates are longitude (`x`) and latitude (`y`) in degrees and the output distance is
    /// in meters.
    #[derive(Debug, Clone, Copy, Default)]
    pub struct SpheroidDistance;

    impl<S: QuadTreeNum> DistanceMetric<S> for SpheroidDistance {
        fn distance(&self, a: &Point<S>, b: &Point<S>) -> f64 {
            Geodesic.distance(to_geo(a), to_geo(b))
        }
    }

}
