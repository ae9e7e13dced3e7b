//! Example demonstrating different distance metrics for neighbor queries.
//!
//! Run with `--features use-geo_0_31` to include the geographic metrics.

use geo_quadtree::distance::{EuclideanDistance, ManhattanDistance, SquaredEuclideanDistance};
use geo_quadtree::quadtree::{Point, QuadTreeBuilder, Record};

fn main() {
    println!("=== Distance Metrics Example ===\n");

    println!("1. Planar metrics:");
    planar_example();

    println!("\n2. Custom closure metric:");
    closure_example();

    #[cfg(feature = "use-geo_0_31")]
    {
        println!("\n3. Geographic metrics:");
        geographic_example();
    }
}

fn planar_points() -> Vec<(Point<f64>, &'static str)> {
    vec![
        (Point::new(0., 0.), "A"),
        (Point::new(3., 4.), "B"),
        (Point::new(6., 8.), "C"),
        (Point::new(1., 1.), "D"),
        (Point::new(5., 0.), "E"),
    ]
}

fn planar_example() {
    let query = Point::new(2., 2.);
    let builder = QuadTreeBuilder::new(Point::new(0., 10.), Point::new(10., 0.));

    let euclidean = builder
        .clone()
        .metric(EuclideanDistance)
        .build_from(planar_points())
        .unwrap();
    let squared = builder
        .clone()
        .metric(SquaredEuclideanDistance)
        .build_from(planar_points())
        .unwrap();
    let manhattan = builder
        .metric(ManhattanDistance)
        .build_from(planar_points())
        .unwrap();

    println!("  Query point: {query:?}");
    show("Euclidean", euclidean.search_k_nearest(&query, 3));
    show("Squared Euclidean", squared.search_k_nearest(&query, 3));
    show("Manhattan", manhattan.search_k_nearest(&query, 3));
}

fn show(name: &str, found: Vec<(&Record<&str, f64>, f64)>) {
    let found: Vec<_> = found
        .into_iter()
        .map(|(record, distance)| (*record.tag(), distance))
        .collect();
    println!("  {name}: {found:?}");
}

fn closure_example() {
    let chebyshev = |a: &Point<i32>, b: &Point<i32>| {
        let dx = (a.x - b.x).abs();
        let dy = (a.y - b.y).abs();
        dx.max(dy) as f64
    };
    let tree = QuadTreeBuilder::new(Point::new(-50, 50), Point::new(50, -50))
        .metric(chebyshev)
        .build_from([
            (Point::new(10, 40), "north"),
            (Point::new(-30, 0), "west"),
            (Point::new(20, -20), "south-east"),
        ])
        .unwrap();

    let query = Point::new(0, 0);
    for (record, distance) in tree.search_k_nearest(&query, 3) {
        println!("  {} at Chebyshev distance {distance}", record.tag());
    }
}

#[cfg(feature = "use-geo_0_31")]
fn geographic_example() {
    use geo_quadtree::distance::{HaversineDistance, SpheroidDistance};

    let cities = [
        (Point::new(-74.0, 40.7), "New York"),
        (Point::new(-0.1, 51.5), "London"),
        (Point::new(139.7, 35.7), "Tokyo"),
        (Point::new(-118.2, 34.1), "Los Angeles"),
        (Point::new(2.3, 48.9), "Paris"),
    ];
    let domain = QuadTreeBuilder::new(Point::new(-180., 90.), Point::new(180., -90.));

    let haversine = HaversineDistance::default();
    let by_haversine = domain
        .clone()
        .metric(haversine)
        .build_from(cities)
        .unwrap();
    let by_spheroid = domain.metric(SpheroidDistance).build_from(cities).unwrap();

    let query = Point::new(-74.0, 40.7);
    println!("  Query point: New York {query:?}");
    println!("  Earth radius: {} meters", haversine.earth_radius);
    for (record, distance) in by_haversine.search_k_nearest(&query, 3) {
        println!("  Haversine: {} at {:.0} m", record.tag(), distance);
    }
    for (record, distance) in by_spheroid.search_k_nearest(&query, 3) {
        println!("  Spheroid: {} at {:.0} m", record.tag(), distance);
    }
}
