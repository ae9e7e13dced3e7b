//! Shared fixtures and brute-force references for tests.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::distance::DistanceMetric;
use crate::quadtree::{Point, QuadTree, QuadTreeBuilder};


/// One hundred distinct integer points in `0..100`.
pub(crate) fn grid_points() -> Vec<Point<i32>> {
    let coords: Vec<[i32; 2]> = vec![
        [54, 1],
        [97, 21],
        [65, 35],
        [33, 54],
        [95, 39],
        [54, 3],
        [53, 54],
        [84, 72],
        [33, 34],
        [43, 15],
        [52, 83],
        [81, 23],
        [1, 61],
        [38, 74],
        [11, 91],
        [24, 56],
        [90, 31],
        [25, 57],
        [46, 61],
        [29, 69],
        [49, 60],
        [4, 98],
        [71, 15],
        [60, 25],
        [38, 84],
        [52, 38],
        [94, 51],
        [13, 25],
        [77, 73],
        [88, 87],
        [6, 27],
        [58, 22],
        [53, 28],
        [27, 91],
        [96, 98],
        [93, 14],
        [22, 93],
        [45, 94],
        [18, 28],
        [35, 15],
        [19, 81],
        [20, 81],
        [67, 53],
        [43, 3],
        [47, 66],
        [48, 34],
        [46, 12],
        [32, 38],
        [43, 12],
        [39, 94],
        [88, 62],
        [66, 14],
        [84, 30],
        [72, 81],
        [41, 92],
        [26, 4],
        [6, 76],
        [47, 21],
        [57, 70],
        [71, 82],
        [50, 68],
        [96, 18],
        [40, 31],
        [78, 53],
        [71, 90],
        [32, 14],
        [55, 6],
        [32, 88],
        [62, 32],
        [21, 67],
        [73, 81],
        [44, 64],
        [29, 50],
        [70, 5],
        [6, 22],
        [68, 3],
        [11, 23],
        [20, 42],
        [21, 73],
        [63, 86],
        [9, 40],
        [99, 2],
        [99, 76],
        [56, 77],
        [83, 6],
        [21, 72],
        [78, 30],
        [75, 53],
        [41, 11],
        [95, 20],
        [30, 38],
        [96, 82],
        [65, 48],
        [33, 18],
        [87, 28],
        [10, 10],
        [40, 34],
        [10, 20],
        [47, 29],
        [46, 78],
    ];

    coords.into_iter().map(|[x, y]| Point::new(x, y)).collect()
}

/// `grid_points` in a tree over `[(0, 100), (100, 0)]`, tagged by index.
pub(crate) fn grid_tree() -> QuadTree<usize, i32> {
    QuadTreeBuilder::new(Point::new(0, 100), Point::new(100, 0))
        .build_from(grid_points().into_iter().zip(0..))
        .unwrap()
}

/// `n` uniformly distributed points in `[0, 100) x [0, 100)`.
pub(crate) fn random_points(seed: u64, n: usize) -> Vec<Point<f64>> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n)
        .map(|_| Point::new(rng.gen_range(0.0..100.0), rng.gen_range(0.0..100.0)))
        .collect()
}

/// The `k` smallest distances from `query` to `points`, paired with the point index.
pub(crate) fn brute_force_knn<S: Copy, D: DistanceMetric<S>>(
    points: &[Point<S>],
    query: &Point<S>,
    k: usize,
    metric: &D,
) -> Vec<(usize, f64)> {
    let mut all: Vec<(usize, f64)> = points
        .iter()
        .enumerate()
        .map(|(i, p)| (i, metric.distance(query, p)))
        .collect();
    all.sort_by(|a, b| a.1.total_cmp(&b.1));
    all.truncate(k);
    all
}

#[test]
fn grid_fixture_is_distinct() {
    let tree = grid_tree();
    assert_eq!(tree.len(), 100);
    assert_eq!(tree.iter().count(), 100);
}
