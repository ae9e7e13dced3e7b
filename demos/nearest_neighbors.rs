//! Example inserting tagged points into a quadtree and querying them.

use geo_quadtree::quadtree::{KnnStrategy, Lookup, Point, QuadTreeBuilder};

fn main() {
    let mut tree = QuadTreeBuilder::new(Point::new(0, 100), Point::new(100, 0))
        .finish()
        .unwrap();

    tree.insert(Point::new(10, 10), "A");
    tree.insert(Point::new(90, 90), "B");
    tree.insert(Point::new(50, 50), "C");
    tree.insert(Point::new(75, 20), "D");

    // duplicates and out-of-domain points are reported by try_insert
    if let Err(err) = tree.try_insert(Point::new(50, 50), "E") {
        println!("Rejected: {err}");
    }
    if let Err(err) = tree.try_insert(Point::new(150, 50), "F") {
        println!("Rejected: {err}");
    }

    println!(
        "{} records in {} quadrants, {} levels deep",
        tree.len(),
        tree.num_nodes(),
        tree.depth()
    );

    for point in [Point::new(50, 50), Point::new(51, 50), Point::new(-1, 50)] {
        match tree.locate(&point) {
            Lookup::Found(record) => println!("{point:?}: found {}", record.tag()),
            Lookup::NotFound => println!("{point:?}: nothing stored"),
            Lookup::OutOfDomain => println!("{point:?}: outside the domain"),
        }
    }

    let query = Point::new(60, 40);
    for strategy in [KnnStrategy::Backtracking, KnnStrategy::BestFirst] {
        let nearest: Vec<_> = tree
            .search_k_nearest_with(&query, 3, strategy)
            .into_iter()
            .map(|(record, distance)| (*record.tag(), distance))
            .collect();
        println!("Nearest to {query:?} ({strategy:?}): {nearest:?}");
    }

    let (record, path) = tree.search_with_path(&Point::new(75, 20));
    println!(
        "Search for D visited quadrants {path:?} and found {:?}",
        record.map(|r| r.tag())
    );

    if let Some(root) = tree.root() {
        for (slot, child) in root.children() {
            println!("{slot:?}: {} records in {:?}", child.len(), child.rect());
        }
    }
}
