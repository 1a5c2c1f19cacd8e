#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use crate::doc::ShapeStore;
use crate::geom::Point;

/// Index of the first record, in store order, whose normalized bounds contain `pt`.
#[must_use]
pub fn first_containing(pt: Point, store: &ShapeStore) -> Option<usize> {
    store
        .all()
        .iter()
        .position(|record| record.rect().bounds().contains(pt))
}

