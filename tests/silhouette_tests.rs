//! Car silhouette determinism and totality.

use std::collections::HashSet;

use tui_racer::core::CarSilhouette;
use tui_racer::types::{Palette, MAX_CAR_SIZE};

#[test]
fn same_size_same_shape() {
    for size in 1..=MAX_CAR_SIZE {
        let a = CarSilhouette::build(size, '^', Palette::Yellow);
        let b = CarSilhouette::build(size, '#', Palette::Cyan);
        assert_eq!(a.dots(), b.dots(), "size {}", size);
    }
}

#[test]
fn collision_check_is_total_on_the_square() {
    for &size in &[1u16, 2, 10, 20] {
        let car = CarSilhouette::build(size, '^', Palette::Yellow);
        let dots: HashSet<_> = car.dots().iter().copied().collect();
        assert_eq!(dots.len(), car.dots().len(), "size {}: duplicate dots", size);

        for row in 0..size {
            for col in 0..size {
                assert_eq!(
                    car.collision_check(row, col),
                    dots.contains(&(row, col)),
                    "size {} at ({}, {})",
                    size,
                    row,
                    col
                );
            }
        }
    }
}

#[test]
fn outline_spans_the_whole_square() {
    for &size in &[2u16, 10, 20] {
        let car = CarSilhouette::build(size, '^', Palette::Yellow);
        let last = size - 1;
        assert_eq!(car.dots()[0], (0, 0));
        assert!(car.collision_check(last, 0), "size {}: no tail", size);
        assert!(
            car.dots().iter().any(|&(_, c)| c == last),
            "size {}: outline never reaches the right edge",
            size
        );
    }
}

#[test]
fn size_two_car_fills_its_square() {
    // The return stroke from (0, 1) to (1, 0) rounds onto the bottom row.
    let car = CarSilhouette::build(2, '^', Palette::Yellow);
    assert_eq!(car.dots(), &[(0, 0), (0, 1), (1, 0), (1, 1)]);
}
