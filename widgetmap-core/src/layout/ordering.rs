use super::Positioned;
use std::cmp::Ordering;

/// Vertical distance under which two items share a row when sorting.
pub const ROW_TOLERANCE: f64 = 10.0;

/// Bottom-up, then left-to-right.
///
/// Items whose y values differ by less than `tolerance` compare by x, all
/// others by y. The window is pairwise, so this is not a total order.
pub fn compare_bottom_up<T: Positioned + ?Sized>(a: &T, b: &T, tolerance: f64) -> Ordering {
    let delta = if (a.y() - b.y()).abs() < tolerance {
        a.x() - b.x()
    } else {
        a.y() - b.y()
    };
    delta.partial_cmp(&0.0).unwrap_or(Ordering::Equal)
}

/// Sorts with [`compare_bottom_up`].
///
/// `slice::sort_by` may panic on a comparator that is not a total order, so
/// this is a stable insertion sort: each item moves left past predecessors
/// that compare greater. Inputs whose rows are separated by at least the
/// tolerance get the plain (y, x) order.
pub fn sort_bottom_up<T: Positioned>(items: &mut [T], tolerance: f64) {
    for i in 1..items.len() {
        let mut j = i;
        while j > 0 && compare_bottom_up(&items[j], &items[j - 1], tolerance) == Ordering::Less {
            items.swap(j, j - 1);
            j -= 1;
        }
    }
}
