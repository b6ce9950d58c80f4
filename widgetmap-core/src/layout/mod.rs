//! Spatial ordering of matched widgets.
//!
//! Both strategies work on raw page coordinates (origin bottom-left) and
//! compare against fixed tolerances rather than building true row buckets:
//!
//! - [`sort_bottom_up`] uses a pairwise comparator. Two items closer than the
//!   tolerance vertically count as one row and are ordered by x.
//! - [`cluster_rows`] opens a row at the topmost remaining item and keeps
//!   adding items while they stay within the threshold of that first item.
//!
//! Neither relation is transitive, so a chain of items each a few units apart
//! can land in different rows depending on where a row was opened.

mod ordering;
mod rows;

pub use ordering::{compare_bottom_up, sort_bottom_up, ROW_TOLERANCE};
pub use rows::{cluster_rows, ROW_CLUSTER_THRESHOLD};

/// Anything with a page position.
pub trait Positioned {
    fn x(&self) -> f64;
    fn y(&self) -> f64;
}

impl Positioned for (f64, f64) {
    fn x(&self) -> f64 {
        self.0
    }

    fn y(&self) -> f64 {
        self.1
    }
}

impl<T: Positioned + ?Sized> Positioned for &T {
    fn x(&self) -> f64 {
        (**self).x()
    }

    fn y(&self) -> f64 {
        (**self).y()
    }
}
