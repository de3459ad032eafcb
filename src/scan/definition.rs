use geo::Point;

use crate::layer::Feature;
use crate::resolve::NearestPoint;

/// Trait containing utility functions to find calibrated lines near a point.
pub trait Scan {
    /// Returns up to `k` features, ordered by the distance from `point` to
    /// their envelope, as reported by the spatial index.
    ///
    /// ### Note
    ///
    /// Envelope distance only bounds the true line distance from below, so
    /// this order is not the order of the lines themselves.
    fn candidates<'a>(&'a self, point: &Point, k: usize) -> impl Iterator<Item = &'a Feature>
    where
        Self: 'a;

    /// Searches the `k` [candidates](Scan::candidates) for the line whose
    /// true nearest point is closest to `point`, returning that feature and
    /// its projection. Equally close lines resolve to the earlier candidate.
    ///
    /// ### Note
    ///
    /// This is an approximation. When more than `k` envelopes crowd around
    /// the point, the globally nearest line may never be a candidate, and a
    /// farther one is returned. Within a candidate set the result is exact.
    fn nearest_feature<'a>(&'a self, point: &Point, k: usize) -> Option<(&'a Feature, NearestPoint)>
    where
        Self: 'a;
}
