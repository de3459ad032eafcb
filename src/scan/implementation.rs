use std::cmp::Ordering;

use geo::{Distance, Euclidean, Point};
use log::{debug, trace};

use crate::layer::{Feature, Layer};
use crate::resolve::{MIN_VERTICES, NearestPoint, nearest_point};
use crate::scan::Scan;

#[cfg(feature = "tracing")]
use tracing::Level;

/// The closest approach of `point` to a candidate's geometry.
///
/// Single-vertex lines still compete, measured to their lone vertex, so
/// that picking one surfaces as a geometry error downstream rather than
/// silently selecting a different road.
fn approach(feature: &Feature, point: &Point) -> Option<NearestPoint> {
    let vertices = feature.geometry.vertices();

    if vertices.len() < MIN_VERTICES {
        return vertices.first().map(|vertex| NearestPoint {
            point: vertex.point(),
            distance: Euclidean.distance(vertex.point(), *point),
            segment: 0,
            arclength: 0.0,
        });
    }

    nearest_point(&feature.geometry, *point).ok()
}

impl Scan for Layer {
    #[cfg_attr(feature = "tracing", tracing::instrument(level = Level::DEBUG, skip(self)))]
    #[inline]
    fn candidates<'a>(&'a self, point: &Point, k: usize) -> impl Iterator<Item = &'a Feature>
    where
        Self: 'a,
    {
        self.index
            .nearest_neighbor_iter(point)
            .take(k)
            .filter_map(|indexed| self.feature(indexed.id))
    }

    #[cfg_attr(feature = "tracing", tracing::instrument(level = Level::DEBUG, skip(self)))]
    fn nearest_feature<'a>(&'a self, point: &Point, k: usize) -> Option<(&'a Feature, NearestPoint)>
    where
        Self: 'a,
    {
        let nearest = self
            .candidates(point, k)
            .filter_map(|feature| approach(feature, point).map(|nearest| (feature, nearest)))
            .inspect(|(feature, nearest)| {
                trace!("Candidate {} at distance {:.3}", feature.id, nearest.distance)
            })
            .min_by(|(_, a), (_, b)| a.distance.partial_cmp(&b.distance).unwrap_or(Ordering::Equal));

        match &nearest {
            Some((feature, projected)) => debug!(
                "Nearest feature to {point:?} is {} at {:.3}",
                feature.id, projected.distance
            ),
            None => debug!("No feature near {point:?} among {k} candidates"),
        }

        nearest
    }
}
