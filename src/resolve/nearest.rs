use geo::{Coord, Distance, Euclidean, Line, Point};
use pk_geo::MeasuredLine;

use crate::resolve::{ResolveError, ensure_resolvable};

#[cfg(feature = "tracing")]
use tracing::Level;

/// The orthogonal projection of a query point onto a line.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NearestPoint {
    /// The closest position on the line, which may lie strictly
    /// inside a segment.
    pub point: Point,
    /// Planar distance from the query point to [`NearestPoint::point`].
    pub distance: f64,
    /// Index of the segment holding the projection.
    pub segment: usize,
    /// Distance travelled along the line, from its first vertex,
    /// to reach the projection.
    pub arclength: f64,
}

/// Projects `segment_start + t * delta` for the query, with `t` bound to the segment.
/// Zero-length segments resolve to their start.
#[inline]
fn segment_ratio(line: &Line, query: Coord) -> f64 {
    let delta = line.delta();
    let length_squared = delta.x * delta.x + delta.y * delta.y;

    if length_squared == 0.0 {
        return 0.0;
    }

    let offset = query - line.start;
    ((offset.x * delta.x + offset.y * delta.y) / length_squared).clamp(0.0, 1.0)
}

/// Finds the true nearest point of `line` to `query`, searching every
/// segment rather than snapping to vertices.
///
/// When two segments are equally close, which always happens when the
/// projection lands on a shared vertex, the earlier segment wins.
#[cfg_attr(feature = "tracing", tracing::instrument(level = Level::DEBUG, skip(line)))]
pub fn nearest_point(line: &MeasuredLine, query: Point) -> Result<NearestPoint, ResolveError> {
    ensure_resolvable(line)?;

    if !(query.x().is_finite() && query.y().is_finite()) {
        return Err(ResolveError::NonFinite);
    }

    let mut travelled = 0.0;
    let mut nearest: Option<NearestPoint> = None;

    for (segment, (source, target)) in line.segments().enumerate() {
        let edge = Line::new(source.position, target.position);
        let length = Euclidean.distance(source.point(), target.point());

        let ratio = segment_ratio(&edge, query.0);
        let point = Point(edge.start + edge.delta() * ratio);
        let distance = Euclidean.distance(point, query);

        if nearest.is_none_or(|best| distance < best.distance) {
            nearest = Some(NearestPoint {
                point,
                distance,
                segment,
                arclength: travelled + ratio * length,
            });
        }

        travelled += length;
    }

    // At least one segment exists once the vertex count is validated.
    nearest.ok_or(ResolveError::TooFewVertices(line.len()))
}
