use geo::Point;
use log::trace;
use pk_geo::MeasuredLine;
use serde::{Deserialize, Serialize};

use crate::resolve::{
    CumulativeLength, NearestPoint, ResolveError, UnitScale, ensure_resolvable, nearest_point,
};

#[cfg(feature = "tracing")]
use tracing::Level;

/// The result of resolving a point against a calibrated line.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LinearPosition {
    /// The interpolated PK, in kilometers.
    pub measure_km: f64,
    /// The projected position on the line, in the line's reference system.
    pub projected_point: (f64, f64),
    /// Distance along the line from its first vertex to the projection,
    /// in the line's native units.
    pub arclength_from_start: f64,
    /// Distance from the query point to the line.
    pub offset: f64,
}

impl LinearPosition {
    #[inline]
    pub fn point(&self) -> Point {
        Point::from(self.projected_point)
    }
}

/// Resolves `query` to a linear position on `line`.
///
/// The query is projected onto the nearest point of the line, and the
/// measures of the segment holding that projection are interpolated by
/// arclength. Raw measures are brought to kilometers through `scale`.
///
/// ```rust
/// use pk_tools::resolve::{project, UnitScale};
/// use pk_geo::MeasuredLine;
/// use geo::point;
///
/// let line = MeasuredLine::from(vec![(0.0, 0.0, 0.0), (10.0, 0.0, 10.0), (10.0, 10.0, 15.0)]);
/// let position = project(&line, point! { x: 10.0, y: 5.0 }, UnitScale::KILOMETERS).unwrap();
///
/// assert_eq!(position.measure_km, 12.5);
/// assert_eq!(position.arclength_from_start, 15.0);
/// ```
#[cfg_attr(feature = "tracing", tracing::instrument(level = Level::DEBUG, skip(line)))]
pub fn project(
    line: &MeasuredLine,
    query: Point,
    scale: UnitScale,
) -> Result<LinearPosition, ResolveError> {
    let nearest = nearest_point(line, query)?;
    project_nearest(line, &nearest, scale)
}

/// Interpolates the measure at an already-computed projection onto `line`.
///
/// The interpolation parameter is not clamped to the bracketing segment. The
/// arclength of a true projection never leaves the line, so a parameter
/// outside `[0, 1]` only arises from floating-point drift at the final
/// vertex, where it extrapolates by a negligible amount.
/// Zero-length segments interpolate with a parameter of zero.
pub fn project_nearest(
    line: &MeasuredLine,
    nearest: &NearestPoint,
    scale: UnitScale,
) -> Result<LinearPosition, ResolveError> {
    ensure_resolvable(line)?;

    let table = CumulativeLength::new(line);
    let index = table.bracket(nearest.arclength);

    let vertices = line.vertices();
    let (source, target) = (vertices[index], vertices[index + 1]);

    let start = table.as_slice()[index];
    let length = table.segment_length(index);
    let t = if length > 0.0 {
        (nearest.arclength - start) / length
    } else {
        0.0
    };

    let m1 = scale.to_km(source.measure);
    let m2 = scale.to_km(target.measure);
    let measure_km = m1 + t * (m2 - m1);

    if !measure_km.is_finite() {
        return Err(ResolveError::NonFinite);
    }

    trace!(
        "Projected onto segment {index} (t={t:.6}), arclength {:.3} -> {measure_km:.6} km",
        nearest.arclength
    );

    Ok(LinearPosition {
        measure_km,
        projected_point: nearest.point.x_y(),
        arclength_from_start: nearest.arclength,
        offset: nearest.distance,
    })
}
