use geo::{Point, coord};
use log::trace;
use pk_geo::MeasuredLine;

use crate::resolve::{Pk, ResolveError, UnitScale, ensure_resolvable};

#[cfg(feature = "tracing")]
use tracing::Level;

/// Finds the position on `line` whose interpolated measure is `measure_km`.
///
/// The target is rejected as [`ResolveError::OutOfRange`] when it falls
/// outside `[first measure, last measure]`. Otherwise the measures are
/// scanned from the start for the first vertex pair bracketing the target,
/// rather than assuming an evenly calibrated line, and the position is
/// interpolated linearly between that pair. A pair with equal measures
/// resolves to its first vertex.
///
/// The result is in the line's own reference system.
#[cfg_attr(feature = "tracing", tracing::instrument(level = Level::DEBUG, skip(line)))]
pub fn locate(line: &MeasuredLine, measure_km: f64, scale: UnitScale) -> Result<Point, ResolveError> {
    ensure_resolvable(line)?;

    if !measure_km.is_finite() {
        return Err(ResolveError::NonFinite);
    }

    let vertices = line.vertices();
    let (first, last) = (vertices[0].measure, vertices[vertices.len() - 1].measure);

    if measure_km < scale.to_km(first) || measure_km > scale.to_km(last) {
        return Err(ResolveError::OutOfRange {
            measure: Pk(measure_km),
            start: Pk(scale.to_km(first)),
            end: Pk(scale.to_km(last)),
        });
    }

    // Scaling to raw units can drift past either end, 2.007 km -> 2007.0000000000002.
    let target = scale.from_km(measure_km).max(first).min(last);

    let (index, (source, target_vertex)) = line
        .segments()
        .enumerate()
        .find(|(_, (source, target_vertex))| {
            source.measure <= target && target <= target_vertex.measure
        })
        .ok_or(ResolveError::NoBracket(target))?;

    let (m1, m2) = (source.measure, target_vertex.measure);
    let t = if m1 != m2 { (target - m1) / (m2 - m1) } else { 0.0 };

    trace!("Located raw measure {target} on segment {index} (t={t:.6})");

    // Weighted form keeps both segment ends exact at t = 0 and t = 1.
    let (p0, p1) = (source.position, target_vertex.position);
    Ok(Point(coord! {
        x: p0.x * (1.0 - t) + p1.x * t,
        y: p0.y * (1.0 - t) + p1.y * t,
    }))
}
