//! The linear reference resolver.
//!
//! Converts between a planar position near a calibrated line and the
//! kilometer-point (PK) the line's measures assign to it, in both
//! directions. Everything here is pure: no I/O, no shared state.

#[doc(hidden)]
pub mod cumulative;
#[doc(hidden)]
pub mod error;
#[doc(hidden)]
pub mod locate;
#[doc(hidden)]
pub mod nearest;
#[doc(hidden)]
pub mod pk;
#[doc(hidden)]
pub mod project;
#[doc(hidden)]
#[cfg(test)]
mod test;

#[doc(inline)]
pub use cumulative::CumulativeLength;
#[doc(inline)]
pub use error::ResolveError;
#[doc(inline)]
pub use locate::locate;
#[doc(inline)]
pub use nearest::{NearestPoint, nearest_point};
#[doc(inline)]
pub use pk::{Pk, UnitScale, format_pk};
#[doc(inline)]
pub use project::{LinearPosition, project, project_nearest};

use pk_geo::MeasuredLine;

/// The minimum vertex count a line needs before it can be resolved against.
pub const MIN_VERTICES: usize = 2;

#[inline]
pub(crate) fn ensure_resolvable(line: &MeasuredLine) -> Result<(), ResolveError> {
    if line.len() < MIN_VERTICES {
        return Err(ResolveError::TooFewVertices(line.len()));
    }

    Ok(())
}
