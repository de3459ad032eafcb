//! Geometry primitives for calibrated (measured) line layers.
//!
//! Provides the measured polyline used by the linear referencing engine,
//! the coordinate reference system identifiers and the transform seam
//! through which a host reprojects points between them.

/// Mean equatorial radius used by the spherical web mercator projection.
pub const EARTH_RADIUS: f64 = 6378137.0;

/// Latitude past which web mercator is undefined.
pub const MERCATOR_MAX_LAT: f64 = 85.051_128_779_806_59;

#[doc(hidden)]
pub mod crs;
#[doc(hidden)]
pub mod error;
#[doc(hidden)]
pub mod line;


#[doc(inline)]
pub use crs::{Crs, Reproject, SphericalMercator};
#[doc(inline)]
pub use error::GeoError;
#[doc(inline)]
pub use line::{MeasuredLine, Vertex};
