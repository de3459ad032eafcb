//! Coordinate reference systems, and projection between them.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use geo::Point;

use crate::error::GeoError;
use crate::{EARTH_RADIUS, MERCATOR_MAX_LAT};

/// An EPSG coordinate reference system code.
///
/// ```rust
/// use pk_geo::Crs;
/// let crs: Crs = "EPSG:3857".parse().unwrap();
/// assert_eq!(crs, Crs::WEB_MERCATOR);
/// assert_eq!(crs.to_string(), "EPSG:3857");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Crs(pub u32);

impl Crs {
    /// Geographic longitude/latitude in degrees.
    pub const WGS84: Crs = Crs(4326);

    /// Spherical web mercator in meters.
    pub const WEB_MERCATOR: Crs = Crs(3857);
}

impl Default for Crs {
    fn default() -> Self {
        Crs::WGS84
    }
}

impl Display for Crs {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "EPSG:{}", self.0)
    }
}

impl FromStr for Crs {
    type Err = GeoError;

    /// Accepts `EPSG:<code>` (any case) or a bare numeric code.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let code = match trimmed.split_once(':') {
            Some((authority, code)) if authority.eq_ignore_ascii_case("epsg") => code,
            Some(_) => {
                return Err(GeoError::InvalidCoordinate(format!(
                    "Unsupported CRS authority in '{trimmed}'"
                )));
            }
            None => trimmed,
        };

        code.trim()
            .parse::<u32>()
            .map(Crs)
            .map_err(|_| GeoError::InvalidCoordinate(format!("Invalid CRS code '{trimmed}'")))
    }
}

/// Allows for reprojection of a position between two reference systems.
///
/// The linear referencing engine always operates in the layer's own
/// reference system; hosts supply an implementation of this trait so that
/// map clicks can be brought into it, and results taken back out.
pub trait Reproject {
    /// Transforms `point` from the `from` system into the `to` system.
    fn transform(&self, point: Point, from: Crs, to: Crs) -> Result<Point, GeoError>;
}

/// The built-in transform, supporting the identity and the
/// EPSG:4326 <-> EPSG:3857 pair.
///
/// *Learn more [here](https://en.wikipedia.org/wiki/Web_Mercator_projection?useskin=vector).*
#[derive(Clone, Copy, Debug, Default)]
pub struct SphericalMercator;

impl SphericalMercator {
    /// Projects a longitude/latitude position (degrees) into web mercator meters.
    pub fn forward(value: Point) -> Result<Point, GeoError> {
        let (lng, lat) = value.x_y();

        if !(-180.0..=180.0).contains(&lng) {
            return Err(GeoError::InvalidCoordinate(format!(
                "Longitude must be within [-180, 180]. Given: {lng}"
            )));
        }

        if !(-MERCATOR_MAX_LAT..=MERCATOR_MAX_LAT).contains(&lat) {
            return Err(GeoError::InvalidCoordinate(format!(
                "Latitude must be within web mercator bounds. Given: {lat}"
            )));
        }

        let x = EARTH_RADIUS * lng.to_radians();
        let y = EARTH_RADIUS * (std::f64::consts::FRAC_PI_4 + lat.to_radians() / 2.0).tan().ln();

        Ok(Point::new(x, y))
    }

    /// Recovers the longitude/latitude (degrees) of a web mercator position.
    pub fn inverse(value: Point) -> Point {
        let (x, y) = value.x_y();

        let lng = (x / EARTH_RADIUS).to_degrees();
        let lat = (2.0 * (y / EARTH_RADIUS).exp().atan() - std::f64::consts::FRAC_PI_2).to_degrees();

        Point::new(lng, lat)
    }
}

impl Reproject for SphericalMercator {
    fn transform(&self, point: Point, from: Crs, to: Crs) -> Result<Point, GeoError> {
        match (from, to) {
            (from, to) if from == to => Ok(point),
            (Crs::WGS84, Crs::WEB_MERCATOR) => SphericalMercator::forward(point),
            (Crs::WEB_MERCATOR, Crs::WGS84) => Ok(SphericalMercator::inverse(point)),
            (from, to) => Err(GeoError::UnsupportedTransform { from, to }),
        }
    }
}
