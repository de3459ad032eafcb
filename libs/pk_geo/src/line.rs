//! Measured (calibrated) polylines.

use std::str::FromStr;

use geo::{Coord, Point, coord};
use log::trace;
use rstar::{AABB, Envelope};
use wkt::Wkt;

use crate::error::GeoError;

/// A single vertex of a calibrated line: a planar position and the
/// measure (M) value the line carries at that position.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Vertex {
    pub position: Coord<f64>,
    pub measure: f64,
}

impl Vertex {
    pub fn new(x: f64, y: f64, measure: f64) -> Self {
        Vertex {
            position: coord! { x: x, y: y },
            measure,
        }
    }

    #[inline]
    pub fn point(&self) -> Point {
        Point(self.position)
    }
}

impl From<(f64, f64, f64)> for Vertex {
    /// Format is: (x, y, m)
    fn from((x, y, measure): (f64, f64, f64)) -> Self {
        Vertex::new(x, y, measure)
    }
}

/// An ordered sequence of [`Vertex`] values.
///
/// Any vertex list is accepted, including empty and single-vertex lists.
/// Whether a line is usable for resolution is decided by the resolver,
/// which treats fewer than two vertices as a geometry error.
///
/// Measures are expected to be non-decreasing along a well-formed
/// calibrated line, but this is not enforced.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MeasuredLine {
    vertices: Vec<Vertex>,
}

impl MeasuredLine {
    pub fn new(vertices: Vec<Vertex>) -> Self {
        MeasuredLine { vertices }
    }

    /// Parses a `LINESTRING M`, `LINESTRING ZM` or `MULTILINESTRING M`
    /// geometry. Multi-part lines are flattened into a single vertex
    /// sequence, in part order. Z values are discarded.
    ///
    /// ```rust
    /// use pk_geo::MeasuredLine;
    /// let line = MeasuredLine::from_wkt("LINESTRING M (0 0 0, 10 0 10)").unwrap();
    /// assert_eq!(line.len(), 2);
    /// ```
    pub fn from_wkt(value: &str) -> Result<Self, GeoError> {
        let geometry = Wkt::<f64>::from_str(value).map_err(|err| GeoError::Wkt(err.to_string()))?;

        let coords = match geometry {
            Wkt::LineString(wkt::types::LineString(coords)) => coords,
            Wkt::MultiLineString(wkt::types::MultiLineString(parts)) => parts
                .into_iter()
                .flat_map(|wkt::types::LineString(coords)| coords)
                .collect(),
            _ => {
                return Err(GeoError::Wkt(
                    "expected a LINESTRING or MULTILINESTRING geometry".to_string(),
                ));
            }
        };

        trace!("Parsed measured line with {} vertices", coords.len());

        coords
            .into_iter()
            .map(|coord| {
                coord
                    .m
                    .map(|measure| Vertex::new(coord.x, coord.y, measure))
                    .ok_or(GeoError::MissingMeasure)
            })
            .collect::<Result<Vec<_>, _>>()
            .map(MeasuredLine::new)
    }

    #[inline]
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// The measure values, in vertex order.
    pub fn measures(&self) -> impl Iterator<Item = f64> + '_ {
        self.vertices.iter().map(|vertex| vertex.measure)
    }

    /// Every consecutive vertex pair, in order.
    pub fn segments(&self) -> impl Iterator<Item = (&Vertex, &Vertex)> {
        self.vertices.windows(2).map(|pair| (&pair[0], &pair[1]))
    }

    /// The bounding box of all vertices, or `None` for an empty line.
    pub fn envelope(&self) -> Option<AABB<Point>> {
        let mut vertices = self.vertices.iter();
        let first = AABB::from_point(vertices.next()?.point());

        Some(vertices.fold(first, |mut envelope, vertex| {
            envelope.merge(&AABB::from_point(vertex.point()));
            envelope
        }))
    }
}

impl FromStr for MeasuredLine {
    type Err = GeoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MeasuredLine::from_wkt(s)
    }
}

impl FromIterator<Vertex> for MeasuredLine {
    fn from_iter<T: IntoIterator<Item = Vertex>>(iter: T) -> Self {
        MeasuredLine::new(iter.into_iter().collect())
    }
}

impl From<Vec<(f64, f64, f64)>> for MeasuredLine {
    fn from(value: Vec<(f64, f64, f64)>) -> Self {
        value.into_iter().map(Vertex::from).collect()
    }
}
