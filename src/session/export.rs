//! The point layer PKs are exported into.

use std::io::{self, Write};

use geo::Point;
use log::debug;
use pk_geo::Crs;
use serde::{Deserialize, Serialize};
use wkt::ToWkt;

/// Road identifier column of an export layer.
pub const VIA_FIELD: &str = "VIA";
/// Formatted PK column of an export layer.
pub const PK_FIELD: &str = "PK";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ExportedPoint {
    pub via: String,
    pub pk: String,
    pub point: (f64, f64),
}

impl ExportedPoint {
    #[inline]
    pub fn point(&self) -> Point {
        Point::from(self.point)
    }
}

/// An in-memory point layer with exactly two text fields, [`VIA_FIELD`]
/// and [`PK_FIELD`].
#[derive(Clone, Debug, PartialEq)]
pub struct ExportLayer {
    name: String,
    crs: Crs,
    points: Vec<ExportedPoint>,
}

impl ExportLayer {
    pub fn new(name: impl Into<String>, crs: Crs) -> Self {
        let name = name.into();
        debug!("Created export layer '{name}' in {crs}");

        ExportLayer {
            name,
            crs,
            points: vec![],
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn crs(&self) -> Crs {
        self.crs
    }

    pub fn fields(&self) -> [&'static str; 2] {
        [VIA_FIELD, PK_FIELD]
    }

    pub fn points(&self) -> &[ExportedPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn push(&mut self, via: impl Into<String>, pk: impl Into<String>, point: Point) {
        self.points.push(ExportedPoint {
            via: via.into(),
            pk: pk.into(),
            point: point.x_y(),
        });
    }

    /// Writes the layer as tab separated text: a `#crs=` header, the
    /// column names, then one `VIA PK WKT` row per point.
    pub fn write_tsv(&self, mut writer: impl Write) -> io::Result<()> {
        writeln!(writer, "#crs={}", self.crs)?;
        writeln!(writer, "{VIA_FIELD}\t{PK_FIELD}\tWKT")?;

        for exported in &self.points {
            writeln!(
                writer,
                "{}\t{}\t{}",
                exported.via,
                exported.pk,
                exported.point().wkt_string()
            )?;
        }

        Ok(())
    }
}
