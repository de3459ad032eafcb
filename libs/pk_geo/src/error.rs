use crate::crs::Crs;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeoError {
    #[error("invalid coordinate: {0}")]
    InvalidCoordinate(String),

    #[error("geometry carries no measure (M) values")]
    MissingMeasure,

    #[error("could not parse WKT: {0}")]
    Wkt(String),

    #[error("no transform available from {from} to {to}")]
    UnsupportedTransform { from: Crs, to: Crs },
}
